//! Serial transport for line-oriented JSON boards.

use crate::error::Result;
use crate::protocol::WireCommand;
use serde::de::DeserializeOwned;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{Read, Write};
use std::time::{Duration, Instant};

/// Line-oriented serial port wrapper.
///
/// Owns the port; sends one JSON command per line and reads one JSON
/// reply per line with a bounded wait.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    path: String,
    read_timeout: Duration,
}

impl SerialLink {
    /// Open a serial port at 8N1 with no flow control.
    pub fn open(path: &str, baud_rate: u32, read_timeout: Duration) -> Result<Self> {
        let port = serialport::new(path, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(20))
            .open()?;

        log::info!("opened serial port {path} at {baud_rate} baud");

        Ok(Self {
            port,
            path: path.to_string(),
            read_timeout,
        })
    }

    /// Port device path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Send a command line.
    pub fn send(&mut self, command: &WireCommand) -> Result<()> {
        let line = crate::protocol::encode_line(command)?;
        self.port.write_all(line.as_bytes())?;
        self.port.flush()?;
        Ok(())
    }

    /// Send a command and decode the next reply line.
    pub fn request<T: DeserializeOwned>(&mut self, command: &WireCommand) -> Result<T> {
        self.send(command)?;
        let line = self.read_line()?;
        Ok(serde_json::from_str(&line)?)
    }

    /// Read bytes until a newline or the read timeout elapses.
    fn read_line(&mut self) -> Result<String> {
        let deadline = Instant::now() + self.read_timeout;
        let mut line = Vec::new();
        let mut byte = [0u8; 1];

        while Instant::now() < deadline {
            match self.port.read(&mut byte) {
                Ok(1) => {
                    if byte[0] == b'\n' {
                        let text = String::from_utf8_lossy(&line).trim().to_string();
                        return Ok(text);
                    }
                    line.push(byte[0]);
                }
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(e) => return Err(e.into()),
            }
        }

        Err(crate::IoError::Protocol(format!(
            "no reply line from {} within {:?}",
            self.path, self.read_timeout
        )))
    }
}
