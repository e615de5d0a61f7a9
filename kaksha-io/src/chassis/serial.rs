//! Serial-attached chassis (ESP32/Arduino motor controller).

use super::Chassis;
use crate::error::Result;
use crate::protocol::{OdomReply, WireCommand};
use crate::serial_link::SerialLink;
use kaksha_map::Pose2D;
use std::time::Duration;

/// Chassis backend speaking the JSON line protocol over UART.
///
/// Velocity and stop commands are fire-and-forget; odometry reads cache
/// the last good reply so a dropped line degrades to slightly stale
/// data instead of an error mid-navigation.
pub struct SerialChassis {
    link: Option<SerialLink>,
    last_odom: Pose2D,
}

impl SerialChassis {
    /// Open the chassis board on the given port.
    pub fn open(path: &str, baud_rate: u32) -> Result<Self> {
        let link = SerialLink::open(path, baud_rate, Duration::from_secs(1))?;
        Ok(Self {
            link: Some(link),
            last_odom: Pose2D::identity(),
        })
    }

    fn link_mut(&mut self) -> Option<&mut SerialLink> {
        self.link.as_mut()
    }
}

impl Chassis for SerialChassis {
    fn set_velocity(&mut self, linear: f32, angular: f32) -> Result<()> {
        match self.link_mut() {
            Some(link) => link.send(&WireCommand::Vel { linear, angular }),
            None => {
                log::debug!("set_velocity dropped: chassis closed");
                Ok(())
            }
        }
    }

    fn stop(&mut self) -> Result<()> {
        match self.link_mut() {
            Some(link) => link.send(&WireCommand::Stop),
            None => Ok(()),
        }
    }

    fn odometry(&mut self) -> Pose2D {
        if let Some(link) = self.link.as_mut() {
            match link.request::<OdomReply>(&WireCommand::Odom) {
                Ok(reply) => {
                    self.last_odom = Pose2D::new(reply.x, reply.y, reply.heading);
                }
                Err(e) => {
                    log::warn!("odometry read failed, using cached pose: {e}");
                }
            }
        }
        self.last_odom
    }

    fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    fn close(&mut self) -> Result<()> {
        if let Some(link) = self.link.as_mut() {
            // Best effort: stop the motors before dropping the port
            if let Err(e) = link.send(&WireCommand::Stop) {
                log::warn!("stop on close failed: {e}");
            }
            log::info!("closed chassis on {}", link.path());
        }
        self.link = None;
        Ok(())
    }
}
