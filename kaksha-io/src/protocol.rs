//! Wire protocol for serial-attached boards.
//!
//! Newline-delimited JSON in both directions. Commands:
//!
//! ```text
//! {"cmd":"vel","linear":0.2,"angular":0.0}
//! {"cmd":"stop"}
//! {"cmd":"odom"}          -> {"x":1.0,"y":2.0,"heading":0.5,"ok":true}
//! {"cmd":"scan"}          -> {"distances":[1.2,0.8,...],"ok":true}
//! ```

use serde::{Deserialize, Serialize};

/// Command sent to a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum WireCommand {
    /// Set chassis velocity
    Vel { linear: f32, angular: f32 },
    /// Stop the chassis
    Stop,
    /// Request odometry
    Odom,
    /// Request a range scan
    Scan,
}

/// Odometry reply from the chassis board.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OdomReply {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    #[serde(default)]
    pub ok: bool,
}

/// Scan reply from the sensor board.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ScanReply {
    pub distances: Vec<f32>,
    #[serde(default)]
    pub ok: bool,
}

/// Encode a command as a single protocol line (newline included).
pub fn encode_line(command: &WireCommand) -> crate::Result<String> {
    let mut line = serde_json::to_string(command)?;
    line.push('\n');
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vel_command_encoding() {
        let line = encode_line(&WireCommand::Vel {
            linear: 0.25,
            angular: -0.5,
        })
        .unwrap();
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["cmd"], "vel");
        assert_eq!(value["linear"], 0.25);
        assert_eq!(value["angular"], -0.5);
    }

    #[test]
    fn test_bare_command_encoding() {
        let line = encode_line(&WireCommand::Stop).unwrap();
        assert_eq!(line.trim(), r#"{"cmd":"stop"}"#);
        let line = encode_line(&WireCommand::Scan).unwrap();
        assert_eq!(line.trim(), r#"{"cmd":"scan"}"#);
    }

    #[test]
    fn test_odom_reply_decoding() {
        let reply: OdomReply =
            serde_json::from_str(r#"{"x":1.0,"y":2.0,"heading":0.5,"ok":true}"#).unwrap();
        assert_eq!(reply.x, 1.0);
        assert_eq!(reply.heading, 0.5);
        assert!(reply.ok);
    }

    #[test]
    fn test_scan_reply_decoding() {
        let reply: ScanReply =
            serde_json::from_str(r#"{"distances":[1.5,0.75,2.0],"ok":true}"#).unwrap();
        assert_eq!(reply.distances.len(), 3);
        assert_eq!(reply.distances[1], 0.75);
    }

    #[test]
    fn test_reply_missing_ok_defaults_false() {
        let reply: ScanReply = serde_json::from_str(r#"{"distances":[]}"#).unwrap();
        assert!(!reply.ok);
    }
}
