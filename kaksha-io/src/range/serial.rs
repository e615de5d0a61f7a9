//! Serial-attached range sensor board (lidar ring or ultrasonic fan).

use super::{CallbackRegistry, ObstacleCallback, RangeSensor};
use crate::error::Result;
use crate::protocol::{ScanReply, WireCommand};
use crate::serial_link::SerialLink;
use kaksha_map::Pose2D;
use kaksha_map::core::math::TWO_PI;
use std::time::Duration;

/// Range sensor backend polling a physical board over UART.
///
/// The board reports one distance per sensor in fixed order. While no
/// scan has been received every direction reads `f32::INFINITY` - the
/// "no obstacle within range" sentinel.
pub struct SerialRangeSensor {
    link: Option<SerialLink>,
    num_sensors: usize,
    safe_distance_m: f32,
    last_distances: Vec<f32>,
    callbacks: CallbackRegistry,
}

impl SerialRangeSensor {
    /// Open the sensor board on the given port.
    pub fn open(path: &str, baud_rate: u32, num_sensors: usize, safe_distance_m: f32) -> Result<Self> {
        let link = SerialLink::open(path, baud_rate, Duration::from_secs(1))?;
        Ok(Self {
            link: Some(link),
            num_sensors,
            safe_distance_m,
            last_distances: vec![f32::INFINITY; num_sensors],
            callbacks: CallbackRegistry::default(),
        })
    }
}

impl RangeSensor for SerialRangeSensor {
    fn distances(&mut self, _pose: Pose2D) -> Vec<f32> {
        if let Some(link) = self.link.as_mut() {
            match link.request::<ScanReply>(&WireCommand::Scan) {
                Ok(reply) if reply.distances.len() == self.num_sensors => {
                    self.last_distances = reply.distances;
                }
                Ok(reply) => {
                    log::warn!(
                        "scan returned {} readings, expected {}",
                        reply.distances.len(),
                        self.num_sensors
                    );
                }
                Err(e) => {
                    log::warn!("scan failed, keeping last readings: {e}");
                }
            }
        }

        if self
            .last_distances
            .iter()
            .any(|&d| d < self.safe_distance_m)
        {
            let readings = self.last_distances.clone();
            self.callbacks.notify(&readings);
        }

        self.last_distances.clone()
    }

    fn is_direction_clear(&mut self, _pose: Pose2D, direction: f32, distance: f32) -> bool {
        if self.num_sensors == 0 {
            return true;
        }
        let index = nearest_sensor_index(direction, self.num_sensors);
        self.last_distances[index] >= distance
    }

    fn on_obstacle(&mut self, callback: ObstacleCallback) {
        self.callbacks.register(callback);
    }

    fn close(&mut self) {
        if let Some(link) = self.link.take() {
            log::info!("closed range sensor on {}", link.path());
        }
    }
}

/// Map a relative direction onto the nearest sensor index for a fan of
/// `num_sensors` evenly spaced clockwise from dead ahead.
fn nearest_sensor_index(direction: f32, num_sensors: usize) -> usize {
    let direction = direction.rem_euclid(TWO_PI);
    let spacing = TWO_PI / num_sensors as f32;
    (direction / spacing).round() as usize % num_sensors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_nearest_sensor_index_cardinal_directions() {
        assert_eq!(nearest_sensor_index(0.0, 8), 0);
        assert_eq!(nearest_sensor_index(FRAC_PI_4, 8), 1);
        assert_eq!(nearest_sensor_index(FRAC_PI_2, 8), 2);
        assert_eq!(nearest_sensor_index(PI, 8), 4);
        // Negative directions wrap around the fan
        assert_eq!(nearest_sensor_index(-FRAC_PI_2, 8), 6);
        assert_eq!(nearest_sensor_index(-FRAC_PI_4, 8), 7);
    }

    #[test]
    fn test_nearest_sensor_index_rounds_to_closest() {
        // 50 degrees is closer to the 45-degree sensor than to 90
        assert_eq!(nearest_sensor_index(50.0_f32.to_radians(), 8), 1);
        assert_eq!(nearest_sensor_index(70.0_f32.to_radians(), 8), 2);
    }
}

