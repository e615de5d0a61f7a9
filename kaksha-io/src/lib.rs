//! # Kaksha-IO: Hardware Abstraction for the Kaksha Office Robot
//!
//! Capability-based interfaces for the robot's hardware, each with a
//! simulated and a serial-attached implementation selected at
//! construction time:
//!
//! - [`chassis::Chassis`]: velocity control and odometry.
//!   [`chassis::MockChassis`] integrates differential-drive kinematics
//!   in software; [`chassis::SerialChassis`] speaks newline-delimited
//!   JSON to a microcontroller over UART.
//! - [`range::RangeSensor`]: N-directional obstacle distances.
//!   [`range::GridRangeSensor`] ray-marches a shared floor plan;
//!   [`range::SerialRangeSensor`] polls a sensor board.
//! - [`motion::Drive`]: waypoint-following strategies. The
//!   point-to-point and differential-drive modes are mutually exclusive
//!   strategy implementations, not modes of one object.
//!
//! All components are synchronous: nothing here spawns threads or
//! blocks beyond a serial read timeout.

pub mod chassis;
pub mod error;
pub mod motion;
pub mod protocol;
pub mod range;
pub mod serial_link;

pub use chassis::{Chassis, MockChassis, SerialChassis};
pub use error::{IoError, Result};
pub use motion::{DiffDrive, Drive, PointDrive};
pub use range::{GridRangeSensor, RangeSensor, SerialRangeSensor};
