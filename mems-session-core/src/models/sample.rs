use std::fmt;

use chrono::{DateTime, Utc};

/// Motion-sensor channel. Channel A is the gyroscope, channel B the accelerometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    Gyroscope,
    Accelerometer,
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelId::Gyroscope => f.write_str("gyroscope"),
            ChannelId::Accelerometer => f.write_str("accelerometer"),
        }
    }
}

/// A three-axis reading as delivered by a sensor source.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RawSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A reading stamped with the wall-clock instant it arrived at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn stamped(raw: RawSample, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            x: raw.x,
            y: raw.y,
            z: raw.z,
        }
    }
}
