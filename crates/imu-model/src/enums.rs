//! Type-safe enumerations for the canonical column scheme.
//!
//! Canonical identifiers have the shape `SEGMENT_SENSOR_AXIS`, where a
//! bilateral segment carries an `L_`/`R_` prefix and a midline segment does
//! not. These enums are the compile-time form of that scheme; the raw-token
//! side of the world (keyword lists, spellings) lives in
//! [`crate::vocabulary`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Body side of a sensor placement.
///
/// `None` is the valid side for midline segments (pelvis, trunk, head,
/// neck), not a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    None,
}

impl Side {
    /// Returns the canonical identifier prefix, without trailing separator.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Side::Left => Some("L"),
            Side::Right => Some("R"),
            Side::None => None,
        }
    }

    /// Returns true for `Left` or `Right`.
    pub fn is_lateral(&self) -> bool {
        !matches!(self, Side::None)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("L"),
            Side::Right => f.write_str("R"),
            Side::None => f.write_str("-"),
        }
    }
}

/// Canonical body segments for wearable sensor placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BodySegment {
    Foot,
    Ankle,
    Shank,
    Thigh,
    Pelvis,
    Trunk,
    Shoulder,
    ArmUpper,
    ArmLower,
    Hand,
    Neck,
    Head,
}

impl BodySegment {
    /// Returns the canonical name as it appears in column identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            BodySegment::Foot => "FOOT",
            BodySegment::Ankle => "ANKLE",
            BodySegment::Shank => "SHANK",
            BodySegment::Thigh => "THIGH",
            BodySegment::Pelvis => "PELVIS",
            BodySegment::Trunk => "TRUNK",
            BodySegment::Shoulder => "SHOULDER",
            BodySegment::ArmUpper => "ARM_UPPER",
            BodySegment::ArmLower => "ARM_LOWER",
            BodySegment::Hand => "HAND",
            BodySegment::Neck => "NECK",
            BodySegment::Head => "HEAD",
        }
    }

    /// Midline segments have no left/right instance and are never prefixed.
    pub fn is_midline(&self) -> bool {
        matches!(
            self,
            BodySegment::Pelvis | BodySegment::Trunk | BodySegment::Neck | BodySegment::Head
        )
    }

    /// Bilateral segments require `L_`/`R_` in the canonical identifier.
    pub fn is_bilateral(&self) -> bool {
        !self.is_midline()
    }

    /// All segments, in the order the canonical scheme enumerates them.
    pub fn all() -> &'static [BodySegment] {
        &[
            BodySegment::Foot,
            BodySegment::Ankle,
            BodySegment::Shank,
            BodySegment::Thigh,
            BodySegment::Pelvis,
            BodySegment::Trunk,
            BodySegment::Shoulder,
            BodySegment::ArmUpper,
            BodySegment::ArmLower,
            BodySegment::Hand,
            BodySegment::Neck,
            BodySegment::Head,
        ]
    }
}

impl fmt::Display for BodySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodySegment {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        BodySegment::all()
            .iter()
            .copied()
            .find(|segment| segment.as_str() == normalized)
            .ok_or_else(|| ModelError::InvalidSegment(s.to_string()))
    }
}

/// Inertial sensor modalities covered by the canonical scheme.
///
/// Any raw sensor keyword outside these three leaves a column unclassified
/// and excluded from the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorType {
    /// Accelerometer.
    Acc,
    /// Gyroscope (including angular velocity channels).
    Gyr,
    /// Magnetometer.
    Mag,
}

impl SensorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Acc => "ACC",
            SensorType::Gyr => "GYR",
            SensorType::Mag => "MAG",
        }
    }

    /// All sensor types, in canonical enumeration order.
    pub fn all() -> &'static [SensorType] {
        &[SensorType::Acc, SensorType::Gyr, SensorType::Mag]
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACC" => Ok(SensorType::Acc),
            "GYR" => Ok(SensorType::Gyr),
            "MAG" => Ok(SensorType::Mag),
            _ => Err(ModelError::InvalidSensor(s.to_string())),
        }
    }
}

/// Measurement axis, always uppercase in canonical identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    pub fn all() -> &'static [Axis] {
        &[Axis::X, Axis::Y, Axis::Z]
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = ModelError;

    /// Parses an axis token case-insensitively (`x`, `X`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "X" => Ok(Axis::X),
            "Y" => Ok(Axis::Y),
            "Z" => Ok(Axis::Z),
            _ => Err(ModelError::InvalidAxis(s.to_string())),
        }
    }
}
