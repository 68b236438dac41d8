#![deny(unsafe_code)]

//! The canonical column identifier and its round-trip parser.

use std::fmt;
use std::str::FromStr;

use crate::enums::{Axis, BodySegment, SensorType, Side};
use crate::{ModelError, Result};

/// A fully classified canonical column identifier.
///
/// Rendered as `{SEGMENT}_{SENSOR}_{AXIS}`, where the segment carries an
/// `L_`/`R_` prefix when bilateral and no prefix when midline. Every value
/// of this type parses back into the same (side, segment, sensor, axis)
/// tuple that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalColumnId {
    side: Side,
    segment: BodySegment,
    sensor: SensorType,
    axis: Axis,
}

impl CanonicalColumnId {
    /// Builds an identifier, enforcing the side/segment invariant: midline
    /// segments take `Side::None`, bilateral segments take `Left` or
    /// `Right`.
    pub fn new(side: Side, segment: BodySegment, sensor: SensorType, axis: Axis) -> Result<Self> {
        if segment.is_midline() && side.is_lateral() {
            return Err(ModelError::MidlineWithSide {
                segment: segment.as_str().to_string(),
                side: side.to_string(),
            });
        }
        if segment.is_bilateral() && !side.is_lateral() {
            return Err(ModelError::BilateralWithoutSide(segment.as_str().to_string()));
        }
        Ok(Self {
            side,
            segment,
            sensor,
            axis,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn segment(&self) -> BodySegment {
        self.segment
    }

    pub fn sensor(&self) -> SensorType {
        self.sensor
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The segment part of the identifier, side prefix included.
    pub fn segment_label(&self) -> String {
        match self.side.prefix() {
            Some(prefix) => format!("{prefix}_{}", self.segment.as_str()),
            None => self.segment.as_str().to_string(),
        }
    }
}

impl fmt::Display for CanonicalColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.side.prefix() {
            write!(f, "{prefix}_")?;
        }
        write!(
            f,
            "{}_{}_{}",
            self.segment.as_str(),
            self.sensor.as_str(),
            self.axis.as_str()
        )
    }
}

impl FromStr for CanonicalColumnId {
    type Err = ModelError;

    /// Parses `[L_|R_]SEGMENT_SENSOR_AXIS` by locating the sensor infix.
    ///
    /// The sensor code is the only token with a fixed three-letter spelling,
    /// so splitting on `_ACC_`/`_GYR_`/`_MAG_` recovers the segment (which
    /// may itself contain underscores, e.g. `ARM_UPPER`) and the axis.
    fn from_str(s: &str) -> Result<Self> {
        for sensor in SensorType::all() {
            let infix = format!("_{}_", sensor.as_str());
            let Some((prefix, axis_part)) = s.split_once(&infix) else {
                continue;
            };
            let axis = Axis::from_str(axis_part)
                .map_err(|_| ModelError::InvalidCanonicalId(s.to_string()))?;
            let (side, segment_part) = match prefix.split_once('_') {
                Some(("L", rest)) => (Side::Left, rest),
                Some(("R", rest)) => (Side::Right, rest),
                _ => (Side::None, prefix),
            };
            let segment = BodySegment::from_str(segment_part)
                .map_err(|_| ModelError::InvalidCanonicalId(s.to_string()))?;
            return CanonicalColumnId::new(side, segment, *sensor, axis);
        }
        Err(ModelError::InvalidCanonicalId(s.to_string()))
    }
}

impl serde::Serialize for CanonicalColumnId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CanonicalColumnId {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        use serde::Deserialize;
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
