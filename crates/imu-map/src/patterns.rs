//! Structural patterns: how a raw column name splits into (sensor, segment,
//! axis) substrings.
//!
//! Each pattern is an anchored regex with exactly three capture groups plus
//! the semantic role each group carries. Patterns live in a [`PatternSet`]
//! whose order is the documented attempt priority for ambiguous names: the
//! all-lowercase word triple first, the two Xsens shapes next, the
//! permissive sensor/axis/segment shape last.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Semantic role of one capture group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Sensor,
    Segment,
    Axis,
}

/// Identity of a registered structural pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatternId {
    /// `accelerometer_right_foot_x` — lowercase words, HuGaDB style.
    HugadbWords,
    /// `angularVelocity_RightFoot_x` — fixed sensor word, Xsens computed
    /// channels.
    XsensAngularVelocity,
    /// `sensorFreeAcceleration_RightFoot_x` — `sensor`-prefixed camel-case
    /// word, Xsens raw channels.
    XsensCamelSensor,
    /// `Acc_X_LThigh` — sensor and axis first, segment last.
    SensorAxisSegment,
}

impl PatternId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternId::HugadbWords => "hugadb-words",
            PatternId::XsensAngularVelocity => "xsens-angular-velocity",
            PatternId::XsensCamelSensor => "xsens-camel-sensor",
            PatternId::SensorAxisSegment => "sensor-axis-segment",
        }
    }

    /// A raw name in the pattern's shape, for listings and prompts.
    pub fn example(&self) -> &'static str {
        match self {
            PatternId::HugadbWords => "accelerometer_right_foot_x",
            PatternId::XsensAngularVelocity => "angularVelocity_RightFoot_x",
            PatternId::XsensCamelSensor => "sensorFreeAcceleration_RightFoot_x",
            PatternId::SensorAxisSegment => "Acc_X_LThigh",
        }
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three raw substrings extracted from one column name.
///
/// A fresh value per extraction; nothing is shared between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParts {
    pub sensor: String,
    pub segment: String,
    pub axis: String,
}

/// An anchored three-group regex with declared group roles.
#[derive(Debug, Clone)]
pub struct StructuralPattern {
    id: PatternId,
    regex: Regex,
    roles: [Role; 3],
}

impl StructuralPattern {
    fn new(id: PatternId, pattern: &str, roles: [Role; 3]) -> Self {
        let regex = Regex::new(pattern).expect("built-in structural pattern compiles");
        Self { id, regex, roles }
    }

    pub fn id(&self) -> PatternId {
        self.id
    }

    pub fn as_regex_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Structural shape test only; semantic success is not considered.
    pub fn matches(&self, raw: &str) -> bool {
        self.regex.is_match(raw)
    }

    /// Splits `raw` into its three role-tagged substrings, or `None` if the
    /// shape does not match.
    pub fn extract(&self, raw: &str) -> Option<RawParts> {
        let caps = self.regex.captures(raw)?;
        let mut sensor = None;
        let mut segment = None;
        let mut axis = None;
        for (index, role) in self.roles.iter().enumerate() {
            let text = caps.get(index + 1)?.as_str().to_string();
            match role {
                Role::Sensor => sensor = Some(text),
                Role::Segment => segment = Some(text),
                Role::Axis => axis = Some(text),
            }
        }
        Some(RawParts {
            sensor: sensor?,
            segment: segment?,
            axis: axis?,
        })
    }
}

static BUILTIN_PATTERNS: LazyLock<Vec<StructuralPattern>> = LazyLock::new(|| {
    vec![
        StructuralPattern::new(
            PatternId::HugadbWords,
            r"^([a-z]+)_([a-z]+(?:_[a-z]+)?)_([xyz])$",
            [Role::Sensor, Role::Segment, Role::Axis],
        ),
        StructuralPattern::new(
            PatternId::XsensAngularVelocity,
            r"^(angularVelocity)_([A-Za-z]+)_([xyzXYZ])$",
            [Role::Sensor, Role::Segment, Role::Axis],
        ),
        StructuralPattern::new(
            PatternId::XsensCamelSensor,
            r"^(sensor[A-Za-z]+)_([A-Za-z]+)_([xyzXYZ])$",
            [Role::Sensor, Role::Segment, Role::Axis],
        ),
        StructuralPattern::new(
            PatternId::SensorAxisSegment,
            r"^([A-Za-z]+)_([xyzXYZ])_([A-Za-z]+)$",
            [Role::Sensor, Role::Axis, Role::Segment],
        ),
    ]
});

/// The ordered collection of structural patterns a run attempts.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<StructuralPattern>,
}

impl PatternSet {
    /// The built-in registry, in documented priority order.
    pub fn builtin() -> Self {
        Self {
            patterns: BUILTIN_PATTERNS.clone(),
        }
    }

    pub fn patterns(&self) -> &[StructuralPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// A copy with `preferred` moved to the front; relative order of the
    /// rest is unchanged. Used when convention detection found a dominant
    /// pattern — the full list still serves as fallback.
    pub fn with_preferred(&self, preferred: PatternId) -> Self {
        let mut patterns = Vec::with_capacity(self.patterns.len());
        for pattern in &self.patterns {
            if pattern.id == preferred {
                patterns.insert(0, pattern.clone());
            } else {
                patterns.push(pattern.clone());
            }
        }
        Self { patterns }
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::builtin()
    }
}
