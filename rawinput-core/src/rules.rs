//! Per-channel axis and button rules
//!
//! Field names and defaults follow the persisted settings layout, so these
//! types are deserialized straight out of the config document.

use crate::key::LogicalKey;
use serde::{Deserialize, Serialize};

/// Value range an axis reports in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisRange {
    /// Triggers, throttles, pedals: 0.0 to 1.0
    Unipolar,
    /// Sticks: -1.0 to 1.0
    Bipolar,
}

impl AxisRange {
    /// Nominal (min, max) of the range
    pub fn bounds(self) -> (f32, f32) {
        match self {
            AxisRange::Unipolar => (0.0, 1.0),
            AxisRange::Bipolar => (-1.0, 1.0),
        }
    }

    /// Mirror a value within the range
    pub fn invert(self, value: f32) -> f32 {
        match self {
            AxisRange::Unipolar => 1.0 - value,
            AxisRange::Bipolar => -value,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AxisRange::Unipolar => "unipolar",
            AxisRange::Bipolar => "bipolar",
        }
    }
}

/// Remapping rule for one raw axis channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisRule {
    /// Whether the axis is enabled. A disabled rule keeps its other fields.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Logical key the axis value is emitted to
    #[serde(default)]
    pub key: LogicalKey,
    /// Whether the driver-supplied value is inverted
    #[serde(default)]
    pub inverted: bool,
    /// Stick-style axis reporting -1..1 instead of 0..1.
    /// Changes how the value is interpreted, never rescales it.
    #[serde(default, rename = "gamepad_stick")]
    pub bipolar: bool,
    /// Added to the value after inversion
    #[serde(default)]
    pub offset: f32,
}

pub(crate) fn default_true() -> bool {
    true
}

impl Default for AxisRule {
    fn default() -> Self {
        Self {
            enabled: true,
            key: LogicalKey::default(),
            inverted: false,
            bipolar: false,
            offset: 0.0,
        }
    }
}

impl AxisRule {
    /// Enabled, non-inverted unipolar rule emitting to `key`
    pub fn new(key: impl Into<LogicalKey>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    pub fn bipolar(mut self) -> Self {
        self.bipolar = true;
        self
    }

    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn range(&self) -> AxisRange {
        if self.bipolar {
            AxisRange::Bipolar
        } else {
            AxisRange::Unipolar
        }
    }

    /// Inversion, then offset. Ignores `enabled`; callers gate on it.
    pub fn apply(&self, raw: f32) -> f32 {
        let value = if self.inverted {
            self.range().invert(raw)
        } else {
            raw
        };
        value + self.offset
    }
}

/// Remapping rule for one raw button channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonRule {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub key: LogicalKey,
}

impl Default for ButtonRule {
    fn default() -> Self {
        Self {
            enabled: true,
            key: LogicalKey::default(),
        }
    }
}

impl ButtonRule {
    pub fn new(key: impl Into<LogicalKey>) -> Self {
        Self {
            enabled: true,
            key: key.into(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            key: LogicalKey::default(),
        }
    }
}
