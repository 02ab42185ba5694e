//! Value types that appear inside commands: durations, ranges and
//! coordinates.

use std::fmt;

use crate::error::CommandError;

// ── Duration ───────────────────────────────────────────────────────────

const TICKS_PER_SECOND: i64 = 20;
const TICKS_PER_DAY: i64 = 24_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Ticks,
    Seconds,
    Days,
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DurationUnit::Ticks => "t",
            DurationUnit::Seconds => "s",
            DurationUnit::Days => "d",
        })
    }
}

/// A game-time duration such as `20t`, `3s` or `1d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    pub value: i64,
    pub unit: DurationUnit,
}

impl Duration {
    pub fn ticks(value: i64) -> Self {
        Self {
            value,
            unit: DurationUnit::Ticks,
        }
    }

    pub fn seconds(value: i64) -> Self {
        Self {
            value,
            unit: DurationUnit::Seconds,
        }
    }

    pub fn days(value: i64) -> Self {
        Self {
            value,
            unit: DurationUnit::Days,
        }
    }

    pub fn to_ticks(self) -> i64 {
        match self.unit {
            DurationUnit::Ticks => self.value,
            DurationUnit::Seconds => self.value * TICKS_PER_SECOND,
            DurationUnit::Days => self.value * TICKS_PER_DAY,
        }
    }

    pub fn multiply(self, factor: i64) -> Self {
        Self {
            value: self.value * factor,
            unit: self.unit,
        }
    }

    /// Sum of two durations in the same unit.
    pub fn add(self, other: Duration) -> Result<Self, CommandError> {
        if self.unit != other.unit {
            return Err(CommandError::MixedDurationUnits(self.unit, other.unit));
        }
        Ok(Self {
            value: self.value + other.value,
            unit: self.unit,
        })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

// ── Ranges ─────────────────────────────────────────────────────────────

/// An inclusive range in selector and `matches` syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    min: Option<i32>,
    max: Option<i32>,
}

impl IntRange {
    pub fn exactly(value: i32) -> Self {
        Self {
            min: Some(value),
            max: Some(value),
        }
    }

    pub fn at_most(max: i32) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn at_least(min: i32) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn between(min: i32, max: i32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn min(&self) -> Option<i32> {
        self.min
    }

    pub fn max(&self) -> Option<i32> {
        self.max
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_range(f, self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatRange {
    min: Option<f64>,
    max: Option<f64>,
}

impl FloatRange {
    pub fn exactly(value: f64) -> Self {
        Self {
            min: Some(value),
            max: Some(value),
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl fmt::Display for FloatRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_range(f, self.min, self.max)
    }
}

fn write_range<T: fmt::Display + PartialEq>(
    f: &mut fmt::Formatter<'_>,
    min: Option<T>,
    max: Option<T>,
) -> fmt::Result {
    match (min, max) {
        (Some(min), Some(max)) if min == max => write!(f, "{min}"),
        (Some(min), Some(max)) => write!(f, "{min}..{max}"),
        (None, Some(max)) => write!(f, "..{max}"),
        (Some(min), None) => write!(f, "{min}.."),
        (None, None) => f.write_str(".."),
    }
}

// ── Coordinates ────────────────────────────────────────────────────────

/// A block or entity position: absolute, relative (`~`) or local (`^`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl Coordinate {
    /// Absolute coordinates. Integral x and z are centred on the block by
    /// the game; `force_zero` writes them as `n.0` to keep the block corner.
    pub fn absolute(x: f64, y: f64, z: f64, force_zero: bool) -> Self {
        Self {
            x: horizontal(x, force_zero),
            y: y.to_string(),
            z: horizontal(z, force_zero),
        }
    }

    pub fn relative(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: format!("~{x}"),
            y: format!("~{y}"),
            z: format!("~{z}"),
        }
    }

    /// Local coordinates: left, up and forward from the executor's facing.
    pub fn local(left: f64, up: f64, forward: f64) -> Self {
        Self {
            x: format!("^{left}"),
            y: format!("^{up}"),
            z: format!("^{forward}"),
        }
    }
}

fn horizontal(value: f64, force_zero: bool) -> String {
    if force_zero && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}
