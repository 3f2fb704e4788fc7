//! Tick units for `datetime64` and `timedelta64`.
//!
//! Temporal values are signed 64-bit tick counts tagged with a [`TimeUnit`].
//! Datetimes count from the Unix epoch. `i64::MIN` is reserved for NaT
//! ("not a time"), which propagates through every operation.
//!
//! Only the linear units (weeks down to nanoseconds) are supported; calendar
//! units such as years and months have no fixed tick length.

use core::fmt;
use core::str::FromStr;

use crate::error::NumkindError;

/// The NaT sentinel.
pub const NAT: i64 = i64::MIN;

/// Tick unit of a temporal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TimeUnit {
    /// No unit yet; adopts the unit of the other operand.
    #[default]
    Generic,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl TimeUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Generic => "generic",
            TimeUnit::Week => "W",
            TimeUnit::Day => "D",
            TimeUnit::Hour => "h",
            TimeUnit::Minute => "m",
            TimeUnit::Second => "s",
            TimeUnit::Millisecond => "ms",
            TimeUnit::Microsecond => "us",
            TimeUnit::Nanosecond => "ns",
        }
    }

    /// Length of one tick in nanoseconds. `None` for the generic unit.
    pub fn nanos(self) -> Option<i64> {
        match self {
            TimeUnit::Generic => None,
            TimeUnit::Week => Some(604_800_000_000_000),
            TimeUnit::Day => Some(86_400_000_000_000),
            TimeUnit::Hour => Some(3_600_000_000_000),
            TimeUnit::Minute => Some(60_000_000_000),
            TimeUnit::Second => Some(1_000_000_000),
            TimeUnit::Millisecond => Some(1_000_000),
            TimeUnit::Microsecond => Some(1_000),
            TimeUnit::Nanosecond => Some(1),
        }
    }

    /// The unit two operands are brought to before combining them.
    pub fn common(self, other: TimeUnit) -> TimeUnit {
        match (self.nanos(), other.nanos()) {
            (None, _) => other,
            (_, None) => self,
            (Some(a), Some(b)) => {
                if a <= b {
                    self
                } else {
                    other
                }
            }
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = NumkindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "generic" => Ok(TimeUnit::Generic),
            "W" => Ok(TimeUnit::Week),
            "D" => Ok(TimeUnit::Day),
            "h" => Ok(TimeUnit::Hour),
            "m" => Ok(TimeUnit::Minute),
            "s" => Ok(TimeUnit::Second),
            "ms" => Ok(TimeUnit::Millisecond),
            "us" | "\u{3bc}s" => Ok(TimeUnit::Microsecond),
            "ns" => Ok(TimeUnit::Nanosecond),
            other => Err(NumkindError::InvalidTimeUnit(other.to_string())),
        }
    }
}

/// A tick count in a given unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticks {
    pub value: i64,
    pub unit: TimeUnit,
}

impl Ticks {
    #[inline]
    pub fn new(value: i64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    #[inline]
    pub fn nat(unit: TimeUnit) -> Self {
        Self { value: NAT, unit }
    }

    #[inline]
    pub fn is_nat(self) -> bool {
        self.value == NAT
    }

    /// Re-express in `unit`, which must be at least as fine as `self.unit`
    /// (or `self.unit` must be generic).
    ///
    /// Returns the wrapped tick count and whether the rescale overflowed.
    /// NaT stays NaT.
    pub fn rescale(self, unit: TimeUnit) -> (Ticks, bool) {
        if self.is_nat() {
            return (Ticks::nat(unit), false);
        }
        let factor = match (self.unit.nanos(), unit.nanos()) {
            (Some(from), Some(to)) if from > to => from / to,
            _ => 1,
        };
        let (value, overflowed) = self.value.overflowing_mul(factor);
        (Ticks::new(value, unit), overflowed)
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nat() {
            f.write_str("NaT")
        } else if self.unit == TimeUnit::Generic {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{}{}", self.value, self.unit)
        }
    }
}
