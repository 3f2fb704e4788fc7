//! `Display` formatting for [`ScalarValue`].

use core::fmt;

use super::{Payload, ScalarValue};

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload {
            Payload::Bool(v) => write!(f, "{v}"),
            Payload::Int8(v) => write!(f, "{v}"),
            Payload::Int16(v) => write!(f, "{v}"),
            Payload::Int32(v) => write!(f, "{v}"),
            Payload::Int64(v) => write!(f, "{v}"),
            Payload::UInt8(v) => write!(f, "{v}"),
            Payload::UInt16(v) => write!(f, "{v}"),
            Payload::UInt32(v) => write!(f, "{v}"),
            Payload::UInt64(v) => write!(f, "{v}"),
            Payload::Float16(v) => write!(f, "{v}"),
            Payload::Float32(v) => write!(f, "{v}"),
            Payload::Float64(v) => write!(f, "{v}"),
            Payload::Complex64(c) => write!(f, "{c}"),
            Payload::Complex128(c) => write!(f, "{c}"),
            Payload::Datetime(t) | Payload::Timedelta(t) => write!(f, "{t}"),
        }
    }
}
