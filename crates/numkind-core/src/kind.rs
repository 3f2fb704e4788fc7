//! The closed set of scalar kinds and their static descriptors.
//!
//! Every kind the library knows about is a variant of [`Kind`]. Each variant
//! owns exactly one [`KindDescriptor`] in a process-wide, immutable table; the
//! table order is the registration order reported by [`all_kinds`].
//!
//! ```text
//! bool
//! int8  int16  int32  int64
//! uint8 uint16 uint32 uint64
//! float16 float32 float64 longdouble
//! complex64 complex128
//! datetime64 timedelta64
//! bytes_ str_ object
//! ```

use core::fmt;
use core::str::FromStr;
use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::category::Category;
use crate::error::{NumkindError, Result};
use crate::temporal::TimeUnit;

// ---------------------------------------------------------------------------
// Kind: handle for a registered descriptor
// ---------------------------------------------------------------------------

/// A registered scalar kind.
///
/// The discriminant doubles as the index into the descriptor table, so
/// [`Kind::descriptor`] is a single array access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float16,
    Float32,
    Float64,
    /// x87 extended precision. Values are carried with `float64` precision.
    LongDouble,
    Complex64,
    Complex128,
    Datetime64,
    Timedelta64,
    Bytes,
    Str,
    Object,
}

impl Kind {
    /// Every kind, in registration order.
    pub const ALL: [Kind; 20] = [
        Kind::Bool,
        Kind::Int8,
        Kind::Int16,
        Kind::Int32,
        Kind::Int64,
        Kind::UInt8,
        Kind::UInt16,
        Kind::UInt32,
        Kind::UInt64,
        Kind::Float16,
        Kind::Float32,
        Kind::Float64,
        Kind::LongDouble,
        Kind::Complex64,
        Kind::Complex128,
        Kind::Datetime64,
        Kind::Timedelta64,
        Kind::Bytes,
        Kind::Str,
        Kind::Object,
    ];

    /// The static descriptor of this kind.
    #[inline]
    pub fn descriptor(self) -> &'static KindDescriptor {
        &KINDS[self as usize]
    }

    /// Canonical name, e.g. `"int32"`.
    #[inline]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Primary category.
    #[inline]
    pub fn category(self) -> Category {
        self.descriptor().category
    }

    #[inline]
    pub fn width_bits(self) -> u32 {
        self.descriptor().width_bits
    }

    #[inline]
    pub fn is_signed(self) -> bool {
        self.descriptor().signed
    }

    /// Inclusive `(min, max)` range for integer kinds, `None` otherwise.
    pub fn int_bounds(self) -> Option<(i128, i128)> {
        let bits = self.width_bits();
        match self.category() {
            Category::SignedInt => {
                let max = (1_i128 << (bits - 1)) - 1;
                Some((-max - 1, max))
            }
            Category::UnsignedInt => Some((0, (1_i128 << bits) - 1)),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = NumkindError;

    fn from_str(s: &str) -> Result<Self> {
        resolve(s)
    }
}

// ---------------------------------------------------------------------------
// KindDescriptor: static metadata
// ---------------------------------------------------------------------------

/// Immutable metadata describing one kind.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct KindDescriptor {
    kind: Kind,
    name: &'static str,
    width_bits: u32,
    signed: bool,
    category: Category,
    char_code: char,
    item_size: usize,
    aliases: &'static [&'static str],
}

impl KindDescriptor {
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Width of the value representation in bits. For character kinds this
    /// is the width of one code unit.
    #[inline]
    pub fn width_bits(&self) -> u32 {
        self.width_bits
    }

    /// Signedness. Only meaningful for integer kinds.
    #[inline]
    pub fn signed(&self) -> bool {
        self.signed
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// One-character category code (`'i'`, `'u'`, `'f'`, `'c'`, `'M'`, ...).
    #[inline]
    pub fn char_code(&self) -> char {
        self.char_code
    }

    /// Storage size in bytes, including padding.
    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Alternative spellings accepted by [`resolve`].
    #[inline]
    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }
}

impl fmt::Display for KindDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

macro_rules! descriptor {
    (
        $kind:ident, $name:literal, $bits:literal, $signed:literal,
        $cat:ident, $code:literal, $size:literal, [$($alias:literal),* $(,)?] $(,)?
    ) => {
        KindDescriptor {
            kind: Kind::$kind,
            name: $name,
            width_bits: $bits,
            signed: $signed,
            category: Category::$cat,
            char_code: $code,
            item_size: $size,
            aliases: &[$($alias),*],
        }
    };
}

/// The registration table. Indexed by `Kind as usize`.
static KINDS: [KindDescriptor; 20] = [
    descriptor!(Bool, "bool", 8, false, Boolean, 'b', 1, ["bool_", "bool8", "?", "b1"]),
    descriptor!(Int8, "int8", 8, true, SignedInt, 'i', 1, ["byte", "b", "i1"]),
    descriptor!(Int16, "int16", 16, true, SignedInt, 'i', 2, ["short", "h", "i2"]),
    descriptor!(Int32, "int32", 32, true, SignedInt, 'i', 4, ["intc", "i", "i4"]),
    descriptor!(
        Int64,
        "int64",
        64,
        true,
        SignedInt,
        'i',
        8,
        ["int_", "long", "longlong", "intp", "l", "q", "p", "i8"],
    ),
    descriptor!(UInt8, "uint8", 8, false, UnsignedInt, 'u', 1, ["ubyte", "B", "u1"]),
    descriptor!(UInt16, "uint16", 16, false, UnsignedInt, 'u', 2, ["ushort", "H", "u2"]),
    descriptor!(UInt32, "uint32", 32, false, UnsignedInt, 'u', 4, ["uintc", "I", "u4"]),
    descriptor!(
        UInt64,
        "uint64",
        64,
        false,
        UnsignedInt,
        'u',
        8,
        ["uint", "ulong", "ulonglong", "uintp", "L", "Q", "P", "u8"],
    ),
    descriptor!(Float16, "float16", 16, true, Float, 'f', 2, ["half", "e", "f2"]),
    descriptor!(Float32, "float32", 32, true, Float, 'f', 4, ["single", "f", "f4"]),
    descriptor!(Float64, "float64", 64, true, Float, 'f', 8, ["double", "float", "d", "f8"]),
    descriptor!(
        LongDouble,
        "longdouble",
        80,
        true,
        Float,
        'f',
        16,
        ["longfloat", "float128", "g", "f16"],
    ),
    descriptor!(
        Complex64,
        "complex64",
        64,
        true,
        Complex,
        'c',
        8,
        ["csingle", "singlecomplex", "F", "c8"],
    ),
    descriptor!(
        Complex128,
        "complex128",
        128,
        true,
        Complex,
        'c',
        16,
        ["cdouble", "cfloat", "complex", "D", "c16"],
    ),
    descriptor!(Datetime64, "datetime64", 64, true, Datetime, 'M', 8, ["M", "M8"]),
    descriptor!(Timedelta64, "timedelta64", 64, true, Timedelta, 'm', 8, ["m", "m8"]),
    descriptor!(Bytes, "bytes_", 8, false, Character, 'S', 1, ["bytes", "string_", "S", "a"]),
    descriptor!(Str, "str_", 32, false, Character, 'U', 4, ["str", "unicode", "unicode_", "U"]),
    descriptor!(Object, "object", 64, false, Object, 'O', 8, ["object_", "O"]),
];

/// Names and aliases, built once from the table.
static SPELLINGS: Lazy<HashMap<&'static str, Kind>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for d in &KINDS {
        map.insert(d.name, d.kind);
        for alias in d.aliases {
            map.insert(*alias, d.kind);
        }
    }
    map
});

// ---------------------------------------------------------------------------
// Table queries
// ---------------------------------------------------------------------------

/// Look up a descriptor by its canonical name.
///
/// ```
/// use numkind_core::kind::{lookup, Kind};
///
/// assert_eq!(lookup("int32").unwrap().kind(), Kind::Int32);
/// assert!(lookup("int7").is_err());
/// ```
pub fn lookup(name: &str) -> Result<&'static KindDescriptor> {
    KINDS
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| NumkindError::UnknownKind {
            name: name.to_string(),
        })
}

/// All descriptors, in registration order.
pub fn all_kinds() -> impl ExactSizeIterator<Item = &'static KindDescriptor> {
    KINDS.iter()
}

/// Resolve any accepted spelling of a kind.
///
/// Accepts canonical names, aliases, one-character codes and type strings
/// with an optional byte-order prefix (`"<i4"`, `"|b1"`, `"c16"`). Temporal
/// kinds may carry a bracketed unit (`"datetime64[ns]"`), which is validated
/// and discarded; use [`resolve_with_unit`] to keep it.
pub fn resolve(spec: &str) -> Result<Kind> {
    resolve_with_unit(spec).map(|(kind, _)| kind)
}

/// Like [`resolve`], also returning the bracketed time unit if present.
pub fn resolve_with_unit(spec: &str) -> Result<(Kind, Option<TimeUnit>)> {
    let unknown = || NumkindError::UnknownKind {
        name: spec.to_string(),
    };
    let trimmed = spec.trim();

    let (body, unit) = match trimmed.split_once('[') {
        Some((body, rest)) => {
            let unit = rest.strip_suffix(']').ok_or_else(unknown)?;
            (body, Some(unit.parse::<TimeUnit>()?))
        }
        None => (trimmed, None),
    };

    let body = match body.strip_prefix(['<', '>', '=', '|', '!']) {
        Some(rest) if !rest.is_empty() => rest,
        _ => body,
    };

    let kind = SPELLINGS
        .get(body)
        .copied()
        .or_else(|| parse_type_string(body))
        .ok_or_else(unknown)?;

    if unit.is_some() && !kind.category().is_temporal() {
        return Err(unknown());
    }
    Ok((kind, unit))
}

/// Parse `<code><itemsize>` strings not covered by the alias table.
fn parse_type_string(body: &str) -> Option<Kind> {
    let mut chars = body.chars();
    let code = chars.next()?;
    let size: usize = chars.as_str().parse().ok()?;
    match code {
        // Flexible kinds accept any length.
        'S' | 'a' if size > 0 => Some(Kind::Bytes),
        'U' if size > 0 => Some(Kind::Str),
        _ => KINDS
            .iter()
            .find(|d| d.char_code == code && d.item_size == size)
            .map(|d| d.kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_discriminants() {
        for (i, d) in KINDS.iter().enumerate() {
            assert_eq!(d.kind as usize, i, "{} is out of place", d.name);
        }
        assert_eq!(Kind::ALL.len(), KINDS.len());
    }

    #[test]
    fn test_names_and_aliases_unique() {
        let total: usize = KINDS.iter().map(|d| 1 + d.aliases.len()).sum();
        assert_eq!(SPELLINGS.len(), total);
    }

    #[test]
    fn test_numeric_widths() {
        for d in all_kinds() {
            if d.category().is_numeric() {
                assert!(
                    [8, 16, 32, 64, 80, 128].contains(&d.width_bits()),
                    "{} has width {}",
                    d.name(),
                    d.width_bits()
                );
            }
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("uint8").unwrap().width_bits(), 8);
        assert_eq!(lookup("longdouble").unwrap().width_bits(), 80);
        assert!(matches!(
            lookup("double"),
            Err(NumkindError::UnknownKind { .. })
        ));
    }

    #[test]
    fn test_resolve_aliases_and_codes() {
        assert_eq!(resolve("double").unwrap(), Kind::Float64);
        assert_eq!(resolve("intc").unwrap(), Kind::Int32);
        assert_eq!(resolve("?").unwrap(), Kind::Bool);
        assert_eq!(resolve("b").unwrap(), Kind::Int8);
        assert_eq!(resolve("<i4").unwrap(), Kind::Int32);
        assert_eq!(resolve(">u2").unwrap(), Kind::UInt16);
        assert_eq!(resolve("|b1").unwrap(), Kind::Bool);
        assert_eq!(resolve("c16").unwrap(), Kind::Complex128);
        assert_eq!(resolve("S10").unwrap(), Kind::Bytes);
        assert_eq!(resolve("<U8").unwrap(), Kind::Str);
        assert_eq!("float32".parse::<Kind>().unwrap(), Kind::Float32);
    }

    #[test]
    fn test_resolve_temporal_units() {
        assert_eq!(
            resolve_with_unit("datetime64[ns]").unwrap(),
            (Kind::Datetime64, Some(TimeUnit::Nanosecond))
        );
        assert_eq!(
            resolve_with_unit("<m8[s]").unwrap(),
            (Kind::Timedelta64, Some(TimeUnit::Second))
        );
        assert!(matches!(
            resolve("m8[fortnight]"),
            Err(NumkindError::InvalidTimeUnit(_))
        ));
        assert!(resolve("int32[s]").is_err());
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        assert!(resolve("i3").is_err());
        assert!(resolve("int7").is_err());
        assert!(resolve("").is_err());
        assert!(resolve("<").is_err());
    }

    #[test]
    fn test_int_bounds() {
        assert_eq!(Kind::Int8.int_bounds(), Some((-128, 127)));
        assert_eq!(Kind::UInt64.int_bounds(), Some((0, i128::from(u64::MAX))));
        assert_eq!(
            Kind::Int64.int_bounds(),
            Some((i128::from(i64::MIN), i128::from(i64::MAX)))
        );
        assert_eq!(Kind::Float32.int_bounds(), None);
    }
}
