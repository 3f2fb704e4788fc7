//! Classification of kinds into categories.
//!
//! Every kind belongs to exactly one primary [`Category`]. The abstract nodes
//! of the type hierarchy ([`AbstractCategory`]) are unions of primary
//! categories and are always computed from them, never stored:
//!
//! ```text
//! Generic
//!   ├── Number
//!   │     ├── Integer
//!   │     │     ├── SignedInteger    (SignedInt)
//!   │     │     └── UnsignedInteger  (UnsignedInt)
//!   │     └── Inexact
//!   │           ├── Floating         (Float)
//!   │           └── ComplexFloating  (Complex)
//!   ├── Temporal                     (Datetime, Timedelta)
//!   ├── Flexible                     (Character)
//!   ├── Boolean
//!   └── Object
//! ```

use core::fmt;

use once_cell::sync::Lazy;

use crate::kind::{all_kinds, Kind};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The primary category of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Boolean,
    SignedInt,
    UnsignedInt,
    Float,
    Complex,
    Datetime,
    Timedelta,
    Character,
    Object,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Boolean,
        Category::SignedInt,
        Category::UnsignedInt,
        Category::Float,
        Category::Complex,
        Category::Datetime,
        Category::Timedelta,
        Category::Character,
        Category::Object,
    ];

    #[inline]
    pub fn is_integer(self) -> bool {
        matches!(self, Category::SignedInt | Category::UnsignedInt)
    }

    #[inline]
    pub fn is_inexact(self) -> bool {
        matches!(self, Category::Float | Category::Complex)
    }

    /// Integer, float or complex.
    #[inline]
    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_inexact()
    }

    #[inline]
    pub fn is_temporal(self) -> bool {
        matches!(self, Category::Datetime | Category::Timedelta)
    }

    /// Whether values of this category carry a payload in a
    /// [`ScalarValue`](crate::value::ScalarValue).
    #[inline]
    pub fn has_payload(self) -> bool {
        !matches!(self, Category::Character | Category::Object)
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Boolean => "boolean",
            Category::SignedInt => "signed integer",
            Category::UnsignedInt => "unsigned integer",
            Category::Float => "floating",
            Category::Complex => "complex floating",
            Category::Datetime => "datetime",
            Category::Timedelta => "timedelta",
            Category::Character => "character",
            Category::Object => "object",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// AbstractCategory
// ---------------------------------------------------------------------------

/// Abstract nodes of the kind hierarchy, for `issubdtype`-style queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbstractCategory {
    Generic,
    Number,
    Integer,
    SignedInteger,
    UnsignedInteger,
    Inexact,
    Floating,
    ComplexFloating,
    Temporal,
    Flexible,
}

impl AbstractCategory {
    /// Whether `category` lies below this node.
    pub fn contains(self, category: Category) -> bool {
        match self {
            AbstractCategory::Generic => true,
            AbstractCategory::Number => category.is_numeric(),
            AbstractCategory::Integer => category.is_integer(),
            AbstractCategory::SignedInteger => category == Category::SignedInt,
            AbstractCategory::UnsignedInteger => category == Category::UnsignedInt,
            AbstractCategory::Inexact => category.is_inexact(),
            AbstractCategory::Floating => category == Category::Float,
            AbstractCategory::ComplexFloating => category == Category::Complex,
            AbstractCategory::Temporal => category.is_temporal(),
            AbstractCategory::Flexible => category == Category::Character,
        }
    }
}

// ---------------------------------------------------------------------------
// CategoryIndex
// ---------------------------------------------------------------------------

/// Kinds grouped by primary category, derived once from the kind table.
#[derive(Debug)]
pub struct CategoryIndex {
    members: [Vec<Kind>; 9],
}

impl CategoryIndex {
    fn build() -> Self {
        let mut members: [Vec<Kind>; 9] = Default::default();
        for d in all_kinds() {
            members[d.category() as usize].push(d.kind());
        }
        Self { members }
    }

    /// Members of `category`, in registration order.
    #[inline]
    pub fn members(&self, category: Category) -> &[Kind] {
        &self.members[category as usize]
    }
}

static INDEX: Lazy<CategoryIndex> = Lazy::new(CategoryIndex::build);

/// The process-wide classification index.
pub fn index() -> &'static CategoryIndex {
    &INDEX
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Primary category of `kind`. O(1).
#[inline]
pub fn category(kind: Kind) -> Category {
    kind.category()
}

/// Every kind whose primary category is `category`.
pub fn kinds_in(category: Category) -> &'static [Kind] {
    index().members(category)
}

/// Every kind below an abstract node, in registration order.
pub fn kinds_under(node: AbstractCategory) -> Vec<Kind> {
    let mut kinds: Vec<Kind> = Category::ALL
        .iter()
        .filter(|c| node.contains(**c))
        .flat_map(|c| kinds_in(*c).iter().copied())
        .collect();
    kinds.sort_unstable();
    kinds
}

/// The `issubdtype` idiom.
///
/// ```
/// use numkind_core::category::{is_subkind, AbstractCategory};
/// use numkind_core::Kind;
///
/// assert!(is_subkind(Kind::UInt16, AbstractCategory::Integer));
/// assert!(!is_subkind(Kind::Float32, AbstractCategory::Integer));
/// ```
#[inline]
pub fn is_subkind(kind: Kind, node: AbstractCategory) -> bool {
    node.contains(kind.category())
}

#[inline]
pub fn is_integer(kind: Kind) -> bool {
    kind.category().is_integer()
}

#[inline]
pub fn is_signed_integer(kind: Kind) -> bool {
    kind.category() == Category::SignedInt
}

#[inline]
pub fn is_unsigned_integer(kind: Kind) -> bool {
    kind.category() == Category::UnsignedInt
}

#[inline]
pub fn is_floating(kind: Kind) -> bool {
    kind.category() == Category::Float
}

#[inline]
pub fn is_complex(kind: Kind) -> bool {
    kind.category() == Category::Complex
}

#[inline]
pub fn is_inexact(kind: Kind) -> bool {
    kind.category().is_inexact()
}

/// Integer, float or complex. False for bool, temporal, character and object.
#[inline]
pub fn is_number(kind: Kind) -> bool {
    is_integer(kind) || matches!(kind.category(), Category::Float | Category::Complex)
}

#[inline]
pub fn is_bool(kind: Kind) -> bool {
    kind.category() == Category::Boolean
}

#[inline]
pub fn is_temporal(kind: Kind) -> bool {
    kind.category().is_temporal()
}

#[inline]
pub fn is_character(kind: Kind) -> bool {
    kind.category() == Category::Character
}
