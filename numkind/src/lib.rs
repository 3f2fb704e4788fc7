//! # numkind
//!
//! Fixed-width scalar kinds for Rust, with the promotion, casting and
//! overflow rules of an array library.
//!
//! One `use numkind::prelude::*;` gives you the kind table, classification
//! predicates, promotion rules, scalar values and arithmetic.
//!
//! ```
//! use numkind::prelude::*;
//!
//! let kind = resolve("<i4").unwrap();
//! assert_eq!(kind, Kind::Int32);
//! assert!(is_integer(kind));
//! assert_eq!(promote_types(kind, Kind::UInt32).unwrap(), Kind::Int64);
//!
//! let engine = Engine::new();
//! let sum = engine.scalar(BinaryOp::Add, i32::MAX.into(), 1_i32.into()).unwrap();
//! assert_eq!(sum.kind(), Kind::Int64);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Kinds, classification, promotion, scalar arithmetic |

#[cfg(feature = "core")]
pub use numkind_core as core;

/// Glob-import convenience: `use numkind::prelude::*;`
pub mod prelude {
    #[cfg(feature = "core")]
    pub use numkind_core::prelude::*;
}
