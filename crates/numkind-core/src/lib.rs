//! `numkind-core`: the scalar kind system behind numkind.
//!
//! Provides the registered set of fixed-width scalar kinds, their
//! classification into categories, type promotion and cast rules, tagged
//! scalar values, and binary arithmetic with configurable overflow handling.
//!
//! # Design
//!
//! - **Closed kind set.** [`Kind`] is an enum; each variant owns one static
//!   [`KindDescriptor`](kind::KindDescriptor). Categories are derived from
//!   the table once and never stored twice.
//! - **Two arithmetic contexts.** [`Context::Bulk`] wraps integers
//!   silently; [`Context::Scalar`] promotes to a wider kind or reports the
//!   overflow through a [`DiagnosticTracker`].
//! - **Explicit state.** Warn-once state lives in a tracker the caller owns
//!   (or the opt-in [`DiagnosticTracker::global`]); the policy is a value
//!   passed per call or held by an [`Engine`].

pub mod category;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod info;
pub mod kind;
pub mod ops;
pub mod promote;
pub mod temporal;
pub mod value;

// Re-export key types at crate root for convenience.
pub use category::{AbstractCategory, Category};
pub use config::{Context, ConvertMode, ErrorPolicy};
pub use diagnostic::{DiagnosticPolicy, DiagnosticTracker, OverflowEvent, Signal};
pub use engine::Engine;
pub use error::{NumkindError, Result};
pub use kind::Kind;
pub use ops::BinaryOp;
pub use temporal::{Ticks, TimeUnit};
pub use value::{Literal, ScalarValue};

/// Items intended for glob-import: `use numkind_core::prelude::*;`
pub mod prelude {
    pub use crate::category::{
        is_bool, is_complex, is_floating, is_inexact, is_integer, is_number, is_subkind,
        is_temporal, kinds_in, AbstractCategory, Category,
    };
    pub use crate::config::{Context, ConvertMode, ErrorPolicy};
    pub use crate::diagnostic::{DiagnosticPolicy, DiagnosticTracker, Signal};
    pub use crate::engine::Engine;
    pub use crate::error::{NumkindError, Result};
    pub use crate::info::{finfo, iinfo};
    pub use crate::kind::{all_kinds, lookup, resolve, Kind};
    pub use crate::ops::{arithmetic, arithmetic_elementwise, BinaryOp};
    pub use crate::promote::{can_cast, promote_types, Casting};
    pub use crate::temporal::{Ticks, TimeUnit};
    pub use crate::value::{convert, Literal, ScalarValue};
}
