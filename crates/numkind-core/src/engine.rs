//! An arithmetic front end holding a policy and a tracker.
//!
//! [`Engine`] bundles the two pieces of state every [`arithmetic`] call
//! needs. The policy can be swapped for a scope with [`Engine::errstate`].
//! The guard borrows the engine exclusively and dereferences to it, so
//! overrides always unwind innermost first:
//!
//! ```
//! use numkind_core::diagnostic::DiagnosticPolicy;
//! use numkind_core::config::ErrorPolicy;
//! use numkind_core::ops::BinaryOp;
//! use numkind_core::Engine;
//!
//! let mut engine = Engine::new();
//! {
//!     let guard = engine.errstate(ErrorPolicy::uniform(DiagnosticPolicy::Raise));
//!     assert!(guard.scalar(BinaryOp::Add, i64::MAX.into(), 1_i64.into()).is_err());
//! }
//! assert!(engine.scalar(BinaryOp::Add, i64::MAX.into(), 1_i64.into()).is_ok());
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::{Context, ErrorPolicy};
use crate::diagnostic::DiagnosticTracker;
use crate::error::Result;
use crate::ops::{arithmetic, arithmetic_elementwise, BinaryOp};
use crate::value::ScalarValue;

#[derive(Debug)]
pub struct Engine {
    policy: RwLock<ErrorPolicy>,
    tracker: Arc<DiagnosticTracker>,
}

impl Engine {
    /// Default policy and a fresh tracker.
    pub fn new() -> Self {
        Self::with_policy(ErrorPolicy::default())
    }

    pub fn with_policy(policy: ErrorPolicy) -> Self {
        Self::with_tracker(policy, Arc::new(DiagnosticTracker::new()))
    }

    /// Share warn-once state with other engines, e.g.
    /// [`DiagnosticTracker::global`].
    pub fn with_tracker(policy: ErrorPolicy, tracker: Arc<DiagnosticTracker>) -> Self {
        Self {
            policy: RwLock::new(policy),
            tracker,
        }
    }

    #[inline]
    pub fn policy(&self) -> ErrorPolicy {
        *self.policy.read()
    }

    /// Replace the policy, returning the previous one.
    pub fn set_policy(&self, policy: ErrorPolicy) -> ErrorPolicy {
        core::mem::replace(&mut *self.policy.write(), policy)
    }

    #[inline]
    pub fn tracker(&self) -> &Arc<DiagnosticTracker> {
        &self.tracker
    }

    /// Arithmetic on detached values.
    pub fn scalar(&self, op: BinaryOp, a: ScalarValue, b: ScalarValue) -> Result<ScalarValue> {
        arithmetic(op, a, b, Context::Scalar, &self.policy(), &self.tracker)
    }

    /// Arithmetic on one element of a batch.
    pub fn bulk(&self, op: BinaryOp, a: ScalarValue, b: ScalarValue) -> Result<ScalarValue> {
        arithmetic(op, a, b, Context::Bulk, &self.policy(), &self.tracker)
    }

    pub fn elementwise(
        &self,
        op: BinaryOp,
        lhs: &[ScalarValue],
        rhs: &[ScalarValue],
    ) -> Result<Vec<ScalarValue>> {
        arithmetic_elementwise(op, lhs, rhs, &self.policy(), &self.tracker)
    }

    /// Install `policy` until the returned guard is dropped.
    ///
    /// Use the guard in place of the engine while it lives; nested
    /// overrides are taken from the guard.
    pub fn errstate(&mut self, policy: ErrorPolicy) -> ErrState<'_> {
        let previous = core::mem::replace(self.policy.get_mut(), policy);
        ErrState {
            engine: self,
            previous,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the previous policy of an [`Engine`] on drop.
#[must_use = "the policy is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ErrState<'a> {
    engine: &'a mut Engine,
    previous: ErrorPolicy,
}

impl ErrState<'_> {
    /// The policy that will be restored.
    pub fn previous(&self) -> ErrorPolicy {
        self.previous
    }
}

impl Deref for ErrState<'_> {
    type Target = Engine;

    fn deref(&self) -> &Engine {
        self.engine
    }
}

impl DerefMut for ErrState<'_> {
    fn deref_mut(&mut self) -> &mut Engine {
        self.engine
    }
}

impl Drop for ErrState<'_> {
    fn drop(&mut self) {
        *self.engine.policy.get_mut() = self.previous;
    }
}
