//! Property-based tests for classification, conversion, promotion and
//! arithmetic.

use proptest::prelude::*;

use numkind_core::category::{category, is_floating, is_integer, is_number, kinds_in};
use numkind_core::config::{Context, ConvertMode, ErrorPolicy};
use numkind_core::diagnostic::{DiagnosticPolicy, DiagnosticTracker};
use numkind_core::info::iinfo;
use numkind_core::ops::{arithmetic, BinaryOp};
use numkind_core::promote::{can_cast, promote_types, Casting};
use numkind_core::value::{convert, Literal};
use numkind_core::{Kind, ScalarValue};

fn any_kind() -> impl Strategy<Value = Kind> {
    prop::sample::select(Kind::ALL.to_vec())
}

fn integer_kind() -> impl Strategy<Value = Kind> {
    prop::sample::select(
        Kind::ALL
            .iter()
            .copied()
            .filter(|k| is_integer(*k))
            .collect::<Vec<_>>(),
    )
}

/// An integer kind together with a value in its range.
fn integer_in_range() -> impl Strategy<Value = (Kind, i128)> {
    integer_kind().prop_flat_map(|kind| {
        let (min, max) = kind.int_bounds().unwrap_or((0, 0));
        (Just(kind), min..=max)
    })
}

fn scalar(op: BinaryOp, a: ScalarValue, b: ScalarValue, context: Context) -> ScalarValue {
    let tracker = DiagnosticTracker::new();
    let policy = ErrorPolicy::uniform(DiagnosticPolicy::Silent);
    arithmetic(op, a, b, context, &policy, &tracker).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn every_kind_is_in_its_category(kind in any_kind()) {
        prop_assert!(kinds_in(category(kind)).contains(&kind));
    }

    #[test]
    fn number_predicate_is_consistent(kind in any_kind()) {
        if is_integer(kind) || is_floating(kind) {
            prop_assert!(is_number(kind));
        }
        if !kind.category().is_numeric() {
            prop_assert!(!is_number(kind));
        }
    }

    #[test]
    fn integer_conversion_round_trips((kind, x) in integer_in_range()) {
        let value = convert(&Literal::from(x), kind, ConvertMode::Strict).unwrap();
        prop_assert_eq!(value.kind(), kind);
        prop_assert_eq!(value.as_i128(), Some(x));
    }

    #[test]
    fn promotion_is_commutative(a in any_kind(), b in any_kind()) {
        prop_assert_eq!(promote_types(a, b).ok(), promote_types(b, a).ok());
    }

    #[test]
    fn promotion_is_a_safe_cast(a in any_kind(), b in any_kind()) {
        if let Ok(common) = promote_types(a, b) {
            prop_assert!(can_cast(a, common, Casting::Safe));
            prop_assert!(can_cast(b, common, Casting::Safe));
        }
    }

    #[test]
    fn safe_integer_casts_hold_the_extremes(from in integer_kind(), to in integer_kind()) {
        if can_cast(from, to, Casting::Safe) {
            let info = iinfo(from).unwrap();
            for x in [info.min, info.max] {
                prop_assert!(convert(&Literal::from(x), to, ConvertMode::Strict).is_ok());
            }
        }
    }

    #[test]
    fn bulk_add_matches_wrapping_add(a in any::<i32>(), b in any::<i32>()) {
        let r = scalar(BinaryOp::Add, a.into(), b.into(), Context::Bulk);
        prop_assert_eq!(r, ScalarValue::from(a.wrapping_add(b)));
    }

    #[test]
    fn bulk_uint8_mul_matches_wrapping_mul(a in any::<u8>(), b in any::<u8>()) {
        let r = scalar(BinaryOp::Mul, a.into(), b.into(), Context::Bulk);
        prop_assert_eq!(r, ScalarValue::from(a.wrapping_mul(b)));
    }

    #[test]
    fn scalar_int32_arithmetic_is_exact(a in any::<i32>(), b in any::<i32>()) {
        for (op, expected) in [
            (BinaryOp::Add, i128::from(a) + i128::from(b)),
            (BinaryOp::Sub, i128::from(a) - i128::from(b)),
            (BinaryOp::Mul, i128::from(a) * i128::from(b)),
        ] {
            let r = scalar(op, a.into(), b.into(), Context::Scalar);
            prop_assert_eq!(r.as_i128(), Some(expected));
        }
    }

    #[test]
    fn floor_division_identity(
        a in any::<i64>(),
        b in any::<i64>().prop_filter("non-zero", |b| *b != 0),
    ) {
        // The one quotient no fixed-width kind holds.
        prop_assume!(!(a == i64::MIN && b == -1));
        let q = scalar(BinaryOp::FloorDiv, a.into(), b.into(), Context::Scalar);
        let r = scalar(BinaryOp::Rem, a.into(), b.into(), Context::Scalar);
        let (q, r) = (q.as_i128().unwrap(), r.as_i128().unwrap());
        prop_assert_eq!(q * i128::from(b) + r, i128::from(a));
        prop_assert!(r == 0 || (r < 0) == (b < 0));
    }

    #[test]
    fn warn_once_emits_one_warning(n in 2usize..50) {
        let tracker = DiagnosticTracker::new();
        let policy = ErrorPolicy::default();
        for _ in 0..n {
            arithmetic(
                BinaryOp::Add,
                i64::MAX.into(),
                1_i64.into(),
                Context::Scalar,
                &policy,
                &tracker,
            )
            .unwrap();
        }
        prop_assert_eq!(tracker.warnings_emitted(), 1);
    }
}
