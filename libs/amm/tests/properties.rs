//! Mathematical properties that must hold for every pool state
//!
//! Balances range over 1 to 1e6 tokens with 6 decimals of resolution and
//! amplifications over the full 1..=5000 range. A second suite concentrates
//! on skewed pools under high amplification, where the invariant solver has
//! the least room between truncation and convergence.

mod common;

use common::*;
use dualcurve_amm::{select_curve, AmplificationPair, Curve, InvariantPair};
use dualcurve_types::{Amplification, FixedPoint};
use proptest::prelude::*;

/// 1e-6 tokens in raw units
const MICRO: u128 = 1_000_000_000_000;

prop_compose! {
    fn balance()
        (micros in 1_000_000u64..1_000_000_000_000u64) -> FixedPoint {
        FixedPoint::from_raw_u128(micros as u128 * MICRO)
    }
}

prop_compose! {
    fn amplification()
        (value in 1u64..=5000u64) -> Amplification {
        Amplification::from_human(value).unwrap()
    }
}

prop_compose! {
    fn amplification_pair()
        (curve_1 in amplification(), curve_2 in amplification()) -> AmplificationPair {
        AmplificationPair::new(curve_1, curve_2)
    }
}

prop_compose! {
    fn fee()
        (basis_points in 0u64..1000u64) -> FixedPoint {
        FixedPoint::from_raw_u128(basis_points as u128 * 100_000_000_000_000)
    }
}

/// One side 1 to 1000 tokens, the other 0.1 to 10^4 times that
prop_compose! {
    fn skewed_balances()
        (small in 1_000_000u64..1_000_000_000u64,
         ratio in 100u64..10_000_000u64,
         flip in any::<bool>()) -> [FixedPoint; 2] {
        let small = small as u128 * MICRO;
        let large = small * ratio as u128 / 1_000;
        let pair = [FixedPoint::from_raw_u128(small), FixedPoint::from_raw_u128(large)];
        if flip { [pair[1], pair[0]] } else { pair }
    }
}

/// 500 to 5000 at full AMP_PRECISION resolution
prop_compose! {
    fn high_amplification()
        (raw in 500_000u64..=5_000_000u64) -> Amplification {
        Amplification::from_raw(raw).unwrap()
    }
}

fn current_invariants(balances: [FixedPoint; 2], amps: AmplificationPair) -> InvariantPair {
    let math = math();
    InvariantPair::new(
        math.invariant_for_curve(balances, amps, Curve::Curve1).unwrap(),
        math.invariant_for_curve(balances, amps, Curve::Curve2).unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_invariant_increases_with_balance(
        b0 in balance(),
        b1 in balance(),
        amp in amplification(),
        delta_micros in 1u64..1_000_000_000u64,
        index in 0usize..2,
    ) {
        let balances = [b0, b1];
        let mut grown = balances;
        grown[index] = grown[index]
            .try_add(FixedPoint::from_raw_u128(delta_micros as u128 * MICRO))
            .unwrap();

        let before = math().compute_invariant(balances, amp).unwrap();
        let after = math().compute_invariant(grown, amp).unwrap();
        prop_assert!(after > before, "{} !> {}", after, before);
    }

    #[test]
    fn prop_solve_balance_inverts_invariant(
        b0 in balance(),
        b1 in balance(),
        amp in amplification(),
        index in 0usize..2,
    ) {
        let balances = [b0, b1];
        let d = math().compute_invariant(balances, amp).unwrap();
        let solved = math().solve_balance(balances, amp, d, index).unwrap();
        let error = relative_error(solved.to_f64(), balances[index].to_f64());
        prop_assert!(
            error <= 1e-9,
            "solved {} for {} (error {})", solved, balances[index], error
        );
    }

    #[test]
    fn prop_invariant_matches_reference(
        b0 in balance(),
        b1 in balance(),
        amp in amplification(),
    ) {
        let d = math().compute_invariant([b0, b1], amp).unwrap();
        let expected = reference_invariant(b0.to_f64(), b1.to_f64(), amp.to_f64());
        prop_assert!(relative_error(d.to_f64(), expected) <= 1e-4);
    }

    /// Prices on either side of the kink agree at the kink
    #[test]
    fn prop_curves_meet_at_kink(
        x in balance(),
        amps in amplification_pair(),
        amount_micros in 1_000u64..1_000_000_000u64,
    ) {
        let epsilon = FixedPoint::from_raw_u128(1_000_000_000);
        let amount = FixedPoint::from_raw_u128(amount_micros as u128 * MICRO);

        let below = [x.try_sub(epsilon).unwrap(), x];
        let at = [x, x];
        prop_assert_eq!(select_curve(below), Curve::Curve1);
        prop_assert_eq!(select_curve(at), Curve::Curve2);

        let out_below = math().quote_out_given_in(below, amps, 0, 1, amount).unwrap();
        let out_at = math().quote_out_given_in(at, amps, 0, 1, amount).unwrap();

        let bound = FixedPoint::from_raw_u128(10 * 1_000_000_000);
        prop_assert!(
            out_below.abs_diff(out_at) <= bound,
            "{} vs {} across the kink", out_below, out_at
        );
    }

    #[test]
    fn prop_round_trip_swap_never_profits(
        b0 in balance(),
        b1 in balance(),
        amps in amplification_pair(),
        fraction in 1u64..500u64,
    ) {
        let balances = [b0, b1];
        let amount_in = b0
            .mul_down(FixedPoint::from_raw_u128(fraction as u128 * 1_000_000_000_000_000))
            .unwrap();
        prop_assume!(!amount_in.is_zero());

        let out = math().quote_out_given_in(balances, amps, 0, 1, amount_in).unwrap();
        prop_assume!(!out.is_zero());
        let moved = [b0.try_add(amount_in).unwrap(), b1.try_sub(out).unwrap()];
        let back = math().quote_out_given_in(moved, amps, 1, 0, out).unwrap();

        // one unit of solver tolerance per solve, scaled by the trade
        let slack = amount_in
            .mul_up(FixedPoint::from_raw_u128(1_000_000_000))
            .unwrap()
            .try_add(FixedPoint::from_raw_u128(64))
            .unwrap();
        prop_assert!(
            back <= amount_in.try_add(slack).unwrap(),
            "paid {} got back {}", amount_in, back
        );
    }

    #[test]
    fn prop_join_fee_never_increases_bpt(
        b0 in balance(),
        b1 in balance(),
        amps in amplification_pair(),
        low in fee(),
        high in fee(),
        amount_micros in 1_000u64..1_000_000_000u64,
    ) {
        prop_assume!(low <= high);
        let balances = [b0, b1];
        let invariants = current_invariants(balances, amps);
        let supply = invariants.for_curve(select_curve(balances));
        let amounts = [
            FixedPoint::from_raw_u128(amount_micros as u128 * MICRO),
            FixedPoint::ZERO,
        ];

        let join = |fee| {
            math()
                .bpt_out_given_exact_tokens_in(balances, amps, amounts, supply, invariants, fee)
                .unwrap()
        };
        let slack = FixedPoint::from_raw_u128(1_000);
        prop_assert!(join(high) <= join(low).try_add(slack).unwrap());
    }

    #[test]
    fn prop_exit_fee_never_decreases_bpt(
        b0 in balance(),
        b1 in balance(),
        amps in amplification_pair(),
        low in fee(),
        high in fee(),
        fraction in 1u64..500u64,
    ) {
        prop_assume!(low <= high);
        let balances = [b0, b1];
        let invariants = current_invariants(balances, amps);
        let supply = invariants.for_curve(select_curve(balances));
        let amount = b1
            .mul_down(FixedPoint::from_raw_u128(fraction as u128 * 1_000_000_000_000_000))
            .unwrap();

        let amounts = [FixedPoint::ZERO, amount];
        let exit = |fee| {
            math()
                .bpt_in_given_exact_tokens_out(balances, amps, amounts, supply, invariants, fee)
                .unwrap()
        };
        let slack = FixedPoint::from_raw_u128(1_000);
        prop_assert!(exit(high).try_add(slack).unwrap() >= exit(low));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_skewed_invariant_matches_reference(
        balances in skewed_balances(),
        amp in high_amplification(),
    ) {
        let result = math().compute_invariant_detailed(balances, amp).unwrap();
        let expected =
            reference_invariant(balances[0].to_f64(), balances[1].to_f64(), amp.to_f64());
        prop_assert!(result.iterations < 64);
        prop_assert!(relative_error(result.value.to_f64(), expected) <= 1e-6);
    }

    #[test]
    fn prop_skewed_invariant_increases_with_balance(
        balances in skewed_balances(),
        amp in high_amplification(),
        delta_micros in 1u64..1_000_000_000u64,
        index in 0usize..2,
    ) {
        let mut grown = balances;
        grown[index] = grown[index]
            .try_add(FixedPoint::from_raw_u128(delta_micros as u128 * MICRO))
            .unwrap();

        let before = math().compute_invariant(balances, amp).unwrap();
        let after = math().compute_invariant(grown, amp).unwrap();
        prop_assert!(after > before, "{} !> {}", after, before);
    }

    #[test]
    fn prop_skewed_solve_balance_inverts_invariant(
        balances in skewed_balances(),
        amp in high_amplification(),
        index in 0usize..2,
    ) {
        let d = math().compute_invariant(balances, amp).unwrap();
        let solved = math().solve_balance(balances, amp, d, index).unwrap();
        let error = relative_error(solved.to_f64(), balances[index].to_f64());
        prop_assert!(
            error <= 1e-9,
            "solved {} for {} (error {})", solved, balances[index], error
        );
    }

    #[test]
    fn prop_skewed_join_fee_never_increases_bpt(
        balances in skewed_balances(),
        amp in high_amplification(),
        low in fee(),
        high in fee(),
        amount_micros in 1_000u64..1_000_000_000u64,
    ) {
        prop_assume!(low <= high);
        let amps = AmplificationPair::uniform(amp);
        let invariants = current_invariants(balances, amps);
        let supply = invariants.for_curve(select_curve(balances));
        let amounts = [
            FixedPoint::from_raw_u128(amount_micros as u128 * MICRO),
            FixedPoint::ZERO,
        ];

        let join = |fee| {
            math()
                .bpt_out_given_exact_tokens_in(balances, amps, amounts, supply, invariants, fee)
                .unwrap()
        };
        let slack = FixedPoint::from_raw_u128(1_000);
        prop_assert!(join(high) <= join(low).try_add(slack).unwrap());
    }
}

/// Pool that once settled into a two-cycle in the invariant solver
fn two_cycle_pool() -> ([FixedPoint; 2], Amplification) {
    (
        [
            FixedPoint::from_raw_u128(163_254_002 * MICRO),
            FixedPoint::from_raw_u128(610_531_804_092 * MICRO),
        ],
        Amplification::from_raw(1_053_000).unwrap(),
    )
}

#[test]
fn test_two_cycle_pool_invariant_increases_with_balance() {
    let (balances, amp) = two_cycle_pool();
    let before = math().compute_invariant(balances, amp).unwrap();
    for (index, delta) in [(0, "0.000001"), (0, "1"), (1, "0.000001"), (1, "1000")] {
        let mut grown = balances;
        grown[index] = grown[index].try_add(fp(delta)).unwrap();
        let after = math().compute_invariant(grown, amp).unwrap();
        assert!(after > before, "{index} +{delta}: {after} !> {before}");
    }
}

#[test]
fn test_two_cycle_pool_solve_balance_inverts_invariant() {
    let (balances, amp) = two_cycle_pool();
    let d = math().compute_invariant(balances, amp).unwrap();
    assert_relative(
        d.to_f64(),
        reference_invariant(163.254002, 610531.804092, amp.to_f64()),
        1e-9,
    );
    for index in 0..2 {
        let solved = math().solve_balance(balances, amp, d, index).unwrap();
        assert_relative(solved.to_f64(), balances[index].to_f64(), 1e-9);
    }
}

#[test]
fn test_two_cycle_pool_join_fee_never_increases_bpt() {
    let (balances, amp) = two_cycle_pool();
    let amps = AmplificationPair::uniform(amp);
    let invariants = current_invariants(balances, amps);
    let supply = invariants.for_curve(select_curve(balances));

    let join = |fee: &str| {
        math()
            .bpt_out_given_exact_tokens_in(
                balances,
                amps,
                [fp("1.5"), FixedPoint::ZERO],
                supply,
                invariants,
                fp(fee),
            )
            .unwrap()
    };
    let free = join("0");
    let charged = join("0.05");
    assert!(free > FixedPoint::ZERO);
    assert!(charged <= free);
}
