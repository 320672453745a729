//! Structural properties of the lattice engines.

use approx::assert_relative_eq;
use pricer_lattice::{
    american_option_price, price_with_dividends, BinomialPricer, DividendMode, DividendPricer,
    LatticeConfig, LatticeError, NodeIndexing,
};
use pricer_models::instruments::{DividendSchedule, ExerciseStyle, OptionParams, OptionType};
use proptest::prelude::*;

fn no_dividend() -> DividendSchedule {
    DividendSchedule::from_pairs(&[0.0], &[0.0]).unwrap()
}

fn price(params: &OptionParams, steps: usize, exercise: ExerciseStyle) -> f64 {
    let config = LatticeConfig::builder()
        .steps(steps)
        .exercise(exercise)
        .build()
        .unwrap();
    BinomialPricer::new(config).price(params).unwrap().price
}

// ========================================
// Literal scenarios
// ========================================

#[test]
fn literal_put_is_pinned() {
    let price =
        american_option_price(1000, 81.08, 72.5, 0.048, 0.3453, 99.0 / 365.0, 0.02, OptionType::Put)
            .unwrap();
    assert!(price > 0.0);
    assert_relative_eq!(price, 2.082_993_218_780_485, max_relative = 1e-9);
}

#[test]
fn dividend_reference_scenario_is_pinned() {
    let lattice = price_with_dividends(81.08, 72.5, 0.037, 100.0, 100, 0.34, &no_dividend()).unwrap();

    assert_eq!(lattice.indexing, NodeIndexing::DownMoves);
    assert_eq!(lattice.option_values.dim(), 101);
    assert_eq!(lattice.early_exercise.dim(), 101);
    assert_relative_eq!(lattice.price(), 4_028.931_333_583_175_3, max_relative = 1e-9);
    assert_relative_eq!(
        lattice.parameters.probability,
        0.470_186_650_969_520_95,
        max_relative = 1e-12
    );
    // Spot above strike: exercise value at the root is zero
    assert!(!lattice.early_exercise[(0, 0)]);
    assert_eq!(lattice.exercise_count(), 2500);
}

#[test]
fn dividend_root_flag_set_when_strike_above_spot() {
    let lattice = price_with_dividends(60.0, 72.5, 0.037, 100.0, 100, 0.34, &no_dividend()).unwrap();
    assert!(lattice.early_exercise[(0, 0)]);
    assert_relative_eq!(lattice.price(), 2_981.914_238_661_261, max_relative = 1e-9);
}

// ========================================
// Limits and rejection
// ========================================

#[test]
fn zero_volatility_limit_without_carry() {
    for (spot, strike) in [(90.0, 100.0), (110.0, 100.0), (100.0, 100.0)] {
        let put = OptionParams::new(spot, strike, 0.0, 1e-7, 1.0, OptionType::Put).unwrap();
        let call = put.with_option_type(OptionType::Call);
        assert!((price(&put, 50, ExerciseStyle::American) - put.intrinsic()).abs() < 1e-4);
        assert!((price(&call, 50, ExerciseStyle::American) - call.intrinsic()).abs() < 1e-4);
    }
}

#[test]
fn zero_volatility_limit_with_matching_yield_is_discounted_intrinsic() {
    let (rate, maturity) = (0.03, 2.0);
    let call = OptionParams::new(110.0, 100.0, rate, 1e-7, maturity, OptionType::Call)
        .unwrap()
        .with_dividend_yield(rate)
        .unwrap();
    let european = price(&call, 50, ExerciseStyle::European);
    assert!((european - (-rate * maturity).exp() * 10.0).abs() < 1e-4);

    // Immediate exercise beats waiting when the forward equals spot
    let american = price(&call, 50, ExerciseStyle::American);
    assert!((american - 10.0).abs() < 1e-4);
}

#[test]
fn degenerate_inputs_are_rejected() {
    let put = OptionType::Put;
    assert!(matches!(
        american_option_price(0, 81.08, 72.5, 0.048, 0.3453, 1.0, 0.02, put),
        Err(LatticeError::InvalidArgument { name: "steps", .. })
    ));
    assert!(matches!(
        american_option_price(100, 0.0, 72.5, 0.048, 0.3453, 1.0, 0.02, put),
        Err(LatticeError::InvalidArgument { name: "spot", .. })
    ));
    assert!(matches!(
        american_option_price(100, -81.08, 72.5, 0.048, 0.3453, 1.0, 0.02, put),
        Err(LatticeError::InvalidArgument { name: "spot", .. })
    ));
    assert!(matches!(
        american_option_price(100, 81.08, 72.5, 0.048, 0.0, 1.0, 0.02, put),
        Err(LatticeError::InvalidArgument {
            name: "volatility",
            ..
        })
    ));
    assert!(matches!(
        price_with_dividends(81.08, 72.5, 0.037, 100.0, 0, 0.34, &no_dividend()),
        Err(LatticeError::InvalidArgument { name: "steps", .. })
    ));
    assert!(matches!(
        price_with_dividends(0.0, 72.5, 0.037, 100.0, 10, 0.34, &no_dividend()),
        Err(LatticeError::InvalidArgument { name: "spot", .. })
    ));
}

#[test]
fn degenerate_probability_is_detectable_without_failing() {
    let params = OptionParams::new(100.0, 100.0, 0.08, 1e-3, 1.0, OptionType::Put).unwrap();
    let config = LatticeConfig::american(20).unwrap();
    let valuation = BinomialPricer::new(config).price(&params).unwrap();
    assert!(valuation.parameters.probability > 1.0);
    assert!(valuation.is_degenerate());

    let lattice = price_with_dividends(100.0, 100.0, 0.08, 1.0, 20, 1e-3, &no_dividend()).unwrap();
    assert!(lattice.is_degenerate());
}

// ========================================
// Property-based tests
// ========================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn put_is_non_increasing_in_spot(
        spot in 50.0f64..150.0,
        bump in 0.01f64..20.0,
        strike in 60.0f64..140.0,
        rate in 0.0f64..0.1,
        vol in 0.1f64..0.6,
        maturity in 0.1f64..2.0,
        steps in 10usize..150,
    ) {
        let low = OptionParams::new(spot, strike, rate, vol, maturity, OptionType::Put).unwrap();
        let high = low.with_spot(spot + bump).unwrap();
        let (v_low, v_high) = (
            price(&low, steps, ExerciseStyle::American),
            price(&high, steps, ExerciseStyle::American),
        );
        prop_assert!(v_high <= v_low + 1e-9 * v_low.max(1.0));
    }

    #[test]
    fn put_is_non_decreasing_in_strike(
        spot in 50.0f64..150.0,
        strike in 60.0f64..140.0,
        bump in 0.01f64..20.0,
        rate in 0.0f64..0.1,
        yield_ in 0.0f64..0.05,
        vol in 0.1f64..0.6,
        maturity in 0.1f64..2.0,
        steps in 10usize..150,
    ) {
        let low = OptionParams::new(spot, strike, rate, vol, maturity, OptionType::Put)
            .unwrap()
            .with_dividend_yield(yield_)
            .unwrap();
        let high = low.with_strike(strike + bump).unwrap();
        let (v_low, v_high) = (
            price(&low, steps, ExerciseStyle::American),
            price(&high, steps, ExerciseStyle::American),
        );
        prop_assert!(v_high + 1e-9 * v_high.max(1.0) >= v_low);
    }

    #[test]
    fn american_is_at_least_european(
        spot in 50.0f64..150.0,
        strike in 60.0f64..140.0,
        rate in 0.0f64..0.1,
        yield_ in 0.0f64..0.08,
        vol in 0.1f64..0.6,
        maturity in 0.1f64..2.0,
        steps in 10usize..150,
        is_call in any::<bool>(),
    ) {
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };
        let params = OptionParams::new(spot, strike, rate, vol, maturity, option_type)
            .unwrap()
            .with_dividend_yield(yield_)
            .unwrap();
        let american = price(&params, steps, ExerciseStyle::American);
        let european = price(&params, steps, ExerciseStyle::European);
        prop_assert!(american >= european);
        prop_assert!(american >= params.intrinsic());
    }

    #[test]
    fn reference_lattice_shape_and_root_flag(
        spot in 50.0f64..150.0,
        strike in 60.0f64..140.0,
        rate in 0.0f64..0.1,
        vol in 0.1f64..0.6,
        maturity in 0.1f64..2.0,
        steps in 1usize..60,
    ) {
        let lattice =
            price_with_dividends(spot, strike, rate, maturity, steps, vol, &no_dividend()).unwrap();

        prop_assert_eq!(lattice.option_values.dim(), steps + 1);
        prop_assert_eq!(lattice.early_exercise.dim(), steps + 1);
        prop_assert_eq!(lattice.early_exercise[(0, 0)], strike - spot > 0.0);

        for i in 0..=steps {
            for j in 0..=steps {
                if j > i {
                    prop_assert_eq!(lattice.option_values[(i, j)], 0.0);
                    prop_assert!(!lattice.early_exercise[(i, j)]);
                } else {
                    prop_assert!(lattice.option_values[(i, j)] >= 0.0);
                }
            }
        }
    }

    #[test]
    fn escrowed_dividend_raises_european_put_value(
        spot in 60.0f64..140.0,
        strike in 60.0f64..140.0,
        amount in 0.5f64..5.0,
        pay_fraction in 0.1f64..0.9,
        steps in 10usize..80,
    ) {
        let (rate, vol, maturity) = (0.04, 0.3, 1.0);
        let pricer = DividendPricer::new(
            LatticeConfig::american(steps)
                .unwrap()
                .with_exercise(ExerciseStyle::European),
            DividendMode::Escrowed(OptionType::Put),
        )
        .unwrap();
        let with_dividend = DividendSchedule::from_pairs(&[pay_fraction * maturity], &[amount]).unwrap();

        let plain = pricer
            .price(spot, strike, rate, maturity, vol, &DividendSchedule::empty())
            .unwrap();
        let paying = pricer
            .price(spot, strike, rate, maturity, vol, &with_dividend)
            .unwrap();
        prop_assert!(paying.price() + 1e-9 >= plain.price());
    }
}
