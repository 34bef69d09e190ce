use qlearn::{RateParams, Schedule};

#[test]
fn linear_rate_reaches_its_floor() {
    let params = RateParams::new(0.5, 0.01, 0.01);
    assert_eq!(Schedule::Linear.rate(1000, &params), 0.01);
}

#[test]
fn rates_never_drop_below_the_floor() {
    let linear = RateParams::new(0.5, 0.005, 0.01);
    let log = RateParams::new(0.4, 27.0, 0.005);
    for episode in 0..5000 {
        assert!(Schedule::Linear.rate(episode, &linear) >= linear.floor);
        // the logarithmic floor scales the initial rate
        assert!(Schedule::Logarithmic.rate(episode, &log) >= log.initial * log.floor);
    }
}

#[test]
fn rates_are_non_increasing() {
    let cases = [
        (Schedule::Linear, RateParams::new(0.5, 0.003, 0.01)),
        (Schedule::Logarithmic, RateParams::new(0.5, 27.0, 0.1)),
    ];
    for (schedule, params) in cases {
        let mut previous = f64::INFINITY;
        for episode in 0..1000 {
            let rate = schedule.rate(episode, &params);
            assert!(rate <= previous, "{schedule:?} rose at episode {episode}");
            previous = rate;
        }
    }
}

#[test]
fn linear_rate_decays_by_a_fixed_amount_per_episode() {
    let params = RateParams::new(0.5, 0.1, 0.1);
    let rates: Vec<f64> = (0..6).map(|e| Schedule::Linear.rate(e, &params)).collect();
    let expected = [0.5, 0.4, 0.3, 0.2, 0.1, 0.1];
    for (rate, want) in rates.iter().zip(expected) {
        assert!((rate - want).abs() < 1e-12, "{rates:?}");
    }
}

#[test]
fn logarithmic_rate_matches_formula() {
    let params = RateParams::new(0.5, 27.0, 0.1);
    let episode = 80;
    let expected = 0.5 * (1.0 - (81.0_f64 / 27.0).log10()).clamp(0.1, 1.0);
    assert!((Schedule::Logarithmic.rate(episode, &params) - expected).abs() < 1e-12);
}

#[test]
fn validation_rejects_bad_parameters() {
    assert!(Schedule::Linear
        .validate("lr", &RateParams::new(f64::NAN, 0.1, 0.0))
        .is_err());
    assert!(Schedule::Linear
        .validate("lr", &RateParams::new(0.5, -0.1, 0.0))
        .is_err());
    assert!(Schedule::Logarithmic
        .validate("lr", &RateParams::new(0.5, 0.0, 0.1))
        .is_err());
    assert!(Schedule::Linear
        .validate("lr", &RateParams::constant(0.3))
        .is_ok());
}
