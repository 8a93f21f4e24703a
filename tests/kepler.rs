//! Integration checks for the hyperbolic state generator.

use atlas_orbital::core::constants::GM_SUN;
use atlas_orbital::kepler::{ConvergencePolicy, HyperbolicElements, state_at};

fn elements(e: f64, q: f64) -> HyperbolicElements {
    HyperbolicElements {
        eccentricity: e,
        periapsis_distance_au: q,
        periapsis_time_jd: 2_460_976.5,
        ascending_node_deg: 45.0,
        arg_periapsis_deg: 90.0,
        inclination_deg: 30.0,
    }
}

#[test]
fn periapsis_radius_equals_q() {
    let el = elements(1.5, 1.0);
    let state = state_at(&el, el.periapsis_time_jd, ConvergencePolicy::Strict).unwrap();
    assert!((state.position.magnitude() - 1.0).abs() < 1e-9);
}

#[test]
fn ten_days_past_periapsis_is_outside_q() {
    let el = elements(1.2, 1.4);
    let state = state_at(&el, el.periapsis_time_jd + 10.0, ConvergencePolicy::Strict).unwrap();
    let r = state.position.magnitude();
    assert!(r > 1.4, "r = {r}");
    assert!(state.position.is_finite() && state.velocity.is_finite());
    assert!(state.velocity.magnitude() > 0.0);
}

#[test]
fn generation_is_deterministic() {
    let el = elements(1.2, 1.5);
    for offset in [-120.0, -3.5, 0.0, 42.0, 365.0] {
        let jd = el.periapsis_time_jd + offset;
        let a = state_at(&el, jd, ConvergencePolicy::BestEffort).unwrap();
        let b = state_at(&el, jd, ConvergencePolicy::BestEffort).unwrap();
        assert_eq!(a, b, "offset {offset}");
    }
}

#[test]
fn no_nan_over_a_wide_window() {
    let el = elements(1.2, 1.5);
    let mut jd = el.periapsis_time_jd - 365.0;
    while jd <= el.periapsis_time_jd + 365.0 {
        let state = state_at(&el, jd, ConvergencePolicy::BestEffort).unwrap();
        assert!(state.is_valid(), "invalid state at JD {jd}");
        jd += 7.0;
    }
}

#[test]
fn hyperbolic_excess_speed_matches_theory() {
    // Far from the Sun the speed approaches v_inf = sqrt(GM / |a|).
    let el = elements(1.2, 1.5);
    let a = el.periapsis_distance_au / (el.eccentricity - 1.0);
    let v_inf = (GM_SUN / a).sqrt();
    let state = state_at(&el, el.periapsis_time_jd + 100_000.0, ConvergencePolicy::BestEffort)
        .unwrap();
    let v = state.velocity.magnitude();
    assert!((v - v_inf).abs() / v_inf < 0.02, "v = {v}, v_inf = {v_inf}");
}
