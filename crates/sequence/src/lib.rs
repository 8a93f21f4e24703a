//! Trajectory sequences: evenly-cadenced state vectors over a time window.
//!
//! A sequence is generated from either the analytic planetary ephemeris or
//! the hyperbolic comet generator, sanitized so consumers never see invalid
//! samples, and queried by epoch through a binary search.

use thiserror::Error;

use atlas_core::time::{hours_to_days, jd_to_iso};
use atlas_core::{Body, StateVector};
use atlas_kepler::{ConvergencePolicy, HyperbolicElements};

/// Cadences the generator supports, in hours. Requests snap to the nearest.
pub const SUPPORTED_CADENCES_HOURS: [f64; 5] = [1.0, 2.0, 6.0, 12.0, 24.0];

/// Fraction of valid samples below which a sequence is considered unusable.
pub const QUALITY_THRESHOLD: f64 = 0.95;

/// Consecutive propagation failures after which generation stops early.
const MAX_CONSECUTIVE_FAILURES: usize = 5;

/// Slack applied to the window end so the final sample survives float error.
const END_EPSILON: f64 = 1e-9;

/// What a sequence tracks: a catalog planet or the hyperbolic comet.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Catalog(Body),
    Hyperbolic(HyperbolicElements),
}

/// Errors from sequence generation.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("empty time range: start JD {start} is not before end JD {end}")]
    EmptyRange { start: f64, end: f64 },
    #[error("no ephemeris available for body `{0}`")]
    Unsupported(Body),
}

/// Snap a requested cadence to the nearest supported value.
pub fn snap_cadence(hours: f64) -> f64 {
    let mut best = SUPPORTED_CADENCES_HOURS[0];
    for &candidate in &SUPPORTED_CADENCES_HOURS[1..] {
        if (hours - candidate).abs() < (hours - best).abs() {
            best = candidate;
        }
    }
    best
}

/// Generate a sanitized sequence of states over `[start_jd, end_jd]`.
///
/// The cadence snaps to the supported set, so a 30-day window at 6 hours
/// yields exactly 121 samples. Propagation failures are tolerated until
/// five occur in a row, at which point the partial sequence is returned;
/// in every case the result has been sanitized and contains only valid,
/// strictly time-ordered samples.
pub fn generate_sequence(
    target: &Target,
    start_jd: f64,
    end_jd: f64,
    cadence_hours: f64,
    policy: ConvergencePolicy,
) -> Result<Vec<StateVector>, SequenceError> {
    if !(start_jd.is_finite() && end_jd.is_finite()) || start_jd >= end_jd {
        return Err(SequenceError::EmptyRange {
            start: start_jd,
            end: end_jd,
        });
    }
    if let Target::Catalog(body) = target {
        if !atlas_ephem::is_supported(*body) {
            return Err(SequenceError::Unsupported(*body));
        }
    }

    let step = hours_to_days(snap_cadence(cadence_hours));
    let mut samples = Vec::new();
    let mut consecutive_failures = 0usize;

    let mut index = 0u64;
    loop {
        // Multiplying the index avoids accumulating step error over long
        // windows, which keeps the sample count exact.
        let jd = start_jd + index as f64 * step;
        if jd > end_jd + END_EPSILON {
            break;
        }
        index += 1;

        match sample_target(target, jd, policy) {
            Some(state) if state.is_valid() => {
                consecutive_failures = 0;
                samples.push(state);
            }
            _ => {
                consecutive_failures += 1;
                if consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                    break;
                }
            }
        }
    }

    sanitize(&mut samples);
    Ok(samples)
}

fn sample_target(target: &Target, jd: f64, policy: ConvergencePolicy) -> Option<StateVector> {
    match target {
        Target::Catalog(body) => atlas_ephem::heliocentric_state(*body, jd).ok(),
        Target::Hyperbolic(elements) => atlas_kepler::state_at(elements, jd, policy).ok(),
    }
}

/// Repair a sequence in place so every surviving sample is valid.
///
/// Invalid interior samples are replaced by the midpoint of their nearest
/// valid neighbors, timestamped halfway between them; invalid samples with
/// only one valid side are dropped.
pub fn sanitize(samples: &mut Vec<StateVector>) {
    let mut repaired = Vec::with_capacity(samples.len());
    for i in 0..samples.len() {
        if samples[i].is_valid() {
            repaired.push(samples[i].clone());
            continue;
        }
        let prev = samples[..i].iter().rev().find(|s| s.is_valid());
        let next = samples[i + 1..].iter().find(|s| s.is_valid());
        if let (Some(prev), Some(next)) = (prev, next) {
            let jd = (prev.julian_date + next.julian_date) / 2.0;
            let Some(iso_date) = jd_to_iso(jd) else {
                continue;
            };
            let interpolated = StateVector::new(
                jd,
                iso_date,
                (prev.position + next.position) * 0.5,
                (prev.velocity + next.velocity) * 0.5,
            )
            .clamped();
            if interpolated.is_valid() {
                repaired.push(interpolated);
            }
        }
    }
    *samples = repaired;
}

/// Fraction of samples in a raw sequence that pass validity checks.
pub fn quality(samples: &[StateVector]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let valid = samples.iter().filter(|s| s.is_valid()).count();
    valid as f64 / samples.len() as f64
}

/// True when the sequence meets the quality threshold for downstream use.
pub fn is_usable(samples: &[StateVector]) -> bool {
    quality(samples) >= QUALITY_THRESHOLD
}

/// Index of the sample nearest to `jd` in a time-ordered sequence.
///
/// Epochs before the first sample clamp to 0 and epochs after the last
/// clamp to the final index. Returns `None` only for an empty sequence.
pub fn find_nearest_index(samples: &[StateVector], jd: f64) -> Option<usize> {
    if samples.is_empty() {
        return None;
    }
    let insertion = samples.partition_point(|s| s.julian_date < jd);
    if insertion == 0 {
        return Some(0);
    }
    if insertion == samples.len() {
        return Some(samples.len() - 1);
    }
    let before = jd - samples[insertion - 1].julian_date;
    let after = samples[insertion].julian_date - jd;
    Some(if before <= after {
        insertion - 1
    } else {
        insertion
    })
}

/// Keep every `stride`-th valid sample, always including the first.
pub fn downsample(samples: &[StateVector], stride: usize) -> Vec<StateVector> {
    let stride = stride.max(1);
    samples
        .iter()
        .filter(|s| s.is_valid())
        .enumerate()
        .filter(|(i, _)| i % stride == 0)
        .map(|(_, s)| s.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::Vec3;

    fn atlas_elements() -> HyperbolicElements {
        HyperbolicElements {
            eccentricity: 1.2,
            periapsis_distance_au: 1.5,
            periapsis_time_jd: 2_460_614.5,
            ascending_node_deg: 280.0,
            arg_periapsis_deg: 45.0,
            inclination_deg: 113.0,
        }
    }

    fn valid_sample(jd: f64) -> StateVector {
        StateVector::new(
            jd,
            jd_to_iso(jd).unwrap(),
            Vec3::new(1.5, 0.1, -0.2),
            Vec3::new(0.01, -0.005, 0.002),
        )
    }

    fn invalid_sample(jd: f64) -> StateVector {
        StateVector::new(jd, String::new(), Vec3::new(f64::NAN, 0.0, 0.0), Vec3::ZERO)
    }

    #[test]
    fn thirty_days_at_six_hours_is_121_samples() {
        let start = 2_460_600.5;
        let seq = generate_sequence(
            &Target::Hyperbolic(atlas_elements()),
            start,
            start + 30.0,
            6.0,
            ConvergencePolicy::BestEffort,
        )
        .expect("sequence");
        assert_eq!(seq.len(), 121);
        for pair in seq.windows(2) {
            assert!(pair[1].julian_date > pair[0].julian_date);
        }
        assert!((seq[0].julian_date - start).abs() < 1e-9);
        assert!((seq[120].julian_date - (start + 30.0)).abs() < 1e-9);
    }

    #[test]
    fn cadence_snaps_to_supported_set() {
        assert_eq!(snap_cadence(5.0), 6.0);
        assert_eq!(snap_cadence(0.3), 1.0);
        assert_eq!(snap_cadence(18.0), 12.0);
        assert_eq!(snap_cadence(100.0), 24.0);
    }

    #[test]
    fn planet_sequences_work_too() {
        let seq = generate_sequence(
            &Target::Catalog(Body::Earth),
            2_460_600.5,
            2_460_610.5,
            24.0,
            ConvergencePolicy::BestEffort,
        )
        .expect("earth sequence");
        assert_eq!(seq.len(), 11);
        assert!(is_usable(&seq));
    }

    #[test]
    fn unsupported_body_is_an_error() {
        let result = generate_sequence(
            &Target::Catalog(Body::Sun),
            2_460_600.5,
            2_460_610.5,
            24.0,
            ConvergencePolicy::BestEffort,
        );
        assert!(matches!(result, Err(SequenceError::Unsupported(Body::Sun))));
    }

    #[test]
    fn empty_range_is_an_error() {
        let result = generate_sequence(
            &Target::Catalog(Body::Earth),
            2_460_610.5,
            2_460_600.5,
            24.0,
            ConvergencePolicy::BestEffort,
        );
        assert!(matches!(result, Err(SequenceError::EmptyRange { .. })));
    }

    #[test]
    fn sanitize_interpolates_interior_gaps() {
        let mut samples = vec![
            valid_sample(2_460_600.5),
            invalid_sample(2_460_601.5),
            valid_sample(2_460_602.5),
        ];
        sanitize(&mut samples);
        assert_eq!(samples.len(), 3);
        assert!((samples[1].julian_date - 2_460_601.5).abs() < 1e-9);
        assert!(samples.iter().all(|s| s.is_valid()));
    }

    #[test]
    fn sanitize_drops_unrepairable_edges() {
        let mut samples = vec![
            invalid_sample(2_460_600.5),
            valid_sample(2_460_601.5),
            invalid_sample(2_460_602.5),
        ];
        sanitize(&mut samples);
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn quality_counts_valid_fraction() {
        let samples = vec![
            valid_sample(1.0),
            invalid_sample(2.0),
            valid_sample(3.0),
            valid_sample(4.0),
        ];
        assert!((quality(&samples) - 0.75).abs() < 1e-12);
        assert!(!is_usable(&samples));
        assert_eq!(quality(&[]), 0.0);
    }

    #[test]
    fn nearest_index_clamps_out_of_range_epochs() {
        let samples: Vec<_> = (0..5).map(|i| valid_sample(2_460_600.5 + i as f64)).collect();
        assert_eq!(find_nearest_index(&samples, 2_460_500.0), Some(0));
        assert_eq!(find_nearest_index(&samples, 2_460_700.0), Some(4));
        assert_eq!(find_nearest_index(&samples, 2_460_602.4), Some(2));
        assert_eq!(find_nearest_index(&[], 2_460_600.5), None);
    }

    #[test]
    fn downsample_keeps_every_nth_valid() {
        let samples: Vec<_> = (0..10).map(|i| valid_sample(2_460_600.5 + i as f64)).collect();
        let thinned = downsample(&samples, 3);
        assert_eq!(thinned.len(), 4);
        assert!((thinned[1].julian_date - 2_460_603.5).abs() < 1e-9);
    }
}
