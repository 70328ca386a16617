//! Window-center search
//!
//! Gantree: L3_Planner → CenterFrequency
//!
//! Chooses the center of a window of width `max_diff` that covers as many of
//! the given frequencies as possible. Used for the shared LO of 3-channel
//! control ports and for cross-resonance drive frequencies.

use quplan_core::{QuantumSystem, Qubit, QuplanError, QuplanResult};

/// Find the center frequency of the best covering window
/// Gantree: find_optimal_center_frequency(fs, max_diff, mandatory) -> f64 // 중심 주파수
///
/// Non-positive frequencies are treated as unset and ignored; with nothing
/// left the result is `0.0`. When every frequency fits in one window the
/// midpoint of the extremes is returned. Otherwise windows are probed with
/// one frequency placed on each edge (or, with `mandatory`, with a mandatory
/// extreme placed on each edge) and the mean of the frequencies covered by the
/// first probe with the highest count is returned.
///
/// `mandatory` values are checked as given, unset ones included: if their
/// spread exceeds `max_diff` the call fails with
/// [`QuplanError::UnsatisfiableConstraint`].
pub fn find_optimal_center_frequency(
    frequencies: &[f64],
    max_diff: f64,
    mandatory: Option<&[f64]>,
) -> QuplanResult<f64> {
    let mut frequencies: Vec<f64> = frequencies.iter().copied().filter(|f| *f > 0.0).collect();
    if frequencies.is_empty() {
        return Ok(0.0);
    }

    let mandatory = mandatory.filter(|m| !m.is_empty());
    let mandatory_bounds = match mandatory {
        Some(m) => {
            let (mf_min, mf_max) = bounds(m);
            let spread = mf_max - mf_min;
            if spread > max_diff {
                return Err(QuplanError::UnsatisfiableConstraint { spread, max_diff });
            }
            Some((mf_min, mf_max))
        }
        None => None,
    };

    let (f_min, f_max) = bounds(&frequencies);
    if f_max - f_min <= max_diff {
        return Ok((f_max + f_min) / 2.0);
    }

    let d = max_diff * 0.5;
    let probes: Vec<f64> = match mandatory_bounds {
        Some((mf_min, mf_max)) => vec![mf_max - d, mf_min + d],
        None => {
            frequencies.sort_by(f64::total_cmp);
            frequencies.iter().flat_map(|f| [f - d, f + d]).collect()
        }
    };

    let mut best: Option<(usize, f64)> = None;
    for p in probes {
        let covered: Vec<f64> = frequencies
            .iter()
            .copied()
            .filter(|f| p - d <= *f && *f <= p + d)
            .collect();
        let count = covered.len();
        let mean = if covered.is_empty() {
            0.0
        } else {
            covered.iter().sum::<f64>() / count as f64
        };
        if best.map_or(true, |(best_count, _)| count > best_count) {
            best = Some((count, mean));
        }
    }

    // probes is never empty here
    Ok(best.map(|(_, mean)| mean).unwrap_or(0.0))
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Cross-resonance drive frequency of a qubit (GHz)
/// Gantree: calc_cr_target_frequency(q, max_diff) -> f64 // CR 주파수
///
/// Center of the calibrated spectator GE frequencies; the qubit's own GE
/// frequency when no spectator is calibrated.
pub fn calc_cr_target_frequency(
    quantum: &QuantumSystem,
    qubit: &Qubit,
    max_diff: f64,
) -> QuplanResult<f64> {
    let frequencies: Vec<f64> = quantum
        .get_spectator_qubits(&qubit.label)?
        .into_iter()
        .filter(|s| s.has_ge_frequency())
        .map(|s| s.ge_frequency)
        .collect();

    if frequencies.is_empty() {
        return Ok(qubit.ge_frequency);
    }
    find_optimal_center_frequency(&frequencies, max_diff, None)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quplan_core::{Chip, Mux, Resonator};

    #[test]
    fn test_identical_frequencies() {
        assert_eq!(
            find_optimal_center_frequency(&[100.0, 100.0], 10.0, None).unwrap(),
            100.0
        );
    }

    #[test]
    fn test_spread_within_window() {
        assert_eq!(
            find_optimal_center_frequency(&[90.0, 110.0], 20.0, None).unwrap(),
            100.0
        );
        assert_eq!(
            find_optimal_center_frequency(&[110.0, 95.0, 90.0], 20.0, None).unwrap(),
            100.0
        );
    }

    #[test]
    fn test_spread_beyond_window_picks_first_single() {
        // 20 apart with a window of 10: no probe covers both
        assert_eq!(
            find_optimal_center_frequency(&[110.0, 90.0], 10.0, None).unwrap(),
            90.0
        );
    }

    #[test]
    fn test_unset_values_are_dropped() {
        let center = find_optimal_center_frequency(&[0.0, 10.0, 1000.0], 20.0, None).unwrap();
        assert!(center == 10.0 || center == 1000.0, "got {}", center);
        assert_eq!(center, 10.0);
    }

    #[test]
    fn test_all_unset_returns_zero() {
        assert_eq!(
            find_optimal_center_frequency(&[0.0, -1.0], 10.0, None).unwrap(),
            0.0
        );
        assert_eq!(find_optimal_center_frequency(&[], 10.0, None).unwrap(), 0.0);
    }

    #[test]
    fn test_mandatory_checked_raw() {
        let err = find_optimal_center_frequency(&[0.0, 1000.0], 10.0, Some(&[0.0, 1000.0][..]))
            .unwrap_err();
        assert!(matches!(err, QuplanError::UnsatisfiableConstraint { .. }));
    }

    #[test]
    fn test_majority_window_wins() {
        // 100, 104, 108 share a window of 10; 200 is alone
        let center =
            find_optimal_center_frequency(&[200.0, 108.0, 100.0, 104.0], 10.0, None).unwrap();
        assert_relative_eq!(center, 104.0);
    }

    #[test]
    fn test_first_maximal_probe_wins() {
        // Two disjoint pairs; the lower pair is probed first
        let center = find_optimal_center_frequency(&[502.0, 500.0, 102.0, 100.0], 10.0, None)
            .unwrap();
        assert_relative_eq!(center, 101.0);
    }

    #[test]
    fn test_windows_follow_ascending_order_not_input_order() {
        // 90+5 covers {90, 98}; 106-5 covers {98, 106} with the same count
        let center = find_optimal_center_frequency(&[106.0, 98.0, 90.0], 10.0, None).unwrap();
        assert_relative_eq!(center, 94.0);
    }

    #[test]
    fn test_mandatory_window_placement() {
        // Mandatory 500 pins the window to [490, 510] or [500, 520]
        let center =
            find_optimal_center_frequency(&[500.0, 495.0, 515.0, 100.0], 20.0, Some(&[500.0][..]))
                .unwrap();
        // probe 490 covers {500, 495}, probe 510 covers {500, 515}; first wins
        assert_relative_eq!(center, 497.5);
    }

    #[test]
    fn test_empty_mandatory_is_ignored() {
        let center = find_optimal_center_frequency(&[100.0, 300.0], 10.0, Some(&[] as &[f64])).unwrap();
        assert_relative_eq!(center, 100.0);
    }

    fn chain() -> QuantumSystem {
        let qubits = vec![
            Qubit::new("Q00", 7.8, 7.45),
            Qubit::new("Q01", 8.0, 7.65),
            Qubit::new("Q02", 8.1, 7.75),
            Qubit::new("Q03", 0.0, 0.0),
        ];
        let mux = Mux::new(
            0,
            (0..4)
                .map(|i| Resonator::new(format!("RQ0{}", i), format!("Q0{}", i), 10.0 + i as f64 * 0.1))
                .collect(),
        );
        QuantumSystem::new(
            Chip::new("4Q", vec![mux]),
            qubits,
            vec![
                ("Q00".into(), "Q01".into()),
                ("Q01".into(), "Q02".into()),
                ("Q02".into(), "Q03".into()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_cr_without_calibrated_spectators_uses_own_ge() {
        let quantum = chain();
        let q03 = quantum.get_qubit("Q03").unwrap();
        // Q03's only spectator is Q02 (8.1 GHz)
        assert_relative_eq!(calc_cr_target_frequency(&quantum, q03, 0.25).unwrap(), 8.1);

        let isolated = QuantumSystem::new(
            Chip::new("2Q", vec![]),
            vec![Qubit::new("Q10", 7.5, 7.1), Qubit::new("Q11", 0.0, 0.0)],
            vec![("Q10".into(), "Q11".into())],
        )
        .unwrap();
        let q10 = isolated.get_qubit("Q10").unwrap();
        assert_relative_eq!(calc_cr_target_frequency(&isolated, q10, 0.25).unwrap(), 7.5);
    }

    #[test]
    fn test_cr_center_of_spectators() {
        let quantum = chain();
        let q01 = quantum.get_qubit("Q01").unwrap();
        // Spectators 7.8 and 8.1 are 0.3 apart: each alone in a 0.25 window
        assert_relative_eq!(
            calc_cr_target_frequency(&quantum, q01, 0.25).unwrap(),
            7.8
        );
        // A wider window covers both
        assert_relative_eq!(
            calc_cr_target_frequency(&quantum, q01, 0.5).unwrap(),
            7.95,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_cr_ignores_unset_spectator() {
        let quantum = chain();
        let q02 = quantum.get_qubit("Q02").unwrap();
        assert_relative_eq!(calc_cr_target_frequency(&quantum, q02, 0.25).unwrap(), 8.0);
    }
}
