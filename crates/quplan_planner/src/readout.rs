//! Readout port planning
//!
//! Gantree: L3_Planner → ReadoutPlan
//!
//! One LO/CNCO/FNCO triple per mux, shared by the readout generator and the
//! readout capture port of that mux. The synthesized frequency is
//! `lo + cnco + fnco` (upper sideband).

use quplan_config::ReadoutPlanConfig;
use quplan_core::units::ghz_to_hz;
use quplan_core::{FreqHz, Mux, QuplanError, QuplanResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthesis settings for one readout mux
/// Gantree: ReadoutSettings // 리드아웃 설정값
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadoutSettings {
    /// Local oscillator (Hz)
    pub lo: FreqHz,
    /// Coarse NCO (Hz)
    pub cnco: FreqHz,
    /// Fine NCO (Hz)
    pub fnco: FreqHz,
}

impl ReadoutSettings {
    /// Synthesized frequency `lo + cnco + fnco` (Hz)
    pub fn frequency(&self) -> FreqHz {
        self.lo + self.cnco + self.fnco
    }
}

impl fmt::Display for ReadoutSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lo={} cnco={} fnco={} (={} Hz)",
            self.lo,
            self.cnco,
            self.fnco,
            self.frequency()
        )
    }
}

/// Search target of a mux: midpoint of its resonator frequencies (Hz)
pub fn readout_target_frequency(mux: &Mux) -> QuplanResult<f64> {
    let mut resonators = mux.resonators.iter().map(|r| ghz_to_hz(r.frequency));
    let first = resonators
        .next()
        .ok_or_else(|| QuplanError::InvalidTopology(format!("mux {} has no resonators", mux.index)))?;
    let (min, max) = resonators.fold((first, first), |(lo, hi), f| (lo.min(f), hi.max(f)));
    Ok((max + min) / 2.0)
}

/// Choose `(lo, cnco, fnco)` for a readout mux
/// Gantree: plan_readout(mux, config) -> ReadoutSettings // 그리드 탐색
///
/// Every `(lo, fnco)` pair on the configured grids is tried, LO outermost,
/// both ascending. The first pair whose sum with `cnco` is closest to the
/// midpoint of the resonator frequencies wins.
pub fn plan_readout(mux: &Mux, config: &ReadoutPlanConfig) -> QuplanResult<ReadoutSettings> {
    let target = readout_target_frequency(mux)?;
    let cnco = config.cnco;

    let mut best: Option<(f64, FreqHz, FreqHz)> = None;
    for lo in config.lo.iter() {
        for fnco in config.fnco.iter() {
            let synthesized = lo
                .checked_add(cnco)
                .and_then(|f| f.checked_add(fnco))
                .ok_or_else(|| {
                    QuplanError::Planning(format!(
                        "lo {} + cnco {} + fnco {} overflows",
                        lo, cnco, fnco
                    ))
                })?;
            let diff = (synthesized as f64 - target).abs();
            if best.map_or(true, |(min_diff, _, _)| diff < min_diff) {
                best = Some((diff, lo, fnco));
            }
        }
    }

    let (_, lo, fnco) = best.ok_or_else(|| {
        QuplanError::Planning(format!(
            "no (lo, fnco) pair for mux {} on lo {} / fnco {}",
            mux.index, config.lo, config.fnco
        ))
    })?;

    let settings = ReadoutSettings { lo, cnco, fnco };
    log::debug!("readout mux {}: {}", mux.index, settings);
    Ok(settings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quplan_config::FrequencyGrid;
    use quplan_core::Resonator;

    fn mux(frequencies: &[f64]) -> Mux {
        Mux::new(
            2,
            frequencies
                .iter()
                .enumerate()
                .map(|(i, f)| Resonator::new(format!("RQ0{}", 8 + i), format!("Q0{}", 8 + i), *f))
                .collect(),
        )
    }

    #[test]
    fn test_two_resonator_fixture() {
        let settings = plan_readout(&mux(&[9.902, 9.908]), &ReadoutPlanConfig::default()).unwrap();
        assert_eq!(
            settings,
            ReadoutSettings {
                lo: 8_500_000_000,
                cnco: 1_500_000_000,
                fnco: -93_750_000,
            }
        );
        assert_eq!(settings.frequency(), 9_906_250_000);
    }

    #[test]
    fn test_target_is_midpoint_of_extremes() {
        let target = readout_target_frequency(&mux(&[10.1, 10.0, 10.4])).unwrap();
        assert!((target - 10.2e9).abs() < 1.0);
    }

    #[test]
    fn test_exact_hit() {
        // 8.5e9 + 1.5e9 + 0 = 10.0 GHz
        let settings = plan_readout(&mux(&[10.0]), &ReadoutPlanConfig::default()).unwrap();
        assert_eq!((settings.lo, settings.fnco), (8_500_000_000, 0));
    }

    #[test]
    fn test_tie_keeps_first_pair() {
        // 10.25 GHz is equidistant from 8.5e9 + 1.5e9 + 250e6 and 9.0e9 + 1.5e9 - 250e6
        let config = ReadoutPlanConfig::default().with_fnco(FrequencyGrid::symmetric(250_000_000, 250_000_000));
        let settings = plan_readout(&mux(&[10.25]), &config).unwrap();
        assert_eq!(settings.frequency(), 10_250_000_000);
        assert_eq!((settings.lo, settings.fnco), (8_500_000_000, 250_000_000));
    }

    #[test]
    fn test_empty_mux_is_topology_error() {
        let err = plan_readout(&Mux::new(0, vec![]), &ReadoutPlanConfig::default()).unwrap_err();
        assert!(err.is_topology_error());
    }

    #[test]
    fn test_empty_grid_is_planning_error() {
        let config = ReadoutPlanConfig::default().with_lo(FrequencyGrid::new(1, 0, 1));
        let err = plan_readout(&mux(&[10.0]), &config).unwrap_err();
        assert!(matches!(err, QuplanError::Planning(_)));
    }

    #[test]
    fn test_overflowing_sum_is_planning_error() {
        let config = ReadoutPlanConfig::default().with_cnco(i64::MAX - 1_000_000_000);
        let err = plan_readout(&mux(&[10.0]), &config).unwrap_err();
        assert!(matches!(err, QuplanError::Planning(_)));
    }
}
