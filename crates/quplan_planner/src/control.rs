//! Control port planning
//!
//! Gantree: L3_Planner → ControlPlan
//!
//! A control port has one LO and CNCO shared by all its channels and one FNCO
//! per channel. The synthesized frequency of a channel is
//! `lo − cnco − fnco` (lower sideband).
//!
//! - 1 channel: GE drive only, searched directly around the GE frequency.
//! - 3 channels: GE, EF and CR drives. The LO is placed around the window that
//!   covers the mandatory transitions and as many spectator GE frequencies as
//!   possible; each FNCO is then searched independently against that LO.

use crate::center::{calc_cr_target_frequency, find_optimal_center_frequency};
use quplan_config::{ControlPlanConfig, MandatoryFrequency};
use quplan_core::units::ghz_to_hz;
use quplan_core::{FreqHz, QuantumSystem, Qubit, QuplanError, QuplanResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthesis settings for one control port
/// Gantree: ControlSettings // 제어 설정값
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlSettings {
    /// Local oscillator (Hz)
    pub lo: FreqHz,
    /// Coarse NCO (Hz)
    pub cnco: FreqHz,
    /// Fine NCO of the GE channel (Hz)
    pub fnco_ge: FreqHz,
    /// Fine NCO of the EF channel (Hz), `0` on 1-channel ports
    pub fnco_ef: FreqHz,
    /// Fine NCO of the CR channel (Hz), `0` on 1-channel ports
    pub fnco_cr: FreqHz,
}

impl ControlSettings {
    /// Fine NCOs in channel order (GE, EF, CR)
    pub fn fncos(&self) -> [FreqHz; 3] {
        [self.fnco_ge, self.fnco_ef, self.fnco_cr]
    }

    /// Synthesized frequency `lo − cnco − fnco` for a fine NCO (Hz)
    pub fn frequency(&self, fnco: FreqHz) -> FreqHz {
        self.lo - self.cnco - fnco
    }
}

impl fmt::Display for ControlSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lo={} cnco={} fnco=({}, {}, {})",
            self.lo, self.cnco, self.fnco_ge, self.fnco_ef, self.fnco_cr
        )
    }
}

/// Choose `(lo, cnco, (fnco_ge, fnco_ef, fnco_cr))` for a control port
/// Gantree: plan_control(qubit, n_channels, config) -> ControlSettings // 그리드 탐색
///
/// `cr_max_diff` (GHz) is the window used for the CR drive frequency.
/// Fails with [`QuplanError::InvalidTopology`] unless `n_channels` is 1 or 3.
pub fn plan_control(
    quantum: &QuantumSystem,
    qubit: &Qubit,
    n_channels: usize,
    config: &ControlPlanConfig,
    cr_max_diff: f64,
) -> QuplanResult<ControlSettings> {
    let ge = ghz_to_hz(qubit.ge_frequency);
    let ef = ghz_to_hz(qubit.ef_frequency);

    let f_target = match n_channels {
        1 => ge,
        3 => {
            let mandatory: Vec<f64> = config
                .mandatory
                .iter()
                .map(|m| match m {
                    MandatoryFrequency::Ge => ge,
                    MandatoryFrequency::Ef => ef,
                })
                .collect();
            let mut frequencies = mandatory.clone();
            frequencies.extend(
                quantum
                    .get_spectator_qubits(&qubit.label)?
                    .into_iter()
                    .filter(|s| s.has_ge_frequency())
                    .map(|s| ghz_to_hz(s.ge_frequency)),
            );
            find_optimal_center_frequency(&frequencies, config.max_diff as f64, Some(mandatory.as_slice()))?
        }
        n => {
            return Err(QuplanError::InvalidTopology(format!(
                "control port of {} has {} channels, expected 1 or 3",
                qubit.label, n
            )))
        }
    };

    let cnco = config.cnco;
    let lo = find_lo(config, f_target)?;
    let fnco_ge = find_fnco(config, lo, ge)?;

    let settings = if n_channels == 1 {
        ControlSettings {
            lo,
            cnco,
            fnco_ge,
            fnco_ef: 0,
            fnco_cr: 0,
        }
    } else {
        let cr = ghz_to_hz(calc_cr_target_frequency(quantum, qubit, cr_max_diff)?);
        ControlSettings {
            lo,
            cnco,
            fnco_ge,
            fnco_ef: find_fnco(config, lo, ef)?,
            fnco_cr: find_fnco(config, lo, cr)?,
        }
    };

    log::debug!(
        "control {} ({} ch, target {:.0} Hz): {}",
        qubit.label,
        n_channels,
        f_target,
        settings
    );
    Ok(settings)
}

fn find_lo(config: &ControlPlanConfig, f_target: f64) -> QuplanResult<FreqHz> {
    let mut best: Option<(f64, FreqHz)> = None;
    for lo in config.lo.iter() {
        let coarse = lo.checked_sub(config.cnco).ok_or_else(|| {
            QuplanError::Planning(format!("lo {} - cnco {} overflows", lo, config.cnco))
        })?;
        let diff = (coarse as f64 - f_target).abs();
        if best.map_or(true, |(min_diff, _)| diff < min_diff) {
            best = Some((diff, lo));
        }
    }
    best.map(|(_, lo)| lo).ok_or_else(|| {
        QuplanError::Planning(format!("no lo on {} for {:.0} Hz", config.lo, f_target))
    })
}

fn find_fnco(config: &ControlPlanConfig, lo: FreqHz, f_target: f64) -> QuplanResult<FreqHz> {
    let mut best: Option<(f64, FreqHz)> = None;
    for fnco in config.fnco.iter() {
        let synthesized = lo
            .checked_sub(config.cnco)
            .and_then(|f| f.checked_sub(fnco))
            .and_then(i64::checked_abs)
            .ok_or_else(|| {
                QuplanError::Planning(format!(
                    "lo {} - cnco {} - fnco {} overflows",
                    lo, config.cnco, fnco
                ))
            })? as f64;
        let diff = (synthesized - f_target).abs();
        if best.map_or(true, |(min_diff, _)| diff < min_diff) {
            best = Some((diff, fnco));
        }
    }
    best.map(|(_, fnco)| fnco).ok_or_else(|| {
        QuplanError::Planning(format!("no fnco on {} for {:.0} Hz", config.fnco, f_target))
    })
}

// ============================================================================
// Tests
// ============================================================================
