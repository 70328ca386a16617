//! Frequency planner
//!
//! Gantree: L3_Planner → FrequencyPlanner
//!
//! Binds a [`PlannerConfig`] to the readout, control and CR searches so the
//! system facade can plan every port with one set of grids.

use crate::center::calc_cr_target_frequency;
use crate::control::{plan_control, ControlSettings};
use crate::readout::{plan_readout, ReadoutSettings};
use quplan_config::PlannerConfig;
use quplan_core::{Mux, QuantumSystem, Qubit, QuplanResult};

/// Frequency planner
/// Gantree: FrequencyPlanner // 주파수 플래너
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyPlanner {
    config: PlannerConfig,
}

impl FrequencyPlanner {
    /// Create a planner, rejecting malformed grids up front
    pub fn new(config: PlannerConfig) -> QuplanResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get configuration
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a readout mux
    pub fn plan_readout(&self, mux: &Mux) -> QuplanResult<ReadoutSettings> {
        plan_readout(mux, &self.config.readout)
    }

    /// Plan a control port of `n_channels` channels driving `qubit`
    pub fn plan_control(
        &self,
        quantum: &QuantumSystem,
        qubit: &Qubit,
        n_channels: usize,
    ) -> QuplanResult<ControlSettings> {
        plan_control(
            quantum,
            qubit,
            n_channels,
            &self.config.control,
            self.config.cr_max_diff,
        )
    }

    /// CR drive frequency of a qubit (GHz) with the configured window
    pub fn cr_target_frequency(&self, quantum: &QuantumSystem, qubit: &Qubit) -> QuplanResult<f64> {
        calc_cr_target_frequency(quantum, qubit, self.config.cr_max_diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quplan_config::FrequencyGrid;
    use quplan_core::QuplanError;

    #[test]
    fn test_new_validates() {
        let config = PlannerConfig::default().with_cr_max_diff(-1.0);
        assert!(FrequencyPlanner::new(config).is_err());

        let mut config = PlannerConfig::default();
        config.control.fnco = FrequencyGrid::new(0, 10, 0);
        assert!(matches!(
            FrequencyPlanner::new(config).unwrap_err(),
            QuplanError::InvalidGrid { .. }
        ));
    }

    #[test]
    fn test_default_planner() {
        let planner = FrequencyPlanner::default();
        assert_eq!(planner.config(), &PlannerConfig::default());
    }
}
