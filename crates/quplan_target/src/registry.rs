//! Target registry
//!
//! Gantree: L4_Target → TargetRegistry
//!
//! Walks every port of a configured control system and builds the GE, EF,
//! CR and readout targets it serves, plus the capture channel of every
//! readout target. All maps are keyed and iterated by label.

use crate::label::read_label;
use crate::target::{Target, TargetType};
use quplan_config::WiringInfo;
use quplan_core::units::hz_to_ghz;
use quplan_core::{
    ChannelId, ControlSystem, Port, PortRole, QuantumSystem, QuplanError, QuplanResult,
};
use quplan_planner::FrequencyPlanner;
use std::collections::BTreeMap;

fn channel_for(port: &Port, target_type: TargetType) -> ChannelId {
    port.channel_id(target_type.channel_number().unwrap_or(0))
}

/// Label-ordered target maps
/// Gantree: TargetRegistry // 타겟 레지스트리
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetRegistry {
    ge: BTreeMap<String, Target>,
    ef: BTreeMap<String, Target>,
    cr: BTreeMap<String, Target>,
    readout: BTreeMap<String, Target>,

    /// Readout targets bound to their capture channel
    capture: BTreeMap<String, Target>,
}

impl TargetRegistry {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build every target served by a configured control system
    /// Gantree: build(quantum, control, wiring, planner) -> Result<Self> // 타겟 생성
    ///
    /// Ports absent from the wiring are skipped. Fails on a duplicate label,
    /// a control port with other than 1 or 3 channels, or a capture port with
    /// fewer channels than its mux has resonators.
    pub fn build(
        quantum: &QuantumSystem,
        control: &ControlSystem,
        wiring: &WiringInfo,
        planner: &FrequencyPlanner,
    ) -> QuplanResult<Self> {
        let mut registry = Self::default();

        for port in control.ports() {
            match port.role() {
                PortRole::Ctrl => registry.add_control_port(quantum, wiring, planner, port)?,
                PortRole::ReadOut => registry.add_readout_port(quantum, wiring, port)?,
                PortRole::ReadIn => registry.add_capture_port(quantum, wiring, port)?,
            }
        }

        registry.check_availability(control)?;
        Ok(registry)
    }

    fn add_control_port(
        &mut self,
        quantum: &QuantumSystem,
        wiring: &WiringInfo,
        planner: &FrequencyPlanner,
        port: &Port,
    ) -> QuplanResult<()> {
        let Some(label) = wiring.qubit_by_ctrl_port(port.id()) else {
            log::debug!("no targets for unwired control port {}", port.id());
            return Ok(());
        };
        let qubit = quantum.get_qubit(label)?;

        match port.n_channels() {
            1 => self.insert(Target::new_ge(qubit, port.channel_id(0))?),
            3 => {
                let ge = Target::new_ge(qubit, channel_for(port, TargetType::CtrlGe))?;
                let ef = Target::new_ef(qubit, channel_for(port, TargetType::CtrlEf))?;
                let cr_frequency = planner.cr_target_frequency(quantum, qubit)?;
                let cr = Target::new_cr(qubit, cr_frequency, channel_for(port, TargetType::CtrlCr))?;
                self.insert(ge)?;
                self.insert(ef)?;
                self.insert(cr)
            }
            n => Err(QuplanError::InvalidChannelCount {
                port: port.id().to_string(),
                n_channels: n,
            }),
        }
    }

    fn add_readout_port(
        &mut self,
        quantum: &QuantumSystem,
        wiring: &WiringInfo,
        port: &Port,
    ) -> QuplanResult<()> {
        let Some(index) = wiring.mux_by_read_out_port(port.id()) else {
            log::debug!("no targets for unwired readout port {}", port.id());
            return Ok(());
        };
        for resonator in &quantum.get_mux(index)?.resonators {
            self.insert(Target::new_read(resonator, port.channel_id(0))?)?;
        }
        Ok(())
    }

    fn add_capture_port(
        &mut self,
        quantum: &QuantumSystem,
        wiring: &WiringInfo,
        port: &Port,
    ) -> QuplanResult<()> {
        let Some(index) = wiring.mux_by_read_in_port(port.id()) else {
            log::debug!("no targets for unwired capture port {}", port.id());
            return Ok(());
        };
        let mux = quantum.get_mux(index)?;
        if mux.resonators.len() > port.n_channels() {
            return Err(QuplanError::InvalidTopology(format!(
                "capture port {} has {} channels for {} resonators of mux {}",
                port.id(),
                port.n_channels(),
                mux.resonators.len(),
                index
            )));
        }
        for (position, resonator) in mux.resonators.iter().enumerate() {
            let target = Target::new_read(resonator, port.channel_id(position))?;
            if self.capture.contains_key(&target.label) {
                return Err(QuplanError::DuplicateTarget(target.label));
            }
            self.capture.insert(target.label.clone(), target);
        }
        Ok(())
    }

    fn insert(&mut self, target: Target) -> QuplanResult<()> {
        if self.contains(&target.label) {
            return Err(QuplanError::DuplicateTarget(target.label));
        }
        let map = match target.target_type {
            TargetType::CtrlGe => &mut self.ge,
            TargetType::CtrlEf => &mut self.ef,
            TargetType::CtrlCr => &mut self.cr,
            TargetType::Read | TargetType::Unknown => &mut self.readout,
        };
        map.insert(target.label.clone(), target);
        Ok(())
    }

    fn check_availability(&self, control: &ControlSystem) -> QuplanResult<()> {
        for target in self.control_targets() {
            if let Some(fine) = control.fine_freq(&target.channel)? {
                let fine = hz_to_ghz(fine);
                if !target.is_available_at(fine) {
                    log::warn!(
                        "target {} at {} GHz is out of reach of {} ({} GHz)",
                        target.label,
                        target.frequency,
                        target.channel,
                        fine
                    );
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Check if a label is registered
    pub fn contains(&self, label: &str) -> bool {
        self.ge.contains_key(label)
            || self.ef.contains_key(label)
            || self.cr.contains_key(label)
            || self.readout.contains_key(label)
    }

    /// Get target by exact label
    pub fn get(&self, label: &str) -> QuplanResult<&Target> {
        self.ge
            .get(label)
            .or_else(|| self.ef.get(label))
            .or_else(|| self.cr.get(label))
            .or_else(|| self.readout.get(label))
            .ok_or_else(|| QuplanError::TargetNotFound(label.to_string()))
    }

    /// Capture channel of a readout target
    pub fn capture_channel(&self, label: &str) -> QuplanResult<&ChannelId> {
        self.capture
            .get(&read_label(label)?)
            .map(|target| &target.channel)
            .ok_or_else(|| QuplanError::TargetNotFound(label.to_string()))
    }

    /// Number of generator-bound targets
    pub fn len(&self) -> usize {
        self.ge.len() + self.ef.len() + self.cr.len() + self.readout.len()
    }

    /// Check if no target was built
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// GE targets by label
    pub fn ge_targets(&self) -> impl Iterator<Item = &Target> {
        self.ge.values()
    }

    /// EF targets by label
    pub fn ef_targets(&self) -> impl Iterator<Item = &Target> {
        self.ef.values()
    }

    /// CR targets by label
    pub fn cr_targets(&self) -> impl Iterator<Item = &Target> {
        self.cr.values()
    }

    /// Readout targets by label
    pub fn readout_targets(&self) -> impl Iterator<Item = &Target> {
        self.readout.values()
    }

    /// GE, then EF, then CR targets
    pub fn control_targets(&self) -> impl Iterator<Item = &Target> {
        self.ge_targets()
            .chain(self.ef_targets())
            .chain(self.cr_targets())
    }

    /// GE, EF, CR, then readout targets
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.control_targets().chain(self.readout_targets())
    }

    /// Every target with its generator channel, by label
    pub fn target_gen_channel_map(&self) -> Vec<(&Target, &ChannelId)> {
        let mut pairs: Vec<_> = self.targets().map(|t| (t, &t.channel)).collect();
        pairs.sort_by(|a, b| a.0.label.cmp(&b.0.label));
        pairs
    }

    /// Every readout target with its capture channel, by label
    pub fn target_cap_channel_map(&self) -> Vec<(&Target, &ChannelId)> {
        self.capture.values().map(|t| (t, &t.channel)).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quplan_core::{Chip, ControlBox, Mux, PortId, Qubit, Resonator};

    fn quantum(resonators: Vec<Resonator>) -> QuantumSystem {
        QuantumSystem::new(
            Chip::new("64Q", vec![Mux::new(2, resonators)]),
            vec![
                Qubit::new("Q08", 7.65143, 7.29543),
                Qubit::new("Q09", 8.52917, 8.12074),
                Qubit::new("Q10", 8.37338, 7.97521),
                Qubit::new("Q11", 7.58964, 7.21468),
            ],
            vec![
                ("Q08".into(), "Q09".into()),
                ("Q09".into(), "Q11".into()),
                ("Q08".into(), "Q10".into()),
                ("Q10".into(), "Q11".into()),
            ],
        )
        .unwrap()
    }

    fn resonators() -> Vec<Resonator> {
        vec![
            Resonator::new("RQ08", "Q08", 10.29),
            Resonator::new("RQ09", "Q09", 10.42),
            Resonator::new("RQ10", "Q10", 10.36),
            Resonator::new("RQ11", "Q11", 10.24),
        ]
    }

    fn control(capture_channels: usize, q09_channels: usize) -> ControlSystem {
        ControlSystem::new(vec![ControlBox::new(
            "Q73A",
            vec![
                Port::capture("Q73A", 0, capture_channels),
                Port::generator("Q73A", 1, PortRole::ReadOut, 1),
                Port::generator("Q73A", 5, PortRole::Ctrl, 3),
                Port::generator("Q73A", 6, PortRole::Ctrl, q09_channels),
                Port::generator("Q73A", 7, PortRole::Ctrl, 3),
            ],
        )])
        .unwrap()
    }

    fn wiring() -> WiringInfo {
        WiringInfo::new(
            vec![
                ("Q08".into(), PortId::new("Q73A", 5)),
                ("Q09".into(), PortId::new("Q73A", 6)),
            ],
            vec![(2, PortId::new("Q73A", 1))],
            vec![(2, PortId::new("Q73A", 0))],
        )
        .unwrap()
    }

    fn build(resonators: Vec<Resonator>, control: ControlSystem) -> QuplanResult<TargetRegistry> {
        TargetRegistry::build(
            &quantum(resonators),
            &control,
            &wiring(),
            &FrequencyPlanner::default(),
        )
    }

    fn labels<'a>(targets: impl Iterator<Item = &'a Target>) -> Vec<&'a str> {
        targets.map(|t| t.label.as_str()).collect()
    }

    #[test]
    fn test_targets_per_port() {
        let registry = build(resonators(), control(4, 1)).unwrap();

        assert_eq!(labels(registry.ge_targets()), vec!["Q08", "Q09"]);
        assert_eq!(labels(registry.ef_targets()), vec!["Q08-ef"]);
        assert_eq!(labels(registry.cr_targets()), vec!["Q08-CR"]);
        assert_eq!(
            labels(registry.readout_targets()),
            vec!["RQ08", "RQ09", "RQ10", "RQ11"]
        );
        assert_eq!(registry.len(), 8);
        assert_eq!(
            labels(registry.control_targets()),
            vec!["Q08", "Q09", "Q08-ef", "Q08-CR"]
        );
    }

    #[test]
    fn test_channel_bindings() {
        let registry = build(resonators(), control(4, 1)).unwrap();
        let ctrl = PortId::new("Q73A", 5);

        assert_eq!(registry.get("Q08").unwrap().channel, ctrl.channel(0));
        assert_eq!(registry.get("Q08-ef").unwrap().channel, ctrl.channel(1));
        assert_eq!(registry.get("Q08-CR").unwrap().channel, ctrl.channel(2));
        assert_eq!(
            registry.get("Q09").unwrap().channel,
            PortId::new("Q73A", 6).channel(0)
        );
        for target in registry.readout_targets() {
            assert_eq!(target.channel, PortId::new("Q73A", 1).channel(0));
        }
        assert_eq!(
            registry.capture_channel("RQ10").unwrap(),
            &PortId::new("Q73A", 0).channel(2)
        );
        assert_eq!(
            registry.capture_channel("Q11").unwrap(),
            &PortId::new("Q73A", 0).channel(3)
        );
    }

    #[test]
    fn test_maps_sorted_by_label() {
        let registry = build(resonators(), control(4, 1)).unwrap();
        let gen: Vec<&str> = registry
            .target_gen_channel_map()
            .into_iter()
            .map(|(t, _)| t.label.as_str())
            .collect();
        assert_eq!(
            gen,
            vec!["Q08", "Q08-CR", "Q08-ef", "Q09", "RQ08", "RQ09", "RQ10", "RQ11"]
        );
        let cap: Vec<&str> = registry
            .target_cap_channel_map()
            .into_iter()
            .map(|(t, _)| t.label.as_str())
            .collect();
        assert_eq!(cap, vec!["RQ08", "RQ09", "RQ10", "RQ11"]);
    }

    #[test]
    fn test_cr_frequency_is_spectator_center() {
        let registry = build(resonators(), control(4, 1)).unwrap();
        assert_relative_eq!(
            registry.get("Q08-CR").unwrap().frequency,
            (8.52917 + 8.37338) / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_missing_target() {
        let registry = build(resonators(), control(4, 1)).unwrap();
        let err = registry.get("Q10").unwrap_err();
        assert_eq!(err, QuplanError::TargetNotFound("Q10".into()));
        assert!(err.is_not_found());
        assert!(registry.capture_channel("bogus").is_err());
    }

    #[test]
    fn test_duplicate_readout_label() {
        let mut duplicated = resonators();
        duplicated[3] = Resonator::new("Q08-x", "Q08", 10.24);
        let err = build(duplicated, control(4, 1)).unwrap_err();
        assert_eq!(err, QuplanError::DuplicateTarget("RQ08".into()));
    }

    #[test]
    fn test_capture_port_too_small() {
        let err = build(resonators(), control(2, 1)).unwrap_err();
        assert!(err.is_topology_error());
    }

    #[test]
    fn test_two_channel_control_port() {
        let err = build(resonators(), control(4, 2)).unwrap_err();
        assert!(matches!(err, QuplanError::InvalidChannelCount { n_channels: 2, .. }));
    }
}
