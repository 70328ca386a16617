//! Experiment system facade
//!
//! Gantree: L5_System → ExperimentSystem
//!
//! Owns the topologies, wiring and parameters, plans and configures every
//! port on construction, and then serves read-only lookups of qubits, ports,
//! boxes and targets. Construction either succeeds completely or fails
//! without exposing a partially initialized system.

use crate::init::{apply_ports, plan_ports};
use crate::port_set::{build_port_set_map, QubitPortSet};
use quplan_config::{ControlParams, PlannerConfig, WiringInfo};
use quplan_core::units::{hz_to_ghz, round_to};
use quplan_core::{
    combine_hashes, content_hash, ChannelId, Chip, ControlBox, ControlSystem, Mux, Port, PortId,
    QuantumSystem, Qubit, QuplanError, QuplanResult, Resonator,
};
use quplan_planner::FrequencyPlanner;
use quplan_target::{cr_label, ef_label, ge_label, qubit_label, read_label, Target, TargetRegistry};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Experiment system
/// Gantree: ExperimentSystem // 실험 시스템
#[derive(Debug, Clone)]
pub struct ExperimentSystem {
    quantum_system: QuantumSystem,
    control_system: ControlSystem,
    wiring_info: WiringInfo,
    control_params: ControlParams,
    planner: FrequencyPlanner,
    port_sets: BTreeMap<String, QubitPortSet>,
    targets: TargetRegistry,
}

impl ExperimentSystem {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Build with the default planner grids
    /// Gantree: new(quantum, control, wiring, params) -> Result<Self> // 생성
    pub fn new(
        quantum_system: QuantumSystem,
        control_system: ControlSystem,
        wiring_info: WiringInfo,
        control_params: ControlParams,
    ) -> QuplanResult<Self> {
        Self::with_config(
            quantum_system,
            control_system,
            wiring_info,
            control_params,
            PlannerConfig::default(),
        )
    }

    /// Build with custom planner grids
    /// Gantree: with_config(..., config) -> Result<Self> // 설정 지정 생성
    ///
    /// Order: validate → port sets → plan all ports → configure ports → targets.
    pub fn with_config(
        quantum_system: QuantumSystem,
        mut control_system: ControlSystem,
        wiring_info: WiringInfo,
        control_params: ControlParams,
        config: PlannerConfig,
    ) -> QuplanResult<Self> {
        let planner = FrequencyPlanner::new(config)?;
        wiring_info.validate(&quantum_system, &control_system)?;

        let port_sets = build_port_set_map(&quantum_system, &wiring_info)?;

        let planned = plan_ports(
            &quantum_system,
            &control_system,
            &wiring_info,
            &control_params,
            &planner,
        )?;
        apply_ports(&mut control_system, planned)?;

        let targets =
            TargetRegistry::build(&quantum_system, &control_system, &wiring_info, &planner)?;

        let system = Self {
            quantum_system,
            control_system,
            wiring_info,
            control_params,
            planner,
            port_sets,
            targets,
        };
        log::info!(
            "experiment system ready: {} qubits, {} ports, {} targets, hash {:016x}",
            system.qubits().len(),
            system.control_system.ports().count(),
            system.targets.len(),
            system.hash()
        );
        Ok(system)
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Combined content hash of topology, control system, wiring and params
    /// Gantree: hash() -> u64 // 변경 감지
    pub fn hash(&self) -> u64 {
        combine_hashes(&[
            content_hash(&self.quantum_system),
            content_hash(&self.control_system),
            content_hash(&self.wiring_info),
            content_hash(&self.control_params),
        ])
    }

    /// Get quantum topology
    pub fn quantum_system(&self) -> &QuantumSystem {
        &self.quantum_system
    }

    /// Get configured control system
    pub fn control_system(&self) -> &ControlSystem {
        &self.control_system
    }

    /// Get wiring
    pub fn wiring_info(&self) -> &WiringInfo {
        &self.wiring_info
    }

    /// Get control parameters
    pub fn control_params(&self) -> &ControlParams {
        &self.control_params
    }

    /// Get planner configuration
    pub fn planner_config(&self) -> &PlannerConfig {
        self.planner.config()
    }

    /// Get chip
    pub fn chip(&self) -> &Chip {
        self.quantum_system.chip()
    }

    /// Get qubits in chip order
    pub fn qubits(&self) -> &[Qubit] {
        self.quantum_system.qubits()
    }

    /// Get resonators, mux by mux
    pub fn resonators(&self) -> Vec<&Resonator> {
        self.quantum_system.resonators().collect()
    }

    /// Get boxes
    pub fn boxes(&self) -> &[ControlBox] {
        self.control_system.boxes()
    }

    // ========================================================================
    // Topology Lookups
    // ========================================================================

    /// Get qubit by label
    pub fn get_qubit(&self, label: &str) -> QuplanResult<&Qubit> {
        self.quantum_system.get_qubit(label)
    }

    /// Get qubit by position
    pub fn get_qubit_by_index(&self, index: usize) -> QuplanResult<&Qubit> {
        self.quantum_system.get_qubit_by_index(index)
    }

    /// Get resonator by label
    pub fn get_resonator(&self, label: &str) -> QuplanResult<&Resonator> {
        self.quantum_system.get_resonator(label)
    }

    /// Get resonator by position
    pub fn get_resonator_by_index(&self, index: usize) -> QuplanResult<&Resonator> {
        self.quantum_system.get_resonator_by_index(index)
    }

    /// Get mux by index
    pub fn get_mux(&self, index: usize) -> QuplanResult<&Mux> {
        self.quantum_system.get_mux(index)
    }

    /// Get spectator qubits of a qubit
    pub fn get_spectator_qubits(&self, label: &str) -> QuplanResult<Vec<&Qubit>> {
        self.quantum_system.get_spectator_qubits(label)
    }

    /// Get box by id
    pub fn get_box(&self, box_id: &str) -> QuplanResult<&ControlBox> {
        self.control_system.get_box(box_id)
    }

    /// Boxes touched by the given qubits, by box id
    /// Gantree: get_boxes_for_qubits(qubits) -> Vec<&ControlBox> // 박스 집합
    ///
    /// Qubits without a port set are skipped.
    pub fn get_boxes_for_qubits<S: AsRef<str>>(&self, qubits: &[S]) -> QuplanResult<Vec<&ControlBox>> {
        let box_ids: BTreeSet<&str> = qubits
            .iter()
            .filter_map(|q| self.port_sets.get(q.as_ref()))
            .flat_map(|ports| ports.box_ids())
            .collect();
        box_ids.into_iter().map(|id| self.get_box(id)).collect()
    }

    // ========================================================================
    // Port Lookups
    // ========================================================================

    /// Port set of a qubit, `None` if it is not wired for control
    pub fn get_qubit_port_set(&self, qubit: &str) -> Option<&QubitPortSet> {
        self.port_sets.get(qubit)
    }

    /// Port set of the qubit at a position
    pub fn get_qubit_port_set_by_index(&self, index: usize) -> QuplanResult<Option<&QubitPortSet>> {
        let qubit = self.get_qubit_by_index(index)?;
        Ok(self.get_qubit_port_set(&qubit.label))
    }

    /// Control port of a qubit
    pub fn get_control_port(&self, qubit: &str) -> QuplanResult<&Port> {
        let ports = self
            .get_qubit_port_set(qubit)
            .ok_or_else(|| QuplanError::QubitNotWired(qubit.to_string()))?;
        self.get_port(&ports.ctrl_port)
    }

    /// Get port by id
    pub fn get_port(&self, id: &PortId) -> QuplanResult<&Port> {
        self.control_system.get_port(id)
    }

    /// Mux served by a readout generator or capture port
    pub fn get_mux_by_readout_port(&self, port: &PortId) -> Option<&Mux> {
        let index = self
            .wiring_info
            .mux_by_read_out_port(port)
            .or_else(|| self.wiring_info.mux_by_read_in_port(port))?;
        self.quantum_system.get_mux(index).ok()
    }

    /// Qubit driven by a control port
    pub fn get_qubit_by_control_port(&self, port: &PortId) -> Option<&Qubit> {
        let label = self.wiring_info.qubit_by_ctrl_port(port)?;
        self.quantum_system.get_qubit(label).ok()
    }

    /// Readout generator port paired with a capture port
    pub fn get_readout_pair(&self, capture_port: &PortId) -> QuplanResult<&Port> {
        let index = self
            .wiring_info
            .mux_by_read_in_port(capture_port)
            .ok_or_else(|| QuplanError::PortNotFound(format!("no mux on {}", capture_port)))?;
        let id = self.wiring_info.read_out_port(index).ok_or_else(|| {
            QuplanError::PortNotFound(format!("no readout pair for {}", capture_port))
        })?;
        self.get_port(id)
    }

    // ========================================================================
    // Target Lookups
    // ========================================================================

    /// Get target by exact label
    pub fn get_target(&self, label: &str) -> QuplanResult<&Target> {
        self.targets.get(label)
    }

    /// GE target of the qubit named by `label`
    pub fn get_ge_target(&self, label: &str) -> QuplanResult<&Target> {
        self.get_target(&ge_label(label)?)
    }

    /// EF target of the qubit named by `label`
    pub fn get_ef_target(&self, label: &str) -> QuplanResult<&Target> {
        self.get_target(&ef_label(label)?)
    }

    /// Self-CR target of the qubit named by `label`
    pub fn get_cr_target(&self, label: &str) -> QuplanResult<&Target> {
        self.get_target(&cr_label(label)?)
    }

    /// Readout target of the qubit named by `label`
    pub fn get_readout_target(&self, label: &str) -> QuplanResult<&Target> {
        self.get_target(&read_label(label)?)
    }

    /// CR target `<control>-<target>` on the control qubit's CR channel
    /// Gantree: get_cr_pair_target(control, target) -> Target // 페어 CR
    ///
    /// `target` must be a spectator of `control`.
    pub fn get_cr_pair_target(&self, control: &str, target: &str) -> QuplanResult<Target> {
        let control_qubit = self.get_qubit(&qubit_label(control)?)?;
        let target_qubit = self.get_qubit(&qubit_label(target)?)?;
        if !self
            .quantum_system
            .is_coupled(&control_qubit.label, &target_qubit.label)
        {
            return Err(QuplanError::TargetNotFound(format!(
                "{}-{}",
                control_qubit.label, target_qubit.label
            )));
        }
        let channel = self.get_cr_target(&control_qubit.label)?.channel.clone();
        Target::new_cr_pair(control_qubit, target_qubit, channel)
    }

    /// Capture channel of a readout target
    pub fn get_capture_channel(&self, label: &str) -> QuplanResult<&ChannelId> {
        self.targets.capture_channel(label)
    }

    // ========================================================================
    // Frequencies
    // ========================================================================

    /// Synthesized frequency of a target's channel (GHz, 10 decimals)
    pub fn get_base_frequency(&self, label: &str) -> QuplanResult<f64> {
        let target = self.get_target(label)?;
        let fine = self
            .control_system
            .fine_freq(&target.channel)?
            .ok_or_else(|| {
                QuplanError::Planning(format!("channel {} is not synthesized", target.channel))
            })?;
        Ok(round_to(hz_to_ghz(fine), 10))
    }

    /// Offset of a target from its channel frequency (GHz, 10 decimals)
    pub fn get_diff_frequency(&self, label: &str) -> QuplanResult<f64> {
        let target = self.get_target(label)?;
        Ok(round_to(target.frequency - self.get_base_frequency(label)?, 10))
    }

    /// Whether a target is within reach of its channel
    pub fn is_target_available(&self, label: &str) -> QuplanResult<bool> {
        let base = self.get_base_frequency(label)?;
        Ok(self.get_target(label)?.is_available_at(base))
    }

    // ========================================================================
    // Target Collections
    // ========================================================================

    /// GE targets by label
    pub fn ge_targets(&self) -> Vec<&Target> {
        self.targets.ge_targets().collect()
    }

    /// EF targets by label
    pub fn ef_targets(&self) -> Vec<&Target> {
        self.targets.ef_targets().collect()
    }

    /// CR targets by label
    pub fn cr_targets(&self) -> Vec<&Target> {
        self.targets.cr_targets().collect()
    }

    /// Readout targets by label
    pub fn readout_targets(&self) -> Vec<&Target> {
        self.targets.readout_targets().collect()
    }

    /// GE, EF, then CR targets
    pub fn control_targets(&self) -> Vec<&Target> {
        self.targets.control_targets().collect()
    }

    /// Every target
    pub fn targets(&self) -> Vec<&Target> {
        self.targets.targets().collect()
    }

    /// Targets with their generator channel, by label
    pub fn target_gen_channel_map(&self) -> Vec<(&Target, &ChannelId)> {
        self.targets.target_gen_channel_map()
    }

    /// Readout targets with their capture channel, by label
    pub fn target_cap_channel_map(&self) -> Vec<(&Target, &ChannelId)> {
        self.targets.target_cap_channel_map()
    }
}

impl fmt::Display for ExperimentSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ExperimentSystem({}):", self.chip().id)?;
        writeln!(f, "  {}", self.quantum_system)?;
        writeln!(f, "  {}", self.control_system)?;
        write!(
            f,
            "  targets: {} GE, {} EF, {} CR, {} readout",
            self.targets.ge_targets().count(),
            self.targets.ef_targets().count(),
            self.targets.cr_targets().count(),
            self.targets.readout_targets().count()
        )
    }
}
