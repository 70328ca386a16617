//! Wiring between the chip and the control hardware
//!
//! Gantree: L2_Config → WiringInfo
//!
//! Declares which generator port drives each qubit and which generator and
//! capture ports serve each readout mux.

use quplan_core::{
    ControlSystem, MuxIndex, PortId, PortRole, QuantumSystem, QuplanError, QuplanResult,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::hash::Hash;
use std::path::Path;

/// Qubit/mux ↔ port relations
/// Gantree: WiringInfo // 배선 정보
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WiringInfo {
    /// Qubit label → control generator port
    /// Gantree: ctrl: Vec<(String, PortId)> // 제어 배선
    ctrl: Vec<(String, PortId)>,

    /// Mux index → readout generator port
    /// Gantree: read_out: Vec<(MuxIndex, PortId)> // 리드아웃 출력
    read_out: Vec<(MuxIndex, PortId)>,

    /// Mux index → readout capture port
    /// Gantree: read_in: Vec<(MuxIndex, PortId)> // 리드아웃 입력
    read_in: Vec<(MuxIndex, PortId)>,
}

fn check_unique<K: Eq + Hash + fmt::Display>(
    relation: &str,
    pairs: &[(K, PortId)],
) -> QuplanResult<()> {
    let mut keys = HashSet::new();
    let mut ports = HashSet::new();
    for (key, port) in pairs {
        if !keys.insert(key) {
            return Err(QuplanError::DuplicateWiring(format!("{} {}", relation, key)));
        }
        if !ports.insert(port) {
            return Err(QuplanError::DuplicateWiring(format!("{} port {}", relation, port)));
        }
    }
    Ok(())
}

impl WiringInfo {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create wiring, rejecting any qubit, mux, or port wired twice in one relation
    pub fn new(
        ctrl: Vec<(String, PortId)>,
        read_out: Vec<(MuxIndex, PortId)>,
        read_in: Vec<(MuxIndex, PortId)>,
    ) -> QuplanResult<Self> {
        check_unique("ctrl", &ctrl)?;
        check_unique("read_out", &read_out)?;
        check_unique("read_in", &read_in)?;
        Ok(Self {
            ctrl,
            read_out,
            read_in,
        })
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> QuplanResult<Self> {
        let raw: Self = serde_json::from_str(json)?;
        Self::new(raw.ctrl, raw.read_out, raw.read_in)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> QuplanResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QuplanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ========================================================================
    // Relations
    // ========================================================================

    /// Control relation
    pub fn ctrl(&self) -> &[(String, PortId)] {
        &self.ctrl
    }

    /// Readout generator relation
    pub fn read_out(&self) -> &[(MuxIndex, PortId)] {
        &self.read_out
    }

    /// Readout capture relation
    pub fn read_in(&self) -> &[(MuxIndex, PortId)] {
        &self.read_in
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Control port of a qubit
    pub fn ctrl_port(&self, qubit: &str) -> Option<&PortId> {
        self.ctrl.iter().find(|(q, _)| q == qubit).map(|(_, p)| p)
    }

    /// Readout generator port of a mux
    pub fn read_out_port(&self, mux: MuxIndex) -> Option<&PortId> {
        self.read_out.iter().find(|(m, _)| *m == mux).map(|(_, p)| p)
    }

    /// Readout capture port of a mux
    pub fn read_in_port(&self, mux: MuxIndex) -> Option<&PortId> {
        self.read_in.iter().find(|(m, _)| *m == mux).map(|(_, p)| p)
    }

    /// Qubit driven through a port
    /// Gantree: qubit_by_ctrl_port(port) -> Option<&str> // 역방향 조회
    pub fn qubit_by_ctrl_port(&self, port: &PortId) -> Option<&str> {
        self.ctrl
            .iter()
            .find(|(_, p)| p == port)
            .map(|(q, _)| q.as_str())
    }

    /// Mux served by a readout generator port
    pub fn mux_by_read_out_port(&self, port: &PortId) -> Option<MuxIndex> {
        self.read_out.iter().find(|(_, p)| p == port).map(|(m, _)| *m)
    }

    /// Mux served by a readout capture port
    pub fn mux_by_read_in_port(&self, port: &PortId) -> Option<MuxIndex> {
        self.read_in.iter().find(|(_, p)| p == port).map(|(m, _)| *m)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check every relation against both topologies
    ///
    /// Qubits and muxes must exist, and each port must exist with the role the
    /// relation needs.
    pub fn validate(&self, quantum: &QuantumSystem, control: &ControlSystem) -> QuplanResult<()> {
        for (qubit, port) in &self.ctrl {
            quantum.get_qubit(qubit)?;
            check_port(control, port, PortRole::Ctrl)?;
        }
        for (mux, port) in &self.read_out {
            quantum.get_mux(*mux)?;
            check_port(control, port, PortRole::ReadOut)?;
        }
        for (mux, port) in &self.read_in {
            quantum.get_mux(*mux)?;
            check_port(control, port, PortRole::ReadIn)?;
        }
        Ok(())
    }
}

fn check_port(control: &ControlSystem, id: &PortId, role: PortRole) -> QuplanResult<()> {
    let port = control.get_port(id)?;
    if port.role() != role {
        return Err(QuplanError::InvalidTopology(format!(
            "port {} has role {} but is wired as {}",
            id,
            port.role(),
            role
        )));
    }
    Ok(())
}

impl fmt::Display for WiringInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WiringInfo(ctrl={}, read_out={}, read_in={})",
            self.ctrl.len(),
            self.read_out.len(),
            self.read_in.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
