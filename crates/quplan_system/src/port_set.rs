//! Per-qubit port sets
//!
//! Gantree: L5_System → QubitPortSet
//!
//! Derived view of the wiring: for each controlled qubit, the control port
//! plus the readout generator and capture ports of its mux.

use quplan_config::WiringInfo;
use quplan_core::{PortId, QuantumSystem, QuplanError, QuplanResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ports serving one qubit
/// Gantree: QubitPortSet // 큐비트 포트 세트
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QubitPortSet {
    /// Control generator port
    pub ctrl_port: PortId,
    /// Readout generator port
    pub read_out_port: PortId,
    /// Readout capture port
    pub read_in_port: PortId,
}

impl QubitPortSet {
    /// Box ids touched by this set
    pub fn box_ids(&self) -> [&str; 3] {
        [
            self.ctrl_port.box_id.as_str(),
            self.read_out_port.box_id.as_str(),
            self.read_in_port.box_id.as_str(),
        ]
    }
}

/// Port set of every qubit wired for control
/// Gantree: build_port_set_map(quantum, wiring) -> BTreeMap // 포트 맵
///
/// A qubit with a control port but no readout wiring for its mux is an
/// [`QuplanError::InvalidTopology`].
pub fn build_port_set_map(
    quantum: &QuantumSystem,
    wiring: &WiringInfo,
) -> QuplanResult<BTreeMap<String, QubitPortSet>> {
    let mut map = BTreeMap::new();
    for (qubit, ctrl_port) in wiring.ctrl() {
        let mux = quantum.get_mux_for_qubit(qubit).map_err(|_| {
            QuplanError::InvalidTopology(format!("qubit {} has no readout resonator", qubit))
        })?;
        let missing = |relation: &str| {
            QuplanError::InvalidTopology(format!(
                "qubit {} has a control port but mux {} has no {} port",
                qubit, mux.index, relation
            ))
        };
        let read_out_port = wiring
            .read_out_port(mux.index)
            .ok_or_else(|| missing("read_out"))?;
        let read_in_port = wiring
            .read_in_port(mux.index)
            .ok_or_else(|| missing("read_in"))?;

        map.insert(
            qubit.clone(),
            QubitPortSet {
                ctrl_port: ctrl_port.clone(),
                read_out_port: read_out_port.clone(),
                read_in_port: read_in_port.clone(),
            },
        );
    }
    Ok(map)
}
