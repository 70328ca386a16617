//! Quantum topology for QuPlan
//!
//! Gantree: L1_Topology → QuantumSystem
//!
//! Immutable chip records: qubits with their transition frequencies, readout
//! resonators grouped into muxes, and the coupling map that defines which
//! qubits are spectators of each other.

use crate::error::{QuplanError, QuplanResult};
use crate::types::{FrequencyGhz, MuxIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Transmon qubit
/// Gantree: Qubit // 큐비트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qubit {
    /// Label such as `Q08`
    pub label: String,
    /// GE transition frequency (GHz), `0.0` when unset
    pub ge_frequency: FrequencyGhz,
    /// EF transition frequency (GHz), `0.0` when unset
    pub ef_frequency: FrequencyGhz,
}

impl Qubit {
    /// Create a qubit
    pub fn new(label: impl Into<String>, ge_frequency: f64, ef_frequency: f64) -> Self {
        Self {
            label: label.into(),
            ge_frequency,
            ef_frequency,
        }
    }

    /// Whether the GE frequency has been calibrated
    #[inline]
    pub fn has_ge_frequency(&self) -> bool {
        self.ge_frequency > 0.0
    }
}

impl Hash for Qubit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
        self.ge_frequency.to_bits().hash(state);
        self.ef_frequency.to_bits().hash(state);
    }
}

/// Readout resonator
/// Gantree: Resonator // 공진기
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resonator {
    /// Label such as `RQ08`
    pub label: String,
    /// Label of the qubit read out through this resonator
    pub qubit: String,
    /// Resonance frequency (GHz)
    pub frequency: FrequencyGhz,
}

impl Resonator {
    /// Create a resonator
    pub fn new(label: impl Into<String>, qubit: impl Into<String>, frequency: f64) -> Self {
        Self {
            label: label.into(),
            qubit: qubit.into(),
            frequency,
        }
    }
}

impl Hash for Resonator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
        self.qubit.hash(state);
        self.frequency.to_bits().hash(state);
    }
}

/// Multiplexed readout group
/// Gantree: Mux // 멀티플렉서
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Mux {
    /// Mux index on the chip
    pub index: MuxIndex,
    /// Resonators sharing this mux, in readout order
    pub resonators: Vec<Resonator>,
}

impl Mux {
    /// Create a mux
    pub fn new(index: MuxIndex, resonators: Vec<Resonator>) -> Self {
        Self { index, resonators }
    }

    /// Labels of the qubits read out through this mux
    pub fn qubit_labels(&self) -> impl Iterator<Item = &str> {
        self.resonators.iter().map(|r| r.qubit.as_str())
    }

    /// Position of a resonator within this mux
    pub fn position_of(&self, resonator_label: &str) -> Option<usize> {
        self.resonators
            .iter()
            .position(|r| r.label == resonator_label)
    }
}

/// Chip
/// Gantree: Chip // 칩
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Chip {
    /// Chip identifier
    pub id: String,
    /// Muxes in index order
    pub muxes: Vec<Mux>,
}

impl Chip {
    /// Create a chip
    pub fn new(id: impl Into<String>, muxes: Vec<Mux>) -> Self {
        Self {
            id: id.into(),
            muxes,
        }
    }
}

/// Quantum topology provider
/// Gantree: QuantumSystem // 양자 시스템
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct QuantumSystem {
    chip: Chip,

    /// Qubits in chip order
    qubits: Vec<Qubit>,

    /// Undirected qubit couplings by label
    /// Gantree: coupling_map: Vec<(String, String)> // 연결 맵
    coupling_map: Vec<(String, String)>,
}

impl QuantumSystem {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from chip records and a coupling map
    /// Gantree: new(chip, qubits, map) -> Result<Self> // 생성+검증
    pub fn new(
        chip: Chip,
        qubits: Vec<Qubit>,
        coupling_map: Vec<(String, String)>,
    ) -> QuplanResult<Self> {
        let mut labels = HashSet::new();
        for qubit in &qubits {
            if !labels.insert(qubit.label.as_str()) {
                return Err(QuplanError::InvalidTopology(format!(
                    "qubit `{}` declared twice",
                    qubit.label
                )));
            }
        }

        let mut mux_indices = HashSet::new();
        let mut resonator_labels = HashSet::new();
        for mux in &chip.muxes {
            if !mux_indices.insert(mux.index) {
                return Err(QuplanError::InvalidTopology(format!(
                    "mux {} declared twice",
                    mux.index
                )));
            }
            for resonator in &mux.resonators {
                if !resonator_labels.insert(resonator.label.as_str()) {
                    return Err(QuplanError::InvalidTopology(format!(
                        "resonator `{}` belongs to more than one mux",
                        resonator.label
                    )));
                }
                if !labels.contains(resonator.qubit.as_str()) {
                    return Err(QuplanError::QubitNotFound(resonator.qubit.clone()));
                }
            }
        }

        for (q1, q2) in &coupling_map {
            if q1 == q2 {
                return Err(QuplanError::InvalidTopology(format!(
                    "qubit `{}` coupled to itself",
                    q1
                )));
            }
            for q in [q1, q2] {
                if !labels.contains(q.as_str()) {
                    return Err(QuplanError::QubitNotFound(q.clone()));
                }
            }
        }

        Ok(Self {
            chip,
            qubits,
            coupling_map,
        })
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Get chip
    pub fn chip(&self) -> &Chip {
        &self.chip
    }

    /// Get qubits in chip order
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get muxes in chip order
    pub fn muxes(&self) -> &[Mux] {
        &self.chip.muxes
    }

    /// Get resonators, mux by mux
    pub fn resonators(&self) -> impl Iterator<Item = &Resonator> {
        self.chip.muxes.iter().flat_map(|m| m.resonators.iter())
    }

    /// Get coupling map
    pub fn coupling_map(&self) -> &[(String, String)] {
        &self.coupling_map
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Get qubit by label
    pub fn get_qubit(&self, label: &str) -> QuplanResult<&Qubit> {
        self.qubits
            .iter()
            .find(|q| q.label == label)
            .ok_or_else(|| QuplanError::QubitNotFound(label.to_string()))
    }

    /// Get qubit by position
    pub fn get_qubit_by_index(&self, index: usize) -> QuplanResult<&Qubit> {
        self.qubits
            .get(index)
            .ok_or_else(|| QuplanError::QubitNotFound(index.to_string()))
    }

    /// Get resonator by label
    pub fn get_resonator(&self, label: &str) -> QuplanResult<&Resonator> {
        self.resonators()
            .find(|r| r.label == label)
            .ok_or_else(|| QuplanError::ResonatorNotFound(label.to_string()))
    }

    /// Get resonator by position
    pub fn get_resonator_by_index(&self, index: usize) -> QuplanResult<&Resonator> {
        self.resonators()
            .nth(index)
            .ok_or_else(|| QuplanError::ResonatorNotFound(index.to_string()))
    }

    /// Get resonator reading out a qubit
    pub fn get_resonator_for_qubit(&self, qubit: &str) -> QuplanResult<&Resonator> {
        self.resonators()
            .find(|r| r.qubit == qubit)
            .ok_or_else(|| QuplanError::ResonatorNotFound(qubit.to_string()))
    }

    /// Get mux by index
    pub fn get_mux(&self, index: MuxIndex) -> QuplanResult<&Mux> {
        self.chip
            .muxes
            .iter()
            .find(|m| m.index == index)
            .ok_or_else(|| QuplanError::MuxNotFound(index.to_string()))
    }

    /// Get mux containing a qubit's resonator
    pub fn get_mux_for_qubit(&self, qubit: &str) -> QuplanResult<&Mux> {
        self.chip
            .muxes
            .iter()
            .find(|m| m.resonators.iter().any(|r| r.qubit == qubit))
            .ok_or_else(|| QuplanError::MuxNotFound(qubit.to_string()))
    }

    /// Get spectator qubits (coupled neighbors), in chip order
    /// Gantree: get_spectator_qubits(q) -> Vec<&Qubit> // 이웃
    pub fn get_spectator_qubits(&self, label: &str) -> QuplanResult<Vec<&Qubit>> {
        self.get_qubit(label)?;

        let mut neighbors = HashSet::new();
        for (q1, q2) in &self.coupling_map {
            if q1 == label {
                neighbors.insert(q2.as_str());
            }
            if q2 == label {
                neighbors.insert(q1.as_str());
            }
        }

        Ok(self
            .qubits
            .iter()
            .filter(|q| neighbors.contains(q.label.as_str()))
            .collect())
    }

    /// Check if two qubits are coupled
    pub fn is_coupled(&self, q1: &str, q2: &str) -> bool {
        self.coupling_map
            .iter()
            .any(|(a, b)| (a == q1 && b == q2) || (a == q2 && b == q1))
    }
}

impl std::fmt::Display for QuantumSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "QuantumSystem({}, {} qubits, {} muxes, {} couplings)",
            self.chip.id,
            self.qubits.len(),
            self.chip.muxes.len(),
            self.coupling_map.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> QuantumSystem {
        let qubits = vec![
            Qubit::new("Q00", 7.8, 7.45),
            Qubit::new("Q01", 8.4, 8.05),
            Qubit::new("Q02", 0.0, 0.0),
            Qubit::new("Q03", 7.2, 6.85),
        ];
        let mux = Mux::new(
            0,
            vec![
                Resonator::new("RQ00", "Q00", 10.1),
                Resonator::new("RQ01", "Q01", 10.2),
                Resonator::new("RQ02", "Q02", 10.3),
                Resonator::new("RQ03", "Q03", 10.4),
            ],
        );
        let coupling = vec![
            ("Q00".to_string(), "Q01".to_string()),
            ("Q01".to_string(), "Q03".to_string()),
            ("Q03".to_string(), "Q02".to_string()),
            ("Q02".to_string(), "Q00".to_string()),
        ];
        QuantumSystem::new(Chip::new("64Q", vec![mux]), qubits, coupling).unwrap()
    }

    #[test]
    fn test_spectators_in_chip_order() {
        let system = square();
        let spectators: Vec<_> = system
            .get_spectator_qubits("Q00")
            .unwrap()
            .into_iter()
            .map(|q| q.label.as_str())
            .collect();
        assert_eq!(spectators, vec!["Q01", "Q02"]);
    }

    #[test]
    fn test_spectators_of_unknown_qubit() {
        let system = square();
        assert_eq!(
            system.get_spectator_qubits("Q99").unwrap_err(),
            QuplanError::QubitNotFound("Q99".into())
        );
    }

    #[test]
    fn test_lookups() {
        let system = square();
        assert_eq!(system.get_qubit_by_index(3).unwrap().label, "Q03");
        assert_eq!(system.get_resonator("RQ01").unwrap().qubit, "Q01");
        assert_eq!(system.get_resonator_by_index(2).unwrap().label, "RQ02");
        assert_eq!(system.get_mux_for_qubit("Q02").unwrap().index, 0);
        assert_eq!(system.get_mux(0).unwrap().position_of("RQ03"), Some(3));
        assert!(system.get_mux(1).unwrap_err().is_not_found());
        assert!(system.is_coupled("Q01", "Q00"));
        assert!(!system.is_coupled("Q00", "Q03"));
    }

    #[test]
    fn test_unset_frequency() {
        let system = square();
        assert!(!system.get_qubit("Q02").unwrap().has_ge_frequency());
        assert!(system.get_qubit("Q03").unwrap().has_ge_frequency());
    }

    #[test]
    fn test_duplicate_resonator_rejected() {
        let qubits = vec![Qubit::new("Q00", 7.8, 7.45)];
        let chip = Chip::new(
            "1Q",
            vec![
                Mux::new(0, vec![Resonator::new("RQ00", "Q00", 10.1)]),
                Mux::new(1, vec![Resonator::new("RQ00", "Q00", 10.1)]),
            ],
        );
        let err = QuantumSystem::new(chip, qubits, vec![]).unwrap_err();
        assert!(err.is_topology_error());
    }

    #[test]
    fn test_self_coupling_rejected() {
        let qubits = vec![Qubit::new("Q00", 7.8, 7.45)];
        let chip = Chip::new("1Q", vec![]);
        let err =
            QuantumSystem::new(chip, qubits, vec![("Q00".into(), "Q00".into())]).unwrap_err();
        assert!(err.is_topology_error());
    }

    #[test]
    fn test_unknown_resonator_qubit_rejected() {
        let chip = Chip::new("1Q", vec![Mux::new(0, vec![Resonator::new("RQ05", "Q05", 10.1)])]);
        let err = QuantumSystem::new(chip, vec![], vec![]).unwrap_err();
        assert_eq!(err, QuplanError::QubitNotFound("Q05".into()));
    }
}
