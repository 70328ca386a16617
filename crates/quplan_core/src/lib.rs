//! # QuPlan Core
//!
//! Errors, units, and the immutable topology records that frequency planning
//! runs on.
//!
//! ## Gantree Architecture
//!
//! ```text
//! quplan_core // L0+L1: Foundation + Topology (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // 역할/사이드밴드/키 (완료)
//!         Constants // 단위 변환, 그리드, 기본값 (완료)
//!         Errors // 에러 타입 (완료)
//!         ContentHash // 변경 감지 해시 (완료)
//!     L1_Topology // 토폴로지 (완료)
//!         QuantumSystem // 칩/먹스/큐비트/공진기 (완료)
//!         ControlSystem // 박스/포트/채널 아레나 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use quplan_core::prelude::*;
//!
//! let qubits = vec![Qubit::new("Q08", 7.65143, 7.29543)];
//! let mux = Mux::new(2, vec![Resonator::new("RQ08", "Q08", 9.902)]);
//! let quantum = QuantumSystem::new(Chip::new("4Q", vec![mux]), qubits, vec![]).unwrap();
//!
//! assert_eq!(quantum.get_mux_for_qubit("Q08").unwrap().index, 2);
//! assert!(quantum.get_spectator_qubits("Q08").unwrap().is_empty());
//! ```
//!
//! ## Control Arena
//!
//! ```rust
//! use quplan_core::prelude::*;
//!
//! let boxes = vec![ControlBox::new(
//!     "Q2A",
//!     vec![
//!         Port::generator("Q2A", 1, PortRole::ReadOut, 1),
//!         Port::capture("Q2A", 0, 4),
//!     ],
//! )];
//! let control = ControlSystem::new(boxes).unwrap();
//!
//! let port = control.get_port(&PortId::new("Q2A", 0)).unwrap();
//! assert!(port.is_capture());
//! assert_eq!(port.fine_freq(0), None); // not initialized yet
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Content hashing (Gantree: L0_Foundation → ContentHash)
pub mod hash;

/// Quantum topology (Gantree: L1_Topology → QuantumSystem)
pub mod quantum;

/// Control hardware topology (Gantree: L1_Topology → ControlSystem)
pub mod control;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{control as control_grid, params, readout as readout_grid, units};
pub use control::{Channel, ControlBox, ControlSystem, Port, PortSettings, Synthesis};
pub use error::{QuplanError, QuplanResult};
pub use hash::{combine_hashes, content_hash};
pub use quantum::{Chip, Mux, QuantumSystem, Qubit, Resonator};
pub use types::{
    ChannelId, ChannelKind, FreqHz, FrequencyGhz, MuxIndex, PortId, PortRole, RfSwitch, Sideband,
};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use quplan_core::prelude::*;
    //! ```

    pub use crate::constants::{control as control_grid, params, readout as readout_grid, units};
    pub use crate::control::{Channel, ControlBox, ControlSystem, Port, PortSettings, Synthesis};
    pub use crate::error::{QuplanError, QuplanResult};
    pub use crate::hash::{combine_hashes, content_hash};
    pub use crate::quantum::{Chip, Mux, QuantumSystem, Qubit, Resonator};
    pub use crate::types::{
        ChannelId, ChannelKind, FreqHz, FrequencyGhz, MuxIndex, PortId, PortRole, RfSwitch,
        Sideband,
    };
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn quantum() -> QuantumSystem {
        let qubits = vec![
            Qubit::new("Q08", 7.65143, 7.29543),
            Qubit::new("Q09", 8.45608, 8.00808),
        ];
        let mux = Mux::new(
            2,
            vec![
                Resonator::new("RQ08", "Q08", 9.902),
                Resonator::new("RQ09", "Q09", 10.1085),
            ],
        );
        QuantumSystem::new(
            Chip::new("4Q", vec![mux]),
            qubits,
            vec![("Q08".into(), "Q09".into())],
        )
        .unwrap()
    }

    #[test]
    fn test_quantum_serialization_preserves_hash() {
        let original = quantum();
        let json = serde_json::to_string(&original).unwrap();
        let restored: QuantumSystem = serde_json::from_str(&json).unwrap();

        assert_eq!(original, restored);
        assert_eq!(content_hash(&original), content_hash(&restored));
    }

    #[test]
    fn test_configuration_changes_control_hash() {
        let mut control = ControlSystem::new(vec![ControlBox::new(
            "Q2A",
            vec![Port::generator("Q2A", 5, PortRole::Ctrl, 1)],
        )])
        .unwrap();
        let before = content_hash(&control);

        control
            .configure_port(&PortId::new("Q2A", 5), PortSettings::unused(RfSwitch::Pass))
            .unwrap();

        assert_ne!(before, content_hash(&control));
    }

    #[test]
    fn test_spectator_symmetry() {
        let system = quantum();
        assert_eq!(system.get_spectator_qubits("Q08").unwrap()[0].label, "Q09");
        assert_eq!(system.get_spectator_qubits("Q09").unwrap()[0].label, "Q08");
    }

    #[test]
    fn test_units_round_trip_on_grid() {
        let hz = 8_500_000_000;
        assert_eq!(units::ghz_to_hz(units::hz_to_ghz(hz)).round() as i64, hz);
    }
}
