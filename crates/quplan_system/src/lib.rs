//! # QuPlan System
//!
//! Experiment system facade: plans every port, binds every target, and
//! answers lookups over the result.
//!
//! ## Gantree Architecture
//!
//! ```text
//! quplan_system // L5: System (완료)
//!     QubitPortSet // 큐비트별 포트 (완료)
//!         ctrl_port, read_out_port, read_in_port
//!     PortInit // 포트 초기화 (완료)
//!         plan_ports() → apply_ports()
//!     ExperimentSystem // 파사드 (완료)
//!         new() / with_config()
//!         get_target(), get_ge_target(), get_cr_pair_target() ...
//!         get_control_port(), get_boxes_for_qubits(), get_readout_pair()
//!         get_base_frequency(), get_diff_frequency()
//!         hash()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use quplan_system::prelude::*;
//! use quplan_core::prelude::*;
//! use quplan_config::prelude::*;
//!
//! let quantum = QuantumSystem::new(
//!     Chip::new("1Q", vec![Mux::new(0, vec![Resonator::new("RQ00", "Q00", 10.0)])]),
//!     vec![Qubit::new("Q00", 7.65143, 7.29543)],
//!     vec![],
//! )
//! .unwrap();
//! let control = ControlSystem::new(vec![ControlBox::new(
//!     "A",
//!     vec![
//!         Port::capture("A", 0, 4),
//!         Port::generator("A", 1, PortRole::ReadOut, 1),
//!         Port::generator("A", 2, PortRole::Ctrl, 1),
//!     ],
//! )])
//! .unwrap();
//! let wiring = WiringInfo::new(
//!     vec![("Q00".into(), PortId::new("A", 2))],
//!     vec![(0, PortId::new("A", 1))],
//!     vec![(0, PortId::new("A", 0))],
//! )
//! .unwrap();
//!
//! let system = ExperimentSystem::new(quantum, control, wiring, ControlParams::new()).unwrap();
//! assert_eq!(system.get_base_frequency("Q00").unwrap(), 7.65625);
//! assert_eq!(system.get_readout_target("Q00").unwrap().label, "RQ00");
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Per-qubit port sets (Gantree: L5_System → QubitPortSet)
pub mod port_set;

/// Port initialization (Gantree: L5_System → PortInit)
pub mod init;

/// Facade (Gantree: L5_System → ExperimentSystem)
pub mod experiment_system;

// ============================================================================
// Re-exports
// ============================================================================

pub use experiment_system::ExperimentSystem;
pub use init::{apply_ports, plan_ports};
pub use port_set::{build_port_set_map, QubitPortSet};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use quplan_system::prelude::*;
    //! ```

    pub use crate::experiment_system::ExperimentSystem;
    pub use crate::port_set::QubitPortSet;
    pub use quplan_target::{Target, TargetType};
}

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
    use quplan_config::{ControlParams, WiringInfo};
    use quplan_core::{
        Chip, ControlBox, ControlSystem, Mux, Port, PortId, PortRole, QuantumSystem, Qubit,
        QuplanError, Resonator,
    };

    fn inputs(ctrl_channels: usize) -> (QuantumSystem, ControlSystem, WiringInfo) {
        let quantum = QuantumSystem::new(
            Chip::new("1Q", vec![Mux::new(0, vec![Resonator::new("RQ00", "Q00", 10.0)])]),
            vec![Qubit::new("Q00", 7.65143, 7.29543)],
            vec![],
        )
        .unwrap();
        let control = ControlSystem::new(vec![ControlBox::new(
            "A",
            vec![
                Port::capture("A", 0, 4),
                Port::generator("A", 1, PortRole::ReadOut, 1),
                Port::generator("A", 2, PortRole::Ctrl, ctrl_channels),
            ],
        )])
        .unwrap();
        let wiring = WiringInfo::new(
            vec![("Q00".into(), PortId::new("A", 2))],
            vec![(0, PortId::new("A", 1))],
            vec![(0, PortId::new("A", 0))],
        )
        .unwrap();
        (quantum, control, wiring)
    }

    #[test]
    fn test_single_qubit_system() {
        let (quantum, control, wiring) = inputs(3);
        let system = ExperimentSystem::new(quantum, control, wiring, ControlParams::new()).unwrap();

        assert_eq!(system.targets().len(), 4);
        assert_eq!(system.get_cr_target("Q00").unwrap().frequency, 7.65143);
        assert_eq!(system.get_base_frequency("RQ00").unwrap(), 10.0);
        assert!(system.is_target_available("Q00-ef").unwrap());
        assert!(system.to_string().contains("1 GE, 1 EF, 1 CR, 1 readout"));
    }

    #[test]
    fn test_bad_channel_count_aborts_construction() {
        let (quantum, control, wiring) = inputs(2);
        let err = ExperimentSystem::new(quantum, control, wiring, ControlParams::new()).unwrap_err();
        assert!(err.is_topology_error());
        assert!(err.is_fatal());
    }

    #[test]
    fn test_wiring_must_match_roles() {
        let (quantum, control, _) = inputs(1);
        let wiring = WiringInfo::new(
            vec![("Q00".into(), PortId::new("A", 1))],
            vec![(0, PortId::new("A", 2))],
            vec![(0, PortId::new("A", 0))],
        )
        .unwrap();
        let err = ExperimentSystem::new(quantum, control, wiring, ControlParams::new()).unwrap_err();
        assert!(matches!(err, QuplanError::InvalidTopology(_)));
    }
}
