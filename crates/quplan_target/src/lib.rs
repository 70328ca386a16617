//! # QuPlan Target
//!
//! Target records, label grammar, and the target registry.
//!
//! ## Gantree Architecture
//!
//! ```text
//! quplan_target // L4: Target (완료)
//!     label // 라벨 문법 (완료)
//!         qubit_label(), ge_label(), ef_label(), cr_label(), read_label()
//!     Target // 타겟 (완료)
//!         TargetType: CtrlGe | CtrlEf | CtrlCr | Read | Unknown
//!         QuantumObjectRef: Qubit | Resonator
//!     TargetRegistry // 레지스트리 (완료)
//!         ge, ef, cr, readout, capture (라벨 순)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use quplan_target::prelude::*;
//! use quplan_core::{PortId, Qubit};
//!
//! assert_eq!(qubit_label("RQ08").unwrap(), "Q08");
//! assert_eq!(cr_label("Q08").unwrap(), "Q08-CR");
//!
//! let qubit = Qubit::new("Q08", 7.65143, 7.29543);
//! let target = Target::new_ef(&qubit, PortId::new("Q73A", 5).channel(1)).unwrap();
//! assert_eq!(target.label, "Q08-ef");
//! assert_eq!(target.target_type.channel_number(), Some(1));
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Label grammar (Gantree: L4_Target → Label)
pub mod label;

/// Target records (Gantree: L4_Target → Target)
pub mod target;

/// Target registry (Gantree: L4_Target → TargetRegistry)
pub mod registry;

// ============================================================================
// Re-exports
// ============================================================================

pub use label::{cr_label, cr_pair_label, ef_label, ge_label, qubit_label, read_label};
pub use registry::TargetRegistry;
pub use target::{QuantumObjectRef, Target, TargetType};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use quplan_target::prelude::*;
    //! ```

    pub use crate::label::{cr_label, cr_pair_label, ef_label, ge_label, qubit_label, read_label};
    pub use crate::registry::TargetRegistry;
    pub use crate::target::{QuantumObjectRef, Target, TargetType};
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
    use quplan_core::{PortId, Qubit, Resonator};

    #[test]
    fn test_target_json_round_trip() {
        let resonator = Resonator::new("RQ08", "Q08", 10.29);
        let target = Target::new_read(&resonator, PortId::new("Q73A", 1).channel(0)).unwrap();
        let json = serde_json::to_string(&target).unwrap();
        let restored: Target = serde_json::from_str(&json).unwrap();
        assert_eq!(target, restored);
    }

    #[test]
    fn test_labels_normalize_through_targets() {
        let qubit = Qubit::new("Q08", 7.65143, 7.29543);
        let channel = PortId::new("Q73A", 5).channel(0);
        let ge = Target::new_ge(&qubit, channel).unwrap();
        for label in ["Q08", "RQ08", "Q08-ef", "Q08-CR", "Q08-Q09"] {
            assert_eq!(ge_label(label).unwrap(), ge.label);
        }
    }
}
