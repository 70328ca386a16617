//! # QuPlan Config
//!
//! Wiring, hardware parameters, and planner search spaces.
//!
//! ## Gantree Architecture
//!
//! ```text
//! quplan_config // L2: Config (완료)
//!     WiringInfo // 배선 정보 (완료)
//!         ctrl, read_out, read_in
//!         qubit_by_ctrl_port(), mux_by_read_out_port(), validate()
//!     ControlParams // 제어 파라미터 (완료)
//!         get_control_vatt(), get_readout_fsc(), get_capture_delay() ...
//!     FrequencyGrid // 주파수 그리드 (완료)
//!     PlannerConfig // 탐색 설정 (완료)
//!         ReadoutPlanConfig, ControlPlanConfig, cr_max_diff
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use quplan_config::prelude::*;
//! use quplan_core::PortId;
//!
//! let wiring = WiringInfo::new(
//!     vec![("Q08".into(), PortId::new("Q2A", 5))],
//!     vec![(2, PortId::new("Q2A", 1))],
//!     vec![(2, PortId::new("Q2A", 0))],
//! )
//! .unwrap();
//! assert_eq!(wiring.qubit_by_ctrl_port(&PortId::new("Q2A", 5)), Some("Q08"));
//!
//! let params = ControlParams::new().with_readout_vatt(2, 1536);
//! assert_eq!(params.get_readout_vatt(2), 1536);
//! assert_eq!(params.get_readout_vatt(3), 2048); // default
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Wiring relations (Gantree: L2_Config → WiringInfo)
pub mod wiring;

/// Hardware parameters (Gantree: L2_Config → ControlParams)
pub mod params;

/// Frequency grids (Gantree: L2_Config → FrequencyGrid)
pub mod grid;

/// Planner configuration (Gantree: L2_Config → PlannerConfig)
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ControlPlanConfig, MandatoryFrequency, PlannerConfig, ReadoutPlanConfig};
pub use grid::{FrequencyGrid, MAX_GRID_POINTS};
pub use params::ControlParams;
pub use wiring::WiringInfo;

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use quplan_config::prelude::*;
    //! ```

    pub use crate::config::{
        ControlPlanConfig, MandatoryFrequency, PlannerConfig, ReadoutPlanConfig,
    };
    pub use crate::grid::FrequencyGrid;
    pub use crate::params::ControlParams;
    pub use crate::wiring::WiringInfo;
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
