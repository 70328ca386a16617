//! # QuPlan Planner
//!
//! LO/CNCO/FNCO grid search for readout and control ports.
//!
//! ## Gantree Architecture
//!
//! ```text
//! quplan_planner // L3: Planner (완료)
//!     find_optimal_center_frequency // 중심 주파수 탐색 (완료)
//!     calc_cr_target_frequency // CR 주파수 (완료)
//!     plan_readout // 리드아웃: lo + cnco + fnco (완료)
//!     plan_control // 제어: lo − cnco − fnco (완료)
//!         1ch: GE
//!         3ch: GE, EF, CR (공유 LO)
//!     FrequencyPlanner // 설정 바인딩 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use quplan_planner::prelude::*;
//! use quplan_core::{Mux, Resonator};
//!
//! let mux = Mux::new(
//!     2,
//!     vec![
//!         Resonator::new("RQ08", "Q08", 9.902),
//!         Resonator::new("RQ09", "Q09", 9.908),
//!     ],
//! );
//! let planner = FrequencyPlanner::default();
//! let settings = planner.plan_readout(&mux).unwrap();
//! assert_eq!(settings.frequency(), 9_906_250_000);
//! ```
//!
//! ## Window Search
//!
//! ```rust
//! use quplan_planner::find_optimal_center_frequency;
//!
//! // 0.0 is an unset frequency and is ignored
//! let center = find_optimal_center_frequency(&[0.0, 7.9, 8.0], 0.25, None).unwrap();
//! assert!((center - 7.95).abs() < 1e-12);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Window-center search (Gantree: L3_Planner → CenterFrequency)
pub mod center;

/// Readout planning (Gantree: L3_Planner → ReadoutPlan)
pub mod readout;

/// Control planning (Gantree: L3_Planner → ControlPlan)
pub mod control;

/// Planner facade (Gantree: L3_Planner → FrequencyPlanner)
pub mod planner;

// ============================================================================
// Re-exports
// ============================================================================

pub use center::{calc_cr_target_frequency, find_optimal_center_frequency};
pub use control::{plan_control, ControlSettings};
pub use planner::FrequencyPlanner;
pub use readout::{plan_readout, readout_target_frequency, ReadoutSettings};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use quplan_planner::prelude::*;
    //! ```

    pub use crate::center::{calc_cr_target_frequency, find_optimal_center_frequency};
    pub use crate::control::{plan_control, ControlSettings};
    pub use crate::planner::FrequencyPlanner;
    pub use crate::readout::{plan_readout, ReadoutSettings};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
