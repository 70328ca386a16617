//! Error types for QuPlan
//!
//! Gantree: L0_Foundation → Errors
//!
//! Every stage of frequency planning and target resolution either fully
//! succeeds or fails with one of these errors. Nothing is recovered internally.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QuPlan
/// Gantree: QuplanError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuplanError {
    // ========================================================================
    // Topology Errors
    // ========================================================================
    /// Structurally impossible topology or wiring
    /// Gantree: InvalidTopology(String) // 토폴로지 오류
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// Control port with an unsupported channel count
    #[error("Invalid channel count {n_channels} on port {port}: expected 1 or 3")]
    InvalidChannelCount { port: String, n_channels: usize },

    /// Port used in a relation that needs the other kind
    #[error("Port {port} must be a {expected} port")]
    PortKindMismatch { port: String, expected: String },

    /// Qubit or mux wired more than once
    #[error("Duplicate wiring for {0}")]
    DuplicateWiring(String),

    // ========================================================================
    // Planning Errors
    // ========================================================================
    /// Mandatory frequencies cannot share one window
    /// Gantree: UnsatisfiableConstraint{{spread,max_diff}} // 필수 주파수
    #[error(
        "Mandatory frequencies cannot be covered: spread {spread} exceeds max_diff {max_diff}"
    )]
    UnsatisfiableConstraint { spread: f64, max_diff: f64 },

    /// Grid search found no candidate
    /// Gantree: Planning(String) // 탐색 실패
    #[error("Planning error: {0}")]
    Planning(String),

    /// Malformed search grid
    #[error("Invalid grid [{min}, {max}] step {step}")]
    InvalidGrid { min: i64, max: i64, step: i64 },

    // ========================================================================
    // Target Errors
    // ========================================================================
    /// Label does not match the target label grammar
    /// Gantree: InvalidLabel(String) // 라벨 오류
    #[error("Invalid target label `{0}`")]
    InvalidLabel(String),

    /// Two targets resolved to the same label
    #[error("Duplicate target label `{0}`")]
    DuplicateTarget(String),

    /// Port frequency fields written twice
    #[error("Port {0} is already configured")]
    PortAlreadyConfigured(String),

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    #[error("Target `{0}` not found")]
    TargetNotFound(String),

    #[error("Qubit `{0}` not found")]
    QubitNotFound(String),

    #[error("Resonator `{0}` not found")]
    ResonatorNotFound(String),

    #[error("Mux `{0}` not found")]
    MuxNotFound(String),

    #[error("Box `{0}` not found")]
    BoxNotFound(String),

    #[error("Port `{0}` not found")]
    PortNotFound(String),

    /// Qubit has no control/readout wiring
    #[error("Qubit `{0}` is not wired")]
    QubitNotWired(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(String),

    /// File I/O error
    #[error("File error: {0}")]
    File(String),
}

/// Result type alias for QuPlan operations
/// Gantree: QuplanResult<T> // type alias
pub type QuplanResult<T> = Result<T, QuplanError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QuplanError {
    fn from(err: serde_json::Error) -> Self {
        QuplanError::Json(err.to_string())
    }
}

impl From<std::io::Error> for QuplanError {
    fn from(err: std::io::Error) -> Self {
        QuplanError::File(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QuplanError {
    /// Check if error is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            QuplanError::TargetNotFound(_)
                | QuplanError::QubitNotFound(_)
                | QuplanError::ResonatorNotFound(_)
                | QuplanError::MuxNotFound(_)
                | QuplanError::BoxNotFound(_)
                | QuplanError::PortNotFound(_)
                | QuplanError::QubitNotWired(_)
        )
    }

    /// Check if error comes from malformed topology or wiring
    pub fn is_topology_error(&self) -> bool {
        matches!(
            self,
            QuplanError::InvalidTopology(_)
                | QuplanError::InvalidChannelCount { .. }
                | QuplanError::PortKindMismatch { .. }
                | QuplanError::DuplicateWiring(_)
        )
    }

    /// Check if error must abort system construction
    ///
    /// Lookup misses are reported to the caller of a query; everything else
    /// means the hardware must not be touched.
    pub fn is_fatal(&self) -> bool {
        !self.is_not_found()
    }
}

// ============================================================================
// Tests
// ============================================================================
