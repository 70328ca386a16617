//! Target records
//!
//! Gantree: L4_Target → Target
//!
//! A target is a logical drive or readout address: a label, the frequency it
//! is meant to run at, the qubit or resonator it acts on, and the key of the
//! generator channel that produces it.

use crate::label::{cr_label, cr_pair_label, ef_label, ge_label, read_label};
use quplan_core::control_grid::AVAILABLE_BANDWIDTH_GHZ;
use quplan_core::{ChannelId, FrequencyGhz, QuplanResult, Qubit, Resonator};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Target Type
// ============================================================================

/// Kind of target
/// Gantree: TargetType // 타겟 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TargetType {
    /// GE drive
    CtrlGe,
    /// EF drive
    CtrlEf,
    /// Cross-resonance drive
    CtrlCr,
    /// Readout
    Read,
    /// Anything else
    Unknown,
}

impl TargetType {
    /// Channel this kind of target occupies on its port
    /// Gantree: channel_number() -> Option<usize> // GE 0, EF 1, CR 2
    pub fn channel_number(&self) -> Option<usize> {
        match self {
            TargetType::CtrlGe => Some(0),
            TargetType::CtrlEf => Some(1),
            TargetType::CtrlCr => Some(2),
            TargetType::Read => Some(0),
            TargetType::Unknown => None,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetType::CtrlGe => "CTRL_GE",
            TargetType::CtrlEf => "CTRL_EF",
            TargetType::CtrlCr => "CTRL_CR",
            TargetType::Read => "READ",
            TargetType::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Quantum Object
// ============================================================================

/// Quantum object a target acts on
/// Gantree: QuantumObjectRef // Qubit | Resonator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantumObjectRef {
    /// Qubit by label
    Qubit(String),
    /// Resonator by label, with the qubit it reads out
    Resonator {
        /// Resonator label
        label: String,
        /// Qubit label
        qubit: String,
    },
}

impl QuantumObjectRef {
    /// Label of the referenced object
    pub fn label(&self) -> &str {
        match self {
            QuantumObjectRef::Qubit(label) => label,
            QuantumObjectRef::Resonator { label, .. } => label,
        }
    }

    /// Label of the qubit the object belongs to
    pub fn qubit(&self) -> &str {
        match self {
            QuantumObjectRef::Qubit(label) => label,
            QuantumObjectRef::Resonator { qubit, .. } => qubit,
        }
    }
}

impl From<&Qubit> for QuantumObjectRef {
    fn from(qubit: &Qubit) -> Self {
        QuantumObjectRef::Qubit(qubit.label.clone())
    }
}

impl From<&Resonator> for QuantumObjectRef {
    fn from(resonator: &Resonator) -> Self {
        QuantumObjectRef::Resonator {
            label: resonator.label.clone(),
            qubit: resonator.qubit.clone(),
        }
    }
}

// ============================================================================
// Target
// ============================================================================

/// Logical drive or readout address bound to a generator channel
/// Gantree: Target // 타겟
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Unique label
    pub label: String,
    /// Intended frequency (GHz)
    pub frequency: FrequencyGhz,
    /// Object acted on
    pub object: QuantumObjectRef,
    /// Channel producing this target; the capture channel for capture bindings
    pub channel: ChannelId,
    /// Kind
    pub target_type: TargetType,
}

impl Target {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a target of any kind
    pub fn new(
        label: impl Into<String>,
        frequency: FrequencyGhz,
        object: QuantumObjectRef,
        channel: ChannelId,
        target_type: TargetType,
    ) -> Self {
        Self {
            label: label.into(),
            frequency,
            object,
            channel,
            target_type,
        }
    }

    /// GE drive of a qubit
    pub fn new_ge(qubit: &Qubit, channel: ChannelId) -> QuplanResult<Self> {
        Ok(Self::new(
            ge_label(&qubit.label)?,
            qubit.ge_frequency,
            qubit.into(),
            channel,
            TargetType::CtrlGe,
        ))
    }

    /// EF drive of a qubit
    pub fn new_ef(qubit: &Qubit, channel: ChannelId) -> QuplanResult<Self> {
        Ok(Self::new(
            ef_label(&qubit.label)?,
            qubit.ef_frequency,
            qubit.into(),
            channel,
            TargetType::CtrlEf,
        ))
    }

    /// Self-CR drive of a qubit at `frequency` (GHz)
    pub fn new_cr(qubit: &Qubit, frequency: FrequencyGhz, channel: ChannelId) -> QuplanResult<Self> {
        Ok(Self::new(
            cr_label(&qubit.label)?,
            frequency,
            qubit.into(),
            channel,
            TargetType::CtrlCr,
        ))
    }

    /// CR drive of `control` at the GE frequency of `target`
    pub fn new_cr_pair(control: &Qubit, target: &Qubit, channel: ChannelId) -> QuplanResult<Self> {
        Ok(Self::new(
            cr_pair_label(&control.label, &target.label)?,
            target.ge_frequency,
            control.into(),
            channel,
            TargetType::CtrlCr,
        ))
    }

    /// Readout of a resonator
    pub fn new_read(resonator: &Resonator, channel: ChannelId) -> QuplanResult<Self> {
        Ok(Self::new(
            read_label(&resonator.label)?,
            resonator.frequency,
            resonator.into(),
            channel,
            TargetType::Read,
        ))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Label of the qubit this target belongs to
    pub fn qubit(&self) -> &str {
        self.object.qubit()
    }

    /// Check if GE drive
    pub fn is_ge(&self) -> bool {
        self.target_type == TargetType::CtrlGe
    }

    /// Check if EF drive
    pub fn is_ef(&self) -> bool {
        self.target_type == TargetType::CtrlEf
    }

    /// Check if CR drive
    pub fn is_cr(&self) -> bool {
        self.target_type == TargetType::CtrlCr
    }

    /// Check if readout
    pub fn is_read(&self) -> bool {
        self.target_type == TargetType::Read
    }

    /// Whether a channel synthesizing `fine_frequency` (GHz) can reach this target
    pub fn is_available_at(&self, fine_frequency: FrequencyGhz) -> bool {
        (self.frequency - fine_frequency).abs() < AVAILABLE_BANDWIDTH_GHZ
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Target(label={}, frequency={}, channel={}, object={})",
            self.label,
            self.frequency,
            self.channel,
            self.object.label()
        )
    }
}
