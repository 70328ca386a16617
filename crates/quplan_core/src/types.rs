//! Core types for QuPlan
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Closed enumerations and stable identifiers shared by every crate.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Hardware frequency in hertz
/// Gantree: FreqHz // pub type FreqHz = i64
pub type FreqHz = i64;

/// Logical frequency in gigahertz
/// Gantree: FrequencyGhz // pub type FrequencyGhz = f64
pub type FrequencyGhz = f64;

/// Mux index on the chip
pub type MuxIndex = usize;

// ============================================================================
// Enumerations
// ============================================================================

/// Role a port plays in the wiring
/// Gantree: PortRole // 포트 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PortRole {
    /// Qubit drive
    Ctrl,
    /// Readout pulse generation
    ReadOut,
    /// Readout capture
    ReadIn,
}

impl PortRole {
    /// Channel kind a port with this role must have
    pub fn expected_kind(&self) -> ChannelKind {
        match self {
            PortRole::Ctrl | PortRole::ReadOut => ChannelKind::Generator,
            PortRole::ReadIn => ChannelKind::Capture,
        }
    }
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortRole::Ctrl => write!(f, "CTRL"),
            PortRole::ReadOut => write!(f, "READ_OUT"),
            PortRole::ReadIn => write!(f, "READ_IN"),
        }
    }
}

/// Generator or capture hardware
/// Gantree: ChannelKind // 채널 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChannelKind {
    /// DAC-backed output
    Generator,
    /// ADC-backed input
    Capture,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Generator => write!(f, "generator"),
            ChannelKind::Capture => write!(f, "capture"),
        }
    }
}

/// Mixer sideband
/// Gantree: Sideband // 사이드밴드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sideband {
    /// `lo + cnco + fnco`
    Upper,
    /// `lo - cnco - fnco`
    Lower,
}

impl Sideband {
    /// Sign applied to the NCO contribution
    #[inline]
    pub fn sign(&self) -> i64 {
        match self {
            Sideband::Upper => 1,
            Sideband::Lower => -1,
        }
    }
}

impl fmt::Display for Sideband {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sideband::Upper => write!(f, "U"),
            Sideband::Lower => write!(f, "L"),
        }
    }
}

/// RF switch position of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RfSwitch {
    /// Output passes to the fridge line
    Pass,
    /// Output blocked
    #[default]
    Block,
    /// Capture input open
    Open,
    /// Internal loopback
    Loop,
}

// ============================================================================
// Identifiers
// ============================================================================

/// Stable key of a port inside the control system arena
/// Gantree: PortId // 포트 키
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortId {
    /// Owning box
    pub box_id: String,
    /// Port number within the box
    pub number: usize,
}

impl PortId {
    /// Create a port key
    pub fn new(box_id: impl Into<String>, number: usize) -> Self {
        Self {
            box_id: box_id.into(),
            number,
        }
    }

    /// Key of one of this port's channels
    pub fn channel(&self, number: usize) -> ChannelId {
        ChannelId {
            port: self.clone(),
            number,
        }
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.p{}", self.box_id, self.number)
    }
}

/// Stable key of a channel inside the control system arena
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId {
    /// Owning port
    pub port: PortId,
    /// Channel index within the port
    pub number: usize,
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.ch{}", self.port, self.number)
    }
}

// ============================================================================
// Tests
// ============================================================================
