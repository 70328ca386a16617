//! Control hardware topology for QuPlan
//!
//! Gantree: L1_Topology → ControlSystem
//!
//! The control system is an arena: it owns every box, port and channel, and
//! everything else refers to ports and channels through [`PortId`] and
//! [`ChannelId`] keys. Port synthesis fields are written once, during system
//! initialization, through [`ControlSystem::configure_port`].

use crate::error::{QuplanError, QuplanResult};
use crate::types::{ChannelId, ChannelKind, FreqHz, PortId, PortRole, RfSwitch, Sideband};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Channel
// ============================================================================

/// Generator or capture channel of a port
/// Gantree: Channel // 채널
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel {
    /// Index within the owning port
    pub number: usize,
    fnco_freq: FreqHz,
    ndelay: Option<u32>,
}

impl Channel {
    fn new(number: usize) -> Self {
        Self {
            number,
            fnco_freq: 0,
            ndelay: None,
        }
    }

    /// Fine NCO frequency (Hz)
    pub fn fnco_freq(&self) -> FreqHz {
        self.fnco_freq
    }

    /// Capture trigger delay, capture channels only
    pub fn ndelay(&self) -> Option<u32> {
        self.ndelay
    }
}

// ============================================================================
// Port Settings
// ============================================================================

/// Frequency synthesis and gain settings chosen for one port
/// Gantree: Synthesis // 합성 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synthesis {
    /// Local oscillator (Hz)
    pub lo_freq: FreqHz,
    /// Coarse NCO (Hz)
    pub cnco_freq: FreqHz,
    /// Mixer sideband
    pub sideband: Sideband,
    /// Attenuator code, generator ports only
    pub vatt: Option<u32>,
    /// DAC full-scale current, generator ports only
    pub fullscale_current: Option<u32>,
    /// Fine NCO per channel, applied from channel 0 upward
    pub fnco_freqs: Vec<FreqHz>,
    /// Capture delay applied to every channel, capture ports only
    pub ndelay: Option<u32>,
}

/// Everything initialization writes into a port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSettings {
    /// Switch position
    pub rf_switch: RfSwitch,
    /// `None` for ports absent from the wiring
    pub synthesis: Option<Synthesis>,
}

impl PortSettings {
    /// Settings for a port that is not wired to anything
    pub fn unused(rf_switch: RfSwitch) -> Self {
        Self {
            rf_switch,
            synthesis: None,
        }
    }
}

// ============================================================================
// Port
// ============================================================================

/// Physical port of a control box
/// Gantree: Port // 포트
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    id: PortId,
    role: PortRole,
    kind: ChannelKind,
    channels: Vec<Channel>,
    lo_freq: Option<FreqHz>,
    cnco_freq: Option<FreqHz>,
    sideband: Option<Sideband>,
    vatt: Option<u32>,
    fullscale_current: Option<u32>,
    rf_switch: RfSwitch,
    configured: bool,
}

impl Port {
    /// Create an unconfigured port with `n_channels` channels
    pub fn new(
        box_id: impl Into<String>,
        number: usize,
        role: PortRole,
        kind: ChannelKind,
        n_channels: usize,
    ) -> Self {
        Self {
            id: PortId::new(box_id, number),
            role,
            kind,
            channels: (0..n_channels).map(Channel::new).collect(),
            lo_freq: None,
            cnco_freq: None,
            sideband: None,
            vatt: None,
            fullscale_current: None,
            rf_switch: RfSwitch::default(),
            configured: false,
        }
    }

    /// Create a generator port
    pub fn generator(box_id: impl Into<String>, number: usize, role: PortRole, n: usize) -> Self {
        Self::new(box_id, number, role, ChannelKind::Generator, n)
    }

    /// Create a capture port
    pub fn capture(box_id: impl Into<String>, number: usize, n: usize) -> Self {
        Self::new(box_id, number, PortRole::ReadIn, ChannelKind::Capture, n)
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Get port key
    pub fn id(&self) -> &PortId {
        &self.id
    }

    /// Get owning box id
    pub fn box_id(&self) -> &str {
        &self.id.box_id
    }

    /// Get port role
    pub fn role(&self) -> PortRole {
        self.role
    }

    /// Get port kind
    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Check if generator port
    pub fn is_generator(&self) -> bool {
        self.kind == ChannelKind::Generator
    }

    /// Check if capture port
    pub fn is_capture(&self) -> bool {
        self.kind == ChannelKind::Capture
    }

    /// Get number of channels
    pub fn n_channels(&self) -> usize {
        self.channels.len()
    }

    /// Get channels
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Get channel by index
    pub fn channel(&self, number: usize) -> Option<&Channel> {
        self.channels.get(number)
    }

    /// Key of a channel of this port
    pub fn channel_id(&self, number: usize) -> ChannelId {
        self.id.channel(number)
    }

    /// Local oscillator (Hz)
    pub fn lo_freq(&self) -> Option<FreqHz> {
        self.lo_freq
    }

    /// Coarse NCO (Hz)
    pub fn cnco_freq(&self) -> Option<FreqHz> {
        self.cnco_freq
    }

    /// Mixer sideband
    pub fn sideband(&self) -> Option<Sideband> {
        self.sideband
    }

    /// Attenuator code
    pub fn vatt(&self) -> Option<u32> {
        self.vatt
    }

    /// DAC full-scale current
    pub fn fullscale_current(&self) -> Option<u32> {
        self.fullscale_current
    }

    /// RF switch position
    pub fn rf_switch(&self) -> RfSwitch {
        self.rf_switch
    }

    /// Whether initialization already wrote this port
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    // ========================================================================
    // Synthesized Frequencies
    // ========================================================================

    /// `lo ± cnco` according to the sideband, `None` on `i64` overflow
    /// Gantree: coarse_freq() -> Option<FreqHz> // 코스 주파수
    pub fn coarse_freq(&self) -> Option<FreqHz> {
        let sideband = self.sideband?;
        self.lo_freq?
            .checked_add(sideband.sign().checked_mul(self.cnco_freq?)?)
    }

    /// `lo ± (cnco + fnco)` for one channel
    /// Gantree: fine_freq(ch) -> Option<FreqHz> // 파인 주파수
    pub fn fine_freq(&self, channel: usize) -> Option<FreqHz> {
        let sideband = self.sideband?;
        let fnco = self.channels.get(channel)?.fnco_freq;
        let offset = self.cnco_freq?.checked_add(fnco)?;
        self.lo_freq?.checked_add(sideband.sign().checked_mul(offset)?)
    }

    // ========================================================================
    // Initialization
    // ========================================================================

    fn apply(&mut self, settings: PortSettings) -> QuplanResult<()> {
        if self.configured {
            return Err(QuplanError::PortAlreadyConfigured(self.id.to_string()));
        }

        if let Some(synthesis) = &settings.synthesis {
            if synthesis.fnco_freqs.len() > self.channels.len() {
                return Err(QuplanError::InvalidChannelCount {
                    port: self.id.to_string(),
                    n_channels: self.channels.len(),
                });
            }
        }

        self.rf_switch = settings.rf_switch;
        if let Some(synthesis) = settings.synthesis {
            self.lo_freq = Some(synthesis.lo_freq);
            self.cnco_freq = Some(synthesis.cnco_freq);
            self.sideband = Some(synthesis.sideband);
            self.vatt = synthesis.vatt;
            self.fullscale_current = synthesis.fullscale_current;
            for (channel, fnco) in self.channels.iter_mut().zip(synthesis.fnco_freqs) {
                channel.fnco_freq = fnco;
            }
            if let Some(ndelay) = synthesis.ndelay {
                for channel in &mut self.channels {
                    channel.ndelay = Some(ndelay);
                }
            }
        }
        self.configured = true;
        Ok(())
    }
}

// ============================================================================
// Control Box
// ============================================================================

/// Control box owning a set of ports
/// Gantree: ControlBox // 박스
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlBox {
    /// Box identifier
    pub id: String,
    /// Ports in port-number order
    pub ports: Vec<Port>,
}

impl ControlBox {
    /// Create a box
    pub fn new(id: impl Into<String>, ports: Vec<Port>) -> Self {
        Self {
            id: id.into(),
            ports,
        }
    }
}

// ============================================================================
// Control System
// ============================================================================

/// Control hardware topology provider
/// Gantree: ControlSystem // 제어 시스템
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlSystem {
    boxes: Vec<ControlBox>,
}

impl ControlSystem {
    /// Create from boxes, validating port keys and role/kind pairs
    pub fn new(boxes: Vec<ControlBox>) -> QuplanResult<Self> {
        let mut box_ids = HashSet::new();
        for b in &boxes {
            if !box_ids.insert(b.id.as_str()) {
                return Err(QuplanError::InvalidTopology(format!(
                    "box `{}` declared twice",
                    b.id
                )));
            }

            let mut numbers = HashSet::new();
            for port in &b.ports {
                if port.box_id() != b.id {
                    return Err(QuplanError::InvalidTopology(format!(
                        "port {} listed under box `{}`",
                        port.id, b.id
                    )));
                }
                if !numbers.insert(port.id.number) {
                    return Err(QuplanError::InvalidTopology(format!(
                        "port {} declared twice",
                        port.id
                    )));
                }
                if port.role.expected_kind() != port.kind {
                    return Err(QuplanError::PortKindMismatch {
                        port: port.id.to_string(),
                        expected: port.role.expected_kind().to_string(),
                    });
                }
                if port.channels.is_empty() {
                    return Err(QuplanError::InvalidChannelCount {
                        port: port.id.to_string(),
                        n_channels: 0,
                    });
                }
            }
        }

        Ok(Self { boxes })
    }

    /// Get boxes
    pub fn boxes(&self) -> &[ControlBox] {
        &self.boxes
    }

    /// Iterate every port, box by box
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.boxes.iter().flat_map(|b| b.ports.iter())
    }

    /// Get box by id
    pub fn get_box(&self, box_id: &str) -> QuplanResult<&ControlBox> {
        self.boxes
            .iter()
            .find(|b| b.id == box_id)
            .ok_or_else(|| QuplanError::BoxNotFound(box_id.to_string()))
    }

    /// Get port by key
    pub fn get_port(&self, id: &PortId) -> QuplanResult<&Port> {
        self.get_box(&id.box_id)
            .ok()
            .and_then(|b| b.ports.iter().find(|p| p.id == *id))
            .ok_or_else(|| QuplanError::PortNotFound(id.to_string()))
    }

    /// Get channel by key
    pub fn get_channel(&self, id: &ChannelId) -> QuplanResult<&Channel> {
        self.get_port(&id.port)?
            .channel(id.number)
            .ok_or_else(|| QuplanError::PortNotFound(id.to_string()))
    }

    /// Synthesized fine frequency of a channel (Hz), `None` before initialization
    pub fn fine_freq(&self, id: &ChannelId) -> QuplanResult<Option<FreqHz>> {
        let port = self.get_port(&id.port)?;
        if port.channel(id.number).is_none() {
            return Err(QuplanError::PortNotFound(id.to_string()));
        }
        Ok(port.fine_freq(id.number))
    }

    /// Write a port's settings; each port accepts exactly one write
    pub fn configure_port(&mut self, id: &PortId, settings: PortSettings) -> QuplanResult<()> {
        let port = self
            .boxes
            .iter_mut()
            .filter(|b| b.id == id.box_id)
            .flat_map(|b| b.ports.iter_mut())
            .find(|p| p.id == *id)
            .ok_or_else(|| QuplanError::PortNotFound(id.to_string()))?;
        port.apply(settings)
    }
}

impl std::fmt::Display for ControlSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ControlSystem({} boxes, {} ports)",
            self.boxes.len(),
            self.ports().count()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
