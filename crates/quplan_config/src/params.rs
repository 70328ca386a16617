//! Per-qubit and per-mux hardware parameters
//!
//! Gantree: L2_Config → ControlParams
//!
//! Sparse maps of calibrated hardware knobs. Any qubit or mux without an
//! entry falls back to the documented default in [`quplan_core::params`].

use quplan_core::params::{
    DEFAULT_CAPTURE_DELAY, DEFAULT_CONTROL_AMPLITUDE, DEFAULT_CONTROL_FSC, DEFAULT_CONTROL_VATT,
    DEFAULT_READOUT_AMPLITUDE, DEFAULT_READOUT_FSC, DEFAULT_READOUT_VATT,
};
use quplan_core::{MuxIndex, QuplanResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Control parameters
/// Gantree: ControlParams // 제어 파라미터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlParams {
    /// Control pulse amplitude per qubit
    /// Gantree: control_amplitude: BTreeMap<String,f64> // 제어 진폭
    pub control_amplitude: BTreeMap<String, f64>,

    /// Readout pulse amplitude per qubit
    /// Gantree: readout_amplitude: BTreeMap<String,f64> // 리드아웃 진폭
    pub readout_amplitude: BTreeMap<String, f64>,

    /// Control attenuator code per qubit
    pub control_vatt: BTreeMap<String, u32>,

    /// Readout attenuator code per mux
    pub readout_vatt: BTreeMap<MuxIndex, u32>,

    /// Control full-scale current per qubit
    pub control_fsc: BTreeMap<String, u32>,

    /// Readout full-scale current per mux
    pub readout_fsc: BTreeMap<MuxIndex, u32>,

    /// Capture delay per mux
    pub capture_delay: BTreeMap<MuxIndex, u32>,
}

impl ControlParams {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create empty parameters (every lookup returns its default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> QuplanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> QuplanResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QuplanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set control amplitude
    pub fn with_control_amplitude(mut self, qubit: impl Into<String>, value: f64) -> Self {
        self.control_amplitude.insert(qubit.into(), value);
        self
    }

    /// Set readout amplitude
    pub fn with_readout_amplitude(mut self, qubit: impl Into<String>, value: f64) -> Self {
        self.readout_amplitude.insert(qubit.into(), value);
        self
    }

    /// Set control attenuator code
    pub fn with_control_vatt(mut self, qubit: impl Into<String>, value: u32) -> Self {
        self.control_vatt.insert(qubit.into(), value);
        self
    }

    /// Set readout attenuator code
    pub fn with_readout_vatt(mut self, mux: MuxIndex, value: u32) -> Self {
        self.readout_vatt.insert(mux, value);
        self
    }

    /// Set control full-scale current
    pub fn with_control_fsc(mut self, qubit: impl Into<String>, value: u32) -> Self {
        self.control_fsc.insert(qubit.into(), value);
        self
    }

    /// Set readout full-scale current
    pub fn with_readout_fsc(mut self, mux: MuxIndex, value: u32) -> Self {
        self.readout_fsc.insert(mux, value);
        self
    }

    /// Set capture delay
    pub fn with_capture_delay(mut self, mux: MuxIndex, value: u32) -> Self {
        self.capture_delay.insert(mux, value);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get control amplitude
    /// Gantree: get_control_amplitude(q) -> f64 // 기본값 0.03
    pub fn get_control_amplitude(&self, qubit: &str) -> f64 {
        self.control_amplitude
            .get(qubit)
            .copied()
            .unwrap_or(DEFAULT_CONTROL_AMPLITUDE)
    }

    /// Get readout amplitude
    /// Gantree: get_readout_amplitude(q) -> f64 // 기본값 0.01
    pub fn get_readout_amplitude(&self, qubit: &str) -> f64 {
        self.readout_amplitude
            .get(qubit)
            .copied()
            .unwrap_or(DEFAULT_READOUT_AMPLITUDE)
    }

    /// Get control attenuator code
    pub fn get_control_vatt(&self, qubit: &str) -> u32 {
        self.control_vatt
            .get(qubit)
            .copied()
            .unwrap_or(DEFAULT_CONTROL_VATT)
    }

    /// Get readout attenuator code
    pub fn get_readout_vatt(&self, mux: MuxIndex) -> u32 {
        self.readout_vatt
            .get(&mux)
            .copied()
            .unwrap_or(DEFAULT_READOUT_VATT)
    }

    /// Get control full-scale current
    pub fn get_control_fsc(&self, qubit: &str) -> u32 {
        self.control_fsc
            .get(qubit)
            .copied()
            .unwrap_or(DEFAULT_CONTROL_FSC)
    }

    /// Get readout full-scale current
    pub fn get_readout_fsc(&self, mux: MuxIndex) -> u32 {
        self.readout_fsc
            .get(&mux)
            .copied()
            .unwrap_or(DEFAULT_READOUT_FSC)
    }

    /// Get capture delay
    pub fn get_capture_delay(&self, mux: MuxIndex) -> u32 {
        self.capture_delay
            .get(&mux)
            .copied()
            .unwrap_or(DEFAULT_CAPTURE_DELAY)
    }
}

impl Hash for ControlParams {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for map in [&self.control_amplitude, &self.readout_amplitude] {
            map.len().hash(state);
            for (qubit, value) in map {
                qubit.hash(state);
                value.to_bits().hash(state);
            }
        }
        self.control_vatt.hash(state);
        self.readout_vatt.hash(state);
        self.control_fsc.hash(state);
        self.readout_fsc.hash(state);
        self.capture_delay.hash(state);
    }
}

impl fmt::Display for ControlParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ControlParams({} qubit overrides, {} mux overrides)",
            self.control_amplitude.len()
                + self.readout_amplitude.len()
                + self.control_vatt.len()
                + self.control_fsc.len(),
            self.readout_vatt.len() + self.readout_fsc.len() + self.capture_delay.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quplan_core::content_hash;

    #[test]
    fn test_defaults() {
        let params = ControlParams::new();
        assert_relative_eq!(params.get_control_amplitude("Q00"), 0.03);
        assert_relative_eq!(params.get_readout_amplitude("Q00"), 0.01);
        assert_eq!(params.get_control_vatt("Q00"), 3072);
        assert_eq!(params.get_readout_vatt(0), 2048);
        assert_eq!(params.get_control_fsc("Q00"), 40527);
        assert_eq!(params.get_readout_fsc(0), 40527);
        assert_eq!(params.get_capture_delay(0), 7);
    }

    #[test]
    fn test_overrides() {
        let params = ControlParams::new()
            .with_control_amplitude("Q08", 0.13183)
            .with_readout_vatt(2, 1536)
            .with_capture_delay(2, 9);

        assert_relative_eq!(params.get_control_amplitude("Q08"), 0.13183);
        assert_relative_eq!(params.get_control_amplitude("Q09"), 0.03);
        assert_eq!(params.get_readout_vatt(2), 1536);
        assert_eq!(params.get_readout_vatt(3), 2048);
        assert_eq!(params.get_capture_delay(2), 9);
    }

    #[test]
    fn test_json_with_missing_maps() {
        let params = ControlParams::from_json(r#"{"readout_vatt": {"2": 1024}}"#).unwrap();
        assert_eq!(params.get_readout_vatt(2), 1024);
        assert_eq!(params.get_control_vatt("Q08"), 3072);
    }

    #[test]
    fn test_hash_tracks_content() {
        let a = ControlParams::new().with_readout_amplitude("Q08", 0.08);
        let b = ControlParams::new().with_readout_amplitude("Q08", 0.08);
        let c = ControlParams::new().with_readout_amplitude("Q08", 0.03);
        assert_eq!(content_hash(&a), content_hash(&b));
        assert_ne!(content_hash(&a), content_hash(&c));
    }
}
