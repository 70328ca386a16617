//! Planner configuration
//!
//! Gantree: L2_Config → PlannerConfig
//!
//! Search grids and window widths for readout and control frequency planning.

use crate::grid::FrequencyGrid;
use quplan_core::{control_grid, readout_grid, FreqHz, QuplanError, QuplanResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Transition that must fall inside the shared control window
/// Gantree: MandatoryFrequency // 필수 주파수
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MandatoryFrequency {
    /// GE transition
    Ge,
    /// EF transition
    Ef,
}

/// Readout port search space (upper sideband)
/// Gantree: ReadoutPlanConfig // 리드아웃 설정
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadoutPlanConfig {
    /// Fixed coarse NCO (Hz)
    pub cnco: FreqHz,
    /// LO grid
    pub lo: FrequencyGrid,
    /// Fine NCO grid
    pub fnco: FrequencyGrid,
}

impl Default for ReadoutPlanConfig {
    fn default() -> Self {
        Self {
            cnco: readout_grid::CNCO_FREQ,
            lo: FrequencyGrid::new(
                readout_grid::LO_MIN,
                readout_grid::LO_MAX,
                readout_grid::LO_STEP,
            ),
            fnco: FrequencyGrid::new(
                readout_grid::FNCO_MIN,
                readout_grid::FNCO_MAX,
                readout_grid::NCO_STEP,
            ),
        }
    }
}

impl ReadoutPlanConfig {
    /// Set coarse NCO
    pub fn with_cnco(mut self, cnco: FreqHz) -> Self {
        self.cnco = cnco;
        self
    }

    /// Set LO grid
    pub fn with_lo(mut self, lo: FrequencyGrid) -> Self {
        self.lo = lo;
        self
    }

    /// Set fine NCO grid
    pub fn with_fnco(mut self, fnco: FrequencyGrid) -> Self {
        self.fnco = fnco;
        self
    }

    /// Validate both grids
    pub fn validate(&self) -> QuplanResult<()> {
        self.lo.validate()?;
        self.fnco.validate()
    }
}

/// Control port search space (lower sideband)
/// Gantree: ControlPlanConfig // 제어 설정
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlPlanConfig {
    /// Fixed coarse NCO (Hz)
    pub cnco: FreqHz,
    /// LO grid
    pub lo: FrequencyGrid,
    /// Fine NCO grid
    pub fnco: FrequencyGrid,
    /// Widest span one LO may serve on a 3-channel port (Hz)
    pub max_diff: FreqHz,
    /// Transitions that must share the window
    pub mandatory: Vec<MandatoryFrequency>,
}

impl Default for ControlPlanConfig {
    fn default() -> Self {
        Self {
            cnco: control_grid::CNCO_FREQ,
            lo: FrequencyGrid::new(
                control_grid::LO_MIN,
                control_grid::LO_MAX,
                control_grid::LO_STEP,
            ),
            fnco: FrequencyGrid::new(
                control_grid::FNCO_MIN,
                control_grid::FNCO_MAX,
                control_grid::NCO_STEP,
            ),
            max_diff: control_grid::MAX_DIFF,
            mandatory: vec![MandatoryFrequency::Ge],
        }
    }
}

impl ControlPlanConfig {
    /// Set coarse NCO
    pub fn with_cnco(mut self, cnco: FreqHz) -> Self {
        self.cnco = cnco;
        self
    }

    /// Set LO grid
    pub fn with_lo(mut self, lo: FrequencyGrid) -> Self {
        self.lo = lo;
        self
    }

    /// Set fine NCO grid
    pub fn with_fnco(mut self, fnco: FrequencyGrid) -> Self {
        self.fnco = fnco;
        self
    }

    /// Set window width
    pub fn with_max_diff(mut self, max_diff: FreqHz) -> Self {
        self.max_diff = max_diff;
        self
    }

    /// Set mandatory transitions
    pub fn with_mandatory(mut self, mandatory: Vec<MandatoryFrequency>) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Validate grids, window, and mandatory set
    pub fn validate(&self) -> QuplanResult<()> {
        self.lo.validate()?;
        self.fnco.validate()?;
        if self.max_diff < 0 {
            return Err(QuplanError::Planning(format!(
                "max_diff must be non-negative, got {}",
                self.max_diff
            )));
        }
        if self.mandatory.is_empty() {
            return Err(QuplanError::Planning(
                "at least one mandatory frequency is required".into(),
            ));
        }
        Ok(())
    }
}

/// Complete planner configuration
/// Gantree: PlannerConfig // 통합 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Readout search space
    pub readout: ReadoutPlanConfig,
    /// Control search space
    pub control: ControlPlanConfig,
    /// Window width for the cross-resonance center search (GHz)
    pub cr_max_diff: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            readout: ReadoutPlanConfig::default(),
            control: ControlPlanConfig::default(),
            cr_max_diff: control_grid::CR_MAX_DIFF_GHZ,
        }
    }
}

impl PlannerConfig {
    /// Set readout search space
    pub fn with_readout(mut self, readout: ReadoutPlanConfig) -> Self {
        self.readout = readout;
        self
    }

    /// Set control search space
    pub fn with_control(mut self, control: ControlPlanConfig) -> Self {
        self.control = control;
        self
    }

    /// Set cross-resonance window width (GHz)
    pub fn with_cr_max_diff(mut self, cr_max_diff: f64) -> Self {
        self.cr_max_diff = cr_max_diff;
        self
    }

    /// Validate every part
    pub fn validate(&self) -> QuplanResult<()> {
        self.readout.validate()?;
        self.control.validate()?;
        if self.cr_max_diff.is_nan() || self.cr_max_diff < 0.0 {
            return Err(QuplanError::Planning(format!(
                "cr_max_diff must be non-negative, got {}",
                self.cr_max_diff
            )));
        }
        Ok(())
    }

    /// Load from JSON and validate
    pub fn from_json(json: &str) -> QuplanResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file and validate
    pub fn from_file(path: impl AsRef<Path>) -> QuplanResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QuplanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for PlannerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PlannerConfig:")?;
        writeln!(
            f,
            "  Readout: cnco={} lo={} fnco={}",
            self.readout.cnco, self.readout.lo, self.readout.fnco
        )?;
        writeln!(
            f,
            "  Control: cnco={} lo={} fnco={} max_diff={}",
            self.control.cnco, self.control.lo, self.control.fnco, self.control.max_diff
        )?;
        write!(f, "  CR window: {} GHz", self.cr_max_diff)
    }
}

// ============================================================================
// Tests
// ============================================================================
