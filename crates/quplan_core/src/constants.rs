//! Constants for QuPlan
//!
//! Gantree: L0_Foundation → Constants
//!
//! Unit conversions, hardware grid defaults, and control parameter defaults.
//! Frequencies are gigahertz (`f64`, `*_frequency`) on the logical side and
//! hertz (`i64`, `*_freq`) on the hardware side.

// ============================================================================
// Unit Conversions
// Gantree: units // 단위 변환
// ============================================================================

pub mod units {
    //! GHz ↔ Hz conversions used at every logical/hardware boundary

    /// Hertz per gigahertz
    pub const HZ_PER_GHZ: f64 = 1e9;

    /// Convert gigahertz to hertz
    #[inline]
    pub fn ghz_to_hz(ghz: f64) -> f64 {
        ghz * 1e9
    }

    /// Convert hertz to gigahertz
    #[inline]
    pub fn hz_to_ghz(hz: i64) -> f64 {
        hz as f64 * 1e-9
    }

    /// Round to a fixed number of decimal places
    #[inline]
    pub fn round_to(value: f64, decimals: i32) -> f64 {
        let scale = 10f64.powi(decimals);
        (value * scale).round() / scale
    }
}

// ============================================================================
// Readout Grid Constants
// Gantree: readout // 리드아웃 그리드
// ============================================================================

pub mod readout {
    //! Default synthesis grid for readout ports (upper sideband)

    /// Coarse NCO frequency (Hz)
    pub const CNCO_FREQ: i64 = 1_500_000_000;

    /// LO grid minimum (Hz)
    pub const LO_MIN: i64 = 8_000_000_000;

    /// LO grid maximum (Hz)
    pub const LO_MAX: i64 = 11_000_000_000;

    /// LO grid step (Hz)
    pub const LO_STEP: i64 = 500_000_000;

    /// Fine NCO grid minimum (Hz)
    pub const FNCO_MIN: i64 = -234_375_000;

    /// Fine NCO grid maximum (Hz)
    pub const FNCO_MAX: i64 = 234_375_000;

    /// Fine NCO grid step (Hz)
    pub const NCO_STEP: i64 = 23_437_500;
}

// ============================================================================
// Control Grid Constants
// Gantree: control // 제어 그리드
// ============================================================================

pub mod control {
    //! Default synthesis grid for control ports (lower sideband)

    /// Coarse NCO frequency (Hz)
    pub const CNCO_FREQ: i64 = 2_250_000_000;

    /// LO grid minimum (Hz)
    pub const LO_MIN: i64 = 8_000_000_000;

    /// LO grid maximum (Hz)
    pub const LO_MAX: i64 = 11_000_000_000;

    /// LO grid step (Hz)
    pub const LO_STEP: i64 = 500_000_000;

    /// Fine NCO grid minimum (Hz)
    pub const FNCO_MIN: i64 = -750_000_000;

    /// Fine NCO grid maximum (Hz)
    pub const FNCO_MAX: i64 = 750_000_000;

    /// Fine NCO grid step (Hz)
    pub const NCO_STEP: i64 = 23_437_500;

    /// Widest span a shared control LO may serve (Hz)
    pub const MAX_DIFF: i64 = 1_500_000_000;

    /// Window width for the cross-resonance center search (GHz)
    pub const CR_MAX_DIFF_GHZ: f64 = 0.25;

    /// Half-width of the band a channel can reach around its fine frequency (GHz)
    pub const AVAILABLE_BANDWIDTH_GHZ: f64 = 0.25;
}

// ============================================================================
// Control Parameter Defaults
// Gantree: params // 파라미터 기본값
// ============================================================================

pub mod params {
    //! Values used when a qubit or mux has no explicit entry

    /// Control pulse amplitude
    pub const DEFAULT_CONTROL_AMPLITUDE: f64 = 0.03;

    /// Readout pulse amplitude
    pub const DEFAULT_READOUT_AMPLITUDE: f64 = 0.01;

    /// Control attenuator code
    pub const DEFAULT_CONTROL_VATT: u32 = 3072;

    /// Readout attenuator code
    pub const DEFAULT_READOUT_VATT: u32 = 2048;

    /// Control DAC full-scale current
    pub const DEFAULT_CONTROL_FSC: u32 = 40527;

    /// Readout DAC full-scale current
    pub const DEFAULT_READOUT_FSC: u32 = 40527;

    /// Capture trigger delay (words)
    pub const DEFAULT_CAPTURE_DELAY: u32 = 7;
}

// ============================================================================
// Tests
// ============================================================================
