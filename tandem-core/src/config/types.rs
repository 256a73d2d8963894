//! Configuration type definitions
//!
//! Defaults match the constants the viewer shipped with. Hosts load
//! overrides from TOML through the optional `serde` derives.

use core::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Camera motion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraConfig {
    /// Angle added per frame while a direction is held (radians)
    pub rotation_step: f32,
    /// Distance travelled per frame in free-fly mode
    pub movement_step: f32,
    /// Orbit radius, also the default eye height
    pub orbit_radius: f32,
    /// Distance of the free-fly look target along the heading
    pub look_distance: f32,
    /// Azimuth and elevation of the default pose (radians)
    ///
    /// Kept off zero so the first orbit frame does not sit on an axis.
    pub initial_angle: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            rotation_step: PI / 16.0,
            movement_step: 1.0,
            orbit_radius: 6.0,
            look_distance: 1000.0,
            initial_angle: 0.1,
        }
    }
}

/// Where the controller takes the rotate-mode bit from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RotateSource {
    /// Slide switch, rotate while the switch reads high
    Switch,
    /// Slide switch, rotate while the switch reads low
    #[default]
    SwitchActiveLow,
    /// Each mode button edge toggles the bit
    ModeButton,
}

/// Controller loop parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Poll interval in milliseconds
    pub tick_ms: u32,
    /// Sample frame latency every this many ticks while running (0 = never)
    pub latency_sample_ticks: u32,
    /// Rotate-mode bit source
    pub rotate_source: RotateSource,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            latency_sample_ticks: 100,
            rotate_source: RotateSource::SwitchActiveLow,
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub controller: ControllerConfig,
}
