//! Simulator configuration
//!
//! Loaded from the embedded `viewer.toml` unless a path is given on the
//! command line.

use std::path::Path;

use serde::Deserialize;
use tandem_core::config::ViewerConfig;
use tandem_hal::{Button, ButtonState};
use thiserror::Error;

/// Embedded default configuration
pub const EMBEDDED_CONFIG: &str = include_str!("../viewer.toml");

/// Errors loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("script step at {at_ms} ms names unknown button `{name}`")]
    UnknownButton { at_ms: u64, name: String },
    #[error("script step at {at_ms} ms holds for {hold_ms} ms, shorter than the {tick_ms} ms controller tick")]
    HoldTooShort { at_ms: u64, hold_ms: u64, tick_ms: u32 },
}

/// Simulation run parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Renderer frame period in milliseconds
    pub frame_ms: u64,
    /// Stop after this many rendered frames
    pub frames: u32,
    /// Stop after this long regardless
    pub timeout_ms: u64,
    /// Size published for the program image
    pub program_size: u32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            frames: 240,
            timeout_ms: 10_000,
            program_size: 256 * 1024,
        }
    }
}

/// Shape of the synthetic resource file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkloadSettings {
    pub textures: u32,
    pub meshes: u32,
}

impl Default for WorkloadSettings {
    fn default() -> Self {
        Self {
            textures: 1,
            meshes: 1,
        }
    }
}

/// One scripted input change as written in the file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    #[serde(default)]
    pub press: Vec<String>,
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    pub switch: Option<bool>,
}

fn default_hold_ms() -> u64 {
    50
}

/// Resolved script step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub at_ms: u64,
    pub press: ButtonState,
    pub hold_ms: u64,
    pub switch: Option<bool>,
}

/// Complete simulator configuration as written
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub viewer: ViewerConfig,
    pub sim: SimSettings,
    pub workload: WorkloadSettings,
    pub script: Vec<ScriptStep>,
}

impl SimConfig {
    /// Parse TOML text
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Embedded defaults
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(EMBEDDED_CONFIG)
    }

    /// Resolve button names and order the script by time
    ///
    /// A press must last at least one controller tick or the controller
    /// never samples it.
    pub fn input_events(&self) -> Result<Vec<InputEvent>, ConfigError> {
        let tick_ms = self.viewer.controller.tick_ms;
        let mut events = self
            .script
            .iter()
            .map(|step| {
                if !step.press.is_empty() && step.hold_ms < u64::from(tick_ms) {
                    return Err(ConfigError::HoldTooShort {
                        at_ms: step.at_ms,
                        hold_ms: step.hold_ms,
                        tick_ms,
                    });
                }
                let press = step.press.iter().try_fold(ButtonState::RELEASED, |state, name| {
                    Button::from_name(&name.to_ascii_lowercase())
                        .map(|button| state.with(button))
                        .ok_or_else(|| ConfigError::UnknownButton {
                            at_ms: step.at_ms,
                            name: name.clone(),
                        })
                })?;
                Ok(InputEvent {
                    at_ms: step.at_ms,
                    press,
                    hold_ms: step.hold_ms,
                    switch: step.switch,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        events.sort_by_key(|event| event.at_ms);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::config::RotateSource;

    #[test]
    fn test_embedded_config_parses() {
        let config = SimConfig::embedded().unwrap();
        assert_eq!(config.viewer.controller.tick_ms, 10);
        assert_eq!(
            config.viewer.controller.rotate_source,
            RotateSource::SwitchActiveLow
        );
        assert!((config.viewer.camera.rotation_step - core::f32::consts::PI / 16.0).abs() < 1e-6);
        assert_eq!(config.sim.frame_ms, 16);

        let events = config.input_events().unwrap();
        assert_eq!(events.first().map(|e| e.switch), Some(Some(true)));
        assert!(events.iter().any(|e| e.press.is_pressed(Button::Center)));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SimConfig::parse("").unwrap();
        assert_eq!(config.viewer, ViewerConfig::default());
        assert_eq!(config.sim, SimSettings::default());
        assert!(config.script.is_empty());
    }

    #[test]
    fn test_partial_override() {
        let config = SimConfig::parse(
            r#"
            [viewer.controller]
            rotate_source = "mode_button"

            [viewer.camera]
            movement_step = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.viewer.controller.rotate_source, RotateSource::ModeButton);
        assert_eq!(config.viewer.controller.tick_ms, 10);
        assert_eq!(config.viewer.camera.movement_step, 2.5);
        assert_eq!(config.viewer.camera.orbit_radius, 6.0);
    }

    #[test]
    fn test_script_sorted_and_resolved() {
        let config = SimConfig::parse(
            r#"
            [[script]]
            at_ms = 300
            press = ["Left", "up"]

            [[script]]
            at_ms = 100
            press = ["center"]
            hold_ms = 20
            "#,
        )
        .unwrap();

        let events = config.input_events().unwrap();
        assert_eq!(events[0].at_ms, 100);
        assert_eq!(events[0].hold_ms, 20);
        assert!(events[1].press.is_pressed(Button::Left));
        assert!(events[1].press.is_pressed(Button::Up));
        assert_eq!(events[1].hold_ms, 50);
    }

    #[test]
    fn test_unknown_button_rejected() {
        let config = SimConfig::parse(
            r#"
            [[script]]
            at_ms = 5
            press = ["select"]
            "#,
        )
        .unwrap();

        match config.input_events() {
            Err(ConfigError::UnknownButton { at_ms, name }) => {
                assert_eq!(at_ms, 5);
                assert_eq!(name, "select");
            }
            other => panic!("expected unknown button, got {other:?}"),
        }
    }

    #[test]
    fn test_press_shorter_than_tick_rejected() {
        let config = SimConfig::parse(
            r#"
            [viewer.controller]
            tick_ms = 10

            [[script]]
            at_ms = 40
            press = ["left"]
            hold_ms = 5

            [[script]]
            at_ms = 80
            switch = false
            hold_ms = 0
            "#,
        )
        .unwrap();

        match config.input_events() {
            Err(ConfigError::HoldTooShort {
                at_ms,
                hold_ms,
                tick_ms,
            }) => assert_eq!((at_ms, hold_ms, tick_ms), (40, 5, 10)),
            other => panic!("expected hold too short, got {other:?}"),
        }
    }

    #[test]
    fn test_switch_only_step_needs_no_hold() {
        let config = SimConfig::parse(
            r#"
            [[script]]
            at_ms = 80
            switch = false
            hold_ms = 0
            "#,
        )
        .unwrap();

        let events = config.input_events().unwrap();
        assert_eq!(events[0].switch, Some(false));
    }

    #[test]
    fn test_bad_rotate_source_is_parse_error() {
        let result = SimConfig::parse(
            r#"
            [viewer.controller]
            rotate_source = "joystick"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
