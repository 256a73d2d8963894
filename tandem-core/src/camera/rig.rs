//! Per-frame camera update

use tandem_protocol::{DecodedActions, Horizontal, Vertical};

use super::machine::{CameraEvent, CameraMode};
use super::pose::{wrap_angle, CameraPose};
use super::vector::Vec3;
use crate::config::CameraConfig;

/// Result of one camera update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CameraStep {
    /// Mode after the update
    pub mode: CameraMode,
    /// The pose was snapped back to the canonical default
    pub reset: bool,
}

/// Camera pose plus the mode machine driving it
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    mode: CameraMode,
    pose: CameraPose,
    /// A heading has been set since (re-)entering movement mode
    heading_set: bool,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            mode: CameraMode::Movement,
            pose: CameraPose::canonical(&config),
            heading_set: false,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Apply one frame's worth of decoded actions
    pub fn update(&mut self, actions: DecodedActions) -> CameraStep {
        let next = self
            .mode
            .transition(CameraEvent::from_rotate_bit(actions.rotate_mode));
        let reset = self.mode.resets_pose(next);
        if reset {
            self.pose = CameraPose::canonical(&self.config);
            self.heading_set = false;
        }
        self.mode = next;

        match self.mode {
            CameraMode::Rotation => self.orbit(actions),
            CameraMode::Movement => self.fly(actions),
        }

        CameraStep {
            mode: self.mode,
            reset,
        }
    }

    fn orbit(&mut self, actions: DecodedActions) {
        let step = self.config.rotation_step;

        let d_azimuth = match actions.horizontal {
            Horizontal::Right => step,
            Horizontal::Left => -step,
            Horizontal::None => 0.0,
        };
        let d_elevation = match actions.vertical {
            Vertical::Up => step,
            Vertical::Down => -step,
            Vertical::None => 0.0,
        };

        self.pose.azimuth = wrap_angle(self.pose.azimuth + d_azimuth);
        self.pose.elevation = wrap_angle(self.pose.elevation + d_elevation);

        // Recomputed even when idle so entering rotation jumps onto the orbit
        self.pose.eye = self.pose.orbit_eye(self.config.orbit_radius);
        self.pose.target = Vec3::ZERO;
        self.pose.up = self.pose.orbit_up();
    }

    fn fly(&mut self, actions: DecodedActions) {
        match actions.horizontal {
            Horizontal::Left => self.turn(self.config.rotation_step),
            Horizontal::Right => self.turn(-self.config.rotation_step),
            Horizontal::None => {}
        }

        let direction = match actions.vertical {
            Vertical::Up => 1.0,
            Vertical::Down => -1.0,
            Vertical::None => return,
        };

        if !self.heading_set {
            self.turn(0.0);
        }

        let forward = self.pose.target.normalized();
        self.pose.eye = self.pose.eye + forward * (direction * self.config.movement_step);
    }

    fn turn(&mut self, angle: f32) {
        self.pose.azimuth = wrap_angle(self.pose.azimuth + angle);
        self.pose.target = self
            .pose
            .heading_target(self.config.orbit_radius, self.config.look_distance);
        self.heading_set = true;
    }
}
