//! Camera pose and angle helpers

use core::f32::consts::{FRAC_PI_2, PI, TAU};

use super::vector::Vec3;
use crate::config::CameraConfig;

/// Wrap an angle into `[0, 2π)`
pub fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = libm::fmodf(angle, TAU);
    if wrapped < 0.0 {
        wrapped += TAU;
    }
    // -ε + 2π can round up to exactly 2π
    if wrapped >= TAU {
        wrapped = 0.0;
    }
    wrapped
}

/// Everything the rasterizer needs to build a view matrix
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CameraPose {
    /// Horizontal angle, also the free-fly heading (radians, `[0, 2π)`)
    pub azimuth: f32,
    /// Vertical orbit angle (radians, `[0, 2π)`)
    pub elevation: f32,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    /// Default pose: above and to the side of the origin, looking at it
    pub fn canonical(config: &CameraConfig) -> Self {
        let r = config.orbit_radius;
        Self {
            azimuth: config.initial_angle,
            elevation: config.initial_angle,
            eye: Vec3::new(r, r, 0.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
        }
    }

    /// Eye position on the orbit sphere for the current angles
    pub fn orbit_eye(&self, radius: f32) -> Vec3 {
        let (sin_az, cos_az) = libm::sincosf(self.azimuth);
        let (sin_el, cos_el) = libm::sincosf(self.elevation);
        Vec3::new(cos_el * sin_az * radius, sin_el * radius, cos_el * cos_az * radius)
    }

    /// Up vector for the current elevation
    ///
    /// Flips once the eye passes over either pole so the image does not
    /// turn upside down.
    pub fn orbit_up(&self) -> Vec3 {
        if self.elevation < FRAC_PI_2 || self.elevation >= 3.0 * PI / 2.0 {
            Vec3::UP
        } else {
            Vec3::DOWN
        }
    }

    /// Far point straight ahead along the azimuth heading, at eye height
    pub fn heading_target(&self, height: f32, distance: f32) -> Vec3 {
        let (sin_az, cos_az) = libm::sincosf(self.azimuth);
        Vec3::new(sin_az * distance, height, cos_az * distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        assert!(wrap_angle(TAU) < TAU);
        assert!(wrap_angle(-f32::EPSILON) < TAU);
    }

    #[test]
    fn test_canonical_pose() {
        let pose = CameraPose::canonical(&CameraConfig::default());
        assert_eq!(pose.eye, Vec3::new(6.0, 6.0, 0.0));
        assert_eq!(pose.target, Vec3::ZERO);
        assert_eq!(pose.up, Vec3::UP);
        assert_eq!(pose.azimuth, 0.1);
        assert_eq!(pose.elevation, 0.1);
    }

    #[test]
    fn test_orbit_up_flips_past_pole() {
        let mut pose = CameraPose::canonical(&CameraConfig::default());
        pose.elevation = FRAC_PI_2 - 0.01;
        assert_eq!(pose.orbit_up(), Vec3::UP);
        pose.elevation = FRAC_PI_2;
        assert_eq!(pose.orbit_up(), Vec3::DOWN);
        pose.elevation = 3.0 * PI / 2.0;
        assert_eq!(pose.orbit_up(), Vec3::UP);
    }

    #[test]
    fn test_orbit_eye_on_sphere() {
        let mut pose = CameraPose::canonical(&CameraConfig::default());
        pose.azimuth = 1.3;
        pose.elevation = 0.7;
        assert!((pose.orbit_eye(6.0).length() - 6.0).abs() < 1e-4);
    }
}
