//! Render processor loop
//!
//! Released from reset by the controller, the renderer reads where its
//! workload lives once, then loops: fetch actions, move the camera, draw
//! into the building buffer, present it, report how long that took.

use tandem_hal::{DisplayController, FrameClock, SharedWindow};
use tandem_protocol::DecodedActions;

use crate::camera::{CameraMode, CameraPose, CameraRig};
use crate::config::CameraConfig;
use crate::framebuffer::{FrameRotator, FrameSlot};
use crate::shared::{FileRegion, RendererPort};
use crate::traits::Rasterizer;

/// Summary of one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// Zero-based frame index since start
    pub frame: u32,
    pub actions: DecodedActions,
    pub mode: CameraMode,
    /// Camera snapped back to the default pose this frame
    pub reset: bool,
    /// Slot handed to the display
    pub presented: FrameSlot,
    /// Draw plus present time, in clock ticks
    pub latency: u32,
}

/// Renderer side of the viewer
pub struct RendererLoop<W, D, C> {
    port: RendererPort<W>,
    display: D,
    clock: C,
    rig: CameraRig,
    rotator: FrameRotator,
    program: FileRegion,
    resource: FileRegion,
    frames: u32,
}

impl<W: SharedWindow, D: DisplayController, C: FrameClock> RendererLoop<W, D, C> {
    /// Read the published workload and set up camera and buffers
    pub fn start(
        mut port: RendererPort<W>,
        display: D,
        clock: C,
        rotator: FrameRotator,
        camera: CameraConfig,
    ) -> Self {
        let program = port.program();
        let resource = port.resource();
        Self {
            port,
            display,
            clock,
            rig: CameraRig::new(camera),
            rotator,
            program,
            resource,
            frames: 0,
        }
    }

    pub fn program(&self) -> FileRegion {
        self.program
    }

    pub fn resource(&self) -> FileRegion {
        self.resource
    }

    pub fn pose(&self) -> &CameraPose {
        self.rig.pose()
    }

    pub fn rotator(&self) -> &FrameRotator {
        &self.rotator
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn port(&self) -> &RendererPort<W> {
        &self.port
    }

    /// Run one full frame
    pub fn frame<R: Rasterizer>(&mut self, raster: &mut R) -> FrameReport {
        let actions = self.port.input_actions().decode();
        let step = self.rig.update(actions);

        let started = self.clock.now_ticks();
        raster.draw(self.rig.pose(), self.rotator.building_address());
        let presented = self.rotator.complete(&mut self.display);
        let elapsed = self.clock.now_ticks().saturating_sub(started);

        let latency = u32::try_from(elapsed).unwrap_or(u32::MAX);
        self.port.report_latency(latency);

        let report = FrameReport {
            frame: self.frames,
            actions,
            mode: step.mode,
            reset: step.reset,
            presented,
            latency,
        };
        self.frames = self.frames.wrapping_add(1);
        report
    }
}
