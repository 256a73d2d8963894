//! Rasterizer trait

use crate::camera::CameraPose;

/// Draws one frame of the loaded scene
///
/// The renderer loop calls this once per frame with the updated pose and
/// the building buffer's address. The call returns when every pixel of the
/// frame has been written.
pub trait Rasterizer {
    fn draw(&mut self, pose: &CameraPose, target: u32);
}

impl<R: Rasterizer + ?Sized> Rasterizer for &mut R {
    fn draw(&mut self, pose: &CameraPose, target: u32) {
        (**self).draw(pose, target);
    }
}
