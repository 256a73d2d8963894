//! Renderer processor task
//!
//! Sits in reset until the controller releases it, then renders on a
//! fixed frame period until reset is asserted again.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};
use log::{debug, error, info};
use tandem_core::config::CameraConfig;
use tandem_core::framebuffer::{FrameRotator, FrameSlot};
use tandem_core::renderer::RendererLoop;
use tandem_core::resource::ResourceDirectory;
use tandem_core::shared::RendererPort;
use tandem_hal::sim::SharedBacking;

use crate::board::{FrameMemory, SimClock, SimDisplay, SoftRasterizer};
use crate::channels::{DONE, RESET_LINE};

/// Renderer task parameters
#[derive(Debug, Clone, Copy)]
pub struct RendererSettings {
    pub camera: CameraConfig,
    pub frame_ms: u64,
    /// Signal completion after this many frames across all sessions
    pub frames: u32,
}

/// Renderer task - one `RendererLoop::frame` per frame period while released
#[embassy_executor::task]
pub async fn renderer_task(
    block: &'static SharedBacking,
    resource: &'static [u8],
    settings: RendererSettings,
) {
    info!("Renderer task started, held in reset");

    let rotator = FrameRotator::from_memory_map();
    let addresses = FrameSlot::ALL.map(|slot| rotator.address(slot));
    let mut raster = SoftRasterizer::new(FrameMemory::new(addresses));
    let mut total = 0u32;

    loop {
        // Held in reset until the line drops
        while RESET_LINE.wait().await {}

        // Out of reset: caches start empty
        let mut renderer = RendererLoop::start(
            RendererPort::attach(block.window()),
            SimDisplay::new(addresses),
            SimClock,
            rotator.clone(),
            settings.camera,
        );

        let program = renderer.program();
        let region = renderer.resource();
        info!(
            "Program at {:#010x} ({} bytes), resources at {:#010x} ({} bytes)",
            program.location, program.size, region.location, region.size
        );
        let loaded = &resource[..resource.len().min(region.size as usize)];
        match ResourceDirectory::parse(loaded) {
            Ok(directory) => {
                let header = directory.header();
                info!(
                    "Scene: {} textures, {} meshes",
                    header.num_textures, header.num_meshes
                );
            }
            Err(e) => error!("Resource file rejected: {e:?}"),
        }

        let mut ticker = Ticker::every(Duration::from_millis(settings.frame_ms.max(1)));
        loop {
            match select(ticker.next(), RESET_LINE.wait()).await {
                Either::First(()) => {}
                Either::Second(true) => break,
                Either::Second(false) => continue,
            }

            let report = renderer.frame(&mut raster);
            debug!(
                "Frame {} {:?} h={:?} v={:?} slot={:?} latency={} us",
                report.frame,
                report.mode,
                report.actions.horizontal,
                report.actions.vertical,
                report.presented,
                report.latency
            );
            if report.reset {
                info!("Camera reset to default pose");
            }

            total += 1;
            if total == settings.frames {
                DONE.signal(total);
            }
        }

        info!(
            "Renderer back in reset after {} frames",
            renderer.display().swaps()
        );
    }
}
