//! Tandem - host simulator
//!
//! Runs the controller and renderer loops as two embassy tasks on one
//! host thread. Each side sees the shared control block only through its
//! own modeled write-back cache, so a missing flush or invalidate shows up
//! here exactly as it would on the board.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use log::{error, info, warn};
use static_cell::StaticCell;

use tandem_core::session::Workload;
use tandem_core::shared::FileRegion;
use tandem_hal::sim::SharedBacking;
use tandem_protocol::memory_map::{renderer_view, PROGRAM_BASE, RESOURCE_BASE};
use tandem_protocol::ByteOrder;

use crate::channels::DONE;
use crate::config::{InputEvent, SimConfig};
use crate::tasks::RendererSettings;

mod board;
mod channels;
mod config;
mod scene;
mod tasks;

/// The control block both tasks share, at a fixed location for the whole run
static BLOCK: SharedBacking = SharedBacking::new();

// Static cells for data the tasks borrow forever
static SCRIPT: StaticCell<Vec<InputEvent>> = StaticCell::new();
static RESOURCE: StaticCell<Vec<u8>> = StaticCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DumpOrder {
    Little,
    Big,
}

impl From<DumpOrder> for ByteOrder {
    fn from(order: DumpOrder) -> Self {
        match order {
            DumpOrder::Little => ByteOrder::Little,
            DumpOrder::Big => ByteOrder::Big,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "tandem-sim",
    about = "Run the controller/renderer pair against simulated non-coherent caches"
)]
struct Args {
    /// Configuration file (defaults to the embedded viewer.toml)
    #[arg(long, short, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stop after this many frames instead of the configured count
    #[arg(long, value_name = "N")]
    frames: Option<u32>,

    /// Byte order of the control block dump printed at exit
    #[arg(long, value_enum, default_value_t = DumpOrder::Little)]
    dump_order: DumpOrder,
}

fn load(args: &Args) -> Result<(SimConfig, Vec<InputEvent>), config::ConfigError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::embedded()?,
    };
    if let Some(frames) = args.frames {
        config.sim.frames = frames;
    }
    let script = config.input_events()?;
    Ok((config, script))
}

fn dump_block(order: ByteOrder) {
    let image = BLOCK.snapshot();
    info!(
        "Block: program {:#010x}+{} resource {:#010x}+{} latency {} actions {:#07b}",
        image.program_location(),
        image.program_size(),
        image.resource_location(),
        image.resource_size(),
        image.frame_latency(),
        image.input_actions()
    );
    match image.encode_to_vec(order) {
        Ok(bytes) => {
            let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
            println!("{}", hex.join(" "));
        }
        Err(e) => error!("Block dump failed: {e:?}"),
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let (config, script) = match load(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };
    info!("Tandem simulator starting, {} scripted inputs", script.len());

    let resource: &'static [u8] = RESOURCE.init(scene::build(config.workload));
    let workload = Workload::new(FileRegion::new(
        renderer_view(PROGRAM_BASE),
        config.sim.program_size,
    ))
    .with_resource(FileRegion::new(
        renderer_view(RESOURCE_BASE),
        resource.len() as u32,
    ));

    let renderer = RendererSettings {
        camera: config.viewer.camera,
        frame_ms: config.sim.frame_ms,
        frames: config.sim.frames,
    };

    let spawned = spawner
        .spawn(tasks::renderer_task(&BLOCK, resource, renderer))
        .and_then(|()| {
            spawner.spawn(tasks::controller_task(
                BLOCK.window(),
                config.viewer.controller,
                workload,
            ))
        })
        .and_then(|()| spawner.spawn(tasks::input_task(SCRIPT.init(script))));
    if let Err(e) = spawned {
        error!("Failed to spawn tasks: {e:?}");
        std::process::exit(1);
    }

    let timeout = Timer::after(Duration::from_millis(config.sim.timeout_ms));
    let code = match select(DONE.wait(), timeout).await {
        Either::First(frames) => {
            info!("Rendered {frames} frames");
            0
        }
        Either::Second(()) => {
            warn!("Timed out before {} frames", config.sim.frames);
            1
        }
    };

    dump_block(args.dump_order.into());

    // The executor never returns on its own
    std::process::exit(code);
}
