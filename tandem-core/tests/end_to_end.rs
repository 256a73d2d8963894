//! Controller and renderer running against simulated non-coherent memory

use tandem_core::camera::{wrap_angle, CameraMode, CameraPose, Vec3};
use tandem_core::config::{CameraConfig, ControllerConfig, RotateSource};
use tandem_core::controller::ControllerLoop;
use tandem_core::framebuffer::{FrameRotator, FrameSlot};
use tandem_core::renderer::RendererLoop;
use tandem_core::session::{SessionState, Workload};
use tandem_core::shared::{ControllerPort, FileRegion, RendererPort};
use tandem_core::traits::Rasterizer;
use tandem_hal::sim::{SharedBacking, SimWindow};
use tandem_hal::{Button, ButtonState, DisplayController, FrameClock, OutputPin};

struct ResetLine(bool);

impl OutputPin for ResetLine {
    fn set_high(&mut self) {
        self.0 = true;
    }

    fn set_low(&mut self) {
        self.0 = false;
    }

    fn is_set_high(&self) -> bool {
        self.0
    }
}

#[derive(Default)]
struct Screen(Vec<u32>);

impl DisplayController for Screen {
    fn swap_to(&mut self, address: u32) {
        self.0.push(address);
    }
}

struct Ticks(u64);

impl FrameClock for Ticks {
    fn now_ticks(&mut self) -> u64 {
        self.0 += 3;
        self.0
    }
}

#[derive(Default)]
struct PoseLog(Vec<(CameraPose, u32)>);

impl Rasterizer for PoseLog {
    fn draw(&mut self, pose: &CameraPose, target: u32) {
        self.0.push((*pose, target));
    }
}

type Renderer<'a> = RendererLoop<SimWindow<'a>, Screen, Ticks>;

fn press(button: Button) -> ButtonState {
    ButtonState::RELEASED.with(button)
}

fn boot(backing: &SharedBacking) -> ControllerLoop<SimWindow<'_>, ResetLine> {
    let config = ControllerConfig {
        rotate_source: RotateSource::ModeButton,
        latency_sample_ticks: 1,
        ..ControllerConfig::default()
    };
    let mut controller = ControllerLoop::new(
        ControllerPort::attach(backing.window()),
        ResetLine(false),
        config,
    );
    controller.select(
        Workload::new(FileRegion::new(0x0000_0000, 0x4_0000))
            .with_resource(FileRegion::new(0x0500_0000, 0x2_0000)),
    );
    controller
}

fn release(backing: &SharedBacking) -> Renderer<'_> {
    RendererLoop::start(
        RendererPort::attach(backing.window()),
        Screen::default(),
        Ticks(0),
        FrameRotator::from_memory_map(),
        CameraConfig::default(),
    )
}

#[test]
fn renderer_sees_workload_published_before_release() {
    let backing = SharedBacking::new();
    let mut controller = boot(&backing);
    assert!(controller.reset_line().is_set_high());

    controller.tick(press(Button::Center), None);
    assert!(controller.reset_line().is_set_low());

    let renderer = release(&backing);
    assert_eq!(renderer.program(), FileRegion::new(0, 0x4_0000));
    assert_eq!(renderer.resource(), FileRegion::new(0x0500_0000, 0x2_0000));
}

#[test]
fn rotate_and_up_raise_elevation_by_one_step() {
    let backing = SharedBacking::new();
    let mut controller = boot(&backing);
    controller.tick(press(Button::Center), None);
    let mut renderer = release(&backing);
    let mut raster = PoseLog::default();
    let config = CameraConfig::default();

    controller.tick(press(Button::Mode), None);
    renderer.frame(&mut raster);
    let before = *renderer.pose();

    controller.tick(ButtonState::RELEASED, None);
    controller.tick(press(Button::Up), None);
    let report = renderer.frame(&mut raster);
    let after = *renderer.pose();

    assert_eq!(report.mode, CameraMode::Rotation);
    assert!(report.actions.rotate_mode);
    assert!((after.elevation - (before.elevation + config.rotation_step)).abs() < 1e-6);
    assert_eq!(after.azimuth, before.azimuth);

    let r = config.orbit_radius;
    let expected = Vec3::new(
        after.elevation.cos() * after.azimuth.sin() * r,
        after.elevation.sin() * r,
        after.elevation.cos() * after.azimuth.cos() * r,
    );
    assert!(after.eye.max_distance(expected) < 1e-4);

    // The rasterizer saw exactly that pose
    let (drawn, _) = raster.0[1];
    assert_eq!(drawn, after);
}

#[test]
fn leaving_rotation_resets_pose() {
    let backing = SharedBacking::new();
    let mut controller = boot(&backing);
    controller.tick(press(Button::Center), None);
    let mut renderer = release(&backing);
    let mut raster = PoseLog::default();

    controller.tick(press(Button::Mode), None);
    controller.tick(press(Button::Right), None);
    for _ in 0..4 {
        renderer.frame(&mut raster);
    }
    assert_ne!(*renderer.pose(), CameraPose::canonical(&CameraConfig::default()));

    // Right off, then rotation off
    controller.tick(ButtonState::RELEASED, None);
    controller.tick(press(Button::Right), None);
    controller.tick(press(Button::Mode), None);
    let report = renderer.frame(&mut raster);

    assert!(report.reset);
    assert_eq!(report.mode, CameraMode::Movement);
    assert!(!report.actions.rotate_mode);
    assert_eq!(*renderer.pose(), CameraPose::canonical(&CameraConfig::default()));
}

#[test]
fn held_direction_turns_from_reset_pose() {
    let backing = SharedBacking::new();
    let mut controller = boot(&backing);
    controller.tick(press(Button::Center), None);
    let mut renderer = release(&backing);
    let mut raster = PoseLog::default();
    let config = CameraConfig::default();

    controller.tick(press(Button::Mode), None);
    controller.tick(press(Button::Right), None);
    for _ in 0..4 {
        renderer.frame(&mut raster);
    }

    // Right stays set while rotation is cleared
    controller.tick(press(Button::Mode), None);
    let report = renderer.frame(&mut raster);
    let pose = *renderer.pose();
    let canonical = CameraPose::canonical(&config);

    assert!(report.reset);
    assert_eq!(report.mode, CameraMode::Movement);
    let expected = wrap_angle(config.initial_angle - config.rotation_step);
    assert!((pose.azimuth - expected).abs() < 1e-5);
    assert_eq!(pose.elevation, canonical.elevation);
    assert_eq!(pose.eye, Vec3::new(6.0, 6.0, 0.0));
    assert_eq!(pose.eye, canonical.eye);
    let heading = pose.heading_target(config.orbit_radius, config.look_distance);
    assert!(pose.target.max_distance(heading) < 1e-3);
}

#[test]
fn buffers_rotate_and_latency_reaches_controller() {
    let backing = SharedBacking::new();
    let mut controller = boot(&backing);
    controller.tick(press(Button::Center), None);
    let mut renderer = release(&backing);
    let mut raster = PoseLog::default();

    let presented: Vec<FrameSlot> = (0..4).map(|_| renderer.frame(&mut raster).presented).collect();
    assert_eq!(
        presented,
        [FrameSlot::Three, FrameSlot::One, FrameSlot::Two, FrameSlot::Three]
    );

    let rotator = renderer.rotator();
    let targets: Vec<u32> = raster.0.iter().map(|(_, target)| *target).collect();
    assert_eq!(targets, renderer.display().0);
    assert_eq!(targets[0], rotator.address(FrameSlot::Three));

    let outcome = controller.tick(ButtonState::RELEASED, None);
    assert_eq!(outcome.latency, Some(3));
}

#[test]
fn stale_actions_without_invalidate() {
    use tandem_hal::{CacheMaintenance, SharedBus};
    use tandem_protocol::layout::offset::INPUT_ACTIONS;

    let backing = SharedBacking::new();
    let mut controller = boot(&backing);
    controller.tick(press(Button::Center), None);

    // A reader that skips the invalidate keeps its first cached copy
    let mut careless = backing.window();
    assert_eq!(careless.load(INPUT_ACTIONS), 0);

    controller.tick(press(Button::Left), None);
    assert_eq!(careless.load(INPUT_ACTIONS), 0);

    careless.invalidate(INPUT_ACTIONS, 4);
    careless.fence();
    assert_eq!(careless.load(INPUT_ACTIONS), controller.actions().bits());
}

#[test]
fn stop_holds_renderer_in_reset() {
    let backing = SharedBacking::new();
    let mut controller = boot(&backing);

    controller.tick(press(Button::Center), None);
    assert_eq!(controller.state(), SessionState::Running);

    controller.tick(ButtonState::RELEASED, None);
    let outcome = controller.tick(press(Button::Center), None);

    assert_eq!(outcome.transition, Some(SessionState::Idle));
    assert!(controller.reset_line().is_set_high());
}
