//! Controller processor task
//!
//! Polls the input channel on the controller tick and drives the
//! protocol through `ControllerLoop`.

use embassy_time::{Duration, Ticker};
use log::{debug, info, warn};
use tandem_core::config::ControllerConfig;
use tandem_core::controller::ControllerLoop;
use tandem_core::session::{SessionState, Workload};
use tandem_core::shared::ControllerPort;
use tandem_hal::sim::SimWindow;

use crate::board::{InputLatch, SimResetLine};

/// Controller task - one `ControllerLoop::poll` per interval
#[embassy_executor::task]
pub async fn controller_task(
    window: SimWindow<'static>,
    config: ControllerConfig,
    workload: Workload,
) {
    info!("Controller task started, tick {} ms", config.tick_ms);

    let mut controller =
        ControllerLoop::new(ControllerPort::attach(window), SimResetLine::default(), config);

    // The file menu is out of scope; the workload is preselected
    controller.select(workload);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(config.tick_ms.max(1))));
    let mut inputs = InputLatch::default();

    loop {
        ticker.next().await;

        inputs.refresh();
        let switch = inputs.switch();
        let outcome = controller.poll(&mut inputs, switch.as_ref());

        if outcome.start_refused {
            warn!("Start ignored: no workload selected");
        }
        match outcome.transition {
            Some(SessionState::Running) => info!("Session started, renderer released"),
            Some(SessionState::Idle) => info!("Session stopped, renderer held in reset"),
            None => {}
        }
        if let Some(actions) = outcome.published {
            debug!("Published actions {:#07b}", actions.bits());
        }
        if let Some(latency) = outcome.latency {
            info!("Frame latency {latency} us");
        }
    }
}
