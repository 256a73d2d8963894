//! Scripted user input
//!
//! Replays the configured script as button and switch samples, the way
//! the debounced GPIO layer would deliver them.

use embassy_time::{Duration, Instant, Timer};
use log::{info, warn};
use tandem_hal::ButtonState;

use crate::channels::{InputSample, INPUT_CHANNEL};
use crate::config::InputEvent;

fn send(sample: InputSample) {
    if INPUT_CHANNEL.try_send(sample).is_err() {
        warn!("input channel full, dropped {sample:?}");
    }
}

/// Input task - plays the script once, then idles
#[embassy_executor::task]
pub async fn input_task(script: &'static [InputEvent]) {
    info!("Input task started, {} scripted steps", script.len());

    let start = Instant::now();
    let mut current = InputSample::default();

    for event in script {
        Timer::at(start + Duration::from_millis(event.at_ms)).await;

        if let Some(level) = event.switch {
            current.switch = Some(level);
        }

        if event.press == ButtonState::RELEASED {
            send(current);
            continue;
        }

        current.buttons = event.press;
        send(current);
        Timer::after_millis(event.hold_ms).await;
        current.buttons = ButtonState::RELEASED;
        send(current);
    }

    info!("Input script finished");
}
