//! Control processor loop
//!
//! Polled once per tick with a fresh button sample. Drives the session
//! lifecycle, keeps the shadow action word, and writes it to the block
//! only when it changed.

use tandem_hal::{Button, ButtonBank, ButtonState, InputPin, OutputPin, SharedWindow};
use tandem_protocol::InputActions;

use crate::config::ControllerConfig;
use crate::input::InputEncoder;
use crate::session::{SessionEvent, SessionState, Workload};
use crate::shared::ControllerPort;

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// New session state, if it changed this tick
    pub transition: Option<SessionState>,
    /// Action word written to the block this tick
    pub published: Option<InputActions>,
    /// Latency sampled from the block this tick
    pub latency: Option<u32>,
    /// Center was pressed while idle with nothing selected
    pub start_refused: bool,
}

/// Controller side of the viewer
pub struct ControllerLoop<W, R> {
    port: ControllerPort<W>,
    reset: R,
    config: ControllerConfig,
    state: SessionState,
    encoder: InputEncoder,
    previous: ButtonState,
    workload: Option<Workload>,
    ticks: u32,
}

impl<W: SharedWindow, R: OutputPin> ControllerLoop<W, R> {
    /// Take over the port and reset line; the renderer is held in reset
    pub fn new(port: ControllerPort<W>, mut reset: R, config: ControllerConfig) -> Self {
        reset.set_high();
        Self {
            port,
            reset,
            config,
            state: SessionState::Idle,
            encoder: InputEncoder::new(config.rotate_source),
            previous: ButtonState::RELEASED,
            workload: None,
            ticks: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Shadow copy of the action word
    pub fn actions(&self) -> InputActions {
        self.encoder.actions()
    }

    pub fn workload(&self) -> Option<&Workload> {
        self.workload.as_ref()
    }

    pub fn port(&self) -> &ControllerPort<W> {
        &self.port
    }

    pub fn reset_line(&self) -> &R {
        &self.reset
    }

    /// Choose what the next session runs
    pub fn select(&mut self, workload: Workload) {
        self.workload = Some(workload);
    }

    /// Sample the input hardware and run one tick
    pub fn poll<B: ButtonBank, S: InputPin>(
        &mut self,
        buttons: &mut B,
        switch: Option<&S>,
    ) -> TickOutcome {
        let sample = buttons.sample();
        self.tick(sample, switch.map(|pin| pin.is_high()))
    }

    /// Process one button sample and, optionally, the rotate switch level
    pub fn tick(&mut self, buttons: ButtonState, switch: Option<bool>) -> TickOutcome {
        let edges = buttons.rising_edges(self.previous);
        self.previous = buttons;

        let mut outcome = TickOutcome::default();

        if edges.is_pressed(Button::Center) {
            let event = if self.state.is_running() {
                SessionEvent::Stop
            } else {
                SessionEvent::Start
            };
            self.handle(event, &mut outcome);
        }

        if !self.state.is_running() {
            return outcome;
        }

        let edited = self.encoder.apply_edges(edges);
        let switched = self.encoder.sync_switch(switch);
        if edited || switched {
            let actions = self.encoder.actions();
            self.port.publish_actions(actions);
            outcome.published = Some(actions);
        }

        self.ticks = self.ticks.wrapping_add(1);
        let every = self.config.latency_sample_ticks;
        if every != 0 && self.ticks % every == 0 {
            outcome.latency = Some(self.port.sample_latency());
        }

        outcome
    }

    fn handle(&mut self, event: SessionEvent, outcome: &mut TickOutcome) {
        let next = self.state.transition(event);
        if next == self.state {
            return;
        }

        match next {
            SessionState::Running => {
                let Some(workload) = self.workload else {
                    outcome.start_refused = true;
                    return;
                };
                self.start(workload);
                outcome.published = Some(InputActions::NONE);
            }
            SessionState::Idle => self.stop(),
        }

        self.state = next;
        outcome.transition = Some(next);
    }

    // Everything the renderer reads at startup must be in shared memory
    // before reset is released.
    fn start(&mut self, workload: Workload) {
        self.port.publish_program(workload.program);
        if let Some(resource) = workload.resource {
            self.port.publish_resource(resource);
        }
        self.encoder.reset();
        self.port.publish_actions(InputActions::NONE);
        self.ticks = 0;
        self.reset.set_low();
    }

    fn stop(&mut self) {
        self.reset.set_high();
    }
}
