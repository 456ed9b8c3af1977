//! Main loop
//!
//! [`Pager`] owns the configuration and every collaborator. `boot` walks
//! the initialization phases once; after that the firmware calls `poll`
//! forever. Each poll runs the receive path (gate, resolver, one alert
//! per match) and then the battery timer, strictly in that order.

use embedded_hal_async::delay::DelayNs;
use ricochet_hal::{AdcError, AnalogInput, OutputPin};

use crate::battery::{BatteryMonitor, BatterySample};
use crate::config::PagerConfig;
use crate::dispatch::{AlertOutputs, NotificationDispatcher};
use crate::gate::{GateOutcome, ReceiveGate};
use crate::resolver::AddressResolver;
use crate::state::{BootPhase, Event, FatalError, State};
use crate::traits::{
    Clock, DecodeError, DecodedMessage, DisplayError, DisplaySurface, PagerRadio, ToneEmitter,
};

/// Receive path result for one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiveOutcome {
    /// Below the batch threshold
    Waiting { batches: usize },
    /// Page decoded; `matches` alerts were run for it
    Decoded {
        message: DecodedMessage,
        matches: usize,
    },
    /// Decoder failed; retried naturally on a later cycle
    DecodeFailed(DecodeError),
}

/// Everything that happened in one `poll`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    pub receive: ReceiveOutcome,
    /// Timer-driven battery refresh, if it ran this cycle
    pub battery: Option<Result<BatterySample, AdcError>>,
    /// First display error seen this cycle
    pub display_error: Option<DisplayError>,
}

/// `poll` called outside the listening state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotListening(pub State);

/// The pager: configuration, collaborators and lifecycle state
pub struct Pager<R, D, T, L, W, A, K> {
    config: PagerConfig,
    radio: R,
    outputs: AlertOutputs<D, T, L, W>,
    battery: BatteryMonitor<A>,
    clock: K,
    state: State,
}

impl<R, D, T, L, W, A, K> Pager<R, D, T, L, W, A, K>
where
    R: PagerRadio,
    D: DisplaySurface,
    T: ToneEmitter,
    L: OutputPin,
    W: DelayNs,
    A: AnalogInput,
    K: Clock,
{
    pub fn new(
        config: PagerConfig,
        radio: R,
        outputs: AlertOutputs<D, T, L, W>,
        battery_input: A,
        clock: K,
    ) -> Self {
        let battery = BatteryMonitor::new(battery_input, config.battery);
        Self {
            config,
            radio,
            outputs,
            battery,
            clock,
            state: State::default(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn outputs(&self) -> &AlertOutputs<D, T, L, W> {
        &self.outputs
    }

    /// Run every boot phase in order
    ///
    /// The first failure moves the pager to `Halted` and is returned;
    /// later phases are not attempted. On success the startup ringtone,
    /// if configured, plays once.
    pub async fn boot(&mut self) -> Result<(), FatalError> {
        while let State::Booting(phase) = self.state {
            let event = match self.run_phase(phase).await {
                Ok(()) => Event::PhaseComplete,
                Err(err) => Event::InitFailed(err),
            };
            self.state = self.state.transition(event);
        }

        if let State::Halted(err) = self.state {
            return Err(err);
        }

        if let Some(index) = self.config.alert.startup_ringtone {
            if let Some(ringtone) = self.config.ringtones.get(index) {
                NotificationDispatcher::new(&self.config.alert, &self.config.ringtones)
                    .play(&mut self.outputs.tone, ringtone)
                    .await;
            }
        }
        Ok(())
    }

    async fn run_phase(&mut self, phase: BootPhase) -> Result<(), FatalError> {
        let radio = &self.config.radio;
        match phase {
            BootPhase::Display => {
                let display = &mut self.outputs.display;
                display.init().await.map_err(FatalError::Display)?;
                display.clear();
                display.flush().await.map_err(FatalError::Display)
            }
            BootPhase::Radio => self.radio.begin_fsk().await.map_err(FatalError::Radio),
            BootPhase::Protocol => self
                .radio
                .begin_pager(radio.tuned_frequency_hz(), radio.baud)
                .await
                .map_err(FatalError::Protocol),
            BootPhase::Receiver => self
                .radio
                .start_receive(radio.filter)
                .await
                .map_err(FatalError::Receiver),
        }
    }

    /// Run one main-loop cycle
    pub async fn poll(&mut self) -> Result<CycleReport, NotListening> {
        if !self.state.is_listening() {
            return Err(NotListening(self.state));
        }

        let mut display_error = None;
        let gate = ReceiveGate::new(&self.config.receive);

        let receive = match gate.poll(&mut self.radio).await {
            GateOutcome::Waiting { batches } => ReceiveOutcome::Waiting { batches },
            GateOutcome::Failed(err) => ReceiveOutcome::DecodeFailed(err),
            GateOutcome::Decoded(message) => {
                let resolver = AddressResolver::new(&self.config.directory);
                let dispatcher =
                    NotificationDispatcher::new(&self.config.alert, &self.config.ringtones);
                let mut matches = 0;

                for entry in resolver.resolve(message.address) {
                    self.state = self.state.transition(Event::AlertStarted);
                    let report = dispatcher
                        .dispatch(entry, &message.text, &mut self.outputs, &mut self.battery)
                        .await;
                    self.state = self.state.transition(Event::AlertFinished);

                    display_error = display_error.or(report.display_error());
                    matches += 1;
                }
                ReceiveOutcome::Decoded { message, matches }
            }
        };

        let now = self.clock.now_ms();
        let battery = self
            .battery
            .refresh_if_due(&mut self.outputs.display, now)
            .await;
        if let Some(refresh) = &battery {
            display_error = display_error.or(refresh.display.err());
        }

        Ok(CycleReport {
            receive,
            battery: battery.map(|refresh| refresh.sample),
            display_error,
        })
    }
}
