//! Game state machine
//!
//! Owns the simulation state and decides, once per frame, whether the
//! simulation runs. Commands queued since the last frame are applied first,
//! in arrival order; then the tick (or the attract clock) advances; then the
//! frontend hears about everything that happened.

use crate::error::ConfigError;
use crate::settings::{GameConfig, Settings};
use crate::sim::{
    Command, CommandQueue, GameEvent, GamePhase, LevelSequencer, SimulationState, TickOutcome,
    apply_player_command, tick,
};
use crate::sink::{Frontend, HudState, Snapshot};

pub struct Game {
    config: GameConfig,
    /// Validated trip, cloned into every run
    trip: LevelSequencer,
    phase: GamePhase,
    state: SimulationState,
    commands: CommandQueue,
    /// Runs started so far
    runs: u64,
    attract_time: f32,
    muted: bool,
}

impl Game {
    /// Validate the configuration and park the game on the title screen
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let trip = LevelSequencer::new(config.stops.clone())?;
        let state = SimulationState::new(trip.clone(), config.seed);
        log::info!(
            "Game ready: {} stops, seed {:#x}",
            trip.len(),
            config.seed
        );
        Ok(Self {
            config,
            trip,
            phase: GamePhase::Idle,
            state,
            commands: CommandQueue::new(),
            runs: 0,
            attract_time: 0.0,
            muted: false,
        })
    }

    /// Build from loaded settings (run config plus initial mute)
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let mut game = Self::new(settings.game.clone())?;
        game.muted = settings.muted;
        Ok(game)
    }

    /// Queue a command for the next frame
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn attract_time(&self) -> f32 {
        self.attract_time
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.phase, &self.state, self.attract_time, self.muted)
    }

    pub fn hud(&self) -> HudState {
        HudState::capture(&self.state, self.muted)
    }

    /// Run one frame and report it to the frontend. Returns the phase after
    /// the frame.
    pub fn frame<F: Frontend + ?Sized>(&mut self, dt: f32, frontend: &mut F) -> GamePhase {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        };

        let pending: Vec<Command> = self.commands.drain().collect();
        for command in pending {
            self.handle(command);
        }

        if self.phase.is_running() {
            match tick(&mut self.state, dt) {
                TickOutcome::Continue => {}
                TickOutcome::GameOver => self.phase = GamePhase::GameOver,
                TickOutcome::Victory => self.phase = GamePhase::Victory,
            }
        } else {
            self.attract_time += dt;
        }

        for event in self.state.drain_events() {
            frontend.on_event(&event);
            if let Some(message) = event.toast() {
                frontend.show(&message);
            }
        }
        frontend.update(&self.hud());
        frontend.present(&self.snapshot());

        self.phase
    }

    fn handle(&mut self, command: Command) {
        if command.is_gameplay() && !self.phase.is_running() {
            log::debug!("{command:?} ignored in {:?}", self.phase);
            return;
        }
        match command {
            Command::Start | Command::Restart => {
                if self.phase.is_running() {
                    log::debug!("{command:?} ignored: run in progress");
                } else {
                    self.start_run();
                }
            }
            Command::ToggleMute => {
                self.muted = !self.muted;
                self.state.events.push(GameEvent::MuteToggled { muted: self.muted });
            }
            _ => apply_player_command(&mut self.state, command),
        }
    }

    /// Replace the run state wholesale and enter the first stop
    fn start_run(&mut self) {
        let seed = self.config.seed.wrapping_add(self.runs);
        self.runs += 1;

        // Keep session events (mute) queued ahead of the reset
        let carried = self.state.drain_events();
        self.state = SimulationState::new(self.trip.clone(), seed);
        self.state.events.extend(carried);
        self.state.begin_stop(0);

        self.phase = GamePhase::Running;
        self.attract_time = 0.0;
        log::info!("Run {} started (seed {:#x})", self.runs, seed);
    }
}
