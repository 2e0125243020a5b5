use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::io::stderr;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use super::terminal::TerminalSession;
use crate::audio::{AudioSink, NullAudio, TerminalBell};
use crate::game::{
    Clock, DirectionInput, Game, GameConfig, MonotonicClock, TickOutcome, TickScheduler,
};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    game: Game<Box<dyn AudioSink>>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    clock: MonotonicClock,
    scheduler: TickScheduler,
    frame_interval: Duration,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let audio: Box<dyn AudioSink> = if config.audio_enabled {
            Box::new(TerminalBell::new(stderr()))
        } else {
            Box::new(NullAudio)
        };
        Self::with_audio(config, audio)
    }

    pub fn with_audio(config: GameConfig, audio: Box<dyn AudioSink>) -> Result<Self> {
        let frame_interval = Duration::from_secs_f64(1.0 / f64::from(config.frame_rate.max(1)));
        let game = Game::new(config, audio).context("Failed to set up the game")?;

        Ok(Self {
            game,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            clock: MonotonicClock::new(),
            scheduler: TickScheduler::new(),
            frame_interval,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::acquire()?;
        tracing::info!(
            grid_size = self.game.config().grid_size,
            frame_rate = self.game.config().frame_rate,
            "starting human mode"
        );

        // The session guard restores the terminal when it goes out of scope
        self.run_game_loop(&mut session).await
    }

    async fn run_game_loop(&mut self, session: &mut TerminalSession) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(self.frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // One frame: at most one tick, then redraw
                _ = frame_timer.tick() => {
                    self.advance(self.clock.now());
                    session.terminal_mut().draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                tracing::info!(
                    games_played = self.metrics.games_played,
                    best_score = self.game.best_score(),
                    "quitting"
                );
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Move(direction) => match self.game.press_direction(direction) {
                DirectionInput::Started => {
                    self.metrics.on_game_start();
                    self.scheduler = TickScheduler::starting_at(self.clock.now());
                }
                DirectionInput::Resumed => self.metrics.on_resume(),
                DirectionInput::Turned | DirectionInput::Rejected => {}
            },
            KeyAction::TogglePause => {
                if self.game.toggle_pause() && !self.game.is_paused() {
                    self.metrics.on_resume();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Run a tick if the game is live and its pace has elapsed by `now`
    fn advance(&mut self, now: f64) -> Option<TickOutcome> {
        if !self.game.is_active() {
            return None;
        }

        self.metrics.update();
        if !self.scheduler.is_due(now, self.game.pace()) {
            return None;
        }

        let outcome = self.game.update();
        if let Some(reason) = outcome.game_over {
            self.metrics.on_game_over(outcome.score, reason);
        }
        Some(outcome)
    }
}
