//! A game session wired to its high-score table and save slot.

use crate::{AppConfig, AppError, HiScoreTable, SaveSlot, Score};
use connect_log2_engine::{Game, GameOutcome, GamePhase, Intent};
use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, instrument, warn};

/// How a session begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum StartMode {
    /// Fresh board; any saved board is dropped.
    #[default]
    New,
    /// Resume the saved board if there is one.
    Load,
}

/// One game plus the stores its outcomes are written to.
#[derive(Debug, Getters)]
pub struct Session {
    game: Game,
    hiscores: HiScoreTable,
    save_slot: SaveSlot,
    user: String,
    /// Entry added by the most recent finished game, if it made the table.
    last_score: Option<Score>,
    finished: bool,
}

impl Session {
    /// Opens the stores under the configured data directory and starts a game.
    #[instrument(skip(config), fields(user = %config.user()))]
    pub fn start(config: &AppConfig, mode: StartMode, seed: Option<u64>) -> Result<Self, AppError> {
        let dimensions = config.dimensions()?;
        let hiscores = HiScoreTable::load(config.hiscore_path());
        let save_slot = SaveSlot::new(config.save_path());

        let saved = match mode {
            StartMode::Load => save_slot.load(dimensions),
            StartMode::New => {
                save_slot.discard();
                None
            }
        };

        let game = match saved {
            Some(snapshot) => match Game::from_snapshot(dimensions, &snapshot, make_rng(seed)) {
                Ok(game) => game,
                Err(e) => {
                    warn!(error = %e, "Saved board rejected, starting fresh");
                    save_slot.discard();
                    Game::with_rng(dimensions, make_rng(seed))
                }
            },
            None => Game::with_rng(dimensions, make_rng(seed)),
        };
        info!(%mode, "Session started");

        Ok(Self {
            game,
            hiscores,
            save_slot,
            user: config.user().clone(),
            last_score: None,
            finished: false,
        })
    }

    /// Wraps an existing game.
    pub fn with_game(game: Game, hiscores: HiScoreTable, save_slot: SaveSlot, user: String) -> Self {
        Self {
            game,
            hiscores,
            save_slot,
            user,
            last_score: None,
            finished: false,
        }
    }

    /// Mutable access to the game, for draining presentation events.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Applies an intent and records whatever it finished.
    #[instrument(skip(self))]
    pub fn apply(&mut self, intent: Intent) -> GameOutcome {
        if self.finished {
            return GameOutcome::Continue;
        }
        let outcome = self.game.apply(intent);
        match &outcome {
            GameOutcome::Restarted(report) => {
                self.record(Score::from_report(*report, self.user.as_str()));
            }
            GameOutcome::Ended(report) => {
                self.record(Score::from_report(*report, self.user.as_str()));
                self.save_slot.discard();
                self.finished = true;
            }
            GameOutcome::Saved(snapshot) => {
                if let Err(e) = self.save_slot.store(snapshot) {
                    error!(error = %e, "Failed to save game");
                }
                self.finished = true;
            }
            GameOutcome::Continue | GameOutcome::Merged(_) => {}
        }
        outcome
    }

    /// Prompt for the current phase, if it asks a question.
    pub fn prompt(&self) -> Option<&'static str> {
        match self.game.phase() {
            GamePhase::Playing => None,
            GamePhase::AwaitingNoMovesDecision => Some("No more moves, quit or next game? <q/n>"),
            GamePhase::AwaitingQuitConfirmation => Some("Quit, save for later, continue? <q/s/c>"),
            GamePhase::AwaitingResetConfirmation => Some("New game? <y/n>"),
        }
    }

    fn record(&mut self, score: Score) {
        self.last_score = self
            .hiscores
            .insert(score.clone())
            .then_some(score);
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
