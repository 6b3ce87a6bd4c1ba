//! Front-end state around a session.

use super::input::{KeyAction, key_action};
use super::mouse::{Click, MouseClassifier};
use super::view::BoardView;
use crate::Session;
use connect_log2_engine::{GameOutcome, Intent, PresentationEvent};
use crossterm::event::KeyEvent;
use derive_getters::Getters;
use tracing::{debug, instrument};

/// Main application state.
#[derive(Debug, Getters)]
pub struct App {
    session: Session,
    view: BoardView,
    #[getter(skip)]
    mouse: MouseClassifier,
    #[getter(skip)]
    show_scores: bool,
    message: Option<String>,
    #[getter(skip)]
    pending: Vec<PresentationEvent>,
}

impl App {
    /// Creates the front-end state and takes the start-up events.
    pub fn new(mut session: Session) -> Self {
        let dimensions = session.game().grid().dimensions();
        let pending = session.game_mut().drain_events();
        Self {
            session,
            view: BoardView::new(dimensions),
            mouse: MouseClassifier::new(),
            show_scores: false,
            message: None,
            pending,
        }
    }

    /// Returns true while the high-score table covers the board.
    pub fn showing_scores(&self) -> bool {
        self.show_scores
    }

    /// Returns true once the session is over and no score table is waiting
    /// to be dismissed.
    pub fn is_finished(&self) -> bool {
        *self.session.finished() && !self.show_scores
    }

    /// Running total of the pending chain, formatted for the status pane.
    pub fn chain_text(&self) -> Option<String> {
        self.session.game().chain_summary().map(|s| s.to_string())
    }

    /// Mouse classifier, fed by the event loop.
    pub fn mouse_mut(&mut self) -> &mut MouseClassifier {
        &mut self.mouse
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_scores {
            debug!("Closing score table");
            self.show_scores = false;
            return;
        }
        let game = self.session.game();
        match key_action(key, game.phase(), game.cursor()) {
            Some(KeyAction::Play(intent)) => self.apply(intent),
            Some(KeyAction::ShowScores) => self.show_scores = true,
            None => {}
        }
    }

    /// Handles recognised mouse gestures.
    pub fn handle_clicks(&mut self, clicks: Vec<Click>) {
        if self.show_scores {
            if clicks.iter().any(|c| !matches!(c, Click::DragStop)) {
                self.show_scores = false;
            }
            return;
        }
        for click in clicks {
            for intent in click.intents() {
                self.apply(intent);
            }
        }
    }

    /// Forwards an intent to the session and reacts to the outcome.
    #[instrument(skip(self))]
    pub fn apply(&mut self, intent: Intent) {
        let outcome = self.session.apply(intent);
        match &outcome {
            GameOutcome::Merged(merge) => {
                self.message = Some(format!("Merged {} into {}", merge.sum, merge.number));
            }
            GameOutcome::Restarted(report) => {
                self.message = Some(format!("Previous game: {} points", report.points()));
                if self.session.last_score().is_some() {
                    self.show_scores = true;
                }
            }
            GameOutcome::Ended(_) if self.session.last_score().is_some() => {
                debug!("Final score entered the table");
                self.show_scores = true;
            }
            GameOutcome::Continue | GameOutcome::Ended(_) | GameOutcome::Saved(_) => {}
        }
        let events = self.session.game_mut().drain_events();
        self.pending.extend(events);
    }

    /// Applies queued events to the view up to the next settled drop phase.
    ///
    /// Returns true if events remain, meaning the caller should redraw and
    /// pause before calling again.
    pub fn advance_view(&mut self) -> bool {
        let mut taken = 0;
        let mut paused = false;
        for event in &self.pending {
            taken += 1;
            if self.view.apply(event) {
                paused = true;
                break;
            }
        }
        self.pending.drain(..taken);
        paused && !self.pending.is_empty()
    }
}
