//! Input events to navigation commands.
//!
//! | Input | Command |
//! |-------|---------|
//! | `ArrowRight`, `Space` | next |
//! | `ArrowLeft` | previous |
//! | swipe left past the threshold | next |
//! | swipe right past the threshold | previous |
//! | indicator dot `i` | go to page `i` |
//! | index entry | go to the page with that order |
//!
//! Every command goes through the engine's regular navigation, so the
//! transition lock and boundaries apply to keys and swipes alike.

use crate::pagination::{Clock, NavOutcome, PaginationEngine};

/// Default minimum swipe distance in pixels.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavCommand {
    Next,
    Previous,
    /// Jump to a page index.
    GoTo(usize),
    /// Jump to the page with this `order`.
    GoToOrder(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key name as reported by the browser, e.g. `ArrowRight` or ` `.
    Key(String),
    /// A completed horizontal swipe.
    Swipe { start_x: f64, end_x: f64 },
    /// Click on the indicator dot of page `index`.
    Indicator(usize),
    /// Click on an index entry pointing at `order`.
    IndexEntry(f64),
}

/// Maps raw input to commands.
#[derive(Debug, Clone, Copy)]
pub struct InputMapper {
    pub swipe_threshold: f64,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

impl InputMapper {
    pub fn new(swipe_threshold: f64) -> Self {
        Self { swipe_threshold }
    }

    /// The command for `event`, if it means anything.
    pub fn command(&self, event: &InputEvent) -> Option<NavCommand> {
        match event {
            InputEvent::Key(key) => key_command(key),
            InputEvent::Swipe { start_x, end_x } => self.swipe_command(*start_x, *end_x),
            InputEvent::Indicator(index) => Some(NavCommand::GoTo(*index)),
            InputEvent::IndexEntry(order) => Some(NavCommand::GoToOrder(*order)),
        }
    }

    /// A swipe strictly longer than the threshold turns the page. Dragging
    /// leftward reveals the next page.
    pub fn swipe_command(&self, start_x: f64, end_x: f64) -> Option<NavCommand> {
        let distance = start_x - end_x;
        if !distance.is_finite() {
            None
        } else if distance > self.swipe_threshold {
            Some(NavCommand::Next)
        } else if distance < -self.swipe_threshold {
            Some(NavCommand::Previous)
        } else {
            None
        }
    }
}

fn key_command(key: &str) -> Option<NavCommand> {
    match key {
        "ArrowRight" | " " | "Space" | "Spacebar" => Some(NavCommand::Next),
        "ArrowLeft" => Some(NavCommand::Previous),
        _ => None,
    }
}

/// Touch gesture state between touch start and touch end.
///
/// A touch that never moves is a tap, not a swipe, and produces nothing.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<f64>,
    end: Option<f64>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, x: f64) {
        self.start = Some(x);
        self.end = None;
    }

    pub fn moved(&mut self, x: f64) {
        if self.start.is_some() {
            self.end = Some(x);
        }
    }

    /// Finish the gesture and reset.
    pub fn end(&mut self) -> Option<InputEvent> {
        let start = self.start.take();
        let end = self.end.take();
        Some(InputEvent::Swipe {
            start_x: start?,
            end_x: end?,
        })
    }
}

impl<C: Clock> PaginationEngine<C> {
    /// Run a navigation command.
    pub fn apply(&mut self, command: NavCommand) -> NavOutcome {
        match command {
            NavCommand::Next => self.next(),
            NavCommand::Previous => self.previous(),
            NavCommand::GoTo(index) => self.go_to_index(index),
            NavCommand::GoToOrder(order) => self.go_to_order(order),
        }
    }
}
