//! Flipbook pagination: which page(s) are visible and how navigation moves.
//!
//! The book is a flat sequence of pages sorted by `order`. It is viewed either
//! one page at a time ([`ViewMode::Single`]) or as two-page spreads
//! ([`ViewMode::Spread`]).
//!
//! ## Spread Alignment
//!
//! In spread mode page 0 stands alone like a cover and the rest pair up:
//!
//! ```text
//! index:   0 | 1 2 | 3 4 | 5 6 | ...
//! anchor:  0 | 1   | 3   | 5   | ...
//! ```
//!
//! A spread is identified by its *anchor*, always 0 or odd. Navigating to an
//! even index `t > 0` lands on `t - 1`, the start of the pair containing it.
//!
//! ## Transition Lock
//!
//! Every successful move starts a transition and holds a lock for the settle
//! duration; navigation is rejected while it is held. The lock is a deadline
//! tied to a [`TransitionId`], not a flag waiting on an animation callback:
//! a newer transition replaces the old deadline, a completion callback for a
//! stale transition is ignored, and a dropped callback only delays release
//! until the deadline passes.
//!
//! The engine never realigns itself when the view mode changes; callers that
//! want that call [`PaginationEngine::realign`].

use crate::types::Page;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default settle duration of a page-turn transition.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(700);

/// Single page or two-page spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Single,
    Spread,
}

impl ViewMode {
    /// Spreads are used once the viewport reaches the breakpoint width.
    pub fn for_viewport_width(width: u32, breakpoint: u32) -> Self {
        if width >= breakpoint {
            Self::Spread
        } else {
            Self::Single
        }
    }
}

/// Direction of the last page turn, used to orient the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    None,
    Forward,
    Backward,
}

impl Direction {
    fn between(from: usize, to: usize) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Self::Forward,
            std::cmp::Ordering::Less => Self::Backward,
            std::cmp::Ordering::Equal => Self::None,
        }
    }

    /// `1`, `-1`, or `0`.
    pub fn signum(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
            Self::None => 0,
        }
    }
}

/// Identity of one page-turn transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(u64);

/// Why a navigation request changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The book has no pages.
    Empty,
    /// A transition is still settling.
    Animating,
    /// The target index is not in the book.
    OutOfRange,
    /// The target is already displayed.
    AlreadyThere,
    /// Already at the first or last page/spread.
    AtBoundary,
}

/// Result of a navigation request. Navigation never fails; it either moves
/// or reports why it did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved {
        from: usize,
        to: usize,
        direction: Direction,
        transition: TransitionId,
    },
    Ignored(IgnoreReason),
}

impl NavOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// The page(s) currently on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visible<'a> {
    /// Index of `first` in the sorted sequence.
    pub anchor: usize,
    pub first: &'a Page,
    /// Right-hand page of a spread. Always `None` in single mode, on the
    /// cover, and on a trailing unpaired page.
    pub second: Option<&'a Page>,
}

/// Time source for transition deadlines.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ============================================================================
// Pure index math
// ============================================================================

/// Index actually shown when navigating to `target`.
pub fn landing_index(target: usize, mode: ViewMode) -> usize {
    match mode {
        ViewMode::Single => target,
        ViewMode::Spread if target == 0 => 0,
        ViewMode::Spread if target % 2 == 1 => target,
        ViewMode::Spread => (target - 1).max(1),
    }
}

/// Target of a forward turn from `current`. May be past the end.
pub fn next_target(current: usize, mode: ViewMode) -> usize {
    match mode {
        ViewMode::Single => current + 1,
        ViewMode::Spread if current == 0 => 1,
        ViewMode::Spread => current + 2,
    }
}

/// Target of a backward turn from `current` (> 0).
pub fn previous_target(current: usize, mode: ViewMode) -> usize {
    match mode {
        ViewMode::Single => current.saturating_sub(1),
        ViewMode::Spread if current <= 2 => 0,
        ViewMode::Spread => current - 2,
    }
}

/// Number of navigable units: pages in single mode; the cover plus pairs in
/// spread mode.
pub fn spread_count(total: usize, mode: ViewMode) -> usize {
    match mode {
        _ if total == 0 => 0,
        ViewMode::Single => total,
        ViewMode::Spread => 1 + (total - 1).div_ceil(2),
    }
}

/// Position of the unit anchored at `anchor` among all units.
pub fn spread_index(anchor: usize, mode: ViewMode) -> usize {
    match mode {
        ViewMode::Single => anchor,
        ViewMode::Spread if anchor == 0 => 0,
        ViewMode::Spread => anchor.div_ceil(2),
    }
}

/// Anchors of every navigable unit, in reading order.
pub fn anchors(total: usize, mode: ViewMode) -> Vec<usize> {
    let mut result = Vec::with_capacity(spread_count(total, mode));
    let mut anchor = 0;
    while anchor < total {
        result.push(anchor);
        anchor = next_target(anchor, mode);
    }
    result
}

/// Indices visible when `anchor` is current: `(first, second)`.
pub fn visible_indices(anchor: usize, total: usize, mode: ViewMode) -> Option<(usize, Option<usize>)> {
    if anchor >= total {
        return None;
    }
    let second = match mode {
        ViewMode::Spread if anchor > 0 && anchor + 1 < total => Some(anchor + 1),
        _ => None,
    };
    Some((anchor, second))
}

/// 1-based label of the unit anchored at `anchor`, e.g. `2 - 3 / 10`.
pub fn page_label(anchor: usize, total: usize, mode: ViewMode) -> String {
    match visible_indices(anchor, total, mode) {
        Some((first, Some(second))) => format!("{} - {} / {}", first + 1, second + 1, total),
        Some((first, None)) => format!("{} / {}", first + 1, total),
        None => String::new(),
    }
}

/// Sort pages into reading order.
pub fn sort_pages(pages: &mut [Page]) {
    pages.sort_by(|a, b| a.order.total_cmp(&b.order));
}

// ============================================================================
// Engine
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Transition {
    id: TransitionId,
    deadline: Instant,
}

/// Navigation state for one viewer.
#[derive(Debug)]
pub struct PaginationEngine<C: Clock = SystemClock> {
    pages: Vec<Page>,
    current: usize,
    mode: ViewMode,
    direction: Direction,
    transition: Option<Transition>,
    next_transition: u64,
    settle: Duration,
    clock: C,
}

impl PaginationEngine<SystemClock> {
    pub fn new(pages: Vec<Page>, mode: ViewMode) -> Self {
        Self::with_clock(pages, mode, DEFAULT_SETTLE, SystemClock)
    }
}

impl<C: Clock> PaginationEngine<C> {
    /// Build an engine over `pages` (sorted here) starting at index 0.
    pub fn with_clock(mut pages: Vec<Page>, mode: ViewMode, settle: Duration, clock: C) -> Self {
        sort_pages(&mut pages);
        Self {
            pages,
            current: 0,
            mode,
            direction: Direction::None,
            transition: None,
            next_transition: 0,
            settle,
            clock,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// The current anchor index.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a transition is still settling.
    pub fn is_animating(&self) -> bool {
        self.transition
            .is_some_and(|t| self.clock.now() < t.deadline)
    }

    /// Switch view mode. The anchor is left as is; see [`Self::realign`].
    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode != self.mode {
            debug!(?mode, current = self.current, "view mode changed");
            self.mode = mode;
        }
    }

    /// Snap the current index onto a valid anchor for the current mode.
    /// Returns true if the index changed. Does not start a transition.
    pub fn realign(&mut self) -> bool {
        let aligned = landing_index(self.current, self.mode);
        let changed = aligned != self.current;
        self.current = aligned;
        changed
    }

    /// Replace the page sequence with a fresh snapshot.
    ///
    /// The snapshot is authoritative: it is sorted and taken wholesale. The
    /// current index is clamped into the new range and snapped onto a valid
    /// anchor for the current mode.
    pub fn replace_pages(&mut self, mut pages: Vec<Page>) {
        sort_pages(&mut pages);
        self.pages = pages;
        let clamped = self.current.min(self.pages.len().saturating_sub(1));
        self.current = landing_index(clamped, self.mode);
        debug!(total = self.pages.len(), current = self.current, "pages replaced");
    }

    /// Release the lock early for a finished animation. Returns true if the
    /// id matched the transition in flight; stale ids are ignored.
    pub fn finish_transition(&mut self, id: TransitionId) -> bool {
        match self.transition {
            Some(t) if t.id == id => {
                self.transition = None;
                true
            }
            _ => false,
        }
    }

    /// Navigate to page `target`, snapping to its spread in spread mode.
    pub fn go_to_index(&mut self, target: usize) -> NavOutcome {
        if self.pages.is_empty() {
            return self.ignore(IgnoreReason::Empty);
        }
        if target >= self.pages.len() {
            return self.ignore(IgnoreReason::OutOfRange);
        }
        let landing = landing_index(target, self.mode);
        if target == self.current || landing == self.current {
            return self.ignore(IgnoreReason::AlreadyThere);
        }
        if self.is_animating() {
            return self.ignore(IgnoreReason::Animating);
        }
        let direction = Direction::between(self.current, target);
        self.turn_to(landing, direction)
    }

    /// Navigate to the page whose `order` equals `order`.
    pub fn go_to_order(&mut self, order: f64) -> NavOutcome {
        match self.pages.iter().position(|p| p.order == order) {
            Some(index) => self.go_to_index(index),
            None => self.ignore(IgnoreReason::OutOfRange),
        }
    }

    /// Turn forward one page or spread.
    pub fn next(&mut self) -> NavOutcome {
        if let Some(reason) = self.blocked() {
            return self.ignore(reason);
        }
        let target = next_target(self.current, self.mode);
        if target >= self.pages.len() {
            return self.ignore(IgnoreReason::AtBoundary);
        }
        self.turn_to(target, Direction::Forward)
    }

    /// Turn back one page or spread.
    pub fn previous(&mut self) -> NavOutcome {
        if let Some(reason) = self.blocked() {
            return self.ignore(reason);
        }
        if self.current == 0 {
            return self.ignore(IgnoreReason::AtBoundary);
        }
        let target = previous_target(self.current, self.mode);
        self.turn_to(target, Direction::Backward)
    }

    pub fn can_go_next(&self) -> bool {
        self.blocked().is_none() && next_target(self.current, self.mode) < self.pages.len()
    }

    pub fn can_go_previous(&self) -> bool {
        self.blocked().is_none() && self.current > 0
    }

    /// The page(s) to render, or `None` for an empty book.
    pub fn visible_pages(&self) -> Option<Visible<'_>> {
        let (first, second) = visible_indices(self.current, self.pages.len(), self.mode)?;
        Some(Visible {
            anchor: first,
            first: &self.pages[first],
            second: second.map(|i| &self.pages[i]),
        })
    }

    /// Whether page `index` is on screen (drives the indicator dots).
    pub fn is_visible(&self, index: usize) -> bool {
        match visible_indices(self.current, self.pages.len(), self.mode) {
            Some((first, second)) => index == first || second == Some(index),
            None => false,
        }
    }

    pub fn spread_count(&self) -> usize {
        spread_count(self.pages.len(), self.mode)
    }

    /// Position of the current unit among [`Self::spread_count`] units.
    pub fn spread_index(&self) -> usize {
        spread_index(self.current, self.mode)
    }

    /// 1-based label such as `3 / 10` or `2 - 3 / 10`. Empty for an empty book.
    pub fn page_label(&self) -> String {
        page_label(self.current, self.pages.len(), self.mode)
    }

    fn blocked(&self) -> Option<IgnoreReason> {
        if self.pages.is_empty() {
            Some(IgnoreReason::Empty)
        } else if self.is_animating() {
            Some(IgnoreReason::Animating)
        } else {
            None
        }
    }

    fn ignore(&self, reason: IgnoreReason) -> NavOutcome {
        debug!(?reason, current = self.current, "navigation ignored");
        NavOutcome::Ignored(reason)
    }

    /// Move to `to` and start a new transition, superseding any stale one.
    fn turn_to(&mut self, to: usize, direction: Direction) -> NavOutcome {
        let from = self.current;
        self.next_transition += 1;
        let id = TransitionId(self.next_transition);
        self.transition = Some(Transition {
            id,
            deadline: self.clock.now() + self.settle,
        });
        self.direction = direction;
        self.current = to;
        debug!(from, to, ?direction, "page turned");
        NavOutcome::Moved {
            from,
            to,
            direction,
            transition: id,
        }
    }
}
