use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a skip blocks further skips. Covers the auto-advance delay.
pub const SKIP_COOLDOWN: Duration = Duration::from_millis(3500);

/// Player lifecycle. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Playing,
    Paused,
    Loading,
    Ended,
}

impl PlayerState {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerState::Idle => "Idle",
            PlayerState::Playing => "Playing",
            PlayerState::Paused => "Paused",
            PlayerState::Loading => "Loading",
            PlayerState::Ended => "Ended",
        }
    }
}

/// What asks the player to change state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A song was selected and confirmed, or auto-advance picked the next one
    Start,
    Load,
    Pause,
    Resume,
    /// Natural end of the video
    MediaEnded,
    Skip,
    /// The media backend refused to play
    Fail,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: PlayerState,
    pub trigger: Trigger,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not allowed while {:?}", self.trigger, self.from)
    }
}

impl std::error::Error for InvalidTransition {}

/// The transition table
fn next_state(from: PlayerState, trigger: Trigger) -> Option<PlayerState> {
    use PlayerState::*;
    use Trigger::*;

    match (from, trigger) {
        (_, Reset) => Some(Idle),
        (Idle, Load) => Some(Loading),
        (_, Start) => Some(Playing),
        (Playing, Pause) => Some(Paused),
        (Paused, Resume) => Some(Playing),
        (Playing | Paused | Loading, MediaEnded) => Some(Ended),
        (Idle | Playing | Paused | Loading, Skip) => Some(Ended),
        (Playing | Paused | Loading, Fail) => Some(Idle),
        _ => None,
    }
}

/// Player lifecycle plus the guards that keep a natural end and a skip
/// arriving close together from evaluating or advancing twice.
#[derive(Debug)]
pub struct PlaybackMachine {
    state: PlayerState,
    processing_end: bool,
    skip_cooldown: Duration,
    skip_locked_until: Option<Instant>,
    was_skipped: bool,
}

impl Default for PlaybackMachine {
    fn default() -> Self {
        Self::with_skip_cooldown(SKIP_COOLDOWN)
    }
}

impl PlaybackMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_cooldown(skip_cooldown: Duration) -> Self {
        Self {
            state: PlayerState::Idle,
            processing_end: false,
            skip_cooldown,
            skip_locked_until: None,
            was_skipped: false,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn transition(&mut self, trigger: Trigger) -> Result<PlayerState, InvalidTransition> {
        let from = self.state;
        let to = next_state(from, trigger).ok_or(InvalidTransition { from, trigger })?;

        debug!(?from, ?trigger, ?to, "player transition");
        self.state = to;
        if to == PlayerState::Playing {
            self.was_skipped = false;
        }
        Ok(to)
    }

    /// Take the skip lock. `false` while a previous skip is still cooling down.
    pub fn try_acquire_skip(&mut self, now: Instant) -> bool {
        if self.skip_locked(now) {
            return false;
        }
        self.skip_locked_until = Some(now + self.skip_cooldown);
        true
    }

    pub fn skip_locked(&self, now: Instant) -> bool {
        self.skip_locked_until.is_some_and(|until| now < until)
    }

    pub fn release_skip(&mut self) {
        self.skip_locked_until = None;
    }

    /// Enter the end-of-song sequence; `false` if one is already running
    pub fn begin_end_sequence(&mut self) -> bool {
        if self.processing_end {
            return false;
        }
        self.processing_end = true;
        true
    }

    pub fn finish_end_sequence(&mut self) {
        self.processing_end = false;
    }

    /// Set when the rating overlay was dismissed; cleared on the next start
    pub fn was_skipped(&self) -> bool {
        self.was_skipped
    }

    pub fn mark_skipped(&mut self) {
        self.was_skipped = true;
    }
}

/// Position in the current video, measured on the wall clock.
/// External players do not report progress back.
#[derive(Debug, Default, Clone)]
pub struct PlayClock {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl PlayClock {
    pub fn start(&mut self, now: Instant) {
        self.accumulated = Duration::ZERO;
        self.running_since = Some(now);
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running_since = None;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .running_since
                .map(|since| now.saturating_duration_since(since))
                .unwrap_or_default()
    }
}
