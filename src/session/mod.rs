pub mod coordinator;
pub mod performance;
pub mod playback;
pub mod queue;
pub mod scheduler;

pub use coordinator::{
    Enqueued, FolderStatus, NoticeLevel, SearchOutcome, Session, SessionConfig, SessionNotice,
    MAX_SEARCH_DIGITS,
};
pub use performance::{Evaluator, Performance};
pub use playback::{PlayerState, PlaybackMachine, Trigger, SKIP_COOLDOWN};
pub use queue::QueueManager;
pub use scheduler::{Scheduler, TimerFired, TimerKind};
