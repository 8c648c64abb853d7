use super::performance::{Evaluator, Performance};
use super::playback::{PlayClock, PlaybackMachine, PlayerState, Trigger, SKIP_COOLDOWN};
use super::queue::QueueManager;
use super::scheduler::{Scheduler, TimerFired, TimerKind};
use crate::catalog::{LoadOutcome, Song, SongRepository};
use crate::error::KaraokeError;
use crate::media::{MediaBackend, MediaEvent};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Longest song number the remote can type
pub const MAX_SEARCH_DIGITS: usize = 5;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Time the rating stays up before the next song starts
    pub advance_delay: Duration,
    pub skip_cooldown: Duration,
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            advance_delay: Duration::from_secs(3),
            skip_cooldown: SKIP_COOLDOWN,
            poll_interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Something the UI should tell the user about, once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionNotice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Now waiting for confirmation
    Found(Song),
    NotFound(String),
    Empty,
}

/// Where a confirmed song went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    Started,
    Queued { position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    Disconnected,
    Ready,
    Failed,
}

/// Everything the screen talks to 🎤
///
/// Composes the song repository, queue, player state machine, evaluator
/// and timers. All methods run on the event loop; background tasks only
/// ever reach the session through `on_timer` and `on_media_event`.
pub struct Session {
    repo: SongRepository,
    queue: QueueManager,
    machine: PlaybackMachine,
    clock: PlayClock,
    evaluator: Evaluator,
    scheduler: Scheduler,
    media: Box<dyn MediaBackend>,
    config: SessionConfig,

    pending: Option<Song>,
    search_input: String,
    performance: Option<Performance>,
    notices: Vec<SessionNotice>,
    /// Permission problem that blocks the main flow until resolved
    blocking: Option<String>,
    last_catalog_failure: Option<String>,
    folder_status: FolderStatus,
    generation: u64,
}

impl Session {
    pub fn new(
        repo: SongRepository,
        media: Box<dyn MediaBackend>,
        scheduler: Scheduler,
        evaluator: Evaluator,
        config: SessionConfig,
    ) -> Self {
        Self {
            repo,
            queue: QueueManager::new(),
            machine: PlaybackMachine::with_skip_cooldown(config.skip_cooldown),
            clock: PlayClock::default(),
            evaluator,
            scheduler,
            media,
            config,
            pending: None,
            search_input: String::new(),
            performance: None,
            notices: Vec::new(),
            blocking: None,
            last_catalog_failure: None,
            folder_status: FolderStatus::Disconnected,
            generation: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════
    // Read access for the UI
    // ═══════════════════════════════════════════════════════════════

    pub fn state(&self) -> PlayerState {
        self.machine.state()
    }

    pub fn current(&self) -> Option<&Song> {
        self.queue.current()
    }

    pub fn queue(&self) -> &QueueManager {
        &self.queue
    }

    pub fn repository(&self) -> &SongRepository {
        &self.repo
    }

    pub fn pending(&self) -> Option<&Song> {
        self.pending.as_ref()
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// The rating to show, unless it was dismissed
    pub fn visible_performance(&self) -> Option<&Performance> {
        self.performance
            .as_ref()
            .filter(|_| !self.machine.was_skipped())
    }

    pub fn performance(&self) -> Option<&Performance> {
        self.performance.as_ref()
    }

    pub fn blocking_error(&self) -> Option<&str> {
        self.blocking.as_deref()
    }

    pub fn folder_status(&self) -> FolderStatus {
        self.folder_status
    }

    pub fn media_name(&self) -> &'static str {
        self.media.name()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.clock.elapsed(now)
    }

    pub fn skip_locked(&self, now: Instant) -> bool {
        self.machine.skip_locked(now)
    }

    pub fn pending_timer(&self, kind: TimerKind) -> Option<u64> {
        self.scheduler.pending(kind)
    }

    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Info => info!("{}", message),
            NoticeLevel::Warning => warn!("{}", message),
            NoticeLevel::Error => error!("{}", message),
        }
        self.notices.push(SessionNotice { level, message });
    }

    // ═══════════════════════════════════════════════════════════════
    // Remote input
    // ═══════════════════════════════════════════════════════════════

    /// Append a digit; ignored past `MAX_SEARCH_DIGITS` or for non-digits
    pub fn push_digit(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() || self.search_input.len() >= MAX_SEARCH_DIGITS {
            return false;
        }
        self.search_input.push(c);
        true
    }

    pub fn pop_digit(&mut self) -> bool {
        self.search_input.pop().is_some()
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
    }

    /// Look the typed number up. A hit becomes the pending song.
    pub fn submit_search(&mut self) -> SearchOutcome {
        if self.search_input.is_empty() {
            return SearchOutcome::Empty;
        }

        match self.repo.search(&self.search_input).cloned() {
            Some(song) => {
                debug!(id = song.id, "song found, awaiting confirmation");
                self.search_input.clear();
                self.pending = Some(song.clone());
                SearchOutcome::Found(song)
            }
            None => {
                let typed = self.search_input.clone();
                self.notify(NoticeLevel::Warning, format!("Song {} not found", typed));
                SearchOutcome::NotFound(typed)
            }
        }
    }

    /// Queue the pending song; `None` when nothing was pending
    pub fn confirm_pending(&mut self) -> Option<Enqueued> {
        let song = self.pending.take()?;
        if song.video_exists == Some(false) {
            self.notify(
                NoticeLevel::Warning,
                format!("Video for #{} is missing: {}", song.id, song.video_path.display()),
            );
        }

        let label = format!("#{} {}", song.id, song.title);
        if self.queue.enqueue(song) {
            self.start_current();
            return Some(Enqueued::Started);
        }
        let position = self.queue.queue().len();
        self.notify(
            NoticeLevel::Info,
            format!("Queued {} (position {})", label, position),
        );
        Some(Enqueued::Queued { position })
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Skip the current song. Ignored while a previous skip cools down.
    pub fn skip(&mut self, now: Instant) -> bool {
        if self.machine.skip_locked(now) {
            debug!("skip ignored, cooling down");
            return false;
        }

        if self.queue.current().is_some() {
            if self.machine.transition(Trigger::Skip).is_err() {
                // Already ended; the running end sequence advances anyway
                debug!(state = ?self.machine.state(), "skip ignored");
                return false;
            }
            self.lock_skip(now);
            self.media.stop();
            self.on_song_ended();
        } else {
            self.lock_skip(now);
            if self.queue.dequeue_next() {
                self.start_current();
            }
        }
        true
    }

    fn lock_skip(&mut self, now: Instant) {
        if self.machine.try_acquire_skip(now) {
            self.scheduler
                .schedule(TimerKind::SkipUnlock, self.config.skip_cooldown);
        }
    }

    pub fn toggle_pause(&mut self) {
        let now = Instant::now();
        match self.machine.state() {
            PlayerState::Playing => match self.media.pause() {
                Ok(()) => {
                    let _ = self.machine.transition(Trigger::Pause);
                    self.clock.pause(now);
                }
                Err(e) => self.notify(NoticeLevel::Warning, format!("Pause failed: {}", e)),
            },
            PlayerState::Paused => match self.media.resume() {
                Ok(()) => {
                    let _ = self.machine.transition(Trigger::Resume);
                    self.clock.resume(now);
                }
                Err(e) => self.notify(NoticeLevel::Warning, format!("Resume failed: {}", e)),
            },
            _ => {}
        }
    }

    /// Go back to the last song played
    pub fn play_previous(&mut self) -> bool {
        if !self.queue.play_previous() {
            self.notify(NoticeLevel::Info, "No previous song");
            return false;
        }
        self.scheduler.cancel(TimerKind::AutoAdvance);
        self.performance = None;
        self.machine.finish_end_sequence();
        self.media.stop();
        self.start_current();
        true
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Song> {
        let removed = self.queue.remove_at(index)?;
        self.notify(
            NoticeLevel::Info,
            format!("Removed #{} {}", removed.id, removed.title),
        );
        Some(removed)
    }

    /// Hide the rating early. Auto-advance still happens on schedule.
    pub fn dismiss_performance(&mut self) {
        if self.performance.is_some() {
            self.machine.mark_skipped();
        }
    }

    /// Try the current song again after a playback failure
    pub fn retry_playback(&mut self) -> bool {
        if self.machine.state() != PlayerState::Idle || self.queue.current().is_none() {
            return false;
        }
        self.start_current();
        true
    }

    // ═══════════════════════════════════════════════════════════════
    // Playback lifecycle
    // ═══════════════════════════════════════════════════════════════

    fn start_current(&mut self) {
        let Some(song) = self.queue.current().cloned() else {
            return;
        };
        self.generation += 1;
        if self.machine.state() == PlayerState::Idle {
            let _ = self.machine.transition(Trigger::Load);
        }
        let _ = self.machine.transition(Trigger::Start);

        match self.media.play(&song, self.generation) {
            Ok(()) => {
                self.clock.start(Instant::now());
                self.notify(
                    NoticeLevel::Info,
                    format!("Now singing #{} {} - {}", song.id, song.title, song.artist),
                );
            }
            Err(KaraokeError::PlaybackFailed(reason)) => self.playback_failed(reason),
            Err(e) => self.playback_failed(e.to_string()),
        }
    }

    /// Queue and current song stay put so the user can retry
    fn playback_failed(&mut self, reason: String) {
        if self.machine.transition(Trigger::Fail).is_ok() {
            self.clock.reset();
            self.notify(
                NoticeLevel::Error,
                KaraokeError::PlaybackFailed(reason).to_string(),
            );
        }
    }

    pub fn on_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Ended { generation } => self.on_media_ended(generation),
            MediaEvent::Failed { generation, reason } => self.on_media_failed(generation, reason),
        }
    }

    /// Natural end of the video
    pub fn on_media_ended(&mut self, generation: u64) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "stale end report");
            return;
        }
        if self.machine.transition(Trigger::MediaEnded).is_ok() {
            self.on_song_ended();
        }
    }

    pub fn on_media_failed(&mut self, generation: u64, reason: String) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "stale failure report");
            return;
        }
        self.playback_failed(reason);
    }

    /// Rate, then advance after the delay. Runs once per song even when a
    /// skip and a natural end race.
    fn on_song_ended(&mut self) {
        if !self.machine.begin_end_sequence() {
            return;
        }
        self.clock.pause(Instant::now());
        let rating = self.evaluator.rate();
        info!(score = rating.score, "performance rated");
        self.performance = Some(rating);
        self.scheduler
            .schedule(TimerKind::AutoAdvance, self.config.advance_delay);
    }

    fn advance(&mut self) {
        let has_next = self.queue.dequeue_next();
        self.performance = None;
        self.machine.finish_end_sequence();
        if has_next {
            self.start_current();
        } else {
            let _ = self.machine.transition(Trigger::Reset);
            self.clock.reset();
            self.notify(NoticeLevel::Info, "Queue finished, type a song number");
        }
    }

    pub fn on_timer(&mut self, fired: TimerFired) {
        if !self.scheduler.accept(fired) {
            debug!(?fired, "stale timer");
            return;
        }
        match fired.kind {
            TimerKind::AutoAdvance => self.advance(),
            TimerKind::SkipUnlock => self.machine.release_skip(),
            TimerKind::FolderPoll => {
                self.poll_folder();
                self.scheduler
                    .schedule(TimerKind::FolderPoll, self.config.poll_interval);
            }
        }
    }

    /// The rating delay is over
    pub fn on_advance_timer(&mut self, token: u64) {
        self.on_timer(TimerFired {
            kind: TimerKind::AutoAdvance,
            token,
        });
    }

    // ═══════════════════════════════════════════════════════════════
    // Catalog and folder
    // ═══════════════════════════════════════════════════════════════

    /// Initial load plus the periodic folder check
    pub fn start(&mut self) {
        self.poll_folder();
        self.scheduler
            .schedule(TimerKind::FolderPoll, self.config.poll_interval);
    }

    pub fn reload_catalog(&mut self) {
        let folder = self.repo.folder().to_path_buf();
        match self.repo.load() {
            Ok(LoadOutcome::Loaded { count, .. }) => {
                self.blocking = None;
                self.last_catalog_failure = None;
                self.folder_status = FolderStatus::Ready;
                self.notify(NoticeLevel::Info, format!("{} songs loaded", count));
            }
            Ok(LoadOutcome::Empty { source }) => {
                self.blocking = None;
                self.folder_status = FolderStatus::Ready;
                self.report_catalog_failure(
                    NoticeLevel::Warning,
                    format!("No valid songs in {}", source.display()),
                );
            }
            Err(e) if e.is_permission() => {
                self.folder_status = FolderStatus::Failed;
                let message = format!(
                    "Storage access denied for {}. Grant read permission to continue.",
                    folder.display()
                );
                if self.blocking.as_deref() != Some(message.as_str()) {
                    error!(error = %e, "catalog blocked by permissions");
                }
                self.blocking = Some(message);
            }
            Err(e) => {
                self.blocking = None;
                self.folder_status = FolderStatus::Failed;
                self.report_catalog_failure(NoticeLevel::Error, e.to_string());
            }
        }
    }

    /// Surface a catalog problem once; retries with the same outcome stay quiet
    fn report_catalog_failure(&mut self, level: NoticeLevel, message: String) {
        if self.last_catalog_failure.as_deref() == Some(message.as_str()) {
            debug!(%message, "repeated catalog failure suppressed");
            return;
        }
        self.last_catalog_failure = Some(message.clone());
        self.notify(level, message);
    }

    /// Detect the folder appearing or disappearing (removable storage)
    pub fn poll_folder(&mut self) {
        let present = self.repo.filesystem().exists(self.repo.folder());
        match (self.folder_status, present) {
            (FolderStatus::Ready, true) => {
                // Still mounted, but access may have been revoked
                if let Err(e) = self.repo.filesystem().check_access(self.repo.folder()) {
                    if e.is_permission() {
                        self.reload_catalog();
                    }
                }
            }
            (_, true) => self.reload_catalog(),
            (FolderStatus::Disconnected, false) => {}
            (_, false) => {
                self.repo.clear();
                self.folder_status = FolderStatus::Disconnected;
                self.last_catalog_failure = None;
                let folder = self.repo.folder().display().to_string();
                self.notify(NoticeLevel::Warning, format!("Karaoke folder {} removed", folder));
            }
        }
    }

    /// Switch to another karaoke folder and load it
    pub fn set_folder(&mut self, folder: impl Into<PathBuf>) {
        self.repo.set_folder(folder);
        self.folder_status = FolderStatus::Disconnected;
        self.last_catalog_failure = None;
        self.blocking = None;
        self.poll_folder();
        if self.folder_status == FolderStatus::Disconnected {
            let folder = self.repo.folder().display().to_string();
            self.notify(NoticeLevel::Warning, format!("Folder {} not found", folder));
        }
    }

    /// Cancel every timer and stop the video
    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
        self.media.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::storage::testing::RevocableFs;
    use crate::storage::{FileSystem, LocalFs};
    use std::fs;
    use std::sync::atomic::Ordering;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    const CATALOG: &str = "\
[1]\nArquivo= 1.mp4\nArtista= A\nMusica= One\n***\n\
[2]\nArquivo= 2.mp4\nArtista= B\nMusica= Two\n***\n\
[3]\nArquivo= 3.mp4\nArtista= C\nMusica= Three\n***\n";

    #[derive(Clone, Default)]
    struct Calls(Arc<Mutex<Vec<String>>>);

    impl Calls {
        fn log(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FakeMedia {
        calls: Calls,
        fail_next: Arc<Mutex<bool>>,
    }

    impl MediaBackend for FakeMedia {
        fn name(&self) -> &'static str {
            "fake"
        }
        fn play(&mut self, song: &Song, generation: u64) -> Result<()> {
            self.calls.0.lock().unwrap().push(format!("play {} g{}", song.id, generation));
            let mut fail = self.fail_next.lock().unwrap();
            if *fail {
                *fail = false;
                return Err(KaraokeError::PlaybackFailed("rejected".into()));
            }
            Ok(())
        }
        fn pause(&mut self) -> Result<()> {
            self.calls.0.lock().unwrap().push("pause".into());
            Ok(())
        }
        fn resume(&mut self) -> Result<()> {
            self.calls.0.lock().unwrap().push("resume".into());
            Ok(())
        }
        fn stop(&mut self) {
            self.calls.0.lock().unwrap().push("stop".into());
        }
    }

    struct Harness {
        _dir: TempDir,
        session: Session,
        calls: Calls,
        fail_next: Arc<Mutex<bool>>,
        _timer_rx: mpsc::Receiver<TimerFired>,
    }

    fn harness() -> Harness {
        harness_with(Arc::new(LocalFs))
    }

    fn harness_with(fs_impl: Arc<dyn FileSystem>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("karaoke.txt"), CATALOG).unwrap();
        for id in 1..=3 {
            fs::write(dir.path().join(format!("{id}.mp4")), "").unwrap();
        }

        let calls = Calls::default();
        let fail_next = Arc::new(Mutex::new(false));
        let media = FakeMedia {
            calls: calls.clone(),
            fail_next: fail_next.clone(),
        };
        let (timer_tx, timer_rx) = mpsc::channel(8);
        let repo = SongRepository::new(fs_impl, dir.path(), "karaoke.txt");
        let mut session = Session::new(
            repo,
            Box::new(media),
            Scheduler::new(timer_tx),
            Evaluator::seeded(1),
            SessionConfig::default(),
        );
        session.reload_catalog();
        session.take_notices();

        Harness {
            _dir: dir,
            session,
            calls,
            fail_next,
            _timer_rx: timer_rx,
        }
    }

    fn type_and_confirm(s: &mut Session, number: &str) -> Option<Enqueued> {
        for c in number.chars() {
            s.push_digit(c);
        }
        match s.submit_search() {
            SearchOutcome::Found(_) => s.confirm_pending(),
            _ => None,
        }
    }

    fn fire_advance(s: &mut Session) {
        let token = s.pending_timer(TimerKind::AutoAdvance).expect("advance scheduled");
        s.on_advance_timer(token);
    }

    #[test]
    fn test_search_input_limits() {
        let mut h = harness();
        let s = &mut h.session;
        for c in "1234567".chars() {
            s.push_digit(c);
        }
        assert_eq!(s.search_input(), "12345");
        assert!(!s.push_digit('x'));
        assert!(s.pop_digit());
        assert_eq!(s.search_input(), "1234");
    }

    #[test]
    fn test_search_miss_surfaces_not_found() {
        let mut h = harness();
        let s = &mut h.session;
        s.push_digit('4');
        s.push_digit('2');
        assert_eq!(s.submit_search(), SearchOutcome::NotFound("42".into()));
        assert!(s.pending().is_none());
        let notices = s.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert!(notices[0].message.contains("42"));
        assert_eq!(s.submit_search(), SearchOutcome::NotFound("42".into()));
        s.clear_search();
        assert_eq!(s.submit_search(), SearchOutcome::Empty);
    }

    #[test]
    fn test_cancel_pending() {
        let mut h = harness();
        let s = &mut h.session;
        s.push_digit('2');
        assert!(matches!(s.submit_search(), SearchOutcome::Found(ref song) if song.id == 2));
        assert_eq!(s.search_input(), "");
        s.cancel_pending();
        assert!(s.pending().is_none());
        assert_eq!(s.confirm_pending(), None);
        assert!(s.current().is_none());
    }

    #[tokio::test]
    async fn test_confirm_starts_then_queues() {
        let mut h = harness();
        let s = &mut h.session;
        assert_eq!(type_and_confirm(s, "1"), Some(Enqueued::Started));
        assert_eq!(s.state(), PlayerState::Playing);
        assert_eq!(s.current().map(|x| x.id), Some(1));

        assert_eq!(
            type_and_confirm(s, "2"),
            Some(Enqueued::Queued { position: 1 })
        );
        assert_eq!(s.queue().queue().len(), 1);
        assert_eq!(h.calls.log(), vec!["play 1 g1"]);
    }

    #[tokio::test]
    async fn test_natural_end_rates_then_advances() {
        let mut h = harness();
        let s = &mut h.session;
        type_and_confirm(s, "1");
        type_and_confirm(s, "3");

        s.on_media_event(MediaEvent::Ended { generation: 1 });
        assert_eq!(s.state(), PlayerState::Ended);
        let perf = *s.performance().expect("rated");
        assert!(perf.score <= 100);
        assert_eq!(s.current().map(|x| x.id), Some(1));

        fire_advance(s);
        assert!(s.performance().is_none());
        assert_eq!(s.state(), PlayerState::Playing);
        assert_eq!(s.current().map(|x| x.id), Some(3));
        assert_eq!(s.queue().previous().len(), 1);
        assert_eq!(h.calls.log(), vec!["play 1 g1", "play 3 g2"]);
    }

    #[tokio::test]
    async fn test_queue_exhaustion_returns_to_idle() {
        let mut h = harness();
        let s = &mut h.session;
        type_and_confirm(s, "1");
        s.on_media_event(MediaEvent::Ended { generation: 1 });
        fire_advance(s);
        assert_eq!(s.state(), PlayerState::Idle);
        assert!(s.current().is_none());
    }

    #[tokio::test]
    async fn test_double_skip_within_cooldown_is_noop() {
        let mut h = harness();
        let s = &mut h.session;
        type_and_confirm(s, "1");
        type_and_confirm(s, "2");
        type_and_confirm(s, "3");

        let t0 = Instant::now();
        assert!(s.skip(t0));
        assert_eq!(s.state(), PlayerState::Ended);
        let token = s.pending_timer(TimerKind::AutoAdvance);

        assert!(!s.skip(t0 + Duration::from_millis(1500)));
        assert_eq!(s.pending_timer(TimerKind::AutoAdvance), token);

        fire_advance(s);
        assert_eq!(s.current().map(|x| x.id), Some(2));
        assert_eq!(s.queue().queue().len(), 1);
    }

    #[tokio::test]
    async fn test_skip_racing_natural_end_evaluates_once() {
        let mut h = harness();
        let s = &mut h.session;
        type_and_confirm(s, "1");
        type_and_confirm(s, "2");

        s.on_media_event(MediaEvent::Ended { generation: 1 });
        let token = s.pending_timer(TimerKind::AutoAdvance);
        let first = *s.performance().unwrap();

        assert!(!s.skip(Instant::now()));
        assert_eq!(s.pending_timer(TimerKind::AutoAdvance), token);
        assert_eq!(*s.performance().unwrap(), first);

        fire_advance(s);
        assert_eq!(s.current().map(|x| x.id), Some(2));
    }

    #[tokio::test]
    async fn test_skip_after_failure_moves_on() {
        let mut h = harness();
        *h.fail_next.lock().unwrap() = true;
        let s = &mut h.session;
        type_and_confirm(s, "1");
        assert_eq!(s.state(), PlayerState::Idle);
        assert_eq!(
            type_and_confirm(s, "2"),
            Some(Enqueued::Queued { position: 1 })
        );

        assert!(s.skip(Instant::now()));
        assert_eq!(s.state(), PlayerState::Ended);
        fire_advance(s);
        assert_eq!(s.current().map(|x| x.id), Some(2));
        assert_eq!(s.state(), PlayerState::Playing);
    }

    #[tokio::test]
    async fn test_playback_failure_keeps_queue() {
        let mut h = harness();
        *h.fail_next.lock().unwrap() = true;
        let s = &mut h.session;
        assert_eq!(type_and_confirm(s, "1"), Some(Enqueued::Started));
        assert_eq!(s.state(), PlayerState::Idle);
        assert_eq!(s.current().map(|x| x.id), Some(1));
        let notices = s.take_notices();
        assert!(notices
            .iter()
            .any(|n| n.level == NoticeLevel::Error && n.message.contains("rejected")));

        assert!(s.retry_playback());
        assert_eq!(s.state(), PlayerState::Playing);
        assert!(!s.retry_playback());
    }

    #[tokio::test]
    async fn test_media_failure_event_reverts() {
        let mut h = harness();
        let s = &mut h.session;
        type_and_confirm(s, "2");
        type_and_confirm(s, "3");
        s.on_media_event(MediaEvent::Failed {
            generation: 1,
            reason: "codec".into(),
        });
        assert_eq!(s.state(), PlayerState::Idle);
        assert_eq!(s.current().map(|x| x.id), Some(2));
        assert_eq!(s.queue().queue().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_events_ignored() {
        let mut h = harness();
        let s = &mut h.session;
        type_and_confirm(s, "1");
        s.on_media_event(MediaEvent::Ended { generation: 99 });
        assert_eq!(s.state(), PlayerState::Playing);

        s.on_timer(TimerFired {
            kind: TimerKind::AutoAdvance,
            token: 12345,
        });
        assert_eq!(s.current().map(|x| x.id), Some(1));
    }

    #[tokio::test]
    async fn test_pause_resume_does_not_rate() {
        let mut h = harness();
        let s = &mut h.session;
        type_and_confirm(s, "1");
        s.toggle_pause();
        assert_eq!(s.state(), PlayerState::Paused);
        s.toggle_pause();
        assert_eq!(s.state(), PlayerState::Playing);
        assert!(s.performance().is_none());
        assert_eq!(h.calls.log(), vec!["play 1 g1", "pause", "resume"]);
    }

    #[tokio::test]
    async fn test_play_previous_during_rating_cancels_advance() {
        let mut h = harness();
        let s = &mut h.session;
        type_and_confirm(s, "1");
        type_and_confirm(s, "2");
        s.on_media_event(MediaEvent::Ended { generation: 1 });
        fire_advance(s);
        assert_eq!(s.current().map(|x| x.id), Some(2));

        s.on_media_event(MediaEvent::Ended { generation: 2 });
        assert!(s.pending_timer(TimerKind::AutoAdvance).is_some());
        assert!(s.play_previous());
        assert!(s.pending_timer(TimerKind::AutoAdvance).is_none());
        assert!(s.performance().is_none());
        assert_eq!(s.current().map(|x| x.id), Some(1));
        assert_eq!(s.queue().queue().front().map(|x| x.id), Some(2));
        assert_eq!(s.state(), PlayerState::Playing);
    }

    #[tokio::test]
    async fn test_dismiss_hides_rating_only() {
        let mut h = harness();
        let s = &mut h.session;
        type_and_confirm(s, "1");
        s.on_media_event(MediaEvent::Ended { generation: 1 });
        assert!(s.visible_performance().is_some());
        s.dismiss_performance();
        assert!(s.visible_performance().is_none());
        assert!(s.pending_timer(TimerKind::AutoAdvance).is_some());
    }

    #[test]
    fn test_catalog_failures_deduplicated() {
        let mut h = harness();
        fs::remove_file(h._dir.path().join("karaoke.txt")).unwrap();
        let s = &mut h.session;
        s.reload_catalog();
        s.reload_catalog();
        s.reload_catalog();
        let errors: Vec<_> = s
            .take_notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(s.folder_status(), FolderStatus::Failed);
    }

    #[test]
    fn test_folder_removal_and_return() {
        let mut h = harness();
        let folder = h._dir.path().to_path_buf();
        let s = &mut h.session;
        assert_eq!(s.folder_status(), FolderStatus::Ready);

        let moved = folder.with_extension("away");
        fs::rename(&folder, &moved).unwrap();
        s.poll_folder();
        assert_eq!(s.folder_status(), FolderStatus::Disconnected);
        assert!(s.repository().is_empty());

        fs::rename(&moved, &folder).unwrap();
        s.poll_folder();
        assert_eq!(s.folder_status(), FolderStatus::Ready);
        assert_eq!(s.repository().len(), 3);
    }

    #[test]
    fn test_permission_denied_blocks_until_access_returns() {
        let fs_impl = RevocableFs::default();
        let mut h = harness_with(Arc::new(fs_impl.clone()));
        let s = &mut h.session;
        assert_eq!(s.folder_status(), FolderStatus::Ready);
        assert!(s.blocking_error().is_none());

        fs_impl.denied.store(true, Ordering::SeqCst);
        s.poll_folder();
        let message = s.blocking_error().expect("modal up").to_string();
        assert!(message.contains("Grant read permission"));
        assert_eq!(s.folder_status(), FolderStatus::Failed);
        s.take_notices();

        // Still locked: the modal stays, nothing new is announced
        s.poll_folder();
        s.poll_folder();
        s.reload_catalog();
        assert!(s.take_notices().is_empty());
        assert_eq!(s.blocking_error(), Some(message.as_str()));

        fs_impl.denied.store(false, Ordering::SeqCst);
        s.poll_folder();
        assert!(s.blocking_error().is_none());
        assert_eq!(s.folder_status(), FolderStatus::Ready);
        assert_eq!(s.repository().len(), 3);
        let notices = s.take_notices();
        assert!(notices.iter().any(|n| n.message == "3 songs loaded"));
    }

    #[tokio::test]
    async fn test_skip_rejected_while_ended_keeps_lock_free() {
        let mut h = harness();
        let s = &mut h.session;
        type_and_confirm(s, "1");
        type_and_confirm(s, "2");
        s.on_media_event(MediaEvent::Ended { generation: 1 });
        assert_eq!(s.state(), PlayerState::Ended);

        let now = Instant::now();
        assert!(!s.skip(now));
        assert!(!s.skip_locked(now));
        assert!(s.pending_timer(TimerKind::SkipUnlock).is_none());
        assert!(s.pending_timer(TimerKind::AutoAdvance).is_some());
    }
}
