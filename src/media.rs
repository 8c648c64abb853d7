//! Video playback backends 🎬
//!
//! The karaoke core never decodes video itself; it hands the file to a
//! backend and waits for an "ended" or "failed" report on the media channel.
//! Every play call carries a generation number so reports about a video
//! that was already stopped or replaced can be recognised.

use crate::catalog::Song;
use crate::error::{KaraokeError, Result};
use std::process::Stdio;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    Ended { generation: u64 },
    Failed { generation: u64, reason: String },
}

/// The unified interface for anything that can show a karaoke video
pub trait MediaBackend: Send {
    fn name(&self) -> &'static str;
    fn play(&mut self, song: &Song, generation: u64) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn resume(&mut self) -> Result<()>;
    /// Stop whatever is showing. No event is reported for it afterwards.
    fn stop(&mut self);
}

/// No generation is ever 0
const NONE_ACTIVE: u64 = 0;
/// No child process
const NO_PID: u32 = 0;

/// Runs an external player (mpv, vlc, ...) per song
pub struct ExternalPlayer {
    command: String,
    args: Vec<String>,
    tx: mpsc::Sender<MediaEvent>,
    active: Arc<AtomicU64>,
    /// Cleared by the watcher once the child is reaped
    pid: Arc<AtomicU32>,
}

impl ExternalPlayer {
    pub fn new(command: &str, args: &[String], tx: mpsc::Sender<MediaEvent>) -> Self {
        Self {
            command: command.to_string(),
            args: args.to_vec(),
            tx,
            active: Arc::new(AtomicU64::new(NONE_ACTIVE)),
            pid: Arc::new(AtomicU32::new(NO_PID)),
        }
    }

    fn running_pid(&self) -> Option<u32> {
        Some(self.pid.load(Ordering::SeqCst)).filter(|pid| *pid != NO_PID)
    }

    fn signal(&self, pid: u32, sig: nix::sys::signal::Signal) -> Result<()> {
        nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), sig)
            .map_err(|e| KaraokeError::PlaybackFailed(format!("{sig:?}: {e}")))
    }

    fn signal_running(&self, sig: nix::sys::signal::Signal) -> Result<()> {
        let Some(pid) = self.running_pid() else {
            return Err(KaraokeError::PlaybackFailed("no video running".into()));
        };
        self.signal(pid, sig)
    }
}

impl MediaBackend for ExternalPlayer {
    fn name(&self) -> &'static str {
        "external"
    }

    fn play(&mut self, song: &Song, generation: u64) -> Result<()> {
        self.stop();

        if song.video_exists == Some(false) {
            return Err(KaraokeError::PlaybackFailed(format!(
                "video missing: {}",
                song.video_path.display()
            )));
        }

        let mut child = tokio::process::Command::new(&self.command)
            .args(&self.args)
            .arg(&song.video_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| KaraokeError::PlaybackFailed(format!("{}: {}", self.command, e)))?;

        let child_pid = child.id().unwrap_or(NO_PID);
        self.pid.store(child_pid, Ordering::SeqCst);
        self.active.store(generation, Ordering::SeqCst);
        info!(command = %self.command, song = song.id, generation, "video started");

        let tx = self.tx.clone();
        let active = self.active.clone();
        let pid = self.pid.clone();
        tokio::spawn(async move {
            let status = child.wait().await;
            // Reaped: the kernel may hand this pid to someone else now
            let _ = pid.compare_exchange(child_pid, NO_PID, Ordering::SeqCst, Ordering::SeqCst);
            if active.load(Ordering::SeqCst) != generation {
                // Stopped or replaced; nobody is waiting for this one
                return;
            }
            let event = match status {
                Ok(s) if s.success() => MediaEvent::Ended { generation },
                Ok(s) => MediaEvent::Failed {
                    generation,
                    reason: format!("player exited with {s}"),
                },
                Err(e) => MediaEvent::Failed {
                    generation,
                    reason: e.to_string(),
                },
            };
            let _ = tx.send(event).await;
        });
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.signal_running(nix::sys::signal::Signal::SIGSTOP)
    }

    fn resume(&mut self) -> Result<()> {
        self.signal_running(nix::sys::signal::Signal::SIGCONT)
    }

    fn stop(&mut self) {
        self.active.store(NONE_ACTIVE, Ordering::SeqCst);
        let pid = self.pid.swap(NO_PID, Ordering::SeqCst);
        if pid != NO_PID {
            // A stopped process ignores TERM until continued
            let _ = self.signal(pid, nix::sys::signal::Signal::SIGCONT);
            if let Err(e) = self.signal(pid, nix::sys::signal::Signal::SIGTERM) {
                debug!(error = %e, "player already gone");
            }
        }
    }
}

impl Drop for ExternalPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Plays nothing; reports the end after the song's duration (or a fallback
/// for catalogs without durations). Used with `--no-video` and in tests.
pub struct HeadlessPlayer {
    tx: mpsc::Sender<MediaEvent>,
    fallback: Duration,
    generation: u64,
    remaining: Duration,
    started: Option<Instant>,
    task: Option<JoinHandle<()>>,
}

impl HeadlessPlayer {
    pub fn new(tx: mpsc::Sender<MediaEvent>, fallback: Duration) -> Self {
        Self {
            tx,
            fallback,
            generation: NONE_ACTIVE,
            remaining: Duration::ZERO,
            started: None,
            task: None,
        }
    }

    fn arm(&mut self) {
        let tx = self.tx.clone();
        let generation = self.generation;
        let wait = self.remaining;
        self.started = Some(Instant::now());
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            let _ = tx.send(MediaEvent::Ended { generation }).await;
        }));
    }

    fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl MediaBackend for HeadlessPlayer {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn play(&mut self, song: &Song, generation: u64) -> Result<()> {
        self.stop();
        self.generation = generation;
        self.remaining = if song.duration > 0.0 {
            Duration::from_secs_f64(song.duration)
        } else {
            self.fallback
        };
        debug!(song = song.id, generation, secs = self.remaining.as_secs_f64(), "headless play");
        self.arm();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let Some(started) = self.started.take() else {
            return Err(KaraokeError::PlaybackFailed("not playing".into()));
        };
        self.disarm();
        self.remaining = self.remaining.saturating_sub(started.elapsed());
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if self.generation == NONE_ACTIVE || self.task.is_some() {
            return Err(KaraokeError::PlaybackFailed("nothing paused".into()));
        }
        self.arm();
        Ok(())
    }

    fn stop(&mut self) {
        self.disarm();
        self.started = None;
        self.generation = NONE_ACTIVE;
    }
}

/// Pick the backend for this run
pub fn build_backend(
    headless: bool,
    command: &str,
    args: &[String],
    fallback: Duration,
    tx: mpsc::Sender<MediaEvent>,
) -> Box<dyn MediaBackend> {
    if headless {
        Box::new(HeadlessPlayer::new(tx, fallback))
    } else {
        if command.trim().is_empty() {
            warn!("empty player command, falling back to headless playback");
            return Box::new(HeadlessPlayer::new(tx, fallback));
        }
        Box::new(ExternalPlayer::new(command, args, tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn song(duration: f64) -> Song {
        Song {
            id: 1,
            title: "T".into(),
            artist: "A".into(),
            duration,
            video_path: PathBuf::from("/dev/null"),
            video_exists: Some(true),
        }
    }

    #[tokio::test]
    async fn test_headless_reports_end() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut p = HeadlessPlayer::new(tx, Duration::from_millis(10));
        p.play(&song(0.0), 3).unwrap();
        assert_eq!(rx.recv().await, Some(MediaEvent::Ended { generation: 3 }));
    }

    #[tokio::test]
    async fn test_headless_stop_is_silent() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut p = HeadlessPlayer::new(tx, Duration::from_millis(10));
        p.play(&song(0.0), 1).unwrap();
        p.stop();
        let got = tokio::time::timeout(Duration::from_millis(60), rx.recv()).await;
        assert!(got.is_err());
    }

    #[tokio::test]
    async fn test_headless_pause_resume() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut p = HeadlessPlayer::new(tx, Duration::from_millis(30));
        p.play(&song(0.0), 5).unwrap();
        p.pause().unwrap();
        assert!(p.pause().is_err());
        let got = tokio::time::timeout(Duration::from_millis(60), rx.recv()).await;
        assert!(got.is_err(), "paused player ended");

        p.resume().unwrap();
        assert_eq!(rx.recv().await, Some(MediaEvent::Ended { generation: 5 }));
    }

    #[tokio::test]
    async fn test_external_missing_binary_fails() {
        let (tx, _rx) = mpsc::channel(4);
        let mut p = ExternalPlayer::new("definitely-not-a-player-xyz", &[], tx);
        let err = p.play(&song(0.0), 1).unwrap_err();
        assert!(matches!(err, KaraokeError::PlaybackFailed(_)));
    }

    #[tokio::test]
    async fn test_external_missing_video_fails() {
        let (tx, _rx) = mpsc::channel(4);
        let mut p = ExternalPlayer::new("true", &[], tx);
        let mut s = song(0.0);
        s.video_exists = Some(false);
        assert!(p.play(&s, 1).is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_external_exit_reports_end() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut p = ExternalPlayer::new("true", &[], tx);
        p.play(&song(0.0), 9).unwrap();
        let got = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert_eq!(got.ok().flatten(), Some(MediaEvent::Ended { generation: 9 }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_external_forgets_pid_once_reaped() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut p = ExternalPlayer::new("true", &[], tx);
        p.play(&song(0.0), 1).unwrap();
        let got = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert_eq!(got.ok().flatten(), Some(MediaEvent::Ended { generation: 1 }));

        assert_eq!(p.running_pid(), None);
        assert!(p.pause().is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_external_stop_clears_pid() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut p = ExternalPlayer::new("sleep", &[], tx);
        let mut s = song(0.0);
        s.video_path = PathBuf::from("30");
        p.play(&s, 2).unwrap();
        assert!(p.running_pid().is_some());

        p.stop();
        assert_eq!(p.running_pid(), None);
        let got = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(got.is_err(), "stopped player reported an event");
    }
}
