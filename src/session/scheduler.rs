use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Evaluation delay before the next song starts
    AutoAdvance,
    /// End of the skip cool-down
    SkipUnlock,
    /// Periodic check of the karaoke folder
    FolderPoll,
}

/// Sent on the timer channel when a scheduled task elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub kind: TimerKind,
    pub token: u64,
}

/// One-shot timers that can be cancelled ⏱️
///
/// At most one task per kind; scheduling a kind again aborts the previous
/// task. Firings carry a token so a firing that raced a cancel can be
/// recognised and dropped. Everything is aborted on drop.
pub struct Scheduler {
    tx: mpsc::Sender<TimerFired>,
    next_token: u64,
    tasks: HashMap<TimerKind, (u64, JoinHandle<()>)>,
}

impl Scheduler {
    pub fn new(tx: mpsc::Sender<TimerFired>) -> Self {
        Self {
            tx,
            next_token: 0,
            tasks: HashMap::new(),
        }
    }

    /// Must be called from inside a tokio runtime
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) -> u64 {
        self.cancel(kind);
        self.next_token += 1;
        let token = self.next_token;
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TimerFired { kind, token }).await;
        });
        debug!(?kind, token, delay_ms = delay.as_millis() as u64, "timer scheduled");
        self.tasks.insert(kind, (token, handle));
        token
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        if let Some((token, handle)) = self.tasks.remove(&kind) {
            handle.abort();
            debug!(?kind, token, "timer cancelled");
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, (_, handle)) in self.tasks.drain() {
            handle.abort();
        }
    }

    pub fn pending(&self, kind: TimerKind) -> Option<u64> {
        self.tasks.get(&kind).map(|(token, _)| *token)
    }

    /// Accept a firing if it belongs to the live task of its kind,
    /// forgetting that task. Stale firings return `false`.
    pub fn accept(&mut self, fired: TimerFired) -> bool {
        match self.tasks.get(&fired.kind) {
            Some((token, _)) if *token == fired.token => {
                self.tasks.remove(&fired.kind);
                true
            }
            _ => false,
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
