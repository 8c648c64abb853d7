use crate::catalog::Song;
use std::collections::VecDeque;

/// Pending songs, the one on screen, and the history behind it 📋
///
/// The current song is never also in `queue`; the queue keeps insertion
/// order through removals.
#[derive(Debug, Default, Clone)]
pub struct QueueManager {
    queue: VecDeque<Song>,
    current: Option<Song>,
    previous: Vec<Song>,
}

impl QueueManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the song went straight to "current" (nothing was
    /// playing), `false` when it was appended to the queue.
    pub fn enqueue(&mut self, song: Song) -> bool {
        if self.current.is_none() {
            self.current = Some(song);
            true
        } else {
            self.queue.push_back(song);
            false
        }
    }

    /// Move on to the head of the queue. The outgoing song goes to history.
    /// Returns `false` once the queue is exhausted (current becomes `None`).
    pub fn dequeue_next(&mut self) -> bool {
        if let Some(done) = self.current.take() {
            self.previous.push(done);
        }
        self.current = self.queue.pop_front();
        self.current.is_some()
    }

    /// Drop the queue entry at `index`; `None` when out of range
    pub fn remove_at(&mut self, index: usize) -> Option<Song> {
        self.queue.remove(index)
    }

    /// Step back in history. The song that was current returns to the front
    /// of the queue, not to history.
    pub fn play_previous(&mut self) -> bool {
        let Some(prev) = self.previous.pop() else {
            return false;
        };
        if let Some(current) = self.current.take() {
            self.queue.push_front(current);
        }
        self.current = Some(prev);
        true
    }

    pub fn current(&self) -> Option<&Song> {
        self.current.as_ref()
    }

    pub fn queue(&self) -> &VecDeque<Song> {
        &self.queue
    }

    pub fn previous(&self) -> &[Song] {
        &self.previous
    }

    pub fn has_previous(&self) -> bool {
        !self.previous.is_empty()
    }
}
