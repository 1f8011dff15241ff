//! FIFO speech sink.
//!
//! Sentences are spoken strictly in the order they were enqueued, one at a
//! time. The queue does no synthesis itself; a front end (the CLI prints
//! them) drains it between ticks.

use std::collections::VecDeque;

use tracing::debug;

use crate::session::collaborators::SpeechSink;

#[derive(Debug, Default, Clone)]
pub struct SpeechQueue {
    pending: VecDeque<String>,
}

impl SpeechQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sentence to speak, if any.
    #[inline]
    pub fn pop_next(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn drain(&mut self) -> Vec<String> {
        self.pending.drain(..).collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl SpeechSink for SpeechQueue {
    fn enqueue(&mut self, sentence: String) {
        debug!("[SPEECH] queued: {sentence}");
        self.pending.push_back(sentence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentences_come_out_in_order() {
        let mut queue = SpeechQueue::new();
        queue.enqueue("first".to_owned());
        queue.enqueue("second".to_owned());
        queue.enqueue("third".to_owned());

        assert_eq!(queue.pop_next().as_deref(), Some("first"));
        assert_eq!(queue.drain(), vec!["second", "third"]);
        assert!(queue.is_empty());
        assert_eq!(queue.pop_next(), None);
    }
}
