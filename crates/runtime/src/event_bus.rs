use std::collections::VecDeque;

/// A queued UI or engine callback, stamped with its arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<E> {
    pub seq: u64,
    pub payload: E,
}

/// Cooperative single-threaded event queue.
///
/// Callbacks are delivered strictly in arrival order and one at a time, so a
/// handler never observes another handler half-way through. Handlers may post
/// follow-up events (e.g. a deferred readiness notification); those run on a
/// later turn, after everything already queued.
#[derive(Debug)]
pub struct EventBus<E> {
    next_seq: u64,
    queue: VecDeque<Event<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            queue: VecDeque::new(),
        }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, payload: E) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push_back(Event { seq, payload });
        seq
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pop(&mut self) -> Option<Event<E>> {
        self.queue.pop_front()
    }

    /// Run queued events through `handler` until the queue is empty.
    ///
    /// The handler receives the bus so it can post follow-ups. Returns the
    /// number of events delivered.
    pub fn run_until_idle(&mut self, mut handler: impl FnMut(&mut Self, Event<E>)) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.pop() {
            tracing::trace!(seq = event.seq, "dispatch");
            handler(self, event);
            delivered += 1;
        }
        delivered
    }
}
