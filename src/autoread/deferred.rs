//! Triggers that must run once the current document mutation has settled.
//!
//! The shell posts a trigger while it is still applying a key press, then
//! drains the queue after the edit is committed and before the next key is
//! handled.  Triggers come out in the order they were posted.

use std::collections::VecDeque;

use super::TriggerKind;

#[derive(Debug, Default)]
pub struct DeferredTriggers {
    pending: VecDeque<TriggerKind>,
}

impl DeferredTriggers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, kind: TriggerKind) {
        self.pending.push_back(kind);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return the oldest pending trigger.
    pub fn pop(&mut self) -> Option<TriggerKind> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_come_out_in_post_order() {
        let mut deferred = DeferredTriggers::new();
        deferred.post(TriggerKind::Return);
        deferred.post(TriggerKind::Space);
        assert_eq!(deferred.len(), 2);
        assert_eq!(deferred.pop(), Some(TriggerKind::Return));
        assert_eq!(deferred.pop(), Some(TriggerKind::Space));
        assert_eq!(deferred.pop(), None);
        assert!(deferred.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut deferred = DeferredTriggers::new();
        deferred.post(TriggerKind::Return);
        deferred.clear();
        assert!(deferred.is_empty());
    }
}
