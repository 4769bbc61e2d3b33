//! Single-active dialog guard with a FIFO waiting line.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Identifier assigned to every opened dialog.
pub struct DialogId(pub u64);

#[derive(Debug)]
/// Tracks the dialog currently on screen and the dialogs waiting behind it.
pub struct DialogQueue<T> {
    active: Option<DialogId>,
    waiting: VecDeque<(DialogId, T)>,
}

impl<T> Default for DialogQueue<T> {
    fn default() -> Self {
        Self {
            active: None,
            waiting: VecDeque::new(),
        }
    }
}

impl<T> DialogQueue<T> {
    /// Admits a dialog. Returns it back when it may be presented immediately; otherwise it is
    /// queued behind every earlier dialog.
    pub fn admit(&mut self, id: DialogId, item: T) -> Option<T> {
        if self.active.is_none() && self.waiting.is_empty() {
            self.active = Some(id);
            return Some(item);
        }
        self.waiting.push_back((id, item));
        None
    }

    /// Marks `id` as fully closed. Returns `false` when `id` was not the active dialog.
    pub fn release(&mut self, id: DialogId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Promotes the oldest waiting dialog when nothing is active.
    pub fn advance(&mut self) -> Option<(DialogId, T)> {
        if self.active.is_some() {
            return None;
        }
        let next = self.waiting.pop_front()?;
        self.active = Some(next.0);
        Some(next)
    }

    /// Dialog currently on screen.
    pub fn active(&self) -> Option<DialogId> {
        self.active
    }

    /// Number of dialogs waiting.
    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn second_dialog_waits_until_the_first_is_released() {
        let mut queue = DialogQueue::default();

        assert_eq!(queue.admit(DialogId(1), "first"), Some("first"));
        assert_eq!(queue.admit(DialogId(2), "second"), None);
        assert_eq!(queue.advance(), None);

        assert!(queue.release(DialogId(1)));
        assert_eq!(queue.advance(), Some((DialogId(2), "second")));
        assert_eq!(queue.active(), Some(DialogId(2)));
    }

    #[test]
    fn waiting_dialogs_are_presented_in_arrival_order() {
        let mut queue = DialogQueue::default();
        queue.admit(DialogId(1), 'a');
        queue.admit(DialogId(2), 'b');
        queue.admit(DialogId(3), 'c');

        queue.release(DialogId(1));
        assert_eq!(queue.advance().map(|(id, _)| id), Some(DialogId(2)));
        queue.release(DialogId(2));
        assert_eq!(queue.advance().map(|(id, _)| id), Some(DialogId(3)));
        assert_eq!(queue.waiting(), 0);
    }

    #[test]
    fn admission_behind_an_idle_but_nonempty_line_still_queues() {
        let mut queue = DialogQueue::default();
        queue.admit(DialogId(1), 1);
        queue.admit(DialogId(2), 2);
        queue.release(DialogId(1));

        assert_eq!(queue.admit(DialogId(3), 3), None);
        assert_eq!(queue.advance(), Some((DialogId(2), 2)));
    }

    #[test]
    fn releasing_a_stranger_changes_nothing() {
        let mut queue: DialogQueue<()> = DialogQueue::default();
        queue.admit(DialogId(1), ());

        assert!(!queue.release(DialogId(9)));
        assert_eq!(queue.active(), Some(DialogId(1)));
    }
}
