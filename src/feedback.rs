use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

use crate::page::{FeedbackKind, Page};

/// Transient status line with auto-dismiss.
///
/// At most one auto-hide is pending at a time: showing a new message aborts the
/// previous timer, so an old timer never hides a newer message. Timers are local
/// tasks, so `show` must run inside a `tokio::task::LocalSet`.
pub struct FeedbackChannel<P: Page + 'static> {
    page: Rc<P>,
    delay: Duration,
    pending: RefCell<Option<JoinHandle<()>>>,
}

impl<P: Page + 'static> FeedbackChannel<P> {
    pub fn new(page: Rc<P>, delay: Duration) -> Self {
        Self {
            page,
            delay,
            pending: RefCell::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn show(&self, text: &str, kind: FeedbackKind) {
        self.cancel_pending();
        self.page.set_message(text, kind);
        self.page.set_message_hidden(false);

        let page = Rc::clone(&self.page);
        let delay = self.delay;
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            trace!("feedback expired");
            page.set_message_hidden(true);
        });
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn success(&self, text: &str) {
        self.show(text, FeedbackKind::Success);
    }

    pub fn error(&self, text: &str) {
        self.show(text, FeedbackKind::Error);
    }

    /// Hides the message now and drops its timer.
    pub fn dismiss(&self) {
        self.cancel_pending();
        self.page.set_message_hidden(true);
    }

    /// Whether an auto-hide is still scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending
            .borrow()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            handle.abort();
        }
    }
}

impl<P: Page + 'static> Drop for FeedbackChannel<P> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
