use tokio::sync::watch;

use crate::session::Identity;

/// In-memory holder of the current session, broadcast to observers.
///
/// The publisher is authoritative for the running process; persistence is a
/// best-effort cache layered behind it.
#[derive(Debug)]
pub(crate) struct SessionPublisher {
    sender: watch::Sender<Option<Identity>>,
}

impl SessionPublisher {
    pub(crate) fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// The current session value.
    pub(crate) fn current(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    /// A receiver observing every subsequent session change.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }

    /// Replace the current value, waking all subscribers.
    pub(crate) fn publish(&self, identity: Option<Identity>) {
        self.sender.send_replace(identity);
    }
}
