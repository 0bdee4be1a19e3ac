use std::sync::Arc;
use tokio::sync::watch;

/// A token that can be used to signal cancellation across async tasks.
#[derive(Debug)]
pub struct CancellationToken {
    receiver: watch::Receiver<bool>,
}

/// A clonable handle that can check for cancellation.
#[derive(Clone)]
pub struct CancellationListener {
    receiver: Arc<watch::Receiver<bool>>,
}

/// Handle to trigger cancellation.
pub struct CancellationHandle {
    sender: watch::Sender<bool>,
}

impl CancellationToken {
    /// Creates a new cancellation token and its handle.
    pub fn new() -> (Self, CancellationHandle) {
        let (tx, rx) = watch::channel(false);
        (Self { receiver: rx }, CancellationHandle { sender: tx })
    }

    /// Checks whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Creates a listener that can be cloned and shared across tasks.
    pub fn listener(&self) -> CancellationListener {
        CancellationListener {
            receiver: Arc::new(self.receiver.clone()),
        }
    }
}

impl CancellationListener {
    /// Checks whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }
}

impl CancellationHandle {
    /// Signals cancellation to every token/listener derived from this handle.
    pub fn cancel(&self) {
        let _ = self.sender.send(true);
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new().0
    }
}
