//! Observer handles.

use std::time::Duration;

/// Default buffered notifications per observer before it is dropped.
pub const DEFAULT_OBSERVER_BUFFER: usize = 256;

/// Unique identifier for an observer registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// Handle owning one observer registration.
///
/// Values arrive in publish order. Release the registration through the
/// owning component's `unobserve`/`unsubscribe`; after release no further
/// values are delivered.
pub struct Observer<T> {
    pub id: ObserverId,
    /// Channel delivering published values.
    pub receiver: crossbeam_channel::Receiver<T>,
}

impl<T> Observer<T> {
    /// Receive the next value (blocking).
    pub fn recv(&self) -> Result<T, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a value (non-blocking).
    pub fn try_recv(&self) -> Result<T, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
