use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lets another thread abandon in-flight verifications.
///
/// Cloning shares the same state. [`cancel`](Self::cancel) shuts down every
/// socket currently registered, so a probe blocked in a read wakes up at once
/// instead of waiting for its timeout. Once fired a handle stays cancelled;
/// use a fresh one per registration request.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    inner: Arc<CancelState>,
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    next_id: AtomicU64,
    active: Mutex<Vec<(u64, TcpStream)>>,
}

/// Ticket returned by [`CancelHandle::register`]; releases exactly the socket
/// it registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Registration(u64);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        for (_, stream) in self.active().iter() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn register(&self, stream: &TcpStream) -> Registration {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let mut active = self.active();
        if let Ok(clone) = stream.try_clone() {
            active.push((id, clone));
        }
        // cancel() may have run between connect and registration
        if self.is_cancelled() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        Registration(id)
    }

    pub(crate) fn release(&self, registration: Registration) {
        self.active().retain(|(id, _)| *id != registration.0);
    }

    #[cfg(test)]
    fn registered(&self) -> usize {
        self.active().len()
    }

    fn active(&self) -> MutexGuard<'_, Vec<(u64, TcpStream)>> {
        self.inner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
