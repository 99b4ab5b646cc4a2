use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
};

use futures_util::future::{AbortHandle, Abortable};
use log::debug;

use crate::error::QuizError;

#[derive(Default)]
struct ControlState {
    in_flight: AtomicBool,
    disposed: AtomicBool,
    abort: Mutex<Option<AbortHandle>>,
}

/// Shared between a form and whatever renders it. While a mutating request
/// runs the control reads as disabled; after `dispose` any response still on
/// its way is dropped instead of applied.
#[derive(Clone, Default)]
pub struct RequestControl {
    state: Arc<ControlState>,
}

impl RequestControl {
    pub fn new() -> RequestControl {
        RequestControl::default()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_disposed(&self) -> bool {
        self.state.disposed.load(Ordering::SeqCst)
    }

    pub fn dispose(&self) {
        self.state.disposed.store(true, Ordering::SeqCst);
        if let Some(handle) = self.abort_slot().take() {
            debug!("Aborting in-flight request on dispose");
            handle.abort();
        }
    }

    fn abort_slot(&self) -> std::sync::MutexGuard<'_, Option<AbortHandle>> {
        self.state.abort.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Result<InFlight<'_>, QuizError> {
        if self.is_disposed() {
            return Err(QuizError::Disposed);
        }
        if self.state.in_flight.swap(true, Ordering::SeqCst) {
            return Err(QuizError::Busy);
        }
        Ok(InFlight { control: self })
    }

    /// Runs one request with the control disabled for its whole duration.
    pub async fn run<T, F>(&self, request: F) -> Result<T, QuizError>
    where
        F: Future<Output = Result<T, QuizError>>,
    {
        let _in_flight = self.begin()?;

        let (handle, registration) = AbortHandle::new_pair();
        *self.abort_slot() = Some(handle);

        let outcome = Abortable::new(request, registration).await;
        match outcome {
            Ok(_) if self.is_disposed() => Err(QuizError::Disposed),
            Ok(result) => result,
            Err(_aborted) => Err(QuizError::Disposed),
        }
    }
}

struct InFlight<'a> {
    control: &'a RequestControl,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.control.abort_slot().take();
        self.control.state.in_flight.store(false, Ordering::SeqCst);
    }
}
