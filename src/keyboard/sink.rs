//! Trait abstraction for key injection to enable testing

use std::io;

use crate::mapper::OutputKey;

/// Trait for key injection operations
///
/// The mapper drives this seam with exactly one press+release pair per
/// fired action. Implementations are expected to be synchronous and
/// non-blocking.
pub trait KeySink {
    /// Press the given key on the output device
    fn press(&mut self, key: OutputKey) -> io::Result<()>;

    /// Release the given key on the output device
    fn release(&mut self, key: OutputKey) -> io::Result<()>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    /// One recorded sink invocation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SinkCall {
        Press(OutputKey),
        Release(OutputKey),
    }

    /// Mock key sink for testing
    ///
    /// Records every call with a `tokio::time::Instant` so gate-timing
    /// properties can be asserted under a paused test clock. Clones share
    /// the same recording, so tests keep a handle after moving the sink
    /// into a mapper.
    #[derive(Debug, Clone)]
    pub struct MockKeySink {
        calls: Arc<Mutex<Vec<(SinkCall, Instant)>>>,
        press_error: Arc<Mutex<Option<io::ErrorKind>>>,
        release_error: Arc<Mutex<Option<io::ErrorKind>>>,
    }

    impl MockKeySink {
        pub fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                press_error: Arc::new(Mutex::new(None)),
                release_error: Arc::new(Mutex::new(None)),
            }
        }

        /// Returns the recorded calls in invocation order.
        pub fn calls(&self) -> Vec<SinkCall> {
            self.calls.lock().unwrap().iter().map(|(call, _)| *call).collect()
        }

        /// Returns the instant each call was recorded at.
        pub fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
        }

        /// Makes subsequent `press` calls fail with the given error kind.
        pub fn set_press_error(&self, error: io::ErrorKind) {
            *self.press_error.lock().unwrap() = Some(error);
        }

        /// Makes subsequent `release` calls fail with the given error kind.
        pub fn set_release_error(&self, error: io::ErrorKind) {
            *self.release_error.lock().unwrap() = Some(error);
        }

        /// Clears any configured errors; subsequent calls succeed again.
        pub fn clear_errors(&self) {
            *self.press_error.lock().unwrap() = None;
            *self.release_error.lock().unwrap() = None;
        }
    }

    impl Default for MockKeySink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl KeySink for MockKeySink {
        fn press(&mut self, key: OutputKey) -> io::Result<()> {
            if let Some(error) = *self.press_error.lock().unwrap() {
                return Err(io::Error::new(error, "Mock press error"));
            }
            self.calls
                .lock()
                .unwrap()
                .push((SinkCall::Press(key), Instant::now()));
            Ok(())
        }

        fn release(&mut self, key: OutputKey) -> io::Result<()> {
            if let Some(error) = *self.release_error.lock().unwrap() {
                return Err(io::Error::new(error, "Mock release error"));
            }
            self.calls
                .lock()
                .unwrap()
                .push((SinkCall::Release(key), Instant::now()));
            Ok(())
        }
    }
}
