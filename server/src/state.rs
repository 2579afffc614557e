//! Shared application state.
//!
//! `AppState` is cloned into every Axum handler via the `State` extractor.
//! Everything inside is either immutable after startup or an atomic.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::StreamConfig;
use crate::token::TokenSigner;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StreamConfig>,
    pub signer: Arc<TokenSigner>,
    active_streams: Arc<AtomicUsize>,
}

impl AppState {
    #[must_use]
    pub fn new(config: StreamConfig) -> Self {
        let signer = TokenSigner::new(&config.jwt_secret, config.jwt_expire_minutes);
        Self { config: Arc::new(config), signer: Arc::new(signer), active_streams: Arc::new(AtomicUsize::new(0)) }
    }

    /// Number of stream sockets currently sending frames.
    #[must_use]
    pub fn active_streams(&self) -> usize {
        self.active_streams.load(Ordering::SeqCst)
    }

    /// Count a stream as active until the returned guard is dropped.
    #[must_use]
    pub fn enter_stream(&self) -> ActiveStream {
        self.active_streams.fetch_add(1, Ordering::SeqCst);
        ActiveStream { counter: Arc::clone(&self.active_streams) }
    }
}

pub struct ActiveStream {
    counter: Arc<AtomicUsize>,
}

impl Drop for ActiveStream {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
