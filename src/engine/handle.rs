//! EngineHandle: cloneable, thread-safe front for a [`RecognitionEngine`].
//!
//! Every call takes the engine mutex for its whole duration, so the counter
//! updates and history push of one recognition are never interleaved with
//! another. Each result is also fanned out on a broadcast channel.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::debug;

use crate::config::AppConfig;
use crate::engine::core::{RecognitionEngine, RecognitionResult};
use crate::engine::stats::PerformanceReport;
use crate::error::{log_engine_error, EngineError};

/// Buffered results per subscriber before lagging receivers drop the oldest
pub const RESULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct EngineHandle {
    engine: Arc<Mutex<RecognitionEngine>>,
    results_tx: broadcast::Sender<RecognitionResult>,
}

impl EngineHandle {
    /// Build a fresh engine from configuration
    pub fn new(config: AppConfig) -> Result<Self, EngineError> {
        Ok(Self::from_engine(RecognitionEngine::new(config)?))
    }

    /// Wrap an existing engine
    pub fn from_engine(engine: RecognitionEngine) -> Self {
        let (results_tx, _) = broadcast::channel(RESULT_CHANNEL_CAPACITY);
        Self {
            engine: Arc::new(Mutex::new(engine)),
            results_tx,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, RecognitionEngine>, EngineError> {
        self.engine.lock().map_err(|_| {
            let err = EngineError::LockPoisoned {
                component: "RecognitionEngine".to_string(),
            };
            log_engine_error(&err, "EngineHandle::lock");
            err
        })
    }

    /// Start listening with a style preference
    pub fn start(&self, style: &str) -> Result<bool, EngineError> {
        Ok(self.lock()?.start(style))
    }

    pub fn stop(&self) -> Result<(), EngineError> {
        self.lock()?.stop();
        Ok(())
    }

    pub fn is_listening(&self) -> Result<bool, EngineError> {
        Ok(self.lock()?.is_listening())
    }

    /// Recognize one clip and publish the result to subscribers
    pub fn recognize(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<RecognitionResult, EngineError> {
        let result = self
            .lock()?
            .recognize_samples(samples, sample_rate)
            .map_err(|source| {
                let err = EngineError::from(source);
                log_engine_error(&err, "EngineHandle::recognize");
                err
            })?;

        if self.results_tx.send(result.clone()).is_err() {
            debug!("no result subscribers");
        }
        Ok(result)
    }

    pub fn get_performance_report(&self) -> Result<PerformanceReport, EngineError> {
        Ok(self.lock()?.performance_report())
    }

    /// Receive every subsequent recognition result
    pub fn subscribe(&self) -> broadcast::Receiver<RecognitionResult> {
        self.results_tx.subscribe()
    }
}
