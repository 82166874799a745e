/*!
 * Ordered model-name fallback.
 *
 * Some hosted services rename or retire model identifiers without notice. A
 * `FallbackChain` tries a fixed list of candidate names in order for a single
 * request and stops at the first one that answers.
 */

use std::future::Future;
use log::{debug, warn};

use crate::errors::ProviderError;

/// Ordered list of model identifiers to try for one request
#[derive(Debug, Clone)]
pub struct FallbackChain {
    candidates: Vec<String>,
}

impl FallbackChain {
    /// Create a chain; the first candidate is the preferred model
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// Run `attempt` against each candidate until one succeeds
    ///
    /// Candidates after the first success are never invoked. When every
    /// candidate fails the last error is reported inside `FallbackExhausted`.
    pub async fn run<F, Fut, T>(&self, mut attempt: F) -> Result<T, ProviderError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut last_error: Option<ProviderError> = None;

        for (position, model) in self.candidates.iter().enumerate() {
            debug!("Trying model {} ({}/{})", model, position + 1, self.candidates.len());
            match attempt(model.clone()).await {
                Ok(value) => {
                    if position > 0 {
                        debug!("Model {} answered after {} failed candidates", model, position);
                    }
                    return Ok(value);
                }
                Err(e) => {
                    warn!("Model {} failed: {}", model, e);
                    last_error = Some(e);
                }
            }
        }

        Err(ProviderError::FallbackExhausted {
            attempts: self.candidates.len(),
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no candidate models configured".to_string()),
        })
    }
}
