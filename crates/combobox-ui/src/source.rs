//! Option sources for the select widget.
//!
//! A source is either a literal list or a provider returning a future list.
//! The `OptionProvider` trait is runtime-independent and returns boxed
//! futures, so the caller decides where they run. Any zero-argument async
//! closure is a provider.
//!
//! ## Failure
//!
//! Resolution never fails from the widget's point of view: provider errors
//! and timeouts are logged and resolve to an empty list.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use combobox_core::{options_from_json, Options, SelectOption, SourceError};
use futures::future::BoxFuture;

// =============================================================================
// Provider Trait
// =============================================================================

/// Produces the option list asynchronously.
pub trait OptionProvider: Send + Sync {
    /// Fetch the full option list.
    fn fetch(&self) -> BoxFuture<'static, Result<Options, SourceError>>;
}

impl<F, Fut> OptionProvider for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Options, SourceError>> + Send + 'static,
{
    fn fetch(&self) -> BoxFuture<'static, Result<Options, SourceError>> {
        Box::pin(self())
    }
}

// =============================================================================
// Option Source
// =============================================================================

/// Where a select widget gets its options from.
///
/// Cloning is cheap. Two sources are the same source when they share the
/// same allocation; the widget only re-resolves when that identity changes.
#[derive(Clone)]
pub enum OptionSource {
    /// A literal option list.
    Static(Arc<[SelectOption]>),
    /// An asynchronous provider.
    Provider(Arc<dyn OptionProvider>),
}

impl OptionSource {
    /// Wrap a literal list.
    pub fn from_options(options: impl Into<Arc<[SelectOption]>>) -> Self {
        Self::Static(options.into())
    }

    /// Wrap a provider.
    pub fn provider(provider: impl OptionProvider + 'static) -> Self {
        Self::Provider(Arc::new(provider))
    }

    /// Check whether two sources are the same reference.
    pub fn same_as(&self, other: &OptionSource) -> bool {
        match (self, other) {
            (OptionSource::Static(a), OptionSource::Static(b)) => Arc::ptr_eq(a, b),
            (OptionSource::Provider(a), OptionSource::Provider(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }

    /// The options of a literal source, available without awaiting.
    pub fn immediate(&self) -> Option<Options> {
        match self {
            OptionSource::Static(options) => Some(options.to_vec()),
            OptionSource::Provider(_) => None,
        }
    }
}

impl fmt::Debug for OptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSource::Static(options) => f
                .debug_tuple("Static")
                .field(&format_args!("{} options", options.len()))
                .finish(),
            OptionSource::Provider(_) => f.write_str("Provider"),
        }
    }
}

impl From<Options> for OptionSource {
    fn from(options: Options) -> Self {
        Self::from_options(options)
    }
}

/// Resolve a source to its option list.
///
/// Errors and timeouts become an empty list.
pub async fn resolve(source: OptionSource, timeout: Duration) -> Options {
    let provider = match source {
        OptionSource::Static(options) => return options.to_vec(),
        OptionSource::Provider(provider) => provider,
    };

    let result = match tokio::time::timeout(timeout, provider.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout { duration: timeout }),
    };

    match result {
        Ok(options) => {
            tracing::debug!("Option source resolved with {} options", options.len());
            options
        }
        Err(e) => {
            tracing::warn!("{} - continuing with no options", e);
            Vec::new()
        }
    }
}

// =============================================================================
// JSON Provider
// =============================================================================

/// Serves options decoded from a JSON document after a simulated network
/// delay.
///
/// The document is decoded on every fetch, so a malformed body fails the
/// way a bad response would.
#[derive(Debug, Clone)]
pub struct JsonProvider {
    body: Arc<str>,
    delay: Duration,
}

impl JsonProvider {
    pub fn new(body: impl Into<Arc<str>>, delay: Duration) -> Self {
        Self {
            body: body.into(),
            delay,
        }
    }
}

impl OptionProvider for JsonProvider {
    fn fetch(&self) -> BoxFuture<'static, Result<Options, SourceError>> {
        let body = self.body.clone();
        let delay = self.delay;

        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Ok(options_from_json(&body)?)
        })
    }
}

// =============================================================================
// Mock Provider for Testing
// =============================================================================


// =============================================================================
// Tests
// =============================================================================
