//! Resource operation context.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::JobsApi;

/// Context handed to every resource operation.
#[derive(Clone)]
pub struct ResourceContext {
    /// Correlation ID for tracing.
    pub correlation_id: String,

    /// Cancelling this token aborts the in-flight API call.
    pub cancel: CancellationToken,

    api: Arc<dyn JobsApi>,
}

impl ResourceContext {
    pub fn new(api: Arc<dyn JobsApi>) -> Self {
        Self {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            cancel: CancellationToken::new(),
            api,
        }
    }

    /// Use a caller-supplied cancellation token.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn api(&self) -> &dyn JobsApi {
        self.api.as_ref()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
