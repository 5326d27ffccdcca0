use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::models::order::OrderPayload;

#[derive(Error, Debug)]
pub enum OrderTransportError {
    #[error("Order request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Order endpoint rejected the submission with status {status}")]
    Rejected { status: u16 },
}

/// Transport boundary for order submission. The cart builds the payload;
/// how it travels (method, headers, encoding) lives behind this trait, and
/// the response body is never interpreted here. No retries: the cart state
/// is independent of submission outcome.
#[async_trait]
pub trait OrderTransport: Send + Sync {
    async fn submit(&self, payload: &OrderPayload) -> Result<(), OrderTransportError>;
}

/// JSON-over-HTTP implementation of [`OrderTransport`].
pub struct HttpOrderTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpOrderTransport {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl OrderTransport for HttpOrderTransport {
    async fn submit(&self, payload: &OrderPayload) -> Result<(), OrderTransportError> {
        debug!(
            "Submitting order with {} lines to {}",
            payload.lines.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrderTransportError::Rejected {
                status: status.as_u16(),
            });
        }

        info!(
            "Order submitted: {} items, grand total {}",
            payload.item_count, payload.grand_total
        );
        Ok(())
    }
}
