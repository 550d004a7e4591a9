use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{SheetPayload, Transport, TransportKind, TransportOutcome};

/// JSON POST whose response is never inspected.
///
/// Any response at all, including an error status, counts as apparent
/// success. Only a transport-level failure moves on to the next strategy.
#[derive(Clone)]
pub struct OpaquePostTransport {
    client: Client,
    endpoint: Url,
}

impl OpaquePostTransport {
    #[must_use]
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl Transport for OpaquePostTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::OpaquePost
    }

    async fn attempt(&self, payload: &SheetPayload) -> TransportOutcome {
        match self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
        {
            Ok(response) => {
                tracing::debug!(status = %response.status(), "opaque post returned");
                TransportOutcome::Sent
            }
            Err(err) => TransportOutcome::Failed(err.to_string()),
        }
    }
}
