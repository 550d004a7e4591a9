use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{SheetPayload, Transport, TransportKind, TransportOutcome};

pub const DEFAULT_FORM_SETTLE: Duration = Duration::from_secs(3);

/// Form-encoded POST dispatched in the background.
///
/// Completion cannot be observed, so the attempt reports `Sent` once the
/// settle delay has passed. It fails only when the request cannot be built.
#[derive(Clone)]
pub struct FormPostTransport {
    client: Client,
    endpoint: Url,
    settle: Duration,
}

impl FormPostTransport {
    #[must_use]
    pub fn new(client: Client, endpoint: Url, settle: Duration) -> Self {
        Self {
            client,
            endpoint,
            settle,
        }
    }
}

#[async_trait]
impl Transport for FormPostTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::FormPost
    }

    async fn attempt(&self, payload: &SheetPayload) -> TransportOutcome {
        let request = match self
            .client
            .post(self.endpoint.clone())
            .form(&payload.form_fields())
            .build()
        {
            Ok(request) => request,
            Err(err) => return TransportOutcome::Failed(err.to_string()),
        };

        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(err) = client.execute(request).await {
                tracing::debug!(error = %err, "background form post failed");
            }
        });

        tokio::time::sleep(self.settle).await;
        TransportOutcome::Sent
    }
}
