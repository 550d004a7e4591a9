use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{SheetPayload, Transport, TransportKind, TransportOutcome};

/// Largest body a beacon will queue.
pub const BEACON_BODY_LIMIT: usize = 64 * 1024;

/// Fire-and-forget form POST. Returns as soon as the request is queued.
#[derive(Clone)]
pub struct BeaconTransport {
    client: Client,
    endpoint: Url,
}

impl BeaconTransport {
    #[must_use]
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl Transport for BeaconTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Beacon
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

        let size = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .map_or(0, <[u8]>::len);
        if size > BEACON_BODY_LIMIT {
            return TransportOutcome::Failed(format!(
                "payload of {size} bytes exceeds the {BEACON_BODY_LIMIT} byte beacon limit"
            ));
        }

        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(err) = client.execute(request).await {
                tracing::debug!(error = %err, "beacon delivery failed");
            }
        });
        TransportOutcome::Sent
    }
}
