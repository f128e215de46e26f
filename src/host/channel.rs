//! Host command channel and router.

use crate::error::{PreviewError, Result};
use crate::host::contract::{CommandEnvelope, CommandName, EVENT_VERSION, ResponseEnvelope};
use crate::pipeline::{OrderingResponse, SearchPipeline, SearchResponse};
use crate::request::SearchRequest;
use serde::Deserialize;
use tokio::sync::{mpsc, oneshot};

/// Search operations the host exposes.
pub trait SearchBackend: Send + Sync + 'static {
    fn ordering(&self, request: &SearchRequest) -> Result<OrderingResponse>;
    fn aggregate(&self, payload: &AggregatePayload) -> Result<SearchResponse>;
}

impl SearchBackend for SearchPipeline {
    fn ordering(&self, request: &SearchRequest) -> Result<OrderingResponse> {
        SearchPipeline::ordering(self, request)
    }

    fn aggregate(&self, payload: &AggregatePayload) -> Result<SearchResponse> {
        SearchPipeline::aggregate(
            self,
            &payload.request,
            &payload.article_page,
            &payload.experience,
        )
    }
}

/// Payload of `search.aggregate`: the request plus both GraphQL `data`
/// objects.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AggregatePayload {
    pub request: SearchRequest,
    pub article_page: serde_json::Value,
    pub experience: serde_json::Value,
}

struct HostCommandRequest {
    envelope: CommandEnvelope,
    response_tx: oneshot::Sender<Result<ResponseEnvelope>>,
}

#[derive(Clone)]
pub struct HostCommandClient {
    request_tx: mpsc::Sender<HostCommandRequest>,
}

impl HostCommandClient {
    pub async fn send(&self, envelope: CommandEnvelope) -> Result<ResponseEnvelope> {
        envelope.validate().map_err(|e| {
            PreviewError::Host(format!(
                "invalid host command envelope {}: {}",
                envelope.request_id, e
            ))
        })?;

        let (response_tx, response_rx) = oneshot::channel();
        self.request_tx
            .send(HostCommandRequest {
                envelope,
                response_tx,
            })
            .await
            .map_err(|e| PreviewError::Host(format!("failed to send host command request: {e}")))?;

        response_rx
            .await
            .map_err(|e| PreviewError::Host(format!("host command response dropped: {e}")))?
    }
}

pub struct HostCommandServer<B: SearchBackend> {
    request_rx: mpsc::Receiver<HostCommandRequest>,
    backend: B,
}

#[must_use]
pub fn command_channel<B: SearchBackend>(
    request_capacity: usize,
    backend: B,
) -> (HostCommandClient, HostCommandServer<B>) {
    let (request_tx, request_rx) = mpsc::channel(request_capacity.max(1));
    (
        HostCommandClient { request_tx },
        HostCommandServer {
            request_rx,
            backend,
        },
    )
}

impl<B: SearchBackend> HostCommandServer<B> {
    pub async fn run(mut self) {
        while let Some(request) = self.request_rx.recv().await {
            let response = self.route(&request.envelope);
            let _ = request.response_tx.send(response);
        }
    }

    /// Route a command envelope to the appropriate handler.
    pub fn route(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        match envelope.command {
            CommandName::HostPing => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({"pong": true}),
            )),
            CommandName::HostVersion => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "contract_version": EVENT_VERSION
                }),
            )),
            CommandName::SearchOrdering => self.handle_search_ordering(envelope),
            CommandName::SearchAggregate => self.handle_search_aggregate(envelope),
            CommandName::RuntimeStop => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({"stopping": true}),
            )),
        }
    }

    fn handle_search_ordering(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        let request: SearchRequest = parse_payload(envelope)?;
        let ordering = self.backend.ordering(&request)?;
        to_response(envelope, &ordering)
    }

    fn handle_search_aggregate(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        let payload: AggregatePayload = parse_payload(envelope)?;
        let response = self.backend.aggregate(&payload)?;
        to_response(envelope, &response)
    }
}

/// Decode the payload of `envelope`; a `null` payload decodes as `{}`.
fn parse_payload<T: serde::de::DeserializeOwned>(envelope: &CommandEnvelope) -> Result<T> {
    let payload = if envelope.payload.is_null() {
        serde_json::json!({})
    } else {
        envelope.payload.clone()
    };
    serde_json::from_value(payload).map_err(|e| {
        PreviewError::Validation(format!(
            "{} has an invalid payload: {e}",
            envelope.command.as_str()
        ))
    })
}

fn to_response<T: serde::Serialize>(
    envelope: &CommandEnvelope,
    value: &T,
) -> Result<ResponseEnvelope> {
    let payload = serde_json::to_value(value)
        .map_err(|e| PreviewError::Host(format!("failed to serialize response payload: {e}")))?;
    Ok(ResponseEnvelope::ok(envelope.request_id.clone(), payload))
}
