mod portfolio;

use std::{collections::HashSet, convert::Infallible, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::HeaderValue,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_core::stream::Stream;
use portfolio_analytics_core::events::PortfolioEvent;
use serde::Deserialize;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    events::ServerEvent,
    main_lib::AppState,
};

pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the portfolio snapshot can be loaded.
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state.portfolio_service.get_summary().await?;
    Ok("ok")
}

/// Restricts `/events/stream` to some portfolio events. `events` is a
/// comma-separated list of names, with or without the `portfolio:` prefix.
#[derive(Debug, Default, Deserialize)]
pub struct EventStreamParams {
    pub events: Option<String>,
}

impl EventStreamParams {
    /// Resolved event names, or `None` when every event is wanted.
    pub fn selected(&self) -> ApiResult<Option<HashSet<&'static str>>> {
        let Some(raw) = self.events.as_deref().filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };
        raw.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                let qualified = if name.contains(':') {
                    name.to_string()
                } else {
                    format!("portfolio:{}", name)
                };
                PortfolioEvent::NAMES
                    .into_iter()
                    .find(|known| *known == qualified)
                    .ok_or_else(|| ApiError::BadRequest(format!("Unknown event '{}'", name)))
            })
            .collect::<ApiResult<HashSet<_>>>()
            .map(Some)
    }
}

/// Frames a bus event for the wire, with its JSON payload as data.
fn to_sse(event: ServerEvent) -> Option<SseEvent> {
    let frame = SseEvent::default().event(event.name);
    match event.payload {
        Some(payload) => match frame.json_data(payload) {
            Ok(frame) => Some(frame),
            Err(err) => {
                tracing::error!("Failed to serialize SSE payload for {}: {}", event.name, err);
                None
            }
        },
        None => Some(frame.data("null")),
    }
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventStreamParams>,
) -> ApiResult<Sse<impl Stream<Item = Result<SseEvent, Infallible>>>> {
    let selected = params.selected()?;
    let receiver = BroadcastStream::new(state.event_bus.subscribe());
    let stream = tokio_stream::StreamExt::filter_map(receiver, move |event| match event {
        Ok(event) => {
            let wanted = match &selected {
                Some(names) => names.contains(event.name),
                None => true,
            };
            if wanted {
                to_sse(event).map(Ok)
            } else {
                None
            }
        }
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!("Event stream subscriber lagged, {} portfolio events dropped", skipped);
            None
        }
    });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/events/stream", get(stream_events))
        .nest("/portfolio", portfolio::router());

    Ok(Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        // Outer layers run first: the id is set before it is propagated.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}
