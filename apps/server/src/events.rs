use portfolio_analytics_core::events::{PortfolioEvent, PortfolioEventSink};
use serde_json::Value;
use tokio::sync::broadcast;

/// Serializable envelope that carries event names and optional payloads.
#[derive(Clone, Debug)]
pub struct ServerEvent {
    pub name: &'static str,
    pub payload: Option<Value>,
}

impl ServerEvent {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            payload: None,
        }
    }

    pub fn with_payload(name: &'static str, payload: Value) -> Self {
        Self {
            name,
            payload: Some(payload),
        }
    }
}

impl From<PortfolioEvent> for ServerEvent {
    fn from(event: PortfolioEvent) -> Self {
        let name = event.name();
        match serde_json::to_value(&event) {
            Ok(payload) => Self::with_payload(name, payload),
            Err(err) => {
                tracing::warn!("Dropping payload of {}: {}", name, err);
                Self::new(name)
            }
        }
    }
}

/// Lightweight broadcast bus that fans out events to any connected clients.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ServerEvent) {
        // No subscribers is not an error.
        let _ = self.sender.send(event);
    }
}

/// Forwards core portfolio events onto the bus.
#[derive(Clone)]
pub struct EventBusSink {
    bus: EventBus,
}

impl EventBusSink {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl PortfolioEventSink for EventBusSink {
    fn emit(&self, event: PortfolioEvent) {
        self.bus.publish(event.into());
    }
}
