use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::event::BotEvent;

/// Default channel buffer size for provider events.
const DEFAULT_BUFFER_SIZE: usize = 256;

/// Inbound event channel between the messaging provider and the dispatcher.
///
/// The provider side is cloneable; the receiver is handed to exactly one
/// dispatch loop so events are processed in arrival order.
pub struct EventBus {
    pub events_tx: mpsc::Sender<BotEvent>,
    pub events_rx: Option<mpsc::Receiver<BotEvent>>,
}

impl EventBus {
    /// Create a new bus with the default buffer size.
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    /// Create a new bus with a custom buffer size.
    pub fn with_buffer_size(buffer: usize) -> Self {
        let (events_tx, events_rx) = mpsc::channel(buffer);

        info!(buffer_size = buffer, "EventBus initialized");

        Self {
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Take the event receiver (can only be called once).
    pub fn take_events_rx(&mut self) -> Option<mpsc::Receiver<BotEvent>> {
        debug!("Event receiver taken");
        self.events_rx.take()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SessionState;
    use crate::message::InboundMessage;

    #[tokio::test]
    async fn preserves_arrival_order() {
        let mut bus = EventBus::new();
        let mut rx = bus.take_events_rx().unwrap();

        bus.events_tx
            .send(BotEvent::StateChanged(SessionState::AwaitingPairing))
            .await
            .unwrap();
        bus.events_tx
            .send(BotEvent::MessageReceived(InboundMessage::new("m1", "a@c.us", "hi")))
            .await
            .unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            BotEvent::StateChanged(SessionState::AwaitingPairing)
        ));
        assert!(matches!(rx.recv().await.unwrap(), BotEvent::MessageReceived(_)));
    }

    #[tokio::test]
    async fn take_rx_once() {
        let mut bus = EventBus::new();
        assert!(bus.take_events_rx().is_some());
        assert!(bus.take_events_rx().is_none());
    }

    #[tokio::test]
    async fn backpressure_when_full() {
        let mut bus = EventBus::with_buffer_size(1);
        let _rx = bus.take_events_rx().unwrap();

        bus.events_tx
            .send(BotEvent::StateChanged(SessionState::Connected))
            .await
            .unwrap();

        let result = bus
            .events_tx
            .try_send(BotEvent::StateChanged(SessionState::Disconnected));
        assert!(result.is_err());
    }
}
