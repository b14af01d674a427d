// Event emitter - named channels with ordered, awaited delivery

use std::future::Future;

use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use super::events::{EventName, RunnerEvent};

type Handler = Box<dyn Fn(RunnerEvent) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Observer registry the runner publishes lifecycle events on
#[derive(Default)]
pub struct Emitter {
    handlers: Vec<(EventName, Handler)>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to every event published on `event`
    pub fn on<F, Fut>(&mut self, event: EventName, handler: F)
    where
        F: Fn(RunnerEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        debug!("Subscribed handler to {}", event);
        let handler: Handler = Box::new(move |payload| handler(payload).boxed());
        self.handlers.push((event, handler));
    }

    /// Number of handlers subscribed to `event`
    pub fn listener_count(&self, event: EventName) -> usize {
        self.handlers.iter().filter(|(name, _)| *name == event).count()
    }

    /// Deliver `event` to its subscribers in subscription order.
    ///
    /// Each handler is awaited before the next one runs. The first failing
    /// handler stops delivery and its error is returned.
    pub async fn emit(&self, event: RunnerEvent) -> Result<()> {
        let name = event.name();
        for (_, handler) in self.handlers.iter().filter(|(n, _)| *n == name) {
            debug!("Dispatching {}", name);
            handler(event.clone()).await?;
        }
        Ok(())
    }

    /// Deliver a sequence of events in order
    pub async fn emit_all<I>(&self, events: I) -> Result<()>
    where
        I: IntoIterator<Item = RunnerEvent>,
    {
        for event in events {
            self.emit(event).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
