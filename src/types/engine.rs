use anyhow::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// A stream of events emitted by a [Collector](Collector).
pub type EventStream<'a, E> = Pin<Box<dyn Stream<Item = E> + Send + 'a>>;

/// Collector trait, which defines a source of raw market events, like a candle
/// tick or a depth snapshot from an exchange feed.
#[async_trait]
pub trait Collector<E>: Send + Sync {
    /// Returns the core event stream for the collector.
    async fn get_event_stream(&self) -> Result<EventStream<'_, E>>;
}

/// Analyzer trait: a synchronous event-to-action stage. The compute path must
/// not suspend, so the method is deliberately not async; the engine drives each
/// analyzer from a single task, which keeps updates for any one stream strictly
/// ordered without locks.
pub trait Analyzer<E, A>: Send {
    /// Process one event, returning zero or more actions.
    fn process_event(&mut self, event: E) -> Vec<A>;
}

/// Executor trait, responsible for delivering actions produced by analyzers.
#[async_trait]
pub trait Executor<A>: Send + Sync {
    /// Deliver one action.
    async fn execute(&self, action: A) -> Result<()>;
}
