use crate::config::constants::ENGINE_MESSAGE_CHANNEL_CAPACITY;
use crate::types::engine::{Analyzer, Collector, Executor};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::{self, Sender};
use tokio::task::JoinSet;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};

/// The main engine. This struct is responsible for orchestrating the
/// data flow between collectors, analyzers, and executors.
pub struct Engine<E, A> {
    /// The set of collectors that the engine will use to collect raw events.
    collectors: Vec<Box<dyn Collector<E>>>,

    /// The set of analyzers that turn raw events into actions.
    analyzers: Vec<Box<dyn Analyzer<E, A>>>,

    /// The set of executors that the engine will use to deliver actions.
    executors: Vec<Arc<dyn Executor<A>>>,

    /// The capacity of the event channel.
    event_channel_capacity: usize,

    /// The capacity of the action channel.
    action_channel_capacity: usize,
}

impl<E, A> Engine<E, A> {
    pub fn new() -> Self {
        Self {
            collectors: vec![],
            analyzers: vec![],
            executors: vec![],
            event_channel_capacity: ENGINE_MESSAGE_CHANNEL_CAPACITY,
            action_channel_capacity: ENGINE_MESSAGE_CHANNEL_CAPACITY,
        }
    }

    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity;
        self
    }

    pub fn with_action_channel_capacity(mut self, capacity: usize) -> Self {
        self.action_channel_capacity = capacity;
        self
    }
}

impl<E, A> Default for Engine<E, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, A> Engine<E, A>
where
    E: Send + Clone + 'static + std::fmt::Debug,
    A: Send + Clone + 'static + std::fmt::Debug,
{
    /// Adds a collector to be used by the engine.
    pub fn add_collector(&mut self, collector: Box<dyn Collector<E>>) {
        self.collectors.push(collector);
    }

    /// Adds an analyzer to be used by the engine.
    pub fn add_analyzer(&mut self, analyzer: Box<dyn Analyzer<E, A>>) {
        self.analyzers.push(analyzer);
    }

    /// Adds an executor to be used by the engine.
    pub fn add_executor(&mut self, executor: Arc<dyn Executor<A>>) {
        self.executors.push(executor);
    }

    /// The core run loop of the engine. Spawns a task per collector, analyzer
    /// and executor and orchestrates the data flow between them. Tasks wind
    /// down once every upstream channel sender is gone.
    pub async fn run(self) -> Result<JoinSet<()>, Box<dyn std::error::Error>> {
        let (event_sender, _): (Sender<E>, _) = broadcast::channel(self.event_channel_capacity);
        let (action_sender, _): (Sender<A>, _) = broadcast::channel(self.action_channel_capacity);

        let mut set = JoinSet::new();

        // Spawn executors in separate tasks.
        for executor in self.executors {
            let mut receiver = action_sender.subscribe();
            set.spawn(async move {
                info!("starting executor... ");
                loop {
                    match receiver.recv().await {
                        Ok(action) => {
                            if let Err(e) = executor.execute(action).await {
                                error!("error executing action: {}", e);
                            }
                        }
                        Err(RecvError::Lagged(n)) => warn!("executor lagged {} actions", n),
                        Err(RecvError::Closed) => break,
                    }
                }
            });
        }

        // Spawn analyzers in separate tasks.
        for mut analyzer in self.analyzers {
            let mut event_receiver = event_sender.subscribe();
            let action_sender = action_sender.clone();
            set.spawn(async move {
                info!("starting analyzer... ");
                loop {
                    match event_receiver.recv().await {
                        Ok(event) => {
                            for action in analyzer.process_event(event) {
                                match action_sender.send(action) {
                                    Ok(_) => {}
                                    Err(e) => error!("error sending action: {}", e),
                                }
                            }
                        }
                        Err(RecvError::Lagged(n)) => warn!("analyzer lagged {} events", n),
                        Err(RecvError::Closed) => break,
                    }
                }
            });
        }

        // Spawn collectors in separate tasks.
        for collector in self.collectors {
            let event_sender = event_sender.clone();
            set.spawn(async move {
                info!("starting collector... ");
                let mut event_stream = match collector.get_event_stream().await {
                    Ok(stream) => stream,
                    Err(e) => {
                        error!("error initializing collector stream: {}", e);
                        return;
                    }
                };
                while let Some(event) = event_stream.next().await {
                    match event_sender.send(event) {
                        Ok(_) => {}
                        Err(e) => error!("error sending event: {}", e),
                    }
                }
                info!("collector stream ended");
            });
        }

        Ok(set)
    }
}
