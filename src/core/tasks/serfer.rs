// src/core/tasks/serfer.rs

use crate::core::SerferError;
use crate::core::events::Event;
use crate::core::handler::EventHandler;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

/// Pulls cluster events off an ordered source and feeds them, one at a time,
/// to an [`EventHandler`]. Meant to run on its own task.
pub struct Serfer<S, H> {
    source: S,
    handler: H,
}

impl<H> Serfer<UnboundedReceiverStream<Event>, H>
where
    H: EventHandler,
{
    /// Creates a `Serfer` reading from the receiving half of an unbounded channel.
    pub fn from_receiver(rx: mpsc::UnboundedReceiver<Event>, handler: H) -> Self {
        Self::new(UnboundedReceiverStream::new(rx), handler)
    }
}

impl<S, H> Serfer<S, H>
where
    S: Stream<Item = Event> + Unpin,
    H: EventHandler,
{
    pub fn new(source: S, handler: H) -> Self {
        Self { source, handler }
    }

    /// Runs the event loop until the shutdown signal fires.
    ///
    /// Each event is fully handled before the next one is awaited. The shutdown
    /// signal is checked first on every iteration, so a steady flow of events
    /// cannot keep the loop alive; events still queued at that point are left
    /// undelivered. A dropped shutdown sender counts as a shutdown.
    pub async fn run(
        mut self,
        shutdown_rx: Option<broadcast::Receiver<()>>,
    ) -> Result<(), SerferError> {
        let Some(mut shutdown_rx) = shutdown_rx else {
            return Err(SerferError::MissingShutdownSignal);
        };

        info!("Serf event loop started.");
        let mut source_open = true;
        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    info!("Serf event loop shutting down.");
                    return Ok(());
                }
                next = self.source.next(), if source_open => {
                    match next {
                        Some(event) => self.handler.handle_event(Some(&event)),
                        None => {
                            warn!("Serf event source closed. Waiting for shutdown.");
                            source_open = false;
                        }
                    }
                }
            }
        }
    }
}

impl<S, H> Serfer<S, H>
where
    S: Stream<Item = Event> + Unpin + Send + 'static,
    H: EventHandler + 'static,
{
    /// Spawns the event loop onto the Tokio runtime.
    pub fn spawn(
        self,
        shutdown_rx: Option<broadcast::Receiver<()>>,
    ) -> JoinHandle<Result<(), SerferError>> {
        tokio::spawn(self.run(shutdown_rx))
    }
}
