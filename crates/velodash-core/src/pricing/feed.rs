// ── Pricing feed ──
//
// Wires the engine, the scheduler, and the API client together and
// publishes presentation-ready views over a watch channel. The TUI's
// data bridge subscribes; nothing downstream ever touches the engine
// directly.

use std::sync::{Arc, Mutex};

use chrono::Local;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use velodash_api::RentalClient;

use crate::error::CoreError;
use crate::pricing::engine::{PricingEngine, PricingView};
use crate::pricing::schedule::HourBoundaryScheduler;

/// Long-lived owner of the pricing refresh cycle.
///
/// Cheaply cloneable via `Arc`. One refresh on [`start`](Self::start)
/// (the mount fetch), one per hour-boundary tick, until
/// [`stop`](Self::stop).
#[derive(Clone)]
pub struct PricingFeed {
    inner: Arc<FeedInner>,
}

struct FeedInner {
    client: Arc<RentalClient>,
    engine: Mutex<PricingEngine>,
    view_tx: watch::Sender<PricingView>,
    cancel: CancellationToken,
    handles: tokio::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl PricingFeed {
    pub fn new(client: Arc<RentalClient>) -> Self {
        let (view_tx, _) = watch::channel(PricingView::Loading);

        Self {
            inner: Arc::new(FeedInner {
                client,
                engine: Mutex::new(PricingEngine::new()),
                view_tx,
                cancel: CancellationToken::new(),
                handles: tokio::sync::Mutex::new(Vec::new()),
            }),
        }
    }

    /// Subscribe to view updates. The receiver always holds the latest
    /// projection.
    pub fn subscribe(&self) -> watch::Receiver<PricingView> {
        self.inner.view_tx.subscribe()
    }

    /// Perform the mount fetch and arm the hour-boundary scheduler.
    pub async fn start(&self) {
        let feed = self.clone();
        let cancel = self.inner.cancel.clone();

        let handle = tokio::spawn(async move {
            // Scheduler ticks arrive over a channel so cancellation is a
            // single select against the token -- a tick or an in-flight
            // fetch dropped at stop() can never mutate state afterwards.
            let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
            let mut scheduler = HourBoundaryScheduler::new();
            scheduler.activate(move || {
                let _ = tick_tx.send(());
            });

            tokio::select! {
                () = cancel.cancelled() => {}
                () = feed.refresh() => {}
            }

            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    Some(()) = tick_rx.recv() => {
                        debug!("hour boundary crossed; refreshing pricing");
                        tokio::select! {
                            () = cancel.cancelled() => break,
                            () = feed.refresh() => {}
                        }
                    }
                }
            }

            scheduler.deactivate();
        });

        self.inner.handles.lock().await.push(handle);
        info!("pricing feed started");
    }

    /// Cancel the scheduler and any in-flight fetch, then join the
    /// background task. After this returns, no callback or fetch
    /// resolution can mutate state.
    pub async fn stop(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        debug!("pricing feed stopped");
    }

    /// One full refresh cycle: issue a ticket, fetch, apply, publish.
    ///
    /// Also usable as a manual refresh (e.g., a keyboard shortcut); the
    /// engine's sequence guard keeps overlapping calls consistent.
    pub async fn refresh(&self) {
        let ticket = self
            .inner
            .engine
            .lock()
            .expect("engine mutex poisoned")
            .begin_refresh(Local::now());
        self.publish();

        let result = self
            .inner
            .client
            .fetch_pricing(ticket.at, ticket.hour_of_day)
            .await;

        {
            let mut engine = self.inner.engine.lock().expect("engine mutex poisoned");
            match result {
                Ok(response) => {
                    engine.apply_success(ticket.seq, response.into());
                }
                Err(err) => {
                    engine.apply_failure(ticket.seq, &CoreError::from(err));
                }
            }
        }

        self.publish();
    }

    /// Push the current projection to subscribers.
    fn publish(&self) {
        let view = self
            .inner
            .engine
            .lock()
            .expect("engine mutex poisoned")
            .view(Local::now());
        self.inner.view_tx.send_replace(view);
    }
}
