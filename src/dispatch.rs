//! # Alert Dispatcher
//!
//! Low-stock alerts leave the request path through a bounded queue and are delivered by a single
//! background task. Each alert gets up to `max_attempts` runs through the
//! [`LowStockNotifier`] with a fixed pause between them; alerts that still fail are parked in a
//! dead-letter list instead of being dropped silently.
//!
//! Like the table actors, the dispatcher is built first and receives its dependency (the
//! notifier) when it starts:
//!
//! ```rust,ignore
//! let (dispatcher, alerts) = AlertDispatcher::new(&config.alerts);
//! tokio::spawn(dispatcher.run(notifier));
//! alerts.submit(snapshot)?;
//! ```
//!
//! The task stops once every [`AlertQueue`] handle has been dropped and the queue is drained.

use crate::config::AlertConfig;
use crate::error::{InventoryError, Result};
use crate::model::ReagentSnapshot;
use crate::notifier::LowStockNotifier;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

/// An alert that exhausted its attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadLetter {
    pub reagent: ReagentSnapshot,
    pub attempts: u32,
    pub last_error: String,
}

enum DispatchRequest {
    Alert(ReagentSnapshot),
    Flush(oneshot::Sender<()>),
    DeadLetters(oneshot::Sender<Vec<DeadLetter>>),
}

pub struct AlertDispatcher {
    receiver: mpsc::Receiver<DispatchRequest>,
    max_attempts: u32,
    backoff: Duration,
    dead_letters: Vec<DeadLetter>,
}

/// Cloneable handle for submitting alerts.
#[derive(Clone)]
pub struct AlertQueue {
    sender: mpsc::Sender<DispatchRequest>,
}

impl AlertDispatcher {
    pub fn new(config: &AlertConfig) -> (Self, AlertQueue) {
        let (sender, receiver) = mpsc::channel(config.queue_size.max(1));
        let dispatcher = Self {
            receiver,
            max_attempts: config.max_attempts.max(1),
            backoff: config.retry_backoff(),
            dead_letters: Vec::new(),
        };
        (dispatcher, AlertQueue { sender })
    }

    pub async fn run(mut self, notifier: LowStockNotifier) {
        info!(max_attempts = self.max_attempts, "Alert dispatcher started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                DispatchRequest::Alert(reagent) => self.deliver(&notifier, reagent).await,
                DispatchRequest::Flush(respond_to) => {
                    let _ = respond_to.send(());
                }
                DispatchRequest::DeadLetters(respond_to) => {
                    let _ = respond_to.send(self.dead_letters.clone());
                }
            }
        }

        info!(
            dead_letters = self.dead_letters.len(),
            "Alert dispatcher stopped"
        );
    }

    #[instrument(skip(self, notifier, reagent), fields(reagent_id = %reagent.reagent_id))]
    async fn deliver(&mut self, notifier: &LowStockNotifier, reagent: ReagentSnapshot) {
        let mut attempt = 1;
        loop {
            match notifier.notify_low_stock(&reagent).await {
                Ok(admins) => {
                    debug!(attempt, admins, "Alert delivered");
                    return;
                }
                Err(e) if attempt < self.max_attempts => {
                    warn!(attempt, error = %e, "Alert failed, retrying");
                    tokio::time::sleep(self.backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempt, error = %e, "Alert abandoned");
                    self.dead_letters.push(DeadLetter {
                        reagent,
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                    return;
                }
            }
        }
    }
}

impl AlertQueue {
    /// Queue an alert without waiting for it. Fails only if the queue is full or stopped.
    pub fn submit(&self, reagent: ReagentSnapshot) -> Result<()> {
        self.sender
            .try_send(DispatchRequest::Alert(reagent))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => {
                    InventoryError::NotificationDelivery("alert queue is full".into())
                }
                mpsc::error::TrySendError::Closed(_) => {
                    InventoryError::NotificationDelivery("alert dispatcher stopped".into())
                }
            })
    }

    /// Wait until every alert submitted before this call has been handled.
    pub async fn flush(&self) -> Result<()> {
        let (respond_to, response) = oneshot::channel();
        self.request(DispatchRequest::Flush(respond_to)).await?;
        response.await.map_err(|_| stopped())
    }

    pub async fn dead_letters(&self) -> Result<Vec<DeadLetter>> {
        let (respond_to, response) = oneshot::channel();
        self.request(DispatchRequest::DeadLetters(respond_to)).await?;
        response.await.map_err(|_| stopped())
    }

    async fn request(&self, request: DispatchRequest) -> Result<()> {
        self.sender.send(request).await.map_err(|_| stopped())
    }
}

fn stopped() -> InventoryError {
    InventoryError::NotificationDelivery("alert dispatcher stopped".into())
}
