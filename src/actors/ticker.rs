//! Ticker actor: the 1 Hz heartbeat of the phase clock.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::plog_debug;
use crate::tea::Message;

use super::ActorHandle;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Actor that sends [`Message::Tick`] once per period while the clock runs.
///
/// `running` mirrors the clock's running flag. While it is `false` the actor
/// sleeps on the watch channel; each resume restarts the cadence so the
/// first tick lands one full period after start.
pub struct TickerActor {
    msg_tx: mpsc::UnboundedSender<Message>,
    running: watch::Receiver<bool>,
    period: Duration,
}

impl TickerActor {
    pub fn new(msg_tx: mpsc::UnboundedSender<Message>, running: watch::Receiver<bool>) -> Self {
        Self {
            msg_tx,
            running,
            period: TICK_INTERVAL,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn spawn(self) -> ActorHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        plog_debug!("TickerActor::spawn period={:?}", self.period);

        tokio::spawn(async move {
            self.run(cancel_clone).await;
            plog_debug!("TickerActor stopped");
        });

        ActorHandle::new(cancel)
    }

    async fn run(mut self, cancel: CancellationToken) {
        loop {
            // Suspended until the clock starts
            while !*self.running.borrow_and_update() {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    changed = self.running.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                }
            }

            let mut interval = interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    changed = self.running.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        if !*self.running.borrow_and_update() {
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        if self.msg_tx.send(Message::Tick).is_err() {
                            plog_debug!("TickerActor: message channel closed");
                            return;
                        }
                    }
                }
            }
        }
    }
}
