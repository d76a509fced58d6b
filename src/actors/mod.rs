//! Actor system for background tasks.
//!
//! Each actor is an independent tokio task that communicates with the logic
//! thread via message passing. The only actor today is the ticker, which
//! drives the phase clock at 1 Hz while it is running.
//!
//! NOTE: Keyboard input is handled synchronously in the logic thread,
//! not via an actor, for minimum latency.

pub mod ticker;

use tokio_util::sync::CancellationToken;

pub use ticker::TickerActor;

/// Handle to a running actor, used for graceful shutdown.
pub struct ActorHandle {
    cancel: CancellationToken,
}

impl ActorHandle {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Signal the actor to shut down gracefully.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}
