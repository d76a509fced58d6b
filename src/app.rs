use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Sender, TrySendError};
use crossterm::event::{self, Event};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};

use crate::actors::{ActorHandle, TickerActor};
use crate::alert::notify_desktop;
use crate::config::Config;
use crate::core::Durations;
use crate::render::RenderState;
use crate::tea::{update, Command, Message, Model};
use crate::{plog, plog_debug, plog_warn, Result};

const MAX_BG_MESSAGES: usize = 50;

/// Owns the model and applies keyboard input and ticks to it, one at a time.
pub struct LogicThread;

impl LogicThread {
    pub fn run(
        config: Config,
        durations: Durations,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, durations, state_tx, shutdown))
    }

    async fn run_async(
        config: Config,
        durations: Durations,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        plog_debug!(
            "LogicThread::run_async work={} break={} long_break={} auto_start={}",
            durations.work(),
            durations.brk(),
            durations.long_break(),
            config.auto_start
        );
        let mut model = Model::new(config, durations);

        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();
        let (running_tx, running_rx) = watch::channel(model.clock.is_running());
        let actors = vec![TickerActor::new(msg_tx.clone(), running_rx).spawn()];

        publish(&state_tx, &mut model);

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Keyboard input (priority)
            while event::poll(Duration::ZERO)? {
                let msg = match event::read()? {
                    Event::Key(key) => Message::Key(key),
                    Event::Resize(w, h) => Message::Resize(w, h),
                    _ => continue,
                };
                if dispatch(&mut model, msg, &running_tx) {
                    shutdown.store(true, Ordering::Relaxed);
                    shutdown_actors(&actors);
                    return Ok(());
                }
                publish(&state_tx, &mut model);
            }

            // Background messages (bounded)
            for _ in 0..MAX_BG_MESSAGES {
                let Ok(msg) = msg_rx.try_recv() else { break };
                if dispatch(&mut model, msg, &running_tx) {
                    shutdown.store(true, Ordering::Relaxed);
                    shutdown_actors(&actors);
                    return Ok(());
                }
            }

            publish(&state_tx, &mut model);

            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        shutdown_actors(&actors);
        Ok(())
    }
}

/// Apply one message and run its commands. Returns true when the app should quit.
fn dispatch(model: &mut Model, msg: Message, running_tx: &watch::Sender<bool>) -> bool {
    let cmds = update(model, msg);
    sync_ticker(running_tx, model);
    cmds.into_iter().any(|cmd| execute_command(model, cmd))
}

/// Keep the ticker's running flag in step with the clock.
fn sync_ticker(running_tx: &watch::Sender<bool>, model: &Model) {
    let running = model.clock.is_running();
    running_tx.send_if_modified(|current| {
        if *current == running {
            return false;
        }
        *current = running;
        true
    });
}

fn execute_command(model: &mut Model, cmd: Command) -> bool {
    match cmd {
        Command::Alert(alert) => {
            plog_debug!("Command::Alert title={}", alert.title);
            if model.config.bell {
                model.bell_count += 1;
                model.dirty = true;
            }
            if model.config.desktop_notifications {
                tokio::spawn(async move {
                    if let Err(e) = notify_desktop(alert).await {
                        plog_warn!("Desktop notification failed: {}", e);
                    }
                });
            }
        }

        Command::Quit => {
            plog!("Command::Quit");
            return true;
        }
    }

    false
}

/// Hand a fresh snapshot to the render thread if the model changed.
///
/// The model stays dirty while the channel is full, so the next pass
/// retries with the newest state instead of dropping it.
fn publish(state_tx: &Sender<RenderState>, model: &mut Model) {
    if model.dirty && send_state(state_tx, model) {
        model.dirty = false;
    }
}

/// Returns false when the render thread has not taken the previous snapshot yet.
fn send_state(state_tx: &Sender<RenderState>, model: &Model) -> bool {
    match state_tx.try_send(model.snapshot()) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => false,
        // Render thread gone; nothing left to deliver to.
        Err(TrySendError::Disconnected(_)) => true,
    }
}

fn shutdown_actors(actors: &[ActorHandle]) {
    plog_debug!("Shutting down {} actors", actors.len());
    for actor in actors {
        actor.shutdown();
    }
}
