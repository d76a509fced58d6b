//! The 1 Hz ticker driving the clock, with tokio's paused test clock.

use std::time::Duration;

use tokio::sync::{mpsc, watch};

use pomodoro::actors::TickerActor;
use pomodoro::core::{Durations, Phase};
use pomodoro::tea::{update, Command, Message, Model};

use crate::fixtures::model_with;

/// Minimal logic loop: apply every pending message, then mirror the
/// clock's running flag back to the ticker.
fn pump(
    model: &mut Model,
    rx: &mut mpsc::UnboundedReceiver<Message>,
    running_tx: &watch::Sender<bool>,
) -> Vec<Command> {
    let mut cmds = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        cmds.extend(update(model, msg));
        let _ = running_tx.send(model.clock.is_running());
    }
    cmds
}

#[tokio::test(start_paused = true)]
async fn test_ticker_counts_down_one_second_per_second() {
    let mut model = model_with(Durations::default());
    model.clock.start();

    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel();
    let (running_tx, running_rx) = watch::channel(true);
    let handle = TickerActor::new(msg_tx, running_rx).spawn();

    for _ in 0..10 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        pump(&mut model, &mut msg_rx, &running_tx);
    }
    tokio::time::sleep(Duration::from_millis(500)).await;
    pump(&mut model, &mut msg_rx, &running_tx);

    assert_eq!(model.clock.time_remaining_secs(), 1490);
    handle.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_ticker_stops_after_phase_completion() {
    let mut model = model_with(Durations::new(1, 1, 1).unwrap());
    model.clock.start();

    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel();
    let (running_tx, running_rx) = watch::channel(true);
    let handle = TickerActor::new(msg_tx, running_rx).spawn();

    let mut cmds = Vec::new();
    for _ in 0..120 {
        tokio::time::sleep(Duration::from_millis(500)).await;
        cmds.extend(pump(&mut model, &mut msg_rx, &running_tx));
    }

    assert_eq!(cmds.len(), 1, "One alert for the completed work interval");
    assert_eq!(model.clock.phase(), Phase::Break);
    assert_eq!(model.clock.time_remaining_secs(), 60);
    assert!(!*running_tx.borrow());
    handle.shutdown();
}
