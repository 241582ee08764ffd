/*
 * This file is part of Autofan.
 *
 * Copyright (C) 2025 Autofan contributors
 *
 * Autofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Autofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Autofan. If not, see <https://www.gnu.org/licenses/>.
 */

//! Periodic scheduling of control cycles
//!
//! Two tasks cooperate:
//!
//! - the **ticker** owns the `ControlLoop` and runs one cycle per interval on
//!   the blocking pool, the first one a full interval after start
//! - the **signal listener** waits for the shutdown future and flips a
//!   `watch` cancellation flag
//!
//! An in-flight cycle is never interrupted; the ticker checks the flag
//! between cycles. A late cycle delays the following tick instead of
//! triggering a burst of catch-up cycles.

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::watch;
use tokio::task;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use af_core::{Actuator, ControlLoop, CycleOutcome, SensorProvider};

/// Run `control` every `period` until `shutdown` resolves, then hand the
/// loop back.
pub async fn run<P, A, S>(
    control: ControlLoop<P, A>,
    period: Duration,
    shutdown: S,
) -> anyhow::Result<ControlLoop<P, A>>
where
    P: SensorProvider + Send + 'static,
    A: Actuator + Send + 'static,
    S: Future<Output = ()> + Send + 'static,
{
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let signal_task = tokio::spawn(async move {
        shutdown.await;
        info!("signal received. exiting...");
        // The ticker may already be gone after a failed cycle
        let _ = cancel_tx.send(true);
    });

    let ticker_task = tokio::spawn(ticker(control, period, cancel_rx));

    let control = match ticker_task.await {
        Ok(Ok(control)) => control,
        Ok(Err(e)) => {
            signal_task.abort();
            return Err(e);
        }
        Err(e) => {
            signal_task.abort();
            return Err(e).context("ticker task failed");
        }
    };

    signal_task.await.context("signal listener task failed")?;
    Ok(control)
}

async fn ticker<P, A>(
    mut control: ControlLoop<P, A>,
    period: Duration,
    mut cancel: watch::Receiver<bool>,
) -> anyhow::Result<ControlLoop<P, A>>
where
    P: SensorProvider + Send + 'static,
    A: Actuator + Send + 'static,
{
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!(period = ?period, "Ticker started");

    loop {
        tokio::select! {
            biased;
            // Err means the listener is gone, which also ends scheduling
            _ = cancel.changed() => break,
            _ = interval.tick() => {}
        }

        let (returned, outcome) = task::spawn_blocking(move || {
            let outcome = control.run_cycle();
            (control, outcome)
        })
        .await
        .context("control cycle panicked")?;
        control = returned;

        match outcome {
            CycleOutcome::Applied { set_point, .. } => debug!(set_point, "Cycle applied"),
            CycleOutcome::Skipped(reason) => debug!(?reason, "Cycle skipped"),
            CycleOutcome::Failed(e) => warn!(error = %e, "Cycle failed, retrying next interval"),
        }
    }

    debug!(writes = control.state().writes, "Ticker stopped");
    Ok(control)
}

/// Resolves on SIGINT or SIGTERM
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}, listening for SIGINT only", e);
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate.recv() => {}
    }
}
