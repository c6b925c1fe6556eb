//! # Tick Driver
//!
//! ## Overview
//!
//! The driver is the single writer that moves every game forward. Once per
//! tick period it:
//!
//! 1. drops sessions that have been idle for longer than the expiry,
//! 2. runs each remaining session's pass (bot moves, then one engine tick) on
//!    the blocking pool, all sessions in parallel,
//! 3. forwards whatever the passes produced to the [`EventSink`].
//!
//! ## Timing
//!
//! Tick `n` is due at `start + n * period`. The loop sleeps until that
//! absolute deadline rather than for a fixed interval, so slow ticks do not
//! push later ones back.
//!
//! ## Failure Isolation
//!
//! A pass that panics surfaces as a `JoinError`. It is logged and counted,
//! and that session simply misses the tick; its mutex does not poison.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant as TokioInstant};
use tracing::{debug, error, info};
use web_time::Instant;

use kfchess_engine::BotDraws;

use crate::config::ServerConfig;
use crate::registry::GameRegistry;
use crate::sink::EventSink;

/// What one driver tick did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Driver tick number, starting at 1
    pub tick: u64,
    /// Sessions whose game advanced
    pub advanced: usize,
    /// Games that finished on this tick
    pub finished: usize,
    /// Sessions removed for being idle
    pub expired: usize,
    /// Passes that panicked
    pub failed: usize,
}

pub struct Driver {
    config: ServerConfig,
    registry: Arc<GameRegistry>,
    sink: Arc<dyn EventSink>,
    rng: StdRng,
    ticks: u64,
}

impl Driver {
    pub fn new(config: ServerConfig, registry: Arc<GameRegistry>, sink: Arc<dyn EventSink>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Driver {
            config,
            registry,
            sink,
            rng,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Tick forever
    pub async fn run(self) {
        self.run_until(std::future::pending()).await;
    }

    /// Tick until `shutdown` completes; returns the number of ticks run
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
    /// let handle = tokio::spawn(driver.run_until(async { stopped.await.ok(); }));
    /// ```
    pub async fn run_until<F>(mut self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let period = self.config.tick_period;
        info!("[DRIVER] Ticking every {:?}", period);

        tokio::pin!(shutdown);
        let mut deadline = TokioInstant::now();
        loop {
            deadline += period;
            tokio::select! {
                _ = &mut shutdown => break,
                _ = sleep_until(deadline) => {}
            }

            let report = self.tick_once().await;
            if report.expired > 0 || report.failed > 0 || report.finished > 0 {
                debug!("[DRIVER] {:?}", report);
            }
        }

        info!("[DRIVER] Stopped after {} ticks", self.ticks);
        self.ticks
    }

    /// Run a single driver tick over every session
    pub async fn tick_once(&mut self) -> TickReport {
        self.ticks += 1;
        let mut report = TickReport {
            tick: self.ticks,
            ..TickReport::default()
        };

        let now = Instant::now();
        let mut passes = JoinSet::new();
        let mut running = HashMap::new();

        for (game_id, session) in self.registry.sessions() {
            if session.lock().is_expired(now, self.config.expiry) {
                self.registry.remove(&game_id);
                report.expired += 1;
                info!("[DRIVER] Game {} expired", game_id);
                continue;
            }

            let draws = [
                BotDraws::from_rng(&mut self.rng),
                BotDraws::from_rng(&mut self.rng),
            ];
            let handle = passes.spawn_blocking(move || {
                let outcome = session.lock().run_tick(draws);
                outcome
            });
            running.insert(handle.id(), game_id);
        }

        while let Some(joined) = passes.join_next_with_id().await {
            match joined {
                Ok((_, outcome)) => {
                    report.advanced += usize::from(outcome.advanced);
                    report.finished += usize::from(outcome.finished);
                    for message in outcome.messages {
                        self.sink.emit(message);
                    }
                }
                Err(e) => {
                    report.failed += 1;
                    let game_id = running.get(&e.id()).map_or("?", String::as_str);
                    error!("[DRIVER] Pass for game {} failed: {}", game_id, e);
                }
            }
        }

        report
    }
}
