use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, interval_at},
};

pub const STAGE_COUNT: u8 = 4;
pub const STAGE_PERIOD: Duration = Duration::from_secs(3);
/// Fraction of the animation that must be on screen for it to run.
pub const VISIBILITY_THRESHOLD: f64 = 0.3;

/// Which of the four "development impact" stages is shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StageCycle {
    stage: u8,
}

impl StageCycle {
    pub fn stage(&self) -> u8 {
        self.stage
    }

    pub fn advance(&mut self) {
        self.stage = (self.stage + 1) % STAGE_COUNT;
    }
}

/// Advances a [`StageCycle`] on a timer while the animation is visible.
pub struct StageTicker {
    cycle: Arc<watch::Sender<StageCycle>>,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl StageTicker {
    pub fn new() -> Self {
        Self::with_period(STAGE_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        let (sender, _) = watch::channel(StageCycle::default());
        Self {
            cycle: Arc::new(sender),
            period,
            task: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StageCycle> {
        self.cycle.subscribe()
    }

    pub fn current(&self) -> StageCycle {
        *self.cycle.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Feed the latest intersection ratio of the animation with the viewport.
    pub fn on_visibility(&mut self, intersection_ratio: f64) {
        if intersection_ratio >= VISIBILITY_THRESHOLD {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }
        let cycle = Arc::clone(&self.cycle);
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                cycle.send_modify(StageCycle::advance);
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Default for StageTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StageTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
