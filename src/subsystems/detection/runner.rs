//! Fixed-rate driver for the detection pipeline

use std::sync::atomic::{AtomicBool, Ordering};

use crash_beacon_core::alert::{AlertAction, AlertState};
use crash_beacon_core::scorer::Classifier;

use super::dispatch::AlertDispatcher;
use super::pipeline::DetectionPipeline;
use crate::core::scheduler::{LoopTiming, PeriodicTicker, TickStats};
use crate::devices::traits::MotionSource;
use crate::platform::{Result, TimerInterface};

/// Outcome of a [`run`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub detections: u32,
    pub alerts_fired: u32,
    pub cancellations: u32,
    pub final_state: AlertState,
    pub stats: TickStats,
}

/// Tick `pipeline` at its configured sampling rate
///
/// Stops when `duration_us` has elapsed (if given) or `stop` is set. The
/// ticker sleeps only the remainder of each period.
///
/// # Errors
///
/// Propagates timer failures.
pub fn run<M, C, D, T>(
    pipeline: &mut DetectionPipeline<M, C, D>,
    timer: &mut T,
    duration_us: Option<u64>,
    stop: &AtomicBool,
) -> Result<RunSummary>
where
    M: MotionSource,
    C: Classifier,
    D: AlertDispatcher,
    T: TimerInterface,
{
    let timing = LoopTiming::from_rate("detection", pipeline.config().sampling_rate_hz);
    let mut ticker = PeriodicTicker::new(timing);
    let started_us = timer.now_us();

    crate::log_info!(
        "Detection loop running at {} Hz ({} us period)",
        timing.rate_hz,
        timing.period_us()
    );

    let mut summary = RunSummary {
        ticks: 0,
        detections: 0,
        alerts_fired: 0,
        cancellations: 0,
        final_state: pipeline.state(),
        stats: TickStats::default(),
    };

    while !stop.load(Ordering::Acquire) {
        let now_us = ticker.wait(timer)?;
        if duration_us.is_some_and(|limit| now_us.saturating_sub(started_us) >= limit) {
            break;
        }

        let report = pipeline.tick(now_us);
        summary.ticks += 1;
        match report.action {
            AlertAction::Armed(_) => summary.detections += 1,
            AlertAction::Fire(_) => summary.alerts_fired += 1,
            AlertAction::Cancelled(_) => summary.cancellations += 1,
            AlertAction::Rearmed | AlertAction::None => {}
        }

        ticker.finish(timer);
    }

    summary.final_state = pipeline.state();
    summary.stats = *ticker.stats();

    let stats = &summary.stats;
    crate::log_info!(
        "Detection loop stopped after {} ticks: avg {} us, max {} us, {} deadline misses, {} overruns",
        summary.ticks,
        stats.avg_execution_us,
        stats.max_execution_us,
        stats.deadline_misses,
        stats.overruns
    );
    Ok(summary)
}
