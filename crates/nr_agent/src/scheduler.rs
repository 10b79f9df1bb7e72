use std::time::{Duration, Instant};

use tracing::{error, info};

use nr_core::{Report, Result};
use nr_feed::NewsCollector;

use crate::report::ReportGenerator;

pub const DEFAULT_CYCLE_INTERVAL: Duration = Duration::from_secs(3600);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Outcome of one fetch-then-synthesize pass. An empty fetch is a
/// no-op, not a failure.
#[derive(Debug)]
pub enum CycleOutcome {
    Generated(Report),
    NoMatches,
}

/// Run one report cycle: fetch matching articles, then synthesize and
/// persist a report if any were found.
pub async fn run_report_cycle(
    collector: &NewsCollector,
    generator: &ReportGenerator,
    topic: &str,
    max_articles: usize,
) -> Result<CycleOutcome> {
    info!("🗞️ Running report cycle for topic '{}'", topic);

    let articles = collector.fetch_articles(topic, max_articles).await?;
    if articles.is_empty() {
        info!("No matching articles found; report not generated");
        return Ok(CycleOutcome::NoMatches);
    }

    let report = generator.generate_report(topic, &articles).await?;
    info!("✨ Report generated at {}", report.generated_at);
    Ok(CycleOutcome::Generated(report))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    RunningCycle,
    Waiting,
}

/// Single-job polling scheduler. Cycles run strictly sequentially:
/// the loop blocks for the duration of each cycle, so overlap is not
/// possible.
pub struct Scheduler {
    interval: Duration,
    poll_interval: Duration,
    next_run: Option<Instant>,
    state: SchedulerState,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            poll_interval: DEFAULT_POLL_INTERVAL,
            next_run: None,
            state: SchedulerState::Idle,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Explicit "now" query: due once per interval after the job has
    /// been registered, never before registration.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.next_run {
            None => false,
            Some(at) => now >= at,
        }
    }

    /// Schedule the next firing one interval from `now`.
    fn schedule_from(&mut self, now: Instant) {
        self.next_run = Some(now + self.interval);
    }

    /// Blocking poll loop: registers the job, then runs a cycle each
    /// time one is due, sleeping `poll_interval` between ticks. The
    /// first cycle fires one interval after registration. Exits
    /// cleanly on Ctrl-C; cycle failures are logged and the cycle
    /// skipped, not retried.
    pub async fn run(
        &mut self,
        collector: &NewsCollector,
        generator: &ReportGenerator,
        topic: &str,
        max_articles: usize,
    ) -> Result<()> {
        info!(
            "⏰ Started reporting loop (every {}s). Press Ctrl+C to stop.",
            self.interval.as_secs()
        );
        self.schedule_from(Instant::now());

        loop {
            let now = Instant::now();
            if self.is_due(now) {
                self.state = SchedulerState::RunningCycle;
                if let Err(e) = run_report_cycle(collector, generator, topic, max_articles).await {
                    error!("Report cycle failed: {}", e);
                }
                self.schedule_from(Instant::now());
            }

            self.state = SchedulerState::Waiting;
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Stopped reporting loop.");
                    self.state = SchedulerState::Idle;
                    break;
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        Ok(())
    }
}
