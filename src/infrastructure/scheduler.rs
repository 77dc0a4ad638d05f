use std::sync::Arc;
use std::time::Duration;

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_stream::{StreamExt, wrappers::IntervalStream};
use tracing::{error, info};

use crate::application::usecases::process_reminders::ProcessRemindersUseCase;

/// Runs the reminder pass on a fixed period inside this process.
pub struct ReminderTicker {
    period: Duration,
}

impl ReminderTicker {
    /// `None` for a zero period, which means the ticker is disabled.
    pub fn new(period: Duration) -> Option<Self> {
        (!period.is_zero()).then_some(Self { period })
    }

    pub fn spawn(self, reminders: Arc<ProcessRemindersUseCase>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(reminders).await })
    }

    async fn run(self, reminders: Arc<ProcessRemindersUseCase>) {
        let mut interval = tokio::time::interval(self.period);
        // a slow pass must not trigger a burst of catch-up passes
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut ticks = IntervalStream::new(interval);

        info!(period_secs = self.period.as_secs(), "reminder ticker started");
        while ticks.next().await.is_some() {
            match reminders.execute().await {
                Ok(summary) => info!(
                    reminders_24h = summary.reminders_24h,
                    reminders_1h = summary.reminders_1h,
                    sent = summary.emails_sent,
                    failed = summary.emails_failed,
                    "scheduled reminder pass completed"
                ),
                Err(err) => error!(error = %err, "scheduled reminder pass failed"),
            }
        }
    }
}
