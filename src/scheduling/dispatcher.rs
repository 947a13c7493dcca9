use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::service::ReminderService;

/// Process-wide periodic trigger for the dispatch cycle.
///
/// One owned task drives all cycles, so at most one dispatch is ever in
/// flight; an overrunning cycle delays the next tick instead of overlapping
/// it. Cancellation is observed between cycles, which lets an in-flight cycle
/// finish during shutdown.
pub struct DispatchScheduler {
    task_handle: JoinHandle<()>,
    cancellation_token: CancellationToken,
}

impl DispatchScheduler {
    pub fn start(
        service: Arc<ReminderService>,
        initial_delay: Duration,
        interval: Duration,
    ) -> Self {
        let cancellation_token = CancellationToken::new();
        let task_token = cancellation_token.child_token();
        let task_handle = tokio::spawn(async move {
            run_dispatch_loop(service, initial_delay, interval, task_token).await;
        });

        Self {
            task_handle,
            cancellation_token,
        }
    }

    pub async fn shutdown(self) {
        self.cancellation_token.cancel();
        let _ = self.task_handle.await;
    }
}

async fn run_dispatch_loop(
    service: Arc<ReminderService>,
    initial_delay: Duration,
    interval: Duration,
    token: CancellationToken,
) {
    tokio::select! {
        _ = token.cancelled() => return,
        _ = time::sleep(initial_delay) => {}
    }

    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                log::info!("dispatch scheduler shutting down");
                return;
            }
            _ = ticker.tick() => {
                service.dispatch_due_reminders().await;
            }
        }
    }
}
