//! Periodic cleanup of expired session rows
//!
//! Validation evaluates expiry lazily and never depends on this job; the
//! sweeper only keeps the sessions table from growing without bound.

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::repositories::SessionRepository;

/// Start the sweeper on the given cron schedule. The returned scheduler
/// must be kept alive for the job to keep firing.
pub async fn start(schedule: &str, sessions: SessionRepository) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_id, _scheduler| {
        let sessions = sessions.clone();
        Box::pin(async move {
            match sessions.delete_expired().await {
                Ok(removed) if removed > 0 => info!("Swept {} expired sessions", removed),
                Ok(_) => {}
                Err(e) => error!("Session sweep failed: {:#}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Session sweeper running on schedule '{}'", schedule);

    Ok(scheduler)
}
