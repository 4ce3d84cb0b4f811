//! Background reclamation of silent participants and abandoned sessions.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::service::SyncService;

/// Counts from one janitor pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JanitorPass {
    pub silent_participants: usize,
    pub empty_sessions: usize,
    pub idle_sessions: usize,
}

/// Handle to the running janitor task.
pub struct Janitor {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Janitor {
    /// Spawn the janitor on the current runtime. It ticks every
    /// `session.sweep_interval`, the first tick one interval from now.
    pub fn spawn(service: Arc<SyncService>) -> Self {
        let (shutdown, mut stop) = watch::channel(false);
        let period = service.config().session.sweep_interval();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        run_once(&service);
                    }
                    _ = stop.changed() => break,
                }
            }
            debug!("janitor stopped");
        });
        Self { shutdown, task }
    }

    /// Stop the task and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// One pass: drop silent participants first so that sessions they leave
/// empty start their grace period, then reclaim expired empty sessions,
/// then idle ones.
pub fn run_once(service: &SyncService) -> JanitorPass {
    let config = service.config();
    let silent_participants = service
        .presence()
        .sweep_silent(config.presence.heartbeat_timeout());
    let empty_sessions = service
        .store()
        .sweep_empty(config.session.empty_grace())
        .removed_count();
    let idle_sessions = service
        .store()
        .sweep_idle(config.session.idle_timeout())
        .removed_count();
    let pass = JanitorPass {
        silent_participants,
        empty_sessions,
        idle_sessions,
    };
    if pass != JanitorPass::default() {
        info!(
            silent_participants,
            empty_sessions, idle_sessions, "janitor pass reclaimed state"
        );
    }
    pass
}
