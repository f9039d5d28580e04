use super::actor::{NurseApiActor, NurseApiActorHandle};
use super::client::ApiClient;
use super::models::{MyScheduleOutcome, StatusInfo};
use crate::config::Config;
use crate::error::RosterResult;
use crate::schedule::ScheduleRecord;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the nurse API actor
#[derive(Clone)]
pub struct NurseApiHandle {
    actor_handle: NurseApiActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl NurseApiHandle {
    /// Create a new NurseApiHandle and spawn the actor
    pub fn new(config: &Config) -> RosterResult<Self> {
        let client = ApiClient::new(config)?;
        let (mut actor, handle) = NurseApiActor::new(client);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Ok(Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        })
    }

    /// Fetch the logged-in nurse; on success it becomes the current user
    pub async fn fetch_status(&self) -> RosterResult<StatusInfo> {
        self.actor_handle.fetch_status().await
    }

    /// Get the caller's own schedule
    pub async fn my_schedule(&self) -> RosterResult<MyScheduleOutcome> {
        self.actor_handle.fetch_my_schedule().await
    }

    /// Get the full schedule, one record per nurse
    pub async fn full_schedule(&self) -> RosterResult<Vec<ScheduleRecord>> {
        self.actor_handle.fetch_full_schedule().await
    }

    /// Get the nurse remembered from the last status fetch
    pub async fn current_user(&self) -> RosterResult<Option<StatusInfo>> {
        self.actor_handle.current_user().await
    }

    /// Forget the current user, e.g. after logout
    pub async fn clear_session(&self) -> RosterResult<()> {
        self.actor_handle.clear_session().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> RosterResult<()> {
        self.actor_handle.shutdown().await
    }
}
