use super::client::ApiClient;
use super::models::{MyScheduleOutcome, StatusInfo};
use crate::error::{component_error, RosterResult};
use crate::schedule::ScheduleRecord;
use tokio::sync::mpsc;
use tracing::info;

/// The actor that owns the API client and the current-user store
pub struct NurseApiActor {
    client: ApiClient,
    command_rx: mpsc::Receiver<NurseApiCommand>,
    /// Filled by a successful status fetch, emptied on logout
    current_user: Option<StatusInfo>,
}

/// Commands that can be sent to the nurse API actor
pub enum NurseApiCommand {
    FetchStatus(mpsc::Sender<RosterResult<StatusInfo>>),
    FetchMySchedule(mpsc::Sender<RosterResult<MyScheduleOutcome>>),
    FetchFullSchedule(mpsc::Sender<RosterResult<Vec<ScheduleRecord>>>),
    CurrentUser(mpsc::Sender<Option<StatusInfo>>),
    ClearSession(mpsc::Sender<()>),
    Shutdown,
}

/// Handle for communicating with the nurse API actor
#[derive(Clone)]
pub struct NurseApiActorHandle {
    command_tx: mpsc::Sender<NurseApiCommand>,
}

impl NurseApiActorHandle {
    /// Fetch the logged-in nurse and remember it
    pub async fn fetch_status(&self) -> RosterResult<StatusInfo> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(NurseApiCommand::FetchStatus(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    /// Fetch and parse the caller's own schedule
    pub async fn fetch_my_schedule(&self) -> RosterResult<MyScheduleOutcome> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(NurseApiCommand::FetchMySchedule(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    /// Fetch and parse the full schedule of every nurse
    pub async fn fetch_full_schedule(&self) -> RosterResult<Vec<ScheduleRecord>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(NurseApiCommand::FetchFullSchedule(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    /// The nurse from the last successful status fetch
    pub async fn current_user(&self) -> RosterResult<Option<StatusInfo>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(NurseApiCommand::CurrentUser(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))
    }

    /// Forget the current user
    pub async fn clear_session(&self) -> RosterResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(NurseApiCommand::ClearSession(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> RosterResult<()> {
        let _ = self.command_tx.send(NurseApiCommand::Shutdown).await;
        Ok(())
    }
}

impl NurseApiActor {
    /// Create a new actor and return its handle
    pub fn new(client: ApiClient) -> (Self, NurseApiActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            client,
            command_rx,
            current_user: None,
        };

        (actor, NurseApiActorHandle { command_tx })
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Nurse API actor started for {}", self.client.base_url());

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                NurseApiCommand::FetchStatus(response_tx) => {
                    let result = self.client.status().await;
                    if let Ok(status) = &result {
                        self.current_user = Some(status.clone());
                    }
                    let _ = response_tx.send(result).await;
                }
                NurseApiCommand::FetchMySchedule(response_tx) => {
                    let result = self.client.my_schedule().await;
                    let _ = response_tx.send(result).await;
                }
                NurseApiCommand::FetchFullSchedule(response_tx) => {
                    let result = self.client.full_schedule().await;
                    let _ = response_tx.send(result).await;
                }
                NurseApiCommand::CurrentUser(response_tx) => {
                    let _ = response_tx.send(self.current_user.clone()).await;
                }
                NurseApiCommand::ClearSession(response_tx) => {
                    if let Some(user) = self.current_user.take() {
                        info!("Cleared session for nurse {}", user.nurse_id);
                    }
                    let _ = response_tx.send(()).await;
                }
                NurseApiCommand::Shutdown => {
                    info!("Nurse API actor shutting down");
                    break;
                }
            }
        }

        info!("Nurse API actor shut down");
    }
}
