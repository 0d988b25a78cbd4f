use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use crate::{
    api::{ApiError, NewUser, UserApi, UserUpdate},
    core::store::{OperationState, StoreError, UserStore},
    types::{Gender, OpKind, UserId},
    user::{QueryParams, QueryPatch, UserDraft, UserRecord},
    view::stats::Statistics,
};

use super::events::RosterEvent;

/// Failure surfaced by a handle operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Classified API failure, already recorded in the matching slot.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Direct collection mutation failure.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The state loop is gone.
    #[error("runtime channel closed")]
    ChannelClosed,
}

/// Bounds for the command queue and the event fan-out buffer.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Command channel capacity.
    pub command_queue_bound: usize,
    /// Broadcast buffer capacity per subscriber.
    pub events_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            events_capacity: 1024,
        }
    }
}

/// Cloneable handle onto the store runtime.
///
/// State mutations are serialized through the single-writer loop, but network
/// calls run in the calling task, so several operations may be in flight at
/// once. Two writes racing on one identifier resolve by last response wins;
/// the outcome is final-consistent, never corrupt or duplicated.
pub struct RosterHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<RosterEvent>,
    api: Arc<dyn UserApi>,
}

impl Clone for RosterHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
            api: Arc::clone(&self.api),
        }
    }
}

enum Command {
    Begin {
        kind: OpKind,
    },
    ApplyLoaded {
        users: Vec<UserRecord>,
        resp: oneshot::Sender<usize>,
    },
    ApplyCreated {
        user: UserRecord,
        resp: oneshot::Sender<Result<UserRecord, RuntimeError>>,
    },
    ApplyUpdated {
        user: UserRecord,
        resp: oneshot::Sender<UserRecord>,
    },
    ApplyDeleted {
        id: UserId,
        resp: oneshot::Sender<()>,
    },
    Fail {
        kind: OpKind,
        error: ApiError,
        resp: oneshot::Sender<()>,
    },
    SetQuery {
        patch: QueryPatch,
        resp: oneshot::Sender<()>,
    },
    ClearFilters {
        resp: oneshot::Sender<()>,
    },
    SetExporting {
        active: bool,
        resp: oneshot::Sender<()>,
    },
    Users {
        resp: oneshot::Sender<Vec<UserRecord>>,
    },
    Filtered {
        resp: oneshot::Sender<Vec<UserRecord>>,
    },
    Stats {
        resp: oneshot::Sender<Statistics>,
    },
    Ops {
        resp: oneshot::Sender<OperationState>,
    },
    Query {
        resp: oneshot::Sender<QueryParams>,
    },
    Get {
        id: UserId,
        resp: oneshot::Sender<Option<UserRecord>>,
    },
    Reset {
        resp: oneshot::Sender<()>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Spawns the single-writer state loop and returns a handle onto it.
pub fn spawn_roster(
    store: UserStore,
    api: Arc<dyn UserApi>,
    config: RuntimeConfig,
) -> RosterHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<RosterEvent>(config.events_capacity);

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut store = store;
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut store, &events_tx_loop) {
                break;
            }
        }
    });

    RosterHandle {
        cmd_tx,
        events_tx,
        api,
    }
}

impl RosterHandle {
    /// Subscribes to the runtime event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.events_tx.subscribe()
    }

    /// Loads the full collection from the remote endpoint, replacing the
    /// local one wholesale on success. On failure the previous collection is
    /// kept and the load slot records the classified error. Safe to call
    /// repeatedly; each call supersedes the visible state with the latest
    /// outcome. Returns the number of records held.
    pub async fn load(&self) -> Result<usize, RuntimeError> {
        self.begin(OpKind::Load).await?;
        match self.api.list(None).await {
            Ok(users) => {
                let (tx, rx) = oneshot::channel();
                self.send(Command::ApplyLoaded { users, resp: tx }).await?;
                rx.await.map_err(|_| RuntimeError::ChannelClosed)
            }
            Err(err) => {
                self.fail(OpKind::Load, err.clone()).await?;
                Err(err.into())
            }
        }
    }

    /// Creates a record from `draft` and appends it, preserving order.
    ///
    /// The gender text is guarded locally before any network round trip; an
    /// invalid value fails fast with `InvalidInput` recorded in the create
    /// slot. Returns the record as assigned by the server.
    pub async fn create(&self, draft: UserDraft) -> Result<UserRecord, RuntimeError> {
        self.begin(OpKind::Create).await?;
        let Some(gender) = Gender::parse(&draft.gender) else {
            let err = ApiError::InvalidInput("a valid gender is required".to_string());
            self.fail(OpKind::Create, err.clone()).await?;
            return Err(err.into());
        };

        let payload = NewUser {
            name: draft.name,
            email: draft.email,
            age: draft.age,
            gender,
            is_active: true,
        };

        match self.api.create(payload).await {
            Ok(user) => {
                debug!(id = user.id, "reconciling created user");
                let (tx, rx) = oneshot::channel();
                self.send(Command::ApplyCreated { user, resp: tx }).await?;
                rx.await.map_err(|_| RuntimeError::ChannelClosed)?
            }
            Err(err) => {
                self.fail(OpKind::Create, err.clone()).await?;
                Err(err.into())
            }
        }
    }

    /// Replaces the record with identifier `id` using `draft`, keeping its
    /// position. Local absence of the identifier is a benign no-op; the
    /// canonical state is the server's. Same local gender guard as `create`.
    pub async fn update(&self, id: UserId, draft: UserDraft) -> Result<UserRecord, RuntimeError> {
        self.begin(OpKind::Update).await?;
        let Some(gender) = Gender::parse(&draft.gender) else {
            let err = ApiError::InvalidInput("a valid gender is required".to_string());
            self.fail(OpKind::Update, err.clone()).await?;
            return Err(err.into());
        };

        let payload = UserUpdate {
            id,
            name: draft.name,
            email: draft.email,
            age: draft.age,
            gender,
        };

        match self.api.update(payload).await {
            Ok(user) => {
                let (tx, rx) = oneshot::channel();
                self.send(Command::ApplyUpdated { user, resp: tx }).await?;
                rx.await.map_err(|_| RuntimeError::ChannelClosed)
            }
            Err(err) => {
                self.fail(OpKind::Update, err.clone()).await?;
                Err(err.into())
            }
        }
    }

    /// Deletes the record with identifier `id`, removing it locally on
    /// success if present.
    pub async fn delete(&self, id: UserId) -> Result<(), RuntimeError> {
        self.begin(OpKind::Delete).await?;
        match self.api.delete(id).await {
            Ok(()) => {
                let (tx, rx) = oneshot::channel();
                self.send(Command::ApplyDeleted { id, resp: tx }).await?;
                rx.await.map_err(|_| RuntimeError::ChannelClosed)
            }
            Err(err) => {
                self.fail(OpKind::Delete, err.clone()).await?;
                Err(err.into())
            }
        }
    }

    /// Merges a patch into the query parameters and recomputes the view.
    pub async fn set_query(&self, patch: QueryPatch) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::SetQuery { patch, resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Resets the query parameters to their defaults.
    pub async fn clear_filters(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::ClearFilters { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Flips the export slot's loading flag for collaborator layers driving
    /// a download.
    pub async fn set_exporting(&self, active: bool) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::SetExporting { active, resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Records a collaborator failure in the slot for `kind` without
    /// touching any other slot.
    pub async fn record_failure(&self, kind: OpKind, error: ApiError) -> Result<(), RuntimeError> {
        self.fail(kind, error).await
    }

    /// Snapshot of the full collection in canonical order.
    pub async fn users(&self) -> Result<Vec<UserRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Users { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Snapshot of the filtered/sorted view under the active parameters.
    pub async fn filtered(&self) -> Result<Vec<UserRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Filtered { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Snapshot of the aggregate statistics over the full collection.
    pub async fn statistics(&self) -> Result<Statistics, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Stats { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Snapshot of the per-operation state.
    pub async fn operation_state(&self) -> Result<OperationState, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Ops { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Snapshot of the active query parameters.
    pub async fn query(&self) -> Result<QueryParams, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Query { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Snapshot of one record by identifier.
    pub async fn get(&self, id: UserId) -> Result<Option<UserRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Get { id, resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Restores the initial state: empty collection, default query, idle
    /// slots.
    pub async fn reset(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Reset { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the state loop after draining queued commands.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Shutdown { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    async fn send(&self, cmd: Command) -> Result<(), RuntimeError> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| RuntimeError::ChannelClosed)
    }

    async fn begin(&self, kind: OpKind) -> Result<(), RuntimeError> {
        self.send(Command::Begin { kind }).await
    }

    async fn fail(&self, kind: OpKind, error: ApiError) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Fail {
            kind,
            error,
            resp: tx,
        })
        .await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    store: &mut UserStore,
    events_tx: &broadcast::Sender<RosterEvent>,
) -> bool {
    match cmd {
        Command::Begin { kind } => {
            store.begin(kind);
        }
        Command::ApplyLoaded { users, resp } => {
            store.replace_all(users);
            store.succeed(OpKind::Load);
            let count = store.len();
            let _ = events_tx.send(RosterEvent::Loaded { count });
            let _ = resp.send(count);
        }
        Command::ApplyCreated { user, resp } => {
            let id = user.id;
            let res = match store.insert(user.clone()) {
                Ok(()) => {
                    store.succeed(OpKind::Create);
                    let _ = events_tx.send(RosterEvent::Created { id });
                    Ok(user)
                }
                Err(err) => {
                    // Server handed back an id we already hold: a uniqueness
                    // conflict from the store's point of view.
                    let conflict = ApiError::Conflict(err.to_string());
                    store.fail(OpKind::Create, conflict.clone());
                    let _ = events_tx.send(RosterEvent::Failed {
                        kind: OpKind::Create,
                    });
                    Err(RuntimeError::Api(conflict))
                }
            };
            let _ = resp.send(res);
        }
        Command::ApplyUpdated { user, resp } => {
            let id = user.id;
            store.replace(user.clone());
            store.succeed(OpKind::Update);
            let _ = events_tx.send(RosterEvent::Updated { id });
            let _ = resp.send(user);
        }
        Command::ApplyDeleted { id, resp } => {
            store.remove(id);
            store.succeed(OpKind::Delete);
            let _ = events_tx.send(RosterEvent::Deleted { id });
            let _ = resp.send(());
        }
        Command::Fail { kind, error, resp } => {
            store.fail(kind, error);
            let _ = events_tx.send(RosterEvent::Failed { kind });
            let _ = resp.send(());
        }
        Command::SetQuery { patch, resp } => {
            store.set_query(&patch);
            let _ = events_tx.send(RosterEvent::QueryChanged);
            let _ = resp.send(());
        }
        Command::ClearFilters { resp } => {
            store.clear_filters();
            let _ = events_tx.send(RosterEvent::QueryChanged);
            let _ = resp.send(());
        }
        Command::SetExporting { active, resp } => {
            if active {
                store.begin(OpKind::Export);
            } else {
                store.succeed(OpKind::Export);
            }
            let _ = resp.send(());
        }
        Command::Users { resp } => {
            let _ = resp.send(store.users());
        }
        Command::Filtered { resp } => {
            let _ = resp.send(store.filtered());
        }
        Command::Stats { resp } => {
            let _ = resp.send(store.statistics());
        }
        Command::Ops { resp } => {
            let _ = resp.send(store.operation_state().clone());
        }
        Command::Query { resp } => {
            let _ = resp.send(store.query().clone());
        }
        Command::Get { id, resp } => {
            let _ = resp.send(store.get_cloned(id));
        }
        Command::Reset { resp } => {
            store.reset();
            let _ = resp.send(());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
