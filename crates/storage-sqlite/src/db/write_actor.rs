//! Single-writer actor for SQLite.
//!
//! SQLite allows one writer at a time. Instead of letting request
//! handlers contend for the write lock, all mutations are sent as
//! closures to one background task that owns a dedicated connection and
//! runs each job inside an immediate transaction. This also makes the
//! sync engine's read-compare-write conflict check atomic: the compare
//! and the update execute in the same transaction on the same
//! connection, so two devices pushing at once serialize here.

use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use finbook_core::errors::{Error, Result};

type BoxedResult = Box<dyn Any + Send + 'static>;
type Job = Box<dyn FnOnce(&mut SqliteConnection) -> Result<BoxedResult> + Send + 'static>;

/// Error type threaded through the transaction wrapper. Job errors pass
/// through untouched so typed failures (unique violations in
/// particular) survive to the sync engine; only transaction plumbing
/// errors get wrapped.
enum TxError {
    Job(Error),
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(err: diesel::result::Error) -> Self {
        TxError::Diesel(err)
    }
}

/// Handle for submitting write jobs to the actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job, oneshot::Sender<Result<BoxedResult>>)>,
}

impl WriteHandle {
    /// Runs `job` on the writer's connection, inside a transaction, and
    /// returns its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        let boxed: Job = Box::new(move |conn| job(conn).map(|v| Box::new(v) as BoxedResult));
        if self.tx.send((boxed, reply_tx)).await.is_err() {
            return Err(Error::Unexpected(
                "database writer stopped accepting jobs".to_string(),
            ));
        }

        let result = reply_rx
            .await
            .map_err(|_| Error::Unexpected("database writer dropped the reply".to_string()))??;

        result.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            Error::Unexpected("database writer returned an unexpected type".to_string())
        })
    }
}

/// Spawns the writer task. It holds one pool connection for its whole
/// lifetime and processes jobs strictly in arrival order.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(Job, oneshot::Sender<Result<BoxedResult>>)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("could not reserve a connection for the database writer");

        while let Some((job, reply_tx)) = rx.recv().await {
            let outcome = conn
                .immediate_transaction::<BoxedResult, TxError, _>(|c| job(c).map_err(TxError::Job))
                .map_err(|err| match err {
                    TxError::Job(e) => e,
                    TxError::Diesel(e) => StorageError::QueryFailed(e).into(),
                });

            // The requester may have gone away; that's fine.
            let _ = reply_tx.send(outcome);
        }
        // Channel closed: every WriteHandle is gone, the actor winds down.
    });

    WriteHandle { tx }
}
