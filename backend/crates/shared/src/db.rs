//! Database execution context
//!
//! Gateway operations are written once against an *executor*: either a bare
//! pooled connection or an open transaction. [`Store`] hands out either kind,
//! and owns the begin / commit / rollback discipline for the latter.

use std::any::Any;
use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::panic::{AssertUnwindSafe, Location};
use std::pin::Pin;
use std::time::Duration;

use futures::FutureExt;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};

use crate::error::app_error::{AppError, AppResult, ResultExt};
use crate::error::conversions::SqlxResultExt;

/// Upper bound on a single gateway query.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Future returned by a transaction body, borrowing the executor for `'e`.
pub type TxFuture<'e, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'e>>;

/// What a transaction body came back with: its own result, or a panic payload.
pub type TxOutcome<T> = Result<AppResult<T>, Box<dyn Any + Send>>;

// ============================================================================
// Store capability
// ============================================================================

/// Source of executors.
///
/// `transaction` begins a unit of work, runs `f` against it, commits when `f`
/// returns `Ok`, and rolls back when it returns `Err` or panics. The error
/// returned by `f` reaches the caller unchanged; a panic is re-raised after
/// the rollback.
#[trait_variant::make(Store: Send)]
pub trait LocalStore {
    type Executor: Send;

    async fn acquire(&self) -> AppResult<Self::Executor>;

    async fn transaction<T, F>(&self, op: &'static str, f: F) -> AppResult<T>
    where
        T: Send,
        F: for<'e> FnOnce(&'e mut Self::Executor) -> TxFuture<'e, T> + Send;
}

// ============================================================================
// PostgreSQL
// ============================================================================

/// A pooled connection or an open transaction.
///
/// Both deref to [`PgConnection`], so a query is written as
/// `.fetch_one(&mut **executor)` regardless of which one it runs on.
pub enum PgExecutor {
    Pooled(PoolConnection<Postgres>),
    Transaction(Transaction<'static, Postgres>),
}

impl Deref for PgExecutor {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        match self {
            Self::Pooled(conn) => &**conn,
            Self::Transaction(tx) => &**tx,
        }
    }
}

impl DerefMut for PgExecutor {
    fn deref_mut(&mut self) -> &mut PgConnection {
        match self {
            Self::Pooled(conn) => &mut **conn,
            Self::Transaction(tx) => &mut **tx,
        }
    }
}

/// [`Store`] over a `sqlx` pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Store for PgStore {
    type Executor = PgExecutor;

    async fn acquire(&self) -> AppResult<PgExecutor> {
        let conn = self.pool.acquire().await.or_db_err("Store::acquire")?;
        Ok(PgExecutor::Pooled(conn))
    }

    async fn transaction<T, F>(&self, op: &'static str, f: F) -> AppResult<T>
    where
        T: Send,
        F: for<'e> FnOnce(&'e mut Self::Executor) -> TxFuture<'e, T> + Send,
    {
        let tx = self.pool.begin().await.or_db_err(op)?;
        let mut executor = PgExecutor::Transaction(tx);

        let outcome = run_body(f(&mut executor)).await;

        // The body may have swapped the executor out; only the transaction we
        // began is ever committed.
        let PgExecutor::Transaction(tx) = executor else {
            return Err(AppError::internal(
                op,
                std::io::Error::other("transaction executor was replaced"),
            ));
        };

        settle(op, PgUnit(tx), outcome).await
    }
}

/// Lifetime-free handle on the transaction, so the `Send` bound on
/// `transaction`'s future can be proven without naming `'static`.
struct PgUnit(Transaction<'static, Postgres>);

impl UnitOfWork for PgUnit {
    fn commit(self, op: &'static str) -> impl Future<Output = AppResult<()>> + Send {
        UnitOfWork::commit(self.0, op)
    }

    fn rollback(self, op: &'static str) -> impl Future<Output = ()> + Send {
        UnitOfWork::rollback(self.0, op)
    }
}

impl UnitOfWork for Transaction<'static, Postgres> {
    async fn commit(self, op: &'static str) -> AppResult<()> {
        // Detached so a dropped request cannot abandon a commit in flight.
        tokio::spawn(Transaction::commit(self))
            .await
            .or_internal(op)?
            .or_db_err(op)
    }

    async fn rollback(self, op: &'static str) {
        if let Err(e) = Transaction::rollback(self).await {
            tracing::warn!(op, error = %e, "rollback failed");
        }
    }
}

// ============================================================================
// Transaction discipline
// ============================================================================

/// An open unit of work that can be finished exactly once.
#[trait_variant::make(UnitOfWork: Send)]
pub trait LocalUnitOfWork: Sized {
    async fn commit(self, op: &'static str) -> AppResult<()>;

    /// Failures are logged, never returned: the caller already has an error.
    async fn rollback(self, op: &'static str);
}

/// Drive a transaction body, catching a panic instead of unwinding through
/// the open unit of work.
pub async fn run_body<T>(body: TxFuture<'_, T>) -> TxOutcome<T> {
    AssertUnwindSafe(body).catch_unwind().await
}

/// Finish `unit` according to what its body returned.
///
/// `Ok` commits, `Err` rolls back and hands the body's error back untouched,
/// a panic rolls back and resumes unwinding.
pub async fn settle<U, T>(op: &'static str, unit: U, outcome: TxOutcome<T>) -> AppResult<T>
where
    U: UnitOfWork,
{
    match outcome {
        Ok(Ok(value)) => {
            unit.commit(op).await?;
            Ok(value)
        }
        Ok(Err(err)) => {
            unit.rollback(op).await;
            Err(err)
        }
        Err(panic) => {
            unit.rollback(op).await;
            std::panic::resume_unwind(panic)
        }
    }
}

// ============================================================================
// Deadlines
// ============================================================================

/// Bound `fut` by [`QUERY_TIMEOUT`].
///
/// Expiry surfaces as INTERNAL carrying `op` and the caller's location.
#[track_caller]
pub fn with_deadline<F, T>(op: &'static str, fut: F) -> impl Future<Output = AppResult<T>>
where
    F: Future<Output = AppResult<T>>,
{
    let location = Location::caller();
    deadline(op, QUERY_TIMEOUT, location, fut)
}

async fn deadline<F, T>(
    op: &'static str,
    limit: Duration,
    location: &'static Location<'static>,
    fut: F,
) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(elapsed) => Err(AppError::internal(op, elapsed).with_location(location)),
    }
}

// ============================================================================
// Pool construction
// ============================================================================

/// Connection pool limits.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            max_lifetime: Duration::from_secs(5 * 60),
            idle_timeout: Duration::from_secs(60),
            acquire_timeout: QUERY_TIMEOUT,
        }
    }
}

impl PoolSettings {
    pub fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .max_lifetime(self.max_lifetime)
            .idle_timeout(self.idle_timeout)
            .acquire_timeout(self.acquire_timeout)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::kind::ErrorKind;

    #[tokio::test]
    async fn test_deadline_passes_result_through() {
        let here = Location::caller();
        let result = deadline("op", Duration::from_secs(1), here, async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);

        let result: AppResult<()> = deadline("op", Duration::from_secs(1), here, async {
            Err(AppError::not_found("op", "Report Not Found"))
        })
        .await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_deadline_expiry_is_internal() {
        let here = Location::caller();
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        };
        let result: AppResult<()> =
            deadline("ReportRepository::get_all", Duration::from_millis(10), here, slow).await;
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.op(), "ReportRepository::get_all");
        assert_eq!(err.location().unwrap().line(), here.line());
    }

    /// Records how it was finished.
    struct Recorder(Arc<Mutex<Vec<&'static str>>>, bool);

    impl UnitOfWork for Recorder {
        async fn commit(self, _op: &'static str) -> AppResult<()> {
            self.0.lock().unwrap().push("commit");
            if self.1 {
                return Err(AppError::unavailable("commit", "connection lost"));
            }
            Ok(())
        }

        async fn rollback(self, _op: &'static str) {
            self.0.lock().unwrap().push("rollback");
        }
    }

    fn recorder() -> (Recorder, Arc<Mutex<Vec<&'static str>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (Recorder(log.clone(), false), log)
    }

    #[tokio::test]
    async fn test_ok_body_commits() {
        let (unit, log) = recorder();
        let outcome = run_body(Box::pin(async { Ok::<_, AppError>(7) })).await;

        assert_eq!(settle("op", unit, outcome).await.unwrap(), 7);
        assert_eq!(*log.lock().unwrap(), vec!["commit"]);
    }

    #[tokio::test]
    async fn test_commit_failure_surfaces() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let outcome = run_body(Box::pin(async { Ok::<_, AppError>(()) })).await;

        let err = settle("op", Recorder(log.clone(), true), outcome)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert_eq!(*log.lock().unwrap(), vec!["commit"]);
    }

    #[tokio::test]
    async fn test_err_body_rolls_back_and_keeps_error() {
        let (unit, log) = recorder();
        let outcome: TxOutcome<()> = run_body(Box::pin(async {
            Err(AppError::conflict("ReportRepository::create", "Email already taken"))
        }))
        .await;

        let err = settle("Store::transaction", unit, outcome).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.op(), "ReportRepository::create");
        assert_eq!(err.public_messages(), vec!["Email already taken".to_string()]);
        assert_eq!(*log.lock().unwrap(), vec!["rollback"]);
    }

    #[tokio::test]
    async fn test_panicking_body_rolls_back_then_resumes() {
        let (unit, log) = recorder();
        let outcome: TxOutcome<()> = run_body(Box::pin(async {
            if log.lock().unwrap().is_empty() {
                panic!("body blew up");
            }
            Ok(())
        }))
        .await;
        assert!(outcome.is_err());

        let resumed = AssertUnwindSafe(settle("op", unit, outcome))
            .catch_unwind()
            .await;
        let payload = resumed.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"body blew up"));
        assert_eq!(*log.lock().unwrap(), vec!["rollback"]);
    }

    #[test]
    fn test_default_pool_settings() {
        let settings = PoolSettings::default();
        assert_eq!(settings.max_connections, 10);
        assert_eq!(settings.max_lifetime, Duration::from_secs(300));
        assert_eq!(settings.acquire_timeout, QUERY_TIMEOUT);
    }
}
