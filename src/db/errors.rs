use deadpool_sync::InteractError;

// DATABASE ERRORS
// ================================================================================================

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("failed to obtain a connection from the pool")]
    PoolConnection(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),
    #[error("SQLite pool interaction failed: {0}")]
    InteractError(String),
    #[error("failed to apply database migrations: {0}")]
    Migration(String),
    #[error("inserted transaction {0} could not be read back")]
    InsertedRowMissing(i64),
}

impl DatabaseError {
    /// Converts from `InteractError`.
    ///
    /// `InteractError` has a variant that is not `Send + Sync`, which blocks the `Sync` auto
    /// implementation on any error holding it, so the error is flattened into a string here.
    pub fn interact(msg: &(impl ToString + ?Sized), e: &InteractError) -> Self {
        let msg = msg.to_string();
        Self::InteractError(format!("{msg} failed: {e:?}"))
    }
}

// DATABASE SETUP ERRORS
// ================================================================================================

#[derive(Debug, thiserror::Error)]
pub enum DatabaseSetupError {
    #[error("database filepath is not valid UTF-8")]
    InvalidPath,
    #[error("database error")]
    Database(#[from] DatabaseError),
    #[error("pool build error")]
    PoolBuild(#[from] deadpool::managed::BuildError),
}
