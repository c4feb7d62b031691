use std::path::PathBuf;

use diesel::SqliteConnection;
use tracing::{Instrument, info, instrument};

use crate::COMPONENT;
use crate::db::errors::{DatabaseError, DatabaseSetupError};
use crate::db::manager::ConnectionManager;
use crate::db::migrations::apply_migrations;

pub mod errors;
pub(crate) mod manager;
pub(crate) mod models;
pub(crate) mod queries;

mod migrations;

/// [diesel](https://diesel.rs) generated schema.
#[allow(unused)]
pub(crate) mod schema;

pub type Result<T, E = DatabaseError> = std::result::Result<T, E>;

/// Handle to the transaction store.
///
/// Wraps a connection pool over a single SQLite database file.
#[derive(Clone)]
pub struct Db {
    pool: deadpool_diesel::Pool<ConnectionManager, deadpool::managed::Object<ConnectionManager>>,
}

impl Db {
    /// Open a connection to the DB and apply any pending migrations.
    #[instrument(target = COMPONENT, skip_all)]
    pub async fn load(database_filepath: PathBuf) -> Result<Self, DatabaseSetupError> {
        let Some(database_path) = database_filepath.to_str() else {
            return Err(DatabaseSetupError::InvalidPath);
        };
        let manager = ConnectionManager::new(database_path);
        let pool = deadpool_diesel::Pool::builder(manager).max_size(16).build()?;

        info!(
            target: COMPONENT,
            sqlite = %database_filepath.display(),
            "Connected to the database"
        );

        let me = Db { pool };
        me.query("migrations", apply_migrations).await?;
        Ok(me)
    }

    /// Create and commit a transaction with the queries added in the provided closure.
    pub(crate) async fn transact<R, E, Q, M>(&self, msg: M, query: Q) -> std::result::Result<R, E>
    where
        Q: Send
            + for<'a, 't> FnOnce(&'a mut SqliteConnection) -> std::result::Result<R, E>
            + 'static,
        R: Send + 'static,
        M: Send + ToString,
        E: From<diesel::result::Error>,
        E: From<DatabaseError>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let conn = self
            .pool
            .get()
            .in_current_span()
            .await
            .map_err(|e| DatabaseError::PoolConnection(Box::new(e)))?;

        conn.interact(|conn| <_ as diesel::Connection>::transaction::<R, E, Q>(conn, query))
            .in_current_span()
            .await
            .map_err(|err| E::from(DatabaseError::interact(&msg.to_string(), &err)))?
    }

    /// Run the query _without_ a transaction.
    pub(crate) async fn query<R, E, Q, M>(&self, msg: M, query: Q) -> std::result::Result<R, E>
    where
        Q: Send + FnOnce(&mut SqliteConnection) -> std::result::Result<R, E> + 'static,
        R: Send + 'static,
        M: Send + ToString,
        E: From<DatabaseError>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let conn = self
            .pool
            .get()
            .in_current_span()
            .await
            .map_err(|e| DatabaseError::PoolConnection(Box::new(e)))?;

        conn.interact(move |conn| {
            let r = query(conn)?;
            Ok(r)
        })
        .in_current_span()
        .await
        .map_err(|err| E::from(DatabaseError::interact(&msg.to_string(), &err)))?
    }

    /// Creates an in-memory SQLite connection for testing with migrations applied.
    ///
    /// This bypasses the async connection pool entirely so query functions can be exercised
    /// synchronously.
    #[cfg(test)]
    pub fn test_conn() -> SqliteConnection {
        use diesel::Connection;

        use crate::db::manager::configure_connection;

        let mut conn =
            SqliteConnection::establish(":memory:").expect("in-memory sqlite should always work");
        configure_connection(&mut conn).expect("connection configuration should work");
        apply_migrations(&mut conn).expect("migrations should apply on empty database");
        conn
    }
}

// TESTS
// ================================================================================================
