//! Contains the type representing the database of the service.

use sea_orm::DbConn;

/// Represents the database of the service.
///
/// This handle is passed explicitly to every query; it holds the connection pool.
pub struct Database {
    /// The SQL database connection pool.
    pub sql_conn: DbConn,
}

impl Database {
    /// Returns the database from the URL to the SQL database.
    pub async fn from_db_url(db_url: String) -> Result<Self, sea_orm::DbErr> {
        let sql_conn = sea_orm::Database::connect(db_url).await?;
        Ok(Self { sql_conn })
    }

    /// Returns the amount of connections currently held by the pool, and how many of them
    /// are idle.
    pub fn pool_state(&self) -> (u32, usize) {
        #[allow(unreachable_patterns)]
        match &self.sql_conn {
            #[cfg(feature = "sqlite")]
            sea_orm::DatabaseConnection::SqlxSqlitePoolConnection(_) => {
                let pool = self.sql_conn.get_sqlite_connection_pool();
                (pool.size(), pool.num_idle())
            }
            #[cfg(feature = "postgres")]
            sea_orm::DatabaseConnection::SqlxPostgresPoolConnection(_) => {
                let pool = self.sql_conn.get_postgres_connection_pool();
                (pool.size(), pool.num_idle())
            }
            _ => (0, 0),
        }
    }
}

impl From<DbConn> for Database {
    fn from(sql_conn: DbConn) -> Self {
        Self { sql_conn }
    }
}

// For some reasons, sea_orm::DbConn doesn't implement Clone
impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            sql_conn: match &self.sql_conn {
                #[cfg(feature = "sqlite")]
                sea_orm::DatabaseConnection::SqlxSqlitePoolConnection(conn) => {
                    sea_orm::DatabaseConnection::SqlxSqlitePoolConnection(conn.clone())
                }
                #[cfg(feature = "postgres")]
                sea_orm::DatabaseConnection::SqlxPostgresPoolConnection(conn) => {
                    sea_orm::DatabaseConnection::SqlxPostgresPoolConnection(conn.clone())
                }
                sea_orm::DatabaseConnection::Disconnected => {
                    sea_orm::DatabaseConnection::Disconnected
                }
            },
        }
    }
}
