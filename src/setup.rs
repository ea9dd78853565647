//! The one-shot provisioning routine: connect, create the table if missing,
//! commit, verify, release.
//!
//! No retries and no migration logic. A table that already exists is left
//! exactly as it is, even if its shape no longer matches
//! [`CREATE_WAREHOUSE_SUBMISSIONS`].

use crate::config::DbConfig;
use crate::console::Console;
use crate::db::models::ColumnInfo;
use crate::db::mysql::SubmissionStore;
use crate::db::schema::{CREATE_WAREHOUSE_SUBMISSIONS, TABLE_NAME};
use crate::error::WarehouseError;
use sqlx::{ConnectOptions, Connection, MySqlConnection};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// What the verification reads found after the DDL was committed.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupReport {
    pub tables: Vec<String>,
    pub columns: Vec<ColumnInfo>,
    pub row_count: i64,
}

/// Holds the single connection for the lifetime of one setup run.
pub struct SetupSession {
    conn: Option<MySqlConnection>,
    console: Console,
}

impl SetupSession {
    /// Open the connection, giving up after [`CONNECT_TIMEOUT`].
    pub async fn connect(cfg: &DbConfig, console: &Console) -> Result<Self, WarehouseError> {
        Self::connect_with_timeout(cfg, console, CONNECT_TIMEOUT).await
    }

    pub async fn connect_with_timeout(
        cfg: &DbConfig,
        console: &Console,
        limit: Duration,
    ) -> Result<Self, WarehouseError> {
        let console = *console;
        console.step(1, "Connecting to MySQL...");
        let password = if cfg.password.is_some() {
            "SET (hidden)"
        } else {
            "NOT SET"
        };
        info!(
            host = %cfg.host_display(),
            port = cfg.port,
            database = %cfg.name,
            user = %cfg.user.as_deref().unwrap_or("<unset>"),
            password,
            ssl = cfg.ssl,
            timeout_secs = limit.as_secs(),
            "connecting"
        );

        match open(cfg, limit).await {
            Ok(conn) => {
                console.ok("Connected successfully!");
                Ok(Self {
                    conn: Some(conn),
                    console,
                })
            }
            Err(e) => {
                error!(host = %cfg.host_display(), port = cfg.port, error = %e, "connection failed");
                console.fail(format!("Connection failed: {e}"));
                console.config_checklist();
                Err(e)
            }
        }
    }

    /// Create the table if absent, commit, then run the verification reads.
    pub async fn provision(&mut self) -> Result<SetupReport, WarehouseError> {
        let console = self.console;
        let result = self.provision_inner().await;
        if let Err(e) = &result {
            error!(error = %e, "setup failed");
            console.line_break();
            console.fail(format!("Error: {e}"));
        }
        result
    }

    async fn provision_inner(&mut self) -> Result<SetupReport, WarehouseError> {
        let console = self.console;
        let conn = self.conn.as_mut().ok_or(WarehouseError::ConnectionClosed)?;

        console.step(2, &format!("Creating {TABLE_NAME} table..."));
        let mut tx = conn.begin().await?;
        sqlx::raw_sql(CREATE_WAREHOUSE_SUBMISSIONS)
            .execute(&mut *tx)
            .await?;
        console.ok("Table created/verified successfully!");

        console.step(3, "Committing changes...");
        tx.commit().await?;
        console.ok("Changes committed!");
        debug!(table = TABLE_NAME, "schema committed");

        let mut store = SubmissionStore::new(conn);

        console.step(4, "Verifying tables in database...");
        let tables = store.list_tables().await?;
        console.table_list(&tables);

        console.step(5, "Verifying table structure...");
        let columns = store.describe().await?;
        console.column_list(&columns);

        console.step(6, "Checking existing data...");
        let row_count = store.count().await?;
        console.detail(format!("Current records in table: {row_count}"));

        info!(
            tables = tables.len(),
            columns = columns.len(),
            rows = row_count,
            "verification complete"
        );
        Ok(SetupReport {
            tables,
            columns,
            row_count,
        })
    }

    /// Provision, then release the connection whatever the outcome.
    pub async fn provision_and_close(&mut self) -> Result<SetupReport, WarehouseError> {
        let outcome = self.provision().await;
        if let Err(e) = self.close().await {
            warn!(error = %e, "failed to close connection cleanly");
        }
        outcome
    }

    /// Release the connection. Calling it again is a no-op.
    pub async fn close(&mut self) -> Result<(), WarehouseError> {
        if let Some(conn) = self.conn.take() {
            conn.close().await?;
            debug!("connection closed");
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }
}

async fn open(cfg: &DbConfig, limit: Duration) -> Result<MySqlConnection, WarehouseError> {
    let opts = cfg.connect_options();
    match timeout(limit, opts.connect()).await {
        Ok(Ok(conn)) => Ok(conn),
        Ok(Err(e)) => Err(WarehouseError::Connection(e)),
        Err(_) => Err(WarehouseError::ConnectTimeout(limit)),
    }
}

/// Full setup pass. The connection is released on every path once opened.
pub async fn run_setup(cfg: &DbConfig, console: &Console) -> Result<SetupReport, WarehouseError> {
    console.banner();

    let mut session = SetupSession::connect(cfg, console).await?;
    let report = session.provision_and_close().await?;
    console.complete();
    Ok(report)
}
