use crate::db::models::{ColumnInfo, NewSubmission, WarehouseSubmission};
use crate::db::schema::TABLE_NAME;
use crate::error::WarehouseError;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlConnection, Row};

/// Queries against `warehouse_submissions` over a single borrowed connection.
pub struct SubmissionStore<'c> {
    conn: &'c mut MySqlConnection,
}

impl<'c> SubmissionStore<'c> {
    pub fn new(conn: &'c mut MySqlConnection) -> Self {
        Self { conn }
    }

    /// Names of every table in the connected database.
    pub async fn list_tables(&mut self) -> Result<Vec<String>, WarehouseError> {
        let rows = sqlx::raw_sql("SHOW TABLES")
            .fetch_all(&mut *self.conn)
            .await?;
        rows.iter().map(|row| text_at(row, 0)).collect()
    }

    /// Column layout of the submissions table.
    pub async fn describe(&mut self) -> Result<Vec<ColumnInfo>, WarehouseError> {
        // SHOW/DESCRIBE go over the text protocol; not every server accepts them prepared.
        let sql = format!("DESCRIBE {TABLE_NAME}");
        let rows = sqlx::raw_sql(&sql).fetch_all(&mut *self.conn).await?;
        rows.iter().map(Self::row_to_column).collect()
    }

    pub async fn count(&mut self) -> Result<i64, WarehouseError> {
        let sql = format!("SELECT COUNT(*) AS count FROM {TABLE_NAME}");
        let row = sqlx::raw_sql(&sql).fetch_one(&mut *self.conn).await?;
        Ok(row.try_get("count")?)
    }

    /// Insert a new submission and return its id.
    /// A second submission for the same division and period is rejected by
    /// the `unique_submission` key and surfaces as `DuplicateSubmission`.
    pub async fn insert(&mut self, new: &NewSubmission) -> Result<u64, WarehouseError> {
        new.validate()?;
        let division = new.division.trim();
        let result = sqlx::query(
            r#"INSERT INTO warehouse_submissions
               (division, submission_month, submission_year, warehouse_hours)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(division)
        .bind(new.submission_month)
        .bind(new.submission_year)
        .bind(new.warehouse_hours)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                WarehouseError::DuplicateSubmission {
                    division: division.to_string(),
                    month: new.submission_month,
                    year: new.submission_year,
                }
            }
            other => other.into(),
        })?;
        Ok(result.last_insert_id())
    }

    pub async fn find_by_period(
        &mut self,
        division: &str,
        month: i32,
        year: i32,
    ) -> Result<Option<WarehouseSubmission>, WarehouseError> {
        let found = sqlx::query_as::<_, WarehouseSubmission>(
            r#"SELECT id, division, submission_month, submission_year,
               CAST(warehouse_hours AS CHAR) AS warehouse_hours,
               created_at, updated_at
               FROM warehouse_submissions
               WHERE division = ? AND submission_month = ? AND submission_year = ?"#,
        )
        .bind(division)
        .bind(month)
        .bind(year)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(found)
    }

    fn row_to_column(row: &MySqlRow) -> Result<ColumnInfo, WarehouseError> {
        let field = text_named(row, "Field")?;
        let column_type = text_named(row, "Type")?;
        let null = text_named(row, "Null")?;
        let key = text_named(row, "Key")?;
        let default: Option<Vec<u8>> = row.try_get("Default")?;
        let extra = text_named(row, "Extra")?;

        Ok(ColumnInfo {
            field,
            column_type,
            nullable: null.eq_ignore_ascii_case("YES"),
            key,
            default: default.map(|d| String::from_utf8_lossy(&d).into_owned()),
            extra,
        })
    }
}

// Metadata statements may report their text columns with a binary collation,
// which `String` refuses to decode; read raw bytes instead.
fn text_at(row: &MySqlRow, index: usize) -> Result<String, WarehouseError> {
    let bytes: Vec<u8> = row.try_get(index)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn text_named(row: &MySqlRow, name: &str) -> Result<String, WarehouseError> {
    let bytes: Option<Vec<u8>> = row.try_get(name)?;
    Ok(bytes
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .unwrap_or_default())
}
