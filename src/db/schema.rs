//! SQL DDL for the warehouse submissions table.
//! MySQL/InnoDB only; the statement is kept byte-for-byte compatible with
//! the one the submissions service was deployed against.

use super::models::ColumnInfo;

pub const TABLE_NAME: &str = "warehouse_submissions";

/// MySQL schema with:
/// - `id` INT AUTO_INCREMENT PRIMARY KEY
/// - `warehouse_hours` DECIMAL(10, 2)
/// - `created_at` / `updated_at` maintained by the server
/// - one submission per (division, month, year) via `unique_submission`
/// - lookup indexes on division and on the submission period
pub const CREATE_WAREHOUSE_SUBMISSIONS: &str = r#"CREATE TABLE IF NOT EXISTS warehouse_submissions (
    id INT AUTO_INCREMENT PRIMARY KEY,
    division VARCHAR(10) NOT NULL,
    submission_month INT NOT NULL,
    submission_year INT NOT NULL,
    warehouse_hours DECIMAL(10, 2) NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
    UNIQUE KEY unique_submission (division, submission_month, submission_year),
    INDEX idx_division (division),
    INDEX idx_month_year (submission_month, submission_year)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4"#;

/// One expected column as reported by `DESCRIBE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column_type: &'static str,
    pub nullable: bool,
}

pub const EXPECTED_COLUMNS: [ColumnSpec; 7] = [
    ColumnSpec { name: "id", column_type: "int", nullable: false },
    ColumnSpec { name: "division", column_type: "varchar(10)", nullable: false },
    ColumnSpec { name: "submission_month", column_type: "int", nullable: false },
    ColumnSpec { name: "submission_year", column_type: "int", nullable: false },
    ColumnSpec { name: "warehouse_hours", column_type: "decimal(10,2)", nullable: false },
    ColumnSpec { name: "created_at", column_type: "timestamp", nullable: true },
    ColumnSpec { name: "updated_at", column_type: "timestamp", nullable: true },
];

impl ColumnSpec {
    /// Compare against a described column. MySQL 5.7 reports integer
    /// display widths (`int(11)`), 8.0 does not; both are accepted.
    pub fn matches(&self, col: &ColumnInfo) -> bool {
        col.field == self.name
            && col.nullable == self.nullable
            && normalize_type(&col.column_type) == self.column_type
    }
}

fn normalize_type(raw: &str) -> String {
    let lowered: String = raw
        .to_ascii_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    match lowered.strip_prefix("int(") {
        Some(rest) if rest.ends_with(')') => "int".to_string(),
        _ => lowered,
    }
}
