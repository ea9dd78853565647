//! Database module: schema, models and queries for the submissions table.
//!
//! Layout:
//! - `schema.rs`: MySQL DDL and the column layout it produces
//! - `models.rs`: Rust structs mirroring DB rows and `DESCRIBE` output
//! - `mysql.rs`: queries over a single MySQL connection

pub mod models;
pub mod mysql;
pub mod schema;

pub use models::{ColumnInfo, NewSubmission, WarehouseSubmission};
pub use mysql::SubmissionStore;
pub use schema::{CREATE_WAREHOUSE_SUBMISSIONS, EXPECTED_COLUMNS, TABLE_NAME};
