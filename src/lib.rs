pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod setup;

pub use config::{Config, DbConfig};
pub use console::Console;
pub use error::WarehouseError;
pub use setup::{SetupReport, SetupSession, run_setup};
