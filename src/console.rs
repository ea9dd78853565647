//! Operator-facing progress output. Not meant to be parsed.

use crate::config::REQUIRED_KEYS;
use crate::db::models::ColumnInfo;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy)]
pub struct Console {
    quiet: bool,
}

impl Console {
    pub fn stdout() -> Self {
        Self { quiet: false }
    }

    /// Swallows everything; used by tests and embedders.
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    fn line(&self, text: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", text.as_ref());
        }
    }

    fn rule(&self) {
        self.line("=".repeat(RULE_WIDTH));
    }

    pub fn banner(&self) {
        self.rule();
        self.line("WAREHOUSE HOURS - DATABASE SETUP");
        self.rule();
    }

    pub fn line_break(&self) {
        self.line("");
    }

    pub fn step(&self, number: u8, title: &str) {
        self.line(format!("\n{number}. {title}"));
    }

    pub fn ok(&self, msg: &str) {
        self.line(format!("   ✅ {msg}"));
    }

    pub fn fail(&self, msg: impl std::fmt::Display) {
        self.line(format!("   ❌ {msg}"));
    }

    pub fn detail(&self, msg: impl std::fmt::Display) {
        self.line(format!("   {msg}"));
    }

    pub fn table_list(&self, tables: &[String]) {
        self.detail(format!("Found {} table(s):", tables.len()));
        for table in tables {
            self.line(format!("      - {table}"));
        }
    }

    pub fn column_list(&self, columns: &[ColumnInfo]) {
        self.detail(format!("Table has {} column(s):", columns.len()));
        for col in columns {
            self.line(format!("      • {:20} - {:15}", col.field, col.column_type));
        }
    }

    /// Printed after a failed connect: which keys the operator must provide.
    pub fn config_checklist(&self) {
        self.line("\n⚠️  Make sure your environment (or .env file) has:");
        for (key, placeholder) in REQUIRED_KEYS {
            self.line(format!("   {key}={placeholder}"));
        }
    }

    pub fn complete(&self) {
        self.line_break();
        self.rule();
        self.line("✅ DATABASE SETUP COMPLETE!");
        self.rule();
        self.line("\nYour database is ready to use!");
        self.rule();
    }
}
