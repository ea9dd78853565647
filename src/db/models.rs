use crate::error::WarehouseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Longest division code `VARCHAR(10)` accepts.
pub const MAX_DIVISION_LEN: usize = 10;

/// Exclusive upper bound for `DECIMAL(10, 2)`: eight integer digits.
pub const MAX_WAREHOUSE_HOURS: f64 = 100_000_000.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct WarehouseSubmission {
    pub id: i32,
    pub division: String,
    pub submission_month: i32,
    pub submission_year: i32,
    /// Exact DECIMAL(10, 2) text as stored, e.g. `"1234.50"`.
    pub warehouse_hours: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields supplied by a caller creating a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub division: String,
    pub submission_month: i32,
    pub submission_year: i32,
    pub warehouse_hours: f64,
}

impl NewSubmission {
    pub fn validate(&self) -> Result<(), WarehouseError> {
        let division = self.division.trim();
        if division.is_empty() {
            return Err(WarehouseError::InvalidSubmission(
                "division is required".to_string(),
            ));
        }
        if division.chars().count() > MAX_DIVISION_LEN {
            return Err(WarehouseError::InvalidSubmission(format!(
                "division must be at most {MAX_DIVISION_LEN} characters"
            )));
        }
        if !(1..=12).contains(&self.submission_month) {
            return Err(WarehouseError::InvalidSubmission(format!(
                "submission_month out of range: {}",
                self.submission_month
            )));
        }
        if self.submission_year <= 0 {
            return Err(WarehouseError::InvalidSubmission(format!(
                "submission_year out of range: {}",
                self.submission_year
            )));
        }
        if !self.warehouse_hours.is_finite() || self.warehouse_hours < 0.0 {
            return Err(WarehouseError::InvalidSubmission(
                "warehouse_hours must be a non-negative number".to_string(),
            ));
        }
        if self.warehouse_hours >= MAX_WAREHOUSE_HOURS {
            return Err(WarehouseError::InvalidSubmission(format!(
                "warehouse_hours must be below {MAX_WAREHOUSE_HOURS}"
            )));
        }
        Ok(())
    }
}

/// One row of `DESCRIBE <table>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub field: String,
    pub column_type: String,
    pub nullable: bool,
    pub key: String,
    pub default: Option<String>,
    pub extra: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewSubmission {
        NewSubmission {
            division: "NE01".to_string(),
            submission_month: 3,
            submission_year: 2025,
            warehouse_hours: 1234.5,
        }
    }

    #[test]
    fn accepts_well_formed_submission() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn rejects_blank_or_long_division() {
        let mut s = sample();
        s.division = "   ".to_string();
        assert!(matches!(s.validate(), Err(WarehouseError::InvalidSubmission(_))));

        s.division = "ABCDEFGHIJK".to_string();
        assert!(matches!(s.validate(), Err(WarehouseError::InvalidSubmission(_))));

        s.division = "ABCDEFGHIJ".to_string();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_period() {
        let mut s = sample();
        s.submission_month = 13;
        assert!(s.validate().is_err());
        s.submission_month = 0;
        assert!(s.validate().is_err());
        s.submission_month = 12;
        s.submission_year = 0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_negative_or_nan_hours() {
        let mut s = sample();
        s.warehouse_hours = -1.0;
        assert!(s.validate().is_err());
        s.warehouse_hours = f64::NAN;
        assert!(s.validate().is_err());
        s.warehouse_hours = 0.0;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_hours_beyond_decimal_precision() {
        let mut s = sample();
        s.warehouse_hours = 99_999_999.99;
        assert!(s.validate().is_ok());
        s.warehouse_hours = MAX_WAREHOUSE_HOURS;
        assert!(matches!(s.validate(), Err(WarehouseError::InvalidSubmission(_))));
        s.warehouse_hours = 1e12;
        assert!(s.validate().is_err());
    }
}
