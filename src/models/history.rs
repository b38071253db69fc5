use crate::errors::{AppError, AppResult};
use crate::utils::validate::{finite, require};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A completed visit: treatment, medication and payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub animal_id: i64,
    pub animal_name: String,
    pub visit_date: NaiveDateTime,
    pub registered_by: String,
    pub description_reason: Option<String>,
    pub medication: Option<String>,
    pub indications: Option<String>,
    pub payment: Option<f64>,
    pub location_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewHistory {
    pub animal_id: i64,
    pub visit_date: NaiveDateTime,
    pub registered_by: String,
    pub description_reason: Option<String>,
    pub medication: Option<String>,
    pub indications: Option<String>,
    pub payment: Option<f64>,
    pub location_id: Option<i64>,
    /// File paths stored as given.
    pub attachments: Vec<String>,
}

impl NewHistory {
    pub fn validate(&self) -> AppResult<()> {
        require("registered_by", &self.registered_by)?;
        require("indications", self.indications.as_deref().unwrap_or(""))?;
        if let Some(p) = self.payment {
            finite("payment", p)?;
        }
        for path in &self.attachments {
            require("attachment", path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub id: i64,
    pub history_id: i64,
    pub file_path: String,
}

/// Treatment details entered when a visit is closed.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub registered_by: String,
    pub medication: Option<String>,
    pub indications: String,
    pub payment: Option<f64>,
    /// Falls back to the visit's own location when `None`.
    pub location_id: Option<i64>,
    pub attachments: Vec<String>,
}

impl Completion {
    pub fn validate(&self) -> AppResult<()> {
        require("registered_by", &self.registered_by)?;
        require("indications", &self.indications)?;
        let payment = self.payment.ok_or(AppError::MissingField("payment"))?;
        finite("payment", payment)?;
        Ok(())
    }
}

/// Filters for the history list. Absent fields impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of `registered_by`.
    pub doctor: Option<String>,
    /// Case-insensitive substring of `medication`.
    pub medication: Option<String>,
}

/// Multi-field history search (animal, owner, date, reason).
#[derive(Debug, Clone, Default)]
pub struct HistorySearch {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub owner: Option<String>,
    /// Substring of the stored `YYYY-MM-DD HH:MM:SS` text.
    pub visit_date: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub history_id: i64,
    pub animal_id: i64,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub owner_name: String,
    pub visit_date: NaiveDateTime,
    pub description_reason: Option<String>,
}
