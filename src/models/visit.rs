use crate::errors::AppResult;
use crate::utils::validate::require;
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

/// A scheduled (not yet completed) visit, joined with the animal name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    pub id: i64,
    pub animal_id: i64,
    pub animal_name: String,
    pub reservation_date: NaiveDateTime,
    pub visit_date: NaiveDateTime,
    pub registered_by: String,
    pub description: String,
    pub location_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewVisit {
    pub animal_id: i64,
    pub reservation_date: NaiveDateTime,
    pub visit_date: NaiveDateTime,
    pub registered_by: String,
    pub description: String,
    pub location_id: Option<i64>,
}

impl NewVisit {
    pub fn validate(&self) -> AppResult<()> {
        require("registered_by", &self.registered_by)?;
        require("description", &self.description)?;
        Ok(())
    }
}

/// One row of the day schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledVisit {
    pub visit_id: i64,
    pub animal_name: String,
    pub time: NaiveTime,
    pub description: String,
}

/// A visit inside the reminder window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingVisit {
    pub visit_id: i64,
    pub animal_name: String,
    pub visit_date: NaiveDateTime,
    pub owner_name: String,
}
