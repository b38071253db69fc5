//! Aggregation results shown in the statistics screens and exports.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyVisits {
    /// `YYYY-MM`
    pub month: String,
    pub visit_count: i64,
    pub animal_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicationUsage {
    pub medication: Option<String>,
    /// Rounded to two decimals; `None` when no animal is counted.
    pub avg_visits_per_animal: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPayments {
    pub month: String,
    pub visit_count: i64,
    pub total_payment: f64,
}

/// One bar of the financial summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub period: String,
    pub total: f64,
}

/// The three statistics tables, optionally scoped to one location.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportBundle {
    pub location_id: Option<i64>,
    pub visits: Vec<MonthlyVisits>,
    pub medications: Vec<MedicationUsage>,
    pub payments: Vec<MonthlyPayments>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FinancialSummary {
    pub rows: Vec<PeriodTotal>,
    pub total: f64,
}
