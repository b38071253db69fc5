use crate::models::report::ReportBundle;
use crate::utils::formatting::{money, or_dash};

pub const VISITS_TITLE: &str = "Visit statistics";
pub const TREATMENT_TITLE: &str = "Treatment statistics";
pub const PAYMENTS_TITLE: &str = "Payment statistics";

/// One titled table of an export, cells already rendered as text.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// The three report tables in display order.
pub fn sections(bundle: &ReportBundle) -> Vec<Section> {
    vec![
        Section {
            title: VISITS_TITLE,
            headers: vec!["Month", "Visits", "Animals"],
            rows: bundle
                .visits
                .iter()
                .map(|r| {
                    vec![
                        r.month.clone(),
                        r.visit_count.to_string(),
                        r.animal_count.to_string(),
                    ]
                })
                .collect(),
        },
        Section {
            title: TREATMENT_TITLE,
            headers: vec!["Medication", "Avg visits per animal"],
            rows: bundle
                .medications
                .iter()
                .map(|r| {
                    vec![
                        or_dash(&r.medication),
                        r.avg_visits_per_animal
                            .map(money)
                            .unwrap_or_else(|| "-".to_string()),
                    ]
                })
                .collect(),
        },
        Section {
            title: PAYMENTS_TITLE,
            headers: vec!["Month", "Visits", "Total payment"],
            rows: bundle
                .payments
                .iter()
                .map(|r| {
                    vec![
                        r.month.clone(),
                        r.visit_count.to_string(),
                        money(r.total_payment),
                    ]
                })
                .collect(),
        },
    ]
}
