use crate::errors::AppResult;
use crate::utils::validate::require;
use serde::Serialize;

/// A clinic branch where visits take place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewLocation {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl NewLocation {
    pub fn validate(&self) -> AppResult<()> {
        require("name", &self.name)
    }
}

impl From<Location> for NewLocation {
    fn from(l: Location) -> Self {
        Self {
            name: l.name,
            address: l.address,
            phone: l.phone,
            email: l.email,
        }
    }
}
