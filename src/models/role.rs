//! Roles and the single table deciding what each role may open.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Vet,
    Receptionist,
}

/// A gated group of operations (one per management screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Visits,
    Notifications,
    Schedule,
    History,
    Animals,
    Reports,
    Locations,
    Finance,
    Users,
}

const RECEPTIONIST_CAPS: &[Capability] = &[
    Capability::Visits,
    Capability::Notifications,
    Capability::Schedule,
];

const VET_CAPS: &[Capability] = &[
    Capability::Visits,
    Capability::Notifications,
    Capability::Schedule,
    Capability::History,
    Capability::Animals,
];

const ADMIN_CAPS: &[Capability] = &[
    Capability::Visits,
    Capability::Notifications,
    Capability::Schedule,
    Capability::History,
    Capability::Animals,
    Capability::Reports,
    Capability::Locations,
    Capability::Finance,
    Capability::Users,
];

const ACCESS_TABLE: [(Role, &[Capability]); 3] = [
    (Role::Admin, ADMIN_CAPS),
    (Role::Vet, VET_CAPS),
    (Role::Receptionist, RECEPTIONIST_CAPS),
];

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Vet => "vet",
            Role::Receptionist => "receptionist",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "vet" => Some(Role::Vet),
            "receptionist" => Some(Role::Receptionist),
            _ => None,
        }
    }

    pub fn capabilities(self) -> &'static [Capability] {
        ACCESS_TABLE
            .iter()
            .find(|(role, _)| *role == self)
            .map(|(_, caps)| *caps)
            .unwrap_or(&[])
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl Capability {
    pub fn label(self) -> &'static str {
        match self {
            Capability::Visits => "visit management",
            Capability::Notifications => "reminders",
            Capability::Schedule => "visit schedule",
            Capability::History => "treatment history",
            Capability::Animals => "animal records",
            Capability::Reports => "statistics and reports",
            Capability::Locations => "locations",
            Capability::Finance => "financial summary",
            Capability::Users => "user management",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_sees_everything() {
        for cap in ADMIN_CAPS {
            assert!(Role::Admin.can(*cap));
        }
    }

    #[test]
    fn tiers_are_nested() {
        for cap in RECEPTIONIST_CAPS {
            assert!(Role::Vet.can(*cap));
        }
        for cap in VET_CAPS {
            assert!(Role::Admin.can(*cap));
        }
    }

    #[test]
    fn receptionist_is_limited() {
        assert!(Role::Receptionist.can(Capability::Schedule));
        assert!(!Role::Receptionist.can(Capability::Animals));
        assert!(!Role::Receptionist.can(Capability::Reports));
        assert!(!Role::Vet.can(Capability::Finance));
        assert!(!Role::Vet.can(Capability::Users));
    }

    #[test]
    fn db_strings_round_trip() {
        assert_eq!(Role::from_db_str("Vet"), Some(Role::Vet));
        assert_eq!(Role::from_db_str("nurse"), None);
        assert_eq!(Role::Receptionist.to_string(), "receptionist");
    }
}
