use crate::errors::AppResult;
use crate::utils::validate::require;
use serde::Serialize;

/// A patient together with its owner's contact data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animal {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub owner_name: String,
    pub owner_contact: Option<String>,
    pub owner_email: Option<String>,
    pub info: Option<String>,
}

/// Input for add/edit.
#[derive(Debug, Clone, Default)]
pub struct NewAnimal {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub owner_name: String,
    pub owner_contact: Option<String>,
    pub owner_email: Option<String>,
    pub info: Option<String>,
}

impl NewAnimal {
    pub fn validate(&self) -> AppResult<()> {
        require("name", &self.name)?;
        require("species", &self.species)?;
        require("owner_name", &self.owner_name)?;
        Ok(())
    }
}

impl From<Animal> for NewAnimal {
    fn from(a: Animal) -> Self {
        Self {
            name: a.name,
            species: a.species,
            breed: a.breed,
            age: a.age,
            owner_name: a.owner_name,
            owner_contact: a.owner_contact,
            owner_email: a.owner_email,
            info: a.info,
        }
    }
}
