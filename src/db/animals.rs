use crate::db::ensure_affected;
use crate::db::filter::{UNICODE_LOWER, contains_pattern};
use crate::errors::AppResult;
use crate::models::animal::{Animal, NewAnimal};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const COLUMNS: &str =
    "id, name, species, breed, age, owner_name, owner_contact, owner_email, info";

pub fn add_animal(conn: &Connection, a: &NewAnimal) -> AppResult<i64> {
    a.validate()?;

    conn.execute(
        "INSERT INTO animals (name, species, breed, age, owner_name, owner_contact, owner_email, info)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            a.name.trim(),
            a.species.trim(),
            a.breed,
            a.age,
            a.owner_name.trim(),
            a.owner_contact,
            a.owner_email,
            a.info
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn list_animals(conn: &Connection) -> AppResult<Vec<Animal>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM animals ORDER BY id ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_animal(conn: &Connection, id: i64) -> AppResult<Option<Animal>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM animals WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn update_animal(conn: &Connection, id: i64, a: &NewAnimal) -> AppResult<()> {
    a.validate()?;

    let changed = conn.execute(
        "UPDATE animals
         SET name = ?1, species = ?2, breed = ?3, age = ?4, owner_name = ?5,
             owner_contact = ?6, owner_email = ?7, info = ?8
         WHERE id = ?9",
        params![
            a.name.trim(),
            a.species.trim(),
            a.breed,
            a.age,
            a.owner_name.trim(),
            a.owner_contact,
            a.owner_email,
            a.info,
            id
        ],
    )?;

    ensure_affected(changed, "Animal", id)
}

pub fn delete_animal(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM animals WHERE id = ?1", [id])?;
    ensure_affected(changed, "Animal", id)
}

/// Case-insensitive substring match over name, owner and breed.
pub fn search_animals(conn: &Connection, term: &str) -> AppResult<Vec<Animal>> {
    let pattern = contains_pattern(term);

    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM animals
         WHERE {UNICODE_LOWER}(name) LIKE ?1 ESCAPE '\\'
            OR {UNICODE_LOWER}(owner_name) LIKE ?1 ESCAPE '\\'
            OR {UNICODE_LOWER}(breed) LIKE ?1 ESCAPE '\\'
         ORDER BY name ASC, id ASC"
    ))?;
    let rows = stmt.query_map([pattern], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Owner e-mail for one animal; blank values count as missing.
pub fn owner_email(conn: &Connection, animal_id: i64) -> AppResult<Option<String>> {
    let email: Option<Option<String>> = conn
        .query_row(
            "SELECT owner_email FROM animals WHERE id = ?1",
            [animal_id],
            |r| r.get(0),
        )
        .optional()?;

    Ok(email
        .flatten()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty()))
}

fn map_row(row: &Row) -> Result<Animal> {
    Ok(Animal {
        id: row.get("id")?,
        name: row.get("name")?,
        species: row.get("species")?,
        breed: row.get("breed")?,
        age: row.get("age")?,
        owner_name: row.get("owner_name")?,
        owner_contact: row.get("owner_contact")?,
        owner_email: row.get("owner_email")?,
        info: row.get("info")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::test_conn;
    use crate::errors::AppError;

    fn rex() -> NewAnimal {
        NewAnimal {
            name: "Rex".into(),
            species: "dog".into(),
            breed: Some("Beagle".into()),
            owner_name: "Anna Nowak".into(),
            ..Default::default()
        }
    }

    #[test]
    fn add_then_get() {
        let conn = test_conn();
        let id = add_animal(&conn, &rex()).unwrap();
        let a = get_animal(&conn, id).unwrap().unwrap();
        assert_eq!(a.name, "Rex");
        assert_eq!(a.breed.as_deref(), Some("Beagle"));
    }

    #[test]
    fn missing_name_is_rejected_before_insert() {
        let conn = test_conn();
        let mut a = rex();
        a.name = " ".into();
        assert!(matches!(
            add_animal(&conn, &a),
            Err(AppError::MissingField("name"))
        ));
        assert!(list_animals(&conn).unwrap().is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_owner_and_breed() {
        let conn = test_conn();
        add_animal(&conn, &rex()).unwrap();

        assert_eq!(search_animals(&conn, "nowak").unwrap().len(), 1);
        assert_eq!(search_animals(&conn, "BEAG").unwrap().len(), 1);
        assert!(search_animals(&conn, "%").unwrap().is_empty());
    }

    #[test]
    fn search_folds_polish_letters() {
        let conn = test_conn();
        let mut a = rex();
        a.name = "Łatka".into();
        a.owner_name = "Żaneta Śmigiel".into();
        add_animal(&conn, &a).unwrap();

        assert_eq!(search_animals(&conn, "łatka").unwrap().len(), 1);
        assert_eq!(search_animals(&conn, "ŻANETA").unwrap().len(), 1);
        assert_eq!(search_animals(&conn, "śmig").unwrap().len(), 1);
    }

    #[test]
    fn update_and_delete_missing_row() {
        let conn = test_conn();
        assert!(matches!(
            update_animal(&conn, 99, &rex()),
            Err(AppError::NotFound { id: 99, .. })
        ));
        assert!(matches!(
            delete_animal(&conn, 99),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn blank_email_counts_as_missing() {
        let conn = test_conn();
        let mut a = rex();
        a.owner_email = Some("  ".into());
        let id = add_animal(&conn, &a).unwrap();
        assert_eq!(owner_email(&conn, id).unwrap(), None);
    }
}
