pub mod animals;
pub mod filter;
pub mod history;
pub mod initialize;
pub mod locations;
pub mod log;
pub mod pool;
pub mod reports;
pub mod users;
pub mod visits;

use crate::errors::{AppError, AppResult};

/// Turn "0 rows changed" into `NotFound` for update/delete statements.
pub(crate) fn ensure_affected(changed: usize, entity: &'static str, id: i64) -> AppResult<()> {
    if changed == 0 {
        return Err(AppError::NotFound { entity, id });
    }
    Ok(())
}
