//! Helpers for classifying database errors.

/// Returns the violated constraint when `e` is a unique-constraint violation.
///
/// PostgreSQL reports the index name (`urls_key_key`, `urls_secret_key_key`).
/// SQLite does not name the constraint, so `"unique"` is returned instead.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<String> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(db_err.constraint().unwrap_or("unique").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_not_unique_violation() {
        let e = sqlx::Error::RowNotFound;
        assert!(unique_violation_constraint(&e).is_none());
    }
}
