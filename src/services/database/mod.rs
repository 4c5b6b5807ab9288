// Database service module
// SQLite connection and schema for the durable storage slots

mod connection;
mod schema;

pub use connection::Database;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("planner.db");
        let db_path_str = db_path.to_str().unwrap();

        let result = Database::new(db_path_str);
        assert!(result.is_ok(), "Should create file-based database");
        assert!(Path::new(db_path_str).exists(), "Database file should exist");
    }

    #[test]
    fn test_initialize_schema_is_repeatable() {
        let db = Database::new(":memory:").unwrap();
        assert!(db.initialize_schema().is_ok());
        assert!(db.initialize_schema().is_ok(), "Schema creation should be idempotent");
    }

    #[test]
    fn test_storage_slots_table_exists() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let result: Result<i64, rusqlite::Error> = db.connection().query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='storage_slots'",
            [],
            |row| row.get(0),
        );

        assert!(result.is_ok(), "Should be able to query sqlite_master");
        assert_eq!(result.unwrap(), 1, "storage_slots table should exist");
    }
}
