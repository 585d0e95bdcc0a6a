use crate::core::persist::write_csv_table;
use crate::domain::model::Table;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use std::path::Path;

/// `name` -> `{prefix}_name`, unless it already carries the prefix.
pub fn normalize_column_name(name: &str, prefix: &str) -> String {
    let tag = format!("{}_", prefix);
    if name.starts_with(&tag) {
        name.to_string()
    } else {
        format!("{}{}", tag, name)
    }
}

/// Renames every column; rows are left untouched.
///
/// Fails when two columns end up with the same name, e.g. `id` next to
/// `fsq_id`.
pub fn clean_table(mut table: Table, prefix: &str) -> Result<Table> {
    table.rename_columns(|column| normalize_column_name(column, prefix));

    let mut seen = HashSet::with_capacity(table.num_columns());
    if let Some(duplicate) = table.columns().iter().find(|c| !seen.insert(c.as_str())) {
        return Err(EtlError::ProcessingError {
            message: format!("renaming columns produces duplicate column '{}'", duplicate),
        });
    }
    Ok(table)
}

pub struct Cleaner<'a, S: Storage> {
    storage: &'a S,
    prefix: &'a str,
}

impl<'a, S: Storage> Cleaner<'a, S> {
    pub fn new(storage: &'a S, prefix: &'a str) -> Self {
        Self { storage, prefix }
    }

    pub fn clean(&self, table: Table) -> Result<Table> {
        let table = clean_table(table, self.prefix)?;
        tracing::info!("Cleaned column names: {:?}", table.columns());
        Ok(table)
    }

    pub async fn persist(&self, table: Table, path: &Path) -> Result<Table> {
        write_csv_table(self.storage, table, path).await
    }

    /// Renames and writes in one go.
    pub async fn save(&self, table: Table, path: &Path) -> Result<Table> {
        let table = self.clean(table)?;
        self.persist(table, path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use tempfile::TempDir;

    #[test]
    fn test_prefixes_only_unprefixed_columns() {
        let table = clean_table(Table::with_columns(["id", "fsq_name"]), "fsq").unwrap();
        assert_eq!(table.columns(), ["fsq_id", "fsq_name"]);
    }

    #[test]
    fn test_rename_is_idempotent() {
        let columns = ["fsq_place_id", "name", "latitude", "fsqname", "fsq_"];
        let once = clean_table(Table::with_columns(columns), "fsq").unwrap();
        let twice = clean_table(once.clone(), "fsq").unwrap();
        assert_eq!(once.columns(), twice.columns());
        assert_eq!(
            once.columns(),
            ["fsq_place_id", "fsq_name", "fsq_latitude", "fsq_fsqname", "fsq_"]
        );
    }

    #[test]
    fn test_rows_are_untouched() {
        let mut table = Table::with_columns(["id", "name"]);
        table.push_row(["1", "fsq_cafe"]).unwrap();
        let cleaned = clean_table(table.clone(), "fsq").unwrap();
        assert_eq!(cleaned.rows(), table.rows());
        assert_eq!(cleaned.num_columns(), table.num_columns());
    }

    #[test]
    fn test_colliding_names_are_rejected() {
        let err = clean_table(Table::with_columns(["id", "fsq_id"]), "fsq").unwrap_err();
        match err {
            EtlError::ProcessingError { message } => assert!(message.contains("'fsq_id'")),
            other => panic!("expected ProcessingError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_refuses_colliding_names() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let table = Table::with_columns(["name", "fsq_name"]);

        let cleaner = Cleaner::new(&storage, "fsq");
        assert!(cleaner.save(table, Path::new("clean.csv")).await.is_err());
        assert!(!dir.path().join("clean.csv").exists());
    }

    #[tokio::test]
    async fn test_save_writes_prefixed_header() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let mut table = Table::with_columns(["id", "fsq_name"]);
        table.push_row(["1", "Cafe"]).unwrap();

        let cleaner = Cleaner::new(&storage, "fsq");
        cleaner.save(table, Path::new("clean.csv")).await.unwrap();

        let written = std::fs::read_to_string(dir.path().join("clean.csv")).unwrap();
        assert_eq!(written, "fsq_id,fsq_name\n1,Cafe\n");
    }
}
