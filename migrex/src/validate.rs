use crate::{
    error::{MigrateError, Result},
    history::MigrationHistoryRecord,
    source::FileHashes,
};

/// Every recorded attempt must have succeeded.
pub fn validate_success(records: &[MigrationHistoryRecord]) -> Result<()> {
    let unsuccessful = collect(records, |r| !r.success);

    if !unsuccessful.is_empty() {
        return Err(MigrateError::UnsuccessfulMigrationsExist(unsuccessful));
    }

    Ok(())
}

/// Every recorded file must still be in the migrations directory.
pub fn validate_existence(records: &[MigrationHistoryRecord], file_names: &[String]) -> Result<()> {
    let unknown = collect(records, |r| !file_names.iter().any(|f| f == &r.file_name));

    if !unknown.is_empty() {
        return Err(MigrateError::UnknownMigrations(unknown));
    }

    Ok(())
}

/// Every recorded hash must match the current content of its file.
pub fn validate_hashes(records: &[MigrationHistoryRecord], hashes: &FileHashes) -> Result<()> {
    let incompatible = collect(records, |r| hashes.get(&r.file_name) != Some(&r.hash));

    if !incompatible.is_empty() {
        return Err(MigrateError::IncompatibleMigrations(incompatible));
    }

    Ok(())
}

fn collect<F>(records: &[MigrationHistoryRecord], offending: F) -> Vec<MigrationHistoryRecord>
where
    F: Fn(&MigrationHistoryRecord) -> bool,
{
    records.iter().filter(|r| offending(r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn success_collects_all_failures() {
        let records = vec![
            MigrationHistoryRecord::failed("a.json", "h1", "boom"),
            MigrationHistoryRecord::applied("b.json", "h2"),
            MigrationHistoryRecord::failed("c.json", "h3", "bang"),
        ];

        let err = validate_success(&records).unwrap_err();
        let MigrateError::UnsuccessfulMigrationsExist(offending) = err else {
            panic!("unexpected error {err}");
        };

        assert_eq!(offending, vec![records[0].clone(), records[2].clone()]);
        assert!(validate_success(&records[1..2]).is_ok());
    }

    #[test]
    fn existence_collects_all_missing() {
        let records = vec![
            MigrationHistoryRecord::applied("a.json", "h1"),
            MigrationHistoryRecord::applied("b.json", "h2"),
            MigrationHistoryRecord::applied("c.json", "h3"),
        ];

        let err = validate_existence(&records, &names(&["b.json"])).unwrap_err();
        let MigrateError::UnknownMigrations(offending) = err else {
            panic!("unexpected error {err}");
        };

        assert_eq!(offending, vec![records[0].clone(), records[2].clone()]);
        assert!(validate_existence(&records, &names(&["c.json", "b.json", "a.json"])).is_ok());
    }

    #[test]
    fn hashes_collects_all_mismatches() {
        let records = vec![
            MigrationHistoryRecord::applied("a.json", "h1"),
            MigrationHistoryRecord::applied("b.json", "h2"),
        ];
        let hashes = FileHashes::from([
            ("a.json".to_owned(), "h1".to_owned()),
            ("b.json".to_owned(), "changed".to_owned()),
        ]);

        let err = validate_hashes(&records, &hashes).unwrap_err();
        let MigrateError::IncompatibleMigrations(offending) = err else {
            panic!("unexpected error {err}");
        };

        assert_eq!(offending, vec![records[1].clone()]);
    }

    #[test]
    fn empty_history_is_valid() {
        assert!(validate_success(&[]).is_ok());
        assert!(validate_existence(&[], &[]).is_ok());
        assert!(validate_hashes(&[], &FileHashes::new()).is_ok());
    }
}
