use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use icu_collator::{Collator, CollatorOptions};

use crate::{
    error::{MigrateError, Result},
    hash::hash_file,
};

/// File name to content hash, computed once per run. Lookup only, its key
/// order is not the execution order.
pub type FileHashes = BTreeMap<String, String>;

/// Names of every entry directly inside `dir`, in no particular order.
pub async fn list_file_names(dir: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().into_string().map_err(|name| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("migration file name {name:?} is not valid utf-8"),
            )
        })?;

        names.push(name);
    }

    Ok(names)
}

pub async fn hash_files(dir: impl AsRef<Path>, file_names: &[String]) -> io::Result<FileHashes> {
    let dir = dir.as_ref();
    let mut hashes = FileHashes::new();

    for file_name in file_names {
        let hash = hash_file(migration_path(dir, file_name)).await?;
        hashes.insert(file_name.to_owned(), hash);
    }

    Ok(hashes)
}

/// Sorts file names into execution order: root locale collation, ties
/// broken by byte order so that the order stays total.
pub fn sort_file_names(file_names: &mut [String]) -> Result<()> {
    let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
        .map_err(|e| MigrateError::Collation(e.to_string()))?;

    file_names.sort_by(|a, b| collator.compare(a, b).then_with(|| a.cmp(b)));

    Ok(())
}

pub fn migration_path(dir: impl AsRef<Path>, file_name: &str) -> PathBuf {
    dir.as_ref().join(file_name)
}
