use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    config::{default_state_db_path, parse_config, resolve_config_path, Config},
    infra::store_sqlite::SqliteStore,
};

pub(crate) fn resolve_state_db_path(cfg: &Config) -> Result<PathBuf> {
    match &cfg.state_db_path {
        Some(raw) => Ok(PathBuf::from(raw)),
        None => default_state_db_path(),
    }
}

pub(crate) fn resolve_state_db_path_for_reset(config_path: Option<&Path>) -> Result<PathBuf> {
    let resolved = resolve_config_path(config_path)?;
    if !resolved.exists() {
        return default_state_db_path();
    }

    let src = fs::read_to_string(&resolved).with_context(|| {
        format!("failed to read config for --reset-state: {}", resolved.display())
    })?;
    let cfg = parse_config(&src).with_context(|| {
        format!("failed to parse config for --reset-state: {}", resolved.display())
    })?;

    match cfg.state_db_path {
        Some(path) => Ok(PathBuf::from(path)),
        None => default_state_db_path(),
    }
}

pub(crate) fn remove_state_db_files(path: &Path) -> Result<()> {
    for candidate in [
        path.to_path_buf(),
        state_db_sidecar_path(path, "-wal"),
        state_db_sidecar_path(path, "-shm"),
    ] {
        if !candidate.exists() {
            continue;
        }

        fs::remove_file(&candidate)
            .with_context(|| format!("failed to remove state db file: {}", candidate.display()))?;
    }

    Ok(())
}

fn state_db_sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}

pub(crate) fn open_store(path: &Path) -> Result<SqliteStore> {
    SqliteStore::new(path)
}
