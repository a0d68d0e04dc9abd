use crate::color::assigner::OverrideTable;
use std::fs;
use std::path::{Path, PathBuf};

pub const STORE_FILE: &str = "customcolors.yml";

/// YAML file holding the administrator color overrides, keyed by user id.
#[derive(Debug, Clone)]
pub struct OverrideStore {
    path: PathBuf,
}

impl OverrideStore {
    pub fn from_root(root: &Path) -> Self {
        Self {
            path: root.join(STORE_FILE),
        }
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// A missing file is an empty table.
    pub fn load(&self) -> Result<OverrideTable, String> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(OverrideTable::new())
            }
            Err(err) => {
                return Err(format!(
                    "override store read failed for {}: {}",
                    self.path.display(),
                    err
                ))
            }
        };
        if data.trim().is_empty() {
            return Ok(OverrideTable::new());
        }
        serde_yaml::from_str(&data).map_err(|err| {
            format!(
                "override store parse failed for {}: {}",
                self.path.display(),
                err
            )
        })
    }

    pub fn save(&self, table: &OverrideTable) -> Result<(), String> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|err| {
                    format!(
                        "override store dir create failed for {}: {}",
                        dir.display(),
                        err
                    )
                })?;
            }
        }
        let data = serde_yaml::to_string(table)
            .map_err(|err| format!("override store serialize failed: {}", err))?;
        if self.path.exists() {
            let backup_path = self.backup_path();
            fs::copy(&self.path, &backup_path).map_err(|err| {
                format!(
                    "override store backup failed for {}: {}",
                    backup_path.display(),
                    err
                )
            })?;
        }
        fs::write(&self.path, data).map_err(|err| {
            format!(
                "override store write failed for {}: {}",
                self.path.display(),
                err
            )
        })
    }
}
