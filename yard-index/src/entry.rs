use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Serialize, Serializer};

// NOTE: deleted_at is the last access time read while scanning
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub bin: usize,
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub name: String,
    #[serde(rename = "isFolder")]
    pub is_directory: bool,
    pub size: Option<u64>,
    pub extension: Option<String>,
    #[serde(serialize_with = "serialize_millis")]
    pub deleted_at: SystemTime,
}

impl Entry {
    pub fn directory(
        bin: usize,
        path: PathBuf,
        relative_path: PathBuf,
        deleted_at: SystemTime,
    ) -> Self {
        Self {
            bin,
            name: get_name(&path),
            path,
            relative_path,
            is_directory: true,
            size: None,
            extension: None,
            deleted_at,
        }
    }

    pub fn file(
        bin: usize,
        path: PathBuf,
        relative_path: PathBuf,
        size: u64,
        deleted_at: SystemTime,
    ) -> Self {
        Self {
            bin,
            name: get_name(&path),
            extension: path
                .extension()
                .map(|extension| extension.to_string_lossy().to_string()),
            path,
            relative_path,
            is_directory: false,
            size: Some(size),
            deleted_at,
        }
    }

    pub fn deleted_at_millis(&self) -> u64 {
        to_millis(&self.deleted_at)
    }
}

fn get_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.to_string_lossy().to_string(),
    }
}

fn to_millis(time: &SystemTime) -> u64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_millis() as u64,
        Err(_) => 0,
    }
}

fn serialize_millis<S: Serializer>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(to_millis(time))
}
