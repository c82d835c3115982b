use std::{collections::HashSet, fs, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::error::AppError;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub server_address: String,
    pub server_port: u16,
    pub recycle_bins: Vec<RecycleBinConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1".to_owned(),
            server_port: 1337,
            recycle_bins: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecycleBinConfig {
    pub name: String,
    #[serde(default)]
    pub recycle_folder_paths: Vec<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        tracing::debug!("loading configuration from {:?}", path);

        let content =
            fs::read_to_string(path).map_err(|error| AppError::ConfigRead(path.to_owned(), error))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        let mut names = HashSet::new();
        for bin in &self.recycle_bins {
            if bin.name.trim().is_empty() {
                return Err(AppError::InvalidConfig(
                    "recycle bin name must not be empty".to_owned(),
                ));
            }

            if !names.insert(bin.name.as_str()) {
                return Err(AppError::InvalidConfig(format!(
                    "recycle bin name {:?} is used more than once",
                    bin.name
                )));
            }

            if bin
                .recycle_folder_paths
                .iter()
                .any(|path| path.as_os_str().is_empty())
            {
                return Err(AppError::InvalidConfig(format!(
                    "recycle bin {:?} contains an empty folder path",
                    bin.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use crate::error::AppError;

    #[test]
    fn parse_applies_defaults_per_field() {
        let config = super::Config::parse(r#"{ "recycleBins": [{ "name": "Empty" }] }"#).unwrap();

        assert_eq!(1337, config.server_port);
        assert_eq!("127.0.0.1", config.server_address);
        assert_eq!(1, config.recycle_bins.len());
        assert!(config.recycle_bins[0].recycle_folder_paths.is_empty());

        let config = super::Config::parse("{}").unwrap();
        assert_eq!(super::Config::default(), config);
    }

    #[test]
    fn parse_reads_bins_in_order_and_ignores_unknown_keys() {
        let config = super::Config::parse(
            r#"{
                "serverPort": 8080,
                "theme": "dark",
                "recycleBins": [
                    { "name": "Shared", "recycleFolderPaths": ["/srv/a/.Trash", "/srv/b/.Trash"] },
                    { "name": "Home", "recycleFolderPaths": ["/home/user/.Trash"] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(8080, config.server_port);
        assert_eq!("Shared", config.recycle_bins[0].name);
        assert_eq!(
            vec![
                PathBuf::from("/srv/a/.Trash"),
                PathBuf::from("/srv/b/.Trash")
            ],
            config.recycle_bins[0].recycle_folder_paths
        );
        assert_eq!("Home", config.recycle_bins[1].name);
    }

    #[test]
    fn parse_rejects_invalid_bins() {
        let missing_name = super::Config::parse(r#"{ "recycleBins": [{ "recycleFolderPaths": [] }] }"#);
        assert!(matches!(missing_name, Err(AppError::ConfigParse(_))));

        let empty_name = super::Config::parse(r#"{ "recycleBins": [{ "name": " " }] }"#);
        assert!(matches!(empty_name, Err(AppError::InvalidConfig(_))));

        let duplicate = super::Config::parse(
            r#"{ "recycleBins": [{ "name": "a" }, { "name": "a" }] }"#,
        );
        assert!(matches!(duplicate, Err(AppError::InvalidConfig(_))));

        let empty_path = super::Config::parse(
            r#"{ "recycleBins": [{ "name": "a", "recycleFolderPaths": [""] }] }"#,
        );
        assert!(matches!(empty_path, Err(AppError::InvalidConfig(_))));

        let wrong_type = super::Config::parse(r#"{ "serverPort": "http" }"#);
        assert!(matches!(wrong_type, Err(AppError::ConfigParse(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(matches!(
            super::Config::load(&path),
            Err(AppError::ConfigRead(..))
        ));

        std::fs::write(&path, r#"{ "serverPort": 1 }"#).unwrap();
        assert_eq!(1, super::Config::load(&path).unwrap().server_port);
    }
}
