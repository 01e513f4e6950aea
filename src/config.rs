use crate::errors::Result;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Path pattern used when neither the command line nor a settings file sets one.
pub const DEFAULT_PATH_PATTERN: &str = ".*";

/// Defaults read from a YAML settings file.
///
/// ```yaml
/// path: '\.rs$'
/// recursive: true
/// details: true
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Regex matched against each candidate's absolute path.
    pub path: Option<String>,
    /// Walk subdirectories.
    pub recursive: bool,
    /// Print one line per processed file.
    pub details: bool,
    /// Suppress the summary.
    pub silent: bool,
}

/// Run options after the command line has been merged over the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub path: String,
    pub recursive: bool,
    pub details: bool,
    pub silent: bool,
}

impl Settings {
    /// Merges command-line values over these settings. An explicit path wins;
    /// flags are on if either side turns them on.
    pub fn merge(
        self,
        path: Option<String>,
        recursive: bool,
        details: bool,
        silent: bool,
    ) -> RunOptions {
        RunOptions {
            path: path
                .or(self.path)
                .unwrap_or_else(|| DEFAULT_PATH_PATTERN.to_string()),
            recursive: recursive || self.recursive,
            details: details || self.details,
            silent: silent || self.silent,
        }
    }
}

/// A utility for locating and loading settings files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Finds the settings file by searching in a prioritized list of locations.
    ///
    /// The search order is:
    /// 1. The path as given (absolute, or relative to the process directory).
    /// 2. A path relative to `working_dir`.
    /// 3. Inside the user configuration directory, under `mfrep/`.
    pub fn find_config(config_path: &Path, working_dir: &Path) -> Result<PathBuf> {
        if config_path.exists() {
            return Ok(config_path.to_path_buf());
        }

        let in_working_dir = working_dir.join(config_path);
        if in_working_dir.exists() {
            return Ok(in_working_dir);
        }

        let user_config = dirs::config_dir().map(|dir| dir.join("mfrep").join(config_path));
        if let Some(candidate) = &user_config {
            if candidate.exists() {
                return Ok(candidate.clone());
            }
        }

        let mut tried_locations = vec![
            config_path.display().to_string(),
            in_working_dir.display().to_string(),
        ];
        if let Some(candidate) = user_config {
            tried_locations.push(candidate.display().to_string());
        }

        Err(format!(
            "Config file '{}' not found. Searched in:\n  - {}",
            config_path.display(),
            tried_locations.join("\n  - ")
        )
        .into())
    }

    /// Loads `Settings` from a YAML file.
    pub fn load_settings(path: &Path) -> Result<Settings> {
        let file = File::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;
        Ok(serde_yaml::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_merge() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mfrep.yaml");
        fs::write(&path, "path: '\\.rs$'\nrecursive: true\n").unwrap();

        let settings = ConfigLoader::load_settings(&path).unwrap();
        assert_eq!(settings.path.as_deref(), Some(r"\.rs$"));

        let options = settings.clone().merge(None, false, true, false);
        assert_eq!(
            options,
            RunOptions {
                path: r"\.rs$".into(),
                recursive: true,
                details: true,
                silent: false,
            }
        );

        let options = settings.merge(Some("txt".into()), false, false, false);
        assert_eq!(options.path, "txt");
    }

    #[test]
    fn test_defaults_match_everything() {
        let options = Settings::default().merge(None, false, false, false);
        assert_eq!(options.path, DEFAULT_PATH_PATTERN);
        assert!(!options.recursive && !options.details && !options.silent);
    }

    #[test]
    fn test_find_relative_to_working_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("settings-for-find.yaml"), "silent: true\n").unwrap();

        let name = Path::new("settings-for-find.yaml");
        let found = ConfigLoader::find_config(name, temp_dir.path()).unwrap();

        assert_eq!(found, temp_dir.path().join("settings-for-find.yaml"));
    }

    #[test]
    fn test_missing_file_lists_locations() {
        let temp_dir = TempDir::new().unwrap();
        let err = ConfigLoader::find_config(Path::new("no-such-settings.yaml"), temp_dir.path())
            .unwrap_err();
        match err {
            Error::Config(msg) => assert!(msg.contains("Searched in")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "workers: 4\n").unwrap();

        let err = ConfigLoader::load_settings(&path).unwrap_err();

        assert!(matches!(err, Error::Yaml(_)));
    }
}
