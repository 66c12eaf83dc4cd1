use std::env;
use std::path::PathBuf;

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::UpdateError;
use crate::scraping::document_source::DocumentSource;

/// Base name of the settings file, without extension.
pub const CONFIGURATION_FILE_NAME: &str = "config";

/// Prefix of environment variables overriding settings file values.
pub const ENVIRONMENT_PREFIX: &str = "VERSION_SYNC";

const CONFIGURATION_EXTENSIONS: [&str; 7] = ["toml", "json", "yaml", "yml", "ini", "ron", "json5"];

// The config crate lowercases keys, so `RemoteVersionURL` arrives as `remoteversionurl`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "remoteversionurl", alias = "RemoteVersionURL")]
    pub remote_version_url: String,
    #[serde(rename = "currentversionurl", alias = "CurrentVersionURL", default)]
    pub current_version_url: String,
    #[serde(rename = "indexhtmlfile", alias = "IndexHTMLFile")]
    pub index_html_file: PathBuf,
    #[serde(rename = "searchstring", alias = "SearchString", default)]
    pub search_string: String,
    #[serde(rename = "uselocal", alias = "UseLocal", default)]
    pub use_local: bool,
    #[serde(rename = "verbose", alias = "Verbose", default)]
    pub verbose: bool,
}

impl AppConfig {
    /// Source of the version currently shown on the overview page.
    pub fn current_source(&self) -> DocumentSource {
        if self.use_local {
            DocumentSource::Local(self.index_html_file.clone())
        } else {
            DocumentSource::Remote(self.current_version_url.clone())
        }
    }

    /// Source of the published release version.
    pub fn remote_source(&self) -> DocumentSource {
        DocumentSource::Remote(self.remote_version_url.clone())
    }

    fn validate(&self) -> Result<(), UpdateError> {
        if self.remote_version_url.trim().is_empty() {
            return Err(UpdateError::Config("RemoteVersionURL must not be empty".to_string()));
        }
        if self.index_html_file.as_os_str().is_empty() {
            return Err(UpdateError::Config("IndexHTMLFile must not be empty".to_string()));
        }
        if !self.use_local && self.current_version_url.trim().is_empty() {
            return Err(UpdateError::Config(
                "CurrentVersionURL is required when UseLocal is false".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads the settings file from the executable's directory, falling back to the
/// working directory, and layers `VERSION_SYNC_*` environment variables on top.
///
/// # Errors
///
/// Returns `UpdateError::Config` when no settings file exists in either
/// directory, when the file cannot be parsed, or when a required key is missing.
pub fn load_config() -> Result<AppConfig, UpdateError> {
    let search_dirs = configuration_search_dirs()?;
    load_config_from(&search_dirs, Environment::with_prefix(ENVIRONMENT_PREFIX))
}

/// Directories searched for the settings file, in priority order.
pub fn configuration_search_dirs() -> Result<Vec<PathBuf>, UpdateError> {
    let executable = env::current_exe()
        .map_err(|e| UpdateError::Config(format!("Failed to get current executable path: {}", e)))?;

    let mut dirs = Vec::with_capacity(2);
    if let Some(dir) = executable.parent() {
        dirs.push(dir.to_path_buf());
    }
    dirs.push(PathBuf::from("."));
    Ok(dirs)
}

/// First `config.<ext>` found, scanning directories in order.
pub fn find_configuration_file(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .flat_map(|dir| {
            CONFIGURATION_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{}.{}", CONFIGURATION_FILE_NAME, ext)))
        })
        .find(|path| path.is_file())
}

fn load_config_from(search_dirs: &[PathBuf], environment: Environment) -> Result<AppConfig, UpdateError> {
    let path = find_configuration_file(search_dirs).ok_or_else(|| {
        UpdateError::Config(format!(
            "no {} file found in {}",
            CONFIGURATION_FILE_NAME,
            display_dirs(search_dirs)
        ))
    })?;

    let settings = Config::builder()
        .add_source(File::from(path.as_path()))
        .add_source(environment.try_parsing(true))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;

    Ok(config)
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|dir| dir.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
