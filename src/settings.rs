use crate::artifacts::{env_file, ssh_config};
use crate::error::{InitError, Result};
use std::env;
use std::path::PathBuf;

/// Environment variable names recognized by the resolver and the
/// generated environment file.
pub mod vars {
    pub const NOTEBOOK_LOCATION: &str = "NOTEBOOK_LOCATION";
    pub const NOTEBOOK_TAGS: &str = "NOTEBOOK_TAGS";
    pub const NOTEBOOK_REPO_URL: &str = "NOTEBOOK_REPO_URL";
    pub const TOKEN_LOCATION: &str = "TESTBED_TOKEN_LOCATION";
    pub const CONFIG_LOCATION: &str = "TESTBED_CONFIG_LOCATION";
    pub const REQUIREMENTS_LOCATION: &str = "TESTBED_REQUIREMENTS_LOCATION";
    pub const CONFIG_JSON_LOCATION: &str = "TESTBED_CONFIG_JSON_LOCATION";
    pub const REFRESH_TOKEN: &str = "TESTBED_REFRESH_TOKEN";

    pub const CREDMGR_HOST: &str = "TESTBED_CREDMGR_HOST";
    pub const ORCHESTRATOR_HOST: &str = "TESTBED_ORCHESTRATOR_HOST";
    pub const BASTION_HOST: &str = "TESTBED_BASTION_HOST";
    pub const BASTION_PRIVATE_KEY_NAME: &str = "TESTBED_BASTION_PRIVATE_KEY_NAME";
    pub const SLICE_PRIVATE_KEY_NAME: &str = "TESTBED_SLICE_PRIVATE_KEY_NAME";
    pub const SLICE_PUBLIC_KEY_NAME: &str = "TESTBED_SLICE_PUBLIC_KEY_NAME";

    pub const PROJECT_ID: &str = "TESTBED_PROJECT_ID";
    pub const BASTION_USERNAME: &str = "TESTBED_BASTION_USERNAME";
    pub const BASTION_KEY_LOCATION: &str = "TESTBED_BASTION_KEY_LOCATION";
    pub const SLICE_PRIVATE_KEY_FILE: &str = "TESTBED_SLICE_PRIVATE_KEY_FILE";
    pub const SLICE_PUBLIC_KEY_FILE: &str = "TESTBED_SLICE_PUBLIC_KEY_FILE";
    pub const SLICE_PRIVATE_KEY_PASSPHRASE: &str = "TESTBED_SLICE_PRIVATE_KEY_PASSPHRASE";
    pub const LOG_LEVEL: &str = "TESTBED_LOG_LEVEL";
    pub const LOG_FILE: &str = "TESTBED_LOG_FILE";
}

pub const DEFAULT_NOTEBOOK_LOCATION: &str = "/home/notebook/work";
pub const DEFAULT_TOKEN_LOCATION: &str = "/home/notebook/.tokens.json";
pub const DEFAULT_TAGS: &str = "rel1.3";
pub const DEFAULT_REPO_URL: &str =
    "https://github.com/testbed-ops/jupyter-examples/archive/refs/tags";
pub const DEFAULT_CONFIG_LOCATION: &str = "/home/notebook/work/testbed_config";
pub const DEFAULT_REQUIREMENTS_LOCATION: &str =
    "/home/notebook/work/testbed_config/requirements.txt";
pub const DEFAULT_CONFIG_JSON_LOCATION: &str =
    "/home/notebook/work/testbed_config/testbed_config.json";
pub const DEFAULT_PRIVATE_SSH_KEY: &str = "/home/notebook/.ssh/id_rsa";
pub const DEFAULT_PUBLIC_SSH_KEY: &str = "/home/notebook/.ssh/id_rsa.pub";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
pub const DEFAULT_LOG_FILE: &str = "/tmp/testbed/testbed.log";

/// All settings the pipeline consumes, resolved once at startup.
///
/// Optional settings fall back to their documented default when the
/// environment variable is unset or empty. Variables that are only
/// required by the config-directory materializer are kept as `Option`s
/// here and resolved through the `Result`-returning accessors, so a
/// missing value fails that step alone instead of the whole run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub notebook_location: PathBuf,
    pub token_location: PathBuf,
    pub tags: String,
    pub repo_url: String,
    pub config_location: PathBuf,
    pub requirements_location: PathBuf,
    pub config_json_location: PathBuf,
    pub default_private_key: PathBuf,
    pub default_public_key: PathBuf,
    pub refresh_token: Option<String>,
    pub credmgr_host: Option<String>,
    pub orchestrator_host: Option<String>,
    pub bastion_host: Option<String>,
    pub bastion_key_name: Option<String>,
    pub slice_private_key_name: Option<String>,
    pub slice_public_key_name: Option<String>,
}

impl Settings {
    /// Resolve all settings from the process environment.
    pub fn from_env() -> Self {
        Self {
            notebook_location: env_or(vars::NOTEBOOK_LOCATION, DEFAULT_NOTEBOOK_LOCATION).into(),
            token_location: env_or(vars::TOKEN_LOCATION, DEFAULT_TOKEN_LOCATION).into(),
            tags: env_or(vars::NOTEBOOK_TAGS, DEFAULT_TAGS),
            repo_url: env_or(vars::NOTEBOOK_REPO_URL, DEFAULT_REPO_URL),
            config_location: env_or(vars::CONFIG_LOCATION, DEFAULT_CONFIG_LOCATION).into(),
            requirements_location: env_or(
                vars::REQUIREMENTS_LOCATION,
                DEFAULT_REQUIREMENTS_LOCATION,
            )
            .into(),
            config_json_location: env_or(vars::CONFIG_JSON_LOCATION, DEFAULT_CONFIG_JSON_LOCATION)
                .into(),
            default_private_key: DEFAULT_PRIVATE_SSH_KEY.into(),
            default_public_key: DEFAULT_PUBLIC_SSH_KEY.into(),
            refresh_token: env_opt(vars::REFRESH_TOKEN),
            credmgr_host: env_opt(vars::CREDMGR_HOST),
            orchestrator_host: env_opt(vars::ORCHESTRATOR_HOST),
            bastion_host: env_opt(vars::BASTION_HOST),
            bastion_key_name: env_opt(vars::BASTION_PRIVATE_KEY_NAME),
            slice_private_key_name: env_opt(vars::SLICE_PRIVATE_KEY_NAME),
            slice_public_key_name: env_opt(vars::SLICE_PUBLIC_KEY_NAME),
        }
    }

    pub fn credmgr_host(&self) -> Result<&str> {
        require(&self.credmgr_host, vars::CREDMGR_HOST)
    }

    pub fn orchestrator_host(&self) -> Result<&str> {
        require(&self.orchestrator_host, vars::ORCHESTRATOR_HOST)
    }

    pub fn bastion_host(&self) -> Result<&str> {
        require(&self.bastion_host, vars::BASTION_HOST)
    }

    /// Bastion private key path under the config directory.
    pub fn bastion_key_path(&self) -> Result<PathBuf> {
        let name = require(&self.bastion_key_name, vars::BASTION_PRIVATE_KEY_NAME)?;
        Ok(self.config_location.join(name))
    }

    /// Slice private key path under the config directory.
    pub fn slice_private_key_path(&self) -> Result<PathBuf> {
        let name = require(&self.slice_private_key_name, vars::SLICE_PRIVATE_KEY_NAME)?;
        Ok(self.config_location.join(name))
    }

    /// Slice public key path under the config directory.
    pub fn slice_public_key_path(&self) -> Result<PathBuf> {
        let name = require(&self.slice_public_key_name, vars::SLICE_PUBLIC_KEY_NAME)?;
        Ok(self.config_location.join(name))
    }

    pub fn env_file_path(&self) -> PathBuf {
        self.config_location.join(env_file::FILE_NAME)
    }

    pub fn ssh_config_path(&self) -> PathBuf {
        self.config_location.join(ssh_config::FILE_NAME)
    }
}

fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| InitError::MissingEnv(name.to_string()))
}

fn env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_defaults_when_unset() {
        env::remove_var(vars::NOTEBOOK_LOCATION);
        env::remove_var(vars::NOTEBOOK_TAGS);
        env::remove_var(vars::CREDMGR_HOST);

        let settings = Settings::from_env();
        assert_eq!(
            settings.notebook_location,
            PathBuf::from(DEFAULT_NOTEBOOK_LOCATION)
        );
        assert_eq!(settings.tags, DEFAULT_TAGS);
        assert!(settings.credmgr_host().is_err());
    }

    #[test]
    #[serial_test::serial]
    fn test_env_overrides() {
        env::set_var(vars::NOTEBOOK_LOCATION, "/srv/work");
        env::set_var(vars::NOTEBOOK_TAGS, "rel1.4,rel1.5");
        env::set_var(vars::BASTION_HOST, "bastion.example.net");

        let settings = Settings::from_env();
        assert_eq!(settings.notebook_location, PathBuf::from("/srv/work"));
        assert_eq!(settings.tags, "rel1.4,rel1.5");
        assert_eq!(settings.bastion_host().unwrap(), "bastion.example.net");

        env::remove_var(vars::NOTEBOOK_LOCATION);
        env::remove_var(vars::NOTEBOOK_TAGS);
        env::remove_var(vars::BASTION_HOST);
    }

    #[test]
    #[serial_test::serial]
    fn test_empty_value_falls_back_to_default() {
        env::set_var(vars::NOTEBOOK_TAGS, "");

        let settings = Settings::from_env();
        assert_eq!(settings.tags, DEFAULT_TAGS);

        env::remove_var(vars::NOTEBOOK_TAGS);
    }

    #[test]
    fn test_key_paths_join_config_location() {
        let mut settings = test_settings();
        settings.config_location = PathBuf::from("/work/testbed_config");
        settings.bastion_key_name = Some("bastion_key".to_string());
        settings.slice_private_key_name = Some("slice_key".to_string());
        settings.slice_public_key_name = Some("slice_key.pub".to_string());

        assert_eq!(
            settings.bastion_key_path().unwrap(),
            PathBuf::from("/work/testbed_config/bastion_key")
        );
        assert_eq!(
            settings.slice_private_key_path().unwrap(),
            PathBuf::from("/work/testbed_config/slice_key")
        );
        assert_eq!(
            settings.slice_public_key_path().unwrap(),
            PathBuf::from("/work/testbed_config/slice_key.pub")
        );
    }

    #[test]
    fn test_missing_required_reports_variable_name() {
        let settings = test_settings();
        let err = settings.bastion_key_path().unwrap_err();
        assert!(err.to_string().contains(vars::BASTION_PRIVATE_KEY_NAME));
    }

    fn test_settings() -> Settings {
        Settings {
            notebook_location: DEFAULT_NOTEBOOK_LOCATION.into(),
            token_location: DEFAULT_TOKEN_LOCATION.into(),
            tags: DEFAULT_TAGS.to_string(),
            repo_url: DEFAULT_REPO_URL.to_string(),
            config_location: DEFAULT_CONFIG_LOCATION.into(),
            requirements_location: DEFAULT_REQUIREMENTS_LOCATION.into(),
            config_json_location: DEFAULT_CONFIG_JSON_LOCATION.into(),
            default_private_key: DEFAULT_PRIVATE_SSH_KEY.into(),
            default_public_key: DEFAULT_PUBLIC_SSH_KEY.into(),
            refresh_token: None,
            credmgr_host: None,
            orchestrator_host: None,
            bastion_host: None,
            bastion_key_name: None,
            slice_private_key_name: None,
            slice_public_key_name: None,
        }
    }
}
