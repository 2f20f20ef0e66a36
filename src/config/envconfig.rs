use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use config_rs::Environment;
use serde::de::DeserializeOwned;

/// Loads a config struct from `APP_`-prefixed environment variables.
///
/// Nested sections are separated by `__`, so `APP_DATABASE__URL` fills
/// `database.url`. Unset keys fall back to the struct's serde defaults.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    fn load_dotenv() {
        let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        if dotenvy::from_filename(&manifest_env).is_err() {
            dotenvy::dotenv().ok();
        }
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn environment() -> Environment {
        Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .try_parsing(true)
    }

    /// Builds and validates the config from an explicit environment source.
    fn from_environment(environment: Environment) -> Result<Self> {
        let cfg: Self = config_rs::Config::builder()
            .add_source(environment)
            .build()
            .context("failed to read environment variables for config")?
            .try_deserialize()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();
        Self::from_environment(Self::environment())
    }
}
