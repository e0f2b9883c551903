// src/config/mod.rs
//! Runtime configuration: `config/checker.toml` plus API credentials from the environment.

pub mod checker;
pub mod credentials;

pub use checker::{
    CheckerConfig, Endpoints, FailurePolicy, HttpSettings, ModelSettings, ScoringSettings,
    DEFAULT_CHECKER_CONFIG_PATH, ENV_CHECKER_CONFIG_PATH,
};
pub use credentials::ApiCredentials;
