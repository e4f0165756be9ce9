// src/config/mod.rs

//! Optional executor configuration loaded from TOML.
//!
//! ```toml
//! [executor]
//! working_dir = "scripts"
//!
//! [executor.env]
//! DEPLOY_ENV = "staging"
//! ```

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, ExecutorSection, RawConfigFile};
