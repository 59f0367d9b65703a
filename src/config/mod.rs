//! Configuration module for HN-Scout
//!
//! This module handles loading, parsing, and validating the TOML configuration file
//! and the optional JSON task input handed over by an orchestrator.
//!
//! # Example
//!
//! ```no_run
//! use hn_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Searching for: {}", config.search.search_term);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, LimitsConfig, OutputConfig, SearchConfig, SourceConfig, TaskInput, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, load_task_input, parse_config,
    parse_task_input, read_config_with_hash,
};
pub use validation::validate;
