pub mod config;
pub mod paths;

pub use config::{Config, RefreshConfig, TmdbConfig};
pub use paths::{container_base_path, PathManager};
