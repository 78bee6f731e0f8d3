//! CLI command implementations.
//!
//! - **render**: build and write the dashboard
//! - **init**: write a default `.kpiboard.toml`
//! - **check**: validate a snapshot without rendering it

pub mod check;
pub mod init;
pub mod render;

pub use check::{check_snapshot, CheckReport};
pub use init::init_config;
pub use render::{handle_render, RenderConfig};
