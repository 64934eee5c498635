//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.
//! The mutation core never reads configuration; the binary turns a `Config` into
//! `Modes` and an executor and hands those in.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV, default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path, parse_mode};
