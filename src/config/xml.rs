//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - A missing file means defaults; unknown fields are rejected to surface typos early.
//!
//! Example:
//! ```xml
//! <config>
//!   <file_mode>644</file_mode>
//!   <folder_mode>0o755</folder_mode>
//!   <workers>8</workers>
//!   <numeric_ids>false</numeric_ids>
//!   <log_level>normal</log_level>
//!   <log_file>/var/log/batchfs.log</log_file>
//! </config>
//! ```

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    file_mode: Option<String>,
    folder_mode: Option<String>,
    #[serde(default, deserialize_with = "de_usize_trimmed_opt")]
    workers: Option<usize>,
    numeric_ids: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
}

// Custom deserializer that trims surrounding whitespace for optional integers
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<usize>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Parse an octal permission mode: `644`, `0644` or `0o644`.
pub fn parse_mode(s: &str) -> Result<u32> {
    let t = s.trim();
    let digits = t
        .strip_prefix("0o")
        .or_else(|| t.strip_prefix("0O"))
        .unwrap_or(t);
    u32::from_str_radix(digits, 8).map_err(|e| anyhow!("invalid octal mode '{s}': {e}"))
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.file_mode.as_deref() {
        cfg.file_mode = parse_mode(s).context("file_mode")?;
    }
    if let Some(s) = parsed.folder_mode.as_deref() {
        cfg.folder_mode = parse_mode(s).context("folder_mode")?;
    }
    cfg.workers = parsed.workers;
    cfg.numeric_ids = parsed.numeric_ids.unwrap_or(false);

    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s.trim().parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(trimmed.into());
        }
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path and validate it.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    let cfg = xml_to_config(parsed).with_context(|| format!("config xml '{}'", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the config from `explicit`, else the default location; a missing default file
/// yields `Config::default()`.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        return load_config_from_xml_path(p);
    }
    match default_config_path() {
        Some(p) if p.exists() => {
            debug!(path = %p.display(), "loading config");
            load_config_from_xml_path(&p)
        }
        _ => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mode_forms() {
        assert_eq!(parse_mode("644").unwrap(), 0o644);
        assert_eq!(parse_mode(" 0755 ").unwrap(), 0o755);
        assert_eq!(parse_mode("0o700").unwrap(), 0o700);
        assert!(parse_mode("9").is_err());
        assert!(parse_mode("rwx").is_err());
    }

    #[test]
    fn xml_fields_map_to_config() {
        let parsed: XmlConfig = from_xml_str(
            "<config><file_mode>600</file_mode><workers> 3 </workers><numeric_ids>true</numeric_ids><log_level>debug</log_level></config>",
        )
        .unwrap();
        let cfg = xml_to_config(parsed).unwrap();
        assert_eq!(cfg.file_mode, 0o600);
        assert_eq!(cfg.folder_mode, 0o755);
        assert_eq!(cfg.workers, Some(3));
        assert!(cfg.numeric_ids);
        assert_eq!(cfg.log_level, LogLevel::Debug);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let res: Result<XmlConfig, _> = from_xml_str("<config><bogus>1</bogus></config>");
        assert!(res.is_err());
    }
}
