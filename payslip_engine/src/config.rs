//! Runtime configuration.
//!
//! Settings come from environment variables.  Holiday calendars and
//! withholding tables can be overridden by dropping versioned JSON
//! rule files into the directory named by `PAYSLIP_RULES_DIR`.

use crate::calendar::HolidayCalendar;
use crate::engine::PayrollRules;
use crate::sync::SyncMetadata;
use crate::tax::WithholdingTable;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const BIND_ADDR_VAR: &str = "PAYSLIP_BIND_ADDR";
pub const RULES_DIR_VAR: &str = "PAYSLIP_RULES_DIR";
pub const COMPANY_VAR: &str = "PAYSLIP_COMPANY";
pub const VERSION_VAR: &str = "PAYSLIP_VERSION";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors raised while loading configuration or rule files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{var}` is not a valid socket address: {value:?}")]
    InvalidBindAddr { var: &'static str, value: String },
    #[error("failed to read rules directory {path:?}")]
    ReadRulesDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Built-in rules are used when unset.
    pub rules_dir: Option<PathBuf>,
    pub metadata: SyncMetadata,
}

/// Reads the configuration from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    Ok(Config {
        bind_addr: load_bind_addr()?,
        rules_dir: load_rules_dir(),
        metadata: load_metadata(),
    })
}

fn load_bind_addr() -> Result<SocketAddr, ConfigError> {
    info!("Loading environment `{BIND_ADDR_VAR}`");
    let value = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    value.parse().map_err(|_| ConfigError::InvalidBindAddr {
        var: BIND_ADDR_VAR,
        value,
    })
}

fn load_rules_dir() -> Option<PathBuf> {
    info!("Loading environment `{RULES_DIR_VAR}`");
    env::var_os(RULES_DIR_VAR).map(PathBuf::from)
}

fn load_metadata() -> SyncMetadata {
    let defaults = SyncMetadata::default();
    SyncMetadata {
        company: env::var(COMPANY_VAR).unwrap_or(defaults.company),
        version: env::var(VERSION_VAR).unwrap_or(defaults.version),
    }
}

/// A single JSON rule file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleFile {
    Holidays { year: i32, dates: Vec<NaiveDate> },
    Withholding(WithholdingTable),
}

/// Builds the payroll rules from every `.json` file in `dir`.
///
/// Files that fail to parse are logged and skipped.  Kinds that no
/// file provides fall back to the built-in tables.
pub fn load_rules(dir: &Path) -> Result<PayrollRules, ConfigError> {
    let read_err = |source: std::io::Error| ConfigError::ReadRulesDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut holidays: Option<HolidayCalendar> = None;
    let mut withholding: Option<WithholdingTable> = None;
    for path in paths {
        let rule = match std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|data| serde_json::from_str::<RuleFile>(&data).map_err(Into::into))
        {
            Ok(rule) => rule,
            Err(err) => {
                warn!(?path, %err, "skipping unreadable rule file");
                continue;
            }
        };
        match rule {
            RuleFile::Holidays { year, dates } => {
                let calendar = holidays.get_or_insert_with(HolidayCalendar::new);
                for date in dates {
                    if date.year() == year {
                        calendar.insert(date);
                    } else {
                        warn!(?path, year, %date, "holiday outside its year, skipped");
                    }
                }
                info!(?path, year, "loaded holiday calendar");
            }
            RuleFile::Withholding(table) => {
                info!(?path, region = %table.region, version = %table.version, "loaded withholding table");
                withholding = Some(table);
            }
        }
    }

    let defaults = PayrollRules::default();
    Ok(PayrollRules {
        holidays: holidays.unwrap_or(defaults.holidays),
        withholding: withholding.unwrap_or(defaults.withholding),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("payslip_engine_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_empty_dir_uses_built_in_rules() {
        let dir = scratch_dir("empty");
        let rules = load_rules(&dir).unwrap();
        assert_eq!(rules, PayrollRules::default());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_loads_holidays_and_withholding() {
        let dir = scratch_dir("full");
        fs::write(
            dir.join("holidays_2026.json"),
            r#"{"kind": "holidays", "year": 2026, "dates": ["2026-01-01", "2026-04-02", "2025-12-25"]}"#,
        )
        .unwrap();
        fs::write(
            dir.join("withholding.json"),
            r#"{
                "kind": "withholding",
                "region": "PH",
                "version": "flat",
                "brackets": [
                    {"upTo": 10000, "baseTax": 0, "excessOver": 0, "rate": 0},
                    {"baseTax": 0, "excessOver": 10000, "rate": 0.1}
                ]
            }"#,
        )
        .unwrap();
        fs::write(dir.join("broken.json"), "{ not json").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let rules = load_rules(&dir).unwrap();
        assert_eq!(rules.holidays.years().collect::<Vec<_>>(), vec![2026]);
        assert_eq!(rules.holidays.holidays_in(2026).count(), 2);
        assert_eq!(rules.holidays.count_working_days("2026-01-01", "2026-01-03"), 2);
        assert_eq!(rules.withholding.version, "flat");
        assert_eq!(rules.withholding.monthly_withholding(dec!(15000)), dec!(500));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_shipped_rules_match_built_ins() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("rules");
        assert_eq!(load_rules(&dir).unwrap(), PayrollRules::default());
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let dir = env::temp_dir().join("payslip_engine_does_not_exist");
        assert!(matches!(
            load_rules(&dir),
            Err(ConfigError::ReadRulesDir { .. })
        ));
    }
}
