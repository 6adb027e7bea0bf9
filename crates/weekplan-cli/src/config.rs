use chrono::{Datelike, Local};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the CSV tables
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Planning year used for week numbers
    #[serde(default = "current_year")]
    pub year: i32,
    #[serde(default = "default_team_name")]
    pub team_name: String,
    /// Member used by `task add` and `hold add` when `--member` is omitted
    #[serde(default)]
    pub default_member: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn current_year() -> i32 {
    Local::now().year()
}

fn default_team_name() -> String {
    "My team".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            year: current_year(),
            team_name: default_team_name(),
            default_member: None,
        }
    }
}

impl Config {
    /// Reads `weekplan.toml` (or the file named by `WEEKPLAN_CONFIG`), then
    /// `WEEKPLAN_`-prefixed environment variables.
    pub fn new() -> Result<Self, figment::Error> {
        let file = Env::var_or("WEEKPLAN_CONFIG", "weekplan.toml");
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(file))
                .merge(Env::prefixed("WEEKPLAN_")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_empty_config() {
        let config = Config::from_figment(Figment::new()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_values_override_defaults() {
        let toml = r#"
            data_dir = "/srv/planning"
            year = 2026
            team_name = "Platform"
            default_member = "Alice"
        "#;
        let config = Config::from_figment(Figment::new().merge(Toml::string(toml))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/planning"));
        assert_eq!(config.year, 2026);
        assert_eq!(config.team_name, "Platform");
        assert_eq!(config.default_member.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_invalid_year_is_an_error() {
        let toml = r#"year = "soon""#;
        assert!(Config::from_figment(Figment::new().merge(Toml::string(toml))).is_err());
    }
}
