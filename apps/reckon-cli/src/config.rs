use std::path::PathBuf;

/// Runtime configuration, resolved once at startup from `RECKON_*`
/// environment variables. Only UTF-8 history files are supported.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_dir: PathBuf,
    pub log_file: String,
    pub history_dir: PathBuf,
    pub history_file: String,
    pub max_history_size: usize,
    pub auto_save: bool,
    pub precision: u32,
    pub max_input_value: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            log_file: "reckon.log".to_string(),
            history_dir: PathBuf::from("./data"),
            history_file: "history.csv".to_string(),
            max_history_size: 100,
            auto_save: true,
            precision: 6,
            max_input_value: 1.0e12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve configuration through `get`. Tests pass a map here instead of
    /// mutating the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(value) = get("RECKON_LOG_DIR") {
            cfg.log_dir = PathBuf::from(value);
        }
        if let Some(value) = get("RECKON_LOG_FILE") {
            cfg.log_file = value;
        }
        if let Some(value) = get("RECKON_HISTORY_DIR") {
            cfg.history_dir = PathBuf::from(value);
        }
        if let Some(value) = get("RECKON_HISTORY_FILE") {
            cfg.history_file = value;
        }
        if let Some(value) = get("RECKON_MAX_HISTORY_SIZE") {
            cfg.max_history_size = parse(value, "RECKON_MAX_HISTORY_SIZE")?;
        }
        if let Some(value) = get("RECKON_AUTO_SAVE") {
            cfg.auto_save = truthy(&value);
        }
        if let Some(value) = get("RECKON_PRECISION") {
            cfg.precision = parse(value, "RECKON_PRECISION")?;
        }
        if let Some(value) = get("RECKON_MAX_INPUT_VALUE") {
            cfg.max_input_value = parse(value, "RECKON_MAX_INPUT_VALUE")?;
        }
        Ok(cfg)
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_dir.join(&self.history_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file)
    }
}

fn parse<T: std::str::FromStr>(value: String, var: &'static str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |var| map.get(var).map(|v| v.to_string())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = Config::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.history_path(), PathBuf::from("./data/history.csv"));
        assert_eq!(cfg.log_path(), PathBuf::from("./logs/reckon.log"));
    }

    #[test]
    fn variables_override_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            ("RECKON_HISTORY_DIR", "/tmp/hist"),
            ("RECKON_HISTORY_FILE", "calc.csv"),
            ("RECKON_MAX_HISTORY_SIZE", "7"),
            ("RECKON_PRECISION", "2"),
            ("RECKON_MAX_INPUT_VALUE", "1e6"),
        ]))
        .unwrap();

        assert_eq!(cfg.history_path(), PathBuf::from("/tmp/hist/calc.csv"));
        assert_eq!(cfg.max_history_size, 7);
        assert_eq!(cfg.precision, 2);
        assert_eq!(cfg.max_input_value, 1.0e6);
    }

    #[test]
    fn auto_save_accepts_common_truthy_spellings() {
        for value in ["1", "true", "Yes", "TRUE"] {
            let cfg = Config::from_lookup(lookup(&[("RECKON_AUTO_SAVE", value)])).unwrap();
            assert!(cfg.auto_save, "{value:?} should enable auto save");
        }
        for value in ["0", "false", "no", "banana"] {
            let cfg = Config::from_lookup(lookup(&[("RECKON_AUTO_SAVE", value)])).unwrap();
            assert!(!cfg.auto_save, "{value:?} should disable auto save");
        }
    }

    #[test]
    fn bad_numeric_value_is_reported_with_its_variable() {
        let err = Config::from_lookup(lookup(&[("RECKON_MAX_HISTORY_SIZE", "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "RECKON_MAX_HISTORY_SIZE",
                value: "lots".to_string()
            }
        );
    }
}
