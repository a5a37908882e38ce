//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, EngineSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Prefix of environment overrides, e.g. `STOCK_TA__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "STOCK_TA";

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(env_source())
        .build()?;

    config.try_deserialize()
}

/// Load configuration from TOML text and environment.
pub fn load_config_str(toml: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .add_source(env_source())
        .build()?;

    config.try_deserialize()
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_core::IndicatorKind;
    use ta_indicators::{BollingerBands, Macd, Rsi, RsiSmoothing};

    #[test]
    fn test_defaults_when_sections_absent() {
        let config = load_config_str("[app]\nname = \"demo\"\nenvironment = \"test\"\n").unwrap();

        assert_eq!(config.app.name, "demo");
        assert_eq!(config.logging, LoggingConfig::default());
        assert!(config.engine.concurrent);
        assert_eq!(config.indicators.requested().len(), 5);
        assert!(!config.indicators.is_requested(IndicatorKind::Ema));
    }

    #[test]
    fn test_indicator_selection() {
        let config = load_config_str(
            r#"
[indicators.macd]
fast = 8
slow = 21
signal = 5

[indicators.rsi]
period = 9
smoothing = "simple"

[indicators.bollinger]
window = 10
multiplier = 3
"#,
        )
        .unwrap();

        assert_eq!(
            config.indicators.requested(),
            vec![IndicatorKind::Macd, IndicatorKind::Bollinger, IndicatorKind::Rsi]
        );
        assert_eq!(config.indicators.macd, Some(Macd::new(8, 21, 5)));
        assert_eq!(
            config.indicators.rsi,
            Some(Rsi::with_smoothing(9, RsiSmoothing::Simple))
        );
        assert_eq!(config.indicators.bollinger, Some(BollingerBands::new(10, 3.0)));
    }

    #[test]
    fn test_partial_parameters_use_defaults() {
        let config = load_config_str("[indicators.stochastic_slow]\nk_window = 5\n").unwrap();
        let stochastic = config.indicators.stochastic_slow.unwrap();

        assert_eq!(stochastic.k_window(), 5);
        assert_eq!(stochastic.k_smooth(), 3);
        assert_eq!(stochastic.d_smooth(), 3);
    }

    #[test]
    fn test_rejects_unknown_options() {
        assert!(load_config_str("[indicators.macd]\nfast = 8\nlength = 3\n").is_err());
        assert!(load_config_str("[indicators.atr]\nwindow = 14\n").is_err());
        assert!(load_config_str("[indicators.rsi]\nsmoothing = \"ema\"\n").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let rendered = config.to_toml().unwrap();

        assert!(rendered.contains("[indicators.moving_average]"));
        assert_eq!(load_config_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config(Path::new("/nonexistent/stock-ta.toml")).is_err());
    }
}
