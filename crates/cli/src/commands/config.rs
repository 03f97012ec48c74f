//! Session configuration loading

use std::path::Path;

use anyhow::Result;
use openpad_session::SessionConfig;
use tracing::info;

use crate::error::CliError;
use crate::output;

/// Read `path` as JSON, or fall back to defaults with environment overrides.
pub fn load(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::from_env());
    };
    let text = std::fs::read_to_string(path).map_err(|e| CliError::Config {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let config: SessionConfig = serde_json::from_str(&text).map_err(|e| CliError::Config {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    if config.keepalive_interval_ms == 0 {
        return Err(CliError::Config {
            path: path.display().to_string(),
            reason: "keepalive_interval_ms must be positive".to_string(),
        }
        .into());
    }
    info!(path = %path.display(), "loaded session configuration");
    Ok(config)
}

pub fn show(config: &SessionConfig, json: bool) -> Result<()> {
    output::print_config(config, json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_partial_file_keeps_defaults() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, r#"{{ "keepalive_interval_ms": 500 }}"#)?;
        let config = load(Some(file.path()))?;
        assert_eq!(config.keepalive_interval_ms, 500);
        assert!(config.report_initial_state);
        assert_eq!(config.xbox360_wired_led_quadrant, 2);
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_a_config_error() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, r#"{{ "keepalive": 500 }}"#)?;
        let err = load(Some(file.path())).map(|_| ()).err().ok_or("expected an error")?;
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::Config { .. })));
        Ok(())
    }

    #[test]
    fn test_zero_interval_is_rejected() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, r#"{{ "keepalive_interval_ms": 0 }}"#)?;
        assert!(load(Some(file.path())).is_err_and(|e| e.to_string().contains("must be positive")));
        Ok(())
    }
}
