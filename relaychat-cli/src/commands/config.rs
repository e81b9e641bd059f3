use anyhow::{Result, bail};
use shared::config::ClientConfig;
use std::io::Write;

/// Writes a default configuration file in the requested format.
///
/// # Arguments
/// * `format` - The format of the configuration file ("yaml" or "json").
///
/// # Errors
/// Returns an error if the format is unsupported or if writing fails.
pub fn generate_config(format: &str, out: &mut impl Write) -> Result<()> {
    let config = ClientConfig::with_defaults();
    let serialized = match format {
        "yaml" => serde_yml::to_string(&config)?,
        "json" => serde_json::to_string_pretty(&config)?,
        _ => bail!("Unsupported format '{format}'. Use 'yaml' or 'json'."),
    };
    writeln!(out, "{}", serialized.trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_config_parses_back() {
        let mut out = Vec::new();
        generate_config("json", &mut out).unwrap();
        let parsed: ClientConfig = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, ClientConfig::with_defaults());
    }

    #[test]
    fn test_yaml_config_parses_back() {
        let mut out = Vec::new();
        generate_config("yaml", &mut out).unwrap();
        let parsed: ClientConfig = serde_yml::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed, ClientConfig::with_defaults());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let mut out = Vec::new();
        assert!(generate_config("toml", &mut out).is_err());
        assert!(out.is_empty());
    }
}
