//! Output formatting for CLI commands
//!
//! Commands render into any [`Write`] so they can be exercised in tests.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::secrets::{ChangeEvent, Secret};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per entry
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Serializable view of a secret with its value exposed.
///
/// Only built when the user asked for values on the command line.
#[derive(Debug, Serialize)]
struct SecretRow<'a> {
    key: &'a str,
    version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
}

impl<'a> From<&'a Secret> for SecretRow<'a> {
    fn from(secret: &'a Secret) -> Self {
        Self { key: secret.key(), version: secret.version(), value: secret.expose_value() }
    }
}

/// Print data as JSON
pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize to JSON")?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Print a single secret value
pub fn write_secret(out: &mut impl Write, secret: &Secret, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", secret.expose_value().unwrap_or_default())?;
            Ok(())
        }
        OutputFormat::Json => write_json(out, &SecretRow::from(secret)),
    }
}

/// Print a list of secrets, `key` or `key=value` per line in text mode
pub fn write_secrets(out: &mut impl Write, secrets: &[Secret], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for secret in secrets {
                match secret.expose_value() {
                    Some(value) => writeln!(out, "{}={}", secret.key(), value)?,
                    None => writeln!(out, "{}", secret.key())?,
                }
            }
            Ok(())
        }
        OutputFormat::Json => {
            let rows: Vec<SecretRow<'_>> = secrets.iter().map(SecretRow::from).collect();
            write_json(out, &rows)
        }
    }
}

/// Print change events, oldest first
pub fn write_history(
    out: &mut impl Write,
    events: &[ChangeEvent],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if events.is_empty() {
                writeln!(out, "No history recorded")?;
            }
            for event in events {
                writeln!(
                    out,
                    "{}\tv{}\t{:?}\t{}",
                    event.occurred_at.to_rfc3339(),
                    event.version,
                    event.kind,
                    event.key
                )?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, events),
    }
}

/// Print plain names, one per line
pub fn write_names(out: &mut impl Write, names: &[&str], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for name in names {
                writeln!(out, "{}", name)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, names),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_secrets_text() {
        let secrets = vec![Secret::new("a", "1", 1), Secret::new("b", "2", 1).without_value()];
        let out = render(|buf| write_secrets(buf, &secrets, OutputFormat::Text));
        assert_eq!(out, "a=1\nb\n");
    }

    #[test]
    fn test_write_secret_json_exposes_requested_value() {
        let secret = Secret::new("api_key", "abc123", 1);
        let out = render(|buf| write_secret(buf, &secret, OutputFormat::Json));
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["key"], "api_key");
        assert_eq!(parsed["version"], 1);
        assert_eq!(parsed["value"], "abc123");
    }

    #[test]
    fn test_write_secrets_json_omits_missing_values() {
        let secrets = vec![Secret::new("a", "1", 1).without_value()];
        let out = render(|buf| write_secrets(buf, &secrets, OutputFormat::Json));
        assert!(!out.contains("value"));
    }

    #[test]
    fn test_write_empty_history() {
        let out = render(|buf| write_history(buf, &[], OutputFormat::Text));
        assert_eq!(out, "No history recorded\n");

        let out = render(|buf| write_history(buf, &[], OutputFormat::Json));
        assert_eq!(out.trim(), "[]");
    }

    #[test]
    fn test_write_names() {
        let out = render(|buf| write_names(buf, &["db", "web"], OutputFormat::Text));
        assert_eq!(out, "db\nweb\n");
    }
}
