//! .env file parsing.
//!
//! This module provides functionality for parsing environment variable files
//! in the standard KEY=value format.

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Parses .env files into a map of environment variables.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Whitespace around equals: `KEY = value`
/// - Values with equals signs: `URL=mysql://u:p@localhost:3306/db?ssl=false`
///
/// # Example
///
/// ```
/// use pitch::config::EnvFileParser;
///
/// let content = r#"
/// # Database config
/// DATABASE_URL=mysql://localhost:3306/camping
/// NODE_ENV=development
/// "#;
///
/// let vars = EnvFileParser::parse(content).unwrap();
/// assert_eq!(vars.get("NODE_ENV"), Some(&"development".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse an env file content string into a map of variables.
    pub fn parse(content: &str) -> Result<HashMap<String, String>> {
        let mut vars = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = Self::parse_line(line) {
                vars.insert(key, value);
            }
        }

        Ok(vars)
    }

    /// Parse a single KEY=value line.
    fn parse_line(line: &str) -> Option<(String, String)> {
        let eq_pos = line.find('=')?;
        let key = line[..eq_pos].trim().to_string();
        let value = Self::unquote(line[eq_pos + 1..].trim());
        Some((key, value))
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        if (value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\''))
        {
            if value.len() >= 2 {
                value[1..value.len() - 1].to_string()
            } else {
                value.to_string()
            }
        } else {
            value.to_string()
        }
    }

    /// Load and parse an env file from a path.
    pub fn load(path: &Path) -> Result<HashMap<String, String>> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_env_file() {
        let content = "KEY1=value1\nKEY2=value2\n";
        let vars = EnvFileParser::parse(content).unwrap();
        assert_eq!(vars.get("KEY1"), Some(&"value1".to_string()));
        assert_eq!(vars.get("KEY2"), Some(&"value2".to_string()));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = "\n# comment\nKEY=value\n\n# another\n";
        let vars = EnvFileParser::parse(content).unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("KEY"), Some(&"value".to_string()));
    }

    #[test]
    fn handles_quoted_values() {
        let content = "DOUBLE=\"double quoted\"\nSINGLE='single quoted'\nPLAIN=no quotes\n";
        let vars = EnvFileParser::parse(content).unwrap();
        assert_eq!(vars.get("DOUBLE"), Some(&"double quoted".to_string()));
        assert_eq!(vars.get("SINGLE"), Some(&"single quoted".to_string()));
        assert_eq!(vars.get("PLAIN"), Some(&"no quotes".to_string()));
    }

    #[test]
    fn handles_empty_values() {
        let vars = EnvFileParser::parse("EMPTY=").unwrap();
        assert_eq!(vars.get("EMPTY"), Some(&"".to_string()));
    }

    #[test]
    fn handles_connection_strings_with_equals() {
        let vars =
            EnvFileParser::parse("DATABASE_URL=mysql://u:p@localhost:3306/camping?ssl=false")
                .unwrap();
        assert!(vars.get("DATABASE_URL").unwrap().contains("ssl=false"));
    }

    #[test]
    fn handles_whitespace_around_equals() {
        let vars = EnvFileParser::parse("KEY = value with spaces").unwrap();
        assert_eq!(vars.get("KEY"), Some(&"value with spaces".to_string()));
    }

    #[test]
    fn ignores_lines_without_equals() {
        let vars = EnvFileParser::parse("KEY1=a\nnot a pair\nKEY2=b\n").unwrap();
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn load_reads_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "NODE_ENV=development\n").unwrap();

        let vars = EnvFileParser::load(&path).unwrap();
        assert_eq!(vars.get("NODE_ENV"), Some(&"development".to_string()));
    }
}
