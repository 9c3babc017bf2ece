//! Missing-value detection for numeric cells

use serde::{Serialize, Deserialize};

/// Null value configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NullConfig {
    /// Patterns to treat as missing
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                String::new(),
                "-".to_string(),
                "N/A".to_string(),
                "NA".to_string(),
                "null".to_string(),
                "None".to_string(),
            ],
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Use these patterns instead of the defaults
    pub fn with_patterns(patterns: Vec<String>) -> Self {
        Self {
            patterns,
            ..Self::default()
        }
    }

    /// Check if a value should be treated as missing
    pub fn is_null(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace {
            value.trim()
        } else {
            value
        };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                test_value == pattern
            } else {
                test_value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    /// Parse a numeric cell, NaN when missing, unparsable or not finite
    pub fn parse_number(&self, value: &str) -> f64 {
        if self.is_null(value) {
            return f64::NAN;
        }
        match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => number,
            _ => {
                tracing::debug!("Treating unparsable cell '{}' as missing", value);
                f64::NAN
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns() {
        let config = NullConfig::default();
        assert!(config.is_null(""));
        assert!(config.is_null("  "));
        assert!(config.is_null("n/a"));
        assert!(config.is_null("NULL"));
        assert!(!config.is_null("0"));
    }

    #[test]
    fn test_parse_number() {
        let config = NullConfig::default();
        assert_eq!(config.parse_number(" 12.5 "), 12.5);
        assert_eq!(config.parse_number("0"), 0.0);
        assert!(config.parse_number("").is_nan());
        assert!(config.parse_number("N/A").is_nan());
        assert!(config.parse_number("twelve").is_nan());
        assert!(config.parse_number("inf").is_nan());
        assert!(config.parse_number("-infinity").is_nan());
        assert!(config.parse_number("NaN").is_nan());
    }

    #[test]
    fn test_case_sensitive_patterns() {
        let config = NullConfig {
            patterns: vec!["NA".to_string()],
            trim_whitespace: false,
            case_sensitive: true,
        };
        assert!(config.is_null("NA"));
        assert!(!config.is_null("na"));
        assert!(!config.is_null(" NA"));
    }
}
