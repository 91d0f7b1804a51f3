use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimilarityError};
use crate::vectorizer::VectorizerConfig;

pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Engine configuration.
///
/// Every field can be overridden from the environment (see `from_env`); the
/// binary loads a `.env` file first via dotenvy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Normalization cache entries; 0 disables memoization
    pub cache_capacity: usize,
    /// Cap on vocabulary size per comparison
    pub max_features: Option<usize>,
    /// Fold terms to lowercase before weighting
    pub lowercase: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_features: None,
            lowercase: false,
        }
    }
}

impl SimilarityConfig {
    /// Load from `SIMCHECK_CACHE_CAPACITY`, `SIMCHECK_MAX_FEATURES` and
    /// `SIMCHECK_LOWERCASE`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cache_capacity = match lookup("SIMCHECK_CACHE_CAPACITY") {
            Some(raw) => parse_var("SIMCHECK_CACHE_CAPACITY", &raw)?,
            None => defaults.cache_capacity,
        };

        let max_features = match lookup("SIMCHECK_MAX_FEATURES").as_deref() {
            None | Some("") | Some("none") => None,
            Some(raw) => Some(parse_var("SIMCHECK_MAX_FEATURES", raw)?),
        };

        let lowercase = match lookup("SIMCHECK_LOWERCASE").as_deref() {
            None => defaults.lowercase,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => {
                return Err(SimilarityError::InvalidConfig {
                    message: format!("SIMCHECK_LOWERCASE: expected a boolean, got {:?}", other),
                })
            }
        };

        let config = Self {
            cache_capacity,
            max_features,
            lowercase,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.vectorizer_config().validate()
    }

    pub fn vectorizer_config(&self) -> VectorizerConfig {
        VectorizerConfig {
            max_features: self.max_features,
            lowercase: self.lowercase,
        }
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| SimilarityError::InvalidConfig {
            message: format!("{}: cannot parse {:?}", key, raw),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() -> Result<()> {
        let config = SimilarityConfig::from_lookup(lookup_from(&[]))?;
        assert_eq!(config, SimilarityConfig::default());
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<()> {
        let config = SimilarityConfig::from_lookup(lookup_from(&[
            ("SIMCHECK_CACHE_CAPACITY", "0"),
            ("SIMCHECK_MAX_FEATURES", "500"),
            ("SIMCHECK_LOWERCASE", "true"),
        ]))?;
        assert_eq!(config.cache_capacity, 0);
        assert_eq!(config.max_features, Some(500));
        assert!(config.lowercase);
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_number =
            SimilarityConfig::from_lookup(lookup_from(&[("SIMCHECK_CACHE_CAPACITY", "lots")]));
        assert!(matches!(bad_number, Err(SimilarityError::InvalidConfig { .. })));

        let bad_bool = SimilarityConfig::from_lookup(lookup_from(&[("SIMCHECK_LOWERCASE", "maybe")]));
        assert!(bad_bool.is_err());

        let zero_cap = SimilarityConfig::from_lookup(lookup_from(&[("SIMCHECK_MAX_FEATURES", "0")]));
        assert!(zero_cap.is_err());
    }
}
