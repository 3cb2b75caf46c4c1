//! Runtime configuration.
//!
//! | Field | Default | Range | Env var |
//! |-------|---------|-------|---------|
//! | `id_prefix` | `raxui` | non-empty | `RAXUI_ID_PREFIX` |
//! | `typeahead_debounce` | 350ms | 50-2000ms | `RAXUI_TYPEAHEAD_DEBOUNCE_MS` |

use std::time::Duration;

/// Default prefix for generated element ids.
pub const DEFAULT_ID_PREFIX: &str = "raxui";

/// Default quiet period before the typeahead buffer resets.
pub const DEFAULT_TYPEAHEAD_DEBOUNCE_MS: u64 = 350;

/// Minimum allowed typeahead debounce.
pub const MIN_TYPEAHEAD_DEBOUNCE_MS: u64 = 50;

/// Maximum allowed typeahead debounce.
pub const MAX_TYPEAHEAD_DEBOUNCE_MS: u64 = 2000;

/// Configuration shared by every component mounted on a runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaxConfig {
    /// Prefix for generated ids (`{prefix}-{kind}-{n}`).
    pub id_prefix: String,
    /// How long the typeahead buffer survives without a new keystroke.
    pub typeahead_debounce: Duration,
}

impl Default for RaxConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            typeahead_debounce: Duration::from_millis(DEFAULT_TYPEAHEAD_DEBOUNCE_MS),
        }
    }
}

impl RaxConfig {
    /// Set the id prefix.
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set the typeahead debounce window.
    #[must_use]
    pub fn with_typeahead_debounce(mut self, debounce: Duration) -> Self {
        self.typeahead_debounce = debounce;
        self
    }

    /// Load config from environment variables, falling back to defaults.
    ///
    /// Unparseable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(prefix) = std::env::var("RAXUI_ID_PREFIX") {
            config.id_prefix = prefix;
        }

        if let Ok(val) = std::env::var("RAXUI_TYPEAHEAD_DEBOUNCE_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.typeahead_debounce = Duration::from_millis(ms),
                Err(_) => tracing::warn!(
                    value = %val,
                    "ignoring unparseable RAXUI_TYPEAHEAD_DEBOUNCE_MS"
                ),
            }
        }

        config.validated()
    }

    /// Clamp values to their valid ranges.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let ms = self.typeahead_debounce.as_millis() as u64;
        let clamped = ms.clamp(MIN_TYPEAHEAD_DEBOUNCE_MS, MAX_TYPEAHEAD_DEBOUNCE_MS);
        if clamped != ms {
            tracing::warn!(requested = ms, clamped, "typeahead debounce out of range");
        }
        self.typeahead_debounce = Duration::from_millis(clamped);

        if self.id_prefix.trim().is_empty() {
            self.id_prefix = DEFAULT_ID_PREFIX.to_string();
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RaxConfig::default();
        assert_eq!(config.id_prefix, "raxui");
        assert_eq!(config.typeahead_debounce, Duration::from_millis(350));
    }

    #[test]
    fn test_validated_clamps_debounce() {
        let config = RaxConfig::default()
            .with_typeahead_debounce(Duration::from_millis(10))
            .validated();
        assert_eq!(config.typeahead_debounce.as_millis(), 50);

        let config = RaxConfig::default()
            .with_typeahead_debounce(Duration::from_secs(30))
            .validated();
        assert_eq!(config.typeahead_debounce.as_millis(), 2000);
    }

    #[test]
    fn test_validated_restores_empty_prefix() {
        let config = RaxConfig::default().with_id_prefix("  ").validated();
        assert_eq!(config.id_prefix, DEFAULT_ID_PREFIX);
    }
}
