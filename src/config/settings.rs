//! User settings for Kakeibo
//!
//! Holds the configured participants, the expense categories and the
//! settlement-period policy. Settings are validated when loaded so that an
//! empty participant list or an out-of-range cutoff day is reported as a
//! configuration error before any computation runs.

use serde::{Deserialize, Serialize};

use super::paths::KakeiboPaths;
use crate::error::KakeiboError;
use crate::models::{ParticipantSet, SettlementPeriodConfig};

/// User settings for Kakeibo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Participants sharing expenses, in settlement order
    #[serde(default = "default_participants")]
    pub participants: Vec<String>,

    /// Allowed expense categories
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// How expenses are bucketed into settlement periods
    #[serde(default)]
    pub settlement_period: SettlementPeriodConfig,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_participants() -> Vec<String> {
    vec!["Nori".into(), "Ban".into(), "Kio".into()]
}

fn default_categories() -> Vec<String> {
    vec![
        "Food".into(),
        "Household".into(),
        "Laundry".into(),
        "Utilities".into(),
        "Other".into(),
    ]
}

fn default_currency() -> String {
    "¥".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            participants: default_participants(),
            categories: default_categories(),
            settlement_period: SettlementPeriodConfig::default(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// The validated, ordered participant set
    pub fn participant_set(&self) -> Result<ParticipantSet, KakeiboError> {
        ParticipantSet::new(self.participants.iter().cloned())
    }

    /// Check that a category is configured
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), KakeiboError> {
        self.participant_set()?;

        // Payers and categories are matched exactly, so stored names must already be trimmed
        let mut names = self.participants.iter().chain(&self.categories);
        if let Some(name) = names.find(|n| n.trim() != n.as_str()) {
            return Err(KakeiboError::Config(format!(
                "'{}' has leading or trailing whitespace",
                name
            )));
        }

        if self.categories.is_empty() {
            return Err(KakeiboError::Config(
                "at least one category must be configured".into(),
            ));
        }
        for (idx, category) in self.categories.iter().enumerate() {
            if category.trim().is_empty() {
                return Err(KakeiboError::Config("category names cannot be blank".into()));
            }
            if self.categories[..idx].contains(category) {
                return Err(KakeiboError::Config(format!(
                    "category '{}' is listed more than once",
                    category
                )));
            }
        }

        Ok(())
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &KakeiboPaths) -> Result<Self, KakeiboError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            log::debug!("No settings at {}, using defaults", settings_path.display());
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| KakeiboError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| KakeiboError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &KakeiboPaths) -> Result<(), KakeiboError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| KakeiboError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| KakeiboError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.settlement_period.use_custom_cutoff);
        assert_eq!(settings.participant_set().unwrap().len(), 3);
        assert!(settings.has_category("Food"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.participants = vec!["A".into(), "B".into()];
        settings.settlement_period = SettlementPeriodConfig::custom(20).unwrap();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.participants, vec!["A", "B"]);
        assert!(loaded.settlement_period.use_custom_cutoff);
        assert_eq!(loaded.settlement_period.cutoff_day.get(), 20);
    }

    #[test]
    fn test_empty_participants_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"participants": []}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_untrimmed_names_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"participants": ["A ", "B"]}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("'A '"));

        let mut settings = Settings::default();
        settings.categories.push(" Travel".into());
        assert!(settings.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_bad_cutoff_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(
            paths.settings_file(),
            r#"{"settlement_period": {"use_custom_cutoff": true, "cutoff_day": 31}}"#,
        )
        .unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut settings = Settings::default();
        settings.categories.push("Food".into());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.currency_symbol, "¥");
        assert_eq!(settings.categories.len(), 5);
    }
}
