//! Dialogue data configuration: rule tables, lexicons, script data.
//!
//! The engine ships usable Japanese defaults for all three; these paths let
//! a deployment swap campaigns without a rebuild. JSON and YAML are both
//! accepted, chosen by file extension.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::dialogue::{ScriptData, SentimentLexicon};
use crate::domain::rules::RuleSet;

use super::error::ConfigError;

/// Paths to dialogue data files
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DialogueConfig {
    /// Rule table for canned responses
    pub rules_path: Option<PathBuf>,

    /// Sentiment keyword lexicon
    pub lexicon_path: Option<PathBuf>,

    /// Sales script facts (company, product, price)
    pub script_path: Option<PathBuf>,
}

impl DialogueConfig {
    /// Loads the rule table, or an empty table when no path is configured.
    pub fn load_rules(&self) -> Result<RuleSet, ConfigError> {
        match &self.rules_path {
            Some(path) => read_data(path),
            None => Ok(RuleSet::default()),
        }
    }

    /// Loads the sentiment lexicon, or the built-in Japanese defaults.
    pub fn load_lexicon(&self) -> Result<SentimentLexicon, ConfigError> {
        match &self.lexicon_path {
            Some(path) => read_data(path),
            None => Ok(SentimentLexicon::default()),
        }
    }

    /// Loads the script data, or the built-in rice-sales defaults.
    pub fn load_script_data(&self) -> Result<ScriptData, ConfigError> {
        match &self.script_path {
            Some(path) => read_data(path),
            None => Ok(ScriptData::default()),
        }
    }
}

fn read_data<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(&contents)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&contents)?),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("none").to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_paths_fall_back_to_defaults() {
        let config = DialogueConfig::default();
        assert!(config.load_rules().unwrap().is_empty());
        assert_eq!(config.load_lexicon().unwrap(), SentimentLexicon::default());
        assert_eq!(config.load_script_data().unwrap(), ScriptData::default());
    }

    #[test]
    fn loads_rules_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[{{"id": "price_faq", "any_keywords": ["価格"], "response": "588円です。"}}]"#
        )
        .unwrap();

        let config = DialogueConfig {
            rules_path: Some(path),
            ..DialogueConfig::default()
        };
        let rules = config.load_rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.respond("価格は？").is_some());
    }

    #[test]
    fn loads_lexicon_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.yaml");
        std::fs::write(
            &path,
            "positive: [\"良い\"]\nnegative: [\"困る\"]\nrefusal: [\"断る\"]\n",
        )
        .unwrap();

        let config = DialogueConfig {
            lexicon_path: Some(path),
            ..DialogueConfig::default()
        };
        let lexicon = config.load_lexicon().unwrap();
        assert_eq!(lexicon.positive, vec!["良い".to_string()]);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "").unwrap();

        let config = DialogueConfig {
            rules_path: Some(path),
            ..DialogueConfig::default()
        };
        assert!(matches!(
            config.load_rules(),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let config = DialogueConfig {
            rules_path: Some(PathBuf::from("/nonexistent/rules.json")),
            ..DialogueConfig::default()
        };
        assert!(matches!(config.load_rules(), Err(ConfigError::Io(_))));
    }
}
