use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Word list imported into the dictionary before checking.
    pub dictionary: Option<PathBuf>,
    /// Extra words seeded into the dictionary and extended by interactive
    /// "add" choices.
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,

    /// Import word lists as complete trees instead of replaying input order.
    #[serde(default)]
    pub balanced_import: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: None,
            personal_dictionary: None,
            ignore_patterns: vec![
                r"\b[A-Z0-9_]{2,}\b".to_string(),    // ALL_CAPS
                r"https?://\S+".to_string(),         // URLs
                r"\b[a-fA-F0-9]{32,}\b".to_string(), // Hashes
                r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}".to_string(), // Emails
            ],
            balanced_import: false,
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(
        dictionary: Option<PathBuf>,
        personal_dict: Option<PathBuf>,
        cli_patterns: Vec<String>,
        balanced: bool,
    ) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(".spelltree.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        // Apply CLI overrides
        if let Some(dict) = dictionary {
            config.dictionary = Some(dict);
        }
        if let Some(dict) = personal_dict {
            config.personal_dictionary = Some(dict);
        }
        if !cli_patterns.is_empty() {
            config.ignore_patterns.extend(cli_patterns);
        }
        if balanced {
            config.balanced_import = true;
        }

        // Set default personal dictionary if not specified
        if config.personal_dictionary.is_none() {
            config.personal_dictionary = Self::default_personal_dict_path();
        }

        // Ensure personal dictionary file exists
        if let Some(path) = &config.personal_dictionary {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create personal dictionary directory")?;
            }
            if !path.exists() {
                fs::write(path, "").context("Failed to create personal dictionary file")?;
            }
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Merge logic: other's values override self's if they were set
        if other.dictionary.is_some() {
            self.dictionary = other.dictionary;
        }
        if other.personal_dictionary.is_some() {
            self.personal_dictionary = other.personal_dictionary;
        }
        if !other.ignore_patterns.is_empty() {
            self.ignore_patterns = other.ignore_patterns;
        }
        self.balanced_import = other.balanced_import;
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spelltree").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spelltree").map(|dirs| dirs.config_dir().join("personal.txt"))
    }
}
