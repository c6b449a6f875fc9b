//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable holding the standard Gemini key.
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable holding the key selected for pro models.
pub const SELECTED_KEY_ENV: &str = "GEMINI_SELECTED_API_KEY";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Default settings, used when the matching CLI flag is absent.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
    /// Key chosen for pro models, typically from a paid project.
    pub selected: Option<String>,
}

/// Default setting values from the config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default aspect ratio label.
    pub aspect_ratio: String,
    /// Default resolution name.
    pub resolution: String,
    /// Default number of images.
    pub count: u32,
    /// Default output format.
    pub format: String,
    /// Default gallery directory.
    pub output_dir: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: "1:1".to_string(),
            resolution: "standard".to_string(),
            count: 1,
            format: "png".to_string(),
            output_dir: "lumina-gallery".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Gemini API key, preferring the environment variable.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        non_empty_env(GEMINI_KEY_ENV).or_else(|| self.keys.gemini.clone())
    }

    /// Get the key selected for pro models, preferring the environment variable.
    #[must_use]
    pub fn selected_key(&self) -> Option<String> {
        non_empty_env(SELECTED_KEY_ENV).or_else(|| self.keys.selected.clone())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Write `keys.selected` into the config file, keeping every other entry.
///
/// # Errors
///
/// Returns an error if the existing file cannot be parsed or the file
/// cannot be written.
pub fn store_selected_key(path: &Path, key: &str) -> Result<(), String> {
    let mut table = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        contents
            .parse::<toml::Table>()
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?
    } else {
        toml::Table::new()
    };

    let keys = table.entry("keys").or_insert(toml::Value::Table(toml::Table::new()));
    let Some(keys) = keys.as_table_mut() else {
        return Err(format!("'keys' in {} is not a table", path.display()));
    };
    keys.insert("selected".to_string(), toml::Value::String(key.to_string()));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }
    let contents = toml::to_string(&table).map_err(|e| format!("Failed to encode config: {e}"))?;
    std::fs::write(path, contents)
        .map_err(|e| format!("Failed to write config {}: {e}", path.display()))
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `LUMINA_CONFIG` environment variable
/// 3. `~/.config/lumina/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("LUMINA_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/lumina/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/lumina/config.toml")
    } else {
        PathBuf::from("lumina.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.keys.gemini.is_none());
        assert!(config.keys.selected.is_none());
        assert_eq!(config.defaults.aspect_ratio, "1:1");
        assert_eq!(config.defaults.resolution, "standard");
        assert_eq!(config.defaults.count, 1);
        assert_eq!(config.defaults.format, "png");
        assert_eq!(config.defaults.output_dir, "lumina-gallery");
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.defaults.resolution, "standard");
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("lumina_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[keys]
gemini = "test-gemini-key"
selected = "test-paid-key"

[defaults]
aspect_ratio = "9:16"
resolution = "4k"
count = 3
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.gemini.as_deref(), Some("test-gemini-key"));
        assert_eq!(config.keys.selected.as_deref(), Some("test-paid-key"));
        assert_eq!(config.defaults.aspect_ratio, "9:16");
        assert_eq!(config.defaults.resolution, "4k");
        assert_eq!(config.defaults.count, 3);
        // Unset defaults keep their built-in values.
        assert_eq!(config.defaults.format, "png");
        assert_eq!(config.defaults.output_dir, "lumina-gallery");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("lumina_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_keys_used_without_env() {
        let config = Config {
            keys: KeysConfig { gemini: Some("from-file".into()), selected: Some("paid".into()) },
            ..Config::default()
        };

        // Env keys take precedence; nothing to check when one is set.
        if std::env::var(GEMINI_KEY_ENV).is_ok() || std::env::var(SELECTED_KEY_ENV).is_ok() {
            return;
        }
        assert_eq!(config.gemini_key().as_deref(), Some("from-file"));
        assert_eq!(config.selected_key().as_deref(), Some("paid"));
    }

    #[test]
    fn store_selected_key_preserves_other_entries() {
        let dir = std::env::temp_dir().join("lumina_config_store_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[keys]\ngemini = \"basic\"\n\n[defaults]\ncount = 2\n").unwrap();

        store_selected_key(&path, "paid-key").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.gemini.as_deref(), Some("basic"));
        assert_eq!(config.keys.selected.as_deref(), Some("paid-key"));
        assert_eq!(config.defaults.count, 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn store_selected_key_creates_file() {
        let dir = std::env::temp_dir().join("lumina_config_store_new_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested/config.toml");

        store_selected_key(&path, "paid-key").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.selected.as_deref(), Some("paid-key"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
