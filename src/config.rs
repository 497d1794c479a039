//! User configuration.
//!
//! The configuration lives in `<config dir>/hellogl/config.json`. A missing
//! file means defaults; a file that does not parse is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
    pub clear_color: [f32; 4],
    pub default_lesson: String,
    /// Directory the file-based lessons load their shaders from.
    pub shader_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "hellogl".to_string(),
            vsync: true,
            clear_color: [0.2, 0.2, 0.4, 1.0],
            default_lesson: "hello_triangle".to_string(),
            shader_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default location of the configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hellogl").join("config.json"))
    }

    /// Loads the configuration from the default location.
    pub fn load() -> Result<Self, String> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads the configuration from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::parse(&s).map_err(|e| format!("{}: {e}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(format!("{}: {e}", path.display())),
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }

    /// The directory holding the shaders of the file-based lessons.
    pub fn shader_dir(&self) -> PathBuf {
        self.shader_dir
            .clone()
            .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("src/shaders"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse(r#"{ "width": 1024, "default_lesson": "two_programs" }"#).unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.default_lesson, "two_programs");
        assert_eq!(config.clear_color, [0.2, 0.2, 0.4, 1.0]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::parse(r#"{ "fullscreen": true }"#).is_err());
        assert!(Config::parse("{ width: 3 }").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("hellogl-no-such-dir").join("config.json");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_shader_dir_override() {
        let config = Config {
            shader_dir: Some(PathBuf::from("/tmp/shaders")),
            ..Config::default()
        };
        assert_eq!(config.shader_dir(), PathBuf::from("/tmp/shaders"));
        assert!(Config::default().shader_dir().ends_with("src/shaders"));
    }
}
