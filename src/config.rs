use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for exiframe.
///
/// Controls frame geometry, which fonts the captions use, and where the
/// framed copy is written. Every CLI flag overrides the matching value here.
///
/// # Loading
///
/// ```rust,no_run
/// use exiframe::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("exiframe.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.frame.dark = true;
/// config.output.jpeg_quality = 95;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Border and caption strip geometry.
    pub frame: FrameConfig,
    /// Caption font files.
    pub fonts: FontConfig,
    /// Output naming and encoding.
    pub output: OutputConfig,
}

/// Border and caption strip geometry, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Border width around the photo.
    pub border: u32,
    /// Height of the caption strip below the photo.
    pub caption_height: u32,
    /// Size of the camera line.
    pub large_font_size: f32,
    /// Size of the lens, exposure and date lines.
    pub font_size: f32,
    /// Dark border with light text instead of the light default.
    pub dark: bool,
    /// Leave the border out; the photo touches the canvas edges.
    pub no_frame: bool,
    /// Leave the camera and lens lines out.
    pub no_model: bool,
}

/// Caption font files (TrueType/OpenType).
///
/// When a path is `None`, a list of common system monospace fonts is searched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub bold: Option<String>,
    pub regular: Option<String>,
}

/// Output naming and encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prepended to the input file name.
    pub prefix: String,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
    /// Directory the framed copy goes to (default: current directory).
    pub directory: Option<String>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            border: 180,
            caption_height: 600,
            large_font_size: 200.0,
            font_size: 150.0,
            dark: false,
            no_frame: false,
            no_model: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "exiframe-".to_string(),
            jpeg_quality: 100,
            directory: None,
        }
    }
}

impl Config {
    /// Config file path: `exiframe.json` beside the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("exiframe.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Directory the framed copy is written to.
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .directory
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
