use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppSettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings path unavailable")]
    MissingSettingsPath,

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, AppSettingsError>;

/// Style of the filter-name label drawn over the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Pixel height of the label glyphs.
    pub size: f32,
    pub color: [u8; 3],
    pub x: f32,
    pub y: f32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            size: 32.0,
            color: [255, 0, 0],
            x: 0.0,
            y: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub font_path: PathBuf,
    pub target_fps: usize,
    pub overlay: OverlaySettings,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            title: "Image Processing Viewer".to_string(),
            width: 800,
            height: 600,
            font_path: PathBuf::from("FiraSans-Book.ttf"),
            target_fps: 60,
            overlay: OverlaySettings::default(),
        }
    }
}

impl ViewerSettings {
    /// Load from the per-user settings file, or defaults when none exists.
    pub fn load() -> Result<Self> {
        Self::load_from(settings_file_path()?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AppSettingsError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.target_fps == 0 {
            return Err(AppSettingsError::Invalid(
                "target_fps must be non-zero".to_string(),
            ));
        }
        if !(self.overlay.size.is_finite() && self.overlay.size > 0.0) {
            return Err(AppSettingsError::Invalid(format!(
                "overlay size {} must be positive",
                self.overlay.size
            )));
        }
        Ok(())
    }
}

pub fn settings_file_path() -> Result<PathBuf> {
    use directories::ProjectDirs;

    let dirs = ProjectDirs::from("", "", "image-viewer")
        .ok_or(AppSettingsError::MissingSettingsPath)?;
    Ok(dirs.config_dir().join("settings.json"))
}
