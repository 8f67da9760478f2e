//! Notice configuration: layout geometry, font sizes, PDF settings and the
//! output directory. Loaded from YAML or JSON; every key is optional.
//!
//! ```yaml
//! layout:
//!   margin_mm: 8
//!   long_text_threshold: 180
//! fonts:
//!   base: 12
//! pdf:
//!   scale: 0.95
//! output_dir: notices
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{NoticeError, Result};
use crate::layout::{FontSizes, LayoutConfig};
use crate::render_pdf::PdfConfig;
use crate::types::FormData;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    pub layout: LayoutConfig,
    pub fonts: FontSizes,
    pub pdf: PdfConfig,
    /// Where downloaded HTML/PDF files are written.
    pub output_dir: PathBuf,
    /// Import the Noto Sans Malayalam web font in generated documents.
    pub web_font: bool,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            fonts: FontSizes::default(),
            pdf: PdfConfig::default(),
            output_dir: PathBuf::from("."),
            web_font: true,
        }
    }
}

impl NoticeConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = read_document(path)?;
        log::debug!("loaded configuration from {}", path.display());
        config.validated()
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(source).map_err(|e| NoticeError::Config(e.to_string()))?;
        config.validated()
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(source).map_err(|e| NoticeError::Config(e.to_string()))?;
        config.validated()
    }

    fn validated(mut self) -> Result<Self> {
        self.layout.validate()?;
        let clamped = self.fonts.clamped();
        if clamped != self.fonts {
            log::warn!("font sizes {:?} clamped to {:?}", self.fonts, clamped);
            self.fonts = clamped;
        }
        Ok(self)
    }
}

/// Read form data from a `.yaml`/`.yml` or `.json` file.
pub fn load_form(path: &Path) -> Result<FormData> {
    let form = read_document(path)?;
    log::debug!("loaded form from {}", path.display());
    Ok(form)
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let source = fs::read_to_string(path).map_err(|e| NoticeError::io(path, e))?;
    let parsed = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&source).map_err(|e| e.to_string()),
        Some("yaml" | "yml") => serde_yaml::from_str(&source).map_err(|e| e.to_string()),
        other => {
            return Err(NoticeError::Config(format!(
                "unsupported format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            )));
        }
    };
    parsed.map_err(|e| NoticeError::Config(format!("{}: {e}", path.display())))
}
