use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    convert::{DEFAULT_CONVERT_ENDPOINT, LocalConverter, RemoteConverter, SvgConverter},
    foundation::core::{Rgba8, Size},
    foundation::error::{ShowcaseError, ShowcaseResult},
    layout::planner::LayoutStrategy,
};

/// Devicon sources drawn on the showcase, in draw-cycle order.
pub const DEFAULT_ICON_SOURCES: &[&str] = &[
    // Web dev
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/html5/html5-plain.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/css3/css3-plain.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/tailwindcss/tailwindcss-original.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/javascript/javascript-plain.svg",
    // Web frameworks
    "https://cdn.jsdelivr.net/gh/devicons/devicon@latest/icons/vitejs/vitejs-original.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/react/react-original.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/vuejs/vuejs-plain.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/flutter/flutter-plain.svg",
    // Backend
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/nodejs/nodejs-plain.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/python/python-plain.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon@latest/icons/rust/rust-original.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/linux/linux-original.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/docker/docker-plain.svg",
    // Interests
    "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/linux/linux-original.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon@latest/icons/raspberrypi/raspberrypi-plain.svg",
    // OS
    "https://cdn.jsdelivr.net/gh/devicons/devicon@latest/icons/linuxmint/linuxmint-plain.svg",
    "https://cdn.jsdelivr.net/gh/devicons/devicon@latest/icons/debian/debian-plain.svg",
];

/// Which [`SvgConverter`] turns icon sources into rasters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// Post to the HTTP conversion endpoint.
    #[default]
    Remote,
    /// Rasterize in-process with `resvg`.
    Local,
}

/// Every knob of a showcase run. Defaults reproduce the stock collage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// Remote SVG URLs, in draw-cycle order.
    pub icon_sources: Vec<String>,
    /// Folder receiving the converted icon rasters.
    pub icon_dir: PathBuf,
    /// JSON icon index, read and written at the same path.
    pub index_file: PathBuf,
    /// Conversion backend.
    pub converter: ConverterKind,
    /// Endpoint used by [`ConverterKind::Remote`].
    pub convert_endpoint: String,
    /// Longest-side raster size used by [`ConverterKind::Local`].
    pub local_raster_px: Option<u32>,
    /// Output canvas size.
    pub canvas: Size,
    /// Side length every icon is resized to before drawing.
    pub icon_size: u32,
    /// Canvas fill color.
    pub background: Rgba8,
    /// Number of icon instances drawn.
    pub placements: usize,
    /// Placement strategy.
    pub layout: LayoutStrategy,
    /// Pause between successive external calls and icon loads, in milliseconds.
    pub pace_ms: u64,
    /// HTTP timeout; `None` waits forever.
    pub http_timeout_secs: Option<u64>,
    /// Directory receiving the final image.
    pub output_dir: PathBuf,
    /// Output file name prefix; the file is `<prefix>-<1..=100>.png`.
    pub output_prefix: String,
    /// Open the result in the platform image viewer.
    pub show: bool,
    /// Re-fetch every icon even when a usable index exists.
    pub refresh: bool,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            icon_sources: DEFAULT_ICON_SOURCES.iter().map(|s| (*s).to_owned()).collect(),
            icon_dir: PathBuf::from("icons"),
            index_file: PathBuf::from("icons").join("index.json"),
            converter: ConverterKind::Remote,
            convert_endpoint: DEFAULT_CONVERT_ENDPOINT.to_owned(),
            local_raster_px: Some(128),
            canvas: Size {
                width: 1000,
                height: 400,
            },
            icon_size: 40,
            background: Rgba8::rgb(0x25, 0x31, 0x42),
            placements: 800,
            layout: LayoutStrategy::default(),
            pace_ms: 500,
            http_timeout_secs: None,
            output_dir: PathBuf::from("."),
            output_prefix: "skills-showcase".to_owned(),
            show: true,
            refresh: false,
        }
    }
}

impl ShowcaseConfig {
    /// Load a JSON config; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> ShowcaseResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ShowcaseError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ShowcaseResult<()> {
        Size::new(self.canvas.width, self.canvas.height)?;
        if self.icon_size == 0 {
            return Err(ShowcaseError::validation("icon_size must be non-zero"));
        }
        if self.output_prefix.trim().is_empty() {
            return Err(ShowcaseError::validation("output_prefix must not be empty"));
        }
        self.layout.validate()
    }

    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }

    pub fn icon_size(&self) -> Size {
        Size {
            width: self.icon_size,
            height: self.icon_size,
        }
    }

    pub fn build_converter(&self) -> Box<dyn SvgConverter> {
        match self.converter {
            ConverterKind::Remote => Box::new(RemoteConverter::new(self.convert_endpoint.clone())),
            ConverterKind::Local => Box::new(LocalConverter::new(self.local_raster_px)),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
