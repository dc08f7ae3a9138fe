use graph4::{
    DitherAlgorithm, Graph4Encoder, MsxColor, OutputFormat, Palette, PalettePolicy, Rgb8,
    ViewportHeight,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Export options, loaded from a YAML file and/or set from the command line.
///
/// Every key is optional; a missing key takes its default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExportConfig {
    /// Keep palette index 0 for transparent pixels
    #[serde(default)]
    pub reserve_index_0: bool,

    /// Pixels of exactly this color are transparent (with `reserve_index_0`)
    #[serde(default)]
    pub transparent_color: Option<String>,

    #[serde(default = "default_true")]
    pub dithering: bool,

    #[serde(default = "default_dither_strength")]
    pub dither_strength: f32,

    #[serde(default = "default_dither_algorithm")]
    pub dither_algorithm: String,

    /// Visible lines per page: 192 or 212
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u16,

    /// combined, split, raw or headerless
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Write files; when false the image is only quantized in memory
    #[serde(default = "default_true")]
    pub write_to_disk: bool,

    #[serde(default = "default_palette_policy")]
    pub palette_policy: String,

    /// Fixed palette as hex colors, replaces the derived one
    #[serde(default)]
    pub palette: Option<Vec<String>>,

    /// Also write a .PAL file for combined and headerless output
    #[serde(default)]
    pub export_palette: bool,

    /// Write a .TXT palette listing
    #[serde(default)]
    pub palette_text: bool,

    #[serde(default = "default_true")]
    pub bsave_header: bool,

    /// Base file name, without extension
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_dither_strength() -> f32 {
    1.0
}

fn default_dither_algorithm() -> String {
    DitherAlgorithm::default().name().to_string()
}

fn default_viewport_height() -> u16 {
    212
}

fn default_output_format() -> String {
    OutputFormat::default().name().to_string()
}

fn default_palette_policy() -> String {
    PalettePolicy::default().name().to_string()
}

fn default_name() -> String {
    "NONAME".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            reserve_index_0: false,
            transparent_color: None,
            dithering: true,
            dither_strength: default_dither_strength(),
            dither_algorithm: default_dither_algorithm(),
            viewport_height: default_viewport_height(),
            output_format: default_output_format(),
            write_to_disk: true,
            palette_policy: default_palette_policy(),
            palette: None,
            export_palette: false,
            palette_text: false,
            bsave_header: true,
            name: default_name(),
            output_dir: default_output_dir(),
        }
    }
}

/// Validated export options, ready to run.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub encoder: Graph4Encoder,
    pub format: OutputFormat,
    pub write_to_disk: bool,
    pub palette_text: bool,
    pub name: String,
    pub output_dir: PathBuf,
}

impl ExportConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            format = %config.output_format,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Check every option and build the encoder.
    ///
    /// Nothing is read or written here, so a bad option is reported before
    /// any work starts.
    pub fn resolve(&self) -> Result<ExportSettings, ConfigError> {
        let viewport = ViewportHeight::from_lines(self.viewport_height as usize)
            .ok_or(ConfigError::InvalidViewport(self.viewport_height))?;

        if !self.dither_strength.is_finite() || !(0.0..=1.0).contains(&self.dither_strength) {
            return Err(ConfigError::InvalidStrength(self.dither_strength));
        }

        let transparent_color = self
            .transparent_color
            .as_deref()
            .map(parse_color)
            .transpose()?;

        let algorithm: DitherAlgorithm = self.dither_algorithm.parse()?;
        let format: OutputFormat = self.output_format.parse()?;
        let policy: PalettePolicy = self.palette_policy.parse()?;

        if !is_valid_name(&self.name) {
            return Err(ConfigError::InvalidName(self.name.clone()));
        }

        let mut encoder = Graph4Encoder::new()
            .reserve_index0(self.reserve_index_0)
            .transparent_color(transparent_color)
            .dithering(self.dithering)
            .dither_strength(self.dither_strength)
            .algorithm(algorithm)
            .palette_policy(policy)
            .viewport_height(viewport)
            .bsave_header(self.bsave_header)
            .export_palette(self.export_palette);

        if let Some(colors) = &self.palette {
            let hex: Vec<&str> = colors.iter().map(String::as_str).collect();
            let palette = Palette::from_hex(&hex, self.reserve_index_0)?;
            let fixed: Vec<MsxColor> = palette.entries()[palette.candidates()].to_vec();
            encoder = encoder.fixed_palette(fixed);
        }

        Ok(ExportSettings {
            encoder,
            format,
            write_to_disk: self.write_to_disk,
            palette_text: self.palette_text,
            name: self.name.clone(),
            output_dir: self.output_dir.clone(),
        })
    }
}

fn parse_color(value: &str) -> Result<Rgb8, ConfigError> {
    value.parse().map_err(|source| ConfigError::InvalidColor {
        value: value.to_string(),
        source,
    })
}

/// A bare file stem: no separators, not empty, not a dot name.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
