//! Generator configuration: user overrides, defaults and resolution.
//!
//! Callers supply a [`PartialGeneratorConfig`] (typically parsed from JSON);
//! [`resolve_config`] merges it against the immutable defaults and yields the
//! [`GeneratorConfig`] a job actually runs with.

use crate::error::PipelineError;
use once_cell::sync::Lazy;
use refcards_types::PaperSize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a card prints its URL below the code number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlDisplayStyle {
    /// One compact line.
    #[default]
    Truncated,
    /// Two lines, the referral token emphasized.
    Full,
    Hidden,
}

impl UrlDisplayStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            UrlDisplayStyle::Truncated => "truncated",
            UrlDisplayStyle::Full => "full",
            UrlDisplayStyle::Hidden => "hidden",
        }
    }
}

impl fmt::Display for UrlDisplayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrlDisplayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncated" => Ok(UrlDisplayStyle::Truncated),
            "full" => Ok(UrlDisplayStyle::Full),
            "hidden" => Ok(UrlDisplayStyle::Hidden),
            other => Err(format!(
                "Unknown URL display style '{}': expected truncated, full or hidden",
                other
            )),
        }
    }
}

/// A fully resolved configuration. Every field has a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub start_number: i64,
    pub label_prefix: String,
    pub label_font_size: f32,
    pub url_display_style: UrlDisplayStyle,
    pub qr_width_ratio: f32,
    pub qr_height_ratio: f32,
    pub card_top_padding: f32,
    pub logo_spacing: f32,
    pub number_spacing: f32,
    pub grid_cols: u32,
    pub grid_rows: u32,
    pub paper_size: PaperSize,
    /// Empty when no event name should be printed.
    pub event_name: String,
    pub event_date: String,
}

static DEFAULT_CONFIG: Lazy<GeneratorConfig> = Lazy::new(|| GeneratorConfig {
    start_number: 1,
    label_prefix: "#".to_string(),
    label_font_size: 14.0,
    url_display_style: UrlDisplayStyle::Truncated,
    qr_width_ratio: 0.65,
    qr_height_ratio: 0.55,
    card_top_padding: 15.0,
    logo_spacing: 8.0,
    number_spacing: 8.0,
    grid_cols: 3,
    grid_rows: 3,
    paper_size: PaperSize::A4,
    event_name: String::new(),
    event_date: String::new(),
});

impl Default for GeneratorConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

impl GeneratorConfig {
    pub fn cards_per_page(&self) -> usize {
        self.grid_cols as usize * self.grid_rows as usize
    }

    pub fn has_event_name(&self) -> bool {
        !self.event_name.is_empty()
    }

    pub fn has_event_date(&self) -> bool {
        !self.event_date.is_empty()
    }
}

/// User-supplied overrides. Missing fields fall back to the defaults and
/// unknown JSON fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialGeneratorConfig {
    pub start_number: Option<i64>,
    pub label_prefix: Option<String>,
    pub label_font_size: Option<f32>,
    pub url_display_style: Option<UrlDisplayStyle>,
    pub qr_width_ratio: Option<f32>,
    pub qr_height_ratio: Option<f32>,
    pub card_top_padding: Option<f32>,
    pub logo_spacing: Option<f32>,
    pub number_spacing: Option<f32>,
    /// Signed so that zero and negative inputs parse and are then repaired.
    pub grid_cols: Option<i64>,
    pub grid_rows: Option<i64>,
    pub paper_size: Option<PaperSize>,
    pub event_name: Option<String>,
    pub event_date: Option<String>,
}

impl PartialGeneratorConfig {
    /// Parses a JSON configuration object.
    ///
    /// Malformed JSON and unknown enum values (such as an unsupported paper
    /// size) are reported as [`PipelineError::Validation`].
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(json)
            .map_err(|e| PipelineError::Validation(format!("Invalid configuration JSON: {}", e)))
    }

    /// Field-by-field overlay: values set in `overrides` win.
    pub fn merged_with(self, overrides: PartialGeneratorConfig) -> Self {
        Self {
            start_number: overrides.start_number.or(self.start_number),
            label_prefix: overrides.label_prefix.or(self.label_prefix),
            label_font_size: overrides.label_font_size.or(self.label_font_size),
            url_display_style: overrides.url_display_style.or(self.url_display_style),
            qr_width_ratio: overrides.qr_width_ratio.or(self.qr_width_ratio),
            qr_height_ratio: overrides.qr_height_ratio.or(self.qr_height_ratio),
            card_top_padding: overrides.card_top_padding.or(self.card_top_padding),
            logo_spacing: overrides.logo_spacing.or(self.logo_spacing),
            number_spacing: overrides.number_spacing.or(self.number_spacing),
            grid_cols: overrides.grid_cols.or(self.grid_cols),
            grid_rows: overrides.grid_rows.or(self.grid_rows),
            paper_size: overrides.paper_size.or(self.paper_size),
            event_name: overrides.event_name.or(self.event_name),
            event_date: overrides.event_date.or(self.event_date),
        }
    }
}

impl From<&GeneratorConfig> for PartialGeneratorConfig {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            start_number: Some(config.start_number),
            label_prefix: Some(config.label_prefix.clone()),
            label_font_size: Some(config.label_font_size),
            url_display_style: Some(config.url_display_style),
            qr_width_ratio: Some(config.qr_width_ratio),
            qr_height_ratio: Some(config.qr_height_ratio),
            card_top_padding: Some(config.card_top_padding),
            logo_spacing: Some(config.logo_spacing),
            number_spacing: Some(config.number_spacing),
            grid_cols: Some(i64::from(config.grid_cols)),
            grid_rows: Some(i64::from(config.grid_rows)),
            paper_size: Some(config.paper_size),
            event_name: Some(config.event_name.clone()),
            event_date: Some(config.event_date.clone()),
        }
    }
}

fn resolve_grid_dimension(value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(default),
        _ => default,
    }
}

/// Merges overrides with the defaults. Total and idempotent.
///
/// Grid dimensions that are absent, zero or negative fall back to the default;
/// every other field passes through unvalidated.
pub fn resolve_config(partial: &PartialGeneratorConfig) -> GeneratorConfig {
    let defaults = &*DEFAULT_CONFIG;
    GeneratorConfig {
        start_number: partial.start_number.unwrap_or(defaults.start_number),
        label_prefix: partial
            .label_prefix
            .clone()
            .unwrap_or_else(|| defaults.label_prefix.clone()),
        label_font_size: partial.label_font_size.unwrap_or(defaults.label_font_size),
        url_display_style: partial
            .url_display_style
            .unwrap_or(defaults.url_display_style),
        qr_width_ratio: partial.qr_width_ratio.unwrap_or(defaults.qr_width_ratio),
        qr_height_ratio: partial.qr_height_ratio.unwrap_or(defaults.qr_height_ratio),
        card_top_padding: partial.card_top_padding.unwrap_or(defaults.card_top_padding),
        logo_spacing: partial.logo_spacing.unwrap_or(defaults.logo_spacing),
        number_spacing: partial.number_spacing.unwrap_or(defaults.number_spacing),
        grid_cols: resolve_grid_dimension(partial.grid_cols, defaults.grid_cols),
        grid_rows: resolve_grid_dimension(partial.grid_rows, defaults.grid_rows),
        paper_size: partial.paper_size.unwrap_or(defaults.paper_size),
        event_name: partial
            .event_name
            .clone()
            .unwrap_or_else(|| defaults.event_name.clone()),
        event_date: partial
            .event_date
            .clone()
            .unwrap_or_else(|| defaults.event_date.clone()),
    }
}

/// The sequential number printed on a card, zero-padded to three digits.
pub fn format_code_number(start_number: i64, index: usize) -> String {
    let value = start_number.saturating_add(index as i64);
    format!("{:03}", value)
}

pub fn format_card_label(code_number: &str, config: &GeneratorConfig) -> String {
    format!("{}{}", config.label_prefix, code_number)
}
