//! Report configuration types.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Chart color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    /// White background (default).
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl ReportTheme {
    /// ECharts theme argument as a JavaScript literal.
    pub fn echarts_theme(&self) -> &'static str {
        match self {
            ReportTheme::Light => "null",
            ReportTheme::Dark => "'dark'",
        }
    }
}

/// CDN library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnLibrary {
    /// Pinned version number.
    pub version: String,
    /// Subresource integrity hash, emitted only when set.
    #[serde(default)]
    pub sri: Option<String>,
    /// Path within npm package.
    #[serde(default)]
    pub path: Option<String>,
}

impl CdnLibrary {
    /// Create a new CDN library configuration.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            sri: None,
            path: None,
        }
    }

    /// Set the subresource integrity hash.
    pub fn with_sri(mut self, sri: impl Into<String>) -> Self {
        self.sri = Some(sri.into());
        self
    }

    /// Set the path within the npm package.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Get the full CDN URL for this library.
    pub fn url(&self, base_url: &str, package_name: &str) -> String {
        let path = self.path.as_deref().unwrap_or("dist/index.min.js");
        format!("{}/{}@{}/{}", base_url, package_name, self.version, path)
    }
}

/// CDN configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Base URL for CDN resources.
    #[serde(default = "default_cdn_base")]
    pub base_url: String,
    /// ECharts build used by every chart document.
    #[serde(default = "default_echarts")]
    pub echarts: CdnLibrary,
}

fn default_cdn_base() -> String {
    "https://cdn.jsdelivr.net/npm".to_string()
}

fn default_echarts() -> CdnLibrary {
    CdnLibrary::new("5.5.0").with_path("dist/echarts.min.js")
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base_url: default_cdn_base(),
            echarts: default_echarts(),
        }
    }
}

impl CdnConfig {
    /// URL of the ECharts script.
    pub fn echarts_url(&self) -> String {
        self.echarts.url(&self.base_url, "echarts")
    }
}

/// Fixed styling for one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// Bar or line color as a CSS hex string.
    pub color: String,
    /// Canvas height in pixels. The report iframe uses the same height.
    pub height: u32,
    /// Line width (timeline only).
    #[serde(default = "default_line_width")]
    pub line_width: u32,
    /// Marker size (timeline only).
    #[serde(default = "default_marker_size")]
    pub marker_size: u32,
}

fn default_line_width() -> u32 {
    3
}

fn default_marker_size() -> u32 {
    8
}

impl ChartStyle {
    fn new(title: &str, x_title: &str, y_title: &str, color: &str, height: u32) -> Self {
        Self {
            title: title.to_string(),
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            color: color.to_string(),
            height,
            line_width: default_line_width(),
            marker_size: default_marker_size(),
        }
    }
}

/// Styling for the four charts.
///
/// Each `[charts.<kind>]` table overrides only the keys it lists; the rest
/// keep that chart's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ChartStyleOverrides")]
pub struct ChartStyles {
    pub year: ChartStyle,
    pub month: ChartStyle,
    pub timeline: ChartStyle,
    pub author: ChartStyle,
}

/// Partial chart style as written in a config file.
#[derive(Debug, Clone, Default, Deserialize)]
struct ChartStyleOverride {
    title: Option<String>,
    x_title: Option<String>,
    y_title: Option<String>,
    color: Option<String>,
    height: Option<u32>,
    line_width: Option<u32>,
    marker_size: Option<u32>,
}

impl ChartStyleOverride {
    fn apply(self, base: ChartStyle) -> ChartStyle {
        ChartStyle {
            title: self.title.unwrap_or(base.title),
            x_title: self.x_title.unwrap_or(base.x_title),
            y_title: self.y_title.unwrap_or(base.y_title),
            color: self.color.unwrap_or(base.color),
            height: self.height.unwrap_or(base.height),
            line_width: self.line_width.unwrap_or(base.line_width),
            marker_size: self.marker_size.unwrap_or(base.marker_size),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartStyleOverrides {
    year: ChartStyleOverride,
    month: ChartStyleOverride,
    timeline: ChartStyleOverride,
    author: ChartStyleOverride,
}

impl From<ChartStyleOverrides> for ChartStyles {
    fn from(overrides: ChartStyleOverrides) -> Self {
        Self {
            year: overrides.year.apply(default_year_style()),
            month: overrides.month.apply(default_month_style()),
            timeline: overrides.timeline.apply(default_timeline_style()),
            author: overrides.author.apply(default_author_style()),
        }
    }
}

fn default_year_style() -> ChartStyle {
    ChartStyle::new("工艺美术大师文献按年份分布", "年份", "文献数量", "#2E86AB", 500)
}

fn default_month_style() -> ChartStyle {
    ChartStyle::new("工艺美术大师文献按月份分布", "月份", "文献数量", "#A23B72", 500)
}

fn default_timeline_style() -> ChartStyle {
    ChartStyle::new("工艺美术大师文献发表时间线", "出版日期", "文献序号", "#F18F01", 500)
}

fn default_author_style() -> ChartStyle {
    ChartStyle::new("工艺美术大师文献作者分布", "文献数量", "作者", "#C73E1D", 400)
}

impl Default for ChartStyles {
    fn default() -> Self {
        Self {
            year: default_year_style(),
            month: default_month_style(),
            timeline: default_timeline_style(),
            author: default_author_style(),
        }
    }
}

/// Output filenames, all relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFiles {
    #[serde(default = "default_year_chart")]
    pub year_chart: String,
    #[serde(default = "default_month_chart")]
    pub month_chart: String,
    #[serde(default = "default_timeline_chart")]
    pub timeline_chart: String,
    #[serde(default = "default_author_chart")]
    pub author_chart: String,
    #[serde(default = "default_report")]
    pub report: String,
}

fn default_year_chart() -> String {
    "工艺美术大师年份分布.html".to_string()
}

fn default_month_chart() -> String {
    "工艺美术大师月份分布.html".to_string()
}

fn default_timeline_chart() -> String {
    "工艺美术大师时间线.html".to_string()
}

fn default_author_chart() -> String {
    "工艺美术大师作者分布.html".to_string()
}

fn default_report() -> String {
    "工艺美术大师分析报告.html".to_string()
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            year_chart: default_year_chart(),
            month_chart: default_month_chart(),
            timeline_chart: default_timeline_chart(),
            author_chart: default_author_chart(),
            report: default_report(),
        }
    }
}

impl OutputFiles {
    fn all(&self) -> [&str; 5] {
        [
            self.year_chart.as_str(),
            self.month_chart.as_str(),
            self.timeline_chart.as_str(),
            self.author_chart.as_str(),
            self.report.as_str(),
        ]
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Report heading.
    #[serde(default = "default_title")]
    pub title: String,
    /// Line under the heading.
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    /// Chart theme.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Minify every written document.
    #[serde(default)]
    pub minify: bool,
    /// Local ECharts build to inline instead of loading it from the CDN.
    #[serde(default)]
    pub inline_script: Option<PathBuf>,
    /// CDN configuration.
    #[serde(default)]
    pub cdn_config: CdnConfig,
    /// Chart styling.
    #[serde(default)]
    pub charts: ChartStyles,
    /// Output filenames.
    #[serde(default)]
    pub files: OutputFiles,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_title() -> String {
    "工艺美术大师文献时间分析报告".to_string()
}

fn default_subtitle() -> String {
    "中国工艺美术大师文献发表时间分布研究".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: default_title(),
            subtitle: default_subtitle(),
            theme: ReportTheme::default(),
            minify: false,
            inline_script: None,
            cdn_config: CdnConfig::default(),
            charts: ChartStyles::default(),
            files: OutputFiles::default(),
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Enable minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Inline a local ECharts build.
    pub fn with_inline_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.inline_script = Some(path.into());
        self
    }

    /// Check chart heights and output filenames.
    pub fn validate(&self) -> Result<()> {
        for (name, style) in [
            ("year", &self.charts.year),
            ("month", &self.charts.month),
            ("timeline", &self.charts.timeline),
            ("author", &self.charts.author),
        ] {
            if style.height == 0 {
                return Err(ReportError::InvalidConfig(format!(
                    "charts.{name}.height must be greater than zero"
                )));
            }
        }

        let files = self.files.all();
        if files.iter().any(|f| f.trim().is_empty()) {
            return Err(ReportError::InvalidConfig(
                "output filenames must not be empty".to_string(),
            ));
        }
        let unique: HashSet<&str> = files.iter().copied().collect();
        if unique.len() != files.len() {
            return Err(ReportError::InvalidConfig(
                "output filenames must be distinct".to_string(),
            ));
        }
        Ok(())
    }
}
