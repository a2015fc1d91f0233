//! Standalone interactive chart documents.
//!
//! Each chart is a single HTML file holding one ECharts instance. The
//! option object is built with `serde_json` and embedded verbatim, so a
//! document depends only on its aggregate and the configured styling.
//! No timestamps are written, which keeps reruns byte-identical.

use crate::config::{ChartStyle, ReportConfig};
use crate::error::{ReportError, Result};
use crate::html::{finish, html_escape, script_json, write_document};

use bt_common::{Aggregates, AuthorCount, MonthCount, Timeline, YearCount};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The four charts, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Year,
    Month,
    Timeline,
    Author,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Year,
        ChartKind::Month,
        ChartKind::Timeline,
        ChartKind::Author,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Year => "year",
            ChartKind::Month => "month",
            ChartKind::Timeline => "timeline",
            ChartKind::Author => "author",
        }
    }

    /// Styling for this chart.
    pub fn style<'a>(&self, config: &'a ReportConfig) -> &'a ChartStyle {
        match self {
            ChartKind::Year => &config.charts.year,
            ChartKind::Month => &config.charts.month,
            ChartKind::Timeline => &config.charts.timeline,
            ChartKind::Author => &config.charts.author,
        }
    }

    /// Output filename for this chart.
    pub fn file_name<'a>(&self, config: &'a ReportConfig) -> &'a str {
        match self {
            ChartKind::Year => &config.files.year_chart,
            ChartKind::Month => &config.files.month_chart,
            ChartKind::Timeline => &config.files.timeline_chart,
            ChartKind::Author => &config.files.author_chart,
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the chart library comes from.
#[derive(Debug, Clone)]
enum ScriptSource {
    Cdn { url: String, sri: Option<String> },
    Inline(String),
}

impl ScriptSource {
    fn tag(&self) -> String {
        match self {
            ScriptSource::Cdn { url, sri: Some(sri) } => format!(
                r#"<script src="{}" integrity="{}" crossorigin="anonymous"></script>"#,
                html_escape(url),
                html_escape(sri)
            ),
            ScriptSource::Cdn { url, sri: None } => {
                format!(r#"<script src="{}"></script>"#, html_escape(url))
            }
            ScriptSource::Inline(code) => {
                format!("<script>{}</script>", code.replace("</script", "<\\/script"))
            }
        }
    }
}

/// Renders and writes the chart documents.
pub struct ChartRenderer {
    config: ReportConfig,
    script: ScriptSource,
}

impl ChartRenderer {
    /// Create a renderer, reading the inline script if one is configured.
    pub fn new(config: ReportConfig) -> Result<Self> {
        let script = match &config.inline_script {
            Some(path) => {
                let code = std::fs::read_to_string(path).map_err(|source| {
                    ReportError::AssetReadError {
                        path: path.clone(),
                        source,
                    }
                })?;
                debug!(path = %path.display(), bytes = code.len(), "Inlining chart library");
                ScriptSource::Inline(code)
            }
            None => ScriptSource::Cdn {
                url: config.cdn_config.echarts_url(),
                sri: config.cdn_config.echarts.sri.clone(),
            },
        };
        Ok(Self { config, script })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render one chart document.
    pub fn render(&self, kind: ChartKind, aggregates: &Aggregates) -> Result<String> {
        let style = kind.style(&self.config);
        let option = match kind {
            ChartKind::Year => year_option(&aggregates.by_year, style),
            ChartKind::Month => month_option(&aggregates.by_month, style),
            ChartKind::Timeline => timeline_option(&aggregates.timeline, style),
            ChartKind::Author => author_option(&aggregates.by_author, style),
        };
        self.document(style, &option)
    }

    /// Render and write all four charts into `dir`, returning the paths.
    pub fn write_all(&self, aggregates: &Aggregates, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(ChartKind::ALL.len());
        for kind in ChartKind::ALL {
            let html = self.render(kind, aggregates)?;
            let path = dir.join(kind.file_name(&self.config));
            write_document(&path, &html)?;
            written.push(path);
        }
        info!(charts = written.len(), dir = %dir.display(), "Charts written");
        Ok(written)
    }

    fn document(&self, style: &ChartStyle, option: &Value) -> Result<String> {
        let html = format!(
            r##"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="{generator} {version}">
    {script_tag}
    <style>
        html, body {{
            margin: 0;
            padding: 0;
            background-color: {background};
        }}
        #chart {{
            width: 100%;
            height: {height}px;
        }}
    </style>
</head>
<body>
    <div id="chart"></div>
    <script>
        const chart = echarts.init(document.getElementById('chart'), {theme});
        chart.setOption({option});
        window.addEventListener('resize', () => chart.resize());
    </script>
</body>
</html>
"##,
            title = html_escape(&style.title),
            generator = bt_common::GENERATOR_NAME,
            version = env!("CARGO_PKG_VERSION"),
            script_tag = self.script.tag(),
            background = match self.config.theme {
                crate::config::ReportTheme::Light => "#ffffff",
                crate::config::ReportTheme::Dark => "#100c2a",
            },
            height = style.height,
            theme = self.config.theme.echarts_theme(),
            option = script_json(option)?,
        );
        Ok(finish(html, self.config.minify))
    }
}

fn base_option(style: &ChartStyle) -> Value {
    json!({
        "title": { "text": style.title, "left": "center" },
        "tooltip": { "trigger": "axis" },
        "grid": { "left": 60, "right": 40, "top": 60, "bottom": 60, "containLabel": true },
        "backgroundColor": "transparent",
    })
}

fn with_axes(mut option: Value, x_axis: Value, y_axis: Value, series: Value) -> Value {
    option["xAxis"] = x_axis;
    option["yAxis"] = y_axis;
    option["series"] = json!([series]);
    option
}

fn axis_name(name: &str) -> Value {
    json!({ "name": name, "nameLocation": "middle", "nameGap": 36 })
}

fn category_axis(name: &str, data: Vec<String>) -> Value {
    let mut axis = axis_name(name);
    axis["type"] = json!("category");
    axis["data"] = json!(data);
    axis
}

fn value_axis(name: &str) -> Value {
    let mut axis = axis_name(name);
    axis["type"] = json!("value");
    axis["minInterval"] = json!(1);
    axis
}

fn bar_series(style: &ChartStyle, data: Vec<usize>, label_position: &str) -> Value {
    json!({
        "type": "bar",
        "data": data,
        "itemStyle": { "color": style.color },
        "label": { "show": true, "position": label_position },
    })
}

/// Vertical bars, one per observed year.
fn year_option(counts: &YearCount, style: &ChartStyle) -> Value {
    let years = counts.keys().map(|y| y.to_string()).collect();
    with_axes(
        base_option(style),
        category_axis(&style.x_title, years),
        value_axis(&style.y_title),
        bar_series(style, counts.counts().collect(), "top"),
    )
}

/// Vertical bars for observed months only, shown in calendar order.
fn month_option(counts: &MonthCount, style: &ChartStyle) -> Value {
    let mut entries: Vec<(u32, usize)> = counts.entries().to_vec();
    entries.sort_by_key(|(month, _)| *month);
    with_axes(
        base_option(style),
        category_axis(
            &style.x_title,
            entries.iter().map(|(m, _)| m.to_string()).collect(),
        ),
        value_axis(&style.y_title),
        bar_series(style, entries.iter().map(|(_, c)| *c).collect(), "top"),
    )
}

/// Line with markers over a continuous time axis.
fn timeline_option(timeline: &Timeline, style: &ChartStyle) -> Value {
    let points: Vec<Value> = timeline
        .entries()
        .iter()
        .map(|e| {
            json!([
                e.record.publication_date.format("%Y-%m-%d").to_string(),
                e.sequence
            ])
        })
        .collect();

    let mut x_axis = axis_name(&style.x_title);
    x_axis["type"] = json!("time");
    with_axes(
        base_option(style),
        x_axis,
        value_axis(&style.y_title),
        json!({
            "type": "line",
            "name": "文献发表时间线",
            "data": points,
            "showSymbol": true,
            "symbol": "circle",
            "symbolSize": style.marker_size,
            "lineStyle": { "color": style.color, "width": style.line_width },
            "itemStyle": { "color": style.color },
        }),
    )
}

/// Horizontal bars, most prolific author at the top.
fn author_option(counts: &AuthorCount, style: &ChartStyle) -> Value {
    let mut y_axis = category_axis(&style.y_title, counts.keys().cloned().collect());
    y_axis["inverse"] = json!(true);
    y_axis["nameGap"] = json!(80);
    let mut option = with_axes(
        base_option(style),
        value_axis(&style.x_title),
        y_axis,
        bar_series(style, counts.counts().collect(), "right"),
    );
    option["tooltip"] = json!({ "trigger": "axis", "axisPointer": { "type": "shadow" } });
    option
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_common::{Corpus, Record};
    use chrono::NaiveDate;

    fn aggregates() -> Aggregates {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Aggregates::compute(&Corpus::new(vec![
            Record::new(2, "紫砂壶艺", "顾景舟", date(2019, 3, 1)),
            Record::new(3, "苏绣针法", "沈寿", date(2020, 1, 15)),
            Record::new(4, "景泰蓝", "顾景舟", date(2020, 3, 20)),
        ]))
    }

    fn renderer() -> ChartRenderer {
        ChartRenderer::new(ReportConfig::default()).unwrap()
    }

    #[test]
    fn test_year_chart_has_bars_and_labels() {
        let option = year_option(&aggregates().by_year, &ReportConfig::default().charts.year);
        assert_eq!(option["xAxis"]["data"], json!(["2019", "2020"]));
        assert_eq!(option["series"][0]["data"], json!([1, 2]));
        assert_eq!(option["series"][0]["type"], "bar");
        assert_eq!(option["series"][0]["label"]["show"], true);
        assert_eq!(option["series"][0]["itemStyle"]["color"], "#2E86AB");
    }

    #[test]
    fn test_month_chart_only_observed_months_in_calendar_order() {
        let option = month_option(
            &aggregates().by_month,
            &ReportConfig::default().charts.month,
        );
        assert_eq!(option["xAxis"]["data"], json!(["1", "3"]));
        assert_eq!(option["series"][0]["data"], json!([1, 2]));
    }

    #[test]
    fn test_timeline_points_are_date_and_sequence() {
        let option = timeline_option(
            &aggregates().timeline,
            &ReportConfig::default().charts.timeline,
        );
        assert_eq!(option["xAxis"]["type"], "time");
        assert_eq!(
            option["series"][0]["data"],
            json!([["2019-03-01", 1], ["2020-01-15", 2], ["2020-03-20", 3]])
        );
        assert_eq!(option["series"][0]["lineStyle"]["width"], 3);
        assert_eq!(option["series"][0]["symbolSize"], 8);
    }

    #[test]
    fn test_author_chart_is_horizontal() {
        let option = author_option(
            &aggregates().by_author,
            &ReportConfig::default().charts.author,
        );
        assert_eq!(option["yAxis"]["type"], "category");
        assert_eq!(option["yAxis"]["data"], json!(["顾景舟", "沈寿"]));
        assert_eq!(option["xAxis"]["type"], "value");
        assert_eq!(option["series"][0]["data"], json!([2, 1]));
    }

    #[test]
    fn test_document_uses_cdn_script_and_height() {
        let html = renderer().render(ChartKind::Author, &aggregates()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("echarts@5.5.0/dist/echarts.min.js"));
        assert!(html.contains("height: 400px;"));
        assert!(html.contains("<title>工艺美术大师文献作者分布</title>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = renderer();
        let aggregates = aggregates();
        for kind in ChartKind::ALL {
            assert_eq!(
                renderer.render(kind, &aggregates).unwrap(),
                renderer.render(kind, &aggregates).unwrap()
            );
        }
    }

    #[test]
    fn test_inline_script_replaces_cdn() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("echarts.min.js");
        std::fs::write(&script, "window.echarts = {};").unwrap();

        let renderer =
            ChartRenderer::new(ReportConfig::default().with_inline_script(&script)).unwrap();
        let html = renderer.render(ChartKind::Year, &aggregates()).unwrap();
        assert!(html.contains("<script>window.echarts = {};</script>"));
        assert!(!html.contains("cdn.jsdelivr.net"));
    }

    #[test]
    fn test_missing_inline_script_is_error() {
        let result =
            ChartRenderer::new(ReportConfig::default().with_inline_script("/nonexistent/e.js"));
        assert!(matches!(result, Err(ReportError::AssetReadError { .. })));
    }

    #[test]
    fn test_write_all_creates_four_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = renderer().write_all(&aggregates(), dir.path()).unwrap();
        assert_eq!(paths.len(), 4);
        for path in &paths {
            assert!(path.exists(), "missing {}", path.display());
        }
    }
}
