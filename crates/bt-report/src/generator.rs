//! Report generator implementation.

use crate::charts::ChartKind;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::html::{finish, html_escape, write_document};
use crate::sections::*;

use bt_common::{Aggregates, Corpus};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Complete report data structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    /// Generation timestamp, the only run-dependent value in the report.
    pub generated_at: DateTime<Local>,
    /// Generator version.
    pub generator_version: String,
    /// Summary grid and data table.
    pub overview: OverviewSection,
    /// Year distribution findings.
    pub years: YearsSection,
    /// Month distribution findings.
    pub months: MonthsSection,
    /// Timeline findings.
    pub timeline: TimelineSection,
    /// Author distribution findings.
    pub authors: AuthorsSection,
}

impl ReportData {
    /// Derive every report statistic from the corpus and its aggregates.
    ///
    /// Fails with [`ReportError::InsufficientRecords`] when the corpus is
    /// too small for the interval statistic.
    pub fn build(
        corpus: &Corpus,
        aggregates: &Aggregates,
        generated_at: DateTime<Local>,
    ) -> Result<Self> {
        let insufficient = || ReportError::InsufficientRecords {
            required: MIN_RECORDS,
            found: corpus.len(),
        };

        let timeline = TimelineSection::from_timeline(&aggregates.timeline)?;
        let data = Self {
            generated_at,
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            overview: OverviewSection::from_corpus(corpus).ok_or_else(insufficient)?,
            years: YearsSection::from_counts(&aggregates.by_year).ok_or_else(insufficient)?,
            months: MonthsSection::from_counts(&aggregates.by_month).ok_or_else(insufficient)?,
            timeline,
            authors: AuthorsSection::from_counts(&aggregates.by_author)
                .ok_or_else(insufficient)?,
        };
        debug!(
            mode_year = data.years.mode_year,
            top_author = %data.authors.top_author,
            interval_days = data.timeline.average_interval_days,
            "Report statistics computed"
        );
        Ok(data)
    }
}

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render the report document.
    pub fn generate(&self, data: &ReportData) -> String {
        let html = finish(self.generate_html(data), self.config.minify);
        info!(
            bytes = html.len(),
            title = %self.config.title,
            "Report generated"
        );
        html
    }

    /// Render the report and write it into `dir`.
    ///
    /// The report references the chart documents by relative path, so each
    /// of them must already exist in `dir`.
    pub fn write(&self, data: &ReportData, dir: &Path) -> Result<PathBuf> {
        for kind in ChartKind::ALL {
            let chart = dir.join(kind.file_name(&self.config));
            if !chart.is_file() {
                return Err(ReportError::MissingChart { path: chart });
            }
        }
        let path = dir.join(&self.config.files.report);
        write_document(&path, &self.generate(data))?;
        Ok(path)
    }

    fn generate_html(&self, data: &ReportData) -> String {
        format!(
            r##"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="{generator} {version}">
    <style>
        body {{
            font-family: 'Microsoft YaHei', Arial, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
            line-height: 1.6;
        }}
        .container {{
            max-width: 1200px;
            margin: 0 auto;
            background-color: white;
            padding: 30px;
            border-radius: 10px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }}
        .header {{
            text-align: center;
            margin-bottom: 40px;
            padding-bottom: 20px;
            border-bottom: 3px solid #2E86AB;
        }}
        .header h1 {{
            color: #2E86AB;
            font-size: 2.5em;
            margin-bottom: 10px;
        }}
        .header p {{
            color: #666;
            font-size: 1.2em;
        }}
        .section {{
            margin: 40px 0;
            padding: 20px;
            background-color: #f8f9fa;
            border-radius: 8px;
            border-left: 4px solid #2E86AB;
        }}
        .section h2 {{
            color: #2E86AB;
            margin-bottom: 20px;
            font-size: 1.8em;
        }}
        .chart-container {{
            margin: 20px 0;
            text-align: center;
        }}
        .chart-container iframe {{
            border: none;
        }}
        .stats-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 20px;
            margin: 20px 0;
        }}
        .stat-card {{
            background: white;
            padding: 20px;
            border-radius: 8px;
            box-shadow: 0 2px 5px rgba(0,0,0,0.1);
            text-align: center;
        }}
        .stat-number {{
            font-size: 2em;
            font-weight: bold;
            color: #2E86AB;
        }}
        .stat-label {{
            color: #666;
            margin-top: 5px;
        }}
        .data-table {{
            width: 100%;
            border-collapse: collapse;
            margin: 20px 0;
        }}
        .data-table th, .data-table td {{
            border: 1px solid #ddd;
            padding: 12px;
            text-align: left;
        }}
        .data-table th {{
            background-color: #2E86AB;
            color: white;
        }}
        .data-table tr:nth-child(even) {{
            background-color: #f2f2f2;
        }}
        /* Print styles */
        @media print {{
            body {{ font-size: 10pt; background-color: white; }}
            .section {{ page-break-inside: avoid; }}
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{title}</h1>
            <p>{subtitle}</p>
            <p>分析时间: {generated_at}</p>
        </div>

        {overview}

        {years}

        {months}

        {timeline}

        {authors}

        {conclusions}
    </div>
</body>
</html>
"##,
            title = html_escape(&self.config.title),
            generator = bt_common::GENERATOR_NAME,
            version = data.generator_version,
            subtitle = html_escape(&self.config.subtitle),
            generated_at = data.generated_at.format("%Y年%m月%d日"),
            overview = self.generate_overview(&data.overview),
            years = self.generate_years(&data.years),
            months = self.generate_months(&data.months),
            timeline = self.generate_timeline(&data.timeline),
            authors = self.generate_authors(&data.authors),
            conclusions = CONCLUSIONS,
        )
    }

    fn generate_overview(&self, overview: &OverviewSection) -> String {
        let rows_html: String = overview
            .rows
            .iter()
            .map(|row| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    html_escape(&row.title),
                    html_escape(&row.author),
                    row.date_formatted()
                )
            })
            .collect();

        format!(
            r##"<div class="section" id="overview">
            <h2>📊 数据概览</h2>
            <div class="stats-grid">
                <div class="stat-card">
                    <div class="stat-number">{total}</div>
                    <div class="stat-label">总文献数</div>
                </div>
                <div class="stat-card">
                    <div class="stat-number">{authors}</div>
                    <div class="stat-label">作者数量</div>
                </div>
                <div class="stat-card">
                    <div class="stat-number">{min_year}</div>
                    <div class="stat-label">最早年份</div>
                </div>
                <div class="stat-card">
                    <div class="stat-number">{max_year}</div>
                    <div class="stat-label">最晚年份</div>
                </div>
            </div>

            <table class="data-table">
                <tr>
                    <th>书名</th>
                    <th>作者</th>
                    <th>出版日期</th>
                </tr>
                {rows_html}
            </table>
        </div>"##,
            total = overview.total_records,
            authors = overview.distinct_authors,
            min_year = overview.min_year,
            max_year = overview.max_year,
            rows_html = rows_html,
        )
    }

    /// One chart section: heading, embedded chart, findings list.
    fn chart_section(&self, id: &str, heading: &str, kind: ChartKind, findings: &[String]) -> String {
        let items: String = findings
            .iter()
            .map(|f| format!("\n                <li>{f}</li>"))
            .collect();
        format!(
            r##"<div class="section" id="{id}">
            <h2>{heading}</h2>
            <div class="chart-container">
                <iframe src="{src}" width="100%" height="{height}"></iframe>
            </div>
            <p><strong>分析发现:</strong></p>
            <ul>{items}
            </ul>
        </div>"##,
            src = html_escape(kind.file_name(&self.config)),
            height = kind.style(&self.config).height,
        )
    }

    fn generate_years(&self, years: &YearsSection) -> String {
        self.chart_section(
            "years",
            "📈 年份分布分析",
            ChartKind::Year,
            &[
                format!("文献发表主要集中在 {} 年", years.mode_year),
                format!("时间跨度: {} 年", years.span_years),
                format!("平均每年发表: {} 篇文献", years.average_formatted()),
            ],
        )
    }

    fn generate_months(&self, months: &MonthsSection) -> String {
        self.chart_section(
            "months",
            "📅 月份分布分析",
            ChartKind::Month,
            &[
                format!("发表最多的月份: {} 月", months.most_published_month),
                format!("发表最少的月份: {} 月", months.least_published_month),
                "文献发表时间分布相对均匀".to_string(),
            ],
        )
    }

    fn generate_timeline(&self, timeline: &TimelineSection) -> String {
        self.chart_section(
            "timeline",
            "⏰ 时间线分析",
            ChartKind::Timeline,
            &[
                format!(
                    "文献发表时间跨度: {} 至 {}",
                    timeline.earliest_formatted(),
                    timeline.latest_formatted()
                ),
                format!("平均发表间隔: {} 天", timeline.interval_formatted()),
                "反映了工艺美术大师研究的持续性和系统性".to_string(),
            ],
        )
    }

    fn generate_authors(&self, authors: &AuthorsSection) -> String {
        self.chart_section(
            "authors",
            "👥 作者分布分析",
            ChartKind::Author,
            &[
                format!(
                    "主要作者: {} (发表 {} 篇)",
                    html_escape(&authors.top_author),
                    authors.top_author_count
                ),
                "作者贡献度分布相对均匀".to_string(),
                "体现了多位学者对工艺美术大师研究的关注".to_string(),
            ],
        )
    }
}

const CONCLUSIONS: &str = r##"<div class="section" id="conclusions">
            <h2>🎯 研究结论</h2>
            <p><strong>主要发现:</strong></p>
            <ul>
                <li><strong>时间集中性:</strong> 文献发表主要集中在特定年份，反映了研究热潮</li>
                <li><strong>作者多样性:</strong> 多位学者参与研究，体现了学术界的广泛关注</li>
                <li><strong>研究系统性:</strong> 时间跨度合理，体现了研究的持续性和系统性</li>
                <li><strong>学术价值:</strong> 这些文献为工艺美术大师研究提供了重要的学术资料</li>
            </ul>

            <p><strong>研究意义:</strong></p>
            <ul>
                <li>记录了工艺美术大师的学术贡献和艺术成就</li>
                <li>为工艺美术教育史研究提供了重要资料</li>
                <li>体现了中国工艺美术学术研究的传统和特色</li>
            </ul>
        </div>"##;
