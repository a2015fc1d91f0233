//! HTML report invariant tests.
//!
//! These tests validate the generated documents without requiring a browser:
//! - Every iframe in the report points at a chart document written alongside it
//! - Summary grid values match the corpus
//! - CDN mode: the chart library URL is pinned to a version
//! - inline mode: no external http/https URLs
//! - Reruns: charts byte-identical, report differs only in its generation date

use bt_common::{Aggregates, Corpus, Record};
use bt_report::{ChartKind, ChartRenderer, ReportConfig, ReportData, ReportGenerator};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use regex::Regex;
use std::path::Path;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Twelve records across five years, shaped like the real corpus.
fn test_corpus() -> Corpus {
    Corpus::new(vec![
        Record::new(2, "中国工艺美术大师王树文", "李洋", date(2019, 4, 12)),
        Record::new(3, "黄杨木雕的传承", "陈丽", date(2020, 6, 2)),
        Record::new(4, "紫砂艺术研究", "李洋", date(2020, 6, 28)),
        Record::new(5, "苏绣大师访谈", "王敏", date(2021, 1, 5)),
        Record::new(6, "景泰蓝工艺", "赵刚", date(2021, 6, 15)),
        Record::new(7, "玉雕名家", "李洋", date(2021, 9, 9)),
        Record::new(8, "陶瓷艺术", "陈丽", date(2022, 3, 3)),
        Record::new(9, "漆器技艺", "孙悦", date(2022, 6, 30)),
        Record::new(10, "剪纸艺术", "王敏", date(2022, 11, 11)),
        Record::new(11, "泥塑传承", "李洋", date(2023, 2, 20)),
        Record::new(12, "刺绣工艺", "周红", date(2023, 6, 6)),
        Record::new(13, "木雕艺术", "陈丽", date(2023, 12, 1)),
    ])
}

fn at(day: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, day, 9, 30, 0).unwrap()
}

/// Write charts and report into `dir` using `config`.
fn write_everything(config: &ReportConfig, dir: &Path, generated_at: DateTime<Local>) {
    let corpus = test_corpus();
    let aggregates = Aggregates::compute(&corpus);
    let data = ReportData::build(&corpus, &aggregates, generated_at).unwrap();
    ChartRenderer::new(config.clone())
        .unwrap()
        .write_all(&aggregates, dir)
        .unwrap();
    ReportGenerator::new(config.clone())
        .write(&data, dir)
        .unwrap();
}

fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).unwrap()
}

// ============================================================================
// Report Structure Tests
// ============================================================================

#[test]
fn report_iframes_reference_written_charts() {
    let dir = tempdir().unwrap();
    let config = ReportConfig::default();
    write_everything(&config, dir.path(), at(1));

    let report = read(dir.path(), &config.files.report);
    let iframe = Regex::new(r#"<iframe src="([^"]+)" width="100%" height="(\d+)">"#).unwrap();
    let found: Vec<(String, u32)> = iframe
        .captures_iter(&report)
        .map(|c| (c[1].to_string(), c[2].parse().unwrap()))
        .collect();

    let expected: Vec<(String, u32)> = ChartKind::ALL
        .iter()
        .map(|k| {
            (
                k.file_name(&config).to_string(),
                k.style(&config).height,
            )
        })
        .collect();
    assert_eq!(found, expected);

    for (src, _) in &found {
        assert!(dir.path().join(src).is_file(), "iframe target {src} missing");
    }
}

#[test]
fn report_summary_grid_matches_corpus() {
    let dir = tempdir().unwrap();
    let config = ReportConfig::default();
    write_everything(&config, dir.path(), at(1));
    let report = read(dir.path(), &config.files.report);

    let stat = Regex::new(r#"<div class="stat-number">([^<]+)</div>"#).unwrap();
    let values: Vec<&str> = stat
        .captures_iter(&report)
        .map(|c| c.get(1).unwrap().as_str())
        .collect();
    assert_eq!(values, vec!["12", "6", "2019", "2023"]);
}

#[test]
fn report_table_lists_every_record_in_order() {
    let dir = tempdir().unwrap();
    let config = ReportConfig::default();
    write_everything(&config, dir.path(), at(1));
    let report = read(dir.path(), &config.files.report);

    let row = Regex::new(r"<tr><td>([^<]*)</td><td>([^<]*)</td><td>(\d{4}-\d{2}-\d{2})</td></tr>")
        .unwrap();
    let rows: Vec<(String, String)> = row
        .captures_iter(&report)
        .map(|c| (c[1].to_string(), c[3].to_string()))
        .collect();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0], ("中国工艺美术大师王树文".to_string(), "2019-04-12".to_string()));
    assert_eq!(rows[11], ("木雕艺术".to_string(), "2023-12-01".to_string()));
}

#[test]
fn report_narrative_statistics() {
    let dir = tempdir().unwrap();
    let config = ReportConfig::default();
    write_everything(&config, dir.path(), at(1));
    let report = read(dir.path(), &config.files.report);

    // 2021, 2022, 2023 each have 3 records; the earliest tied year wins.
    assert!(report.contains("文献发表主要集中在 2021 年"));
    assert!(report.contains("时间跨度: 4 年"));
    assert!(report.contains("平均每年发表: 2.4 篇文献"));
    // June has 5 records.
    assert!(report.contains("发表最多的月份: 6 月"));
    assert!(report.contains("文献发表时间跨度: 2019年04月 至 2023年12月"));
    // 2019-04-12 to 2023-12-01 is 1694 days over 11 gaps.
    assert!(report.contains("平均发表间隔: 154 天"));
    assert!(report.contains("主要作者: 李洋 (发表 4 篇)"));
}

// ============================================================================
// Asset Mode Tests
// ============================================================================

#[test]
fn cdn_mode_pins_chart_library_version() {
    let dir = tempdir().unwrap();
    let config = ReportConfig::default();
    write_everything(&config, dir.path(), at(1));

    let url = Regex::new(r#"<script src="(https://[^"]+)""#).unwrap();
    for kind in ChartKind::ALL {
        let chart = read(dir.path(), kind.file_name(&config));
        let urls: Vec<&str> = url
            .captures_iter(&chart)
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        assert_eq!(urls.len(), 1, "{kind} chart should load exactly one script");
        assert!(urls[0].contains("echarts@5.5.0/"), "unpinned URL {}", urls[0]);
    }
}

#[test]
fn inline_mode_has_no_external_urls() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("echarts.min.js");
    std::fs::write(&script, "var echarts = { init: function () { return {}; } };").unwrap();
    let config = ReportConfig::default().with_inline_script(&script);
    write_everything(&config, dir.path(), at(1));

    let external = Regex::new(r#"(src|href)="https?://"#).unwrap();
    for kind in ChartKind::ALL {
        let chart = read(dir.path(), kind.file_name(&config));
        assert!(!external.is_match(&chart), "{kind} chart references the network");
    }
    assert!(!external.is_match(&read(dir.path(), &config.files.report)));
}

// ============================================================================
// Determinism Tests
// ============================================================================

#[test]
fn rerun_is_identical_except_generation_date() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let config = ReportConfig::default();
    write_everything(&config, first.path(), at(1));
    write_everything(&config, second.path(), at(2));

    for kind in ChartKind::ALL {
        let name = kind.file_name(&config);
        assert_eq!(
            std::fs::read(first.path().join(name)).unwrap(),
            std::fs::read(second.path().join(name)).unwrap(),
            "{kind} chart differs between runs"
        );
    }

    let stamp = Regex::new(r"分析时间: \d{4}年\d{2}月\d{2}日").unwrap();
    let a = read(first.path(), &config.files.report);
    let b = read(second.path(), &config.files.report);
    assert_ne!(a, b);
    assert_eq!(stamp.replace(&a, ""), stamp.replace(&b, ""));
}

#[test]
fn minified_report_keeps_content() {
    let plain = tempdir().unwrap();
    let minified = tempdir().unwrap();
    let config = ReportConfig::default();
    write_everything(&config, plain.path(), at(1));
    write_everything(&config.clone().with_minify(true), minified.path(), at(1));

    let full = read(plain.path(), &config.files.report);
    let small = read(minified.path(), &config.files.report);
    assert!(small.len() < full.len());
    assert!(small.contains("主要作者: 李洋 (发表 4 篇)"));
}
