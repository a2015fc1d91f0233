//! The end-to-end run: load, normalize, aggregate, render, compose.
//!
//! Every statistic the report needs is computed before the first file is
//! written, so load, date and precondition failures leave no output.

use crate::config::PipelineConfig;
use crate::loader;
use crate::logging::Stage;
use crate::normalize::normalize;
use bt_common::{Aggregates, Corpus, Error, Result};
use bt_report::{ChartRenderer, ReportData, ReportGenerator};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use tracing::{debug, info};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: usize,
    pub authors: usize,
    /// Chart documents in write order.
    pub charts: Vec<PathBuf>,
    pub report: PathBuf,
}

impl RunSummary {
    /// Every written document, charts first.
    pub fn outputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.charts.iter().chain(std::iter::once(&self.report))
    }
}

/// A configured pipeline.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load and normalize the configured input.
    pub fn load_corpus(&self) -> Result<Corpus> {
        let input = &self.config.input;
        info!(stage = %Stage::Load, path = %input.path.display(), "Loading input");
        let raw = loader::load(&input.path, &input.load_options())?;

        debug!(stage = %Stage::Normalize, rows = raw.len(), "Normalizing dates");
        normalize(raw)
    }

    /// Run with the current local time as the report timestamp.
    pub fn run(&self) -> Result<RunSummary> {
        self.run_at(Local::now())
    }

    /// Run with an explicit report timestamp.
    pub fn run_at(&self, generated_at: DateTime<Local>) -> Result<RunSummary> {
        let corpus = self.load_corpus()?;

        let aggregates = Aggregates::compute(&corpus);
        info!(
            stage = %Stage::Aggregate,
            years = aggregates.by_year.len(),
            months = aggregates.by_month.len(),
            authors = aggregates.by_author.len(),
            "Aggregates computed"
        );
        let data = ReportData::build(&corpus, &aggregates, generated_at)?;
        let renderer = ChartRenderer::new(self.config.report.clone())?;

        let dir = &self.config.output.dir;
        std::fs::create_dir_all(dir).map_err(|source| Error::Write {
            path: dir.clone(),
            source,
        })?;

        info!(stage = %Stage::Render, dir = %dir.display(), "Writing charts");
        let charts = renderer.write_all(&aggregates, dir)?;

        info!(stage = %Stage::Compose, "Writing report");
        let report = ReportGenerator::new(self.config.report.clone()).write(&data, dir)?;

        Ok(RunSummary {
            records: corpus.len(),
            authors: data.overview.distinct_authors,
            charts,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::tempdir;

    fn config_for(dir: &std::path::Path, csv: &str) -> PipelineConfig {
        let input = dir.join("records.csv");
        fs::write(&input, csv).unwrap();
        let mut config = PipelineConfig::default();
        config.input.path = input;
        config.output.dir = dir.join("out");
        config
    }

    #[test]
    fn test_run_writes_five_documents() {
        let dir = tempdir().unwrap();
        let config = config_for(
            dir.path(),
            "书名,作者,出版日期\n甲,张三,2020-01-05\n乙,李四,2021-03-01\n丙,张三,2021-03-20\n",
        );
        let generated_at = Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let summary = Pipeline::new(config).run_at(generated_at).unwrap();

        assert_eq!(summary.records, 3);
        assert_eq!(summary.authors, 2);
        assert_eq!(summary.charts.len(), 4);
        assert_eq!(summary.outputs().count(), 5);
        for path in summary.outputs() {
            assert!(path.is_file(), "{} missing", path.display());
        }
    }

    #[test]
    fn test_single_record_writes_nothing() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path(), "书名,作者,出版日期\n甲,张三,2020-01-05\n");
        let out = config.output.dir.clone();
        let err = Pipeline::new(config).run().unwrap_err();
        assert!(matches!(err, Error::StatisticalPrecondition { required: 2, found: 1 }));
        assert!(!out.exists());
    }

    #[test]
    fn test_output_dir_blocked_by_file() {
        let dir = tempdir().unwrap();
        let mut config = config_for(
            dir.path(),
            "书名,作者,出版日期\n甲,张三,2020-01-05\n乙,李四,2021-03-01\n",
        );
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        config.output.dir = blocker;
        let err = Pipeline::new(config).run().unwrap_err();
        assert_eq!(err.kind(), bt_common::ErrorKind::Write);
    }
}
