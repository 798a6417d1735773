use anyhow::{anyhow, Context, Result};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::file_utils::FileManager;
use crate::host::{Document, SelectionSource, StyleSink, StyleSource};
use crate::localization::{BatchFailure, BatchPlan, Dictionary, ReplacementPlanner, StyleReapplier};

// @module: Application controller for document localization

/// Counts of a finished translate operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranslateSummary {
    pub replaced: usize,
    pub unchanged: usize,
}

/// Main application controller for document localization
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read and parse the configured dictionary
    pub fn load_dictionary(&self) -> Result<Dictionary> {
        let raw = FileManager::read_to_string(&self.config.dictionary_path)?;
        Dictionary::parse_with_delimiter(&raw, self.config.dictionary_delimiter)
            .with_context(|| format!("Invalid dictionary: {:?}", self.config.dictionary_path))
    }

    /// Build a planner from dictionary and exceptions text
    pub fn planner_from(&self, dictionary_raw: &str, exceptions_raw: &str) -> Result<ReplacementPlanner, TranslationError> {
        let planner = ReplacementPlanner::from_sources(
            dictionary_raw,
            self.config.dictionary_delimiter,
            exceptions_raw,
            &self.config.source_language,
            &self.config.target_language,
        )?;
        Ok(planner.with_max_concurrent_nodes(self.config.max_concurrent_nodes))
    }

    /// Build a planner from the configured files
    pub fn load_planner(&self) -> Result<ReplacementPlanner> {
        let dictionary_raw = FileManager::read_to_string(&self.config.dictionary_path)?;
        let exceptions_raw = FileManager::read_optional(self.config.exceptions_path.as_ref())?;
        let planner = self.planner_from(&dictionary_raw, &exceptions_raw)?;
        debug!(
            "Loaded {} dictionary entr(ies) and {} exception pattern(s)",
            planner.mapping().len(),
            planner.exceptions().len()
        );
        Ok(planner)
    }

    /// Plan the current selection without touching the document
    pub async fn plan<H>(&self, planner: &ReplacementPlanner, host: &H) -> Result<BatchPlan, TranslationError>
    where
        H: StyleSource + SelectionSource + ?Sized,
    {
        let nodes = host.selected_text_nodes();
        planner.plan_batch(host, &nodes).await
    }

    /// Plan the whole selection, then apply it only if every node succeeded
    pub async fn translate<H>(&self, planner: &ReplacementPlanner, host: &H) -> Result<TranslateSummary, TranslationError>
    where
        H: StyleSource + StyleSink + SelectionSource + ?Sized,
    {
        let plan = self.plan(planner, host).await?;
        StyleReapplier::new(host).apply_all(&plan.replacements).await?;
        Ok(TranslateSummary {
            replaced: plan.replacements.len(),
            unchanged: plan.unchanged.len(),
        })
    }

    /// Run the file workflow: read a document, translate it and write the result
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_file: PathBuf,
        dry_run: bool,
        report_path: Option<PathBuf>,
    ) -> Result<()> {
        let start_time = Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let planner = self.load_planner()?;
        let content = FileManager::read_to_string(&input_file)?;
        let document = Document::from_json(&content)
            .with_context(|| format!("Failed to parse document: {:?}", input_file))?;

        info!(
            "Translating {:?} from {} to {}",
            input_file, self.config.source_language, self.config.target_language
        );

        let result = if dry_run {
            self.plan(&planner, &document).await.map(|plan| TranslateSummary {
                replaced: plan.replacements.len(),
                unchanged: plan.unchanged.len(),
            })
        } else {
            self.translate(&planner, &document).await
        };

        let summary = match result {
            Ok(summary) => summary,
            Err(TranslationError::Batch(failure)) => {
                self.report_failure(&failure, report_path.as_deref())?;
                return Err(anyhow!(failure.summary()));
            }
            Err(e) => return Err(e.into()),
        };

        if dry_run {
            info!(
                "Dry run: {} node(s) would be replaced, {} left unchanged",
                summary.replaced, summary.unchanged
            );
        } else {
            let json = document.to_json().context("Failed to serialize document")?;
            FileManager::write_to_file(&output_file, &json)?;
            info!(
                "Replaced {} node(s), {} left unchanged in {:.2}s: {:?}",
                summary.replaced,
                summary.unchanged,
                start_time.elapsed().as_secs_f64(),
                output_file
            );
        }

        Ok(())
    }

    /// Write the detailed failure report to a file, or log it
    pub fn report_failure(&self, failure: &BatchFailure, report_path: Option<&Path>) -> Result<()> {
        let report = failure.report();
        match report_path {
            Some(path) => {
                FileManager::write_to_file(path, &report)?;
                error!("{} (details in {:?})", failure.summary(), path);
            }
            None => {
                error!("{}", failure.summary());
                for line in report.lines().skip(1) {
                    error!("{}", line);
                }
            }
        }
        Ok(())
    }
}
