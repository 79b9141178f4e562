//! Report builders: fetch, decode, aggregate, render.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use utplsq_core::{decode, OutcomeSource, RunAggregator};

use crate::summary::RunSummaryArtifact;
use crate::surefire::{self, ReportArtifact};

/// Rendered result of one package run.
#[derive(Debug, Clone)]
pub struct PackageReport {
    /// Final aggregator state for the run.
    pub aggregator: RunAggregator,

    /// Rendered XML report plus digest.
    pub artifact: ReportArtifact,

    /// Machine-readable summary.
    pub summary: RunSummaryArtifact,
}

/// Result of a suite run: one report per package plus merged totals.
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub suite_name: String,
    pub packages: Vec<PackageReport>,
    pub totals: RunAggregator,
    pub summary: RunSummaryArtifact,
}

/// Builds Surefire reports from an injectable outcome source.
pub struct ReportBuilder {
    source: Arc<dyn OutcomeSource>,
}

impl ReportBuilder {
    pub fn new(source: Arc<dyn OutcomeSource>) -> Self {
        Self { source }
    }

    /// Build the report for a single package run.
    ///
    /// Every fetched row is decoded and folded into the aggregator in
    /// encounter order. A structural decode failure aborts the whole
    /// build: it signals the framework's output contract changed and the
    /// remaining rows cannot be trusted.
    pub async fn build_package(
        &self,
        run_key: i64,
        package_name: &str,
        duration_ms: u64,
    ) -> anyhow::Result<PackageReport> {
        info!(run_key, package = %package_name, "building surefire report");

        let rows = self
            .source
            .fetch_outcomes(run_key)
            .await
            .with_context(|| format!("failed to fetch outcomes for run {run_key}"))?;

        let mut aggregator = RunAggregator::new();
        for row in &rows {
            let record = decode(&row.description)
                .with_context(|| format!("run {run_key} contains an undecodable outcome line"))?;
            aggregator.record(&row.status, &record);
            let fragment = surefire::render_test_case(&row.status, &record);
            aggregator.push_body(&fragment);
        }

        let xml = surefire::render_suite(&aggregator, package_name, duration_ms);
        let artifact = ReportArtifact::new(package_name, xml);
        let summary =
            RunSummaryArtifact::new(package_name, &aggregator, Some(artifact.digest.clone()));

        info!(
            run_key,
            package = %package_name,
            tests_run = aggregator.tests_run(),
            failures = aggregator.failures(),
            "surefire report rendered"
        );

        Ok(PackageReport {
            aggregator,
            artifact,
            summary,
        })
    }

    /// Build reports for every package of a suite run and merge the totals.
    ///
    /// The result store assigns each package of a suite its own run key,
    /// counting down from the suite's key: package `i` of `n` ran under
    /// `suite_run_key - i`. Packages are built sequentially so the merged
    /// failure summaries keep the package order.
    pub async fn build_suite(
        &self,
        suite_name: &str,
        suite_run_key: i64,
        package_count: u32,
        duration_ms: u64,
    ) -> anyhow::Result<SuiteReport> {
        info!(
            suite = %suite_name,
            suite_run_key,
            package_count,
            "building suite report"
        );

        let mut packages = Vec::with_capacity(package_count as usize);
        let mut totals = RunAggregator::new();
        for i in 1..=i64::from(package_count) {
            let package_run_key = suite_run_key - i;
            let package_name = format!("{suite_name}-{package_run_key}");
            let report = self
                .build_package(package_run_key, &package_name, duration_ms)
                .await?;
            totals.merge(report.aggregator.clone());
            packages.push(report);
        }

        let summary = RunSummaryArtifact::new(suite_name, &totals, None);

        info!(
            suite = %suite_name,
            tests_run = totals.tests_run(),
            failures = totals.failures(),
            "suite report complete"
        );

        Ok(SuiteReport {
            suite_name: suite_name.to_string(),
            packages,
            totals,
            summary,
        })
    }
}
