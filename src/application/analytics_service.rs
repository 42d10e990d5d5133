// Analytics service - Use case for building one dashboard run
use crate::application::bucketizer::bucketize;
use crate::application::fallback_generator::FallbackGenerator;
use crate::application::growth_estimator::GrowthEstimator;
use crate::application::paginator::{collect_pages, with_page_timeout};
use crate::application::platform_repository::PlatformRepository;
use crate::application::series_composer::SeriesComposer;
use crate::domain::analytics::AccountSummary;
use crate::domain::dashboard::{DashboardReport, Platform};
use crate::domain::error::PipelineError;
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AnalyticsService {
    platform: Platform,
    repository: Arc<dyn PlatformRepository>,
    estimator: GrowthEstimator,
    composer: SeriesComposer,
    fallback: FallbackGenerator,
    page_timeout: Option<Duration>,
    seed: Option<u64>,
}

impl AnalyticsService {
    pub fn new(platform: Platform, repository: Arc<dyn PlatformRepository>) -> Self {
        Self {
            platform,
            repository,
            estimator: GrowthEstimator::default(),
            composer: SeriesComposer::for_platform(platform),
            fallback: FallbackGenerator::default(),
            page_timeout: None,
            seed: None,
        }
    }

    pub fn with_estimator(mut self, estimator: GrowthEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackGenerator) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_page_timeout(mut self, page_timeout: Option<Duration>) -> Self {
        self.page_timeout = page_timeout;
        self
    }

    /// Fixed seed for the per-run random source
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Run the pipeline once.
    ///
    /// Source failures never escape: they are logged and replaced by the
    /// fallback dashboard with `degraded` set. The only error is
    /// `Cancelled`, in which case nothing from the run should be applied.
    pub async fn run(
        &self,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<DashboardReport, PipelineError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        match self.run_live(now, cancel, &mut rng).await {
            Ok(report) => {
                tracing::info!(
                    platform = self.platform.as_str(),
                    months = report.growth.labels.len(),
                    "Dashboard run succeeded"
                );
                Ok(report)
            }
            Err(PipelineError::Cancelled) => {
                tracing::info!(platform = self.platform.as_str(), "Dashboard run cancelled");
                Err(PipelineError::Cancelled)
            }
            Err(e) => {
                tracing::warn!(
                    platform = self.platform.as_str(),
                    error = %e,
                    "Dashboard run failed, serving fallback data"
                );
                let demo = self
                    .fallback
                    .generate(&self.composer, now.date_naive(), &mut rng);
                Ok(DashboardReport {
                    platform: self.platform,
                    summary: demo.summary,
                    publications: demo.publications,
                    growth: demo.growth,
                    degraded: true,
                    message: Some(e.to_string()),
                })
            }
        }
    }

    async fn run_live(
        &self,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
        rng: &mut StdRng,
    ) -> Result<DashboardReport, PipelineError> {
        let repository = &self.repository;
        let page_timeout = self.page_timeout;

        // Summary and listing are independent; pages within the listing are not.
        // The first failure drops the other branch so no further pages are requested.
        let joined = tokio::try_join!(
            repository.fetch_account_summary(),
            collect_pages(
                |cursor| with_page_timeout(page_timeout, repository.fetch_content_page(cursor)),
                None,
                cancel,
            )
        );
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        let (summary, items) = joined?;

        let today = now.date_naive();
        if items.is_empty() {
            tracing::debug!("No content items collected, publication buckets will be empty");
        }

        // Platforms without a creation date fall back to the first collected item
        let created_at = summary
            .created_at
            .or_else(|| items.iter().map(|i| i.published_at.date_naive()).min())
            .unwrap_or(today);
        if created_at > today {
            return Err(PipelineError::MalformedPage(format!(
                "account creation date {} is after {}",
                created_at, today
            )));
        }

        let buckets = bucketize(&items, created_at, today);
        let growth_points = self
            .estimator
            .estimate(&summary.snapshot(created_at), today, rng);

        let publications = self.composer.compose_publications(&buckets);
        let growth = self.composer.compose_growth(&growth_points);
        if !publications.is_aligned() || !growth.is_aligned() {
            return Err(PipelineError::MalformedPage(
                "composed series are not aligned with their labels".to_string(),
            ));
        }

        Ok(DashboardReport {
            platform: self.platform,
            summary: AccountSummary {
                created_at: Some(created_at),
                ..summary
            },
            publications,
            growth,
            degraded: false,
            message: None,
        })
    }
}
