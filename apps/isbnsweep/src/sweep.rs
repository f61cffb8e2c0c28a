//! The batch corrector: fetch, classify, guarded-write, report

use isbnsweep_core::{
    classify, render_report, Classification, Correction, ErrorEntry, IsbnKind, IsbnRecord,
};
use wikidata_client::{
    ClientError, GuardedWrite, HttpClient, WdqsClient, WikibaseClient,
};

use crate::config::{ConfigError, SweepConfig};

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// The report page is written only when the rendered text differs from
/// the current content; a missing page always needs a write.
fn needs_publish(current: Option<&str>, report: &str) -> bool {
    current != Some(report)
}

pub struct BatchCorrector {
    config: SweepConfig,
    wdqs: WdqsClient,
    wikibase: WikibaseClient,
}

impl BatchCorrector {
    pub fn new(config: SweepConfig) -> Self {
        let mut http = HttpClient::new(&config.user_agent);
        if let Some(token) = &config.oauth_token {
            http = http.with_token(token.clone());
        }

        let wdqs = WdqsClient::new(http.clone(), config.query_endpoint.clone());
        let wikibase = WikibaseClient::new(http, config.api_endpoint.clone());

        Self {
            config,
            wdqs,
            wikibase,
        }
    }

    /// Run both passes (ISBN-13 first, as the original did), render the
    /// report, and publish it in live mode. Returns the rendered report
    /// for the console.
    pub async fn run(&self) -> Result<String, SweepError> {
        let isbn13_errors = self
            .process(&self.config.isbn13_property, IsbnKind::Isbn13)
            .await?;
        let isbn10_errors = self
            .process(&self.config.isbn10_property, IsbnKind::Isbn10)
            .await?;

        let report = render_report(&[
            (IsbnKind::Isbn13, isbn13_errors),
            (IsbnKind::Isbn10, isbn10_errors),
        ]);

        self.publish_report(&report).await?;
        Ok(report)
    }

    /// One pass over a property: classify every stored value in
    /// discovery order, correct the mis-hyphenated ones, collect the
    /// invalid ones.
    pub async fn process(
        &self,
        property: &str,
        kind: IsbnKind,
    ) -> Result<Vec<ErrorEntry>, SweepError> {
        tracing::info!(property, kind = kind.label(), "fetching stored values");
        let rows = self.wdqs.property_values(property).await?;
        tracing::info!(rows = rows.len(), "query returned");

        let records: Vec<IsbnRecord> = rows
            .into_iter()
            .map(|row| IsbnRecord {
                qid: row.qid,
                value: row.value,
            })
            .collect();

        let mut errors = Vec::new();
        let mut corrected = 0usize;

        for row in records {
            match classify(kind, &row.value) {
                Classification::Canonical => {}
                Classification::Unfixable => {
                    tracing::debug!(
                        qid = %row.qid,
                        value = %row.value,
                        "valid but not rehyphenatable, leaving as stored"
                    );
                }
                Classification::Invalid => {
                    tracing::debug!(qid = %row.qid, value = %row.value, "invalid value");
                    errors.push(ErrorEntry::new(row.qid, row.value));
                }
                Classification::Rehyphenate { canonical } => {
                    let correction = Correction {
                        qid: row.qid,
                        old_value: row.value,
                        new_value: canonical,
                    };
                    if self.apply(property, &correction).await? {
                        corrected += 1;
                    }
                }
            }
        }

        tracing::info!(
            kind = kind.label(),
            corrected,
            invalid = errors.len(),
            "pass complete"
        );
        Ok(errors)
    }

    /// Apply (or, in dry-run mode, only narrate) one correction.
    /// Returns whether it counts as corrected.
    async fn apply(&self, property: &str, correction: &Correction) -> Result<bool, SweepError> {
        if self.config.dry_run {
            tracing::info!(
                qid = %correction.qid,
                old = %correction.old_value,
                new = %correction.new_value,
                "dry run: would correct hyphenation"
            );
            return Ok(true);
        }

        let outcome = self
            .wikibase
            .replace_claim_value(
                &correction.qid,
                property,
                &correction.old_value,
                &correction.new_value,
                &self.config.claim_summary,
            )
            .await?;

        match outcome {
            GuardedWrite::Applied => {
                tracing::info!(
                    qid = %correction.qid,
                    old = %correction.old_value,
                    new = %correction.new_value,
                    "corrected hyphenation"
                );
                Ok(true)
            }
            GuardedWrite::SkippedStale => {
                tracing::info!(
                    qid = %correction.qid,
                    old = %correction.old_value,
                    "value changed since the query, skipping"
                );
                Ok(false)
            }
        }
    }

    /// Overwrite the report page, but only in live mode with publishing
    /// enabled, and only when the content actually changed.
    async fn publish_report(&self, report: &str) -> Result<(), SweepError> {
        if self.config.dry_run || !self.config.publish {
            return Ok(());
        }

        let current = self.wikibase.page_text(&self.config.report_page).await?;
        if !needs_publish(current.as_deref(), report) {
            tracing::info!(page = %self.config.report_page, "report unchanged, skipping edit");
            return Ok(());
        }

        self.wikibase
            .save_page(&self.config.report_page, report, &self.config.report_summary)
            .await?;
        tracing::info!(page = %self.config.report_page, "report published");
        Ok(())
    }
}
