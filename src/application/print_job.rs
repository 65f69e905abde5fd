//! Print job requests.
//!
//! A request is what the customer has chosen so far: the page counts of the
//! uploaded files, the page selection, and the print options. Quoting it runs
//! the resolver and the pricer without touching the cart.

use serde::Serialize;

use super::page_range::resolve;
use super::pricing::Pricing;
use crate::domain::{
    AppError, PageSelectionMode, PageSelectionResult, PriceQuote, PrintConfig, Result,
};

/// Largest combined page count a single job may span.
pub const MAX_TOTAL_PAGES: u32 = 100_000;

/// Everything needed to price a job.
#[derive(Debug, Clone, Default)]
pub struct PrintRequest {
    /// Page count of each uploaded file, as reported by the page estimator.
    pub page_counts: Vec<u32>,
    pub mode: PageSelectionMode,
    pub range: String,
    pub config: PrintConfig,
}

impl PrintRequest {
    /// Pages across all files.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.page_counts
            .iter()
            .fold(0u32, |acc, &n| acc.saturating_add(n))
    }

    #[must_use]
    pub fn file_count(&self) -> u32 {
        u32::try_from(self.page_counts.len()).unwrap_or(u32::MAX)
    }

    /// Checks that at least one file was supplied, none is empty, and the
    /// files together stay within [`MAX_TOTAL_PAGES`].
    ///
    /// # Errors
    /// Returns a validation error describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.page_counts.is_empty() {
            return Err(AppError::validation("At least one file is required"));
        }
        if let Some(pos) = self.page_counts.iter().position(|&n| n == 0) {
            return Err(AppError::validation(format!(
                "File {} has no pages",
                pos + 1
            )));
        }

        let total: u64 = self.page_counts.iter().map(|&n| u64::from(n)).sum();
        if total > u64::from(MAX_TOTAL_PAGES) {
            return Err(AppError::validation(format!(
                "A job may span at most {MAX_TOTAL_PAGES} pages, got {total}"
            )));
        }
        Ok(())
    }

    /// Resolves the page selection against the combined page count.
    #[must_use]
    pub fn selection(&self) -> PageSelectionResult {
        resolve(self.mode, &self.range, self.total_pages())
    }
}

/// A priced but not yet carted job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobQuote {
    pub config: PrintConfig,
    pub selection: PageSelectionResult,
    pub file_count: u32,
    pub total_pages: u32,
    pub quote: PriceQuote,
}

/// Quotes a request. Range errors are carried in the selection, priced at zero.
///
/// # Errors
/// Returns error if the request itself is invalid.
pub fn quote_job(request: &PrintRequest, pricing: &impl Pricing) -> Result<JobQuote> {
    request.validate()?;

    let selection = request.selection();
    let quote = pricing.quote(selection.page_count(), &request.config);

    Ok(JobQuote {
        config: request.config,
        selection,
        file_count: request.file_count(),
        total_pages: request.total_pages(),
        quote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PriceCalculator;
    use crate::domain::{Money, RangeError};

    fn request(page_counts: Vec<u32>, mode: PageSelectionMode, range: &str) -> PrintRequest {
        PrintRequest {
            page_counts,
            mode,
            range: range.to_string(),
            config: PrintConfig::default(),
        }
    }

    #[test]
    fn test_pages_are_summed_across_files() {
        let req = request(vec![3, 4], PageSelectionMode::All, "");
        let job = quote_job(&req, &PriceCalculator::default()).unwrap();
        assert_eq!(job.total_pages, 7);
        assert_eq!(job.file_count, 2);
        assert_eq!(job.quote.amount, Money::from_minor(1050));
    }

    #[test]
    fn test_range_error_quotes_zero() {
        let req = request(vec![5], PageSelectionMode::Custom, "3-10");
        let job = quote_job(&req, &PriceCalculator::default()).unwrap();
        assert_eq!(job.quote.amount, Money::ZERO);
        assert_eq!(
            job.selection.error(),
            Some(RangeError::PageOutOfBounds {
                requested: 10,
                total_pages: 5
            })
        );
    }

    #[test]
    fn test_request_needs_files_with_pages() {
        assert!(request(Vec::new(), PageSelectionMode::All, "").validate().is_err());
        let err = request(vec![2, 0], PageSelectionMode::All, "").validate().unwrap_err();
        assert_eq!(err.to_string(), "File 2 has no pages");
    }

    #[test]
    fn test_oversized_job_is_rejected_before_resolving() {
        let req = request(vec![4_000_000_000], PageSelectionMode::All, "");
        let err = quote_job(&req, &PriceCalculator::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let split = request(vec![MAX_TOTAL_PAGES, 1], PageSelectionMode::All, "");
        assert!(split.validate().is_err());

        let at_limit = request(vec![MAX_TOTAL_PAGES - 1, 1], PageSelectionMode::Custom, "1");
        assert!(at_limit.validate().is_ok());
    }
}
