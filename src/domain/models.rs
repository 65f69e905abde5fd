//! Domain models for print jobs.
//!
//! Every type here is a plain value object: built fresh for each pricing
//! computation and never mutated afterwards.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::RangeError;
use super::money::Money;

/// Paper stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperType {
    /// 70 GSM.
    #[default]
    Standard,
    /// 90 GSM.
    Premium,
    /// 120 GSM.
    Glossy,
}

impl PaperType {
    /// Human-readable label including paper weight.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard (70 GSM)",
            Self::Premium => "Premium (90 GSM)",
            Self::Glossy => "Glossy (120 GSM)",
        }
    }
}

impl fmt::Display for PaperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Premium => write!(f, "premium"),
            Self::Glossy => write!(f, "glossy"),
        }
    }
}

impl FromStr for PaperType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            "glossy" => Ok(Self::Glossy),
            _ => Err(format!(
                "Unknown paper type: {s}. Use: standard, premium, glossy"
            )),
        }
    }
}

/// Ink mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    #[serde(rename = "bw")]
    BlackWhite,
    #[serde(rename = "color")]
    Color,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlackWhite => write!(f, "bw"),
            Self::Color => write!(f, "color"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bw" | "black-white" | "blackwhite" => Ok(Self::BlackWhite),
            "color" | "colour" => Ok(Self::Color),
            _ => Err(format!("Unknown color mode: {s}. Use: bw, color")),
        }
    }
}

/// Single- or double-sided printing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sidedness {
    #[default]
    Single,
    Double,
}

impl fmt::Display for Sidedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
        }
    }
}

impl FromStr for Sidedness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            _ => Err(format!("Unknown sidedness: {s}. Use: single, double")),
        }
    }
}

/// How pages are chosen from the uploaded documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSelectionMode {
    /// Every page `1..=total_pages`.
    #[default]
    All,
    /// Pages named by a range expression such as `1-5,8,11-13`.
    Custom,
}

impl fmt::Display for PageSelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for PageSelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown page selection mode: {s}. Use: all, custom")),
        }
    }
}

/// One comma-separated segment of a custom range expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRangeToken {
    Single(u32),
    /// Inclusive; `start <= end`.
    Range { start: u32, end: u32 },
}

/// Print options chosen for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintConfig {
    pub paper_type: PaperType,
    pub color_mode: ColorMode,
    pub sidedness: Sidedness,
    /// Always at least one.
    pub copies: NonZeroU32,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            paper_type: PaperType::default(),
            color_mode: ColorMode::default(),
            sidedness: Sidedness::default(),
            copies: NonZeroU32::MIN,
        }
    }
}

/// Outcome of resolving a page selection.
///
/// Either a (possibly empty) ascending set of unique pages, or a range error
/// with no pages. The two never coexist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageSelectionResult {
    pages: Vec<u32>,
    error: Option<RangeError>,
}

impl PageSelectionResult {
    /// A successful selection. `pages` must be ascending and unique.
    #[must_use]
    pub(crate) fn selected(pages: Vec<u32>) -> Self {
        debug_assert!(pages.windows(2).all(|w| w[0] < w[1]));
        Self { pages, error: None }
    }

    /// A rejected selection.
    #[must_use]
    pub const fn rejected(error: RangeError) -> Self {
        Self {
            pages: Vec::new(),
            error: Some(error),
        }
    }

    /// Selected pages, ascending.
    #[must_use]
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    #[must_use]
    pub const fn error(&self) -> Option<RangeError> {
        self.error
    }

    /// The authoritative selected page count used for pricing.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Compress the pages back into a canonical range expression.
    ///
    /// `[1, 2, 3, 5, 7, 8]` becomes `"1-3,5,7-8"`.
    #[must_use]
    pub fn range_label(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut iter = self.pages.iter().copied().peekable();

        while let Some(start) = iter.next() {
            let mut end = start;
            while let Some(next) = iter.next_if(|&p| end.checked_add(1) == Some(p)) {
                end = next;
            }
            if start == end {
                parts.push(start.to_string());
            } else {
                parts.push(format!("{start}-{end}"));
            }
        }

        parts.join(",")
    }
}

/// Total cost of a print job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// All copies, all selected pages, rounded to two decimals.
    pub amount: Money,
    /// Selected page count the quote was computed from.
    pub pages: usize,
    /// Physical sheets per copy.
    pub sheets: usize,
    pub copies: u32,
}

impl PriceQuote {
    /// The quote for an empty selection.
    #[must_use]
    pub const fn zero(copies: u32) -> Self {
        Self {
            amount: Money::ZERO,
            pages: 0,
            sheets: 0,
            copies,
        }
    }
}

/// One priced, configured print job ready for the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub config: PrintConfig,
    pub selection: PageSelectionResult,
    pub file_count: u32,
    pub total_pages: u32,
    pub price: PriceQuote,
    pub created_at: DateTime<Utc>,
}

impl OrderLine {
    /// Short description of the page selection for listings.
    #[must_use]
    pub fn selection_label(&self) -> String {
        if self.selection.page_count() == self.total_pages as usize {
            "All Pages".to_string()
        } else {
            self.selection.range_label()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Premium".parse::<PaperType>(), Ok(PaperType::Premium));
        assert_eq!("black-white".parse::<ColorMode>(), Ok(ColorMode::BlackWhite));
        assert_eq!("double".parse::<Sidedness>(), Ok(Sidedness::Double));
        assert_eq!("custom".parse::<PageSelectionMode>(), Ok(PageSelectionMode::Custom));
        assert!("matte".parse::<PaperType>().is_err());
    }

    #[test]
    fn test_enum_display_roundtrips_through_parse() {
        for paper in [PaperType::Standard, PaperType::Premium, PaperType::Glossy] {
            assert_eq!(paper.to_string().parse::<PaperType>(), Ok(paper));
        }
        assert_eq!(ColorMode::Color.to_string().parse::<ColorMode>(), Ok(ColorMode::Color));
    }

    #[test]
    fn test_print_config_serde_names() {
        let config = PrintConfig {
            paper_type: PaperType::Glossy,
            color_mode: ColorMode::BlackWhite,
            sidedness: Sidedness::Double,
            copies: NonZeroU32::new(3).unwrap(),
        };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["paper_type"], "glossy");
        assert_eq!(json["color_mode"], "bw");
        assert_eq!(json["sidedness"], "double");
        assert_eq!(json["copies"], 3);
    }

    #[test]
    fn test_range_label() {
        let selection = PageSelectionResult::selected(vec![1, 2, 3, 5, 7, 8]);
        assert_eq!(selection.range_label(), "1-3,5,7-8");
        assert_eq!(PageSelectionResult::default().range_label(), "");
    }

    #[test]
    fn test_rejected_selection_has_no_pages() {
        let selection = PageSelectionResult::rejected(RangeError::PageOutOfBounds {
            requested: 9,
            total_pages: 4,
        });
        assert!(selection.is_empty());
        assert!(selection.error().is_some());
    }
}
