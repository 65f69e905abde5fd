//! Print job pricing.
//!
//! Prices a job from its selected page count and print options using a
//! [`RateCard`]. Single-sided jobs pay per page; double-sided jobs pay per
//! physical sheet, with any odd page left over billed as a single side.

use crate::domain::{ColorMode, Money, PaperType, PriceQuote, PrintConfig, RateCard, Sidedness};

/// Sub-units per minor unit used while summing, so half a surcharge
/// stays exact until the final rounding.
const FINE_PER_MINOR: u128 = 100;

/// Anything that can put a price on a print job.
pub trait Pricing {
    /// Quote `page_count` selected pages printed with `config`.
    fn quote(&self, page_count: usize, config: &PrintConfig) -> PriceQuote;
}

/// Prices jobs against a rate card.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceCalculator {
    rates: RateCard,
}

impl PriceCalculator {
    #[must_use]
    pub const fn new(rates: RateCard) -> Self {
        Self { rates }
    }

    /// Single-sided rate for the ink mode, before any paper surcharge.
    const fn base_rate(&self, color: ColorMode) -> Money {
        match color {
            ColorMode::BlackWhite => self.rates.bw_page,
            ColorMode::Color => self.rates.color_page,
        }
    }

    /// Rate for one sheet printed on both sides.
    const fn sheet_rate(&self, color: ColorMode) -> Money {
        match color {
            ColorMode::BlackWhite => self.rates.bw_sheet_double,
            ColorMode::Color => self.rates.color_sheet_double,
        }
    }

    /// Per-side paper surcharge.
    const fn surcharge(&self, paper: PaperType) -> Money {
        match paper {
            PaperType::Standard => Money::ZERO,
            PaperType::Premium => self.rates.premium_surcharge,
            PaperType::Glossy => self.rates.glossy_surcharge,
        }
    }

    /// Cost of one copy, in fine units.
    fn copy_subtotal(&self, page_count: u128, config: &PrintConfig) -> u128 {
        let fine = |m: Money| u128::from(m.minor_units()) * FINE_PER_MINOR;
        let base = fine(self.base_rate(config.color_mode));
        let surcharge = fine(self.surcharge(config.paper_type));

        match config.sidedness {
            Sidedness::Single => page_count * (base + surcharge),
            Sidedness::Double => {
                let full_sheets = page_count / 2;
                let odd_page = page_count % 2;
                full_sheets * fine(self.sheet_rate(config.color_mode))
                    + odd_page * base
                    + page_count * surcharge / 2
            }
        }
    }
}

impl Pricing for PriceCalculator {
    fn quote(&self, page_count: usize, config: &PrintConfig) -> PriceQuote {
        let copies = config.copies.get();
        if page_count == 0 {
            return PriceQuote::zero(copies);
        }

        let pages = page_count as u128;
        let total_fine = self.copy_subtotal(pages, config) * u128::from(copies);
        let minor = round_half_up(total_fine);

        let quote = PriceQuote {
            amount: Money::from_minor(u64::try_from(minor).unwrap_or(u64::MAX)),
            pages: page_count,
            sheets: sheets_needed(page_count, config.sidedness),
            copies,
        };

        tracing::debug!(
            pages = page_count,
            paper = %config.paper_type,
            color = %config.color_mode,
            sides = %config.sidedness,
            copies,
            amount = %quote.amount,
            "Priced print job"
        );

        quote
    }
}

/// Prices a job with the standard rate card.
#[must_use]
pub fn price(page_count: usize, config: &PrintConfig) -> PriceQuote {
    PriceCalculator::default().quote(page_count, config)
}

/// Physical sheets one copy of the job needs.
#[must_use]
pub const fn sheets_needed(page_count: usize, sidedness: Sidedness) -> usize {
    match sidedness {
        Sidedness::Single => page_count,
        Sidedness::Double => page_count.div_ceil(2),
    }
}

const fn round_half_up(fine: u128) -> u128 {
    (fine + FINE_PER_MINOR / 2) / FINE_PER_MINOR
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use proptest::prelude::*;

    fn config(paper: PaperType, color: ColorMode, sides: Sidedness, copies: u32) -> PrintConfig {
        PrintConfig {
            paper_type: paper,
            color_mode: color,
            sidedness: sides,
            copies: NonZeroU32::new(copies).unwrap(),
        }
    }

    fn amount(count: usize, config: &PrintConfig) -> String {
        price(count, config).amount.to_string()
    }

    #[test]
    fn test_zero_pages_cost_nothing() {
        let cfg = config(PaperType::Glossy, ColorMode::Color, Sidedness::Double, 9);
        let quote = price(0, &cfg);
        assert_eq!(quote.amount, Money::ZERO);
        assert_eq!(quote.sheets, 0);
    }

    #[test]
    fn test_single_sided_black_and_white() {
        let cfg = config(PaperType::Standard, ColorMode::BlackWhite, Sidedness::Single, 1);
        assert_eq!(amount(10, &cfg), "15.00");
    }

    #[test]
    fn test_single_sided_surcharges() {
        let premium = config(PaperType::Premium, ColorMode::BlackWhite, Sidedness::Single, 1);
        let glossy = config(PaperType::Glossy, ColorMode::Color, Sidedness::Single, 2);
        assert_eq!(amount(4, &premium), "8.00");
        assert_eq!(amount(3, &glossy), "30.00");
    }

    #[test]
    fn test_double_sided_even_pages() {
        let cfg = config(PaperType::Standard, ColorMode::BlackWhite, Sidedness::Double, 1);
        assert_eq!(amount(10, &cfg), "12.50");
    }

    #[test]
    fn test_double_sided_odd_page_with_surcharge_and_copies() {
        let cfg = config(PaperType::Premium, ColorMode::Color, Sidedness::Double, 2);
        let quote = price(7, &cfg);
        assert_eq!(quote.amount.to_string(), "59.50");
        assert_eq!(quote.sheets, 4);
        assert_eq!(quote.copies, 2);
    }

    #[test]
    fn test_double_sided_single_page_uses_base_rate() {
        let cfg = config(PaperType::Glossy, ColorMode::BlackWhite, Sidedness::Double, 1);
        // 1.50 base + 1 * 0.50 half glossy surcharge
        assert_eq!(amount(1, &cfg), "2.00");
    }

    #[test]
    fn test_half_surcharge_rounds_half_up() {
        let rates = RateCard {
            premium_surcharge: Money::from_minor(1),
            ..RateCard::default()
        };
        let calculator = PriceCalculator::new(rates);
        let cfg = config(PaperType::Premium, ColorMode::BlackWhite, Sidedness::Double, 1);
        // 2.50 sheet + 2 * 0.005 = 2.51; 1.50 + 0.005 = 1.505 -> 1.51
        assert_eq!(calculator.quote(2, &cfg).amount, Money::from_minor(251));
        assert_eq!(calculator.quote(1, &cfg).amount, Money::from_minor(151));
    }

    #[test]
    fn test_sheets_needed() {
        assert_eq!(sheets_needed(7, Sidedness::Single), 7);
        assert_eq!(sheets_needed(7, Sidedness::Double), 4);
        assert_eq!(sheets_needed(8, Sidedness::Double), 4);
    }

    fn any_config() -> impl Strategy<Value = PrintConfig> {
        (
            prop_oneof![
                Just(PaperType::Standard),
                Just(PaperType::Premium),
                Just(PaperType::Glossy)
            ],
            prop_oneof![Just(ColorMode::BlackWhite), Just(ColorMode::Color)],
            prop_oneof![Just(Sidedness::Single), Just(Sidedness::Double)],
            1u32..20,
        )
            .prop_map(|(paper, color, sides, copies)| config(paper, color, sides, copies))
    }

    proptest! {
        #[test]
        fn prop_zero_pages_always_free(cfg in any_config()) {
            prop_assert_eq!(price(0, &cfg).amount, Money::ZERO);
        }

        #[test]
        fn prop_price_is_deterministic(count in 0usize..2000, cfg in any_config()) {
            prop_assert_eq!(price(count, &cfg), price(count, &cfg));
        }

        #[test]
        fn prop_copies_scale_linearly(count in 0usize..500, cfg in any_config()) {
            let single = PrintConfig { copies: NonZeroU32::MIN, ..cfg };
            let one = price(count, &single).amount.minor_units();
            prop_assert_eq!(
                price(count, &cfg).amount.minor_units(),
                one * u64::from(cfg.copies.get())
            );
        }
    }
}
