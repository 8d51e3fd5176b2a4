use super::model::{AgeCategory, PriceCategory};

// ---------------------------------------------------------------------------
// Ordered bin tables
// ---------------------------------------------------------------------------

/// Half-open range `(lower, upper]` mapped to a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin<C> {
    pub lower: f64,
    pub upper: f64,
    pub category: C,
}

impl<C> Bin<C> {
    const fn new(lower: f64, upper: f64, category: C) -> Self {
        Bin {
            lower,
            upper,
            category,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower < value && value <= self.upper
    }
}

pub const AGE_BINS: [Bin<AgeCategory>; 5] = [
    Bin::new(0.0, 10.0, AgeCategory::UpTo10),
    Bin::new(10.0, 20.0, AgeCategory::From11To20),
    Bin::new(20.0, 30.0, AgeCategory::From21To30),
    Bin::new(30.0, 50.0, AgeCategory::From31To50),
    Bin::new(50.0, 100.0, AgeCategory::Over50),
];

pub const PRICE_BINS: [Bin<PriceCategory>; 5] = [
    Bin::new(0.0, 200_000.0, PriceCategory::Under200K),
    Bin::new(200_000.0, 400_000.0, PriceCategory::From200KTo400K),
    Bin::new(400_000.0, 600_000.0, PriceCategory::From400KTo600K),
    Bin::new(600_000.0, 1_000_000.0, PriceCategory::From600KTo1M),
    Bin::new(1_000_000.0, f64::INFINITY, PriceCategory::Over1M),
];

/// First bin containing `value`, in table order. `None` when nothing matches
/// (including NaN, which fails every comparison).
pub fn classify<C: Copy>(bins: &[Bin<C>], value: f64) -> Option<C> {
    bins.iter().find(|b| b.contains(value)).map(|b| b.category)
}

pub fn age_category(building_age: i32) -> Option<AgeCategory> {
    classify(&AGE_BINS, building_age as f64)
}

pub fn price_category(price: f64) -> Option<PriceCategory> {
    classify(&PRICE_BINS, price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_bins_are_inclusive_upper_at_every_edge() {
        assert_eq!(price_category(0.0), None);
        assert_eq!(price_category(0.01), Some(PriceCategory::Under200K));
        assert_eq!(price_category(200_000.0), Some(PriceCategory::Under200K));
        assert_eq!(price_category(200_000.01), Some(PriceCategory::From200KTo400K));
        assert_eq!(price_category(400_000.0), Some(PriceCategory::From200KTo400K));
        assert_eq!(price_category(400_001.0), Some(PriceCategory::From400KTo600K));
        assert_eq!(price_category(600_000.0), Some(PriceCategory::From400KTo600K));
        assert_eq!(price_category(600_001.0), Some(PriceCategory::From600KTo1M));
        assert_eq!(price_category(1_000_000.0), Some(PriceCategory::From600KTo1M));
        assert_eq!(price_category(1_000_000.5), Some(PriceCategory::Over1M));
    }

    #[test]
    fn price_examples() {
        assert_eq!(price_category(250_000.0).map(|c| c.label()), Some("$200K-$400K"));
        assert_eq!(price_category(1_500_000.0).map(|c| c.label()), Some(">$1M"));
        assert_eq!(price_category(200_000.0).map(|c| c.label()), Some("<$200K"));
    }

    #[test]
    fn out_of_range_prices_have_no_category() {
        assert_eq!(price_category(-5.0), None);
        assert_eq!(price_category(f64::NAN), None);
    }

    #[test]
    fn age_bins_are_inclusive_upper_at_every_edge() {
        assert_eq!(age_category(0), None);
        assert_eq!(age_category(1), Some(AgeCategory::UpTo10));
        assert_eq!(age_category(10), Some(AgeCategory::UpTo10));
        assert_eq!(age_category(11), Some(AgeCategory::From11To20));
        assert_eq!(age_category(20), Some(AgeCategory::From11To20));
        assert_eq!(age_category(21), Some(AgeCategory::From21To30));
        assert_eq!(age_category(30), Some(AgeCategory::From21To30));
        assert_eq!(age_category(31), Some(AgeCategory::From31To50));
        assert_eq!(age_category(50), Some(AgeCategory::From31To50));
        assert_eq!(age_category(51), Some(AgeCategory::Over50));
        assert_eq!(age_category(100), Some(AgeCategory::Over50));
        assert_eq!(age_category(101), None);
        assert_eq!(age_category(-3), None);
    }

    #[test]
    fn tables_are_contiguous_and_ordered() {
        for pair in AGE_BINS.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
        for pair in PRICE_BINS.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }
}
