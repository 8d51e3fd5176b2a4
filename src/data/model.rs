use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use super::bins;
use super::parse::{parse_area, parse_count, parse_currency, parse_int, parse_number, split_agent};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Building-age bucket, ordered youngest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeCategory {
    UpTo10,
    From11To20,
    From21To30,
    From31To50,
    Over50,
}

impl AgeCategory {
    pub const ALL: [AgeCategory; 5] = [
        AgeCategory::UpTo10,
        AgeCategory::From11To20,
        AgeCategory::From21To30,
        AgeCategory::From31To50,
        AgeCategory::Over50,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeCategory::UpTo10 => "0-10 years",
            AgeCategory::From11To20 => "11-20 years",
            AgeCategory::From21To30 => "21-30 years",
            AgeCategory::From31To50 => "31-50 years",
            AgeCategory::Over50 => "50+ years",
        }
    }
}

/// Price bucket, ordered cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceCategory {
    Under200K,
    From200KTo400K,
    From400KTo600K,
    From600KTo1M,
    Over1M,
}

impl PriceCategory {
    pub const ALL: [PriceCategory; 5] = [
        PriceCategory::Under200K,
        PriceCategory::From200KTo400K,
        PriceCategory::From400KTo600K,
        PriceCategory::From600KTo1M,
        PriceCategory::Over1M,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PriceCategory::Under200K => "<$200K",
            PriceCategory::From200KTo400K => "$200K-$400K",
            PriceCategory::From400KTo600K => "$400K-$600K",
            PriceCategory::From600KTo1M => "$600K-$1M",
            PriceCategory::Over1M => ">$1M",
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RawListing – one CSV row, all text
// ---------------------------------------------------------------------------

/// One unparsed row of the source CSV. Cells absent from a short row are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListing {
    pub price: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub lot_size: String,
    pub year_built: String,
    pub days_on_market: String,
    pub status: String,
    pub property_type: String,
    pub state: String,
    pub city: String,
    pub address: String,
    pub listing_agent: String,
}

// ---------------------------------------------------------------------------
// Listing – the cleaned, typed record
// ---------------------------------------------------------------------------

/// Typed view of a [`RawListing`]. `None` marks a value that could not be
/// parsed or derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Source text, kept for the detail table and categorical filters.
    pub raw: RawListing,
    pub price: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub area_sqft: Option<f64>,
    pub lot_size_sqft: Option<f64>,
    pub price_per_sqft: Option<f64>,
    pub year_built: Option<i32>,
    pub days_on_market: Option<f64>,
    pub building_age: Option<i32>,
    pub age_category: Option<AgeCategory>,
    pub price_category: Option<PriceCategory>,
    pub agent_name: String,
    pub agent_company: Option<String>,
}

impl Listing {
    /// Derive every typed field from `raw`. Depends on nothing but the row and
    /// `current_year`.
    pub fn from_raw(raw: RawListing, current_year: i32) -> Self {
        let price = parse_currency(&raw.price);
        let area_sqft = parse_area(&raw.area);
        let price_per_sqft = match (price, area_sqft) {
            (Some(p), Some(a)) if a != 0.0 => Some(p / a),
            _ => None,
        };
        let year_built = parse_int(&raw.year_built);
        let building_age = year_built.and_then(|y| current_year.checked_sub(y));
        let (agent_name, agent_company) = split_agent(&raw.listing_agent);

        Listing {
            price,
            bedrooms: parse_count(&raw.bedrooms),
            bathrooms: parse_count(&raw.bathrooms),
            area_sqft,
            lot_size_sqft: parse_area(&raw.lot_size),
            price_per_sqft,
            year_built,
            days_on_market: parse_number(&raw.days_on_market),
            building_age,
            age_category: building_age.and_then(bins::age_category),
            price_category: price.and_then(bins::price_category),
            agent_name,
            agent_company,
            raw,
        }
    }

    pub fn state(&self) -> &str {
        &self.raw.state
    }

    pub fn city(&self) -> &str {
        &self.raw.city
    }

    pub fn status(&self) -> &str {
        &self.raw.status
    }

    pub fn property_type(&self) -> &str {
        &self.raw.property_type
    }

    pub fn is_sold(&self) -> bool {
        self.raw.status == "Sold"
    }
}

// ---------------------------------------------------------------------------
// ListingDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All cleaned listings of one source file, plus the distinct values the
/// filter widgets offer. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct ListingDataset {
    pub source: PathBuf,
    pub listings: Vec<Listing>,
    pub states: BTreeSet<String>,
    pub property_types: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
    /// Rows the CSV reader could not decode.
    pub skipped_rows: usize,
}

impl ListingDataset {
    pub fn from_listings(source: PathBuf, listings: Vec<Listing>, skipped_rows: usize) -> Self {
        let mut states = BTreeSet::new();
        let mut property_types = BTreeSet::new();
        let mut statuses = BTreeSet::new();
        for l in &listings {
            states.insert(l.raw.state.clone());
            property_types.insert(l.raw.property_type.clone());
            statuses.insert(l.raw.status.clone());
        }
        ListingDataset {
            source,
            listings,
            states,
            property_types,
            statuses,
            skipped_rows,
        }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Smallest and largest known price, if any listing has one.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.listings
            .iter()
            .filter_map(|l| l.price)
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }
}
