use std::fmt;

use super::model::{Listing, ListingDataset};

// ---------------------------------------------------------------------------
// Filter specification
// ---------------------------------------------------------------------------

/// A categorical choice: everything, or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("All"),
            Selection::Only(v) => f.write_str(v),
        }
    }
}

/// Conjunction of the user's predicates. The price range is inclusive at
/// both ends; a listing without a price never passes it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub state: Selection,
    pub property_type: Selection,
    pub price_min: f64,
    pub price_max: f64,
    pub status: Selection,
}

impl Default for FilterSpec {
    /// Lets every priced listing through.
    fn default() -> Self {
        FilterSpec {
            state: Selection::All,
            property_type: Selection::All,
            price_min: 0.0,
            price_max: f64::INFINITY,
            status: Selection::All,
        }
    }
}

impl FilterSpec {
    /// "Show everything" for `dataset`, with the price range spanning the
    /// whole-dollar envelope of its known prices.
    pub fn for_dataset(dataset: &ListingDataset) -> Self {
        match dataset.price_bounds() {
            Some((lo, hi)) => FilterSpec {
                price_min: lo.floor(),
                price_max: hi.ceil(),
                ..Default::default()
            },
            None => FilterSpec::default(),
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        let in_range = matches!(
            listing.price,
            Some(p) if self.price_min <= p && p <= self.price_max
        );
        in_range
            && self.state.matches(listing.state())
            && self.property_type.matches(listing.property_type())
            && self.status.matches(listing.status())
    }

    /// Listings passing every predicate, in input order.
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}

/// Indices of the dataset's listings passing `spec`, in ascending order.
pub fn filtered_indices(dataset: &ListingDataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .listings
        .iter()
        .enumerate()
        .filter(|(_, l)| spec.matches(l))
        .map(|(i, _)| i)
        .collect()
}
