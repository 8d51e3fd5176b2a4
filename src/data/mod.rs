/// Data layer: core types, cleaning, caching and filtering.
///
/// Architecture:
/// ```text
///   us_house_Sales_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  CSV rows → RawListing → Listing (parse + bins)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  Arc<ListingDataset> per source file, reparsed on change
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSpec predicates → view (indices / &Listing)
///   └──────────┘
/// ```

pub mod bins;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parse;

#[cfg(test)]
pub(crate) mod fixtures;
