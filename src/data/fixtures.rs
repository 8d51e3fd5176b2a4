//! Shared builders for data-layer tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::model::{Listing, RawListing};

pub const HEADER: &str = "Price,Bedrooms,Bathrooms,Area (Sqft),Lot Size,Year Built,Days on Market,Status,Property Type,State,City,Address,Listing Agent";

pub fn raw(price: &str, agent: &str) -> RawListing {
    RawListing {
        price: price.into(),
        bedrooms: "3 bd".into(),
        bathrooms: "2 ba".into(),
        area: "1,800 sqft".into(),
        lot_size: "5,000 sqft".into(),
        year_built: "2000".into(),
        days_on_market: "45".into(),
        status: "Sold".into(),
        property_type: "Single Family".into(),
        state: "TX".into(),
        city: "Austin".into(),
        address: "1 Main St".into(),
        listing_agent: agent.into(),
    }
}

/// Listing with the given categorical fields and price; everything else from [`raw`].
pub fn listing(state: &str, property_type: &str, status: &str, price: &str) -> Listing {
    let mut r = raw(price, "Jane Doe - ABC Realty");
    r.state = state.into();
    r.property_type = property_type.into();
    r.status = status.into();
    Listing::from_raw(r, 2025)
}

/// Write `rows` under the standard header into `dir/name`.
pub fn write_csv(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "{HEADER}").unwrap();
    for row in rows {
        writeln!(f, "{row}").unwrap();
    }
    path
}
