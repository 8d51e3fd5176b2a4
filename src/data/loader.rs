use std::io::Read;
use std::path::Path;

use chrono::Datelike;
use csv::StringRecord;

use super::model::{Listing, ListingDataset, RawListing};
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Column headers the source CSV must carry, exactly as spelled here.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "Price",
    "Bedrooms",
    "Bathrooms",
    "Area (Sqft)",
    "Lot Size",
    "Year Built",
    "Days on Market",
    "Status",
    "Property Type",
    "State",
    "City",
    "Address",
    "Listing Agent",
];

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Load and clean a listings CSV, using today's calendar year for building age.
pub fn load_file(path: &Path) -> Result<ListingDataset, DataLoadError> {
    load_file_for_year(path, current_year())
}

pub fn load_file_for_year(path: &Path, current_year: i32) -> Result<ListingDataset, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|e| DataLoadError::from_io(path, e))?;
    read_listings(file, path, current_year)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Positions of the required columns inside one CSV header.
struct ColumnIndex([usize; REQUIRED_COLUMNS.len()]);

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, source: &Path) -> Result<Self, DataLoadError> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}'))
            .collect();

        let mut idx = [0usize; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();
        for (slot, column) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
            match names.iter().position(|h| *h == column) {
                Some(i) => *slot = i,
                None => missing.push(column.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns {
                path: source.to_path_buf(),
                columns: missing,
            });
        }
        Ok(ColumnIndex(idx))
    }

    fn raw_listing(&self, record: &StringRecord) -> RawListing {
        let cell = |n: usize| record.get(self.0[n]).unwrap_or("").to_string();
        RawListing {
            price: cell(0),
            bedrooms: cell(1),
            bathrooms: cell(2),
            area: cell(3),
            lot_size: cell(4),
            year_built: cell(5),
            days_on_market: cell(6),
            status: cell(7),
            property_type: cell(8),
            state: cell(9),
            city: cell(10),
            address: cell(11),
            listing_agent: cell(12),
        }
    }
}

/// Parse listings from any reader. `source` names the data in errors and on
/// the resulting dataset.
///
/// Only a missing/unreadable header aborts. A row the reader cannot decode is
/// skipped and counted; a cell that does not parse becomes `None` on its row.
pub fn read_listings<R: Read>(
    reader: R,
    source: &Path,
    current_year: i32,
) -> Result<ListingDataset, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DataLoadError::Csv {
            path: source.to_path_buf(),
            source: e,
        })?
        .clone();
    let columns = ColumnIndex::from_headers(&headers, source)?;

    let mut listings = Vec::new();
    let mut skipped_rows = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                listings.push(Listing::from_raw(columns.raw_listing(&record), current_year));
            }
            Err(e) => {
                log::warn!("{}: skipping CSV row {}: {e}", source.display(), row_no + 1);
                skipped_rows += 1;
            }
        }
    }

    log::info!(
        "Loaded {} listings from {} ({} rows skipped)",
        listings.len(),
        source.display(),
        skipped_rows
    );

    Ok(ListingDataset::from_listings(
        source.to_path_buf(),
        listings,
        skipped_rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{write_csv, HEADER};
    use crate::data::model::PriceCategory;

    #[test]
    fn loads_and_cleans_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[
                r#""$350,000",3 bd,2 ba,"1,750 sqft","4,000 sqft",1990,30,Sold,Condo,TX,Austin,1 A St,Jane Doe - ABC Realty"#,
                r#""$1,500,000",5 bd,4 ba,"4,000 sqft","10,000 sqft",2020,90,For Sale,Single Family,CA,Malibu,2 B St,John Roe"#,
            ],
        );

        let ds = load_file_for_year(&path, 2025).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.skipped_rows, 0);
        assert_eq!(ds.source, path);

        let first = &ds.listings[0];
        assert_eq!(first.price, Some(350_000.0));
        assert_eq!(first.area_sqft, Some(1_750.0));
        assert_eq!(first.price_per_sqft, Some(200.0));
        assert_eq!(first.building_age, Some(35));
        assert_eq!(first.agent_company.as_deref(), Some("ABC Realty"));
        assert_eq!(first.raw.address, "1 A St");

        let second = &ds.listings[1];
        assert_eq!(second.price_category, Some(PriceCategory::Over1M));
        assert_eq!(second.agent_name, "John Roe");
        assert_eq!(second.agent_company, None);
    }

    #[test]
    fn unparsable_cells_keep_the_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &["N/A,N/A,N/A,unknown,,old,,Sold,Condo,TX,Austin,1 A St,Jane Doe"],
        );

        let ds = load_file_for_year(&path, 2025).unwrap();
        assert_eq!(ds.len(), 1);
        let l = &ds.listings[0];
        assert_eq!(l.price, None);
        assert_eq!(l.bedrooms, None);
        assert_eq!(l.bathrooms, None);
        assert_eq!(l.area_sqft, None);
        assert_eq!(l.lot_size_sqft, None);
        assert_eq!(l.days_on_market, None);
        assert_eq!(l.age_category, None);
        assert_eq!(l.price_category, None);
    }

    #[test]
    fn overflowing_year_built_keeps_the_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[
                r#""$300,000",3 bd,2 ba,"1,500 sqft","4,000 sqft",-2147483000,30,Sold,Condo,TX,Austin,1 A St,Jane Doe"#,
                r#""$500,000",4 bd,3 ba,"2,000 sqft","6,000 sqft",2000,12,Sold,Condo,TX,Dallas,2 B St,John Roe"#,
            ],
        );

        let ds = load_file_for_year(&path, 2025).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.listings[0].building_age, None);
        assert_eq!(ds.listings[0].age_category, None);
        assert_eq!(ds.listings[0].price, Some(300_000.0));
        assert_eq!(ds.listings[1].building_age, Some(25));
    }

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &[r#""$100,000",2 bd"#]);

        let ds = load_file_for_year(&path, 2025).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.listings[0].bedrooms, Some(2.0));
        assert_eq!(ds.listings[0].raw.state, "");
        assert_eq!(ds.listings[0].agent_name, "");
    }

    #[test]
    fn columns_may_appear_in_any_order_with_extras() {
        let csv = "Listing Agent,Extra,Address,City,State,Property Type,Status,Days on Market,Year Built,Lot Size,Area (Sqft),Bathrooms,Bedrooms,Price\n\
                   Ann Lee - XYZ,ignored,9 Z St,Reno,NV,Condo,Sold,12,2015,,900 sqft,1 ba,1 bd,\"$250,000\"\n";
        let ds = read_listings(csv.as_bytes(), Path::new("inline.csv"), 2025).unwrap();
        let l = &ds.listings[0];
        assert_eq!(l.price, Some(250_000.0));
        assert_eq!(l.state(), "NV");
        assert_eq!(l.agent_name, "Ann Lee");
    }

    #[test]
    fn undecodable_row_is_skipped_not_fatal() {
        let mut bytes = format!("{HEADER}\n").into_bytes();
        bytes.extend_from_slice(b"$1,1 bd,1 ba,1 sqft,1 sqft,2000,1,Sold,Condo,TX,\xff\xfe,1 A St,A\n");
        bytes.extend_from_slice(b"$2,1 bd,1 ba,1 sqft,1 sqft,2000,1,Sold,Condo,TX,Austin,2 A St,B\n");

        let ds = read_listings(bytes.as_slice(), Path::new("bytes.csv"), 2025).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.skipped_rows, 1);
        assert_eq!(ds.listings[0].raw.address, "2 A St");
    }

    #[test]
    fn missing_file_is_structural_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::NotFound { .. }));
    }

    #[test]
    fn missing_columns_are_reported_together() {
        let csv = "Price,Bedrooms,Bathrooms,Area (Sqft),Lot Size,Year Built,Days on Market,Status,Property Type,City,Address\n";
        let err = read_listings(csv.as_bytes(), Path::new("partial.csv"), 2025).unwrap_err();
        match err {
            DataLoadError::MissingColumns { columns, .. } => {
                assert_eq!(columns, vec!["State".to_string(), "Listing Agent".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_reports_all_columns_missing() {
        let err = read_listings(&b""[..], Path::new("empty.csv"), 2025).unwrap_err();
        match err {
            DataLoadError::MissingColumns { columns, .. } => {
                assert_eq!(columns.len(), REQUIRED_COLUMNS.len());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_file_loads_empty_dataset() {
        let ds = read_listings(format!("{HEADER}\n").as_bytes(), Path::new("h.csv"), 2025).unwrap();
        assert!(ds.is_empty());
    }
}
