//! Writes a synthetic listings CSV with the dashboard's input schema.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Generate a deterministic sample of house sales listings")]
struct Args {
    /// Output CSV path.
    #[arg(long, default_value = "us_house_Sales_data.csv")]
    output: PathBuf,

    /// Number of listings.
    #[arg(long, default_value_t = 2000)]
    rows: usize,

    /// PRNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// splitmix64; enough for reproducible fake data.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64() as usize % items.len()]
    }
}

const CITIES: [(&str, &str, f64); 12] = [
    ("Austin", "TX", 1.1),
    ("Dallas", "TX", 0.9),
    ("Houston", "TX", 0.85),
    ("Los Angeles", "CA", 2.4),
    ("San Diego", "CA", 2.1),
    ("Fresno", "CA", 1.0),
    ("Miami", "FL", 1.5),
    ("Orlando", "FL", 0.95),
    ("New York", "NY", 2.8),
    ("Buffalo", "NY", 0.7),
    ("Seattle", "WA", 2.0),
    ("Spokane", "WA", 0.8),
];
const PROPERTY_TYPES: [(&str, f64); 4] = [
    ("Single Family", 1.1),
    ("Condo", 0.8),
    ("Townhouse", 0.9),
    ("Multi-Family", 1.3),
];
const STATUSES: [&str; 3] = ["Sold", "For Sale", "Pending"];
const AGENTS: [&str; 8] = [
    "Jane Doe - ABC Realty",
    "John Roe - Sunny Homes",
    "Maria Garcia - Keystone Realty",
    "Wei Chen - Harbor Properties",
    "Ali Khan - ABC Realty",
    "Sam Taylor",
    "Priya Patel - Summit Group",
    "Chris Moore - Harbor Properties",
];
const STREETS: [&str; 6] = ["Oak St", "Maple Ave", "Pine Rd", "Cedar Ln", "Elm Dr", "Lake Blvd"];

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SplitMix(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record([
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
    ])?;

    for i in 0..args.rows {
        let (city, state, city_factor) = *rng.pick(&CITIES);
        let (property_type, type_factor) = *rng.pick(&PROPERTY_TYPES);
        let bedrooms = rng.range(1, 6);
        let bathrooms = rng.range(1, bedrooms.max(2));
        let area = 500 + bedrooms * 450 + rng.range(0, 900);
        let lot = area + rng.range(500, 12_000);
        let year_built = rng.range(1925, 2024);
        let price_per_sqft = 120.0 + 180.0 * rng.unit();
        let price = (area as f64 * price_per_sqft * city_factor * type_factor / 1000.0).round() as u64 * 1000;
        let days = rng.range(1, 180);

        // A few rows carry an unreadable field.
        let bedrooms_text = if i % 53 == 7 {
            "N/A".to_string()
        } else {
            format!("{bedrooms} bd")
        };
        let price_text = if i % 97 == 11 {
            "Contact agent".to_string()
        } else {
            format!("${}", thousands(price))
        };

        writer.write_record([
            price_text,
            bedrooms_text,
            format!("{bathrooms} ba"),
            format!("{} sqft", thousands(area)),
            format!("{} sqft", thousands(lot)),
            year_built.to_string(),
            days.to_string(),
            rng.pick(&STATUSES).to_string(),
            property_type.to_string(),
            state.to_string(),
            city.to_string(),
            format!("{} {}", rng.range(1, 9999), rng.pick(&STREETS)),
            rng.pick(&AGENTS).to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {} listings to {}", args.rows, args.output.display());
    Ok(())
}
