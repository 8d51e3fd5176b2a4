use std::path::PathBuf;

use clap::Parser;

use crate::analytics::report::ReportConfig;

/// Interactive analytics dashboard for real-estate sales listings.
#[derive(Debug, Clone, Parser)]
#[command(name = "estate-lens", version, about)]
pub struct Config {
    /// Listings CSV opened at start-up.
    #[arg(long, env = "ESTATE_DATA", default_value = "us_house_Sales_data.csv")]
    pub data: PathBuf,

    /// Rows shown in the detail table.
    #[arg(long, env = "ESTATE_TABLE_ROWS", default_value_t = 100)]
    pub table_rows: usize,

    /// Minimum priced listings for a state to appear in the price chart.
    #[arg(long, env = "ESTATE_MIN_STATE_LISTINGS", default_value_t = 10)]
    pub min_state_listings: usize,

    /// Minimum listings for an agent to appear in the agent charts.
    #[arg(long, env = "ESTATE_MIN_AGENT_LISTINGS", default_value_t = 5)]
    pub min_agent_listings: usize,
}

impl Config {
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            min_state_listings: self.min_state_listings,
            min_agent_listings: self.min_agent_listings,
            ..ReportConfig::default()
        }
    }
}
