use std::collections::BTreeMap;

use super::stats::{mean, median, pearson, BoxSummary};
use crate::data::model::{AgeCategory, Listing, PriceCategory};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds that keep thin groups out of the charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportConfig {
    pub min_state_listings: usize,
    pub min_city_listings: usize,
    pub min_type_listings: usize,
    pub min_agent_listings: usize,
    pub top_n: usize,
    pub scatter_points: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            min_state_listings: 10,
            min_city_listings: 5,
            min_type_listings: 10,
            min_agent_listings: 5,
            top_n: 10,
            scatter_points: 1000,
        }
    }
}

// ---------------------------------------------------------------------------
// Result rows
// ---------------------------------------------------------------------------

/// Headline metrics. Undefined on an empty view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarketSummary {
    pub total: usize,
    pub mean_price: Option<f64>,
    pub mean_days_on_market: Option<f64>,
    /// Share of listings whose status is `Sold`, in percent.
    pub sold_rate_pct: Option<f64>,
}

/// Mean of one numeric field for one group. `count` is the number of present
/// values that went into the mean.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: String,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaysOnMarketStat {
    pub property_type: String,
    pub mean: f64,
    pub median: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBox<C> {
    pub category: C,
    pub summary: BoxSummary,
}

pub const CORRELATION_FIELDS: [&str; 4] = ["Bedrooms", "Bathrooms", "Area", "Price"];

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: [&'static str; 4],
    /// Row-major; `None` where the coefficient is undefined.
    pub values: [[Option<f64>; 4]; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub area: f64,
    pub price: f64,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentStat {
    pub agent_name: String,
    /// Listings with a known price.
    pub total: usize,
    pub avg_price: Option<f64>,
    pub avg_days_on_market: Option<f64>,
    pub sold_count: usize,
    pub sold_rate_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgeGroupPrice {
    pub category: AgeCategory,
    pub mean_price: Option<f64>,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

pub fn market_summary(view: &[&Listing]) -> MarketSummary {
    let total = view.len();
    let sold = view.iter().filter(|l| l.is_sold()).count();
    MarketSummary {
        total,
        mean_price: mean(view.iter().map(|l| l.price)),
        mean_days_on_market: mean(view.iter().map(|l| l.days_on_market)),
        sold_rate_pct: (total > 0).then(|| sold as f64 / total as f64 * 100.0),
    }
}

/// Group `view` by `key`, keeping the groups in key order.
fn group_by<'a, K, F>(view: &[&'a Listing], key: F) -> BTreeMap<K, Vec<&'a Listing>>
where
    K: Ord,
    F: Fn(&Listing) -> Option<K>,
{
    let mut groups: BTreeMap<K, Vec<&'a Listing>> = BTreeMap::new();
    for &l in view {
        if let Some(k) = key(l) {
            groups.entry(k).or_default().push(l);
        }
    }
    groups
}

fn price_means_by<F>(view: &[&Listing], key: F, min_count: usize) -> Vec<GroupMean>
where
    F: Fn(&Listing) -> Option<String>,
{
    group_by(view, key)
        .into_iter()
        .filter_map(|(key, members)| {
            let count = members.iter().filter(|l| l.price.is_some()).count();
            let m = mean(members.iter().map(|l| l.price))?;
            (count >= min_count).then_some(GroupMean {
                key,
                mean: m,
                count,
            })
        })
        .collect()
}

/// Mean price per state, most expensive first.
pub fn state_prices(view: &[&Listing], min_count: usize) -> Vec<GroupMean> {
    let mut rows = price_means_by(view, |l| Some(l.state().to_string()), min_count);
    rows.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    rows
}

/// The `top_n` most expensive "City, State" pairs, cheapest of them first.
pub fn top_cities(view: &[&Listing], min_count: usize, top_n: usize) -> Vec<GroupMean> {
    let mut rows = price_means_by(
        view,
        |l| Some(format!("{}, {}", l.city(), l.state())),
        min_count,
    );
    rows.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    rows.truncate(top_n);
    rows.reverse();
    rows
}

pub fn days_on_market_by_type(view: &[&Listing], min_count: usize) -> Vec<DaysOnMarketStat> {
    group_by(view, |l| Some(l.property_type().to_string()))
        .into_iter()
        .filter_map(|(property_type, members)| {
            let count = members.iter().filter(|l| l.days_on_market.is_some()).count();
            if count < min_count {
                return None;
            }
            Some(DaysOnMarketStat {
                property_type,
                mean: mean(members.iter().map(|l| l.days_on_market))?,
                median: median(members.iter().map(|l| l.days_on_market))?,
                count,
            })
        })
        .collect()
}

fn days_on_market_boxes<C, F>(view: &[&Listing], categories: &[C], key: F) -> Vec<CategoryBox<C>>
where
    C: Copy + Ord,
    F: Fn(&Listing) -> Option<C>,
{
    let groups = group_by(view, key);
    categories
        .iter()
        .filter_map(|c| {
            let members = groups.get(c)?;
            let summary = BoxSummary::from_values(members.iter().map(|l| l.days_on_market))?;
            Some(CategoryBox {
                category: *c,
                summary,
            })
        })
        .collect()
}

pub fn days_on_market_by_price_category(view: &[&Listing]) -> Vec<CategoryBox<PriceCategory>> {
    days_on_market_boxes(view, &PriceCategory::ALL, |l| l.price_category)
}

pub fn days_on_market_by_age_category(view: &[&Listing]) -> Vec<CategoryBox<AgeCategory>> {
    days_on_market_boxes(view, &AgeCategory::ALL, |l| l.age_category)
}

/// Pairwise-complete Pearson matrix over bedrooms, bathrooms, area, price.
pub fn correlation_matrix(view: &[&Listing]) -> CorrelationMatrix {
    let field = |l: &Listing, i: usize| match i {
        0 => l.bedrooms,
        1 => l.bathrooms,
        2 => l.area_sqft,
        _ => l.price,
    };
    let mut values = [[None; 4]; 4];
    for (i, row) in values.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = pearson(view.iter().map(|l| (field(*l, i), field(*l, j))));
        }
    }
    CorrelationMatrix {
        labels: CORRELATION_FIELDS,
        values,
    }
}

/// At most `max_points` listings having both area and price, taken at an even
/// stride so the sample is stable between frames.
pub fn area_price_sample(view: &[&Listing], max_points: usize) -> Vec<ScatterPoint> {
    let points: Vec<ScatterPoint> = view
        .iter()
        .filter_map(|l| {
            Some(ScatterPoint {
                area: l.area_sqft?,
                price: l.price?,
                bedrooms: l.bedrooms,
                bathrooms: l.bathrooms,
            })
        })
        .collect();
    if points.len() <= max_points {
        return points;
    }
    if max_points == 0 {
        return Vec::new();
    }
    let step = points.len() as f64 / max_points as f64;
    (0..max_points)
        .map(|i| points[(i as f64 * step) as usize])
        .collect()
}

/// Per-agent figures for agents with at least `min_count` priced listings,
/// most active first (ties by name).
pub fn agent_performance(view: &[&Listing], min_count: usize) -> Vec<AgentStat> {
    let mut rows: Vec<AgentStat> = group_by(view, |l| Some(l.agent_name.clone()))
        .into_iter()
        .filter_map(|(agent_name, members)| {
            let total = members.iter().filter(|l| l.price.is_some()).count();
            if total < min_count {
                return None;
            }
            let sold_count = members.iter().filter(|l| l.is_sold()).count();
            Some(AgentStat {
                agent_name,
                total,
                avg_price: mean(members.iter().map(|l| l.price)),
                avg_days_on_market: mean(members.iter().map(|l| l.days_on_market)),
                sold_count,
                sold_rate_pct: sold_count as f64 / total as f64 * 100.0,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.agent_name.cmp(&b.agent_name)));
    rows
}

/// Mean price for every age category, including empty ones.
pub fn price_by_age_category(view: &[&Listing]) -> Vec<AgeGroupPrice> {
    let groups = group_by(view, |l| l.age_category);
    AgeCategory::ALL
        .iter()
        .map(|c| {
            let members = groups.get(c).map(Vec::as_slice).unwrap_or(&[]);
            AgeGroupPrice {
                category: *c,
                mean_price: mean(members.iter().map(|l| l.price)),
                count: members.iter().filter(|l| l.price.is_some()).count(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// DashboardReport – everything one frame draws
// ---------------------------------------------------------------------------

/// All aggregates for one filtered view. Rebuilt whenever the filter changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub summary: MarketSummary,
    pub state_prices: Vec<GroupMean>,
    pub top_cities: Vec<GroupMean>,
    pub days_by_type: Vec<DaysOnMarketStat>,
    pub days_by_price_category: Vec<CategoryBox<PriceCategory>>,
    pub correlation: CorrelationMatrix,
    pub area_price: Vec<ScatterPoint>,
    /// All qualifying agents, most active first.
    pub agents: Vec<AgentStat>,
    pub price_by_age: Vec<AgeGroupPrice>,
    pub days_by_age_category: Vec<CategoryBox<AgeCategory>>,
}

impl DashboardReport {
    pub fn build(view: &[&Listing], config: &ReportConfig) -> Self {
        DashboardReport {
            summary: market_summary(view),
            state_prices: state_prices(view, config.min_state_listings),
            top_cities: top_cities(view, config.min_city_listings, config.top_n),
            days_by_type: days_on_market_by_type(view, config.min_type_listings),
            days_by_price_category: days_on_market_by_price_category(view),
            correlation: correlation_matrix(view),
            area_price: area_price_sample(view, config.scatter_points),
            agents: agent_performance(view, config.min_agent_listings),
            price_by_age: price_by_age_category(view),
            days_by_age_category: days_on_market_by_age_category(view),
        }
    }

    pub fn empty(config: &ReportConfig) -> Self {
        Self::build(&[], config)
    }

    /// The `n` agents with the most listings.
    pub fn top_agents(&self, n: usize) -> &[AgentStat] {
        &self.agents[..n.min(self.agents.len())]
    }
}
