use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, Grid, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Plot, Points};

use crate::analytics::report::{CategoryBox, DashboardReport};
use crate::color::{self, ColorMap};
use crate::state::AppState;
use crate::ui::table;

const PLOT_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render metrics, the five report sections and the optional detail table.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
            Some(msg) => {
                ui.heading(RichText::new(msg).color(Color32::RED));
            }
            None => {
                ui.heading("Open a listings CSV to begin  (File → Open…)");
            }
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let report = &state.report;
            metric_cards(ui, report);
            ui.separator();

            section(ui, "1. Market prices");
            ui.columns(2, |cols| {
                state_price_chart(&mut cols[0], report);
                top_city_chart(&mut cols[1], report);
            });
            ui.separator();

            section(ui, "2. Sales efficiency");
            ui.columns(2, |cols| {
                days_by_type_chart(&mut cols[0], report);
                category_box_chart(
                    &mut cols[1],
                    "dom_by_price_category",
                    "Days on market by price category",
                    &report.days_by_price_category,
                );
            });
            ui.separator();

            section(ui, "3. Property preferences");
            ui.columns(2, |cols| {
                correlation_heatmap(&mut cols[0], report);
                area_price_scatter(&mut cols[1], report);
            });
            ui.separator();

            section(ui, "4. Agent performance");
            ui.columns(2, |cols| {
                top_agent_chart(&mut cols[0], report);
                agent_scatter(&mut cols[1], report);
            });
            ui.separator();

            section(ui, "5. Building age");
            ui.columns(2, |cols| {
                age_price_chart(&mut cols[0], report);
                category_box_chart(
                    &mut cols[1],
                    "dom_by_age_category",
                    "Days on market by building age",
                    &report.days_by_age_category,
                );
            });
            ui.separator();

            ui.checkbox(&mut state.show_table, "Show detail table");
            if state.show_table {
                table::detail_table(ui, &*state);
            }
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(4.0);
    ui.heading(title);
    ui.add_space(4.0);
}

fn no_data(ui: &mut Ui) {
    ui.weak("No data for the current filters.");
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

fn metric_cards(ui: &mut Ui, report: &DashboardReport) {
    let s = &report.summary;
    let cards = [
        ("Average price", format_money(s.mean_price)),
        (
            "Average days on market",
            s.mean_days_on_market
                .map(|d| format!("{d:.0} days"))
                .unwrap_or_else(|| "–".into()),
        ),
        ("Total properties", group_thousands(s.total as u64)),
        (
            "Sold rate",
            s.sold_rate_pct
                .map(|r| format!("{r:.1}%"))
                .unwrap_or_else(|| "–".into()),
        ),
    ];
    ui.columns(cards.len(), |cols| {
        for (col, (title, value)) in cols.iter_mut().zip(cards) {
            col.group(|ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(title);
                ui.heading(RichText::new(value).strong());
            });
        }
    });
}

/// `1234567.4` → `"$1,234,567"`, missing → `"–"`.
pub fn format_money(v: Option<f64>) -> String {
    match v {
        Some(v) if v < 0.0 => format!("-${}", group_thousands((-v).round() as u64)),
        Some(v) => format!("${}", group_thousands(v.round() as u64)),
        None => "–".into(),
    }
}

pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Category axes
// ---------------------------------------------------------------------------

fn label_at(labels: &[String], position: f64) -> String {
    let idx = position.round();
    if (position - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Axis formatter printing `labels[i]` at integer position `i`.
fn tick_labels(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| label_at(&labels, mark.value)
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

// ---------------------------------------------------------------------------
// 1. Market prices
// ---------------------------------------------------------------------------

fn state_price_chart(ui: &mut Ui, report: &DashboardReport) {
    ui.strong("Average price by state");
    if report.state_prices.is_empty() {
        no_data(ui);
        return;
    }
    let (lo, hi) = value_range(report.state_prices.iter().map(|r| r.mean));
    let bars: Vec<Bar> = report
        .state_prices
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.mean)
                .name(format!("{} ({} listings)", r.key, r.count))
                .fill(color::sequential_in(r.mean, lo, hi))
                .width(0.7)
        })
        .collect();
    let labels = report.state_prices.iter().map(|r| r.key.clone()).collect();

    Plot::new("state_prices")
        .height(PLOT_HEIGHT)
        .x_axis_formatter(tick_labels(labels))
        .y_axis_label("Average price ($)")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Average price"));
        });
}

fn top_city_chart(ui: &mut Ui, report: &DashboardReport) {
    ui.strong("Most expensive cities");
    if report.top_cities.is_empty() {
        no_data(ui);
        return;
    }
    let (lo, hi) = value_range(report.top_cities.iter().map(|r| r.mean));
    let bars: Vec<Bar> = report
        .top_cities
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.mean)
                .name(&r.key)
                .fill(color::sequential_in(r.mean, lo, hi))
                .width(0.7)
        })
        .collect();
    let labels = report.top_cities.iter().map(|r| r.key.clone()).collect();

    Plot::new("top_cities")
        .height(PLOT_HEIGHT)
        .y_axis_formatter(tick_labels(labels))
        .x_axis_label("Average price ($)")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Average price"));
        });
}

// ---------------------------------------------------------------------------
// 2. Sales efficiency
// ---------------------------------------------------------------------------

fn days_by_type_chart(ui: &mut Ui, report: &DashboardReport) {
    ui.strong("Days on market by property type");
    if report.days_by_type.is_empty() {
        no_data(ui);
        return;
    }
    let mean_bars: Vec<Bar> = report
        .days_by_type
        .iter()
        .enumerate()
        .map(|(i, r)| Bar::new(i as f64 - 0.2, r.mean).width(0.4).name(&r.property_type))
        .collect();
    let median_bars: Vec<Bar> = report
        .days_by_type
        .iter()
        .enumerate()
        .map(|(i, r)| Bar::new(i as f64 + 0.2, r.median).width(0.4).name(&r.property_type))
        .collect();
    let labels = report
        .days_by_type
        .iter()
        .map(|r| r.property_type.clone())
        .collect();

    Plot::new("days_by_type")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(tick_labels(labels))
        .y_axis_label("Days on market")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(mean_bars)
                    .name("Mean")
                    .color(Color32::LIGHT_BLUE),
            );
            plot_ui.bar_chart(
                BarChart::new(median_bars)
                    .name("Median")
                    .color(Color32::DARK_BLUE),
            );
        });
}

fn category_box_chart<C>(ui: &mut Ui, id: &str, title: &str, boxes: &[CategoryBox<C>])
where
    C: Copy + std::fmt::Display,
{
    ui.strong(title);
    if boxes.is_empty() {
        no_data(ui);
        return;
    }
    let labels: Vec<String> = boxes.iter().map(|b| b.category.to_string()).collect();
    let colors = ColorMap::new(labels.iter().map(String::as_str));
    let elems: Vec<BoxElem> = boxes
        .iter()
        .zip(&labels)
        .enumerate()
        .map(|(i, (b, label))| {
            let s = &b.summary;
            let c = colors.color_for(label);
            BoxElem::new(
                i as f64,
                BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
            )
            .name(format!("{label} (n = {})", s.count))
            .fill(c.linear_multiply(0.4))
            .stroke(egui::Stroke::new(1.5, c))
            .box_width(0.6)
        })
        .collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_formatter(tick_labels(labels))
        .y_axis_label("Days on market")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(elems).name("Days on market"));
        });
}

// ---------------------------------------------------------------------------
// 3. Property preferences
// ---------------------------------------------------------------------------

fn correlation_heatmap(ui: &mut Ui, report: &DashboardReport) {
    ui.strong("Correlation: bedrooms, bathrooms, area, price");
    let m = &report.correlation;
    Grid::new("correlation_grid")
        .spacing([4.0, 4.0])
        .min_col_width(80.0)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for label in m.labels {
                ui.strong(label);
            }
            ui.end_row();

            for (label, row) in m.labels.iter().zip(&m.values) {
                ui.strong(*label);
                for cell in row {
                    let (text, bg) = match cell {
                        Some(r) => (format!("{r:+.2}"), color::diverging(*r)),
                        None => ("n/a".to_string(), Color32::DARK_GRAY),
                    };
                    ui.label(
                        RichText::new(format!("  {text}  "))
                            .monospace()
                            .background_color(bg)
                            .color(Color32::BLACK),
                    );
                }
                ui.end_row();
            }
        });
}

fn area_price_scatter(ui: &mut Ui, report: &DashboardReport) {
    ui.strong("Living area vs price");
    if report.area_price.is_empty() {
        no_data(ui);
        return;
    }

    // One series per bedroom count so the legend doubles as a colour key.
    let mut by_bedrooms: BTreeMap<Option<u32>, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &report.area_price {
        by_bedrooms
            .entry(p.bedrooms.map(|b| b as u32))
            .or_default()
            .push([p.area, p.price]);
    }
    let (lo, hi) = value_range(by_bedrooms.keys().flatten().map(|b| *b as f64));

    Plot::new("area_price")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Living area (sqft)")
        .y_axis_label("Price ($)")
        .show(ui, |plot_ui| {
            for (beds, points) in by_bedrooms {
                let (name, c) = match beds {
                    Some(b) => (format!("{b} bd"), color::sequential_in(b as f64, lo, hi)),
                    None => ("unknown bd".to_string(), Color32::GRAY),
                };
                plot_ui.points(Points::new(points).name(name).color(c).radius(2.5));
            }
        });
}

// ---------------------------------------------------------------------------
// 4. Agent performance
// ---------------------------------------------------------------------------

fn top_agent_chart(ui: &mut Ui, report: &DashboardReport) {
    ui.strong("Top 10 agents by listings");
    let top = report.top_agents(10);
    if top.is_empty() {
        no_data(ui);
        return;
    }
    // Largest at the top of a horizontal chart.
    let ordered: Vec<_> = top.iter().rev().collect();
    let (lo, hi) = value_range(ordered.iter().map(|a| a.total as f64));
    let bars: Vec<Bar> = ordered
        .iter()
        .enumerate()
        .map(|(i, a)| {
            Bar::new(i as f64, a.total as f64)
                .name(&a.agent_name)
                .fill(color::sequential_in(a.total as f64, lo, hi))
                .width(0.7)
        })
        .collect();
    let labels = ordered.iter().map(|a| a.agent_name.clone()).collect();

    Plot::new("top_agents")
        .height(PLOT_HEIGHT)
        .y_axis_formatter(tick_labels(labels))
        .x_axis_label("Listings")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Listings"));
        });
}

fn agent_scatter(ui: &mut Ui, report: &DashboardReport) {
    ui.strong("Sold rate vs average days on market");
    let agents: Vec<_> = report
        .agents
        .iter()
        .filter_map(|a| Some((a, a.avg_days_on_market?)))
        .collect();
    if agents.is_empty() {
        no_data(ui);
        return;
    }
    let max_total = agents.iter().map(|(a, _)| a.total).max().unwrap_or(1) as f32;

    Plot::new("agent_scatter")
        .height(PLOT_HEIGHT)
        .x_axis_label("Average days on market")
        .y_axis_label("Sold rate (%)")
        .show(ui, |plot_ui| {
            for (a, days) in agents {
                let radius = 2.0 + 8.0 * a.total as f32 / max_total;
                plot_ui.points(
                    Points::new(vec![[days, a.sold_rate_pct]])
                        .name(format!("{} ({} listings)", a.agent_name, a.total))
                        .color(Color32::from_rgb(0x63, 0x6e, 0xfa))
                        .radius(radius),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// 5. Building age
// ---------------------------------------------------------------------------

fn age_price_chart(ui: &mut Ui, report: &DashboardReport) {
    ui.strong("Average price by building age");
    let present: Vec<f64> = report.price_by_age.iter().filter_map(|r| r.mean_price).collect();
    if present.is_empty() {
        no_data(ui);
        return;
    }
    let (lo, hi) = value_range(present.into_iter());
    let bars: Vec<Bar> = report
        .price_by_age
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            let mean = r.mean_price?;
            Some(
                Bar::new(i as f64, mean)
                    .name(format!("{} ({} listings)", r.category, r.count))
                    .fill(color::sequential_in(mean, lo, hi))
                    .width(0.7),
            )
        })
        .collect();
    let labels = report
        .price_by_age
        .iter()
        .map(|r| r.category.to_string())
        .collect();

    Plot::new("age_prices")
        .height(PLOT_HEIGHT)
        .x_axis_formatter(tick_labels(labels))
        .y_axis_label("Average price ($)")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Average price"));
        });
}
