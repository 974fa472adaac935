//! Rendering reports into output panels.
//!
//! The reporter never touches a document directly. It computes each report and
//! hands an HTML fragment to a [`RenderSink`], which owns one replaceable slot per
//! [`Panel`]. Slots are always overwritten wholesale.

use std::collections::BTreeMap;

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

use crate::aggregation::{currency_tally, language_tally, project_rows, region_tally, summary_stats};
use crate::model::{CountryRecord, CountryRow, SummaryStats, Tally};

/// A named output region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    /// Search results: name and population.
    Results,
    /// Population table.
    Population,
    /// Countries per region.
    Regions,
    /// Countries per language.
    Languages,
    /// Countries per currency.
    Currencies,
    /// Summary statistics text block.
    Stats,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Results,
        Panel::Population,
        Panel::Regions,
        Panel::Languages,
        Panel::Currencies,
        Panel::Stats,
    ];

    /// Element id of the panel on the page.
    pub fn element_id(&self) -> &'static str {
        match self {
            Panel::Results => "resultsTable",
            Panel::Population => "populationTable",
            Panel::Regions => "regionTable",
            Panel::Languages => "languageTable",
            Panel::Currencies => "currencyTable",
            Panel::Stats => "stats",
        }
    }
}

/// Output surface with one "replace contents" operation per panel.
pub trait RenderSink {
    fn replace(&mut self, panel: Panel, html: String);
}

/// In-memory sink holding the latest contents of every panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelSet {
    panels: BTreeMap<Panel, String>,
}

impl PanelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set with every panel present and empty.
    pub fn cleared() -> Self {
        let mut set = Self::new();
        clear_panels(&mut set);
        set
    }

    pub fn get(&self, panel: Panel) -> Option<&str> {
        self.panels.get(&panel).map(String::as_str)
    }

    /// True when every panel is missing or empty.
    pub fn is_blank(&self) -> bool {
        self.panels.values().all(String::is_empty)
    }
}

impl RenderSink for PanelSet {
    fn replace(&mut self, panel: Panel, html: String) {
        self.panels.insert(panel, html);
    }
}

/// Compute every report for `countries` and push each into its panel.
pub fn render_countries(countries: &[CountryRecord], locale: &Locale, sink: &mut impl RenderSink) {
    let rows = project_rows(countries, locale);
    sink.replace(Panel::Results, render_rows(&rows));
    sink.replace(Panel::Population, render_rows(&rows));
    sink.replace(Panel::Regions, render_tally(&region_tally(countries)));
    sink.replace(Panel::Languages, render_tally(&language_tally(countries)));
    sink.replace(Panel::Currencies, render_tally(&currency_tally(countries)));
    sink.replace(Panel::Stats, render_stats(&summary_stats(countries), locale));
}

/// Replace every panel with empty content.
pub fn clear_panels(sink: &mut impl RenderSink) {
    for panel in Panel::ALL {
        sink.replace(panel, String::new());
    }
}

/// Table body rows for name/population pairs.
pub fn render_rows(rows: &[CountryRow]) -> String {
    rows.iter()
        .map(|row| table_row(&row.name, &row.population))
        .collect()
}

/// Table body rows for a tally, in first-seen order.
pub fn render_tally(tally: &Tally) -> String {
    tally
        .iter()
        .map(|entry| table_row(&entry.label, &entry.count.to_string()))
        .collect()
}

/// The stats text block.
pub fn render_stats(stats: &SummaryStats, locale: &Locale) -> String {
    let regions = stats
        .regions
        .iter()
        .map(|r| escape_html(r))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Total Countries: {}<br>Total Population: {}<br>Average Population: {}<br>Unique Regions: {} ({})",
        stats.total_countries,
        stats.total_population.to_formatted_string(locale),
        format_decimal(stats.average_population, locale),
        stats.distinct_regions(),
        regions
    )
}

/// Format a non-negative value with grouped digits and 2 decimals.
pub fn format_decimal(value: f64, locale: &Locale) -> String {
    let fixed = format!("{:.2}", value.max(0.0));
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let whole: u64 = whole.parse().unwrap_or(0);
    format!(
        "{}{}{}",
        whole.to_formatted_string(locale),
        locale.decimal(),
        frac
    )
}

fn table_row(label: &str, value: &str) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td></tr>",
        escape_html(label),
        escape_html(value)
    )
}

/// Escape text for inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
