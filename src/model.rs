//! Data models for Country Stats.
//!
//! Two layers live here:
//!
//! - **Wire types** (`Raw*`) mirror the JSON returned by the REST Countries API.
//!   Only the fields the reports read are modelled; everything else is ignored.
//! - **Domain types** ([`CountryRecord`], [`Tally`], [`SummaryStats`], ...) are what
//!   the aggregation and rendering layers work with.
//!
//! Every derived structure is computed fresh from one [`CountryList`] and is
//! never carried over to another fetch.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Label used when a country has no region or a currency has no name.
pub const UNKNOWN_LABEL: &str = "Unknown";

// ============================================================================
// Wire types
// ============================================================================

/// A country object as returned by `/all` or `/name/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
    pub name: RawCountryName,

    #[serde(default)]
    pub population: Option<u64>,

    #[serde(default)]
    pub region: Option<String>,

    /// Language code to language name, e.g. `{"deu": "German"}`.
    #[serde(default)]
    pub languages: Option<Map<String, Value>>,

    /// Currency code to currency object, e.g. `{"EUR": {"name": "Euro", "symbol": "€"}}`.
    #[serde(default)]
    pub currencies: Option<Map<String, Value>>,
}

/// The `name` object of a country.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountryName {
    pub common: String,

    #[serde(default)]
    pub official: Option<String>,
}

// ============================================================================
// Domain types
// ============================================================================

/// One country, reduced to the attributes the reports use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub common_name: String,

    #[serde(default)]
    pub official_name: Option<String>,

    /// `None` when the API omitted the field.
    #[serde(default)]
    pub population: Option<u64>,

    #[serde(default)]
    pub region: Option<String>,

    /// Distinct language names in wire order. Empty when the country lists none.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Distinct currency display names in wire order. Empty when the country lists none.
    #[serde(default)]
    pub currencies: Vec<String>,
}

/// Ordered sequence of countries from a single fetch.
pub type CountryList = Vec<CountryRecord>;

impl CountryRecord {
    /// Region label, falling back to [`UNKNOWN_LABEL`] for absent or blank regions.
    pub fn region_label(&self) -> &str {
        match self.region.as_deref() {
            Some(region) if !region.is_empty() => region,
            _ => UNKNOWN_LABEL,
        }
    }
}

impl From<RawCountry> for CountryRecord {
    fn from(raw: RawCountry) -> Self {
        let languages = raw
            .languages
            .map(|langs| {
                langs
                    .into_iter()
                    .filter_map(|(_, name)| match name {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
            })
            .map(distinct_in_order)
            .unwrap_or_default();

        let currencies = raw
            .currencies
            .map(|currs| {
                currs
                    .into_iter()
                    .map(|(_, currency)| {
                        currency
                            .get("name")
                            .and_then(Value::as_str)
                            .unwrap_or(UNKNOWN_LABEL)
                            .to_string()
                    })
                    .collect::<Vec<_>>()
            })
            .map(distinct_in_order)
            .unwrap_or_default();

        Self {
            common_name: raw.name.common,
            official_name: raw.name.official,
            population: raw.population,
            region: raw.region,
            languages,
            currencies,
        }
    }
}

/// Drop repeated names, keeping the first occurrence.
///
/// A country lists each language or currency name at most once, even when the
/// API maps several codes to the same name.
fn distinct_in_order(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// A single `label -> count` pair of a [`Tally`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub label: String,
    pub count: usize,
}

/// Occurrence counts per category label.
///
/// Iteration yields labels in the order they were first seen, not sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TallyEntry>", into = "Vec<TallyEntry>")]
pub struct Tally {
    entries: Vec<TallyEntry>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `label`.
    pub fn add(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(TallyEntry {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Count for `label`, if it was seen at all.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.index.get(label).map(|&pos| self.entries[pos].count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TallyEntry> {
        self.entries.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}

impl From<Vec<TallyEntry>> for Tally {
    fn from(entries: Vec<TallyEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(pos, e)| (e.label.clone(), pos))
            .collect();
        Self { entries, index }
    }
}

impl From<Tally> for Vec<TallyEntry> {
    fn from(tally: Tally) -> Self {
        tally.entries
    }
}

impl<'a> FromIterator<&'a str> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for label in iter {
            tally.add(label);
        }
        tally
    }
}

/// One display row: country name and formatted population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRow {
    pub name: String,
    /// Grouped digits (e.g. `"83,240,525"`) or `"N/A"`.
    pub population: String,
}

/// Headline numbers for one country list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_countries: usize,

    /// Sum of populations, absent populations counting as 0.
    pub total_population: u64,

    /// Mean population rounded to 2 decimal places; 0 for an empty list.
    pub average_population: f64,

    /// Distinct region labels in first-seen order.
    pub regions: Vec<String>,
}

impl SummaryStats {
    /// Number of distinct regions.
    pub fn distinct_regions(&self) -> usize {
        self.regions.len()
    }
}

/// Every derived report for one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryReport {
    pub rows: Vec<CountryRow>,
    pub regions: Tally,
    pub languages: Tally,
    pub currencies: Tally,
    pub stats: SummaryStats,
}

/// Response for the JSON report endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub generated_at: DateTime<Utc>,
    pub report: CountryReport,
}

/// Query parameters shared by the trigger endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Free-text country name. Only read by the search endpoints.
    #[serde(default)]
    pub name: Option<String>,

    /// Request sequence token echoed back to the page.
    #[serde(default)]
    pub seq: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CountryRecord {
        serde_json::from_str::<RawCountry>(json).unwrap().into()
    }

    #[test]
    fn test_record_from_full_wire_object() {
        let record = parse(
            r#"{
                "name": {"common": "Switzerland", "official": "Swiss Confederation"},
                "population": 8654622,
                "region": "Europe",
                "languages": {"fra": "French", "gsw": "Swiss German", "ita": "Italian", "roh": "Romansh"},
                "currencies": {"CHF": {"name": "Swiss franc", "symbol": "Fr."}}
            }"#,
        );

        assert_eq!(record.common_name, "Switzerland");
        assert_eq!(record.official_name.as_deref(), Some("Swiss Confederation"));
        assert_eq!(record.population, Some(8654622));
        assert_eq!(record.region_label(), "Europe");
        assert_eq!(
            record.languages,
            vec!["French", "Swiss German", "Italian", "Romansh"]
        );
        assert_eq!(record.currencies, vec!["Swiss franc"]);
    }

    #[test]
    fn test_record_keeps_wire_order_of_languages() {
        let record = parse(
            r#"{"name": {"common": "X"}, "languages": {"zul": "Zulu", "afr": "Afrikaans"}}"#,
        );

        assert_eq!(record.languages, vec!["Zulu", "Afrikaans"]);
    }

    #[test]
    fn test_repeated_names_listed_once() {
        let record = parse(
            r#"{
                "name": {"common": "X"},
                "languages": {"a": "Lingua", "b": "Other", "c": "Lingua"},
                "currencies": {"AAA": {"name": "Coin"}, "BBB": {"name": "Coin"}}
            }"#,
        );

        assert_eq!(record.languages, vec!["Lingua", "Other"]);
        assert_eq!(record.currencies, vec!["Coin"]);
    }

    #[test]
    fn test_record_from_sparse_wire_object() {
        let record = parse(r#"{"name": {"common": "Bouvet Island"}}"#);

        assert_eq!(record.population, None);
        assert_eq!(record.region_label(), UNKNOWN_LABEL);
        assert!(record.languages.is_empty());
        assert!(record.currencies.is_empty());
    }

    #[test]
    fn test_currency_without_name_is_unknown() {
        let record = parse(r#"{"name": {"common": "X"}, "currencies": {"XXX": {"symbol": "¤"}}}"#);

        assert_eq!(record.currencies, vec![UNKNOWN_LABEL]);
    }

    #[test]
    fn test_blank_region_is_unknown() {
        let record = parse(r#"{"name": {"common": "X"}, "region": ""}"#);

        assert_eq!(record.region_label(), UNKNOWN_LABEL);
    }

    #[test]
    fn test_tally_first_seen_order() {
        let tally: Tally = ["b", "a", "b", "c", "a", "b"].into_iter().collect();

        assert_eq!(tally.labels(), vec!["b", "a", "c"]);
        assert_eq!(tally.get("b"), Some(3));
        assert_eq!(tally.get("a"), Some(2));
        assert_eq!(tally.get("c"), Some(1));
        assert_eq!(tally.get("d"), None);
        assert_eq!(tally.total(), 6);
    }

    #[test]
    fn test_tally_serializes_as_list() {
        let tally: Tally = ["Europe", "Asia", "Europe"].into_iter().collect();

        let json = serde_json::to_value(&tally).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"label": "Europe", "count": 2},
                {"label": "Asia", "count": 1}
            ])
        );
    }
}
