//! Aggregation logic for computing country reports.
//!
//! Every function here is a single pass over a [`CountryList`] with no I/O and no
//! retained state. Calling one twice on the same list yields the same result.

use num_format::{Locale, ToFormattedString};

use crate::model::{CountryRecord, CountryReport, CountryRow, SummaryStats, Tally};

/// Display value for a missing population.
pub const NOT_AVAILABLE: &str = "N/A";

/// Project each country to a display row, preserving input order.
///
/// Populations are grouped by `locale` (e.g. `1,234,567` for English). An absent
/// or zero population renders as [`NOT_AVAILABLE`].
pub fn project_rows(countries: &[CountryRecord], locale: &Locale) -> Vec<CountryRow> {
    countries
        .iter()
        .map(|country| CountryRow {
            name: country.common_name.clone(),
            population: format_population(country.population, locale),
        })
        .collect()
}

/// Format a population for display.
pub fn format_population(population: Option<u64>, locale: &Locale) -> String {
    match population {
        Some(p) if p > 0 => p.to_formatted_string(locale),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Count countries per region. Missing regions are counted under "Unknown".
pub fn region_tally(countries: &[CountryRecord]) -> Tally {
    countries.iter().map(CountryRecord::region_label).collect()
}

/// Count how many countries list each language.
pub fn language_tally(countries: &[CountryRecord]) -> Tally {
    countries
        .iter()
        .flat_map(|c| c.languages.iter().map(String::as_str))
        .collect()
}

/// Count how many countries use each currency, by display name.
pub fn currency_tally(countries: &[CountryRecord]) -> Tally {
    countries
        .iter()
        .flat_map(|c| c.currencies.iter().map(String::as_str))
        .collect()
}

/// Compute headline statistics.
///
/// Absent populations count as 0 in the sum and the mean. The mean is rounded
/// to 2 decimal places and is 0 for an empty list.
pub fn summary_stats(countries: &[CountryRecord]) -> SummaryStats {
    let total_countries = countries.len();
    let total_population: u64 = countries.iter().map(|c| c.population.unwrap_or(0)).sum();

    let average_population = if total_countries > 0 {
        round2(total_population as f64 / total_countries as f64)
    } else {
        0.0
    };

    let regions = region_tally(countries)
        .iter()
        .map(|e| e.label.clone())
        .collect();

    SummaryStats {
        total_countries,
        total_population,
        average_population,
        regions,
    }
}

/// Compute every report for one country list.
pub fn build_report(countries: &[CountryRecord], locale: &Locale) -> CountryReport {
    CountryReport {
        rows: project_rows(countries, locale),
        regions: region_tally(countries),
        languages: language_tally(countries),
        currencies: currency_tally(countries),
        stats: summary_stats(countries),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(
        name: &str,
        population: Option<u64>,
        region: Option<&str>,
        languages: &[&str],
        currencies: &[&str],
    ) -> CountryRecord {
        CountryRecord {
            common_name: name.to_string(),
            official_name: None,
            population,
            region: region.map(str::to_string),
            languages: languages.iter().map(|s| s.to_string()).collect(),
            currencies: currencies.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sample() -> Vec<CountryRecord> {
        vec![
            country("Germany", Some(83_240_525), Some("Europe"), &["German"], &["Euro"]),
            country("Japan", Some(125_836_021), Some("Asia"), &["Japanese"], &["Japanese yen"]),
            country(
                "Belgium",
                Some(11_555_997),
                Some("Europe"),
                &["German", "French", "Dutch"],
                &["Euro"],
            ),
            country("Bouvet Island", None, None, &[], &[]),
        ]
    }

    #[test]
    fn test_testland_example() {
        let list = vec![country("Testland", Some(1000), Some("Testia"), &["Testish"], &[])];

        let regions = region_tally(&list);
        let languages = language_tally(&list);
        let currencies = currency_tally(&list);
        let stats = summary_stats(&list);

        assert_eq!(regions.len(), 1);
        assert_eq!(regions.get("Testia"), Some(1));
        assert_eq!(languages.len(), 1);
        assert_eq!(languages.get("Testish"), Some(1));
        assert!(currencies.is_empty());
        assert_eq!(stats.total_countries, 1);
        assert_eq!(stats.total_population, 1000);
        assert_eq!(stats.average_population, 1000.0);
        assert_eq!(stats.regions, vec!["Testia"]);
    }

    #[test]
    fn test_region_tally_sums_to_list_length() {
        let list = sample();

        let regions = region_tally(&list);

        assert_eq!(regions.total(), list.len());
        assert_eq!(regions.labels(), vec!["Europe", "Asia", "Unknown"]);
        assert_eq!(regions.get("Europe"), Some(2));
    }

    #[test]
    fn test_language_tally_flattens() {
        let languages = language_tally(&sample());

        assert_eq!(
            languages.labels(),
            vec!["German", "Japanese", "French", "Dutch"]
        );
        assert_eq!(languages.get("German"), Some(2));
    }

    #[test]
    fn test_country_without_languages_contributes_nothing() {
        let list = vec![country("Nowhere", Some(5), Some("Void"), &[], &[])];

        assert!(language_tally(&list).is_empty());
        assert!(currency_tally(&list).is_empty());
    }

    #[test]
    fn test_language_counted_once_per_country() {
        let raw: crate::model::RawCountry = serde_json::from_str(
            r#"{"name": {"common": "Twin"}, "languages": {"a": "L", "b": "L"}}"#,
        )
        .unwrap();
        let list = vec![CountryRecord::from(raw)];

        let languages = language_tally(&list);

        assert_eq!(languages.get("L"), Some(1));
        assert_eq!(languages.total(), 1);
    }

    #[test]
    fn test_currency_tally() {
        let currencies = currency_tally(&sample());

        assert_eq!(currencies.get("Euro"), Some(2));
        assert_eq!(currencies.get("Japanese yen"), Some(1));
        assert_eq!(currencies.len(), 2);
    }

    #[test]
    fn test_summary_stats_total_population_treats_absent_as_zero() {
        let list = sample();

        let stats = summary_stats(&list);

        assert_eq!(stats.total_countries, 4);
        assert_eq!(stats.total_population, 83_240_525 + 125_836_021 + 11_555_997);
        assert_eq!(stats.distinct_regions(), 3);
    }

    #[test]
    fn test_summary_stats_average_rounded() {
        let list = vec![
            country("A", Some(1), None, &[], &[]),
            country("B", Some(1), None, &[], &[]),
            country("C", Some(0), None, &[], &[]),
        ];

        let stats = summary_stats(&list);

        assert_eq!(stats.average_population, 0.67);
        assert_eq!(stats.regions, vec!["Unknown"]);
    }

    #[test]
    fn test_empty_list() {
        let report = build_report(&[], &Locale::en);

        assert!(report.rows.is_empty());
        assert!(report.regions.is_empty());
        assert!(report.languages.is_empty());
        assert!(report.currencies.is_empty());
        assert_eq!(report.stats.total_countries, 0);
        assert_eq!(report.stats.total_population, 0);
        assert_eq!(report.stats.average_population, 0.0);
        assert!(report.stats.regions.is_empty());
    }

    #[test]
    fn test_project_rows_formats_population() {
        let rows = project_rows(&sample(), &Locale::en);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].name, "Germany");
        assert_eq!(rows[0].population, "83,240,525");
        assert_eq!(rows[3].name, "Bouvet Island");
        assert_eq!(rows[3].population, NOT_AVAILABLE);
    }

    #[test]
    fn test_format_population_locale() {
        assert_eq!(format_population(Some(1_234_567), &Locale::de), "1.234.567");
        assert_eq!(format_population(Some(999), &Locale::en), "999");
        assert_eq!(format_population(Some(0), &Locale::en), NOT_AVAILABLE);
        assert_eq!(format_population(None, &Locale::en), NOT_AVAILABLE);
    }
}
