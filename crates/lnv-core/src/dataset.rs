//! Venue CSV ingestion. Text in, typed venues out; reading the file is the
//! caller's business.

use std::collections::BTreeSet;

use indexmap::IndexSet;

use crate::error::DatasetError;
use crate::venue::Venue;

/// Parse CSV text into venues. The first row holds headers; rows whose
/// cells are all blank are dropped; short rows read missing cells as "".
pub fn load_venues(csv_text: &str) -> Result<Vec<Venue>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut venues = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), record.get(i).unwrap_or("")));
        venues.push(Venue::from_fields(fields));
    }
    Ok(venues)
}

/// Unique tags across all venues in first-seen order, original case.
pub fn collect_vibes(venues: &[Venue]) -> IndexSet<String> {
    venues
        .iter()
        .flat_map(|v| v.vibe_tags.iter().cloned())
        .collect()
}

/// Sorted unique non-empty areas.
pub fn areas(venues: &[Venue]) -> Vec<String> {
    unique_sorted(venues.iter().map(|v| v.area.as_str()))
}

/// Sorted unique non-empty categories.
pub fn categories(venues: &[Venue]) -> Vec<String> {
    unique_sorted(venues.iter().map(|v| v.category.as_str()))
}

fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,Area,Category,Vibe Tags,Driving Distance,Typical Closing Time";

    #[test]
    fn test_simple_rows() {
        let csv = format!(
            "{HEADER}\nA,Ballard,Bar,chill,1 mi,2:00 AM\nB,Fremont,Club,dancey,2 mi,1:00 AM\n"
        );
        let venues = load_venues(&csv).unwrap();
        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].name, "A");
        assert_eq!(venues[1].area, "Fremont");
        assert_eq!(venues[1].closing_minutes, Some(60));
    }

    #[test]
    fn test_quoted_commas_and_escaped_quotes() {
        let csv = format!(
            "{HEADER}\n\"The \"\"Pub\"\"\",Ballard,Bar,\"chill, upscale\",1 mi,2:00 AM\n"
        );
        let venues = load_venues(&csv).unwrap();
        assert_eq!(venues[0].name, "The \"Pub\"");
        assert_eq!(venues[0].vibe_tags, vec!["chill", "upscale"]);
    }

    #[test]
    fn test_crlf_and_embedded_newline() {
        let csv = "Name,Area\r\n\"Two\nLines\",X\r\nB,Y\r\n";
        let venues = load_venues(csv).unwrap();
        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].name, "Two\nLines");
        assert_eq!(venues[1].area, "Y");
    }

    #[test]
    fn test_blank_rows_skipped_and_values_trimmed() {
        let csv = "Name, Area \n  A  ,  X \n,\n , \nB,Y";
        let venues = load_venues(csv).unwrap();
        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].name, "A");
        assert_eq!(venues[0].area, "X");
    }

    #[test]
    fn test_short_rows_fill_blank() {
        let csv = format!("{HEADER}\nA,Ballard\n");
        let venues = load_venues(&csv).unwrap();
        assert_eq!(venues[0].category, "");
        assert_eq!(venues[0].distance_miles, None);
    }

    #[test]
    fn test_empty_and_header_only() {
        assert!(load_venues("").unwrap().is_empty());
        assert!(load_venues(HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_collect_vibes() {
        let venues = vec![
            Venue::new("A", "", "", "chill, Dancey"),
            Venue::new("B", "", "", "chill, rooftop"),
            Venue::new("C", "", "", ""),
        ];
        let vibes: Vec<String> = collect_vibes(&venues).into_iter().collect();
        assert_eq!(vibes, vec!["chill", "Dancey", "rooftop"]);
        assert!(collect_vibes(&[]).is_empty());
    }

    #[test]
    fn test_areas_and_categories() {
        let venues = vec![
            Venue::new("A", "Fremont", "Bar", ""),
            Venue::new("B", "Ballard", "Club", ""),
            Venue::new("C", "Fremont", "", ""),
        ];
        assert_eq!(areas(&venues), vec!["Ballard", "Fremont"]);
        assert_eq!(categories(&venues), vec!["Bar", "Club"]);
    }
}
