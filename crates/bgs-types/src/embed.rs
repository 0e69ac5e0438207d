//! Embed rendering types and report pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum faction fields per page. The header field repeated on every page
/// does not count against this limit.
pub const PAGE_FIELD_LIMIT: usize = 24;

/// Colour used for every embed the bot sends (magenta).
pub const EMBED_COLOR: u32 = 0xFF00FF;

/// One name/value pair on an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

/// One outbound embed, emitted as a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedPage {
    pub title: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub timestamp: DateTime<Utc>,
}

/// Rendering-ready report unit carrying its sort keys.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    /// Field title, possibly annotated (controlling faction).
    pub title: String,
    /// Multi-line formatted detail text.
    pub body: String,
    /// Plain entity name, used as the `name` sort key.
    pub name: String,
    /// Influence sort key, 0.0 to 1.0.
    pub influence: f64,
}

/// Split `records` into pages of at most [`PAGE_FIELD_LIMIT`] faction fields.
///
/// Every page re-states `header` as its first field, outside the cap. Page
/// count is `ceil(records / 24)`, so zero records yields zero pages. The
/// first page uses `base_title` verbatim; later pages append a continuation
/// marker with a 1-based page number.
pub fn paginate(
    base_title: &str,
    header: &EmbedField,
    records: &[FieldRecord],
    color: u32,
    timestamp: DateTime<Utc>,
) -> Vec<EmbedPage> {
    let page_count = records.len().div_ceil(PAGE_FIELD_LIMIT);
    let mut pages = Vec::with_capacity(page_count);
    for index in 0..page_count {
        let title = if index == 0 {
            base_title.to_string()
        } else {
            format!("{} - continued - Pg {}", base_title, index + 1)
        };
        let start = index * PAGE_FIELD_LIMIT;
        let end = (start + PAGE_FIELD_LIMIT).min(records.len());
        let mut fields = Vec::with_capacity(end - start + 1);
        fields.push(header.clone());
        for record in &records[start..end] {
            fields.push(EmbedField::new(record.title.clone(), record.body.clone()));
        }
        pages.push(EmbedPage {
            title,
            color,
            fields,
            timestamp,
        });
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(count: usize) -> Vec<FieldRecord> {
        (0..count)
            .map(|i| FieldRecord {
                title: format!("Faction {}", i),
                body: format!("body {}", i),
                name: format!("Faction {}", i),
                influence: 0.0,
            })
            .collect()
    }

    fn header() -> EmbedField {
        EmbedField::new("Qa'wakana", "Boom")
    }

    #[test]
    fn test_thirty_records_make_two_pages() {
        let pages = paginate("SYSTEM STATUS", &header(), &records(30), EMBED_COLOR, Utc::now());
        assert_eq!(pages.len(), 2);
        // page 0: header + 24 factions
        assert_eq!(pages[0].fields.len(), PAGE_FIELD_LIMIT + 1);
        // page 1: header + remaining 6 factions
        assert_eq!(pages[1].fields.len(), 7);
        assert_eq!(pages[0].fields[0], header());
        assert_eq!(pages[1].fields[0], header());
    }

    #[test]
    fn test_continuation_titles() {
        let pages = paginate("SYSTEM STATUS", &header(), &records(50), EMBED_COLOR, Utc::now());
        assert_eq!(pages[0].title, "SYSTEM STATUS");
        assert_eq!(pages[1].title, "SYSTEM STATUS - continued - Pg 2");
        assert_eq!(pages[2].title, "SYSTEM STATUS - continued - Pg 3");
    }

    #[test]
    fn test_exactly_one_full_page() {
        let pages = paginate("SYSTEM STATUS", &header(), &records(24), EMBED_COLOR, Utc::now());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].fields.len(), 25);
    }

    #[test]
    fn test_zero_records_yield_zero_pages() {
        let pages = paginate("SYSTEM STATUS", &header(), &[], EMBED_COLOR, Utc::now());
        assert!(pages.is_empty());
    }

    #[test]
    fn test_record_order_preserved_across_pages() {
        let pages = paginate("SYSTEM STATUS", &header(), &records(26), EMBED_COLOR, Utc::now());
        assert_eq!(pages[0].fields[1].name, "Faction 0");
        assert_eq!(pages[0].fields[24].name, "Faction 23");
        assert_eq!(pages[1].fields[1].name, "Faction 24");
        assert_eq!(pages[1].fields[2].name, "Faction 25");
    }
}
