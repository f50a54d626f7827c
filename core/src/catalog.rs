use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Roster member identifier, used both as the correct-answer field of an
/// image and as guess input. Equality is exact string match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Label {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One entry of the external images.json document. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub url: String,
    pub member: Label,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Ordered collection of image records, loaded once per session and cycled
/// indefinitely via modular indexing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    images: Vec<ImageRecord>,
    roster: Vec<Label>,
}

impl Catalog {
    pub fn new(images: Vec<ImageRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut roster = Vec::new();
        for record in &images {
            if seen.insert(record.member.clone()) {
                roster.push(record.member.clone());
            }
        }
        Self { images, roster }
    }

    /// Parses the documented images.json shape: an array of records.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let images: Vec<ImageRecord> = serde_json::from_str(json)?;
        Ok(Self::new(images))
    }

    /// Uniform Fisher-Yates shuffle so repeated plays see varied ordering.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.images.shuffle(rng);
    }

    /// Image for the given round; the catalog cycles once exhausted.
    pub fn get(&self, round_index: u32) -> Option<&ImageRecord> {
        if self.images.is_empty() {
            return None;
        }
        self.images.get(round_index as usize % self.images.len())
    }

    /// Distinct members in first-appearance order; guess buttons are built
    /// from this once and stay fixed across rounds.
    pub fn roster(&self) -> &[Label] {
        &self.roster
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use rand::rngs::SmallRng;

    fn record(url: &str, member: &str) -> ImageRecord {
        ImageRecord {
            url: url.to_string(),
            member: member.into(),
            credit: None,
            license: None,
            year: None,
            source: None,
        }
    }

    #[test]
    fn parses_records_with_and_without_attribution() {
        let json = r#"[
            {"url": "a.jpg", "member": "A", "credit": "Someone", "license": "CC BY-SA 4.0", "year": 2019, "source": "https://example.com/a"},
            {"url": "b.jpg", "member": "B"}
        ]"#;

        let catalog = Catalog::from_json(json).unwrap();

        assert_eq!(catalog.len(), 2);
        let first = catalog.get(0).unwrap();
        assert_eq!(first.member, Label::from("A"));
        assert_eq!(first.credit.as_deref(), Some("Someone"));
        assert_eq!(first.year, Some(2019));
        let second = catalog.get(1).unwrap();
        assert_eq!(second.credit, None);
        assert_eq!(second.source, None);
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(Catalog::from_json("{\"not\": \"an array\"}").is_err());
        assert!(Catalog::from_json("[{\"url\": \"a.jpg\"}]").is_err());
    }

    #[test]
    fn roster_keeps_first_appearance_order_without_repeats() {
        let catalog = Catalog::new(alloc::vec![
            record("1.jpg", "C"),
            record("2.jpg", "A"),
            record("3.jpg", "C"),
            record("4.jpg", "B"),
        ]);

        assert_eq!(
            catalog.roster(),
            &[Label::from("C"), Label::from("A"), Label::from("B")]
        );
    }

    #[test]
    fn get_cycles_with_modular_indexing() {
        let catalog = Catalog::new(alloc::vec![record("1.jpg", "A"), record("2.jpg", "B")]);

        assert_eq!(catalog.get(0).unwrap().url, "1.jpg");
        assert_eq!(catalog.get(1).unwrap().url, "2.jpg");
        assert_eq!(catalog.get(2).unwrap().url, "1.jpg");
        assert_eq!(catalog.get(7).unwrap().url, "2.jpg");
    }

    #[test]
    fn get_on_empty_catalog_is_none() {
        let catalog = Catalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.get(0), None);
    }

    #[test]
    fn shuffle_keeps_the_same_records() {
        let records: Vec<_> = (0..16)
            .map(|i| record(&alloc::format!("{i}.jpg"), "A"))
            .collect();
        let mut catalog = Catalog::new(records.clone());

        catalog.shuffle(&mut SmallRng::seed_from_u64(7));

        let mut urls: Vec<_> = (0..16).map(|i| catalog.get(i).unwrap().url.clone()).collect();
        urls.sort();
        let mut expected: Vec<_> = records.into_iter().map(|r| r.url).collect();
        expected.sort();
        assert_eq!(urls, expected);
    }
}
