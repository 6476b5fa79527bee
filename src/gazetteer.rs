//! Place-name gazetteer and location resolution
//!
//! Keys are matched case-insensitively against the whole utterance. A key
//! only counts where it stands as a word or phrase of its own, so `tempe`
//! never fires inside "temperature" and `kansas` never inside "arkansas".
//!
//! When several keys match, the longest wins; ties go to the earliest
//! position in the text and then to the lexicographically smaller key.

mod us_places;

use crate::lookup::{Coordinates, LookupError, RegionCode};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Table construction failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GazetteerError {
    #[error("place key {key:?} is bound to both {first} and {second}")]
    ConflictingPlace {
        key: String,
        first: String,
        second: String,
    },
    #[error("region key {key:?} is bound to both {first} and {second}")]
    ConflictingRegion {
        key: String,
        first: String,
        second: String,
    },
    #[error("region alias {alias:?} refers to unknown code {code}")]
    UnknownRegionCode { alias: String, code: String },
    #[error("empty key for {0:?}")]
    EmptyKey(String),
    #[error("invalid entry {key:?}: {source}")]
    InvalidEntry {
        key: String,
        #[source]
        source: LookupError,
    },
}

/// A place resolved from free text
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub label: String,
    pub coordinates: Coordinates,
}

/// A region resolved from free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRegion {
    pub code: RegionCode,
    pub label: String,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    key: String,
    value: T,
}

/// Read-only lookup tables
#[derive(Debug, Clone)]
pub struct Gazetteer {
    places: Vec<Entry<ResolvedPlace>>,
    regions: Vec<Entry<ResolvedRegion>>,
    codes: BTreeMap<RegionCode, ResolvedRegion>,
}

impl Gazetteer {
    pub fn builder() -> GazetteerBuilder {
        GazetteerBuilder::default()
    }

    /// Built-in US cities and states
    pub fn us_default() -> Result<Self, GazetteerError> {
        let mut builder = Self::builder();
        for (label, latitude, longitude, aliases) in us_places::PLACES {
            builder = builder.place(label, *latitude, *longitude, aliases);
        }
        for (code, name) in us_places::REGIONS {
            builder = builder.region(code, name);
        }
        for (alias, code) in us_places::REGION_ALIASES {
            builder = builder.region_alias(alias, code);
        }
        builder.build()
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    pub fn region_count(&self) -> usize {
        self.codes.len()
    }

    /// Best place-key match in `text`
    pub fn find_place(&self, text: &str) -> Option<&ResolvedPlace> {
        best_match(&self.places, &text.to_lowercase())
    }

    /// Best region-name match in `text`, falling back to an upper-case
    /// two-letter code written as its own token (e.g. "alerts for TX")
    pub fn find_region(&self, text: &str) -> Option<&ResolvedRegion> {
        best_match(&self.regions, &text.to_lowercase()).or_else(|| {
            text.split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|token| token.len() == 2 && token.chars().all(|c| c.is_ascii_uppercase()))
                .filter_map(|token| RegionCode::new(token).ok())
                .find_map(|code| self.codes.get(&code))
        })
    }
}

fn best_match<'a, T>(entries: &'a [Entry<T>], haystack: &str) -> Option<&'a T> {
    entries
        .iter()
        .filter_map(|entry| word_position(haystack, &entry.key).map(|pos| (entry, pos)))
        .min_by(|(a, pos_a), (b, pos_b)| {
            Reverse(a.key.len())
                .cmp(&Reverse(b.key.len()))
                .then(pos_a.cmp(pos_b))
                .then_with(|| a.key.cmp(&b.key))
        })
        .map(|(entry, _)| &entry.value)
}

/// Byte offset of the first occurrence of `key` bounded by non-word chars
fn word_position(haystack: &str, key: &str) -> Option<usize> {
    haystack.match_indices(key).map(|(start, _)| start).find(|&start| {
        let before = haystack.get(..start).and_then(|s| s.chars().next_back());
        let after = haystack
            .get(start + key.len()..)
            .and_then(|s| s.chars().next());
        !matches!(before, Some(c) if c.is_alphanumeric())
            && !matches!(after, Some(c) if c.is_alphanumeric())
    })
}

fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Collects raw entries; all validation happens in [`GazetteerBuilder::build`]
#[derive(Debug, Default)]
pub struct GazetteerBuilder {
    places: Vec<(String, String, f64, f64)>,
    regions: Vec<(String, String, String)>,
    region_aliases: Vec<(String, String)>,
}

impl GazetteerBuilder {
    /// Add a place under its lowercased label plus any aliases
    pub fn place(mut self, label: &str, latitude: f64, longitude: f64, aliases: &[&str]) -> Self {
        for key in std::iter::once(label).chain(aliases.iter().copied()) {
            self.places
                .push((key.to_string(), label.to_string(), latitude, longitude));
        }
        self
    }

    /// Add a region keyed by its lowercased name
    pub fn region(mut self, code: &str, name: &str) -> Self {
        self.regions
            .push((name.to_string(), code.to_string(), name.to_string()));
        self
    }

    /// Extra key for a region added with [`GazetteerBuilder::region`]
    pub fn region_alias(mut self, alias: &str, code: &str) -> Self {
        self.region_aliases
            .push((alias.to_string(), code.to_string()));
        self
    }

    /// Identical duplicates collapse; a key bound to two different values
    /// is rejected
    pub fn build(self) -> Result<Gazetteer, GazetteerError> {
        let mut places: BTreeMap<String, ResolvedPlace> = BTreeMap::new();
        for (raw_key, label, latitude, longitude) in self.places {
            let key = normalize_key(&raw_key);
            if key.is_empty() {
                return Err(GazetteerError::EmptyKey(label));
            }
            let coordinates = Coordinates::new(latitude, longitude).map_err(|source| {
                GazetteerError::InvalidEntry {
                    key: key.clone(),
                    source,
                }
            })?;
            let place = ResolvedPlace { label, coordinates };
            match places.get(&key) {
                Some(existing) if *existing == place => {
                    tracing::debug!(key = %key, "Merged identical place entry");
                }
                Some(existing) => {
                    return Err(GazetteerError::ConflictingPlace {
                        key,
                        first: format!("{} ({})", existing.label, existing.coordinates),
                        second: format!("{} ({})", place.label, place.coordinates),
                    });
                }
                None => {
                    places.insert(key, place);
                }
            }
        }

        let mut codes: BTreeMap<RegionCode, ResolvedRegion> = BTreeMap::new();
        let mut regions: BTreeMap<String, ResolvedRegion> = BTreeMap::new();
        let mut insert_region =
            |key: String, region: ResolvedRegion| -> Result<(), GazetteerError> {
                match regions.get(&key) {
                    Some(existing) if *existing == region => Ok(()),
                    Some(existing) => Err(GazetteerError::ConflictingRegion {
                        key,
                        first: existing.code.to_string(),
                        second: region.code.to_string(),
                    }),
                    None => {
                        regions.insert(key, region);
                        Ok(())
                    }
                }
            };

        for (raw_key, code, label) in self.regions {
            let key = normalize_key(&raw_key);
            if key.is_empty() {
                return Err(GazetteerError::EmptyKey(code));
            }
            let code = RegionCode::new(&code).map_err(|source| GazetteerError::InvalidEntry {
                key: key.clone(),
                source,
            })?;
            let region = ResolvedRegion { code, label };
            if let Some(existing) = codes.get(&region.code) {
                if existing.label != region.label {
                    return Err(GazetteerError::ConflictingRegion {
                        key: region.code.to_string(),
                        first: existing.label.clone(),
                        second: region.label,
                    });
                }
            }
            codes.insert(region.code.clone(), region.clone());
            insert_region(key, region)?;
        }

        for (raw_alias, code) in self.region_aliases {
            let key = normalize_key(&raw_alias);
            if key.is_empty() {
                return Err(GazetteerError::EmptyKey(code));
            }
            let region = RegionCode::new(&code)
                .ok()
                .and_then(|c| codes.get(&c).cloned())
                .ok_or_else(|| GazetteerError::UnknownRegionCode {
                    alias: key.clone(),
                    code,
                })?;
            insert_region(key, region)?;
        }

        Ok(Gazetteer {
            places: sorted_entries(places),
            regions: sorted_entries(regions),
            codes,
        })
    }
}

fn sorted_entries<T>(map: BTreeMap<String, T>) -> Vec<Entry<T>> {
    let mut entries: Vec<Entry<T>> = map
        .into_iter()
        .map(|(key, value)| Entry { key, value })
        .collect();
    entries.sort_by(|a, b| {
        Reverse(a.key.len())
            .cmp(&Reverse(b.key.len()))
            .then_with(|| a.key.cmp(&b.key))
    });
    entries
}

/// Resolves places and regions mentioned in free text
#[derive(Debug, Clone)]
pub struct LocationResolver {
    gazetteer: Arc<Gazetteer>,
}

impl LocationResolver {
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self { gazetteer }
    }

    pub fn resolve_place(&self, text: &str) -> Option<ResolvedPlace> {
        let place = self.gazetteer.find_place(text).cloned();
        tracing::debug!(found = ?place.as_ref().map(|p| &p.label), "Resolved place");
        place
    }

    pub fn resolve_region(&self, text: &str) -> Option<ResolvedRegion> {
        let region = self.gazetteer.find_region(text).cloned();
        tracing::debug!(found = ?region.as_ref().map(|r| &r.code), "Resolved region");
        region
    }
}
