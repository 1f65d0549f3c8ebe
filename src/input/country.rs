use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::source::baci::CountryCodeRow;

/// Long official names replaced so they fit on a chart axis.
const SHORT_NAMES: [(&str, &str); 8] = [
    ("China, Hong Kong SAR", "Hong Kong"),
    ("Bolivia (Plurinational State of)", "Bolivia"),
    ("Bosnia Herzegovina", "Bosnia"),
    ("Russian Federation", "Russia"),
    ("Rep. of Korea", "Korea"),
    ("Rep. of Moldova", "Moldova"),
    ("United Arab Emirates", "UAE"),
    ("United Kingdom", "UK"),
];

/// BACI's country table is UTF-8 that was decoded as Latin-1 and encoded again, so "Côte"
/// arrives as "CÃ´te". Undo that when every char fits in a byte and the bytes are valid UTF-8,
/// otherwise the name is returned untouched.
pub fn fix_mojibake(name: &str) -> String {
    let bytes: Option<Vec<u8>> = name.chars().map(|c| u8::try_from(c).ok()).collect();
    bytes
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| name.to_string())
}

pub fn short_name(name: &str) -> &str {
    SHORT_NAMES
        .iter()
        .find(|(long, _)| *long == name)
        .map(|(_, short)| *short)
        .unwrap_or(name)
}

/// Maps numeric country codes to display names.
#[derive(Clone, Debug, Default)]
pub struct CountryLookup {
    inner: HashMap<u32, String>,
}

impl CountryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the lookup from raw source rows, repairing encoding and shortening names.
    pub fn from_rows(rows: &[CountryCodeRow]) -> Self {
        let mut lookup = Self::new();
        for row in rows {
            let repaired = fix_mojibake(&row.country_name);
            lookup.insert(row.country_code, short_name(&repaired));
        }
        lookup
    }

    pub fn insert(&mut self, code: u32, name: impl Into<String>) {
        self.inner.insert(code, name.into());
    }

    pub fn get(&self, code: u32) -> Option<&str> {
        self.inner.get(&code).map(|name| name.as_str())
    }

    pub fn resolve(&self, code: u32) -> Result<&str> {
        self.get(code).ok_or(Error::UnknownCountry { code })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
