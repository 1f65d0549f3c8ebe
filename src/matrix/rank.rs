use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::trade::TradeRecord;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CountryRank {
    pub country: String,
    pub rank: usize,
    pub export_total: f64,
    pub import_total: f64,
    pub total: f64,
}

/// Countries ordered by rank, rank 1 first.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct CountryRanking {
    ranks: Vec<CountryRank>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl CountryRanking {
    fn from_ranks(ranks: Vec<CountryRank>) -> Self {
        let positions = ranks
            .iter()
            .enumerate()
            .map(|(pos, rank)| (rank.country.clone(), pos))
            .collect();
        Self { ranks, positions }
    }

    pub fn ranks(&self) -> &[CountryRank] {
        &self.ranks
    }

    pub fn rank_of(&self, country: &str) -> Option<usize> {
        self.positions.get(country).map(|pos| pos + 1)
    }

    pub fn get(&self, country: &str) -> Option<&CountryRank> {
        self.positions.get(country).map(|pos| &self.ranks[*pos])
    }

    /// Country names in rank order, the axis order used by [crate::matrix::build_matrix].
    pub fn order(&self) -> Vec<&str> {
        self.ranks.iter().map(|rank| rank.country.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Ranks every country that appears on either side of a flow by exports plus imports, largest
/// first. Ties never share a rank: the country seen first in `records` (exporter before importer
/// within a record) wins.
pub fn rank_countries(records: &[TradeRecord]) -> CountryRanking {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64, f64)> = Vec::new();

    for record in records {
        let exporter = *seen.entry(record.exporter.as_str()).or_insert_with(|| {
            totals.push((record.exporter.as_str(), 0.0, 0.0));
            totals.len() - 1
        });
        totals[exporter].1 += record.quantity;

        let importer = *seen.entry(record.importer.as_str()).or_insert_with(|| {
            totals.push((record.importer.as_str(), 0.0, 0.0));
            totals.len() - 1
        });
        totals[importer].2 += record.quantity;
    }

    // sort_by is stable so equal totals keep first-seen order
    totals.sort_by(|a, b| (b.1 + b.2).total_cmp(&(a.1 + a.2)));

    let ranks = totals
        .into_iter()
        .enumerate()
        .map(|(pos, (country, export_total, import_total))| CountryRank {
            country: country.to_string(),
            rank: pos + 1,
            export_total,
            import_total,
            total: export_total + import_total,
        })
        .collect();
    CountryRanking::from_ranks(ranks)
}
