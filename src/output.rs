//! Serializable views handed to renderers, and JSON export.
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::input::trade::TradeDataset;
use crate::matrix::CountryRanking;

/// A record annotated with the rank of both partners, the row format front-ends filter on.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exporter: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importer: Option<u32>,
    pub value: f64,
    pub quantity: f64,
    pub exporter_name: String,
    pub importer_name: String,
    pub exporter_rank: usize,
    pub importer_rank: usize,
}

/// Every record of `dataset` with partner ranks, sorted by exporter rank then importer rank.
/// `None` when a partner is missing from `ranking`, which means it was built from other records.
pub fn ranked_records(
    dataset: &TradeDataset,
    ranking: &CountryRanking,
) -> Option<Vec<RankedRecord>> {
    let mut ranked = Vec::with_capacity(dataset.len());
    for (pos, record) in dataset.records().iter().enumerate() {
        let origin = dataset.origin(pos);
        ranked.push(RankedRecord {
            year: origin.map(|o| o.year),
            product: origin.map(|o| o.product),
            exporter: origin.map(|o| o.exporter_code),
            importer: origin.map(|o| o.importer_code),
            value: record.value,
            quantity: record.quantity,
            exporter_name: record.exporter.clone(),
            importer_name: record.importer.clone(),
            exporter_rank: ranking.rank_of(&record.exporter)?,
            importer_rank: ranking.rank_of(&record.importer)?,
        });
    }
    ranked.sort_by_key(|r| (r.exporter_rank, r.importer_rank));
    Some(ranked)
}

/// Writes `value` as JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ranked_records, write_json};
    use crate::input::trade::{TradeDataset, TradeDatasetBuilder};
    use crate::matrix::{build_matrix, rank_countries, TradeMatrix};

    fn dataset() -> TradeDataset {
        let mut builder = TradeDatasetBuilder::new();
        builder.add_flow("C", "A", 1.0);
        builder.add_flow("A", "B", 10.0);
        builder.add_flow("B", "A", 5.0);
        builder.build()
    }

    #[test]
    fn test_that_records_are_sorted_by_rank() {
        let dataset = dataset();
        let ranking = rank_countries(dataset.records());
        let ranked = ranked_records(&dataset, &ranking).unwrap();

        let pairs: Vec<(usize, usize)> = ranked
            .iter()
            .map(|r| (r.exporter_rank, r.importer_rank))
            .collect();
        assert_eq!(pairs, vec![(1, 2), (2, 1), (3, 1)]);
        assert_eq!(ranked[0].exporter_name, "A");
        assert_eq!(ranked[0].exporter, None);
    }

    #[test]
    fn test_that_foreign_ranking_is_rejected() {
        let mut builder = TradeDatasetBuilder::new();
        builder.add_flow("Q", "R", 1.0);
        let other = rank_countries(builder.build().records());
        assert!(ranked_records(&dataset(), &other).is_none());
    }

    #[test]
    fn test_that_matrix_json_round_trips() {
        let dataset = dataset();
        let ranking = rank_countries(dataset.records());
        let matrix = build_matrix(dataset.records(), &ranking.order(), 3).unwrap();

        let path = std::env::temp_dir()
            .join(format!("tradematrix-output-{}", std::process::id()))
            .join("trade_matrix.json");
        write_json(&path, &matrix).unwrap();
        let read: TradeMatrix =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();

        assert_eq!(read, matrix);
    }
}
