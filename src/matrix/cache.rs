use std::collections::HashMap;

use crate::error::Result;
use crate::input::trade::TradeRecord;
use crate::matrix::pivot::TradeMatrix;
use crate::matrix::rank::CountryRanking;
use crate::matrix::check_top_n;

/// Full K by K matrix over every ranked country, built once per dataset. Because both axes are
/// in rank order every Top-N view is the leading `top_n` square, so [TradeMatrixCache::slice]
/// only touches the cells it returns.
///
/// Nothing is mutated after construction, a cache can be shared between threads behind an `Arc`
/// or a plain reference.
#[derive(Clone, Debug)]
pub struct TradeMatrixCache {
    labels: Vec<String>,
    // Row-major, `values[row * labels.len() + col]`
    values: Vec<f64>,
}

impl TradeMatrixCache {
    pub fn new(records: &[TradeRecord], ranking: &CountryRanking) -> Self {
        let labels: Vec<String> = ranking.order().iter().map(|s| s.to_string()).collect();
        let size = labels.len();
        let index: HashMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(pos, name)| (name.as_str(), pos))
            .collect();

        let mut values = vec![0.0; size * size];
        for record in records {
            if let (Some(row), Some(col)) = (
                index.get(record.importer.as_str()),
                index.get(record.exporter.as_str()),
            ) {
                values[row * size + col] += record.quantity;
            }
        }

        Self { labels, values }
    }

    pub fn countries(&self) -> usize {
        self.labels.len()
    }

    /// Same result as [crate::matrix::build_matrix] with the ranking's order, in O(top_n²).
    pub fn slice(&self, top_n: usize) -> Result<TradeMatrix> {
        let size = self.labels.len();
        check_top_n(top_n, size)?;

        let labels = self.labels[..top_n].to_vec();
        let values = (0..top_n)
            .map(|row| self.values[row * size..row * size + top_n].to_vec())
            .collect();

        Ok(TradeMatrix {
            rows: labels.clone(),
            columns: labels,
            values,
        })
    }
}
