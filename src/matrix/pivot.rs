use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::trade::TradeRecord;
use crate::matrix::check_top_n;

/// Dense importer by exporter grid of traded quantity. `values[i][j]` is what `rows[i]` imported
/// from `columns[j]`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TradeMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl TradeMatrix {
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, importer: &str, exporter: &str) -> Option<f64> {
        let row = self.rows.iter().position(|name| name == importer)?;
        let col = self.columns.iter().position(|name| name == exporter)?;
        Some(self.values[row][col])
    }
}

/// Pivots `records` into a `top_n` square matrix over the first `top_n` countries of
/// `country_order`. Flows touching a country outside that set are ignored and repeated pairs are
/// summed.
pub fn build_matrix<S: AsRef<str>>(
    records: &[TradeRecord],
    country_order: &[S],
    top_n: usize,
) -> Result<TradeMatrix> {
    check_top_n(top_n, country_order.len())?;

    let labels: Vec<String> = country_order[..top_n]
        .iter()
        .map(|name| name.as_ref().to_string())
        .collect();
    let index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(pos, name)| (name.as_str(), pos))
        .collect();

    let mut values = vec![vec![0.0; top_n]; top_n];
    for record in records {
        if let (Some(row), Some(col)) = (
            index.get(record.importer.as_str()),
            index.get(record.exporter.as_str()),
        ) {
            values[*row][*col] += record.quantity;
        }
    }

    Ok(TradeMatrix {
        rows: labels.clone(),
        columns: labels,
        values,
    })
}
