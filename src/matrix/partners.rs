use std::collections::{HashMap, HashSet};

use crate::input::trade::TradeRecord;

/// Name of the synthetic partner that absorbs every country outside the top set.
pub const REST_OF_WORLD: &str = "ROW";

#[derive(Clone, Copy, Debug)]
enum Side {
    Exporter,
    Importer,
}

impl Side {
    fn of(self, record: &TradeRecord) -> &str {
        match self {
            Side::Exporter => &record.exporter,
            Side::Importer => &record.importer,
        }
    }

    fn other(self) -> Side {
        match self {
            Side::Exporter => Side::Importer,
            Side::Importer => Side::Exporter,
        }
    }
}

fn top_partners(records: &[TradeRecord], side: Side, n: usize) -> HashSet<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64)> = Vec::new();
    for record in records {
        let name = side.of(record);
        let pos = *seen.entry(name).or_insert_with(|| {
            totals.push((name, 0.0));
            totals.len() - 1
        });
        totals[pos].1 += record.quantity;
    }
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals
        .into_iter()
        .take(n)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Replaces every `side` partner outside `keep` with [REST_OF_WORLD], summing the folded flows
/// per counterpart. Kept records stay in order and folded records follow.
fn fold(records: Vec<TradeRecord>, keep: &HashSet<String>, side: Side) -> Vec<TradeRecord> {
    let mut kept = Vec::with_capacity(records.len());
    let mut folded: Vec<TradeRecord> = Vec::new();
    let mut folded_pos: HashMap<String, usize> = HashMap::new();

    for record in records {
        if keep.contains(side.of(&record)) {
            kept.push(record);
            continue;
        }

        let counterpart = side.other().of(&record).to_string();
        match folded_pos.get(&counterpart) {
            Some(pos) => {
                folded[*pos].quantity += record.quantity;
                folded[*pos].value += record.value;
            }
            None => {
                let merged = match side {
                    Side::Exporter => TradeRecord::new(
                        REST_OF_WORLD,
                        counterpart.clone(),
                        record.quantity,
                        record.value,
                    ),
                    Side::Importer => TradeRecord::new(
                        counterpart.clone(),
                        REST_OF_WORLD,
                        record.quantity,
                        record.value,
                    ),
                };
                folded_pos.insert(counterpart, folded.len());
                folded.push(merged);
            }
        }
    }

    kept.extend(folded);
    kept
}

/// Keeps the `n` largest exporters (by exported quantity) and the `n` largest importers (by
/// imported quantity) and folds every other partner into [REST_OF_WORLD]. Exporters are folded
/// first, so flows between two small countries end up as `ROW -> ROW`. Total quantity and value
/// are preserved.
pub fn collapse_rest_of_world(records: &[TradeRecord], n: usize) -> Vec<TradeRecord> {
    let top_exporters = top_partners(records, Side::Exporter, n);
    let top_importers = top_partners(records, Side::Importer, n);

    let by_exporter = fold(records.to_vec(), &top_exporters, Side::Exporter);
    fold(by_exporter, &top_importers, Side::Importer)
}

#[cfg(test)]
mod tests {
    use super::{collapse_rest_of_world, REST_OF_WORLD};
    use crate::input::trade::{TradeDataset, TradeRecord};

    fn flow(exporter: &str, importer: &str, quantity: f64) -> TradeRecord {
        TradeRecord::new(exporter, importer, quantity, quantity * 2.0)
    }

    #[test]
    fn test_that_small_partners_fold_into_row() {
        let records = vec![
            flow("A", "X", 10.0),
            flow("B", "X", 8.0),
            flow("C", "X", 1.0),
            flow("D", "Y", 2.0),
            flow("A", "Z", 0.5),
        ];
        let collapsed = collapse_rest_of_world(&records, 2);

        // Top exporters A and B, top importers X and Y
        assert_eq!(
            collapsed,
            vec![
                flow("A", "X", 10.0),
                flow("B", "X", 8.0),
                flow(REST_OF_WORLD, "X", 1.0),
                flow(REST_OF_WORLD, "Y", 2.0),
                flow("A", REST_OF_WORLD, 0.5),
            ]
        );
    }

    #[test]
    fn test_that_large_n_changes_nothing() {
        let records = vec![flow("A", "B", 1.0), flow("B", "A", 2.0)];
        assert_eq!(collapse_rest_of_world(&records, 5), records);
    }

    #[test]
    fn test_that_totals_are_preserved() {
        let dataset = TradeDataset::random(30, 500);
        let collapsed = collapse_rest_of_world(dataset.records(), 5);

        let before: f64 = dataset.records().iter().map(|r| r.quantity).sum();
        let after: f64 = collapsed.iter().map(|r| r.quantity).sum();
        assert!((before - after).abs() < 1e-6 * before.max(1.0));

        let exporters: std::collections::HashSet<&str> =
            collapsed.iter().map(|r| r.exporter.as_str()).collect();
        assert!(exporters.len() <= 6);
    }
}
