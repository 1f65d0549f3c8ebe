use std::collections::HashSet;
use std::fmt;

use anyhow::Result;
use log::info;
use rand::seq::SliceRandom;
use rand::thread_rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::error;
use crate::format::split_thousands;
use crate::input::country::CountryLookup;
use crate::source::baci::{BaciRow, BaciSource};

/// One exporter to importer flow for a single product and year.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TradeRecord {
    pub exporter: String,
    pub importer: String,
    pub quantity: f64,
    pub value: f64,
}

impl TradeRecord {
    pub fn new(
        exporter: impl Into<String>,
        importer: impl Into<String>,
        quantity: f64,
        value: f64,
    ) -> Self {
        Self {
            exporter: exporter.into(),
            importer: importer.into(),
            quantity,
            value,
        }
    }
}

/// Where a record came from in the source, kept alongside the record so exports can carry the
/// original codes.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RecordOrigin {
    pub year: u16,
    pub product: u32,
    pub exporter_code: u32,
    pub importer_code: u32,
}

/// Name-resolved records for one product. Record order is the source order, which ranking uses
/// to break ties.
#[derive(Clone, Debug, Default)]
pub struct TradeDataset {
    records: Vec<TradeRecord>,
    origins: Vec<Option<RecordOrigin>>,
}

impl TradeDataset {
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn origin(&self, pos: usize) -> Option<&RecordOrigin> {
        self.origins.get(pos).and_then(|origin| origin.as_ref())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        let origins = vec![None; records.len()];
        Self { records, origins }
    }

    /// Resolves both country codes of every row. A code missing from the lookup is an error:
    /// dropping the row would understate that country's totals.
    pub fn from_rows(rows: &[BaciRow], lookup: &CountryLookup) -> error::Result<Self> {
        let mut builder = TradeDatasetBuilder::new();
        for row in rows {
            let exporter = lookup.resolve(row.exporter)?;
            let importer = lookup.resolve(row.importer)?;
            let record = TradeRecord::new(
                exporter,
                importer,
                row.quantity.unwrap_or(0.0),
                row.value.unwrap_or(0.0),
            );
            let origin = RecordOrigin {
                year: row.year,
                product: row.product,
                exporter_code: row.exporter,
                importer_code: row.importer,
            };
            builder.add_record_with_origin(record, origin);
        }
        Ok(builder.build())
    }

    /// Downloads the archive if needed and loads one product from it.
    pub fn from_baci(source: &BaciSource, product: u32) -> Result<Self> {
        let mut archive = source.open()?;
        let lookup = CountryLookup::from_rows(&archive.country_codes()?);
        let rows = archive.trade_rows(product)?;
        let dataset = Self::from_rows(&rows, &lookup)?;
        info!(
            "Loaded {} records for product {} from {}",
            dataset.len(),
            product,
            source.zip_path().display()
        );
        Ok(dataset)
    }

    /// Synthetic dataset of `records` random flows between distinct countries out of
    /// `countries`. Flows are shuffled so that source order carries no meaning.
    pub fn random(countries: usize, records: usize) -> Self {
        let quantity_dist = Uniform::new(0.0, 10_000.0);
        let price_dist = Uniform::new(0.5, 3.0);
        let country_dist = Uniform::new(0, countries.max(1));
        let mut rng = thread_rng();

        let names: Vec<String> = (0..countries).map(|i| format!("C{i:03}")).collect();
        let mut builder = TradeDatasetBuilder::new();
        if countries < 2 {
            return builder.build();
        }

        let mut flows = Vec::with_capacity(records);
        while flows.len() < records {
            let exporter = country_dist.sample(&mut rng);
            let importer = country_dist.sample(&mut rng);
            if exporter != importer {
                flows.push((exporter, importer));
            }
        }
        flows.shuffle(&mut rng);

        for (exporter, importer) in flows {
            let quantity = quantity_dist.sample(&mut rng);
            let value = quantity * price_dist.sample(&mut rng);
            builder.add_record(TradeRecord::new(
                names[exporter].clone(),
                names[importer].clone(),
                quantity,
                value,
            ));
        }
        builder.build()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        let mut exporters = HashSet::new();
        let mut importers = HashSet::new();
        let mut pairs = HashSet::new();
        let mut quantity = 0.0;
        for record in &self.records {
            exporters.insert(record.exporter.as_str());
            importers.insert(record.importer.as_str());
            pairs.insert((record.exporter.as_str(), record.importer.as_str()));
            quantity += record.quantity;
        }
        Diagnostics {
            records: self.records.len(),
            exporters: exporters.len(),
            importers: importers.len(),
            pairs: pairs.len(),
            quantity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostics {
    pub records: usize,
    pub exporters: usize,
    pub importers: usize,
    pub pairs: usize,
    pub quantity: f64,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records: {}", split_thousands(self.records as f64, 0))?;
        writeln!(f, "N exporters: {}", self.exporters)?;
        writeln!(f, "N importers: {}", self.importers)?;
        writeln!(f, "N pairs: {}", self.pairs)?;
        write!(f, "Total quantity: {} t", split_thousands(self.quantity, 2))
    }
}

pub struct TradeDatasetBuilder {
    records: Vec<TradeRecord>,
    origins: Vec<Option<RecordOrigin>>,
}

impl TradeDatasetBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            origins: Vec::new(),
        }
    }

    pub fn add_record(&mut self, record: TradeRecord) {
        self.records.push(record);
        self.origins.push(None);
    }

    pub fn add_record_with_origin(&mut self, record: TradeRecord, origin: RecordOrigin) {
        self.records.push(record);
        self.origins.push(Some(origin));
    }

    pub fn add_flow(&mut self, exporter: &str, importer: &str, quantity: f64) {
        self.add_record(TradeRecord::new(exporter, importer, quantity, 0.0));
    }

    pub fn build(&mut self) -> TradeDataset {
        debug_assert_eq!(self.records.len(), self.origins.len());
        TradeDataset {
            records: std::mem::take(&mut self.records),
            origins: std::mem::take(&mut self.origins),
        }
    }
}

impl Default for TradeDatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
