//! BACI bilateral trade data published by CEPII. The dataset ships as one large ZIP containing a
//! CSV per year plus a country-code table. Rows are keyed by numeric country codes and an HS6
//! product code.
use std::fs::{self, File};
use std::io::{BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use serde::Deserialize;

pub const BACI_URL: &str = "https://www.cepii.fr/DATA_DOWNLOAD/baci/data/BACI_HS22_V202501.zip";
pub const BACI_ZIP_NAME: &str = "BACI_HS22_V202501.zip";
pub const BACI_TRADE_CSV: &str = "BACI_HS22_Y2023_V202501.csv";
pub const BACI_COUNTRY_CSV: &str = "country_codes_V202501.csv";
pub const BACI_MD5: &str = "9fcebe4ce5e404db20f0040f9cf5f37f";

const PRODUCT_COLUMN: &str = "k";

/// One row of the yearly trade CSV. BACI uses single-letter headers and pads every cell with
/// spaces, quantities that CEPII could not estimate are written as `NA`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BaciRow {
    #[serde(rename = "t")]
    pub year: u16,
    #[serde(rename = "i")]
    pub exporter: u32,
    #[serde(rename = "j")]
    pub importer: u32,
    #[serde(rename = "k")]
    pub product: u32,
    #[serde(rename = "v", deserialize_with = "csv::invalid_option")]
    pub value: Option<f64>,
    #[serde(rename = "q", deserialize_with = "csv::invalid_option")]
    pub quantity: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CountryCodeRow {
    pub country_code: u32,
    pub country_name: String,
}

/// Where a BACI release lives remotely and locally. The archive is only fetched when it is not
/// already present in `input_dir`.
#[derive(Clone, Debug)]
pub struct BaciSource {
    pub url: String,
    pub input_dir: PathBuf,
    pub zip_name: String,
    pub trade_csv: String,
    pub country_csv: String,
    pub md5: Option<String>,
}

impl BaciSource {
    /// HS22 nomenclature, 2023 trade year, release V202501.
    pub fn hs22_2023(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: BACI_URL.to_string(),
            input_dir: input_dir.into(),
            zip_name: BACI_ZIP_NAME.to_string(),
            trade_csv: BACI_TRADE_CSV.to_string(),
            country_csv: BACI_COUNTRY_CSV.to_string(),
            md5: Some(BACI_MD5.to_string()),
        }
    }

    pub fn zip_path(&self) -> PathBuf {
        self.input_dir.join(&self.zip_name)
    }

    pub fn is_downloaded(&self) -> bool {
        self.zip_path().exists()
    }

    pub fn download(&self) -> Result<()> {
        let zip_path = self.zip_path();
        warn!(
            "The dataset '{}' has not been downloaded yet. This might take some time, the result \
             will be saved to '{}'. Set ${} to use another directory.",
            self.trade_csv,
            zip_path.display(),
            crate::config::INPUT_DIR_VAR
        );

        fs::create_dir_all(&self.input_dir)
            .with_context(|| format!("creating {}", self.input_dir.display()))?;

        // Written under a temporary name so an interrupted download never looks complete.
        let partial = zip_path.with_extension("zip.part");
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()?;
        let mut resp = client
            .get(&self.url)
            .send()
            .with_context(|| format!("requesting {}", self.url))?
            .error_for_status()?;

        let mut file =
            File::create(&partial).with_context(|| format!("creating {}", partial.display()))?;
        let written = resp.copy_to(&mut file)?;
        file.flush()?;
        drop(file);
        info!("Downloaded {} bytes from {}", written, self.url);

        commit_download(&partial, &zip_path, self.md5.as_deref())
    }

    pub fn ensure_downloaded(&self) -> Result<()> {
        if !self.is_downloaded() {
            self.download()?;
        }
        Ok(())
    }

    pub fn open(&self) -> Result<BaciArchive<BufReader<File>>> {
        self.ensure_downloaded()?;
        let path = self.zip_path();
        let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
        BaciArchive::from_reader(BufReader::new(file), &self.trade_csv, &self.country_csv)
    }
}

/// Moves a finished download into place. With an expected digest the partial file is checked
/// first and removed on a mismatch, so a corrupt archive never lands at `zip_path`.
fn commit_download(partial: &Path, zip_path: &Path, md5: Option<&str>) -> Result<()> {
    if let Some(expected) = md5 {
        let actual = file_md5(partial)?;
        if actual != expected {
            fs::remove_file(partial)
                .with_context(|| format!("removing {}", partial.display()))?;
            bail!(
                "checksum mismatch for {}: expected {}, got {}",
                partial.display(),
                expected,
                actual
            );
        }
        debug!("Checksum verified for {}", zip_path.display());
    }

    fs::rename(partial, zip_path)
        .with_context(|| format!("moving download into {}", zip_path.display()))?;
    Ok(())
}

pub fn file_md5(path: &Path) -> Result<String> {
    let mut reader =
        BufReader::new(File::open(path).with_context(|| format!("opening {}", path.display()))?);
    let mut context = md5::Context::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        context.consume(&buf[..read]);
    }
    Ok(format!("{:x}", context.compute()))
}

/// Reads the trade and country tables straight out of the ZIP without unpacking to disk.
pub struct BaciArchive<R: Read + Seek> {
    inner: zip::ZipArchive<R>,
    trade_csv: String,
    country_csv: String,
}

impl<R: Read + Seek> BaciArchive<R> {
    pub fn from_reader(reader: R, trade_csv: &str, country_csv: &str) -> Result<Self> {
        let inner = zip::ZipArchive::new(reader).context("reading BACI archive")?;
        Ok(Self {
            inner,
            trade_csv: trade_csv.to_string(),
            country_csv: country_csv.to_string(),
        })
    }

    /// Streams the trade CSV and keeps the rows for one product. The yearly file has hundreds
    /// of millions of rows so the product column is checked before a row is deserialized.
    pub fn trade_rows(&mut self, product: u32) -> Result<Vec<BaciRow>> {
        let entry = self
            .inner
            .by_name(&self.trade_csv)
            .with_context(|| format!("{} not found in archive", self.trade_csv))?;
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(entry);

        let headers = rdr.byte_headers()?.clone();
        let product_idx = headers
            .iter()
            .position(|h| h == PRODUCT_COLUMN.as_bytes())
            .ok_or_else(|| anyhow!("{} has no '{}' column", self.trade_csv, PRODUCT_COLUMN))?;

        let mut rows = Vec::new();
        let mut scanned: usize = 0;
        let mut record = csv::ByteRecord::new();
        while rdr.read_byte_record(&mut record)? {
            scanned += 1;
            let matches = record
                .get(product_idx)
                .and_then(|raw| std::str::from_utf8(raw).ok())
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                == Some(product);
            if !matches {
                continue;
            }
            let row: BaciRow = record
                .deserialize(Some(&headers))
                .with_context(|| format!("parsing row {} of {}", scanned, self.trade_csv))?;
            rows.push(row);
        }
        info!(
            "Kept {} of {} rows for product {}",
            rows.len(),
            scanned,
            product
        );
        Ok(rows)
    }

    pub fn country_codes(&mut self) -> Result<Vec<CountryCodeRow>> {
        let entry = self
            .inner
            .by_name(&self.country_csv)
            .with_context(|| format!("{} not found in archive", self.country_csv))?;
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(entry);

        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            let row: CountryCodeRow = result?;
            rows.push(row);
        }
        Ok(rows)
    }
}
