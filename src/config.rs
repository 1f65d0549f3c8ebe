//! Pipeline settings read from the environment.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const INPUT_DIR_VAR: &str = "TRADEMATRIX_INPUT_DIR";
pub const OUTPUT_DIR_VAR: &str = "TRADEMATRIX_OUTPUT_DIR";
pub const PRODUCT_VAR: &str = "TRADEMATRIX_PRODUCT";
pub const TOP_N_VAR: &str = "TRADEMATRIX_TOP_N";

/// HS6 code for oak sawnwood, the commodity every heatmap is built for.
pub const DEFAULT_PRODUCT: u32 = 440791;
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub product: u32,
    pub top_n: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Split out so tests do not have to mutate the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let input_dir = lookup(INPUT_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("input"));
        let output_dir = lookup(OUTPUT_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("output"));

        let product = match lookup(PRODUCT_VAR) {
            Some(val) => val
                .trim()
                .parse()
                .with_context(|| format!("{PRODUCT_VAR} is not a product code: {val}"))?,
            None => DEFAULT_PRODUCT,
        };

        let top_n = match lookup(TOP_N_VAR) {
            Some(val) => val
                .trim()
                .parse()
                .with_context(|| format!("{TOP_N_VAR} is not a count: {val}"))?,
            None => DEFAULT_TOP_N,
        };

        Ok(Self {
            input_dir,
            output_dir,
            product,
            top_n,
        })
    }
}
