//! # What is tradematrix?
//!
//! tradematrix turns the BACI bilateral trade dataset into the two things every trade heatmap
//! needs: a ranking of countries by how much they trade, and a dense Top-N matrix of who imports
//! how much from whom. Rendering is left to whatever front-end consumes the JSON-serializable
//! output.
//!
//! # Implementation
//!
//! The pipeline is split into layers:
//! - A source, [BaciSource](crate::source::baci::BaciSource), downloads and verifies the CEPII
//! archive and reads raw rows out of the ZIP without unpacking it.
//! - An input, [TradeDataset](crate::input::trade::TradeDataset), resolves country codes to
//! names for one product and holds the records that everything downstream works on.
//! - The matrix kernel, [rank_countries](crate::matrix::rank_countries) and
//! [build_matrix](crate::matrix::build_matrix), is pure and holds no state. Callers that rebuild
//! matrices for many Top-N values should build a [TradeMatrixCache](crate::matrix::TradeMatrixCache)
//! once and slice it.
//! - Output helpers annotate records with ranks and write JSON.
//!
//! ``
//! cargo run --bin baci_export [top_n]
//! ``
//!
//! The archive is large (several GB), the first run downloads it into `$TRADEMATRIX_INPUT_DIR`.
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod matrix;
pub mod output;
pub mod source;
