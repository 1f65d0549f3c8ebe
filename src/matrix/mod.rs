//! The ranking and pivot kernel shared by every front-end.
//!
//! A front-end ranks countries once per dataset with [rank_countries], then asks for Top-N
//! matrices as the user moves a slider. [build_matrix] computes one view from the records,
//! [TradeMatrixCache] computes the full matrix once and slices views out of it.
//!
//! Rows are importers and columns are exporters, both in rank order. Pairs that never traded
//! are `0.0`, never missing.
mod cache;
mod partners;
mod pivot;
mod rank;

pub use cache::TradeMatrixCache;
pub use partners::{collapse_rest_of_world, REST_OF_WORLD};
pub use pivot::{build_matrix, TradeMatrix};
pub use rank::{rank_countries, CountryRank, CountryRanking};

use crate::error::{Error, Result};

pub(crate) fn check_top_n(top_n: usize, countries: usize) -> Result<()> {
    if top_n < 2 || top_n > countries {
        return Err(Error::InvalidTopN { top_n, countries });
    }
    Ok(())
}
