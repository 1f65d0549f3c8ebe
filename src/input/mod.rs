//! Inputs wrap a source dataset and expose it in the shape the matrix kernel consumes: trade
//! records keyed by country name rather than by the source's numeric codes.
//!
//! Sources should be called through inputs so that callers never handle raw source rows.
pub mod country;
pub mod trade;
