use derive_more::Display;

/// Failures raised by the matrix kernel and by name resolution. Everything that touches the
/// filesystem or network reports through `anyhow` instead.
#[derive(Debug, Display, derive_more::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[display("top_n must be between 2 and {countries}, got {top_n}")]
    InvalidTopN { top_n: usize, countries: usize },
    #[display("country code {code} is missing from the country lookup")]
    UnknownCountry { code: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
