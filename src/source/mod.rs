//! Sources are external datasets that are turned into Inputs. Each source keeps its own raw row
//! format and the Input layer converts those rows into the types that the matrix kernel works on.
pub mod baci;
