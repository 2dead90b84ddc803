// Adapters layer: concrete implementations of the domain ports.

pub mod cache;
pub mod csv_source;
pub mod postcodes_io;
