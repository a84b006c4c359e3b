// src/process/mod.rs

pub mod corrections;
pub mod duration;
pub mod load;
pub mod normalize;
pub mod raw_table;
pub mod utils;

pub use corrections::MarginCorrections;
pub use load::{load_table, LoadedRow, LoadedTable};
pub use normalize::{normalize_table, NormalizeReport};
pub use raw_table::RawTable;
