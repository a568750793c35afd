//! Keyed tables and process-wide symbol interning for naming scene entities.

#[macro_use]
extern crate lazy_static;

mod error;
mod keyed_table;
mod symbol_table;

// Re-export
pub use error::*;
pub use keyed_table::*;
pub use symbol_table::*;
