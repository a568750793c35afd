//! Symbol Errors

use std::error::Error;
use std::fmt;

/// Errors reported by keyed tables and the symbol table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolError {
    /// A key was inserted that is already present.
    DuplicateKey(String),

    /// A symbol was resolved that was never interned.
    UnknownSymbol(u32),

    /// Every symbol id is in use; holds the number of interned names.
    TableFull(usize),

    /// The global symbol table lock was poisoned by a panicking thread.
    Poisoned,
}

/// Result type for symbol operations.
pub type SymbolResult<T> = Result<T, SymbolError>;

impl fmt::Display for SymbolError {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "duplicate key '{}'", key),
            Self::UnknownSymbol(id) => write!(f, "unknown symbol #{}", id),
            Self::TableFull(count) => write!(f, "symbol table full after {} names", count),
            Self::Poisoned => write!(f, "symbol table lock poisoned"),
        }
    }
}

impl Error for SymbolError {}
