//! Symbol Table

use super::*;
use log::debug;
use std::fmt;
use std::sync::Mutex;

lazy_static! {
    /// The process-wide symbol table.
    static ref SYMBOLS: Mutex<SymbolTable> = Mutex::new(SymbolTable::default());
}

/// An interned name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// Returns the index of the symbol in its table.
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Symbol {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Returns the symbol assigned to the name interned after `count` others.
///
/// * `count` - Number of names already interned.
fn next_symbol(count: usize) -> SymbolResult<Symbol> {
    u32::try_from(count)
        .map(Symbol)
        .map_err(|_| SymbolError::TableFull(count))
}

/// Maps names to small integer symbols and back.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    /// Symbols by name.
    symbols: KeyedTable<String, Symbol>,

    /// Names by symbol.
    names: Vec<String>,
}

impl SymbolTable {
    /// Returns the symbol for a name, interning it if necessary.
    ///
    /// * `name` - The name.
    pub fn intern(&mut self, name: &str) -> SymbolResult<Symbol> {
        if let Some(symbol) = self.symbols.get(name) {
            return Ok(*symbol);
        }
        let symbol = next_symbol(self.names.len())?;
        self.names.push(name.to_string());
        self.symbols.insert(name.to_string(), symbol);
        Ok(symbol)
    }

    /// Returns the symbol for a name if it was interned.
    ///
    /// * `name` - The name.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }

    /// Returns the name of a symbol.
    ///
    /// * `symbol` - The symbol.
    pub fn resolve(&self, symbol: Symbol) -> SymbolResult<&str> {
        self.names
            .get(symbol.0 as usize)
            .map(|s| s.as_str())
            .ok_or(SymbolError::UnknownSymbol(symbol.0))
    }

    /// Returns the number of interned names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no name was interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the symbols in the order they were interned.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (Symbol(i as u32), name.as_str()))
    }
}

/// Interns a name in the process-wide symbol table.
///
/// * `name` - The name.
pub fn intern(name: &str) -> SymbolResult<Symbol> {
    let mut table = SYMBOLS.lock().map_err(|_| SymbolError::Poisoned)?;
    table.intern(name)
}

/// Returns the name of a symbol from the process-wide symbol table.
///
/// * `symbol` - The symbol.
pub fn resolve(symbol: Symbol) -> SymbolResult<String> {
    let table = SYMBOLS.lock().map_err(|_| SymbolError::Poisoned)?;
    table.resolve(symbol).map(|s| s.to_string())
}

/// Clears the process-wide symbol table. Previously returned symbols become
/// invalid.
pub fn clear_symbols() -> SymbolResult<()> {
    let mut table = SYMBOLS.lock().map_err(|_| SymbolError::Poisoned)?;
    debug!("Clearing {} symbols.", table.len());
    *table = SymbolTable::default();
    Ok(())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
