//! Netlist parser for DC circuit descriptions.
//!
//! A SPICE-inspired, line-oriented text format for the three supported
//! component kinds.
//!
//! # Grammar Overview
//!
//! ```text
//! circuit     = { line }
//! line        = comment | directive | component | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".ground" node | ".end"
//! component   = type name node node { value | state | param }
//!
//! type        = "R" | "V" | "SW"          (name prefix, or standalone keyword)
//! node        = identifier | number
//! value       = number [unit_suffix]
//! state       = "open" | "closed"
//! param       = identifier '=' value
//!
//! number      = ['-'|'+'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! # Component Types
//!
//! | Type | Description | Syntax |
//! |------|-------------|--------|
//! | R | Resistor | `R<name> <n1> <n2> <ohms> [rating=<watts>]` |
//! | V | Voltage Source | `V<name> <n+> <n-> [DC] <volts>` |
//! | SW | Switch | `SW<name> <n1> <n2> open\|closed` |
//!
//! The component name becomes its id. `rating` must be one of
//! 0.125, 0.25, 0.5, 1 or 2 and defaults to 0.25.
//!
//! # Example
//!
//! ```text
//! # Voltage divider with a bypass switch
//! .ground 0
//!
//! V1   1  0  9
//! R1   1  2  1k   rating=0.25
//! R2   2  0  2k
//! SW1  2  0  open
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<CircuitAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    parser.parse()
}

/// Parse a netlist file.
pub fn parse_file(path: &std::path::Path) -> Result<CircuitAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::DcNetError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
