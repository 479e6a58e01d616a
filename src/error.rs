//! Error types for the DC network analyzer.
//!
//! This module provides a unified error type [`DcNetError`] that covers
//! netlist parsing, circuit validation, linear solving and analysis.

use thiserror::Error;

/// Result type alias using [`DcNetError`].
pub type Result<T> = std::result::Result<T, DcNetError>;

/// Unified error type for all DCNet operations.
#[derive(Error, Debug)]
pub enum DcNetError {
    // ============ Netlist Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown component type
    #[error("Unknown component type '{component_type}' at line {line}")]
    UnknownComponentType { component_type: String, line: usize },

    // ============ Circuit Validation Errors ============
    /// Duplicate component id
    #[error("Duplicate component id '{id}'")]
    DuplicateComponent { id: String },

    /// Invalid circuit topology
    #[error("Invalid circuit topology: {message}")]
    InvalidTopology { message: String },

    // ============ Analysis Errors ============
    /// The requested reference node is not touched by any component
    #[error("Ground node \"{node}\" not found in circuit.")]
    GroundNodeNotFound { node: String },

    /// The MNA system of the circuit has no unique solution
    #[error("The circuit is unsolvable. Check for floating nodes or invalid configurations.")]
    UnsolvableCircuit,

    /// Matrix is singular and cannot be solved
    #[error("Singular matrix - the linear system has no unique solution")]
    SingularMatrix,

    /// Matrix and right-hand side do not describe a square system
    #[error("Dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    // ============ I/O Errors ============
    /// Error reading circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or unserializable JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl DcNetError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
        }
    }
}
