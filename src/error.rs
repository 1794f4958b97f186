//! Error types for the turn driver's input parsing.

use thiserror::Error;

/// Errors that can occur while driving a turn loop.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The input channel closed before a full line could be read.
    #[error("input channel closed unexpectedly while reading {context}")]
    UnexpectedEof {
        /// What the driver was trying to read when the channel closed.
        context: &'static str,
    },

    /// A token that should have parsed as an integer did not.
    #[error("malformed token {token:?} while reading {context} on turn {turn}")]
    MalformedToken {
        /// The offending token, verbatim.
        token: String,
        /// What the driver was trying to read.
        context: &'static str,
        /// The turn being processed when the error occurred.
        turn: u32,
    },

    /// A line did not contain the expected number of whitespace-separated tokens.
    #[error("expected {expected} tokens while reading {context} on turn {turn}, got {actual}")]
    WrongTokenCount {
        expected: usize,
        actual: usize,
        context: &'static str,
        turn: u32,
    },

    /// Reading a line from the transport failed at the OS level.
    #[error("failed to read input: {source}")]
    Input { source: std::io::Error },

    /// Writing an output line to the transport failed.
    #[error("failed to write output: {source}")]
    Output {
        #[from]
        source: std::io::Error,
    },
}

/// Result type used throughout the driver.
pub type Result<T> = std::result::Result<T, DriverError>;
