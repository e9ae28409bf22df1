//! Error types for call tracing and EVM replay
//!
//! This module defines the error hierarchy used across the crate:
//! - EVM initialization errors
//! - Runtime execution errors
//! - Call trace reconstruction errors
//! - Error conversion and propagation

use thiserror::Error;

use crate::types::CallKind;

/// Top-level error type for the tracing system
///
/// Encompasses all possible errors that can occur while building an EVM,
/// replaying a transaction and reconstructing its call trace.
#[derive(Debug, Error)]
pub enum EvmError {
    /// Errors occurring during EVM initialization
    #[error("Failed to initialize EVM: {0}")]
    Init(#[from] InitError),

    /// Errors occurring during transaction execution
    #[error("Error during execution: {0}")]
    Runtime(#[from] RuntimeError),

    /// The notification stream could not be turned into a call trace
    #[error("Call trace error: {0}")]
    Trace(#[from] TraceError),
}

/// Initialization-specific errors
///
/// These errors occur during the setup phase of the EVM,
/// typically related to network connectivity and configuration.
#[derive(Debug, Error)]
pub enum InitError {
    /// Invalid or malformed RPC URL
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    /// Database setup or connection errors
    #[error("Database initialization failed: {0}")]
    DatabaseError(String),

    /// Chain ID retrieval errors
    #[error("Failed to get chain ID: {0}")]
    ChainIdFetchError(String),
}

/// Runtime execution errors
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// General transaction execution failures
    #[error("Transaction execution failed: {0}")]
    ExecutionFailed(String),

    /// Errors accessing account information
    #[error("Account access error: {0}")]
    AccountAccess(String),
}

/// Call trace reconstruction errors
///
/// Every variant is fatal to the trace being built: a partially paired
/// trace is never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// An exit or end notification arrived with no open call to close
    #[error("protocol violation: call closed with an empty pending stack")]
    EmptyCallStack,

    /// The stream ended while calls were still open
    #[error("protocol violation: {0} call(s) still open at end of trace")]
    UnclosedCalls(usize),

    /// A value-carrying frame was opened without a value
    #[error("missing value for {0:?} frame")]
    MissingValue(CallKind),

    /// A self-destruct was reported before any visible call existed
    #[error("self-destruct reported with no visible parent call")]
    NoVisibleParent,
}
