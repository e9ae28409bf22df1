//! Core traits for inspectors and EVM state management
//!
//! This module provides traits for:
//! - Resetting inspector state between transactions
//! - Extracting inspector output after execution
//! - Clearing cached database state
//! - Batch transaction tracing
//!
//! # Key Traits
//! - `Reset`: Clear inspector data between transactions
//! - `TraceOutput`: Collect the inspector's result
//! - `TraceInspector`: Marker for inspectors usable with `TraceEvm`
//! - `ResetDB`: Clear database caches
//! - `TransactionTrace`: Replay a batch of transactions with tracing

use revm::{context_interface::result::ExecutionResult, Inspector};

use crate::errors::EvmError;
use crate::types::SimulationBatch;

/// Trait for resetting inspector state between transactions
///
/// Implementors should clear any accumulated state so the next
/// transaction starts from an empty trace.
pub trait Reset {
    /// Clears all accumulated state data
    fn reset(&mut self);
}

/// Trait for extracting the result collected by an inspector
pub trait TraceOutput {
    /// Type of the collected result
    type Output;

    /// Returns the data collected during the last execution
    fn get_output(&self) -> Self::Output;
}

/// Inspector that can be driven by `TraceEvm`
///
/// Combines REVM's `Inspector` hooks with state reset and output
/// collection.
pub trait TraceInspector<CTX>: Inspector<CTX> + Reset + TraceOutput {}

/// Trait for clearing cached database state
pub trait ResetDB {
    /// Drops every cached account, contract, log and block hash
    fn reset_db(&mut self);
}

/// Trait for replaying transaction batches with tracing enabled
pub trait TransactionTrace {
    /// Output produced by the attached inspector for each transaction
    type InspectorOutput;

    /// Replays every transaction of the batch in order
    ///
    /// Returns one result per transaction. A failure in one transaction
    /// does not stop the rest of the batch.
    fn trace_transactions(
        &mut self,
        batch: SimulationBatch,
    ) -> Vec<Result<(ExecutionResult, Self::InspectorOutput), EvmError>>;
}
