//! Call trace inspector
//!
//! This module provides the `CallTraceInspector` type, which attaches a
//! [`CallTraceRecorder`] to REVM's inspector hooks and yields the flat,
//! depth-annotated call list of a transaction.
//!
//! # Architecture
//!
//! - `recorder`: engine-agnostic state machine fed with start/enter/exit/end
//! - `inspector`: REVM `Inspector` implementation translating hooks into
//!   recorder notifications
//! - `traits`: `Reset` and `TraceOutput` implementations

mod inspector;
mod recorder;
mod traits;

pub use recorder::CallTraceRecorder;

use revm::database::{CacheDB, DatabaseRef};
use tracing::debug;

use crate::errors::{EvmError, TraceError};
use crate::evm::TraceEvm;
use crate::types::{SimulationTx, TraceEntry};

/// Inspector recording every inter-contract call of a transaction
///
/// Calls to precompiles are tracked internally but left out of the
/// result. The first protocol violation seen during execution is kept and
/// returned instead of the trace.
#[derive(Debug, Default, Clone)]
pub struct CallTraceInspector {
    recorder: CallTraceRecorder,
    error: Option<TraceError>,
}

impl CallTraceInspector {
    /// Creates a new inspector instance with empty state
    pub fn new() -> Self {
        Default::default()
    }

    /// Entries recorded so far, including calls that are still open
    pub fn get_entries(&self) -> &[TraceEntry] {
        self.recorder.entries()
    }

    /// The violation that stopped recording, if any
    pub fn get_error(&self) -> Option<&TraceError> {
        self.error.as_ref()
    }

    /// Applies one recorder notification unless recording already failed
    fn record<F>(&mut self, notify: F)
    where
        F: FnOnce(&mut CallTraceRecorder) -> Result<(), TraceError>,
    {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = notify(&mut self.recorder) {
            debug!(%err, "call trace poisoned");
            self.error = Some(err);
        }
    }
}

impl<DB> TraceEvm<CacheDB<DB>, CallTraceInspector>
where
    DB: DatabaseRef,
{
    /// Replays a single transaction and returns its call trace
    ///
    /// Execution outcome is not part of the result: reverted transactions
    /// still yield the calls they made. Any violation of the
    /// start/enter/exit/end nesting is returned as [`EvmError::Trace`].
    ///
    /// # Example
    /// ```no_run
    /// use revm_call_trace::{create_evm_from_db, CallTraceInspector, SimulationTx};
    /// use revm::database::{CacheDB, EmptyDB};
    /// use alloy::primitives::{address, Bytes, TxKind, U256};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut evm = create_evm_from_db(CacheDB::new(EmptyDB::default()), CallTraceInspector::new());
    /// let entries = evm.trace_call_entries(SimulationTx {
    ///     caller: address!("C255fC198eEdAC7AF8aF0f6e0ca781794B094A61"),
    ///     transact_to: TxKind::Call(address!("d878229c9c3575F224784DE610911B5607a3ad15")),
    ///     value: U256::ZERO,
    ///     data: Bytes::new(),
    /// })?;
    /// for entry in entries {
    ///     println!("{:indent$}{:?} {} -> {}", "", entry.kind, entry.from, entry.to, indent = entry.depth * 2);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn trace_call_entries(&mut self, input: SimulationTx) -> Result<Vec<TraceEntry>, EvmError> {
        let (result, entries) = self.process_transaction_internal(input)?;
        debug!(success = result.is_success(), "transaction traced");
        Ok(entries?)
    }
}
