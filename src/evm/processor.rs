//! Transaction processing implementation for TraceEvm
//!
//! This module implements batch transaction replay with tracing. It
//! supports both stateful and stateless execution modes and returns the
//! inspector output for each transaction.

use revm::{
    context::{ContextTr, TxEnv},
    context_interface::result::ExecutionResult,
    database::{CacheDB, Database, DatabaseRef},
    handler::MainnetContext,
    ExecuteEvm, InspectCommitEvm,
};
use tracing::debug;

use crate::errors::{EvmError, RuntimeError};
use crate::traits::{ResetDB, TraceInspector, TransactionTrace};
use crate::{
    evm::TraceEvm,
    types::{SimulationBatch, SimulationTx},
    utils::block_utils::create_block_env,
};

impl<DB, INSP> TraceEvm<CacheDB<DB>, INSP>
where
    DB: DatabaseRef,
    INSP: TraceInspector<MainnetContext<CacheDB<DB>>> + Clone,
{
    /// Process a single transaction with tracing
    ///
    /// 1. Resets inspector state before execution
    /// 2. Builds the transaction environment, using the sender's current nonce
    /// 3. Executes the transaction with commit
    /// 4. Collects inspector output
    pub(crate) fn process_transaction_internal(
        &mut self,
        input: SimulationTx,
    ) -> Result<(ExecutionResult, INSP::Output), RuntimeError> {
        self.reset_inspector();

        let nonce = self
            .0
            .ctx
            .db()
            .basic(input.caller)
            .map_err(|e| RuntimeError::AccountAccess(format!("Failed to get account info: {e}")))?
            .map(|acc| acc.nonce)
            .unwrap_or_default();

        let tx = TxEnv::builder()
            .caller(input.caller)
            .value(input.value)
            .data(input.data)
            .kind(input.transact_to)
            .nonce(nonce)
            .build_fill();
        let inspector = self.clone_inspector();

        let result = self
            .inspect_commit(tx, inspector)
            .map_err(|e| RuntimeError::ExecutionFailed(format!("Inspector execution failed: {e}")))?;
        let output = self.get_inspector_output();
        Ok((result, output))
    }
}

impl<DB, INSP> TransactionTrace for TraceEvm<CacheDB<DB>, INSP>
where
    DB: DatabaseRef,
    INSP: TraceInspector<MainnetContext<CacheDB<DB>>> + Clone,
{
    type InspectorOutput = INSP::Output;

    /// Replay a batch of transactions with optional block context
    ///
    /// # Execution Modes
    /// - **Stateful** (`is_stateful = true`): state persists between transactions
    /// - **Stateless** (`is_stateful = false`): the cache is cleared between transactions
    fn trace_transactions(
        &mut self,
        batch: SimulationBatch,
    ) -> Vec<Result<(ExecutionResult, Self::InspectorOutput), EvmError>> {
        let SimulationBatch {
            block_params,
            transactions,
            is_stateful,
        } = batch;

        if let Some(block) = block_params {
            let block = create_block_env(block.number, block.timestamp, None, None);
            self.set_block(block);
        }

        self.reset_db();

        let len = transactions.len();
        let mut results = Vec::with_capacity(len);

        for (index, input) in transactions.into_iter().enumerate() {
            let result = self
                .process_transaction_internal(input)
                .map_err(EvmError::Runtime);
            debug!(index, success = result.is_ok(), "transaction replayed");
            results.push(result);

            if index != len - 1 && !is_stateful {
                self.reset_db();
            }
        }

        self.reset_inspector();
        results
    }
}
