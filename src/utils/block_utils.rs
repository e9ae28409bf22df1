//! Block environment utilities
//!
//! Builds the block context a batch is replayed in.

use crate::types::BlockEnv;
use alloy::primitives::U256;

/// Create a block environment for EVM execution
///
/// Unspecified parameters keep REVM's defaults.
///
/// # Example
/// ```rust
/// # use revm_call_trace::utils::block_utils::create_block_env;
/// let block = create_block_env(18_000_000, 1672531200, None, Some(30_000_000));
/// assert_eq!(block.number, 18_000_000);
/// assert_eq!(block.gas_limit, 30_000_000);
/// ```
pub fn create_block_env(
    block_number: u64,
    block_timestamp: u64,
    block_difficulty: Option<u64>,
    block_gas_limit: Option<u64>,
) -> BlockEnv {
    let mut block = BlockEnv {
        number: block_number,
        timestamp: block_timestamp,
        ..Default::default()
    };

    if let Some(difficulty) = block_difficulty {
        block.difficulty = U256::from(difficulty);
    }
    if let Some(gas_limit) = block_gas_limit {
        block.gas_limit = gas_limit;
    }

    block
}
