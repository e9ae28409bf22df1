//! Construction of `TraceEvm` instances
//!
//! Two backends are supported:
//! - any `DatabaseRef` wrapped in a `CacheDB` (in-memory state, tests)
//! - a node reached over HTTP, read through `AlloyDB` at a fixed block
//!
//! Both apply the same development-friendly configuration: EIP-3607 is
//! disabled, the contract size limit is lifted, and block gas limit and
//! base fee checks are skipped.

use alloy::{
    eips::BlockId,
    network::AnyNetwork,
    providers::{Provider, RootProvider},
    transports::http::reqwest::Url,
};
use revm::{
    context::Context,
    database::{AlloyDB, CacheDB, DatabaseRef},
    database_interface::async_db::WrapDatabaseAsync,
    handler::{MainBuilder, MainContext},
};
use tracing::debug;

use crate::{
    errors::{EvmError, InitError},
    evm::TraceEvm,
};

/// HTTP provider over the catch-all network type
pub type AnyNetworkProvider = RootProvider<AnyNetwork>;

/// Node-backed state, read synchronously from inside the EVM
pub type RpcDb = WrapDatabaseAsync<AlloyDB<AnyNetwork, AnyNetworkProvider>>;

/// EVM reading state from a node through a local cache
pub type RpcEvm<INSP> = TraceEvm<CacheDB<RpcDb>, INSP>;

/// Chain ID used when the backend cannot report one
const DEFAULT_CHAIN_ID: u64 = 1;

fn build_evm<DB, INSP>(db: CacheDB<DB>, chain_id: u64, tracer: INSP) -> TraceEvm<CacheDB<DB>, INSP>
where
    DB: DatabaseRef,
{
    let mut ctx = Context::mainnet().with_db(db);
    let cfg = &mut ctx.cfg;
    cfg.chain_id = chain_id;
    cfg.disable_eip3607 = true;
    cfg.limit_contract_code_size = None;
    cfg.disable_block_gas_limit = true;
    cfg.disable_base_fee = true;
    let evm = ctx.build_mainnet_with_inspector(tracer);
    TraceEvm::new(evm)
}

/// Create an EVM over a caller-provided cached database
///
/// # Example
/// ```
/// use revm_call_trace::{create_evm_from_db, CallTraceInspector};
/// use revm::database::{CacheDB, EmptyDB};
///
/// let evm = create_evm_from_db(CacheDB::new(EmptyDB::default()), CallTraceInspector::new());
/// assert!(evm.get_inspector().get_entries().is_empty());
/// ```
pub fn create_evm_from_db<DB, INSP>(db: CacheDB<DB>, tracer: INSP) -> TraceEvm<CacheDB<DB>, INSP>
where
    DB: DatabaseRef,
{
    build_evm(db, DEFAULT_CHAIN_ID, tracer)
}

/// Create an EVM reading state from an HTTP node at the given block
///
/// To trace a mined transaction, pin the state to its parent block and
/// replay the transactions that precede it in the same block first.
///
/// Requires a multi-threaded tokio runtime: state is fetched by blocking
/// on the provider from inside the EVM.
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use revm_call_trace::{create_evm_with_tracer, CallTraceInspector};
/// use alloy::eips::{BlockId, BlockNumberOrTag};
///
/// let evm = create_evm_with_tracer(
///     "https://eth.llamarpc.com",
///     BlockId::Number(BlockNumberOrTag::Number(21_784_862)),
///     CallTraceInspector::new(),
/// ).await?;
/// # Ok(())
/// # }
/// ```
pub async fn create_evm_with_tracer<INSP>(
    rpc_url: &str,
    block: BlockId,
    tracer: INSP,
) -> Result<RpcEvm<INSP>, EvmError> {
    let url: Url = rpc_url
        .parse()
        .map_err(|_| InitError::InvalidRpcUrl(rpc_url.to_string()))?;
    let provider = AnyNetworkProvider::new_http(url);
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| InitError::ChainIdFetchError(e.to_string()))?;
    debug!(chain_id, ?block, "connected to node");

    let db = WrapDatabaseAsync::new(AlloyDB::new(provider, block)).ok_or_else(|| {
        InitError::DatabaseError(
            "AlloyDB needs a multi-threaded tokio runtime; \
             use #[tokio::test(flavor = \"multi_thread\")] in tests"
                .to_string(),
        )
    })?;

    Ok(build_evm(CacheDB::new(db), chain_id, tracer))
}
