//! EVM wrapper used to replay and trace transactions
//!
//! This module provides the `TraceEvm` wrapper around revm's `MainnetEvm`.
//!
//! ## Key Components
//!
//! - **`TraceEvm`**: wrapper struct giving transparent access to the EVM
//!   plus inspector management
//! - **Database Reset**: clearing cache state between executions
//! - **Builders**: in-memory and RPC-backed construction (`builder`)
//! - **Processing**: batch replay with per-transaction inspector output
//!   (`processor`)
//!
//! ## Usage Example
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use revm_call_trace::{create_evm_with_tracer, CallTraceInspector};
//! use alloy::eips::BlockId;
//!
//! let evm = create_evm_with_tracer(
//!     "https://eth-mainnet.g.alchemy.com/v2/your-key",
//!     BlockId::latest(),
//!     CallTraceInspector::new(),
//! ).await?;
//! # Ok(())
//! # }
//! ```

use revm::database::{CacheDB, DatabaseRef};
pub use revm::{
    context_interface::ContextTr,
    database::Database,
    handler::MainnetContext,
    inspector::Inspector,
    MainnetEvm,
};
use std::ops::{Deref, DerefMut};

use crate::traits::ResetDB;

pub mod builder;
pub mod inspector;
pub mod processor;

/// EVM wrapper with tracing support
///
/// `TraceEvm` wraps revm's `MainnetEvm` and provides:
/// - Transparent access to all EVM functionality via `Deref`/`DerefMut`
/// - Inspector output collection and reset
/// - Database cache management
///
/// # Type Parameters
/// - `DB`: Database backend implementing the `Database` trait
/// - `INSP`: Inspector attached to every execution
pub struct TraceEvm<DB: Database, INSP>(MainnetEvm<MainnetContext<DB>, INSP>);

impl<DB, INSP> TraceEvm<DB, INSP>
where
    DB: Database,
{
    /// Wraps an already configured `MainnetEvm`
    ///
    /// Prefer the functions in [`builder`], which apply the development
    /// configuration used for replay.
    pub fn new(evm: MainnetEvm<MainnetContext<DB>, INSP>) -> Self {
        Self(evm)
    }
}

impl<DB, INSP> Deref for TraceEvm<DB, INSP>
where
    DB: Database,
{
    type Target = MainnetEvm<MainnetContext<DB>, INSP>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<DB, INSP> DerefMut for TraceEvm<DB, INSP>
where
    DB: Database,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<DB, INSP> ResetDB for TraceEvm<CacheDB<DB>, INSP>
where
    DB: DatabaseRef,
{
    /// Reset the database cache to clear all cached state
    ///
    /// Clears accounts, contract code, logs and block hashes held by the
    /// `CacheDB` layer. Subsequent reads go to the underlying database.
    fn reset_db(&mut self) {
        let cached_db = &mut self.0.ctx.db().cache;
        cached_db.accounts.clear();
        cached_db.contracts.clear();
        cached_db.logs = Vec::new();
        cached_db.block_hashes.clear();
    }
}
