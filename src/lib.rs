//! # REVM Call Trace
//!
//! Reconstructs the ordered list of inter-contract calls made by a single
//! EVM transaction, the way `ots_traceTransaction` reports it: every call
//! annotated with its nesting depth, participants, value, input and output.
//!
//! ## Core Features
//!
//! - **Call-trace recording**
//!   - Depth derived from the order of start/enter/exit/end notifications
//!   - Precompile calls hidden from the result while keeping exits paired
//!   - Self-destructs recorded as leaf entries below the triggering call
//!   - Unrecognised call kinds degrade to `UNKNOWN` entries
//!
//! - **REVM integration**
//!   - `CallTraceInspector` drives the recorder from REVM inspector hooks
//!   - `TraceEvm` replays transactions over in-memory or node-backed state
//!
//! ## Features
//!
//! - `rustls-tls`: Uses rustls as the TLS implementation instead of native-tls (OpenSSL).
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use revm_call_trace::{create_evm_with_tracer, CallTraceInspector, SimulationTx};
//! use alloy::{eips::BlockId, primitives::{address, Bytes, TxKind, U256}};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut evm = create_evm_with_tracer(
//!     "https://eth-mainnet.g.alchemy.com/v2/your-api-key",
//!     BlockId::latest(),
//!     CallTraceInspector::new(),
//! ).await?;
//!
//! let entries = evm.trace_call_entries(SimulationTx {
//!     caller: address!("C255fC198eEdAC7AF8aF0f6e0ca781794B094A61"),
//!     transact_to: TxKind::Call(address!("d878229c9c3575F224784DE610911B5607a3ad15")),
//!     value: U256::from(120000000000000000u64),
//!     data: Bytes::new(),
//! })?;
//!
//! for entry in entries {
//!     println!("{} {:?} {} -> {}", entry.depth, entry.kind, entry.from, entry.to);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - `inspectors`: the call trace recorder and its REVM inspector
//! - `evm`: `TraceEvm` wrapper, builders and batch processing
//! - `types`: trace entries, call kinds and replay parameters
//! - `traits`: extension points for inspectors and EVM state
//! - `errors`: error types
//! - `utils`: helper functions

pub mod errors;
pub mod evm;
pub mod inspectors;
pub mod traits;
pub mod types;
pub mod utils;

pub use errors::{EvmError, TraceError};
pub use evm::builder::{create_evm_from_db, create_evm_with_tracer};
pub use evm::TraceEvm;
pub use inspectors::{CallTraceInspector, CallTraceRecorder};
pub use traits::{Reset, ResetDB, TraceInspector, TraceOutput, TransactionTrace};
pub use types::{CallKind, SimulationBatch, SimulationTx, TraceEntry};
