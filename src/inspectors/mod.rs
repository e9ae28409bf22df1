//! EVM execution inspectors
//!
//! - `call_tracer`: records the ordered, depth-annotated list of
//!   inter-contract calls made by a transaction
//!
//! Inspectors implement the `Reset`, `TraceOutput` and `TraceInspector`
//! traits so that `TraceEvm` can drive them transaction by transaction.

pub mod call_tracer;

pub use call_tracer::{CallTraceInspector, CallTraceRecorder};
