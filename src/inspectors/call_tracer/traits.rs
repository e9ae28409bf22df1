//! Trait implementations for CallTraceInspector
//!
//! - `Reset`: drops the recorder and any recorded violation so the
//!   inspector can serve the next transaction
//! - `TraceOutput`: hands out the finished trace, or the violation that
//!   made it unusable
//! - `TraceInspector`: lets `TraceEvm` drive the inspector
use revm::context_interface::ContextTr;

use crate::errors::TraceError;
use crate::inspectors::call_tracer::{CallTraceInspector, CallTraceRecorder};
use crate::traits::{Reset, TraceInspector, TraceOutput};
use crate::types::TraceEntry;

impl Reset for CallTraceInspector {
    fn reset(&mut self) {
        self.recorder = CallTraceRecorder::new();
        self.error = None;
    }
}

impl TraceOutput for CallTraceInspector {
    type Output = Result<Vec<TraceEntry>, TraceError>;

    /// Returns the call trace of the last executed transaction
    ///
    /// Fails with the first violation recorded during execution, or with
    /// [`TraceError::UnclosedCalls`] if some frames never closed.
    fn get_output(&self) -> Self::Output {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => self.recorder.clone().finish(),
        }
    }
}

impl<CTX: ContextTr> TraceInspector<CTX> for CallTraceInspector {}
