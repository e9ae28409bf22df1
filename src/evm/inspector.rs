//! Inspector management for TraceEvm
//!
//! Access to the attached inspector, its collected output and its state.

use revm::database::Database;

use crate::evm::TraceEvm;
use crate::traits::{Reset, TraceOutput};

impl<DB, INSP> TraceEvm<DB, INSP>
where
    DB: Database,
{
    /// Direct access to the attached inspector
    pub fn get_inspector(&self) -> &INSP {
        &self.inspector
    }
}

impl<DB, INSP> TraceEvm<DB, INSP>
where
    DB: Database,
    INSP: TraceOutput + Reset + Clone,
{
    /// Retrieve the current output from the inspector
    ///
    /// The exact type depends on the inspector; for
    /// [`CallTraceInspector`](crate::CallTraceInspector) it is the call
    /// trace of the last executed transaction.
    pub fn get_inspector_output(&self) -> INSP::Output {
        self.inspector.get_output()
    }

    /// Reset the inspector to its initial state
    ///
    /// Called before every transaction so traces never mix.
    pub fn reset_inspector(&mut self) {
        self.inspector.reset();
    }

    /// Clone the inspector instance
    ///
    /// REVM's `inspect_commit` takes the inspector by value, so each
    /// execution receives a copy of the (freshly reset) inspector.
    pub fn clone_inspector(&self) -> INSP {
        self.inspector.clone()
    }
}
