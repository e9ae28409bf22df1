//! Call-trace state machine
//!
//! Rebuilds a flat, depth-annotated list of calls from the nested
//! start/enter/exit/end notifications an execution engine emits while it
//! runs a single transaction.
//!
//! The recorder keeps two collections:
//! - `entries`: the visible trace, in the order calls were opened
//! - `pending`: one frame per open call, including precompile calls that
//!   never appear in `entries`, so every exit pops the frame it belongs to
//!
//! Pending frames refer to their visible entry by index, which lets a close
//! write the return data into an entry that was appended long before.

use alloy::primitives::{Address, Bytes, U256};
use tracing::{debug, trace, warn};

use crate::errors::TraceError;
use crate::types::{CallKind, TraceEntry};

/// An open call awaiting its exit notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFrame {
    /// Index into `entries`, `None` for precompile calls
    entry: Option<usize>,
}

/// Stateful listener that turns call notifications into a [`TraceEntry`] list
///
/// One recorder serves exactly one transaction. Every notification is
/// applied synchronously and in program order.
#[derive(Debug, Default, Clone)]
pub struct CallTraceRecorder {
    depth: usize,
    pending: Vec<PendingFrame>,
    entries: Vec<TraceEntry>,
}

impl CallTraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the top-level call of the transaction
    ///
    /// The top-level frame is always recorded as a plain call at depth 0.
    pub fn on_start(
        &mut self,
        from: Address,
        to: Address,
        precompile: bool,
        input: &[u8],
        value: Option<U256>,
    ) -> Result<(), TraceError> {
        self.open(CallKind::Call, 0, from, to, precompile, input, value)
    }

    /// Opens a nested call
    ///
    /// A [`CallKind::SelfDestruct`] notification does not open a frame and is
    /// routed to [`Self::on_selfdestruct`] instead.
    pub fn on_enter(
        &mut self,
        kind: CallKind,
        from: Address,
        to: Address,
        precompile: bool,
        input: &[u8],
        value: Option<U256>,
    ) -> Result<(), TraceError> {
        if kind == CallKind::SelfDestruct {
            return self.on_selfdestruct(from, to, value);
        }
        self.open(kind, self.depth + 1, from, to, precompile, input, value)
    }

    /// Records a self-destruct as a leaf entry below the most recent visible call
    ///
    /// The depth is inferred from the last appended entry. When the actual
    /// parent is a hidden precompile frame or a call that already returned,
    /// the entry is attributed to the nearest visible entry instead.
    pub fn on_selfdestruct(
        &mut self,
        from: Address,
        to: Address,
        value: Option<U256>,
    ) -> Result<(), TraceError> {
        let parent_depth = self
            .entries
            .last()
            .map(|entry| entry.depth)
            .ok_or(TraceError::NoVisibleParent)?;

        debug!(depth = parent_depth + 1, %from, %to, "recording self-destruct");
        self.entries.push(TraceEntry {
            kind: CallKind::SelfDestruct,
            depth: parent_depth + 1,
            from,
            to,
            value,
            input: None,
            output: None,
        });
        Ok(())
    }

    /// Closes the innermost open nested call
    pub fn on_exit(
        &mut self,
        output: &[u8],
        gas_used: u64,
        error: Option<&str>,
    ) -> Result<(), TraceError> {
        self.close(output, gas_used, error)
    }

    /// Closes the top-level call
    pub fn on_end(
        &mut self,
        output: &[u8],
        gas_used: u64,
        error: Option<&str>,
    ) -> Result<(), TraceError> {
        if self.pending.len() > 1 {
            warn!(open = self.pending.len(), "top-level call ended before its nested calls");
        }
        self.close(output, gas_used, error)
    }

    /// Sets the callee of the innermost open frame
    ///
    /// Creation frames only learn their address once the engine has
    /// deployed the code, so the adapter resolves it right before the close.
    pub fn resolve_created_address(&mut self, address: Address) -> Result<(), TraceError> {
        let frame = self.pending.last().ok_or(TraceError::EmptyCallStack)?;
        if let Some(index) = frame.entry {
            self.entries[index].to = address;
        }
        Ok(())
    }

    /// Number of calls opened and not yet closed
    pub fn open_calls(&self) -> usize {
        self.pending.len()
    }

    /// Visible entries recorded so far
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Whether any frame, visible or not, has been opened
    pub fn has_started(&self) -> bool {
        !self.entries.is_empty() || !self.pending.is_empty()
    }

    /// Consumes the recorder and returns the finished trace
    ///
    /// Fails if any call is still open, which means the engine dropped an
    /// exit notification.
    pub fn finish(self) -> Result<Vec<TraceEntry>, TraceError> {
        if !self.pending.is_empty() {
            warn!(open = self.pending.len(), "trace finished with open calls");
            return Err(TraceError::UnclosedCalls(self.pending.len()));
        }
        Ok(self.entries)
    }

    /// Pushes a frame at `depth`; the recorder is left untouched on error
    #[allow(clippy::too_many_arguments)]
    fn open(
        &mut self,
        kind: CallKind,
        depth: usize,
        from: Address,
        to: Address,
        precompile: bool,
        input: &[u8],
        value: Option<U256>,
    ) -> Result<(), TraceError> {
        let value = normalize_value(kind, value)?;
        self.depth = depth;

        let entry = TraceEntry {
            kind,
            depth,
            from,
            to,
            value,
            input: Some(Bytes::copy_from_slice(input)),
            output: None,
        };
        trace!(?kind, depth, %from, %to, precompile, "opening call");

        let index = if precompile {
            None
        } else {
            self.entries.push(entry);
            Some(self.entries.len() - 1)
        };
        self.pending.push(PendingFrame { entry: index });
        Ok(())
    }

    fn close(
        &mut self,
        output: &[u8],
        gas_used: u64,
        error: Option<&str>,
    ) -> Result<(), TraceError> {
        self.depth = self.depth.saturating_sub(1);

        let frame = self.pending.pop().ok_or_else(|| {
            warn!("call closed with an empty pending stack");
            TraceError::EmptyCallStack
        })?;
        trace!(gas_used, error, visible = frame.entry.is_some(), "closing call");

        if let Some(index) = frame.entry {
            self.entries[index].output = Some(Bytes::copy_from_slice(output));
        }
        Ok(())
    }
}

/// Applies the value rules of `kind` to the value reported by the engine
///
/// A missing value on a plain call is recorded as zero.
fn normalize_value(kind: CallKind, value: Option<U256>) -> Result<Option<U256>, TraceError> {
    if !kind.carries_value() {
        return Ok(None);
    }
    if kind.requires_value() {
        return value.map(Some).ok_or(TraceError::MissingValue(kind));
    }
    match kind {
        CallKind::Call | CallKind::CallCode => Ok(Some(value.unwrap_or_default())),
        _ => Ok(value),
    }
}
