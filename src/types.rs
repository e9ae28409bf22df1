//! Core types for call tracing and transaction replay
//!
//! This module defines the data structures shared across the crate:
//! - Call kinds and their opcode mapping
//! - Trace entries produced by the recorder
//! - Transaction and batch parameters for replay

pub use alloy::primitives::{Address, Bytes, TxKind, U256};
pub use revm::context::BlockEnv;
use revm::bytecode::opcode;
use serde::{Serialize, Serializer};

/// Kind of a call-like operation recorded in the trace
///
/// Serialized as the upper-case opcode name (`CALL`, `STATICCALL`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallKind {
    Call,
    StaticCall,
    DelegateCall,
    CallCode,
    Create,
    Create2,
    SelfDestruct,
    /// Any call-like operation this crate does not recognise
    Unknown,
}

impl CallKind {
    /// Maps an EVM opcode to its call kind
    ///
    /// Opcodes that are not call-like map to [`CallKind::Unknown`] so that
    /// new engine operations still keep exit notifications paired.
    pub fn from_opcode(op: u8) -> Self {
        match op {
            opcode::CALL => CallKind::Call,
            opcode::STATICCALL => CallKind::StaticCall,
            opcode::DELEGATECALL => CallKind::DelegateCall,
            opcode::CALLCODE => CallKind::CallCode,
            opcode::CREATE => CallKind::Create,
            opcode::CREATE2 => CallKind::Create2,
            opcode::SELFDESTRUCT => CallKind::SelfDestruct,
            _ => CallKind::Unknown,
        }
    }

    /// Whether entries of this kind carry a value field
    pub fn carries_value(&self) -> bool {
        !matches!(self, CallKind::StaticCall | CallKind::DelegateCall)
    }

    /// Whether frames of this kind must be opened with a value
    pub fn requires_value(&self) -> bool {
        matches!(self, CallKind::Create | CallKind::Create2)
    }
}

/// One inter-contract call in a transaction's trace
///
/// Entries are ordered chronologically by the time their call was opened.
/// All byte payloads are owned copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    /// Call kind, serialized as `type`
    #[serde(rename = "type")]
    pub kind: CallKind,
    /// Nesting level, 0 for the top-level call
    pub depth: usize,
    /// Caller address
    pub from: Address,
    /// Callee address (created address for creations)
    pub to: Address,
    /// Native value, absent for static and delegate calls
    pub value: Option<U256>,
    /// Calldata or init code, absent for self-destructs
    #[serde(serialize_with = "serialize_bytes_or_empty")]
    pub input: Option<Bytes>,
    /// Return data, absent until the call closes
    #[serde(serialize_with = "serialize_bytes_or_empty")]
    pub output: Option<Bytes>,
}

fn serialize_bytes_or_empty<S>(bytes: &Option<Bytes>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match bytes {
        Some(bytes) => bytes.serialize(serializer),
        None => Bytes::new().serialize(serializer),
    }
}

/// Block parameters applied before a batch is replayed
#[derive(Debug, Clone, Serialize)]
pub struct BlockParams {
    /// Block number
    pub number: u64,
    /// Block timestamp (Unix timestamp)
    pub timestamp: u64,
}

/// Transaction parameters for replay
#[derive(Debug, Clone)]
pub struct SimulationTx {
    /// Transaction sender
    pub caller: Address,
    /// Native token value to send
    pub value: U256,
    /// Transaction input data
    pub data: Bytes,
    /// Transaction target (address or contract creation)
    pub transact_to: TxKind,
}

/// Parameters for batch transaction replay
#[derive(Debug, Clone)]
pub struct SimulationBatch {
    /// Block environment applied before the batch, if any
    pub block_params: Option<BlockParams>,
    /// List of transactions to execute
    pub transactions: Vec<SimulationTx>,
    /// Whether state persists between transactions
    pub is_stateful: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_opcode_mapping() {
        assert_eq!(CallKind::from_opcode(0xf1), CallKind::Call);
        assert_eq!(CallKind::from_opcode(0xf2), CallKind::CallCode);
        assert_eq!(CallKind::from_opcode(0xf4), CallKind::DelegateCall);
        assert_eq!(CallKind::from_opcode(0xfa), CallKind::StaticCall);
        assert_eq!(CallKind::from_opcode(0xf0), CallKind::Create);
        assert_eq!(CallKind::from_opcode(0xf5), CallKind::Create2);
        assert_eq!(CallKind::from_opcode(0xff), CallKind::SelfDestruct);
        // EXTCALL and plain arithmetic are not tracked kinds
        assert_eq!(CallKind::from_opcode(0xf8), CallKind::Unknown);
        assert_eq!(CallKind::from_opcode(0x01), CallKind::Unknown);
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = TraceEntry {
            kind: CallKind::StaticCall,
            depth: 1,
            from: address!("cafe00000000000000000000000000000000face"),
            to: address!("deAD00000000000000000000000000000000dEAd"),
            value: None,
            input: Some(Bytes::from(vec![0x12, 0x34])),
            output: None,
        };
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["type"], "STATICCALL");
        assert_eq!(json["depth"], 1);
        assert_eq!(json["from"], serde_json::to_value(entry.from).unwrap());
        assert!(json["value"].is_null());
        assert_eq!(json["input"], "0x1234");
        assert_eq!(json["output"], "0x");
    }

    #[test]
    fn test_kind_tags() {
        let tags: Vec<_> = [
            CallKind::Call,
            CallKind::DelegateCall,
            CallKind::CallCode,
            CallKind::Create2,
            CallKind::SelfDestruct,
            CallKind::Unknown,
        ]
        .iter()
        .map(|kind| serde_json::to_value(kind).unwrap())
        .collect();
        assert_eq!(
            tags,
            vec!["CALL", "DELEGATECALL", "CALLCODE", "CREATE2", "SELFDESTRUCT", "UNKNOWN"]
        );
    }
}
