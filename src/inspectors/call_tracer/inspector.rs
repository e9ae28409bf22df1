//! REVM Inspector implementation for call tracing
//!
//! Translates REVM's frame hooks into recorder notifications:
//! - `call` / `create` open a frame (start for the first one, enter after)
//! - `call_end` / `create_end` close it (end for the last one, exit before)
//! - `selfdestruct` records a leaf entry without opening a frame
//!
//! REVM reports precompile calls through the same hooks as regular calls,
//! so they are flagged here from the journal's precompile set.

use alloy::primitives::{Address, U256};
use revm::{
    context_interface::{ContextTr, JournalTr},
    interpreter::{
        CallInputs, CallOutcome, CallScheme, CreateInputs, CreateOutcome, CreateScheme,
        InterpreterTypes,
    },
    Inspector,
};

use super::CallTraceInspector;
use crate::types::CallKind;

impl CallTraceInspector {
    fn open(
        &mut self,
        kind: CallKind,
        from: Address,
        to: Address,
        precompile: bool,
        input: &[u8],
        value: Option<U256>,
    ) {
        self.record(|recorder| {
            if recorder.has_started() {
                recorder.on_enter(kind, from, to, precompile, input, value)
            } else {
                recorder.on_start(from, to, precompile, input, value)
            }
        });
    }

    fn close(&mut self, output: &[u8], gas_used: u64, error: Option<&str>) {
        self.record(|recorder| {
            if recorder.open_calls() == 1 {
                recorder.on_end(output, gas_used, error)
            } else {
                recorder.on_exit(output, gas_used, error)
            }
        });
    }
}

impl<CTX, INTR> Inspector<CTX, INTR> for CallTraceInspector
where
    CTX: ContextTr,
    INTR: InterpreterTypes,
{
    /// Opens a frame for a message call
    ///
    /// `from`/`to` follow the frame that executes the opcode: a delegate
    /// call goes from the current contract to the code it borrows, and a
    /// call-code goes from the caller to the code address.
    fn call(&mut self, context: &mut CTX, inputs: &mut CallInputs) -> Option<CallOutcome> {
        let kind = match inputs.scheme {
            CallScheme::Call => CallKind::Call,
            CallScheme::StaticCall => CallKind::StaticCall,
            CallScheme::DelegateCall => CallKind::DelegateCall,
            CallScheme::CallCode => CallKind::CallCode,
            _ => CallKind::Unknown,
        };
        let (from, to) = match inputs.scheme {
            CallScheme::DelegateCall => (inputs.target_address, inputs.bytecode_address),
            CallScheme::CallCode => (inputs.caller, inputs.bytecode_address),
            _ => (inputs.caller, inputs.target_address),
        };
        let precompile = context
            .journal()
            .precompile_addresses()
            .contains(&inputs.bytecode_address);
        let input = inputs.input.bytes(context);

        self.open(kind, from, to, precompile, &input, inputs.transfer_value());
        None
    }

    /// Opens a frame for a contract creation
    ///
    /// The created address is unknown until `create_end`.
    fn create(&mut self, _context: &mut CTX, inputs: &mut CreateInputs) -> Option<CreateOutcome> {
        let kind = match inputs.scheme {
            CreateScheme::Create => CallKind::Create,
            CreateScheme::Create2 { .. } => CallKind::Create2,
            _ => CallKind::Unknown,
        };

        self.open(
            kind,
            inputs.caller,
            Address::ZERO,
            false,
            &inputs.init_code,
            Some(inputs.value),
        );
        None
    }

    fn call_end(&mut self, _context: &mut CTX, _inputs: &CallInputs, outcome: &mut CallOutcome) {
        let result = &outcome.result;
        let error = (!result.result.is_ok()).then(|| format!("{:?}", result.result));
        self.close(&result.output, result.gas.spent(), error.as_deref());
    }

    fn create_end(
        &mut self,
        _context: &mut CTX,
        _inputs: &CreateInputs,
        outcome: &mut CreateOutcome,
    ) {
        if let Some(address) = outcome.address {
            self.record(|recorder| recorder.resolve_created_address(address));
        }

        let result = &outcome.result;
        let error = (!result.result.is_ok()).then(|| format!("{:?}", result.result));
        self.close(&result.output, result.gas.spent(), error.as_deref());
    }

    /// Records a self-destruct below the innermost visible call
    fn selfdestruct(&mut self, contract: Address, target: Address, value: U256) {
        self.record(|recorder| recorder.on_selfdestruct(contract, target, Some(value)));
    }
}
