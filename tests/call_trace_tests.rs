//! Integration tests for call trace reconstruction
//!
//! Transactions are replayed by REVM against an in-memory state seeded with
//! small hand-assembled contracts:
//! - `ROUTER` calls the identity precompile, then `DOOMED`
//! - `DOOMED` self-destructs, sending its balance to `HEIR`
//! - `PROXY` delegate-calls `LOGIC`, which returns one byte
//! - `FACTORY` runs CREATE, CREATE2, CALLCODE and STATICCALL in turn
//! - `CLOCK` returns the current block number
//!
//! Fixtures live in an inner `CacheDB` so that batch replay can clear the
//! outer cache between transactions without losing them.

use alloy::{
    eips::BlockId,
    primitives::{address, Address, Bytes, TxKind, B256, U256},
};
use anyhow::Result;
use revm::{
    database::{CacheDB, EmptyDB},
    state::{AccountInfo, Bytecode},
};
use revm_call_trace::{
    create_evm_from_db, create_evm_with_tracer, types::BlockParams, CallKind, CallTraceInspector,
    SimulationBatch, SimulationTx, TraceEntry, TraceEvm, TransactionTrace,
};

const SENDER: Address = address!("3ee18B2214AFF97000D974cf647E7C347E8fa585");
const ROUTER: Address = address!("cafe00000000000000000000000000000000face");
const DOOMED: Address = address!("deAD00000000000000000000000000000000dEAd");
const HEIR: Address = address!("00000000000000000000000000000000000be1f0");
const PROXY: Address = address!("1000000000000000000000000000000000000001");
const LOGIC: Address = address!("2000000000000000000000000000000000000002");
const FACTORY: Address = address!("3000000000000000000000000000000000000003");
const CLOCK: Address = address!("4000000000000000000000000000000000000004");
const IDENTITY: Address = address!("0000000000000000000000000000000000000004");

type FixtureEvm = TraceEvm<CacheDB<CacheDB<EmptyDB>>, CallTraceInspector>;

/// CALL or CALLCODE: op(gas, target, 0, 0, 0, 0, 0); POP
fn call_code(op: u8, target: Address) -> Vec<u8> {
    let mut code = vec![0x60, 0x00, 0x60, 0x00, 0x60, 0x00, 0x60, 0x00, 0x60, 0x00, 0x73];
    code.extend_from_slice(target.as_slice());
    code.extend_from_slice(&[0x5a, op, 0x50]);
    code
}

/// DELEGATECALL or STATICCALL: op(gas, target, 0, 0, 0, 0); POP
fn valueless_call_code(op: u8, target: Address) -> Vec<u8> {
    let mut code = vec![0x60, 0x00, 0x60, 0x00, 0x60, 0x00, 0x60, 0x00, 0x73];
    code.extend_from_slice(target.as_slice());
    code.extend_from_slice(&[0x5a, op, 0x50]);
    code
}

fn contract(code: Vec<u8>, balance: U256) -> AccountInfo {
    let bytecode = Bytecode::new_raw(Bytes::from(code));
    AccountInfo::new(balance, 1, bytecode.hash_slow(), bytecode)
}

fn fixture_evm() -> FixtureEvm {
    let mut db = CacheDB::new(EmptyDB::default());
    db.insert_account_info(
        SENDER,
        AccountInfo {
            balance: U256::from(10).pow(U256::from(18)),
            ..Default::default()
        },
    );

    let mut router = call_code(0xf1, IDENTITY);
    router.extend(call_code(0xf1, DOOMED));
    router.push(0x00);
    db.insert_account_info(ROUTER, contract(router, U256::ZERO));

    let mut doomed = vec![0x73];
    doomed.extend_from_slice(HEIR.as_slice());
    doomed.push(0xff);
    db.insert_account_info(DOOMED, contract(doomed, U256::from(1)));

    let mut proxy = valueless_call_code(0xf4, LOGIC);
    proxy.push(0x00);
    db.insert_account_info(PROXY, contract(proxy, U256::ZERO));
    // MSTORE8(0, 0x2a); RETURN(0, 1)
    let logic = vec![0x60, 0x2a, 0x60, 0x00, 0x53, 0x60, 0x01, 0x60, 0x00, 0xf3];
    db.insert_account_info(LOGIC, contract(logic, U256::ZERO));

    // CREATE(1, 0, 0); POP; CREATE2(0, 0, 0, 0); POP
    let mut factory = vec![0x60, 0x00, 0x60, 0x00, 0x60, 0x01, 0xf0, 0x50];
    factory.extend([0x60, 0x00, 0x60, 0x00, 0x60, 0x00, 0x60, 0x00, 0xf5, 0x50]);
    factory.extend(call_code(0xf2, LOGIC));
    factory.extend(valueless_call_code(0xfa, LOGIC));
    factory.push(0x00);
    db.insert_account_info(FACTORY, contract(factory, U256::from(1)));

    // MSTORE(0, NUMBER); RETURN(0, 32)
    let clock = vec![0x43, 0x60, 0x00, 0x52, 0x60, 0x20, 0x60, 0x00, 0xf3];
    db.insert_account_info(CLOCK, contract(clock, U256::ZERO));

    create_evm_from_db(CacheDB::new(db), CallTraceInspector::new())
}

fn call_tx(to: Address) -> SimulationTx {
    SimulationTx {
        caller: SENDER,
        transact_to: TxKind::Call(to),
        value: U256::ZERO,
        data: Bytes::new(),
    }
}

/// Verifies:
/// - the precompile call made by ROUTER is absent
/// - the following call keeps depth 1
/// - the self-destruct sits one level below DOOMED with no input/output
#[test]
fn test_precompile_hidden_and_selfdestruct_leaf() -> Result<()> {
    let mut evm = fixture_evm();
    let entries = evm.trace_call_entries(call_tx(ROUTER))?;

    assert_eq!(
        entries,
        vec![
            TraceEntry {
                kind: CallKind::Call,
                depth: 0,
                from: SENDER,
                to: ROUTER,
                value: Some(U256::ZERO),
                input: Some(Bytes::new()),
                output: Some(Bytes::new()),
            },
            TraceEntry {
                kind: CallKind::Call,
                depth: 1,
                from: ROUTER,
                to: DOOMED,
                value: Some(U256::ZERO),
                input: Some(Bytes::new()),
                output: Some(Bytes::new()),
            },
            TraceEntry {
                kind: CallKind::SelfDestruct,
                depth: 2,
                from: DOOMED,
                to: HEIR,
                value: Some(U256::from(1)),
                input: None,
                output: None,
            },
        ]
    );
    assert!(entries.iter().all(|entry| entry.to != IDENTITY));
    Ok(())
}

#[test]
fn test_delegatecall_participants_and_output() -> Result<()> {
    let mut evm = fixture_evm();
    let entries = evm.trace_call_entries(call_tx(PROXY))?;

    assert_eq!(entries.len(), 2);
    let delegated = &entries[1];
    assert_eq!(delegated.kind, CallKind::DelegateCall);
    assert_eq!(delegated.depth, 1);
    assert_eq!((delegated.from, delegated.to), (PROXY, LOGIC));
    assert_eq!(delegated.value, None);
    assert_eq!(delegated.output, Some(Bytes::from(vec![0x2a])));
    Ok(())
}

#[test]
fn test_create_and_code_calls_from_factory() -> Result<()> {
    let mut evm = fixture_evm();
    let entries = evm.trace_call_entries(call_tx(FACTORY))?;

    let shape: Vec<_> = entries
        .iter()
        .map(|e| (e.kind, e.depth, e.from, e.to, e.value))
        .collect();
    assert_eq!(
        shape,
        vec![
            (CallKind::Call, 0, SENDER, FACTORY, Some(U256::ZERO)),
            (CallKind::Create, 1, FACTORY, FACTORY.create(1), Some(U256::from(1))),
            (
                CallKind::Create2,
                1,
                FACTORY,
                FACTORY.create2_from_code(B256::ZERO, Bytes::new()),
                Some(U256::ZERO)
            ),
            // CALLCODE runs LOGIC's code in FACTORY's context
            (CallKind::CallCode, 1, FACTORY, LOGIC, Some(U256::ZERO)),
            (CallKind::StaticCall, 1, FACTORY, LOGIC, None),
        ]
    );
    assert_eq!(entries[1].input, Some(Bytes::new()));
    assert_eq!(entries[3].output, Some(Bytes::from(vec![0x2a])));
    assert_eq!(entries[4].output, Some(Bytes::from(vec![0x2a])));
    Ok(())
}

/// The top-level frame of a creation transaction is reported as a call to
/// the created address, with the init code as input.
#[test]
fn test_creation_transaction() -> Result<()> {
    let mut evm = fixture_evm();
    let entries = evm.trace_call_entries(SimulationTx {
        caller: SENDER,
        transact_to: TxKind::Create,
        value: U256::ZERO,
        data: Bytes::from(vec![0x00]),
    })?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, CallKind::Call);
    assert_eq!(entries[0].depth, 0);
    assert_eq!(entries[0].to, SENDER.create(0));
    assert_eq!(entries[0].input, Some(Bytes::from(vec![0x00])));
    assert_eq!(entries[0].output, Some(Bytes::new()));
    Ok(())
}

#[test]
fn test_stateless_batch_replays_from_same_state() {
    let mut evm = fixture_evm();
    let results = evm.trace_transactions(SimulationBatch {
        block_params: None,
        transactions: vec![call_tx(ROUTER), call_tx(ROUTER)],
        is_stateful: false,
    });

    let traces: Vec<Vec<TraceEntry>> = results
        .into_iter()
        .map(|result| {
            let (execution, trace) = result.expect("transaction should execute");
            assert!(execution.is_success());
            trace.expect("trace should be well formed")
        })
        .collect();
    assert_eq!(traces[0], traces[1]);
    assert_eq!(traces[1][2].value, Some(U256::from(1)));
}

#[test]
fn test_stateful_batch_sees_previous_transfers() {
    let mut evm = fixture_evm();
    let results = evm.trace_transactions(SimulationBatch {
        block_params: None,
        transactions: vec![call_tx(ROUTER), call_tx(ROUTER)],
        is_stateful: true,
    });

    let (_, second) = results
        .into_iter()
        .nth(1)
        .expect("two results")
        .expect("transaction should execute");
    let second = second.expect("trace should be well formed");
    // DOOMED already handed its balance to HEIR in the first transaction
    assert_eq!(second[2].kind, CallKind::SelfDestruct);
    assert_eq!(second[2].value, Some(U256::ZERO));
}

#[test]
fn test_batch_uses_block_params() {
    let mut evm = fixture_evm();
    let results = evm.trace_transactions(SimulationBatch {
        block_params: Some(BlockParams {
            number: 18_000_000,
            timestamp: 1_700_000_000,
        }),
        transactions: vec![call_tx(CLOCK)],
        is_stateful: false,
    });

    let (_, trace) = results
        .into_iter()
        .next()
        .expect("one result")
        .expect("transaction should execute");
    let trace = trace.expect("trace should be well formed");
    let number = U256::from(18_000_000u64).to_be_bytes::<32>();
    assert_eq!(trace[0].output, Some(Bytes::from(number.to_vec())));
}

#[test]
fn test_trace_serializes_for_rpc() -> Result<()> {
    let mut evm = fixture_evm();
    let entries = evm.trace_call_entries(call_tx(PROXY))?;
    let json = serde_json::to_value(&entries)?;

    assert_eq!(json[0]["type"], "CALL");
    assert_eq!(json[0]["value"], serde_json::to_value(U256::ZERO)?);
    assert_eq!(json[1]["type"], "DELEGATECALL");
    assert_eq!(json[1]["depth"], 1);
    assert!(json[1]["value"].is_null());
    assert_eq!(json[1]["input"], "0x");
    assert_eq!(json[1]["output"], "0x2a");
    Ok(())
}

/// Replays a plain transfer against a public node
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires network access"]
async fn test_trace_against_node() -> Result<()> {
    let mut evm = create_evm_with_tracer(
        "https://eth.llamarpc.com",
        BlockId::latest(),
        CallTraceInspector::new(),
    )
    .await?;
    let entries = evm.trace_call_entries(call_tx(DOOMED))?;

    assert_eq!(entries[0].depth, 0);
    assert_eq!((entries[0].from, entries[0].to), (SENDER, DOOMED));
    Ok(())
}
