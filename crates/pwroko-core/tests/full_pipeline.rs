//! Cross-crate integration tests exercising the full pipeline:
//! typed operation -> calldata -> injected transport -> decoded balances.
//!
//! The transport and submitter are in-memory fakes keyed on the exact
//! calldata, so any drift in selectors or padding shows up as a missing
//! response.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use precompile_codec::address::{address_word, parse_address};
use precompile_codec::amount::ONE_TOKEN;
use precompile_codec::{Amount, Operation, PayeeType, PrecompileCodec};
use pwroko_core::balances::{BalanceReader, StakedBalancePolicy};
use pwroko_core::config::NetworkConfig;
use pwroko_core::error::PwRokoError;
use pwroko_core::staking::StakingClient;
use pwroko_core::transport::{
    NativeBalanceSource, PrecompileCall, PrecompileTransport, TransactionSubmitter,
};
use pwroko_core::types::{BalanceQuery, Payee, RawBalanceResponses};
use pwroko_core::*;

const ALITH: &str = "0xf24FF3a9CF04c71Dbc94D0b566f7A27B94566cac";
const BALTATHAR: &str = "0x3Cd0A705a2DC65e5b1E1205896BaA2be8A07c6e0";

fn alith() -> Address {
    parse_address(ALITH).unwrap()
}

fn tokens(n: u64) -> Amount {
    Amount::from(U256::from(n) * ONE_TOKEN)
}

fn word(amount: Amount) -> Vec<u8> {
    amount.raw().to_be_bytes::<32>().to_vec()
}

/// Answers `eth_call` from a table of (target, calldata) -> return data.
/// Unknown calls revert.
#[derive(Default)]
struct FakeNode {
    responses: HashMap<(Address, Vec<u8>), Vec<u8>>,
    native: HashMap<Address, Amount>,
    seen: RefCell<Vec<Vec<u8>>>,
}

impl FakeNode {
    fn answer(&mut self, operation: Operation, raw: Vec<u8>) {
        let call = PrecompileCodec::default().encode(&operation).unwrap();
        self.responses.insert((call.to, call.data), raw);
    }
}

impl PrecompileTransport for FakeNode {
    fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, PwRokoError> {
        self.seen.borrow_mut().push(data.to_vec());
        self.responses
            .get(&(to, data.to_vec()))
            .cloned()
            .ok_or_else(|| PwRokoError::Transport("execution reverted".into()))
    }
}

impl NativeBalanceSource for FakeNode {
    fn native_balance(&self, account: Address) -> Result<Amount, PwRokoError> {
        Ok(self.native.get(&account).copied().unwrap_or(Amount::ZERO))
    }
}

/// Records submitted calls; connected to `chain_id` (442 unless set).
#[derive(Default)]
struct FakeWallet {
    sent: RefCell<Vec<PrecompileCall>>,
    chain_id: Option<u64>,
}

impl TransactionSubmitter for FakeWallet {
    fn chain_id(&self) -> Result<u64, PwRokoError> {
        Ok(self.chain_id.unwrap_or(442))
    }

    fn submit(&self, call: &PrecompileCall) -> Result<String, PwRokoError> {
        self.sent.borrow_mut().push(call.clone());
        Ok(format!("0x{:064x}", self.sent.borrow().len()))
    }
}

struct RejectingWallet;

impl TransactionSubmitter for RejectingWallet {
    fn chain_id(&self) -> Result<u64, PwRokoError> {
        Ok(442)
    }

    fn submit(&self, _call: &PrecompileCall) -> Result<String, PwRokoError> {
        Err(PwRokoError::Submission("user rejected the request".into()))
    }
}

// ─── Balances: operation -> transport -> decode -> aggregate ───────

#[test]
fn all_balances_from_pwroko_precompile() {
    let account = alith();
    let mut node = FakeNode::default();
    node.answer(Operation::BalanceOf { account }, word(tokens(10)));
    node.answer(Operation::StakedBalanceOf { account }, word(tokens(5)));
    node.answer(Operation::PendingUnlockAmount { account }, word(tokens(2)));
    node.answer(Operation::ReadyUnlockAmount { account }, word(tokens(3)));

    let reader = BalanceReader::new(&node, NetworkConfig::pwroko_dev().precompiles);
    let balances = reader.all_balances(account).unwrap();

    assert_eq!(balances.free, tokens(10));
    assert_eq!(balances.staked, tokens(5));
    assert_eq!(balances.pending_unlock, tokens(2));
    assert_eq!(balances.ready_unlock, tokens(3));
    assert_eq!(balances.total_owned, tokens(20));
    assert_eq!(balances.share_bps(balances.free), 5_000);

    // The staking precompile fallback was never consulted.
    assert_eq!(node.seen.borrow().len(), 4);
}

#[test]
fn native_balance_comes_from_node() {
    let account = alith();
    let mut node = FakeNode::default();
    node.native.insert(account, tokens(42));

    let reader = BalanceReader::new(&node, NetworkConfig::pwroko_dev().precompiles);
    assert_eq!(reader.native_balance(account).unwrap(), tokens(42));
    assert_eq!(reader.native_balance(Address::ZERO).unwrap(), Amount::ZERO);
    assert!(node.seen.borrow().is_empty());
}

#[test]
fn staked_balance_falls_back_to_staking_precompile() {
    let account = alith();
    let mut node = FakeNode::default();
    node.answer(Operation::StakedBalanceOf { account }, Vec::new());
    node.answer(Operation::BondedBalanceOf { account }, word(tokens(7)));

    let reader = BalanceReader::new(&node, NetworkConfig::pwroko_dev().precompiles);
    assert_eq!(reader.staked_balance(account), tokens(7));
}

#[test]
fn staked_balance_zero_is_final_under_first_answer_wins() {
    let account = alith();
    let mut node = FakeNode::default();
    node.answer(Operation::StakedBalanceOf { account }, word(Amount::ZERO));
    node.answer(Operation::BondedBalanceOf { account }, word(tokens(7)));

    let reader = BalanceReader::new(&node, NetworkConfig::pwroko_dev().precompiles)
        .with_policy(StakedBalancePolicy::FirstAnswerWins);
    assert_eq!(reader.staked_balance(account), Amount::ZERO);
    assert_eq!(node.seen.borrow().len(), 1);
}

#[test]
fn staked_balance_survives_reverting_sources() {
    let node = FakeNode::default();
    let reader = BalanceReader::new(&node, NetworkConfig::pwroko_dev().precompiles);
    assert_eq!(reader.staked_balance(alith()), Amount::ZERO);
}

#[test]
fn empty_responses_read_as_zero() {
    let account = alith();
    let mut node = FakeNode::default();
    for op in [
        Operation::BalanceOf { account },
        Operation::StakedBalanceOf { account },
        Operation::BondedBalanceOf { account },
        Operation::PendingUnlockAmount { account },
        Operation::ReadyUnlockAmount { account },
    ] {
        node.answer(op, Vec::new());
    }

    let reader = BalanceReader::new(&node, NetworkConfig::pwroko_dev().precompiles);
    let balances = reader.all_balances(account).unwrap();
    assert_eq!(balances.total_owned, Amount::ZERO);
}

#[test]
fn short_response_is_an_error() {
    let account = alith();
    let mut node = FakeNode::default();
    node.answer(Operation::BalanceOf { account }, vec![0u8; 8]);

    let reader = BalanceReader::new(&node, NetworkConfig::pwroko_dev().precompiles);
    assert!(matches!(
        reader.free_balance(account),
        Err(PwRokoError::MalformedResponse(_))
    ));
}

#[test]
fn transport_failure_propagates_from_all_balances() {
    let node = FakeNode::default();
    let reader = BalanceReader::new(&node, NetworkConfig::pwroko_dev().precompiles);
    assert!(matches!(
        reader.all_balances(alith()),
        Err(PwRokoError::Transport(_))
    ));
}

#[test]
fn nominations_decode_address_list() {
    let account = alith();
    let validator = parse_address(BALTATHAR).unwrap();

    let mut config = NetworkConfig::pwroko_dev();
    config.precompiles.staking.nominations_of = Some("0x00000006".parse().unwrap());

    let mut raw = Vec::new();
    raw.extend_from_slice(&U256::from(0x20).to_be_bytes::<32>());
    raw.extend_from_slice(&U256::from(1).to_be_bytes::<32>());
    raw.extend_from_slice(&address_word(&validator));

    let call = PrecompileCodec::new(config.precompiles.clone())
        .encode(&Operation::NominationsOf { account })
        .unwrap();
    let mut node = FakeNode::default();
    node.responses.insert((call.to, call.data), raw);

    let reader = BalanceReader::new(&node, config.precompiles);
    assert_eq!(reader.nominations(account).unwrap(), vec![validator]);
}

#[test]
fn nominations_unsupported_without_selector() {
    let node = FakeNode::default();
    let reader = BalanceReader::new(&node, NetworkConfig::pwroko_dev().precompiles);
    assert!(matches!(
        reader.nominations(alith()),
        Err(PwRokoError::UnsupportedOperation(_))
    ));
    assert!(node.seen.borrow().is_empty());
}

// ─── Writes: operation -> calldata -> submitter ────────────────────

#[test]
fn staking_flow_submits_each_operation() {
    let wallet = FakeWallet::default();
    let client = StakingClient::new(&wallet, &NetworkConfig::pwroko_dev());
    let validators = vec![alith(), parse_address(BALTATHAR).unwrap()];

    client.lock(tokens(100)).unwrap();
    client.bond(tokens(5), PayeeType::Staked).unwrap();
    client.nominate(validators).unwrap();
    client.unbond(tokens(1)).unwrap();
    client.withdraw_unbonded().unwrap();
    client.unlock_request(tokens(10)).unwrap();
    client.complete_unlock(10).unwrap();

    let sent = wallet.sent.borrow();
    let lengths: Vec<usize> = sent.iter().map(|c| c.data.len()).collect();
    assert_eq!(lengths, vec![36, 37, 100, 36, 4, 36, 36]);

    let selectors: Vec<String> = sent.iter().map(|c| c.data_hex()[..10].to_string()).collect();
    assert_eq!(
        selectors,
        vec![
            "0xf83d08ba",
            "0x00000001",
            "0x00000003",
            "0x00000002",
            "0x00000004",
            "0x8a4b732f",
            "0x648e94a1"
        ]
    );

    let gas: Vec<u64> = sent.iter().map(|c| c.gas_limit).collect();
    assert_eq!(
        gas,
        vec![1_000_000, 2_000_000, 500_000, 2_000_000, 2_000_000, 1_000_000, 1_000_000]
    );
}

#[test]
fn submitter_errors_surface_to_caller() {
    let client = StakingClient::new(RejectingWallet, &NetworkConfig::pwroko_dev());
    assert!(matches!(
        client.withdraw_unbonded(),
        Err(PwRokoError::Submission(_))
    ));
}

#[test]
fn wallet_on_other_chain_is_refused() {
    let wallet = FakeWallet {
        chain_id: Some(1),
        ..Default::default()
    };
    let client = StakingClient::new(&wallet, &NetworkConfig::pwroko_dev());

    for result in [
        client.lock(tokens(1)),
        client.bond(tokens(1), PayeeType::Staked),
        client.withdraw_unbonded(),
    ] {
        assert!(matches!(
            result,
            Err(PwRokoError::WrongChain {
                expected: 442,
                actual: 1
            })
        ));
    }
    assert!(wallet.sent.borrow().is_empty());
}

#[test]
fn custom_chain_id_must_match_wallet() {
    let config = NetworkConfig::from_json(r#"{ "chain_id": 7777 }"#).unwrap();

    let on_dev = FakeWallet::default();
    assert!(matches!(
        StakingClient::new(&on_dev, &config).withdraw_unbonded(),
        Err(PwRokoError::WrongChain { .. })
    ));

    let on_custom = FakeWallet {
        chain_id: Some(7777),
        ..Default::default()
    };
    StakingClient::new(&on_custom, &config).withdraw_unbonded().unwrap();
    assert_eq!(on_custom.sent.borrow().len(), 1);
}

#[test]
fn custom_network_routes_to_configured_precompile() {
    let config = NetworkConfig::from_json(
        r#"{ "precompiles": { "pwroko": { "address": "0x0000000000000000000000000000000000000800" } } }"#,
    )
    .unwrap();
    let wallet = FakeWallet::default();
    let client = StakingClient::new(&wallet, &config);

    client.lock(tokens(1)).unwrap();
    assert_eq!(wallet.sent.borrow()[0].to, config.precompiles.pwroko.address);
}

// ─── FFI surface ───────────────────────────────────────────────────

fn dev_network() -> Arc<PwRokoNetwork> {
    PwRokoNetwork::new(None).unwrap()
}

#[test]
fn encode_bond_from_decimal_text() {
    let call = dev_network().encode_bond("5".into(), Payee::Staked).unwrap();

    assert_eq!(call.to, "0x0000000000000000000000000000000000000700");
    assert_eq!(call.data.len(), 37);
    assert_eq!(call.data[36], 0x00);
    assert_eq!(call.gas_limit, 2_000_000);
    assert_eq!(
        U256::from_be_slice(&call.data[4..36]),
        U256::from(5) * ONE_TOKEN
    );
}

#[test]
fn encode_rejects_negative_amount() {
    let network = dev_network();
    for result in [
        network.encode_bond("-5".into(), Payee::Stash),
        network.encode_unbond("-0.1".into()),
        network.encode_lock("-1".into()),
        network.encode_unlock_request("-2".into()),
    ] {
        assert!(matches!(result, Err(PwRokoError::InvalidArgument(_))));
    }
}

#[test]
fn encode_nominate_validates_addresses() {
    let network = dev_network();

    let call = network
        .encode_nominate(vec![ALITH.into(), BALTATHAR.into()])
        .unwrap();
    assert_eq!(call.data.len(), 100);
    assert_eq!(call.gas_limit, 500_000);

    assert!(matches!(
        network.encode_nominate(vec!["0xdead".into()]),
        Err(PwRokoError::InvalidAddress(_))
    ));
    assert!(matches!(
        network.encode_nominate(vec![]),
        Err(PwRokoError::EmptyValidatorList)
    ));
}

#[test]
fn encode_balance_query_is_read_only() {
    let call = dev_network()
        .encode_balance_query(BalanceQuery::PendingUnlock, ALITH.into())
        .unwrap();

    assert_eq!(call.gas_limit, 0);
    assert_eq!(call.to, "0x0000000000000000000000000000000000000500");
    assert_eq!(hex::encode(&call.data[..4]), "b52c8714");
}

#[test]
fn network_with_custom_config() {
    let network = PwRokoNetwork::new(Some(r#"{ "gas": { "staking": 3000000 } }"#.into())).unwrap();
    assert_eq!(network.encode_withdraw_unbonded().unwrap().gas_limit, 3_000_000);

    assert!(matches!(
        PwRokoNetwork::new(Some("not json".into())),
        Err(PwRokoError::Config(_))
    ));
}

#[test]
fn network_chain_guard() {
    let network = dev_network();
    assert_eq!(network.chain_id_hex(), "0x1ba");
    assert!(network.ensure_chain(442).is_ok());
    assert!(matches!(
        network.ensure_chain(1),
        Err(PwRokoError::WrongChain { .. })
    ));
}

#[test]
fn amount_helpers() {
    let network = dev_network();
    assert_eq!(network.format_amount("0".into()).unwrap(), "0");
    assert_eq!(network.format_amount("1000000000000000000".into()).unwrap(), "1");
    assert_eq!(network.format_amount("1500000000000000000".into()).unwrap(), "1.5");
    assert_eq!(network.format_amount("123".into()).unwrap(), "0.000000000000000123");
    assert_eq!(
        network.format_amount_short("1234567890000000000".into()).unwrap(),
        "1.234567"
    );

    assert_eq!(network.parse_amount("1.5".into()).unwrap(), "1500000000000000000");
    assert!(network.parse_amount("-1".into()).is_err());

    assert_eq!(percentage_bps("1".into(), "4".into()).unwrap(), 2_500);
}

#[test]
fn six_decimal_network_formats_what_it_parses() {
    let network = PwRokoNetwork::new(Some(r#"{ "decimals": 6 }"#.into())).unwrap();

    let call = network.encode_lock("1".into()).unwrap();
    assert_eq!(U256::from_be_slice(&call.data[4..36]), U256::from(1_000_000u64));

    assert_eq!(network.parse_amount("1".into()).unwrap(), "1000000");
    assert_eq!(network.format_amount("1000000".into()).unwrap(), "1");
    assert_eq!(network.format_amount("1234567".into()).unwrap(), "1.234567");
    assert_eq!(network.format_amount_short("1234567".into()).unwrap(), "1.234567");

    let summary = network
        .summarize_balances(RawBalanceResponses {
            free: word(Amount::from(2_500_000u64)),
            staked: Some(word(Amount::from(500_000u64))),
            native: Some("0xf4240".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(summary.native.as_deref(), Some("1"));
    assert_eq!(summary.free, "2.5");
    assert_eq!(summary.staked, "0.5");
    assert_eq!(summary.total_owned, "3");
}

#[test]
fn decode_helpers() {
    assert_eq!(decode_amount(vec![]).unwrap(), "0");
    assert_eq!(decode_amount(word(tokens(2))).unwrap(), "2000000000000000000");
    assert!(decode_amount(vec![1, 2, 3]).is_err());

    let mut ok = vec![0u8; 32];
    ok[31] = 1;
    assert!(decode_bool(ok).unwrap());
    assert!(!decode_bool(vec![]).unwrap());
}

#[test]
fn summarize_balances_uses_fallback_and_formats() {
    let summary = dev_network()
        .summarize_balances(RawBalanceResponses {
            free: word(Amount::from(1_500_000_000_000_000_000u128)),
            staked: None,
            bonded: Some(word(tokens(2))),
            pending_unlock: Vec::new(),
            ready_unlock: word(Amount::from(500_000_000_000_000_000u128)),
            native: Some("0x1bc16d674ec80000".into()),
        })
        .unwrap();

    assert_eq!(summary.native.as_deref(), Some("2"));
    assert_eq!(summary.free, "1.5");
    assert_eq!(summary.staked, "2");
    assert_eq!(summary.pending_unlock, "0");
    assert_eq!(summary.ready_unlock, "0.5");
    assert_eq!(summary.total_owned, "4");
    assert_eq!(summary.free_bps, 3_750);
    assert_eq!(summary.staked_bps, 5_000);
    assert_eq!(summary.pending_unlock_bps, 0);
    assert_eq!(summary.ready_unlock_bps, 1_250);
}

#[test]
fn summarize_balances_rejects_bad_input() {
    let network = dev_network();

    let truncated = network.summarize_balances(RawBalanceResponses {
        free: vec![0u8; 4],
        ..Default::default()
    });
    assert!(matches!(truncated, Err(PwRokoError::MalformedResponse(_))));

    let bad_native = network.summarize_balances(RawBalanceResponses {
        native: Some("12".into()),
        ..Default::default()
    });
    assert!(matches!(bad_native, Err(PwRokoError::InvalidArgument(_))));

    let summary = network.summarize_balances(RawBalanceResponses::default()).unwrap();
    assert_eq!(summary.native, None);
}

#[test]
fn default_config_json_parses_back() {
    let json = default_network_config_json().unwrap();
    assert_eq!(NetworkConfig::from_json(&json).unwrap(), NetworkConfig::pwroko_dev());
}
