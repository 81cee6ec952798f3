
pub mod delivery_test;

use soroban_sdk::{
    testutils::{Address as _, Ledger, LedgerInfo},
    token, Address, Bytes, Env,
};

use crate::test::mock::{MockConfidential, MockConfidentialClient};
use crate::{AuctionContract, AuctionContractClient, CLAIM_STAKE, LISTING_FEE};

pub struct TestCtx {
    pub env: Env,
    pub client: AuctionContractClient<'static>,
    pub confidential: MockConfidentialClient<'static>,
    pub token: token::TokenClient<'static>,
    pub contract_id: Address,
    pub admin: Address,
    pub seller: Address,
}

pub fn setup_test() -> TestCtx {
    let env = Env::default();
    env.mock_all_auths();

    env.ledger().set(LedgerInfo {
        timestamp: 1000,
        protocol_version: 23,
        sequence_number: 1,
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 100,
        min_persistent_entry_ttl: 100,
        max_entry_ttl: 3110400,
    });

    let contract_id = env.register(AuctionContract, ());
    let client = AuctionContractClient::new(&env, &contract_id);

    let confidential_id = env.register(MockConfidential, ());
    let confidential = MockConfidentialClient::new(&env, &confidential_id);

    let admin = Address::generate(&env);
    let seller = Address::generate(&env);

    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin.clone());
    let token_address = sac.address();
    let token = token::TokenClient::new(&env, &token_address);
    let token_admin_client = token::StellarAssetClient::new(&env, &token_address);
    token_admin_client.mint(&seller, &(LISTING_FEE * 100));

    client.initialize(&admin, &token_address, &confidential_id, &confidential_id);

    TestCtx {
        env,
        client,
        confidential,
        token,
        contract_id,
        admin,
        seller,
    }
}

pub fn advance_ledger(env: &Env, seconds: u64) {
    env.ledger().set(LedgerInfo {
        timestamp: env.ledger().timestamp() + seconds,
        protocol_version: 23,
        sequence_number: env.ledger().sequence(),
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 100,
        min_persistent_entry_ttl: 100,
        max_entry_ttl: 3110400,
    });
}

/// Register a bidder: confidential balance on the mock ledger, payment
/// tokens for the claim stake, and the auction contract as their operator.
pub fn new_bidder(ctx: &TestCtx, confidential_balance: u64) -> Address {
    let bidder = Address::generate(&ctx.env);
    ctx.confidential.mint(&bidder, &confidential_balance);
    ctx.confidential.set_operator(&bidder, &ctx.contract_id);

    let token_admin_client =
        token::StellarAssetClient::new(&ctx.env, &ctx.token.address);
    token_admin_client.mint(&bidder, &(CLAIM_STAKE * 10));

    bidder
}

/// The mock "encryption": the plaintext little-endian bytes plus a
/// one-byte stand-in admission proof.
pub fn encipher(env: &Env, amount: u64) -> (Bytes, Bytes) {
    let ciphertext = Bytes::from_array(env, &amount.to_le_bytes());
    let proof = Bytes::from_array(env, &[1u8]);
    (ciphertext, proof)
}

/// An auction open for bids from the current timestamp until now + 3600.
pub fn create_open_auction(ctx: &TestCtx) -> u64 {
    let now = ctx.env.ledger().timestamp();
    ctx.client.create_auction(
        &ctx.seller,
        &soroban_sdk::String::from_str(&ctx.env, "ipfs://lot-metadata"),
        &now,
        &(now + 3600),
        &None,
        &LISTING_FEE,
    )
}
