use soroban_sdk::{contracttype, Address, String};

use crate::confidential::CipherHandle;

/// Storage keys for the Cloakbid auction contract.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract configuration (instance)
    Config,
    /// Last allocated auction id (instance)
    AuctionCounter,
    /// Platform fee accumulator in payment-token units (instance)
    FeesCollected,
    /// Reentrancy flag, set while a mutating entry point runs (instance)
    Guard,
    /// Auction data by id
    Auction(u64),
    /// Cumulative bid per (auction, bidder)
    Bid(u64, Address),
    /// Claim record per (auction, bidder)
    Claim(u64, Address),
    /// Roster of distinct bidders per auction
    Bidders(u64),
    /// Auction ids created by an address
    CreatedBy(Address),
    /// Auction ids an address has bid in
    BidIn(Address),
}

/// Contract configuration, set once at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Platform owner: arbitration, fee withdrawal, pause
    pub admin: Address,
    /// Plaintext token used for listing fees and claim stakes
    pub payment_token: Address,
    /// Confidential arithmetic coprocessor
    pub compute: Address,
    /// Confidential token ledger holding the encrypted funds
    pub ledger: Address,
    /// Global circuit breaker for create/bid/claim
    pub is_paused: bool,
}

/// Post-settlement goods-delivery state.
///
/// `NotShipped -> Shipped -> Received`, with `Shipped -> Disputed ->
/// Arbitrated` as the dispute branch. Status never regresses; `Arbitrated`
/// is terminal, and `Received` is the resting state once escrow is released.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeliveryStatus {
    NotShipped = 0,
    Shipped = 1,
    Received = 2,
    Disputed = 3,
    Arbitrated = 4,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Auction {
    pub id: u64,
    pub seller: Address,
    /// Opaque off-chain metadata reference
    pub metadata: String,
    /// Listing fee actually paid at creation
    pub listing_fee_paid: i128,
    pub start_time: u64,
    /// Fixed at creation, never mutated
    pub end_time: u64,
    /// Advisory plaintext floor; bids are encrypted, so this is a signal to
    /// bidders rather than an enforced bound
    pub minimum_bid: Option<u64>,
    /// Encrypted running maximum bid; None until the first bid lands
    pub highest_bid: Option<CipherHandle>,
    /// Best-effort plaintext pointer to the current leading bidder. Advisory
    /// only: an address cannot be homomorphically selected, so leadership is
    /// re-confirmed during settlement.
    pub leading_bidder: Option<Address>,
    pub leading_bid_time: u64,
    /// Confirmed winner, assigned during settlement and re-pointed only by
    /// tie-break displacement or arbitration
    pub winner: Option<Address>,
    pub winner_bid_time: u64,
    /// Encrypted cumulative amount routed toward the seller; the
    /// no-double-sale guard
    pub sold_total: Option<CipherHandle>,
    /// Encrypted funds held until delivery confirmation
    pub escrow: Option<CipherHandle>,
    pub delivery: DeliveryStatus,
    pub shipped_at: u64,
    /// Carrier/tracking reference supplied at shipment
    pub tracking: String,
    /// Reason supplied when the winner raised a dispute
    pub dispute_reason: String,
}

/// A bidder's cumulative encrypted bid in one auction.
///
/// Increase-only: each bid call adds to the previous total. Kept forever for
/// settlement comparison and audit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidRecord {
    /// Handle to the encrypted running total
    pub total: CipherHandle,
    /// Plaintext timestamp of the most recent contribution; tie-break input,
    /// never an amount proxy
    pub last_bid_time: u64,
}

/// Per-(auction, bidder) settlement record.
///
/// `claimed` flips false -> true exactly once; `stake` drops to zero exactly
/// once via the separate stake withdrawal step.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimRecord {
    pub claimed: bool,
    pub stake: i128,
}
