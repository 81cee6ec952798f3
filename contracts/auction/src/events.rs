use soroban_sdk::{contractevent, Address, String};

/// Event emitted when an auction is created
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCreatedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub seller: Address,
    pub start_time: u64,
    pub end_time: u64,
}

/// Event emitted when a bid lands; the amount stays confidential
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidPlacedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub bidder: Address,
}

/// Event emitted when a bidder claims after auction end
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub claimant: Address,
}

/// Event emitted when a claimant withdraws their stake
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeWithdrawnEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub claimant: Address,
    pub amount: i128,
}

/// Event emitted when the admin withdraws collected platform fees
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesWithdrawnEventData {
    #[topic]
    pub admin: Address,
    pub amount: i128,
}

/// Event emitted when the seller confirms shipment
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShipmentConfirmedEventData {
    #[topic]
    pub auction_id: u64,
    pub tracking: String,
}

/// Event emitted when the winner confirms receipt
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptConfirmedEventData {
    #[topic]
    pub auction_id: u64,
}

/// Event emitted when the winner raises a dispute
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeRaisedEventData {
    #[topic]
    pub auction_id: u64,
    pub winner: Address,
}

/// Event emitted when the admin arbitrates a dispute
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeArbitratedEventData {
    #[topic]
    pub auction_id: u64,
    pub refund_to_buyer: bool,
}

/// Event emitted when the seller withdraws escrow after receipt
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowWithdrawnEventData {
    #[topic]
    pub auction_id: u64,
    pub seller: Address,
}

/// Event emitted when escrow is released through the delivery timeout path
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowTimeoutEventData {
    #[topic]
    pub auction_id: u64,
    pub seller: Address,
}

/// Event emitted when the admin pauses or unpauses the contract
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseToggledEventData {
    #[topic]
    pub admin: Address,
    pub is_paused: bool,
}
