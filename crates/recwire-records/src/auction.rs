//! Auctions over quiddities.

use recwire_codec::{record, wire_enum};
use serde::{Deserialize, Serialize};

use crate::quiddity::QuiddityRef;
use crate::{Id, Token};

wire_enum! {
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AuctionStatus: u8 {
        Draft = 0,
        Open = 1,
        Closed = 2,
        Settled = 3,
        Cancelled = 4,
    }
}

record! {
    /// An amount in minor units of an ISO 4217 numeric currency.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Money {
        pub amount_minor: i64,
        pub currency: u16,
    }
}

record! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Bid {
        #[serde(with = "crate::hex::array")]
        pub bidder_id: Id,
        pub amount: Money,
        pub placed_at: i64,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PlaceBidRequest {
        #[serde(with = "crate::hex::array")]
        pub auction_id: Id,
        #[serde(with = "crate::hex::array")]
        pub idempotency_key: Token,
        pub bid: Bid,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Auction {
        #[serde(with = "crate::hex::array")]
        pub id: Id,
        pub lot: QuiddityRef,
        pub status: AuctionStatus,
        pub reserve: Money,
        pub highest_bid: Bid,
        pub opens_at: i64,
        pub closes_at: i64,
        #[serde(with = "crate::hex::array_list")]
        pub bidder_ids: Vec<Id>,
        pub terms: String,
    }
}
