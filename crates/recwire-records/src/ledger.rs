//! Financial ledger entries.

use recwire_codec::{record, wire_enum};
use serde::{Deserialize, Serialize};

use crate::auction::Money;
use crate::Id;

wire_enum! {
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum LedgerKind: u8 {
        Credit = 1,
        Debit = 2,
        Hold = 3,
        Release = 4,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LedgerEntry {
        #[serde(with = "crate::hex::array")]
        pub id: Id,
        #[serde(with = "crate::hex::array")]
        pub account_id: Id,
        pub kind: LedgerKind,
        pub amount: Money,
        pub balance_after: i64,
        pub created_at: i64,
        pub reference: String,
    }
}

record! {
    /// A page of entry ids for one account, newest first.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LedgerPage {
        #[serde(with = "crate::hex::array")]
        pub account_id: Id,
        pub total: u64,
        #[serde(with = "crate::hex::array_list")]
        pub entry_ids: Vec<Id>,
        pub next_cursor: String,
    }
}
