//! Identity: sign-in and profiles.

use recwire_codec::{record, wire_enum, ArrayView};
use serde::{Deserialize, Serialize};

use crate::{Id, Token};

wire_enum! {
    /// Second factor presented with a sign-in.
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ChallengeKind: u8 {
        Otp = 1,
        Captcha = 2,
    }
}

record! {
    /// Phone sign-in with a one-time code or captcha answer.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SignInRequest {
        #[serde(with = "crate::hex::array")]
        pub device_id: Token,
        pub challenge: ChallengeKind,
        pub requested_at: i64,
        pub phone: String,
        pub answer: String,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SignInResponse {
        #[serde(with = "crate::hex::array")]
        pub user_id: Id,
        #[serde(with = "crate::hex::array")]
        pub session_token: Token,
        pub expires_at: i64,
        pub display_name: String,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Profile {
        #[serde(with = "crate::hex::array")]
        pub user_id: Id,
        pub display_name: String,
        #[serde(with = "crate::hex::bytes")]
        pub avatar: Vec<u8>,
        #[serde(with = "crate::hex::array_list")]
        pub org_ids: Vec<Id>,
    }
}

record! {
    /// Borrowed form of [`Profile`], decoded straight out of a receive buffer.
    #[derive(Debug, Clone, Copy)]
    pub struct ProfileView<'a> {
        pub user_id: Id,
        pub display_name: &'a str,
        pub avatar: &'a [u8],
        pub org_ids: ArrayView<'a, 32>,
    }
}

impl ProfileView<'_> {
    pub fn to_profile(&self) -> Profile {
        Profile {
            user_id: self.user_id,
            display_name: self.display_name.to_string(),
            avatar: self.avatar.to_vec(),
            org_ids: self.org_ids.to_vec(),
        }
    }
}

impl<'a> From<&'a Profile> for ProfileView<'a> {
    fn from(profile: &'a Profile) -> Self {
        Self {
            user_id: profile.user_id,
            display_name: &profile.display_name,
            avatar: &profile.avatar,
            org_ids: ArrayView::from(profile.org_ids.as_slice()),
        }
    }
}
