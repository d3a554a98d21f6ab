//! Organizations and membership.

use recwire_codec::{record, wire_enum};
use serde::{Deserialize, Serialize};

use crate::Id;

wire_enum! {
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum OrgRole: u8 {
        Owner = 1,
        Admin = 2,
        Member = 3,
        Viewer = 4,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CreateOrgRequest {
        #[serde(with = "crate::hex::array")]
        pub owner_id: Id,
        pub created_at: i64,
        pub name: String,
        pub slug: String,
    }
}

record! {
    /// One page of an organization's members holding the same role.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct OrgMembers {
        #[serde(with = "crate::hex::array")]
        pub org_id: Id,
        pub role: OrgRole,
        #[serde(with = "crate::hex::array_list")]
        pub member_ids: Vec<Id>,
        #[serde(with = "crate::hex::bytes")]
        pub next_cursor: Vec<u8>,
    }
}

#[cfg(test)]
mod tests {
    use recwire_codec::{decode, encode_to_vec, DecodeError, Layout};

    use super::*;

    #[test]
    fn member_ids_are_contiguous_on_the_heap() {
        let page = OrgMembers {
            org_id: [9; 32],
            role: OrgRole::Admin,
            member_ids: vec![[1; 32], [2; 32], [3; 32]],
            next_cursor: vec![0xC0],
        };
        assert_eq!(OrgMembers::STACK_LEN, 32 + 1 + 8 + 8);
        assert_eq!(page.heap_len(), 96 + 1);

        let buf = encode_to_vec(&page, 0);
        let heap = OrgMembers::STACK_LEN as usize;
        assert_eq!(&buf[heap..heap + 32], &[1; 32]);
        assert_eq!(&buf[heap + 64..heap + 96], &[3; 32]);
        assert_eq!(buf[heap + 96], 0xC0);
        assert_eq!(decode::<OrgMembers>(&buf, 0).unwrap(), page);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let page = OrgMembers {
            org_id: [0; 32],
            role: OrgRole::Viewer,
            member_ids: Vec::new(),
            next_cursor: Vec::new(),
        };
        let mut buf = encode_to_vec(&page, 0);
        buf[32] = 0;
        assert_eq!(
            decode::<OrgMembers>(&buf, 0).unwrap_err(),
            DecodeError::InvalidDiscriminant {
                ty: "OrgRole",
                value: 0
            }
        );
    }

    #[test]
    fn create_request_roundtrip() {
        let request = CreateOrgRequest {
            owner_id: [0xFF; 32],
            created_at: -1,
            name: "Acme Holdings".into(),
            slug: String::new(),
        };
        let buf = encode_to_vec(&request, 0);
        assert_eq!(buf.len(), 32 + 8 + 8 + 8 + 13);
        assert_eq!(decode::<CreateOrgRequest>(&buf, 0).unwrap(), request);
    }
}
