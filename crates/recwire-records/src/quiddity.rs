//! Catalog items ("quiddities") and the wiki pages attached to them.

use recwire_codec::{record, wire_enum};
use serde::{Deserialize, Serialize};

use crate::Id;

wire_enum! {
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum QuiddityKind: u16 {
        Item = 1,
        Wiki = 2,
        Collection = 3,
    }
}

record! {
    /// Addresses a quiddity within its owning organization.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct QuiddityRef {
        #[serde(with = "crate::hex::array")]
        pub id: Id,
        #[serde(with = "crate::hex::array")]
        pub org_id: Id,
        pub kind: QuiddityKind,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Quiddity {
        pub quiddity: QuiddityRef,
        pub revision: u32,
        pub updated_at: i64,
        pub title: String,
        pub body: String,
        pub published: bool,
    }
}

record! {
    /// Read path for listings: title and body stay in the receive buffer.
    #[derive(Debug, Clone, Copy)]
    pub struct QuiddityView<'a> {
        pub quiddity: QuiddityRef,
        pub revision: u32,
        pub updated_at: i64,
        pub title: &'a str,
        pub body: &'a str,
        pub published: bool,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct WikiPage {
        pub quiddity: QuiddityRef,
        #[serde(with = "crate::hex::array")]
        pub parent_id: Id,
        pub slug: String,
        pub markdown: String,
        #[serde(with = "crate::hex::array_list")]
        pub editor_ids: Vec<Id>,
    }
}

#[cfg(test)]
mod tests {
    use recwire_codec::{decode, encode_to_vec, plan, FieldKind, Layout};

    use super::*;

    fn quiddity(title: &str) -> Quiddity {
        Quiddity {
            quiddity: QuiddityRef {
                id: [1; 32],
                org_id: [2; 32],
                kind: QuiddityKind::Item,
            },
            revision: 3,
            updated_at: 1_650_000_000,
            title: title.into(),
            body: "A lamp.".into(),
            published: true,
        }
    }

    #[test]
    fn ref_is_fixed_size() {
        assert_eq!(QuiddityRef::STACK_LEN, 32 + 32 + 2);
        assert_eq!(
            Quiddity::STACK_LEN,
            QuiddityRef::STACK_LEN + 4 + 8 + 8 + 8 + 1
        );
    }

    #[test]
    fn view_and_owned_decode_the_same_buffer() {
        let owned = quiddity("Brass lamp");
        let buf = encode_to_vec(&owned, 0);

        let view = decode::<QuiddityView<'_>>(&buf, 0).unwrap();
        assert_eq!(view.quiddity, owned.quiddity);
        assert_eq!(view.title, "Brass lamp");
        assert_eq!(view.body, "A lamp.");
        assert!(view.published);
        assert_eq!(decode::<Quiddity>(&buf, 0).unwrap(), owned);
    }

    #[test]
    fn wiki_page_plan_includes_ref_fields() {
        let planned = plan::<WikiPage>();
        let kind = planned
            .iter()
            .find(|f| f.name == "quiddity.kind")
            .unwrap();
        assert_eq!(kind.offset, 64);
        assert_eq!(kind.kind, FieldKind::Scalar);

        let editors = planned.iter().find(|f| f.name == "editor_ids").unwrap();
        assert_eq!(editors.offset, 66 + 32 + 8 + 8);
        assert_eq!(editors.kind, FieldKind::Slice);
    }

    #[test]
    fn wiki_page_roundtrip_with_no_editors() {
        let page = WikiPage {
            quiddity: quiddity("x").quiddity,
            parent_id: [0; 32],
            slug: "getting-started".into(),
            markdown: "# Hello\n".into(),
            editor_ids: Vec::new(),
        };
        let buf = encode_to_vec(&page, 0);
        assert_eq!(decode::<WikiPage>(&buf, 0).unwrap(), page);
    }
}
