//! Declarative record and enum definitions.
//!
//! [`record!`](crate::record!) turns a struct definition into a wire record:
//! the field list in declaration order is the layout, so offsets can never
//! drift from the struct. Records may themselves be fields of other records.
//!
//! ```
//! recwire_codec::record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Transfer {
//!         pub id: [u8; 32],
//!         pub amount: u64,
//!         pub note: String,
//!     }
//! }
//!
//! let value = Transfer { id: [7; 32], amount: 10, note: "hello".into() };
//! let buf = recwire_codec::encode_to_vec(&value, 0);
//! assert_eq!(buf.len(), 53);
//! assert_eq!(recwire_codec::decode::<Transfer>(&buf, 0).unwrap(), value);
//! ```
//!
//! A record with one lifetime parameter decodes as a zero-copy view:
//!
//! ```
//! recwire_codec::record! {
//!     pub struct TransferView<'a> {
//!         pub id: [u8; 32],
//!         pub amount: u64,
//!         pub note: &'a str,
//!     }
//! }
//! ```

/// Declare a struct together with its layout, encoder and decoder.
#[macro_export]
macro_rules! record {
    (
        @impl [$($gen:tt)*] [$($self_ty:tt)*] $de:lifetime;
        $( $field:ident : $ty:ty ),*
    ) => {
        impl $($gen)* $crate::Layout for $($self_ty)* {
            const STACK_LEN: u32 = 0 $( + <$ty as $crate::Layout>::STACK_LEN )*;
            const KIND: $crate::FieldKind = $crate::FieldKind::Composite;
            const FIELDS: &'static [$crate::FieldSpec] = &[
                $(
                    $crate::FieldSpec {
                        name: stringify!($field),
                        ty: stringify!($ty),
                        width: <$ty as $crate::Layout>::STACK_LEN,
                        kind: <$ty as $crate::Layout>::KIND,
                        fields: <$ty as $crate::Layout>::FIELDS,
                    },
                )*
            ];

            #[allow(unused_mut, unused_variables)]
            fn heap_len(&self) -> u32 {
                let mut len: u32 = 0;
                $( len = $crate::add_len(len, $crate::Layout::heap_len(&self.$field)); )*
                len
            }
        }

        impl $($gen)* $crate::Encode for $($self_ty)* {
            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn encode_at(&self, enc: &mut $crate::Encoder<'_>, at: u32, heap: u32) -> u32 {
                let mut at = at;
                let mut heap = heap;
                $(
                    heap = $crate::Encode::encode_at(&self.$field, enc, at, heap);
                    at += <$ty as $crate::Layout>::STACK_LEN;
                )*
                heap
            }
        }

        impl<$de> $crate::Decode<$de> for $($self_ty)* {
            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn decode_at(dec: &$crate::Decoder<$de>, at: u32) -> $crate::Result<Self> {
                let mut at = at;
                $(
                    let $field = <$ty as $crate::Decode<$de>>::decode_at(dec, at)?;
                    at += <$ty as $crate::Layout>::STACK_LEN;
                )*
                Ok(Self { $( $field ),* })
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident<$lt:lifetime> {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name<$lt> {
            $( $(#[$fmeta])* $fvis $field : $ty, )*
        }

        $crate::record! { @impl [<$lt>] [$name<$lt>] $lt; $( $field : $ty ),* }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field : $ty, )*
        }

        $crate::record! { @impl [] [$name] 'de; $( $field : $ty ),* }
    };
}

/// Declare a fieldless enum stored as its fixed-width discriminant.
///
/// Decoding a value with no declared variant fails with
/// [`DecodeError::InvalidDiscriminant`](crate::DecodeError::InvalidDiscriminant).
/// The macro derives `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq` and `Hash`.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr($repr)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $name {
            /// Every declared variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            pub fn from_repr(value: $repr) -> Option<Self> {
                $(
                    if value == $name::$variant as $repr {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl ::core::convert::TryFrom<$repr> for $name {
            type Error = $crate::DecodeError;

            fn try_from(value: $repr) -> ::core::result::Result<Self, Self::Error> {
                Self::from_repr(value).ok_or($crate::DecodeError::InvalidDiscriminant {
                    ty: stringify!($name),
                    value: i128::from(value),
                })
            }
        }

        impl ::core::convert::From<$name> for $repr {
            fn from(value: $name) -> $repr {
                value as $repr
            }
        }

        impl $crate::Layout for $name {
            const STACK_LEN: u32 = <$repr as $crate::Layout>::STACK_LEN;
            const KIND: $crate::FieldKind = $crate::FieldKind::Scalar;

            fn heap_len(&self) -> u32 {
                0
            }
        }

        impl $crate::Encode for $name {
            fn encode_at(&self, enc: &mut $crate::Encoder<'_>, at: u32, heap: u32) -> u32 {
                $crate::Encode::encode_at(&(*self as $repr), enc, at, heap)
            }
        }

        impl<'de> $crate::Decode<'de> for $name {
            fn decode_at(dec: &$crate::Decoder<'de>, at: u32) -> $crate::Result<Self> {
                let raw = <$repr as $crate::Decode<'de>>::decode_at(dec, at)?;
                <Self as ::core::convert::TryFrom<$repr>>::try_from(raw)
            }
        }
    };
}
