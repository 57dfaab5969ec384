//! Purpose: Describe a closed set of record types that share one JSON tag property.
//! Exports: `Union`, `json_union!`.
//! Role: The value <-> type-descriptor half of the bidirectional table; the
//! Role: schema supplies the descriptor <-> tag half.
//! Invariants: `marshal` never emits the tag; `unmarshal` ignores it if present.
//! Invariants: `unmarshal(v.kind(), marshal(v))` reproduces `v`.
use std::fmt;

/// A tagged union over record types, usually an enum with one newtype variant
/// per record. Implement by hand or with [`json_union!`](crate::json_union).
pub trait Union: Sized {
    /// Type descriptor stored in the schema. Compared with `==` only.
    type Kind: Copy + Eq + fmt::Debug;

    fn kind(&self) -> Self::Kind;

    /// Serialize the record body as a JSON object, without the tag.
    fn marshal(&self) -> Result<Vec<u8>, serde_json::Error>;

    /// Deserialize a record of the given kind from the full (tagged) input.
    fn unmarshal(kind: Self::Kind, input: &[u8]) -> Result<Self, serde_json::Error>;
}

/// Declare an enum of newtype variants, a fieldless descriptor enum with the
/// same variant names, and the [`Union`] impl tying them together.
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// pub struct Hello {
///     target: String,
/// }
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// pub struct Goodbye {
///     #[serde(rename = "untilWhen")]
///     until_when: String,
/// }
///
/// jsonvariant::json_union! {
///     #[derive(Debug, PartialEq)]
///     pub enum Action / ActionKind {
///         Hello(Hello),
///         Goodbye(Goodbye),
///     }
/// }
///
/// let coder = jsonvariant::api::Coder::<Action>::new(
///     jsonvariant::api::Schema::new("type")
///         .with_entry("hello", ActionKind::Hello)
///         .with_entry("goodbye", ActionKind::Goodbye),
/// );
/// let encoded = coder
///     .encode(&Action::Goodbye(Goodbye { until_when: "soon".into() }))
///     .unwrap();
/// assert_eq!(encoded, br#"{"type": "goodbye","untilWhen":"soon"}"#);
/// ```
#[macro_export]
macro_rules! json_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident / $kind:ident {
            $($variant:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($variant($ty),)+
        }

        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        $vis enum $kind {
            $($variant,)+
        }

        impl $crate::api::Union for $name {
            type Kind = $kind;

            fn kind(&self) -> $kind {
                match self {
                    $($name::$variant(_) => $kind::$variant,)+
                }
            }

            fn marshal(
                &self,
            ) -> ::std::result::Result<::std::vec::Vec<u8>, $crate::api::JsonError> {
                match self {
                    $($name::$variant(value) => $crate::json::to_vec(value),)+
                }
            }

            fn unmarshal(
                kind: $kind,
                input: &[u8],
            ) -> ::std::result::Result<Self, $crate::api::JsonError> {
                match kind {
                    $($kind::$variant => $crate::json::from_slice(input).map($name::$variant),)+
                }
            }
        }
    };
}
