//! Newtype IDs for type-safe entity references.
//!
//! The backend assigns identifiers and we never interpret them. Some
//! deployments send integers, others send strings, so every ID wraps a
//! [`RawId`] that remembers which shape it arrived in and serializes back to
//! the same shape.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier as it appeared on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// JSON number.
    Number(i64),
    /// JSON string.
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Macro to define a type-safe opaque ID wrapper.
///
/// Creates a newtype wrapper around [`RawId`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Display`
/// - `From<i64>`, `From<&str>` and `From<String>` implementations
/// - `FromStr`, which keeps all-digit input numeric
///
/// # Example
///
/// ```rust
/// # use product_dashboard_core::define_id;
/// define_id!(UserId);
/// define_id!(ProductId);
///
/// let user_id = UserId::from(1);
/// let product_id = ProductId::from("p-1");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = product_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($crate::types::id::RawId);

        impl $name {
            /// Get the wire representation.
            #[must_use]
            pub const fn as_raw(&self) -> &$crate::types::id::RawId {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self($crate::types::id::RawId::Number(id))
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self($crate::types::id::RawId::Text(id.to_owned()))
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self($crate::types::id::RawId::Text(id))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::core::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(s.parse::<i64>().map_or_else(|_| Self::from(s), Self::from))
            }
        }
    };
}

define_id!(UserId);
define_id!(ProductId);
