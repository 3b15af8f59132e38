//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create UUID-backed ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe UUID ID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `generate()` for a fresh random (v4) ID, `as_uuid()`
/// - `Display` and `From<Uuid>`
///
/// # Example
///
/// ```rust
/// # use goblin_store_core::define_id;
/// define_id!(ReceiptId);
///
/// let a = ReceiptId::generate();
/// let b = ReceiptId::generate();
/// assert_ne!(a, b);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a new random ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(OrderId);
