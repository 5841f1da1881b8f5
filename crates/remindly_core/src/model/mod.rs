//! Typed reminder records persisted by the core store.
//!
//! # Responsibility
//! - Define one explicit record type per reminder category.
//! - Own the JSON wire shape (camelCase field names, ISO-8601 dates).
//! - Provide write-time and read-time validation for every record type.
//!
//! # Invariants
//! - Every record belongs to exactly one `Category`.
//! - `RecordId` values are generated once and never reassigned.
//! - A persisted record must pass `validate()` both before write and after read.

/// Declares a closed label enum whose serde form is the human label.
///
/// Labels are the exact strings the mobile pickers persist, so they are part
/// of the storage format and must never change.
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $($(#[$variant_meta])* #[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// All variants in picker order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stored/displayed label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Parses an exact stored label.
            pub fn from_label(value: &str) -> Option<Self> {
                match value {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

pub mod category;
pub mod health;
pub mod medicine;
pub mod occasion;
pub mod record;
pub mod temporal;
