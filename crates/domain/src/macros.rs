//! Macro for implementing Display and FromStr for named enums
//!
//! Store views and similar identifiers are plain strings on the wire. This
//! macro provides both conversions from a single mapping table. Parsing is
//! exact, so names must match the mapping byte for byte.
//!
//! # Example
//!
//! ```rust
//! use flashback_domain::impl_domain_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Deck {
//!     Primary,
//!     Archive,
//! }
//!
//! impl_domain_name_conversions!(Deck {
//!     Primary => "Primary",
//!     Archive => "Archive",
//! });
//!
//! assert_eq!("Primary".parse::<Deck>(), Ok(Deck::Primary));
//! assert!("primary".parse::<Deck>().is_err());
//! assert_eq!(Deck::Archive.to_string(), "Archive");
//! ```

/// Implements Display and FromStr traits for named enums
///
/// * Display writes the mapped string verbatim
/// * FromStr accepts only the exact mapped string
#[macro_export]
macro_rules! impl_domain_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == $str {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
