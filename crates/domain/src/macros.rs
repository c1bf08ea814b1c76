//! Macro for implementing Display and FromStr for wire-named enums
//!
//! Several domain enums travel over the wire as fixed strings
//! (`"SiteManager"`, `"share"`, ...). This macro keeps the string mapping in
//! one place and gives both directions.
//!
//! # Example
//!
//! ```rust
//! use cmslink_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Direction {
//!     Inbound,
//!     Outbound,
//! }
//!
//! impl_wire_name_conversions!(Direction {
//!     Inbound => "Inbound",
//!     Outbound => "Outbound",
//! });
//!
//! assert_eq!(Direction::Inbound.to_string(), "Inbound");
//! assert_eq!("outbound".parse::<Direction>().unwrap(), Direction::Outbound);
//! ```

/// Implements Display and FromStr traits for wire-named enums
///
/// This macro generates:
/// - Display trait: writes the exact wire name
/// - FromStr trait: parses the wire name, ignoring ASCII case
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their wire names
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire name of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return ::std::result::Result::Ok(Self::$variant);
                    }
                )+
                ::std::result::Result::Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
