//! Macro for implementing Display and FromStr for status-like enums
//!
//! Status values travel through logs, config files and serialized summaries
//! as lowercase strings. Parsing is case-insensitive.
//!
//! # Example
//!
//! ```rust
//! use raincheck_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Forecast {
//!     Dry,
//!     Showers,
//! }
//!
//! impl_domain_status_conversions!(Forecast {
//!     Dry => "dry",
//!     Showers => "showers",
//! });
//!
//! assert_eq!(Forecast::Showers.to_string(), "showers");
//! assert_eq!("DRY".parse::<Forecast>(), Ok(Forecast::Dry));
//! ```

/// Implements Display and FromStr for enums with a fixed string form
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of variants to lowercase strings
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Stable lowercase label
            pub const fn as_str(&self) -> &'static str {
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

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Sky {
        Clear,
        Overcast,
        Stormy,
    }

    impl_domain_status_conversions!(Sky {
        Clear => "clear",
        Overcast => "overcast",
        Stormy => "stormy",
    });

    #[test]
    fn displays_lowercase_label() {
        assert_eq!(Sky::Clear.to_string(), "clear");
        assert_eq!(Sky::Stormy.as_str(), "stormy");
    }

    #[test]
    fn parses_any_case_and_surrounding_whitespace() {
        assert_eq!(Sky::from_str("OVERCAST").unwrap(), Sky::Overcast);
        assert_eq!(Sky::from_str(" Stormy ").unwrap(), Sky::Stormy);
    }

    mod with_result_alias {
        #[allow(unused_imports)]
        use crate::errors::Result;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub(super) enum Wind {
            Calm,
            Gusty,
        }

        impl_domain_status_conversions!(Wind {
            Calm => "calm",
            Gusty => "gusty",
        });
    }

    #[test]
    fn expands_next_to_the_crate_result_alias() {
        use with_result_alias::Wind;

        assert_eq!(Wind::from_str("gusty").unwrap(), Wind::Gusty);
        assert_eq!(Wind::Calm.to_string(), "calm");
    }

    #[test]
    fn rejects_unknown_label() {
        let err = Sky::from_str("drizzle").unwrap_err();
        assert!(err.contains("Invalid Sky: drizzle"));
        assert!(Sky::from_str("").is_err());
    }
}
