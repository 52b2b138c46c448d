//! Macro for implementing Display and FromStr for wire status enums
//!
//! The remote service spells statuses in upper case (`QUEUED`, `ERROR`).
//! Parsing is case-insensitive; output always uses the wire spelling.
//!
//! # Example
//!
//! ```rust
//! use jobwire_domain::impl_wire_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Outcome {
//!     Accepted,
//!     Rejected,
//! }
//!
//! impl_wire_status_conversions!(Outcome {
//!     Accepted => "ACCEPTED",
//!     Rejected => "REJECTED",
//! });
//!
//! assert_eq!(Outcome::Accepted.to_string(), "ACCEPTED");
//! assert_eq!("rejected".parse::<Outcome>().unwrap(), Outcome::Rejected);
//! ```

/// Implements Display and FromStr traits for wire status enums
///
/// `$str` must be the upper-case wire spelling.
#[macro_export]
macro_rules! impl_wire_status_conversions {
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
                match s.to_ascii_uppercase().as_str() {
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
    enum TestStatus {
        Queued,
        Done,
    }

    impl_wire_status_conversions!(TestStatus {
        Queued => "QUEUED",
        Done => "DONE",
    });

    #[test]
    fn test_display_uses_wire_spelling() {
        assert_eq!(TestStatus::Queued.to_string(), "QUEUED");
        assert_eq!(TestStatus::Done.to_string(), "DONE");
    }

    #[test]
    fn test_fromstr_mixed_case() {
        assert_eq!(TestStatus::from_str("queued").unwrap(), TestStatus::Queued);
        assert_eq!(TestStatus::from_str("DoNe").unwrap(), TestStatus::Done);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestStatus::from_str("running");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestStatus: running"));
    }
}
