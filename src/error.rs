//! Error type shared by every fallible dictionary operation.

use std::error::Error;
use std::fmt;

/// Precondition violations reported by [`OrderedDictionary`](crate::OrderedDictionary).
///
/// Errors are raised before any mutation happens, so a failed call leaves
/// the dictionary exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// The key is already present under the configured strategy.
    DuplicateKey,
    /// The key is not present.
    KeyNotFound,
    /// `position` is outside the range valid for the operation. For
    /// `insert_at` the range is `0..=len`, for everything else `0..len`.
    IndexOutOfRange { position: usize, len: usize },
    /// A bulk operation received an argument it cannot work with.
    InvalidArgument(&'static str),
}

impl Error for DictionaryError {}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryError::DuplicateKey => {
                write!(f, "an entry with the same key already exists")
            }
            DictionaryError::KeyNotFound => write!(f, "the key was not present"),
            DictionaryError::IndexOutOfRange { position, len } => write!(
                f,
                "position {} is out of range for a dictionary of length {}",
                position, len
            ),
            DictionaryError::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DictionaryError;

    #[test]
    fn display_mentions_position_and_len() {
        let e = DictionaryError::IndexOutOfRange {
            position: 7,
            len: 3,
        };
        let s = e.to_string();
        assert!(s.contains('7') && s.contains('3'), "{}", s);
    }

    #[test]
    fn is_std_error() {
        let e: Box<dyn std::error::Error> = Box::new(DictionaryError::KeyNotFound);
        assert_eq!(e.to_string(), "the key was not present");
    }
}
