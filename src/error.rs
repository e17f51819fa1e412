use thiserror::Error;

/// Errors for calls that are programming mistakes rather than expected misses.
///
/// Lookups that simply find nothing (a failed advance, deleting an absent
/// word, an empty prediction set) are reported through return values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
