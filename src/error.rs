use thiserror::Error;

/// Errors produced by table construction, model fitting and scoring.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("table capacity must be positive")]
    InvalidCapacity,

    #[error("load factor must be in (0, 1], got {0}")]
    InvalidLoadFactor(f64),

    #[error("growth factor must be greater than 1, got {0}")]
    InvalidGrowthFactor(usize),

    #[error("order must satisfy 0 < k < {len}, got k = {k}")]
    InvalidOrder { k: usize, len: usize },

    #[error("text must not be empty")]
    EmptyText,

    #[error("unknown backend {0:?}, expected \"hashtable\" or \"dict\"")]
    UnknownBackend(String),

    /// The probe sequence wrapped around the whole table without finding a
    /// slot for `key`. The table is left unchanged.
    #[error("table exhausted: no slot for key {key:?} in {capacity} slots")]
    TableExhausted { key: String, capacity: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
