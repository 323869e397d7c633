use thiserror::Error;

/// Errors reported by graph construction and the search engine.
///
/// Removal operations never produce an `Error`; they report failure through
/// their `bool` return value. A search that finds no path is not an error
/// either.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("balance must lie within [0, 1], got {0}")]
    BalanceOutOfRange(f64),

    #[error("edge weight must be non-negative, got {0}")]
    NegativeWeight(f64),

    #[error("edge endpoint is not a member of the graph")]
    EndpointNotMember,

    #[error("bounding box requires at least one node")]
    EmptyCollection,

    #[error("graph contains no nodes")]
    EmptyGraph,

    #[error("search has not been initialized")]
    NotInitialized,

    #[error("search has not ended")]
    SearchNotEnded,
}
