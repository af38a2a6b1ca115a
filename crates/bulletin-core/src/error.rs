use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The service returned grouping fields that do not match the expected
    /// row shape for the query.
    #[error("result row does not match the expected grouping fields: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("cannot assemble an empty list of window tables")]
    EmptyAssembly,

    #[error("article id {0:?} does not start with a numeric segment")]
    BadArticleId(String),

    #[error("author list is empty")]
    EmptyAuthors,
}
