use std::path::PathBuf;

use thiserror::Error;

use crate::types::Float;

/// Failure that aborts a whole parse.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unable to read wavefront file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read wavefront input: {0}")]
    Read(#[from] std::io::Error),
}

/// Failure confined to a single input line. The line is skipped and parsing goes on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LineError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{command}` expects an argument at position {position}")]
    MissingArgument { command: &'static str, position: usize },

    #[error("invalid vertex index `{0}`")]
    InvalidInteger(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("vertex index {index} resolves to {resolved}, but only {count} vertices are defined")]
    VertexOutOfRange { index: i64, resolved: i64, count: usize },

    #[error("`!}}` without a matching `!{{`")]
    UnmatchedClose,

    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
}

/// Rejected primitive construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PrimitiveError {
    #[error("radius {0} must be finite and greater than zero")]
    NonPositiveRadius(Float),

    #[error("coordinates must be finite")]
    NonFinite,

    #[error("direction vector has zero length")]
    ZeroDirection,

    #[error("facet vertices are collinear")]
    DegenerateFacet,
}

/// A recoverable error together with the line that caused it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LineReport {
    /// 1-based line number in the input.
    pub line: usize,
    pub text: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: LineError,
}

fn serialize_display<S: serde::Serializer>(error: &LineError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
