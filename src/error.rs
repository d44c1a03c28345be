//! Error management.

use derive_more::Display;

#[derive(Debug, Display)]
pub enum Error {
    #[display(
        fmt = "malformed record at line {}: expected two id fields, found {} fields",
        line,
        fields
    )]
    MalformedRecord { line: u64, fields: usize },
    #[display(fmt = "cannot open {}: {}", path, source)]
    SourceUnavailable {
        path: String,
        source: std::io::Error,
    },
    #[display(fmt = "more than {} distinct ids", num_vertices)]
    TooManyVertices { num_vertices: usize },
    #[display(fmt = "{}", _0)]
    Csv(csv::Error),
    #[display(fmt = "{}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedRecord { .. } | Error::TooManyVertices { .. } => None,
            Error::SourceUnavailable { source, .. } => Some(source),
            Error::Csv(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
