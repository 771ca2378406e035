//! Error handling for OBJ loading.
//!
//! Every fatal condition aborts the whole load; nothing is retried and there
//! is no partial result. [`ObjError::kind`] gives a fieldless category for
//! callers that only want to branch on the kind of failure.

use std::fmt;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Attribute stream a face index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    TexCoord,
}

impl AttributeKind {
    pub const fn name(self) -> &'static str {
        match self {
            AttributeKind::Position => "position",
            AttributeKind::Normal => "normal",
            AttributeKind::TexCoord => "texcoord",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObjError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },
    #[error("IO error: {0}")]
    Io(String),
    #[error("line {line}: invalid vertex data, unexpected directive 'v{found}'")]
    InvalidVertexData { line: usize, found: String },
    #[error("line {line}: invalid face data: {reason}")]
    InvalidFaceData { line: usize, reason: String },
    #[error("line {line}: invalid numeric literal '{token}'")]
    InvalidNumericLiteral { line: usize, token: String },
    #[error("{attribute} index {index} is out of range (count={count})")]
    IndexOutOfRange {
        attribute: AttributeKind,
        index: i64,
        count: usize,
    },
    #[error("handle has already been loaded")]
    AlreadyLoaded,
    #[error("loader worker panicked: {0}")]
    WorkerPanicked(String),
}

/// Category of an [`ObjError`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    Io,
    InvalidVertexData,
    InvalidFaceData,
    InvalidNumericLiteral,
    IndexOutOfRange,
    AlreadyLoaded,
    WorkerPanicked,
}

impl ErrorKind {
    /// Returns the name of this error kind as a string
    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::FileNotFound => "FILE_NOT_FOUND",
            ErrorKind::Io => "IO_ERROR",
            ErrorKind::InvalidVertexData => "INVALID_VERTEX_DATA",
            ErrorKind::InvalidFaceData => "INVALID_FACE_DATA",
            ErrorKind::InvalidNumericLiteral => "INVALID_NUMERIC_LITERAL",
            ErrorKind::IndexOutOfRange => "INDEX_OUT_OF_RANGE",
            ErrorKind::AlreadyLoaded => "ALREADY_LOADED",
            ErrorKind::WorkerPanicked => "WORKER_PANICKED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl ObjError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ObjError::FileNotFound { .. } => ErrorKind::FileNotFound,
            ObjError::Io(_) => ErrorKind::Io,
            ObjError::InvalidVertexData { .. } => ErrorKind::InvalidVertexData,
            ObjError::InvalidFaceData { .. } => ErrorKind::InvalidFaceData,
            ObjError::InvalidNumericLiteral { .. } => ErrorKind::InvalidNumericLiteral,
            ObjError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            ObjError::AlreadyLoaded => ErrorKind::AlreadyLoaded,
            ObjError::WorkerPanicked(_) => ErrorKind::WorkerPanicked,
        }
    }

    /// Line the error was detected on, for parse errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            ObjError::InvalidVertexData { line, .. }
            | ObjError::InvalidFaceData { line, .. }
            | ObjError::InvalidNumericLiteral { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn invalid_face(line: usize, reason: impl Into<String>) -> Self {
        ObjError::InvalidFaceData {
            line,
            reason: reason.into(),
        }
    }

    pub fn invalid_number(line: usize, token: impl Into<String>) -> Self {
        ObjError::InvalidNumericLiteral {
            line,
            token: token.into(),
        }
    }
}

impl ObjError {
    /// Maps an I/O failure on `path`; `NotFound` becomes [`ObjError::FileNotFound`].
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            ObjError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            ObjError::Io(format!("{}: {}", path.display(), err))
        }
    }
}

impl From<io::Error> for ObjError {
    fn from(err: io::Error) -> Self {
        ObjError::Io(err.to_string())
    }
}

pub type ObjResult<T> = Result<T, ObjError>;
