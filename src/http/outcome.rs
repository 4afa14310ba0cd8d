use crate::http::response::{Response, StatusCode};
use crate::http::writer::{BAD_REQUEST, NOT_FOUND, ResponseWriter};

/// Result of handling one request, before it is put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The whole file, read into memory.
    Success(Vec<u8>),
    NotFound,
    BadRequest,
    /// Nothing is sent back for this one; the connection is just closed.
    InternalError,
}

impl Outcome {
    /// Status the client will see, or `None` when nothing is written.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Outcome::Success(_) => Some(StatusCode::Ok),
            Outcome::NotFound => Some(StatusCode::NotFound),
            Outcome::BadRequest => Some(StatusCode::BadRequest),
            Outcome::InternalError => None,
        }
    }

    /// Frames the outcome for writing.
    ///
    /// The 404 and 400 replies come from the process-wide pre-rendered copies.
    pub fn into_writer(self) -> Option<ResponseWriter> {
        match self {
            Outcome::Success(content) => Some(ResponseWriter::new(&Response::ok(content))),
            Outcome::NotFound => Some(ResponseWriter::from_bytes(NOT_FOUND.clone())),
            Outcome::BadRequest => Some(ResponseWriter::from_bytes(BAD_REQUEST.clone())),
            Outcome::InternalError => None,
        }
    }
}
