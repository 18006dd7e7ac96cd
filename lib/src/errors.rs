use serde::Deserialize;
use std::env::VarError;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;
use crate::ChannelMsg;

pub type TickerwatchResult<T> = Result<T, TickerwatchError>;

#[derive(Debug, Error)]
pub enum TickerwatchError {
    #[error("BackendContentError: {0}")]
    Backend(BackendContentError),
    #[error("UnknownSymbol: {0}")]
    UnknownSymbol(String),
    #[error("Reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Io: {0}")]
    Io(#[from] std::io::Error),
    #[error("ParseFloat: {0}")]
    ParseFloat(#[from] ParseFloatError),
    #[error("ParseInt: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("ParseBool: {0}")]
    ParseBool(#[from] ParseBoolError),
    #[error("ParseDate: {0}")]
    ParseDate(#[from] chrono::ParseError),
    #[error("UrlParser: {0}")]
    UrlParser(#[from] url::ParseError),
    #[error("Json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("EnvMissing: {0}")]
    EnvMissing(#[from] VarError),
    #[error("SendChannelMsgError: {0}")]
    SendChannelMsgError(#[from] crossbeam::channel::SendError<ChannelMsg>),
    #[error("JoinError: {0}")]
    JoinError(#[from] tokio::task::JoinError),
    #[error("Anyhow: {0}")]
    Anyhow(#[from] anyhow::Error),
    #[error("Custom: {0}")]
    Custom(String),
}

impl ResponseError for TickerwatchError {
    fn status_code(&self) -> StatusCode {
        match &self {
            Self::UnknownSymbol(_) => StatusCode::BAD_REQUEST,
            Self::ParseFloat(_) => StatusCode::BAD_REQUEST,
            Self::ParseBool(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

/// Error payload the backend returns alongside non-success statuses.
#[derive(Debug, Clone, Deserialize, Error)]
pub struct BackendContentError {
    #[serde(default)]
    pub status: u16,
    pub error: String,
}

impl std::fmt::Display for BackendContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "BackendContentError: status: {}, error: {}", self.status, self.error)
    }
}
