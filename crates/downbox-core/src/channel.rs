//! The app-layer channel: JSON method calls in, replies out.
//!
//! The only implemented method is `saveToDownloads`; any other name is
//! answered with a notImplemented reply. Payload bytes travel as base64
//! since the envelope is JSON.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::SaveError;
use crate::save::SaveHandler;

/// Wire name of the save operation.
pub const METHOD_SAVE_TO_DOWNLOADS: &str = "saveToDownloads";

/// Incoming method call envelope.
#[derive(Debug, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub args: CallArgs,
}

/// Arguments of `saveToDownloads`. Both are optional on the wire; the
/// handler rejects absent ones.
#[derive(Debug, Default, Deserialize)]
pub struct CallArgs {
    #[serde(default)]
    pub bytes: Option<String>,
    #[serde(default, rename = "fileName")]
    pub file_name: Option<String>,
}

/// Reply envelope written back to the app layer.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodReply {
    Success { result: String },
    Error { code: String, message: String },
    NotImplemented { method: String },
}

impl MethodCall {
    /// Parse one JSON call line.
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

impl MethodReply {
    /// Serialize for the reply stream.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Reply for a line that is not a well-formed method call.
    pub fn malformed(err: &serde_json::Error) -> Self {
        MethodReply::Error {
            code: "INVALID_ARGS".to_string(),
            message: format!("malformed call: {err}"),
        }
    }

    fn from_error(err: &SaveError) -> Self {
        MethodReply::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Dispatches one method call against the handler.
pub async fn dispatch(handler: &SaveHandler, call: MethodCall) -> MethodReply {
    if call.method != METHOD_SAVE_TO_DOWNLOADS {
        return MethodReply::NotImplemented {
            method: call.method,
        };
    }

    // Undecodable bytes are a caller contract violation, same as absent
    // ones.
    let decoded = match call.args.bytes.as_deref() {
        Some(b64) => match base64::engine::general_purpose::STANDARD.decode(b64) {
            Ok(b) => Some(b),
            Err(_) => return MethodReply::from_error(&SaveError::InvalidArgs),
        },
        None => None,
    };

    match handler
        .save_to_downloads(decoded.as_deref(), call.args.file_name.as_deref())
        .await
    {
        Ok(identifier) => MethodReply::Success { result: identifier },
        Err(err) => MethodReply::from_error(&err),
    }
}
