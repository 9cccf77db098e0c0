//! Request description
//!
//! An [`ApiRequest`] is a plain value: everything that goes on the wire except
//! the token and the base URL. Two requests built from the same inputs compare
//! equal.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ObpError, ObpResult};

/// One API call, before the token and base URL are attached
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append query parameters from a struct or map
    ///
    /// `null` fields are skipped, arrays repeat the key.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, params: &Q) -> ObpResult<Self> {
        let value = serde_json::to_value(params)?;
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    push_param(&mut self.query, &key, value);
                }
            }
            _ => {
                return Err(ObpError::Json(<serde_json::Error as serde::ser::Error>::custom(
                    "query parameters must serialize to an object",
                )))
            }
        }
        Ok(self)
    }

    /// Attach a JSON body
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> ObpResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

fn push_param(query: &mut Vec<(String, String)>, key: &str, value: Value) {
    match value {
        Value::Null => {}
        Value::String(s) => query.push((key.to_string(), s)),
        Value::Array(items) => {
            for item in items {
                push_param(query, key, item);
            }
        }
        other => query.push((key.to_string(), other.to_string())),
    }
}

/// Build a path from segments, percent-encoding each one
pub fn api_path(segments: &[&str]) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    path
}
