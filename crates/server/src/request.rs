use std::{collections::HashMap, convert::Infallible};

use axum::{
    extract::{FromRequestParts, Path},
    http::{Method, request::Parts},
};
use serde_json::Value;

use crate::error::ApiError;

/// Path parameters of the matched route, empty when the route has none.
#[derive(Debug, Default, Clone)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    pub fn version(&self) -> Option<&str> {
        self.get("version")
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl<S> FromRequestParts<S> for RouteParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();
        Ok(Self(params))
    }
}

/// A write request as seen by the validation rules.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub body: Option<Value>,
}

impl InboundRequest {
    /// An empty body is treated as absent; anything else must be JSON.
    pub fn from_parts(method: Method, raw_body: &[u8]) -> Result<Self, ApiError> {
        let body = if raw_body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice(raw_body)?)
        };
        Ok(Self { method, body })
    }

    /// The JSON object body, if this is a POST carrying one.
    pub fn post_object(&self) -> Option<&Value> {
        if self.method != Method::POST {
            return None;
        }
        self.body.as_ref().filter(|body| body.is_object())
    }
}
