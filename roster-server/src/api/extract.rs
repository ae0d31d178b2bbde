//! Request extractors
//!
//! Wrappers around axum's extractors whose rejections become `ApiError`, so
//! malformed bodies and path segments answer 422 with the usual error body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::api::error::ApiError;

/// JSON body extractor
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);

/// Path parameter extractor
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ValidPath<T>(pub T);
