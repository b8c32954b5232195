//! Extractors whose rejections use the standard error envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::AppError;

/// `axum::Json` body, rejected as a 400 `AppError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` string, rejected as a 400 `AppError`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
