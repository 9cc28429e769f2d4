use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// `axum::Json` whose rejections become a plain `400 Bad Request!` instead
/// of axum's 415/422 responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Integer `:id` path segment.
#[derive(Debug, Clone, Copy)]
pub struct ProductId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        raw.trim()
            .parse()
            .map(ProductId)
            .map_err(|_| AppError::MalformedInput(format!("Invalid product id: {}", raw)))
    }
}
