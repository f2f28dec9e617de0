use serde::Serialize;
use utoipa::ToSchema;

/// Response metadata. The cart API has no pagination; the only meta carried
/// is how many line items a listing covers.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub item_count: Option<u64>,
}

impl Meta {
    pub fn items(item_count: u64) -> Self {
        Self {
            item_count: Some(item_count),
        }
    }

    pub fn empty() -> Self {
        Self { item_count: None }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
