use axum::{Json, http::StatusCode};
use mealplanner_shared::{Page, Pagination};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PageEnvelope<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
        message: None,
    })
}

pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
        message: Some(message.into()),
    })
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, ok(data))
}

pub fn page<T: Serialize>(page: Page<T>) -> Json<PageEnvelope<T>> {
    Json(PageEnvelope {
        success: true,
        data: page.items,
        pagination: page.pagination,
    })
}

/// Payload of creation endpoints
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

impl Created {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
