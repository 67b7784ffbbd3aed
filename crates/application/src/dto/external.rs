//! External catalogue DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Book metadata fetched from the external catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExternalBookDto {
    pub isbn: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_pages: Option<u32>,
    pub publishers: Vec<String>,
}
