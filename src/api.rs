use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::model::ActivityCollection;

/// Body of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiReply {
    #[serde(default)]
    pub message: String,
}

impl ApiReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Body of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRejection {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Request/response contract of the activities service.
///
/// Calls are issued from a single thread, so implementations need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait ActivityApi {
    /// `GET /activities`
    async fn list_activities(&self) -> Result<ActivityCollection, ApiError>;

    /// `POST /activities/{activity}/signup?email={contact}`
    async fn signup(&self, activity: &str, contact: &str) -> Result<ApiReply, ApiError>;

    /// `DELETE /activities/{activity}/unregister?email={contact}`
    async fn unregister(&self, activity: &str, contact: &str) -> Result<ApiReply, ApiError>;
}
