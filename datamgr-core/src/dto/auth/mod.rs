//! Authentication DTOs

use serde::{Deserialize, Serialize};

/// Response of the basic-auth endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyResponse {
    pub api_key: String,
}
