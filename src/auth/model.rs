use serde::{Deserialize, Serialize};

/// JWT claims carried by API bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owner id (UUID string).
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    /// "access" or "refresh"; only access tokens may call the API.
    pub token_type: String,
}
