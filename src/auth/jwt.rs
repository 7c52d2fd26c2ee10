use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::model::Claims;

const ACCESS_TOKEN_EXPIRY_SECONDS: i64 = 15 * 60; // 15 minutes

/// Generate an access token for an owner. Production tokens come from the
/// account service; this is used by local tooling and tests.
pub fn generate_access_token(
    owner_id: Uuid,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: owner_id.to_string(),
        exp: now + ACCESS_TOKEN_EXPIRY_SECONDS as usize,
        iat: now,
        token_type: "access".to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate and decode a token.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
