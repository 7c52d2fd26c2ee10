use actix_web::HttpRequest;
use uuid::Uuid;

use super::jwt::validate_token;
use crate::error::ApiError;

/// Extract the bearer token from the Authorization header.
fn extract_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/// Authenticate a request and resolve the calling owner id.
pub fn authenticate(req: &HttpRequest, secret: &str) -> Result<Uuid, ApiError> {
    let token = extract_token(req).ok_or(ApiError::Unauthenticated)?;

    let claims = validate_token(&token, secret).map_err(|e| {
        log::warn!("token validation failed: {e:?}");
        ApiError::Unauthenticated
    })?;

    if claims.token_type != "access" {
        return Err(ApiError::Unauthenticated);
    }

    claims.sub.parse::<Uuid>().map_err(|_| {
        log::warn!("token subject is not a UUID");
        ApiError::Unauthenticated
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::generate_access_token;
    use actix_web::test::TestRequest;

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let req = TestRequest::default().to_http_request();
        assert!(authenticate(&req, "secret").is_err());
    }

    #[test]
    fn test_valid_bearer_resolves_owner() {
        let owner = Uuid::new_v4();
        let token = generate_access_token(owner, "secret").unwrap();
        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_http_request();
        assert_eq!(authenticate(&req, "secret").unwrap(), owner);
    }

    #[test]
    fn test_non_bearer_scheme_is_rejected() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(authenticate(&req, "secret").is_err());
    }
}
