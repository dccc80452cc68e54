use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tokens expire one hour after issuance.
pub const TOKEN_TTL_HOURS: i64 = 1;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String, // JWT ID
}

// No fallback secret: main.rs requires the variable at startup, and a
// process running without it must not mint or accept tokens.
fn get_token_secret() -> Result<String, String> {
    std::env::var("ACCESS_TOKEN_SECRET").map_err(|_| "ACCESS_TOKEN_SECRET is not set".to_string())
}

/// Signs a 1h-lived HS256 token carrying the caller identity.
pub fn sign_token(email: &str, name: Option<&str>) -> Result<String, String> {
    let secret = get_token_secret()?;
    let now = Utc::now();
    let claims = Claims {
        email: email.to_string(),
        name: name.map(|n| n.to_string()),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("Failed to sign token: {}", e))
}

/// Verifies signature and expiry. Rejects malformed, forged, and expired
/// tokens before any identity is derived from them.
pub fn verify_token(token: &str) -> Result<Claims, String> {
    let secret = get_token_secret()?;
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Serializes tests that mutate ACCESS_TOKEN_SECRET; the test harness runs
/// threads in parallel and the env is process-wide.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    fn set_test_secret() -> std::sync::MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("ACCESS_TOKEN_SECRET", "unit-test-secret");
        guard
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let _guard = set_test_secret();

        let token = sign_token("alice@example.com", Some("Alice")).unwrap();
        let claims = verify_token(&token).unwrap();

        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name.as_deref(), Some("Alice"));
        assert!(claims.exp > claims.iat);
        assert_eq!(
            claims.exp - claims.iat,
            (TOKEN_TTL_HOURS * 3600) as usize
        );
    }

    #[test]
    fn test_garbage_token_rejected() {
        let _guard = set_test_secret();

        assert!(verify_token("not-a-jwt").is_err());
        assert!(verify_token("").is_err());
    }

    #[test]
    fn test_missing_secret_fails_loudly() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::remove_var("ACCESS_TOKEN_SECRET");

        let sign_err = sign_token("alice@example.com", None).unwrap_err();
        assert_eq!(sign_err, "ACCESS_TOKEN_SECRET is not set");
        assert!(verify_token("anything").is_err());

        std::env::set_var("ACCESS_TOKEN_SECRET", "unit-test-secret");
    }

    #[test]
    fn test_expired_token_rejected() {
        let _guard = set_test_secret();

        let now = Utc::now();
        let claims = Claims {
            email: "old@example.com".to_string(),
            name: None,
            iat: (now - Duration::hours(3)).timestamp() as usize,
            exp: (now - Duration::hours(2)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("unit-test-secret".as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token).is_err());
    }

    #[test]
    fn test_forged_signature_rejected() {
        let _guard = set_test_secret();
        let token = sign_token("bob@example.com", None).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("some-other-secret".as_bytes()),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }
}
