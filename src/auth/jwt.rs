use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::AppError;

use super::claims::{AuthClaims, PrincipalRole};

/// Token lifetime in seconds (24 hours).
const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

pub fn issue_token(
    principal_id: Uuid,
    role: PrincipalRole,
    secret: &str,
) -> Result<String, AppError> {
    let now = chrono::Utc::now().timestamp();
    let claims = AuthClaims {
        sub: principal_id.to_string(),
        role,
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

pub fn validate_token(token: &str, secret: &str) -> Result<AuthClaims, AppError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    let token_data = decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_that_is_long_enough!";

    #[test]
    fn test_issue_and_validate_token() {
        let id = Uuid::new_v4();

        let token = issue_token(id, PrincipalRole::Patient, SECRET).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.role, PrincipalRole::Patient);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_with_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), PrincipalRole::Hospital, SECRET).unwrap();
        let result = validate_token(&token, "a_completely_different_secret_value!");

        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let result = validate_token("not.a.token", SECRET);

        assert!(result.is_err());
    }
}
