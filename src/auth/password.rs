use bcrypt::{hash, verify, DEFAULT_COST};

use crate::AppError;

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    hash(plain, DEFAULT_COST).map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))
}

/// Returns Ok(()) only when the password matches the stored hash.
/// A mismatch and a malformed hash are both reported as Unauthorized so the
/// login endpoint never leaks which one happened.
pub fn verify_password(plain: &str, hashed: &str) -> Result<(), AppError> {
    let ok = verify(plain, hashed)
        .map_err(|_| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if ok {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Invalid credentials".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hashed = hash_password("s3cret-pass").unwrap();

        assert!(verify_password("s3cret-pass", &hashed).is_ok());
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let hashed = hash_password("s3cret-pass").unwrap();

        assert!(verify_password("not-the-password", &hashed).is_err());
    }

    #[test]
    fn test_malformed_hash_is_rejected() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
