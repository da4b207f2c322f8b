use serde::{Deserialize, Serialize};

/// Which kind of account a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalRole {
    Patient,
    Hospital,
}

impl PrincipalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalRole::Patient => "patient",
            PrincipalRole::Hospital => "hospital",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthClaims {
    pub sub: String, // Patient or hospital UUID
    pub role: PrincipalRole,
    pub exp: i64, // Expiration timestamp
    pub iat: i64, // Issued at timestamp
}
