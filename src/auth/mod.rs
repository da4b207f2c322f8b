pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::{AuthClaims, PrincipalRole};
pub use jwt::{issue_token, validate_token};
pub use password::{hash_password, verify_password};
