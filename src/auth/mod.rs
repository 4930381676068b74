pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use claims::{AccessClaims, RefreshClaims, TokenClaims};
pub use jwt::{AccessJwt, JwtService, RefreshJwt, SessionTokens};
pub use middleware::{bearer_token, AuthMiddleware, AuthenticatedUser};
pub use password::{hash_password, verify_password};
