// Authentication module
// Password credentials, stateless JWT tokens and request-scoped identity

pub mod credentials;
pub mod error;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod token;

// Re-export commonly used types
pub use credentials::CredentialStore;
pub use error::AuthError;
pub use middleware::{resolve_identity, AuthContext};
pub use models::{Login, NewUser, RefreshTokenInput, TokenResponse, User, UserResponse};
pub use repository::{UserRepository, UserStore};
pub use token::TokenService;
