pub mod factory;
pub mod identity;
pub mod token_validator;

pub use factory::build_token_validator;
pub use identity::Identity;
pub use token_validator::{SERVICE_ISSUER, TokenError, TokenValidator};
