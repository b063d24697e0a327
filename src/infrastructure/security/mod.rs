pub mod token;

pub use token::{HmacSessionVerifier, sign_session_token};
