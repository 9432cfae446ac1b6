//! Application Layer
//!
//! Use cases orchestrating the domain: registration, password
//! recovery, session issuance and checking. Policy lives here; the
//! handlers above only translate HTTP, the repositories below only
//! persist.

pub mod check_session;
pub mod config;
pub mod confirm_reset;
pub mod register;
pub mod request_reset;
pub mod reset_code;
pub mod session_token;

pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use confirm_reset::ConfirmResetUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use request_reset::RequestResetUseCase;
pub use reset_code::{IssuedResetCode, ResetCodeService};
pub use session_token::SessionIssuer;
