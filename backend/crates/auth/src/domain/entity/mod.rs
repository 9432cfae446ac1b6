pub mod account;
pub mod session;

pub use account::Account;
pub use session::SessionClaims;
