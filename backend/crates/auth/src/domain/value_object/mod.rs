//! Value Objects
//!
//! Validated wrappers around primitive data. Construction is the only
//! way in, so invalid values cannot exist past this boundary.

pub mod account_id;
pub mod account_password;
pub mod display_name;
pub mod email;
pub mod phone;

pub use account_id::AccountId;
pub use account_password::{AccountPassword, RawPassword};
pub use display_name::DisplayName;
pub use email::Email;
pub use phone::Phone;
