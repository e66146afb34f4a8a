pub mod borrow;
pub mod fallback;
pub mod health;
pub mod login;
pub mod signup;
pub mod user;
