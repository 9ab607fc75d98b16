pub mod bootstrap;
pub mod errors;
pub mod login;
pub mod principal;
pub mod token;
