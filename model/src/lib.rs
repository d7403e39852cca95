pub mod account;
pub mod address;
pub mod base_types;
pub mod keypair;
pub mod message;
pub mod tokens;
