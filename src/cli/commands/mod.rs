pub mod admin;
pub mod seed;
