pub mod category;
pub mod client;
pub mod contract;
pub mod quote;
pub mod service;
pub mod shared_service;
pub mod sign_token;
pub mod user;

pub use category::Category;
pub use client::Client;
pub use contract::{Clause, Contract, Signature, SIGNER_CLIENT, SIGNER_USER};
pub use quote::Quote;
pub use service::Service;
pub use shared_service::SharedService;
pub use sign_token::SignToken;
pub use user::User;
