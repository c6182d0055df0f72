//! Client e-signature support: OTP issuance rules and code generation.
//!
//! OTP *verification* happens in the external signing frontend; this
//! service only validates sign tokens and hands out codes.

pub mod otp;
pub mod precheck;

pub use precheck::SigningRejection;
