//! One-time code repository module.

mod r#trait;
pub use r#trait::OtpRepository;

mod mock;
pub use mock::InMemoryOtpRepository;
