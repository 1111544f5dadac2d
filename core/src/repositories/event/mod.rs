//! Auth event repository module.

mod r#trait;
pub use r#trait::AuthEventRepository;

mod noop;
pub use noop::NoOpAuthEventRepository;

mod mock;
pub use mock::InMemoryAuthEventRepository;
