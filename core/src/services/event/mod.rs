//! Best-effort auth event recording

mod service;

pub use service::EventService;
