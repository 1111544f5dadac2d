//! Tests for the auth orchestration flows

mod service_tests;
