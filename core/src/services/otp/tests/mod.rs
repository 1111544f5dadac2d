//! Tests for the one-time code service
