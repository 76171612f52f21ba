//! Tests for registration service

mod service_tests;
