//! Common test utilities and helpers
//!
//! Shared workspace fixtures, mocks for the listing and sync seams, and
//! assertions over the local manifest.

#![allow(dead_code)]

pub mod assertion_helpers;
pub mod mock_services;
pub mod test_helpers;
