//! Charkha Core - Shared types library.
//!
//! This crate provides the domain types used across all Charkha components:
//! - `api` - JSON REST API for the storefront and admin dashboard
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. Every value that crosses a trust boundary (phone numbers, OTP
//! codes, pincodes, money amounts) is a parse-validated newtype so handlers
//! and the store never see raw strings for these.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, phone numbers, emails,
//!   OTP codes, pincodes, amounts, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
