//! GeeksforGeeks Profile Stats API Library
//!
//! Fetches a public GeeksforGeeks profile page, extracts the embedded
//! Next.js state and normalizes it into typed coding statistics, served
//! behind a per-client sliding-window rate limiter.
//!
//! # Modules
//!
//! - `api`: Router and HTTP handlers.
//! - `core`: Extraction pipeline and admission control.
//! - `integrations`: Upstream page fetching.
//! - `calculators`: Streak, difficulty aggregates and problem URLs.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `extractor`: Embedded state extraction.
//! - `fetcher`: Profile page fetcher.
//! - `handlers`: HTTP request handlers.
//! - `models`: Response records.
//! - `navigators`: Defensive field navigation.
//! - `path`: Optional-path JSON accessor.
//! - `profile`: Response assembly.
//! - `rate_limiter`: Sliding-window rate limiter.
//! - `validation`: Username validation.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and the binary
pub mod calculators;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod navigators;
pub mod path;
pub mod profile;
pub mod rate_limiter;
pub mod validation;
