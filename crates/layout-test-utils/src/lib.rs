//! Shared test utilities for the layout-manager workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures at three realism levels
//! - [`project`]: [`project::TestProject`] builder for manifest-driven trees

pub mod git;
pub mod project;
