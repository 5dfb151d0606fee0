//! Shared utilities for the stake pool contracts.
//!
//! This crate provides:
//! - [`roles`]: an explicit role → member-set registry used by every
//!   contract that needs role-gated entry points.

#![no_std]

pub mod roles;

pub use roles::*;
