//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating gitwapp command output and error
//! messages.

#![allow(dead_code)]

use predicates::prelude::*;

/// Error line printed by `main` for every failed command
pub fn is_error() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}

pub fn unknown_repository() -> impl Predicate<str> {
    predicates::str::contains("Repository not found")
}

pub fn has_branch_info(branch: &str) -> impl Predicate<str> {
    predicates::str::contains("On branch").and(predicates::str::contains(branch.to_string()))
}

pub fn is_clean() -> impl Predicate<str> {
    predicates::str::contains("working tree clean")
}

/// Checks for a section header of the grouped status listing
pub fn has_section(header: &str) -> impl Predicate<str> {
    predicates::str::contains(header.to_string())
}
