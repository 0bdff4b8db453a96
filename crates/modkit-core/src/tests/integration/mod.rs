#![cfg(test)]

pub mod common;
pub mod dependency_tests;
pub mod lifecycle_tests;
pub mod ordering_tests;
