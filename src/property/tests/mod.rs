//! Unit tests for the property context.

mod directory_tests;
