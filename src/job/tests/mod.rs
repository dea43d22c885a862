//! Unit tests for the job context.

mod store_tests;
