//! Unit tests for calendar feed handling.
