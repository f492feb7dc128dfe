//! Cross-crate tests for the tricorder workspace live in `tests/`.
