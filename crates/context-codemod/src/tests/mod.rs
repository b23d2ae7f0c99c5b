//! Cross-module tests for `context-codemod`.

mod unit;
