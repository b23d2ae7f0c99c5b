//! Cross-module tests for `codemod-syntax`.
