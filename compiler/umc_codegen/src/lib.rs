// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Serializes the AST back to JavaScript source. The emitter normalizes whitespace (one
//! statement per line, four-space indentation) but never reorders or elides statements, and it
//! emits every literal from its original lexeme.

mod emit;

pub use emit::emit;
