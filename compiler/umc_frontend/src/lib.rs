// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Scope and binding analysis for ECMAScript modules: the lexical-scope tree, the binding
//! table with per-binding reference lists, the taint set for renaming-unsafe regions, and the
//! export/import metadata the rewrite engine needs to preserve the module's external
//! interface.

pub mod analyze;
pub mod exports;
pub mod resolve;
pub mod taint;
