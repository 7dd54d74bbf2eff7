// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Everything between analysis and rewrite: per-binding usage dossiers, desired-style
//! inference, partitioning of bindings into budget-bounded oracle jobs, the oracle interface
//! itself, and the deterministic constraint solver that assigns final names.

pub mod dossier;
pub mod oracle;
pub mod plan;
pub mod solve;
pub mod style;
