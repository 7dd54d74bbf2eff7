// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! The rewrite passes that apply a rename plan to the syntax tree. Order matters: shorthand
//! properties are expanded and export declarations split while original names are still in
//! place, and only then does the two-phase renamer touch identifiers.

mod export_split;
mod rename;
mod shorthand;

use umc_frontend::analyze::AnalysisUnit;
use umc_rename::solve::RenamePlan;

/// Applies the rename plan to the unit's syntax tree.
pub fn run_rewrite_passes(unit: &mut AnalysisUnit, plan: &RenamePlan) {
    shorthand::expand(unit, plan);
    export_split::split(unit, plan);
    rename::apply(unit, plan);
}
