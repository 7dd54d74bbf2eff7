// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use miette::Diagnostic;
use thiserror::Error;

/// A fatal pipeline error. Everything else degrades to "no rename" for the affected binding
/// or job and is reported through [`crate::Diagnostics`].
#[derive(Clone, Debug, Diagnostic, Error)]
#[diagnostic(transparent)]
#[error(transparent)]
pub enum Error {
    /// The source failed to parse.
    MalformedSource(#[from] umc_frontend::analyze::Error),
    /// A binding cannot fit into any oracle request within the token budget.
    JobPlanningImpossible(#[from] umc_rename::plan::Error),
}

/// The post-emit validation warning: the rewritten output did not survive a re-parse and
/// structural comparison, so the original source was returned instead.
#[derive(Clone, Debug, Diagnostic, Error)]
#[error("rewritten output failed validation: {reason}; original source returned")]
#[diagnostic(code("umc.rewrite_validation_failure"))]
pub struct RewriteValidationFailure {
    pub reason: String,
}
