// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Post-emit validation: the emitted source must re-parse, and the re-parsed tree must have
//! the same syntax-node shape as the tree that was serialized. A failure here means the
//! emitter produced something wrong, and the pipeline falls back to the original source.

use crate::error::RewriteValidationFailure;
use umc_ast::{
    ast::{Module, SourceType},
    validate::NodeCounts,
};

pub(crate) fn validate(
    emitted: &str,
    tree: &Module,
    source_type: SourceType,
) -> Result<(), RewriteValidationFailure> {
    let (reparsed, errors) = umc_parse::module(emitted, source_type);
    if !errors.is_empty() {
        return Err(RewriteValidationFailure {
            reason: format!("emitted source failed to re-parse: {}", errors[0]),
        });
    }

    let expected = NodeCounts::of(tree);
    let actual = NodeCounts::of(&reparsed);
    if expected != actual {
        return Err(RewriteValidationFailure {
            reason: "re-parsed output has a different syntax-node shape".to_string(),
        });
    }

    Ok(())
}
