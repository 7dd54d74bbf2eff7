// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Taint marking and propagation.
//!
//! A scope is tainted when renaming its bindings could change behavior: code inside it can
//! observe or produce variable names dynamically. The sink set is deliberately small and
//! lives in one match below; additions (say, `document.write` or indirect eval) belong there.

use crate::resolve::{ScopeId, ScopeTable, Sink};
use umc_ast::ast::SourceType;

/// Marks the scopes of the recorded sinks and closes the taint set upward, so that a tainted
/// scope implies a tainted chain all the way to the program root.
pub fn propagate(scopes: &mut ScopeTable, sinks: &[(ScopeId, Sink)], source_type: SourceType) {
    for &(scope, sink) in sinks {
        match sink {
            Sink::Eval | Sink::With => scopes.get_mut(scope).tainted = true,
            // `Function` and string timers compile their strings in the global scope. In a
            // module that can only observe module-scope names, so only the root is tainted;
            // a script's scope chain is reachable from the global object.
            Sink::Function | Sink::StringTimer => match source_type {
                SourceType::Module => scopes.get_mut(ScopeId::root()).tainted = true,
                SourceType::Script => scopes.get_mut(scope).tainted = true,
            },
        }
    }

    let directly_tainted: Vec<ScopeId> = scopes
        .iter()
        .filter(|scope| scope.tainted)
        .map(|scope| scope.id)
        .collect();

    for id in directly_tainted {
        let mut current = Some(id);
        while let Some(scope) = current {
            let scope = scopes.get_mut(scope);
            scope.tainted = true;
            current = scope.parent;
        }
    }
}
