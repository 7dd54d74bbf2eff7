// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Desired-style inference and candidate-name normalization.
//!
//! Style inference is deterministic over binding kind and declaration shape: classes are
//! Pascal, functions only ever constructed are Pascal, directly-exported top-level constants
//! initialized to a primitive literal are UPPER_SNAKE, everything else is camel.
//!
//! Normalization turns whatever the oracle proposed into a legal identifier of the desired
//! style: punctuation and whitespace collapse into word boundaries, leading underscores are
//! preserved, a leading digit gains an underscore prefix, and reserved words gain one too.

#[cfg(test)]
mod tests;

use crate::dossier::UsageTable;
use umc_frontend::{
    analyze::AnalysisUnit,
    resolve::{BindingKind, ExportStatus, NameStyle, ScopeId},
};

/// Placeholder for candidates that normalize to nothing.
const EMPTY_PLACEHOLDER: &str = "renamed";

/// Words that may not be used as identifiers. Candidates that collide gain an underscore.
const RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Stamps every binding's desired style. Runs after usage collection and before planning;
/// styles are frozen from then on.
pub fn infer_styles(unit: &mut AnalysisUnit, usage: &UsageTable) {
    let root = ScopeId::root();
    let mut styles = Vec::new();

    for binding in unit.bindings.iter() {
        let summary = usage.summary(binding.id);
        let constructed_only = summary
            .is_some_and(|s| s.is_constructed && !s.is_called);

        let style = if binding.kind == BindingKind::Class {
            NameStyle::Pascal
        } else if binding.kind == BindingKind::Function && constructed_only {
            NameStyle::Pascal
        } else if binding.kind == BindingKind::Const
            && binding.declaring_scope == root
            && binding.export_status == ExportStatus::ByDeclaration
            && usage.is_literal_const(binding.id)
        {
            NameStyle::UpperSnake
        } else {
            NameStyle::Camel
        };
        styles.push((binding.id, style));
    }

    for (id, style) in styles {
        unit.bindings.get_mut(id).desired_style = style;
    }
}

/// Normalizes a proposed name to a legal identifier in the given style. Never returns an
/// empty string.
#[must_use]
pub fn normalize(raw: &str, style: NameStyle) -> String {
    let underscores: String = raw.chars().take_while(|c| *c == '_').collect();
    let rest = &raw[underscores.len()..];

    let words = split_words(rest);
    let mut name = if words.is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        join_words(&words, style)
    };

    name.insert_str(0, &underscores);

    if name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
    {
        name.insert(0, '_');
    }

    if RESERVED.contains(&name.as_str()) {
        name.insert(0, '_');
    }

    name
}

/// Splits a raw proposal into lowercase words at punctuation, whitespace, underscores, and
/// camel-case boundaries.
fn split_words(raw: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in raw.chars() {
        if c.is_alphanumeric() || c == '$' {
            if c.is_uppercase() && prev_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.extend(c.to_lowercase());
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        } else {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn join_words(words: &[String], style: NameStyle) -> String {
    match style {
        NameStyle::Camel => {
            let mut out = words[0].clone();
            for word in &words[1..] {
                out.push_str(&capitalize(word));
            }
            out
        }
        NameStyle::Pascal => words.iter().map(|w| capitalize(w)).collect(),
        NameStyle::UpperSnake => words
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join("_"),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
