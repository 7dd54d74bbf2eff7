// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! The naming-oracle contract. The oracle is an external service (in production, a language
//! model behind a JSON API); the core only ever sees this one operation. Requests carry
//! everything the oracle needs, responses map symbols to candidate lists, and a failed or
//! missing answer degrades to "keep the original name".

use crate::dossier::UsageSummary;
use async_trait::async_trait;
use miette::Diagnostic;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use umc_frontend::resolve::{BindingKind, NameStyle};

/// One oracle request: a scope snippet for context plus the symbols to name.
#[derive(Clone, Debug, Serialize)]
pub struct SuggestRequest {
    pub chunk_summary: String,
    pub symbols: Vec<SymbolInfo>,
    pub max_candidates: usize,
}

/// Everything the oracle may know about one symbol.
#[derive(Clone, Debug, Serialize)]
pub struct SymbolInfo {
    pub symbol_id: String,
    pub original_name: String,
    pub kind: SymbolKind,
    pub desired_style: DesiredStyle,
    pub declaration_snippet: String,
    pub usage_summary: UsageSummary,
    pub type_hints: Vec<String>,
}

/// The declaration kind of a symbol, on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Param,
    Const,
    Let,
    Var,
    Function,
    Class,
    Catch,
    Import,
}

impl From<BindingKind> for SymbolKind {
    fn from(value: BindingKind) -> Self {
        match value {
            BindingKind::Param => Self::Param,
            BindingKind::Const => Self::Const,
            BindingKind::Let => Self::Let,
            BindingKind::Var => Self::Var,
            BindingKind::Function => Self::Function,
            BindingKind::Class => Self::Class,
            BindingKind::Catch => Self::Catch,
            BindingKind::Import => Self::Import,
        }
    }
}

/// The naming convention requested for a symbol, on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DesiredStyle {
    Camel,
    Pascal,
    UpperSnake,
}

impl From<NameStyle> for DesiredStyle {
    fn from(value: NameStyle) -> Self {
        match value {
            NameStyle::Camel => Self::Camel,
            NameStyle::Pascal => Self::Pascal,
            NameStyle::UpperSnake => Self::UpperSnake,
        }
    }
}

/// A proposed name with the oracle's confidence in it.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Candidate {
    pub name: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// The oracle's answer: an ordered candidate list per requested symbol. Symbols may be
/// missing or empty; unknown symbol IDs are discarded by the caller.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SuggestResponse {
    pub candidates: FxHashMap<String, Vec<Candidate>>,
}

/// An oracle-side failure. Recovered by treating the job as having returned no candidates.
#[derive(Clone, Debug, Diagnostic, Error)]
#[error("naming oracle failed: {0}")]
#[diagnostic(code("umc.rename.oracle_failure"))]
pub struct OracleError(pub String);

/// The naming oracle. Implementations are expected to be best-effort and at-most-once per
/// job; the core never retries.
#[async_trait(?Send)]
pub trait NameOracle {
    async fn suggest_names(&self, request: SuggestRequest) -> Result<SuggestResponse, OracleError>;
}
