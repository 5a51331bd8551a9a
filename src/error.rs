// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Error Types

/// Errors surfaced by the analytics core. Generation fails closed on the
/// first unresolvable lookup; parse errors come from the UI boundary.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no multiplier in table `{table}` for key `{key}`")]
    MissingMultiplier { table: &'static str, key: String },

    #[error("unknown dimension `{0}`")]
    UnknownDimension(String),

    #[error("unknown view `{0}`")]
    UnknownView(String),

    #[error("unknown evaluation mode `{0}`")]
    UnknownMode(String),
}
