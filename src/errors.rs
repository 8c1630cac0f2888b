//! Error and warning types with diagnostics using miette
//!
//! Errors are raised before any drawing state is touched, so a failed call
//! leaves the drawing exactly as it was.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::{Length, NumericError};

// ============================================================================
// Placement Errors
// ============================================================================

/// Errors raised by `Drawing::add`, `Drawing::anchor` and `Drawing::pop`
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("unknown anchor `{anchor}` on {element}")]
    #[diagnostic(code(schemru::anchor::unknown))]
    UnknownAnchor {
        element: String,
        anchor: String,
        #[help]
        available: Option<String>,
    },

    #[error("{target} has not been placed yet")]
    #[diagnostic(
        code(schemru::anchor::forward_reference),
        help("anchors can only reference elements added earlier in the same drawing")
    )]
    ForwardReference { target: String },

    #[error("ambiguous placement: {reason}")]
    #[diagnostic(code(schemru::place::ambiguous))]
    AmbiguousPlacement {
        reason: String,
        #[help]
        hint: Option<String>,
    },

    #[error("pop with an empty state stack")]
    #[diagnostic(
        code(schemru::state::empty_stack),
        help("every `pop` needs a matching earlier `push`")
    )]
    EmptyStack,

    #[error("invalid {what}: {source}")]
    #[diagnostic(code(schemru::numeric::invalid))]
    InvalidNumeric {
        what: &'static str,
        #[source]
        source: NumericError,
    },
}

impl PlacementError {
    pub(crate) fn ambiguous(reason: impl Into<String>) -> Self {
        PlacementError::AmbiguousPlacement { reason: reason.into(), hint: None }
    }

    pub(crate) fn ambiguous_with_hint(reason: impl Into<String>, hint: impl Into<String>) -> Self {
        PlacementError::AmbiguousPlacement {
            reason: reason.into(),
            hint: Some(hint.into()),
        }
    }

    pub(crate) fn numeric(what: &'static str, source: NumericError) -> Self {
        PlacementError::InvalidNumeric { what, source }
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// Non-fatal conditions reported alongside a successful placement
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum PlacementWarning {
    #[error(
        "requested length {requested} is shorter than the element body ({interior}); leads clamped to zero"
    )]
    #[diagnostic(code(schemru::leads::degenerate_length), severity(Warning))]
    DegenerateLength { requested: Length, interior: Length },
}

impl PlacementWarning {
    /// Length actually used for the element after clamping
    pub fn effective_length(&self) -> Length {
        match self {
            PlacementWarning::DegenerateLength { interior, .. } => *interior,
        }
    }
}
