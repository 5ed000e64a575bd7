//! Resolution options.
//!
//! Options travel inside a grid document (`"options": {...}`) or are set from
//! CLI flags; every field has a default so an empty object is valid.

use serde::{Deserialize, Serialize};

/// How the adapter treats a negative rowspan/colspan request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NegativeSpanPolicy {
    /// Abort the pass with [`SpangridError::InvalidSpan`](crate::SpangridError::InvalidSpan)
    #[default]
    Reject,
    /// Treat the request like an absent one (span of 1)
    Clamp,
}

/// What happens to a span that runs past the last row or column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpanOverflow {
    /// Emit the span as requested
    #[default]
    Keep,
    /// Shrink the span to the grid bounds
    Clip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveOptions {
    pub negative_spans: NegativeSpanPolicy,
    pub overflow: SpanOverflow,
}

impl ResolveOptions {
    #[must_use]
    pub fn with_negative_spans(mut self, policy: NegativeSpanPolicy) -> Self {
        self.negative_spans = policy;
        self
    }

    #[must_use]
    pub fn with_overflow(mut self, overflow: SpanOverflow) -> Self {
        self.overflow = overflow;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let opts: ResolveOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, ResolveOptions::default());
        assert_eq!(opts.negative_spans, NegativeSpanPolicy::Reject);
        assert_eq!(opts.overflow, SpanOverflow::Keep);
    }

    #[test]
    fn test_camel_case_fields() {
        let opts: ResolveOptions =
            serde_json::from_str(r#"{"negativeSpans":"clamp","overflow":"clip"}"#).unwrap();
        assert_eq!(opts.negative_spans, NegativeSpanPolicy::Clamp);
        assert_eq!(opts.overflow, SpanOverflow::Clip);
    }
}
