use crate::engine::EngineKind;
use thiserror::Error;

/// Unified error type for the resolver crate.
///
/// Environment classification and provider mapping are total: unknown
/// operating systems and unrecognized user-agents degrade to documented
/// defaults instead of failing. The one failure that can surface is the
/// engine catalog being asked for an engine this build does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("compute engine '{kind}' is unavailable in this build (enable the '{feature_flag}' cargo feature)")]
    EngineUnavailable {
        /// Engine the environment classification selected.
        kind: EngineKind,
        /// Cargo feature that compiles the missing adapter in.
        feature_flag: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_unavailable_names_kind_and_feature() {
        let err = Error::EngineUnavailable {
            kind: EngineKind::Native,
            feature_flag: "native-engine",
        };
        let msg = err.to_string();
        assert!(msg.contains("native"), "message should name the engine: {msg}");
        assert!(
            msg.contains("native-engine"),
            "message should name the feature flag: {msg}"
        );
    }
}
