//! Content Document loading.
//!
//! Documents are parsed once at startup, default-filled, validated and
//! fingerprinted. A document that fails validation is never served.

use std::fmt::Write as _;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::domain::document::ContentDocument;
use crate::domain::validation;

/// Errors raised while loading a Content Document.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The file could not be read.
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON for the schema.
    #[error("invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML for the schema.
    #[error("invalid content YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is not one of `json`, `yaml` or `yml`.
    #[error("unsupported content format: {0}")]
    UnsupportedFormat(String),

    /// The document parsed but is structurally inconsistent.
    #[error("content validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Parses, normalizes and validates a JSON document.
///
/// # Errors
///
/// Returns `ContentError::Json` on malformed input and
/// `ContentError::Invalid` when validation finds problems.
pub fn parse_json(raw: &str) -> Result<ContentDocument, ContentError> {
    finish(serde_json::from_str(raw)?)
}

/// Parses, normalizes and validates a YAML document.
///
/// # Errors
///
/// Returns `ContentError::Yaml` on malformed input and
/// `ContentError::Invalid` when validation finds problems.
pub fn parse_yaml(raw: &str) -> Result<ContentDocument, ContentError> {
    finish(serde_yaml::from_str(raw)?)
}

/// Loads a document, choosing the parser from the file extension.
///
/// # Errors
///
/// Returns `ContentError::Io` when the file cannot be read,
/// `ContentError::UnsupportedFormat` for unknown extensions, and any parse
/// or validation error from [`parse_json`] / [`parse_yaml`].
pub fn load_from_path(path: &Path) -> Result<ContentDocument, ContentError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let doc = match extension.as_str() {
        "json" => parse_json(&raw)?,
        "yaml" | "yml" => parse_yaml(&raw)?,
        other => return Err(ContentError::UnsupportedFormat(other.to_owned())),
    };

    tracing::info!(
        path = %path.display(),
        version = %doc.meta.version,
        fingerprint = %doc.fingerprint,
        steps = doc.steps.len(),
        timeline_items = doc.timeline.items.len(),
        "content document loaded"
    );
    Ok(doc)
}

fn finish(mut doc: ContentDocument) -> Result<ContentDocument, ContentError> {
    validation::normalize(&mut doc);
    let problems = validation::validate(&doc);
    if !problems.is_empty() {
        return Err(ContentError::Invalid(problems));
    }
    doc.fingerprint = fingerprint(&doc)?;
    Ok(doc)
}

/// SHA-256 over the canonical (normalized, re-serialized) JSON form.
fn fingerprint(doc: &ContentDocument) -> Result<String, ContentError> {
    let canonical = serde_json::to_vec(doc)?;
    let digest = Sha256::digest(&canonical);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    Ok(hex)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const MINIMAL_JSON: &str = r#"{
        "meta": { "appId": "mutu", "version": "1.0.0" },
        "gate": { "enabled": true, "phraseOptions": ["wana", "mutu"] },
        "steps": [{ "id": "cover" }, { "id": "finale" }],
        "timeline": {
            "chapters": [{ "id": "ch1", "title": "Beginnings" }],
            "items": [{ "id": "m1", "chapterId": "ch1", "title": { "en": "Hi", "np": "namaste" } }]
        }
    }"#;

    #[test]
    fn test_parse_json_fills_defaults() {
        // Act
        let doc = parse_json(MINIMAL_JSON).unwrap();

        // Assert
        assert_eq!(doc.meta.app_id, "mutu");
        assert_eq!(doc.vault.unlock.count, 7);
        assert_eq!(doc.finale.hold_ms, 1500);
        assert_eq!(doc.play.memory_match.pair_count, 8);
        assert_eq!(doc.play.quiz.thresholds.high, 8);
        assert_eq!(doc.future_timeline.passcodes, vec!["wana", "mutu"]);
        assert_eq!(doc.timeline.items[0].title.secondary, "namaste");
        assert_eq!(doc.fingerprint.len(), 64);
    }

    #[test]
    fn test_parse_json_rejects_malformed_input() {
        let result = parse_json("{ not json");

        assert!(matches!(result, Err(ContentError::Json(_))));
    }

    #[test]
    fn test_parse_json_reports_every_validation_problem() {
        let raw = r#"{
            "vault": { "unlock": { "count": 0 } },
            "timeline": { "items": [{ "id": "m1", "chapterId": "missing" }] }
        }"#;

        let result = parse_json(raw);

        match result {
            Err(ContentError::Invalid(problems)) => assert_eq!(problems.len(), 2),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_date_rule_without_date_is_rejected() {
        let raw = r#"{
            "futureTimeline": { "items": [{ "id": "f1", "unlock": { "type": "date" } }] }
        }"#;

        assert!(matches!(parse_json(raw), Err(ContentError::Json(_))));
    }

    #[test]
    fn test_fingerprint_is_stable_across_formats() {
        // Arrange
        let yaml = "meta:\n  appId: mutu\n  version: 1.0.0\ngate:\n  enabled: true\n  phraseOptions: [wana, mutu]\nsteps:\n  - id: cover\n  - id: finale\ntimeline:\n  chapters:\n    - id: ch1\n      title: Beginnings\n  items:\n    - id: m1\n      chapterId: ch1\n      title: { en: Hi, np: namaste }\n";

        // Act
        let from_json = parse_json(MINIMAL_JSON).unwrap();
        let from_yaml = parse_yaml(yaml).unwrap();

        // Assert
        assert_eq!(from_json.fingerprint, from_yaml.fingerprint);
    }

    #[test]
    fn test_load_from_path_picks_parser_by_extension() {
        // Arrange
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(MINIMAL_JSON.as_bytes()).unwrap();

        // Act
        let doc = load_from_path(file.path()).unwrap();

        // Assert
        assert_eq!(doc.steps.len(), 2);
    }

    #[test]
    fn test_load_from_path_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();

        let result = load_from_path(file.path());

        assert!(matches!(result, Err(ContentError::UnsupportedFormat(ext)) if ext == "toml"));
    }

    #[test]
    fn test_load_from_path_reports_missing_file() {
        let result = load_from_path(Path::new("/definitely/not/here.json"));

        assert!(matches!(result, Err(ContentError::Io { .. })));
    }
}
