//! Load-time normalization and structural validation.

use std::collections::HashSet;

use super::document::{ContentDocument, DEFAULT_REACTIONS};

/// Fills values that default to other parts of the document.
pub fn normalize(doc: &mut ContentDocument) {
    if doc.timeline.reactions.is_empty() {
        doc.timeline.reactions = DEFAULT_REACTIONS.iter().map(|r| (*r).to_owned()).collect();
    }
    if doc.future_timeline.passcodes.is_empty() {
        doc.future_timeline.passcodes = doc.gate.phrase_options.clone();
    }
    if doc.timeline.chapter_order.is_empty() {
        doc.timeline.chapter_order = doc.timeline.chapters.iter().map(|c| c.id.clone()).collect();
    }
}

/// Returns every problem found; an empty list means the document is usable.
#[must_use]
pub fn validate(doc: &ContentDocument) -> Vec<String> {
    let mut problems = Vec::new();

    check_unique("steps", doc.steps.iter().map(|s| s.id.as_str()), &mut problems);
    check_unique("milestones", doc.milestones.iter().map(|m| m.id.as_str()), &mut problems);
    check_unique(
        "timeline.chapters",
        doc.timeline.chapters.iter().map(|c| c.id.as_str()),
        &mut problems,
    );
    check_unique(
        "timeline.items",
        doc.timeline.items.iter().map(|i| i.id.as_str()),
        &mut problems,
    );
    check_unique("gallery.items", doc.gallery.items.iter().map(|i| i.id.as_str()), &mut problems);
    check_unique(
        "play.quiz.questions",
        doc.play.quiz.questions.iter().map(|q| q.id.as_str()),
        &mut problems,
    );
    check_unique(
        "promises.items",
        doc.promises.items.iter().map(|c| c.id.as_str()),
        &mut problems,
    );
    check_unique("vault.items", doc.vault.items.iter().map(|v| v.id.as_str()), &mut problems);
    check_unique(
        "futureTimeline.items",
        doc.future_timeline.items.iter().map(|f| f.id.as_str()),
        &mut problems,
    );

    let chapters: HashSet<&str> = doc.timeline.chapters.iter().map(|c| c.id.as_str()).collect();
    for item in &doc.timeline.items {
        if !chapters.contains(item.chapter_id.as_str()) {
            problems.push(format!(
                "timeline item '{}' references unknown chapter '{}'",
                item.id, item.chapter_id
            ));
        }
    }
    for id in &doc.timeline.chapter_order {
        if !chapters.contains(id.as_str()) {
            problems.push(format!("timeline.chapterOrder lists unknown chapter '{id}'"));
        }
    }

    for question in &doc.play.quiz.questions {
        if question.options.is_empty() {
            problems.push(format!("quiz question '{}' has no options", question.id));
        } else if question.answer_index >= question.options.len() {
            problems.push(format!(
                "quiz question '{}' answerIndex {} is out of range (0..{})",
                question.id,
                question.answer_index,
                question.options.len()
            ));
        }
    }

    let thresholds = doc.play.quiz.thresholds;
    if thresholds.mid > thresholds.high {
        problems.push(format!(
            "quiz thresholds mid ({}) must not exceed high ({})",
            thresholds.mid, thresholds.high
        ));
    }

    if doc.vault.unlock.count == 0 {
        problems.push("vault.unlock.count must be at least 1".to_owned());
    }
    if doc.finale.hold_ms == 0 {
        problems.push("finale.holdMs must be at least 1".to_owned());
    }
    if doc.gate.enabled && doc.gate.phrase_options.iter().all(|p| p.trim().is_empty()) {
        problems.push("gate is enabled but has no phraseOptions".to_owned());
    }

    for id in doc.steps.iter().map(|s| s.id.as_str()).filter(|id| id.trim().is_empty()) {
        problems.push(format!("step id '{id}' is blank"));
    }

    problems
}

fn check_unique<'a>(
    collection: &str,
    ids: impl Iterator<Item = &'a str>,
    problems: &mut Vec<String>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            problems.push(format!("{collection}: duplicate id '{id}'"));
        }
    }
}
