//! Timeline filtering, grouping and progress.

use std::collections::BTreeSet;

use mutu_content::domain::document::{Timeline, TimelineItem};
use serde::Serialize;

/// The pseudo-tag that disables tag filtering.
pub const ALL_TAGS: &str = "All";

/// Items shown in the featured slideshow.
pub const FEATURED_LIMIT: usize = 8;

/// `All` followed by every distinct tag, sorted case-insensitively.
#[must_use]
pub fn tag_list(items: &[TimelineItem]) -> Vec<String> {
    let distinct: BTreeSet<&str> = items
        .iter()
        .flat_map(|item| item.tags.iter().map(String::as_str))
        .collect();
    let mut tags: Vec<String> = distinct.into_iter().map(str::to_owned).collect();
    tags.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    let mut list = Vec::with_capacity(tags.len() + 1);
    list.push(ALL_TAGS.to_owned());
    list.extend(tags);
    list
}

/// Items matching both the tag and the free-text query. A missing tag or
/// `All` matches everything, as does a blank query.
#[must_use]
pub fn filter<'a>(items: &'a [TimelineItem], tag: Option<&str>, query: Option<&str>) -> Vec<&'a TimelineItem> {
    let tag = tag.filter(|t| *t != ALL_TAGS);
    let query = query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    items
        .iter()
        .filter(|item| tag.is_none_or(|t| item.tags.iter().any(|own| own == t)))
        .filter(|item| {
            query
                .as_deref()
                .is_none_or(|q| item.search_blob().contains(q))
        })
        .collect()
}

/// Filtered items bucketed by chapter, in `chapterOrder`. Chapters with no
/// matching items are omitted.
#[must_use]
pub fn group_by_chapter<'a>(
    timeline: &Timeline,
    filtered: &[&'a TimelineItem],
) -> Vec<(String, Vec<&'a TimelineItem>)> {
    timeline
        .chapter_order
        .iter()
        .filter_map(|chapter_id| {
            let items: Vec<&TimelineItem> = filtered
                .iter()
                .copied()
                .filter(|item| &item.chapter_id == chapter_id)
                .collect();
            (!items.is_empty()).then(|| (chapter_id.clone(), items))
        })
        .collect()
}

/// The first [`FEATURED_LIMIT`] memories that carry no lock at all.
#[must_use]
pub fn featured_ids(items: &[TimelineItem]) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.effective_unlock().is_none())
        .take(FEATURED_LIMIT)
        .map(|item| item.id.clone())
        .collect()
}

/// How many memories have been opened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewedProgress {
    pub viewed: usize,
    pub total: usize,
    pub percent: f64,
}

/// Counts only viewed ids that still exist in the timeline.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn viewed_progress(items: &[TimelineItem], viewed: &[String]) -> ViewedProgress {
    let total = items.len();
    let count = items.iter().filter(|item| viewed.contains(&item.id)).count();
    let percent = if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    ViewedProgress {
        viewed: count,
        total,
        percent,
    }
}
