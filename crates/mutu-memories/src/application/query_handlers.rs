//! Query handlers for the Memories context.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mutu_content::ContentDocument;
use mutu_content::domain::document::TimelineItem;
use mutu_core::store::{self, StateStore, StorageKey};
use mutu_core::text::{LanguageMode, LocalizedText, localize};
use mutu_unlocks::application::query_handlers::load_flags;
use mutu_unlocks::domain::aggregates::UnlockFlags;
use mutu_unlocks::domain::rules::{LockNote, is_unlocked, lock_note};
use serde::Serialize;

use crate::domain::aggregates::MemoryJournal;
use crate::domain::milestones::{elapsed_since, next_anniversary};
use crate::domain::timeline::{
    ALL_TAGS, ViewedProgress, featured_ids, filter, group_by_chapter, tag_list, viewed_progress,
};

/// Rehydrates the viewed set and reactions.
pub async fn load_journal(store: &dyn StateStore) -> MemoryJournal {
    let viewed: Vec<String> = store::get_or_default(store, StorageKey::ViewedIds).await;
    let reactions: BTreeMap<String, String> =
        store::get_or_default(store, StorageKey::Reactions).await;
    MemoryJournal::new(viewed, reactions)
}

/// One memory as a timeline card.
#[derive(Debug, Serialize)]
pub struct MemoryCardView {
    pub id: String,
    pub display_date: String,
    pub title: LocalizedText,
    pub short: LocalizedText,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub has_audio: bool,
    pub locked: bool,
    pub lock_note: Option<LockNote>,
    pub viewed: bool,
    pub reaction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChapterView {
    pub id: String,
    pub title: LocalizedText,
    pub hint: LocalizedText,
    pub items: Vec<MemoryCardView>,
}

/// The filtered, chaptered timeline.
#[derive(Debug, Serialize)]
pub struct TimelineView {
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    pub tags: Vec<String>,
    pub active_tag: String,
    pub query: String,
    pub chapters: Vec<ChapterView>,
    /// True when the filter matched nothing.
    pub empty: bool,
    pub progress: ViewedProgress,
    pub featured_ids: Vec<String>,
    pub reactions: Vec<String>,
}

fn card(
    item: &TimelineItem,
    journal: &MemoryJournal,
    flags: &UnlockFlags,
    now: DateTime<Utc>,
    mode: LanguageMode,
) -> MemoryCardView {
    let rule = item.effective_unlock();
    let note = lock_note(rule.as_ref(), &item.id, flags, now);
    MemoryCardView {
        id: item.id.clone(),
        display_date: item.display_date.clone(),
        title: localize(&item.title, mode),
        short: localize(&item.short, mode),
        tags: item.tags.clone(),
        image: item.image.clone(),
        has_audio: item.audio.is_some(),
        locked: note.is_some(),
        lock_note: note,
        viewed: journal.viewed().contains(&item.id),
        reaction: journal.reactions().get(&item.id).cloned(),
    }
}

/// Filter parameters for [`get_timeline`].
#[derive(Debug, Clone, Default)]
pub struct TimelineQuery {
    pub tag: Option<String>,
    pub q: Option<String>,
}

/// The timeline filtered by tag and search text.
pub async fn get_timeline(
    content: &ContentDocument,
    query: &TimelineQuery,
    mode: LanguageMode,
    now: DateTime<Utc>,
    store: &dyn StateStore,
) -> TimelineView {
    let timeline = &content.timeline;
    let flags = load_flags(content, store).await;
    let journal = load_journal(store).await;

    let filtered = filter(&timeline.items, query.tag.as_deref(), query.q.as_deref());
    let chapters: Vec<ChapterView> = group_by_chapter(timeline, &filtered)
        .into_iter()
        .map(|(chapter_id, items)| {
            let chapter = timeline.chapters.iter().find(|c| c.id == chapter_id);
            ChapterView {
                title: chapter
                    .map(|c| localize(&c.title, mode))
                    .unwrap_or_default(),
                hint: chapter.map(|c| localize(&c.hint, mode)).unwrap_or_default(),
                items: items
                    .into_iter()
                    .map(|item| card(item, &journal, &flags, now, mode))
                    .collect(),
                id: chapter_id,
            }
        })
        .collect();

    TimelineView {
        title: localize(&timeline.title, mode),
        subtitle: localize(&timeline.subtitle, mode),
        tags: tag_list(&timeline.items),
        active_tag: query.tag.clone().unwrap_or_else(|| ALL_TAGS.to_owned()),
        query: query.q.clone().unwrap_or_default(),
        empty: chapters.is_empty(),
        chapters,
        progress: viewed_progress(&timeline.items, journal.viewed()),
        featured_ids: featured_ids(&timeline.items),
        reactions: timeline.reactions.clone(),
    }
}

/// An opened memory.
#[derive(Debug, Serialize)]
pub struct MemoryDetailView {
    pub id: String,
    pub chapter_id: String,
    pub display_date: String,
    pub date_iso: Option<DateTime<Utc>>,
    pub title: LocalizedText,
    pub short: LocalizedText,
    pub long: LocalizedText,
    pub location: Option<LocalizedText>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub audio: Option<String>,
    pub reaction: Option<String>,
    pub reactions: Vec<String>,
}

impl MemoryDetailView {
    #[must_use]
    pub fn new(
        item: &TimelineItem,
        journal: &MemoryJournal,
        reactions: &[String],
        mode: LanguageMode,
    ) -> Self {
        Self {
            id: item.id.clone(),
            chapter_id: item.chapter_id.clone(),
            display_date: item.display_date.clone(),
            date_iso: item.date_iso,
            title: localize(&item.title, mode),
            short: localize(&item.short, mode),
            long: localize(&item.long, mode),
            location: item.location.as_ref().map(|l| localize(l, mode)),
            tags: item.tags.clone(),
            image: item.image.clone(),
            audio: item.audio.clone(),
            reaction: journal.reactions().get(&item.id).cloned(),
            reactions: reactions.to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MilestoneCounterView {
    pub id: String,
    pub label: LocalizedText,
    pub date_iso: DateTime<Utc>,
    pub days_since: i64,
    pub hours_since: i64,
}

#[derive(Debug, Serialize)]
pub struct NextMilestoneView {
    pub id: String,
    pub label: LocalizedText,
    pub next_date: DateTime<Utc>,
    pub days_until: i64,
}

#[derive(Debug, Serialize)]
pub struct MilestonesView {
    pub timezone: String,
    pub counters: Vec<MilestoneCounterView>,
    pub next: Option<NextMilestoneView>,
}

/// Day counters for every milestone and the soonest upcoming anniversary.
#[must_use]
pub fn get_milestones(
    content: &ContentDocument,
    mode: LanguageMode,
    now: DateTime<Utc>,
) -> MilestonesView {
    let counters = content
        .milestones
        .iter()
        .map(|m| {
            let (days_since, hours_since) = elapsed_since(m.date_iso, now);
            MilestoneCounterView {
                id: m.id.clone(),
                label: localize(&m.label, mode),
                date_iso: m.date_iso,
                days_since,
                hours_since,
            }
        })
        .collect();
    let next = content
        .milestones
        .iter()
        .map(|m| (m, next_anniversary(m.date_iso, now)))
        .min_by_key(|(_, (_, days))| *days)
        .map(|(m, (next_date, days_until))| NextMilestoneView {
            id: m.id.clone(),
            label: localize(&m.label, mode),
            next_date,
            days_until,
        });
    MilestonesView {
        timezone: content.meta.timezone.clone(),
        counters,
        next,
    }
}

#[derive(Debug, Serialize)]
pub struct FutureItemView {
    pub id: String,
    pub title: LocalizedText,
    pub short: LocalizedText,
    pub unlocked: bool,
    pub lock_note: Option<LockNote>,
}

#[derive(Debug, Serialize)]
pub struct FutureView {
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    /// Whether a passcode form is worth showing.
    pub accepts_passcode: bool,
    pub items: Vec<FutureItemView>,
}

/// The future timeline with per-item visibility.
pub async fn get_future(
    content: &ContentDocument,
    mode: LanguageMode,
    now: DateTime<Utc>,
    store: &dyn StateStore,
) -> FutureView {
    let flags = load_flags(content, store).await;
    let future = &content.future_timeline;
    let items: Vec<FutureItemView> = future
        .items
        .iter()
        .map(|item| {
            let rule = item.effective_unlock();
            FutureItemView {
                id: item.id.clone(),
                title: localize(&item.title, mode),
                short: localize(&item.short, mode),
                unlocked: is_unlocked(rule.as_ref(), &item.id, &flags, now),
                lock_note: lock_note(rule.as_ref(), &item.id, &flags, now),
            }
        })
        .collect();
    FutureView {
        title: localize(&future.title, mode),
        subtitle: localize(&future.subtitle, mode),
        accepts_passcode: items
            .iter()
            .any(|i| matches!(i.lock_note, Some(LockNote::Passcode { .. }))),
        items,
    }
}
