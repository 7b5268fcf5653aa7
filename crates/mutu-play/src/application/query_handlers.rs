//! Query handlers for the Play context.

use chrono::{DateTime, Utc};
use mutu_content::ContentDocument;
use mutu_content::domain::document::{Mood, TimelineItem};
use mutu_core::store::{self, StateStore, StorageKey};
use mutu_core::text::{BilingualText, LanguageMode, LocalizedText, localize};
use mutu_unlocks::application::query_handlers::load_flags;
use mutu_unlocks::domain::aggregates::UnlockFlags;
use mutu_unlocks::domain::rules::is_unlocked;
use serde::Serialize;

use crate::domain::memory_match::{CardFace, MatchGame, MatchSession};
use crate::domain::quiz::{QuizRun, QuizSession, QuizTier, tier_for};
use crate::domain::reveal::{HoldGesture, HoldPhase};

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

/// Rehydrates the current playthrough and best score.
pub async fn load_quiz(content: &ContentDocument, store: &dyn StateStore) -> QuizRun {
    let session: QuizSession = store::get_or_default(store, StorageKey::QuizSession).await;
    let best: u32 = store::get_or_default(store, StorageKey::QuizBestScore).await;
    QuizRun::rehydrate(session, best, &content.play.quiz)
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: String,
    /// 1-based.
    pub number: usize,
    pub question: LocalizedText,
    pub options: Vec<LocalizedText>,
}

/// Feedback on the most recent answer.
#[derive(Debug, Serialize)]
pub struct AnswerFeedbackView {
    pub question_id: String,
    pub option_index: usize,
    pub correct: bool,
    pub correct_index: usize,
    pub message: LocalizedText,
}

#[derive(Debug, Serialize)]
pub struct QuizResultView {
    pub tier: QuizTier,
    pub score: u32,
    pub total: usize,
    pub message: LocalizedText,
}

#[derive(Debug, Serialize)]
pub struct QuizView {
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    pub total: usize,
    pub score: u32,
    pub best_score: u32,
    pub completed: bool,
    pub progress_percent: u32,
    /// Absent once the quiz is complete.
    pub question: Option<QuestionView>,
    pub last_answer: Option<AnswerFeedbackView>,
    /// Present once the quiz is complete.
    pub result: Option<QuizResultView>,
}

impl QuizView {
    #[must_use]
    pub fn new(run: &QuizRun, content: &ContentDocument, mode: LanguageMode) -> Self {
        let quiz = &content.play.quiz;
        let session = run.session();
        let total = quiz.questions.len();

        let question = if session.completed {
            None
        } else {
            quiz.questions
                .get(session.question_index)
                .map(|q| QuestionView {
                    id: q.id.clone(),
                    number: session.question_index + 1,
                    question: localize(&q.question, mode),
                    options: q.options.iter().map(|o| localize(o, mode)).collect(),
                })
        };

        let last_answer = session.answered.last().and_then(|answer| {
            let q = quiz.questions.iter().find(|q| q.id == answer.question_id)?;
            let copy = if answer.correct {
                &q.feedback_correct
            } else {
                &q.feedback_wrong
            };
            Some(AnswerFeedbackView {
                question_id: answer.question_id.clone(),
                option_index: answer.option_index,
                correct: answer.correct,
                correct_index: q.answer_index,
                message: localize(copy, mode),
            })
        });

        let result = session.completed.then(|| {
            let tier = tier_for(session.score, &quiz.thresholds);
            let copy = match tier {
                QuizTier::High => &quiz.result_messages.high,
                QuizTier::Mid => &quiz.result_messages.mid,
                QuizTier::Low => &quiz.result_messages.low,
            };
            QuizResultView {
                tier,
                score: session.score,
                total,
                message: localize(copy, mode),
            }
        });

        let answered = session.answered.len().min(total);
        let progress_percent = if total == 0 {
            100
        } else {
            u32::try_from(answered * 100 / total).unwrap_or(100)
        };

        Self {
            title: localize(&quiz.title, mode),
            subtitle: localize(&quiz.subtitle, mode),
            total,
            score: session.score,
            best_score: run.best_score(),
            completed: session.completed,
            progress_percent,
            question,
            last_answer,
            result,
        }
    }
}

pub async fn get_quiz(content: &ContentDocument, mode: LanguageMode, store: &dyn StateStore) -> QuizView {
    QuizView::new(&load_quiz(content, store).await, content, mode)
}

// ---------------------------------------------------------------------------
// Memory match
// ---------------------------------------------------------------------------

/// Ids of the first `pairCount` timeline items currently visible.
#[must_use]
pub fn pair_ids(content: &ContentDocument, flags: &UnlockFlags, now: DateTime<Utc>) -> Vec<String> {
    content
        .timeline
        .items
        .iter()
        .filter(|item| is_unlocked(item.effective_unlock().as_ref(), &item.id, flags, now))
        .take(content.play.memory_match.pair_count)
        .map(|item| item.id.clone())
        .collect()
}

pub async fn load_match(store: &dyn StateStore) -> MatchGame {
    let session: MatchSession = store::get_or_default(store, StorageKey::MatchSession).await;
    MatchGame::rehydrate(session)
}

#[derive(Debug, Serialize)]
pub struct CardView {
    pub index: usize,
    pub face: CardFace,
    pub face_up: bool,
    pub matched: bool,
    /// Only revealed for face-up or matched cards.
    pub label: Option<LocalizedText>,
}

#[derive(Debug, Serialize)]
pub struct MatchView {
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    pub started: bool,
    pub cards: Vec<CardView>,
    pub moves: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub won: bool,
    pub end_message: Option<LocalizedText>,
}

fn card_label(item: Option<&TimelineItem>, face: CardFace, mode: LanguageMode) -> LocalizedText {
    match (item, face) {
        (Some(item), CardFace::Date) => LocalizedText {
            primary: item.display_date.clone(),
            secondary: None,
        },
        (Some(item), CardFace::Moment) => localize(&item.title, mode),
        (None, _) => LocalizedText::default(),
    }
}

impl MatchView {
    #[must_use]
    pub fn new(session: &MatchSession, content: &ContentDocument, mode: LanguageMode) -> Self {
        let game = &content.play.memory_match;
        let cards = session
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let matched = session.matched.contains(&card.pair_id);
                let face_up = matched || session.face_up.contains(&index);
                let item = content.timeline.items.iter().find(|i| i.id == card.pair_id);
                CardView {
                    index,
                    face: card.face,
                    face_up,
                    matched,
                    label: face_up.then(|| card_label(item, card.face, mode)),
                }
            })
            .collect();
        let won = session.won();
        Self {
            title: localize(&game.title, mode),
            subtitle: localize(&game.subtitle, mode),
            started: session.started(),
            cards,
            moves: session.moves,
            matched_pairs: session.matched.len(),
            total_pairs: session.total_pairs(),
            won,
            end_message: won.then(|| localize(&game.end_message, mode)),
        }
    }
}

/// The board as of `now`; a mismatch whose delay has passed shows face down.
pub async fn get_match(
    content: &ContentDocument,
    mode: LanguageMode,
    now: DateTime<Utc>,
    store: &dyn StateStore,
) -> MatchView {
    let mut session = load_match(store).await.session().clone();
    session.settle(now, content.play.memory_match.flip_back_ms);
    MatchView::new(&session, content, mode)
}

/// The pairs a new game would be dealt from, honoring unlocks.
pub async fn current_pair_ids(
    content: &ContentDocument,
    now: DateTime<Utc>,
    store: &dyn StateStore,
) -> Vec<String> {
    let flags = load_flags(content, store).await;
    pair_ids(content, &flags, now)
}

// ---------------------------------------------------------------------------
// Finale
// ---------------------------------------------------------------------------

pub async fn load_hold(content: &ContentDocument, store: &dyn StateStore) -> HoldGesture {
    let phase: HoldPhase = store::get_or_default(store, StorageKey::FinaleHold).await;
    HoldGesture::rehydrate(phase, content.finale.hold_ms)
}

#[derive(Debug, Serialize)]
pub struct EndingChoiceView {
    pub mood: Mood,
    pub label: LocalizedText,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct HoldView {
    pub phase: &'static str,
    pub progress: f64,
    pub revealed: bool,
    pub hold_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct FinaleView {
    pub title: LocalizedText,
    pub mood: Mood,
    pub choices: Vec<EndingChoiceView>,
    pub headline: LocalizedText,
    /// Withheld until the hold completes.
    pub body: Option<LocalizedText>,
    pub cta_primary: LocalizedText,
    pub cta_secondary: LocalizedText,
    pub hold: HoldView,
}

impl FinaleView {
    /// Picks the variant for `mood`, falling back to soft and then to any
    /// configured variant.
    #[must_use]
    pub fn new(
        phase: HoldPhase,
        content: &ContentDocument,
        mood: Mood,
        mode: LanguageMode,
        now: DateTime<Utc>,
    ) -> Self {
        let finale = &content.finale;
        let variant = finale
            .variants
            .get(&mood)
            .or_else(|| finale.variants.get(&Mood::Soft))
            .or_else(|| finale.variants.values().next());
        let text = |value: Option<&BilingualText>| {
            value.map(|t| localize(t, mode)).unwrap_or_default()
        };
        let revealed = phase.is_revealed(now, finale.hold_ms);
        Self {
            title: localize(&finale.title, mode),
            mood,
            choices: finale
                .choices
                .iter()
                .map(|choice| EndingChoiceView {
                    mood: choice.id,
                    label: localize(&choice.label, mode),
                    selected: choice.id == mood,
                })
                .collect(),
            headline: text(variant.map(|v| &v.headline)),
            body: revealed.then(|| text(variant.map(|v| &v.body))),
            cta_primary: text(variant.map(|v| &v.cta_primary)),
            cta_secondary: text(variant.map(|v| &v.cta_secondary)),
            hold: HoldView {
                phase: if revealed { "revealed" } else { phase.name() },
                progress: phase.progress(now, finale.hold_ms),
                revealed,
                hold_ms: finale.hold_ms,
            },
        }
    }
}

pub async fn get_finale(
    content: &ContentDocument,
    mood: Mood,
    mode: LanguageMode,
    now: DateTime<Utc>,
    store: &dyn StateStore,
) -> FinaleView {
    let gesture = load_hold(content, store).await;
    FinaleView::new(gesture.phase(), content, mood, mode, now)
}
