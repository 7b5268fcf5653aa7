//! Fixture Content Document shared by handler and API tests.

use mutu_content::ContentDocument;

/// A small but complete document: gated, eight steps, six timeline items
/// (one vault-locked), three quiz questions with thresholds 3/2, three
/// match pairs, five coupons, a seven-tap vault and three future items.
pub const FIXTURE_JSON: &str = r#"{
  "meta": {
    "appId": "mutu-memoir",
    "appName": { "en": "Mutu Memoir", "np": "Mutu Memoir (मुटु सम्झना)" },
    "version": "1.0.0",
    "timezone": "Asia/Kathmandu",
    "localeDefault": "mixed"
  },
  "settings": {
    "languageModeDefault": "mixed",
    "moodDefault": "soft",
    "reducedMotionDefault": "system",
    "privacy": { "noIndex": true, "showAppTitlePublic": false }
  },
  "gate": {
    "enabled": true,
    "title": { "en": "Enter our code", "np": "hamro code hala na" },
    "hint": { "en": "Hint: our tiny signature word.", "np": "hint: hamro cute signature word." },
    "pinMode": "phrase",
    "phraseOptions": ["wana", "mutu", "919"],
    "errorMessage": { "en": "Almost, try again my mutu", "np": "close, feri try gara mutu" },
    "successMessage": { "en": "Unlocked", "np": "khulyo" }
  },
  "cover": {
    "title": { "en": "For Reeja, my mutu.", "np": "Reeja ko lagi, mero mutu" },
    "subtitle": { "en": "A small place where our memories live.", "np": "hamro samjhana haru basne sano thau." },
    "ctaPrimary": { "en": "Open it", "np": "khola na" },
    "footer": "Made by your person."
  },
  "milestones": [
    { "id": "ms_added", "label": { "en": "We added each other", "np": "hami add bhayau" }, "dateISO": "2024-12-14T21:19:00+05:45" },
    { "id": "ms_first_date", "label": { "en": "First date", "np": "pahilo date" }, "dateISO": "2025-01-22T00:00:00+05:45" }
  ],
  "steps": [
    { "id": "step_cover", "label": { "en": "Open", "np": "khola" } },
    { "id": "step_letter", "label": { "en": "Letter", "np": "chitthi" } },
    { "id": "step_timeline", "label": { "en": "Relive", "np": "samjha" } },
    { "id": "step_gallery", "label": { "en": "Gallery", "np": "photo corner" } },
    { "id": "step_nurse", "label": { "en": "For my nurse", "np": "mero nurse ko lagi" } },
    { "id": "step_play", "label": { "en": "Play", "np": "khela" } },
    { "id": "step_promises", "label": { "en": "Promises", "np": "bachan" } },
    { "id": "step_finale", "label": { "en": "Finale", "np": "last" } }
  ],
  "letter": {
    "title": { "en": "A letter for you", "np": "timro lagi ek chitthi" },
    "variants": {
      "soft": { "body": { "en": "Reeja, my mutu.", "np": "Reeja, mero mutu." }, "cta": { "en": "Continue", "np": "agadi jaau" } },
      "funny": { "body": { "en": "Rule 1: smile.", "np": "Rule 1: smile." }, "cta": "Let's go" }
    }
  },
  "timeline": {
    "title": { "en": "Our Timeline", "np": "hamro timeline" },
    "chapterOrder": ["ch_beginning", "ch_growing", "ch_rituals"],
    "chapters": [
      { "id": "ch_beginning", "title": { "en": "The Beginning", "np": "suruko din haru" } },
      { "id": "ch_growing", "title": { "en": "Growing Feelings", "np": "maya badhdai gayo" } },
      { "id": "ch_rituals", "title": { "en": "Our Rituals", "np": "hamro ritual" } }
    ],
    "items": [
      {
        "id": "m_added", "chapterId": "ch_beginning", "dateISO": "2024-12-14T21:19:00+05:45",
        "displayDate": "December 14, 2024 - 9:19 PM",
        "title": { "en": "The first moment", "np": "suruko moment" },
        "short": { "en": "We added each other.", "np": "hami add bhayau." },
        "long": { "en": "One small tap, one big beginning.", "np": "sano click, thulo suru." },
        "tags": ["Firsts", "Destiny"]
      },
      {
        "id": "m_godawari", "chapterId": "ch_beginning", "dateISO": "2024-12-25T13:00:00+05:45",
        "displayDate": "December 25, 2024",
        "title": { "en": "Godawari, just us", "np": "Godawari, sirf hami" },
        "short": { "en": "Our first real alone moment.", "np": "hamro pahilo real alone moment." },
        "tags": ["Firsts", "Dates"],
        "audio": "/audio/godawari-note.mp3"
      },
      {
        "id": "m_first_date", "chapterId": "ch_growing", "dateISO": "2025-01-22T00:00:00+05:45",
        "displayDate": "January 22, 2025",
        "title": { "en": "Our first date", "np": "hamro pahilo date" },
        "short": { "en": "Officially, us.", "np": "officially, hami." },
        "tags": ["Dates", "Firsts"]
      },
      {
        "id": "m_family_dinner", "chapterId": "ch_growing", "dateISO": "2025-01-25T00:00:00+05:45",
        "displayDate": "January 25, 2025",
        "title": { "en": "Dinner with my family", "np": "mero family sanga dinner" },
        "short": { "en": "My heart was full.", "np": "mero mutu full bhayo." },
        "tags": ["Family", "Milestone"]
      },
      {
        "id": "m_famous", "chapterId": "ch_rituals", "dateISO": "2025-03-28T00:00:00+05:45",
        "displayDate": "March 28, 2025",
        "title": { "en": "The famous moment", "np": "famous moment" },
        "short": { "en": "Only we know.", "np": "sirf hami lai thaha." },
        "tags": ["Funny", "Inside Joke"],
        "locked": true,
        "unlock": { "type": "vault", "requires": "unlocks.vault=true" }
      },
      {
        "id": "m_long_call", "chapterId": "ch_rituals", "dateISO": "2025-11-21T00:00:00+05:45",
        "displayDate": "November 21, 2025",
        "title": { "en": "6 hours 58 minutes", "np": "6 ghanta 58 minute" },
        "short": { "en": "Whole night. Whole heart.", "np": "raat bhari. mutu bhari." },
        "tags": ["Calls", "Iconic"]
      }
    ]
  },
  "gallery": {
    "title": "Polaroid Gallery",
    "items": [
      { "id": "g_yellow_dress", "image": "/img/gallery/yellow-dress.jpg", "dateISO": "2025-07-14T00:00:00+05:45", "caption": { "en": "Yellow dress day", "np": "yellow dress din" } },
      { "id": "g_sari_call", "image": "/img/gallery/sari-call.mp4", "dateISO": "2025-10-22T00:00:00+05:45", "caption": { "en": "Sari on video call", "np": "video call ma sari" } }
    ]
  },
  "nurseAppreciation": {
    "title": { "en": "For my nurse", "np": "mero nurse mutu ko lagi" },
    "sections": [
      { "id": "n1", "heading": "What I admire about you", "body": "You care all day and still make space for love." },
      { "id": "n2", "heading": "Rest mode (official)", "body": "You are allowed to rest right now, not later." }
    ],
    "audio": "/audio/nurse-appreciation.mp3"
  },
  "play": {
    "quiz": {
      "title": "Mutu Quiz",
      "questions": [
        {
          "id": "q_919",
          "question": { "en": "What time did we add each other?", "np": "hami kati baje add bhayau?" },
          "options": [{ "en": "8:19 PM", "np": "8:19" }, { "en": "9:19 PM", "np": "9:19" }, { "en": "10:19 PM", "np": "10:19" }],
          "answerIndex": 1,
          "feedbackCorrect": { "en": "Correct. Sacred time", "np": "correct. sacred time" },
          "feedbackWrong": { "en": "Close! I will remind you forever", "np": "close! ma yaad garaidinchhu" }
        },
        {
          "id": "q_godawari",
          "question": "Where was our first real alone moment?",
          "options": ["Godawari", "Thamel", "Patan"],
          "answerIndex": 0,
          "feedbackCorrect": "Yes. Godawari forever.",
          "feedbackWrong": "It was Godawari"
        },
        {
          "id": "q_parking",
          "question": "Our destiny meet happened where?",
          "options": ["Parking lot", "Bus stop", "Cafe"],
          "answerIndex": 0,
          "feedbackCorrect": "Correct.",
          "feedbackWrong": "Nope, parking lot"
        }
      ],
      "thresholds": { "high": 3, "mid": 2 },
      "resultMessages": {
        "high": "Soulmate-level memory.",
        "mid": "Strong mutu energy.",
        "low": "Okay, but you are cute, so forgiven."
      }
    },
    "memoryMatch": {
      "title": "Memory Match",
      "pairCount": 3,
      "flipBackMs": 900,
      "endMessage": { "en": "Perfect match", "np": "perfect match" }
    }
  },
  "promises": {
    "title": "Promises & Coupons",
    "filters": [
      { "id": "all", "label": { "en": "All", "np": "sab" } },
      { "id": "unlocked", "label": { "en": "Unlocked", "np": "khuleko" } },
      { "id": "redeemed", "label": { "en": "Redeemed", "np": "use bhayeko" } }
    ],
    "ctaRedeem": { "en": "Redeem", "np": "use gara" },
    "ctaUndo": { "en": "Undo", "np": "farkau" },
    "items": [
      { "id": "c_nurse_rescue", "rarity": "Legendary", "icon": "🩺", "title": "Nurse fatigue rescue day", "desc": "You rest. I handle everything." },
      { "id": "c_momo_movie", "rarity": "Common", "icon": "🥟", "title": "Momo + movie night", "desc": "Your movie choice, my momo duty." },
      { "id": "c_listen_first", "rarity": "Rare", "icon": "👂", "title": "I will listen first pass", "desc": "No fixing, just listening." },
      { "id": "c_godawari_repeat", "rarity": "Legendary", "icon": "🌿", "title": "Godawari part-2", "desc": "We make a new memory there." },
      { "id": "c_phone_free_walk", "rarity": "Common", "icon": "🚶", "title": "Phone-free walk", "desc": "No scrolling, just us." }
    ]
  },
  "finale": {
    "title": { "en": "Choose your ending", "np": "ending choose gara mutu" },
    "choices": [
      { "id": "soft", "label": "Soft" },
      { "id": "funny", "label": "Funny" },
      { "id": "romantic", "label": { "en": "Emotional", "np": "emotional" } }
    ],
    "variants": {
      "soft": { "headline": { "en": "Happy Valentine's Day, Reeja.", "np": "Happy Valentine's Day, mero mutu" }, "body": "Thank you for choosing me again and again." },
      "funny": { "headline": "Serious announcement", "body": "You are officially my favorite human." },
      "romantic": { "headline": { "en": "My Reeja, my home.", "np": "Mero Reeja, mero ghar." }, "body": "If I had one word for you, it is home." }
    },
    "holdMs": 1500
  },
  "vault": {
    "title": { "en": "Inside Joke Vault", "np": "inside joke vault" },
    "unlock": { "type": "tapSequence", "target": "heart", "count": 7, "successMessage": { "en": "Unlocked", "np": "khulyo" } },
    "items": [
      { "id": "v_wana", "title": "Wana", "body": { "en": "Tiny word, huge feeling.", "np": "sano word, thulo feeling." } },
      { "id": "v_bathroom_call", "title": "Bathroom call day", "body": "Real life, no filter, pure love." }
    ]
  },
  "futureTimeline": {
    "title": { "en": "Future Us", "np": "future hami" },
    "items": [
      { "id": "f_first_trip", "locked": true, "unlock": { "type": "date", "dateISO": "2026-12-14T00:00:00+05:45" }, "title": "Our next big trip", "short": "To be written by us." },
      { "id": "f_new_home", "locked": true, "unlock": { "type": "passcode", "codeHint": "A word we say when we miss each other." }, "title": "Our home chapter", "short": "Coming soon" },
      { "id": "f_promise_walk", "locked": false, "unlock": { "type": "passcode" }, "title": "Sunday walks", "short": "Already ours." }
    ]
  },
  "writeBack": {
    "title": { "en": "Write back to me", "np": "malai lekha mutu" },
    "ctaSave": "Save",
    "ctaClear": "Clear",
    "savedToast": { "en": "Saved", "np": "save bhayo" }
  }
}"#;

/// Parses [`FIXTURE_JSON`] through the real loader.
///
/// # Panics
///
/// Panics if the fixture no longer satisfies content validation.
#[must_use]
pub fn fixture_content() -> ContentDocument {
    mutu_content::parse_json(FIXTURE_JSON).expect("fixture content is valid")
}
