//! Chat endpoint boundary: wire types, keyword detection and fallbacks.
//!
//! The field never sees chat text. Keyword hits are turned into
//! `FieldEvent`s here, through a locator the host supplies for section
//! positions.

use crate::constants::CHAT_HISTORY_LIMIT;
use crate::error::{Error, Result};
use crate::events::FieldEvent;
use crate::particle::BurstKind;
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Page sections keyword hits can point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    Work,
    Reading,
    About,
}

impl Section {
    /// DOM id of the section element.
    pub fn element_id(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Work => "work",
            Section::Reading => "reading",
            Section::About => "about",
        }
    }

    /// Accent hue used to tint bursts aimed at this section.
    pub fn hue(self) -> f32 {
        match self {
            Section::Home => 352.0,
            Section::Work => 217.0,
            Section::Reading => 160.0,
            Section::About => 258.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_section: Option<String>,
    pub time_on_site: u64,
    pub visit_number: u32,
    pub previous_messages: Vec<ChatTurn>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: ChatContext,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub section: Section,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub keywords: Vec<KeywordHit>,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

impl ChatResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

const KEYWORD_TRIGGERS: &[(&str, Section)] = &[
    ("pixel radar", Section::Work),
    ("air india", Section::Work),
    ("aviation", Section::Work),
    ("design system", Section::Work),
    ("latent space", Section::Work),
    ("fractal", Section::Work),
    ("book", Section::Reading),
    ("baldur", Section::Reading),
    ("game", Section::Reading),
    ("about", Section::About),
    ("experience", Section::About),
    ("education", Section::About),
];

/// Recognized keywords in `text`, in trigger-table order.
pub fn extract_keywords(text: &str) -> Vec<KeywordHit> {
    let lower = text.to_lowercase();
    KEYWORD_TRIGGERS
        .iter()
        .filter(|(kw, _)| lower.contains(kw))
        .map(|&(kw, section)| KeywordHit {
            keyword: kw.to_string(),
            section,
        })
        .collect()
}

/// Attraction plus a tinted burst for every hit whose section the locator
/// can place on screen.
pub fn keyword_events(
    hits: &[KeywordHit],
    mut locate: impl FnMut(Section) -> Option<(Vec2, f32)>,
) -> Vec<FieldEvent> {
    let mut events = Vec::with_capacity(hits.len() * 2);
    for hit in hits {
        let Some((center, width)) = locate(hit.section) else {
            log::debug!("[chat] no element for section {:?}", hit.section);
            continue;
        };
        log::info!("[chat] keyword {:?} -> {:?}", hit.keyword, hit.section);
        events.push(FieldEvent::Attract {
            point: center,
            radius: (width * 0.6).clamp(120.0, 400.0),
        });
        events.push(FieldEvent::Burst {
            point: center,
            kind: BurstKind::Elegant,
            hue: Some(hit.section.hue()),
        });
    }
    events
}

pub const FALLBACK_RESPONSES: &[&str] = &[
    "I'm having a moment of digital reflection. Could you rephrase that?",
    "My consciousness needs a moment to process. Try asking differently?",
    "The living interface is recalibrating. What else would you like to know?",
];

pub fn fallback_response(rng: &mut impl Rng) -> &'static str {
    FALLBACK_RESPONSES[rng.gen_range(0..FALLBACK_RESPONSES.len())]
}

const LOCAL_ANSWERS: &[(&str, &str)] = &[
    (
        "pixel radar",
        "Pixel Radar is my Figma QA assistant that audits components against tokens and variables. It flags drift, suggests fixes and can comment on PRs from CI.",
    ),
    (
        "air india",
        "I'm at Air India DesignLAB, leading design transformation and building scalable design systems across web, mobile and in-flight entertainment.",
    ),
    (
        "design process",
        "Three pillars: systems (tokens, variables, guardrails), narrative (the story users follow under pressure) and instrumentation (metrics and feedback that let the interface evolve).",
    ),
    (
        "living interfaces",
        "Interfaces that breathe, remember and evolve: purposeful motion, memory that adapts behaviour, and a UI that learns from usage.",
    ),
];

const LOCAL_DEFAULT: &str = "That's an interesting question! Feel free to ask about Pixel Radar, my design process, or how I can help your team build living interfaces.";

/// Offline answer used when the endpoint is unreachable and the question
/// matches a known topic.
pub fn local_response(question: &str, hour: u32, visits: u32, time_on_site: u64) -> String {
    let q = question.to_lowercase();
    let prefix = if hour < 6 {
        "You're up late! ".to_string()
    } else if visits > 1 {
        format!("Welcome back (visit #{visits}). ")
    } else if time_on_site < 5 {
        "Quick question! ".to_string()
    } else {
        String::new()
    };
    let body = LOCAL_ANSWERS
        .iter()
        .find(|(key, _)| q.contains(key))
        .map(|(_, answer)| *answer)
        .unwrap_or(LOCAL_DEFAULT);
    prefix + body
}

/// Rolling conversation state used to build requests.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    history: VecDeque<ChatTurn>,
    pub current_section: Option<String>,
    pub visit_number: u32,
}

impl Conversation {
    pub fn new(visit_number: u32) -> Self {
        Self {
            visit_number,
            ..Self::default()
        }
    }

    pub fn history(&self) -> impl Iterator<Item = &ChatTurn> {
        self.history.iter()
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.history.push_back(ChatTurn {
            role,
            content: content.into(),
        });
        while self.history.len() > CHAT_HISTORY_LIMIT {
            self.history.pop_front();
        }
    }

    /// Build the request for `message` (context carries history before it)
    /// and record the user turn.
    pub fn request(&mut self, message: &str, time_on_site: u64) -> Result<ChatRequest> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::EmptyMessage);
        }
        let request = ChatRequest {
            message: message.to_string(),
            context: ChatContext {
                current_section: self.current_section.clone(),
                time_on_site,
                visit_number: self.visit_number.max(1),
                previous_messages: self.history.iter().cloned().collect(),
            },
        };
        self.push(Role::User, message);
        Ok(request)
    }
}
