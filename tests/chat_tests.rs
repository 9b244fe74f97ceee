// Host-side tests for the chat boundary: wire format, keywords and fallbacks.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use starfield_core::chat::{
    extract_keywords, fallback_response, keyword_events, local_response, ChatResponse,
    Conversation, Role, Section, FALLBACK_RESPONSES,
};
use starfield_core::{BurstKind, Error, FieldEvent};

#[test]
fn keywords_match_case_insensitively_in_table_order() {
    let hits = extract_keywords("I loved the BOOK about Pixel Radar");
    let found: Vec<(&str, Section)> = hits.iter().map(|h| (h.keyword.as_str(), h.section)).collect();
    assert_eq!(
        found,
        vec![
            ("pixel radar", Section::Work),
            ("book", Section::Reading),
            ("about", Section::About),
        ]
    );
    assert!(extract_keywords("hello there").is_empty());
}

#[test]
fn keyword_events_pair_attraction_with_tinted_burst() {
    let hits = extract_keywords("aviation and education");
    let events = keyword_events(&hits, |section| match section {
        Section::Work => Some((Vec2::new(100.0, 200.0), 1000.0)),
        _ => None,
    });
    assert_eq!(
        events,
        vec![
            FieldEvent::Attract {
                point: Vec2::new(100.0, 200.0),
                radius: 400.0,
            },
            FieldEvent::Burst {
                point: Vec2::new(100.0, 200.0),
                kind: BurstKind::Elegant,
                hue: Some(Section::Work.hue()),
            },
        ]
    );
}

#[test]
fn keyword_attraction_radius_has_a_floor() {
    let hits = extract_keywords("fractal");
    let events = keyword_events(&hits, |_| Some((Vec2::ZERO, 10.0)));
    assert!(matches!(events[0], FieldEvent::Attract { radius, .. } if radius == 120.0));
}

#[test]
fn response_parses_with_optional_fields() {
    let full = ChatResponse::from_json(
        r#"{"response":"hi","keywords":[{"keyword":"book","section":"reading"}],"fallback":false,"success":true}"#,
    )
    .unwrap();
    assert_eq!(full.keywords[0].section, Section::Reading);

    let minimal = ChatResponse::from_json(r#"{"response":"ok"}"#).unwrap();
    assert!(minimal.success);
    assert!(!minimal.fallback);
    assert!(minimal.keywords.is_empty());

    assert!(matches!(ChatResponse::from_json("<html>"), Err(Error::Decode(_))));
}

#[test]
fn fallback_is_one_of_the_canned_answers() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        assert!(FALLBACK_RESPONSES.contains(&fallback_response(&mut rng)));
    }
}

#[test]
fn local_response_prefixes_by_context() {
    assert!(local_response("tell me about pixel radar", 3, 1, 60).starts_with("You're up late!"));
    assert!(local_response("air india?", 14, 3, 60).starts_with("Welcome back (visit #3)."));
    assert!(local_response("hi", 14, 1, 2).starts_with("Quick question!"));
    let plain = local_response("what is your design process", 14, 1, 60);
    assert!(plain.starts_with("Three pillars"));
}

#[test]
fn conversation_rejects_blank_messages() {
    let mut c = Conversation::new(1);
    assert!(matches!(c.request("   ", 0), Err(Error::EmptyMessage)));
    assert_eq!(c.history().count(), 0);
}

#[test]
fn conversation_context_carries_prior_turns_only() {
    let mut c = Conversation::new(2);
    c.current_section = Some("work".into());
    let first = c.request("hello", 5).unwrap();
    assert!(first.context.previous_messages.is_empty());
    c.push(Role::Assistant, "hi!");

    let second = c.request("  what's new?  ", 9).unwrap();
    assert_eq!(second.message, "what's new?");
    assert_eq!(second.context.previous_messages.len(), 2);
    assert_eq!(second.context.visit_number, 2);

    let json = serde_json::to_value(&second).unwrap();
    assert_eq!(json["context"]["currentSection"], "work");
    assert_eq!(json["context"]["timeOnSite"], 9);
    assert_eq!(json["context"]["previousMessages"][0]["role"], "user");
}

#[test]
fn conversation_history_is_capped() {
    let mut c = Conversation::new(1);
    for i in 0..25 {
        c.request(&format!("message {i}"), i).unwrap();
        c.push(Role::Assistant, format!("reply {i}"));
    }
    let history: Vec<_> = c.history().collect();
    assert_eq!(history.len(), 10);
    assert_eq!(history.last().unwrap().content, "reply 24");
}
