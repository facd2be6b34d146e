//! End-to-end resolution tests over a realistic persona catalog.
//!
//! Covers the whole cascade through the public engine surface: loading,
//! every matching stage, variant anti-repeat, the help listing, the goodbye
//! handoff, the name follow-up, and fallback. Each test builds its own
//! seeded engine so runs are deterministic.

use banter_catalog::ResponseCatalog;
use banter_engine::{
    ChatEngine, EffectTiming, EngineConfig, Resolution, SideEffectKind, FALLBACK_REPLY,
};
use banter_nlp::RuleNormalizer;

// =============================================================================
// Helpers
// =============================================================================

const PERSONA: &str = r#"{
    "hello": {
        "aliases": ["hi", "hey", "howdy"],
        "text": [
            "Hello! Good to see you.",
            "Hey there, welcome in.",
            "Hi! Make yourself at home.",
            "Well hello. Pull up a chair."
        ],
        "description": "Say hello"
    },
    "projects": {
        "aliases": ["portfolio", "my projects"],
        "text": "I build small, sharp tools: parsers, caches, and this terminal widget.",
        "description": "What I have been building"
    },
    "skills": {
        "aliases": ["stack", "languages", "tech"],
        "text": [
            "Mostly Rust these days, with some TypeScript on the edges.",
            "Systems code by preference, web plumbing by necessity."
        ],
        "description": "Tools and languages I use"
    },
    "contact": {
        "aliases": ["email", "reach", "hire"],
        "text": "Send mail to hello@example.dev, I read everything.",
        "description": "How to reach me"
    },
    "joke": {
        "aliases": ["funny", "make me laugh"],
        "text": [
            "I would tell you a UDP joke, but you might not get it.",
            "There are two hard problems: naming, caching, and off-by-one errors.",
            "My code never has bugs. It develops undocumented features."
        ],
        "description": "Hear a joke"
    },
    "ask-name": {
        "aliases": ["what's your name", "your name", "name"],
        "text": "I'd rather hear yours. What should I call you?",
        "description": "Introduce yourself"
    },
    "goodbye": {
        "aliases": ["bye", "exit", "quit", "see you"],
        "text": "Closing the terminal. See you on the other side!",
        "description": "Leave the terminal"
    },
    "unknown": {
        "text": [
            "Hmm, that one is beyond me.",
            "I do not have a line for that yet.",
            "Try 'help' if you want the full menu."
        ]
    },
    "help": {
        "aliases": ["commands", "menu"],
        "text": "Here is everything I can chat about."
    }
}"#;

const UNKNOWN_VARIANTS: [&str; 3] = [
    "Hmm, that one is beyond me.",
    "I do not have a line for that yet.",
    "Try 'help' if you want the full menu.",
];

fn make_engine(seed: u64) -> ChatEngine {
    let engine = ChatEngine::seeded(
        Box::new(RuleNormalizer::new()),
        EngineConfig::default(),
        seed,
    );
    engine.install_catalog(ResponseCatalog::from_json_str(PERSONA).unwrap());
    engine
}

fn reply(engine: &ChatEngine, input: &str) -> String {
    match engine.resolve(input) {
        Resolution::Reply(reply) => reply.text,
        Resolution::Loading => panic!("engine not ready for {input:?}"),
    }
}

// =============================================================================
// Loading and installation
// =============================================================================

#[test]
fn test_engine_reports_loading_until_catalog_arrives() {
    let engine = ChatEngine::seeded(
        Box::new(RuleNormalizer::new()),
        EngineConfig::default(),
        1,
    );
    assert_eq!(engine.resolve("hello"), Resolution::Loading);
    assert_eq!(engine.resolve("help"), Resolution::Loading);

    engine.install_catalog(ResponseCatalog::from_json_str(PERSONA).unwrap());
    assert!(engine.is_ready());
    assert!(engine.resolve("hello").reply().is_some());
}

#[test]
fn test_second_install_does_not_replace_catalog() {
    let engine = make_engine(2);
    engine.install_catalog(
        ResponseCatalog::from_json_str(r#"{ "other": { "text": "swapped" } }"#).unwrap(),
    );
    assert_eq!(
        reply(&engine, "portfolio"),
        "I build small, sharp tools: parsers, caches, and this terminal widget."
    );
}

// =============================================================================
// Totality: every input yields exactly one reply
// =============================================================================

#[test]
fn test_any_input_yields_one_reply() {
    let engine = make_engine(3);
    let inputs = [
        "hello",
        "HOWDY",
        "tell me about your projects",
        "projcts",
        "!!!",
        "",
        "    ",
        "Привет",
        "a",
        "zzz qqq zzz",
        "what's your name",
        "Sam",
    ];
    for input in inputs {
        let resolution = engine.resolve(input);
        let reply = resolution.reply();
        assert!(reply.is_some(), "no reply for {input:?}");
        assert!(
            !reply.map(|r| r.text.is_empty()).unwrap_or(true),
            "empty reply for {input:?}"
        );
    }
}

// =============================================================================
// Matching stages and precedence
// =============================================================================

#[test]
fn test_exact_alias_ignores_case_and_padding() {
    let engine = make_engine(4);
    for input in ["stack", "STACK", "  Stack  ", "tech"] {
        let text = reply(&engine, input);
        assert!(
            text.contains("Rust") || text.contains("Systems"),
            "unexpected reply for {input:?}: {text}"
        );
    }
}

#[test]
fn test_punctuation_does_not_break_exact_match() {
    let engine = make_engine(5);
    assert_eq!(
        reply(&engine, "Portfolio!"),
        "I build small, sharp tools: parsers, caches, and this terminal widget."
    );
}

#[test]
fn test_exact_match_wins_over_term_match() {
    // "find notes" is a full alias of the later entry and contains a noun
    // pointing at the earlier one; the exact stage must win.
    let engine = ChatEngine::seeded(
        Box::new(RuleNormalizer::new()),
        EngineConfig::default(),
        6,
    );
    engine.install_catalog(
        ResponseCatalog::from_json_str(
            r#"{
                "notes": { "aliases": ["journal"], "text": "Your notes." },
                "search": { "aliases": ["find notes"], "text": "Searching." }
            }"#,
        )
        .unwrap(),
    );
    assert_eq!(reply(&engine, "find notes"), "Searching.");
}

#[test]
fn test_term_match_wins_over_fuzzy() {
    let engine = make_engine(7);
    // "reach" is a verb alias of contact; the sentence never gets as far as
    // the fuzzy stage.
    assert_eq!(
        reply(&engine, "how do i reach you"),
        "Send mail to hello@example.dev, I read everything."
    );
}

#[test]
fn test_noun_in_sentence_selects_entry() {
    let engine = make_engine(8);
    assert_eq!(
        reply(&engine, "tell me about your projects"),
        "I build small, sharp tools: parsers, caches, and this terminal widget."
    );
}

#[test]
fn test_typo_falls_through_to_fuzzy() {
    let engine = make_engine(9);
    assert_eq!(
        reply(&engine, "contcat"),
        "Send mail to hello@example.dev, I read everything."
    );
}

// =============================================================================
// Variant selection
// =============================================================================

#[test]
fn test_greeting_variants_never_repeat_consecutively() {
    let engine = make_engine(10);
    let mut previous = reply(&engine, "hi");
    for _ in 0..40 {
        let next = reply(&engine, "hi");
        assert_ne!(next, previous, "greeting repeated back to back");
        previous = next;
    }
}

#[test]
fn test_anti_repeat_is_tracked_per_key() {
    let engine = make_engine(11);
    // Interleaving other keys must not reset the greeting's record.
    let first = reply(&engine, "hello");
    reply(&engine, "joke");
    reply(&engine, "stack");
    let second = reply(&engine, "hello");
    assert_ne!(first, second);
}

// =============================================================================
// Help listing
// =============================================================================

#[test]
fn test_help_lists_described_entries_in_catalog_order() {
    let engine = make_engine(12);
    let expected = "hello: Say hello\n\
                    projects: What I have been building\n\
                    skills: Tools and languages I use\n\
                    contact: How to reach me\n\
                    joke: Hear a joke\n\
                    ask-name: Introduce yourself\n\
                    goodbye: Leave the terminal";
    assert_eq!(reply(&engine, "help"), expected);
}

#[test]
fn test_help_is_stable_and_reachable_via_aliases() {
    let engine = make_engine(13);
    let listing = reply(&engine, "help");
    assert_eq!(reply(&engine, "commands"), listing);
    assert_eq!(reply(&engine, "  MENU  "), listing);
    assert_eq!(reply(&engine, "help"), listing);
}

#[test]
fn test_undescribed_entries_stay_out_of_help() {
    let engine = make_engine(14);
    let listing = reply(&engine, "help");
    assert!(!listing.contains("unknown"));
    assert!(!listing.contains("help:"));
}

// =============================================================================
// Goodbye handoff
// =============================================================================

#[test]
fn test_goodbye_reply_requests_view_toggle_after_render() {
    let engine = make_engine(15);
    let resolution = engine.resolve("quit");
    let reply = resolution.reply().unwrap();
    assert_eq!(reply.text, "Closing the terminal. See you on the other side!");
    assert_eq!(reply.side_effects.len(), 1);
    assert_eq!(reply.side_effects[0].kind, SideEffectKind::ToggleView);
    assert_eq!(reply.side_effects[0].timing, EffectTiming::AfterRender);
}

#[test]
fn test_misspelled_goodbye_still_hands_off() {
    let engine = make_engine(16);
    let resolution = engine.resolve("goodby");
    assert_eq!(resolution.reply().unwrap().side_effects.len(), 1);
}

#[test]
fn test_non_goodbye_replies_have_no_side_effects() {
    let engine = make_engine(17);
    for input in ["hello", "help", "projects", "zzz qqq zzz"] {
        let resolution = engine.resolve(input);
        assert!(
            resolution.reply().unwrap().side_effects.is_empty(),
            "unexpected side effect for {input:?}"
        );
    }
}

// =============================================================================
// Name follow-up
// =============================================================================

#[test]
fn test_name_follow_up_round_trip() {
    let engine = make_engine(18);
    assert_eq!(
        reply(&engine, "what's your name"),
        "I'd rather hear yours. What should I call you?"
    );
    assert_eq!(reply(&engine, "sam"), "Nice to meet you, Sam!");
}

#[test]
fn test_name_without_apostrophe_matches_by_terms() {
    let engine = make_engine(19);
    // "whats your name" misses the exact alias but "name" lands as a noun.
    assert_eq!(
        reply(&engine, "whats your name"),
        "I'd rather hear yours. What should I call you?"
    );
}

#[test]
fn test_only_first_letter_is_capitalized() {
    let engine = make_engine(20);
    reply(&engine, "your name");
    assert_eq!(reply(&engine, "mary jane"), "Nice to meet you, Mary jane!");
}

#[test]
fn test_follow_up_expires_after_one_turn() {
    let engine = make_engine(21);
    reply(&engine, "your name");
    assert_eq!(reply(&engine, "quit"), "Nice to meet you, Quit!");
    // Consumed: the same input now resolves normally, effect included.
    let resolution = engine.resolve("quit");
    assert_eq!(resolution.reply().unwrap().side_effects.len(), 1);
}

// =============================================================================
// Fallback
// =============================================================================

#[test]
fn test_unmatched_input_draws_from_unknown_entry() {
    let engine = make_engine(22);
    let text = reply(&engine, "zzz qqq zzz");
    assert!(
        UNKNOWN_VARIANTS.contains(&text.as_str()),
        "unexpected fallback: {text}"
    );
}

#[test]
fn test_consecutive_fallbacks_vary() {
    let engine = make_engine(23);
    let first = reply(&engine, "zzz qqq zzz");
    let second = reply(&engine, "zzz qqq zzz");
    assert_ne!(first, second);
}

#[test]
fn test_fallback_without_unknown_entry_is_fixed_sentinel() {
    let engine = ChatEngine::seeded(
        Box::new(RuleNormalizer::new()),
        EngineConfig::default(),
        24,
    );
    engine.install_catalog(
        ResponseCatalog::from_json_str(r#"{ "hello": { "text": "Hi!" } }"#).unwrap(),
    );
    assert_eq!(reply(&engine, "zzz qqq zzz"), FALLBACK_REPLY);
}

// =============================================================================
// Determinism and full conversations
// =============================================================================

#[test]
fn test_identical_seeds_replay_identical_conversations() {
    let script = [
        "hi", "joke", "hello", "what's your name", "Sam", "joke", "stack",
        "zzz qqq zzz", "byee",
    ];
    let left = make_engine(42);
    let right = make_engine(42);
    for input in script {
        assert_eq!(left.resolve(input), right.resolve(input), "diverged at {input:?}");
    }
}

#[test]
fn test_full_conversation_walks_every_stage() {
    let engine = make_engine(25);

    // Greeting (exact on alias).
    let greeting = reply(&engine, "hi");
    assert!(!greeting.is_empty());

    // Term match inside a sentence.
    assert_eq!(
        reply(&engine, "tell me about your projects"),
        "I build small, sharp tools: parsers, caches, and this terminal widget."
    );

    // Help listing.
    assert!(reply(&engine, "commands").starts_with("hello: Say hello"));

    // Name exchange.
    reply(&engine, "what's your name");
    assert_eq!(reply(&engine, "Ada"), "Nice to meet you, Ada!");

    // Fuzzy goodbye carries the handoff.
    let farewell = engine.resolve("byee");
    let farewell = farewell.reply().unwrap();
    assert_eq!(farewell.text, "Closing the terminal. See you on the other side!");
    assert_eq!(farewell.side_effects.len(), 1);
}
