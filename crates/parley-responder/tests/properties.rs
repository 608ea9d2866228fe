// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Behavioural properties of reply selection over the built-in table.

use std::collections::HashMap;
use std::sync::Arc;

use parley_config::model::MatchMode;
use parley_responder::{Category, FixedIndex, ResponseSelector, ResponseTable};
use proptest::prelude::*;
use tracing_test::traced_test;

fn builtin() -> ResponseSelector {
    ResponseSelector::new(ResponseTable::builtin().unwrap())
}

fn responses_of<'a>(selector: &'a ResponseSelector, category: &str) -> &'a [String] {
    selector.table().category(category).unwrap().responses()
}

#[test]
fn reply_belongs_to_matched_category() {
    let selector = builtin();
    for _ in 0..50 {
        let reply = selector.select_reply("hello there");
        assert!(responses_of(&selector, "greetings").contains(&reply));
    }
}

#[test]
fn unmatched_message_uses_default_responses() {
    let selector = builtin();
    for _ in 0..50 {
        let reply = selector.select_reply("xyzzy123");
        assert!(selector.table().default_responses().contains(&reply));
    }
}

#[test]
fn matching_ignores_case() {
    let selector = builtin();
    let greetings = responses_of(&selector, "greetings");
    assert!(greetings.contains(&selector.select_reply("HELLO")));
    assert!(greetings.contains(&selector.select_reply("hello")));
    assert_eq!(selector.select("GoOd MoRnInG").category, Some("greetings"));
}

#[test]
fn substring_match_fires_inside_words() {
    let selector = builtin();
    // "hi" occurs inside "this".
    assert_eq!(selector.select("this").category, Some("greetings"));
}

#[test]
fn earlier_category_takes_priority() {
    let selector = builtin();
    // Matches both greetings ("hello") and thanks ("thanks").
    assert_eq!(selector.select("hello and thanks").category, Some("greetings"));
    assert_eq!(selector.select("goodbye").category, Some("goodbye"));
    assert_eq!(selector.select("how do I deploy to aws").category, Some("deployment"));
}

#[test]
fn whole_word_mode_over_builtin_table() {
    let config = parley_config::ResponderConfig {
        match_mode: MatchMode::WholeWord,
        ..Default::default()
    };
    let selector = ResponseSelector::new(ResponseTable::from_config(&config).unwrap());
    assert!(selector.select("this").is_fallback());
    assert_eq!(selector.select("hi!").category, Some("greetings"));
}

#[test]
fn worked_example_table() {
    let table = ResponseTable::new(
        vec![
            Category::new(
                "greetings",
                vec!["hello".into(), "hi".into()],
                vec!["Hello!".into(), "Hi there!".into()],
            )
            .unwrap(),
        ],
        vec!["I didn't understand.".into()],
        MatchMode::Substring,
    )
    .unwrap();
    let selector = ResponseSelector::new(table);

    let reply = selector.select_reply("Hello, bot");
    assert!(reply == "Hello!" || reply == "Hi there!");
    assert_eq!(selector.select_reply("asdfasdf"), "I didn't understand.");
}

#[test]
fn every_greeting_reply_is_reachable() {
    let selector = builtin();
    let greetings = responses_of(&selector, "greetings").to_vec();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..2000 {
        *counts.entry(selector.select_reply("hello")).or_default() += 1;
    }
    assert_eq!(counts.len(), greetings.len());
    for reply in &greetings {
        // Expected ~667 each; 400 leaves a wide margin.
        assert!(counts[reply] > 400, "{reply} drawn {} times", counts[reply]);
    }
}

#[test]
fn fixed_source_is_deterministic() {
    let selector =
        ResponseSelector::with_random_source(ResponseTable::builtin().unwrap(), Arc::new(FixedIndex(0)));
    let first = selector.select_reply("bye");
    for _ in 0..10 {
        assert_eq!(selector.select_reply("bye"), first);
    }
}

#[test]
#[traced_test]
fn selection_is_traced() {
    let selector = builtin();
    selector.select_reply("hello");
    assert!(logs_contain("keyword matched"));
    selector.select_reply("xyzzy123");
    assert!(logs_contain("no keyword matched"));
}

#[test]
fn very_long_input_falls_back() {
    let selector = builtin();
    let message = "z".repeat(1_000_000);
    let selection = selector.select(&message);
    assert!(selection.is_fallback());
    assert!(selector.table().default_responses().iter().any(|r| r == selection.reply));
}

#[test]
fn punctuation_only_input_falls_back() {
    let selector = builtin();
    for message in ["!!!???...", "?!", "...   ", "-- ;; --"] {
        assert!(selector.select(message).is_fallback(), "{message:?}");
    }
}

#[test]
fn long_input_still_matches_keywords() {
    let selector = builtin();
    let message = format!("{} thanks", "z".repeat(100_000));
    assert_eq!(selector.select(&message).category, Some("thanks"));
}

proptest! {
    #[test]
    fn selection_is_total(message in prop_oneof![any::<String>(), ".{0,10000}"]) {
        let selector = builtin();
        let selection = selector.select(&message);
        match selection.category {
            Some(name) => {
                let category = selector.table().category(name).unwrap();
                prop_assert!(category.responses().iter().any(|r| r == selection.reply));
            }
            None => {
                prop_assert!(selector.table().default_responses().iter().any(|r| r == selection.reply));
            }
        }
    }

    #[test]
    fn case_does_not_change_category(message in "[a-zA-Z ,.!?]{0,40}") {
        let selector = builtin();
        prop_assert_eq!(
            selector.select(&message.to_uppercase()).category,
            selector.select(&message.to_lowercase()).category
        );
    }
}
