// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compiled-in response table used when the config file does not supply one.

use crate::model::CategoryConfig;

fn category(name: &str, keywords: &[&str], responses: &[&str]) -> CategoryConfig {
    CategoryConfig {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        responses: responses.iter().map(|r| r.to_string()).collect(),
    }
}

/// Built-in categories, in match-priority order.
pub fn builtin_categories() -> Vec<CategoryConfig> {
    vec![
        category(
            "greetings",
            &[
                "hello",
                "hi",
                "hey",
                "greetings",
                "good morning",
                "good afternoon",
                "good evening",
            ],
            &[
                "Hello! Welcome to Parley. How can I help you today?",
                "Hi there! I'm here to answer questions about this project.",
                "Greetings! What would you like to know?",
            ],
        ),
        category(
            "project_info",
            &["project", "what is", "about", "describe", "explain"],
            &[
                "Parley is a real-time messaging service that answers from a table of canned replies. It exposes a REST API and a WebSocket endpoint.",
                "This project implements a keyword-driven chat service with an HTTP gateway, optional history storage and a command-line shell.",
            ],
        ),
        category(
            "architecture",
            &[
                "architecture",
                "structure",
                "how it works",
                "design",
                "components",
            ],
            &[
                "The service has three layers: a response selector, an HTTP/WebSocket gateway and an optional SQLite history log. Messages flow from the client to the gateway, through the selector and back.",
                "Clients talk to the gateway over REST or WebSockets; the gateway asks the selector for a reply and optionally records the exchange.",
            ],
        ),
        category(
            "deployment",
            &["deploy", "cloud", "aws", "docker", "production"],
            &[
                "Parley ships as a single binary. Run `parley serve` behind any reverse proxy or inside a container.",
                "Deployment is a single process plus an optional SQLite file; configure it with parley.toml or PARLEY_* environment variables.",
            ],
        ),
        category(
            "thanks",
            &["thank", "thanks", "thank you", "appreciate", "grateful"],
            &[
                "You're welcome! Feel free to ask if you have any other questions.",
                "Happy to help! Is there anything else you'd like to know?",
                "My pleasure! Let me know if you need more information.",
            ],
        ),
        category(
            "goodbye",
            &["bye", "goodbye", "see you", "exit", "quit", "farewell"],
            &[
                "Goodbye! Thanks for chatting with me. Have a great day!",
                "See you later! Feel free to come back if you have more questions.",
                "Take care! Enjoy your day!",
            ],
        ),
    ]
}

/// Built-in fallback replies.
pub fn default_responses() -> Vec<String> {
    [
        "That's an interesting question! Could you provide more details?",
        "I'm not sure I understood that correctly. Could you rephrase?",
        "Thank you for your message. Is there something specific about the project you'd like to know?",
        "I'm still learning! Can you give me more context about your question?",
        "That's a great question. To better assist you, could you be more specific?",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
