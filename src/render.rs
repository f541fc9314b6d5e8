//! Plain-text rendering for terminal front ends.
//!
//! Nothing here interprets markup. Replies that contain HTML (the backend
//! sends its nutrition summary as a table) are flattened to text.

use regex::Regex;

use crate::history::History;
use crate::message::{Message, Origin};
use crate::settings::SettingsProjection;
use crate::ui_context::{Panel, UiEvent};

lazy_static::lazy_static! {
    static ref MARKUP: Regex = Regex::new(r"<[a-zA-Z/][^>]*>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>|</(tr|p|div|table|thead|tbody|tfoot|li)>").unwrap();
    static ref CELL_END: Regex = Regex::new(r"(?i)</t[dh]>").unwrap();
}

/// Flatten markup to readable text. Text without tags is returned unchanged.
pub fn plain_text(content: &str) -> String {
    if !MARKUP.is_match(content) {
        return content.to_string();
    }

    let collapsed = WHITESPACE.replace_all(content, " ");
    let lines = LINE_BREAK.replace_all(&collapsed, "\n");
    let cells = CELL_END.replace_all(&lines, " | ");
    let stripped = MARKUP.replace_all(&cells, "");

    html_escape::decode_html_entities(&stripped)
        .lines()
        .map(|line| {
            let line = WHITESPACE.replace_all(line, " ");
            line.trim().trim_end_matches('|').trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_message(message: &Message) -> String {
    let body = match message.origin {
        Origin::Assistant => plain_text(&message.text),
        Origin::User | Origin::Error => message.text.clone(),
    };
    let indent = " ".repeat(message.origin.label().len() + 2);
    let body = body.lines().collect::<Vec<_>>().join(&format!("\n{}", indent));
    format!("{}: {}", message.origin.label(), body)
}

pub fn render_settings(projection: &SettingsProjection) -> String {
    let mut out: Vec<String> = projection
        .fields()
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect();
    out.push(format!(
        "Classes: {}",
        projection.appearance.body_classes().join(" ")
    ));
    out.join("\n")
}

pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return "No meals logged yet.".to_string();
    }

    let mut out = Vec::new();
    for (day, summary) in history.iter() {
        out.push(format!(
            "{}: {} cals, {} g protein, {} g carbs, {} g fat",
            day, summary.calories, summary.protein, summary.carbs, summary.fat
        ));
        for item in &summary.items {
            out.push(format!(
                "  - {}: {} cals, {} g protein, {} g carbs, {} g fat",
                item.food, item.calories, item.protein, item.carbs, item.fat
            ));
        }
    }
    out.push(format!("Total: {} cals", history.total_calories()));
    out.join("\n")
}

pub fn render_event(event: &UiEvent) -> String {
    match event {
        UiEvent::MessageAppended { panel, message } => match panel {
            Panel::Chat => render_message(message),
            Panel::Settings => format!("[settings] {}", render_message(message)),
        },
        UiEvent::SettingsProjected(projection) => {
            format!("[settings updated]\n{}", render_settings(projection))
        }
    }
}
