//! Adaptive Card rendering for Microsoft Teams incoming webhooks.

use serde_json::{Value, json};

use crate::{ButtonSection, FactSection, NotificationCard, Section, TextSection, TitleSection};

pub const ATTACHMENT_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";
pub const SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
pub const VERSION: &str = "1.4";

/// Full webhook payload: a message with the card as its only attachment.
pub fn render_message(card: &NotificationCard) -> Value {
    json!({
        "type": "message",
        "attachments": [{
            "contentType": ATTACHMENT_CONTENT_TYPE,
            "contentUrl": null,
            "content": render_card(card),
        }],
    })
}

pub fn render_card(card: &NotificationCard) -> Value {
    let mut body = Vec::with_capacity(card.sections.len() + 1);
    body.push(json!({
        "type": "TextBlock",
        "text": card.title,
        "size": "Large",
        "weight": "Bolder",
        "wrap": true,
    }));
    body.extend(card.sections.iter().map(render_section));
    json!({
        "$schema": SCHEMA,
        "type": "AdaptiveCard",
        "version": VERSION,
        "body": body,
        "msteams": { "width": "Full" },
    })
}

pub fn render_section(section: &Section) -> Value {
    match section {
        Section::Title(section) => render_title(section),
        Section::Facts(section) => render_facts(section),
        Section::Text(section) => render_text(section),
        Section::Button(section) => render_button(section),
    }
}

fn render_title(section: &TitleSection) -> Value {
    json!({
        "type": "ColumnSet",
        "columns": [
            {
                "type": "Column",
                "width": "auto",
                "items": [{
                    "type": "Image",
                    "url": section.activity_image,
                    "size": "Small",
                    "style": "Person",
                }],
            },
            {
                "type": "Column",
                "width": "stretch",
                "items": [
                    {
                        "type": "TextBlock",
                        "text": section.activity_title,
                        "weight": "Bolder",
                        "wrap": true,
                    },
                    {
                        "type": "TextBlock",
                        "text": section.activity_subtitle,
                        "isSubtle": true,
                        "spacing": "None",
                        "wrap": true,
                    },
                ],
            },
        ],
    })
}

fn render_facts(section: &FactSection) -> Value {
    let items = section
        .facts
        .iter()
        .map(|fact| {
            let mut value = json!({ "type": "TextBlock", "text": fact.value, "wrap": true });
            if let Some(color) = fact.color {
                value["color"] = json!(color.as_str());
            }
            json!({
                "type": "ColumnSet",
                "columns": [
                    {
                        "type": "Column",
                        "width": "auto",
                        "items": [{ "type": "TextBlock", "text": fact.label, "weight": "Bolder" }],
                    },
                    { "type": "Column", "width": "stretch", "items": [value] },
                ],
            })
        })
        .collect::<Vec<_>>();
    json!({ "type": "Container", "items": items })
}

fn render_text(section: &TextSection) -> Value {
    json!({
        "type": "Container",
        "separator": true,
        "items": [
            { "type": "TextBlock", "text": section.title, "weight": "Bolder" },
            { "type": "TextBlock", "text": section.text, "wrap": true },
        ],
    })
}

fn render_button(section: &ButtonSection) -> Value {
    json!({
        "type": "ActionSet",
        "actions": [{ "type": "Action.OpenUrl", "title": section.label, "url": section.url }],
    })
}
