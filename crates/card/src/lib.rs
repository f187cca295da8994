pub mod adaptive;
pub mod builder;
pub mod release_notes;
pub mod webhook;

use gitflow_notifier_core::CardColor;
use serde::Serialize;

pub use crate::{builder::CardBuilder, webhook::TeamsWebhook};

/// A notification ready to be rendered. Sections render in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationCard {
    pub title: String,
    pub sections: Vec<Section>,
}

impl NotificationCard {
    pub fn title_section(&self) -> Option<&TitleSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Title(section) => Some(section),
            _ => None,
        })
    }

    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.sections.iter().flat_map(|s| match s {
            Section::Facts(section) => section.facts.as_slice(),
            _ => &[],
        })
    }

    pub fn text_section(&self) -> Option<&TextSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Text(section) => Some(section),
            _ => None,
        })
    }

    pub fn button_section(&self) -> Option<&ButtonSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Button(section) => Some(section),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "section")]
pub enum Section {
    #[serde(rename = "TitleSection")]
    Title(TitleSection),
    #[serde(rename = "FactSection")]
    Facts(FactSection),
    #[serde(rename = "TextSection")]
    Text(TextSection),
    #[serde(rename = "ButtonSection")]
    Button(ButtonSection),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSection {
    pub activity_title: String,
    pub activity_subtitle: String,
    pub activity_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactSection {
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<CardColor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSection {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonSection {
    pub label: String,
    pub url: String,
}
