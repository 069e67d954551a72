//! Thread messages and their content parts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Author of a thread message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
pub enum MessageRole {
    #[serde(rename = "user")]
    #[strum(serialize = "user")]
    User,
    /// The agent; the service calls this role `assistant`.
    #[serde(rename = "assistant")]
    #[strum(serialize = "assistant")]
    Agent,
}

/// A message stored on a thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadMessage {
    pub id: String,
    #[serde(default)]
    pub thread_id: String,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<MessageContent>,
    #[serde(default, rename = "assistant_id", skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

impl ThreadMessage {
    /// Text parts of the message, in order.
    pub fn text_messages(&self) -> impl Iterator<Item = &MessageText> {
        self.content.iter().filter_map(|part| match part {
            MessageContent::Text { text } => Some(text),
            _ => None,
        })
    }

    /// The last text part, which is what a chat UI would show.
    pub fn last_text(&self) -> Option<&MessageText> {
        self.text_messages().last()
    }

    /// URL citations across all text parts.
    pub fn url_citation_annotations(&self) -> impl Iterator<Item = UrlCitationRef<'_>> {
        self.text_messages()
            .flat_map(|text| text.annotations.iter())
            .filter_map(|annotation| match annotation {
                MessageAnnotation::UrlCitation {
                    text, url_citation, ..
                } => Some(UrlCitationRef {
                    placeholder: text,
                    citation: url_citation,
                }),
                _ => None,
            })
    }

    /// All text parts joined by newlines.
    pub fn text(&self) -> String {
        self.text_messages()
            .map(|text| text.value.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All text parts with citation placeholders replaced by ` [see title] (url)`.
    ///
    /// Placeholders are collected across every text part of the message and
    /// applied to all of them; when a placeholder repeats, the last citation wins.
    pub fn render_with_citations(&self) -> String {
        let replacements = citation_replacements(self.url_citation_annotations());
        self.text_messages()
            .map(|text| apply_replacements(&text.value, &replacements))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One content part of a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: MessageText },
    ImageFile { image_file: ImageFile },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageFile {
    pub file_id: String,
}

/// Text body plus annotations pointing into it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageText {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<MessageAnnotation>,
}

impl MessageText {
    /// This part's text with its own URL citations rendered inline.
    pub fn render_with_citations(&self) -> String {
        let citations = self.annotations.iter().filter_map(|annotation| match annotation {
            MessageAnnotation::UrlCitation {
                text, url_citation, ..
            } => Some(UrlCitationRef {
                placeholder: text,
                citation: url_citation,
            }),
            _ => None,
        });
        apply_replacements(&self.value, &citation_replacements(citations))
    }
}

/// Placeholder to replacement pairs in first-seen order; later citations
/// overwrite earlier ones for the same placeholder.
fn citation_replacements<'a>(
    citations: impl Iterator<Item = UrlCitationRef<'a>>,
) -> Vec<(&'a str, String)> {
    let mut replacements: Vec<(&'a str, String)> = Vec::new();
    for UrlCitationRef {
        placeholder,
        citation,
    } in citations
    {
        if placeholder.is_empty() {
            continue;
        }
        let title = citation.title.as_deref().unwrap_or(&citation.url);
        let rendered = format!(" [see {title}] ({})", citation.url);
        match replacements.iter_mut().find(|(seen, _)| *seen == placeholder) {
            Some(entry) => entry.1 = rendered,
            None => replacements.push((placeholder, rendered)),
        }
    }
    replacements
}

fn apply_replacements(value: &str, replacements: &[(&str, String)]) -> String {
    replacements
        .iter()
        .fold(value.to_string(), |rendered, (placeholder, replacement)| {
            rendered.replace(placeholder, replacement)
        })
}

/// Annotation attached to a span of message text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageAnnotation {
    UrlCitation {
        /// Placeholder text inside the message value, e.g. `【3:0†source】`.
        text: String,
        url_citation: UrlCitation,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_index: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_index: Option<u32>,
    },
    FileCitation {
        text: String,
        file_citation: FileCitation,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrlCitation {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileCitation {
    pub file_id: String,
}

/// Borrowed view of a URL citation and the placeholder it replaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrlCitationRef<'a> {
    pub placeholder: &'a str,
    pub citation: &'a UrlCitation,
}

/// Body of `POST threads/{thread_id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateMessageRequest {
    pub role: MessageRole,
    pub content: String,
}

impl CreateMessageRequest {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Agent,
            content: content.into(),
        }
    }
}
