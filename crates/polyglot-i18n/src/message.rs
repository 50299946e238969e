//! Message file model.
//!
//! Message files map a message ID to either a plain Fluent pattern or a
//! set of plural forms. Both shapes are turned into Fluent source so that
//! placeables (`{ $name }`) and CLDR plural selection are handled by the
//! Fluent runtime rather than here.
//!
//! Nested maps that are not plural forms group messages; their IDs are
//! joined with `.` (`errors.notFound` below). IDs that are not valid Fluent
//! identifiers are given one through [`MessageIds`].
//!
//! ```yaml
//! welcome: hello
//! welcomeWithName: "hello { $name }"
//! unreadEmails:
//!   description: Number of unread emails
//!   one: "{ $count } unread email"
//!   other: "{ $count } unread emails"
//! errors:
//!   notFound: not found
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;

/// Parsed contents of one message file, keyed by message ID
pub type MessageFile = BTreeMap<String, MessageSource>;

/// Separator between the keys of nested message groups
pub const ID_SEPARATOR: char = '.';

/// One message as written in a message file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageSource {
    /// A single pattern
    Text(String),
    /// Plural forms selected by the `count` argument
    Plural(PluralMessage),
    /// A group of messages whose IDs are prefixed with the group key
    Nested(MessageFile),
}

/// Plural forms of a message, named after the CLDR plural categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluralMessage {
    /// Note for translators, emitted as a Fluent comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub few: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub many: Option<String>,
    /// Fallback form, required by every language
    pub other: String,
}

impl PluralMessage {
    /// Forms other than `other`, in CLDR order
    fn categories(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("zero", &self.zero),
            ("one", &self.one),
            ("two", &self.two),
            ("few", &self.few),
            ("many", &self.many),
        ]
        .into_iter()
        .filter_map(|(category, form)| form.as_deref().map(|form| (category, form)))
    }
}

/// A single message after nested groups have been flattened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBody<'a> {
    Text(&'a str),
    Plural(&'a PluralMessage),
}

/// Flatten nested groups into `(dotted id, message)` pairs, sorted by ID
pub fn flatten_messages(messages: &MessageFile) -> Vec<(String, MessageBody<'_>)> {
    let mut flat = Vec::new();
    collect_messages(messages, None, &mut flat);
    flat.sort_by(|(a, _), (b, _)| a.cmp(b));
    flat
}

fn collect_messages<'a>(
    messages: &'a MessageFile,
    prefix: Option<&str>,
    out: &mut Vec<(String, MessageBody<'a>)>,
) {
    for (key, message) in messages {
        let id = match prefix {
            Some(prefix) => format!("{prefix}{ID_SEPARATOR}{key}"),
            None => key.clone(),
        };
        match message {
            MessageSource::Text(pattern) => out.push((id, MessageBody::Text(pattern))),
            MessageSource::Plural(plural) => out.push((id, MessageBody::Plural(plural))),
            MessageSource::Nested(group) => collect_messages(group, Some(&id), out),
        }
    }
}

/// Whether `id` is a valid Fluent message identifier
pub fn is_valid_message_id(id: &str) -> bool {
    let mut chars = id.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Closest Fluent identifier to `id`: invalid characters become `_` and a
/// leading non-letter gets an `m_` prefix.
pub fn fluent_identifier(id: &str) -> String {
    if is_valid_message_id(id) {
        return id.to_string();
    }

    let sanitized: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.starts_with(|c: char| c.is_ascii_alphabetic()) {
        sanitized
    } else {
        format!("m_{sanitized}")
    }
}

/// Table from message IDs, as written in message files, to the Fluent
/// identifiers they are stored under.
///
/// An ID keeps its Fluent identifier once assigned, so later files override
/// the same Fluent message.
#[derive(Debug, Clone, Default)]
pub struct MessageIds {
    fluent_ids: HashMap<String, String>,
    taken: HashSet<String>,
}

impl MessageIds {
    /// Fluent identifier of a known message ID
    pub fn get(&self, id: &str) -> Option<&str> {
        self.fluent_ids.get(id).map(String::as_str)
    }

    /// Fluent identifier for `id`, assigning a fresh one on first use
    pub fn assign(&mut self, id: &str) -> String {
        if let Some(existing) = self.fluent_ids.get(id) {
            return existing.clone();
        }

        let base = fluent_identifier(id);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }

        self.taken.insert(candidate.clone());
        self.fluent_ids.insert(id.to_string(), candidate.clone());
        candidate
    }

    pub fn len(&self) -> usize {
        self.fluent_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fluent_ids.is_empty()
    }
}

/// Render messages as Fluent source text.
///
/// Each entry pairs a Fluent identifier with its message body.
pub fn to_fluent_source(messages: &[(String, MessageBody<'_>)]) -> String {
    let mut source = String::new();

    for (id, message) in messages {
        match message {
            MessageBody::Text(pattern) => {
                let _ = write!(source, "{id} = ");
                write_pattern(&mut source, pattern, "    ");
                source.push('\n');
            }
            MessageBody::Plural(plural) => {
                if let Some(description) = &plural.description {
                    for line in description.lines() {
                        let _ = writeln!(source, "# {line}");
                    }
                }
                let _ = writeln!(source, "{id} =\n    {{ $count ->");
                for (category, form) in plural.categories() {
                    let _ = write!(source, "        [{category}] ");
                    write_pattern(&mut source, form, "            ");
                    source.push('\n');
                }
                source.push_str("       *[other] ");
                write_pattern(&mut source, &plural.other, "            ");
                source.push_str("\n    }\n");
            }
        }
    }

    source
}

/// Append `pattern`, indenting continuation lines with `indent`
fn write_pattern(out: &mut String, pattern: &str, indent: &str) {
    if pattern.trim().is_empty() {
        out.push_str("{ \"\" }");
        return;
    }

    for (index, line) in pattern.lines().enumerate() {
        if index > 0 {
            out.push('\n');
            if line.trim().is_empty() {
                continue;
            }
            out.push_str(indent);
            let content = line.trim_start();
            // Continuation lines may not start with these characters in Fluent.
            if let Some(rest) = content.strip_prefix(['[', '*', '.']) {
                let leading = &line[..line.len() - content.len()];
                let special = &content[..1];
                let _ = write!(out, "{leading}{{ \"{special}\" }}{rest}");
                continue;
            }
        }
        out.push_str(line);
    }
}
