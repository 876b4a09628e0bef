use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One activity as served by `GET /activities`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub schedule: String,
    #[serde(default)]
    pub max_participants: u32,
    // Anything other than an array is treated as an empty roster.
    #[serde(default, deserialize_with = "participants_or_empty")]
    pub participants: Vec<Participant>,
}

impl Activity {
    /// Remaining capacity. Signed so that an over-full roster shows up as negative
    /// instead of wrapping.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// A roster entry. Older payloads carry a bare email string, newer ones a record
/// with an optional name and email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Participant {
    Contact(String),
    Record {
        name: Option<String>,
        email: Option<String>,
        raw: Value,
    },
    Other(Value),
}

impl Participant {
    /// Text shown for the participant: name, then email, then the raw JSON.
    pub fn label(&self) -> String {
        match self {
            Participant::Contact(contact) => contact.clone(),
            Participant::Record { name, email, raw } => name
                .as_deref()
                .filter(|s| !s.is_empty())
                .or_else(|| email.as_deref().filter(|s| !s.is_empty()))
                .map(str::to_string)
                .unwrap_or_else(|| raw.to_string()),
            Participant::Other(value) => value.to_string(),
        }
    }

    /// Identifier used when asking the server to remove this participant.
    pub fn contact(&self) -> String {
        match self {
            Participant::Contact(contact) => contact.clone(),
            Participant::Record { email: Some(email), .. } if !email.is_empty() => email.clone(),
            _ => self.label(),
        }
    }
}

impl From<Value> for Participant {
    fn from(value: Value) -> Self {
        match value {
            Value::String(contact) => Participant::Contact(contact),
            Value::Object(ref map) => {
                let field = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
                Participant::Record {
                    name: field("name"),
                    email: field("email"),
                    raw: value.clone(),
                }
            }
            other => Participant::Other(other),
        }
    }
}

impl From<Participant> for Value {
    fn from(participant: Participant) -> Self {
        match participant {
            Participant::Contact(contact) => Value::String(contact),
            Participant::Record { raw, .. } => raw,
            Participant::Other(value) => value,
        }
    }
}

impl From<&str> for Participant {
    fn from(contact: &str) -> Self {
        Participant::Contact(contact.to_string())
    }
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

fn participants_or_empty<'de, D>(deserializer: D) -> Result<Vec<Participant>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(Participant::from).collect(),
        _ => Vec::new(),
    })
}

/// Snapshot of every activity, in the order the server listed them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityCollection {
    entries: Vec<(String, Activity)>,
}

impl ActivityCollection {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Inserts or replaces an activity. A replaced activity keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, activity: Activity) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = activity,
            None => self.entries.push((name, activity)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, activity)| activity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(name, activity)| (name.as_str(), activity))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for ActivityCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = ActivityCollection;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping activity names to activities")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut collection = ActivityCollection::default();
                while let Some((name, activity)) = access.next_entry::<String, Activity>()? {
                    collection.insert(name, activity);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}
