use std::fmt::Write;

use crate::formatter::initials_for;
use crate::model::{Activity, ActivityCollection};
use crate::page::memory::MessageState;
use crate::render::NO_PARTICIPANTS_NOTICE;

/// Formats a participant with their avatar initials
pub fn format_participant_name(label: &str) -> String {
    let initials = initials_for(label);
    if initials.is_empty() {
        label.to_string()
    } else {
        format!("[{}] {}", initials, label)
    }
}

/// Plain-text version of one activity card
pub fn format_activity(name: &str, activity: &Activity) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", name);
    let _ = writeln!(out, "  {}", activity.description);
    let _ = writeln!(out, "  Schedule: {}", activity.schedule);
    let _ = writeln!(out, "  Availability: {} spots left", activity.spots_left());
    let _ = writeln!(out, "  Participants:");

    if activity.participants.is_empty() {
        let _ = writeln!(out, "    {}", NO_PARTICIPANTS_NOTICE);
    }
    for participant in &activity.participants {
        let _ = writeln!(out, "    - {}", format_participant_name(&participant.label()));
    }
    out
}

/// Plain-text version of the whole roster
pub fn format_roster(collection: &ActivityCollection) -> String {
    let mut out = format!("=== Activities ({}) ===\n", collection.len());
    for (name, activity) in collection.iter() {
        out.push('\n');
        out.push_str(&format_activity(name, activity));
    }
    out
}

/// The feedback line, or `None` while it is hidden
pub fn format_message(message: &MessageState) -> Option<String> {
    if message.hidden {
        return None;
    }
    let kind = message.kind.map(|k| k.class_name()).unwrap_or("info");
    Some(format!("[{}] {}", kind, message.text))
}

/// Prints the roster followed by any visible feedback
pub fn print_page(collection: &ActivityCollection, message: &MessageState) {
    if let Some(line) = format_message(message) {
        println!("{}\n", line);
    }
    print!("{}", format_roster(collection));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::FeedbackKind;

    #[test]
    fn participant_names_carry_initials() {
        assert_eq!(format_participant_name("Ada Lovelace"), "[AL] Ada Lovelace");
        assert_eq!(format_participant_name("mia@mergington.edu"), "[MI] mia@mergington.edu");
        assert_eq!(format_participant_name(""), "");
    }

    #[test]
    fn roster_lists_activities_in_order() {
        let collection = ActivityCollection::from_json(
            r#"{
                "Chess Club": {"description": "d", "schedule": "s", "max_participants": 2, "participants": ["a@x.com"]},
                "Art Club": {"description": "d2", "schedule": "s2", "max_participants": 4, "participants": []}
            }"#,
        )
        .unwrap();
        let text = format_roster(&collection);
        assert!(text.starts_with("=== Activities (2) ===\n"));
        assert!(text.contains("  Availability: 1 spots left\n"));
        assert!(text.contains("    - [A] a@x.com\n"));
        assert!(text.contains(NO_PARTICIPANTS_NOTICE));
        assert!(text.find("Chess Club").unwrap() < text.find("Art Club").unwrap());
    }

    #[test]
    fn hidden_message_is_not_shown() {
        let mut message = MessageState {
            text: "Signed up".to_string(),
            kind: Some(FeedbackKind::Success),
            hidden: true,
        };
        assert_eq!(format_message(&message), None);
        message.hidden = false;
        assert_eq!(format_message(&message).as_deref(), Some("[success] Signed up"));
    }
}
