use crate::formatter::{escape_for_display, initials_for};
use crate::model::Activity;

pub const NO_PARTICIPANTS_NOTICE: &str = "No participants yet. Be the first to join!";

/// The (unescaped) activity and contact a roster entry's delete affordance acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalTarget {
    pub activity: String,
    pub contact: String,
}

/// Rendered markup for one activity plus the removal targets of its roster
/// entries, in roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCard {
    pub name: String,
    pub html: String,
    pub removals: Vec<RemovalTarget>,
}

impl ActivityCard {
    pub fn entry_count(&self) -> usize {
        self.removals.len()
    }
}

/// Renders one activity card. Every server-supplied value is escaped exactly once.
pub fn render_activity(name: &str, activity: &Activity) -> ActivityCard {
    let (participants_html, removals) = render_participants(name, activity);

    let html = format!(
        concat!(
            r#"<div class="activity-card">"#,
            "<h4>{name}</h4>",
            "<p>{description}</p>",
            "<p><strong>Schedule:</strong> {schedule}</p>",
            "<p><strong>Availability:</strong> {spots} spots left</p>",
            "{participants}",
            "</div>"
        ),
        name = escape_for_display(name),
        description = escape_for_display(&activity.description),
        schedule = escape_for_display(&activity.schedule),
        spots = activity.spots_left(),
        participants = participants_html,
    );

    ActivityCard {
        name: name.to_string(),
        html,
        removals,
    }
}

fn render_participants(name: &str, activity: &Activity) -> (String, Vec<RemovalTarget>) {
    let mut html = String::from(r#"<div class="participants-section">"#);
    html.push_str(r#"<span class="participants-label">Participants:</span>"#);

    let mut removals = Vec::with_capacity(activity.participants.len());
    if activity.participants.is_empty() {
        html.push_str(&format!(
            r#"<p class="info no-participants">{}</p>"#,
            NO_PARTICIPANTS_NOTICE
        ));
    } else {
        html.push_str(r#"<ul class="participants-list">"#);
        let activity_attr = escape_for_display(name);
        for participant in &activity.participants {
            let label = participant.label();
            let contact = participant.contact();
            html.push_str(&format!(
                concat!(
                    r#"<li class="participant-item" data-activity="{activity}" data-email="{email}">"#,
                    r#"<span class="participant-avatar">{initials}</span>"#,
                    r#"<span class="participant-name">{label}</span>"#,
                    r#"<span class="delete-icon" title="Remove participant">&#128465;</span>"#,
                    "</li>"
                ),
                activity = activity_attr,
                email = escape_for_display(&contact),
                initials = escape_for_display(&initials_for(&label)),
                label = escape_for_display(&label),
            ));
            removals.push(RemovalTarget {
                activity: name.to_string(),
                contact,
            });
        }
        html.push_str("</ul>");
    }

    html.push_str("</div>");
    (html, removals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Participant;
    use serde_json::json;

    fn activity(max: u32, participants: Vec<Participant>) -> Activity {
        Activity {
            description: "Learn strategies".to_string(),
            schedule: "Fridays, 3:30 PM".to_string(),
            max_participants: max,
            participants,
        }
    }

    #[test]
    fn empty_roster_shows_notice_and_no_entries() {
        let card = render_activity("Chess Club", &activity(5, vec![]));
        assert!(card.html.contains(NO_PARTICIPANTS_NOTICE));
        assert!(!card.html.contains("participant-item"));
        assert!(card.html.contains("5 spots left"));
        assert_eq!(card.entry_count(), 0);
    }

    #[test]
    fn sections_appear_in_order() {
        let card = render_activity("Chess Club", &activity(2, vec!["a@x.com".into()]));
        let position = |needle: &str| card.html.find(needle).unwrap();
        assert!(position("<h4>Chess Club</h4>") < position("Learn strategies"));
        assert!(position("Learn strategies") < position("Fridays, 3:30 PM"));
        assert!(position("Fridays, 3:30 PM") < position("1 spots left"));
        assert!(position("1 spots left") < position("participants-section"));
    }

    #[test]
    fn roster_entries_follow_server_order() {
        let card = render_activity(
            "Chess Club",
            &activity(
                5,
                vec!["zed@x.com".into(), "amy@x.com".into(), "mo@x.com".into()],
            ),
        );
        assert_eq!(card.html.matches(r#"class="participant-item""#).count(), 3);
        let contacts: Vec<&str> = card.removals.iter().map(|r| r.contact.as_str()).collect();
        assert_eq!(contacts, vec!["zed@x.com", "amy@x.com", "mo@x.com"]);
        assert!(card.html.find("zed@x.com").unwrap() < card.html.find("amy@x.com").unwrap());
        assert!(card.html.find("amy@x.com").unwrap() < card.html.find("mo@x.com").unwrap());
    }

    #[test]
    fn entries_carry_initials_and_data_attributes() {
        let card = render_activity(
            "Chess Club",
            &activity(
                5,
                vec![Participant::from(json!({"name": "Ada Lovelace", "email": "ada@x.com"}))],
            ),
        );
        assert!(card.html.contains(r#"data-activity="Chess Club""#));
        assert!(card.html.contains(r#"data-email="ada@x.com""#));
        assert!(card.html.contains(r#"<span class="participant-avatar">AL</span>"#));
        assert!(card.html.contains(r#"<span class="participant-name">Ada Lovelace</span>"#));
        assert!(card.html.contains(r#"title="Remove participant""#));
        assert_eq!(
            card.removals,
            vec![RemovalTarget {
                activity: "Chess Club".to_string(),
                contact: "ada@x.com".to_string(),
            }]
        );
    }

    #[test]
    fn untrusted_text_is_escaped_exactly_once() {
        let hostile = Activity {
            description: "<b>bold</b> & more".to_string(),
            schedule: "\"quoted\" 'single'".to_string(),
            max_participants: 3,
            participants: vec!["<img src=x>@x.com".into()],
        };
        let card = render_activity("R&D <Club>", &hostile);

        assert!(card.html.contains("<h4>R&amp;D &lt;Club&gt;</h4>"));
        assert!(card.html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
        assert!(card.html.contains("&quot;quoted&quot; &#039;single&#039;"));
        assert!(card.html.contains(r#"data-activity="R&amp;D &lt;Club&gt;""#));
        assert!(card.html.contains(r#"data-email="&lt;img src=x&gt;@x.com""#));
        assert!(!card.html.contains("<img"));
        assert!(!card.html.contains("<b>"));
        assert!(!card.html.contains("&amp;amp;"));
        assert!(!card.html.contains("&amp;lt;"));

        // Handler targets stay raw; escaping is a display concern.
        assert_eq!(card.removals[0].activity, "R&D <Club>");
        assert_eq!(card.removals[0].contact, "<img src=x>@x.com");
    }
}
