//! Fixed-layout plain-text persona report.

use chrono::{DateTime, Utc};

use super::format::{format_date, group_thousands, tri_state, yes_no};
use super::REPORT_TITLE;
use crate::models::{InsightSection, PersonaRecord};

pub fn render(persona: &PersonaRecord, rendered_at: DateTime<Utc>) -> String {
    let profile = &persona.profile;
    let mut lines: Vec<String> = vec![
        REPORT_TITLE.to_uppercase(),
        format!("Generated: {}", format_date(rendered_at)),
        format!("Username: @{}", profile.username),
    ];
    if let Some(name) = &profile.name {
        lines.push(format!("Name: {name}"));
    }

    heading(&mut lines, "PROFILE INFORMATION");
    lines.push(format!("Occupation: {}", or_unspecified(&profile.occupation)));
    lines.push(format!("Status: {}", or_unspecified(&profile.status)));
    lines.push(format!("Location: {}", or_unspecified(&profile.location)));
    lines.push(format!(
        "Account Created: {}",
        profile
            .joined_at()
            .map(format_date)
            .unwrap_or_else(|| "Unknown".into())
    ));

    heading(&mut lines, "KARMA STATISTICS");
    lines.push(format!("Comment Karma: {}", group_thousands(profile.comment_karma)));
    lines.push(format!("Post Karma: {}", group_thousands(profile.post_karma)));
    lines.push(format!("Total Karma: {}", group_thousands(profile.total_karma())));

    heading(&mut lines, "ACCOUNT STATUS");
    lines.push(format!("Moderator: {}", yes_no(profile.is_mod)));
    lines.push(format!("Gold Member: {}", yes_no(profile.is_gold)));
    lines.push(format!("Verified: {}", yes_no(profile.verified)));
    lines.push(format!("Verified Email: {}", yes_no(profile.has_verified_email)));
    lines.push(format!("Accepts Followers: {}", yes_no(profile.accept_followers)));
    lines.push(format!("Accepts Chats: {}", tri_state(profile.accept_chats)));
    lines.push(format!("Accepts Messages: {}", tri_state(profile.accept_pms)));

    heading(&mut lines, "PERSONALITY TRAITS");
    for (label, score) in persona.traits.axes() {
        lines.push(format!("{label}: {score}/10"));
    }

    for section in InsightSection::ALL {
        heading(&mut lines, &section.title().to_uppercase());
        for (idx, insight) in persona.insights(section).iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, insight.text_or_empty()));
        }
    }

    heading(&mut lines, "KEYWORDS");
    lines.push(persona.keywords.join(", "));

    if let Some(personality_type) = &persona.personality_type {
        heading(&mut lines, "PERSONALITY TYPE");
        lines.push(personality_type.clone());
    }
    if let Some(regulation) = &persona.emotional_regulation {
        heading(&mut lines, "EMOTIONAL REGULATION");
        lines.push(regulation.clone());
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push("=".repeat(title.chars().count()));
}

fn or_unspecified(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Not specified")
}
