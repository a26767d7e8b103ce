//! Self-contained printable HTML rendering of a persona.

use chrono::{DateTime, Datelike, Utc};
use std::time::Duration;

use super::format::{bar_width, format_date, group_thousands, html_escape};
use super::REPORT_TITLE;
use crate::models::{Insight, InsightSection, PersonaRecord};

const STYLE: &str = r#"
      * { margin: 0; padding: 0; box-sizing: border-box; }
      body { font-family: "Inter", "Helvetica Neue", Arial, sans-serif; line-height: 1.6; color: #1e293b; background: white; padding: 40px; max-width: 800px; margin: 0 auto; }
      .header { text-align: center; margin-bottom: 40px; padding-bottom: 20px; border-bottom: 2px solid #10b981; }
      .title { font-size: 28px; font-weight: 700; color: #10b981; margin-bottom: 8px; }
      .subtitle { font-size: 16px; color: #64748b; margin-bottom: 20px; }
      .profile-info { display: flex; align-items: center; gap: 20px; margin-bottom: 30px; }
      .profile-pic { width: 80px; height: 80px; border-radius: 50%; border: 3px solid #10b981; }
      .handle { font-size: 24px; font-weight: 600; }
      .muted { color: #64748b; }
      .section { margin-bottom: 30px; }
      .section-title { font-size: 20px; font-weight: 600; color: #10b981; margin-bottom: 15px; padding-bottom: 8px; border-bottom: 1px solid #e2e8f0; }
      .stats-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 20px; margin-bottom: 20px; }
      .stat-card { background: #f8fafc; padding: 20px; border-radius: 8px; border-left: 4px solid #10b981; }
      .stat-value { font-size: 24px; font-weight: 700; color: #10b981; }
      .stat-label { font-size: 14px; color: #64748b; }
      .trait-bar { display: flex; align-items: center; justify-content: space-between; margin-bottom: 15px; }
      .trait-name { font-weight: 500; flex: 1; }
      .trait-score { font-weight: 600; color: #10b981; margin-left: 10px; }
      .trait-progress { width: 100px; height: 8px; background: #e2e8f0; border-radius: 4px; overflow: hidden; margin-left: 20px; }
      .trait-fill { height: 100%; background: linear-gradient(90deg, #10b981, #065f46); }
      .list-item { background: #f8fafc; padding: 15px; margin-bottom: 10px; border-radius: 6px; border-left: 3px solid #10b981; }
      .source { display: block; font-size: 12px; color: #64748b; margin-top: 6px; word-break: break-all; }
      .keywords { display: flex; flex-wrap: wrap; gap: 8px; }
      .keyword { background: #10b981; color: white; padding: 6px 12px; border-radius: 20px; font-size: 12px; font-weight: 500; }
      .footer { margin-top: 40px; text-align: center; font-size: 12px; color: #64748b; border-top: 1px solid #e2e8f0; padding-top: 20px; }
      @media print {
        body { padding: 20px; }
        .header { margin-bottom: 20px; }
        .section { margin-bottom: 20px; break-inside: avoid; }
      }
"#;

/// Builds the printable document. The embedded script opens the print dialog
/// `print_delay` after the page has loaded.
pub fn render(
    persona: &PersonaRecord,
    rendered_at: DateTime<Utc>,
    print_delay: Duration,
) -> String {
    let profile = &persona.profile;
    let handle = html_escape(&profile.username);

    let picture = profile
        .profile_picture
        .as_deref()
        .filter(|src| !src.is_empty())
        .map(|src| {
            format!(
                r#"<img src="{}" alt="Profile" class="profile-pic" />"#,
                html_escape(src)
            )
        })
        .unwrap_or_default();
    let identity_lines = [
        profile
            .name
            .as_deref()
            .map(|name| format!(r#"<p class="muted">{}</p>"#, html_escape(name))),
        profile.occupation.as_deref().map(|occupation| {
            format!(
                r#"<p class="muted" style="font-size: 14px;">{}</p>"#,
                html_escape(occupation)
            )
        }),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<String>>()
    .join("\n");

    let joined = profile
        .joined_at()
        .map(|at| at.year().to_string())
        .unwrap_or_else(|| "Unknown".into());
    let stats = [
        (group_thousands(profile.comment_karma), "Comment Karma"),
        (group_thousands(profile.post_karma), "Post Karma"),
        (group_thousands(profile.total_karma()), "Total Karma"),
        (joined, "Joined Reddit"),
    ]
    .iter()
    .map(|(value, label)| {
        format!(
            r#"<div class="stat-card"><div class="stat-value">{value}</div><div class="stat-label">{label}</div></div>"#
        )
    })
    .collect::<Vec<String>>()
    .join("\n");

    let traits = persona
        .traits
        .axes()
        .iter()
        .map(|(label, score)| {
            format!(
                r#"<div class="trait-bar"><span class="trait-name">{label}</span><div class="trait-progress"><div class="trait-fill" style="width: {width}%"></div></div><span class="trait-score">{score}/10</span></div>"#,
                width = bar_width(*score),
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    let keywords = persona
        .keywords
        .iter()
        .map(|keyword| format!(r#"<span class="keyword">{}</span>"#, html_escape(keyword)))
        .collect::<Vec<String>>()
        .join("");

    let mut sections = vec![section(
        "Keywords",
        &format!(r#"<div class="keywords">{keywords}</div>"#),
    )];
    for insight_section in InsightSection::ALL {
        let items = persona
            .insights(insight_section)
            .iter()
            .map(render_insight)
            .collect::<Vec<String>>()
            .join("\n");
        sections.push(section(insight_section.title(), &items));
    }
    if let Some(personality_type) = &persona.personality_type {
        sections.push(section(
            "Personality Type",
            &format!(r#"<div class="list-item">{}</div>"#, html_escape(personality_type)),
        ));
    }
    if let Some(regulation) = &persona.emotional_regulation {
        sections.push(section(
            "Emotional Regulation",
            &format!(r#"<div class="list-item">{}</div>"#, html_escape(regulation)),
        ));
    }

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{handle} - {title}</title>
    <style>{style}    </style>
  </head>
  <body>
    <div class="header">
      <h1 class="title">{title}</h1>
      <p class="subtitle">Generated on {generated}</p>
      <div class="profile-info">
        {picture}
        <div>
          <h2 class="handle">@{handle}</h2>
          {identity_lines}
        </div>
      </div>
    </div>
    {account_section}
    {traits_section}
    {sections}
    <div class="footer">
      <p>Generated by Reddit Persona Profiler</p>
    </div>
    <script>
      window.addEventListener("load", function () {{
        setTimeout(function () {{ window.print(); }}, {delay_ms});
      }});
    </script>
  </body>
</html>
"#,
        title = REPORT_TITLE,
        style = STYLE,
        generated = format_date(rendered_at),
        account_section = section(
            "Account Statistics",
            &format!(r#"<div class="stats-grid">{stats}</div>"#)
        ),
        traits_section = section("Personality Traits", &traits),
        sections = sections.join("\n"),
        delay_ms = print_delay.as_millis(),
    )
}

fn section(title: &str, body: &str) -> String {
    format!(
        r#"<div class="section">
      <h3 class="section-title">{}</h3>
      {}
    </div>"#,
        html_escape(title),
        body
    )
}

fn render_insight(insight: &Insight) -> String {
    let source = insight
        .url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| {
            let url = html_escape(url);
            format!(r#"<a class="source" href="{url}">{url}</a>"#)
        })
        .unwrap_or_default();
    format!(
        r#"<div class="list-item">{}{}</div>"#,
        html_escape(insight.text_or_empty()),
        source
    )
}
