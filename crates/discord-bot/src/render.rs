//! Text shown in Discord replies. Kept free of serenity types so it can be
//! tested without a gateway.

use chrono::{DateTime, Utc};
use datepoll_core::errors::ScheduleError;
use datepoll_core::models::{Schedule, ScheduleSummary, Vote, VoteStatus, VoteTally};
use datepoll_core::validation::DATE_INPUT_FORMAT;

/// Discord rejects embeds with more fields than this.
pub const MAX_EMBED_FIELDS: usize = 25;
pub const MAX_FIELD_NAME_LEN: usize = 256;
pub const MAX_FIELD_VALUE_LEN: usize = 1024;
/// Discord's cap on the characters of a whole embed: title, fields and footer.
pub const MAX_EMBED_TOTAL_LEN: usize = 6000;
const DESCRIPTION_PREVIEW_LEN: usize = 200;

pub const GENERIC_ERROR_MESSAGE: &str =
    "Something went wrong while handling that command. Please try again later.";

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_INPUT_FORMAT).to_string()
}

/// `⭕ 2  🔺 1  ❌ 0`
pub fn format_tally(tally: &VoteTally) -> String {
    VoteStatus::ALL
        .iter()
        .map(|status| format!("{} {}", status, tally.get(*status)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

pub fn mention(user_id: u64) -> String {
    format!("<@{}>", user_id)
}

/// One embed field per schedule in the /schedule list reply.
pub fn summary_field(summary: &ScheduleSummary) -> (String, String) {
    let name = truncate(&format!("📅 {}", summary.title), MAX_FIELD_NAME_LEN);

    let mut value = String::new();
    if let Some(description) = &summary.description {
        value.push_str(&format!(
            "**Description**: {}\n",
            truncate(description, DESCRIPTION_PREVIEW_LEN)
        ));
    }
    value.push_str(&format!("**Created by**: {}\n", mention(summary.creator_id)));
    value.push_str(&format!("**ID**: `{}`\n\n**Candidate dates**:\n", summary.id));
    for entry in &summary.dates {
        value.push_str(&format!(
            "・{} ({})\n",
            format_date(entry.date),
            format_tally(&entry.tally)
        ));
    }

    (name, truncate(value.trim_end(), MAX_FIELD_VALUE_LEN))
}

pub const LIST_TITLE: &str = "Active schedules";

pub fn hidden_footer(hidden: usize) -> String {
    format!("{} more not shown", hidden)
}

/// Fields for the list reply and the number of schedules left out.
///
/// Stops at the field count limit or once the next field would push the
/// embed, with its title and footer, past [`MAX_EMBED_TOTAL_LEN`].
pub fn summary_fields(summaries: &[ScheduleSummary]) -> (Vec<(String, String)>, usize) {
    // The footer can only get shorter than this, since at most every
    // schedule is hidden.
    let mut used = LIST_TITLE.chars().count() + hidden_footer(summaries.len()).chars().count();

    let mut fields = Vec::new();
    for summary in summaries.iter().take(MAX_EMBED_FIELDS) {
        let (name, value) = summary_field(summary);
        let size = name.chars().count() + value.chars().count();
        if used + size > MAX_EMBED_TOTAL_LEN {
            break;
        }
        used += size;
        fields.push((name, value));
    }

    let hidden = summaries.len() - fields.len();
    (fields, hidden)
}

pub fn candidate_list(schedule: &Schedule) -> String {
    schedule
        .dates
        .iter()
        .map(|candidate| format!("・{}", format_date(candidate.date)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn created_description(schedule: &Schedule) -> String {
    let mut text = format!("**{}**\n", schedule.title);
    if let Some(description) = &schedule.description {
        text.push_str(&format!("{}\n", truncate(description, DESCRIPTION_PREVIEW_LEN)));
    }
    text.push_str(&format!(
        "\nCandidate dates (UTC):\n{}\n\nVote with `/schedule vote id:{} date:<date> answer:<answer>`",
        candidate_list(schedule),
        schedule.id
    ));
    text
}

pub fn vote_recorded(vote: &Vote) -> String {
    format!(
        "Your answer for {} is now {} ({}).",
        format_date(vote.date),
        vote.vote_status,
        vote.vote_status.label()
    )
}

pub fn confirmed_description(schedule: &Schedule) -> String {
    match schedule.confirmed_date {
        Some(date) => format!("**{}** will take place on {} (UTC).", schedule.title, format_date(date)),
        None => format!("**{}** has been confirmed.", schedule.title),
    }
}

pub fn cancelled_description(schedule: &Schedule) -> String {
    format!("**{}** has been cancelled.", schedule.title)
}

/// Message shown to the user for a failed interaction. Domain rejections are
/// shown as-is, anything else is hidden behind a generic message.
pub fn user_message(err: &eyre::Report) -> String {
    match err.downcast_ref::<ScheduleError>() {
        Some(e) if e.is_user_facing() => e.to_string(),
        _ => GENERIC_ERROR_MESSAGE.to_string(),
    }
}
