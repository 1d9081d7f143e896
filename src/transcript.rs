//! Plain-text transcript export

use crate::message::Message;
use chrono::{DateTime, NaiveDate, Utc};

/// Render history as `[time] Role: content` blocks separated by blank lines
pub fn render(messages: &[Message]) -> String {
    messages
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_message(message: &Message) -> String {
    let mut line = format!(
        "[{}] {}: {}",
        format_time(message.timestamp),
        message.role.display_name(),
        message.content
    );
    if let Some(sources) = message.citations() {
        line.push_str("\nSources: ");
        line.push_str(&sources.join(", "));
    }
    line
}

/// 12-hour clock with seconds, e.g. `03:04:05 PM`
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%I:%M:%S %p").to_string()
}

/// Suggested download name for a transcript exported on `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("financebot-history-{}.txt", date.format("%Y-%m-%d"))
}

/// Group chronological history into per-day runs, in order
pub fn group_by_day(messages: &[Message]) -> Vec<(NaiveDate, Vec<&Message>)> {
    let mut groups: Vec<(NaiveDate, Vec<&Message>)> = Vec::new();
    for message in messages {
        let day = message.timestamp.date_naive();
        match groups.iter_mut().find(|(d, _)| *d == day) {
            Some((_, group)) => group.push(message),
            None => groups.push((day, vec![message])),
        }
    }
    groups
}
