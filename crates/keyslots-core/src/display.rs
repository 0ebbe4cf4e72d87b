// Keyslots Display
// Textual status output: recent actions and the slot listing

use crate::config::SlotLabels;
use crate::history::ActionHistory;
use crate::store::SlotRecord;

/// Preview length used in history entries.
pub const HISTORY_PREVIEW_CHARS: usize = 40;
/// Preview length used in the slot listing.
pub const LISTING_PREVIEW_CHARS: usize = 50;

const RULE: &str = "=========================================================";
const TITLE: &str = "                  ACTIVE SLOTS                           ";

/// Where status output goes.
pub trait DisplayLog {
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);

    /// Redraw everything. `slots` is `None` when the store could not be read.
    fn render(&mut self, history: &ActionHistory, slots: Option<&[SlotRecord]>, labels: &SlotLabels);
}

/// Single-line preview of slot content, at most `limit` characters.
///
/// Line breaks and tabs become spaces; longer text is cut to `limit - 3`
/// characters followed by `...`.
pub fn preview(content: &str, limit: usize) -> String {
    let flat = content.replace(&['\n', '\r', '\t'][..], " ");
    if flat.chars().count() <= limit {
        return flat;
    }
    let mut cut: String = flat.chars().take(limit.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

/// History block: newest entry first, then a blank line.
pub fn format_history(history: &ActionHistory) -> Vec<String> {
    let mut lines: Vec<String> = if history.is_empty() {
        vec!["[No recent actions]".to_string()]
    } else {
        history.iter().map(ToString::to_string).collect()
    };
    lines.push(String::new());
    lines
}

fn quoted_or_empty(content: &str) -> String {
    if content.is_empty() {
        "[EMPTY]".to_string()
    } else {
        format!("\"{}\"", preview(content, LISTING_PREVIEW_CHARS))
    }
}

/// Framed listing of every slot, primaries first.
pub fn format_slot_listing(slots: &[SlotRecord], labels: &SlotLabels) -> Vec<String> {
    let mut lines = vec![RULE.to_string(), TITLE.to_string(), RULE.to_string()];

    for record in slots.iter().filter(|r| r.is_primary) {
        let Some(number) = record.id.primary_number() else {
            continue;
        };
        lines.push(format!(
            "  Slot {} [key {}/{}] : {}",
            number,
            number % 10,
            labels.for_slot(number),
            quoted_or_empty(&record.content)
        ));
    }

    let mut secondaries = slots.iter().filter(|r| !r.is_primary).peekable();
    if secondaries.peek().is_some() {
        lines.push(String::new());
        lines.push("--- ADDITIONAL SLOTS ---".to_string());
        for record in secondaries {
            lines.push(format!("  Slot [{}] : {}", record.id, quoted_or_empty(&record.content)));
        }
    }

    lines.push(RULE.to_string());
    lines
}

/// Listing used when the store cannot be read.
pub fn format_store_unavailable() -> Vec<String> {
    vec!["ERROR: Unable to open the slot store".to_string()]
}

/// History block followed by the listing, as one text.
pub fn render_text(history: &ActionHistory, slots: Option<&[SlotRecord]>, labels: &SlotLabels) -> String {
    let listing = match slots {
        Some(slots) => format_slot_listing(slots, labels),
        None => format_store_unavailable(),
    };
    let mut out = String::new();
    for line in format_history(history).into_iter().chain(listing) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryEntry;
    use crate::store::SlotId;

    fn record(id: &str, content: &str) -> SlotRecord {
        SlotRecord::new(SlotId::from(id), content.to_string())
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("a\nb\tc\r", 40), "a b c ");
        assert_eq!(preview(&"x".repeat(40), 40), "x".repeat(40));
        assert_eq!(preview(&"x".repeat(41), 40), format!("{}...", "x".repeat(37)));
        let accents = "é".repeat(60);
        assert_eq!(preview(&accents, 50).chars().count(), 50);
    }

    #[test]
    fn test_format_history() {
        let mut history = ActionHistory::new();
        assert_eq!(format_history(&history), vec!["[No recent actions]".to_string(), String::new()]);

        history.push(HistoryEntry::ok("first"));
        history.push(HistoryEntry::error("second"));
        assert_eq!(
            format_history(&history),
            vec!["XX second".to_string(), "OK first".to_string(), String::new()]
        );
    }

    #[test]
    fn test_listing_rows() {
        let mut slots: Vec<SlotRecord> = SlotId::primaries().map(|id| SlotRecord::new(id, String::new())).collect();
        slots[0].content = "hello\nworld".to_string();
        slots[9].content = "ten".to_string();
        slots.push(record("42", "answer"));
        slots.push(record("abc", ""));

        let lines = format_slot_listing(&slots, &SlotLabels::default());
        assert_eq!(lines[0], RULE);
        assert_eq!(lines[1].trim(), "ACTIVE SLOTS");
        assert_eq!(lines[3], "  Slot 1 [key 1/&] : \"hello world\"");
        assert_eq!(lines[4], "  Slot 2 [key 2/é] : [EMPTY]");
        assert_eq!(lines[12], "  Slot 10 [key 0/à] : \"ten\"");
        assert_eq!(lines[13], "");
        assert_eq!(lines[14], "--- ADDITIONAL SLOTS ---");
        assert_eq!(lines[15], "  Slot [42] : \"answer\"");
        assert_eq!(lines[16], "  Slot [abc] : [EMPTY]");
        assert_eq!(lines.last().map(String::as_str), Some(RULE));
    }

    #[test]
    fn test_listing_without_secondaries() {
        let slots: Vec<SlotRecord> = SlotId::primaries().map(|id| SlotRecord::new(id, String::new())).collect();
        let lines = format_slot_listing(&slots, &SlotLabels::default());
        assert_eq!(lines.len(), 3 + 10 + 1);
        assert!(!lines.iter().any(|l| l.contains("ADDITIONAL")));
    }

    #[test]
    fn test_render_text_store_unavailable() {
        let text = render_text(&ActionHistory::new(), None, &SlotLabels::default());
        assert_eq!(text, "[No recent actions]\n\nERROR: Unable to open the slot store\n");
    }
}
