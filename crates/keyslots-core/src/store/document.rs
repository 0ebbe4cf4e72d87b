// Keyslots Store Document
// In-memory form of the slot store file: verbatim header plus escaped slots

use std::collections::BTreeMap;

use super::escape::{self, SEPARATOR};
use super::slot::{SlotId, SlotRecord};

/// Prefix of every slot line.
pub const SLOT_PREFIX: &str = "SLOT";

/// Header written when the store file does not exist yet.
pub const DEFAULT_HEADER: &str = r##"# ========================================
# KEY CONFIGURATION
# ========================================
# Three formats are accepted:
#   1. SINGLE LETTER     : KEY_SAVE1=A      (simplest!)
#   2. HEXADECIMAL CODE  : KEY_SAVE1=0x41   (technical format)
#   3. DECIMAL CODE      : KEY_SAVE1=65     (alternative format)
#
# Examples of simple letters:
#   Letters : A, B, C, D ... Z
#   Digits  : 0, 1, 2 ... 9 (warning: not for SAVE/LOAD!)
#   Symbols : [ ] \ ; ' , . / - = `
#
# Concrete examples:
#   To use the A key : KEY_SAVE1=A
#   To use the [ key : KEY_SAVE1=[
#   To use the ; key : KEY_SAVE1=;
#
# Common VK codes (if hexadecimal format needed):
#   Letters A-Z : 0x41 to 0x5A
#   Digits 0-9  : 0x30 to 0x39
#   $ or ;      : 0xBA
#   ^ or '      : 0xDE
#   L or ]      : 0xDD
#   [ or {      : 0xDB
#
# Save key 1 (default: $ = 0xBA)
KEY_SAVE1=0xBA
#
# Save key 2 (default: L = 0xDD)
KEY_SAVE2=0xDD
#
# Load key (default: ^ = 0xDE)
KEY_LOAD=0xDE
#
# Characters displayed for slots 1-10 (keys with Shift)
# You can change them to match your keyboard
SLOT_CHARS=&,é,",',\(,-,è,_,ç,à
#
# ========================================
# CLIPBOARD SLOTS
# ========================================
#"##;

/// How a single store line is treated.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    /// Comment, blank or `KEY_`/`SLOT_CHARS` line; kept verbatim.
    Header,
    /// `SLOT<id>|<escaped>`
    Slot(SlotId, &'a str),
    /// Anything else; dropped on rewrite.
    Stray,
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty()
        || line.starts_with('#')
        || line.starts_with("KEY_")
        || line.starts_with("SLOT_CHARS")
    {
        return LineKind::Header;
    }
    if let Some(rest) = line.strip_prefix(SLOT_PREFIX) {
        if let Some((id, raw)) = rest.split_once(SEPARATOR) {
            return LineKind::Slot(SlotId::from(id), raw);
        }
    }
    LineKind::Stray
}

/// Parsed slot store.
///
/// Slot contents are held escaped, exactly as read, so a rewrite leaves
/// every slot it did not touch byte-identical. When an id appears on more
/// than one line the last one wins. Header lines keep their own line
/// ending; slot lines follow the ending of the first line of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreDocument {
    header: Vec<String>,
    slots: BTreeMap<SlotId, String>,
    crlf: bool,
}

impl StoreDocument {
    /// Parse store text. LF and CRLF line endings are both accepted.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::default();
        for (number, line) in text.split_terminator('\n').enumerate() {
            let trimmed = line.strip_suffix('\r').unwrap_or(line);
            if number == 0 {
                doc.crlf = trimmed.len() != line.len();
            }
            match classify(trimmed) {
                LineKind::Header => doc.header.push(line.to_string()),
                LineKind::Slot(id, raw) => {
                    if doc.slots.insert(id.clone(), raw.to_string()).is_some() {
                        log::debug!("Slot [{}] repeated at line {}; keeping the later one", id, number + 1);
                    }
                }
                LineKind::Stray => {
                    log::warn!("Ignoring unrecognized store line {}: {:?}", number + 1, trimmed)
                }
            }
        }
        doc
    }

    /// A fresh store: default header and ten empty primary slots.
    pub fn with_default_header() -> Self {
        Self {
            header: DEFAULT_HEADER.lines().map(String::from).collect(),
            slots: SlotId::primaries().map(|id| (id, String::new())).collect(),
            crlf: false,
        }
    }

    /// Header lines in file order, exactly as read (a CRLF file keeps its
    /// `\r`)
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Header lines without line ending, for the configuration loader.
    pub fn header_lines(&self) -> impl Iterator<Item = &str> {
        self.header.iter().map(|line| line.strip_suffix('\r').unwrap_or(line))
    }

    pub fn contains(&self, id: &SlotId) -> bool {
        self.slots.contains_key(id)
    }

    /// Escaped content as stored
    pub fn raw(&self, id: &SlotId) -> Option<&str> {
        self.slots.get(id).map(String::as_str)
    }

    /// Decoded content
    pub fn content(&self, id: &SlotId) -> Option<String> {
        self.raw(id).map(escape::decode)
    }

    pub fn set(&mut self, id: SlotId, content: &str) {
        self.slots.insert(id, escape::encode(content));
    }

    pub fn remove(&mut self, id: &SlotId) -> Option<String> {
        self.slots.remove(id)
    }

    /// Drop every secondary slot, returning how many were removed.
    pub fn retain_primaries(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|id, _| id.is_primary());
        before - self.slots.len()
    }

    /// Primary slots (always all ten) followed by secondaries, decoded.
    pub fn records(&self) -> Vec<SlotRecord> {
        let primaries = SlotId::primaries().map(|id| {
            let content = self.content(&id).unwrap_or_default();
            SlotRecord::new(id, content)
        });
        let secondaries = self
            .slots
            .iter()
            .filter(|(id, _)| !id.is_primary())
            .map(|(id, raw)| SlotRecord::new(id.clone(), escape::decode(raw)));
        primaries.chain(secondaries).collect()
    }

    /// Serialize: header, `SLOT1`..`SLOT10` (empty if absent), then
    /// secondaries in store order. Header lines are written back as read.
    pub fn render(&self) -> String {
        let eol = if self.crlf { "\r\n" } else { "\n" };
        let mut out = String::new();
        for line in &self.header {
            out.push_str(line);
            out.push('\n');
        }
        for id in SlotId::primaries() {
            let raw = self.raw(&id).unwrap_or("");
            push_slot_line(&mut out, &id, raw, eol);
        }
        for (id, raw) in self.slots.iter().filter(|(id, _)| !id.is_primary()) {
            push_slot_line(&mut out, id, raw, eol);
        }
        out
    }
}

fn push_slot_line(out: &mut String, id: &SlotId, raw: &str, eol: &str) {
    out.push_str(SLOT_PREFIX);
    out.push_str(id.as_str());
    out.push(SEPARATOR);
    out.push_str(raw);
    out.push_str(eol);
}
