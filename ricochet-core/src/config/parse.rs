//! Minimal TOML reader for the embedded pager configuration
//!
//! Handles only the subset `pager.toml` uses. The full file is checked
//! with a real TOML parser at build time, so this one only has to be
//! strict about the values it understands.
//!
//! Supported:
//! - `[section]` and `[section.name]` headers
//! - `key = value` with integer, float, boolean, string and inline-array values
//! - `#` comments, whole-line or trailing
//!
//! Sections:
//! - `[radio]`, `[receive]`, `[battery]`, `[alert]`
//! - `[tones]` names tone frequencies usable in ringtone note lists
//! - `[ringtone.N]` with `notes = [...]`; indices must appear in order from 0
//! - `[recipient.LABEL]` with `address` and `ringtone`
//!
//! Any `[ringtone.N]` section replaces the factory ringtones, and any
//! `[recipient.*]` section replaces the factory directory. Unknown keys
//! are ignored.

use heapless::{String, Vec};

use super::directory::{RecipientEntry, MAX_LABEL_LEN, MAX_RECIPIENTS};
use super::ringtone::{Ringtone, A_TONE_HZ, B_TONE_HZ, C_TONE_HZ, MAX_RINGTONES, NOTE_COUNT};
use super::types::{ConfigError, PagerConfig};

/// Maximum named tones in `[tones]`
const MAX_TONE_NAMES: usize = 8;

/// Maximum tone name length
const MAX_TONE_NAME_LEN: usize = 8;

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// A ringtone note names a tone not declared in `[tones]`
    UnknownTone,
    /// A ringtone does not have exactly `NOTE_COUNT` notes
    WrongNoteCount,
    /// `[ringtone.N]` sections are not numbered 0, 1, 2, ...
    RingtoneOutOfOrder,
    /// A recipient section has no `address`
    MissingAddress,
    /// Too many named tones
    TooManyTones,
    /// The parsed tables do not fit together
    Config(ConfigError),
}

/// Parse error with the 1-based line it was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
enum Section {
    Root,
    Radio,
    Receive,
    Battery,
    Alert,
    Tones,
    Ringtone,
    Recipient,
}

/// A ringtone note as written
///
/// Names are resolved in `finish`, once every `[tones]` entry has been
/// read, since TOML does not order sections.
#[derive(Debug, Clone)]
enum Note {
    Hz(u16),
    Named(String<MAX_TONE_NAME_LEN>),
}

/// Ringtone collected from its section
struct PendingRingtone {
    line: usize,
    notes: Vec<Note, NOTE_COUNT>,
}

/// Recipient being collected from its section
struct PendingRecipient {
    line: usize,
    label: String<MAX_LABEL_LEN>,
    address: Option<u32>,
    ringtone: u8,
}

struct Parser {
    config: PagerConfig,
    section: Section,
    tones: Vec<(String<MAX_TONE_NAME_LEN>, u16), MAX_TONE_NAMES>,
    ringtones: Vec<PendingRingtone, MAX_RINGTONES>,
    ringtones_seen: bool,
    recipients: Vec<RecipientEntry, MAX_RECIPIENTS>,
    recipients_seen: bool,
    pending: Option<PendingRecipient>,
}

/// Parse `pager.toml` into a validated [`PagerConfig`]
///
/// Values not present in the input keep their defaults.
pub fn parse_config(input: &str) -> Result<PagerConfig, ParseError> {
    let mut parser = Parser::new();
    let mut last_line = 0;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        last_line = line_no;
        parser.line(line_no, raw)?;
    }

    parser.finish(last_line)
}

impl Parser {
    fn new() -> Self {
        let mut tones = Vec::new();
        for (name, hz) in [("A", A_TONE_HZ), ("B", B_TONE_HZ), ("C", C_TONE_HZ)] {
            if let Ok(name) = String::try_from(name) {
                let _ = tones.push((name, hz));
            }
        }
        Self {
            config: PagerConfig::default(),
            section: Section::Root,
            tones,
            ringtones: Vec::new(),
            ringtones_seen: false,
            recipients: Vec::new(),
            recipients_seen: false,
            pending: None,
        }
    }

    fn line(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        let at = |kind| ParseError {
            line: line_no,
            kind,
        };
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            return Ok(());
        }

        if line.starts_with('[') && line.ends_with(']') {
            self.close_section()?;
            return self
                .open_section(line_no, line[1..line.len() - 1].trim())
                .map_err(at);
        }

        let (key, value) = parse_key_value(line).ok_or(at(ParseErrorKind::InvalidLine))?;
        self.apply(line_no, key, value).map_err(at)
    }

    fn open_section(&mut self, line_no: usize, header: &str) -> Result<(), ParseErrorKind> {
        let (kind, name) = match header.split_once('.') {
            Some((kind, name)) => (kind.trim(), Some(name.trim())),
            None => (header, None),
        };

        self.section = match (kind, name) {
            ("radio", None) => Section::Radio,
            ("receive", None) => Section::Receive,
            ("battery", None) => Section::Battery,
            ("alert", None) => Section::Alert,
            ("tones", None) => Section::Tones,
            ("ringtone", Some(index)) => {
                let index: usize = parse_int(index)?;
                self.ringtones_seen = true;
                if index != self.ringtones.len() {
                    return Err(ParseErrorKind::RingtoneOutOfOrder);
                }
                Section::Ringtone
            }
            ("recipient", Some(label)) => {
                let label = String::try_from(parse_string(label))
                    .map_err(|_| ParseErrorKind::Config(ConfigError::LabelTooLong))?;
                self.recipients_seen = true;
                self.pending = Some(PendingRecipient {
                    line: line_no,
                    label,
                    address: None,
                    ringtone: 0,
                });
                Section::Recipient
            }
            _ => return Err(ParseErrorKind::InvalidSection),
        };
        Ok(())
    }

    /// Flush a recipient section into the collected entries
    fn close_section(&mut self) -> Result<(), ParseError> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        let fail = |kind| ParseError {
            line: pending.line,
            kind,
        };
        let address = pending
            .address
            .ok_or_else(|| fail(ParseErrorKind::MissingAddress))?;
        self.recipients
            .push(RecipientEntry {
                address,
                label: pending.label.clone(),
                ringtone: pending.ringtone,
            })
            .map_err(|_| fail(ParseErrorKind::Config(ConfigError::TooManyRecipients)))
    }

    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<(), ParseErrorKind> {
        let config = &mut self.config;
        match self.section {
            Section::Root => {}
            Section::Radio => match key {
                "frequency_hz" => config.radio.frequency_hz = parse_int(value)?,
                "offset_hz" => config.radio.offset_hz = parse_int(value)?,
                "baud" => config.radio.baud = parse_int(value)?,
                "filter_address" => config.radio.filter.address = parse_int(value)?,
                "filter_mask" => config.radio.filter.mask = parse_int(value)?,
                _ => {}
            },
            Section::Receive => {
                if key == "batch_threshold" {
                    config.receive.batch_threshold = parse_int(value)?;
                }
            }
            Section::Battery => match key {
                "refresh_interval_ms" => config.battery.refresh_interval_ms = parse_int(value)?,
                "full_scale_raw" => config.battery.full_scale_raw = parse_int(value)?,
                "divider_ratio" => config.battery.divider_ratio = parse_float(value)?,
                "reference_voltage" => config.battery.reference_voltage = parse_float(value)?,
                _ => {}
            },
            Section::Alert => match key {
                "note_duration_ms" => config.alert.note_duration_ms = parse_int(value)?,
                "blink_count" => config.alert.blink_count = parse_int(value)?,
                "blink_on_ms" => config.alert.blink_on_ms = parse_int(value)?,
                "blink_off_ms" => config.alert.blink_off_ms = parse_int(value)?,
                "startup_ringtone" => {
                    config.alert.startup_ringtone = match value {
                        "false" => None,
                        other => Some(parse_int(other)?),
                    }
                }
                _ => {}
            },
            Section::Tones => {
                let hz = parse_int(value)?;
                let name = String::try_from(key).map_err(|_| ParseErrorKind::InvalidValue)?;
                match self.tones.iter_mut().find(|(n, _)| *n == name) {
                    Some(slot) => slot.1 = hz,
                    None => self
                        .tones
                        .push((name, hz))
                        .map_err(|_| ParseErrorKind::TooManyTones)?,
                }
            }
            Section::Ringtone => {
                if key == "notes" {
                    let notes = parse_notes(value)?;
                    self.ringtones
                        .push(PendingRingtone { line, notes })
                        .map_err(|_| ParseErrorKind::Config(ConfigError::TooManyRingtones))?;
                }
            }
            Section::Recipient => {
                if let Some(pending) = self.pending.as_mut() {
                    match key {
                        "address" => pending.address = Some(parse_int(value)?),
                        "ringtone" => pending.ringtone = parse_int(value)?,
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    fn finish(mut self, last_line: usize) -> Result<PagerConfig, ParseError> {
        self.close_section()?;

        if self.ringtones_seen {
            self.config.ringtones.clear();
            for pending in &self.ringtones {
                let at = |kind| ParseError {
                    line: pending.line,
                    kind,
                };
                let mut notes = [0u16; NOTE_COUNT];
                for (slot, note) in notes.iter_mut().zip(&pending.notes) {
                    *slot = resolve(&self.tones, note).ok_or(at(ParseErrorKind::UnknownTone))?;
                }
                self.config
                    .ringtones
                    .push(Ringtone::new(notes))
                    .map_err(|e| at(ParseErrorKind::Config(e)))?;
            }
        }

        let fail = |e| ParseError {
            line: last_line,
            kind: ParseErrorKind::Config(e),
        };
        if self.recipients_seen {
            self.config.directory.clear();
            for entry in self.recipients {
                self.config
                    .directory
                    .push(entry, &self.config.ringtones)
                    .map_err(fail)?;
            }
        }
        self.config.validate().map_err(fail)?;
        Ok(self.config)
    }
}

/// Parse `[A, 0, "C", 1005, ...]`
fn parse_notes(value: &str) -> Result<Vec<Note, NOTE_COUNT>, ParseErrorKind> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseErrorKind::InvalidValue)?;

    let mut notes = Vec::new();
    for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let note = if item.starts_with(|c: char| c.is_ascii_digit()) {
            Note::Hz(parse_int(item)?)
        } else {
            // A name longer than any declarable tone cannot resolve
            let name = String::try_from(parse_string(item))
                .map_err(|_| ParseErrorKind::UnknownTone)?;
            Note::Named(name)
        };
        notes
            .push(note)
            .map_err(|_| ParseErrorKind::WrongNoteCount)?;
    }

    if notes.len() != NOTE_COUNT {
        return Err(ParseErrorKind::WrongNoteCount);
    }
    Ok(notes)
}

fn resolve(tones: &[(String<MAX_TONE_NAME_LEN>, u16)], note: &Note) -> Option<u16> {
    match note {
        Note::Hz(hz) => Some(*hz),
        Note::Named(name) => tones.iter().find(|(n, _)| n == name).map(|(_, hz)| *hz),
    }
}

/// Drop a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Remove surrounding quotes if present
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Integers may use `_` separators, as TOML allows
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseErrorKind> {
    let mut digits: String<24> = String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseErrorKind::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseErrorKind::InvalidValue)
}

fn parse_float(value: &str) -> Result<f32, ParseErrorKind> {
    value.parse().map_err(|_| ParseErrorKind::InvalidValue)
}
