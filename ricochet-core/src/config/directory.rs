//! Recipient directory
//!
//! Maps a RIC (radio address) to the label shown in the header band and
//! the ringtone to play. Declaration order is significant: the resolver
//! walks entries in the order they were added.

use heapless::{String, Vec};

use super::ringtone::RingtoneBank;
use super::types::ConfigError;

/// Maximum recipients the pager answers to
pub const MAX_RECIPIENTS: usize = 8;

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Factory recipients: (address, label, ringtone)
const DEFAULT_RECIPIENTS: &[(u32, &str, u8)] = &[
    (216, "TIME", 0),
    (349440, "DAN", 3),
    (1067, "EMFCAMP", 2),
];

/// One address the pager responds to
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RecipientEntry {
    /// RIC this entry answers
    pub address: u32,
    /// Display label
    pub label: String<MAX_LABEL_LEN>,
    /// Index into the ringtone bank
    pub ringtone: u8,
}

impl RecipientEntry {
    /// Create an entry, rejecting labels that do not fit
    pub fn new(address: u32, label: &str, ringtone: u8) -> Result<Self, ConfigError> {
        let mut stored = String::new();
        stored
            .push_str(label)
            .map_err(|_| ConfigError::LabelTooLong)?;
        Ok(Self {
            address,
            label: stored,
            ringtone,
        })
    }
}

/// Ordered, immutable-after-boot list of recipients
///
/// Duplicate addresses are allowed and each one alerts separately.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RecipientDirectory {
    entries: Vec<RecipientEntry, MAX_RECIPIENTS>,
}

impl Default for RecipientDirectory {
    fn default() -> Self {
        let mut directory = Self::new();
        for &(address, label, ringtone) in DEFAULT_RECIPIENTS {
            if let Ok(entry) = RecipientEntry::new(address, label, ringtone) {
                let _ = directory.entries.push(entry);
            }
        }
        directory
    }
}

impl RecipientDirectory {
    /// Create an empty directory
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a directory, checking every ringtone against `bank`
    pub fn from_entries(
        entries: &[RecipientEntry],
        bank: &RingtoneBank,
    ) -> Result<Self, ConfigError> {
        let mut directory = Self::new();
        for entry in entries {
            directory.push(entry.clone(), bank)?;
        }
        Ok(directory)
    }

    /// Append an entry after checking its ringtone exists
    pub fn push(&mut self, entry: RecipientEntry, bank: &RingtoneBank) -> Result<(), ConfigError> {
        if !bank.contains(entry.ringtone) {
            return Err(ConfigError::UnknownRingtone {
                address: entry.address,
                ringtone: entry.ringtone,
            });
        }
        self.entries
            .push(entry)
            .map_err(|_| ConfigError::TooManyRecipients)
    }

    /// Check that every entry refers to a ringtone in `bank`
    pub fn validate(&self, bank: &RingtoneBank) -> Result<(), ConfigError> {
        match self.entries.iter().find(|e| !bank.contains(e.ringtone)) {
            Some(e) => Err(ConfigError::UnknownRingtone {
                address: e.address,
                ringtone: e.ringtone,
            }),
            None => Ok(()),
        }
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[RecipientEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the directory is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directory() {
        let directory = RecipientDirectory::default();
        let labels: Vec<&str, MAX_RECIPIENTS> =
            directory.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels.as_slice(), &["TIME", "DAN", "EMFCAMP"]);
        assert!(directory.validate(&RingtoneBank::default()).is_ok());
    }

    #[test]
    fn test_unknown_ringtone_rejected() {
        let bank = RingtoneBank::default();
        let mut directory = RecipientDirectory::new();
        let entry = RecipientEntry::new(42, "OPS", 7).unwrap();

        assert_eq!(
            directory.push(entry, &bank),
            Err(ConfigError::UnknownRingtone {
                address: 42,
                ringtone: 7
            })
        );
        assert!(directory.is_empty());
    }

    #[test]
    fn test_capacity_enforced() {
        let bank = RingtoneBank::default();
        let mut directory = RecipientDirectory::new();
        for i in 0..MAX_RECIPIENTS as u32 {
            let entry = RecipientEntry::new(i, "X", 0).unwrap();
            assert!(directory.push(entry, &bank).is_ok());
        }
        let extra = RecipientEntry::new(99, "X", 0).unwrap();
        assert_eq!(directory.push(extra, &bank), Err(ConfigError::TooManyRecipients));
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let bank = RingtoneBank::default();
        let entries = [
            RecipientEntry::new(7, "FIRST", 1).unwrap(),
            RecipientEntry::new(7, "SECOND", 2).unwrap(),
        ];
        let directory = RecipientDirectory::from_entries(&entries, &bank).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.entries()[1].label.as_str(), "SECOND");
    }

    #[test]
    fn test_label_too_long() {
        let result = RecipientEntry::new(1, "A-LABEL-THAT-IS-TOO-LONG", 0);
        assert_eq!(result, Err(ConfigError::LabelTooLong));
    }
}
