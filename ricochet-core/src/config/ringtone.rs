//! Ringtone bank
//!
//! A ringtone is a fixed run of tone slots played back to back. A slot
//! frequency of 0 is a rest of the same length as a sounding slot.

use heapless::Vec;

use super::types::ConfigError;

/// Slots per ringtone
pub const NOTE_COUNT: usize = 8;

/// Maximum ringtones in the bank
pub const MAX_RINGTONES: usize = 8;

/// High chirp (Hz)
pub const A_TONE_HZ: u16 = 2730;
/// Low buzz (Hz)
pub const B_TONE_HZ: u16 = 1005;
/// Highest chirp (Hz)
pub const C_TONE_HZ: u16 = 3201;

const A: u16 = A_TONE_HZ;
const B: u16 = B_TONE_HZ;
const C: u16 = C_TONE_HZ;

/// Factory ringtones, index 4 doubles as the boot chime
const DEFAULT_RINGTONES: [[u16; NOTE_COUNT]; 5] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [A, C, A, C, A, 0, 0, 0],
    [C, 0, A, 0, B, B, 0, A],
    [A, C, C, 0, A, C, C, 0],
    [A, 0, 0, C, 0, 0, 0, 0],
];

/// Fixed-length sequence of tone frequencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ringtone([u16; NOTE_COUNT]);

impl Ringtone {
    /// All-rest ringtone
    pub const SILENT: Self = Self([0; NOTE_COUNT]);

    /// Create a ringtone from its slot frequencies
    pub const fn new(notes: [u16; NOTE_COUNT]) -> Self {
        Self(notes)
    }

    /// Slot frequencies in playback order
    pub fn notes(&self) -> &[u16; NOTE_COUNT] {
        &self.0
    }

    /// True if every slot is a rest
    pub fn is_silent(&self) -> bool {
        self.0.iter().all(|&f| f == 0)
    }
}

/// Indexed collection of ringtones
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingtoneBank {
    tones: Vec<Ringtone, MAX_RINGTONES>,
}

impl Default for RingtoneBank {
    fn default() -> Self {
        let mut bank = Self::new();
        for notes in DEFAULT_RINGTONES {
            // DEFAULT_RINGTONES is shorter than MAX_RINGTONES
            let _ = bank.tones.push(Ringtone::new(notes));
        }
        bank
    }
}

impl RingtoneBank {
    /// Create an empty bank
    pub const fn new() -> Self {
        Self { tones: Vec::new() }
    }

    /// Build a bank from a slice of ringtones
    pub fn from_slice(tones: &[Ringtone]) -> Result<Self, ConfigError> {
        let mut bank = Self::new();
        for tone in tones {
            bank.push(*tone)?;
        }
        Ok(bank)
    }

    /// Append a ringtone, returning its index
    pub fn push(&mut self, tone: Ringtone) -> Result<u8, ConfigError> {
        self.tones
            .push(tone)
            .map_err(|_| ConfigError::TooManyRingtones)?;
        Ok((self.tones.len() - 1) as u8)
    }

    /// Look up a ringtone by index
    pub fn get(&self, index: u8) -> Option<&Ringtone> {
        self.tones.get(index as usize)
    }

    /// Check whether `index` names a ringtone in this bank
    pub fn contains(&self, index: u8) -> bool {
        (index as usize) < self.tones.len()
    }

    /// Number of ringtones
    pub fn len(&self) -> usize {
        self.tones.len()
    }

    /// True if the bank holds no ringtones
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    /// Remove every ringtone
    pub fn clear(&mut self) {
        self.tones.clear();
    }
}
