//! Address resolver
//!
//! Matches a decoded RIC against the directory. Every matching entry is
//! returned, in declaration order, so a directory listing the same RIC
//! twice alerts twice.

use crate::config::{RecipientDirectory, RecipientEntry};

/// Looks up recipients for a decoded address
#[derive(Debug, Clone, Copy)]
pub struct AddressResolver<'a> {
    directory: &'a RecipientDirectory,
}

impl<'a> AddressResolver<'a> {
    pub fn new(directory: &'a RecipientDirectory) -> Self {
        Self { directory }
    }

    /// Entries whose address equals `address`
    pub fn resolve(&self, address: u32) -> impl Iterator<Item = &'a RecipientEntry> + 'a {
        self.directory
            .entries()
            .iter()
            .filter(move |entry| entry.address == address)
    }

    /// Number of entries answering `address`
    pub fn match_count(&self, address: u32) -> usize {
        self.resolve(address).count()
    }
}
