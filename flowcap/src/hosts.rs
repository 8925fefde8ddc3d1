// Flowcap: Reactive Shortest-Path Flow Provisioning
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Host Location Table
//!
//! Passively learned mapping from host address to attachment point. An address is recorded the
//! first time it appears as the source of an unmatched packet, and the recorded location is
//! permanent: hosts are assumed not to roam, and no entry ever expires.

use crate::types::{Attachment, Dpid, MacAddr, PortNo};
use log::*;
use std::collections::HashMap;

/// Learned host locations, first-seen wins.
#[derive(Debug, Default)]
pub struct HostTable {
    hosts: HashMap<MacAddr, Attachment>,
}

impl HostTable {
    /// Generate an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the attachment point of an address, unless the address was seen before. Returns
    /// whether an insertion occurred. A re-observation from a different attachment point is
    /// dropped, keeping the first recorded location.
    pub fn record_if_absent(&mut self, addr: MacAddr, switch: Dpid, port: PortNo) -> bool {
        let observed = Attachment { switch, port };
        match self.hosts.get(&addr) {
            Some(known) if *known != observed => {
                debug!(
                    "{} reappeared at {} port {}, keeping {} port {}",
                    addr, switch, port, known.switch, known.port
                );
                false
            }
            Some(_) => false,
            None => {
                self.hosts.insert(addr, observed);
                true
            }
        }
    }

    /// The recorded attachment point of an address, if it was ever observed as a source.
    pub fn lookup(&self, addr: MacAddr) -> Option<Attachment> {
        self.hosts.get(&addr).copied()
    }

    /// Iterate over all learned hosts, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&MacAddr, &Attachment)> {
        self.hosts.iter()
    }

    /// Number of learned hosts
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Returns true if and only if no host was learned yet.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
