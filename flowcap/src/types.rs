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

//! Module containing all type definitions

use std::fmt;
use thiserror::Error;

/// Switch identification (datapath id)
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Dpid(pub u64);

impl fmt::Display for Dpid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Switch port number
pub type PortNo = u32;

/// Link weight used by the path computation
pub type LinkWeight = f32;

/// Default weight of a discovered link
pub const DEFAULT_LINK_WEIGHT: LinkWeight = 1.0;

/// Priority of the table-miss rule installed when a switch connects
pub const TABLE_MISS_PRIORITY: u16 = 0;

/// Priority of an installed per-flow forwarding rule. Must be larger than
/// [`TABLE_MISS_PRIORITY`], such that matched traffic no longer reaches the controller.
pub const FLOW_PRIORITY: u16 = 1;

/// Host address (MAC), the lower 48 bits are significant.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct MacAddr(pub u64);

impl MacAddr {
    /// Build the address from the six bytes in transmission order.
    pub fn from_bytes(b: [u8; 6]) -> Self {
        Self(
            ((b[0] as u64) << 40)
                | ((b[1] as u64) << 32)
                | ((b[2] as u64) << 24)
                | ((b[3] as u64) << 16)
                | ((b[4] as u64) << 8)
                | (b[5] as u64),
        )
    }

    /// Return the six bytes of the address in transmission order.
    pub fn bytes(&self) -> [u8; 6] {
        let mut b = [0u8; 6];
        for (i, byte) in b.iter_mut().enumerate() {
            *byte = ((self.0 >> (8 * (5 - i))) & 0xff) as u8;
        }
        b
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bytes();
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// One undirected link discovered between two switch ports. A single link yields two directed
/// adjacency entries: `src` reaches `dst` through `src_port`, and `dst` reaches `src` through
/// `dst_port`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// first endpoint switch
    pub src: Dpid,
    /// port on `src` facing `dst`
    pub src_port: PortNo,
    /// second endpoint switch
    pub dst: Dpid,
    /// port on `dst` facing `src`
    pub dst_port: PortNo,
    /// routing weight of the link
    pub weight: LinkWeight,
}

impl Link {
    /// Create a link with the default weight of [`DEFAULT_LINK_WEIGHT`].
    pub fn new(src: Dpid, src_port: PortNo, dst: Dpid, dst_port: PortNo) -> Self {
        Self { src, src_port, dst, dst_port, weight: DEFAULT_LINK_WEIGHT }
    }

    /// Create a link with an explicit routing weight.
    pub fn weighted(
        src: Dpid,
        src_port: PortNo,
        dst: Dpid,
        dst_port: PortNo,
        weight: LinkWeight,
    ) -> Self {
        Self { src, src_port, dst, dst_port, weight }
    }
}

/// Identity of a traffic class, matched by installed forwarding rules.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct FlowKey {
    /// source host address
    pub src: MacAddr,
    /// destination host address
    pub dst: MacAddr,
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}

/// Attachment point of a learned host
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct Attachment {
    /// switch the host is attached to
    pub switch: Dpid,
    /// port on that switch facing the host
    pub port: PortNo,
}

/// Routing errors
#[derive(Error, Debug, PartialEq)]
pub enum RouteError {
    /// A path endpoint is not part of the current topology
    #[error("Switch {0} is not part of the topology")]
    UnknownSwitch(Dpid),
    /// Both endpoints exist, but no sequence of live links connects them
    #[error("No route from {0} to {1} in the current topology")]
    NoRoute(Dpid, Dpid),
}

/// Switch-control channel errors
#[derive(Error, Debug, PartialEq)]
pub enum ChannelError {
    /// The command could not be delivered because the switch connection is gone
    #[error("Switch {0} is not connected to the control channel")]
    Disconnected(Dpid),
}
