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

//! Minimal Ethernet header codec. The control plane only needs the two addresses and the
//! ethertype of an unmatched packet; the payload behind the header is carried around opaquely.

use crate::types::MacAddr;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

/// Ethertype carried by link-layer discovery (LLDP) frames
pub const ETHERTYPE_LLDP: u16 = 0x88cc;

/// Ethertype of an 802.1Q VLAN tag
const ETHERTYPE_VLAN: u16 = 0x8100;

/// Parsed Ethernet header of an unmatched packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetFrame {
    /// destination host address
    pub dst: MacAddr,
    /// source host address
    pub src: MacAddr,
    /// ethertype of the payload (the inner one if a VLAN tag is present)
    pub ethertype: u16,
}

impl EthernetFrame {
    /// Parse the header of a raw frame. A single VLAN tag is skipped over. Returns `None` if the
    /// buffer is too short to hold the header.
    pub fn parse(buf: &[u8]) -> Option<EthernetFrame> {
        if buf.len() < 14 {
            return None;
        }
        let mut bytes = Cursor::new(buf);
        let mut dst = [0u8; 6];
        let mut src = [0u8; 6];
        for byte in dst.iter_mut() {
            *byte = bytes.read_u8().ok()?;
        }
        for byte in src.iter_mut() {
            *byte = bytes.read_u8().ok()?;
        }
        let mut ethertype = bytes.read_u16::<BigEndian>().ok()?;
        if ethertype == ETHERTYPE_VLAN {
            bytes.read_u16::<BigEndian>().ok()?;
            ethertype = bytes.read_u16::<BigEndian>().ok()?;
        }
        Some(EthernetFrame {
            dst: MacAddr::from_bytes(dst),
            src: MacAddr::from_bytes(src),
            ethertype,
        })
    }

    /// Returns true if and only if this is a link-layer discovery frame, which must never be
    /// learned from or forwarded.
    pub fn is_lldp(&self) -> bool {
        self.ethertype == ETHERTYPE_LLDP
    }

    /// Serialize the 14-byte header (untagged).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(14);
        bytes.extend_from_slice(&self.dst.bytes());
        bytes.extend_from_slice(&self.src.bytes());
        bytes.write_u16::<BigEndian>(self.ethertype).unwrap();
        bytes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mac(last: u8) -> MacAddr {
        MacAddr::from_bytes([0, 0, 0, 0, 0, last])
    }

    #[test]
    fn test_parse_roundtrip() {
        let frame = EthernetFrame { dst: mac(2), src: mac(1), ethertype: 0x0800 };
        assert_eq!(EthernetFrame::parse(&frame.to_bytes()), Some(frame));
    }

    #[test]
    fn test_parse_vlan_tagged() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&mac(2).bytes());
        bytes.extend_from_slice(&mac(1).bytes());
        bytes.extend_from_slice(&[0x81, 0x00, 0x00, 0x2a, 0x08, 0x00]);
        assert_eq!(
            EthernetFrame::parse(&bytes),
            Some(EthernetFrame { dst: mac(2), src: mac(1), ethertype: 0x0800 })
        );
    }

    #[test]
    fn test_lldp_detected() {
        let frame = EthernetFrame { dst: mac(0xff), src: mac(1), ethertype: ETHERTYPE_LLDP };
        assert!(frame.is_lldp());
        assert!(EthernetFrame::parse(&frame.to_bytes()).unwrap().is_lldp());
    }

    #[test]
    fn test_truncated_frame() {
        assert_eq!(EthernetFrame::parse(&[0u8; 13]), None);
        assert_eq!(EthernetFrame::parse(&[]), None);
    }
}
