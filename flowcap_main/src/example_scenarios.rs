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

//! Canned notification scripts replayed against the controller.

use flowcap::channel::Payload;
use flowcap::frame::EthernetFrame;
use flowcap::{Dpid, Link, MacAddr, Notification, PortNo};

const S1: Dpid = Dpid(1);
const S2: Dpid = Dpid(2);
const S3: Dpid = Dpid(3);
const S4: Dpid = Dpid(4);
const H1: MacAddr = MacAddr(0x0000_0000_0001);
const H2: MacAddr = MacAddr(0x0000_0000_0002);

fn packet(switch: Dpid, port: PortNo, src: MacAddr, dst: MacAddr) -> Notification {
    let frame = EthernetFrame { dst, src, ethertype: 0x0800 };
    Notification::PacketIn { switch, port, payload: Payload::NotBuffered(frame.to_bytes()) }
}

/// Two switches, one link, one host on each side:
///
/// ```text
/// h1 --[1] S1 [2] ---- [1] S2 [2]-- h2
/// ```
///
/// `h1` speaks first (flooded), `h2` replies (path installed), then `h1` speaks again along the
/// now-installed path.
pub fn pair() -> Vec<Notification> {
    vec![
        Notification::SwitchConnected(S1),
        Notification::SwitchConnected(S2),
        Notification::SwitchJoined(S1),
        Notification::SwitchJoined(S2),
        Notification::LinkAdded(Link::new(S1, 2, S2, 1)),
        packet(S1, 1, H1, H2),
        packet(S2, 2, H2, H1),
        packet(S1, 1, H1, H2),
    ]
}

/// Four switches in a ring without a direct S1--S2 link:
///
/// ```text
/// S1 ---- S3 ---- S2
///  |              |
///  '----- S4 -----'
/// ```
///
/// The conversation between the hosts on S1 and S2 must settle on the two-hop route via S3.
pub fn ring() -> Vec<Notification> {
    let mut script: Vec<Notification> = (1..=4u64)
        .flat_map(|id| {
            vec![Notification::SwitchConnected(Dpid(id)), Notification::SwitchJoined(Dpid(id))]
        })
        .collect();
    script.extend(vec![
        Notification::LinkAdded(Link::new(S1, 2, S3, 1)),
        Notification::LinkAdded(Link::new(S2, 2, S3, 2)),
        Notification::LinkAdded(Link::new(S1, 3, S4, 1)),
        Notification::LinkAdded(Link::new(S2, 3, S4, 2)),
        packet(S1, 1, H1, H2),
        packet(S2, 1, H2, H1),
    ]);
    script
}

/// The ring scenario, but every link goes down after the hosts are learned. The final packet
/// finds no route and must be flooded.
pub fn partition() -> Vec<Notification> {
    let mut script = ring();
    script.extend(vec![
        Notification::LinkRemoved(Link::new(S1, 2, S3, 1)),
        Notification::LinkRemoved(Link::new(S2, 2, S3, 2)),
        Notification::LinkRemoved(Link::new(S1, 3, S4, 1)),
        Notification::LinkRemoved(Link::new(S2, 3, S4, 2)),
        packet(S1, 1, H1, H2),
    ]);
    script
}
