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

//! Test the event dispatcher end to end, against a recording command sink.

use crate::channel::{Command, CommandLog, Payload, PseudoPort};
use crate::controller::{Controller, SwitchState};
use crate::event::Notification;
use crate::frame::{EthernetFrame, ETHERTYPE_LLDP};
use crate::types::{Attachment, Dpid, FlowKey, Link, MacAddr};

const S1: Dpid = Dpid(1);
const S2: Dpid = Dpid(2);
const S3: Dpid = Dpid(3);
const H1: MacAddr = MacAddr(0x0000_0000_0001);
const H2: MacAddr = MacAddr(0x0000_0000_0002);

fn packet(switch: Dpid, port: u32, src: MacAddr, dst: MacAddr) -> Notification {
    let frame = EthernetFrame { dst, src, ethertype: 0x0800 };
    Notification::PacketIn { switch, port, payload: Payload::NotBuffered(frame.to_bytes()) }
}

/// Two switches joined by one link, hosts expected on S1 port 1 and S2 port 2.
///
/// ```text
/// h1 --[1] S1 [2] ---- [1] S2 [2]-- h2
/// ```
fn get_pair() -> Controller<CommandLog> {
    let mut controller = Controller::new(CommandLog::new());
    controller.handle(Notification::SwitchConnected(S1));
    controller.handle(Notification::SwitchConnected(S2));
    controller.handle(Notification::SwitchJoined(S1));
    controller.handle(Notification::SwitchJoined(S2));
    controller.handle(Notification::LinkAdded(Link::new(S1, 2, S2, 1)));
    controller
}

#[test]
fn test_table_miss_on_connect() {
    let mut controller = Controller::new(CommandLog::new());
    controller.handle(Notification::SwitchConnected(S1));
    assert_eq!(controller.sink().commands(), &[Command::InstallTableMiss { switch: S1 }]);
    assert_eq!(controller.switch_state(S1), Some(SwitchState::Connected));

    controller.handle(Notification::SwitchJoined(S1));
    assert_eq!(controller.switch_state(S1), Some(SwitchState::Known));
    assert!(controller.topology().contains_switch(S1));
}

#[test]
fn test_switch_gone() {
    let mut controller = get_pair();
    controller.handle(Notification::SwitchLeft(S2));
    assert_eq!(controller.switch_state(S2), Some(SwitchState::Gone));
    assert!(!controller.topology().contains_switch(S2));
    assert_eq!(controller.topology().egress_port(S1, S2), None);
}

#[test]
fn test_end_to_end_pair() {
    let mut controller = get_pair();
    controller.sink_mut().take();

    // h1 sends its first frame: the source is learned, the destination is unknown -> flood
    controller.handle(packet(S1, 1, H1, H2));
    assert_eq!(controller.hosts().lookup(H1), Some(Attachment { switch: S1, port: 1 }));
    let reply_flow = FlowKey { src: H2, dst: H1 };
    let h1_frame = EthernetFrame { dst: H2, src: H1, ethertype: 0x0800 };
    let h2_frame = EthernetFrame { dst: H1, src: H2, ethertype: 0x0800 };
    assert_eq!(
        controller.sink_mut().take(),
        vec![Command::SendPacket {
            switch: S1,
            in_port: 1,
            out: PseudoPort::Flood,
            payload: Payload::NotBuffered(h1_frame.to_bytes()),
        }]
    );

    // h2 replies: h2 is learned, h1 is known -> rules along the path, forward out the first hop
    controller.handle(packet(S2, 2, H2, H1));
    assert_eq!(controller.hosts().lookup(H2), Some(Attachment { switch: S2, port: 2 }));
    assert_eq!(
        controller.sink_mut().take(),
        vec![
            Command::InstallRule {
                switch: S2,
                in_port: 2,
                flow: reply_flow,
                out_port: 1,
                priority: 1,
            },
            Command::InstallRule {
                switch: S1,
                in_port: 2,
                flow: reply_flow,
                out_port: 1,
                priority: 1,
            },
            Command::SendPacket {
                switch: S2,
                in_port: 2,
                out: PseudoPort::Physical(1),
                payload: Payload::NotBuffered(h2_frame.to_bytes()),
            },
        ]
    );
}

#[test]
fn test_lldp_ignored() {
    let mut controller = get_pair();
    controller.sink_mut().take();

    let frame = EthernetFrame { dst: H2, src: H1, ethertype: ETHERTYPE_LLDP };
    controller.handle(Notification::PacketIn {
        switch: S1,
        port: 1,
        payload: Payload::NotBuffered(frame.to_bytes()),
    });
    assert!(controller.hosts().is_empty());
    assert!(controller.sink().commands().is_empty());
}

#[test]
fn test_unparsable_dropped() {
    let mut controller = get_pair();
    controller.sink_mut().take();

    controller.handle(Notification::PacketIn {
        switch: S1,
        port: 1,
        payload: Payload::NotBuffered(vec![0xde, 0xad]),
    });
    assert!(controller.hosts().is_empty());
    assert!(controller.sink().commands().is_empty());
}

#[test]
fn test_no_route_floods() {
    let mut controller = get_pair();
    controller.handle(Notification::LinkRemoved(Link::new(S1, 2, S2, 1)));
    controller.handle(packet(S1, 1, H1, H2));
    controller.handle(packet(S2, 2, H2, H1));
    controller.sink_mut().take();

    // both hosts are known, but the graph is partitioned -> flood, never fail
    controller.handle(packet(S1, 1, H1, H2));
    let frame = EthernetFrame { dst: H2, src: H1, ethertype: 0x0800 };
    assert_eq!(
        controller.sink_mut().take(),
        vec![Command::SendPacket {
            switch: S1,
            in_port: 1,
            out: PseudoPort::Flood,
            payload: Payload::NotBuffered(frame.to_bytes()),
        }]
    );
}

#[test]
fn test_same_switch_hosts() {
    let mut controller = Controller::new(CommandLog::new());
    controller.handle(Notification::SwitchConnected(S1));
    controller.handle(Notification::SwitchJoined(S1));
    controller.handle(packet(S1, 1, H1, H2));
    controller.sink_mut().take();

    controller.handle(packet(S1, 2, H2, H1));
    let reply_flow = FlowKey { src: H2, dst: H1 };
    let frame = EthernetFrame { dst: H1, src: H2, ethertype: 0x0800 };
    assert_eq!(
        controller.sink_mut().take(),
        vec![
            Command::InstallRule {
                switch: S1,
                in_port: 2,
                flow: reply_flow,
                out_port: 1,
                priority: 1,
            },
            Command::SendPacket {
                switch: S1,
                in_port: 2,
                out: PseudoPort::Physical(1),
                payload: Payload::NotBuffered(frame.to_bytes()),
            },
        ]
    );
}

#[test]
fn test_install_failure_isolated() {
    // line topology: h1 --[1] S1 [2]---[1] S3 [2]---[1] S2 [2]-- h2
    let mut controller = Controller::new(CommandLog::new());
    for id in &[S1, S2, S3] {
        controller.handle(Notification::SwitchConnected(*id));
        controller.handle(Notification::SwitchJoined(*id));
    }
    controller.handle(Notification::LinkAdded(Link::new(S1, 2, S3, 1)));
    controller.handle(Notification::LinkAdded(Link::new(S3, 2, S2, 1)));
    controller.handle(packet(S1, 1, H1, H2));
    controller.sink_mut().take();

    // the mid-path switch loses its control connection before the reply arrives
    controller.sink_mut().set_down(S3);
    controller.handle(packet(S2, 2, H2, H1));

    let reply_flow = FlowKey { src: H2, dst: H1 };
    let commands = controller.sink_mut().take();
    // S3 lost its rule, but S2 and S1 got theirs and the packet is still forwarded
    assert_eq!(commands.len(), 3);
    assert_eq!(
        commands[0],
        Command::InstallRule { switch: S2, in_port: 2, flow: reply_flow, out_port: 1, priority: 1 }
    );
    assert_eq!(
        commands[1],
        Command::InstallRule { switch: S1, in_port: 2, flow: reply_flow, out_port: 1, priority: 1 }
    );
    assert!(matches!(
        commands[2],
        Command::SendPacket { switch: S2, out: PseudoPort::Physical(1), .. }
    ));
}

#[test]
fn test_buffered_payload_echoed() {
    let mut controller = get_pair();
    controller.sink_mut().take();

    let frame = EthernetFrame { dst: H2, src: H1, ethertype: 0x0800 };
    let payload = Payload::Buffered(42, frame.to_bytes());
    controller.handle(Notification::PacketIn { switch: S1, port: 1, payload: payload.clone() });
    assert_eq!(
        controller.sink_mut().take(),
        vec![Command::SendPacket { switch: S1, in_port: 1, out: PseudoPort::Flood, payload }]
    );
}

#[test]
fn test_duplicate_discovery_harmless() {
    let mut controller = get_pair();
    controller.handle(Notification::SwitchJoined(S1));
    controller.handle(Notification::LinkAdded(Link::new(S1, 2, S2, 1)));
    assert_eq!(controller.topology().num_switches(), 2);
    assert_eq!(controller.topology().num_links(), 1);

    // the packet path still works after the duplicates
    controller.sink_mut().take();
    controller.handle(packet(S1, 1, H1, H2));
    controller.handle(packet(S2, 2, H2, H1));
    assert_eq!(controller.sink().commands().len(), 4);
}
