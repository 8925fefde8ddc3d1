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

//! Module for defining the inbound notification stream

use crate::channel::Payload;
use crate::types::{Dpid, Link, PortNo};

/// A notification consumed from the switch-control channel. One enumerated variant per message
/// class; the dispatcher processes them in a single match.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A switch completed the control-channel handshake.
    SwitchConnected(Dpid),
    /// Discovery reported a switch as part of the topology.
    SwitchJoined(Dpid),
    /// Discovery reported a switch as gone.
    SwitchLeft(Dpid),
    /// Discovery found a link between two switch ports.
    LinkAdded(Link),
    /// Discovery reported a link as gone.
    LinkRemoved(Link),
    /// A packet matched no rule and was sent to the controller.
    PacketIn {
        /// switch that reported the packet
        switch: Dpid,
        /// ingress port of the packet on that switch
        port: PortNo,
        /// the packet itself
        payload: Payload,
    },
}

impl Notification {
    /// Short name of the notification class, for log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::SwitchConnected(_) => "switch-connected",
            Notification::SwitchJoined(_) => "switch-joined",
            Notification::SwitchLeft(_) => "switch-left",
            Notification::LinkAdded(_) => "link-added",
            Notification::LinkRemoved(_) => "link-removed",
            Notification::PacketIn { .. } => "packet-in",
        }
    }
}
