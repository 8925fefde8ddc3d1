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

//! # Helper (printer) functions
//! Module containing helper functions to get formatted strings for paths, notifications and
//! commands, used by log messages and the scenario driver transcript.

use crate::channel::Command;
use crate::event::Notification;
use crate::frame::EthernetFrame;
use crate::routing::Path;
use crate::types::TABLE_MISS_PRIORITY;
use itertools::Itertools;

/// Returns the formatted string for a path, one `switch:(ingress->egress)` entry per hop.
pub fn path(path: &Path) -> String {
    path.iter().map(|hop| format!("{}:({}->{})", hop.switch, hop.ingress, hop.egress)).join(" ")
}

/// Returns the formatted string for an outbound command.
pub fn command(command: &Command) -> String {
    match command {
        Command::InstallTableMiss { switch } => format!(
            "flowmod {}: priority {}, match * -> controller (no buffer)",
            switch, TABLE_MISS_PRIORITY
        ),
        Command::InstallRule { switch, in_port, flow, out_port, priority } => format!(
            "flowmod {}: priority {}, match (in {}, {}) -> output {}",
            switch, priority, in_port, flow, out_port
        ),
        Command::SendPacket { switch, in_port, out, .. } => {
            format!("pktout {}: in {} -> {}", switch, in_port, out)
        }
    }
}

/// Returns the formatted string for an inbound notification.
pub fn notification(notification: &Notification) -> String {
    match notification {
        Notification::SwitchConnected(id) => format!("{} connected", id),
        Notification::SwitchJoined(id) => format!("{} joined", id),
        Notification::SwitchLeft(id) => format!("{} left", id),
        Notification::LinkAdded(link) => format!(
            "link added: {} port {} -- {} port {}",
            link.src, link.src_port, link.dst, link.dst_port
        ),
        Notification::LinkRemoved(link) => {
            format!("link removed: {} -- {}", link.src, link.dst)
        }
        Notification::PacketIn { switch, port, payload } => {
            match EthernetFrame::parse(payload.bytes()) {
                Some(frame) => format!(
                    "packet-in on {} port {}: {} -> {}",
                    switch, port, frame.src, frame.dst
                ),
                None => format!("packet-in on {} port {}: unparsable", switch, port),
            }
        }
    }
}
