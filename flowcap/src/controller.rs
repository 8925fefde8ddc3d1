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

//! # Event Dispatcher
//!
//! The control loop reacting to the notification stream. Topology-change notifications feed the
//! [`Topology`] store; first-packet notifications feed the [`HostTable`], invoke the path
//! computation and install forwarding rules along the result.

use crate::channel::{Command, CommandSink, Payload, PseudoPort};
use crate::event::Notification;
use crate::frame::EthernetFrame;
use crate::hosts::HostTable;
use crate::installer::install_path;
use crate::printer;
use crate::routing::shortest_path;
use crate::topology::Topology;
use crate::types::{Attachment, Dpid, FlowKey, PortNo};
use log::*;
use std::collections::HashMap;

/// Lifecycle of a switch as seen by the controller. A switch not present in the state map has not
/// registered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// Handshake done, table-miss rule installed.
    Connected,
    /// Included in the topology store.
    Known,
    /// Left the topology.
    Gone,
}

/// # Controller
///
/// Owns the process-wide shared state (topology graph, host location table, per-switch lifecycle
/// states) and the command sink, and mutates it exclusively from [`Controller::handle`].
///
/// One notification is processed to completion before the next begins: `handle` takes `&mut
/// self`, which is the mutual-exclusion boundary required between "mutate topology" and "compute
/// path + install rules". A caller delivering notifications from multiple threads must serialize
/// them through a single `Mutex<Controller<_>>`; the controller itself never blocks on I/O, since
/// every outbound command is a fire-and-forget send.
#[derive(Debug)]
pub struct Controller<S> {
    topology: Topology,
    hosts: HostTable,
    states: HashMap<Dpid, SwitchState>,
    sink: S,
}

impl<S: CommandSink> Controller<S> {
    /// Generate a controller with empty state, issuing commands into the given sink.
    pub fn new(sink: S) -> Self {
        Self { topology: Topology::new(), hosts: HostTable::new(), states: HashMap::new(), sink }
    }

    /// Process one notification to completion.
    pub fn handle(&mut self, notification: Notification) {
        trace!("handling {} notification", notification.kind());
        match notification {
            Notification::SwitchConnected(id) => self.on_switch_connected(id),
            Notification::SwitchJoined(id) => self.on_switch_joined(id),
            Notification::SwitchLeft(id) => self.on_switch_left(id),
            Notification::LinkAdded(link) => {
                self.topology.apply_link_added(&link);
            }
            Notification::LinkRemoved(link) => {
                self.topology.apply_link_removed(&link);
            }
            Notification::PacketIn { switch, port, payload } => {
                self.on_packet_in(switch, port, payload)
            }
        }
    }

    fn on_switch_connected(&mut self, id: Dpid) {
        info!("{} connected, installing table-miss rule", id);
        if let Err(e) = self.sink.send(Command::InstallTableMiss { switch: id }) {
            // the switch will redo the handshake on reconnect, nothing to retry here
            error!("could not install table-miss rule on {}: {}", id, e);
        }
        self.states.insert(id, SwitchState::Connected);
    }

    fn on_switch_joined(&mut self, id: Dpid) {
        self.topology.apply_switch_joined(id);
        self.states.insert(id, SwitchState::Known);
    }

    fn on_switch_left(&mut self, id: Dpid) {
        self.topology.apply_switch_left(id);
        self.states.insert(id, SwitchState::Gone);
    }

    /// The packet path: learn the source, then either install a path towards a known destination
    /// and forward along it, or flood.
    fn on_packet_in(&mut self, switch: Dpid, port: PortNo, payload: Payload) {
        let frame = match EthernetFrame::parse(payload.bytes()) {
            Some(frame) => frame,
            None => {
                warn!("dropping unparsable frame from {} port {}", switch, port);
                return;
            }
        };
        if frame.is_lldp() {
            trace!("ignoring discovery frame on {} port {}", switch, port);
            return;
        }

        if self.hosts.record_if_absent(frame.src, switch, port) {
            info!("learned host {} at {} port {}", frame.src, switch, port);
        }
        // the source is recorded at this point, so the fallback never triggers
        let src_at = self.hosts.lookup(frame.src).unwrap_or(Attachment { switch, port });

        let out = match self.hosts.lookup(frame.dst) {
            Some(dst_at) => self.route_flow(FlowKey { src: frame.src, dst: frame.dst }, src_at, dst_at),
            None => {
                debug!("destination {} unknown, flooding", frame.dst);
                PseudoPort::Flood
            }
        };

        let command = Command::SendPacket { switch, in_port: port, out, payload };
        if let Err(e) = self.sink.send(command) {
            error!("could not forward packet on {}: {}", switch, e);
        }
    }

    /// Compute the path between two attachment points, install rules along it, and return the
    /// egress for the triggering packet. Falls back to flooding when no route exists.
    fn route_flow(&mut self, flow: FlowKey, src_at: Attachment, dst_at: Attachment) -> PseudoPort {
        match shortest_path(&self.topology, src_at.switch, dst_at.switch, src_at.port, dst_at.port)
        {
            Ok(path) => {
                debug!("installing path for {}: {}", flow, printer::path(&path));
                install_path(&mut self.sink, &path, flow);
                PseudoPort::Physical(path[0].egress)
            }
            Err(e) => {
                warn!("no usable route for {} ({}), flooding instead", flow, e);
                PseudoPort::Flood
            }
        }
    }

    /// Read access to the topology store
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Read access to the host location table
    pub fn hosts(&self) -> &HostTable {
        &self.hosts
    }

    /// The lifecycle state of a switch, if it ever registered.
    pub fn switch_state(&self, id: Dpid) -> Option<SwitchState> {
        self.states.get(&id).copied()
    }

    /// Read access to the command sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the command sink (e.g. to drain a [`crate::channel::CommandLog`]).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
