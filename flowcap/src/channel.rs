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

//! # Outbound half of the switch-control channel
//!
//! The control plane issues commands through the [`CommandSink`] trait: fire-and-forget,
//! non-blocking sends with no acknowledgment awaited. The transport behind the trait is out of
//! scope; [`CommandLog`] is the in-memory implementation used by tests and the scenario driver.

use crate::types::{ChannelError, Dpid, FlowKey, PortNo};
use std::collections::HashSet;
use std::fmt;

/// Payload of a packet travelling through the control channel: either a reference into the
/// reporting switch's buffer, or the raw bytes of an unbuffered packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Buffered on the switch; the bytes are the (possibly truncated) copy sent up.
    Buffered(u32, Vec<u8>),
    /// Not buffered; the bytes are the complete packet.
    NotBuffered(Vec<u8>),
}

impl Payload {
    /// The packet bytes, however they are carried.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Payload::Buffered(_, bytes) => bytes,
            Payload::NotBuffered(bytes) => bytes,
        }
    }
}

/// Output target of a forwarded packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoPort {
    /// a single physical port
    Physical(PortNo),
    /// all ports except the ingress
    Flood,
}

impl fmt::Display for PseudoPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PseudoPort::Physical(port) => write!(f, "port {}", port),
            PseudoPort::Flood => write!(f, "flood"),
        }
    }
}

/// A command issued to the switch-control channel
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Install the table-miss rule at [`crate::types::TABLE_MISS_PRIORITY`]: every unmatched
    /// packet is sent to the controller, unbuffered.
    InstallTableMiss {
        /// target switch
        switch: Dpid,
    },
    /// Install a persistent forwarding rule (no idle or hard timeout).
    InstallRule {
        /// target switch
        switch: Dpid,
        /// ingress port to match
        in_port: PortNo,
        /// source/destination addresses to match
        flow: FlowKey,
        /// port to output matched traffic on
        out_port: PortNo,
        /// rule priority
        priority: u16,
    },
    /// Forward one packet immediately.
    SendPacket {
        /// switch that should emit the packet
        switch: Dpid,
        /// ingress port of the packet (excluded from a flood)
        in_port: PortNo,
        /// where to emit the packet
        out: PseudoPort,
        /// the packet, echoed back as received
        payload: Payload,
    },
}

impl Command {
    /// The switch this command is addressed to.
    pub fn switch(&self) -> Dpid {
        match self {
            Command::InstallTableMiss { switch } => *switch,
            Command::InstallRule { switch, .. } => *switch,
            Command::SendPacket { switch, .. } => *switch,
        }
    }
}

/// The sending seam of the control channel. Implementations must not block; a failed send is
/// reported per command and is never retried by the core.
pub trait CommandSink {
    /// Hand one command to the channel.
    fn send(&mut self, command: Command) -> Result<(), ChannelError>;
}

/// In-memory [`CommandSink`] recording every accepted command. Individual switches can be marked
/// as disconnected to exercise per-command failures.
#[derive(Debug, Default)]
pub struct CommandLog {
    commands: Vec<Command>,
    down: HashSet<Dpid>,
}

impl CommandLog {
    /// Generate an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands accepted so far, in issue order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drain the accepted commands, leaving the log empty.
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Mark a switch as disconnected: commands addressed to it will fail.
    pub fn set_down(&mut self, switch: Dpid) {
        self.down.insert(switch);
    }

    /// Mark a switch as connected again.
    pub fn set_up(&mut self, switch: Dpid) {
        self.down.remove(&switch);
    }
}

impl CommandSink for CommandLog {
    fn send(&mut self, command: Command) -> Result<(), ChannelError> {
        let target = command.switch();
        if self.down.contains(&target) {
            return Err(ChannelError::Disconnected(target));
        }
        self.commands.push(command);
        Ok(())
    }
}
