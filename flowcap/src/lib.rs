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

#![deny(missing_docs)]

//! # Flowcap: Reactive Shortest-Path Flow Provisioning
//!
//! This is a library implementing the control plane of a software-defined network: it discovers
//! the switch/link topology, learns host locations passively from traffic, computes shortest
//! forwarding paths, and installs per-flow forwarding rules in reaction to unmatched packets. The
//! switches themselves only flood unknown traffic; this control plane turns that fabric into an
//! auto-learning, shortest-path-routed network.
//!
//! The transport of the switch-control protocol is out of scope. The library consumes an
//! enumerated [`Notification`](event::Notification) stream and emits
//! [`Command`](channel::Command)s through the [`CommandSink`](channel::CommandSink) seam.
//!
//! ## Structure
//!
//! - **[`Topology`](topology::Topology)**: the live switch adjacency graph, rebuilt incrementally
//!   from discovery notifications. Both directions of a link are always updated together.
//!
//! - **[`HostTable`](hosts::HostTable)**: passively learned host locations, first-seen wins.
//!
//! - **[`routing`]**: deterministic weighted shortest-path computation over the topology
//!   snapshot, reporting unreachable destinations as a typed
//!   [`NoRoute`](types::RouteError::NoRoute).
//!
//! - **[`installer`]**: translates a computed [`Path`](routing::Path) into per-switch forwarding
//!   rule installs, best effort per hop.
//!
//! - **[`Controller`](controller::Controller)**: the event dispatcher tying everything together.
//!   One notification is processed to completion at a time.
//!
//! ## Example usage
//!
//! The following example wires two switches with one link, lets the hosts `h1` and `h2` find
//! each other, and inspects the commands the controller issued.
//!
//! ```rust
//! use flowcap::channel::{CommandLog, Payload};
//! use flowcap::event::Notification;
//! use flowcap::frame::EthernetFrame;
//! use flowcap::types::{Dpid, Link, MacAddr};
//! use flowcap::Controller;
//!
//! let s1 = Dpid(1);
//! let s2 = Dpid(2);
//! let h1 = MacAddr::from_bytes([0, 0, 0, 0, 0, 1]);
//! let h2 = MacAddr::from_bytes([0, 0, 0, 0, 0, 2]);
//!
//! let mut controller = Controller::new(CommandLog::new());
//! controller.handle(Notification::SwitchConnected(s1));
//! controller.handle(Notification::SwitchConnected(s2));
//! controller.handle(Notification::SwitchJoined(s1));
//! controller.handle(Notification::SwitchJoined(s2));
//! controller.handle(Notification::LinkAdded(Link::new(s1, 2, s2, 1)));
//!
//! // h1 -> h2: destination unknown, the packet is flooded and h1 is learned
//! let frame = EthernetFrame { dst: h2, src: h1, ethertype: 0x0800 };
//! controller.handle(Notification::PacketIn {
//!     switch: s1,
//!     port: 1,
//!     payload: Payload::NotBuffered(frame.to_bytes()),
//! });
//!
//! // h2 -> h1: destination known, rules are installed on both switches
//! let frame = EthernetFrame { dst: h1, src: h2, ethertype: 0x0800 };
//! controller.handle(Notification::PacketIn {
//!     switch: s2,
//!     port: 2,
//!     payload: Payload::NotBuffered(frame.to_bytes()),
//! });
//!
//! assert_eq!(controller.hosts().len(), 2);
//! ```

pub mod channel;
pub mod controller;
pub mod event;
pub mod frame;
pub mod hosts;
pub mod installer;
pub mod printer;
pub mod routing;
mod test;
pub mod topology;
pub mod types;

pub use controller::{Controller, SwitchState};
pub use event::Notification;
pub use types::{Dpid, FlowKey, Link, MacAddr, PortNo};
