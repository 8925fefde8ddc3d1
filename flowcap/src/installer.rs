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

//! # Rule Installer
//!
//! Translates a computed path plus a flow identity into per-switch forwarding rule installs.
//! Installation is best effort: a hop whose switch cannot be reached loses its rule, the
//! remaining hops still get theirs, and the caller is never aborted.

use crate::channel::{Command, CommandSink};
use crate::routing::Path;
use crate::types::{FlowKey, FLOW_PRIORITY};
use log::*;

/// Issue one rule-install command per hop, matching (ingress port, src, dst) and outputting on
/// the hop's egress port at [`FLOW_PRIORITY`], with no expiration. Returns the number of rules
/// the channel accepted.
pub fn install_path<S: CommandSink>(sink: &mut S, path: &Path, flow: FlowKey) -> usize {
    let mut installed = 0;
    for hop in path {
        let command = Command::InstallRule {
            switch: hop.switch,
            in_port: hop.ingress,
            flow,
            out_port: hop.egress,
            priority: FLOW_PRIORITY,
        };
        match sink.send(command) {
            Ok(()) => installed += 1,
            Err(e) => error!("could not install rule for {} on {}: {}", flow, hop.switch, e),
        }
    }
    debug!("installed {}/{} rules for {}", installed, path.len(), flow);
    installed
}
