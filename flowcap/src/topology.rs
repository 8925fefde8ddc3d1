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

//! # Topology Store
//!
//! This module holds the live adjacency model of the managed network, rebuilt incrementally from
//! discovery notifications. The graph is the single source of truth for the path computation in
//! [`crate::routing`].

use crate::types::{Dpid, Link, LinkWeight, PortNo};
use log::*;
use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

type IndexType = u32;

/// Directed adjacency entry: the egress port through which the neighbor is reached, and the
/// routing weight of the link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacency {
    /// egress port on the local switch
    pub egress: PortNo,
    /// routing weight of the link
    pub weight: LinkWeight,
}

/// # Topology Store
///
/// Mutable graph of switch adjacency. Nodes carry the switch id, and every undirected link is
/// stored as two directed edges which are always inserted and removed together, so a reader can
/// never observe a half-known link.
///
/// All mutations are idempotent: discovery notifications may be duplicated by the environment,
/// and re-applying an event must not change the graph. Each operation returns whether it changed
/// anything.
#[derive(Debug)]
pub struct Topology {
    graph: StableGraph<Dpid, Adjacency, Directed, IndexType>,
    indices: HashMap<Dpid, NodeIndex<IndexType>>,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    /// Generate an empty topology
    pub fn new() -> Self {
        Self { graph: StableGraph::new(), indices: HashMap::new() }
    }

    /// Insert a switch into the graph. Re-adding a known switch is a no-op.
    pub fn apply_switch_joined(&mut self, id: Dpid) -> bool {
        if self.indices.contains_key(&id) {
            trace!("duplicate join for {}", id);
            return false;
        }
        let idx = self.graph.add_node(id);
        self.indices.insert(id, idx);
        debug!("{} joined the topology", id);
        true
    }

    /// Remove a switch and every adjacency entry referencing it. Removing an unknown switch is a
    /// no-op.
    pub fn apply_switch_left(&mut self, id: Dpid) -> bool {
        match self.indices.remove(&id) {
            Some(idx) => {
                // StableGraph drops all incident edges with the node, so no half-link survives.
                self.graph.remove_node(idx);
                debug!("{} left the topology", id);
                true
            }
            None => {
                trace!("duplicate leave for {}", id);
                false
            }
        }
    }

    /// Insert both directions of a discovered link. Re-adding a known link is a no-op. If either
    /// endpoint has not joined, the event is ignored: applying it would leave adjacency entries
    /// referencing a switch the store does not know.
    pub fn apply_link_added(&mut self, link: &Link) -> bool {
        if link.src == link.dst {
            warn!("ignoring self-link on {}", link.src);
            return false;
        }
        let (a, b) = match (self.indices.get(&link.src), self.indices.get(&link.dst)) {
            (Some(a), Some(b)) => (*a, *b),
            _ => {
                warn!("ignoring link {} -- {}: unknown endpoint", link.src, link.dst);
                return false;
            }
        };
        if self.graph.find_edge(a, b).is_some() {
            trace!("duplicate link {} -- {}", link.src, link.dst);
            return false;
        }
        self.graph.add_edge(a, b, Adjacency { egress: link.src_port, weight: link.weight });
        self.graph.add_edge(b, a, Adjacency { egress: link.dst_port, weight: link.weight });
        debug!(
            "link added: {} port {} -- {} port {}",
            link.src, link.src_port, link.dst, link.dst_port
        );
        true
    }

    /// Remove both directions of a link. Removing an unknown link is a no-op.
    pub fn apply_link_removed(&mut self, link: &Link) -> bool {
        let (a, b) = match (self.indices.get(&link.src), self.indices.get(&link.dst)) {
            (Some(a), Some(b)) => (*a, *b),
            _ => {
                trace!("removal of link {} -- {} with unknown endpoint", link.src, link.dst);
                return false;
            }
        };
        let forward = match self.graph.find_edge(a, b) {
            Some(e) => e,
            None => {
                trace!("duplicate removal of link {} -- {}", link.src, link.dst);
                return false;
            }
        };
        self.graph.remove_edge(forward);
        if let Some(reverse) = self.graph.find_edge(b, a) {
            self.graph.remove_edge(reverse);
        }
        debug!("link removed: {} -- {}", link.src, link.dst);
        true
    }

    /// Current switch set in ascending id order. This is the search space (and the deterministic
    /// iteration order) of a path computation.
    pub fn switch_ids(&self) -> Vec<Dpid> {
        let mut ids: Vec<Dpid> = self.indices.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Returns true if and only if the switch is part of the topology.
    pub fn contains_switch(&self, id: Dpid) -> bool {
        self.indices.contains_key(&id)
    }

    /// The egress port through which `from` reaches `to`, if a live link connects them.
    pub fn egress_port(&self, from: Dpid, to: Dpid) -> Option<PortNo> {
        let a = self.indices.get(&from)?;
        let b = self.indices.get(&to)?;
        let edge = self.graph.find_edge(*a, *b)?;
        self.graph.edge_weight(edge).map(|adj| adj.egress)
    }

    /// All adjacency entries of a switch, in ascending neighbor id order.
    pub fn neighbors(&self, of: Dpid) -> Vec<(Dpid, Adjacency)> {
        let idx = match self.indices.get(&of) {
            Some(idx) => *idx,
            None => return Vec::new(),
        };
        let mut result: Vec<(Dpid, Adjacency)> = self
            .graph
            .edges(idx)
            .map(|edge| (self.graph[edge.target()], *edge.weight()))
            .collect();
        result.sort_unstable_by_key(|(id, _)| *id);
        result
    }

    /// Number of switches in the topology
    pub fn num_switches(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of undirected links in the topology
    pub fn num_links(&self) -> usize {
        self.graph.edge_count() / 2
    }
}
