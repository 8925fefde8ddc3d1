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

//! # Path Finder
//!
//! Weighted shortest-path computation over the current [`Topology`](crate::topology::Topology)
//! snapshot. The computation is deterministic: when several frontier switches share the minimum
//! tentative distance, the one with the smallest id wins. An unreachable destination is reported
//! as [`RouteError::NoRoute`], never as a partial path.

use crate::topology::Topology;
use crate::types::{Dpid, LinkWeight, PortNo, RouteError};
use itertools::Itertools;
use log::*;
use petgraph::algo::FloatMeasure;
use std::collections::HashMap;

/// One hop of a path: the switch, the port the traffic enters on, and the port it leaves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    /// switch traversed by this hop
    pub switch: Dpid,
    /// ingress port of the traffic on this switch
    pub ingress: PortNo,
    /// egress port of the traffic on this switch
    pub egress: PortNo,
}

/// Ordered hop list from the source host's attachment switch (ingress = the host port) to the
/// destination host's attachment switch (egress = the host port). Never empty.
pub type Path = Vec<Hop>;

/// Compute the shortest path between two attachment switches. `src_port` is the port on `src`
/// facing the source host, `dst_port` the port on `dst` facing the destination host.
///
/// Two hosts attached to the same switch yield a single hop using the host-facing ports directly.
pub fn shortest_path(
    topo: &Topology,
    src: Dpid,
    dst: Dpid,
    src_port: PortNo,
    dst_port: PortNo,
) -> Result<Path, RouteError> {
    if !topo.contains_switch(src) {
        return Err(RouteError::UnknownSwitch(src));
    }
    if !topo.contains_switch(dst) {
        return Err(RouteError::UnknownSwitch(dst));
    }
    if src == dst {
        return Ok(vec![Hop { switch: src, ingress: src_port, egress: dst_port }]);
    }

    let order = dijkstra(topo, src, dst)?;
    attach_ports(topo, &order, src, dst, src_port, dst_port)
}

/// Dijkstra over the ascending-id switch snapshot, returning the switch sequence from `src` to
/// `dst`. The frontier minimum is selected by a strictly-less scan in ascending id order, so ties
/// always resolve to the smallest switch id.
fn dijkstra(topo: &Topology, src: Dpid, dst: Dpid) -> Result<Vec<Dpid>, RouteError> {
    let mut unvisited = topo.switch_ids();
    let mut distance: HashMap<Dpid, LinkWeight> =
        unvisited.iter().map(|id| (*id, LinkWeight::infinite())).collect();
    let mut previous: HashMap<Dpid, Dpid> = HashMap::new();
    distance.insert(src, 0.0);

    while !unvisited.is_empty() {
        let mut pos = 0;
        for (i, cand) in unvisited.iter().enumerate().skip(1) {
            if distance[cand] < distance[&unvisited[pos]] {
                pos = i;
            }
        }
        // remove (not swap_remove): the remainder must stay in ascending id order
        let current = unvisited.remove(pos);
        let current_dist = distance[&current];
        if current_dist.is_infinite() {
            // every remaining switch is unreachable
            break;
        }
        for (neighbor, adj) in topo.neighbors(current) {
            let alt = current_dist + adj.weight;
            if alt < distance[&neighbor] {
                distance.insert(neighbor, alt);
                previous.insert(neighbor, current);
            }
        }
    }

    if distance[&dst].is_infinite() {
        trace!("{} unreachable from {}", dst, src);
        return Err(RouteError::NoRoute(src, dst));
    }

    let mut order = vec![dst];
    let mut current = dst;
    while current != src {
        current = *previous.get(&current).ok_or(RouteError::NoRoute(src, dst))?;
        order.push(current);
    }
    order.reverse();
    Ok(order)
}

/// Re-walk the switch sequence forward and attach the ingress/egress port of every hop from the
/// adjacency entries, prepending the source host port and appending the destination host port.
fn attach_ports(
    topo: &Topology,
    order: &[Dpid],
    src: Dpid,
    dst: Dpid,
    src_port: PortNo,
    dst_port: PortNo,
) -> Result<Path, RouteError> {
    let mut hops: Path = Vec::with_capacity(order.len());
    let mut ingress = src_port;
    for (s1, s2) in order.iter().tuple_windows() {
        let egress = topo.egress_port(*s1, *s2).ok_or(RouteError::NoRoute(src, dst))?;
        hops.push(Hop { switch: *s1, ingress, egress });
        ingress = topo.egress_port(*s2, *s1).ok_or(RouteError::NoRoute(src, dst))?;
    }
    hops.push(Hop { switch: dst, ingress, egress: dst_port });
    debug!("path {} -> {}: {} hops", src, dst, hops.len());
    Ok(hops)
}
