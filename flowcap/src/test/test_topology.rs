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

//! Test the discovery-driven mutations of the topology store.

use crate::topology::Topology;
use crate::types::{Dpid, Link};

const S1: Dpid = Dpid(1);
const S2: Dpid = Dpid(2);
const S3: Dpid = Dpid(3);
const S9: Dpid = Dpid(9);

/// # Test topology
///
/// ```text
/// S1 ---- S2
///  '.    .'
///    '' S3
/// ```
fn get_triangle() -> Topology {
    let mut topo = Topology::new();
    assert!(topo.apply_switch_joined(S1));
    assert!(topo.apply_switch_joined(S2));
    assert!(topo.apply_switch_joined(S3));
    assert!(topo.apply_link_added(&Link::new(S1, 2, S2, 1)));
    assert!(topo.apply_link_added(&Link::new(S1, 3, S3, 1)));
    assert!(topo.apply_link_added(&Link::new(S2, 3, S3, 2)));
    topo
}

#[test]
fn test_symmetry() {
    let mut topo = Topology::new();
    topo.apply_switch_joined(S1);
    topo.apply_switch_joined(S2);

    let link = Link::new(S1, 2, S2, 1);
    assert!(topo.apply_link_added(&link));
    // adjacency[a][b] holds the port used to reach b from a
    assert_eq!(topo.egress_port(S1, S2), Some(2));
    assert_eq!(topo.egress_port(S2, S1), Some(1));

    assert!(topo.apply_link_removed(&link));
    assert_eq!(topo.egress_port(S1, S2), None);
    assert_eq!(topo.egress_port(S2, S1), None);
    assert_eq!(topo.num_links(), 0);
}

#[test]
fn test_switch_join_idempotent() {
    let mut topo = Topology::new();
    assert!(topo.apply_switch_joined(S1));
    assert!(!topo.apply_switch_joined(S1));
    assert_eq!(topo.num_switches(), 1);
}

#[test]
fn test_link_add_idempotent() {
    let mut topo = get_triangle();
    assert!(!topo.apply_link_added(&Link::new(S1, 2, S2, 1)));
    assert_eq!(topo.num_links(), 3);
    assert_eq!(topo.egress_port(S1, S2), Some(2));
    assert_eq!(topo.egress_port(S2, S1), Some(1));
}

#[test]
fn test_link_remove_idempotent() {
    let mut topo = get_triangle();
    let link = Link::new(S1, 2, S2, 1);
    assert!(topo.apply_link_removed(&link));
    assert!(!topo.apply_link_removed(&link));
    assert_eq!(topo.num_links(), 2);
    assert_eq!(topo.egress_port(S1, S2), None);
    assert_eq!(topo.egress_port(S2, S1), None);
    // the other links are untouched
    assert_eq!(topo.egress_port(S1, S3), Some(3));
    assert_eq!(topo.egress_port(S3, S2), Some(2));
}

#[test]
fn test_switch_left_removes_adjacency() {
    let mut topo = get_triangle();
    assert!(topo.apply_switch_left(S3));
    assert!(!topo.contains_switch(S3));
    assert_eq!(topo.egress_port(S1, S3), None);
    assert_eq!(topo.egress_port(S3, S1), None);
    assert_eq!(topo.egress_port(S2, S3), None);
    assert!(topo.neighbors(S1).iter().all(|(id, _)| *id != S3));
    assert_eq!(topo.num_switches(), 2);
    assert_eq!(topo.num_links(), 1);
    // removing it again is a no-op
    assert!(!topo.apply_switch_left(S3));
}

#[test]
fn test_unknown_endpoint_ignored() {
    let mut topo = get_triangle();
    assert!(!topo.apply_link_added(&Link::new(S1, 9, S9, 1)));
    assert_eq!(topo.num_links(), 3);
    assert_eq!(topo.egress_port(S1, S9), None);
    assert!(!topo.apply_link_removed(&Link::new(S1, 9, S9, 1)));
}

#[test]
fn test_self_link_ignored() {
    let mut topo = get_triangle();
    assert!(!topo.apply_link_added(&Link::new(S1, 8, S1, 9)));
    assert_eq!(topo.num_links(), 3);
}

#[test]
fn test_switch_ids_ascending() {
    let mut topo = Topology::new();
    topo.apply_switch_joined(S3);
    topo.apply_switch_joined(S1);
    topo.apply_switch_joined(S2);
    assert_eq!(topo.switch_ids(), vec![S1, S2, S3]);
}

#[test]
fn test_neighbors_ascending() {
    let topo = get_triangle();
    let neighbors: Vec<Dpid> = topo.neighbors(S1).into_iter().map(|(id, _)| id).collect();
    assert_eq!(neighbors, vec![S2, S3]);
    let adjacencies = topo.neighbors(S1);
    assert_eq!(adjacencies[0].1.egress, 2);
    assert_eq!(adjacencies[1].1.egress, 3);
    // a switch outside the topology has no neighbors
    assert!(topo.neighbors(S9).is_empty());
}
