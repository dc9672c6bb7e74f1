// directed graph of (device,port,direction) nodes
// TX and RX of the same port are different nodes, a fiber carries
// both directions independently and a device routes them separately

use std::collections::HashMap;

use tracing::debug;

use crate::dsa::graph::DirectedGraph;
use super::device::{Device, DeviceId, Direction, DirectionalPort};
use super::error::{ConfigurationError, Result};

pub type Edge = (DirectionalPort,DirectionalPort);

fn peer_of<'a>(devices:&'a [Device],device:&Device,id:DeviceId,port:&str) -> Result<Option<(DeviceId,&'a Device,String)>> {
    let Some(link) = device.link(port) else {
        return Ok(None);
    };
    let peer = devices.get(link.peer.index()).ok_or_else(|| ConfigurationError::UnknownDevice {
        name: format!("#{} (linked from {}:{port})",link.peer.index(),device.name())
    })?;
    peer.check_port(&link.peer_port)?;
    debug_assert_ne!((link.peer,link.peer_port.as_str()),(id,port));
    Ok(Some((link.peer,peer,link.peer_port.clone())))
}

// (self,p,TX) -> (B,q,RX) and (B,q,TX) -> (self,p,RX), the peer emits the same pair
pub fn external_edges(devices:&[Device],id:DeviceId) -> Result<Vec<Edge>> {
    let Some(device) = devices.get(id.index()) else {
        return Ok(vec![]);
    };
    let mut edges = Vec::with_capacity(device.port_names().count()*2);
    for port in device.port_names() {
        let Some((peer_id,peer,peer_port)) = peer_of(devices, device, id, port)? else {
            continue;
        };
        edges.push((
            DirectionalPort::of(id, device, port, Direction::Tx),
            DirectionalPort::of(peer_id, peer, &peer_port, Direction::Rx),
        ));
        edges.push((
            DirectionalPort::of(peer_id, peer, &peer_port, Direction::Tx),
            DirectionalPort::of(id, device, port, Direction::Rx),
        ));
    }
    Ok(edges)
}

// joined pair (a,b): (a,RX) -> (b,TX) and (b,RX) -> (a,TX)
pub fn internal_edges(devices:&[Device],id:DeviceId) -> Vec<Edge> {
    let Some(device) = devices.get(id.index()) else {
        return vec![];
    };
    let pairs = device.internal_pairs();
    let mut edges = Vec::with_capacity(pairs.len()*2);
    for (a,b) in pairs {
        edges.push((
            DirectionalPort::of(id, device, a, Direction::Rx),
            DirectionalPort::of(id, device, b, Direction::Tx),
        ));
        edges.push((
            DirectionalPort::of(id, device, b, Direction::Rx),
            DirectionalPort::of(id, device, a, Direction::Tx),
        ));
    }
    edges
}

#[derive(Clone,Debug,Default)]
pub struct PortGraph {
    graph:DirectedGraph,
    // node id -> port, ids are dense
    ports:Vec<DirectionalPort>,
    index:HashMap<DirectionalPort,usize>,
}

impl PortGraph {
    // devices[i] is DeviceId(i)
    pub fn build(devices:&[Device]) -> Result<Self> {
        let mut port_graph = Self::default();
        let mut internal_len = 0;
        let mut external_len = 0;
        for index in 0..devices.len() {
            let id = DeviceId(index);
            let internal = internal_edges(devices, id);
            let external = external_edges(devices, id)?;
            internal_len += internal.len();
            external_len += external.len();
            for (start,end) in internal.into_iter().chain(external) {
                port_graph.push_edge(start, end);
            }
        }
        port_graph.graph.shrink_to_fit();
        debug!(
            devices = devices.len(),
            nodes = port_graph.nodes_len(),
            edges = port_graph.edges_len(),
            internal_len,
            external_len,
            "built port graph"
        );
        Ok(port_graph)
    }

    fn intern(&mut self,port:DirectionalPort) -> usize {
        if let Some(id) = self.index.get(&port) {
            return *id;
        }
        let id = self.ports.len();
        self.index.insert(port.clone(), id);
        self.ports.push(port);
        id
    }
    fn push_edge(&mut self,start:DirectionalPort,end:DirectionalPort) -> bool {
        let start = self.intern(start);
        let end = self.intern(end);
        self.graph.push_pair(start, end)
    }

    pub fn nodes_len(&self) -> usize {
        self.graph.nodes_len()
    }
    pub fn edges_len(&self) -> usize {
        self.graph.edges_len()
    }
    pub fn node_id(&self,port:&DirectionalPort) -> Option<usize> {
        self.index.get(port).copied()
    }
    pub fn port(&self,node:usize) -> Option<&DirectionalPort> {
        self.ports.get(node)
    }
    pub fn contains(&self,port:&DirectionalPort) -> bool {
        self.index.contains_key(port)
    }
    pub fn contains_edge(&self,start:&DirectionalPort,end:&DirectionalPort) -> bool {
        match (self.node_id(start),self.node_id(end)) {
            (Some(start),Some(end)) => self.graph.contains_edge(start, end),
            _ => false,
        }
    }
    pub fn successors(&self,port:&DirectionalPort) -> Vec<&DirectionalPort> {
        let Some(node) = self.node_id(port) else {
            return vec![];
        };
        self.graph.next_nodes(node).filter_map(|next| self.port(next)).collect()
    }
    pub(crate) fn graph(&self) -> &DirectedGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optical_network::device::NeighborLink;

    fn link(devices:&mut [Device],a:usize,port_a:&str,b:usize,port_b:&str) {
        devices[a].set_link(port_a, Some(NeighborLink {peer:DeviceId(b),peer_port:port_b.to_owned()})).unwrap();
        devices[b].set_link(port_b, Some(NeighborLink {peer:DeviceId(a),peer_port:port_a.to_owned()})).unwrap();
    }
    fn port(device:usize,port:&str,direction:Direction) -> DirectionalPort {
        DirectionalPort::new(DeviceId(device), port, direction)
    }

    #[test]
    fn test_link_adds_two_edges() {
        let mut devices = vec![Device::terminal_point("TP1"),Device::terminal_point("TP2")];
        assert_eq!(PortGraph::build(&devices).unwrap().edges_len(),0);

        link(&mut devices, 0, "C", 1, "C");
        let emitted:usize = (0..2).map(|i| external_edges(&devices, DeviceId(i)).unwrap().len()).sum();
        assert_eq!(emitted,4);

        let graph = PortGraph::build(&devices).unwrap();
        assert_eq!(graph.edges_len(),2);
        assert_eq!(graph.nodes_len(),4);
        assert!(graph.contains_edge(&port(0, "C", Direction::Tx), &port(1, "C", Direction::Rx)));
        assert!(graph.contains_edge(&port(1, "C", Direction::Tx), &port(0, "C", Direction::Rx)));
        assert!(!graph.contains_edge(&port(1, "C", Direction::Rx), &port(0, "C", Direction::Tx)));
    }
    #[test]
    fn test_unlink_removes_edges() {
        let mut devices = vec![Device::line_degree("LN1"),Device::line_degree("LN2"),Device::add_drop("AD1")];
        link(&mut devices, 0, "LINE", 1, "LINE");
        link(&mut devices, 0, "E1", 2, "E1");
        let before = PortGraph::build(&devices).unwrap();
        // 2 links * 2 external edges + LINE<->E1 internal pair * 2
        assert_eq!(before.edges_len(),6);

        devices[0].set_link("E1", None).unwrap();
        devices[2].set_link("E1", None).unwrap();
        let after = PortGraph::build(&devices).unwrap();
        assert_eq!(after.edges_len(),2);
        assert!(!after.contains(&port(2, "E1", Direction::Rx)));
    }
    #[test]
    fn test_line_degree_internal_edges() {
        let mut devices = vec![Device::line_degree("LN1"),Device::add_drop("AD1"),Device::line_degree("LN2")];
        link(&mut devices, 0, "E1", 1, "E1");
        link(&mut devices, 0, "E2", 1, "E2");
        assert!(internal_edges(&devices, DeviceId(0)).is_empty());

        link(&mut devices, 0, "LINE", 2, "LINE");
        let edges = internal_edges(&devices, DeviceId(0));
        assert_eq!(edges.len(),4);
        let graph = PortGraph::build(&devices).unwrap();
        assert!(graph.contains_edge(&port(0, "LINE", Direction::Rx), &port(0, "E2", Direction::Tx)));
        assert!(graph.contains_edge(&port(0, "E2", Direction::Rx), &port(0, "LINE", Direction::Tx)));
        // express ports are never joined to each other
        assert!(!graph.contains_edge(&port(0, "E1", Direction::Rx), &port(0, "E2", Direction::Tx)));
    }
    #[test]
    fn test_add_drop_internal_mesh() {
        let mut devices = vec![
            Device::add_drop("AD1"),
            Device::line_degree("LN1"),
            Device::terminal_point("TP1"),
            Device::terminal_point("TP2"),
        ];
        link(&mut devices, 0, "E1", 1, "E1");
        link(&mut devices, 0, "E2", 1, "E2");
        link(&mut devices, 0, "C1", 2, "C");
        assert_eq!(internal_edges(&devices, DeviceId(0)).len(),4);
        link(&mut devices, 0, "C2", 3, "C");
        assert_eq!(internal_edges(&devices, DeviceId(0)).len(),8);
        assert!(internal_edges(&devices, DeviceId(2)).is_empty());

        let graph = PortGraph::build(&devices).unwrap();
        let from_client:Vec<&DirectionalPort> = graph.successors(&port(0, "C2", Direction::Rx));
        assert_eq!(from_client.len(),2);
        assert!(from_client.iter().all(|p| p.direction == Direction::Tx && p.port.starts_with('E')));
    }
    #[test]
    fn test_dangling_peer_port_rejected() {
        let mut devices = vec![Device::terminal_point("TP1"),Device::line_degree_with_ports("LN1", 1)];
        devices[0].set_link("C", Some(NeighborLink {peer:DeviceId(1),peer_port:"E5".to_owned()})).unwrap();
        assert!(matches!(PortGraph::build(&devices),Err(ConfigurationError::UndeclaredPort{..})));

        devices[0].set_link("C", Some(NeighborLink {peer:DeviceId(9),peer_port:"E1".to_owned()})).unwrap();
        assert!(matches!(PortGraph::build(&devices),Err(ConfigurationError::UnknownDevice{..})));
    }
    #[test]
    fn test_power_snapshot() {
        let mut devices = vec![Device::terminal_point("TP1"),Device::add_drop("AD1")];
        devices[1].set_port_power("C1", Direction::Rx, -12.0).unwrap();
        link(&mut devices, 0, "C", 1, "C1");
        let graph = PortGraph::build(&devices).unwrap();
        let rx = graph.node_id(&port(1, "C1", Direction::Rx)).and_then(|id| graph.port(id)).unwrap();
        assert_eq!(rx.power,Some(-12.0));
    }
}
