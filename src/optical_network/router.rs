use tracing::{debug, warn};

use super::device::{Device, DeviceId, Direction, DirectionalPort, TERMINAL_PORT};
use super::error::PathNotFoundError;
use super::port_graph::PortGraph;

fn device_name(devices:&[Device],id:DeviceId) -> String {
    match devices.get(id.index()) {
        Some(device) => device.name().to_owned(),
        None => format!("#{}",id.index()),
    }
}

// (source,C,TX) -> (destination,C,RX), one direction only, a device has no path to itself
pub fn shortest_path(graph:&PortGraph,devices:&[Device],source:DeviceId,destination:DeviceId)
    -> Result<Vec<DirectionalPort>,PathNotFoundError>
{
    let not_found = || PathNotFoundError {
        from: device_name(devices, source),
        to: device_name(devices, destination),
    };

    if source == destination {
        warn!(device = %device_name(devices, source), "refusing to route a device to itself");
        return Err(not_found());
    }

    let start = DirectionalPort::new(source, TERMINAL_PORT, Direction::Tx);
    let end = DirectionalPort::new(destination, TERMINAL_PORT, Direction::Rx);

    let (Some(start),Some(end)) = (graph.node_id(&start),graph.node_id(&end)) else {
        warn!(from = %device_name(devices, source), to = %device_name(devices, destination),
            "termination port is not part of the port graph");
        return Err(not_found());
    };

    let Some(nodes) = graph.graph().bfs_path(start, end) else {
        warn!(from = %device_name(devices, source), to = %device_name(devices, destination),
            "destination unreachable");
        return Err(not_found());
    };

    let mut path = Vec::with_capacity(nodes.len());
    for node in nodes {
        // every id handed out by bfs_path was interned by the graph
        path.push(graph.port(node).ok_or_else(not_found)?.clone());
    }
    debug!(hops = path.len(), "found directional path");
    Ok(path)
}
