use std::collections::HashMap;

use tracing::{debug, error, info};

use crate::dsa::graph::UnDirectedGraph;
use super::channel::Channel;
use super::configuration::{Configuration, ConfigurationBuilder};
use super::device::{Device, DeviceId, Direction, DirectionalPort, NeighborLink, PowerDBM};
use super::error::{ConfigurationError, PathNotFoundError, Result};
use super::path::NetworkPath;
use super::port_graph::PortGraph;
use super::router;

// device arena plus the fibers between them, devices refer to each other by DeviceId
#[derive(Clone,Debug,Default)]
pub struct Network {
    devices:Vec<Device>,
    names:HashMap<String,DeviceId>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_device(&mut self,device:Device) -> Result<DeviceId> {
        if self.names.contains_key(device.name()) {
            return Err(ConfigurationError::DuplicateDevice {name:device.name().to_owned()});
        }
        let id = DeviceId(self.devices.len());
        debug!(device = device.name(), kind = ?device.kind(), "added device");
        self.names.insert(device.name().to_owned(), id);
        self.devices.push(device);
        Ok(id)
    }
    pub fn add_devices(&mut self,devices:impl IntoIterator<Item = Device>) -> Result<()> {
        for device in devices {
            self.add_device(device)?;
        }
        Ok(())
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }
    pub fn device_id(&self,name:&str) -> Option<DeviceId> {
        self.names.get(name).copied()
    }
    pub fn device(&self,name:&str) -> Option<&Device> {
        self.device_by_id(self.device_id(name)?)
    }
    pub fn device_by_id(&self,id:DeviceId) -> Option<&Device> {
        self.devices.get(id.index())
    }
    fn resolve(&self,name:&str) -> Result<DeviceId> {
        self.device_id(name).ok_or_else(|| ConfigurationError::UnknownDevice {name:name.to_owned()})
    }
    fn device_mut(&mut self,name:&str) -> Result<&mut Device> {
        let id = self.resolve(name)?;
        Ok(&mut self.devices[id.index()])
    }

    // both ends are checked before either side is written
    pub fn add_bidi_link(&mut self,device_a:&str,port_a:&str,device_b:&str,port_b:&str) -> Result<()> {
        let id_a = self.resolve(device_a)?;
        let id_b = self.resolve(device_b)?;
        if id_a == id_b && port_a == port_b {
            return Err(ConfigurationError::SelfLink {device:device_a.to_owned(),port:port_a.to_owned()});
        }
        for (id,port) in [(id_a,port_a),(id_b,port_b)] {
            let device = &self.devices[id.index()];
            device.check_port(port)?;
            if let Some(link) = device.link(port) {
                return Err(ConfigurationError::PortAlreadyLinked {
                    device: device.name().to_owned(),
                    port: port.to_owned(),
                    peer: self.devices[link.peer.index()].name().to_owned(),
                    peer_port: link.peer_port.clone(),
                });
            }
        }

        // ports were checked above, neither write can fail
        self.devices[id_a.index()].set_link(port_a, Some(NeighborLink {peer:id_b,peer_port:port_b.to_owned()}))?;
        self.devices[id_b.index()].set_link(port_b, Some(NeighborLink {peer:id_a,peer_port:port_a.to_owned()}))?;
        debug!("linked {device_a}:{port_a} <-> {device_b}:{port_b}");
        Ok(())
    }

    // unplugs the fiber at device:port, both ends
    pub fn remove_bidi_link(&mut self,device:&str,port:&str) -> Result<()> {
        let id = self.resolve(device)?;
        let owner = &self.devices[id.index()];
        owner.check_port(port)?;
        let Some(link) = owner.link(port).cloned() else {
            return Err(ConfigurationError::PortNotLinked {device:device.to_owned(),port:port.to_owned()});
        };
        self.devices[id.index()].set_link(port, None)?;
        self.devices[link.peer.index()].set_link(&link.peer_port, None)?;
        debug!("unlinked {device}:{port} <-> {}:{}",self.devices[link.peer.index()].name(),link.peer_port);
        Ok(())
    }

    pub fn add_channels(&mut self,device:&str,channels:impl IntoIterator<Item = Channel>) -> Result<()> {
        self.device_mut(device)?.add_channels(channels);
        Ok(())
    }
    pub fn set_port_power(&mut self,device:&str,port:&str,direction:Direction,power:PowerDBM) -> Result<()> {
        self.device_mut(device)?.set_port_power(port, direction, power)
    }

    // rebuilt on every call, always matches the current links
    pub fn port_graph(&self) -> Result<PortGraph> {
        PortGraph::build(&self.devices)
    }

    // one search per direction
    pub fn shortest_path(&self,tp_a:&str,tp_b:&str) -> std::result::Result<NetworkPath,PathNotFoundError> {
        let (Some(id_a),Some(id_b)) = (self.device_id(tp_a),self.device_id(tp_b)) else {
            return Err(PathNotFoundError::new(tp_a, tp_b));
        };
        let graph = self.port_graph().map_err(|e| {
            // links are only written through add_bidi_link, which checks both ends
            error!("inconsistent topology: {e}");
            PathNotFoundError::new(tp_a, tp_b)
        })?;

        let direction_ab = router::shortest_path(&graph, &self.devices, id_a, id_b)?;
        let direction_ba = router::shortest_path(&graph, &self.devices, id_b, id_a)?;
        let path = NetworkPath {direction_ab,direction_ba};
        info!(
            from = tp_a,
            to = tp_b,
            hops_ab = path.direction_ab.len(),
            hops_ba = path.direction_ba.len(),
            devices = path.devices(self).len(),
            "found light path"
        );
        Ok(path)
    }

    pub fn configure(&self,path:&NetworkPath,channel:Channel) -> Configuration {
        ConfigurationBuilder::new(self, channel).build(path)
    }

    // device level topology, one node per device
    pub fn device_graph(&self) -> UnDirectedGraph {
        let mut graph = UnDirectedGraph::with_capacity(self.devices.len());
        for (index,device) in self.devices.iter().enumerate() {
            graph.push_node(index);
            for peer in device.neighbors() {
                graph.push_edge((index,peer.index()));
            }
        }
        graph
    }
    // adjacency list for the topology plot
    pub fn device_links(&self) -> Vec<(String,String)> {
        self.device_graph().edges().into_iter()
            .map(|(a,b)| (self.devices[a].name().to_owned(),self.devices[b].name().to_owned()))
            .collect()
    }

    // "LN1_A:E1:TX"
    pub fn port_label(&self,port:&DirectionalPort) -> String {
        let device = self.device_by_id(port.device).map_or_else(
            || format!("#{}",port.device.index()),
            |device| device.name().to_owned()
        );
        format!("{device}:{}:{}",port.port,port.direction)
    }
}
