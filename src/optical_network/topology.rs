// declarative network description
//
// {
//   "devices": [
//     {"name": "LN1_A", "kind": "line-degree", "express_ports": 4,
//      "channels": [[191325, 191375]]},
//     {"name": "AD1_A", "kind": "add-drop"},
//     {"name": "TP1_A", "kind": "terminal-point"}
//   ],
//   "links": [
//     {"a": {"device": "LN1_A", "port": "E1"}, "b": {"device": "AD1_A", "port": "E1"}}
//   ]
// }

use serde::{Deserialize, Serialize};
use tracing::info;

use super::channel::Channel;
use super::device::{Device, DEFAULT_CLIENT_PORTS, DEFAULT_EXPRESS_PORTS};
use super::error::{ConfigurationError, Result};
use super::network::Network;

#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceKindSpec {
    LineDegree,
    AddDrop,
    TerminalPoint,
}

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct DeviceSpec {
    pub name:String,
    pub kind:DeviceKindSpec,
    #[serde(default = "default_express_ports")]
    pub express_ports:usize,
    #[serde(default = "default_client_ports")]
    pub client_ports:usize,
    // [lower, upper] pairs in any unit Channel::new accepts
    #[serde(default)]
    pub channels:Vec<(f64,f64)>,
}

// port names are built eagerly, one String each
pub const MAX_PORTS:usize = u16::MAX as usize;

fn default_express_ports() -> usize {
    DEFAULT_EXPRESS_PORTS
}

fn default_client_ports() -> usize {
    DEFAULT_CLIENT_PORTS
}

#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct PortSpec {
    pub device:String,
    pub port:String,
}

#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct LinkSpec {
    pub a:PortSpec,
    pub b:PortSpec,
}

#[derive(Clone,Debug,Default,PartialEq,Serialize,Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub devices:Vec<DeviceSpec>,
    #[serde(default)]
    pub links:Vec<LinkSpec>,
}

impl DeviceSpec {
    // channels are validated here, a bad one fails the whole device
    pub fn to_device(&self) -> Result<Device> {
        for count in [self.express_ports,self.client_ports] {
            if count > MAX_PORTS {
                return Err(ConfigurationError::InvalidPortCount {
                    device: self.name.clone(), count, max: MAX_PORTS
                });
            }
        }
        let device = match self.kind {
            DeviceKindSpec::LineDegree => Device::line_degree_with_ports(&self.name, self.express_ports),
            DeviceKindSpec::AddDrop => Device::add_drop_with_ports(&self.name, self.express_ports, self.client_ports),
            DeviceKindSpec::TerminalPoint => Device::terminal_point(&self.name),
        };
        let channels = self.channels.iter()
            .map(|(lower,upper)| Channel::new(*lower, *upper))
            .collect::<Result<Vec<Channel>>>()?;
        Ok(device.with_channels(channels))
    }
}

impl Topology {
    pub fn from_json_str(json:&str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Network {
    // all or nothing, the first bad device or link fails the whole topology
    pub fn from_topology(topology:&Topology) -> Result<Self> {
        let mut network = Network::new();
        for device in topology.devices.iter() {
            network.add_device(device.to_device()?)?;
        }
        for link in topology.links.iter() {
            network.add_bidi_link(&link.a.device, &link.a.port, &link.b.device, &link.b.port)?;
        }
        info!(devices = topology.devices.len(), links = topology.links.len(), "loaded topology");
        Ok(network)
    }
}

impl<'a> TryFrom<&'a Topology> for Network {
    type Error = ConfigurationError;
    fn try_from(value: &'a Topology) -> Result<Self> {
        Network::from_topology(value)
    }
}
