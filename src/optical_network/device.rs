use std::fmt::Display;
use std::hash::{Hash, Hasher};

use super::channel::Channel;
use super::error::{ConfigurationError, Result};

pub const DEFAULT_EXPRESS_PORTS:usize = 8;
pub const DEFAULT_CLIENT_PORTS:usize = 8;

pub const LINE_PORT:&str = "LINE";
// the single port of a terminal point
pub const TERMINAL_PORT:&str = "C";
const EXPRESS_PREFIX:&str = "E";
const CLIENT_PREFIX:&str = "C";

pub type PowerDBM = f64;

// index into the network's device arena
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub struct DeviceId(pub(crate) usize);

impl DeviceId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum Direction {
    Tx,
    Rx,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Tx => write!(f,"TX"),
            Direction::Rx => write!(f,"RX"),
        }
    }
}

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum DeviceKind {
    LineDegree{express_ports:usize},
    AddDrop{express_ports:usize,client_ports:usize},
    TerminalPoint,
}

impl DeviceKind {
    // declared ports, in declaration order
    fn port_names(&self) -> Vec<String> {
        let express = |count:usize| (1..=count).map(|i| format!("{EXPRESS_PREFIX}{i}"));
        match *self {
            DeviceKind::LineDegree{express_ports} => {
                std::iter::once(LINE_PORT.to_owned()).chain(express(express_ports)).collect()
            },
            DeviceKind::AddDrop{express_ports,client_ports} => {
                express(express_ports)
                    .chain((1..=client_ports).map(|i| format!("{CLIENT_PREFIX}{i}")))
                    .collect()
            },
            DeviceKind::TerminalPoint => vec![TERMINAL_PORT.to_owned()],
        }
    }
}

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum PortRole {
    Line,
    Express,
    Client,
}

impl PortRole {
    fn of(port:&str) -> Option<Self> {
        if port == LINE_PORT {
            return Some(PortRole::Line);
        }
        if port.starts_with(EXPRESS_PREFIX) {
            return Some(PortRole::Express);
        }
        if port.starts_with(CLIENT_PREFIX) {
            return Some(PortRole::Client);
        }
        None
    }
}

// add/drop semantics apply on leaf ports: express ports of a line degree,
// client ports of an add/drop, never on a terminal point
pub fn is_leaf_port(kind:&DeviceKind,port:&str) -> bool {
    match (kind,PortRole::of(port)) {
        (DeviceKind::LineDegree{..},Some(PortRole::Express)) => true,
        (DeviceKind::AddDrop{..},Some(PortRole::Client)) => true,
        _ => false,
    }
}

// where a port is plugged in, the peer is an arena index, not an owner
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct NeighborLink {
    pub peer:DeviceId,
    pub peer_port:String,
}

#[derive(Clone,Debug)]
struct Port {
    name:String,
    link:Option<NeighborLink>,
    rx_power:Option<PowerDBM>,
    tx_power:Option<PowerDBM>,
}

impl Port {
    fn new(name:String) -> Self {
        Self {name,link:None,rx_power:None,tx_power:None}
    }
}

#[derive(Clone,Debug)]
pub struct Device {
    name:String,
    kind:DeviceKind,
    ports:Vec<Port>,
    channels:Vec<Channel>,
}

impl Device {
    pub fn new(name:impl Into<String>,kind:DeviceKind) -> Self {
        let ports = kind.port_names().into_iter().map(Port::new).collect();
        Self {name:name.into(),kind,ports,channels:vec![]}
    }
    pub fn line_degree(name:impl Into<String>) -> Self {
        Self::line_degree_with_ports(name, DEFAULT_EXPRESS_PORTS)
    }
    pub fn line_degree_with_ports(name:impl Into<String>,express_ports:usize) -> Self {
        Self::new(name, DeviceKind::LineDegree{express_ports})
    }
    pub fn add_drop(name:impl Into<String>) -> Self {
        Self::add_drop_with_ports(name, DEFAULT_EXPRESS_PORTS, DEFAULT_CLIENT_PORTS)
    }
    pub fn add_drop_with_ports(name:impl Into<String>,express_ports:usize,client_ports:usize) -> Self {
        Self::new(name, DeviceKind::AddDrop{express_ports,client_ports})
    }
    pub fn terminal_point(name:impl Into<String>) -> Self {
        Self::new(name, DeviceKind::TerminalPoint)
    }
    pub fn with_channels(mut self,channels:impl IntoIterator<Item = Channel>) -> Self {
        self.add_channels(channels);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }
    pub fn is_terminal_point(&self) -> bool {
        self.kind == DeviceKind::TerminalPoint
    }
    pub fn is_leaf_port(&self,port:&str) -> bool {
        self.has_port(port) && is_leaf_port(&self.kind, port)
    }

    pub fn port_names(&self) -> impl Iterator<Item = &str> {
        self.ports.iter().map(|port| port.name.as_str())
    }
    pub fn has_port(&self,port:&str) -> bool {
        self.port(port).is_some()
    }
    fn port(&self,port:&str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == port)
    }
    fn port_mut(&mut self,port:&str) -> Result<&mut Port> {
        let device = &self.name;
        self.ports.iter_mut().find(|p| p.name == port)
            .ok_or_else(|| ConfigurationError::UndeclaredPort {
                device: device.clone(), port: port.to_owned()
            })
    }
    pub(crate) fn check_port(&self,port:&str) -> Result<()> {
        if self.has_port(port) {
            return Ok(());
        }
        Err(ConfigurationError::UndeclaredPort {device:self.name.clone(),port:port.to_owned()})
    }

    // None for unlinked and for undeclared ports
    pub fn link(&self,port:&str) -> Option<&NeighborLink> {
        self.port(port)?.link.as_ref()
    }
    pub fn is_linked(&self,port:&str) -> bool {
        self.link(port).is_some()
    }
    pub fn linked_ports(&self) -> impl Iterator<Item = (&str,&NeighborLink)> {
        self.ports.iter().filter_map(|port| Some((port.name.as_str(),port.link.as_ref()?)))
    }
    // peer devices, each listed once, in port order
    pub fn neighbors(&self) -> Vec<DeviceId> {
        let mut neighbors:Vec<DeviceId> = Vec::with_capacity(self.ports.len());
        for (_,link) in self.linked_ports() {
            if !neighbors.contains(&link.peer) {
                neighbors.push(link.peer);
            }
        }
        neighbors
    }
    // both sides of a link are written by the network, never by the device alone
    pub(crate) fn set_link(&mut self,port:&str,link:Option<NeighborLink>) -> Result<()> {
        self.port_mut(port)?.link = link;
        Ok(())
    }

    // pairs of linked ports joined inside the device
    pub fn internal_pairs(&self) -> Vec<(&str,&str)> {
        let linked_with_role = |role:PortRole| {
            self.linked_ports()
                .map(|(port,_)| port)
                .filter(|port| PortRole::of(port) == Some(role))
                .collect::<Vec<&str>>()
        };
        match self.kind {
            DeviceKind::LineDegree{..} => {
                if !self.is_linked(LINE_PORT) {
                    return vec![];
                }
                linked_with_role(PortRole::Express).into_iter()
                    .map(|express| (LINE_PORT,express))
                    .collect()
            },
            DeviceKind::AddDrop{..} => {
                let clients = linked_with_role(PortRole::Client);
                let mut pairs = Vec::new();
                for express in linked_with_role(PortRole::Express) {
                    for client in clients.iter() {
                        pairs.push((express,*client));
                    }
                }
                pairs
            },
            DeviceKind::TerminalPoint => vec![],
        }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
    pub fn add_channels(&mut self,channels:impl IntoIterator<Item = Channel>) {
        self.channels.extend(channels);
    }

    // measured power, passed through to the configuration, never computed here
    pub fn port_power(&self,port:&str,direction:Direction) -> Option<PowerDBM> {
        let port = self.port(port)?;
        match direction {
            Direction::Rx => port.rx_power,
            Direction::Tx => port.tx_power,
        }
    }
    pub fn set_port_power(&mut self,port:&str,direction:Direction,power:PowerDBM) -> Result<()> {
        let port = self.port_mut(port)?;
        match direction {
            Direction::Rx => port.rx_power = Some(power),
            Direction::Tx => port.tx_power = Some(power),
        }
        Ok(())
    }
}

// graph node key, equal and hashed by (device,port,direction) only
// power is the reading carried along the path
#[derive(Clone,Debug)]
pub struct DirectionalPort {
    pub device:DeviceId,
    pub port:String,
    pub direction:Direction,
    pub power:Option<PowerDBM>,
}

impl DirectionalPort {
    pub fn new(device:DeviceId,port:impl Into<String>,direction:Direction) -> Self {
        Self {device,port:port.into(),direction,power:None}
    }
    pub(crate) fn of(id:DeviceId,device:&Device,port:&str,direction:Direction) -> Self {
        Self {
            device:id,
            port:port.to_owned(),
            direction,
            power:device.port_power(port, direction),
        }
    }
}

impl PartialEq for DirectionalPort {
    fn eq(&self, other: &Self) -> bool {
        self.device == other.device && self.port == other.port && self.direction == other.direction
    }
}

impl Eq for DirectionalPort {}

impl Hash for DirectionalPort {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.device.hash(state);
        self.port.hash(state);
        self.direction.hash(state);
    }
}
