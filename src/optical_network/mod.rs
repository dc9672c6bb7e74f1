// models a flexgrid optical network on the port level
// every physical port is split into a TX and an RX node of a directed graph
// light paths are routed terminal point to terminal point over that graph
// and turned into per device media channel configuration

/* the three device kinds
line degree: LINE faces the fiber, E1..En face the site
add/drop: E1..En face the line degrees, C1..Cm face the terminal points
terminal point: a single port C, where a light path starts and ends */

/* rules, a channel routed A->B->C->D is configured on B and C only
terminal points carry no configuration
the spectrum occupancy of the path is the OR of the channels already on its devices
a free slot range is reported, nothing stops a clashing channel */

pub mod channel;
pub mod configuration;
pub mod device;
pub mod error;
pub mod network;
pub mod occupancy;
pub mod path;
pub mod port_graph;
pub mod router;
pub mod spectrum;
pub mod topology;

pub use channel::Channel;
pub use configuration::{Configuration, ConfigurationBuilder};
pub use device::{Device, DeviceId, DeviceKind, Direction, DirectionalPort};
pub use error::{ConfigurationError, PathNotFoundError};
pub use network::Network;
pub use occupancy::SpectrumOccupancy;
pub use path::NetworkPath;
pub use port_graph::PortGraph;
pub use topology::Topology;
