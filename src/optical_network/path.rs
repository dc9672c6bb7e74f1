use super::configuration::spectrum_occupancy;
use super::device::{Device, DeviceId, DirectionalPort};
use super::network::Network;
use super::occupancy::SpectrumOccupancy;

// drops consecutive repeats, keeps the first of every run
// non adjacent repeats stay
pub fn condense<T:PartialEq>(items:impl IntoIterator<Item = T>) -> Vec<T> {
    let mut condensed:Vec<T> = Vec::new();
    for item in items {
        if condensed.last() != Some(&item) {
            condensed.push(item);
        }
    }
    condensed
}

// device level path
pub fn condense_path(path:&[DirectionalPort]) -> Vec<DeviceId> {
    condense(path.iter().map(|port| port.device))
}

// first port of every device run, the port the signal enters through
pub fn condense_ports(path:&[DirectionalPort]) -> Vec<&DirectionalPort> {
    let mut condensed:Vec<&DirectionalPort> = Vec::new();
    for port in path {
        if condensed.last().is_none_or(|last| last.device != port.device) {
            condensed.push(port);
        }
    }
    condensed
}

// ports to configure: path order, each once, terminal points left out
pub fn ports(devices:&[Device],path:&[DirectionalPort]) -> Vec<DirectionalPort> {
    let mut ports:Vec<DirectionalPort> = Vec::with_capacity(path.len());
    for port in path {
        let is_terminal = devices.get(port.device.index()).is_none_or(|device| device.is_terminal_point());
        if is_terminal || ports.contains(port) {
            continue;
        }
        ports.push(port.clone());
    }
    ports
}

// separate searches per direction, they may cross different devices
#[derive(Clone,Debug,PartialEq)]
pub struct NetworkPath {
    pub direction_ab:Vec<DirectionalPort>,
    pub direction_ba:Vec<DirectionalPort>,
}

impl NetworkPath {
    pub fn condensed_ab(&self) -> Vec<DeviceId> {
        condense_path(&self.direction_ab)
    }
    pub fn condensed_ba(&self) -> Vec<DeviceId> {
        condense_path(&self.direction_ba)
    }
    // non terminal devices of both directions, a->b order first
    pub fn devices(&self,network:&Network) -> Vec<DeviceId> {
        let mut devices:Vec<DeviceId> = Vec::new();
        for id in self.condensed_ab().into_iter().chain(self.condensed_ba()) {
            let is_terminal = network.device_by_id(id).is_none_or(|device| device.is_terminal_point());
            if !is_terminal && !devices.contains(&id) {
                devices.push(id);
            }
        }
        devices
    }
    pub fn ports(&self,network:&Network) -> Vec<DirectionalPort> {
        let mut all = ports(network.devices(), &self.direction_ab);
        for port in ports(network.devices(), &self.direction_ba) {
            if !all.contains(&port) {
                all.push(port);
            }
        }
        all
    }
    // occupancy over the devices the light path crosses
    pub fn spectrum_occupancy(&self,network:&Network) -> SpectrumOccupancy {
        let devices:Vec<&Device> = self.devices(network).into_iter()
            .filter_map(|id| network.device_by_id(id))
            .collect();
        spectrum_occupancy(devices)
    }
    // "TP1:C:TX -> AD1:C1:RX -> ..."
    pub fn describe(&self,network:&Network) -> (String,String) {
        let describe = |path:&[DirectionalPort]| {
            path.iter().map(|port| network.port_label(port)).collect::<Vec<_>>().join(" -> ")
        };
        (describe(&self.direction_ab),describe(&self.direction_ba))
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::optical_network::device::Direction;

    fn port(device:usize,name:&str,direction:Direction) -> DirectionalPort {
        DirectionalPort::new(DeviceId(device), name, direction)
    }

    #[test]
    fn test_condense_keeps_non_adjacent_repeats() {
        assert_eq!(condense([1,1,2,2,2,3,1,1]),vec![1,2,3,1]);
        assert!(condense(Vec::<u8>::new()).is_empty());
    }
    #[test]
    fn test_condense_idempotent() {
        let mut rng = rand::rng();
        for _ in 0..32 {
            let len = rng.random_range(0..64);
            let path:Vec<DirectionalPort> = (0..len)
                .map(|_| port(rng.random_range(0..4), "E1", Direction::Tx))
                .collect();
            let once = condense_path(&path);
            assert_eq!(condense(once.clone()),once);
            assert!(once.windows(2).all(|w| w[0] != w[1]));
        }
    }
    #[test]
    fn test_condense_without_repeats_is_identity() {
        let path = vec![
            port(0, "C", Direction::Tx),
            port(1, "C1", Direction::Rx),
            port(2, "E1", Direction::Rx),
            port(3, "C", Direction::Rx),
        ];
        assert_eq!(condense_path(&path),vec![DeviceId(0),DeviceId(1),DeviceId(2),DeviceId(3)]);
        assert_eq!(condense_ports(&path).len(),4);
    }
    #[test]
    fn test_condense_ports_first_wins() {
        let path = vec![
            port(0, "C", Direction::Tx),
            port(1, "C1", Direction::Rx),
            port(1, "E1", Direction::Tx),
            port(2, "E1", Direction::Rx),
        ];
        let condensed = condense_ports(&path);
        assert_eq!(condensed.len(),3);
        assert_eq!(condensed[1].port,"C1");
    }
    #[test]
    fn test_ports_skip_terminal_points() {
        let devices = vec![Device::terminal_point("TP1"),Device::add_drop("AD1")];
        let path = vec![
            port(0, "C", Direction::Tx),
            port(1, "C1", Direction::Rx),
            port(1, "E1", Direction::Tx),
            port(1, "C1", Direction::Rx),
        ];
        let ports = ports(&devices, &path);
        assert_eq!(ports,vec![port(1, "C1", Direction::Rx),port(1, "E1", Direction::Tx)]);
    }
}
