// per device media channel configuration for a light path
// the documents are handed over to whoever writes them, nothing is written here

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use super::channel::Channel;
use super::device::{Device, DeviceId, Direction, DirectionalPort, PowerDBM};
use super::network::Network;
use super::occupancy::SpectrumOccupancy;
use super::path::{condense_path, ports, NetworkPath};

pub const CHANNEL_PLAN_DOCUMENT:&str = "channel-plan";

#[derive(Clone,Debug,PartialEq,Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChannelPlanEntry {
    pub name:String,
    pub lower_frequency:f64,
    pub upper_frequency:f64,
}

#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct ChannelPlan {
    pub channel:Vec<ChannelPlanEntry>,
}

#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct ChannelPlanDocument {
    #[serde(rename = "channel-plan")]
    pub channel_plan:ChannelPlan,
}

#[derive(Clone,Debug,Default,PartialEq,Serialize)]
pub struct PortSelection {
    pub port:Option<String>,
}

// unset values serialize as null
#[derive(Clone,Debug,Default,PartialEq,Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MediaChannelPower {
    pub common_in:Option<PowerDBM>,
    pub common_out:Option<PowerDBM>,
    pub leaf_in:Option<PowerDBM>,
    pub leaf_out:Option<PowerDBM>,
}

#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct MediaChannel {
    pub channel:String,
    pub add:PortSelection,
    pub drop:PortSelection,
    pub power:MediaChannelPower,
}

impl MediaChannel {
    pub fn new(channel:&Channel) -> Self {
        Self {
            channel:channel.name(),
            add:PortSelection::default(),
            drop:PortSelection::default(),
            power:MediaChannelPower::default(),
        }
    }

    // leaf RX is the add port, leaf TX the drop port, a missing reading never clears a value
    pub fn apply_port(&mut self,device:&Device,port:&DirectionalPort) {
        let power = if device.is_leaf_port(&port.port) {
            match port.direction {
                Direction::Rx => {
                    self.add.port = Some(port.port.clone());
                    &mut self.power.leaf_in
                },
                Direction::Tx => {
                    self.drop.port = Some(port.port.clone());
                    &mut self.power.leaf_out
                },
            }
        } else {
            match port.direction {
                Direction::Rx => &mut self.power.common_in,
                Direction::Tx => &mut self.power.common_out,
            }
        };
        if let Some(reading) = port.power {
            *power = Some(reading);
        }
    }
}

#[derive(Clone,Debug,PartialEq,Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeviceConfiguration {
    pub media_channels:Vec<MediaChannel>,
}

#[derive(Clone,Debug,PartialEq)]
pub struct Configuration {
    pub channel_plan:ChannelPlanDocument,
    // device name -> its document
    pub devices:BTreeMap<String,DeviceConfiguration>,
}

impl Configuration {
    // (file name, pretty json), one per device plus the channel plan
    pub fn documents(&self) -> serde_json::Result<Vec<(String,String)>> {
        let mut documents = Vec::with_capacity(self.devices.len() + 1);
        for (name,configuration) in self.devices.iter() {
            documents.push((format!("{name}.json"),serde_json::to_string_pretty(configuration)?));
        }
        documents.push((
            format!("{CHANNEL_PLAN_DOCUMENT}.json"),
            serde_json::to_string_pretty(&self.channel_plan)?,
        ));
        Ok(documents)
    }
}

pub struct ConfigurationBuilder<'a> {
    network:&'a Network,
    channel:Channel,
}

impl<'a> ConfigurationBuilder<'a> {
    pub fn new(network:&'a Network,channel:Channel) -> Self {
        Self {network,channel}
    }
    pub fn channel_plan(&self) -> ChannelPlanDocument {
        ChannelPlanDocument {
            channel_plan:ChannelPlan {
                channel:vec![ChannelPlanEntry {
                    name:self.channel.name(),
                    lower_frequency:self.channel.lower_frequency(),
                    upper_frequency:self.channel.upper_frequency(),
                }]
            }
        }
    }
    // both directions of the light path
    pub fn build(&self,path:&NetworkPath) -> Configuration {
        self.build_from(path.devices(self.network), path.ports(self.network))
    }
    // a single direction, e.g. for a unidirectional channel
    pub fn build_one_way(&self,path:&[DirectionalPort]) -> Configuration {
        let devices = condense_path(path).into_iter()
            .filter(|id| self.network.device_by_id(*id).is_some_and(|device| !device.is_terminal_point()))
            .collect();
        self.build_from(devices, ports(self.network.devices(), path))
    }
    fn build_from(&self,devices:Vec<DeviceId>,ports:Vec<DirectionalPort>) -> Configuration {
        let mut media_channels:BTreeMap<DeviceId,MediaChannel> = devices.into_iter()
            .map(|id| (id,MediaChannel::new(&self.channel)))
            .collect();
        for port in ports.iter() {
            let (Some(device),Some(media_channel)) =
                (self.network.device_by_id(port.device),media_channels.get_mut(&port.device)) else {
                continue;
            };
            // only the owning device's configuration is touched
            media_channel.apply_port(device, port);
        }
        let devices:BTreeMap<String,DeviceConfiguration> = media_channels.into_iter()
            .filter_map(|(id,media_channel)| {
                let device = self.network.device_by_id(id)?;
                Some((device.name().to_owned(),DeviceConfiguration {media_channels:vec![media_channel]}))
            })
            .collect();
        info!(channel = %self.channel, devices = devices.len(), ports = ports.len(), "built media channel configuration");
        Configuration {channel_plan:self.channel_plan(),devices}
    }
}

// OR of every device's channel bands, order of devices doesn't matter
pub fn spectrum_occupancy<'d>(devices:impl IntoIterator<Item = &'d Device>) -> SpectrumOccupancy {
    let mut occupancy = SpectrumOccupancy::new();
    for device in devices {
        occupancy.union_with(&SpectrumOccupancy::from(device));
    }
    occupancy
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::optical_network::channel::create_random_channels;

    fn channel() -> Channel {
        Channel::new(191_325_000.0, 191_375_000.0).unwrap()
    }

    #[test]
    fn test_leaf_ports_select_add_and_drop() {
        let mut add_drop = Device::add_drop("AD1");
        add_drop.set_port_power("C1", Direction::Rx, -2.0).unwrap();
        add_drop.set_port_power("E1", Direction::Tx, 1.5).unwrap();
        let id = DeviceId(0);
        let mut media_channel = MediaChannel::new(&channel());
        for (port,direction) in [("C1",Direction::Rx),("E1",Direction::Tx),("E1",Direction::Rx),("C1",Direction::Tx)] {
            media_channel.apply_port(&add_drop, &DirectionalPort::of(id, &add_drop, port, direction));
        }
        assert_eq!(media_channel.channel,"13.5 (50GHz)");
        assert_eq!(media_channel.add.port.as_deref(),Some("C1"));
        assert_eq!(media_channel.drop.port.as_deref(),Some("C1"));
        assert_eq!(media_channel.power,MediaChannelPower {
            common_in:None, common_out:Some(1.5), leaf_in:Some(-2.0), leaf_out:None
        });
    }
    #[test]
    fn test_line_degree_leaf_is_express() {
        let line = Device::line_degree("LN1");
        let id = DeviceId(0);
        let mut media_channel = MediaChannel::new(&channel());
        media_channel.apply_port(&line, &DirectionalPort::new(id, "E2", Direction::Rx));
        media_channel.apply_port(&line, &DirectionalPort::new(id, "LINE", Direction::Tx));
        assert_eq!(media_channel.add.port.as_deref(),Some("E2"));
        assert_eq!(media_channel.drop.port,None);
    }
    #[test]
    fn test_missing_reading_keeps_value() {
        let mut line = Device::line_degree("LN1");
        line.set_port_power("LINE", Direction::Rx, -20.0).unwrap();
        let id = DeviceId(0);
        let mut media_channel = MediaChannel::new(&channel());
        media_channel.apply_port(&line, &DirectionalPort::of(id, &line, "LINE", Direction::Rx));
        media_channel.apply_port(&line, &DirectionalPort::new(id, "LINE", Direction::Rx));
        assert_eq!(media_channel.power.common_in,Some(-20.0));
    }
    #[test]
    fn test_media_channel_json_shape() {
        let media_channel = MediaChannel::new(&channel());
        let json = serde_json::to_value(DeviceConfiguration {media_channels:vec![media_channel]}).unwrap();
        assert_eq!(json,serde_json::json!({
            "media-channels":[{
                "channel":"13.5 (50GHz)",
                "add":{"port":null},
                "drop":{"port":null},
                "power":{"common-in":null,"common-out":null,"leaf-in":null,"leaf-out":null}
            }]
        }));
    }
    #[test]
    fn test_occupancy_order_independent() {
        let mut rng = rand::rng();
        let devices:Vec<Device> = (0..rng.random_range(2..6))
            .map(|i| Device::line_degree(format!("LN{i}"))
                .with_channels(create_random_channels(&mut rng, 4, &[50.0,100.0]).unwrap()))
            .collect();
        let forward = spectrum_occupancy(devices.iter());
        let backward = spectrum_occupancy(devices.iter().rev());
        assert_eq!(forward,backward);
        for device in devices.iter() {
            for channel in device.channels() {
                assert!(!forward.is_free(channel));
            }
        }
        assert!(spectrum_occupancy(std::iter::empty()).is_empty());
    }
}
