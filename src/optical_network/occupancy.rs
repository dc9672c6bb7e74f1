use crate::dsa::bitset::BitSet;
use super::channel::Channel;
use super::device::Device;
use super::spectrum::SPECTRUM;

// one bit per GHz slot, index 0 is SPECTRUM.lower_bound
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct SpectrumOccupancy {
    slots:BitSet,
}

impl Default for SpectrumOccupancy {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectrumOccupancy {
    pub fn new() -> Self {
        Self {slots:BitSet::zeroed(SPECTRUM.bandwidth())}
    }
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.occupied_len() == 0
    }
    pub fn occupy(&mut self,channel:&Channel) {
        let slots = channel.slot_indices();
        // channels are inside the spectrum, the range always fits
        let stored = self.slots.store_range(slots.start, slots.end);
        debug_assert!(stored.is_some());
    }
    pub fn union_with(&mut self,other:&SpectrumOccupancy) {
        // both are SPECTRUM.bandwidth() long
        let merged = self.slots.union_with(&other.slots);
        debug_assert!(merged.is_some());
    }
    pub fn is_occupied(&self,slot:usize) -> bool {
        self.slots.get_at(slot).unwrap_or(false)
    }
    // true if no slot of the channel is taken, reported only, never enforced
    pub fn is_free(&self,channel:&Channel) -> bool {
        channel.slot_indices().all(|slot| !self.is_occupied(slot))
    }
    pub fn occupied_len(&self) -> usize {
        self.slots.count_ones()
    }
    // plain array for the spectrum plot
    pub fn to_bools(&self) -> Vec<bool> {
        self.slots.iter().collect()
    }
}

impl From<&Device> for SpectrumOccupancy {
    fn from(device: &Device) -> Self {
        let mut occupancy = Self::new();
        for channel in device.channels() {
            occupancy.occupy(channel);
        }
        occupancy
    }
}

// bits past the spectrum are dropped, missing ones stay free
impl FromIterator<bool> for SpectrumOccupancy {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let len = SPECTRUM.bandwidth();
        let mut slots = BitSet::with_capacity(len);
        for bit in iter.into_iter().take(len) {
            slots.push_bit(bit);
        }
        while slots.len() < len {
            slots.push_bit(false);
        }
        Self {slots}
    }
}

#[cfg(test)]
mod tests {
    use super::SpectrumOccupancy;
    use crate::optical_network::channel::Channel;
    use crate::optical_network::device::Device;

    #[test]
    fn test_device_occupancy() {
        let device = Device::line_degree("LN1").with_channels([
            Channel::new(191_325.0, 191_375.0).unwrap(),
            Channel::new(196_075.0, 196_125.0).unwrap(),
        ]);
        let occupancy = SpectrumOccupancy::from(&device);
        assert_eq!(occupancy.len(),4_800);
        assert_eq!(occupancy.occupied_len(),100);
        assert!(occupancy.is_occupied(0));
        assert!(occupancy.is_occupied(4_799));
        assert!(!occupancy.is_occupied(50));
        assert!(!occupancy.is_occupied(10_000));
        assert!(occupancy.is_free(&Channel::new(191_375.0, 191_425.0).unwrap()));
        assert!(!occupancy.is_free(&Channel::new(191_350.0, 191_400.0).unwrap()));
    }
    #[test]
    fn test_from_bools() {
        let bools = vec![true,false,true];
        let occupancy:SpectrumOccupancy = bools.into_iter().collect();
        assert_eq!(occupancy.len(),4_800);
        assert_eq!(occupancy.occupied_len(),2);
        let round:SpectrumOccupancy = occupancy.to_bools().into_iter().collect();
        assert_eq!(round,occupancy);
        assert!(SpectrumOccupancy::new().is_empty());
    }
}
