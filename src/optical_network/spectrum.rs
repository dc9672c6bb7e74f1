use lazy_static::lazy_static;

// all frequencies in GHz
pub type FreqGHZ = f64;

// C band grid the devices operate on
const LOWER_BOUND:FreqGHZ = 191_325.0;
const UPPER_BOUND:FreqGHZ = 196_125.0;
// channel names are (center - offset)/100
const NAME_OFFSET:FreqGHZ = 190_000.0;

#[derive(Clone,Copy,Debug,PartialEq)]
pub struct Spectrum {
    pub lower_bound:FreqGHZ,
    pub upper_bound:FreqGHZ,
    pub name_offset:FreqGHZ,
}

impl Spectrum {
    // one slot per GHz
    pub fn bandwidth(&self) -> usize {
        (self.upper_bound - self.lower_bound) as usize
    }
    pub fn contains(&self,lower:FreqGHZ,upper:FreqGHZ) -> bool {
        lower >= self.lower_bound && upper <= self.upper_bound
    }
    // zero based slot index of a GHz slot, None outside of the spectrum
    pub fn slot_index(&self,slot:i64) -> Option<usize> {
        let index = slot - self.lower_bound as i64;
        if index < 0 || index as usize >= self.bandwidth() {
            return None;
        }
        Some(index as usize)
    }
}

lazy_static! {
    pub static ref SPECTRUM:Spectrum = {
        let spectrum = Spectrum {
            lower_bound:LOWER_BOUND,
            upper_bound:UPPER_BOUND,
            name_offset:NAME_OFFSET,
        };
        assert!(spectrum.lower_bound < spectrum.upper_bound);
        assert_eq!(spectrum.bandwidth(),4_800);
        spectrum
    };
}
