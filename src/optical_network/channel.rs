use std::fmt::Display;
use std::ops::Range;

use rand::Rng;

use super::error::{ConfigurationError, Result};
use super::spectrum::{FreqGHZ, SPECTRUM};

// channels on the random grid start on multiples of this
const RANDOM_GRID_STEP:FreqGHZ = 25.0;

// a wavelength band, always inside SPECTRUM
// immutable after construction
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct Channel {
    lower_frequency:FreqGHZ,
    upper_frequency:FreqGHZ,
}

// rounds to MHz, so 191.325 THz * 1e3 lands on 191325 GHz exactly
fn to_mhz_resolution(freq:FreqGHZ) -> FreqGHZ {
    (freq*1e3).round()/1e3
}

impl Channel {
    // THz, GHz or MHz in, exactly one scaling step before the spectrum check
    pub fn new(lower_frequency:f64,upper_frequency:f64) -> Result<Self> {
        if !lower_frequency.is_finite() || !upper_frequency.is_finite()
            || lower_frequency >= upper_frequency {
            return Err(ConfigurationError::InvalidChannel {
                lower: lower_frequency, upper: upper_frequency
            });
        }

        let (lower,upper) = if lower_frequency < SPECTRUM.lower_bound {
            (to_mhz_resolution(lower_frequency*1e3),to_mhz_resolution(upper_frequency*1e3))
        } else if upper_frequency > SPECTRUM.upper_bound {
            (to_mhz_resolution(lower_frequency/1e3),to_mhz_resolution(upper_frequency/1e3))
        } else {
            (lower_frequency,upper_frequency)
        };

        // MHz rounding can collapse a very narrow band
        if lower >= upper {
            return Err(ConfigurationError::InvalidChannel {lower, upper});
        }
        if !SPECTRUM.contains(lower, upper) {
            return Err(ConfigurationError::ChannelOutOfSpectrum {
                lower, upper,
                spectrum_lower: SPECTRUM.lower_bound,
                spectrum_upper: SPECTRUM.upper_bound
            });
        }

        Ok(Self {lower_frequency:lower,upper_frequency:upper})
    }
    pub fn lower_frequency(&self) -> FreqGHZ {
        self.lower_frequency
    }
    pub fn upper_frequency(&self) -> FreqGHZ {
        self.upper_frequency
    }
    pub fn bandwidth(&self) -> FreqGHZ {
        self.upper_frequency - self.lower_frequency
    }
    pub fn center(&self) -> FreqGHZ {
        self.lower_frequency + self.bandwidth()/2.0
    }
    // "13.5 (50GHz)" for 191325..191375
    pub fn name(&self) -> String {
        let label = (self.center() - SPECTRUM.name_offset)/100.0;
        format!("{label} ({}GHz)",self.bandwidth())
    }
    // integer GHz slots the channel touches, half open
    pub fn frequency_band(&self) -> Range<i64> {
        (self.lower_frequency.floor() as i64)..(self.upper_frequency.ceil() as i64)
    }
    // frequency_band shifted to zero based spectrum indices
    pub fn slot_indices(&self) -> Range<usize> {
        let band = self.frequency_band();
        // both ends are inside the spectrum, checked in new()
        let offset = SPECTRUM.lower_bound as i64;
        ((band.start - offset) as usize)..((band.end - offset) as usize)
    }
    pub fn overlaps(&self,other:&Channel) -> bool {
        self.lower_frequency < other.upper_frequency && other.lower_frequency < self.upper_frequency
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.name())
    }
}

// count channels with a width picked from widths (GHz), placed on a 25 GHz grid
// channels may overlap each other, nothing here checks occupancy
pub fn create_random_channels<R:Rng>(rng:&mut R,count:usize,widths:&[FreqGHZ]) -> Result<Vec<Channel>> {
    if widths.is_empty() {
        return Ok(vec![]);
    }
    let spectrum_width = SPECTRUM.upper_bound - SPECTRUM.lower_bound;
    let mut channels = Vec::with_capacity(count);
    for _ in 0..count {
        let width = widths[rng.random_range(0..widths.len())];
        let positions = ((spectrum_width - width)/RANDOM_GRID_STEP).floor().max(0.0) as usize;
        let lower = SPECTRUM.lower_bound + RANDOM_GRID_STEP*rng.random_range(0..=positions) as f64;
        channels.push(Channel::new(lower, lower + width)?);
    }
    Ok(channels)
}
