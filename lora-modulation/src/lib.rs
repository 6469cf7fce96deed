#![cfg_attr(not(test), no_std)]

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Channel width.
pub enum Bandwidth {
    _125KHz,
    _250KHz,
    _500KHz,
}

impl Bandwidth {
    pub const fn hz(self) -> u32 {
        match self {
            Bandwidth::_125KHz => 125_000,
            Bandwidth::_250KHz => 250_000,
            Bandwidth::_500KHz => 500_000,
        }
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Controls the chirp rate. Lower values are slower bandwidth, but more robust.
pub enum SpreadingFactor {
    _5,
    _6,
    _7,
    _8,
    _9,
    _10,
    _11,
    _12,
}

impl SpreadingFactor {
    pub const fn factor(self) -> u32 {
        match self {
            SpreadingFactor::_5 => 5,
            SpreadingFactor::_6 => 6,
            SpreadingFactor::_7 => 7,
            SpreadingFactor::_8 => 8,
            SpreadingFactor::_9 => 9,
            SpreadingFactor::_10 => 10,
            SpreadingFactor::_11 => 11,
            SpreadingFactor::_12 => 12,
        }
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Controls the forward error correction. Higher values are more robust, but reduces the ratio
/// of actual data in transmissions.
pub enum CodingRate {
    _4_5,
    _4_6,
    _4_7,
    _4_8,
}

impl CodingRate {
    /// Denominator of the rate, minus 4 (ie: 1 for 4/5, 4 for 4/8)
    pub const fn denom(self) -> u32 {
        match self {
            CodingRate::_4_5 => 1,
            CodingRate::_4_6 => 2,
            CodingRate::_4_7 => 3,
            CodingRate::_4_8 => 4,
        }
    }
}

/// LoRa base-band parameters: everything needed to compute symbol timing and time-on-air.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseBandModulationParams {
    pub sf: SpreadingFactor,
    pub bw: Bandwidth,
    pub cr: CodingRate,
    /// Low data-rate optimization
    pub ldro: bool,
}

impl BaseBandModulationParams {
    /// Create the parameters, enabling low data-rate optimization when a symbol lasts 16 ms or
    /// more (SF11/SF12 at 125 kHz, SF12 at 250 kHz).
    pub const fn new(sf: SpreadingFactor, bw: Bandwidth, cr: CodingRate) -> Self {
        let ldro = matches!(
            (sf, bw),
            (SpreadingFactor::_11, Bandwidth::_125KHz)
                | (SpreadingFactor::_12, Bandwidth::_125KHz)
                | (SpreadingFactor::_12, Bandwidth::_250KHz)
        );
        Self { sf, bw, cr, ldro }
    }

    /// Duration of a single symbol in microseconds.
    pub const fn symbol_time_us(&self) -> u32 {
        (1u32 << self.sf.factor()) * 1_000_000 / self.bw.hz()
    }

    /// Time-on-air in microseconds of a frame with `length` bytes of payload, CRC enabled.
    pub fn time_on_air_us(&self, preamble: u16, explicit_header: bool, length: u8) -> u32 {
        let sf = self.sf.factor() as i64;
        let mut numerator = ((length as i64) << 3) + 16 - 4 * sf;
        if explicit_header {
            numerator += 20;
        }
        let mut preamble = preamble as i64;
        let denominator = if sf <= 6 {
            // SF5/SF6 require a 12 symbols preamble
            preamble = preamble.max(12);
            4 * sf
        } else {
            numerator += 8;
            if self.ldro {
                4 * (sf - 2)
            } else {
                4 * sf
            }
        };
        let numerator = numerator.max(0);

        let payload_symbols = (numerator + denominator - 1) / denominator;
        let mut symbols = payload_symbols * (self.cr.denom() as i64 + 4) + preamble + 12;
        if sf <= 6 {
            symbols += 2;
        }

        // (symbols + 0.25) symbols, each lasting 2^sf / bw seconds
        let chips = ((4 * symbols + 1) as u64) << (sf as u64 - 2);
        let bw = self.bw.hz() as u64;
        ((chips * 1_000_000 + bw - 1) / bw) as u32
    }

    /// Time-on-air in milliseconds (rounded up), as used for duty-cycle accounting.
    pub fn time_on_air_ms(&self, preamble: u16, explicit_header: bool, length: u8) -> u32 {
        self.time_on_air_us(preamble, explicit_header, length).div_ceil(1000)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn params(sf: SpreadingFactor, bw: Bandwidth) -> BaseBandModulationParams {
        BaseBandModulationParams::new(sf, bw, CodingRate::_4_5)
    }

    #[test]
    fn symbol_time() {
        let p = params(SpreadingFactor::_12, Bandwidth::_125KHz);
        assert_eq!(p.symbol_time_us(), 32_768);
        let p = params(SpreadingFactor::_7, Bandwidth::_500KHz);
        assert_eq!(p.symbol_time_us(), 256);
    }

    #[test]
    fn ldro_selection() {
        assert!(params(SpreadingFactor::_11, Bandwidth::_125KHz).ldro);
        assert!(!params(SpreadingFactor::_10, Bandwidth::_125KHz).ldro);
        assert!(!params(SpreadingFactor::_12, Bandwidth::_500KHz).ldro);
    }

    #[test]
    fn time_on_air_sf7() {
        // 13 bytes, SF7/125 kHz, CR 4/5, 8 symbols preamble: 46.336 ms
        let p = params(SpreadingFactor::_7, Bandwidth::_125KHz);
        assert_eq!(p.time_on_air_us(8, true, 13), 46_336);
        assert_eq!(p.time_on_air_ms(8, true, 13), 47);
    }

    #[test]
    fn time_on_air_sf12() {
        // 51 bytes, SF12/125 kHz, CR 4/5: 2465.792 ms
        let p = params(SpreadingFactor::_12, Bandwidth::_125KHz);
        assert_eq!(p.time_on_air_us(8, true, 51), 2_465_792);
    }
}
