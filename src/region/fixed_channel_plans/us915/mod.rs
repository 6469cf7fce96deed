/// US915 region support (902..928 MHz)
///
/// US902-928 end-devices SHALL support one of the two following data rate options:
/// 1. DR0 to DR4 and DR8 to DR13 (minimum set supported for certification)
/// 2. DR0 to DR13 (all data rates implemented)
///
/// DR5 and DR6 (LR-FHSS) are not supported.
use super::*;
use lora_modulation::{Bandwidth, SpreadingFactor};

mod datarates;
use datarates::*;

/// Max conducted power, antenna gain is not taken into account.
const MAX_ERP: f32 = 30.0;

pub(crate) type US915 = FixedChannelPlan<US915Region>;

#[derive(Debug, Default, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct US915Region;

impl ChannelRegion for US915Region {
    fn datarates() -> &'static [Option<Datarate>] {
        &DATARATES
    }
}

impl FixedChannelRegion for US915Region {
    const FIRST_125KHZ_FREQ: u32 = 902_300_000;
    const FIRST_500KHZ_FREQ: u32 = 903_000_000;
    const FREQ_RANGE: (u32, u32) = (902_300_000, 927_500_000);

    const TX_MAX_DR: DR = DR::_4;
    const DEFAULT_DR: DR = DR::_0;
    const MAX_RX1_DR_OFFSET: u8 = 3;
    const FIRST_500KHZ_DR: DR = DR::_4;
    const JOIN_DR_125KHZ: DR = DR::_0;
    const JOIN_DR_500KHZ: DR = DR::_4;

    const BEACON_DR: DR = DR::_8;

    const FCC_POWER_LIMIT: bool = true;

    fn rx1_offsets(dr: DR) -> &'static [i8] {
        match RX1_DR_OFFSETS.get(dr as usize) {
            Some(row) => row,
            None => &[],
        }
    }

    fn tx_power_dbm(tx_power: u8, _max_eirp: f32, _antenna_gain: f32) -> i8 {
        common::compute_tx_power(tx_power, MAX_ERP, 0.0)
    }
}
