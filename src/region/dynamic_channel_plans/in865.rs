//! IN865 region support (865..867 MHz).
use super::*;
use lora_modulation::{Bandwidth, SpreadingFactor};

pub(crate) type IN865 = DynamicChannelPlan<IN865Region>;

#[derive(Debug, Default, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct IN865Region;

const DATARATES: [Option<Datarate>; 8] = [
    Some(Datarate::lora(SpreadingFactor::_12, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_11, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_10, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_9, Bandwidth::_125KHz, 115, 115)),
    Some(Datarate::lora(SpreadingFactor::_8, Bandwidth::_125KHz, 242, 242)),
    Some(Datarate::lora(SpreadingFactor::_7, Bandwidth::_125KHz, 242, 242)),
    // DR6 is reserved
    None,
    Some(Datarate::fsk(50, 242)),
];

/// Offsets 6 and 7 raise the RX1 datarate.
const RX1_DR_OFFSETS: [i8; 8] = [0, 1, 2, 3, 4, 5, -1, -2];

impl ChannelRegion for IN865Region {
    fn datarates() -> &'static [Option<Datarate>] {
        &DATARATES
    }
}

impl DynamicChannelRegion for IN865Region {
    const NUM_DEFAULT_CHANNELS: u8 = 3;
    const BANDS: &'static [Band] = &[Band::new(1, 0)];
    const TX_MAX_DR: DR = DR::_7;
    const RX_MAX_DR: DR = DR::_7;
    const MAX_RX1_DR_OFFSET: u8 = 7;
    const MIN_TX_POWER: u8 = 10;
    const DEFAULT_MAX_EIRP: f32 = 30.0;
    const DUTY_CYCLE_ENABLED: bool = false;
    const RX_WND_2_FREQ: u32 = 866_550_000;
    const RX_WND_2_DR: DR = DR::_2;
    const BEACON_FREQ: u32 = 866_550_000;
    const BEACON_DR: DR = DR::_4;
    const BEACON_FORMAT: BeaconFormat = BeaconFormat { size: 19, rfu1_size: 1, rfu2_size: 3 };

    fn init_channels(channels: &mut [Channel]) {
        channels[0] = Channel::new(865_062_500, DR::_0, DR::_5, 0);
        channels[1] = Channel::new(865_402_500, DR::_0, DR::_5, 0);
        channels[2] = Channel::new(865_985_000, DR::_0, DR::_5, 0);
    }

    fn band(frequency: u32) -> Option<u8> {
        (865_000_000..=867_000_000).contains(&frequency).then_some(0)
    }

    fn apply_dr_offset(_downlink_dwell_time: bool, dr: DR, offset: u8) -> DR {
        let offset = RX1_DR_OFFSETS[(offset as usize).min(7)];
        let dr = (dr as i8 - offset).clamp(DR::_0 as i8, DR::_5 as i8);
        DR::new(dr as u8).unwrap_or(DR::_0)
    }
}
