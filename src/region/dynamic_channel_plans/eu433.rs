//! EU433 region support (433.05..434.79 MHz).
use super::*;
use lora_modulation::{Bandwidth, SpreadingFactor};

pub(crate) type EU433 = DynamicChannelPlan<EU433Region>;

#[derive(Debug, Default, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct EU433Region;

const DATARATES: [Option<Datarate>; 8] = [
    Some(Datarate::lora(SpreadingFactor::_12, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_11, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_10, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_9, Bandwidth::_125KHz, 115, 115)),
    Some(Datarate::lora(SpreadingFactor::_8, Bandwidth::_125KHz, 242, 242)),
    Some(Datarate::lora(SpreadingFactor::_7, Bandwidth::_125KHz, 242, 242)),
    Some(Datarate::lora(SpreadingFactor::_7, Bandwidth::_250KHz, 242, 242)),
    Some(Datarate::fsk(50, 242)),
];

impl ChannelRegion for EU433Region {
    fn datarates() -> &'static [Option<Datarate>] {
        &DATARATES
    }
}

impl DynamicChannelRegion for EU433Region {
    const NUM_DEFAULT_CHANNELS: u8 = 3;
    const BANDS: &'static [Band] = &[Band::new(100, 0)];
    const TX_MAX_DR: DR = DR::_7;
    const RX_MAX_DR: DR = DR::_7;
    const MIN_TX_POWER: u8 = 5;
    const DEFAULT_MAX_EIRP: f32 = 12.15;
    const DUTY_CYCLE_ENABLED: bool = true;
    const RX_WND_2_FREQ: u32 = 434_665_000;
    const BEACON_FREQ: u32 = 434_665_000;

    fn init_channels(channels: &mut [Channel]) {
        channels[0] = Channel::new(433_175_000, DR::_0, DR::_5, 0);
        channels[1] = Channel::new(433_375_000, DR::_0, DR::_5, 0);
        channels[2] = Channel::new(433_575_000, DR::_0, DR::_5, 0);
    }

    fn band(frequency: u32) -> Option<u8> {
        (433_175_000..=434_665_000).contains(&frequency).then_some(0)
    }
}
