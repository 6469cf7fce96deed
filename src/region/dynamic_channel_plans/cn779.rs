//! CN779 region support (779..787 MHz).
use super::*;
use lora_modulation::{Bandwidth, SpreadingFactor};

pub(crate) type CN779 = DynamicChannelPlan<CN779Region>;

#[derive(Debug, Default, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct CN779Region;

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

impl ChannelRegion for CN779Region {
    fn datarates() -> &'static [Option<Datarate>] {
        &DATARATES
    }
}

impl DynamicChannelRegion for CN779Region {
    const NUM_DEFAULT_CHANNELS: u8 = 3;
    const BANDS: &'static [Band] = &[Band::new(100, 0)];
    const TX_MAX_DR: DR = DR::_7;
    const RX_MAX_DR: DR = DR::_7;
    const MIN_TX_POWER: u8 = 5;
    const DEFAULT_MAX_EIRP: f32 = 12.15;
    const DUTY_CYCLE_ENABLED: bool = true;
    const RX_WND_2_FREQ: u32 = 786_000_000;
    const BEACON_FREQ: u32 = 785_000_000;

    fn init_channels(channels: &mut [Channel]) {
        channels[0] = Channel::new(779_500_000, DR::_0, DR::_5, 0);
        channels[1] = Channel::new(779_700_000, DR::_0, DR::_5, 0);
        channels[2] = Channel::new(779_900_000, DR::_0, DR::_5, 0);
    }

    fn band(frequency: u32) -> Option<u8> {
        (779_000_000..=787_000_000).contains(&frequency).then_some(0)
    }
}
