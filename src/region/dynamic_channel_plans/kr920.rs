//! KR920 region support (920.9..923.3 MHz), with listen-before-talk.
use super::*;
use lora_modulation::{Bandwidth, SpreadingFactor};

pub(crate) type KR920 = DynamicChannelPlan<KR920Region>;

#[derive(Debug, Default, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct KR920Region;

const DATARATES: [Option<Datarate>; 6] = [
    Some(Datarate::lora(SpreadingFactor::_12, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_11, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_10, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_9, Bandwidth::_125KHz, 115, 115)),
    Some(Datarate::lora(SpreadingFactor::_8, Bandwidth::_125KHz, 242, 242)),
    Some(Datarate::lora(SpreadingFactor::_7, Bandwidth::_125KHz, 242, 242)),
];

const MAX_EIRP_LOW: f32 = 10.0;
const MAX_EIRP_HIGH: f32 = 14.0;
/// Channels from this frequency up may use [`MAX_EIRP_HIGH`].
const HIGH_POWER_FREQ: u32 = 922_100_000;

const FIRST_CHANNEL_FREQ: u32 = 920_900_000;
const LAST_CHANNEL_FREQ: u32 = 923_300_000;
const CHANNEL_SPACING: u32 = 200_000;

impl ChannelRegion for KR920Region {
    fn datarates() -> &'static [Option<Datarate>] {
        &DATARATES
    }
}

impl DynamicChannelRegion for KR920Region {
    const NUM_DEFAULT_CHANNELS: u8 = 3;
    const BANDS: &'static [Band] = &[Band::new(1, 0)];
    const TX_MAX_DR: DR = DR::_5;
    const RX_MAX_DR: DR = DR::_5;
    const MIN_TX_POWER: u8 = 7;
    const DEFAULT_MAX_EIRP: f32 = MAX_EIRP_HIGH;
    const DUTY_CYCLE_ENABLED: bool = false;
    const MAX_RX_WINDOW: u32 = 4000;
    const RX_WND_2_FREQ: u32 = 921_900_000;
    const BEACON_FREQ: u32 = 923_100_000;
    const BEACON_FORMAT: BeaconFormat = BeaconFormat { size: 17, rfu1_size: 1, rfu2_size: 0 };
    const LBT: Option<Lbt> = Some(Lbt { rssi_free_threshold: -65, carrier_sense_time: 6 });

    fn init_channels(channels: &mut [Channel]) {
        channels[0] = Channel::new(922_100_000, DR::_0, DR::_5, 0);
        channels[1] = Channel::new(922_300_000, DR::_0, DR::_5, 0);
        channels[2] = Channel::new(922_500_000, DR::_0, DR::_5, 0);
    }

    fn band(frequency: u32) -> Option<u8> {
        let in_range = (FIRST_CHANNEL_FREQ..=LAST_CHANNEL_FREQ).contains(&frequency);
        (in_range && (frequency - FIRST_CHANNEL_FREQ) % CHANNEL_SPACING == 0).then_some(0)
    }

    fn max_eirp(frequency: u32, max_eirp: f32) -> f32 {
        let ceiling = if frequency >= HIGH_POWER_FREQ { MAX_EIRP_HIGH } else { MAX_EIRP_LOW };
        max_eirp.min(ceiling)
    }

    fn join_datarate(trials: u16) -> Option<DR> {
        Some(join_datarate_schedule(trials))
    }
}
