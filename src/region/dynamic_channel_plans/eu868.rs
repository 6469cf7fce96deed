/// EU868 region support (863..870 MHz)
///
/// The sub-bands of the ETSI EN 300 220 regulation map to six duty-cycle bands, from 0.1 % to
/// 10 %. DR0..DR7 are supported, DR8..DR11 (LR-FHSS) are not.
use super::*;
use lora_modulation::{Bandwidth, SpreadingFactor};

pub(crate) type EU868 = DynamicChannelPlan<EU868Region>;

#[derive(Debug, Default, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct EU868Region;

const BANDS: [Band; 6] = [
    Band::new(100, 0),  // 865.0 - 868.0 MHz, 1 %
    Band::new(100, 0),  // 868.0 - 868.6 MHz, 1 %
    Band::new(1000, 0), // 868.7 - 869.2 MHz, 0.1 %
    Band::new(10, 0),   // 869.4 - 869.65 MHz, 10 %
    Band::new(100, 0),  // 869.7 - 870.0 MHz, 1 %
    Band::new(1000, 0), // 863.0 - 865.0 MHz, 0.1 %
];

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

impl ChannelRegion for EU868Region {
    fn datarates() -> &'static [Option<Datarate>] {
        &DATARATES
    }
}

impl DynamicChannelRegion for EU868Region {
    const NUM_DEFAULT_CHANNELS: u8 = 3;
    const BANDS: &'static [Band] = &BANDS;
    const TX_MAX_DR: DR = DR::_7;
    const RX_MAX_DR: DR = DR::_7;
    const MIN_TX_POWER: u8 = 7;
    const DEFAULT_MAX_EIRP: f32 = 16.0;
    const DUTY_CYCLE_ENABLED: bool = true;
    const RX_WND_2_FREQ: u32 = 869_525_000;
    const BEACON_FREQ: u32 = 869_525_000;

    fn init_channels(channels: &mut [Channel]) {
        channels[0] = Channel::new(868_100_000, DR::_0, DR::_5, 1);
        channels[1] = Channel::new(868_300_000, DR::_0, DR::_5, 1);
        channels[2] = Channel::new(868_500_000, DR::_0, DR::_5, 1);
    }

    fn band(frequency: u32) -> Option<u8> {
        match frequency {
            865_000_000..=868_000_000 => Some(0),
            868_000_001..=868_600_000 => Some(1),
            868_700_000..=869_200_000 => Some(2),
            869_400_000..=869_650_000 => Some(3),
            869_700_000..=870_000_000 => Some(4),
            863_000_000..=864_999_999 => Some(5),
            _ => None,
        }
    }

    fn join_datarate(trials: u16) -> Option<DR> {
        Some(join_datarate_schedule(trials))
    }
}
