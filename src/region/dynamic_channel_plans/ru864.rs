//! RU864 region support (864..870 MHz).
use super::*;
use lora_modulation::{Bandwidth, SpreadingFactor};

pub(crate) type RU864 = DynamicChannelPlan<RU864Region>;

#[derive(Debug, Default, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct RU864Region;

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

impl ChannelRegion for RU864Region {
    fn datarates() -> &'static [Option<Datarate>] {
        &DATARATES
    }
}

impl DynamicChannelRegion for RU864Region {
    const NUM_DEFAULT_CHANNELS: u8 = 2;
    const BANDS: &'static [Band] = &[Band::new(100, 0)];
    const TX_MAX_DR: DR = DR::_7;
    const RX_MAX_DR: DR = DR::_7;
    const MIN_TX_POWER: u8 = 7;
    const DEFAULT_MAX_EIRP: f32 = 16.0;
    const DUTY_CYCLE_ENABLED: bool = true;
    const RX_WND_2_FREQ: u32 = 869_100_000;
    const BEACON_FREQ: u32 = 869_100_000;

    fn init_channels(channels: &mut [Channel]) {
        channels[0] = Channel::new(868_900_000, DR::_0, DR::_5, 0);
        channels[1] = Channel::new(869_100_000, DR::_0, DR::_5, 0);
    }

    fn band(frequency: u32) -> Option<u8> {
        (864_000_000..=870_000_000).contains(&frequency).then_some(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn join_keeps_datarate() {
        let mut plan = RU864::default();
        assert_eq!(plan.alternate_dr(DR::_3, AlternateDrType::Alternate), DR::_3);
        assert_eq!(plan.store.group2.mask[0], 0b11);
        assert!(plan.verify(Verify::DutyCycle(false)));
    }
}
