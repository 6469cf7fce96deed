//! AS923 region support (915..928 MHz).
//!
//! The four AS923 channel groups share their parameters and differ by a frequency offset applied
//! to the default channels, the RX2 and the beacon frequencies. AS923-1 in Japan additionally
//! requires listen-before-talk.
use super::*;
use lora_modulation::{Bandwidth, SpreadingFactor};

pub(crate) type AS923_1 = DynamicChannelPlan<AS923Region<0, false>>;
pub(crate) type AS923_1_JP = DynamicChannelPlan<AS923Region<0, true>>;
pub(crate) type AS923_2 = DynamicChannelPlan<AS923Region<-1_800_000, false>>;
pub(crate) type AS923_3 = DynamicChannelPlan<AS923Region<-6_600_000, false>>;
pub(crate) type AS923_4 = DynamicChannelPlan<AS923Region<-5_900_000, false>>;

#[derive(Debug, Default, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct AS923Region<const OFFSET: i32, const LBT_REQUIRED: bool>;

const fn shift(frequency: u32, offset: i32) -> u32 {
    frequency.wrapping_add_signed(offset)
}

const DATARATES: [Option<Datarate>; 8] = [
    Some(Datarate::lora(SpreadingFactor::_12, Bandwidth::_125KHz, 51, 0)),
    Some(Datarate::lora(SpreadingFactor::_11, Bandwidth::_125KHz, 51, 0)),
    Some(Datarate::lora(SpreadingFactor::_10, Bandwidth::_125KHz, 115, 11)),
    Some(Datarate::lora(SpreadingFactor::_9, Bandwidth::_125KHz, 115, 53)),
    Some(Datarate::lora(SpreadingFactor::_8, Bandwidth::_125KHz, 242, 125)),
    Some(Datarate::lora(SpreadingFactor::_7, Bandwidth::_125KHz, 242, 242)),
    Some(Datarate::lora(SpreadingFactor::_7, Bandwidth::_250KHz, 242, 242)),
    Some(Datarate::fsk(50, 242)),
];

/// RX1 datarate by uplink datarate (rows) and RX1 offset (columns). Offsets 6 and 7 raise the
/// datarate.
const RX1_DR_DWELL_0: [[u8; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 1, 2],
    [1, 0, 0, 0, 0, 0, 2, 3],
    [2, 1, 0, 0, 0, 0, 3, 4],
    [3, 2, 1, 0, 0, 0, 4, 5],
    [4, 3, 2, 1, 0, 0, 5, 6],
    [5, 4, 3, 2, 1, 0, 6, 7],
    [6, 5, 4, 3, 2, 1, 7, 7],
    [7, 6, 5, 4, 3, 2, 7, 7],
];

/// Same as [`RX1_DR_DWELL_0`], floored at DR2 while the downlink dwell time is limited.
const RX1_DR_DWELL_1: [[u8; 8]; 8] = [
    [2, 2, 2, 2, 2, 2, 2, 2],
    [2, 2, 2, 2, 2, 2, 2, 3],
    [2, 2, 2, 2, 2, 2, 3, 4],
    [3, 2, 2, 2, 2, 2, 4, 5],
    [4, 3, 2, 2, 2, 2, 5, 6],
    [5, 4, 3, 2, 2, 2, 6, 7],
    [6, 5, 4, 3, 2, 2, 7, 7],
    [7, 6, 5, 4, 3, 2, 7, 7],
];

impl<const OFFSET: i32, const LBT_REQUIRED: bool> ChannelRegion
    for AS923Region<OFFSET, LBT_REQUIRED>
{
    fn datarates() -> &'static [Option<Datarate>] {
        &DATARATES
    }
}

impl<const OFFSET: i32, const LBT_REQUIRED: bool> DynamicChannelRegion
    for AS923Region<OFFSET, LBT_REQUIRED>
{
    const NUM_DEFAULT_CHANNELS: u8 = 2;
    const BANDS: &'static [Band] = &[Band::new(100, 0)];
    const TX_MAX_DR: DR = DR::_7;
    const RX_MAX_DR: DR = DR::_7;
    const DEFAULT_DR: DR = DR::_2;
    const DWELL_LIMIT_DR: DR = DR::_2;
    const DEFAULT_UPLINK_DWELL_TIME: bool = true;
    const DEFAULT_DOWNLINK_DWELL_TIME: bool = true;
    const MAX_RX1_DR_OFFSET: u8 = 7;
    const MIN_TX_POWER: u8 = 7;
    const DEFAULT_MAX_EIRP: f32 = 16.0;
    const DUTY_CYCLE_ENABLED: bool = false;
    const RX_WND_2_FREQ: u32 = shift(923_200_000, OFFSET);
    const RX_WND_2_DR: DR = DR::_2;
    const BEACON_FREQ: u32 = shift(923_400_000, OFFSET);
    const BEACON_FORMAT: BeaconFormat = BeaconFormat { size: 17, rfu1_size: 1, rfu2_size: 0 };
    const LBT: Option<Lbt> = match LBT_REQUIRED {
        true => Some(Lbt { rssi_free_threshold: -80, carrier_sense_time: 5 }),
        false => None,
    };
    const TX_PARAM_SETUP: bool = true;

    fn init_channels(channels: &mut [Channel]) {
        channels[0] = Channel::new(shift(923_200_000, OFFSET), DR::_0, DR::_5, 0);
        channels[1] = Channel::new(shift(923_400_000, OFFSET), DR::_0, DR::_5, 0);
    }

    fn band(frequency: u32) -> Option<u8> {
        (915_000_000..=928_000_000).contains(&frequency).then_some(0)
    }

    fn apply_dr_offset(downlink_dwell_time: bool, dr: DR, offset: u8) -> DR {
        let table = if downlink_dwell_time { &RX1_DR_DWELL_1 } else { &RX1_DR_DWELL_0 };
        let row = table[(dr as usize).min(7)];
        DR::new(row[(offset as usize).min(7)]).unwrap_or(DR::_0)
    }

    fn join_datarate(_trials: u16) -> Option<DR> {
        Some(DR::_2)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn channel_groups_are_shifted() {
        #[cfg(feature = "region-as923-1")]
        {
            let plan = AS923_1::default();
            assert_eq!(plan.store.group2.channels[0].frequency, 923_200_000);
            assert_eq!(plan.store.group2.mask[0], 0b11);
        }
        #[cfg(feature = "region-as923-2")]
        {
            let plan = AS923_2::default();
            assert_eq!(plan.store.group2.channels[0].frequency, 921_400_000);
            assert_eq!(plan.store.group2.channels[1].frequency, 921_600_000);
            let rx2 = plan.get_phy_param(&GetPhyParams::new(PhyAttribute::DefRx2Frequency));
            assert_eq!(rx2.as_int(), Some(921_400_000));
        }
        #[cfg(feature = "region-as923-3")]
        assert_eq!(AS923Region::<-6_600_000, false>::BEACON_FREQ, 916_800_000);
    }

    #[test]
    fn rx1_datarate_tables() {
        type R = AS923Region<0, false>;
        assert_eq!(R::apply_dr_offset(false, DR::_5, 2), DR::_3);
        assert_eq!(R::apply_dr_offset(false, DR::_5, 6), DR::_6);
        assert_eq!(R::apply_dr_offset(true, DR::_3, 3), DR::_2);
        assert_eq!(R::apply_dr_offset(true, DR::_0, 0), DR::_2);
    }

    #[test]
    fn dwell_time_limits_datarates() {
        assert_eq!(AS923Region::<0, false>::get_max_payload_length(DR::_2, false, true), 11);
        assert_eq!(AS923Region::<0, false>::get_max_payload_length(DR::_2, false, false), 115);
    }

    #[cfg(feature = "region-as923-1-jp")]
    #[test]
    fn listen_before_talk_skips_busy_channels() {
        use crate::test_util::MockRadio;
        use crate::Prng;

        let mut plan = AS923_1_JP::default();
        assert_eq!(plan.store.group2.rssi_free_threshold, -80);
        let params = NextChanParams {
            aggr_time_off: 0,
            last_aggr_tx: None,
            datarate: DR::_2,
            joined: true,
            duty_cycle_enabled: false,
            now: 0,
            last_tx_is_join_request: false,
            pkt_len: 20,
        };
        let mut rng = Prng::new(11);

        let mut radio = MockRadio::default();
        radio.busy.push(923_200_000).unwrap();
        let next = plan.next_channel(&mut rng, &mut radio, &params).unwrap();
        assert_eq!(next.channel, 1);

        let mut radio = MockRadio::default();
        radio.busy.push(923_200_000).unwrap();
        radio.busy.push(923_400_000).unwrap();
        assert_eq!(
            plan.next_channel(&mut rng, &mut radio, &params),
            Err(Error::NoFreeChannelFound)
        );
        assert_eq!(radio.sensed.len(), 2);
    }
}
