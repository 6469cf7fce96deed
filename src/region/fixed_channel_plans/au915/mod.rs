/// AU915 region support (915..928 MHz)
///
/// DR7 (LR-FHSS) is not supported.
use super::*;
use lora_modulation::{Bandwidth, SpreadingFactor};

mod datarates;
use datarates::*;

pub(crate) type AU915 = FixedChannelPlan<AU915Region>;

#[derive(Debug, Default, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct AU915Region;

impl ChannelRegion for AU915Region {
    fn datarates() -> &'static [Option<Datarate>] {
        &DATARATES
    }
}

impl FixedChannelRegion for AU915Region {
    const FIRST_125KHZ_FREQ: u32 = 915_200_000;
    const FIRST_500KHZ_FREQ: u32 = 915_900_000;
    const FREQ_RANGE: (u32, u32) = (915_200_000, 927_800_000);

    const TX_MAX_DR: DR = DR::_6;
    const DEFAULT_DR: DR = DR::_2;
    const DWELL_LIMIT_DR: DR = DR::_2;
    const DEFAULT_UPLINK_DWELL_TIME: bool = true;
    const MAX_RX1_DR_OFFSET: u8 = 5;
    const FIRST_500KHZ_DR: DR = DR::_6;
    const JOIN_DR_125KHZ: DR = DR::_2;
    const JOIN_DR_500KHZ: DR = DR::_6;

    const BEACON_DR: DR = DR::_10;
    const PING_SLOT_DR: DR = DR::_10;

    const TX_PARAM_SETUP: bool = true;

    fn rx1_offsets(dr: DR) -> &'static [i8] {
        match RX1_DR_OFFSETS.get(dr as usize) {
            Some(row) => row,
            None => &[],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::MockRadio;
    use crate::Prng;

    #[test]
    fn channel_frequencies() {
        let plan = AU915::default();
        let channels = &plan.store.group2.channels;
        assert_eq!(channels[0].frequency, 915_200_000);
        assert_eq!(channels[63].frequency, 927_800_000);
        assert_eq!(channels[64].frequency, 915_900_000);
        assert_eq!(channels[71].frequency, 927_100_000);
        assert_eq!(channels[5].dr_range, store::DrRange::new(DR::_0, DR::_5));
        assert_eq!(channels[64].dr_range, store::DrRange::new(DR::_6, DR::_6));
    }

    #[test]
    fn join_alternates_dr2_dr6() {
        let mut plan = AU915::default();
        let drs: heapless::Vec<DR, 9> =
            (0..9).map(|_| plan.alternate_dr(DR::_2, AlternateDrType::Alternate)).collect();
        assert!(drs[..8].iter().all(|&dr| dr == DR::_2));
        assert_eq!(drs[8], DR::_6);

        let mut rng = Prng::new(8);
        let mut radio = MockRadio::default();
        let params = NextChanParams {
            aggr_time_off: 0,
            last_aggr_tx: None,
            datarate: DR::_2,
            joined: false,
            duty_cycle_enabled: false,
            now: 0,
            last_tx_is_join_request: true,
            pkt_len: 23,
        };
        let next = plan.next_channel(&mut rng, &mut radio, &params).unwrap();
        assert!(next.channel < 8);
        let next = plan
            .next_channel(&mut rng, &mut radio, &NextChanParams { datarate: DR::_6, ..params })
            .unwrap();
        assert_eq!(next.channel, 64);
    }

    #[test]
    fn dwell_time() {
        let plan = AU915::default();
        let dwell = plan.get_phy_param(&GetPhyParams::new(PhyAttribute::DefUplinkDwellTime));
        assert_eq!(dwell.as_int(), Some(1));
        assert_eq!(AU915::get_max_payload_length(DR::_2, false, true), 11);
        assert_eq!(AU915::get_max_payload_length(DR::_2, false, false), 51);
        assert!(!plan.verify(Verify::TxDr { datarate: DR::_1, uplink_dwell_time: true }));
        assert!(plan.verify(Verify::TxDr { datarate: DR::_1, uplink_dwell_time: false }));
        assert!(!plan.verify(Verify::TxDr { datarate: DR::_7, uplink_dwell_time: false }));
        assert!(plan.tx_param_setup_req(&TxParamSetupReq {
            uplink_dwell_time: false,
            downlink_dwell_time: false,
            max_eirp: 13,
        }));
    }

    #[test]
    fn rx1_datarate() {
        let plan = AU915::default();
        assert_eq!(plan.apply_dr_offset(false, DR::_6, 0), DR::_13);
        assert_eq!(plan.apply_dr_offset(false, DR::_0, 5), DR::_8);
        assert_eq!(plan.apply_dr_offset(false, DR::_5, 2), DR::_11);
        assert_eq!(plan.apply_dr_offset(false, DR::_8, 0), DR::_0);
        assert_eq!(plan.apply_dr_offset(true, DR::_8, 0), DR::_2);
    }

    #[test]
    fn tx_power_uses_eirp() {
        let plan = AU915::default();
        let mut radio = MockRadio::default();
        let params = TxConfigParams {
            channel: 3,
            datarate: DR::_2,
            tx_power: 1,
            max_eirp: 30.0,
            antenna_gain: 2.15,
            pkt_len: 20,
        };
        let result = plan.tx_config(&mut radio, &params).unwrap();
        assert_eq!(result.tx_power, 1);
        assert_eq!(radio.tx.unwrap().pw, 25);
        assert_eq!(radio.tx.unwrap().rf.frequency, 915_800_000);
    }

    #[test]
    fn sub_band_keeps_full_power() {
        let mut plan = AU915::default();
        let sub_band = ChannelMask::new([0xFF00, 0, 0, 0, 0x0002, 0]);
        assert!(plan.chan_mask_set(&sub_band, ChannelsMaskType::Mask));

        for (channel, datarate) in [(8, DR::_2), (65, DR::_6)] {
            let mut radio = MockRadio::default();
            let params = TxConfigParams {
                channel,
                datarate,
                tx_power: 0,
                max_eirp: 30.0,
                antenna_gain: 2.15,
                pkt_len: 20,
            };
            let result = plan.tx_config(&mut radio, &params).unwrap();
            assert_eq!(result.tx_power, 0);
            assert_eq!(radio.tx.unwrap().pw, 27);
        }
    }
}
