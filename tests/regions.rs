#![cfg(all(
    feature = "region-eu868",
    feature = "region-us915",
    feature = "region-cn470",
    feature = "region-as923-1",
    feature = "region-as923-1-jp",
    feature = "region-as923-2"
))]

mod common;
use common::*;

use lorawan_region::mac_commands::NewChannelReq;
use lorawan_region::region::store::{ChannelMask, DrRange};
use lorawan_region::region::{
    ApplyCfListParams, GetPhyParams, PhyAttribute, PhyValue, RxConfigParams, RxSlot,
    TxConfigParams,
};
use lorawan_region::{Configuration, Error, Region, DR};

fn rx1(channel: u8, datarate: DR) -> RxConfigParams {
    RxConfigParams {
        channel,
        datarate,
        frequency: 0,
        rx_slot: RxSlot::Window1,
        window_timeout: 8,
        rx_continuous: false,
        repeater_support: false,
        downlink_dwell_time: false,
    }
}

#[test]
fn eu868_join_then_cf_list() {
    let mut configuration = Configuration::new(Region::EU868);
    let mut radio = MockRadio::default();
    let mut rng = rng();

    for _ in 0..20 {
        let next = configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_0, false));
        assert!(next.unwrap().channel < 3);
    }

    let frequencies = [867_100_000, 867_300_000, 867_500_000, 867_700_000, 867_900_000];
    configuration.apply_cf_list(&ApplyCfListParams::new(&cf_list(&frequencies), 0));
    assert_eq!(configuration.store().group2.mask.count(0, 1), 8);
    let value = configuration.get_phy_param(&GetPhyParams::new(PhyAttribute::Channels));
    let PhyValue::Channels(channels) = value else {
        panic!("no channel table: {value:?}");
    };
    for (channel, &frequency) in channels[3..8].iter().zip(&frequencies) {
        assert_eq!(channel.frequency, frequency);
        assert_eq!(channel.dr_range, DrRange::new(DR::_0, DR::_5));
        assert_eq!(channel.band, 0);
    }
    assert!(!channels[8].is_defined());

    let mut seen = [false; 8];
    for _ in 0..200 {
        let next = configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_5, true));
        seen[usize::from(next.unwrap().channel)] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn eu868_mac_commands() {
    let mut configuration = Configuration::new(Region::EU868);

    let status = configuration
        .new_channel_req(&NewChannelReq {
            channel_id: 3,
            frequency: 867_100_000,
            dr_range: DrRange::new(DR::_0, DR::_5),
        })
        .unwrap();
    assert!(status.is_ok());
    let status = configuration
        .new_channel_req(&NewChannelReq {
            channel_id: 4,
            frequency: 915_000_000,
            dr_range: DrRange::new(DR::_0, DR::_5),
        })
        .unwrap();
    assert!(!status.channel_frequency_ok());
    assert!(status.datarate_range_ok());

    // DR5, power index 2, channels 0, 1 and 3
    let ans = link_adr(&mut configuration, &[[0x03, 0x52, 0x0B, 0x00, 0x01]]);
    assert!(ans.status.is_ok());
    assert_eq!((ans.datarate, ans.tx_power, ans.nb_rep), (DR::_5, 2, 1));
    assert_eq!(configuration.store().group2.mask.words()[0], 0x000B);

    // channel 4 was never defined
    let ans = link_adr(&mut configuration, &[[0x03, 0x52, 0x10, 0x00, 0x01]]);
    assert!(!ans.status.channel_mask_ack());
    assert_eq!(configuration.store().group2.mask.words()[0], 0x000B);
}

#[test]
fn us915_sub_band_selection() {
    let mut configuration = Configuration::new(Region::US915);
    assert_eq!(configuration.store().group2.mask.count(0, 4), 64);

    // all 125 kHz channels off, then channels 8..15
    let ans = link_adr(
        &mut configuration,
        &[[0x03, 0x30, 0x00, 0x00, 0x70], [0x03, 0x30, 0x00, 0xFF, 0x01]],
    );
    assert!(ans.status.is_ok());
    assert_eq!(ans.bytes_parsed, 10);
    assert_eq!(ans.datarate, DR::_3);
    let mask = configuration.store().group2.mask;
    assert_eq!(mask.words()[..5], [0xFF00, 0, 0, 0, 0]);

    let mut radio = MockRadio::default();
    let mut rng = rng();
    for _ in 0..20 {
        let next = configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_3, true));
        assert!((8..16).contains(&next.unwrap().channel));
    }
    assert_eq!(
        configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_4, true)),
        Err(Error::NoChannelFound)
    );
}

#[test]
fn us915_join_visits_every_channel_once() {
    let mut configuration = Configuration::new(Region::US915);
    let mut radio = MockRadio::default();
    let mut rng = rng();
    let mut used = ChannelMask::default();

    for _ in 0..64 {
        let next = configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_0, false));
        let channel = usize::from(next.unwrap().channel);
        assert!(channel < 64);
        assert!(!used.is_enabled(channel));
        used.set_channel(channel, true);
        let store = configuration.store();
        assert!(store.group1.mask_remaining.is_subset_of(&store.group2.mask));
    }
    assert_eq!(used.count(0, 4), 64);
}

#[test]
fn us915_link_adr_is_idempotent() {
    let mut configuration = Configuration::new(Region::US915);
    let mut radio = MockRadio::default();
    let mut rng = rng();
    for _ in 0..10 {
        configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_2, true)).unwrap();
    }

    // DR3, sub-band 2: channels 8..16 and 65
    let request = [0x03, 0x30, 0x02, 0x00, 0x50];
    let first = link_adr(&mut configuration, &[request]);
    let mask = configuration.store().group2.mask;
    let second = link_adr(&mut configuration, &[request]);
    assert!(first.status.is_ok());
    assert_eq!(first, second);
    assert_eq!(configuration.store().group2.mask, mask);
    assert_eq!(mask.words()[..5], [0xFF00, 0, 0, 0, 0x0002]);

    for _ in 0..20 {
        let next = configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_3, true));
        assert!((8..16).contains(&next.unwrap().channel));
        let store = configuration.store();
        assert!(store.group1.mask_remaining.is_subset_of(&store.group2.mask));
    }
}

#[test]
fn us915_cf_list_mask() {
    let mut configuration = Configuration::new(Region::US915);
    let list = cf_list_mask(&[0x00FF, 0, 0, 0, 0x0001]);
    configuration.apply_cf_list(&ApplyCfListParams::new(&list, 0));
    let mask = configuration.store().group2.mask;
    assert_eq!(mask.count(0, 4), 8);
    assert!(mask.is_enabled(64));
    assert!(!mask.is_enabled(65));
}

#[test]
fn cn470_plan_follows_join_channel() {
    let mut configuration = Configuration::new(Region::CN470);
    let mut radio = MockRadio::default();
    let mut rng = rng();

    let join = configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_0, false)).unwrap();
    assert!(join.channel < 20);
    assert_eq!(configuration.store().group2.cn470.join_channel_index, join.channel);

    // join accepted on a 26 MHz type A join channel
    let list = cf_list_mask(&[0x00FF, 0, 0]);
    configuration.apply_cf_list(&ApplyCfListParams::new(&list, 12));
    let rx2 = configuration.get_phy_param(&GetPhyParams::new(PhyAttribute::DefRx2Frequency));
    assert_eq!(rx2.as_int(), Some(492_500_000));
    let nb = configuration.get_phy_param(&GetPhyParams::new(PhyAttribute::MaxNbChannels));
    assert_eq!(nb.as_int(), Some(48));

    let next = configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_2, true)).unwrap();
    assert!(next.channel < 8);
    let frequency = configuration.store().channel(next.channel.into()).unwrap().frequency;
    assert_eq!(frequency, 470_300_000 + u32::from(next.channel) * 200_000);

    configuration.rx_config(&mut radio, &rx1(next.channel, DR::_2)).unwrap();
    assert_eq!(
        radio.rx.unwrap().rf.frequency,
        490_100_000 + u32::from(next.channel) * 200_000
    );
}

#[test]
fn cn470_tx_power() {
    let mut configuration = Configuration::new(Region::CN470);
    configuration.apply_cf_list(&ApplyCfListParams::new(&[], 3));
    let mut radio = MockRadio::default();
    let params = TxConfigParams {
        channel: 0,
        datarate: DR::_5,
        tx_power: 1,
        max_eirp: 19.15,
        antenna_gain: 0.0,
        pkt_len: 12,
    };
    let result = configuration.tx_config(&mut radio, &params).unwrap();
    assert_eq!(result.tx_power, 1);
    let tx = radio.tx.unwrap();
    assert_eq!(tx.pw, 17);
    assert_eq!(tx.rf.frequency, 470_300_000);
    assert!(result.time_on_air > 0);
}

#[test]
fn as923_frequency_offset() {
    let configuration = Configuration::new(Region::AS923_2);
    let store = configuration.store();
    assert_eq!(store.channel(0).unwrap().frequency, 921_400_000);
    assert_eq!(store.channel(1).unwrap().frequency, 921_600_000);
    let dwell = configuration.get_phy_param(&GetPhyParams::new(PhyAttribute::DefUplinkDwellTime));
    assert_eq!(dwell.as_int(), Some(1));
}

#[test]
fn as923_first_uplink_on_default_channels() {
    let mut configuration = Configuration::new(Region::AS923_1);
    let mut radio = MockRadio::default();
    let mut rng = rng();
    let params = uplink(DR::_2, false);
    for _ in 0..10 {
        let next = configuration.next_channel(&mut rng, &mut radio, &params).unwrap();
        assert!(next.channel < 2);
        assert_eq!(next.aggregated_time_off, params.aggr_time_off);
    }
    assert!(radio.sensed.is_empty());
}

#[test]
fn as923_listen_before_talk() {
    let mut configuration = Configuration::new(Region::AS923_1_JP);
    let mut rng = rng();

    let mut radio = MockRadio { busy: vec![923_200_000], ..Default::default() };
    for _ in 0..10 {
        let next = configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_2, false));
        assert_eq!(next.unwrap().channel, 1);
    }

    let mut radio = MockRadio { busy: vec![923_200_000, 923_400_000], ..Default::default() };
    assert_eq!(
        configuration.next_channel(&mut rng, &mut radio, &uplink(DR::_2, false)),
        Err(Error::NoFreeChannelFound)
    );
    assert_eq!(radio.sensed.len(), 2);
}
