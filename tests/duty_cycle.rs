#![cfg(feature = "region-eu868")]

mod common;
use common::*;

use lorawan_region::region::{NextChanParams, SetBandTxDoneParams};
use lorawan_region::{Configuration, Error, Region, DR};

fn joined_uplink(now: u64) -> NextChanParams {
    NextChanParams { duty_cycle_enabled: true, now, ..uplink(DR::_0, true) }
}

#[test]
fn exhausted_band_waits_for_credits() {
    let mut configuration = Configuration::new(Region::EU868);
    let mut radio = MockRadio::default();
    let mut rng = rng();

    let next = configuration.next_channel(&mut rng, &mut radio, &joined_uplink(0)).unwrap();
    // the three default channels share one 1 % band, half an hour of credits
    configuration.set_band_tx_done(&SetBandTxDoneParams {
        channel: next.channel,
        joined: true,
        time_on_air: 18_000,
        now: 0,
    });

    let wait_time = match configuration.next_channel(&mut rng, &mut radio, &joined_uplink(0)) {
        Err(Error::DutyCycleRestricted { wait_time }) => wait_time,
        other => panic!("unexpected {other:?}"),
    };
    assert!(wait_time > 0);

    let next = configuration.next_channel(&mut rng, &mut radio, &joined_uplink(wait_time + 1));
    assert!(next.unwrap().channel < 3);
}

#[test]
fn duty_cycle_off_ignores_credits() {
    let mut configuration = Configuration::new(Region::EU868);
    let mut radio = MockRadio::default();
    let mut rng = rng();

    for now in 0..5 {
        let params = NextChanParams { duty_cycle_enabled: false, now, ..uplink(DR::_0, true) };
        let next = configuration.next_channel(&mut rng, &mut radio, &params).unwrap();
        configuration.set_band_tx_done(&SetBandTxDoneParams {
            channel: next.channel,
            joined: true,
            time_on_air: 60_000,
            now,
        });
    }
}

#[test]
fn aggregated_time_off() {
    let mut configuration = Configuration::new(Region::EU868);
    let mut radio = MockRadio::default();
    let mut rng = rng();

    let params =
        NextChanParams { aggr_time_off: 10_000, last_aggr_tx: Some(1_000), ..joined_uplink(5_000) };
    assert_eq!(
        configuration.next_channel(&mut rng, &mut radio, &params),
        Err(Error::DutyCycleRestricted { wait_time: 6_000 })
    );

    let params = NextChanParams { now: 11_000, ..params };
    let next = configuration.next_channel(&mut rng, &mut radio, &params).unwrap();
    assert_eq!(next.aggregated_time_off, 0);
}

#[test]
fn airtime_never_exceeds_the_band_duty_cycle() {
    use lorawan_region::region::TxConfigParams;
    use rand_core::OsRng;

    let mut configuration = Configuration::new(Region::EU868);
    let mut radio = MockRadio::default();
    let mut now = 0;
    let mut airtime = 0;
    let mut time_on_air = 0;

    while now < 10 * 3_600_000 {
        match configuration.next_channel(&mut OsRng, &mut radio, &joined_uplink(now)) {
            Ok(next) => {
                let params = TxConfigParams {
                    channel: next.channel,
                    datarate: DR::_0,
                    tx_power: 0,
                    max_eirp: 16.0,
                    antenna_gain: 0.0,
                    pkt_len: 20,
                };
                time_on_air = configuration.tx_config(&mut radio, &params).unwrap().time_on_air;
                now += time_on_air;
                airtime += time_on_air;
                configuration.set_band_tx_done(&SetBandTxDoneParams {
                    channel: next.channel,
                    joined: true,
                    time_on_air,
                    now,
                });
            }
            Err(Error::DutyCycleRestricted { wait_time }) => now += wait_time.max(1),
            Err(e) => panic!("unexpected {e:?}"),
        }
    }

    // initial half hour of credits at 1 %, then 1 % of the elapsed time
    assert!(airtime <= 18_000 + now / 100 + time_on_air);
    assert!(airtime >= now / 200);
}
