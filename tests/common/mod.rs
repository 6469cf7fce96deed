#![allow(dead_code)]

use lorawan_region::radio::{compute_time_on_air, ModemParams, Radio, RxConfig, TxConfig};
use lorawan_region::region::{LinkAdrReqAns, LinkAdrReqParams, NextChanParams};
use lorawan_region::{Configuration, Result, DR};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Radio that remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct MockRadio {
    pub tx: Option<TxConfig>,
    pub rx: Option<RxConfig>,
    pub sensed: Vec<u32>,
    pub busy: Vec<u32>,
}

impl Radio for MockRadio {
    fn is_idle(&self) -> bool {
        true
    }

    fn configure_tx(&mut self, config: &TxConfig) -> Result {
        self.tx = Some(*config);
        Ok(())
    }

    fn configure_rx(&mut self, config: &RxConfig) -> Result {
        self.rx = Some(*config);
        Ok(())
    }

    fn transmit(&mut self, _buffer: &[u8]) -> Result {
        Ok(())
    }

    fn set_rx(&mut self, _timeout: u32) -> Result {
        Ok(())
    }

    fn set_standby(&mut self) {}

    fn set_sleep(&mut self) {}

    fn is_channel_free(
        &mut self,
        frequency: u32,
        _rx_bandwidth: u32,
        _rssi_threshold: i16,
        _max_carrier_sense_time: u32,
    ) -> bool {
        self.sensed.push(frequency);
        !self.busy.contains(&frequency)
    }

    fn time_on_air(&self, modem: &ModemParams, preamble_len: u16, payload_len: u8) -> u64 {
        compute_time_on_air(modem, preamble_len, payload_len)
    }

    fn wakeup_time(&self) -> u32 {
        1
    }
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

pub fn uplink(datarate: DR, joined: bool) -> NextChanParams {
    NextChanParams {
        aggr_time_off: 0,
        last_aggr_tx: None,
        datarate,
        joined,
        duty_cycle_enabled: false,
        now: 0,
        last_tx_is_join_request: !joined,
        pkt_len: 20,
    }
}

/// Send the concatenated `LinkADRReq` blocks, ADR enabled, from DR0 at full power.
pub fn link_adr(configuration: &mut Configuration, blocks: &[[u8; 5]]) -> LinkAdrReqAns {
    let payload: Vec<u8> = blocks.iter().flatten().copied().collect();
    configuration.link_adr_req(&LinkAdrReqParams {
        payload: &payload,
        adr_enabled: true,
        uplink_dwell_time: false,
        current_datarate: DR::_0,
        current_tx_power: 0,
        current_nb_rep: 1,
    })
}

/// Type 0 CFList with the given frequencies.
pub fn cf_list(frequencies: &[u32]) -> [u8; 16] {
    let mut list = [0; 16];
    for (slot, frequency) in list.chunks_exact_mut(3).zip(frequencies) {
        slot.copy_from_slice(&(frequency / 100).to_le_bytes()[..3]);
    }
    list
}

/// Type 1 CFList with the given mask words.
pub fn cf_list_mask(words: &[u16]) -> [u8; 16] {
    let mut list = [0; 16];
    for (slot, word) in list.chunks_exact_mut(2).zip(words) {
        slot.copy_from_slice(&word.to_le_bytes());
    }
    list[15] = 1;
    list
}
