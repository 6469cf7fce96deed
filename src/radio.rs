//! The radio transceiver as seen by the regional layer.
//!
//! The region plans only configure the modem and ask it a few questions (is it idle, how long
//! will a frame last, is a channel free). Implement [`Radio`] on top of your driver.
pub use lora_modulation::{BaseBandModulationParams, Bandwidth, CodingRate, SpreadingFactor};

use crate::{Result, TimerTime};

/// GFSK parameters, used by the 50 kbps datarate of some regions.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FskParams {
    /// Bits per second.
    pub bitrate: u32,
    /// Frequency deviation in Hz, only meaningful when transmitting.
    pub fdev: u32,
    /// Receiver bandwidth in Hz.
    pub bandwidth: u32,
    /// Receiver AFC bandwidth in Hz.
    pub bandwidth_afc: u32,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModemParams {
    LoRa(BaseBandModulationParams),
    Fsk(FskParams),
}

impl ModemParams {
    /// Channel bandwidth in Hz, as used for carrier sense.
    pub fn bandwidth(&self) -> u32 {
        match self {
            ModemParams::LoRa(bb) => bb.bw.hz(),
            ModemParams::Fsk(fsk) => fsk.bandwidth,
        }
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RfConfig {
    pub frequency: u32,
    pub modem: ModemParams,
    pub preamble_len: u16,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxMode {
    Continuous,
    /// Single shot receive, giving up when no preamble is found within `symbol_timeout` symbols.
    Single { symbol_timeout: u16 },
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxConfig {
    pub rf: RfConfig,
    pub mode: RxMode,
    /// Implicit header length for fixed length frames (beacons), `None` for explicit header.
    pub fixed_length: Option<u8>,
    pub crc_on: bool,
    /// Downlinks are sent with inverted IQ, beacons are not.
    pub iq_inverted: bool,
    /// Largest frame accepted by the receiver.
    pub max_payload_len: u8,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxConfig {
    /// Conducted power in dBm.
    pub pw: i8,
    pub rf: RfConfig,
    /// Transmission watchdog in ms.
    pub timeout: u32,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RxQuality {
    rssi: i16,
    snr: i8,
}

impl RxQuality {
    pub fn new(rssi: i16, snr: i8) -> RxQuality {
        RxQuality { rssi, snr }
    }

    pub fn rssi(self) -> i16 {
        self.rssi
    }
    pub fn snr(self) -> i8 {
        self.snr
    }
}

/// Operations the region plans need from the transceiver.
pub trait Radio {
    /// The radio neither transmits nor receives.
    fn is_idle(&self) -> bool;

    fn configure_tx(&mut self, config: &TxConfig) -> Result;

    fn configure_rx(&mut self, config: &RxConfig) -> Result;

    fn transmit(&mut self, buffer: &[u8]) -> Result;

    /// Start receiving, `timeout` of 0 means continuous reception.
    fn set_rx(&mut self, timeout: u32) -> Result;

    fn set_standby(&mut self);

    fn set_sleep(&mut self);

    /// Listen on `frequency` for up to `max_carrier_sense_time` ms, the channel is free if the
    /// RSSI stays below `rssi_threshold` dBm.
    fn is_channel_free(
        &mut self,
        frequency: u32,
        rx_bandwidth: u32,
        rssi_threshold: i16,
        max_carrier_sense_time: u32,
    ) -> bool;

    /// Time-on-air in ms of a `payload_len` bytes frame.
    fn time_on_air(&self, modem: &ModemParams, preamble_len: u16, payload_len: u8) -> TimerTime;

    /// Time the radio needs to wake up from sleep, in ms.
    fn wakeup_time(&self) -> u32;
}

/// Outcome of a radio operation, delivered by the driver from its poll loop.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadioEvent<'a> {
    TxDone,
    RxDone(&'a [u8], RxQuality),
    RxError,
    TxTimeout,
    RxTimeout,
}

/// Callbacks of the radio driver towards the MAC layer.
pub trait RadioEvents {
    fn on_tx_done(&mut self);
    fn on_rx_done(&mut self, payload: &[u8], quality: RxQuality);
    fn on_rx_error(&mut self);
    fn on_tx_timeout(&mut self);
    fn on_rx_timeout(&mut self);

    /// Route an event to the matching callback.
    fn dispatch(&mut self, event: RadioEvent<'_>) {
        match event {
            RadioEvent::TxDone => self.on_tx_done(),
            RadioEvent::RxDone(payload, quality) => self.on_rx_done(payload, quality),
            RadioEvent::RxError => self.on_rx_error(),
            RadioEvent::TxTimeout => self.on_tx_timeout(),
            RadioEvent::RxTimeout => self.on_rx_timeout(),
        }
    }
}

/// Time-on-air of `modem` computed without a radio, for drivers that lack their own formula.
pub fn compute_time_on_air(modem: &ModemParams, preamble_len: u16, payload_len: u8) -> TimerTime {
    match modem {
        ModemParams::LoRa(bb) => bb.time_on_air_ms(preamble_len, true, payload_len) as TimerTime,
        ModemParams::Fsk(fsk) => {
            // preamble, sync word (3 bytes), length byte, payload and CRC (2 bytes)
            let bits = (preamble_len as u64 + 3 + 1 + payload_len as u64 + 2) * 8;
            (bits * 1000).div_ceil(fsk.bitrate.max(1) as u64)
        }
    }
}
