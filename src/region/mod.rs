//! LoRaWAN regional parameters (eg: EU868, US915, etc).
use lora_modulation::{Bandwidth, BaseBandModulationParams, SpreadingFactor};
use rand_core::RngCore;

use crate::mac_commands::{
    DlChannelReq, DlChannelStatus, NewChannelReq, NewChannelStatus, RxParamSetupReq,
    RxParamSetupStatus, TxParamSetupReq,
};
use crate::radio::{FskParams, ModemParams, Radio, RfConfig, RxConfig, RxMode, TxConfig};
use crate::{Error, Result, TimerTime};

pub mod common;
pub(crate) mod constants;
mod params;
pub mod store;

pub use params::*;
use store::{Channel, ChannelMask, PhyParamStore};

#[cfg(not(any(
    feature = "region-as923-1",
    feature = "region-as923-1-jp",
    feature = "region-as923-2",
    feature = "region-as923-3",
    feature = "region-as923-4",
    feature = "region-au915",
    feature = "region-cn470",
    feature = "region-cn779",
    feature = "region-eu433",
    feature = "region-eu868",
    feature = "region-in865",
    feature = "region-kr920",
    feature = "region-ru864",
    feature = "region-us915"
)))]
compile_error!("You must enable at least one region! eg: `region-eu868`, `region-us915`...");

#[cfg(any(
    feature = "region-as923-1",
    feature = "region-as923-1-jp",
    feature = "region-as923-2",
    feature = "region-as923-3",
    feature = "region-as923-4",
    feature = "region-cn779",
    feature = "region-eu433",
    feature = "region-eu868",
    feature = "region-in865",
    feature = "region-kr920",
    feature = "region-ru864"
))]
mod dynamic_channel_plans;
#[cfg(feature = "region-as923-1")]
pub(crate) use dynamic_channel_plans::AS923_1;
#[cfg(feature = "region-as923-1-jp")]
pub(crate) use dynamic_channel_plans::AS923_1_JP;
#[cfg(feature = "region-as923-2")]
pub(crate) use dynamic_channel_plans::AS923_2;
#[cfg(feature = "region-as923-3")]
pub(crate) use dynamic_channel_plans::AS923_3;
#[cfg(feature = "region-as923-4")]
pub(crate) use dynamic_channel_plans::AS923_4;
#[cfg(feature = "region-cn779")]
pub(crate) use dynamic_channel_plans::CN779;
#[cfg(feature = "region-eu433")]
pub(crate) use dynamic_channel_plans::EU433;
#[cfg(feature = "region-eu868")]
pub(crate) use dynamic_channel_plans::EU868;
#[cfg(feature = "region-in865")]
pub(crate) use dynamic_channel_plans::IN865;
#[cfg(feature = "region-kr920")]
pub(crate) use dynamic_channel_plans::KR920;
#[cfg(feature = "region-ru864")]
pub(crate) use dynamic_channel_plans::RU864;

#[cfg(any(feature = "region-us915", feature = "region-au915"))]
mod fixed_channel_plans;
#[cfg(feature = "region-au915")]
pub(crate) use fixed_channel_plans::AU915;
#[cfg(feature = "region-us915")]
pub(crate) use fixed_channel_plans::US915;

#[cfg(feature = "region-cn470")]
mod cn470;
#[cfg(feature = "region-cn470")]
pub(crate) use cn470::CN470;

seq_macro::seq!(
    N in 0..=15 {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        /// A restricted data rate type that exposes the number of variants to only what _may_ be
        /// potentially be possible. Note that not all data rates are valid in all regions.
        pub enum DR {
            #(
                _~N = N,
            )*
        }

        impl DR {
            pub const fn new(value: u8) -> Option<DR> {
                match value {
                    #(
                        N => Some(DR::_~N),
                    )*
                    _ => None,
                }
            }
        }
    }
);

impl DR {
    /// Datarate encoded in the low nibble of `value`.
    pub fn from_nibble(value: u8) -> DR {
        DR::new(value & 0x0F).unwrap_or(DR::_0)
    }

    pub fn prev(self) -> Option<DR> {
        DR::new((self as u8).checked_sub(1)?)
    }

    pub fn next(self) -> Option<DR> {
        DR::new(self as u8 + 1)
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    LoRa(SpreadingFactor, Bandwidth),
    /// GFSK, bitrate in kbps.
    Fsk(u8),
}

/// This datarate type is used internally for defining bandwidth/sf per region
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Datarate {
    modulation: Modulation,
    /// Max application payload.
    max_payload_size: u8,
    max_payload_size_with_dwell_time: u8,
}

impl Datarate {
    pub(crate) const fn lora(
        sf: SpreadingFactor,
        bw: Bandwidth,
        max_payload_size: u8,
        max_payload_size_with_dwell_time: u8,
    ) -> Self {
        Self {
            modulation: Modulation::LoRa(sf, bw),
            max_payload_size,
            max_payload_size_with_dwell_time,
        }
    }

    pub(crate) const fn fsk(kbps: u8, max_payload_size: u8) -> Self {
        Self {
            modulation: Modulation::Fsk(kbps),
            max_payload_size,
            max_payload_size_with_dwell_time: max_payload_size,
        }
    }

    pub fn modulation(&self) -> Modulation {
        self.modulation
    }

    pub fn is_fsk(&self) -> bool {
        matches!(self.modulation, Modulation::Fsk(_))
    }

    /// Bandwidth in Hz, 0 for FSK.
    pub fn bandwidth(&self) -> u32 {
        match self.modulation {
            Modulation::LoRa(_, bw) => bw.hz(),
            Modulation::Fsk(_) => 0,
        }
    }

    /// Spreading factor, or the bitrate in kbps for FSK.
    pub fn spreading_factor(&self) -> u8 {
        match self.modulation {
            Modulation::LoRa(sf, _) => sf.factor() as u8,
            Modulation::Fsk(kbps) => kbps,
        }
    }

    /// Duration of a symbol in µs.
    pub fn symbol_time(&self) -> u32 {
        match self.modulation {
            Modulation::LoRa(sf, bw) => {
                common::compute_symbol_time_lora(sf.factor() as u8, bw.hz())
            }
            Modulation::Fsk(kbps) => common::compute_symbol_time_fsk(u32::from(kbps) * 1000),
        }
    }

    pub fn modem_params(&self) -> ModemParams {
        match self.modulation {
            Modulation::LoRa(sf, bw) => ModemParams::LoRa(BaseBandModulationParams::new(
                sf,
                bw,
                constants::DEFAULT_CODING_RATE,
            )),
            Modulation::Fsk(kbps) => ModemParams::Fsk(FskParams {
                bitrate: u32::from(kbps) * 1000,
                fdev: constants::FSK_FREQUENCY_DEVIATION,
                bandwidth: constants::FSK_RX_BANDWIDTH,
                bandwidth_afc: constants::FSK_RX_BANDWIDTH_AFC,
            }),
        }
    }

    pub fn preamble_len(&self) -> u16 {
        if self.is_fsk() {
            constants::FSK_PREAMBLE_LENGTH
        } else {
            constants::LORA_PREAMBLE_LENGTH
        }
    }
}

/// Max application payload when a repeater may be on the path.
const REPEATER_MAX_PAYLOAD: u8 = 222;

pub(crate) trait ChannelRegion {
    fn datarates() -> &'static [Option<Datarate>];

    fn datarate(datarate: DR) -> Option<&'static Datarate> {
        Self::datarates().get(datarate as usize)?.as_ref()
    }

    fn get_max_payload_length(datarate: DR, repeater_compatible: bool, dwell_time: bool) -> u8 {
        let Some(dr) = Self::datarate(datarate) else {
            return 0;
        };
        let max_size = if dwell_time {
            dr.max_payload_size_with_dwell_time
        } else {
            dr.max_payload_size
        };
        if repeater_compatible {
            max_size.min(REPEATER_MAX_PAYLOAD)
        } else {
            max_size
        }
    }

    /// Time-on-air of a `pkt_len` bytes uplink, 0 for datarates the region does not define.
    fn expected_time_on_air<R: Radio>(radio: &R, datarate: DR, pkt_len: u8) -> TimerTime {
        match Self::datarate(datarate) {
            Some(dr) => radio.time_on_air(&dr.modem_params(), dr.preamble_len(), pkt_len),
            None => 0,
        }
    }

    fn rx_window_parameters(
        datarate: DR,
        min_rx_symbols: u8,
        rx_error: u32,
        wakeup_time: u32,
    ) -> RxWindowParams {
        let symbol_time = Self::datarate(datarate).map_or(0, Datarate::symbol_time);
        let (window_timeout, window_offset) = common::compute_rx_window_parameters(
            symbol_time,
            min_rx_symbols,
            rx_error,
            wakeup_time,
        );
        RxWindowParams {
            datarate,
            bandwidth: common::get_bandwidth(datarate, Self::datarates()),
            window_timeout,
            window_offset,
        }
    }

    /// Configure the radio to receive a downlink on `frequency`.
    fn configure_rx<R: Radio>(
        radio: &mut R,
        frequency: u32,
        params: &RxConfigParams,
    ) -> Result<DR> {
        if !radio.is_idle() {
            return Err(Error::RadioBusy);
        }
        let dr = Self::datarate(params.datarate).ok_or(Error::DatarateInvalid)?;
        let mode = if params.rx_continuous {
            RxMode::Continuous
        } else {
            RxMode::Single {
                symbol_timeout: u16::try_from(params.window_timeout).unwrap_or(u16::MAX),
            }
        };
        let max_payload = Self::get_max_payload_length(
            params.datarate,
            params.repeater_support,
            params.downlink_dwell_time,
        );
        radio.configure_rx(&RxConfig {
            rf: RfConfig { frequency, modem: dr.modem_params(), preamble_len: dr.preamble_len() },
            mode,
            fixed_length: None,
            crc_on: dr.is_fsk(),
            iq_inverted: !dr.is_fsk(),
            max_payload_len: max_payload.saturating_add(constants::FRMPAYLOAD_OVERHEAD),
        })?;
        Ok(params.datarate)
    }

    /// Configure the radio to send a `pkt_len` bytes uplink at `pw` dBm. Returns the time-on-air
    /// of the frame.
    fn configure_tx<R: Radio>(
        radio: &mut R,
        frequency: u32,
        datarate: DR,
        pw: i8,
        pkt_len: u8,
    ) -> Result<TimerTime> {
        if !radio.is_idle() {
            return Err(Error::RadioBusy);
        }
        let dr = Self::datarate(datarate).ok_or(Error::DatarateInvalid)?;
        let modem = dr.modem_params();
        radio.configure_tx(&TxConfig {
            pw,
            rf: RfConfig { frequency, modem, preamble_len: dr.preamble_len() },
            timeout: constants::TX_TIMEOUT,
        })?;
        Ok(radio.time_on_air(&modem, dr.preamble_len(), pkt_len))
    }
}

#[derive(Debug, Clone)]
/// Contains LoRaWAN region-specific configuration and state: the channel plan, channel masks
/// and duty-cycle bands of the device.
pub struct Configuration {
    state: State,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Regions supported by this crate: AS923_1, AS923_1_JP, AS923_2, AS923_3, AS923_4, AU915,
/// CN470, CN779, EU433, EU868, IN865, KR920, RU864, US915.
/// Each region is individually feature-gated (eg: `region-eu868`), however, by default, all regions
/// are enabled.
///
pub enum Region {
    #[cfg(feature = "region-as923-1")]
    AS923_1,
    /// AS923-1 with the Japanese listen-before-talk requirement.
    #[cfg(feature = "region-as923-1-jp")]
    AS923_1_JP,
    #[cfg(feature = "region-as923-2")]
    AS923_2,
    #[cfg(feature = "region-as923-3")]
    AS923_3,
    #[cfg(feature = "region-as923-4")]
    AS923_4,
    #[cfg(feature = "region-au915")]
    AU915,
    #[cfg(feature = "region-cn470")]
    CN470,
    #[cfg(feature = "region-cn779")]
    CN779,
    #[cfg(feature = "region-eu433")]
    EU433,
    #[cfg(feature = "region-eu868")]
    EU868,
    #[cfg(feature = "region-in865")]
    IN865,
    #[cfg(feature = "region-kr920")]
    KR920,
    #[cfg(feature = "region-ru864")]
    RU864,
    #[cfg(feature = "region-us915")]
    US915,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone)]
enum State {
    #[cfg(feature = "region-as923-1")]
    AS923_1(AS923_1),
    #[cfg(feature = "region-as923-1-jp")]
    AS923_1_JP(AS923_1_JP),
    #[cfg(feature = "region-as923-2")]
    AS923_2(AS923_2),
    #[cfg(feature = "region-as923-3")]
    AS923_3(AS923_3),
    #[cfg(feature = "region-as923-4")]
    AS923_4(AS923_4),
    #[cfg(feature = "region-au915")]
    AU915(AU915),
    #[cfg(feature = "region-cn470")]
    CN470(CN470),
    #[cfg(feature = "region-cn779")]
    CN779(CN779),
    #[cfg(feature = "region-eu433")]
    EU433(EU433),
    #[cfg(feature = "region-eu868")]
    EU868(EU868),
    #[cfg(feature = "region-in865")]
    IN865(IN865),
    #[cfg(feature = "region-kr920")]
    KR920(KR920),
    #[cfg(feature = "region-ru864")]
    RU864(RU864),
    #[cfg(feature = "region-us915")]
    US915(US915),
}

impl State {
    pub fn new(region: Region) -> State {
        match region {
            #[cfg(feature = "region-as923-1")]
            Region::AS923_1 => State::AS923_1(AS923_1::default()),
            #[cfg(feature = "region-as923-1-jp")]
            Region::AS923_1_JP => State::AS923_1_JP(AS923_1_JP::default()),
            #[cfg(feature = "region-as923-2")]
            Region::AS923_2 => State::AS923_2(AS923_2::default()),
            #[cfg(feature = "region-as923-3")]
            Region::AS923_3 => State::AS923_3(AS923_3::default()),
            #[cfg(feature = "region-as923-4")]
            Region::AS923_4 => State::AS923_4(AS923_4::default()),
            #[cfg(feature = "region-au915")]
            Region::AU915 => State::AU915(AU915::default()),
            #[cfg(feature = "region-cn470")]
            Region::CN470 => State::CN470(CN470::default()),
            #[cfg(feature = "region-cn779")]
            Region::CN779 => State::CN779(CN779::default()),
            #[cfg(feature = "region-eu433")]
            Region::EU433 => State::EU433(EU433::default()),
            #[cfg(feature = "region-eu868")]
            Region::EU868 => State::EU868(EU868::default()),
            #[cfg(feature = "region-in865")]
            Region::IN865 => State::IN865(IN865::default()),
            #[cfg(feature = "region-kr920")]
            Region::KR920 => State::KR920(KR920::default()),
            #[cfg(feature = "region-ru864")]
            Region::RU864 => State::RU864(RU864::default()),
            #[cfg(feature = "region-us915")]
            Region::US915 => State::US915(US915::default()),
        }
    }

    pub fn region(&self) -> Region {
        match self {
            #[cfg(feature = "region-as923-1")]
            Self::AS923_1(_) => Region::AS923_1,
            #[cfg(feature = "region-as923-1-jp")]
            Self::AS923_1_JP(_) => Region::AS923_1_JP,
            #[cfg(feature = "region-as923-2")]
            Self::AS923_2(_) => Region::AS923_2,
            #[cfg(feature = "region-as923-3")]
            Self::AS923_3(_) => Region::AS923_3,
            #[cfg(feature = "region-as923-4")]
            Self::AS923_4(_) => Region::AS923_4,
            #[cfg(feature = "region-au915")]
            Self::AU915(_) => Region::AU915,
            #[cfg(feature = "region-cn470")]
            Self::CN470(_) => Region::CN470,
            #[cfg(feature = "region-cn779")]
            Self::CN779(_) => Region::CN779,
            #[cfg(feature = "region-eu433")]
            Self::EU433(_) => Region::EU433,
            #[cfg(feature = "region-eu868")]
            Self::EU868(_) => Region::EU868,
            #[cfg(feature = "region-in865")]
            Self::IN865(_) => Region::IN865,
            #[cfg(feature = "region-kr920")]
            Self::KR920(_) => Region::KR920,
            #[cfg(feature = "region-ru864")]
            Self::RU864(_) => Region::RU864,
            #[cfg(feature = "region-us915")]
            Self::US915(_) => Region::US915,
        }
    }
}

macro_rules! mut_region_dispatch {
  ($s:expr, $t:tt) => {
      mut_region_dispatch!($s, $t,)
  };
  ($s:expr, $t:tt, $($arg:tt)*) => {
      match &mut $s.state {
        #[cfg(feature = "region-as923-1")]
        State::AS923_1(state) => state.$t($($arg)*),
        #[cfg(feature = "region-as923-1-jp")]
        State::AS923_1_JP(state) => state.$t($($arg)*),
        #[cfg(feature = "region-as923-2")]
        State::AS923_2(state) => state.$t($($arg)*),
        #[cfg(feature = "region-as923-3")]
        State::AS923_3(state) => state.$t($($arg)*),
        #[cfg(feature = "region-as923-4")]
        State::AS923_4(state) => state.$t($($arg)*),
        #[cfg(feature = "region-au915")]
        State::AU915(state) => state.$t($($arg)*),
        #[cfg(feature = "region-cn470")]
        State::CN470(state) => state.$t($($arg)*),
        #[cfg(feature = "region-cn779")]
        State::CN779(state) => state.$t($($arg)*),
        #[cfg(feature = "region-eu433")]
        State::EU433(state) => state.$t($($arg)*),
        #[cfg(feature = "region-eu868")]
        State::EU868(state) => state.$t($($arg)*),
        #[cfg(feature = "region-in865")]
        State::IN865(state) => state.$t($($arg)*),
        #[cfg(feature = "region-kr920")]
        State::KR920(state) => state.$t($($arg)*),
        #[cfg(feature = "region-ru864")]
        State::RU864(state) => state.$t($($arg)*),
        #[cfg(feature = "region-us915")]
        State::US915(state) => state.$t($($arg)*),
    }
  };
}

macro_rules! region_dispatch {
  ($s:expr, $t:tt) => {
      region_dispatch!($s, $t,)
  };
  ($s:expr, $t:tt, $($arg:tt)*) => {
      match &$s.state {
        #[cfg(feature = "region-as923-1")]
        State::AS923_1(state) => state.$t($($arg)*),
        #[cfg(feature = "region-as923-1-jp")]
        State::AS923_1_JP(state) => state.$t($($arg)*),
        #[cfg(feature = "region-as923-2")]
        State::AS923_2(state) => state.$t($($arg)*),
        #[cfg(feature = "region-as923-3")]
        State::AS923_3(state) => state.$t($($arg)*),
        #[cfg(feature = "region-as923-4")]
        State::AS923_4(state) => state.$t($($arg)*),
        #[cfg(feature = "region-au915")]
        State::AU915(state) => state.$t($($arg)*),
        #[cfg(feature = "region-cn470")]
        State::CN470(state) => state.$t($($arg)*),
        #[cfg(feature = "region-cn779")]
        State::CN779(state) => state.$t($($arg)*),
        #[cfg(feature = "region-eu433")]
        State::EU433(state) => state.$t($($arg)*),
        #[cfg(feature = "region-eu868")]
        State::EU868(state) => state.$t($($arg)*),
        #[cfg(feature = "region-in865")]
        State::IN865(state) => state.$t($($arg)*),
        #[cfg(feature = "region-kr920")]
        State::KR920(state) => state.$t($($arg)*),
        #[cfg(feature = "region-ru864")]
        State::RU864(state) => state.$t($($arg)*),
        #[cfg(feature = "region-us915")]
        State::US915(state) => state.$t($($arg)*),
    }
  };
}

macro_rules! region_static_dispatch {
  ($s:expr, $t:tt) => {
      region_static_dispatch!($s, $t,)
  };
  ($s:expr, $t:tt, $($arg:tt)*) => {
      match &$s.state {
        #[cfg(feature = "region-as923-1")]
        State::AS923_1(_) => AS923_1::$t($($arg)*),
        #[cfg(feature = "region-as923-1-jp")]
        State::AS923_1_JP(_) => AS923_1_JP::$t($($arg)*),
        #[cfg(feature = "region-as923-2")]
        State::AS923_2(_) => AS923_2::$t($($arg)*),
        #[cfg(feature = "region-as923-3")]
        State::AS923_3(_) => AS923_3::$t($($arg)*),
        #[cfg(feature = "region-as923-4")]
        State::AS923_4(_) => AS923_4::$t($($arg)*),
        #[cfg(feature = "region-au915")]
        State::AU915(_) => AU915::$t($($arg)*),
        #[cfg(feature = "region-cn470")]
        State::CN470(_) => CN470::$t($($arg)*),
        #[cfg(feature = "region-cn779")]
        State::CN779(_) => CN779::$t($($arg)*),
        #[cfg(feature = "region-eu433")]
        State::EU433(_) => EU433::$t($($arg)*),
        #[cfg(feature = "region-eu868")]
        State::EU868(_) => EU868::$t($($arg)*),
        #[cfg(feature = "region-in865")]
        State::IN865(_) => IN865::$t($($arg)*),
        #[cfg(feature = "region-kr920")]
        State::KR920(_) => KR920::$t($($arg)*),
        #[cfg(feature = "region-ru864")]
        State::RU864(_) => RU864::$t($($arg)*),
        #[cfg(feature = "region-us915")]
        State::US915(_) => US915::$t($($arg)*),
    }
  };
}

impl Configuration {
    /// Create the configuration of `region`, loaded with the region defaults.
    pub fn new(region: Region) -> Configuration {
        Configuration::with_state(State::new(region))
    }

    /// Resume from a previously persisted store.
    pub fn restore(region: Region, store: PhyParamStore) -> Configuration {
        let mut configuration = Configuration::new(region);
        *configuration.store_mut() = store;
        configuration
    }

    fn with_state(state: State) -> Configuration {
        Configuration { state }
    }

    pub fn region(&self) -> Region {
        self.state.region()
    }

    /// Channels, masks and bands, for persistence.
    pub fn store(&self) -> &PhyParamStore {
        region_dispatch!(self, store)
    }

    pub fn store_mut(&mut self) -> &mut PhyParamStore {
        mut_region_dispatch!(self, store_mut)
    }

    pub fn get_max_payload_length(
        &self,
        datarate: DR,
        repeater_compatible: bool,
        dwell_time: bool,
    ) -> u8 {
        region_static_dispatch!(
            self,
            get_max_payload_length,
            datarate,
            repeater_compatible,
            dwell_time
        )
    }

    pub fn get_phy_param(&self, params: &GetPhyParams) -> PhyValue<'_> {
        region_dispatch!(self, get_phy_param, params)
    }

    /// Charge a completed transmission to the band of its channel.
    pub fn set_band_tx_done(&mut self, params: &SetBandTxDoneParams) {
        mut_region_dispatch!(self, set_band_tx_done, params)
    }

    pub fn init_defaults(&mut self, init_type: InitType) {
        mut_region_dispatch!(self, init_defaults, init_type)
    }

    pub fn verify(&self, verify: Verify) -> bool {
        region_dispatch!(self, verify, verify)
    }

    /// Apply the CFList of a Join-Accept. Malformed lists are ignored.
    pub fn apply_cf_list(&mut self, params: &ApplyCfListParams<'_>) {
        mut_region_dispatch!(self, apply_cf_list, params)
    }

    pub fn chan_mask_set(&mut self, mask: &ChannelMask, mask_type: ChannelsMaskType) -> bool {
        mut_region_dispatch!(self, chan_mask_set, mask, mask_type)
    }

    pub fn compute_rx_window_parameters(
        &self,
        datarate: DR,
        min_rx_symbols: u8,
        rx_error: u32,
        wakeup_time: u32,
    ) -> RxWindowParams {
        region_dispatch!(
            self,
            compute_rx_window_parameters,
            datarate,
            min_rx_symbols,
            rx_error,
            wakeup_time
        )
    }

    /// Configure the radio for a receive window. Returns the datarate of the window.
    pub fn rx_config<R: Radio>(&self, radio: &mut R, params: &RxConfigParams) -> Result<DR> {
        region_dispatch!(self, rx_config, radio, params)
    }

    /// Configure the radio for an uplink.
    pub fn tx_config<R: Radio>(
        &self,
        radio: &mut R,
        params: &TxConfigParams,
    ) -> Result<TxConfigResult> {
        region_dispatch!(self, tx_config, radio, params)
    }

    pub fn link_adr_req(&mut self, params: &LinkAdrReqParams<'_>) -> LinkAdrReqAns {
        mut_region_dispatch!(self, link_adr_req, params)
    }

    pub fn rx_param_setup_req(&self, req: &RxParamSetupReq) -> RxParamSetupStatus {
        region_dispatch!(self, rx_param_setup_req, req)
    }

    /// `None` when the region has no configurable channels.
    pub fn new_channel_req(&mut self, req: &NewChannelReq) -> Option<NewChannelStatus> {
        mut_region_dispatch!(self, new_channel_req, req)
    }

    /// True if the region accepts the new dwell time and EIRP settings.
    pub fn tx_param_setup_req(&self, req: &TxParamSetupReq) -> bool {
        region_dispatch!(self, tx_param_setup_req, req)
    }

    /// `None` when the region has no configurable channels.
    pub fn dl_channel_req(&mut self, req: &DlChannelReq) -> Option<DlChannelStatus> {
        mut_region_dispatch!(self, dl_channel_req, req)
    }

    /// Datarate of the next join request.
    pub fn alternate_dr(&mut self, current: DR, alternate: AlternateDrType) -> DR {
        mut_region_dispatch!(self, alternate_dr, current, alternate)
    }

    /// Select the channel of the next uplink.
    pub fn next_channel<RNG: RngCore, R: Radio>(
        &mut self,
        rng: &mut RNG,
        radio: &mut R,
        params: &NextChanParams,
    ) -> Result<NextChannel> {
        mut_region_dispatch!(self, next_channel, rng, radio, params)
    }

    pub fn channel_add(&mut self, id: u8, channel: Channel) -> Result {
        mut_region_dispatch!(self, channel_add, id, channel)
    }

    pub fn channels_remove(&mut self, id: u8) -> bool {
        mut_region_dispatch!(self, channels_remove, id)
    }

    /// Datarate of the RX1 window.
    pub fn apply_dr_offset(&self, downlink_dwell_time: bool, datarate: DR, offset: u8) -> DR {
        region_dispatch!(self, apply_dr_offset, downlink_dwell_time, datarate, offset)
    }

    /// Configure the radio for a Class-B beacon window. Returns the beacon datarate.
    pub fn rx_beacon_setup<R: Radio>(
        &self,
        radio: &mut R,
        params: &RxBeaconSetupParams,
    ) -> Result<DR> {
        region_dispatch!(self, rx_beacon_setup, radio, params)
    }
}

macro_rules! from_region {
    ($r:tt) => {
        impl From<$r> for Configuration {
            fn from(region: $r) -> Configuration {
                Configuration::with_state(State::$r(region))
            }
        }
    };
}

#[cfg(feature = "region-as923-1")]
from_region!(AS923_1);
#[cfg(feature = "region-as923-1-jp")]
from_region!(AS923_1_JP);
#[cfg(feature = "region-as923-2")]
from_region!(AS923_2);
#[cfg(feature = "region-as923-3")]
from_region!(AS923_3);
#[cfg(feature = "region-as923-4")]
from_region!(AS923_4);
#[cfg(feature = "region-au915")]
from_region!(AU915);
#[cfg(feature = "region-cn470")]
from_region!(CN470);
#[cfg(feature = "region-cn779")]
from_region!(CN779);
#[cfg(feature = "region-eu433")]
from_region!(EU433);
#[cfg(feature = "region-eu868")]
from_region!(EU868);
#[cfg(feature = "region-in865")]
from_region!(IN865);
#[cfg(feature = "region-kr920")]
from_region!(KR920);
#[cfg(feature = "region-ru864")]
from_region!(RU864);
#[cfg(feature = "region-us915")]
from_region!(US915);

impl From<Region> for Configuration {
    fn from(region: Region) -> Configuration {
        Configuration::new(region)
    }
}

/// The contract every channel plan implements.
pub(crate) trait RegionHandler {
    fn store(&self) -> &PhyParamStore;

    fn store_mut(&mut self) -> &mut PhyParamStore;

    fn get_phy_param(&self, params: &GetPhyParams) -> PhyValue<'_>;

    fn set_band_tx_done(&mut self, params: &SetBandTxDoneParams) {
        let store = self.store_mut();
        let Some(channel) = store.group2.channels.get(params.channel as usize) else {
            return;
        };
        if let Some(band) = store.group1.bands.get_mut(channel.band as usize) {
            common::set_band_tx_done(band, params.time_on_air, params.joined, params.now);
        }
    }

    fn init_defaults(&mut self, init_type: InitType);

    fn verify(&self, verify: Verify) -> bool;

    fn apply_cf_list(&mut self, params: &ApplyCfListParams<'_>);

    fn chan_mask_set(&mut self, mask: &ChannelMask, mask_type: ChannelsMaskType) -> bool;

    fn compute_rx_window_parameters(
        &self,
        datarate: DR,
        min_rx_symbols: u8,
        rx_error: u32,
        wakeup_time: u32,
    ) -> RxWindowParams;

    fn rx_config<R: Radio>(&self, radio: &mut R, params: &RxConfigParams) -> Result<DR>;

    fn tx_config<R: Radio>(&self, radio: &mut R, params: &TxConfigParams)
        -> Result<TxConfigResult>;

    fn link_adr_req(&mut self, params: &LinkAdrReqParams<'_>) -> LinkAdrReqAns;

    fn rx_param_setup_req(&self, req: &RxParamSetupReq) -> RxParamSetupStatus;

    fn new_channel_req(&mut self, req: &NewChannelReq) -> Option<NewChannelStatus>;

    fn tx_param_setup_req(&self, req: &TxParamSetupReq) -> bool;

    fn dl_channel_req(&mut self, req: &DlChannelReq) -> Option<DlChannelStatus>;

    fn alternate_dr(&mut self, current: DR, alternate: AlternateDrType) -> DR;

    fn next_channel<RNG: RngCore, R: Radio>(
        &mut self,
        rng: &mut RNG,
        radio: &mut R,
        params: &NextChanParams,
    ) -> Result<NextChannel>;

    fn channel_add(&mut self, id: u8, channel: Channel) -> Result;

    fn channels_remove(&mut self, id: u8) -> bool;

    fn apply_dr_offset(&self, downlink_dwell_time: bool, datarate: DR, offset: u8) -> DR;

    fn rx_beacon_setup<R: Radio>(&self, radio: &mut R, params: &RxBeaconSetupParams)
        -> Result<DR>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dr_conversions() {
        assert_eq!(DR::new(5), Some(DR::_5));
        assert_eq!(DR::new(16), None);
        assert_eq!(DR::from_nibble(0x3a), DR::_10);
        assert_eq!(DR::_0.prev(), None);
        assert_eq!(DR::_4.prev(), Some(DR::_3));
        assert_eq!(DR::_15.next(), None);
        assert!(DR::_2 < DR::_3);
    }

    #[test]
    fn datarate_timings() {
        let dr = Datarate::lora(SpreadingFactor::_12, Bandwidth::_125KHz, 51, 0);
        assert_eq!(dr.symbol_time(), 32768);
        assert_eq!(dr.bandwidth(), 125_000);
        assert_eq!(dr.spreading_factor(), 12);
        let fsk = Datarate::fsk(50, 242);
        assert_eq!(fsk.symbol_time(), 160);
        assert_eq!(fsk.bandwidth(), 0);
        assert!(matches!(fsk.modem_params(), ModemParams::Fsk(p) if p.bitrate == 50_000));
    }

    #[test]
    fn configuration_tracks_region() {
        #[cfg(feature = "region-eu868")]
        assert_eq!(Configuration::new(Region::EU868).region(), Region::EU868);
        #[cfg(feature = "region-us915")]
        assert_eq!(Configuration::from(Region::US915).region(), Region::US915);
    }
}
