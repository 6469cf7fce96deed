//! Inputs and outputs of the region operations.
use super::store::{Channel, ChannelMask};
use super::DR;
use crate::mac_commands::LinkAdrStatus;
use crate::TimerTime;

/// Attributes that can be queried with [`super::Configuration::get_phy_param`].
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhyAttribute {
    MinRxDr,
    MinTxDr,
    MaxRxDr,
    MaxTxDr,
    /// Next lower datarate than [`GetPhyParams::datarate`] usable by the enabled channels.
    NextLowerTxDr,
    MaxTxPower,
    DefTxPower,
    DefAdrAckLimit,
    DefAdrAckDelay,
    /// Max application payload for [`GetPhyParams::datarate`].
    MaxPayload,
    MaxPayloadRepeater,
    DutyCycle,
    MaxRxWindow,
    ReceiveDelay1,
    ReceiveDelay2,
    JoinAcceptDelay1,
    JoinAcceptDelay2,
    MaxFcntGap,
    RetransmitTimeout,
    DefDr1Offset,
    DefRx2Frequency,
    DefRx2Dr,
    ChannelsMask,
    ChannelsDefaultMask,
    MaxNbChannels,
    Channels,
    DefTxDr,
    DefUplinkDwellTime,
    DefDownlinkDwellTime,
    DefMaxEirp,
    DefAntennaGain,
    BeaconChannelFreq,
    BeaconFormat,
    BeaconChannelDr,
    BeaconNbChannels,
    /// First beacon channel of the channel plan in use (CN470).
    BeaconChannelOffset,
    PingSlotChannelFreq,
    PingSlotChannelDr,
    PingSlotNbChannels,
    SfFromDr,
    BwFromDr,
}

/// A [`PhyAttribute`] query and its context.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetPhyParams {
    pub attribute: PhyAttribute,
    pub datarate: DR,
    pub uplink_dwell_time: bool,
    pub downlink_dwell_time: bool,
    /// Beacon or ping slot channel.
    pub channel: u8,
}

impl GetPhyParams {
    pub fn new(attribute: PhyAttribute) -> Self {
        Self {
            attribute,
            datarate: DR::_0,
            uplink_dwell_time: false,
            downlink_dwell_time: false,
            channel: 0,
        }
    }

    pub fn datarate(mut self, datarate: DR) -> Self {
        self.datarate = datarate;
        self
    }

    pub fn uplink_dwell_time(mut self, dwell_time: bool) -> Self {
        self.uplink_dwell_time = dwell_time;
        self
    }

    pub fn downlink_dwell_time(mut self, dwell_time: bool) -> Self {
        self.downlink_dwell_time = dwell_time;
        self
    }

    pub fn channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }
}

/// Layout of the Class-B beacon frame.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeaconFormat {
    pub size: u8,
    pub rfu1_size: u8,
    pub rfu2_size: u8,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhyValue<'a> {
    Int(i64),
    Float(f32),
    ChannelsMask(&'a ChannelMask),
    Channels(&'a [Channel]),
    BeaconFormat(BeaconFormat),
}

impl PhyValue<'_> {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PhyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            PhyValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_dr(&self) -> Option<DR> {
        self.as_int().and_then(|v| u8::try_from(v).ok()).and_then(DR::new)
    }
}

impl From<DR> for PhyValue<'_> {
    fn from(dr: DR) -> Self {
        PhyValue::Int(dr as i64)
    }
}

/// What [`super::Configuration::verify`] checks.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verify {
    TxDr { datarate: DR, uplink_dwell_time: bool },
    RxDr { datarate: DR, downlink_dwell_time: bool },
    DefTxDr(DR),
    TxPower(u8),
    DefTxPower(u8),
    /// Whether the region allows disabling the duty cycle.
    DutyCycle(bool),
    Frequency(u32),
    NbJoinTrials(u8),
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitType {
    /// Load the region's channels, masks and bands.
    Defaults,
    /// Restore the mask from the default mask.
    ResetToDefaultChannels,
    /// Enable the default channels on top of the current mask.
    ActivateDefaultChannels,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelsMaskType {
    Mask,
    DefaultMask,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlternateDrType {
    Alternate,
    /// Undo the last alternation, when a join request could not be sent.
    Restore,
}

/// Interpretation of the `ChMaskCtrl` field of a `LinkADRReq`.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChMaskCtrl {
    /// `ChMask` applies to the channels `16 * n..16 * n + 16`.
    SetGroup(u8),
    /// US915/AU915: each bit of `ChMask` applies to one bank of 8 channels.
    SubBands,
    /// Enable all channels (of the 125 kHz tier on US915/AU915), `ChMask` applies to the rest.
    EnableAll,
    /// Disable all channels (of the 125 kHz tier on US915/AU915), `ChMask` applies to the rest.
    DisableAll,
    Reserved,
}

/// Input of [`super::Configuration::apply_cf_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyCfListParams<'a> {
    pub payload: &'a [u8],
    /// Channel the accepted join request was sent on.
    pub join_channel: u8,
}

impl<'a> ApplyCfListParams<'a> {
    pub fn new(payload: &'a [u8], join_channel: u8) -> Self {
        Self { payload, join_channel }
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxWindowParams {
    pub datarate: DR,
    /// Bandwidth in Hz.
    pub bandwidth: u32,
    /// Symbol timeout.
    pub window_timeout: u32,
    /// Start of the window relative to the nominal receive delay, in ms.
    pub window_offset: i32,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxSlot {
    Window1,
    Window2,
    /// Continuous reception on the RX2 parameters (Class C).
    ClassC,
    PingSlot,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxConfigParams {
    /// Channel of the uplink that opened the window.
    pub channel: u8,
    pub datarate: DR,
    /// Frequency of the window, used by every slot except RX1.
    pub frequency: u32,
    pub rx_slot: RxSlot,
    pub window_timeout: u32,
    pub rx_continuous: bool,
    pub repeater_support: bool,
    pub downlink_dwell_time: bool,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TxConfigParams {
    pub channel: u8,
    pub datarate: DR,
    pub tx_power: u8,
    pub max_eirp: f32,
    pub antenna_gain: f32,
    pub pkt_len: u8,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxConfigResult {
    /// Power index actually used, after the band and regional limits.
    pub tx_power: u8,
    pub time_on_air: TimerTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAdrReqParams<'a> {
    /// One or more contiguous `LinkADRReq` blocks, CID included.
    pub payload: &'a [u8],
    pub adr_enabled: bool,
    pub uplink_dwell_time: bool,
    pub current_datarate: DR,
    pub current_tx_power: u8,
    pub current_nb_rep: u8,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAdrReqAns {
    pub status: LinkAdrStatus,
    pub datarate: DR,
    pub tx_power: u8,
    pub nb_rep: u8,
    pub bytes_parsed: usize,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetBandTxDoneParams {
    pub channel: u8,
    pub joined: bool,
    /// Time-on-air of the transmission, in ms.
    pub time_on_air: TimerTime,
    /// Time the transmission ended.
    pub now: TimerTime,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextChanParams {
    /// Aggregated time-off imposed by the network.
    pub aggr_time_off: TimerTime,
    pub last_aggr_tx: Option<TimerTime>,
    pub datarate: DR,
    pub joined: bool,
    pub duty_cycle_enabled: bool,
    pub now: TimerTime,
    pub last_tx_is_join_request: bool,
    /// Length of the frame about to be sent, used to estimate its time-on-air.
    pub pkt_len: u8,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextChannel {
    pub channel: u8,
    /// Aggregated time-off, reset to 0 once its window has expired.
    pub aggregated_time_off: TimerTime,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxBeaconSetupParams {
    pub symbol_timeout: u16,
    /// Reception time in ms, 0 for continuous reception.
    pub rx_time: u32,
    pub frequency: u32,
}
