//! Regions with a configurable channel table: a few default channels the network may extend with
//! `NewChannelReq` or a Join-Accept CFList, each channel belonging to a duty-cycle band.
use super::*;
use core::marker::PhantomData;

use crate::mac_commands::{CfList, LinkAdrReq, LinkAdrStatus};
use crate::rng::random_below;
use common::{
    join_datarate_schedule, CountChannelsParams, IdentifyChannelsParams, LinkAdrVerifyParams,
};
use constants::*;
use store::Band;

#[cfg(any(
    feature = "region-as923-1",
    feature = "region-as923-1-jp",
    feature = "region-as923-2",
    feature = "region-as923-3",
    feature = "region-as923-4"
))]
mod as923;
#[cfg(feature = "region-cn779")]
mod cn779;
#[cfg(feature = "region-eu433")]
mod eu433;
#[cfg(feature = "region-eu868")]
mod eu868;
#[cfg(feature = "region-in865")]
mod in865;
#[cfg(feature = "region-kr920")]
mod kr920;
#[cfg(feature = "region-ru864")]
mod ru864;

#[cfg(feature = "region-as923-1")]
pub(crate) use as923::AS923_1;
#[cfg(feature = "region-as923-1-jp")]
pub(crate) use as923::AS923_1_JP;
#[cfg(feature = "region-as923-2")]
pub(crate) use as923::AS923_2;
#[cfg(feature = "region-as923-3")]
pub(crate) use as923::AS923_3;
#[cfg(feature = "region-as923-4")]
pub(crate) use as923::AS923_4;
#[cfg(feature = "region-cn779")]
pub(crate) use cn779::CN779;
#[cfg(feature = "region-eu433")]
pub(crate) use eu433::EU433;
#[cfg(feature = "region-eu868")]
pub(crate) use eu868::EU868;
#[cfg(feature = "region-in865")]
pub(crate) use in865::IN865;
#[cfg(feature = "region-kr920")]
pub(crate) use kr920::KR920;
#[cfg(feature = "region-ru864")]
pub(crate) use ru864::RU864;

/// Listen-before-talk requirement of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Lbt {
    /// The channel is free while the RSSI stays below this threshold, in dBm.
    pub rssi_free_threshold: i16,
    /// Carrier sense duration in ms.
    pub carrier_sense_time: u32,
}

const LBT_RX_BANDWIDTH: u32 = 200_000;

/// A device must be allowed at least this many join attempts.
const MIN_NB_JOIN_TRIALS: u8 = 48;

pub(crate) trait DynamicChannelRegion: ChannelRegion {
    const MAX_NB_CHANNELS: u8 = 16;
    /// Channels loaded by `init_channels`, they also serve as join channels.
    const NUM_DEFAULT_CHANNELS: u8;
    const BANDS: &'static [Band];

    const TX_MIN_DR: DR = DR::_0;
    const TX_MAX_DR: DR;
    const RX_MIN_DR: DR = DR::_0;
    const RX_MAX_DR: DR;
    const DEFAULT_DR: DR = DR::_0;
    /// Lowest datarate allowed while a dwell time limit is in force.
    const DWELL_LIMIT_DR: DR = DR::_0;
    const DEFAULT_UPLINK_DWELL_TIME: bool = false;
    const DEFAULT_DOWNLINK_DWELL_TIME: bool = false;
    const MAX_RX1_DR_OFFSET: u8 = 5;

    /// Largest power index (lowest power).
    const MIN_TX_POWER: u8;
    const MAX_TX_POWER: u8 = 0;
    const DEFAULT_TX_POWER: u8 = 0;
    const DEFAULT_MAX_EIRP: f32;

    const DUTY_CYCLE_ENABLED: bool;
    const MAX_RX_WINDOW: u32 = 3000;
    const RX_WND_2_FREQ: u32;
    const RX_WND_2_DR: DR = DR::_0;

    const BEACON_FREQ: u32;
    const BEACON_DR: DR = DR::_3;
    const BEACON_FORMAT: BeaconFormat = BeaconFormat { size: 17, rfu1_size: 2, rfu2_size: 0 };
    const PING_SLOT_FREQ: u32 = Self::BEACON_FREQ;
    const PING_SLOT_DR: DR = Self::BEACON_DR;

    const LBT: Option<Lbt> = None;
    /// The region honors `TxParamSetupReq`.
    const TX_PARAM_SETUP: bool = false;

    fn init_channels(channels: &mut [Channel]);

    /// Band of `frequency`, `None` when the region does not allow the frequency.
    fn band(frequency: u32) -> Option<u8>;

    fn apply_dr_offset(_downlink_dwell_time: bool, dr: DR, offset: u8) -> DR {
        DR::new((dr as u8).saturating_sub(offset)).unwrap_or(DR::_0)
    }

    /// EIRP ceiling on `frequency`, given the one requested by the MAC layer.
    fn max_eirp(_frequency: u32, max_eirp: f32) -> f32 {
        max_eirp
    }

    /// Datarate of the `trials`-th join request, `None` keeps the current datarate.
    fn join_datarate(_trials: u16) -> Option<DR> {
        None
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DynamicChannelPlan<R: DynamicChannelRegion> {
    store: PhyParamStore,
    _region: PhantomData<R>,
}

impl<R: DynamicChannelRegion> Default for DynamicChannelPlan<R> {
    fn default() -> Self {
        let mut plan = Self { store: PhyParamStore::default(), _region: PhantomData };
        plan.init_defaults(InitType::Defaults);
        plan
    }
}

impl<R: DynamicChannelRegion> DynamicChannelPlan<R> {
    pub fn get_max_payload_length(datarate: DR, repeater_compatible: bool, dwell_time: bool) -> u8 {
        R::get_max_payload_length(datarate, repeater_compatible, dwell_time)
    }

    fn join_channels() -> ChannelMask {
        ChannelMask::first(R::NUM_DEFAULT_CHANNELS as usize)
    }

    fn min_tx_dr(uplink_dwell_time: bool) -> DR {
        if uplink_dwell_time {
            R::DWELL_LIMIT_DR
        } else {
            R::TX_MIN_DR
        }
    }

    fn min_rx_dr(downlink_dwell_time: bool) -> DR {
        if downlink_dwell_time {
            R::DWELL_LIMIT_DR
        } else {
            R::RX_MIN_DR
        }
    }

    fn ch_mask_ctrl(raw: u8) -> ChMaskCtrl {
        match raw {
            0 => ChMaskCtrl::SetGroup(0),
            6 => ChMaskCtrl::EnableAll,
            _ => ChMaskCtrl::Reserved,
        }
    }
}

impl<R: DynamicChannelRegion> RegionHandler for DynamicChannelPlan<R> {
    fn store(&self) -> &PhyParamStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut PhyParamStore {
        &mut self.store
    }

    fn get_phy_param(&self, params: &GetPhyParams) -> PhyValue<'_> {
        let group2 = &self.store.group2;
        match params.attribute {
            PhyAttribute::MinRxDr => Self::min_rx_dr(params.downlink_dwell_time).into(),
            PhyAttribute::MinTxDr => Self::min_tx_dr(params.uplink_dwell_time).into(),
            PhyAttribute::MaxRxDr => R::RX_MAX_DR.into(),
            PhyAttribute::MaxTxDr => R::TX_MAX_DR.into(),
            PhyAttribute::NextLowerTxDr => common::get_next_lower_tx_dr(
                params.datarate,
                Self::min_tx_dr(params.uplink_dwell_time),
                R::TX_MAX_DR,
                R::MAX_NB_CHANNELS as usize,
                &group2.mask,
                &group2.channels,
            )
            .into(),
            PhyAttribute::MaxTxPower => PhyValue::Int(R::MAX_TX_POWER.into()),
            PhyAttribute::DefTxPower => PhyValue::Int(R::DEFAULT_TX_POWER.into()),
            PhyAttribute::DefAdrAckLimit => PhyValue::Int(ADR_ACK_LIMIT.into()),
            PhyAttribute::DefAdrAckDelay => PhyValue::Int(ADR_ACK_DELAY.into()),
            PhyAttribute::MaxPayload => PhyValue::Int(
                R::get_max_payload_length(params.datarate, false, params.uplink_dwell_time).into(),
            ),
            PhyAttribute::MaxPayloadRepeater => PhyValue::Int(
                R::get_max_payload_length(params.datarate, true, params.uplink_dwell_time).into(),
            ),
            PhyAttribute::DutyCycle => PhyValue::Int(R::DUTY_CYCLE_ENABLED.into()),
            PhyAttribute::MaxRxWindow => PhyValue::Int(R::MAX_RX_WINDOW.into()),
            PhyAttribute::ReceiveDelay1 => PhyValue::Int(RECEIVE_DELAY1.into()),
            PhyAttribute::ReceiveDelay2 => PhyValue::Int(RECEIVE_DELAY2.into()),
            PhyAttribute::JoinAcceptDelay1 => PhyValue::Int(JOIN_ACCEPT_DELAY1.into()),
            PhyAttribute::JoinAcceptDelay2 => PhyValue::Int(JOIN_ACCEPT_DELAY2.into()),
            PhyAttribute::MaxFcntGap => PhyValue::Int(MAX_FCNT_GAP.into()),
            PhyAttribute::RetransmitTimeout => PhyValue::Int(RETRANSMIT_TIMEOUT.into()),
            PhyAttribute::DefDr1Offset => PhyValue::Int(0),
            PhyAttribute::DefRx2Frequency => PhyValue::Int(R::RX_WND_2_FREQ.into()),
            PhyAttribute::DefRx2Dr => R::RX_WND_2_DR.into(),
            PhyAttribute::ChannelsMask => PhyValue::ChannelsMask(&group2.mask),
            PhyAttribute::ChannelsDefaultMask => PhyValue::ChannelsMask(&group2.default_mask),
            PhyAttribute::MaxNbChannels => PhyValue::Int(R::MAX_NB_CHANNELS.into()),
            PhyAttribute::Channels => PhyValue::Channels(group2.channels.as_slice()),
            PhyAttribute::DefTxDr => R::DEFAULT_DR.into(),
            PhyAttribute::DefUplinkDwellTime => PhyValue::Int(R::DEFAULT_UPLINK_DWELL_TIME.into()),
            PhyAttribute::DefDownlinkDwellTime => {
                PhyValue::Int(R::DEFAULT_DOWNLINK_DWELL_TIME.into())
            }
            PhyAttribute::DefMaxEirp => PhyValue::Float(R::DEFAULT_MAX_EIRP),
            PhyAttribute::DefAntennaGain => PhyValue::Float(DEFAULT_ANTENNA_GAIN),
            PhyAttribute::BeaconChannelFreq => PhyValue::Int(R::BEACON_FREQ.into()),
            PhyAttribute::BeaconFormat => PhyValue::BeaconFormat(R::BEACON_FORMAT),
            PhyAttribute::BeaconChannelOffset => PhyValue::Int(0),
            PhyAttribute::BeaconChannelDr => R::BEACON_DR.into(),
            PhyAttribute::BeaconNbChannels => PhyValue::Int(1),
            PhyAttribute::PingSlotChannelFreq => PhyValue::Int(R::PING_SLOT_FREQ.into()),
            PhyAttribute::PingSlotChannelDr => R::PING_SLOT_DR.into(),
            PhyAttribute::PingSlotNbChannels => PhyValue::Int(1),
            PhyAttribute::SfFromDr => PhyValue::Int(
                R::datarate(params.datarate).map_or(0, |dr| dr.spreading_factor().into()),
            ),
            PhyAttribute::BwFromDr => {
                PhyValue::Int(common::get_bandwidth(params.datarate, R::datarates()).into())
            }
        }
    }

    fn init_defaults(&mut self, init_type: InitType) {
        match init_type {
            InitType::Defaults => {
                self.store = PhyParamStore::with_capacity(R::MAX_NB_CHANNELS as usize, R::BANDS);
                let group2 = &mut self.store.group2;
                R::init_channels(&mut group2.channels);
                group2.default_mask = Self::join_channels();
                group2.mask = group2.default_mask;
                if let Some(lbt) = R::LBT {
                    group2.rssi_free_threshold = lbt.rssi_free_threshold;
                    group2.carrier_sense_time = lbt.carrier_sense_time;
                }
            }
            InitType::ResetToDefaultChannels => {
                let group2 = &mut self.store.group2;
                group2.channels.iter_mut().for_each(|channel| channel.rx1_frequency = 0);
                group2.mask = group2.default_mask;
            }
            InitType::ActivateDefaultChannels => {
                let group2 = &mut self.store.group2;
                group2.mask = group2.mask | group2.default_mask;
            }
        }
    }

    fn verify(&self, verify: Verify) -> bool {
        match verify {
            Verify::TxDr { datarate, uplink_dwell_time } => {
                common::value_in_range(datarate, Self::min_tx_dr(uplink_dwell_time), R::TX_MAX_DR)
                    && R::datarate(datarate).is_some()
            }
            Verify::DefTxDr(datarate) => common::value_in_range(datarate, R::TX_MIN_DR, DR::_5),
            Verify::RxDr { datarate, downlink_dwell_time } => {
                common::value_in_range(
                    datarate,
                    Self::min_rx_dr(downlink_dwell_time),
                    R::RX_MAX_DR,
                ) && R::datarate(datarate).is_some()
            }
            Verify::TxPower(power) | Verify::DefTxPower(power) => {
                common::value_in_range(power, R::MAX_TX_POWER, R::MIN_TX_POWER)
            }
            Verify::DutyCycle(_) => R::DUTY_CYCLE_ENABLED,
            Verify::Frequency(frequency) => R::band(frequency).is_some(),
            Verify::NbJoinTrials(trials) => trials >= MIN_NB_JOIN_TRIALS,
        }
    }

    fn apply_cf_list(&mut self, params: &ApplyCfListParams<'_>) {
        let Some(CfList::DynamicChannel(frequencies)) = CfList::parse(params.payload) else {
            return;
        };
        for id in R::NUM_DEFAULT_CHANNELS..R::MAX_NB_CHANNELS {
            match frequencies.get(usize::from(id - R::NUM_DEFAULT_CHANNELS)) {
                Some(&frequency) if frequency != 0 => {
                    // frequencies the region rejects leave the slot as it was
                    let channel = Channel::new(frequency, DR::_0, DR::_5, 0);
                    if self.channel_add(id, channel).is_err() {
                        warn!("CFList channel {} rejected", id);
                    }
                }
                _ => {
                    self.channels_remove(id);
                }
            }
        }
    }

    fn chan_mask_set(&mut self, mask: &ChannelMask, mask_type: ChannelsMaskType) -> bool {
        let group2 = &mut self.store.group2;
        match mask_type {
            ChannelsMaskType::Mask => group2.mask.copy_from(mask, 1),
            ChannelsMaskType::DefaultMask => group2.default_mask.copy_from(mask, 1),
        }
        true
    }

    fn compute_rx_window_parameters(
        &self,
        datarate: DR,
        min_rx_symbols: u8,
        rx_error: u32,
        wakeup_time: u32,
    ) -> RxWindowParams {
        R::rx_window_parameters(datarate.min(R::RX_MAX_DR), min_rx_symbols, rx_error, wakeup_time)
    }

    fn rx_config<RF: Radio>(&self, radio: &mut RF, params: &RxConfigParams) -> Result<DR> {
        let frequency = match params.rx_slot {
            RxSlot::Window1 => {
                let channel =
                    self.store.channel(params.channel.into()).ok_or(Error::ParameterInvalid)?;
                if channel.rx1_frequency != 0 {
                    channel.rx1_frequency
                } else {
                    channel.frequency
                }
            }
            _ => params.frequency,
        };
        R::configure_rx(radio, frequency, params)
    }

    fn tx_config<RF: Radio>(
        &self,
        radio: &mut RF,
        params: &TxConfigParams,
    ) -> Result<TxConfigResult> {
        let channel = self.store.channel(params.channel.into()).ok_or(Error::ParameterInvalid)?;
        let band = self.store.band(channel.band.into()).ok_or(Error::ParameterInvalid)?;
        let tx_power = common::limit_tx_power(params.tx_power, band.tx_max_power);
        let max_eirp = R::max_eirp(channel.frequency, params.max_eirp);
        let pw = common::compute_tx_power(tx_power, max_eirp, params.antenna_gain);
        let time_on_air =
            R::configure_tx(radio, channel.frequency, params.datarate, pw, params.pkt_len)?;
        Ok(TxConfigResult { tx_power, time_on_air })
    }

    fn link_adr_req(&mut self, params: &LinkAdrReqParams<'_>) -> LinkAdrReqAns {
        let channels = &self.store.group2.channels;
        let mut status = LinkAdrStatus::ok();
        let mut ch_mask = ChannelMask::default();
        let mut bytes_parsed = 0;
        let mut last = None;

        while let Some((req, len)) = LinkAdrReq::parse(&params.payload[bytes_parsed..]) {
            bytes_parsed += len;
            // only the last block decides the channel mask status
            status = LinkAdrStatus::ok();
            ch_mask = ChannelMask::default();
            ch_mask[0] = req.ch_mask;

            match Self::ch_mask_ctrl(req.ch_mask_ctrl) {
                ChMaskCtrl::SetGroup(_) if req.ch_mask == 0 => status.nack_channel_mask(),
                ChMaskCtrl::SetGroup(_) => {
                    let undefined = ch_mask
                        .enabled_channels(R::MAX_NB_CHANNELS.into())
                        .any(|id| !channels[id].is_defined());
                    if undefined {
                        status.nack_channel_mask();
                    }
                }
                ChMaskCtrl::EnableAll => {
                    for (id, channel) in channels.iter().enumerate() {
                        if channel.is_defined() {
                            ch_mask.set_channel(id, true);
                        }
                    }
                }
                _ => status.nack_channel_mask(),
            }
            trace!("LinkADRReq block, ChMaskCntl {} status {}", req.ch_mask_ctrl, status.bits());
            last = Some(req);
        }

        let Some(req) = last else {
            return LinkAdrReqAns {
                status: LinkAdrStatus::from_bits(0),
                datarate: params.current_datarate,
                tx_power: params.current_tx_power,
                nb_rep: params.current_nb_rep,
                bytes_parsed: 0,
            };
        };

        let (status, datarate, tx_power, nb_rep) =
            common::link_adr_req_verify_params(&LinkAdrVerifyParams {
                status,
                adr_enabled: params.adr_enabled,
                datarate: req.datarate,
                tx_power: req.tx_power,
                nb_rep: req.nb_rep,
                current_datarate: params.current_datarate,
                current_tx_power: params.current_tx_power,
                current_nb_rep: params.current_nb_rep,
                nb_channels: R::MAX_NB_CHANNELS.into(),
                mask: &ch_mask,
                min_datarate: Self::min_tx_dr(params.uplink_dwell_time),
                max_datarate: R::TX_MAX_DR,
                channels,
                min_tx_power: R::MIN_TX_POWER,
                max_tx_power: R::MAX_TX_POWER,
            });

        if status.is_ok() {
            self.store.group2.mask = ch_mask;
        }
        LinkAdrReqAns { status, datarate, tx_power, nb_rep, bytes_parsed }
    }

    fn rx_param_setup_req(&self, req: &RxParamSetupReq) -> RxParamSetupStatus {
        let mut status = RxParamSetupStatus::ok();
        if R::band(req.frequency).is_none() {
            status.nack_channel();
        }
        if !common::value_in_range(req.datarate, R::RX_MIN_DR, R::RX_MAX_DR)
            || R::datarate(req.datarate).is_none()
        {
            status.nack_rx2_datarate();
        }
        if req.rx1_dr_offset > R::MAX_RX1_DR_OFFSET {
            status.nack_rx1_dr_offset();
        }
        status
    }

    fn new_channel_req(&mut self, req: &NewChannelReq) -> Option<NewChannelStatus> {
        let mut status = NewChannelStatus::ok();
        if req.frequency == 0 {
            if !self.channels_remove(req.channel_id) {
                status.nack_channel_frequency();
                status.nack_datarate_range();
            }
            return Some(status);
        }
        let channel = Channel {
            frequency: req.frequency,
            rx1_frequency: 0,
            dr_range: req.dr_range,
            band: 0,
        };
        match self.channel_add(req.channel_id, channel) {
            Ok(()) => {}
            Err(Error::FrequencyInvalid) => status.nack_channel_frequency(),
            Err(Error::DatarateInvalid) => status.nack_datarate_range(),
            Err(_) => {
                status.nack_channel_frequency();
                status.nack_datarate_range();
            }
        }
        Some(status)
    }

    fn tx_param_setup_req(&self, _req: &TxParamSetupReq) -> bool {
        R::TX_PARAM_SETUP
    }

    fn dl_channel_req(&mut self, req: &DlChannelReq) -> Option<DlChannelStatus> {
        let mut status = DlChannelStatus::ok();
        if R::band(req.rx1_frequency).is_none() {
            status.nack_channel_frequency();
        }
        match self.store.group2.channels.get_mut(req.channel_id as usize) {
            Some(channel) if channel.is_defined() => {
                if status.is_ok() {
                    channel.rx1_frequency = req.rx1_frequency;
                }
            }
            _ => status.nack_uplink_frequency(),
        }
        Some(status)
    }

    fn alternate_dr(&mut self, current: DR, alternate: AlternateDrType) -> DR {
        let trials = &mut self.store.group1.join_trials_counter;
        *trials = match alternate {
            AlternateDrType::Alternate => trials.wrapping_add(1),
            AlternateDrType::Restore => trials.wrapping_sub(1),
        };
        R::join_datarate(*trials).unwrap_or(current)
    }

    fn next_channel<RNG: RngCore, RF: Radio>(
        &mut self,
        rng: &mut RNG,
        radio: &mut RF,
        params: &NextChanParams,
    ) -> Result<NextChannel> {
        let join_channels = Self::join_channels();
        if self.store.group2.mask.count(0, 1) == 0 {
            warn!("channel mask empty, reactivating the default channels");
            self.store.group2.mask = self.store.group2.mask | join_channels;
        }

        let identified = common::identify_channels(
            &IdentifyChannelsParams {
                aggr_time_off: params.aggr_time_off,
                last_aggr_tx: params.last_aggr_tx,
                now: params.now,
                duty_cycle_enabled: params.duty_cycle_enabled,
                last_tx_is_join_request: params.last_tx_is_join_request,
                expected_time_on_air: R::expected_time_on_air(
                    radio,
                    params.datarate,
                    params.pkt_len,
                ),
                count: CountChannelsParams {
                    joined: params.joined,
                    datarate: params.datarate,
                    mask: &self.store.group2.mask,
                    channels: &self.store.group2.channels,
                    join_channels: Some(&join_channels),
                },
            },
            &mut self.store.group1.bands,
        );

        let identified = match identified {
            Ok(identified) => identified,
            Err(Error::NoChannelFound) => {
                warn!("no channel for DR{}, reactivating the default channels", params.datarate);
                self.store.group2.mask = self.store.group2.mask | join_channels;
                return Err(Error::NoChannelFound);
            }
            Err(e) => return Err(e),
        };

        let candidates = &identified.channels;
        let start = random_below(rng, candidates.len());
        let channel = if R::LBT.is_some() {
            let group2 = &self.store.group2;
            let free = (0..candidates.len())
                .map(|i| candidates[(start + i) % candidates.len()])
                .find(|&id| {
                    radio.is_channel_free(
                        group2.channels[id as usize].frequency,
                        LBT_RX_BANDWIDTH,
                        group2.rssi_free_threshold,
                        group2.carrier_sense_time,
                    )
                });
            match free {
                Some(channel) => channel,
                None => {
                    warn!("listen-before-talk failed on {} channels", candidates.len());
                    return Err(Error::NoFreeChannelFound);
                }
            }
        } else {
            candidates[start]
        };

        debug!("next channel {} at DR{}", channel, params.datarate);
        Ok(NextChannel { channel, aggregated_time_off: identified.aggregated_time_off })
    }

    fn channel_add(&mut self, id: u8, channel: Channel) -> Result {
        if id >= R::MAX_NB_CHANNELS {
            return Err(Error::ParameterInvalid);
        }
        let range = channel.dr_range;
        let mut dr_invalid = !common::value_in_range(range.min, R::TX_MIN_DR, R::TX_MAX_DR)
            || !common::value_in_range(range.max, R::TX_MIN_DR, R::TX_MAX_DR)
            || range.min > range.max;
        let mut freq_invalid = false;

        // default channels keep their frequency and at least DR0..DR5
        if id < R::NUM_DEFAULT_CHANNELS {
            dr_invalid |=
                range.min > DR::_0 || !common::value_in_range(range.max, DR::_5, R::TX_MAX_DR);
            freq_invalid = self.store.group2.channels[id as usize].frequency != channel.frequency;
        }
        let band = if freq_invalid { None } else { R::band(channel.frequency) };

        match (dr_invalid, band) {
            (true, None) => Err(Error::FreqAndDrInvalid),
            (true, Some(_)) => Err(Error::DatarateInvalid),
            (false, None) => Err(Error::FrequencyInvalid),
            (false, Some(band)) => {
                let group2 = &mut self.store.group2;
                group2.channels[id as usize] = Channel { band, ..channel };
                group2.mask.set_channel(id.into(), true);
                Ok(())
            }
        }
    }

    fn channels_remove(&mut self, id: u8) -> bool {
        if id < R::NUM_DEFAULT_CHANNELS || id >= R::MAX_NB_CHANNELS {
            return false;
        }
        let group2 = &mut self.store.group2;
        group2.channels[id as usize] = Channel::default();
        common::chan_disable(&mut group2.mask, id, R::MAX_NB_CHANNELS)
    }

    fn apply_dr_offset(&self, downlink_dwell_time: bool, datarate: DR, offset: u8) -> DR {
        R::apply_dr_offset(downlink_dwell_time, datarate, offset)
    }

    fn rx_beacon_setup<RF: Radio>(
        &self,
        radio: &mut RF,
        params: &RxBeaconSetupParams,
    ) -> Result<DR> {
        let datarate = R::datarate(R::BEACON_DR).ok_or(Error::DatarateInvalid)?;
        common::rx_beacon_setup(radio, params, datarate, R::BEACON_FORMAT.size)?;
        Ok(R::BEACON_DR)
    }
}
