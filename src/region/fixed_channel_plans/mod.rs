//! Regions with a fixed channel plan: 64 uplink channels of 125 kHz followed by 8 of 500 kHz,
//! the network only enables or disables them.
use super::*;
use core::marker::PhantomData;

use crate::mac_commands::{CfList, LinkAdrReq, LinkAdrStatus};
use crate::rng::random_below;
use common::{CountChannelsParams, IdentifyChannelsParams, LinkAdrVerifyParams};
use constants::*;
use store::Band;

mod join_channels;
use join_channels::next_join_channel;

#[cfg(feature = "region-au915")]
mod au915;
#[cfg(feature = "region-us915")]
mod us915;

#[cfg(feature = "region-au915")]
pub(crate) use au915::AU915;
#[cfg(feature = "region-us915")]
pub(crate) use us915::US915;

const MAX_NB_CHANNELS: u8 = 72;
const NUM_125KHZ_CHANNELS: u8 = 64;
/// Channel mask words holding the 125 kHz channels.
const WORDS_125KHZ: usize = 4;
/// Channel mask word holding the 500 kHz channels, in its low byte.
const WORD_500KHZ: usize = 4;

const BANDS: [Band; 1] = [Band::new(1, 0)];

const RX1_FIRST_FREQ: u32 = 923_300_000;
const RX1_LAST_FREQ: u32 = 927_500_000;
const RX1_STEP: u32 = 600_000;
const NUM_DOWNLINK_CHANNELS: u8 = 8;

/// A device must be allowed a join attempt on each channel tier.
const MIN_NB_JOIN_TRIALS: u8 = 2;

pub(crate) trait FixedChannelRegion: ChannelRegion {
    const FIRST_125KHZ_FREQ: u32;
    const FIRST_500KHZ_FREQ: u32;
    const STEP_125KHZ: u32 = 200_000;
    const STEP_500KHZ: u32 = 1_600_000;
    /// Uplink frequencies allowed by the region.
    const FREQ_RANGE: (u32, u32);

    const TX_MIN_DR: DR = DR::_0;
    const TX_MAX_DR: DR;
    const RX_MIN_DR: DR = DR::_8;
    const RX_MAX_DR: DR = DR::_13;
    const DEFAULT_DR: DR;
    const DWELL_LIMIT_DR: DR = DR::_0;
    const DEFAULT_UPLINK_DWELL_TIME: bool = false;
    const DEFAULT_DOWNLINK_DWELL_TIME: bool = false;
    const MAX_RX1_DR_OFFSET: u8;
    /// Datarates from this one up use the 500 kHz channels.
    const FIRST_500KHZ_DR: DR;
    /// Join requests alternate between these two datarates.
    const JOIN_DR_125KHZ: DR;
    const JOIN_DR_500KHZ: DR;

    const MIN_TX_POWER: u8 = 14;
    const MAX_TX_POWER: u8 = 0;
    const DEFAULT_TX_POWER: u8 = 0;
    const DEFAULT_MAX_EIRP: f32 = 30.0;

    const MAX_RX_WINDOW: u32 = 3000;
    const RX_WND_2_FREQ: u32 = 923_300_000;
    const RX_WND_2_DR: DR = DR::_8;

    const BEACON_DR: DR;
    const PING_SLOT_DR: DR = DR::_8;

    /// The region honors `TxParamSetupReq`.
    const TX_PARAM_SETUP: bool = false;
    /// FCC power ceilings: power index 2 at least on the 500 kHz channels, 5 at least while
    /// fewer than 50 channels of 125 kHz are enabled.
    const FCC_POWER_LIMIT: bool = false;

    /// RX1 datarate for an uplink at `dr`, indexed by the RX1 offset. `-1` marks an unused
    /// entry.
    fn rx1_offsets(dr: DR) -> &'static [i8];

    /// Conducted power in dBm for the power index `tx_power`.
    fn tx_power_dbm(tx_power: u8, max_eirp: f32, antenna_gain: f32) -> i8 {
        common::compute_tx_power(tx_power, max_eirp, antenna_gain)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FixedChannelPlan<F: FixedChannelRegion> {
    store: PhyParamStore,
    _region: PhantomData<F>,
}

impl<F: FixedChannelRegion> Default for FixedChannelPlan<F> {
    fn default() -> Self {
        let mut plan = Self { store: PhyParamStore::default(), _region: PhantomData };
        plan.init_defaults(InitType::Defaults);
        plan
    }
}

impl<F: FixedChannelRegion> FixedChannelPlan<F> {
    pub fn get_max_payload_length(datarate: DR, repeater_compatible: bool, dwell_time: bool) -> u8 {
        F::get_max_payload_length(datarate, repeater_compatible, dwell_time)
    }

    fn min_tx_dr(uplink_dwell_time: bool) -> DR {
        if uplink_dwell_time {
            F::DWELL_LIMIT_DR
        } else {
            F::TX_MIN_DR
        }
    }

    fn min_rx_dr(downlink_dwell_time: bool) -> DR {
        if downlink_dwell_time {
            F::RX_MIN_DR.max(F::DWELL_LIMIT_DR)
        } else {
            F::RX_MIN_DR
        }
    }

    fn default_mask() -> ChannelMask {
        ChannelMask::new([0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0x00FF, 0x0000])
    }

    fn ch_mask_ctrl(raw: u8) -> ChMaskCtrl {
        match raw {
            0..=4 => ChMaskCtrl::SetGroup(raw),
            5 => ChMaskCtrl::SubBands,
            6 => ChMaskCtrl::EnableAll,
            7 => ChMaskCtrl::DisableAll,
            _ => ChMaskCtrl::Reserved,
        }
    }

    /// Downlink frequency of the RX1 window, beacons and ping slots on `channel`.
    fn downlink_frequency(channel: u8) -> u32 {
        RX1_FIRST_FREQ + u32::from(channel % NUM_DOWNLINK_CHANNELS) * RX1_STEP
    }

    /// Frequencies a device may be told to receive on: the RX1 grid, within the band.
    fn frequency_valid(frequency: u32) -> bool {
        let (low, high) = F::FREQ_RANGE;
        (RX1_FIRST_FREQ..=RX1_LAST_FREQ).contains(&frequency)
            && (frequency - RX1_FIRST_FREQ) % RX1_STEP == 0
            && (low..=high).contains(&frequency)
    }

    fn count_125khz(mask: &ChannelMask) -> u8 {
        mask.count(0, WORDS_125KHZ)
    }

    fn limit_tx_power(&self, tx_power: u8, band_max: u8, datarate: DR) -> u8 {
        let tx_power = common::limit_tx_power(tx_power, band_max);
        if !F::FCC_POWER_LIMIT {
            tx_power
        } else if datarate >= F::FIRST_500KHZ_DR {
            tx_power.max(2)
        } else if Self::count_125khz(&self.store.group2.mask) < 50 {
            tx_power.max(5)
        } else {
            tx_power
        }
    }

    /// Apply one `LinkADRReq` block to `mask`.
    fn apply_ch_mask(mask: &mut ChannelMask, ctrl: ChMaskCtrl, ch_mask: u16) {
        match ctrl {
            ChMaskCtrl::EnableAll | ChMaskCtrl::DisableAll => {
                let all = if ctrl == ChMaskCtrl::EnableAll { 0xFFFF } else { 0x0000 };
                for word in 0..WORDS_125KHZ {
                    mask[word] = all;
                }
                mask[WORD_500KHZ] = ch_mask & 0x00FF;
            }
            ChMaskCtrl::SubBands => {
                for bank in 0..8u16 {
                    let word = usize::from(bank / 2);
                    let bits = if bank % 2 == 0 { 0x00FF } else { 0xFF00 };
                    if ch_mask & (1 << bank) != 0 {
                        mask[word] |= bits;
                        mask[WORD_500KHZ] |= 1 << bank;
                    } else {
                        mask[word] &= !bits;
                        mask[WORD_500KHZ] &= !(1 << bank);
                    }
                }
            }
            ChMaskCtrl::SetGroup(group) if usize::from(group) == WORD_500KHZ => {
                mask[WORD_500KHZ] = ch_mask & 0x00FF;
            }
            ChMaskCtrl::SetGroup(group) => mask[usize::from(group)] = ch_mask,
            ChMaskCtrl::Reserved => {}
        }
    }
}

impl<F: FixedChannelRegion> RegionHandler for FixedChannelPlan<F> {
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
            PhyAttribute::MaxRxDr => F::RX_MAX_DR.into(),
            PhyAttribute::MaxTxDr => F::TX_MAX_DR.into(),
            PhyAttribute::NextLowerTxDr => common::get_next_lower_tx_dr(
                params.datarate,
                Self::min_tx_dr(params.uplink_dwell_time),
                F::TX_MAX_DR,
                MAX_NB_CHANNELS.into(),
                &group2.mask,
                &group2.channels,
            )
            .into(),
            PhyAttribute::MaxTxPower => PhyValue::Int(F::MAX_TX_POWER.into()),
            PhyAttribute::DefTxPower => PhyValue::Int(F::DEFAULT_TX_POWER.into()),
            PhyAttribute::DefAdrAckLimit => PhyValue::Int(ADR_ACK_LIMIT.into()),
            PhyAttribute::DefAdrAckDelay => PhyValue::Int(ADR_ACK_DELAY.into()),
            PhyAttribute::MaxPayload => PhyValue::Int(
                F::get_max_payload_length(params.datarate, false, params.uplink_dwell_time).into(),
            ),
            PhyAttribute::MaxPayloadRepeater => PhyValue::Int(
                F::get_max_payload_length(params.datarate, true, params.uplink_dwell_time).into(),
            ),
            PhyAttribute::DutyCycle => PhyValue::Int(0),
            PhyAttribute::MaxRxWindow => PhyValue::Int(F::MAX_RX_WINDOW.into()),
            PhyAttribute::ReceiveDelay1 => PhyValue::Int(RECEIVE_DELAY1.into()),
            PhyAttribute::ReceiveDelay2 => PhyValue::Int(RECEIVE_DELAY2.into()),
            PhyAttribute::JoinAcceptDelay1 => PhyValue::Int(JOIN_ACCEPT_DELAY1.into()),
            PhyAttribute::JoinAcceptDelay2 => PhyValue::Int(JOIN_ACCEPT_DELAY2.into()),
            PhyAttribute::MaxFcntGap => PhyValue::Int(MAX_FCNT_GAP.into()),
            PhyAttribute::RetransmitTimeout => PhyValue::Int(RETRANSMIT_TIMEOUT.into()),
            PhyAttribute::DefDr1Offset => PhyValue::Int(0),
            PhyAttribute::DefRx2Frequency => PhyValue::Int(F::RX_WND_2_FREQ.into()),
            PhyAttribute::DefRx2Dr => F::RX_WND_2_DR.into(),
            PhyAttribute::ChannelsMask => PhyValue::ChannelsMask(&group2.mask),
            PhyAttribute::ChannelsDefaultMask => PhyValue::ChannelsMask(&group2.default_mask),
            PhyAttribute::MaxNbChannels => PhyValue::Int(MAX_NB_CHANNELS.into()),
            PhyAttribute::Channels => PhyValue::Channels(group2.channels.as_slice()),
            PhyAttribute::DefTxDr => F::DEFAULT_DR.into(),
            PhyAttribute::DefUplinkDwellTime => PhyValue::Int(F::DEFAULT_UPLINK_DWELL_TIME.into()),
            PhyAttribute::DefDownlinkDwellTime => {
                PhyValue::Int(F::DEFAULT_DOWNLINK_DWELL_TIME.into())
            }
            PhyAttribute::DefMaxEirp => PhyValue::Float(F::DEFAULT_MAX_EIRP),
            PhyAttribute::DefAntennaGain => PhyValue::Float(DEFAULT_ANTENNA_GAIN),
            PhyAttribute::BeaconChannelFreq | PhyAttribute::PingSlotChannelFreq => {
                PhyValue::Int(Self::downlink_frequency(params.channel).into())
            }
            PhyAttribute::BeaconFormat => PhyValue::BeaconFormat(BeaconFormat {
                size: 23,
                rfu1_size: 5,
                rfu2_size: 3,
            }),
            PhyAttribute::BeaconChannelOffset => PhyValue::Int(0),
            PhyAttribute::BeaconChannelDr => F::BEACON_DR.into(),
            PhyAttribute::BeaconNbChannels | PhyAttribute::PingSlotNbChannels => {
                PhyValue::Int(NUM_DOWNLINK_CHANNELS.into())
            }
            PhyAttribute::PingSlotChannelDr => F::PING_SLOT_DR.into(),
            PhyAttribute::SfFromDr => PhyValue::Int(
                F::datarate(params.datarate).map_or(0, |dr| dr.spreading_factor().into()),
            ),
            PhyAttribute::BwFromDr => {
                PhyValue::Int(common::get_bandwidth(params.datarate, F::datarates()).into())
            }
        }
    }

    fn init_defaults(&mut self, init_type: InitType) {
        match init_type {
            InitType::Defaults => {
                self.store = PhyParamStore::with_capacity(MAX_NB_CHANNELS.into(), &BANDS);
                let (tier_125, tier_500) =
                    self.store.group2.channels.split_at_mut(NUM_125KHZ_CHANNELS.into());
                let last_125khz_dr = F::FIRST_500KHZ_DR.prev().unwrap_or(DR::_0);
                for (i, channel) in tier_125.iter_mut().enumerate() {
                    let frequency = F::FIRST_125KHZ_FREQ + i as u32 * F::STEP_125KHZ;
                    *channel = Channel::new(frequency, DR::_0, last_125khz_dr, 0);
                }
                for (i, channel) in tier_500.iter_mut().enumerate() {
                    let frequency = F::FIRST_500KHZ_FREQ + i as u32 * F::STEP_500KHZ;
                    *channel = Channel::new(frequency, F::FIRST_500KHZ_DR, F::FIRST_500KHZ_DR, 0);
                }
                let group2 = &mut self.store.group2;
                group2.default_mask = Self::default_mask();
                group2.mask = group2.default_mask;
                self.store.group1.mask_remaining = group2.mask;
            }
            InitType::ResetToDefaultChannels | InitType::ActivateDefaultChannels => {
                let mask = self.store.group2.default_mask;
                self.store.group2.mask = mask;
                let remaining = &mut self.store.group1.mask_remaining;
                *remaining = *remaining & mask;
            }
        }
    }

    fn verify(&self, verify: Verify) -> bool {
        match verify {
            Verify::TxDr { datarate, uplink_dwell_time } => {
                common::value_in_range(datarate, Self::min_tx_dr(uplink_dwell_time), F::TX_MAX_DR)
                    && F::datarate(datarate).is_some()
            }
            Verify::DefTxDr(datarate) => common::value_in_range(datarate, DR::_0, DR::_5),
            Verify::RxDr { datarate, downlink_dwell_time } => {
                common::value_in_range(
                    datarate,
                    Self::min_rx_dr(downlink_dwell_time),
                    F::RX_MAX_DR,
                ) && F::datarate(datarate).is_some()
            }
            Verify::TxPower(power) | Verify::DefTxPower(power) => {
                common::value_in_range(power, F::MAX_TX_POWER, F::MIN_TX_POWER)
            }
            // no duty cycle to enforce
            Verify::DutyCycle(_) => false,
            Verify::Frequency(frequency) => Self::frequency_valid(frequency),
            Verify::NbJoinTrials(trials) => trials >= MIN_NB_JOIN_TRIALS,
        }
    }

    fn apply_cf_list(&mut self, params: &ApplyCfListParams<'_>) {
        let Some(CfList::FixedChannel(mask)) = CfList::parse(params.payload) else {
            return;
        };
        let group2 = &mut self.store.group2;
        group2.mask.copy_from(&mask, WORD_500KHZ + 1);
        group2.mask[WORD_500KHZ] &= 0x00FF;
        let remaining = &mut self.store.group1.mask_remaining;
        *remaining = *remaining & group2.mask;
    }

    fn chan_mask_set(&mut self, mask: &ChannelMask, mask_type: ChannelsMaskType) -> bool {
        let nb_125khz = Self::count_125khz(mask);
        if nb_125khz > 0 && nb_125khz < 2 {
            return false;
        }
        let group2 = &mut self.store.group2;
        match mask_type {
            ChannelsMaskType::Mask => {
                group2.mask = *mask;
                group2.default_mask[WORD_500KHZ] &= 0x00FF;
                group2.default_mask[WORD_500KHZ + 1] = 0;
                let remaining = &mut self.store.group1.mask_remaining;
                *remaining = *remaining & group2.mask;
            }
            ChannelsMaskType::DefaultMask => group2.default_mask = *mask,
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
        F::rx_window_parameters(datarate.min(F::RX_MAX_DR), min_rx_symbols, rx_error, wakeup_time)
    }

    fn rx_config<RF: Radio>(&self, radio: &mut RF, params: &RxConfigParams) -> Result<DR> {
        let frequency = match params.rx_slot {
            RxSlot::Window1 => Self::downlink_frequency(params.channel),
            _ => params.frequency,
        };
        F::configure_rx(radio, frequency, params)
    }

    fn tx_config<RF: Radio>(
        &self,
        radio: &mut RF,
        params: &TxConfigParams,
    ) -> Result<TxConfigResult> {
        let channel = self.store.channel(params.channel.into()).ok_or(Error::ParameterInvalid)?;
        let band = self.store.band(channel.band.into()).ok_or(Error::ParameterInvalid)?;
        let tx_power = self.limit_tx_power(params.tx_power, band.tx_max_power, params.datarate);
        let pw = F::tx_power_dbm(tx_power, params.max_eirp, params.antenna_gain);
        let time_on_air =
            F::configure_tx(radio, channel.frequency, params.datarate, pw, params.pkt_len)?;
        Ok(TxConfigResult { tx_power, time_on_air })
    }

    fn link_adr_req(&mut self, params: &LinkAdrReqParams<'_>) -> LinkAdrReqAns {
        let mut status = LinkAdrStatus::ok();
        // blocks accumulate on top of the current mask
        let mut ch_mask = self.store.group2.mask;
        let mut bytes_parsed = 0;
        let mut last = None;

        while let Some((req, len)) = LinkAdrReq::parse(&params.payload[bytes_parsed..]) {
            bytes_parsed += len;
            status = LinkAdrStatus::ok();
            let ctrl = Self::ch_mask_ctrl(req.ch_mask_ctrl);
            if ctrl == ChMaskCtrl::Reserved {
                status.nack_channel_mask();
            }
            Self::apply_ch_mask(&mut ch_mask, ctrl, req.ch_mask);
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

        // 125 kHz datarates must hop on at least 2 channels
        if req.datarate < F::FIRST_500KHZ_DR as u8 && Self::count_125khz(&ch_mask) < 2 {
            status.nack_channel_mask();
        }

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
                nb_channels: MAX_NB_CHANNELS.into(),
                mask: &ch_mask,
                min_datarate: Self::min_tx_dr(params.uplink_dwell_time),
                max_datarate: F::TX_MAX_DR,
                channels: &self.store.group2.channels,
                min_tx_power: F::MIN_TX_POWER,
                max_tx_power: F::MAX_TX_POWER,
            });

        if status.is_ok() {
            self.store.group2.mask = ch_mask;
            let remaining = &mut self.store.group1.mask_remaining;
            for word in 0..WORDS_125KHZ {
                remaining[word] &= ch_mask[word];
            }
            remaining[WORD_500KHZ] = ch_mask[WORD_500KHZ];
            remaining[WORD_500KHZ + 1] = ch_mask[WORD_500KHZ + 1];
        }
        LinkAdrReqAns { status, datarate, tx_power, nb_rep, bytes_parsed }
    }

    fn rx_param_setup_req(&self, req: &RxParamSetupReq) -> RxParamSetupStatus {
        let mut status = RxParamSetupStatus::ok();
        if !Self::frequency_valid(req.frequency) {
            status.nack_channel();
        }
        if !common::value_in_range(req.datarate, F::RX_MIN_DR, F::RX_MAX_DR)
            || F::datarate(req.datarate).is_none()
        {
            status.nack_rx2_datarate();
        }
        if req.rx1_dr_offset > F::MAX_RX1_DR_OFFSET {
            status.nack_rx1_dr_offset();
        }
        status
    }

    fn new_channel_req(&mut self, _req: &NewChannelReq) -> Option<NewChannelStatus> {
        None
    }

    fn tx_param_setup_req(&self, _req: &TxParamSetupReq) -> bool {
        F::TX_PARAM_SETUP
    }

    fn dl_channel_req(&mut self, _req: &DlChannelReq) -> Option<DlChannelStatus> {
        None
    }

    fn alternate_dr(&mut self, _current: DR, alternate: AlternateDrType) -> DR {
        let trials = &mut self.store.group1.join_trials_counter;
        *trials = match alternate {
            AlternateDrType::Alternate => trials.wrapping_add(1),
            AlternateDrType::Restore => trials.wrapping_sub(1),
        };
        // one join request out of nine goes over the 500 kHz channels
        if *trials % 9 == 0 {
            F::JOIN_DR_500KHZ
        } else {
            F::JOIN_DR_125KHZ
        }
    }

    fn next_channel<RNG: RngCore, RF: Radio>(
        &mut self,
        rng: &mut RNG,
        radio: &mut RF,
        params: &NextChanParams,
    ) -> Result<NextChannel> {
        let mask = self.store.group2.mask;
        let group1 = &mut self.store.group1;
        if Self::count_125khz(&group1.mask_remaining) == 0 {
            group1.mask_remaining.copy_from(&mask, WORDS_125KHZ);
            group1.join_channel_group_index = 0;
        }
        if params.datarate >= F::FIRST_500KHZ_DR && group1.mask_remaining[WORD_500KHZ] & 0xFF == 0
        {
            group1.mask_remaining[WORD_500KHZ] = mask[WORD_500KHZ];
        }

        let identified = common::identify_channels(
            &IdentifyChannelsParams {
                aggr_time_off: params.aggr_time_off,
                last_aggr_tx: params.last_aggr_tx,
                now: params.now,
                duty_cycle_enabled: params.duty_cycle_enabled,
                last_tx_is_join_request: params.last_tx_is_join_request,
                expected_time_on_air: F::expected_time_on_air(
                    radio,
                    params.datarate,
                    params.pkt_len,
                ),
                count: CountChannelsParams {
                    joined: params.joined,
                    datarate: params.datarate,
                    mask: &group1.mask_remaining,
                    channels: &self.store.group2.channels,
                    join_channels: None,
                },
            },
            &mut group1.bands,
        )?;

        let channel = if params.joined {
            identified.channels[random_below(rng, identified.channels.len())]
        } else if params.datarate < F::FIRST_500KHZ_DR {
            next_join_channel(
                rng,
                &group1.mask_remaining,
                &mut group1.join_channel_group_index,
            )
            .ok_or(Error::ParameterInvalid)?
        } else {
            let bits = group1.mask_remaining[WORD_500KHZ] & 0x00FF;
            if bits == 0 {
                return Err(Error::ParameterInvalid);
            }
            NUM_125KHZ_CHANNELS + bits.trailing_zeros() as u8
        };

        common::chan_disable(&mut group1.mask_remaining, channel, MAX_NB_CHANNELS);
        debug!("next channel {} at DR{}", channel, params.datarate);
        Ok(NextChannel { channel, aggregated_time_off: identified.aggregated_time_off })
    }

    fn channel_add(&mut self, _id: u8, _channel: Channel) -> Result {
        Err(Error::ParameterInvalid)
    }

    fn channels_remove(&mut self, _id: u8) -> bool {
        false
    }

    fn apply_dr_offset(&self, downlink_dwell_time: bool, datarate: DR, offset: u8) -> DR {
        let table = F::rx1_offsets(datarate);
        match table.get(usize::from(offset)) {
            Some(&dr) if dr >= 0 => DR::new(dr as u8).unwrap_or(F::RX_MIN_DR),
            _ => Self::min_tx_dr(downlink_dwell_time),
        }
    }

    fn rx_beacon_setup<RF: Radio>(
        &self,
        radio: &mut RF,
        params: &RxBeaconSetupParams,
    ) -> Result<DR> {
        let datarate = F::datarate(F::BEACON_DR).ok_or(Error::DatarateInvalid)?;
        common::rx_beacon_setup(radio, params, datarate, 23)?;
        Ok(F::BEACON_DR)
    }
}
