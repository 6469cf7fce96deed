//! CN470 region support (470..510 MHz).
//!
//! The region defines four channel plans, for 20 MHz and 26 MHz antennas, of type A and B. Until
//! a plan is known, the channel table holds the common join channels and the plan is selected
//! from the channel of the accepted join request. Devices activated by personalization use the
//! 20 MHz type A plan.
use super::*;
use lora_modulation::{Bandwidth, SpreadingFactor};

use crate::mac_commands::{CfList, LinkAdrReq, LinkAdrStatus};
use crate::rng::random_below;
use common::{
    join_datarate_schedule, CountChannelsParams, IdentifyChannelsParams, LinkAdrVerifyParams,
};
use constants::*;
use store::{Band, Cn470ChannelPlan};

mod plans;
use plans::NB_JOIN_CHANNELS;

const MAX_NB_CHANNELS: u8 = 96;
const BANDS: [Band; 1] = [Band::new(1, 0)];
const DEFAULT_CHANNEL_PLAN: Cn470ChannelPlan = Cn470ChannelPlan::Plan20MhzA;

const TX_MIN_DR: DR = DR::_0;
const TX_MAX_DR: DR = DR::_7;
const RX_MIN_DR: DR = DR::_0;
const RX_MAX_DR: DR = DR::_7;
const DEFAULT_DR: DR = DR::_0;
const MAX_RX1_DR_OFFSET: u8 = 5;

const MIN_TX_POWER: u8 = 7;
const MAX_TX_POWER: u8 = 0;
const DEFAULT_TX_POWER: u8 = 0;
const DEFAULT_MAX_EIRP: f32 = 19.15;

const MAX_RX_WINDOW: u32 = 3000;
const RX_WND_2_DR: DR = DR::_1;
const BEACON_DR: DR = DR::_2;
const PING_SLOT_DR: DR = DR::_2;
const BEACON_SIZE: u8 = 19;

const DATARATES: [Option<Datarate>; 8] = [
    Some(Datarate::lora(SpreadingFactor::_12, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_11, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_10, Bandwidth::_125KHz, 51, 51)),
    Some(Datarate::lora(SpreadingFactor::_9, Bandwidth::_125KHz, 115, 115)),
    Some(Datarate::lora(SpreadingFactor::_8, Bandwidth::_125KHz, 242, 242)),
    Some(Datarate::lora(SpreadingFactor::_7, Bandwidth::_125KHz, 242, 242)),
    Some(Datarate::lora(SpreadingFactor::_7, Bandwidth::_500KHz, 242, 242)),
    Some(Datarate::fsk(50, 242)),
];

#[derive(Debug, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub(crate) struct CN470 {
    store: PhyParamStore,
}

impl Default for CN470 {
    fn default() -> Self {
        let mut plan = Self { store: PhyParamStore::default() };
        plan.init_defaults(InitType::Defaults);
        plan
    }
}

impl ChannelRegion for CN470 {
    fn datarates() -> &'static [Option<Datarate>] {
        &DATARATES
    }
}

impl CN470 {
    /// Plan answering the frequency queries: the selected plan, or before selection the plan of
    /// the last join channel.
    fn channel_plan(&self) -> Cn470ChannelPlan {
        let cn470 = &self.store.group2.cn470;
        match cn470.channel_plan {
            Cn470ChannelPlan::Unknown => Cn470ChannelPlan::of_join_channel(cn470.join_channel_index)
                .map_or(DEFAULT_CHANNEL_PLAN, |(plan, _)| plan),
            plan => plan,
        }
    }

    fn nb_channels(&self) -> u8 {
        match self.store.group2.cn470.channel_plan {
            Cn470ChannelPlan::Unknown => NB_JOIN_CHANNELS,
            plan => plan.nb_channels(),
        }
    }

    /// Load the common join channels in the channel table.
    fn load_join_channels(&mut self) {
        let group2 = &mut self.store.group2;
        for (index, channel) in group2.channels.iter_mut().enumerate() {
            *channel = match Cn470ChannelPlan::of_join_channel(index as u8) {
                Some((plan, id)) => Channel {
                    rx1_frequency: plan.rx1_frequency(id),
                    ..Channel::new(plan.uplink_frequency(id), TX_MIN_DR, TX_MAX_DR, 0)
                },
                None => Channel::default(),
            };
        }
        group2.cn470.channel_plan = Cn470ChannelPlan::Unknown;
        group2.default_mask = ChannelMask::first(NB_JOIN_CHANNELS.into());
        group2.mask = group2.default_mask;
    }

    /// Load the channels and masks of `plan`.
    fn activate_plan(&mut self, plan: Cn470ChannelPlan) {
        let group2 = &mut self.store.group2;
        let nb_channels = plan.nb_channels();
        for (id, channel) in group2.channels.iter_mut().enumerate() {
            *channel = match u8::try_from(id) {
                Ok(id) if id < nb_channels => {
                    Channel::new(plan.uplink_frequency(id), TX_MIN_DR, TX_MAX_DR, 0)
                }
                _ => Channel::default(),
            };
        }
        group2.cn470.channel_plan = plan;
        group2.default_mask = plan.default_mask();
        group2.mask = group2.default_mask;
        info!("CN470 channel plan {}", plan);
    }
}

impl RegionHandler for CN470 {
    fn store(&self) -> &PhyParamStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut PhyParamStore {
        &mut self.store
    }

    fn get_phy_param(&self, params: &GetPhyParams) -> PhyValue<'_> {
        let group2 = &self.store.group2;
        let join_channel = group2.cn470.join_channel_index;
        let plan = self.channel_plan();
        match params.attribute {
            PhyAttribute::MinRxDr => RX_MIN_DR.into(),
            PhyAttribute::MinTxDr => TX_MIN_DR.into(),
            PhyAttribute::MaxRxDr => RX_MAX_DR.into(),
            PhyAttribute::MaxTxDr => TX_MAX_DR.into(),
            PhyAttribute::NextLowerTxDr => common::get_next_lower_tx_dr(
                params.datarate,
                TX_MIN_DR,
                TX_MAX_DR,
                self.nb_channels().into(),
                &group2.mask,
                &group2.channels,
            )
            .into(),
            PhyAttribute::MaxTxPower => PhyValue::Int(MAX_TX_POWER.into()),
            PhyAttribute::DefTxPower => PhyValue::Int(DEFAULT_TX_POWER.into()),
            PhyAttribute::DefAdrAckLimit => PhyValue::Int(ADR_ACK_LIMIT.into()),
            PhyAttribute::DefAdrAckDelay => PhyValue::Int(ADR_ACK_DELAY.into()),
            PhyAttribute::MaxPayload => {
                PhyValue::Int(Self::get_max_payload_length(params.datarate, false, false).into())
            }
            PhyAttribute::MaxPayloadRepeater => {
                PhyValue::Int(Self::get_max_payload_length(params.datarate, true, false).into())
            }
            PhyAttribute::DutyCycle => PhyValue::Int(0),
            PhyAttribute::MaxRxWindow => PhyValue::Int(MAX_RX_WINDOW.into()),
            PhyAttribute::ReceiveDelay1 => PhyValue::Int(RECEIVE_DELAY1.into()),
            PhyAttribute::ReceiveDelay2 => PhyValue::Int(RECEIVE_DELAY2.into()),
            PhyAttribute::JoinAcceptDelay1 => PhyValue::Int(JOIN_ACCEPT_DELAY1.into()),
            PhyAttribute::JoinAcceptDelay2 => PhyValue::Int(JOIN_ACCEPT_DELAY2.into()),
            PhyAttribute::MaxFcntGap => PhyValue::Int(MAX_FCNT_GAP.into()),
            PhyAttribute::RetransmitTimeout => PhyValue::Int(RETRANSMIT_TIMEOUT.into()),
            PhyAttribute::DefDr1Offset => PhyValue::Int(0),
            PhyAttribute::DefRx2Frequency => {
                PhyValue::Int(plan.rx2_frequency(join_channel, group2.cn470.is_otaa).into())
            }
            PhyAttribute::DefRx2Dr => RX_WND_2_DR.into(),
            PhyAttribute::ChannelsMask => PhyValue::ChannelsMask(&group2.mask),
            PhyAttribute::ChannelsDefaultMask => PhyValue::ChannelsMask(&group2.default_mask),
            PhyAttribute::MaxNbChannels => PhyValue::Int(self.nb_channels().into()),
            PhyAttribute::Channels => PhyValue::Channels(group2.channels.as_slice()),
            PhyAttribute::DefTxDr => DEFAULT_DR.into(),
            PhyAttribute::DefUplinkDwellTime | PhyAttribute::DefDownlinkDwellTime => {
                PhyValue::Int(0)
            }
            PhyAttribute::DefMaxEirp => PhyValue::Float(DEFAULT_MAX_EIRP),
            PhyAttribute::DefAntennaGain => PhyValue::Float(DEFAULT_ANTENNA_GAIN),
            PhyAttribute::BeaconChannelFreq => {
                PhyValue::Int(plan.downlink_frequency(params.channel, join_channel, false).into())
            }
            PhyAttribute::PingSlotChannelFreq => {
                PhyValue::Int(plan.downlink_frequency(params.channel, join_channel, true).into())
            }
            PhyAttribute::BeaconFormat => PhyValue::BeaconFormat(BeaconFormat {
                size: BEACON_SIZE,
                rfu1_size: 3,
                rfu2_size: 1,
            }),
            PhyAttribute::BeaconChannelDr => BEACON_DR.into(),
            PhyAttribute::BeaconNbChannels => PhyValue::Int(plan.nb_beacon_channels().into()),
            PhyAttribute::BeaconChannelOffset => {
                PhyValue::Int(plan.beacon_channel_offset(join_channel).into())
            }
            PhyAttribute::PingSlotChannelDr => PING_SLOT_DR.into(),
            PhyAttribute::PingSlotNbChannels => {
                PhyValue::Int(plan.nb_ping_slot_channels().into())
            }
            PhyAttribute::SfFromDr => PhyValue::Int(
                Self::datarate(params.datarate).map_or(0, |dr| dr.spreading_factor().into()),
            ),
            PhyAttribute::BwFromDr => {
                PhyValue::Int(common::get_bandwidth(params.datarate, &DATARATES).into())
            }
        }
    }

    fn init_defaults(&mut self, init_type: InitType) {
        match init_type {
            InitType::Defaults => {
                self.store = PhyParamStore::with_capacity(MAX_NB_CHANNELS.into(), &BANDS);
                self.load_join_channels();
            }
            InitType::ResetToDefaultChannels | InitType::ActivateDefaultChannels => {
                let group2 = &mut self.store.group2;
                group2.mask = group2.default_mask;
            }
        }
    }

    fn verify(&self, verify: Verify) -> bool {
        match verify {
            Verify::TxDr { datarate, .. } => {
                common::value_in_range(datarate, TX_MIN_DR, TX_MAX_DR)
                    && Self::datarate(datarate).is_some()
            }
            Verify::DefTxDr(datarate) => common::value_in_range(datarate, DR::_0, DR::_5),
            Verify::RxDr { datarate, .. } => {
                common::value_in_range(datarate, RX_MIN_DR, RX_MAX_DR)
                    && Self::datarate(datarate).is_some()
            }
            Verify::TxPower(power) | Verify::DefTxPower(power) => {
                common::value_in_range(power, MAX_TX_POWER, MIN_TX_POWER)
            }
            Verify::DutyCycle(_) => false,
            Verify::Frequency(frequency) => self.channel_plan().frequency_valid(frequency),
            Verify::NbJoinTrials(trials) => trials >= 1,
        }
    }

    fn apply_cf_list(&mut self, params: &ApplyCfListParams<'_>) {
        let Some((plan, _)) = Cn470ChannelPlan::of_join_channel(params.join_channel) else {
            warn!("channel {} is not a common join channel", params.join_channel);
            return;
        };
        let cn470 = &mut self.store.group2.cn470;
        cn470.join_channel_index = params.join_channel;
        cn470.is_otaa = true;
        self.activate_plan(plan);

        if let Some(CfList::FixedChannel(mask)) = CfList::parse(params.payload) {
            self.store.group2.mask.copy_from(&mask, plan.mask_words());
        }
    }

    fn chan_mask_set(&mut self, mask: &ChannelMask, mask_type: ChannelsMaskType) -> bool {
        let group2 = &mut self.store.group2;
        match mask_type {
            ChannelsMaskType::Mask => group2.mask = *mask,
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
        Self::rx_window_parameters(datarate.min(RX_MAX_DR), min_rx_symbols, rx_error, wakeup_time)
    }

    fn rx_config<RF: Radio>(&self, radio: &mut RF, params: &RxConfigParams) -> Result<DR> {
        let frequency = match params.rx_slot {
            RxSlot::Window1 => {
                let channel =
                    self.store.channel(params.channel.into()).ok_or(Error::ParameterInvalid)?;
                if channel.rx1_frequency != 0 {
                    channel.rx1_frequency
                } else {
                    self.channel_plan().rx1_frequency(params.channel)
                }
            }
            _ => params.frequency,
        };
        Self::configure_rx(radio, frequency, params)
    }

    fn tx_config<RF: Radio>(
        &self,
        radio: &mut RF,
        params: &TxConfigParams,
    ) -> Result<TxConfigResult> {
        let channel = self.store.channel(params.channel.into()).ok_or(Error::ParameterInvalid)?;
        let band = self.store.band(channel.band.into()).ok_or(Error::ParameterInvalid)?;
        let tx_power = common::limit_tx_power(params.tx_power, band.tx_max_power);
        let pw = common::compute_tx_power(tx_power, params.max_eirp, params.antenna_gain);
        let time_on_air =
            Self::configure_tx(radio, channel.frequency, params.datarate, pw, params.pkt_len)?;
        Ok(TxConfigResult { tx_power, time_on_air })
    }

    fn link_adr_req(&mut self, params: &LinkAdrReqParams<'_>) -> LinkAdrReqAns {
        let plan = self.channel_plan();
        let nb_channels = self.nb_channels();
        let channels = &self.store.group2.channels;
        let mut status = LinkAdrStatus::ok();
        let mut ch_mask = self.store.group2.mask;
        let mut bytes_parsed = 0;
        let mut last = None;

        while let Some((req, len)) = LinkAdrReq::parse(&params.payload[bytes_parsed..]) {
            bytes_parsed += len;
            status = LinkAdrStatus::ok();
            match plan.ch_mask_ctrl(req.ch_mask_ctrl) {
                ChMaskCtrl::SetGroup(group) => {
                    let first = usize::from(group) * 16;
                    let undefined = (0..16)
                        .filter(|bit| req.ch_mask & (1 << bit) != 0)
                        .any(|bit| channels.get(first + bit).map_or(true, |c| !c.is_defined()));
                    if undefined {
                        status.nack_channel_mask();
                    }
                    ch_mask[usize::from(group)] = req.ch_mask;
                }
                ChMaskCtrl::EnableAll => ch_mask = plan.default_mask(),
                ChMaskCtrl::DisableAll => ch_mask = ChannelMask::default(),
                ChMaskCtrl::SubBands | ChMaskCtrl::Reserved => status.nack_channel_mask(),
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
                nb_channels: nb_channels.into(),
                mask: &ch_mask,
                min_datarate: TX_MIN_DR,
                max_datarate: TX_MAX_DR,
                channels,
                min_tx_power: MIN_TX_POWER,
                max_tx_power: MAX_TX_POWER,
            });

        if status.is_ok() {
            self.store.group2.mask = ch_mask;
        }
        LinkAdrReqAns { status, datarate, tx_power, nb_rep, bytes_parsed }
    }

    fn rx_param_setup_req(&self, req: &RxParamSetupReq) -> RxParamSetupStatus {
        let mut status = RxParamSetupStatus::ok();
        if !self.channel_plan().frequency_valid(req.frequency) {
            status.nack_channel();
        }
        if !common::value_in_range(req.datarate, RX_MIN_DR, RX_MAX_DR)
            || Self::datarate(req.datarate).is_none()
        {
            status.nack_rx2_datarate();
        }
        if req.rx1_dr_offset > MAX_RX1_DR_OFFSET {
            status.nack_rx1_dr_offset();
        }
        status
    }

    fn new_channel_req(&mut self, _req: &NewChannelReq) -> Option<NewChannelStatus> {
        None
    }

    fn tx_param_setup_req(&self, _req: &TxParamSetupReq) -> bool {
        false
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
        join_datarate_schedule(*trials)
    }

    fn next_channel<RNG: RngCore, RF: Radio>(
        &mut self,
        rng: &mut RNG,
        radio: &mut RF,
        params: &NextChanParams,
    ) -> Result<NextChannel> {
        let selected = self.store.group2.cn470.channel_plan;
        if params.joined && selected == Cn470ChannelPlan::Unknown {
            // joined without a join accept: activation by personalization
            self.store.group2.cn470.is_otaa = false;
            self.activate_plan(DEFAULT_CHANNEL_PLAN);
        } else if !params.joined && selected != Cn470ChannelPlan::Unknown {
            self.load_join_channels();
        }

        let nb_channels = self.nb_channels();
        let expected_time_on_air =
            Self::expected_time_on_air(radio, params.datarate, params.pkt_len);
        let store = &mut self.store;
        if store.group2.mask.enabled_channels(nb_channels.into()).next().is_none() {
            warn!("all channels disabled, restoring the default mask");
            store.group2.mask = store.group2.default_mask;
        }

        let identified = common::identify_channels(
            &IdentifyChannelsParams {
                aggr_time_off: params.aggr_time_off,
                last_aggr_tx: params.last_aggr_tx,
                now: params.now,
                duty_cycle_enabled: params.duty_cycle_enabled,
                last_tx_is_join_request: params.last_tx_is_join_request,
                expected_time_on_air,
                count: CountChannelsParams {
                    joined: params.joined,
                    datarate: params.datarate,
                    mask: &store.group2.mask,
                    channels: &store.group2.channels,
                    join_channels: None,
                },
            },
            &mut store.group1.bands,
        )?;

        let channel = identified.channels[random_below(rng, identified.channels.len())];
        if !params.joined {
            let cn470 = &mut store.group2.cn470;
            cn470.join_channel_index = channel;
            cn470.is_otaa = true;
        }
        debug!("next channel {} at DR{}", channel, params.datarate);
        Ok(NextChannel { channel, aggregated_time_off: identified.aggregated_time_off })
    }

    fn channel_add(&mut self, _id: u8, _channel: Channel) -> Result {
        Err(Error::ParameterInvalid)
    }

    fn channels_remove(&mut self, _id: u8) -> bool {
        false
    }

    fn apply_dr_offset(&self, _downlink_dwell_time: bool, datarate: DR, offset: u8) -> DR {
        DR::new((datarate as u8).saturating_sub(offset)).unwrap_or(RX_MIN_DR)
    }

    fn rx_beacon_setup<RF: Radio>(
        &self,
        radio: &mut RF,
        params: &RxBeaconSetupParams,
    ) -> Result<DR> {
        let datarate = Self::datarate(BEACON_DR).ok_or(Error::DatarateInvalid)?;
        common::rx_beacon_setup(radio, params, datarate, BEACON_SIZE)?;
        Ok(BEACON_DR)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::MockRadio;
    use crate::Prng;

    fn next_chan_params(joined: bool) -> NextChanParams {
        NextChanParams {
            aggr_time_off: 0,
            last_aggr_tx: None,
            datarate: DR::_0,
            joined,
            duty_cycle_enabled: false,
            now: 0,
            last_tx_is_join_request: !joined,
            pkt_len: 23,
        }
    }

    fn phy_int(plan: &CN470, attribute: PhyAttribute) -> Option<i64> {
        plan.get_phy_param(&GetPhyParams::new(attribute)).as_int()
    }

    #[test]
    fn starts_on_common_join_channels() {
        let plan = CN470::default();
        let channels = &plan.store.group2.channels;
        assert_eq!(channels[0].frequency, 470_900_000);
        assert_eq!(channels[0].rx1_frequency, 484_500_000);
        assert_eq!(channels[8].frequency, 479_900_000);
        assert_eq!(channels[19].frequency, 488_300_000);
        assert!(!channels[20].is_defined());
        assert_eq!(phy_int(&plan, PhyAttribute::MaxNbChannels), Some(20));
        assert_eq!(plan.store.group2.mask.count(0, 2), 20);
    }

    #[test]
    fn join_channel_selects_the_plan() {
        let mut plan = CN470::default();
        plan.apply_cf_list(&ApplyCfListParams::new(&[], 9));
        assert_eq!(plan.store.group2.cn470.channel_plan, Cn470ChannelPlan::Plan20MhzB);
        assert_eq!(phy_int(&plan, PhyAttribute::BeaconNbChannels), Some(1));
        assert_eq!(phy_int(&plan, PhyAttribute::BeaconChannelOffset), Some(32));
        assert_eq!(phy_int(&plan, PhyAttribute::DefRx2Frequency), Some(498_300_000));
        assert_eq!(plan.store.group2.channels[0].frequency, 476_900_000);
        assert_eq!(phy_int(&plan, PhyAttribute::MaxNbChannels), Some(64));

        plan.apply_cf_list(&ApplyCfListParams::new(&[], 2));
        assert_eq!(plan.store.group2.cn470.channel_plan, Cn470ChannelPlan::Plan20MhzA);
        assert_eq!(phy_int(&plan, PhyAttribute::BeaconNbChannels), Some(8));
        assert_eq!(phy_int(&plan, PhyAttribute::BeaconChannelOffset), Some(16));
        assert_eq!(phy_int(&plan, PhyAttribute::DefRx2Frequency), Some(488_500_000));
    }

    #[test]
    fn invalid_join_channel_is_ignored() {
        let mut plan = CN470::default();
        plan.apply_cf_list(&ApplyCfListParams::new(&[], 20));
        assert_eq!(plan.store.group2.cn470.channel_plan, Cn470ChannelPlan::Unknown);
    }

    #[test]
    fn cf_list_sets_the_mask() {
        let mut plan = CN470::default();
        let mut cf_list = [0u8; 16];
        cf_list[..8].copy_from_slice(&[0x0F, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0xFF, 0xFF]);
        cf_list[15] = 1;
        plan.apply_cf_list(&ApplyCfListParams::new(&cf_list, 12));
        let group2 = &plan.store.group2;
        assert_eq!(group2.cn470.channel_plan, Cn470ChannelPlan::Plan26MhzA);
        assert_eq!(group2.mask.words(), &[0x000F, 0xFFFF, 0x0000, 0x0000, 0x0000, 0x0000]);
        assert_eq!(group2.default_mask.count(0, 6), 48);
    }

    #[test]
    fn join_requests_use_join_channels() {
        let mut plan = CN470::default();
        let mut rng = Prng::new(3);
        let mut radio = MockRadio::default();
        for _ in 0..10 {
            let next = plan.next_channel(&mut rng, &mut radio, &next_chan_params(false)).unwrap();
            assert!(next.channel < NB_JOIN_CHANNELS);
            assert_eq!(plan.store.group2.cn470.join_channel_index, next.channel);
            let (join_plan, _) = Cn470ChannelPlan::of_join_channel(next.channel).unwrap();
            assert_eq!(
                phy_int(&plan, PhyAttribute::DefRx2Frequency),
                Some(i64::from(join_plan.rx2_frequency(next.channel, true)))
            );
        }
    }

    #[test]
    fn personalized_device_uses_default_plan() {
        let mut plan = CN470::default();
        let mut rng = Prng::new(3);
        let mut radio = MockRadio::default();
        let next = plan.next_channel(&mut rng, &mut radio, &next_chan_params(true)).unwrap();
        assert!(next.channel < 64);
        let cn470 = plan.store.group2.cn470;
        assert_eq!(cn470.channel_plan, Cn470ChannelPlan::Plan20MhzA);
        assert!(!cn470.is_otaa);
        assert_eq!(phy_int(&plan, PhyAttribute::DefRx2Frequency), Some(486_900_000));
    }

    #[test]
    fn rejoin_reloads_join_channels() {
        let mut plan = CN470::default();
        plan.apply_cf_list(&ApplyCfListParams::new(&[], 15));
        let mut rng = Prng::new(9);
        let mut radio = MockRadio::default();
        let next = plan.next_channel(&mut rng, &mut radio, &next_chan_params(false)).unwrap();
        assert!(next.channel < NB_JOIN_CHANNELS);
        assert_eq!(plan.store.group2.cn470.channel_plan, Cn470ChannelPlan::Unknown);
    }

    #[test]
    fn rx1_window_frequency() {
        let mut plan = CN470::default();
        let mut radio = MockRadio::default();
        let mut params = RxConfigParams {
            channel: 0,
            datarate: DR::_0,
            frequency: 0,
            rx_slot: RxSlot::Window1,
            window_timeout: 8,
            rx_continuous: false,
            repeater_support: false,
            downlink_dwell_time: false,
        };
        plan.rx_config(&mut radio, &params).unwrap();
        assert_eq!(radio.rx.unwrap().rf.frequency, 484_500_000);

        plan.apply_cf_list(&ApplyCfListParams::new(&[], 12));
        params.channel = 30;
        plan.rx_config(&mut radio, &params).unwrap();
        assert_eq!(radio.rx.unwrap().rf.frequency, 491_300_000);
    }

    fn link_adr(plan: &mut CN470, ch_mask: u16, ch_mask_ctrl: u8) -> LinkAdrReqAns {
        let [low, high] = ch_mask.to_le_bytes();
        plan.link_adr_req(&LinkAdrReqParams {
            payload: &[0x03, 0x21, low, high, (ch_mask_ctrl << 4) | 1],
            adr_enabled: true,
            uplink_dwell_time: false,
            current_datarate: DR::_0,
            current_tx_power: 0,
            current_nb_rep: 1,
        })
    }

    #[test]
    fn link_adr_ch_mask_ctrl_per_plan() {
        let mut plan = CN470::default();
        plan.apply_cf_list(&ApplyCfListParams::new(&[], 0));

        let ans = link_adr(&mut plan, 0x00FF, 3);
        assert!(ans.status.is_ok());
        assert_eq!(ans.datarate, DR::_2);
        assert_eq!(ans.tx_power, 1);
        assert_eq!(plan.store.group2.mask[3], 0x00FF);

        assert!(!link_adr(&mut plan, 0, 5).status.channel_mask_ack());
        assert!(link_adr(&mut plan, 0, 6).status.is_ok());
        assert_eq!(plan.store.group2.mask.count(0, 6), 64);

        plan.apply_cf_list(&ApplyCfListParams::new(&[], 16));
        assert!(link_adr(&mut plan, 0x000F, 2).status.is_ok());
        assert_eq!(plan.store.group2.mask[2], 0x000F);
        assert!(link_adr(&mut plan, 0, 3).status.is_ok());
        assert_eq!(plan.store.group2.mask.count(0, 6), 48);
        assert!(!link_adr(&mut plan, 0x0001, 6).status.channel_mask_ack());
    }

    #[test]
    fn link_adr_rejects_undefined_channels() {
        // only the 20 join channels exist before a plan is selected
        let mut plan = CN470::default();
        assert!(!link_adr(&mut plan, 0x0010, 1).status.channel_mask_ack());
        assert!(link_adr(&mut plan, 0x000F, 1).status.is_ok());
        assert_eq!(plan.store.group2.mask[1], 0x000F);
    }

    #[test]
    fn rx_param_setup_on_plan_grid() {
        let mut plan = CN470::default();
        plan.apply_cf_list(&ApplyCfListParams::new(&[], 0));
        let req = RxParamSetupReq { rx1_dr_offset: 5, datarate: DR::_1, frequency: 483_900_000 };
        assert!(plan.rx_param_setup_req(&req).is_ok());
        let status = plan.rx_param_setup_req(&RxParamSetupReq { frequency: 470_300_000, ..req });
        assert!(!status.channel_ack());
        let status = plan.rx_param_setup_req(&RxParamSetupReq { rx1_dr_offset: 6, ..req });
        assert!(!status.rx1_dr_offset_ack());
    }

    #[test]
    fn join_datarates() {
        let mut plan = CN470::default();
        let drs: heapless::Vec<DR, 48> =
            (0..48).map(|_| plan.alternate_dr(DR::_5, AlternateDrType::Alternate)).collect();
        assert_eq!(drs[0], DR::_5);
        assert_eq!(drs[7], DR::_4);
        assert_eq!(drs[47], DR::_0);
    }

    #[test]
    fn fixed_plan_commands_are_refused() {
        let mut plan = CN470::default();
        let channel = Channel::new(470_300_000, DR::_0, DR::_5, 0);
        assert_eq!(plan.channel_add(3, channel), Err(Error::ParameterInvalid));
        assert!(!plan.channels_remove(0));
        assert!(!plan.tx_param_setup_req(&TxParamSetupReq {
            uplink_dwell_time: false,
            downlink_dwell_time: false,
            max_eirp: 13,
        }));
        assert_eq!(plan.apply_dr_offset(false, DR::_2, 3), DR::_0);
        assert_eq!(plan.apply_dr_offset(false, DR::_5, 2), DR::_3);
    }

    #[test]
    fn tx_power_from_eirp() {
        let plan = CN470::default();
        let mut radio = MockRadio::default();
        let params = TxConfigParams {
            channel: 10,
            datarate: DR::_2,
            tx_power: 1,
            max_eirp: DEFAULT_MAX_EIRP,
            antenna_gain: 0.0,
            pkt_len: 20,
        };
        let result = plan.tx_config(&mut radio, &params).unwrap();
        assert_eq!(result.tx_power, 1);
        assert_eq!(radio.tx.unwrap().pw, 17);
        assert_eq!(radio.tx.unwrap().rf.frequency, 470_300_000);
    }
}
