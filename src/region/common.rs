//! Algorithms shared by every region: duty-cycle credits, enabled channel search, `LinkADRReq`
//! validation and radio window computations.
use super::constants::*;
use super::params::RxBeaconSetupParams;
use super::store::{Band, Channel, ChannelMask, MAX_CHANNELS};
use super::{Datarate, DR};
use crate::mac_commands::LinkAdrStatus;
use crate::radio::{ModemParams, Radio, RfConfig, RxConfig, RxMode};
use crate::{Error, Result, TimerTime};

/// Bandwidth in Hz of `datarate`, 0 if the region does not define it.
pub fn get_bandwidth(datarate: DR, datarates: &[Option<Datarate>]) -> u32 {
    match datarates.get(datarate as usize) {
        Some(Some(dr)) => dr.bandwidth(),
        _ => 0,
    }
}

/// Duration of a LoRa symbol in µs.
pub fn compute_symbol_time_lora(spreading_factor: u8, bandwidth: u32) -> u32 {
    ((1u64 << spreading_factor) * 1_000_000 / bandwidth.max(1) as u64) as u32
}

/// Duration of an FSK symbol (one byte) in µs.
pub fn compute_symbol_time_fsk(bitrate: u32) -> u32 {
    8_000_000 / bitrate.max(1)
}

/// Rounds up positive values, truncates the others.
fn div_ceil(x: i64, n: i64) -> i64 {
    if x > 0 {
        (x + n - 1) / n
    } else {
        x / n
    }
}

/// Receive window sized to catch `min_rx_symbols` of preamble despite a clock error of
/// `±rx_error` ms, started early enough to absorb the radio wake-up time.
///
/// Returns the timeout in symbols and the offset in ms to apply to the nominal receive delay.
pub fn compute_rx_window_parameters(
    symbol_time: u32,
    min_rx_symbols: u8,
    rx_error: u32,
    wakeup_time: u32,
) -> (u32, i32) {
    let symbol_time = i64::from(symbol_time.max(1));
    let min_rx_symbols = i64::from(min_rx_symbols);

    let timeout = div_ceil(
        (2 * min_rx_symbols - 8) * symbol_time + 2 * i64::from(rx_error) * 1000,
        symbol_time,
    )
    .max(min_rx_symbols)
    .max(MIN_RX_WINDOW_SYMBOLS as i64);

    let offset = div_ceil(
        4 * symbol_time - div_ceil(timeout * symbol_time, 2) - i64::from(wakeup_time) * 1000,
        1000,
    );
    (timeout as u32, offset as i32)
}

/// Physical power in dBm for a power index. Index 0 is the max EIRP, each step removes 2 dB.
pub fn compute_tx_power(tx_power_index: u8, max_eirp: f32, antenna_gain: f32) -> i8 {
    let power = max_eirp - f32::from(tx_power_index) * TX_POWER_STEP_DB - antenna_gain;
    // floor, without libm
    let truncated = power as i32;
    let floored = if (truncated as f32) > power { truncated - 1 } else { truncated };
    floored.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

/// Apply the band power ceiling. Power indexes grow as the power decreases, so the most
/// restrictive of both is the largest index.
pub fn limit_tx_power(tx_power_index: u8, band_max_tx_power: u8) -> u8 {
    tx_power_index.max(band_max_tx_power)
}

pub fn value_in_range<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    min <= value && value <= max
}

/// True if `dr` is in `[min, max]` and at least one enabled channel supports it.
pub fn chan_verify_dr(
    nb_channels: usize,
    mask: &ChannelMask,
    dr: DR,
    min: DR,
    max: DR,
    channels: &[Channel],
) -> bool {
    if !value_in_range(dr, min, max) {
        return false;
    }
    mask.enabled_channels(nb_channels)
        .filter_map(|id| channels.get(id))
        .any(|ch| ch.dr_range.contains(dr))
}

/// Clear the bit of channel `id`. Fails when `id` is not below `max_channels`.
pub fn chan_disable(mask: &mut ChannelMask, id: u8, max_channels: u8) -> bool {
    if id >= max_channels || usize::from(id) / 16 > usize::from(max_channels) / 16 {
        return false;
    }
    mask.set_channel(usize::from(id), false);
    true
}

pub fn count_channels(mask: &ChannelMask, start_word: usize, stop_word: usize) -> u8 {
    mask.count(start_word, stop_word)
}

pub fn chan_mask_copy(dest: &mut ChannelMask, src: &ChannelMask, len: usize) {
    dest.copy_from(src, len)
}

/// Duty cycle in force for `band`: while not joined, the join back-off may be stricter than the
/// regulatory one.
fn get_duty_cycle(band: &Band, joined: bool, now: TimerTime) -> u16 {
    let mut duty_cycle = band.duty_cycle;
    if !joined {
        let elapsed = now / 1000;
        let join_duty_cycle = if elapsed < BACKOFF_DUTY_CYCLE_1_HOUR_IN_S {
            BACKOFF_DC_1_HOUR
        } else if elapsed < BACKOFF_DUTY_CYCLE_10_HOURS_IN_S {
            BACKOFF_DC_10_HOURS
        } else {
            BACKOFF_DC_24_HOURS
        };
        duty_cycle = duty_cycle.max(join_duty_cycle);
    }
    duty_cycle.max(1)
}

fn set_max_time_credits(
    band: &mut Band,
    joined: bool,
    now: TimerTime,
    duty_cycle_enabled: bool,
    last_tx_is_join_request: bool,
) -> u16 {
    let duty_cycle = get_duty_cycle(band, joined, now);
    let mut max_credits = DUTY_CYCLE_TIME_PERIOD;

    if !joined {
        match duty_cycle {
            BACKOFF_DC_1_HOUR => {
                band.last_max_credit_assign_time = now;
            }
            BACKOFF_DC_10_HOURS => {
                max_credits = DUTY_CYCLE_TIME_PERIOD * 10;
                band.last_max_credit_assign_time = now;
            }
            _ => max_credits = DUTY_CYCLE_TIME_PERIOD * 24,
        }

        let since_assign = now.saturating_sub(band.last_max_credit_assign_time) / 1000;
        if (!duty_cycle_enabled && !last_tx_is_join_request)
            || band.max_time_credits != max_credits
            || since_assign >= BACKOFF_24_HOURS_IN_S
        {
            band.time_credits = max_credits;
            let elapsed = now / 1000;
            if elapsed >= BACKOFF_DUTY_CYCLE_24_HOURS_IN_S {
                // credits of the 0.01 % back-off are granted once per day
                let days = (elapsed - BACKOFF_DUTY_CYCLE_24_HOURS_IN_S) / BACKOFF_24_HOURS_IN_S;
                band.last_max_credit_assign_time =
                    (days * BACKOFF_24_HOURS_IN_S + BACKOFF_DUTY_CYCLE_24_HOURS_IN_S) * 1000;
            }
        }
    } else if !duty_cycle_enabled {
        band.time_credits = max_credits;
    }

    if band.last_band_update_time.is_none() {
        band.time_credits = max_credits;
    }
    band.max_time_credits = max_credits;
    duty_cycle
}

fn update_time_credits(
    band: &mut Band,
    joined: bool,
    duty_cycle_enabled: bool,
    last_tx_is_join_request: bool,
    now: TimerTime,
) -> u16 {
    let duty_cycle =
        set_max_time_credits(band, joined, now, duty_cycle_enabled, last_tx_is_join_request);
    if joined {
        if let Some(last) = band.last_band_update_time {
            band.time_credits = band.time_credits.saturating_add(now.saturating_sub(last));
        }
    }
    band.time_credits = band.time_credits.min(band.max_time_credits);
    band.last_band_update_time = Some(now);
    duty_cycle
}

/// Charge a transmission of `time_on_air` ms to the band.
pub fn set_band_tx_done(band: &mut Band, time_on_air: TimerTime, joined: bool, now: TimerTime) {
    let duty_cycle = get_duty_cycle(band, joined, now);
    band.time_credits = band.time_credits.saturating_sub(time_on_air * TimerTime::from(duty_cycle));
    band.last_tx_done_time = Some(now);
    trace!("band credits left {} ms (dc 1/{})", band.time_credits, duty_cycle);
}

/// Refresh the credits of every band and flag the ones with enough credits for a frame of
/// `expected_time_on_air` ms.
///
/// Returns the time to wait until a band becomes usable, `TimerTime::MAX` when no band can ever
/// carry such a frame.
pub fn update_band_time_off(
    joined: bool,
    bands: &mut [Band],
    duty_cycle_enabled: bool,
    last_tx_is_join_request: bool,
    now: TimerTime,
    expected_time_on_air: TimerTime,
) -> TimerTime {
    let mut min_time_to_wait = TimerTime::MAX;
    let mut valid_bands = 0;

    for band in bands.iter_mut() {
        let duty_cycle =
            update_time_credits(band, joined, duty_cycle_enabled, last_tx_is_join_request, now);
        let credit_costs = expected_time_on_air * TimerTime::from(duty_cycle);

        if band.time_credits > credit_costs || (!duty_cycle_enabled && joined) {
            band.ready_for_tx = true;
            valid_bands += 1;
            continue;
        }

        band.ready_for_tx = false;
        if band.max_time_credits > credit_costs {
            min_time_to_wait = min_time_to_wait.min(credit_costs - band.time_credits);
            valid_bands += 1;
        }

        if !joined {
            // join requests wait for the start of the next back-off window
            let mut range = match duty_cycle {
                BACKOFF_DC_1_HOUR => BACKOFF_DUTY_CYCLE_1_HOUR_IN_S,
                BACKOFF_DC_10_HOURS => BACKOFF_DUTY_CYCLE_10_HOURS_IN_S,
                _ => BACKOFF_DUTY_CYCLE_24_HOURS_IN_S,
            };
            let elapsed = now / 1000;
            if elapsed > BACKOFF_DUTY_CYCLE_24_HOURS_IN_S {
                range += BACKOFF_24_HOURS_IN_S
                    * ((elapsed - BACKOFF_DUTY_CYCLE_24_HOURS_IN_S) / BACKOFF_24_HOURS_IN_S + 1);
            }
            min_time_to_wait = (range * 1000).saturating_sub(now);
        }
    }

    if valid_bands == 0 {
        return TimerTime::MAX;
    }
    min_time_to_wait
}

pub(crate) struct CountChannelsParams<'a> {
    pub joined: bool,
    pub datarate: DR,
    pub mask: &'a ChannelMask,
    pub channels: &'a [Channel],
    /// Channels allowed for join requests, `None` when any channel may be used.
    pub join_channels: Option<&'a ChannelMask>,
}

pub(crate) type EnabledChannels = heapless::Vec<u8, MAX_CHANNELS>;

/// Collect the channels usable for `datarate` right now. Returns the number of channels that
/// would be usable but whose band is out of credits.
pub(crate) fn count_nb_of_enabled_channels(
    params: &CountChannelsParams<'_>,
    bands: &[Band],
    enabled: &mut EnabledChannels,
) -> u8 {
    let mut restricted = 0;
    for id in params.mask.enabled_channels(params.channels.len()) {
        let channel = &params.channels[id];
        if !channel.is_defined() {
            continue;
        }
        if let (false, Some(join_channels)) = (params.joined, params.join_channels) {
            if !join_channels.is_enabled(id) {
                continue;
            }
        }
        if !channel.dr_range.contains(params.datarate) {
            continue;
        }
        match bands.get(channel.band as usize) {
            Some(band) if band.ready_for_tx => {
                enabled.push(id as u8).ok();
            }
            _ => restricted += 1,
        }
    }
    restricted
}

pub(crate) struct IdentifyChannelsParams<'a> {
    pub aggr_time_off: TimerTime,
    pub last_aggr_tx: Option<TimerTime>,
    pub now: TimerTime,
    pub duty_cycle_enabled: bool,
    pub last_tx_is_join_request: bool,
    pub expected_time_on_air: TimerTime,
    pub count: CountChannelsParams<'a>,
}

#[derive(Debug)]
pub(crate) struct IdentifiedChannels {
    pub channels: EnabledChannels,
    pub aggregated_time_off: TimerTime,
}

/// Channel search shared by all regions: honors the aggregated time-off, refreshes the band
/// credits and lists the candidate channels.
pub(crate) fn identify_channels(
    params: &IdentifyChannelsParams<'_>,
    bands: &mut [Band],
) -> Result<IdentifiedChannels> {
    let elapsed = params.last_aggr_tx.map_or(params.now, |t| params.now.saturating_sub(t));
    let mut next_tx_delay = params.aggr_time_off.saturating_sub(elapsed);
    let mut aggregated_time_off = params.aggr_time_off;
    let mut restricted = 1;
    let mut channels = EnabledChannels::new();

    if params.last_aggr_tx.is_none() || params.aggr_time_off <= elapsed {
        aggregated_time_off = 0;
        next_tx_delay = update_band_time_off(
            params.count.joined,
            bands,
            params.duty_cycle_enabled,
            params.last_tx_is_join_request,
            params.now,
            params.expected_time_on_air,
        );
        restricted = count_nb_of_enabled_channels(&params.count, bands, &mut channels);
    }

    if !channels.is_empty() {
        Ok(IdentifiedChannels { channels, aggregated_time_off })
    } else if restricted > 0 {
        Err(Error::DutyCycleRestricted { wait_time: next_tx_delay })
    } else {
        Err(Error::NoChannelFound)
    }
}

/// Join datarate schedule of the EU-like regions: DR5 most of the time, slower datarates on
/// every 8th, 16th, 24th, 32nd and 48th attempt.
pub(crate) fn join_datarate_schedule(trials: u16) -> DR {
    match trials {
        t if t % 48 == 0 => DR::_0,
        t if t % 32 == 0 => DR::_1,
        t if t % 24 == 0 => DR::_2,
        t if t % 16 == 0 => DR::_3,
        t if t % 8 == 0 => DR::_4,
        _ => DR::_5,
    }
}

/// Next datarate below `current` that at least one enabled channel supports, `min` at worst.
pub fn get_next_lower_tx_dr(
    current: DR,
    min: DR,
    max: DR,
    nb_channels: usize,
    mask: &ChannelMask,
    channels: &[Channel],
) -> DR {
    if current <= min {
        return min;
    }
    let mut dr = current;
    loop {
        dr = match dr.prev() {
            Some(dr) => dr,
            None => return min,
        };
        if dr == min || chan_verify_dr(nb_channels, mask, dr, min, max, channels) {
            return dr;
        }
    }
}

pub(crate) struct LinkAdrVerifyParams<'a> {
    pub status: LinkAdrStatus,
    pub adr_enabled: bool,
    /// Raw requested datarate, `0xF` keeps the current one.
    pub datarate: u8,
    /// Raw requested power index, `0xF` keeps the current one.
    pub tx_power: u8,
    pub nb_rep: u8,
    pub current_datarate: DR,
    pub current_tx_power: u8,
    pub current_nb_rep: u8,
    pub nb_channels: usize,
    pub mask: &'a ChannelMask,
    pub min_datarate: DR,
    pub max_datarate: DR,
    pub channels: &'a [Channel],
    /// Largest power index (lowest power).
    pub min_tx_power: u8,
    /// Smallest power index (highest power).
    pub max_tx_power: u8,
}

/// Validate the datarate, power and repetitions requested by a `LinkADRReq` against the mask
/// it produced. Returns the status and the values to apply when the status is all OK.
pub(crate) fn link_adr_req_verify_params(
    params: &LinkAdrVerifyParams<'_>,
) -> (LinkAdrStatus, DR, u8, u8) {
    let mut status = params.status;
    let (mut datarate, mut tx_power, mut nb_rep) = if params.adr_enabled {
        (params.datarate, params.tx_power, params.nb_rep)
    } else {
        // without ADR only the channel mask may change
        (params.current_datarate as u8, params.current_tx_power, params.current_nb_rep)
    };

    if status.bits() != 0 {
        if datarate == 0x0F {
            datarate = params.current_datarate as u8;
        } else {
            let verified = DR::new(datarate).is_some_and(|dr| {
                chan_verify_dr(
                    params.nb_channels,
                    params.mask,
                    dr,
                    params.min_datarate,
                    params.max_datarate,
                    params.channels,
                )
            });
            if !verified {
                status.nack_datarate();
            }
        }

        if tx_power == 0x0F {
            tx_power = params.current_tx_power;
        } else if !value_in_range(tx_power, params.max_tx_power, params.min_tx_power) {
            if params.max_tx_power > tx_power {
                tx_power = params.max_tx_power;
            } else {
                status.nack_power();
            }
        }
    }

    if status.is_ok() && nb_rep == 0 {
        nb_rep = 1;
    }

    let datarate = DR::new(datarate).unwrap_or(params.current_datarate);
    (status, datarate, tx_power, nb_rep)
}

/// Configure the radio for a Class-B beacon window.
pub(crate) fn rx_beacon_setup<R: Radio>(
    radio: &mut R,
    params: &RxBeaconSetupParams,
    datarate: &Datarate,
    beacon_size: u8,
) -> Result {
    radio.set_sleep();
    let mode = if params.rx_time == 0 {
        RxMode::Continuous
    } else {
        RxMode::Single { symbol_timeout: params.symbol_timeout }
    };
    let modem = match datarate.modem_params() {
        modem @ ModemParams::LoRa(_) => modem,
        ModemParams::Fsk(_) => return Err(Error::DatarateInvalid),
    };
    radio.configure_rx(&RxConfig {
        rf: RfConfig { frequency: params.frequency, modem, preamble_len: BEACON_PREAMBLE_LENGTH },
        mode,
        fixed_length: Some(beacon_size),
        crc_on: false,
        iq_inverted: false,
        max_payload_len: beacon_size,
    })?;
    radio.set_rx(params.rx_time)
}

#[cfg(test)]
mod test {
    use super::*;

    fn band(duty_cycle: u16) -> Band {
        Band::new(duty_cycle, 0)
    }

    #[test]
    fn symbol_times() {
        assert_eq!(compute_symbol_time_lora(7, 125_000), 1024);
        assert_eq!(compute_symbol_time_lora(12, 125_000), 32768);
        assert_eq!(compute_symbol_time_lora(8, 500_000), 512);
        assert_eq!(compute_symbol_time_fsk(50_000), 160);
    }

    #[test]
    fn rx_window_sf7() {
        let (timeout, offset) = compute_rx_window_parameters(1024, 6, 10, 1);
        // (12 - 8) * 1024 + 20_000 = 24_096 µs, ie 24 symbols
        assert_eq!(timeout, 24);
        // 4096 - 12_288 - 1000 = -9192 µs
        assert_eq!(offset, -9);
    }

    #[test]
    fn rx_window_floor() {
        let (timeout, _) = compute_rx_window_parameters(32768, 2, 0, 0);
        assert_eq!(timeout, 5);
    }

    #[test]
    fn tx_power() {
        assert_eq!(compute_tx_power(0, 16.0, 2.15), 13);
        assert_eq!(compute_tx_power(1, 16.0, 2.15), 11);
        assert_eq!(compute_tx_power(7, 16.0, 2.15), -1);
        assert_eq!(compute_tx_power(0, 30.0, 0.0), 30);
        assert_eq!(limit_tx_power(1, 3), 3);
        assert_eq!(limit_tx_power(5, 3), 5);
    }

    #[test]
    fn disable_channel() {
        let mut mask = ChannelMask::new([0xffff, 0, 0, 0, 0, 0]);
        assert!(chan_disable(&mut mask, 3, 16));
        assert_eq!(mask[0], 0xfff7);
        assert!(!chan_disable(&mut mask, 16, 16));
    }

    #[test]
    fn verify_dr() {
        let channels = [
            Channel::new(868_100_000, DR::_0, DR::_5, 0),
            Channel::new(868_300_000, DR::_0, DR::_7, 0),
        ];
        let mask = ChannelMask::new([0b01, 0, 0, 0, 0, 0]);
        assert!(chan_verify_dr(16, &mask, DR::_5, DR::_0, DR::_7, &channels));
        assert!(!chan_verify_dr(16, &mask, DR::_6, DR::_0, DR::_7, &channels));
        let mask = ChannelMask::new([0b11, 0, 0, 0, 0, 0]);
        assert!(chan_verify_dr(16, &mask, DR::_6, DR::_0, DR::_7, &channels));
        assert!(!chan_verify_dr(16, &mask, DR::_6, DR::_0, DR::_5, &channels));
    }

    #[test]
    fn next_lower_dr_skips_unsupported() {
        let channels = [Channel::new(868_100_000, DR::_0, DR::_2, 0)];
        let mask = ChannelMask::new([0b1, 0, 0, 0, 0, 0]);
        assert_eq!(get_next_lower_tx_dr(DR::_5, DR::_0, DR::_7, 16, &mask, &channels), DR::_2);
        assert_eq!(get_next_lower_tx_dr(DR::_2, DR::_0, DR::_7, 16, &mask, &channels), DR::_1);
        assert_eq!(get_next_lower_tx_dr(DR::_0, DR::_0, DR::_7, 16, &mask, &channels), DR::_0);
    }

    #[test]
    fn band_credits_joined() {
        let mut bands = [band(100)];
        // first refresh grants the full credits
        let wait = update_band_time_off(true, &mut bands, true, false, 1000, 1000);
        assert_eq!(wait, TimerTime::MAX);
        assert!(bands[0].ready_for_tx);
        assert_eq!(bands[0].time_credits, DUTY_CYCLE_TIME_PERIOD);

        // 18 s of airtime at 1 % exhausts the 30 min budget
        set_band_tx_done(&mut bands[0], 18_000, true, 1000);
        assert_eq!(bands[0].time_credits, 0);
        let wait = update_band_time_off(true, &mut bands, true, false, 1000, 1000);
        assert!(!bands[0].ready_for_tx);
        assert_eq!(wait, 100_000);

        // credits regenerate at the wall-clock rate
        let wait = update_band_time_off(true, &mut bands, true, false, 1000 + 100_001, 1000);
        assert!(bands[0].ready_for_tx);
        assert_eq!(wait, TimerTime::MAX);
    }

    #[test]
    fn duty_cycle_disabled_when_joined() {
        let mut bands = [band(100)];
        update_band_time_off(true, &mut bands, false, false, 0, 1000);
        set_band_tx_done(&mut bands[0], 100_000, true, 0);
        update_band_time_off(true, &mut bands, false, false, 1, 1000);
        assert!(bands[0].ready_for_tx);
    }

    #[test]
    fn join_back_off_first_hour() {
        let mut bands = [band(1)];
        update_band_time_off(false, &mut bands, true, true, 0, 1000);
        // 1 % during the first hour: 18 s of airtime
        assert_eq!(bands[0].max_time_credits, DUTY_CYCLE_TIME_PERIOD);
        set_band_tx_done(&mut bands[0], 18_000, false, 10_000);
        let wait = update_band_time_off(false, &mut bands, true, true, 20_000, 1000);
        assert!(!bands[0].ready_for_tx);
        // the next window starts one hour after start-up
        assert_eq!(wait, 3_600_000 - 20_000);
    }

    #[test]
    fn join_back_off_second_window() {
        let mut bands = [band(1)];
        let now = 2 * 3_600_000;
        update_band_time_off(false, &mut bands, true, true, now, 1000);
        assert_eq!(bands[0].max_time_credits, DUTY_CYCLE_TIME_PERIOD * 10);
        set_band_tx_done(&mut bands[0], 18_000, false, now);
        assert_eq!(bands[0].time_credits, DUTY_CYCLE_TIME_PERIOD * 10 - 18_000_000);
    }

    #[test]
    fn identify_honors_aggregated_time_off() {
        let channels = [Channel::new(868_100_000, DR::_0, DR::_5, 0)];
        let mask = ChannelMask::new([0b1, 0, 0, 0, 0, 0]);
        let mut bands = [band(1)];
        let mut params = IdentifyChannelsParams {
            aggr_time_off: 5000,
            last_aggr_tx: Some(1000),
            now: 2000,
            duty_cycle_enabled: true,
            last_tx_is_join_request: false,
            expected_time_on_air: 50,
            count: CountChannelsParams {
                joined: true,
                datarate: DR::_0,
                mask: &mask,
                channels: &channels,
                join_channels: None,
            },
        };
        assert_eq!(
            identify_channels(&params, &mut bands).unwrap_err(),
            Error::DutyCycleRestricted { wait_time: 4000 }
        );
        params.now = 6000;
        let found = identify_channels(&params, &mut bands).unwrap();
        assert_eq!(found.channels.as_slice(), &[0]);
        assert_eq!(found.aggregated_time_off, 0);

        params.count.datarate = DR::_6;
        assert_eq!(identify_channels(&params, &mut bands).unwrap_err(), Error::NoChannelFound);
    }

    #[test]
    fn verify_link_adr_params() {
        let channels = [Channel::new(868_100_000, DR::_0, DR::_5, 0)];
        let mask = ChannelMask::new([0b1, 0, 0, 0, 0, 0]);
        let mut params = LinkAdrVerifyParams {
            status: LinkAdrStatus::ok(),
            adr_enabled: true,
            datarate: 5,
            tx_power: 0x0F,
            nb_rep: 0,
            current_datarate: DR::_0,
            current_tx_power: 3,
            current_nb_rep: 2,
            nb_channels: 16,
            mask: &mask,
            min_datarate: DR::_0,
            max_datarate: DR::_7,
            channels: &channels,
            min_tx_power: 7,
            max_tx_power: 0,
        };
        let (status, dr, power, nb_rep) = link_adr_req_verify_params(&params);
        assert!(status.is_ok());
        assert_eq!((dr, power, nb_rep), (DR::_5, 3, 1));

        params.datarate = 6;
        params.tx_power = 9;
        let (status, _, _, _) = link_adr_req_verify_params(&params);
        assert_eq!(status.bits(), 0b001);

        // without ADR the current values are kept
        params.adr_enabled = false;
        let (status, dr, power, nb_rep) = link_adr_req_verify_params(&params);
        assert!(status.is_ok());
        assert_eq!((dr, power, nb_rep), (DR::_0, 3, 2));
    }
}
