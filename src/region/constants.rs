#![allow(dead_code)]
use crate::TimerTime;
use lora_modulation::CodingRate;

pub(crate) const RECEIVE_DELAY1: u32 = 1000;
pub(crate) const RECEIVE_DELAY2: u32 = RECEIVE_DELAY1 + 1000; // must be RECEIVE_DELAY + 1 s
pub(crate) const JOIN_ACCEPT_DELAY1: u32 = 5000;
pub(crate) const JOIN_ACCEPT_DELAY2: u32 = 6000;
pub(crate) const MAX_FCNT_GAP: u32 = 16384;
pub(crate) const ADR_ACK_LIMIT: u16 = 64;
pub(crate) const ADR_ACK_DELAY: u16 = 32;
/// Retransmission timeout of confirmed frames, the caller adds a random
/// `±RETRANSMIT_TIMEOUT_RND` on top.
pub(crate) const RETRANSMIT_TIMEOUT: u32 = 2000;
pub(crate) const RETRANSMIT_TIMEOUT_RND: u32 = 1000;

pub(crate) const DEFAULT_CODING_RATE: CodingRate = CodingRate::_4_5;
pub(crate) const LORA_PREAMBLE_LENGTH: u16 = 8;
pub(crate) const FSK_PREAMBLE_LENGTH: u16 = 5;
pub(crate) const FSK_FREQUENCY_DEVIATION: u32 = 25_000;
pub(crate) const FSK_RX_BANDWIDTH: u32 = 50_000;
pub(crate) const FSK_RX_BANDWIDTH_AFC: u32 = 83_333;
pub(crate) const BEACON_PREAMBLE_LENGTH: u16 = 10;
/// Transmission watchdog.
pub(crate) const TX_TIMEOUT: u32 = 3000;

/// Size of the MAC header, frame header and MIC, added on top of the max application payload
/// when configuring the radio receiver.
pub(crate) const FRMPAYLOAD_OVERHEAD: u8 = 13;

pub(crate) const DEFAULT_ANTENNA_GAIN: f32 = 2.15;
pub(crate) const DEFAULT_MIN_RX_SYMBOLS: u8 = 6;
/// Lower bound of a receive window timeout.
pub(crate) const MIN_RX_WINDOW_SYMBOLS: u32 = 5;

/// Observation period of the duty-cycle credits while joined.
pub(crate) const DUTY_CYCLE_TIME_PERIOD: TimerTime = 1_800_000;

/// Join back-off: 1 % in the first hour after start-up...
pub(crate) const BACKOFF_DC_1_HOUR: u16 = 100;
/// ...0.1 % for the following ten hours...
pub(crate) const BACKOFF_DC_10_HOURS: u16 = 1000;
/// ...and 0.01 % for every day after that.
pub(crate) const BACKOFF_DC_24_HOURS: u16 = 10000;

pub(crate) const BACKOFF_DUTY_CYCLE_1_HOUR_IN_S: u64 = 3600;
pub(crate) const BACKOFF_DUTY_CYCLE_10_HOURS_IN_S: u64 =
    BACKOFF_DUTY_CYCLE_1_HOUR_IN_S + 10 * BACKOFF_DUTY_CYCLE_1_HOUR_IN_S;
pub(crate) const BACKOFF_DUTY_CYCLE_24_HOURS_IN_S: u64 =
    BACKOFF_DUTY_CYCLE_10_HOURS_IN_S + 24 * BACKOFF_DUTY_CYCLE_1_HOUR_IN_S;
pub(crate) const BACKOFF_24_HOURS_IN_S: u64 = 24 * BACKOFF_DUTY_CYCLE_1_HOUR_IN_S;

/// Power index to physical power conversion step.
pub(crate) const TX_POWER_STEP_DB: f32 = 2.0;

/// Downlink EIRP values indexed by the `MaxEIRP` field of `TxParamSetupReq`.
pub(crate) const MAX_EIRP_TABLE: [u8; 16] =
    [8, 10, 12, 13, 14, 16, 18, 20, 21, 24, 26, 27, 29, 30, 33, 36];
