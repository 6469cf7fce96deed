//! Per-device regional state: channel table, channel masks, duty-cycle bands and join rotation.
//!
//! The state is split in two groups so that an integrator can persist them with a different
//! cadence: [`NvmGroup1`] changes on almost every uplink, [`NvmGroup2`] only when the network
//! reconfigures channels.
use super::DR;
use crate::TimerTime;
use core::ops::{BitAnd, BitOr, Index, IndexMut};

/// Number of 16-bit words in a channel mask (96 channels).
pub const CHANNELS_MASK_SIZE: usize = 6;
/// Largest channel table of all regions (CN470).
pub const MAX_CHANNELS: usize = 16 * CHANNELS_MASK_SIZE;
/// Largest band table of all regions (EU868).
pub const MAX_BANDS: usize = 6;

/// One bit per channel, channel `n` lives in bit `n % 16` of word `n / 16`.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMask([u16; CHANNELS_MASK_SIZE]);

impl ChannelMask {
    pub const fn new(words: [u16; CHANNELS_MASK_SIZE]) -> Self {
        Self(words)
    }

    /// Mask with channels `0..n` enabled.
    pub fn first(n: usize) -> Self {
        let mut mask = Self::default();
        for channel in 0..n.min(MAX_CHANNELS) {
            mask.set_channel(channel, true);
        }
        mask
    }

    pub fn is_enabled(&self, channel: usize) -> bool {
        match self.0.get(channel / 16) {
            Some(word) => word & (1 << (channel % 16)) != 0,
            None => false,
        }
    }

    pub fn set_channel(&mut self, channel: usize, enabled: bool) {
        if let Some(word) = self.0.get_mut(channel / 16) {
            if enabled {
                *word |= 1 << (channel % 16);
            } else {
                *word &= !(1 << (channel % 16));
            }
        }
    }

    /// Number of enabled channels in words `start..stop`.
    pub fn count(&self, start: usize, stop: usize) -> u8 {
        let stop = stop.min(CHANNELS_MASK_SIZE);
        if start >= stop {
            return 0;
        }
        self.0[start..stop].iter().map(|w| w.count_ones() as u8).sum()
    }

    /// Copy the first `len` words of `src`.
    pub fn copy_from(&mut self, src: &ChannelMask, len: usize) {
        let len = len.min(CHANNELS_MASK_SIZE);
        self.0[..len].copy_from_slice(&src.0[..len]);
    }

    pub fn is_subset_of(&self, other: &ChannelMask) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a & !b == 0)
    }

    pub fn words(&self) -> &[u16; CHANNELS_MASK_SIZE] {
        &self.0
    }

    /// Iterate over the ids of the enabled channels, below `max`.
    pub fn enabled_channels(&self, max: usize) -> impl Iterator<Item = usize> + '_ {
        (0..max.min(MAX_CHANNELS)).filter(|&ch| self.is_enabled(ch))
    }
}

impl Index<usize> for ChannelMask {
    type Output = u16;

    fn index(&self, index: usize) -> &u16 {
        &self.0[index]
    }
}

impl IndexMut<usize> for ChannelMask {
    fn index_mut(&mut self, index: usize) -> &mut u16 {
        &mut self.0[index]
    }
}

impl BitAnd for ChannelMask {
    type Output = ChannelMask;

    fn bitand(mut self, rhs: Self) -> Self {
        self.0.iter_mut().zip(rhs.0.iter()).for_each(|(a, b)| *a &= b);
        self
    }
}

impl BitOr for ChannelMask {
    type Output = ChannelMask;

    fn bitor(mut self, rhs: Self) -> Self {
        self.0.iter_mut().zip(rhs.0.iter()).for_each(|(a, b)| *a |= b);
        self
    }
}

/// Inclusive datarate range of a channel.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrRange {
    pub min: DR,
    pub max: DR,
}

impl DrRange {
    pub const fn new(min: DR, max: DR) -> Self {
        Self { min, max }
    }

    /// Decode the `DrRange` byte of `NewChannelReq`: max in bits 7:4, min in bits 3:0.
    pub fn from_byte(byte: u8) -> Self {
        Self { min: DR::from_nibble(byte), max: DR::from_nibble(byte >> 4) }
    }

    pub fn contains(&self, dr: DR) -> bool {
        self.min <= dr && dr <= self.max
    }
}

impl Default for DrRange {
    fn default() -> Self {
        Self::new(DR::_0, DR::_0)
    }
}

/// An uplink channel. `frequency == 0` marks an unused slot.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    pub frequency: u32,
    /// Downlink frequency of the RX1 window, 0 when it is the uplink frequency.
    pub rx1_frequency: u32,
    pub dr_range: DrRange,
    pub band: u8,
}

impl Channel {
    pub const fn new(frequency: u32, min: DR, max: DR, band: u8) -> Self {
        Self { frequency, rx1_frequency: 0, dr_range: DrRange::new(min, max), band }
    }

    pub fn is_defined(&self) -> bool {
        self.frequency != 0
    }
}

/// A frequency sub-range sharing one duty-cycle budget.
///
/// Credits are regenerated lazily from elapsed time whenever the channel search runs, there is
/// no timer behind them.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Inverse of the duty cycle: 100 means 1 %.
    pub duty_cycle: u16,
    /// Lowest allowed TX power index (highest power) in the band.
    pub tx_max_power: u8,
    pub last_tx_done_time: Option<TimerTime>,
    pub last_band_update_time: Option<TimerTime>,
    pub last_max_credit_assign_time: TimerTime,
    pub time_credits: TimerTime,
    pub max_time_credits: TimerTime,
    pub ready_for_tx: bool,
}

impl Band {
    pub const fn new(duty_cycle: u16, tx_max_power: u8) -> Self {
        Self {
            duty_cycle,
            tx_max_power,
            last_tx_done_time: None,
            last_band_update_time: None,
            last_max_credit_assign_time: 0,
            time_credits: 0,
            max_time_credits: 0,
            ready_for_tx: true,
        }
    }
}

/// State that CN470 derives from the join channel.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cn470Context {
    pub channel_plan: Cn470ChannelPlan,
    /// Index into the list of common join channels.
    pub join_channel_index: u8,
    pub is_otaa: bool,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Cn470ChannelPlan {
    /// No plan selected yet, the channel table holds the common join channels.
    #[default]
    Unknown,
    Plan20MhzA,
    Plan20MhzB,
    Plan26MhzA,
    Plan26MhzB,
}

/// Frequently updated state.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NvmGroup1 {
    /// Channels not yet used in the current hopping round (US915/AU915).
    pub mask_remaining: ChannelMask,
    /// Group of 8 channels used for the next join request (US915/AU915).
    pub join_channel_group_index: u8,
    pub join_trials_counter: u16,
    pub bands: heapless::Vec<Band, MAX_BANDS>,
}

/// Rarely updated state.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NvmGroup2 {
    pub channels: heapless::Vec<Channel, MAX_CHANNELS>,
    pub mask: ChannelMask,
    pub default_mask: ChannelMask,
    pub cn470: Cn470Context,
    /// Listen-before-talk threshold, for regions that require it.
    pub rssi_free_threshold: i16,
    pub carrier_sense_time: u32,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PhyParamStore {
    pub group1: NvmGroup1,
    pub group2: NvmGroup2,
}

impl PhyParamStore {
    /// A store with `nb_channels` unused channel slots and the given bands.
    pub(crate) fn with_capacity(nb_channels: usize, bands: &[Band]) -> Self {
        let mut store = Self::default();
        store.group2.channels.resize(nb_channels.min(MAX_CHANNELS), Channel::default()).ok();
        store.group1.bands.extend(bands.iter().copied().take(MAX_BANDS));
        store
    }

    pub fn channel(&self, id: usize) -> Option<&Channel> {
        self.group2.channels.get(id)
    }

    pub fn band(&self, id: usize) -> Option<&Band> {
        self.group1.bands.get(id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn channel_mask_bits() {
        let mut mask = ChannelMask::default();
        mask.set_channel(0, true);
        mask.set_channel(17, true);
        mask.set_channel(95, true);
        assert!(mask.is_enabled(17));
        assert!(!mask.is_enabled(16));
        assert_eq!(mask[1], 0x0002);
        assert_eq!(mask[5], 0x8000);
        assert_eq!(mask.count(0, 6), 3);
        assert_eq!(mask.count(1, 5), 1);
        mask.set_channel(17, false);
        assert_eq!(mask.count(0, 6), 2);
        // out of range is ignored
        mask.set_channel(200, true);
        assert!(!mask.is_enabled(200));
    }

    #[test]
    fn channel_mask_subset() {
        let a = ChannelMask::new([0x00ff, 0, 0, 0, 0x0001, 0]);
        let b = ChannelMask::new([0xffff, 0, 0, 0, 0x00ff, 0]);
        assert!(a.is_subset_of(&b));
        assert!(!b.is_subset_of(&a));
        assert_eq!(a & b, a);
        assert_eq!(a | b, b);
    }

    #[test]
    fn first_channels() {
        let mask = ChannelMask::first(20);
        assert_eq!(mask[0], 0xffff);
        assert_eq!(mask[1], 0x000f);
        assert_eq!(mask.enabled_channels(96).count(), 20);
    }

    #[test]
    fn dr_range_byte() {
        let range = DrRange::from_byte(0x50);
        assert_eq!(range.min, DR::_0);
        assert_eq!(range.max, DR::_5);
        assert!(range.contains(DR::_3));
        assert!(!range.contains(DR::_6));
    }
}
