//! Frequency grids of the four CN470 channel plans.
//!
//! `Cn470ChannelPlan::Unknown` answers like the 20 MHz type A plan, the default plan of devices
//! activated by personalization.
use super::*;

/// Number of common join channels, shared by all plans.
pub(crate) const NB_JOIN_CHANNELS: u8 = 20;

const STEP: u32 = 200_000;

const A20_RX2_FREQ_ABP: u32 = 486_900_000;
const A20_RX2_FREQ_OTAA: [u32; 8] = [
    485_300_000,
    486_900_000,
    488_500_000,
    490_100_000,
    491_700_000,
    493_300_000,
    494_000_000,
    496_500_000,
];
const B20_RX2_FREQ_ABP: u32 = 498_300_000;
const B20_RX2_FREQ_OTAA: [u32; 2] = [478_300_000, 498_300_000];
const A26_RX2_FREQ: u32 = 492_500_000;
const B26_RX2_FREQ: u32 = 502_500_000;

const A26_BEACON_FREQ: u32 = 494_900_000;
const B26_BEACON_FREQ: u32 = 504_900_000;

/// Join channels of the 20 MHz type B plan.
const B20_FIRST_JOIN_CHANNEL: u8 = 8;

impl Cn470ChannelPlan {
    /// Plan of the common join channel `index`, and the id of that channel within the plan.
    pub(crate) fn of_join_channel(index: u8) -> Option<(Self, u8)> {
        match index {
            0..=7 => Some((Self::Plan20MhzA, 3 + 8 * index)),
            8..=9 => Some((Self::Plan20MhzB, 15 + 32 * (index - B20_FIRST_JOIN_CHANNEL))),
            10..=14 => Some((Self::Plan26MhzA, 10 * (index - 10))),
            15..=19 => Some((Self::Plan26MhzB, 10 * (index - 15))),
            _ => None,
        }
    }

    pub(crate) fn is_20mhz(self) -> bool {
        matches!(self, Self::Unknown | Self::Plan20MhzA | Self::Plan20MhzB)
    }

    pub(crate) fn nb_channels(self) -> u8 {
        if self.is_20mhz() {
            64
        } else {
            48
        }
    }

    pub(crate) fn default_mask(self) -> ChannelMask {
        ChannelMask::first(self.nb_channels().into())
    }

    /// Channel mask words covering the plan's channels.
    pub(crate) fn mask_words(self) -> usize {
        usize::from(self.nb_channels() / 16)
    }

    pub(crate) fn uplink_frequency(self, channel: u8) -> u32 {
        let (base, first) = match self {
            Self::Unknown | Self::Plan20MhzA if channel >= 32 => (503_500_000, 32),
            Self::Unknown | Self::Plan20MhzA => (470_300_000, 0),
            Self::Plan20MhzB if channel >= 32 => (496_900_000, 32),
            Self::Plan20MhzB => (476_900_000, 0),
            Self::Plan26MhzA => (470_300_000, 0),
            Self::Plan26MhzB => (480_300_000, 0),
        };
        base + u32::from(channel - first) * STEP
    }

    pub(crate) fn rx1_frequency(self, channel: u8) -> u32 {
        match self {
            Self::Unknown | Self::Plan20MhzA if channel >= 32 => {
                490_300_000 + u32::from(channel - 32) * STEP
            }
            Self::Unknown | Self::Plan20MhzA => 483_900_000 + u32::from(channel) * STEP,
            // type B answers on the uplink frequency
            Self::Plan20MhzB => self.uplink_frequency(channel),
            Self::Plan26MhzA => 490_100_000 + u32::from(channel % 24) * STEP,
            Self::Plan26MhzB => 500_100_000 + u32::from(channel % 24) * STEP,
        }
    }

    pub(crate) fn rx2_frequency(self, join_channel: u8, is_otaa: bool) -> u32 {
        match self {
            Self::Unknown | Self::Plan20MhzA if is_otaa => A20_RX2_FREQ_OTAA
                .get(usize::from(join_channel))
                .copied()
                .unwrap_or(A20_RX2_FREQ_ABP),
            Self::Unknown | Self::Plan20MhzA => A20_RX2_FREQ_ABP,
            Self::Plan20MhzB if is_otaa => B20_RX2_FREQ_OTAA
                .get(usize::from(join_channel.saturating_sub(B20_FIRST_JOIN_CHANNEL)))
                .copied()
                .unwrap_or(B20_RX2_FREQ_ABP),
            Self::Plan20MhzB => B20_RX2_FREQ_ABP,
            Self::Plan26MhzA => A26_RX2_FREQ,
            Self::Plan26MhzB => B26_RX2_FREQ,
        }
    }

    /// Frequency of the beacon or ping slot `channel`.
    pub(crate) fn downlink_frequency(self, channel: u8, join_channel: u8, ping_slot: bool) -> u32 {
        match self {
            Self::Unknown | Self::Plan20MhzA => self.rx1_frequency(channel),
            Self::Plan20MhzB if ping_slot => self.rx1_frequency(channel),
            Self::Plan20MhzB if join_channel == B20_FIRST_JOIN_CHANNEL => self.rx1_frequency(23),
            Self::Plan20MhzB => self.rx1_frequency(55),
            Self::Plan26MhzA => A26_BEACON_FREQ,
            Self::Plan26MhzB => B26_BEACON_FREQ,
        }
    }

    pub(crate) fn beacon_channel_offset(self, join_channel: u8) -> u8 {
        match self {
            Self::Unknown | Self::Plan20MhzA => join_channel.saturating_mul(8),
            Self::Plan20MhzB => {
                join_channel.saturating_sub(B20_FIRST_JOIN_CHANNEL).saturating_mul(32)
            }
            Self::Plan26MhzA | Self::Plan26MhzB => 0,
        }
    }

    pub(crate) fn nb_beacon_channels(self) -> u8 {
        match self {
            Self::Unknown | Self::Plan20MhzA => 8,
            _ => 1,
        }
    }

    pub(crate) fn nb_ping_slot_channels(self) -> u8 {
        match self {
            Self::Unknown | Self::Plan20MhzA => 8,
            Self::Plan20MhzB => 32,
            Self::Plan26MhzA | Self::Plan26MhzB => 1,
        }
    }

    /// Downlink frequencies of the plan.
    pub(crate) fn frequency_valid(self, frequency: u32) -> bool {
        let on_grid = |first: u32, last: u32| {
            (first..=last).contains(&frequency) && (frequency - first) % STEP == 0
        };
        match self {
            Self::Unknown | Self::Plan20MhzA => on_grid(483_900_000, 496_500_000),
            Self::Plan20MhzB => {
                on_grid(476_900_000, 483_100_000) || on_grid(496_900_000, 503_100_000)
            }
            Self::Plan26MhzA => on_grid(490_100_000, 494_700_000),
            Self::Plan26MhzB => on_grid(500_100_000, 504_700_000),
        }
    }

    pub(crate) fn ch_mask_ctrl(self, raw: u8) -> ChMaskCtrl {
        match (self.is_20mhz(), raw) {
            (true, 0..=3) | (false, 0..=2) => ChMaskCtrl::SetGroup(raw),
            (true, 6) | (false, 3) => ChMaskCtrl::EnableAll,
            (true, 7) | (false, 4) => ChMaskCtrl::DisableAll,
            _ => ChMaskCtrl::Reserved,
        }
    }
}
