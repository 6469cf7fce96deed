//! Decoding of the regional MAC commands and their answer status bits.
use crate::region::store::{ChannelMask, DrRange};
use crate::region::DR;

macro_rules! status_bits {
    (
        $(#[$outer:meta])*
        $name:ident { $( $(#[$inner:meta])* $bit:literal => $get:ident, $clear:ident; )+ }
    ) => {
        $(#[$outer])*
        #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(u8);

        impl $name {
            const ALL: u8 = 0 $( | (1 << $bit) )+;

            /// Every bit acknowledged.
            pub const fn ok() -> Self {
                Self(Self::ALL)
            }

            pub fn from_bits(bits: u8) -> Self {
                Self(bits & Self::ALL)
            }

            pub fn bits(self) -> u8 {
                self.0
            }

            pub fn is_ok(self) -> bool {
                self.0 == Self::ALL
            }

            $(
                $(#[$inner])*
                pub fn $get(self) -> bool {
                    self.0 & (1 << $bit) != 0
                }

                pub(crate) fn $clear(&mut self) {
                    self.0 &= !(1 << $bit);
                }
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ok()
            }
        }
    };
}

status_bits! {
    /// Answer of a `LinkADRReq`.
    LinkAdrStatus {
        0 => channel_mask_ack, nack_channel_mask;
        1 => datarate_ack, nack_datarate;
        2 => power_ack, nack_power;
    }
}

status_bits! {
    /// Answer of a `RXParamSetupReq`.
    RxParamSetupStatus {
        0 => channel_ack, nack_channel;
        1 => rx2_datarate_ack, nack_rx2_datarate;
        2 => rx1_dr_offset_ack, nack_rx1_dr_offset;
    }
}

status_bits! {
    /// Answer of a `NewChannelReq`.
    NewChannelStatus {
        /// The datarate range is allowed.
        1 => datarate_range_ok, nack_datarate_range;
        0 => channel_frequency_ok, nack_channel_frequency;
    }
}

status_bits! {
    /// Answer of a `DlChannelReq`.
    DlChannelStatus {
        0 => channel_frequency_ok, nack_channel_frequency;
        /// The uplink frequency exists for this channel.
        1 => uplink_frequency_exists, nack_uplink_frequency;
    }
}

/// Frequencies are sent as 24 bits little endian, in units of 100 Hz.
fn frequency(bytes: &[u8]) -> u32 {
    (u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2]) << 16)) * 100
}

/// One block of a `LinkADRReq`.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAdrReq {
    /// Raw datarate nibble, `0xF` keeps the current value.
    pub datarate: u8,
    /// Raw power nibble, `0xF` keeps the current value.
    pub tx_power: u8,
    pub ch_mask: u16,
    pub ch_mask_ctrl: u8,
    pub nb_rep: u8,
}

pub(crate) const LINK_ADR_REQ_CID: u8 = 0x03;
pub(crate) const LINK_ADR_REQ_LEN: usize = 5;

impl LinkAdrReq {
    /// Parse one block, CID included. Returns the block and the number of consumed bytes, or
    /// `None` when the payload does not start with a complete `LinkADRReq`.
    pub fn parse(payload: &[u8]) -> Option<(Self, usize)> {
        if payload.len() < LINK_ADR_REQ_LEN || payload[0] != LINK_ADR_REQ_CID {
            return None;
        }
        let req = Self {
            datarate: payload[1] >> 4,
            tx_power: payload[1] & 0x0F,
            ch_mask: u16::from(payload[2]) | (u16::from(payload[3]) << 8),
            ch_mask_ctrl: (payload[4] >> 4) & 0x07,
            nb_rep: payload[4] & 0x0F,
        };
        Some((req, LINK_ADR_REQ_LEN))
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxParamSetupReq {
    pub rx1_dr_offset: u8,
    pub datarate: DR,
    pub frequency: u32,
}

impl RxParamSetupReq {
    /// Parse the 4 bytes payload (CID excluded).
    pub fn parse(payload: &[u8]) -> Option<Self> {
        if payload.len() < 4 {
            return None;
        }
        Some(Self {
            rx1_dr_offset: (payload[0] >> 4) & 0x07,
            datarate: DR::from_nibble(payload[0]),
            frequency: frequency(&payload[1..4]),
        })
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewChannelReq {
    pub channel_id: u8,
    pub frequency: u32,
    pub dr_range: DrRange,
}

impl NewChannelReq {
    /// Parse the 5 bytes payload (CID excluded).
    pub fn parse(payload: &[u8]) -> Option<Self> {
        if payload.len() < 5 {
            return None;
        }
        Some(Self {
            channel_id: payload[0],
            frequency: frequency(&payload[1..4]),
            dr_range: DrRange::from_byte(payload[4]),
        })
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DlChannelReq {
    pub channel_id: u8,
    pub rx1_frequency: u32,
}

impl DlChannelReq {
    /// Parse the 4 bytes payload (CID excluded).
    pub fn parse(payload: &[u8]) -> Option<Self> {
        if payload.len() < 4 {
            return None;
        }
        Some(Self { channel_id: payload[0], rx1_frequency: frequency(&payload[1..4]) })
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxParamSetupReq {
    pub uplink_dwell_time: bool,
    pub downlink_dwell_time: bool,
    /// Index into the max EIRP table.
    pub max_eirp: u8,
}

impl TxParamSetupReq {
    pub fn parse(payload: &[u8]) -> Option<Self> {
        let byte = *payload.first()?;
        Some(Self {
            downlink_dwell_time: byte & 0x20 != 0,
            uplink_dwell_time: byte & 0x10 != 0,
            max_eirp: byte & 0x0F,
        })
    }

    /// Max EIRP in dBm.
    pub fn max_eirp_dbm(&self) -> u8 {
        crate::region::constants::MAX_EIRP_TABLE[self.max_eirp as usize & 0x0F]
    }
}

/// Optional channel list of a Join-Accept, 16 bytes.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfList {
    /// Type 0: up to 5 additional channel frequencies, 0 for an unused slot.
    DynamicChannel([u32; 5]),
    /// Type 1: channel mask words.
    FixedChannel(ChannelMask),
}

pub(crate) const CF_LIST_SIZE: usize = 16;

impl CfList {
    /// Returns `None` for a malformed list, which is ignored rather than rejected.
    pub fn parse(payload: &[u8]) -> Option<Self> {
        if payload.len() != CF_LIST_SIZE {
            return None;
        }
        match payload[15] {
            0 => {
                let mut frequencies = [0; 5];
                for (i, f) in frequencies.iter_mut().enumerate() {
                    *f = frequency(&payload[i * 3..i * 3 + 3]);
                }
                Some(CfList::DynamicChannel(frequencies))
            }
            1 => {
                let mut mask = ChannelMask::default();
                for i in 0..5 {
                    mask[i] = u16::from(payload[i * 2]) | (u16::from(payload[i * 2 + 1]) << 8);
                }
                Some(CfList::FixedChannel(mask))
            }
            _ => None,
        }
    }
}
