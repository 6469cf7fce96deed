use super::{Bandwidth, Datarate, SpreadingFactor};

pub(crate) const DATARATES: [Option<Datarate>; 14] = [
    Some(Datarate::lora(SpreadingFactor::_12, Bandwidth::_125KHz, 51, 0)),
    Some(Datarate::lora(SpreadingFactor::_11, Bandwidth::_125KHz, 51, 0)),
    Some(Datarate::lora(SpreadingFactor::_10, Bandwidth::_125KHz, 51, 11)),
    Some(Datarate::lora(SpreadingFactor::_9, Bandwidth::_125KHz, 115, 53)),
    Some(Datarate::lora(SpreadingFactor::_8, Bandwidth::_125KHz, 242, 125)),
    Some(Datarate::lora(SpreadingFactor::_7, Bandwidth::_125KHz, 242, 242)),
    Some(Datarate::lora(SpreadingFactor::_8, Bandwidth::_500KHz, 242, 242)),
    // DR7: LR-FHSS, not supported
    None,
    // DR8..DR13 are downlink only
    Some(Datarate::lora(SpreadingFactor::_12, Bandwidth::_500KHz, 53, 53)),
    Some(Datarate::lora(SpreadingFactor::_11, Bandwidth::_500KHz, 129, 129)),
    Some(Datarate::lora(SpreadingFactor::_10, Bandwidth::_500KHz, 242, 129)),
    Some(Datarate::lora(SpreadingFactor::_9, Bandwidth::_500KHz, 242, 242)),
    Some(Datarate::lora(SpreadingFactor::_8, Bandwidth::_500KHz, 242, 242)),
    Some(Datarate::lora(SpreadingFactor::_7, Bandwidth::_500KHz, 242, 242)),
];

/// RX1 datarate per uplink datarate and RX1 offset.
pub(crate) static RX1_DR_OFFSETS: [[i8; 6]; 7] = [
    [8, 8, 8, 8, 8, 8],
    [9, 8, 8, 8, 8, 8],
    [10, 9, 8, 8, 8, 8],
    [11, 10, 9, 8, 8, 8],
    [12, 11, 10, 9, 8, 8],
    [13, 12, 11, 10, 9, 8],
    [13, 13, 12, 11, 10, 9],
];
