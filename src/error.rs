use crate::TimerTime;

/// Failures reported by the regional layer.
///
/// None of these are fatal: a rejected MAC command ends up as a cleared status bit in the next
/// uplink, a channel search failure delays or skips a transmission.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Out of range argument, eg: a channel id beyond the region's channel table.
    ParameterInvalid,
    /// The frequency is not allowed in the region.
    FrequencyInvalid,
    /// The datarate (or datarate range) is not allowed in the region.
    DatarateInvalid,
    FreqAndDrInvalid,
    /// No enabled channel supports the requested datarate.
    NoChannelFound,
    /// Channels were available, but all of them failed listen-before-talk.
    NoFreeChannelFound,
    /// Every matching channel is waiting for duty-cycle credits; retry after `wait_time` ms.
    DutyCycleRestricted { wait_time: TimerTime },
    /// The radio is busy with another operation.
    RadioBusy,
    /// The radio driver reported a failure.
    Radio,
}

pub type Result<T = ()> = core::result::Result<T, Error>;
