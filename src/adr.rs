//! Adaptive data rate back-off.
//!
//! While ADR is enabled, every uplink without a downlink in return bumps the ADR ack counter.
//! Past `ack_limit` the device asks the network for an answer, past `ack_limit + ack_delay` it
//! restores its default TX power, and from `ack_limit + 2 * ack_delay` on it lowers its datarate
//! by one step every `ack_delay` uplinks. Once the slowest datarate is reached, the default
//! channels and a single transmission per frame are restored.
use crate::region::{Configuration, GetPhyParams, InitType, PhyAttribute};
use crate::DR;

/// ADR state of the device, owned by the MAC layer.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdrState {
    pub enabled: bool,
    /// Re-enable the default channels when the datarate floor is reached.
    pub update_chan_mask: bool,
    /// Uplinks sent since the last downlink.
    pub ack_counter: u32,
    pub ack_limit: u16,
    pub ack_delay: u16,
    pub datarate: DR,
    pub tx_power: u8,
    pub nb_trans: u8,
    pub uplink_dwell_time: bool,
}

impl AdrState {
    /// ADR enabled, with the region's default datarate, power and ack thresholds.
    pub fn new(configuration: &Configuration) -> Self {
        let int = |attribute| phy_int(configuration, attribute);
        let query = GetPhyParams::new(PhyAttribute::DefTxDr);
        Self {
            enabled: true,
            update_chan_mask: true,
            ack_counter: 0,
            ack_limit: u16::try_from(int(PhyAttribute::DefAdrAckLimit)).unwrap_or(u16::MAX),
            ack_delay: u16::try_from(int(PhyAttribute::DefAdrAckDelay)).unwrap_or(u16::MAX),
            datarate: configuration.get_phy_param(&query).as_dr().unwrap_or(DR::_0),
            tx_power: u8::try_from(int(PhyAttribute::DefTxPower)).unwrap_or(0),
            nb_trans: 1,
            uplink_dwell_time: false,
        }
    }
}

fn phy_int(configuration: &Configuration, attribute: PhyAttribute) -> i64 {
    configuration.get_phy_param(&GetPhyParams::new(attribute)).as_int().unwrap_or(0)
}

/// Settings of the next uplink.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdrResult {
    pub datarate: DR,
    pub tx_power: u8,
    pub nb_trans: u8,
    /// Set the `ADRACKReq` bit of the uplink.
    pub adr_ack_req: bool,
    /// The ack counter the result was computed for.
    pub ack_counter: u32,
}

/// Compute the datarate, power and repetitions of the next uplink.
///
/// The only side effect on `configuration` is the reactivation of the default channels, when
/// the datarate floor is reached and `state.update_chan_mask` is set.
pub fn calc_next(state: &AdrState, configuration: &mut Configuration) -> AdrResult {
    let mut result = AdrResult {
        datarate: state.datarate,
        tx_power: state.tx_power,
        nb_trans: state.nb_trans,
        adr_ack_req: false,
        ack_counter: state.ack_counter,
    };
    if !state.enabled {
        return result;
    }

    let query = GetPhyParams::new(PhyAttribute::MinTxDr).uplink_dwell_time(state.uplink_dwell_time);
    let min_datarate = configuration.get_phy_param(&query).as_dr().unwrap_or(DR::_0);
    result.datarate = result.datarate.max(min_datarate);

    let counter = state.ack_counter;
    let limit = u32::from(state.ack_limit);
    let delay = u32::from(state.ack_delay);

    result.adr_ack_req = counter >= limit;

    if counter >= limit + delay {
        let default_power = phy_int(configuration, PhyAttribute::DefTxPower);
        result.tx_power = u8::try_from(default_power).unwrap_or(0);
    }

    // a zero delay steps down on every uplink
    let on_step = |counter: u32| (counter - limit).checked_rem(delay).map_or(true, |r| r == 0);
    if counter >= limit + 2 * delay && on_step(counter) {
        if result.datarate == min_datarate {
            if state.update_chan_mask {
                configuration.init_defaults(InitType::ActivateDefaultChannels);
            }
            result.nb_trans = 1;
        }
        let query = GetPhyParams::new(PhyAttribute::NextLowerTxDr)
            .datarate(result.datarate)
            .uplink_dwell_time(state.uplink_dwell_time);
        result.datarate = configuration.get_phy_param(&query).as_dr().unwrap_or(min_datarate);
        trace!("ADR back-off to DR{} at ack counter {}", result.datarate, counter);
    }
    result
}
