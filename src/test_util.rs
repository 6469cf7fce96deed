use crate::radio::{compute_time_on_air, ModemParams, Radio, RxConfig, TxConfig};
use crate::{Error, Result, TimerTime};

/// Records the last configurations instead of driving a transceiver.
#[derive(Debug)]
pub(crate) struct MockRadio {
    pub idle: bool,
    pub tx: Option<TxConfig>,
    pub rx: Option<RxConfig>,
    /// Timeout passed to the last `set_rx`.
    pub rx_timeout: Option<u32>,
    /// Frequencies listened to before transmitting.
    pub sensed: heapless::Vec<u32, 16>,
    /// Frequencies reported busy by listen-before-talk.
    pub busy: heapless::Vec<u32, 16>,
    pub sleeping: bool,
}

impl Default for MockRadio {
    fn default() -> Self {
        Self {
            idle: true,
            tx: None,
            rx: None,
            rx_timeout: None,
            sensed: heapless::Vec::new(),
            busy: heapless::Vec::new(),
            sleeping: false,
        }
    }
}

impl Radio for MockRadio {
    fn is_idle(&self) -> bool {
        self.idle
    }

    fn configure_tx(&mut self, config: &TxConfig) -> Result {
        self.tx = Some(*config);
        Ok(())
    }

    fn configure_rx(&mut self, config: &RxConfig) -> Result {
        self.rx = Some(*config);
        Ok(())
    }

    fn transmit(&mut self, _buffer: &[u8]) -> Result {
        if self.tx.is_none() {
            return Err(Error::Radio);
        }
        Ok(())
    }

    fn set_rx(&mut self, timeout: u32) -> Result {
        self.rx_timeout = Some(timeout);
        Ok(())
    }

    fn set_standby(&mut self) {
        self.sleeping = false;
    }

    fn set_sleep(&mut self) {
        self.sleeping = true;
    }

    fn is_channel_free(
        &mut self,
        frequency: u32,
        _rx_bandwidth: u32,
        _rssi_threshold: i16,
        _max_carrier_sense_time: u32,
    ) -> bool {
        self.sensed.push(frequency).ok();
        !self.busy.contains(&frequency)
    }

    fn time_on_air(&self, modem: &ModemParams, preamble_len: u16, payload_len: u8) -> TimerTime {
        compute_time_on_air(modem, preamble_len, payload_len)
    }

    fn wakeup_time(&self) -> u32 {
        1
    }
}
