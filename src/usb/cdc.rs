//! USB CDC ACM console transport
//!
//! Output staging for the virtual serial port plus the identity the
//! device enumerates with.

#[cfg(feature = "embedded")]
use embassy_usb::class::cdc_acm::State;
use heapless::Vec;

use crate::config::{CONSOLE_OUTPUT_LEN, USB_CDC_PACKET_SIZE, USB_PID, USB_VID};

/// CDC ACM class state, kept in a `StaticCell` for the device lifetime
#[cfg(feature = "embedded")]
pub struct CdcState<'d> {
    state: State<'d>,
}

#[cfg(feature = "embedded")]
impl<'d> CdcState<'d> {
    /// Create new CDC state
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::new(),
        }
    }

    /// State handed to `CdcAcmClass::new`
    pub fn state_mut(&mut self) -> &mut State<'d> {
        &mut self.state
    }
}

#[cfg(feature = "embedded")]
impl Default for CdcState<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Console output staged between two flushes
///
/// `\n` goes out as `\r\n` for terminal emulators. Once the buffer is full
/// further text is dropped until the next [`Self::clear`].
#[derive(Default)]
pub struct CdcWriteBuffer {
    bytes: Vec<u8, CONSOLE_OUTPUT_LEN>,
}

impl CdcWriteBuffer {
    /// Create an empty buffer
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Stage raw bytes, returning how many input bytes were taken
    pub fn write(&mut self, data: &[u8]) -> usize {
        data.iter()
            .take_while(|&&byte| {
                let room = if byte == b'\n' { 2 } else { 1 };
                if self.bytes.capacity() - self.bytes.len() < room {
                    return false;
                }
                if byte == b'\n' {
                    let _ = self.bytes.push(b'\r');
                }
                let _ = self.bytes.push(byte);
                true
            })
            .count()
    }

    /// Staged output cut into bulk packets
    ///
    /// Output filling its last packet exactly is followed by a zero-length
    /// packet so the host completes the transfer.
    pub fn packets(&self) -> impl Iterator<Item = &[u8]> {
        let packet = usize::from(USB_CDC_PACKET_SIZE);
        let terminator: &[u8] = &[];
        let needs_zlp = !self.bytes.is_empty() && self.bytes.len() % packet == 0;
        self.bytes
            .chunks(packet)
            .chain(needs_zlp.then_some(terminator))
    }

    /// Staged output
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Drop staged output
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Number of staged bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing is staged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl core::fmt::Write for CdcWriteBuffer {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write(s.as_bytes());
        Ok(())
    }
}

/// Bytes echoed back for one received console byte
#[must_use]
pub fn echo(byte: &u8) -> &[u8] {
    match *byte {
        b'\r' | b'\n' => b"\r\n",
        _ => core::slice::from_ref(byte),
    }
}

/// What the device reports during enumeration
#[derive(Clone, Copy, Debug)]
pub struct UsbIdentity {
    /// Vendor ID
    pub vid: u16,
    /// Product ID
    pub pid: u16,
    /// Device release (BCD)
    pub device_release: u16,
    /// Manufacturer string
    pub manufacturer: &'static str,
    /// Product string
    pub product: &'static str,
    /// Serial number string
    pub serial: &'static str,
}

impl UsbIdentity {
    /// pid.codes test VID, console product strings
    pub const CONSOLE: Self = Self {
        vid: USB_VID,
        pid: USB_PID,
        device_release: 0x0100,
        manufacturer: "PWM Console",
        product: "TIM1 PWM Console",
        serial: "0001",
    };

    /// Device configuration carrying this identity
    #[cfg(feature = "embedded")]
    #[must_use]
    pub fn config(&self) -> embassy_usb::Config<'static> {
        let mut config = embassy_usb::Config::new(self.vid, self.pid);
        config.manufacturer = Some(self.manufacturer);
        config.product = Some(self.product);
        config.serial_number = Some(self.serial);
        config.device_release = self.device_release;
        config.max_power = 100;
        config.max_packet_size_0 = 64;
        config
    }
}

impl Default for UsbIdentity {
    fn default() -> Self {
        Self::CONSOLE
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for UsbIdentity {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} ({:04X}:{:04X})", self.product, self.vid, self.pid);
    }
}
