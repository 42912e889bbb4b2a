// pn532tag/src/error.rs

//! Error types

use thiserror::Error;

/// Reasons a chip -> host frame was rejected by the frame reader.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Preamble or start code missing
    #[error("bad frame header")]
    BadHeader,

    /// LEN + LCS did not sum to zero
    #[error("bad length checksum: len={len:#04x}, lcs={lcs:#04x}")]
    BadLengthChecksum {
        /// LEN byte as read
        len: u8,
        /// LCS byte as read
        lcs: u8,
    },

    /// TFI was not chip -> host, or the command byte was not the expected echo
    #[error("bad direction or command echo: tfi={tfi:#04x}, command={command:#04x}")]
    BadDirectionOrCommandEcho {
        /// TFI byte as read
        tfi: u8,
        /// Command byte as read
        command: u8,
    },

    /// Payload longer than the caller's buffer
    #[error("payload of {len} bytes exceeds {max} bytes")]
    PayloadTooLarge {
        /// Payload length announced by the frame
        len: usize,
        /// Largest payload the caller accepts
        max: usize,
    },

    /// DCS did not match the frame data
    #[error("bad payload checksum: expected {expected:#04x}, got {actual:#04x}")]
    BadPayloadChecksum {
        /// Checksum computed over the frame data
        expected: u8,
        /// DCS byte as read
        actual: u8,
    },
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// The chip never reported ready within the timeout
    #[error("timed out waiting for the chip")]
    LinkTimeout,

    /// The ACK frame read back did not match
    #[error("invalid ack frame")]
    InvalidAck,

    /// A response frame failed validation
    #[error("frame error: {0}")]
    Frame(#[from] ParseError),

    /// Non-zero status byte at the head of a target-mode response
    #[error("unexpected chip status: {0:#04x}")]
    UnexpectedStatus(u8),

    /// Data larger than the space reserved for it
    #[error("response of {actual} bytes does not fit in a {capacity}-byte buffer")]
    BufferTooSmall {
        /// Bytes available
        capacity: usize,
        /// Bytes that had to fit
        actual: usize,
    },

    /// The initiator released the target or none was found
    #[error("no reader present")]
    NoReaderPresent,

    /// A response was shorter than its layout requires
    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Bytes required
        expected: usize,
        /// Bytes present
        actual: usize,
    },

    /// A response field held an unexpected value
    #[error("unexpected response: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse {
        /// Value required
        expected: u8,
        /// Value read
        actual: u8,
    },

    /// SPI or GPIO failure in the bus implementation
    #[error("bus error: {0}")]
    Bus(String),

    /// NDEF bytes that do not parse as a message
    #[error("malformed NDEF data: {0}")]
    MalformedNdef(&'static str),

    /// No token to serve
    #[error("no token available")]
    TokenUnavailable,

    /// A blocking worker panicked or was cancelled
    #[error("blocking task failed: {0}")]
    Task(String),

    /// The service was stopped with `cancel()`
    #[error("cancelled")]
    Cancelled,
}

impl Error {
    /// Link-level failures end the current session; the service loop
    /// re-enters target mode and tries again.
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            Error::LinkTimeout
                | Error::InvalidAck
                | Error::Frame(_)
                | Error::UnexpectedStatus(_)
                | Error::NoReaderPresent
                | Error::InvalidLength { .. }
                | Error::UnexpectedResponse { .. }
        )
    }
}

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;
