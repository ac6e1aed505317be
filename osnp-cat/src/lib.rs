use colored::*;
use osnp::config::KEY_COUNTER_UNSET;
use osnp::mac::{MacCommandId, PairingCommand};
use osnp_frame::{Frame, FrameType};

/// An error that can occur when dissecting a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The input is not a hexadecimal string.
    InvalidHex(hex::FromHexError),
    /// The input is not an OSNP frame.
    Frame(osnp_frame::Error),
}

impl From<hex::FromHexError> for Error {
    fn from(value: hex::FromHexError) -> Self {
        Self::InvalidHex(value)
    }
}

impl From<osnp_frame::Error> for Error {
    fn from(value: osnp_frame::Error) -> Self {
        Self::Frame(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidHex(err) => write!(f, "invalid input: {err}"),
            Error::Frame(err) => write!(f, "invalid frame: {err}"),
        }
    }
}

impl std::error::Error for Error {}

struct Writer<'b> {
    buffer: &'b mut String,
    indent: usize,
}

impl<'b> Writer<'b> {
    fn new(buffer: &'b mut String) -> Self {
        Self { buffer, indent: 0 }
    }

    fn increase_indent(&mut self) {
        self.indent += 2;
    }

    fn decrease_indent(&mut self) {
        self.indent -= 2;
    }

    fn write(&mut self, s: String) {
        self.buffer.push_str(&" ".repeat(self.indent));
        self.buffer.push_str(&s);
    }

    fn writeln(&mut self, s: String) {
        self.write(s);
        self.buffer.push('\n');
    }

    fn heading(&mut self, s: &str) {
        self.writeln(s.underline().bold().to_string());
    }
}

pub struct FrameParser {}

impl FrameParser {
    /// Dissect a frame given as a hexadecimal string, check sequence
    /// included.
    pub fn parse_hex(input: &str) -> Result<String, Error> {
        let data = hex::decode(input.trim())?;
        Self::parse(&data)
    }

    /// Dissect a frame, check sequence included.
    pub fn parse(input: &[u8]) -> Result<String, Error> {
        let frame = Frame::new(input)?;
        let mut buffer = String::new();

        let mut w = Writer::new(&mut buffer);

        let fc = frame.frame_control();

        // -----------------------------------------------------------------
        // Frame Control
        // -----------------------------------------------------------------
        w.heading("Frame Control");
        w.increase_indent();
        w.writeln(format!(
            "{}: {}",
            "frame type".bold(),
            format!("{:?}", fc.frame_type()).bright_blue()
        ));
        w.writeln(format!(
            "{}: {}",
            "security".bold(),
            fc.security_enabled() as usize
        ));
        w.writeln(format!(
            "{}: {}",
            "frame pending".bold(),
            fc.frame_pending() as usize
        ));
        w.writeln(format!(
            "{}: {}",
            "ack request".bold(),
            fc.ack_request() as usize
        ));
        w.writeln(format!(
            "{}: {}",
            "pan id compression".bold(),
            fc.pan_id_compression() as usize
        ));
        w.writeln(format!(
            "{}: {:?}",
            "dst addressing mode".bold(),
            fc.dst_addressing_mode()
        ));
        w.writeln(format!(
            "{}: {:?}",
            "src addressing mode".bold(),
            fc.src_addressing_mode()
        ));
        w.writeln(format!(
            "{}: {} ({:?})",
            "frame version".bold(),
            fc.frame_version() as usize,
            fc.frame_version()
        ));
        w.decrease_indent();

        // -----------------------------------------------------------------
        // Sequence Number
        // -----------------------------------------------------------------
        w.heading("Sequence Number");
        w.increase_indent();
        w.writeln(format!(
            "{}: {}",
            "sequence number".bold(),
            frame.sequence_number()
        ));
        w.decrease_indent();

        // -----------------------------------------------------------------
        // Addressing
        // -----------------------------------------------------------------
        let addr = frame.addressing();
        let layout = addr.layout();
        if addr.len() > 0 {
            w.heading("Addressing");
            w.increase_indent();

            if let Some(dst_pan_id) = addr.dst_pan_id() {
                w.writeln(format!("{}: {}", "dst pan id".bold(), dst_pan_id));
            }

            let dst_addr = addr.dst_address();
            if !dst_addr.is_empty() {
                w.writeln(format!(
                    "{}: {}{}",
                    "dst addr".bold(),
                    dst_addr,
                    if dst_addr.is_broadcast() {
                        " (broadcast)"
                    } else {
                        ""
                    }
                ));
            }

            if let Some(src_pan_id) = addr.src_pan_id() {
                w.writeln(format!(
                    "{}: {}{}",
                    "src pan id".bold(),
                    src_pan_id,
                    if layout.src_pan_id_shared {
                        " (compressed)"
                    } else {
                        ""
                    }
                ));
            }

            let src_addr = addr.src_address();
            if !src_addr.is_empty() {
                w.writeln(format!("{}: {}", "src addr".bold(), src_addr));
            }
            w.decrease_indent();
        }

        // -----------------------------------------------------------------
        // Security Trailer
        // -----------------------------------------------------------------
        if let Some(trailer) = frame.security_trailer() {
            w.heading("Security Trailer");
            w.increase_indent();
            w.writeln(format!(
                "{}: {}",
                "frame counter".bold(),
                trailer.frame_counter()
            ));
            w.writeln(format!(
                "{}: {}{}",
                "key counter".bold(),
                trailer.key_counter(),
                if trailer.key_counter() == KEY_COUNTER_UNSET {
                    " (unset)"
                } else {
                    ""
                }
            ));
            w.decrease_indent();
        }

        // -----------------------------------------------------------------
        // MAC Command
        // -----------------------------------------------------------------
        let payload = frame.payload();
        if fc.frame_type() == FrameType::MacCommand && !payload.is_empty() {
            w.heading("MAC Command");
            w.increase_indent();

            let id = MacCommandId::from(payload[0]);
            w.writeln(format!(
                "{}: {}",
                "command".bold(),
                format!("{id:?}").bright_blue()
            ));

            if id == MacCommandId::Pairing {
                let command = PairingCommand::new(payload);
                if command.check_len() {
                    w.writeln(format!(
                        "{}: {}",
                        "tx key".bold(),
                        hex::encode(command.tx_key())
                    ));
                    w.writeln(format!(
                        "{}: {}",
                        "rx key".bold(),
                        hex::encode(command.rx_key())
                    ));
                    w.writeln(format!(
                        "{}: {:#06x}",
                        "assigned address".bold(),
                        command.assigned_address()
                    ));
                } else {
                    w.writeln("invalid".to_string());
                }
            }
            w.decrease_indent();
        }

        // -----------------------------------------------------------------
        // Payload
        // -----------------------------------------------------------------
        w.heading("Payload");
        w.increase_indent();
        w.writeln(format!("{:x?}", payload));

        Ok(buffer)
    }
}
