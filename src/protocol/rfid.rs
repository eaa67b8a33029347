//! # ZPL RFID Commands
//!
//! RFID-capable printers read and write the tag embedded in the label
//! during the same print cycle.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `^RSt` | Enable the RFID subsystem with tag type `t` |
//! | `^FNn^RFR,…^FS` | Read a tag memory bank into field number `n` |
//! | `^FNn^FS` | Print the contents of field number `n` |
//! | `^RFW,…^FD…^FS` | Write hex data to a tag memory bank |
//!
//! ## Memory Banks
//!
//! | Name | Bank | Writable |
//! |------|------|----------|
//! | `TID` | Tag identifier, factory programmed | no |
//! | `EPC` | Electronic product code | yes |
//! | `User Data` | User memory | yes |
//!
//! ## Addressing
//!
//! Field numbers and `^RF` parameters are defined once, in a versioned
//! [`RfidScheme`]. [`RfidScheme::V1`] is the addressing verified on the
//! reference ZT410 RFID printers:
//!
//! ```text
//! TID        ^FN1^RFR,H,0,12,2^FS
//! EPC        ^FN2^RFR,H,2,16,1^FS     write ^RFW,H,1,12^FD…^FS
//! User Data  ^FN3^RFR,U,0,32,1^FS     write ^RFW,U,0,<words>,1^FD…^FS
//! ```

use std::fmt;

/// Tag type parameter for `^RS` used by [`RfidScheme::V1`].
pub const DEFAULT_TAG_TYPE: u8 = 8;

/// Longest User Data write, in 16-bit words.
pub const MAX_USER_DATA_WORDS: u16 = 64;

/// A tag memory bank addressed by its reserved designer name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RfidField {
    Epc,
    Tid,
    UserData,
}

impl RfidField {
    /// Every reserved field, in declaration order.
    pub const ALL: [RfidField; 3] = [Self::Epc, Self::Tid, Self::UserData];

    /// Parse a reserved name. Matching is exact: `"epc"` is an ordinary
    /// variable.
    ///
    /// ```
    /// use labelzpl::protocol::rfid::RfidField;
    ///
    /// assert_eq!(RfidField::from_name("User Data"), Some(RfidField::UserData));
    /// assert_eq!(RfidField::from_name("epc"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "EPC" => Some(Self::Epc),
            "TID" => Some(Self::Tid),
            "User Data" => Some(Self::UserData),
            _ => None,
        }
    }

    /// The reserved designer name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Epc => "EPC",
            Self::Tid => "TID",
            Self::UserData => "User Data",
        }
    }
}

impl fmt::Display for RfidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// True when `name` is one of the reserved RFID field names.
pub fn is_rfid_field(name: &str) -> bool {
    RfidField::from_name(name).is_some()
}

/// `^RFR` parameters: `format,start,length,bank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadParams {
    pub format: char,
    pub start: u16,
    pub length: u16,
    pub bank: u8,
}

impl fmt::Display for ReadParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.format, self.start, self.length, self.bank)
    }
}

/// How the length parameter of a write is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteLength {
    /// Always this many words, regardless of the value.
    Fixed(u16),
    /// `clamp(ceil(hex_len / 4), 1, max)` words.
    HexWords { max: u16 },
}

impl WriteLength {
    /// Resolve the length parameter for a normalized hex value.
    pub fn for_value(self, value: &str) -> u16 {
        match self {
            Self::Fixed(n) => n,
            Self::HexWords { max } => {
                let words = value.chars().count().div_ceil(4);
                (words.min(max as usize) as u16).max(1)
            }
        }
    }
}

/// `^RFW` parameters: `format,start,length[,bank]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteParams {
    pub format: char,
    pub start: u16,
    pub length: WriteLength,
    pub bank: Option<u8>,
}

impl WriteParams {
    /// Render the parameter list for a normalized value.
    pub fn render(&self, value: &str) -> String {
        let length = self.length.for_value(value);
        match self.bank {
            Some(bank) => format!("{},{},{},{}", self.format, self.start, length, bank),
            None => format!("{},{},{}", self.format, self.start, length),
        }
    }
}

/// Field number, read parameters and optional write parameters for one bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RfidBinding {
    pub field_number: u8,
    pub read: ReadParams,
    pub write: Option<WriteParams>,
}

/// A complete, versioned RFID addressing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RfidScheme {
    pub version: &'static str,
    pub tag_type: u8,
    pub tid: RfidBinding,
    pub epc: RfidBinding,
    pub user_data: RfidBinding,
}

impl RfidScheme {
    /// Field numbers 1/2/3 for TID/EPC/User Data.
    pub const V1: Self = Self {
        version: "v1",
        tag_type: DEFAULT_TAG_TYPE,
        tid: RfidBinding {
            field_number: 1,
            read: ReadParams {
                format: 'H',
                start: 0,
                length: 12,
                bank: 2,
            },
            write: None,
        },
        epc: RfidBinding {
            field_number: 2,
            read: ReadParams {
                format: 'H',
                start: 2,
                length: 16,
                bank: 1,
            },
            write: Some(WriteParams {
                format: 'H',
                start: 1,
                length: WriteLength::Fixed(12),
                bank: None,
            }),
        },
        user_data: RfidBinding {
            field_number: 3,
            read: ReadParams {
                format: 'U',
                start: 0,
                length: 32,
                bank: 1,
            },
            write: Some(WriteParams {
                format: 'U',
                start: 0,
                length: WriteLength::HexWords {
                    max: MAX_USER_DATA_WORDS,
                },
                bank: Some(1),
            }),
        },
    };

    /// Binding for a field.
    pub fn binding(&self, field: RfidField) -> &RfidBinding {
        match field {
            RfidField::Tid => &self.tid,
            RfidField::Epc => &self.epc,
            RfidField::UserData => &self.user_data,
        }
    }
}

impl Default for RfidScheme {
    fn default() -> Self {
        Self::V1
    }
}

/// # RFID Setup (^RSt)
pub fn setup(tag_type: u8) -> String {
    format!("^RS{}", tag_type)
}

/// # Field Number (^FNn)
pub fn field_number(n: u8) -> String {
    format!("^FN{}", n)
}

/// # Read Tag Into Field (^FNn^RFR,…^FS)
///
/// ```
/// use labelzpl::protocol::rfid::{RfidField, RfidScheme, read};
///
/// let binding = RfidScheme::V1.binding(RfidField::Tid);
/// assert_eq!(read(binding), "^FN1^RFR,H,0,12,2^FS");
/// ```
pub fn read(binding: &RfidBinding) -> String {
    format!("^FN{}^RFR,{}^FS", binding.field_number, binding.read)
}

/// # Write Tag (^RFW,…^FD…^FS)
///
/// `value` must already be normalized hex.
pub fn write(params: &WriteParams, value: &str) -> String {
    format!("^RFW,{}^FD{}^FS", params.render(value), value)
}
