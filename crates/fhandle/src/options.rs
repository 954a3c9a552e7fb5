//! Open flags and text encodings accepted by the I/O operations

use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::{Error, Result};

/// How [`PathHandle::open`](crate::PathHandle::open) opens a file.
///
/// Parses from the conventional flag strings: `r`, `r+`, `w`, `w+`, `a`,
/// `a+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// `r`
    #[default]
    Read,
    /// `r+`
    ReadWrite,
    /// `w`: truncates
    Write,
    /// `w+`: truncates
    WriteRead,
    /// `a`
    Append,
    /// `a+`
    AppendRead,
}

impl OpenMode {
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::ReadWrite => "r+",
            Self::Write => "w",
            Self::WriteRead => "w+",
            Self::Append => "a",
            Self::AppendRead => "a+",
        }
    }

    pub(crate) fn options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            Self::Read => options.read(true),
            Self::ReadWrite => options.read(true).write(true),
            Self::Write => options.write(true).truncate(true),
            Self::WriteRead => options.read(true).write(true).truncate(true),
            Self::Append => options.append(true),
            Self::AppendRead => options.read(true).append(true),
        };
        options
    }
}

impl FromStr for OpenMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "r" => Ok(Self::Read),
            "r+" => Ok(Self::ReadWrite),
            "w" => Ok(Self::Write),
            "w+" => Ok(Self::WriteRead),
            "a" => Ok(Self::Append),
            "a+" => Ok(Self::AppendRead),
            other => Err(Error::InvalidOpenMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// How raw file bytes are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Strict UTF-8. Invalid sequences are an I/O error.
    #[default]
    Utf8,
    /// One char per byte.
    Latin1,
    /// Lowercase hex, two digits per byte.
    Hex,
    /// Standard alphabet with padding.
    Base64,
}

impl Encoding {
    pub(crate) fn decode(&self, bytes: Vec<u8>, path: &Path) -> Result<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes).map_err(|e| {
                Error::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                )
            }),
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Hex => Ok(hex::encode(bytes)),
            Self::Base64 => Ok(STANDARD.encode(bytes)),
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "latin1" | "binary" => Ok(Self::Latin1),
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            _ => Err(Error::UnsupportedEncoding {
                encoding: s.to_string(),
            }),
        }
    }
}
