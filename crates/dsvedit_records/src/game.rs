//! Cartridge detection.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// One of the three supported DSVania cartridges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    /// Castlevania: Dawn of Sorrow
    DawnOfSorrow,
    /// Castlevania: Portrait of Ruin
    PortraitOfRuin,
    /// Castlevania: Order of Ecclesia
    OrderOfEcclesia,
}

impl Game {
    /// Number of leading header bytes holding the game title.
    pub const SIGNATURE_LEN: usize = 12;

    /// Match a header prefix against the known game titles.
    ///
    /// Only the first [`Game::SIGNATURE_LEN`] bytes are inspected; anything shorter is
    /// unrecognized.
    pub fn from_signature(header: &[u8]) -> Option<Self> {
        match header.get(..Self::SIGNATURE_LEN)? {
            b"CASTLEVANIA1" => Some(Self::DawnOfSorrow),
            b"CASTLEVANIA2" => Some(Self::PortraitOfRuin),
            b"CASTLEVANIA3" => Some(Self::OrderOfEcclesia),
            _ => None,
        }
    }

    /// Read the signature from a ROM image or an extracted `ndsheader.bin`.
    ///
    /// Returns `Ok(None)` for files that are too short or carry another title.
    pub fn detect(path: &Path) -> io::Result<Option<Self>> {
        let mut header = [0u8; Self::SIGNATURE_LEN];
        let mut file = File::open(path)?;
        match file.read_exact(&mut header) {
            Ok(()) => Ok(Self::from_signature(&header)),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Short code used in export folder names (`Exported dos`).
    pub fn code(self) -> &'static str {
        match self {
            Self::DawnOfSorrow => "dos",
            Self::PortraitOfRuin => "por",
            Self::OrderOfEcclesia => "ooe",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::DawnOfSorrow => "Dawn of Sorrow",
            Self::PortraitOfRuin => "Portrait of Ruin",
            Self::OrderOfEcclesia => "Order of Ecclesia",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
