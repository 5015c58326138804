/// Error type for geohex-rs operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoHexError {
    /// The zone code is shorter than its two-letter prefix or longer than the deepest level allows.
    InvalidCodeLength(usize),
    /// A character of the zone code is outside the alphabet expected at its position.
    InvalidCodeCharacter { position: usize, character: char },
    /// The two-letter prefix does not decode to a run of base-9 digits.
    InvalidCodePrefix(u32),
    /// The zone level is outside the supported range (0-15).
    InvalidLevel(u8),
    /// A required grid builder parameter was not set.
    MissingGridParameter(&'static str),
}

impl GeoHexError {
    /// Returns `true` for every variant that describes a malformed zone code.
    pub fn is_invalid_code(&self) -> bool {
        matches!(
            self,
            GeoHexError::InvalidCodeLength(_)
                | GeoHexError::InvalidCodeCharacter { .. }
                | GeoHexError::InvalidCodePrefix(_)
        )
    }
}

impl std::fmt::Display for GeoHexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoHexError::InvalidCodeLength(len) => write!(f, "Invalid code length: {}", len),
            GeoHexError::InvalidCodeCharacter {
                position,
                character,
            } => write!(
                f,
                "Invalid code character '{}' at position {}",
                character, position
            ),
            GeoHexError::InvalidCodePrefix(value) => write!(f, "Invalid code prefix: {}", value),
            GeoHexError::InvalidLevel(level) => write!(f, "Invalid level: {}", level),
            GeoHexError::MissingGridParameter(name) => {
                write!(f, "Missing grid parameter: {}", name)
            }
        }
    }
}

impl std::error::Error for GeoHexError {}
