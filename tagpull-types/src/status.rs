use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Decoded point status conditions.
    ///
    /// Bit positions follow the order in which the historian's record push
    /// interface lists its status arguments.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StatusFlags: u16 {
        /// Value is below its low warning limit.
        const LOW_WARNING = 1 << 0;
        /// Value is above its high warning limit.
        const HIGH_WARNING = 1 << 1;
        /// Value is below its low alarm limit.
        const LOW_ALARM = 1 << 2;
        /// Value is above its high alarm limit.
        const HIGH_ALARM = 1 << 3;
        /// Value is below the instrument range.
        const OUT_OF_RANGE_LOW = 1 << 4;
        /// Value is above the instrument range.
        const OUT_OF_RANGE_HIGH = 1 << 5;
        /// Value is flagged unreliable.
        const UNRELIABLE = 1 << 6;
        /// Value was entered manually.
        const MANUAL = 1 << 7;
        /// Digital point is in its set state.
        const DIGITAL_SET = 1 << 8;
        /// Digital point is in a warning state.
        const DIGITAL_WARNING = 1 << 9;
        /// Digital point is chattering.
        const CHATTERING = 1 << 10;
    }
}

const TEXT_FLAGS: &[(&str, StatusFlags)] = &[
    ("LOW WARN", StatusFlags::LOW_WARNING),
    ("HIGH WARN", StatusFlags::HIGH_WARNING),
    ("LOW ALARM", StatusFlags::LOW_ALARM),
    ("HIGH ALARM", StatusFlags::HIGH_ALARM),
    ("OOR LOW", StatusFlags::OUT_OF_RANGE_LOW),
    ("OOR HIGH", StatusFlags::OUT_OF_RANGE_HIGH),
    ("UNRELIABLE", StatusFlags::UNRELIABLE),
    ("MANUAL", StatusFlags::MANUAL),
    ("DIG WARN", StatusFlags::DIGITAL_WARNING),
    ("CHATTER", StatusFlags::CHATTERING),
];

impl StatusFlags {
    /// Decode the historian's numeric status word. Unknown bits are dropped.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        Self::from_bits_truncate(code)
    }

    /// Decode a textual status such as `"OK"` or `"HIGH ALARM UNRELIABLE"`.
    ///
    /// Matching is case-insensitive on whole phrases; unrecognized words are
    /// ignored. `"SET"` as a standalone word marks a digital set state.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let upper = text.trim().to_ascii_uppercase();
        if upper.is_empty() || upper == "OK" {
            return Self::empty();
        }
        let mut flags = Self::empty();
        for (phrase, flag) in TEXT_FLAGS {
            if upper.contains(phrase) {
                flags |= *flag;
            }
        }
        if upper.split_whitespace().any(|w| w == "SET") {
            flags |= Self::DIGITAL_SET;
        }
        flags
    }
}

/// Status attached to one sample.
///
/// Either the numeric code, the text, or both may be present depending on
/// which retrieval variant produced the sample.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointStatus {
    /// Raw numeric status word, when the historian sent one.
    pub code: Option<u16>,
    /// Raw status text, trimmed, when the historian sent one.
    pub text: Option<String>,
    /// Conditions decoded from `code` or `text`.
    pub flags: StatusFlags,
}

impl PointStatus {
    /// Status built from a numeric status word.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        Self {
            code: Some(code),
            text: None,
            flags: StatusFlags::from_code(code),
        }
    }

    /// Status built from status text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            code: None,
            text: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            flags: StatusFlags::from_text(trimmed),
        }
    }

    /// True when no condition flag is raised.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.flags.is_empty()
    }
}
