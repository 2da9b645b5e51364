//! Lead conversion score.

use serde::{Deserialize, Serialize};

/// Likelihood-to-convert score for a lead, on a 0-100 scale.
///
/// New leads start at [`LeadScore::DEFAULT`] (50). No scoring algorithm
/// exists; scores are adjusted manually or left at the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadScore(u8);

impl LeadScore {
    /// Maximum score value.
    pub const MAX: u8 = 100;

    /// Score assigned to newly created leads.
    pub const DEFAULT: Self = Self(50);

    /// Create a score, clamping the value into the 0-100 range.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl Default for LeadScore {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for LeadScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for LeadScore {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for LeadScore {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i16 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i16 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for LeadScore {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <i16 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        let clamped = raw.clamp(0, i16::from(Self::MAX));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self::new(clamped as u8))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for LeadScore {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i16 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&i16::from(self.0), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fifty() {
        assert_eq!(LeadScore::default().value(), 50);
        assert_eq!(LeadScore::DEFAULT.value(), 50);
    }

    #[test]
    fn test_new_clamps_to_hundred() {
        assert_eq!(LeadScore::new(100).value(), 100);
        assert_eq!(LeadScore::new(101).value(), 100);
        assert_eq!(LeadScore::new(255).value(), 100);
    }

    #[test]
    fn test_serde_transparent() {
        let score = LeadScore::new(85);
        assert_eq!(serde_json::to_string(&score).unwrap(), "85");

        let parsed: LeadScore = serde_json::from_str("60").unwrap();
        assert_eq!(parsed.value(), 60);
    }

    #[test]
    fn test_ordering() {
        assert!(LeadScore::new(92) > LeadScore::new(60));
    }
}
