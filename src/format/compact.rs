use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::{fmt, str::FromStr};

use crate::error::Error;

/// The compact representation of a JWE: five base64url segments separated
/// by `.`, in the order `header.encrypted_key.iv.ciphertext.tag`.
///
/// Parsing only checks the segment structure; decoding and validating the
/// individual segments is the codec's job. None of the supported key
/// management modes permits an empty segment, so all five must be
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactJwe {
    pub(crate) header: String,
    pub(crate) encrypted_key: String,
    pub(crate) iv: String,
    pub(crate) ciphertext: String,
    pub(crate) tag: String,
}

impl FromStr for CompactJwe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let [header, encrypted_key, iv, ciphertext, tag]: [&str; 5] = parts
            .try_into()
            .map_err(|_| Error::MalformedInput("expected five dot-separated segments"))?;

        if [header, encrypted_key, iv, ciphertext, tag]
            .iter()
            .any(|segment| segment.is_empty())
        {
            return Err(Error::MalformedInput("empty segment"));
        }

        Ok(Self {
            header: header.to_string(),
            encrypted_key: encrypted_key.to_string(),
            iv: iv.to_string(),
            ciphertext: ciphertext.to_string(),
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for CompactJwe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}.{}",
            self.header, self.encrypted_key, self.iv, self.ciphertext, self.tag
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_segments_round_trip() {
        let raw = "eyJh.AAEC.SXZz.Y3Q.dGFn";
        let compact: CompactJwe = raw.parse().unwrap();
        assert_eq!(compact.header, "eyJh");
        assert_eq!(compact.tag, "dGFn");
        assert_eq!(compact.to_string(), raw);
    }

    #[test]
    fn wrong_segment_counts_are_rejected() {
        for raw in ["a.b.c.d", "a.b.c.d.e.f", "", "a"] {
            assert!(matches!(
                raw.parse::<CompactJwe>(),
                Err(Error::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn empty_segments_are_rejected() {
        for raw in ["a.b.c.d.", ".b.c.d.e", "a..c.d.e"] {
            assert!(matches!(
                raw.parse::<CompactJwe>(),
                Err(Error::MalformedInput(_))
            ));
        }
    }
}
