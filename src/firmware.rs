//! Embedded firmware verification.
//!
//! A firmware blob is trusted only when it is byte-for-byte the blob a
//! [`FirmwareDescriptor`] describes: same length, same magic prefix and the same
//! SHA-256 over the whole buffer. The cheap checks run first so an obviously
//! wrong candidate never gets hashed.

use crate::error::ValidationError;
use crate::quirks::record::FirmwareDescriptor;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Embedded copies are only searched for at this alignment.
pub const EMBEDDED_FW_ALIGN: usize = 8;

/// Proof that a candidate matched its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accepted {
    pub storage_name: String,
    pub length: usize,
    pub sha256: String,
}

/// Check `candidate` against `descriptor`.
///
/// Checks run in order (length, prefix, digest) and stop at the first failure.
pub fn validate(
    descriptor: &FirmwareDescriptor,
    candidate: &[u8],
) -> Result<Accepted, ValidationError> {
    if candidate.len() != descriptor.length {
        return Err(ValidationError::LengthMismatch {
            expected: descriptor.length,
            actual: candidate.len(),
        });
    }

    if !candidate.starts_with(&descriptor.prefix) {
        let shown = candidate
            .get(..descriptor.prefix.len())
            .unwrap_or(candidate);
        return Err(ValidationError::PrefixMismatch {
            expected: hex::encode(&descriptor.prefix),
            actual: hex::encode(shown),
        });
    }

    let digest: [u8; 32] = Sha256::digest(candidate).into();
    if digest != descriptor.sha256 {
        return Err(ValidationError::DigestMismatch {
            expected: hex::encode(descriptor.sha256),
            actual: hex::encode(digest),
        });
    }

    Ok(Accepted {
        storage_name: descriptor.storage_name.to_string(),
        length: candidate.len(),
        sha256: hex::encode(digest),
    })
}

/// A firmware copy located inside a larger memory or flash dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedMatch<'a> {
    pub offset: usize,
    pub data: &'a [u8],
    pub accepted: Accepted,
}

/// Search `haystack` for an embedded copy of the described firmware.
///
/// Every [`EMBEDDED_FW_ALIGN`]-aligned offset that starts with the prefix is a
/// candidate; the first one whose full window validates is returned.
pub fn scan<'a>(descriptor: &FirmwareDescriptor, haystack: &'a [u8]) -> Option<EmbeddedMatch<'a>> {
    if descriptor.length == 0 || haystack.len() < descriptor.length {
        return None;
    }

    let last = haystack.len() - descriptor.length;
    for offset in (0..=last).step_by(EMBEDDED_FW_ALIGN) {
        let window = &haystack[offset..offset + descriptor.length];
        if !window.starts_with(&descriptor.prefix) {
            continue;
        }
        match validate(descriptor, window) {
            Ok(accepted) => {
                debug!(offset, name = %descriptor.storage_name, "found embedded firmware");
                return Some(EmbeddedMatch {
                    offset,
                    data: window,
                    accepted,
                });
            }
            Err(e) => debug!(offset, "prefix hit rejected: {}", e),
        }
    }
    None
}

/// Where an extracted blob lands when no path is given: the last component
/// of the storage name, in the current directory.
pub fn default_output_path(descriptor: &FirmwareDescriptor) -> PathBuf {
    let name = Path::new(&*descriptor.storage_name);
    match name.file_name() {
        Some(file) => PathBuf::from(file),
        None => PathBuf::from("firmware.bin"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &[u8] = &[0xf0, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];

    fn blob(len: usize) -> Vec<u8> {
        let mut data: Vec<u8> = (0..len).map(|i| (i * 7 % 251) as u8).collect();
        data[..PREFIX.len()].copy_from_slice(PREFIX);
        data
    }

    fn descriptor_for(data: &[u8]) -> FirmwareDescriptor {
        FirmwareDescriptor::new(
            "silead/test.fw",
            PREFIX,
            data.len(),
            Sha256::digest(data).into(),
        )
    }

    #[test]
    fn test_default_output_drops_vendor_directory() {
        let desc = descriptor_for(&blob(64));
        assert_eq!(default_output_path(&desc), PathBuf::from("test.fw"));

        let flat = FirmwareDescriptor::new("gsl1680.fw", PREFIX, 64, [0; 32]);
        assert_eq!(default_output_path(&flat), PathBuf::from("gsl1680.fw"));
    }

    #[test]
    fn test_accepts_exact_blob() {
        let data = blob(4096);
        let desc = descriptor_for(&data);
        let accepted = validate(&desc, &data).unwrap();
        assert_eq!(accepted.length, 4096);
        assert_eq!(accepted.storage_name, "silead/test.fw");
        assert_eq!(accepted.sha256, hex::encode(desc.sha256));
    }

    #[test]
    fn test_single_flipped_bit_is_digest_mismatch() {
        let data = blob(4096);
        let desc = descriptor_for(&data);
        for pos in [PREFIX.len(), 1000, 4095] {
            let mut bad = data.clone();
            bad[pos] ^= 0x01;
            assert!(matches!(
                validate(&desc, &bad),
                Err(ValidationError::DigestMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_length_checked_before_prefix_and_digest() {
        let data = blob(4096);
        let desc = descriptor_for(&data);

        let truncated = &data[..4095];
        assert_eq!(
            validate(&desc, truncated),
            Err(ValidationError::LengthMismatch {
                expected: 4096,
                actual: 4095
            })
        );

        let mut longer = data.clone();
        longer.push(0);
        assert!(matches!(
            validate(&desc, &longer),
            Err(ValidationError::LengthMismatch { .. })
        ));

        assert!(matches!(
            validate(&desc, &[]),
            Err(ValidationError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_prefix_checked_before_digest() {
        let data = blob(4096);
        let desc = descriptor_for(&data);
        let mut bad = data.clone();
        bad[0] = 0xb0;
        match validate(&desc, &bad) {
            Err(ValidationError::PrefixMismatch { expected, actual }) => {
                assert_eq!(expected, "f000000002000000");
                assert_eq!(actual, "b000000002000000");
            }
            other => panic!("expected prefix mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_finds_aligned_copy() {
        let data = blob(512);
        let desc = descriptor_for(&data);

        let mut dump = vec![0u8; 64];
        // decoy: right prefix, wrong body
        dump.extend_from_slice(PREFIX);
        dump.extend(std::iter::repeat_n(0xaa, 504));
        dump.extend_from_slice(&data);
        dump.extend(vec![0u8; 40]);

        let found = scan(&desc, &dump).unwrap();
        assert_eq!(found.offset, 64 + 512);
        assert_eq!(found.data, &data[..]);
    }

    #[test]
    fn test_scan_ignores_unaligned_copy() {
        let data = blob(512);
        let desc = descriptor_for(&data);

        let mut dump = vec![0u8; 3];
        dump.extend_from_slice(&data);
        dump.extend(vec![0u8; 16]);

        assert!(scan(&desc, &dump).is_none());
    }

    #[test]
    fn test_scan_short_haystack() {
        let data = blob(512);
        let desc = descriptor_for(&data);
        assert!(scan(&desc, &data[..100]).is_none());
    }
}
