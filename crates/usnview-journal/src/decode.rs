//! IBM866 decoding of dump bytes.

use crate::errors::JournalError;
use encoding_rs::IBM866;
use std::borrow::Cow;
use std::path::Path;

/// Decodes dump bytes from code page 866.
///
/// The dump is never UTF-8, so no BOM sniffing or auto-detection happens.
/// Malformed input is an error rather than being replaced.
pub fn decode_ibm866<'a>(bytes: &'a [u8], path: &Path) -> Result<Cow<'a, str>, JournalError> {
    IBM866
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| JournalError::Encoding {
            path: path.to_path_buf(),
        })
}

/// Encodes text into code page 866. Characters outside the code page are
/// replaced with numeric character references.
pub fn encode_ibm866(text: &str) -> Vec<u8> {
    let (bytes, _, _) = IBM866.encode(text);
    bytes.into_owned()
}
