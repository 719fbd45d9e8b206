//! Output key derivation.
//!
//! Processed videos land at `processed/{stem}_processed.mp4`, where `stem` is
//! the source key without its final extension. Downstream consumers rely on
//! this exact layout.

const PROCESSED_PREFIX: &str = "processed/";
const PROCESSED_SUFFIX: &str = "_processed.mp4";

/// Strip the final extension from `key`, keeping any directory prefix.
///
/// The extension starts at the last `.` of the last path component. A
/// component made only of dots up to that point (`.hidden`, `..mp4`) has no
/// extension.
pub fn strip_extension(key: &str) -> &str {
    let name_start = key.rfind('/').map(|i| i + 1).unwrap_or(0);
    let Some(dot) = key.rfind('.') else {
        return key;
    };
    if dot < name_start {
        return key;
    }
    if key[name_start..dot].bytes().all(|b| b == b'.') {
        return key;
    }
    &key[..dot]
}

/// Derive the storage key for the processed version of `source_key`.
pub fn processed_output_key(source_key: &str) -> String {
    format!(
        "{}{}{}",
        PROCESSED_PREFIX,
        strip_extension(source_key),
        PROCESSED_SUFFIX
    )
}
