//! File types accepted by the conversion service.

/// Lowercase extensions the service converts, in the order it documents them.
pub const SUPPORTED_EXTENSIONS: [&str; 12] = [
    "txt", "rtf", "fodt", "doc", "docx", "odt", "xls", "xlsx", "ods", "ppt", "pptx", "odp",
];

/// Whether `filename` can be sent for conversion.
///
/// The extension is the text after the last `.` of the final path component,
/// compared case-insensitively. A name without an extension is accepted
/// unless `strict` is set.
pub fn supports(filename: &str, strict: bool) -> bool {
    match extension(filename) {
        Some(ext) => SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(ext)),
        None => !strict,
    }
}

/// Extension of the last path component, if it has a non-empty one.
fn extension(filename: &str) -> Option<&str> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (_, ext) = name.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}
