use std::path::Path;

use chrono::{Datelike, NaiveDate};

/// Derives the object key for a log file uploaded on `date`:
/// `logs/<YYYY>/<MM>/<DD>/<basename>.gz`.
///
/// Pure function of the date and the path's basename, so a file uploaded
/// twice on the same calendar day lands on the same key and overwrites the
/// earlier object.
pub fn derive_object_key(path: impl AsRef<Path>, date: NaiveDate) -> String {
    let basename = path
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "logs/{:04}/{:02}/{:02}/{}.gz",
        date.year(),
        date.month(),
        date.day(),
        basename
    )
}
