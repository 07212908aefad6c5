//! Content-Type lookup by file extension.

use std::path::Path;

/// Returns the `Content-Type` for `path`, or `None` when the extension is
/// not one the server knows.
///
/// The extension is whatever follows the last `.` anywhere in the path, and
/// matching is case-sensitive: `INDEX.HTML` has no known type.
///
/// ```
/// # use std::path::Path;
/// # use verbatim::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("/srv/www/index.html")), Some("text/html"));
/// assert_eq!(content_type_for(Path::new("/srv/www/notes.txt")), None);
/// ```
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let path = path.to_str()?;
    let (_, ext) = path.rsplit_once('.')?;

    match ext {
        "html" => Some("text/html"),
        "jpg" => Some("image/jpeg"),
        "css" => Some("text/css"),
        "js" => Some("application/javascript"),
        _ => None,
    }
}
