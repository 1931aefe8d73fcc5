// src/formats.rs

//! Registry of supported haptic script formats.
//!
//! Format selection happens before the device is ever contacted: a script
//! is located as a sibling of the media file (same path, different
//! extension) and its wire media type is taken from the registry entry
//! that matched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A supported script format: registry name, the file extensions it is
/// stored under, and the media type used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptFormat {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub media_type: &'static str,
}

/// Supported script formats, in lookup priority order.
pub const SCRIPT_FORMATS: &[ScriptFormat] = &[
    ScriptFormat {
        name: "kiiroo",
        extensions: &["kiiroo"],
        media_type: "x-text/kiiroo",
    },
    ScriptFormat {
        name: "realtouch",
        extensions: &["realtouch", "ott"],
        media_type: "x-text/realtouch",
    },
    ScriptFormat {
        name: "vorze",
        extensions: &["vorze", "csv"],
        media_type: "x-text/vorze",
    },
];

/// Finds a script file next to `media_path` by trying every registered
/// extension in registry order. Returns the script path and its format.
pub fn locate_script(media_path: &Path) -> Option<(PathBuf, &'static ScriptFormat)> {
    for format in SCRIPT_FORMATS {
        for extension in format.extensions {
            let candidate = media_path.with_extension(extension);
            if candidate.is_file() {
                return Some((candidate, format));
            }
        }
    }
    None
}

/// Locates and reads the sibling script of `media_path`.
///
/// Returns `Ok(None)` when no script exists; the raw bytes and the wire
/// media type otherwise.
pub fn read_script(media_path: &Path) -> io::Result<Option<(Vec<u8>, &'static str)>> {
    match locate_script(media_path) {
        Some((path, format)) => Ok(Some((fs::read(path)?, format.media_type))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn locate_script_matches_every_registered_extension() {
        for format in SCRIPT_FORMATS {
            for extension in format.extensions {
                let dir = tempfile::tempdir().unwrap();
                let media = dir.path().join("clip.mp4");
                File::create(media.with_extension(extension)).unwrap();

                let (path, found) = locate_script(&media).unwrap();
                assert_eq!(found.name, format.name);
                assert_eq!(path.extension().and_then(|e| e.to_str()), Some(*extension));
            }
        }
    }

    #[test]
    fn locate_script_prefers_registry_order() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("clip.mp4");
        File::create(media.with_extension("csv")).unwrap();
        File::create(media.with_extension("kiiroo")).unwrap();

        let (_, format) = locate_script(&media).unwrap();
        assert_eq!(format.name, "kiiroo");
    }

    #[test]
    fn read_script_returns_bytes_and_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("clip.mp4");
        let mut f = File::create(media.with_extension("ott")).unwrap();
        f.write_all(b"script data").unwrap();

        let (data, media_type) = read_script(&media).unwrap().unwrap();
        assert_eq!(data, b"script data");
        assert_eq!(media_type, "x-text/realtouch");
    }

    #[test]
    fn read_script_without_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("clip.mp4");
        assert!(read_script(&media).unwrap().is_none());
    }
}
