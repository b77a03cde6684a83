//! Output filename derivation for exported images.
//!
//! Every exported file is named after its source: the last path component,
//! cut at its **first** dot, with `.png` appended. Cutting at the first dot
//! (not the last) means multi-suffix names collapse fully:
//!
//! - `sprites/hero.png` → `hero.png`
//! - `sprites/hero.tar.gz` → `hero.png`
//! - `sprites/hero` → `hero.png`
//! - `sprites/.hidden` → `.png`
//!
//! Derivation works on the path's raw bytes, so names that are not valid
//! UTF-8 come out byte for byte. The source path is never modified.

use std::borrow::Cow;
use std::ffi::OsString;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Extension of every exported file.
pub const OUTPUT_EXTENSION: &str = "png";

fn is_separator(byte: u8) -> bool {
    byte == b'/' || byte == MAIN_SEPARATOR as u8
}

/// Last separator-delimited component of `path`, as written.
///
/// Unlike [`Path::file_name`], a trailing separator yields an empty name.
pub fn base_name(path: &[u8]) -> &[u8] {
    path.rsplit(|&b| is_separator(b)).next().unwrap_or(path)
}

/// Base name with everything from the first `.` onward removed.
pub fn stem_before_first_dot(name: &[u8]) -> &[u8] {
    name.split(|&b| b == b'.').next().unwrap_or(name)
}

/// Output file name for a source path, e.g. `a/b/icon.x2.png` → `icon.png`.
pub fn output_file_name(source: &Path) -> OsString {
    let bytes = path_bytes(source);
    let mut name = stem_before_first_dot(base_name(&bytes)).to_vec();
    name.push(b'.');
    name.extend_from_slice(OUTPUT_EXTENSION.as_bytes());
    os_string_from_bytes(name)
}

/// Full export path for `source` inside `dest_dir`.
pub fn output_path(source: &Path, dest_dir: &Path) -> PathBuf {
    dest_dir.join(output_file_name(source))
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

// Elsewhere paths are not byte strings; fall back to their UTF-8 rendering.
#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    String::from_utf8_lossy(&bytes).into_owned().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_swaps_extension() {
        assert_eq!(output_file_name(Path::new("hero.bmp")), "hero.png");
    }

    #[test]
    fn directories_are_dropped() {
        assert_eq!(output_file_name(Path::new("assets/sprites/hero.gif")), "hero.png");
    }

    #[test]
    fn absolute_paths_are_dropped() {
        assert_eq!(output_file_name(Path::new("/tmp/in/tile.jpg")), "tile.png");
    }

    #[test]
    fn cut_at_first_dot_not_last() {
        assert_eq!(output_file_name(Path::new("tiles/grass.v2.final.png")), "grass.png");
    }

    #[test]
    fn dots_in_directories_are_ignored() {
        assert_eq!(output_file_name(Path::new("my.assets/v1.0/rock.tga")), "rock.png");
    }

    #[test]
    fn name_without_extension() {
        assert_eq!(output_file_name(Path::new("raw/sprite")), "sprite.png");
    }

    #[test]
    fn png_source_keeps_name() {
        assert_eq!(output_file_name(Path::new("already.png")), "already.png");
    }

    #[test]
    fn dotfile_collapses_to_bare_extension() {
        assert_eq!(output_file_name(Path::new("dir/.hidden")), ".png");
    }

    #[test]
    fn trailing_separator_gives_empty_base() {
        assert_eq!(base_name(b"dir/"), b"");
        assert_eq!(output_file_name(Path::new("dir/")), ".png");
    }

    #[test]
    fn always_ends_in_png() {
        for source in ["a", "a.b", "a.b.c", "x/y.z", "../up.jpeg", "."] {
            assert!(
                output_file_name(Path::new(source))
                    .as_encoded_bytes()
                    .ends_with(b".png"),
                "{source}"
            );
        }
    }

    #[test]
    fn stem_helpers_work_on_bytes() {
        assert_eq!(base_name(b"a/b/c.d.e"), b"c.d.e");
        assert_eq!(stem_before_first_dot(b"c.d.e"), b"c");
        assert_eq!(stem_before_first_dot(b"plain"), b"plain");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_kept_byte_for_byte() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let source = Path::new(OsStr::from_bytes(b"dir/h\xffro.v2.gif"));
        assert_eq!(output_file_name(source).as_bytes(), b"h\xffro.png");
        assert_eq!(
            output_path(source, Path::new("out")).as_os_str().as_bytes(),
            b"out/h\xffro.png"
        );
    }

    #[test]
    fn output_path_joins_destination() {
        assert_eq!(
            output_path(Path::new("in/hero.tar.gz"), Path::new("out")),
            PathBuf::from("out/hero.png")
        );
    }

    #[test]
    fn source_is_not_modified() {
        let source = PathBuf::from("keep/me.as.is.jpg");
        let _ = output_file_name(&source);
        assert_eq!(source, PathBuf::from("keep/me.as.is.jpg"));
    }
}
