//! Platform-specific UI font discovery: finding font files on disk.
//!
//! Handles DirectWrite resolution on Windows and directory scanning on Linux.
//! Pure discovery: no font loading or rasterizing.

#[cfg(not(target_os = "windows"))]
use std::collections::HashMap;
use std::path::PathBuf;

/// UI font family names to try on Windows (proportional).
#[cfg(target_os = "windows")]
const DWRITE_UI_FAMILIES: &[&str] = &["Segoe UI", "Tahoma", "Arial"];

/// Last-resort UI font files on Windows.
#[cfg(target_os = "windows")]
const UI_FONT_PATHS: &[&str] = &[
    r"C:\Windows\Fonts\segoeui.ttf",
    r"C:\Windows\Fonts\tahoma.ttf",
    r"C:\Windows\Fonts\arial.ttf",
];

/// UI font filenames to try on Linux (proportional, regular weight).
#[cfg(not(target_os = "windows"))]
const UI_FONT_NAMES: &[&str] = &[
    "Cantarell-Regular.otf",
    "Ubuntu-R.ttf",
    "NotoSans-Regular.ttf",
    "NotoSans-Regular.otf",
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
];

/// File names a family name may be installed under, most specific first.
///
/// `"Noto Sans"` gives `NotoSans-Regular.ttf`, `NotoSans-Regular.otf`,
/// `NotoSans.ttf`, `NotoSans.otf`.
pub fn family_file_names(family: &str) -> Vec<String> {
    let compact: String = family.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Vec::new();
    }
    ["-Regular.ttf", "-Regular.otf", ".ttf", ".otf"]
        .iter()
        .map(|suffix| format!("{compact}{suffix}"))
        .collect()
}

/// Font files to try for the menu, in priority order.
///
/// A configured `family` may be an absolute path or a family name; it comes
/// before the platform defaults. Paths that don't exist are left out.
pub fn ui_font_candidates(family: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(name) = family {
        let direct = PathBuf::from(name);
        if direct.is_absolute() && direct.is_file() {
            paths.push(direct);
        }
    }

    platform_candidates(family, &mut paths);
    paths.dedup();
    paths
}

#[cfg(not(target_os = "windows"))]
fn platform_candidates(family: Option<&str>, paths: &mut Vec<PathBuf>) {
    let index = build_font_index();
    if let Some(name) = family {
        let found = family_file_names(name)
            .iter()
            .find_map(|file| index.get(file.as_str()).cloned());
        match found {
            Some(path) => paths.push(path),
            None => log::warn!("font: family {name:?} not found, using default UI font"),
        }
    }
    paths.extend(
        UI_FONT_NAMES
            .iter()
            .filter_map(|name| index.get(*name).cloned()),
    );
}

#[cfg(target_os = "windows")]
fn platform_candidates(family: Option<&str>, paths: &mut Vec<PathBuf>) {
    if let Some(name) = family {
        match resolve_font_dwrite(name) {
            Some(path) => paths.push(path),
            None => log::warn!("font: family {name:?} not found, using default UI font"),
        }
    }
    if let Some(path) = detect_system_ui_font_name().and_then(|n| resolve_font_dwrite(&n)) {
        paths.push(path);
    }
    paths.extend(DWRITE_UI_FAMILIES.iter().filter_map(|n| resolve_font_dwrite(n)));
    paths.extend(
        UI_FONT_PATHS
            .iter()
            .map(PathBuf::from)
            .filter(|p| p.exists()),
    );
}

/// Resolve the regular face of a family via DirectWrite.
#[cfg(target_os = "windows")]
fn resolve_font_dwrite(family_name: &str) -> Option<PathBuf> {
    let collection = dwrote::FontCollection::system();
    let descriptor = dwrote::FontDescriptor {
        family_name: family_name.to_string(),
        weight: dwrote::FontWeight::Regular,
        stretch: dwrote::FontStretch::Normal,
        style: dwrote::FontStyle::Normal,
    };
    let font = collection
        .font_from_descriptor(&descriptor)
        .ok()
        .flatten()?;
    let face = font.create_font_face();
    let files = face.files().ok()?;
    let file = files.first()?;
    file.font_file_path().ok()
}

/// Detect the OS message font family name (used for menus and dialogs).
#[cfg(target_os = "windows")]
#[allow(unsafe_code)]
fn detect_system_ui_font_name() -> Option<String> {
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        NONCLIENTMETRICSW, SPI_GETNONCLIENTMETRICS, SystemParametersInfoW,
    };

    // SAFETY: NONCLIENTMETRICSW is plain data; all-zero is a valid value.
    let mut metrics = unsafe { std::mem::zeroed::<NONCLIENTMETRICSW>() };
    metrics.cbSize = size_of::<NONCLIENTMETRICSW>() as u32;

    // SAFETY: the buffer is sized and `cbSize` is set as the API requires.
    let success = unsafe {
        SystemParametersInfoW(
            SPI_GETNONCLIENTMETRICS,
            metrics.cbSize,
            (&raw mut metrics).cast::<std::ffi::c_void>(),
            0,
        )
    };
    if success == 0 {
        return None;
    }

    let face_name = &metrics.lfMenuFont.lfFaceName;
    let len = face_name
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(face_name.len());
    String::from_utf16(&face_name[..len]).ok()
}

// Linux font discovery

#[cfg(not(target_os = "windows"))]
fn linux_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(data) = std::env::var_os("XDG_DATA_HOME") {
        dirs.push(PathBuf::from(data).join("fonts"));
    }
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(&home).join(".local/share/fonts"));
        dirs.push(PathBuf::from(home).join(".fonts"));
    }
    dirs.push(PathBuf::from("/usr/share/fonts"));
    dirs.push(PathBuf::from("/usr/local/share/fonts"));
    dirs
}

/// Build a filename to full path index by scanning all font directories once.
#[cfg(not(target_os = "windows"))]
fn build_font_index() -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();
    for dir in linux_font_dirs() {
        index_font_dir(&dir, &mut index);
    }
    index
}

#[cfg(not(target_os = "windows"))]
fn index_font_dir(dir: &std::path::Path, index: &mut HashMap<String, PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            index_font_dir(&path, index);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            index.entry(name.to_owned()).or_insert(path);
        } else {
            // Non-UTF-8 filename, skip.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::family_file_names;

    #[test]
    fn family_names_drop_spaces() {
        assert_eq!(
            family_file_names("Noto Sans"),
            [
                "NotoSans-Regular.ttf",
                "NotoSans-Regular.otf",
                "NotoSans.ttf",
                "NotoSans.otf"
            ]
        );
    }

    #[test]
    fn blank_family_has_no_files() {
        assert!(family_file_names("  ").is_empty());
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn font_index_skips_missing_dirs() {
        let mut index = std::collections::HashMap::new();
        super::index_font_dir(std::path::Path::new("/nonexistent/ori_menu/fonts"), &mut index);
        assert!(index.is_empty());
    }
}
