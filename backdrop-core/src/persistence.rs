//! Writing background images to disk.
//!
//! Backgrounds of one video are grouped in a folder named after the video
//! and each file is named after its crop shift:
//!
//! ```text
//! <output_dir>/<sanitized_video_name>/(<x_shift>, <y_shift>).<ext>
//! ```

use crate::error::{CoreError, CoreResult};
use crate::processing::Background;
use crate::progress_reporting;
use crate::utils::get_file_stem_safe;
use std::fs;
use std::path::{Path, PathBuf};

/// Folder name for a video: file stem, trimmed, lowercased, with every
/// whitespace character replaced by `_`.
pub fn sanitize_video_name(video_path: &Path) -> CoreResult<String> {
    let stem = get_file_stem_safe(video_path)?;
    let name = stem
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect::<String>();

    if name.is_empty() {
        return Err(CoreError::PathError(format!(
            "Video name is empty after sanitizing: {}",
            video_path.display()
        )));
    }
    Ok(name)
}

/// File name for a background with the given shift, e.g. `"(-3, 12).png"`.
#[must_use]
pub fn variant_file_name(xy_shift: (i64, i64), extension: &str) -> String {
    format!(
        "({}, {}).{}",
        xy_shift.0,
        xy_shift.1,
        extension.trim_start_matches('.')
    )
}

/// Folder the backgrounds of `video_path` are saved into.
pub fn background_folder(output_dir: &Path, video_path: &Path) -> CoreResult<PathBuf> {
    let base = if output_dir.is_absolute() {
        output_dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(output_dir)
    };
    Ok(base.join(sanitize_video_name(video_path)?))
}

/// Saves every background and returns the folder they were written to.
///
/// The folder is created when missing. Backgrounds that share a shift label
/// overwrite each other, later variants winning.
pub fn save_backgrounds<'a, I>(
    output_dir: &Path,
    video_path: &Path,
    backgrounds: I,
    extension: &str,
) -> CoreResult<PathBuf>
where
    I: IntoIterator<Item = &'a Background>,
{
    let folder = background_folder(output_dir, video_path)?;
    fs::create_dir_all(&folder)?;

    for background in backgrounds {
        let file_name = variant_file_name(background.xy_shift, extension);
        let path = folder.join(&file_name);
        log::debug!(
            "Saving background {} ({}x{}) to {}",
            background.variant,
            background.image.width(),
            background.image.height(),
            path.display()
        );
        background.image.clone().into_dynamic_image()?.save(&path)?;
        progress_reporting::status(&file_name, "saved", false);
    }

    Ok(folder)
}
