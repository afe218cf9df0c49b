use std::path::PathBuf;

use texbake_image::ExportBatch;
use tracing_log::log;

use crate::{BakeError, BakeOutput};

/// The host's directory-selection dialog. `None` means the user backed
/// out, which is a clean outcome, not an error.
pub trait DirectoryPicker {
    fn pick_directory(&mut self) -> Option<PathBuf>;
}

/// Picker that always answers with a fixed directory; useful for
/// headless runs and tests.
#[derive(Clone, Debug)]
pub struct FixedDirectory(pub PathBuf);

impl DirectoryPicker for FixedDirectory {
    fn pick_directory(&mut self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportStatus {
    Saved(Vec<PathBuf>),
    Cancelled,
}

/// Writes every map of a finished bake into a user-picked directory.
///
/// All scene state has already been restored by the time this runs, so a
/// cancelled picker simply means no files. A failed write discards the
/// files already produced; a run never leaves a partial texture set.
pub fn export_maps(
    output: &BakeOutput,
    picker: &mut dyn DirectoryPicker,
) -> Result<ExportStatus, BakeError> {
    let Some(directory) = picker.pick_directory() else {
        log::debug!("export cancelled, no files written");
        return Ok(ExportStatus::Cancelled);
    };

    let mut batch = ExportBatch::new(directory)?;

    for map in &output.maps {
        let file_name = output.file_name(map);

        if let Err(err) = batch.write(&file_name, &map.image, map.encoding) {
            batch.discard();
            return Err(err.into());
        }

        log::debug!("wrote {file_name}");
    }

    Ok(ExportStatus::Saved(batch.finish()))
}
