use std::{
    fs,
    path::{Path, PathBuf},
};

use texbake_util::thiserror;

use crate::{Encoding, ImageData};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("output directory does not exist: `{0}`")]
    MissingDirectory(PathBuf),
    #[error("failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Writes one bake buffer as an 8-bit RGBA PNG.
pub fn write_png(
    path: impl AsRef<Path>,
    image: &ImageData,
    encoding: Encoding,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let pixels = image.to_rgba8(encoding);

    image::save_buffer_with_format(
        path,
        &pixels,
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// An all-or-nothing set of PNG writes into one directory.
///
/// A failed write leaves nothing behind: `discard` removes every file the
/// batch has produced so far, so a run never ends with a partial texture
/// set on disk.
#[derive(Debug)]
pub struct ExportBatch {
    directory: PathBuf,
    written: Vec<PathBuf>,
}

impl ExportBatch {
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let directory = directory.into();

        if !directory.is_dir() {
            return Err(ExportError::MissingDirectory(directory));
        }

        Ok(Self {
            directory,
            written: Vec::new(),
        })
    }

    pub fn write(
        &mut self,
        file_name: &str,
        image: &ImageData,
        encoding: Encoding,
    ) -> Result<(), ExportError> {
        let path = self.directory.join(file_name);
        write_png(&path, image, encoding)?;
        self.written.push(path);
        Ok(())
    }

    /// Removes everything written so far.
    pub fn discard(self) {
        for path in &self.written {
            let _ = fs::remove_file(path);
        }
    }

    /// Keeps the written files and returns their paths.
    pub fn finish(self) -> Vec<PathBuf> {
        self.written
    }
}
