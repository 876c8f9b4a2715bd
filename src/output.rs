//! Atomic output files.
//!
//! Everything is written to a temporary file in the destination directory and
//! renamed over the target only after the writer succeeded. A failed run
//! leaves any previous file untouched and no partial file behind.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Write through `write` and move the result to `path` on success.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush().map_err(|e| Error::io(path, e))?;
    }
    tmp.as_file().sync_all().map_err(|e| Error::io(path, e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    write_atomic(path, |w| w.write_all(bytes).map_err(|e| Error::io(path, e)))
}

/// Output format from the file extension, PNG when it is missing or unknown.
pub fn format_for(path: &Path) -> ImageFormat {
    ImageFormat::from_path(path).unwrap_or(ImageFormat::Png)
}

pub fn save_image(path: &Path, canvas: &RgbImage) -> Result<()> {
    let format = format_for(path);
    write_atomic(path, |w| canvas.write_to(w, format).map_err(|e| Error::Encode(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn write_bytes_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"old").unwrap();
        write_bytes(&path, b"new contents").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new contents");
    }

    #[test]
    fn failed_writer_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let res = write_atomic(&path, |w| {
            w.write_all(b"partial").map_err(|e| Error::io("out.png", e))?;
            Err(Error::Encode("boom".into()))
        });
        assert!(res.is_err());
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn unknown_extension_defaults_to_png() {
        assert_eq!(format_for(Path::new("poster.out")), ImageFormat::Png);
        assert_eq!(format_for(Path::new("poster")), ImageFormat::Png);
        assert_eq!(format_for(Path::new("poster.jpg")), ImageFormat::Jpeg);
    }

    #[test]
    fn save_image_round_trips_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.png");
        save_image(&path, &RgbImage::from_pixel(7, 3, Rgb([1, 2, 3]))).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (7, 3));
    }
}
