// greyform/src/processors/archive.rs
use crate::core::Result;
use crate::utils::is_supported_format;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Extracts every entry of the zip at `archive_path` into `dest` and returns
/// the extracted image paths in archive order.
///
/// Non-image entries are still written to `dest`; they are only left out of
/// the returned list. An unreadable or malformed archive is an error for the
/// caller to handle.
pub fn extract_images(archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dest)?;
    let dest = dest.canonicalize()?;

    log::info!(
        "Extracting {} into {}",
        archive_path.display(),
        dest.display()
    );

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let mut images = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;

        // Rejects absolute names and `..` components.
        let relative = match entry.enclosed_name() {
            Some(path) => path,
            None => {
                log::warn!("Skipping unsafe archive entry: {}", entry.name());
                continue;
            }
        };
        let target = dest.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&target)?;
        std::io::copy(&mut entry, &mut out)?;

        if is_supported_format(&target) {
            images.push(target);
        } else {
            log::debug!("Ignoring non-image entry {}", entry.name());
        }
    }

    log::info!(
        "Found {} images in {}",
        images.len(),
        archive_path.display()
    );

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    /// Swaps every occurrence of `from` for the same-length `to`, renaming the
    /// entry in both the local header and the central directory.
    fn rename_entry(bytes: &mut [u8], from: &[u8], to: &[u8]) {
        assert_eq!(from.len(), to.len());
        let mut i = 0;
        while i + from.len() <= bytes.len() {
            if &bytes[i..i + from.len()] == from {
                bytes[i..i + from.len()].copy_from_slice(to);
                i += from.len();
            } else {
                i += 1;
            }
        }
    }

    #[test]
    fn unsafe_entry_names_stay_inside_dest() {
        let temp = tempfile::tempdir().unwrap();

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for name in ["xx/escape.png", "Xabs.png", "safe/kept.png"] {
            writer
                .start_file(name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"pixels").unwrap();
        }
        let mut bytes = writer.finish().unwrap().into_inner();
        rename_entry(&mut bytes, b"xx/escape.png", b"../escape.png");
        rename_entry(&mut bytes, b"Xabs.png", b"/abs.png");

        let archive_path = temp.path().join("evil.zip");
        std::fs::write(&archive_path, &bytes).unwrap();

        let dest = temp.path().join("nested").join("dest");
        let images = extract_images(&archive_path, &dest).unwrap();

        let dest = dest.canonicalize().unwrap();
        assert_eq!(images, vec![dest.join("safe").join("kept.png")]);
        assert!(!temp.path().join("nested").join("escape.png").exists());
        assert!(!dest.join("escape.png").exists());
        assert!(!Path::new("/abs.png").exists());
        assert!(!dest.join("abs.png").exists());
    }
}
