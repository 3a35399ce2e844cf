use crate::api::LibraryClient;
use crate::domain::models::{DownloadReport, Rom};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary download target, removed on drop unless persisted.
struct PartFile {
    path: PathBuf,
    persisted: bool,
}

impl PartFile {
    fn create(path: PathBuf) -> io::Result<(File, Self)> {
        let file = File::create(&path)?;
        Ok((
            file,
            Self {
                path,
                persisted: false,
            },
        ))
    }

    fn persist(mut self, dest: &Path) -> io::Result<()> {
        fs::rename(&self.path, dest)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}

struct DigestWriter<W: Write> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> Write for DigestWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Archive file name for a ROM: `<name>.zip`, with path separators replaced
/// so the file always lands inside the output directory.
pub fn archive_name(rom: &Rom) -> String {
    let safe: String = rom
        .r_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{safe}.zip")
}

/// Fetch the ROM archive and persist it under `dir`.
///
/// The body streams into a `.part` file that is renamed into place only once
/// the transfer completed; any failure removes it and surfaces the error.
pub fn download_to_dir(
    client: &LibraryClient,
    rom: &Rom,
    files: Option<&[String]>,
    dir: &Path,
) -> anyhow::Result<DownloadReport> {
    fs::create_dir_all(dir)?;
    let name = archive_name(rom);
    let dest = dir.join(&name);

    let (file, part) = PartFile::create(dir.join(format!("{name}.part")))?;
    let mut writer = DigestWriter {
        inner: file,
        hasher: Sha256::new(),
    };
    let bytes = client.download_rom(rom, files, &mut writer)?;
    writer.flush()?;

    let DigestWriter { inner, hasher } = writer;
    drop(inner); // close before rename
    let sha256 = hex::encode(hasher.finalize());
    part.persist(&dest)?;

    tracing::info!("downloaded {} ({bytes} bytes)", dest.display());
    Ok(DownloadReport {
        name,
        path: dest.to_string_lossy().to_string(),
        bytes,
        sha256,
    })
}
