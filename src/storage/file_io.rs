//! Whole-file JSON reads and crash-safe writes
//!
//! A write goes to a staging file next to the target, is synced, and is then
//! renamed over the target. Readers see either the old file or the new one.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::error::{BankbookError, BankbookResult};

/// Deserialize `path`, or `T::default()` when nothing is there yet
pub fn read_json<T, P>(path: P) -> BankbookResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(io_error("read", path, e)),
    };

    serde_json::from_slice(&bytes)
        .map_err(|e| BankbookError::Format(format!("{}: {}", path.display(), e)))
}

/// Serialize `data` as pretty JSON and replace `path` with it atomically
///
/// Missing parent directories are created.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> BankbookResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| BankbookError::Json(format!("cannot encode {}: {}", path.display(), e)))?;
    bytes.push(b'\n');

    ensure_parent(path)?;

    let staging = staging_path(path);
    write_and_sync(&staging, &bytes)
        .and_then(|()| fs::rename(&staging, path))
        .map_err(|e| {
            let _ = fs::remove_file(&staging);
            io_error("write", path, e)
        })
}

/// True when `path` can be read and holds well-formed JSON of any shape
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    fs::read(path)
        .ok()
        .is_some_and(|bytes| serde_json::from_slice::<IgnoredAny>(&bytes).is_ok())
}

fn ensure_parent(path: &Path) -> BankbookResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| io_error("create directory", dir, e))
        }
        _ => Ok(()),
    }
}

/// `bank_data.json` stages as `bank_data.json.tmp` in the same directory
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn io_error(action: &str, path: &Path, err: io::Error) -> BankbookError {
    BankbookError::Io(format!("cannot {} {}: {}", action, path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Default, Serialize, Deserialize)]
    struct Sample {
        label: String,
        count: u32,
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let dir = TempDir::new().unwrap();
        let sample: Sample = read_json(dir.path().join("absent.json")).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_write_then_read_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json");
        let sample = Sample {
            label: "checking".into(),
            count: 3,
        };

        write_json_atomic(&path, &sample).unwrap();

        assert_eq!(read_json::<Sample, _>(&path).unwrap(), sample);
        assert!(!dir.path().join("sample.json.tmp").exists());
        assert!(fs::read_to_string(&path).unwrap().ends_with("}\n"));
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json");

        write_json_atomic(&path, &Sample { label: "old".into(), count: 1 }).unwrap();
        write_json_atomic(&path, &Sample { label: "new".into(), count: 2 }).unwrap();

        let sample: Sample = read_json(&path).unwrap();
        assert_eq!(sample.label, "new");
    }

    #[test]
    fn test_malformed_content_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"label\": ").unwrap();

        let err = read_json::<Sample, _>(&path).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_parents_are_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("sample.json");

        write_json_atomic(&path, &Sample::default()).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_file_as_parent_is_io_error() {
        let dir = TempDir::new().unwrap();
        let not_a_dir = dir.path().join("plain");
        fs::write(&not_a_dir, "x").unwrap();

        let err = write_json_atomic(not_a_dir.join("sample.json"), &Sample::default()).unwrap_err();
        assert!(matches!(err, BankbookError::Io(_)));
    }

    #[test]
    fn test_staging_path_sits_beside_target() {
        assert_eq!(
            staging_path(Path::new("/data/bank_data.json")),
            PathBuf::from("/data/bank_data.json.tmp")
        );
    }

    #[test]
    fn test_json_file_valid() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(&good, "[1, 2, 3]").unwrap();
        fs::write(&bad, "accounts: []").unwrap();

        assert!(json_file_valid(&good));
        assert!(!json_file_valid(&bad));
        assert!(!json_file_valid(dir.path().join("absent.json")));
    }
}
