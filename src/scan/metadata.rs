//! Conversion of platform metadata into [`StatRecord`]s.

use crate::domain::StatRecord;
use std::fs::Metadata;

#[cfg(unix)]
pub fn stat_record(meta: &Metadata) -> StatRecord {
    use std::os::unix::fs::MetadataExt;

    StatRecord {
        mode: meta.mode(),
        ino: meta.ino(),
        dev: meta.dev(),
        nlink: meta.nlink(),
        uid: meta.uid(),
        gid: meta.gid(),
        size: meta.size(),
        atime: epoch_secs(meta.atime(), meta.atime_nsec()),
        mtime: epoch_secs(meta.mtime(), meta.mtime_nsec()),
        ctime: epoch_secs(meta.ctime(), meta.ctime_nsec()),
    }
}

#[cfg(unix)]
fn epoch_secs(secs: i64, nanos: i64) -> f64 {
    secs as f64 + nanos as f64 / 1_000_000_000.0
}

/// Non-Unix platforms have no inode/owner data; `ctime` carries the creation time.
#[cfg(not(unix))]
pub fn stat_record(meta: &Metadata) -> StatRecord {
    StatRecord {
        size: meta.len(),
        atime: system_secs(meta.accessed()),
        mtime: system_secs(meta.modified()),
        ctime: system_secs(meta.created()),
        ..StatRecord::default()
    }
}

#[cfg(not(unix))]
fn system_secs(time: std::io::Result<std::time::SystemTime>) -> f64 {
    time.ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
