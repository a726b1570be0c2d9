// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "metrics")]
use crate::metrics::*;

/// Active file size at which rotation happens when none is configured.
pub const DEFAULT_MAX_LOG_SIZE: u64 = 512 * 1024 * 1024;

/// Number of rotated files retained when no count is configured.
pub const DEFAULT_LOG_FILE_COUNT: usize = 10;

/// Size-triggered rotation settings. A zero value for either field means the
/// backend default applies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RotationPolicy {
    max_size: u64,
    max_files: usize,
}

impl RotationPolicy {
    pub fn new(max_size: u64, max_files: usize) -> Self {
        Self {
            max_size,
            max_files,
        }
    }

    /// The effective size limit, in bytes.
    pub fn max_size(&self) -> u64 {
        if self.max_size == 0 {
            DEFAULT_MAX_LOG_SIZE
        } else {
            self.max_size
        }
    }

    /// The effective number of rotated files to retain.
    pub fn max_files(&self) -> usize {
        if self.max_files == 0 {
            DEFAULT_LOG_FILE_COUNT
        } else {
            self.max_files
        }
    }

    pub fn set_max_size(&mut self, bytes: u64) {
        self.max_size = bytes;
    }

    pub fn set_max_files(&mut self, count: usize) {
        self.max_files = count;
    }

    fn exceeded(&self, size: u64) -> bool {
        size > self.max_size()
    }
}

/// An append-only log file which rotates itself once it grows past the size
/// limit of its policy.
///
/// Rotated files live next to the active file as `<path>.1` (newest) through
/// `<path>.<max_files>` (oldest).
///
/// After a failed rotation the file keeps growing past its limit, and size
/// triggered rotation is not attempted again until `force_rotate` is called.
pub struct LogFile {
    path: PathBuf,
    file: fs::File,
    size: u64,
    policy: RotationPolicy,
    rotation_failed: bool,
}

impl LogFile {
    /// Open, or create, the file at `path` for appending. Missing parent
    /// directories are created.
    pub fn open(path: &Path, policy: RotationPolicy) -> Result<Self, Error> {
        let (file, size) = open_append(path).map_err(|source| {
            metrics! { LOG_OPEN_EX.increment(); }
            Error::Path {
                path: path.to_path_buf(),
                source,
            }
        })?;

        metrics! { LOG_OPEN.increment(); }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            size,
            policy,
            rotation_failed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes in the active file.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    pub fn policy_mut(&mut self) -> &mut RotationPolicy {
        &mut self.policy
    }

    /// Whether size triggered rotation has been suspended by a failure.
    pub fn rotation_failed(&self) -> bool {
        self.rotation_failed
    }

    /// Append one complete record. If this takes the file over its size limit
    /// the file is rotated; a failed rotation leaves the current file active.
    pub fn write_record(&mut self, record: &[u8]) -> std::io::Result<()> {
        if let Err(e) = self.file.write_all(record) {
            // part of the record may have landed
            if let Ok(metadata) = self.file.metadata() {
                self.size = metadata.len();
            }
            return Err(e);
        }
        self.size += record.len() as u64;

        metrics! {
            LOG_WRITE.increment();
            LOG_WRITE_BYTE.add(record.len() as _);
        }

        if !self.rotation_failed && self.policy.exceeded(self.size) {
            let _ = self.rotate();
        }

        Ok(())
    }

    /// Rotate on request. Does nothing if the active file is empty. If the
    /// active file has been moved away by another process, the configured
    /// path is reopened instead. Either way, size triggered rotation resumes
    /// once this succeeds.
    pub fn force_rotate(&mut self) -> Result<(), Error> {
        if !self.path.exists() {
            return self.reopen();
        }
        if self.size == 0 {
            self.rotation_failed = false;
            return Ok(());
        }
        self.rotate()
    }

    /// Flush the active file to the storage device.
    pub fn sync(&mut self) -> std::io::Result<()> {
        self.file.flush()?;
        self.file.sync_all()
    }

    fn rotate(&mut self) -> Result<(), Error> {
        let result = self.shift_and_reopen();

        self.rotation_failed = result.is_err();
        match result {
            Ok(()) => {
                metrics! { LOG_ROTATE.increment(); }
            }
            Err(_) => {
                metrics! { LOG_ROTATE_EX.increment(); }
            }
        }

        result.map_err(|source| Error::Rotation {
            path: self.path.clone(),
            source,
        })
    }

    fn shift_and_reopen(&mut self) -> std::io::Result<()> {
        let keep = self.policy.max_files();

        // evict the oldest retained file, along with anything left behind by
        // a previously larger retention count
        let mut index = keep;
        loop {
            match fs::remove_file(self.rotated_path(index)) {
                Ok(()) => index += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => break,
                Err(e) => return Err(e),
            }
        }

        for index in (1..keep).rev() {
            let from = self.rotated_path(index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(index + 1))?;
            }
        }

        let newest = self.rotated_path(1);
        fs::rename(&self.path, &newest)?;

        match open_append(&self.path) {
            Ok((file, size)) => {
                self.file = file;
                self.size = size;
                Ok(())
            }
            Err(e) => {
                // put the still open file back so later records stay at the
                // active path; if that fails too, the next forced rotation
                // finds the path missing and reopens it
                let _ = fs::rename(&newest, &self.path);
                Err(e)
            }
        }
    }

    fn reopen(&mut self) -> Result<(), Error> {
        let (file, size) = open_append(&self.path).map_err(|source| Error::Rotation {
            path: self.path.clone(),
            source,
        })?;
        self.file = file;
        self.size = size;
        self.rotation_failed = false;
        Ok(())
    }

    fn rotated_path(&self, index: usize) -> PathBuf {
        rotated_path(&self.path, index)
    }
}

/// The name of the `index`th rotated file for `path`.
pub fn rotated_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

fn open_append(path: &Path) -> std::io::Result<(fs::File, u64)> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let size = file.metadata()?.len();
    Ok((file, size))
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::fs;

    fn read(path: &std::path::Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn policy_defaults() {
        let policy = RotationPolicy::default();
        assert_eq!(policy.max_size(), DEFAULT_MAX_LOG_SIZE);
        assert_eq!(policy.max_files(), DEFAULT_LOG_FILE_COUNT);

        let mut policy = RotationPolicy::new(100, 3);
        assert_eq!(policy.max_size(), 100);
        assert_eq!(policy.max_files(), 3);

        policy.set_max_size(0);
        policy.set_max_files(0);
        assert_eq!(policy, RotationPolicy::default());
    }

    #[test]
    fn rotated_names() {
        let path = std::path::Path::new("/var/log/app.log");
        assert_eq!(rotated_path(path, 1), std::path::Path::new("/var/log/app.log.1"));
        assert_eq!(rotated_path(path, 12), std::path::Path::new("/var/log/app.log.12"));
    }

    #[test]
    fn appends_to_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("dir").join("app.log");

        let mut file = LogFile::open(&path, RotationPolicy::default()).unwrap();
        file.write_record(b"first\n").unwrap();
        drop(file);

        let mut file = LogFile::open(&path, RotationPolicy::default()).unwrap();
        assert_eq!(file.size(), 6);
        file.write_record(b"second\n").unwrap();
        assert_eq!(read(&path), "first\nsecond\n");
    }

    #[test]
    fn open_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        // a regular file can't act as a directory
        match LogFile::open(&blocker.join("app.log"), RotationPolicy::default()) {
            Err(Error::Path { path, .. }) => assert_eq!(path, blocker.join("app.log")),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("open should fail"),
        }
    }

    #[test]
    fn size_triggered() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app.log");

        let mut file = LogFile::open(&path, RotationPolicy::new(10, 2)).unwrap();
        file.write_record(b"0123456789").unwrap();
        // at the limit, not over it
        assert!(!rotated_path(&path, 1).exists());

        file.write_record(b"a\n").unwrap();
        assert_eq!(read(&rotated_path(&path, 1)), "0123456789a\n");
        assert_eq!(read(&path), "");
        assert_eq!(file.size(), 0);
    }

    #[test]
    fn oldest_evicted_first() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app.log");

        let mut file = LogFile::open(&path, RotationPolicy::new(1, 2)).unwrap();
        for record in ["one\n", "two\n", "three\n", "four\n"] {
            file.write_record(record.as_bytes()).unwrap();
        }

        assert_eq!(read(&rotated_path(&path, 1)), "four\n");
        assert_eq!(read(&rotated_path(&path, 2)), "three\n");
        assert!(!rotated_path(&path, 3).exists());
        assert_eq!(read(&path), "");
    }

    #[test]
    fn shrinking_retention() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app.log");

        let mut file = LogFile::open(&path, RotationPolicy::new(1, 4)).unwrap();
        for record in ["one\n", "two\n", "three\n", "four\n"] {
            file.write_record(record.as_bytes()).unwrap();
        }
        assert!(rotated_path(&path, 4).exists());

        file.policy_mut().set_max_files(2);
        file.write_record(b"five\n").unwrap();

        assert_eq!(read(&rotated_path(&path, 1)), "five\n");
        assert_eq!(read(&rotated_path(&path, 2)), "four\n");
        assert!(!rotated_path(&path, 3).exists());
        assert!(!rotated_path(&path, 4).exists());
    }

    #[test]
    fn forced_rotation_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app.log");

        let mut file = LogFile::open(&path, RotationPolicy::default()).unwrap();
        file.write_record(b"hello\n").unwrap();

        file.force_rotate().unwrap();
        file.force_rotate().unwrap();

        assert_eq!(read(&rotated_path(&path, 1)), "hello\n");
        assert!(!rotated_path(&path, 2).exists());
        assert_eq!(read(&path), "");
    }

    #[test]
    fn failed_rotation_keeps_appending() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app.log");
        let blocker = rotated_path(&path, 2);
        fs::create_dir_all(blocker.join("x")).unwrap();

        let mut file = LogFile::open(&path, RotationPolicy::new(10, 2)).unwrap();
        file.write_record(b"0123456789a\n").unwrap();
        assert!(file.rotation_failed());
        assert!(!rotated_path(&path, 1).exists());

        // no further attempts while the limit stays exceeded
        file.write_record(b"b\n").unwrap();
        file.write_record(b"c\n").unwrap();
        assert_eq!(read(&path), "0123456789a\nb\nc\n");
        assert_eq!(file.size(), 16);

        match file.force_rotate() {
            Err(Error::Rotation { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(file.rotation_failed());
        file.write_record(b"d\n").unwrap();
        assert_eq!(read(&path), "0123456789a\nb\nc\nd\n");

        fs::remove_dir_all(&blocker).unwrap();
        file.force_rotate().unwrap();
        assert!(!file.rotation_failed());
        assert_eq!(read(&rotated_path(&path, 1)), "0123456789a\nb\nc\nd\n");
        assert_eq!(read(&path), "");

        file.write_record(b"0123456789e\n").unwrap();
        assert_eq!(read(&rotated_path(&path, 1)), "0123456789e\n");
        assert_eq!(read(&rotated_path(&path, 2)), "0123456789a\nb\nc\nd\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn write_failure_resyncs_size() {
        let full = std::path::Path::new("/dev/full");
        if !full.exists() {
            return;
        }

        let mut file = LogFile::open(full, RotationPolicy::default()).unwrap();
        assert!(file.write_record(b"nowhere to go\n").is_err());
        assert_eq!(file.size(), fs::metadata(full).unwrap().len());
    }

    #[test]
    fn reopen_after_external_move() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app.log");
        let moved = tmp.path().join("app.log.old");

        let mut file = LogFile::open(&path, RotationPolicy::default()).unwrap();
        file.write_record(b"before\n").unwrap();
        fs::rename(&path, &moved).unwrap();

        file.force_rotate().unwrap();
        file.write_record(b"after\n").unwrap();

        assert_eq!(read(&moved), "before\n");
        assert_eq!(read(&path), "after\n");
        assert!(!rotated_path(&path, 1).exists());
    }
}
