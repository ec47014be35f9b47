use std::path::{Path, PathBuf};

use anyhow::Result;
use glob::glob;

use riboprep_core::errors::CountsError;

use crate::consts::{COUNT_FILE_PATTERN, COUNT_FILE_PATTERN_GZ, MIN_COUNT_FILES};

pub struct CountFileGlob {
    curr: usize,
    files: Vec<PathBuf>,
}

impl CountFileGlob {
    ///
    /// Discover count files in a directory and enforce the minimum cohort
    /// size before any of them is opened.
    ///
    /// # Arguments:
    /// - directory: directory the counting tool wrote its output files to.
    ///
    pub fn new(directory: &Path) -> Result<Self> {
        let mut files: Vec<PathBuf> = Vec::new();

        for pattern in [COUNT_FILE_PATTERN, COUNT_FILE_PATTERN_GZ] {
            let pattern = directory.join(pattern);
            let pattern = pattern.to_str().ok_or_else(|| {
                anyhow::anyhow!("Count directory is not valid UTF-8: {:?}", directory)
            })?;

            for entry in glob(pattern)? {
                match entry {
                    Ok(path) => files.push(path),
                    Err(e) => anyhow::bail!(format!("Error reading file entry: {:?}", e)),
                }
            }
        }

        // column order must not depend on directory enumeration order
        files.sort();

        if files.len() < MIN_COUNT_FILES {
            return Err(CountsError::TooFewCountFiles {
                pattern: directory.join(COUNT_FILE_PATTERN).display().to_string(),
                found: files.len(),
                required: MIN_COUNT_FILES,
            }
            .into());
        }

        let curr = 0_usize;
        Ok(CountFileGlob { files, curr })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Iterator for CountFileGlob {
    type Item = PathBuf;
    fn next(&mut self) -> Option<Self::Item> {
        let result = self.files.get(self.curr).cloned();
        self.curr += 1;
        result
    }
}
