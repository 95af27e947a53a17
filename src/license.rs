//! License bookkeeping.
//!
//! Upstream archives bundle third-party code with its own license notices. The
//! wheel must carry every one of them, so the audit is two-sided: every path in
//! the required list must exist, and every file that merely *looks* like a
//! license must already be on the required list. Either failure means the
//! upstream layout drifted and the list needs a human look.

use std::collections::{BTreeMap, BTreeSet};

use regex::RegexBuilder;

use crate::common::base_name;
use crate::error::{Result, WheelError};

/// Collects license candidates while entries stream past.
#[derive(Debug)]
pub struct LicenseAuditor {
    matcher: regex::Regex,
    required: Vec<String>,
    found: BTreeMap<String, Vec<u8>>,
    candidates: BTreeSet<String>,
}

/// A required license file and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseFile {
    pub path: String,
    pub data: Vec<u8>,
}

impl LicenseAuditor {
    /// `patterns` are matched case-insensitively against whole base names.
    pub fn new<P, R>(patterns: &[P], required: &[R]) -> Result<Self>
    where
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let alternation = patterns
            .iter()
            .map(|p| format!("^(?:{})$", p.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            matcher,
            required: required.iter().map(|r| r.as_ref().to_string()).collect(),
            found: BTreeMap::new(),
            candidates: BTreeSet::new(),
        })
    }

    /// Whether a base file name looks like a license notice.
    pub fn looks_like_license(&self, file_name: &str) -> bool {
        self.matcher.is_match(file_name)
    }

    /// Records one archive path (relative to the archive's top directory).
    pub fn observe(&mut self, path: &str, data: &[u8]) {
        if self.looks_like_license(base_name(path)) {
            self.candidates.insert(path.to_string());
        }
        if self.required.iter().any(|r| r == path) {
            self.found.insert(path.to_string(), data.to_vec());
        }
    }

    /// Checks both directions and returns the required files in list order.
    pub fn finish(mut self) -> Result<Vec<LicenseFile>> {
        let mut missing: Vec<String> = self
            .required
            .iter()
            .filter(|r| !self.found.contains_key(r.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            missing.sort();
            missing.dedup();
            return Err(WheelError::MissingLicenses { paths: missing });
        }

        let unexpected: Vec<String> = self
            .candidates
            .iter()
            .filter(|c| !self.required.iter().any(|r| r == *c))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            return Err(WheelError::UnexpectedLicenses { paths: unexpected });
        }

        let mut files = Vec::with_capacity(self.required.len());
        for path in &self.required {
            if let Some(data) = self.found.remove(path) {
                files.push(LicenseFile {
                    path: path.clone(),
                    data,
                });
            }
        }
        Ok(files)
    }
}
