//! Upload categories.
//!
//! Each category owns one directory under the upload root and maps to one
//! public path segment: `/uploads/<dir>/<assigned_name>`.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Upload context: decides the destination directory and which policy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadCategory {
    Package,
    Profile,
    Post,
}

impl UploadCategory {
    /// Directory name under the upload root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            UploadCategory::Package => "packages",
            UploadCategory::Profile => "profiles",
            UploadCategory::Post => "posts",
        }
    }
}

impl Display for UploadCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.dir_name())
    }
}
