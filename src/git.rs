use git2::Repository;
use std::fmt;
use std::path::Path;

/// Length of the abbreviated commit id shown in generated documents.
const SHORT_ID_LEN: usize = 12;

/// HEAD of the documented snapshot, when it is a Git working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub commit: String,
    pub branch: Option<String>,
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.branch {
            Some(branch) => write!(f, "{} ({})", self.commit, branch),
            None => write!(f, "{}", self.commit),
        }
    }
}

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Opens `path` only if it is itself the root of a working tree; parent directories
    /// are not searched.
    pub fn open(path: &Path) -> Option<Self> {
        Repository::open(path)
            .ok()
            .filter(|repo| !repo.is_bare())
            .map(|repo| Self { repo })
    }

    /// Reads HEAD. Returns `None` for an unborn branch.
    pub fn revision(&self) -> Option<Revision> {
        let head = self.repo.head().ok()?;
        let commit = head.peel_to_commit().ok()?;
        let id = commit.id().to_string();
        let branch = if head.is_branch() {
            head.shorthand().map(str::to_string)
        } else {
            None
        };
        Some(Revision {
            commit: id[..SHORT_ID_LEN.min(id.len())].to_string(),
            branch,
        })
    }
}

/// Revision of the working tree rooted at `path`, if any.
pub fn revision_of(path: &Path) -> Option<Revision> {
    GitRepo::open(path).and_then(|repo| repo.revision())
}
