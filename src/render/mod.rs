//! Text renderers for the three documentation artifacts.
//!
//! [`render`] is a pure function of a [`Project`] and a [`FileSet`]. It performs no I/O,
//! and rendering the same inputs twice yields byte-identical outputs.

pub mod llms;
pub mod markdown;
pub mod mermaid;

use crate::file_set::FileSet;
use crate::git::Revision;

/// Identity of the documented project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub revision: Option<Revision>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            revision: None,
        }
    }

    pub fn with_revision(mut self, revision: Option<Revision>) -> Self {
        self.revision = revision;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Artifact {
    Readme,
    Structure,
    LlmsIndex,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Readme, Artifact::Structure, Artifact::LlmsIndex];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Readme => "README.md",
            Artifact::Structure => "structure.mmd",
            Artifact::LlmsIndex => "llms.txt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutputs {
    readme: String,
    structure: String,
    llms_index: String,
}

impl RenderedOutputs {
    pub fn get(&self, artifact: Artifact) -> &str {
        match artifact {
            Artifact::Readme => &self.readme,
            Artifact::Structure => &self.structure,
            Artifact::LlmsIndex => &self.llms_index,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Artifact, &str)> {
        Artifact::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}

pub fn render(project: &Project, files: &FileSet) -> RenderedOutputs {
    RenderedOutputs {
        readme: markdown::render(project, files),
        structure: mermaid::render(project, files),
        llms_index: llms::render(project, files),
    }
}
