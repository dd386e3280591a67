//! Page generation modules for different view types
//!
//! One module per page template. [`MaudRenderer`] binds them to the
//! [`PageRenderer`] contract used by the site emitter.

pub mod commit;
pub mod file;
pub mod index;
pub mod log;
pub mod refs;
pub mod tree;

use crate::error::Result;
use crate::render::{
    CommitRenderData, FileRenderData, IndexRenderData, LogRenderData, PageRenderer,
    RefsRenderData, TreeRenderData,
};

/// Default page templates, rendered with maud.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaudRenderer;

impl PageRenderer for MaudRenderer {
    fn index(&self, data: &IndexRenderData<'_>) -> Result<String> {
        Ok(index::generate(data).into_string())
    }

    fn log(&self, data: &LogRenderData<'_>) -> Result<String> {
        Ok(log::generate(data).into_string())
    }

    fn commit(&self, data: &CommitRenderData<'_>) -> Result<String> {
        Ok(commit::generate(data).into_string())
    }

    fn tree(&self, data: &TreeRenderData<'_>) -> Result<String> {
        Ok(tree::generate(data).into_string())
    }

    fn file(&self, data: &FileRenderData<'_>) -> Result<String> {
        Ok(file::generate(data).into_string())
    }

    fn refs(&self, data: &RefsRenderData<'_>) -> Result<String> {
        Ok(refs::generate(data).into_string())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::context::LinkListElem;
    use crate::render::{CommitListElem, GlobalData};
    use crate::util::Timestamp;

    pub fn global() -> GlobalData {
        GlobalData {
            repo_name: "demo".to_string(),
            branch_name: "main".to_string(),
            links: vec![
                LinkListElem {
                    name: "summary".to_string(),
                    link: "/demo/index.html".to_string(),
                },
                LinkListElem {
                    name: "tree".to_string(),
                    link: "/demo/tree/index.html".to_string(),
                },
            ],
            commit_count: 3,
            branch_count: 1,
            tag_count: 0,
            stylesheets: vec!["/demo/assets/style.css".to_string()],
            script: "/demo/assets/main.js".to_string(),
        }
    }

    pub fn commit(summary: &str) -> CommitListElem {
        CommitListElem {
            link: "/demo/commit/4b825dc642cb6eb9a060e54bf8d69288fbee4904.html".to_string(),
            summary: summary.to_string(),
            author: "Alice".to_string(),
            date: Timestamp::new(1_600_000_000, 0),
            abbrev_hash: "4b825dc6".to_string(),
        }
    }
}
