// Shared helpers for building throwaway git repositories
#![allow(dead_code)]

use git2::{Oid, Repository, Signature, Time};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    counter: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo {
            dir,
            repo,
            counter: 0,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'static> {
        // One minute apart so commit order never depends on timing
        let time = Time::new(1_700_000_000 + self.counter * 60, 0);
        Signature::new("Test User", "test@example.com", &time).expect("Could not create signature")
    }

    /// Commit a change to a file on HEAD and return its id
    pub fn commit(&mut self, message: &str) -> Oid {
        self.counter += 1;
        let content_path = self.dir.path().join("README.md");
        fs::write(&content_path, format!("revision {}\n", self.counter))
            .expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let signature = self.signature();
        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parents,
            )
            .expect("Could not create commit")
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn annotated_tag(&mut self, name: &str, oid: Oid, message: &str) {
        self.counter += 1;
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        let signature = self.signature();
        self.repo
            .tag(name, &object, &signature, message, false)
            .expect("Could not create annotated tag");
    }
}
