use crate::analysis::types::SubmoduleEntry;
use crate::github::host::{HostError, RepositoryHost};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted reply returned by [`MockHost`] for one remote call, in order.
#[derive(Debug)]
pub enum MockReply {
    Commit(String),
    Branch(String),
    Submodules(Vec<SubmoduleEntry>),
    Error(HostError),
}

impl MockReply {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        MockReply::Error(HostError::Status {
            status,
            body: body.into(),
        })
    }
}

/// One remote call observed by [`MockHost`], with the arguments it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    BranchCommit {
        owner: String,
        repo: String,
        branch: String,
        token: Option<String>,
    },
    DefaultBranch {
        owner: String,
        repo: String,
        token: Option<String>,
    },
    Submodules {
        owner: String,
        repo: String,
        commit: String,
        token: Option<String>,
    },
}

/// Test double for [`RepositoryHost`] with a queue of scripted replies and a
/// record of every call it served.
pub struct MockHost {
    replies: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn push_replies(&self, replies: impl IntoIterator<Item = MockReply>) {
        let mut queue = self.replies.lock().unwrap();
        for reply in replies {
            queue.push_back(reply);
        }
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_reply(&self) -> Option<MockReply> {
        self.replies.lock().unwrap().pop_front()
    }

    fn unscripted(method: &str, reply: Option<MockReply>) -> HostError {
        HostError::Malformed {
            endpoint: "mock",
            reason: match reply {
                Some(reply) => format!("unexpected reply {:?} scripted for {}", reply, method),
                None => format!("no reply scripted for {}", method),
            },
        }
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryHost for MockHost {
    async fn branch_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        token: Option<&str>,
    ) -> Result<String, HostError> {
        self.record(RecordedCall::BranchCommit {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            token: token.map(str::to_string),
        });
        match self.next_reply() {
            Some(MockReply::Commit(sha)) => Ok(sha),
            Some(MockReply::Error(err)) => Err(err),
            other => Err(Self::unscripted("branch_commit", other)),
        }
    }

    async fn default_branch(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<String, HostError> {
        self.record(RecordedCall::DefaultBranch {
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.map(str::to_string),
        });
        match self.next_reply() {
            Some(MockReply::Branch(branch)) => Ok(branch),
            Some(MockReply::Error(err)) => Err(err),
            other => Err(Self::unscripted("default_branch", other)),
        }
    }

    async fn submodules(
        &self,
        owner: &str,
        repo: &str,
        commit: &str,
        token: Option<&str>,
    ) -> Result<Vec<SubmoduleEntry>, HostError> {
        self.record(RecordedCall::Submodules {
            owner: owner.to_string(),
            repo: repo.to_string(),
            commit: commit.to_string(),
            token: token.map(str::to_string),
        });
        match self.next_reply() {
            Some(MockReply::Submodules(entries)) => Ok(entries),
            Some(MockReply::Error(err)) => Err(err),
            other => Err(Self::unscripted("submodules", other)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_are_served_in_order() {
        let host = MockHost::new();
        host.push_replies([
            MockReply::Commit("abc123".to_string()),
            MockReply::Submodules(vec![SubmoduleEntry::pinned("libs/foo", "def456")]),
        ]);

        let sha = host.branch_commit("acme", "widget", "main", None).await.unwrap();
        assert_eq!(sha, "abc123");

        let submodules = host.submodules("acme", "widget", &sha, None).await.unwrap();
        assert_eq!(submodules.len(), 1);
        assert_eq!(host.remaining_replies(), 0);
    }

    #[tokio::test]
    async fn test_scripted_error_is_returned() {
        let host = MockHost::new();
        host.push_reply(MockReply::status(404, "Not Found"));

        let err = host
            .branch_commit("acme", "widget", "missing", None)
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_unscripted_call_fails() {
        let host = MockHost::new();
        let err = host.default_branch("acme", "widget", None).await.unwrap_err();
        assert!(matches!(err, HostError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_calls_are_recorded_with_token() {
        let host = MockHost::new();
        host.push_reply(MockReply::Commit("abc123".to_string()));

        host.branch_commit("acme", "widget", "main", Some("tok"))
            .await
            .unwrap();

        assert_eq!(
            host.calls(),
            vec![RecordedCall::BranchCommit {
                owner: "acme".to_string(),
                repo: "widget".to_string(),
                branch: "main".to_string(),
                token: Some("tok".to_string()),
            }]
        );
    }
}
