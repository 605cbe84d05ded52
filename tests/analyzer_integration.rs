//! Integration tests for the repository analyzer
//!
//! These tests drive the full analysis flow against a scripted mock host
//! and verify result shapes, failure propagation and the exact sequence of
//! remote lookups.

use polyrepo::github::mock::{MockHost, MockReply, RecordedCall};
use polyrepo::github::HostError;
use polyrepo::{AnalysisError, RepositoryAnalyzer, SubmoduleEntry};
use std::sync::Arc;

fn entry(path: &str, sha: &str) -> SubmoduleEntry {
    SubmoduleEntry::pinned(path, sha)
}

#[tokio::test]
async fn analyze_resolves_superproject_and_enriches_submodules() {
    let host = Arc::new(MockHost::new());
    host.push_replies([
        MockReply::Commit("abc123".to_string()),
        MockReply::Submodules(vec![entry("libs/foo", "def456")]),
    ]);

    let analyzer = RepositoryAnalyzer::new(host.clone());
    let analysis = analyzer
        .analyze("https://github.com/acme/widget", "main", None)
        .await
        .unwrap();

    assert_eq!(analysis.superproject.path, "widget");
    assert_eq!(analysis.superproject.sha, "abc123");
    assert_eq!(
        analysis.superproject.url.as_deref(),
        Some("https://github.com/acme/widget")
    );

    assert_eq!(analysis.submodules.len(), 1);
    assert_eq!(analysis.submodules[0].path, "libs/foo");
    assert_eq!(analysis.submodules[0].sha, "def456");
    assert_eq!(
        analysis.submodules[0].url.as_deref(),
        Some("https://github.com/acme/libs/foo")
    );

    // Both lookups happened, in order, against the parsed reference.
    let calls = host.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        RecordedCall::BranchCommit {
            owner: "acme".to_string(),
            repo: "widget".to_string(),
            branch: "main".to_string(),
            token: None,
        }
    );
    assert_eq!(
        calls[1],
        RecordedCall::Submodules {
            owner: "acme".to_string(),
            repo: "widget".to_string(),
            commit: "abc123".to_string(),
            token: None,
        }
    );
}

#[tokio::test]
async fn analyze_accepts_git_suffix_and_trailing_slash() {
    let host = Arc::new(MockHost::new());
    host.push_replies([
        MockReply::Commit("abc123".to_string()),
        MockReply::Submodules(vec![]),
    ]);

    let analyzer = RepositoryAnalyzer::new(host.clone());
    let analysis = analyzer
        .analyze("https://github.com/acme/widget.git/", "main", None)
        .await
        .unwrap();

    // The parsed name drops the suffixes but the reported URL stays verbatim.
    assert_eq!(analysis.superproject.path, "widget");
    assert_eq!(
        analysis.superproject.url.as_deref(),
        Some("https://github.com/acme/widget.git/")
    );
    assert!(matches!(
        host.calls()[0],
        RecordedCall::BranchCommit { ref repo, .. } if repo == "widget"
    ));
}

#[tokio::test]
async fn analyze_with_no_submodules_yields_empty_list() {
    let host = Arc::new(MockHost::new());
    host.push_replies([
        MockReply::Commit("abc123".to_string()),
        MockReply::Submodules(vec![]),
    ]);

    let analyzer = RepositoryAnalyzer::new(host);
    let analysis = analyzer
        .analyze("https://github.com/acme/widget", "main", None)
        .await
        .unwrap();

    assert!(analysis.submodules.is_empty());
}

#[tokio::test]
async fn analyze_preserves_tree_order() {
    let host = Arc::new(MockHost::new());
    host.push_replies([
        MockReply::Commit("abc123".to_string()),
        MockReply::Submodules(vec![
            entry("vendor/zlib", "aaa"),
            entry("libs/alpha", "bbb"),
            entry("tools/build", "ccc"),
        ]),
    ]);

    let analyzer = RepositoryAnalyzer::new(host);
    let analysis = analyzer
        .analyze("https://github.com/acme/widget", "main", None)
        .await
        .unwrap();

    let paths: Vec<&str> = analysis
        .submodules
        .iter()
        .map(|e| e.path.as_str())
        .collect();
    assert_eq!(paths, vec!["vendor/zlib", "libs/alpha", "tools/build"]);
}

#[tokio::test]
async fn failed_branch_lookup_aborts_before_tree_listing() {
    let host = Arc::new(MockHost::new());
    host.push_reply(MockReply::status(404, "{\"message\":\"Branch not found\"}"));

    let analyzer = RepositoryAnalyzer::new(host.clone());
    let err = analyzer
        .analyze("https://github.com/acme/widget", "missing", None)
        .await
        .unwrap_err();

    match err {
        AnalysisError::Host(HostError::Status { status, body }) => {
            assert_eq!(status, 404);
            assert!(body.contains("Branch not found"));
        }
        other => panic!("expected a status error, got {other:?}"),
    }

    // The tree endpoint was never reached.
    assert_eq!(host.calls().len(), 1);
    assert!(matches!(host.calls()[0], RecordedCall::BranchCommit { .. }));
}

#[tokio::test]
async fn failed_tree_listing_surfaces_status() {
    let host = Arc::new(MockHost::new());
    host.push_replies([
        MockReply::Commit("abc123".to_string()),
        MockReply::status(500, "Internal Server Error"),
    ]);

    let analyzer = RepositoryAnalyzer::new(host);
    let err = analyzer
        .analyze("https://github.com/acme/widget", "main", None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Host(HostError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn malformed_branch_response_surfaces_unchanged() {
    let host = Arc::new(MockHost::new());
    host.push_reply(MockReply::Error(HostError::Malformed {
        endpoint: "branch",
        reason: "missing field `commit.sha`".to_string(),
    }));

    let analyzer = RepositoryAnalyzer::new(host);
    let err = analyzer
        .analyze("https://github.com/acme/widget", "main", None)
        .await
        .unwrap_err();

    match err {
        AnalysisError::Host(HostError::Malformed { endpoint, reason }) => {
            assert_eq!(endpoint, "branch");
            assert!(reason.contains("commit.sha"));
        }
        other => panic!("expected a malformed-response error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_url_fails_without_touching_the_host() {
    let host = Arc::new(MockHost::new());

    let analyzer = RepositoryAnalyzer::new(host.clone());
    let err = analyzer.analyze("onlyname", "main", None).await.unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidUrl(_)));
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn token_is_forwarded_unchanged_to_each_lookup() {
    let host = Arc::new(MockHost::new());
    host.push_replies([
        MockReply::Commit("abc123".to_string()),
        MockReply::Submodules(vec![entry("libs/foo", "def456")]),
    ]);

    let analyzer = RepositoryAnalyzer::new(host.clone());
    analyzer
        .analyze("https://github.com/acme/widget", "main", Some("s3cret"))
        .await
        .unwrap();

    for call in host.calls() {
        let token = match call {
            RecordedCall::BranchCommit { token, .. } => token,
            RecordedCall::Submodules { token, .. } => token,
            RecordedCall::DefaultBranch { token, .. } => token,
        };
        assert_eq!(token.as_deref(), Some("s3cret"));
    }
}
