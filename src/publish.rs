//! The five-step GitHub publish transaction.
//!
//! Every review publish is the same sequence: resolve the branch tip, fetch
//! the homepage index fragment, create a tree carrying the new page and the
//! updated fragment, commit it, then force-move the branch ref. Each step
//! depends on the previous one's result, so the sequence is strictly
//! sequential. There is no compensation: a failure after `create-commit`
//! leaves an orphaned commit on the remote, and the error names the step
//! that failed. Two concurrent publishes race on the final ref update and
//! the later one silently wins; last write wins is the contract here.

use crate::errors::{PublishError, PublishStep};
use crate::github::{GitHubClient, TreeEntry};
use crate::render;
use crate::review::Review;

/// Commit message used for every published review.
const COMMIT_MESSAGE: &str = "New snack review!";

/// What a completed publish left on the remote.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub commit: String,
    pub page_path: String,
}

/// One review publish against a fixed branch and index fragment.
pub struct PublishTransaction<'a> {
    client: &'a GitHubClient,
    branch: &'a str,
    index_path: &'a str,
}

impl<'a> PublishTransaction<'a> {
    pub fn new(client: &'a GitHubClient, branch: &'a str, index_path: &'a str) -> Self {
        Self {
            client,
            branch,
            index_path,
        }
    }

    /// Run the full sequence for one review.
    pub async fn publish(&self, review: &Review) -> Result<Published, PublishError> {
        let page_path = format!("{}/index.html", review.slug());
        let post = render::render_post(review);
        let list_item = render::render_list_item(&review.title);

        let step = PublishStep::ResolveRef;
        tracing::debug!(%step, branch = self.branch, "publish step");
        let tip = self
            .client
            .get_ref(self.branch)
            .await
            .map_err(|source| fail(step, source))?;

        let step = PublishStep::FetchIndex;
        tracing::debug!(%step, path = self.index_path, "publish step");
        let index = self
            .client
            .get_contents(self.index_path)
            .await
            .and_then(|file| file.decoded())
            .map_err(|source| fail(step, source))?;

        let step = PublishStep::CreateTree;
        tracing::debug!(%step, page = %page_path, "publish step");
        let new_index = format!("{}\n{}", list_item, index);
        let tree = self
            .client
            .create_tree(
                &tip.object.sha,
                vec![
                    TreeEntry::blob(page_path.clone(), post),
                    TreeEntry::blob(self.index_path, new_index),
                ],
            )
            .await
            .map_err(|source| fail(step, source))?;

        let step = PublishStep::CreateCommit;
        tracing::debug!(%step, tree = %tree.sha, "publish step");
        let commit = self
            .client
            .create_commit(COMMIT_MESSAGE, &tree.sha, &tip.object.sha)
            .await
            .map_err(|source| fail(step, source))?;

        let step = PublishStep::UpdateRef;
        tracing::debug!(%step, commit = %commit.sha, "publish step");
        self.client
            .update_ref(self.branch, &commit.sha)
            .await
            .map_err(|source| fail(step, source))?;

        Ok(Published {
            commit: commit.sha,
            page_path,
        })
    }
}

/// Record how far the transaction got before wrapping the failure. Steps
/// before `step` have already taken effect on the remote.
fn fail(step: PublishStep, source: anyhow::Error) -> PublishError {
    tracing::error!(
        %step,
        completed = step.number() - 1,
        "publish transaction aborted"
    );
    PublishError::Step { step, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_carries_step() {
        let err = fail(PublishStep::CreateCommit, anyhow::anyhow!("409 Conflict"));
        assert_eq!(err.step(), PublishStep::CreateCommit);
        assert!(err.to_string().contains("409 Conflict"));
    }

    #[test]
    fn test_commit_message_is_fixed() {
        assert_eq!(COMMIT_MESSAGE, "New snack review!");
    }

    #[test]
    fn test_page_path_derives_from_slug() {
        let review = Review {
            title: "Example Review".to_string(),
            taste: None,
            presentation: None,
            value_for_money: None,
            taste_body: None,
            presentation_body: None,
            value_for_money_body: None,
            author: "jess".to_string(),
        };
        // Mirrors the path construction at the top of publish().
        assert_eq!(format!("{}/index.html", review.slug()), "example-review/index.html");
    }
}
