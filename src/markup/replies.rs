//! Reply index
//!
//!     Tokenizing a post yields the ids it links to. A thread view wants the inverse: for each
//!     post, which posts reply to it. [ReplyIndex] builds that mapping from the reference lists
//!     of every post in a thread and keeps it current as new posts arrive.
//!
//!     Only posts registered with the index get an entry. Links to posts outside the thread
//!     (or to ids that do not exist) are skipped, never created.

use crate::markup::tokenizer::tokenize;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReplyIndex {
    replies: BTreeMap<u64, Vec<u64>>,
}

impl ReplyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index for a whole thread from `(post id, references)` pairs.
    ///
    /// All posts are registered before any link is recorded, so a reply that appears before
    /// the post it quotes is still indexed.
    pub fn build<I, R>(posts: I) -> Self
    where
        I: IntoIterator<Item = (u64, R)>,
        R: AsRef<[u64]>,
    {
        let posts: Vec<(u64, R)> = posts.into_iter().collect();
        let mut index = Self::new();
        for (post, _) in &posts {
            index.register(*post);
        }
        for (post, references) in &posts {
            index.link(*post, references.as_ref());
        }
        index
    }

    /// Tokenize every `(post id, message)` pair and build the index from the results.
    pub fn from_messages<'m, I>(posts: I) -> Self
    where
        I: IntoIterator<Item = (u64, &'m str)>,
    {
        Self::build(
            posts
                .into_iter()
                .map(|(post, message)| (post, tokenize(message).references)),
        )
    }

    /// Start tracking replies to `post`. Registering twice keeps the existing replies.
    pub fn register(&mut self, post: u64) {
        self.replies.entry(post).or_default();
    }

    /// Record `reply` as a reply to each registered post in `references`.
    pub fn link(&mut self, reply: u64, references: &[u64]) {
        for target in references {
            let Some(replies) = self.replies.get_mut(target) else {
                log::trace!("post {reply} links to unknown post {target}");
                continue;
            };
            if !replies.contains(&reply) {
                replies.push(reply);
            }
        }
    }

    /// Add a newly arrived post: register it, then record its links.
    pub fn insert(&mut self, post: u64, references: &[u64]) {
        self.register(post);
        self.link(post, references);
    }

    /// Posts replying to `post`, in the order they were linked. Empty for unknown posts.
    pub fn replies_to(&self, post: u64) -> &[u64] {
        self.replies.get(&post).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, post: u64) -> bool {
        self.replies.contains_key(&post)
    }

    /// Number of registered posts.
    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    /// Registered posts and their replies, ordered by post id.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[u64])> + '_ {
        self.replies
            .iter()
            .map(|(post, replies)| (*post, replies.as_slice()))
    }
}
