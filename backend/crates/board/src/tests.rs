//! Unit tests for Board crate

#[cfg(test)]
mod fixtures {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use kernel::id::UserId;

    use crate::domain::entity::post::{Post, PostDraft};
    use crate::domain::guard::Actor;
    use crate::domain::value_object::author::AuthorSnapshot;

    pub fn actor(name: &str) -> Actor {
        Actor {
            user_id: UserId::new(),
            display_name: name.to_string(),
            avatar_url: Some(format!("https://img.example/{name}.png")),
        }
    }

    pub fn draft(category_id: &str, title: &str) -> PostDraft {
        PostDraft {
            category_id: category_id.to_string(),
            title: title.to_string(),
            content: "<p>Day one</p>".to_string(),
            excerpt: "Day one".to_string(),
            tags: vec!["travel".to_string()],
            thumbnail_url: None,
        }
    }

    pub fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    /// A post with a fixed creation time
    pub fn post_at(author: &Actor, draft: PostDraft, minutes: i64) -> Post {
        let mut post = Post::new(draft, AuthorSnapshot::of(author), 200).unwrap();
        post.created_at = at(minutes);
        post.updated_at = at(minutes);
        post
    }
}

#[cfg(test)]
mod post_tests {
    use std::sync::Arc;

    use kernel::id::PostId;

    use super::fixtures::{actor, draft};
    use crate::application::{
        BoardConfig, CreatePostUseCase, DeletePostUseCase, GetPostUseCase, UpdatePostUseCase,
    };
    use crate::domain::entity::{comment::Comment, post::PostPatch};
    use crate::domain::repository::{CommentRepository, PostRepository};
    use crate::domain::value_object::author::AuthorSnapshot;
    use crate::error::BoardError;
    use crate::infra::memory::InMemoryBoardRepository;

    fn setup() -> (Arc<InMemoryBoardRepository>, Arc<BoardConfig>) {
        (
            Arc::new(InMemoryBoardRepository::new()),
            Arc::new(BoardConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_create_snapshots_author() {
        let (repo, config) = setup();
        let alice = actor("Alice");

        let post = CreatePostUseCase::new(repo.clone(), config)
            .execute(&alice, draft("bucket", "  Kyoto  "))
            .await
            .unwrap();

        assert_eq!(post.title, "Kyoto");
        assert_eq!(post.author.author_id, alice.user_id);
        assert_eq!(post.author.display_name, "Alice");
        assert_eq!(post.author.avatar_url, alice.avatar_url);
        assert_eq!(post.likes_count(), 0);

        let stored = GetPostUseCase::new(repo).execute(&post.post_id).await.unwrap();
        assert_eq!(stored.title, "Kyoto");
    }

    #[tokio::test]
    async fn test_create_requires_display_name() {
        let (repo, config) = setup();
        let nameless = actor("   ");

        let err = CreatePostUseCase::new(repo, config)
            .execute(&nameless, draft("bucket", "T"))
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::DisplayNameRequired));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields() {
        let (repo, config) = setup();
        let uc = CreatePostUseCase::new(repo, config);

        let err = uc.execute(&actor("Alice"), draft("bucket", " ")).await.unwrap_err();
        assert!(matches!(err, BoardError::InvalidInput(_)));

        let err = uc.execute(&actor("Alice"), draft("", "T")).await.unwrap_err();
        assert!(matches!(err, BoardError::InvalidInput(_)));

        let long_title = "x".repeat(201);
        let err = uc
            .execute(&actor("Alice"), draft("bucket", &long_title))
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_by_owner_applies_patch() {
        let (repo, config) = setup();
        let alice = actor("Alice");
        let post = CreatePostUseCase::new(repo.clone(), config.clone())
            .execute(&alice, draft("bucket", "T"))
            .await
            .unwrap();

        let patch = PostPatch {
            title: Some("Osaka".into()),
            tags: Some(vec![" food ".into(), "food".into(), "".into()]),
            ..Default::default()
        };
        let updated = UpdatePostUseCase::new(repo.clone(), config)
            .execute(&post.post_id, &alice, patch)
            .await
            .unwrap();

        assert_eq!(updated.title, "Osaka");
        assert_eq!(updated.tags, vec!["food".to_string()]);
        assert_eq!(updated.category_id, "bucket");
        assert_eq!(updated.author, post.author);
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden_regardless_of_payload() {
        let (repo, config) = setup();
        let alice = actor("Alice");
        let bob = actor("Bob");
        let post = CreatePostUseCase::new(repo.clone(), config.clone())
            .execute(&alice, draft("bucket", "T"))
            .await
            .unwrap();

        let invalid = PostPatch {
            title: Some("   ".into()),
            ..Default::default()
        };
        let err = UpdatePostUseCase::new(repo.clone(), config)
            .execute(&post.post_id, &bob, invalid)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::NotOwner));

        let err = DeletePostUseCase::new(repo.clone())
            .execute(&post.post_id, &bob)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::NotOwner));

        assert!(PostRepository::find_by_id(repo.as_ref(), &post.post_id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_unknown_post_is_not_found() {
        let (repo, config) = setup();
        let missing = PostId::new();

        let err = GetPostUseCase::new(repo.clone()).execute(&missing).await.unwrap_err();
        assert!(matches!(err, BoardError::PostNotFound));

        let err = UpdatePostUseCase::new(repo.clone(), config)
            .execute(&missing, &actor("Alice"), PostPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::PostNotFound));

        let err = DeletePostUseCase::new(repo)
            .execute(&missing, &actor("Alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::PostNotFound));
    }

    #[tokio::test]
    async fn test_delete_post_leaves_comments() {
        let (repo, config) = setup();
        let alice = actor("Alice");
        let post = CreatePostUseCase::new(repo.clone(), config)
            .execute(&alice, draft("bucket", "T"))
            .await
            .unwrap();
        let comment =
            Comment::new(post.post_id, None, AuthorSnapshot::of(&alice), "Nice", 1000).unwrap();
        CommentRepository::create(repo.as_ref(), &comment).await.unwrap();

        DeletePostUseCase::new(repo.clone())
            .execute(&post.post_id, &alice)
            .await
            .unwrap();

        assert!(PostRepository::find_by_id(repo.as_ref(), &post.post_id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(repo.find_by_post(&post.post_id).await.unwrap().len(), 1);
    }
}

#[cfg(test)]
mod feed_tests {
    use std::sync::Arc;

    use super::fixtures::{actor, draft, post_at};
    use crate::application::{BoardConfig, FeedQuery, FindPostsUseCase};
    use crate::domain::entity::post::Post;
    use crate::domain::repository::PostRepository;
    use crate::domain::value_object::feed_query::SortBy;
    use crate::infra::memory::InMemoryBoardRepository;

    async fn seeded(posts: Vec<Post>) -> FindPostsUseCase<InMemoryBoardRepository> {
        let repo = Arc::new(InMemoryBoardRepository::new());
        for post in &posts {
            repo.create(post).await.unwrap();
        }
        FindPostsUseCase::new(repo, Arc::new(BoardConfig::default()))
    }

    fn page(n: i64) -> FeedQuery {
        FeedQuery {
            page: n,
            ..Default::default()
        }
    }

    fn search(term: &str) -> FeedQuery {
        FeedQuery {
            search: Some(term.to_string()),
            page: 1,
            ..Default::default()
        }
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_second_page_of_ten() {
        let alice = actor("Alice");
        let posts = (0..10)
            .map(|i| post_at(&alice, draft("bucket", &format!("P{i}")), i))
            .collect();
        let uc = seeded(posts).await;

        let result = uc.execute(page(2)).await.unwrap();
        assert_eq!(result.items.len(), 4);
        assert_eq!(result.total, 10);
        assert_eq!(result.page, 2);
        assert_eq!(result.limit, 6);
        assert_eq!(result.total_pages, 2);
        // Latest first: page 2 holds the four oldest
        assert_eq!(titles(&result.items), vec!["P3", "P2", "P1", "P0"]);
    }

    #[tokio::test]
    async fn test_requested_page_is_clamped() {
        let alice = actor("Alice");
        let posts = (0..7)
            .map(|i| post_at(&alice, draft("bucket", &format!("P{i}")), i))
            .collect();
        let uc = seeded(posts).await;

        let beyond = uc.execute(page(99)).await.unwrap();
        assert_eq!(beyond.page, 2);
        assert_eq!(beyond.items.len(), 1);

        let below = uc.execute(page(-3)).await.unwrap();
        assert_eq!(below.page, 1);
        assert_eq!(below.items.len(), 6);
    }

    #[tokio::test]
    async fn test_empty_feed_has_one_page() {
        let uc = seeded(Vec::new()).await;
        let result = uc.execute(page(5)).await.unwrap();
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.page, 1);
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_across_fields() {
        let alice = actor("Alice");
        let mut by_tag = draft("bucket", "Tagged");
        by_tag.tags = vec!["Onsen".into()];
        let mut by_excerpt = draft("bucket", "Excerpted");
        by_excerpt.excerpt = "an ONSEN evening".into();
        let uc = seeded(vec![
            post_at(&alice, draft("bucket", "Hakone onsen"), 1),
            post_at(&alice, by_tag, 2),
            post_at(&alice, by_excerpt, 3),
            post_at(&alice, draft("bucket", "Ramen"), 4),
        ])
        .await;

        let result = uc.execute(search("OnSeN")).await.unwrap();
        assert_eq!(result.total, 3);
        assert_eq!(titles(&result.items), vec!["Excerpted", "Tagged", "Hakone onsen"]);
    }

    #[tokio::test]
    async fn test_search_matches_metacharacters_literally() {
        let alice = actor("Alice");
        let uc = seeded(vec![
            post_at(&alice, draft("bucket", "version a.b* notes"), 1),
            post_at(&alice, draft("bucket", "aXbbb"), 2),
            post_at(&alice, draft("bucket", "100% fun_trip"), 3),
        ])
        .await;

        let result = uc.execute(search("a.b*")).await.unwrap();
        assert_eq!(titles(&result.items), vec!["version a.b* notes"]);

        let result = uc.execute(search("0% f")).await.unwrap();
        assert_eq!(titles(&result.items), vec!["100% fun_trip"]);

        assert_eq!(uc.execute(search("_")).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() {
        let alice = actor("Alice");
        let uc = seeded(vec![post_at(&alice, draft("bucket", "A"), 1)]).await;
        assert_eq!(uc.execute(search("   ")).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_category_and_author_filters() {
        let alice = actor("Alice");
        let bob = actor("Bob");
        let uc = seeded(vec![
            post_at(&alice, draft("bucket", "A1"), 1),
            post_at(&alice, draft("food", "A2"), 2),
            post_at(&bob, draft("bucket", "B1"), 3),
        ])
        .await;

        let query = FeedQuery {
            page: 1,
            category_id: Some(" bucket ".into()),
            author_id: Some(alice.user_id.to_string()),
            ..Default::default()
        };
        let result = uc.execute(query).await.unwrap();
        assert_eq!(titles(&result.items), vec!["A1"]);

        let query = FeedQuery {
            page: 1,
            author_id: Some("not-a-user".into()),
            ..Default::default()
        };
        let result = uc.execute(query).await.unwrap();
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 1);
    }

    #[tokio::test]
    async fn test_popular_sort_breaks_ties_by_recency() {
        let alice = actor("Alice");
        let fans: Vec<_> = (0..3).map(|i| actor(&format!("fan{i}"))).collect();

        let mut old_hit = post_at(&alice, draft("bucket", "old hit"), 1);
        let mut new_hit = post_at(&alice, draft("bucket", "new hit"), 2);
        let mut star = post_at(&alice, draft("bucket", "star"), 3);
        let quiet = post_at(&alice, draft("bucket", "quiet"), 4);
        for fan in &fans[..2] {
            old_hit.like(fan.user_id);
            new_hit.like(fan.user_id);
        }
        for fan in &fans {
            star.like(fan.user_id);
        }

        let uc = seeded(vec![old_hit, new_hit, star, quiet]).await;

        let popular = FeedQuery {
            page: 1,
            sort_by: SortBy::Popular,
            ..Default::default()
        };
        let result = uc.execute(popular).await.unwrap();
        assert_eq!(
            titles(&result.items),
            vec!["star", "new hit", "old hit", "quiet"]
        );

        let latest = uc.execute(page(1)).await.unwrap();
        assert_eq!(
            titles(&latest.items),
            vec!["quiet", "star", "new hit", "old hit"]
        );
    }
}

#[cfg(test)]
mod comment_tests {
    use std::sync::Arc;

    use kernel::id::{CommentId, PostId};

    use super::fixtures::{actor, draft};
    use crate::application::{
        BoardConfig, CreateCommentInput, CreateCommentUseCase, CreatePostUseCase,
        DeleteCommentUseCase, ListCommentsUseCase, UpdateCommentUseCase,
    };
    use crate::domain::entity::{comment::Comment, post::Post};
    use crate::domain::guard::Actor;
    use crate::domain::repository::CommentRepository;
    use crate::error::BoardError;
    use crate::infra::memory::InMemoryBoardRepository;

    struct Board {
        repo: Arc<InMemoryBoardRepository>,
        config: Arc<BoardConfig>,
    }

    impl Board {
        fn new() -> Self {
            Self {
                repo: Arc::new(InMemoryBoardRepository::new()),
                config: Arc::new(BoardConfig::default()),
            }
        }

        async fn post(&self, author: &Actor) -> Post {
            CreatePostUseCase::new(self.repo.clone(), self.config.clone())
                .execute(author, draft("bucket", "T"))
                .await
                .unwrap()
        }

        async fn try_comment(
            &self,
            post_id: &PostId,
            author: &Actor,
            content: &str,
            parent: Option<String>,
        ) -> Result<Comment, BoardError> {
            CreateCommentUseCase::new(self.repo.clone(), self.config.clone())
                .execute(
                    post_id,
                    author,
                    CreateCommentInput {
                        content: content.to_string(),
                        parent_id: parent,
                    },
                )
                .await
        }

        async fn reply(&self, post_id: &PostId, author: &Actor, parent: Option<CommentId>) -> Comment {
            self.try_comment(post_id, author, "reply", parent.map(|p| p.to_string()))
                .await
                .unwrap()
        }

        async fn delete(&self, post_id: &PostId, comment_id: &CommentId, actor: &Actor) -> Result<u64, BoardError> {
            DeleteCommentUseCase::new(self.repo.clone())
                .execute(post_id, comment_id, actor)
                .await
        }

        async fn ids(&self, post_id: &PostId) -> Vec<CommentId> {
            let mut ids: Vec<CommentId> = ListCommentsUseCase::new(self.repo.clone())
                .execute(post_id)
                .await
                .unwrap()
                .into_iter()
                .map(|c| c.comment_id)
                .collect();
            ids.sort();
            ids
        }
    }

    fn sorted(mut ids: Vec<CommentId>) -> Vec<CommentId> {
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn test_deleting_parent_removes_reply() {
        let board = Board::new();
        let alice = actor("Alice");
        let bob = actor("Bob");
        let post = board.post(&alice).await;

        let c1 = board.reply(&post.post_id, &bob, None).await;
        board.reply(&post.post_id, &bob, Some(c1.comment_id)).await;

        // Only the author may delete
        let err = board.delete(&post.post_id, &c1.comment_id, &alice).await.unwrap_err();
        assert!(matches!(err, BoardError::NotOwner));

        let deleted = board.delete(&post.post_id, &c1.comment_id, &bob).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(board.ids(&post.post_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_cascade_removes_exactly_the_subtree() {
        let board = Board::new();
        let bob = actor("Bob");
        let post = board.post(&bob).await;
        let pid = post.post_id;

        // a ─┬─ b ── d ── f
        //    └─ c ── e
        // s ── t
        let a = board.reply(&pid, &bob, None).await.comment_id;
        let b = board.reply(&pid, &bob, Some(a)).await.comment_id;
        let c = board.reply(&pid, &bob, Some(a)).await.comment_id;
        let d = board.reply(&pid, &bob, Some(b)).await.comment_id;
        board.reply(&pid, &bob, Some(c)).await;
        board.reply(&pid, &bob, Some(d)).await;
        let s = board.reply(&pid, &bob, None).await.comment_id;
        let t = board.reply(&pid, &bob, Some(s)).await.comment_id;

        assert_eq!(board.delete(&pid, &a, &bob).await.unwrap(), 6);
        assert_eq!(board.ids(&pid).await, sorted(vec![s, t]));
    }

    #[tokio::test]
    async fn test_deleting_leaf_removes_one() {
        let board = Board::new();
        let bob = actor("Bob");
        let post = board.post(&bob).await;
        let pid = post.post_id;

        let root = board.reply(&pid, &bob, None).await.comment_id;
        let leaf = board.reply(&pid, &bob, Some(root)).await.comment_id;
        let sibling = board.reply(&pid, &bob, Some(root)).await.comment_id;

        assert_eq!(board.delete(&pid, &leaf, &bob).await.unwrap(), 1);
        assert_eq!(board.ids(&pid).await, sorted(vec![root, sibling]));
    }

    #[tokio::test]
    async fn test_cascade_stays_inside_the_post() {
        let board = Board::new();
        let bob = actor("Bob");
        let first = board.post(&bob).await;
        let second = board.post(&bob).await;

        let root = board.reply(&first.post_id, &bob, None).await.comment_id;
        let other = board.reply(&second.post_id, &bob, None).await.comment_id;

        let err = board.delete(&second.post_id, &root, &bob).await.unwrap_err();
        assert!(matches!(err, BoardError::CommentNotFound));

        board.delete(&first.post_id, &root, &bob).await.unwrap();
        assert_eq!(board.ids(&second.post_id).await, vec![other]);
    }

    #[tokio::test]
    async fn test_bulk_delete_refuses_to_orphan_a_reply() {
        let board = Board::new();
        let bob = actor("Bob");
        let pid = board.post(&bob).await.post_id;

        let root = board.reply(&pid, &bob, None).await.comment_id;
        let late = board.reply(&pid, &bob, Some(root)).await.comment_id;

        // A reply that arrived after the subtree was collected.
        let err = board.repo.delete_many(&pid, &[root]).await.unwrap_err();
        assert!(matches!(err, BoardError::Internal(_)));
        assert_eq!(board.ids(&pid).await, sorted(vec![root, late]));
    }

    #[tokio::test]
    async fn test_create_validation_order() {
        let board = Board::new();
        let alice = actor("Alice");
        let nameless = actor("");
        let post = board.post(&alice).await;

        let err = board
            .try_comment(&PostId::new(), &alice, "hi", None)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::PostNotFound));

        let err = board
            .try_comment(&post.post_id, &nameless, "   ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidInput(_)));

        let err = board
            .try_comment(&post.post_id, &nameless, "hi", None)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::DisplayNameRequired));

        let too_long = "x".repeat(1001);
        let err = board
            .try_comment(&post.post_id, &alice, &too_long, None)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_parent_must_belong_to_same_post() {
        let board = Board::new();
        let alice = actor("Alice");
        let first = board.post(&alice).await;
        let second = board.post(&alice).await;
        let foreign = board.reply(&second.post_id, &alice, None).await;

        for parent in [
            foreign.comment_id.to_string(),
            CommentId::new().to_string(),
            "garbage".to_string(),
        ] {
            let err = board
                .try_comment(&first.post_id, &alice, "hi", Some(parent))
                .await
                .unwrap_err();
            assert!(matches!(err, BoardError::ParentNotFound));
        }

        let top = board
            .try_comment(&first.post_id, &alice, "  hi  ", Some("  ".into()))
            .await
            .unwrap();
        assert_eq!(top.parent_id, None);
        assert_eq!(top.content, "hi");
    }

    #[tokio::test]
    async fn test_update_by_owner_only() {
        let board = Board::new();
        let alice = actor("Alice");
        let bob = actor("Bob");
        let post = board.post(&alice).await;
        let comment = board.reply(&post.post_id, &bob, None).await;
        let uc = UpdateCommentUseCase::new(board.repo.clone(), board.config.clone());

        let err = uc
            .execute(&post.post_id, &comment.comment_id, &alice, "")
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::NotOwner));

        let edited = uc
            .execute(&post.post_id, &comment.comment_id, &bob, " edited ")
            .await
            .unwrap();
        assert_eq!(edited.content, "edited");
        assert!(edited.updated_at.is_some());

        let listed = ListCommentsUseCase::new(board.repo.clone())
            .execute(&post.post_id)
            .await
            .unwrap();
        assert_eq!(listed[0].content, "edited");
    }

    #[tokio::test]
    async fn test_list_for_unknown_post_is_not_found() {
        let board = Board::new();
        let err = ListCommentsUseCase::new(board.repo.clone())
            .execute(&PostId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::PostNotFound));
    }

    #[tokio::test]
    async fn test_tree_groups_replies_under_parents() {
        let board = Board::new();
        let alice = actor("Alice");
        let post = board.post(&alice).await;
        let root = board.reply(&post.post_id, &alice, None).await;
        let child = board.reply(&post.post_id, &alice, Some(root.comment_id)).await;

        let tree = ListCommentsUseCase::new(board.repo.clone())
            .tree(&post.post_id)
            .await
            .unwrap();
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].comment_id, root.comment_id);
        assert_eq!(tree.children_of(&root.comment_id)[0].comment_id, child.comment_id);
        assert!(tree.children_of(&child.comment_id).is_empty());
    }
}

#[cfg(test)]
mod like_tests {
    use std::sync::Arc;

    use super::fixtures::{actor, draft};
    use crate::application::{
        BoardConfig, CreateCommentInput, CreateCommentUseCase, CreatePostUseCase, LikeAction,
        ToggleCommentLikeUseCase, TogglePostLikeUseCase,
    };
    use crate::domain::repository::PostRepository;
    use crate::error::BoardError;
    use crate::infra::memory::InMemoryBoardRepository;

    #[tokio::test]
    async fn test_post_like_is_idempotent() {
        let repo = Arc::new(InMemoryBoardRepository::new());
        let alice = actor("Alice");
        let bob = actor("Bob");
        let post = CreatePostUseCase::new(repo.clone(), Arc::new(BoardConfig::default()))
            .execute(&alice, draft("bucket", "T"))
            .await
            .unwrap();
        let uc = TogglePostLikeUseCase::new(repo.clone());

        // Unlike on a never-liked post is a no-op
        let never = uc.execute(&post.post_id, bob.user_id, LikeAction::Unlike).await.unwrap();
        assert_eq!(never.likes_count(), 0);

        let once = uc.execute(&post.post_id, bob.user_id, LikeAction::Like).await.unwrap();
        let twice = uc.execute(&post.post_id, bob.user_id, LikeAction::Like).await.unwrap();
        assert_eq!(once.likes, twice.likes);
        assert_eq!(twice.likes_count(), 1);

        let stored = repo.find_by_id(&post.post_id).await.unwrap().unwrap();
        assert!(stored.likes.contains(&bob.user_id));

        let back = uc.execute(&post.post_id, bob.user_id, LikeAction::Unlike).await.unwrap();
        assert_eq!(back.likes, post.likes);
    }

    #[tokio::test]
    async fn test_like_needs_no_display_name() {
        let repo = Arc::new(InMemoryBoardRepository::new());
        let alice = actor("Alice");
        let nameless = actor("");
        let post = CreatePostUseCase::new(repo.clone(), Arc::new(BoardConfig::default()))
            .execute(&alice, draft("bucket", "T"))
            .await
            .unwrap();

        let liked = TogglePostLikeUseCase::new(repo)
            .execute(&post.post_id, nameless.user_id, LikeAction::Like)
            .await
            .unwrap();
        assert_eq!(liked.likes_count(), 1);
    }

    #[tokio::test]
    async fn test_comment_like_is_idempotent_and_scoped() {
        let repo = Arc::new(InMemoryBoardRepository::new());
        let config = Arc::new(BoardConfig::default());
        let alice = actor("Alice");
        let bob = actor("Bob");
        let post = CreatePostUseCase::new(repo.clone(), config.clone())
            .execute(&alice, draft("bucket", "T"))
            .await
            .unwrap();
        let other = CreatePostUseCase::new(repo.clone(), config.clone())
            .execute(&alice, draft("bucket", "U"))
            .await
            .unwrap();
        let comment = CreateCommentUseCase::new(repo.clone(), config)
            .execute(
                &post.post_id,
                &alice,
                CreateCommentInput {
                    content: "hi".into(),
                    parent_id: None,
                },
            )
            .await
            .unwrap();
        let uc = ToggleCommentLikeUseCase::new(repo);

        uc.execute(&post.post_id, &comment.comment_id, bob.user_id, LikeAction::Like)
            .await
            .unwrap();
        let liked = uc
            .execute(&post.post_id, &comment.comment_id, bob.user_id, LikeAction::Like)
            .await
            .unwrap();
        assert_eq!(liked.likes_count(), 1);

        let err = uc
            .execute(&other.post_id, &comment.comment_id, bob.user_id, LikeAction::Like)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::CommentNotFound));

        let unliked = uc
            .execute(&post.post_id, &comment.comment_id, bob.user_id, LikeAction::Unlike)
            .await
            .unwrap();
        assert!(unliked.likes.is_empty());
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use identity::domain::value_object::{
        credential::AuthProvider,
        display_name::DisplayName,
        email::Email,
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use identity::{FederatedProfile, IdentityConfig, SessionTokenService, User};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::BoardConfig;
    use crate::infra::memory::InMemoryBoardRepository;
    use crate::presentation::router::board_router_generic;

    struct TestApp {
        app: Router,
        sessions: SessionTokenService,
    }

    impl TestApp {
        fn new() -> Self {
            let sessions = SessionTokenService::new(&IdentityConfig::with_random_secret());
            let board = board_router_generic(
                InMemoryBoardRepository::new(),
                BoardConfig::default(),
                sessions.clone(),
            );
            Self {
                app: Router::new().nest("/posts", board),
                sessions,
            }
        }

        fn token_for(&self, name: &str) -> String {
            let raw = RawPassword::new("pw123456".into()).unwrap();
            let user = User::new_local(
                UserName::new(name).unwrap(),
                Email::new(format!("{name}@x.com")).unwrap(),
                DisplayName::new(name).unwrap(),
                UserPassword::from_raw(&raw, None).unwrap(),
            );
            self.sessions.issue(&user).unwrap().token
        }

        /// Fresh federated account that has not picked a display name yet
        fn token_without_display_name(&self) -> String {
            let user = User::new_federated(FederatedProfile {
                provider: AuthProvider::Google,
                provider_id: "g-1".into(),
                email: "g@x.com".into(),
                display_name_hint: Some("Gee".into()),
                avatar_url: None,
            });
            self.sessions.issue(&user).unwrap().token
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let req = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let res = self.app.clone().oneshot(req).await.unwrap();
            let status = res.status();
            let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, body)
        }
    }

    fn post_body(title: &str) -> Value {
        json!({
            "categoryId": "bucket",
            "title": title,
            "content": "<p>Day one</p>",
            "excerpt": "Day one",
            "tags": ["travel"]
        })
    }

    #[tokio::test]
    async fn test_post_lifecycle() {
        let t = TestApp::new();
        let alice = t.token_for("alice");
        let bob = t.token_for("bob");

        let (status, _) = t.send("POST", "/posts", None, Some(post_body("T"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, post) = t.send("POST", "/posts", Some(&alice), Some(post_body("T"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(post["author"], "alice");
        assert_eq!(post["likesCount"], 0);
        let id = post["id"].as_str().unwrap().to_string();

        let (status, body) = t.send("GET", &format!("/posts/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "T");

        let (status, body) = t
            .send("PATCH", &format!("/posts/{id}"), Some(&bob), Some(json!({ "title": "X" })))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");

        let (status, body) = t
            .send("PATCH", &format!("/posts/{id}"), Some(&alice), Some(json!({ "title": "Kyoto" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Kyoto");

        let (status, body) = t.send("POST", &format!("/posts/{id}/likes"), Some(&bob), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likesCount"], 1);
        let (_, body) = t.send("POST", &format!("/posts/{id}/likes"), Some(&bob), None).await;
        assert_eq!(body["likesCount"], 1);
        let (_, body) = t.send("DELETE", &format!("/posts/{id}/likes"), Some(&bob), None).await;
        assert_eq!(body["likesCount"], 0);

        let (status, _) = t.send("DELETE", &format!("/posts/{id}"), Some(&bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = t.send("DELETE", &format!("/posts/{id}"), Some(&alice), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = t.send("GET", &format!("/posts/{id}"), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let t = TestApp::new();
        let (status, _) = t.send("GET", "/posts/not-a-uuid", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_profile_setup_required_before_writing() {
        let t = TestApp::new();
        let token = t.token_without_display_name();
        let (status, _) = t.send("POST", "/posts", Some(&token), Some(post_body("T"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_feed_pagination_over_http() {
        let t = TestApp::new();
        let alice = t.token_for("alice");
        for i in 0..10 {
            let (status, _) = t
                .send("POST", "/posts", Some(&alice), Some(post_body(&format!("P{i}"))))
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = t.send("GET", "/posts?page=2&limit=6", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), 4);
        assert_eq!(body["total"], 10);
        assert_eq!(body["page"], 2);
        assert_eq!(body["limit"], 6);
        assert_eq!(body["totalPages"], 2);

        let (_, body) = t.send("GET", "/posts?page=abc&limit=100", None, None).await;
        assert_eq!(body["page"], 1);
        assert_eq!(body["items"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_reply_thread_is_removed_with_its_root() {
        let t = TestApp::new();
        let alice = t.token_for("alice");
        let bob = t.token_for("bob");

        let (_, post) = t.send("POST", "/posts", Some(&alice), Some(post_body("T"))).await;
        let pid = post["id"].as_str().unwrap().to_string();
        let comments = format!("/posts/{pid}/comments");

        let (status, c1) = t
            .send("POST", &comments, Some(&bob), Some(json!({ "content": "first" })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let c1_id = c1["id"].as_str().unwrap().to_string();
        assert_eq!(c1["parentId"], Value::Null);

        let (status, c2) = t
            .send(
                "POST",
                &comments,
                Some(&bob),
                Some(json!({ "content": "second", "parentId": c1_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(c2["parentId"], c1_id.as_str());

        let (status, tree) = t.send("GET", &format!("{comments}/tree"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tree["roots"].as_array().unwrap().len(), 1);
        assert_eq!(tree["children"][&c1_id].as_array().unwrap().len(), 1);

        let (status, _) = t
            .send("DELETE", &format!("{comments}/{c1_id}"), Some(&alice), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = t
            .send("DELETE", &format!("{comments}/{c1_id}"), Some(&bob), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = t.send("GET", &comments, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_comment_edit_and_likes() {
        let t = TestApp::new();
        let alice = t.token_for("alice");
        let bob = t.token_for("bob");

        let (_, post) = t.send("POST", "/posts", Some(&alice), Some(post_body("T"))).await;
        let pid = post["id"].as_str().unwrap().to_string();
        let comments = format!("/posts/{pid}/comments");
        let (_, c) = t
            .send("POST", &comments, Some(&alice), Some(json!({ "content": "hi" })))
            .await;
        let cid = c["id"].as_str().unwrap().to_string();

        let (status, body) = t
            .send("PATCH", &format!("{comments}/{cid}"), Some(&alice), Some(json!({ "content": "hello" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "hello");

        let (status, body) = t
            .send("POST", &format!("{comments}/{cid}/likes"), Some(&bob), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likesCount"], 1);

        let (status, _) = t
            .send("POST", &format!("{comments}/not-a-uuid/likes"), Some(&bob), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = t
            .send("POST", &comments, Some(&bob), Some(json!({ "content": "x", "parentId": "nope" })))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
