//! Pure helpers over an ordered post list. Every lookup matches the first
//! element carrying the requested identifier.

use blogkit_api_types::Post;

pub fn find_post<'a>(posts: &'a [Post], post_id: &str) -> Option<&'a Post> {
    posts.iter().find(|post| post.id == post_id)
}

/// Replace the first post whose id equals `post.id`, keeping its position.
/// Returns `false` and leaves the list untouched when no post matches.
pub fn replace_post(posts: &mut [Post], post: Post) -> bool {
    match posts.iter_mut().find(|existing| existing.id == post.id) {
        Some(slot) => {
            *slot = post;
            true
        }
        None => false,
    }
}

/// Remove the first post with the given id.
pub fn remove_post(posts: &mut Vec<Post>, post_id: &str) -> Option<Post> {
    let index = posts.iter().position(|post| post.id == post_id)?;
    Some(posts.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogkit_api_types::PostBody;

    fn post(id: &str, title: &str) -> Post {
        Post::new(id, PostBody::titled(title, ""))
    }

    #[test]
    fn find_returns_first_match() {
        let posts = vec![post("a", "first"), post("b", "b"), post("a", "second")];
        assert_eq!(find_post(&posts, "a").map(|p| p.body.title.as_str()), Some("first"));
        assert!(find_post(&posts, "zzz").is_none());
    }

    #[test]
    fn replace_keeps_position() {
        let mut posts = vec![post("a", "a"), post("b", "old"), post("c", "c")];
        assert!(replace_post(&mut posts, post("b", "new")));
        let titles: Vec<_> = posts.iter().map(|p| p.body.title.as_str()).collect();
        assert_eq!(titles, ["a", "new", "c"]);
    }

    #[test]
    fn replace_only_touches_first_duplicate() {
        let mut posts = vec![post("a", "one"), post("a", "two")];
        assert!(replace_post(&mut posts, post("a", "three")));
        assert_eq!(posts[0].body.title, "three");
        assert_eq!(posts[1].body.title, "two");
    }

    #[test]
    fn replace_missing_is_noop() {
        let mut posts = vec![post("a", "a")];
        let before = posts.clone();
        assert!(!replace_post(&mut posts, post("x", "x")));
        assert_eq!(posts, before);
    }

    #[test]
    fn remove_drops_first_match_only() {
        let mut posts = vec![post("a", "one"), post("b", "b"), post("a", "two")];
        let removed = remove_post(&mut posts, "a").expect("removed");
        assert_eq!(removed.body.title, "one");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].body.title, "two");
        assert!(remove_post(&mut posts, "missing").is_none());
        assert_eq!(posts.len(), 2);
    }
}
