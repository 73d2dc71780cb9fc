//! List-mutation rules for likes and comments, kept out of the handlers so
//! they can be checked without a database.

use uuid::Uuid;

use crate::error::ApiError;
use crate::posts::repo::Comment;

/// A user may like a post at most once. New likes go to the front.
pub fn add_like(likes: &mut Vec<Uuid>, user: Uuid) -> Result<(), ApiError> {
    if likes.contains(&user) {
        return Err(ApiError::AlreadyLiked);
    }
    likes.insert(0, user);
    Ok(())
}

pub fn remove_like(likes: &mut Vec<Uuid>, user: Uuid) -> Result<(), ApiError> {
    let idx = likes
        .iter()
        .position(|u| *u == user)
        .ok_or(ApiError::NotLiked)?;
    likes.remove(idx);
    Ok(())
}

/// New comments go to the front, matching the newest-first post ordering.
pub fn add_comment(comments: &mut Vec<Comment>, comment: Comment) {
    comments.insert(0, comment);
}

/// Remove a comment by id. Only the comment's author or the post's author
/// may remove it.
pub fn remove_comment(
    comments: &mut Vec<Comment>,
    comment_id: Uuid,
    requester: Uuid,
    post_author: Uuid,
) -> Result<(), ApiError> {
    let idx = comments
        .iter()
        .position(|c| c.id == comment_id)
        .ok_or(ApiError::NotFound("Comment"))?;
    if comments[idx].user != requester && requester != post_author {
        return Err(ApiError::NotAuthorized);
    }
    comments.remove(idx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn comment(id: Uuid, user: Uuid) -> Comment {
        Comment {
            id,
            user,
            text: "nice".into(),
            name: None,
            avatar: None,
            date: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn like_prepends_and_is_rejected_twice() {
        let earlier = Uuid::new_v4();
        let user = Uuid::new_v4();
        let mut likes = vec![earlier];

        add_like(&mut likes, user).expect("first like");
        assert_eq!(likes, vec![user, earlier]);

        let err = add_like(&mut likes, user).unwrap_err();
        assert!(matches!(err, ApiError::AlreadyLiked));
        assert_eq!(likes, vec![user, earlier], "list unchanged after refusal");
    }

    #[test]
    fn unlike_requires_an_existing_like() {
        let user = Uuid::new_v4();
        let mut likes = vec![user];
        remove_like(&mut likes, user).expect("unlike");
        assert!(likes.is_empty());

        let err = remove_like(&mut likes, user).unwrap_err();
        assert!(matches!(err, ApiError::NotLiked));
    }

    #[test]
    fn comments_are_prepended() {
        let mut comments = vec![];
        let first = comment(Uuid::new_v4(), Uuid::new_v4());
        let second = comment(Uuid::new_v4(), Uuid::new_v4());
        add_comment(&mut comments, first.clone());
        add_comment(&mut comments, second.clone());
        assert_eq!(comments[0].id, second.id);
        assert_eq!(comments[1].id, first.id);
    }

    #[test]
    fn remove_comment_by_unknown_id_is_not_found() {
        let mut comments = vec![comment(Uuid::new_v4(), Uuid::new_v4())];
        let err = remove_comment(&mut comments, Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound("Comment")));
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn comment_author_may_remove_their_comment() {
        let author = Uuid::new_v4();
        let id = Uuid::new_v4();
        let mut comments = vec![comment(id, author)];
        remove_comment(&mut comments, id, author, Uuid::new_v4()).expect("remove");
        assert!(comments.is_empty());
    }

    #[test]
    fn post_author_may_remove_any_comment() {
        let post_author = Uuid::new_v4();
        let id = Uuid::new_v4();
        let mut comments = vec![comment(id, Uuid::new_v4())];
        remove_comment(&mut comments, id, post_author, post_author).expect("remove");
        assert!(comments.is_empty());
    }

    #[test]
    fn strangers_may_not_remove_comments() {
        let id = Uuid::new_v4();
        let mut comments = vec![comment(id, Uuid::new_v4())];
        let err =
            remove_comment(&mut comments, id, Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::NotAuthorized));
        assert_eq!(comments.len(), 1);
    }
}
