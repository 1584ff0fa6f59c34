//! Summary statistics over a list of blogs.
//!
//! Every function here is a pure reduction: the input is only borrowed, nothing is retained between calls and
//! an empty list yields `0` or `None` rather than an error. Whenever two candidates tie, the one that appears
//! first in the input wins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::Blog;

/// Number of blogs written by a single author.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorCount {
    pub author: Option<String>,
    pub count: u64,
}

/// Total likes received by a single author.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorLikes {
    pub author: Option<String>,
    pub likes: u64,
}

pub fn dummy(_blogs: &[Blog]) -> u64 {
    1
}

pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs.iter().map(|blog| blog.likes).sum()
}

/// The blog with the most likes.
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs.iter().fold(None, |best, blog| match best {
        Some(current) if blog.likes <= current.likes => Some(current),
        _ => Some(blog),
    })
}

/// The author with the most blogs. Blogs without an author are counted together as their own group.
pub fn most_prolific_author(blogs: &[Blog]) -> Option<AuthorCount> {
    let (author, count) = top_author(blogs, |_| 1)?;
    Some(AuthorCount {
        author: author.map(str::to_owned),
        count,
    })
}

/// The author whose blogs have the most likes combined.
pub fn most_liked_author(blogs: &[Blog]) -> Option<AuthorLikes> {
    let (author, likes) = top_author(blogs, |blog| blog.likes)?;
    Some(AuthorLikes {
        author: author.map(str::to_owned),
        likes,
    })
}

/// Sums `weight` per author and returns the heaviest author.
///
/// Groups are kept in order of the author's first appearance so that ties resolve to the earliest author.
fn top_author(blogs: &[Blog], weight: impl Fn(&Blog) -> u64) -> Option<(Option<&str>, u64)> {
    let mut positions: HashMap<Option<&str>, usize> = HashMap::new();
    let mut groups: Vec<(Option<&str>, u64)> = Vec::new();

    for blog in blogs {
        let author = blog.author.as_deref();
        let index = *positions.entry(author).or_insert_with(|| {
            groups.push((author, 0));
            groups.len() - 1
        });
        groups[index].1 += weight(blog);
    }

    groups.into_iter().fold(None, |best, group| match best {
        Some(current) if group.1 <= current.1 => Some(current),
        _ => Some(group),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Record;

    fn blog(id: &str, title: &str, author: Option<&str>, likes: u64) -> Blog {
        let mut blog = Blog::new(
            title.to_string(),
            format!("https://example.com/{id}"),
            author.map(str::to_owned),
            likes,
        );
        blog.id = Record::new(id.to_string());
        blog
    }

    fn fixture() -> Vec<Blog> {
        vec![
            blog("5a422a851b54a676234d17f7", "React patterns", Some("Michael Chan"), 7),
            blog("5a422aa71b54a676234d17f8", "Go To Statement Considered Harmful", Some("Edsger W. Dijkstra"), 5),
            blog("5a422b3a1b54a676234d17f9", "Canonical string reduction", Some("Edsger W. Dijkstra"), 12),
            blog("5a422b891b54a676234d17fa", "First class tests", Some("Robert C. Martin"), 10),
            blog("5a422ba71b54a676234d17fb", "TDD harms architecture", Some("Robert C. Martin"), 0),
            blog("5a422bc61b54a676234d17fc", "Type wars", Some("Robert C. Martin"), 2),
        ]
    }

    #[test]
    fn dummy_returns_one() {
        assert_eq!(dummy(&[]), 1);
        assert_eq!(dummy(&fixture()), 1);
    }

    #[test]
    fn total_likes_of_empty_list_is_zero() {
        assert_eq!(total_likes(&[]), 0);
    }

    #[test]
    fn total_likes_of_one_blog_is_its_likes() {
        let blogs = [blog("1", "Type wars", Some("Robert C. Martin"), 2)];
        assert_eq!(total_likes(&blogs), 2);
    }

    #[test]
    fn total_likes_sums_every_blog() {
        let blogs = [blog("1", "a", None, 7), blog("2", "b", None, 5)];
        assert_eq!(total_likes(&blogs), 12);
        assert_eq!(total_likes(&fixture()), 36);
    }

    #[test]
    fn blog_without_likes_counts_as_zero() {
        let mut stored = serde_json::to_value(blog("1", "Untitled", Some("Anonymous"), 9)).unwrap();
        stored.as_object_mut().unwrap().remove("likes");

        let unliked: Blog = serde_json::from_value(stored).unwrap();
        assert_eq!(unliked.likes, 0);

        let blogs = vec![unliked, blog("2", "b", Some("Anonymous"), 4)];
        assert_eq!(total_likes(&blogs), 4);
        assert_eq!(favorite_blog(&blogs).map(|b| b.likes), Some(4));
        assert_eq!(
            most_liked_author(&blogs),
            Some(AuthorLikes {
                author: Some("Anonymous".into()),
                likes: 4
            })
        );
    }

    #[test]
    fn favorite_of_empty_list_is_none() {
        assert_eq!(favorite_blog(&[]), None);
    }

    #[test]
    fn favorite_of_one_blog_is_that_blog() {
        let blogs = [blog("1", "Type wars", None, 5)];
        assert_eq!(favorite_blog(&blogs), Some(&blogs[0]));
    }

    #[test]
    fn favorite_has_the_most_likes() {
        let blogs = [
            blog("1", "a", Some("A"), 7),
            blog("2", "b", Some("B"), 12),
            blog("3", "c", Some("C"), 10),
        ];

        let favorite = favorite_blog(&blogs).unwrap();
        assert_eq!(favorite.likes, 12);
        assert_eq!(favorite.author.as_deref(), Some("B"));
    }

    #[test]
    fn favorite_tie_goes_to_the_first_blog() {
        let blogs = [blog("1", "first", None, 5), blog("2", "second", None, 5)];
        assert_eq!(favorite_blog(&blogs).unwrap().id.key(), "1");
    }

    #[test]
    fn favorite_likes_equal_the_maximum() {
        let blogs = fixture();
        let max = blogs.iter().map(|b| b.likes).max();

        for len in 1..=blogs.len() {
            let prefix = &blogs[..len];
            let expected = prefix.iter().map(|b| b.likes).max();
            assert_eq!(favorite_blog(prefix).map(|b| b.likes), expected);
        }
        assert_eq!(favorite_blog(&blogs).map(|b| b.likes), max);
    }

    #[test]
    fn most_prolific_author_of_fixture() {
        assert_eq!(
            most_prolific_author(&fixture()),
            Some(AuthorCount {
                author: Some("Robert C. Martin".into()),
                count: 3
            })
        );
    }

    #[test]
    fn most_prolific_author_of_empty_list_is_none() {
        assert_eq!(most_prolific_author(&[]), None);
    }

    #[test]
    fn most_prolific_tie_goes_to_first_seen_author() {
        let blogs = [
            blog("1", "a", Some("Chan"), 1),
            blog("2", "b", Some("Dijkstra"), 1),
            blog("3", "c", Some("Dijkstra"), 1),
            blog("4", "d", Some("Chan"), 1),
        ];

        assert_eq!(
            most_prolific_author(&blogs).unwrap().author.as_deref(),
            Some("Chan")
        );
    }

    #[test]
    fn anonymous_blogs_form_their_own_group() {
        let blogs = [
            blog("1", "a", None, 1),
            blog("2", "b", Some(""), 1),
            blog("3", "c", None, 1),
        ];

        assert_eq!(
            most_prolific_author(&blogs),
            Some(AuthorCount {
                author: None,
                count: 2
            })
        );
    }

    #[test]
    fn most_liked_author_of_fixture() {
        assert_eq!(
            most_liked_author(&fixture()),
            Some(AuthorLikes {
                author: Some("Edsger W. Dijkstra".into()),
                likes: 17
            })
        );
    }

    #[test]
    fn most_liked_author_of_empty_list_is_none() {
        assert_eq!(most_liked_author(&[]), None);
    }

    #[test]
    fn most_liked_tie_goes_to_first_seen_author() {
        let blogs = [
            blog("1", "a", Some("Martin"), 4),
            blog("2", "b", Some("Chan"), 10),
            blog("3", "c", Some("Martin"), 6),
        ];

        assert_eq!(
            most_liked_author(&blogs),
            Some(AuthorLikes {
                author: Some("Martin".into()),
                likes: 10
            })
        );
    }

    #[test]
    fn repeated_calls_agree_and_leave_input_alone() {
        let blogs = fixture();
        let before = blogs.clone();

        assert_eq!(total_likes(&blogs), total_likes(&blogs));
        assert_eq!(favorite_blog(&blogs), favorite_blog(&blogs));
        assert_eq!(most_prolific_author(&blogs), most_prolific_author(&blogs));
        assert_eq!(most_liked_author(&blogs), most_liked_author(&blogs));
        assert_eq!(blogs, before);
    }
}
