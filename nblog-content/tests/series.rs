#![allow(clippy::expect_used, reason = "Fine in tests")]
use nblog_content::{
  Post,
  posts::{PostDate, PUBLIC_STATUS, assign_series_order, sort_newest_first},
  series::{
    DEFAULT_POSTS_PER_PAGE,
    find_current_page,
    navigation,
    paginate,
    series_data,
    summary,
  },
};

fn post(id: &str, date: &str, series: Option<&str>, order: Option<u32>) -> Post {
  Post {
    id:           id.to_string(),
    title:        format!("Title {id}"),
    slug:         format!("slug-{id}"),
    summary:      None,
    status:       vec![PUBLIC_STATUS.to_string()],
    tags:         Vec::new(),
    date:         Some(PostDate {
      start_date: date.parse().expect("valid date"),
    }),
    created_time: "2023-01-01T00:00:00Z".parse().expect("valid timestamp"),
    last_edited:  None,
    series:       series.map(str::to_string),
    series_order: order,
    reading_time: None,
  }
}

fn rust_series() -> Vec<Post> {
  vec![
    post("p3", "2024-03-01", Some("rust"), None),
    post("p1", "2024-01-01", Some("rust"), None),
    post("p2", "2024-02-01", Some("rust"), None),
    post("other", "2024-02-15", Some("go"), None),
    post("loose", "2024-02-20", None, None),
  ]
}

#[test]
fn test_series_data_orders_by_date() {
  let posts = rust_series();
  let data = series_data(&posts, "p2").expect("p2 is in a series");

  assert_eq!(data.name, "rust");
  assert_eq!(data.total_count, 3);
  assert_eq!(data.current_index, 1);
  let ids: Vec<&str> = data.posts.iter().map(|p| p.id.as_str()).collect();
  assert_eq!(ids, vec!["p1", "p2", "p3"]);
  let orders: Vec<usize> = data.posts.iter().map(|p| p.order).collect();
  assert_eq!(orders, vec![1, 2, 3]);
  assert!(data.posts[1].is_current);
}

#[test]
fn test_explicit_order_wins_over_date() {
  let mut posts = rust_series();
  posts[0].series_order = Some(1); // p3
  posts[1].series_order = Some(3); // p1
  posts[2].series_order = Some(2); // p2

  let data = series_data(&posts, "p1").expect("in series");
  let ids: Vec<&str> = data.posts.iter().map(|p| p.id.as_str()).collect();
  assert_eq!(ids, vec!["p3", "p2", "p1"]);
  assert_eq!(data.current_index, 2);
}

#[test]
fn test_no_series_cases() {
  let mut posts = rust_series();
  assert!(series_data(&posts, "loose").is_none());
  assert!(series_data(&posts, "missing").is_none());
  // "go" has a single post
  assert!(series_data(&posts, "other").is_none());

  // Drafts are not listed; a draft current post has no series
  posts[1].status = vec!["Draft".to_string()];
  posts[2].status = vec!["Draft".to_string()];
  assert!(series_data(&posts, "p3").is_none());
  assert!(series_data(&posts, "p1").is_none());
}

#[test]
fn test_navigation_at_edges() {
  let posts = rust_series();

  let first = series_data(&posts, "p1").expect("in series");
  let nav = navigation(&first);
  assert!(nav.previous.is_none());
  assert_eq!(nav.current.map(|p| p.id.as_str()), Some("p1"));
  assert_eq!(nav.next.map(|p| p.id.as_str()), Some("p2"));

  let last = series_data(&posts, "p3").expect("in series");
  let nav = navigation(&last);
  assert_eq!(nav.previous.map(|p| p.id.as_str()), Some("p2"));
  assert!(nav.next.is_none());
}

#[test]
fn test_pagination() {
  let posts: Vec<Post> = (1..=12)
    .map(|i| {
      post(
        &format!("p{i:02}"),
        &format!("2024-01-{i:02}"),
        Some("long"),
        None,
      )
    })
    .collect();
  let data = series_data(&posts, "p07").expect("in series");

  let page = paginate(&data.posts, 0, DEFAULT_POSTS_PER_PAGE);
  assert_eq!(page.posts.len(), 5);
  assert_eq!(page.total_pages, 3);
  assert!(page.has_next);
  assert!(!page.has_previous);

  let last = paginate(&data.posts, 2, DEFAULT_POSTS_PER_PAGE);
  assert_eq!(last.posts.len(), 2);
  assert!(!last.has_next);
  assert!(last.has_previous);
  assert_eq!(last.total_count, 12);

  let beyond = paginate(&data.posts, 9, DEFAULT_POSTS_PER_PAGE);
  assert!(beyond.posts.is_empty());

  let far = paginate(&data.posts, usize::MAX, DEFAULT_POSTS_PER_PAGE);
  assert!(far.posts.is_empty());
  assert!(!far.has_next);
  assert!(far.has_previous);
  assert_eq!(far.current_page, usize::MAX);
  assert!(!paginate(&[], usize::MAX, 5).has_next);

  assert_eq!(find_current_page(&data.posts, "p07", 5), 1);
  assert_eq!(find_current_page(&data.posts, "p11", 5), 2);
  assert_eq!(find_current_page(&data.posts, "nope", 5), 0);
}

#[test]
fn test_summary_progress() {
  let posts = rust_series();
  let first = summary(&series_data(&posts, "p1").expect("in series"));
  assert_eq!(first.current_position, 1);
  assert_eq!(first.progress, 33);
  assert!(first.is_first);
  assert!(!first.is_last);

  let middle = summary(&series_data(&posts, "p2").expect("in series"));
  assert_eq!(middle.progress, 67);

  let last = summary(&series_data(&posts, "p3").expect("in series"));
  assert_eq!(last.progress, 100);
  assert!(last.is_last);
}

#[test]
fn test_feed_pipeline() {
  let mut posts = rust_series();
  assign_series_order(&mut posts);
  sort_newest_first(&mut posts);

  let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
  assert_eq!(ids, vec!["p3", "loose", "other", "p2", "p1"]);

  let p1 = posts.iter().find(|p| p.id == "p1").expect("present");
  assert_eq!(p1.series_order, Some(1));
  let p3 = posts.iter().find(|p| p.id == "p3").expect("present");
  assert_eq!(p3.series_order, Some(3));
}
