//! Fixed HTML templates and their `##TOKEN##` substitution.
//!
//! Substitution is plain string replacement with no HTML escaping — review
//! text comes from a private, invite-only Slack channel and is inserted
//! verbatim. A field the parser could not extract leaves its token literally
//! in the output.

use crate::review::Review;

/// Detail page for one review, published at `<slug>/index.html`.
const POST_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>##TITLE##</title>
  <link rel="stylesheet" href="/styles.css">
</head>
<body>
  <a class="home" href="/">&larr; All reviews</a>
  <article class="review">
    <h1>##TITLE##</h1>
    <section>
      <h2>Taste <span class="score">##TASTESCORE##/10</span></h2>
      <p>##TASTEBODY##</p>
    </section>
    <section>
      <h2>Presentation <span class="score">##PRESENTSCORE##/10</span></h2>
      <p>##PRESENTBODY##</p>
    </section>
    <section>
      <h2>Value for Money <span class="score">##VFMSCORE##/10</span></h2>
      <p>##VFMBODY##</p>
    </section>
    <footer>
      <p>Reviewed by ##AUTHOR##</p>
    </footer>
  </article>
</body>
</html>
"#;

/// Homepage list entry, prepended to the shared index fragment.
const LIST_TEMPLATE: &str = r#"<li><a href="/##SLUG##/">##TITLE##</a></li>"#;

/// Render the detail page for a review.
pub fn render_post(review: &Review) -> String {
    let template = POST_TEMPLATE.to_string();
    // The title token appears twice (head and heading); each substitution
    // replaces the first remaining occurrence.
    let template = substitute(template, "##TITLE##", Some(&review.title));
    let template = substitute(template, "##TITLE##", Some(&review.title));
    let template = substitute(template, "##TASTESCORE##", score_text(review.taste).as_deref());
    let template = substitute(
        template,
        "##PRESENTSCORE##",
        score_text(review.presentation).as_deref(),
    );
    let template = substitute(
        template,
        "##VFMSCORE##",
        score_text(review.value_for_money).as_deref(),
    );
    let template = substitute(template, "##TASTEBODY##", review.taste_body.as_deref());
    let template = substitute(
        template,
        "##PRESENTBODY##",
        review.presentation_body.as_deref(),
    );
    let template = substitute(
        template,
        "##VFMBODY##",
        review.value_for_money_body.as_deref(),
    );
    substitute(template, "##AUTHOR##", Some(&review.author))
}

/// Render the homepage list item for a title.
pub fn render_list_item(title: &str) -> String {
    let item = LIST_TEMPLATE.replacen("##SLUG##", &crate::review::slugify(title), 1);
    item.replacen("##TITLE##", title, 1)
}

/// Replace the first occurrence of `token`; `None` leaves the token as-is.
fn substitute(template: String, token: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => template.replacen(token, value, 1),
        None => template,
    }
}

/// Integral scores render without a trailing `.0`.
fn score_text(score: Option<f64>) -> Option<String> {
    score.map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_review() -> Review {
        Review {
            title: "Choc Wafer".to_string(),
            taste: Some(10.0),
            presentation: Some(7.5),
            value_for_money: None,
            taste_body: Some("Crisp wafer, generous coating.".to_string()),
            presentation_body: Some("Foil wrapper does the job.".to_string()),
            value_for_money_body: None,
            author: "jess".to_string(),
        }
    }

    #[test]
    fn test_post_contains_title_and_bodies_verbatim() {
        let post = render_post(&sample_review());
        assert!(post.contains("<h1>Choc Wafer</h1>"));
        assert!(post.contains("Crisp wafer, generous coating."));
        assert!(post.contains("Foil wrapper does the job."));
        assert!(post.contains("Reviewed by jess"));
    }

    #[test]
    fn test_title_substituted_in_head_and_heading() {
        let post = render_post(&sample_review());
        assert!(post.contains("<title>Choc Wafer</title>"));
        assert!(!post.contains("##TITLE##"));
    }

    #[test]
    fn test_scores_render_plainly() {
        let post = render_post(&sample_review());
        assert!(post.contains("10/10"));
        assert!(post.contains("7.5/10"));
    }

    #[test]
    fn test_missing_fields_leave_tokens_in_place() {
        let post = render_post(&sample_review());
        assert!(post.contains("##VFMSCORE##"));
        assert!(post.contains("##VFMBODY##"));
    }

    #[test]
    fn test_no_html_escaping() {
        let mut review = sample_review();
        review.taste_body = Some("<b>Loved & adored</b>".to_string());
        let post = render_post(&review);
        assert!(post.contains("<b>Loved & adored</b>"));
    }

    #[test]
    fn test_value_containing_token_syntax_hijacks_later_substitution() {
        // First-occurrence replacement means an injected token is consumed
        // by the author substitution and the footer token survives.
        let mut review = sample_review();
        review.taste_body = Some("##AUTHOR## wrote this".to_string());
        let post = render_post(&review);
        assert!(post.contains("jess wrote this"));
        assert!(post.contains("Reviewed by ##AUTHOR##"));
    }

    #[test]
    fn test_list_item_shape() {
        let item = render_list_item("Choc Wafer");
        assert_eq!(item, r#"<li><a href="/choc-wafer/">Choc Wafer</a></li>"#);
    }

    #[test]
    fn test_list_item_render_is_idempotent() {
        assert_eq!(render_list_item("Choc Wafer"), render_list_item("Choc Wafer"));
    }
}
