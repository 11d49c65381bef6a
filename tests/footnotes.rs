use markdown_it::MarkdownIt;
use pmwiki_footnotes::inject::FootnotesContainerNode;
use pmwiki_footnotes::inline::FootnoteCitation;
use rstest::rstest;

fn parser() -> MarkdownIt {
    let mut md = MarkdownIt::new();
    markdown_it::plugins::cmark::add(&mut md);
    pmwiki_footnotes::add(&mut md);
    md
}

fn render(src: &str) -> String {
    parser().parse(src).render()
}

fn citations_of(src: &str) -> Vec<(usize, usize)> {
    let root = parser().parse(src);
    let mut citations = vec![];
    root.walk(|node, _| {
        if let Some(cite) = node.cast::<FootnoteCitation>() {
            citations.push((cite.identity, cite.ordinal));
        }
    });
    citations
}

#[rstest]
#[case::explicit_definition("Fact.[^#7 a note^]", 7)]
#[case::bare_citation("Fact.[^7^]", 7)]
#[case::hash_citation("Fact.[^#7^]", 7)]
fn first_citation_gets_ordinal_one(#[case] src: &str, #[case] identity: usize) {
    assert_eq!(citations_of(src), vec![(identity, 1)]);
    assert!(render(src).contains(&format!(r##"<a id="fn{0}-1" href="#fn{0}-0">{0}</a>"##, identity)));
}

#[test]
fn ordinals_follow_citation_order_per_identity() {
    let src = "a[^#1 one^] b[^#2 two^] c[^1^] d[^2^] e[^1^]";
    assert_eq!(
        citations_of(src),
        vec![(1, 1), (2, 1), (1, 2), (2, 2), (1, 3)]
    );
}

#[test]
fn end_to_end_definition_citation_listing() {
    let html = render("Claim.[^#1 first note^] Restated.[^1^]\n\n[^@^]\n");

    // two citation anchors for identity 1, in citation order
    assert!(html.contains(r##"<a id="fn1-1" href="#fn1-0">1</a>"##));
    assert!(html.contains(r##"<a id="fn1-2" href="#fn1-0">1</a>"##));

    // one listing entry with back-links to both citation sites and the body
    assert!(html.contains(r#"<p id="fn1-0">"#));
    assert!(html.contains(r##"<a href="#fn1-1">1 </a>"##));
    assert!(html.contains(r##"<a href="#fn1-2">2 </a>"##));
    assert!(html.contains("<span>first note</span>"));
}

#[test]
fn end_to_end_auto_numbered_footnote() {
    let html = render("Fact.[^auto body text^]\n\n[^@^]\n");

    assert!(html.contains(r##"<a id="fn1-1" href="#fn1-0">1</a>"##));
    assert!(html.contains(r#"<p id="fn1-0">"#));
    assert!(html.contains(r##"<a href="#fn1-1">1 </a>"##));
    assert!(html.contains("<span>auto body text</span>"));
}

#[test]
fn auto_numbering_skips_past_explicit_identities() {
    let src = "a[^#5 five^] b[^and one more^]";
    assert_eq!(citations_of(src), vec![(5, 1), (6, 1)]);
}

#[test]
fn listing_is_sorted_by_numeric_identity() {
    let html = render("a[^#10 ten^] b[^#2 two^]\n\n[^@^]\n");
    let two = html.find(r#"id="fn2-0""#).expect("entry for 2");
    let ten = html.find(r#"id="fn10-0""#).expect("entry for 10");
    assert!(two < ten, "entry 2 must precede entry 10");
}

#[test]
fn forward_citation_resolves_once_defined() {
    let html = render("Early.[^1^] Later.[^#1 defined late^]\n\n[^@^]\n");

    // citation order alone drives the ordinals
    assert!(html.contains(r##"<a id="fn1-1" href="#fn1-0">1</a>"##));
    assert!(html.contains(r##"<a id="fn1-2" href="#fn1-0">1</a>"##));
    assert!(html.contains(r##"<a href="#fn1-2">2 </a>"##));
    assert!(html.contains("<span>defined late</span>"));
}

#[test]
fn redefining_an_identity_keeps_the_last_body() {
    let html = render("a[^#1 old body^] b[^#1 new body^]\n\n[^@^]\n");

    // the second marker still cites
    assert!(html.contains(r#"id="fn1-2""#));
    assert!(html.contains("<span>new body</span>"));
    assert!(!html.contains("old body"));
}

#[test]
fn every_placeholder_receives_the_full_listing() {
    let html = render("[^@^]\n\nFact.[^#1 a note^]\n\n[^@^]\n");
    assert_eq!(html.matches(r#"<p id="fn1-0">"#).count(), 2);
    assert_eq!(html.matches(r##"<a href="#fn1-1">1 </a>"##).count(), 2);
}

#[test]
fn without_placeholder_no_listing_is_rendered() {
    let html = render("Fact.[^#1 a note^] and again [^1^]\n");
    assert!(html.contains(r#"id="fn1-1""#));
    assert!(!html.contains(r#"class="footnotes""#));
    assert!(!html.contains(r#"id="fn1-0""#));
}

#[test]
fn placeholder_without_footnotes_stays_empty() {
    let html = render("[^@^]\n");
    assert!(html.contains(r#"<div class="footnotes">"#));
    assert!(!html.contains("<p id="));
}

#[rstest]
#[case::single_word("[^foo^]")]
#[case::non_numeric_identity("[^#x note^]")]
#[case::hash_without_digits("[^# note^]")]
#[case::unterminated("[^#1 note")]
fn unrecognized_markers_pass_through_as_text(#[case] src: &str) {
    let root = parser().parse(src);
    let mut found = false;
    root.walk(|node, _| {
        found |= node.is::<FootnoteCitation>() || node.is::<FootnotesContainerNode>();
    });
    assert!(!found, "nothing should be recognized in {src:?}");
}

#[test]
fn renders_reuse_one_parser_without_leakage() {
    let md = parser();

    let first = md.parse("a[^auto note one^]\n\n[^@^]\n").render();
    let second = md.parse("b[^auto note two^]\n\n[^@^]\n").render();

    // the second document numbers from 1 again and sees none of the first
    assert!(first.contains(r#"id="fn1-1""#));
    assert!(second.contains(r#"id="fn1-1""#));
    assert!(!second.contains("note one"));
    assert_eq!(second.matches(r#"<p id="fn"#).count(), 1);
}
