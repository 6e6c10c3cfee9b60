use std::sync::Arc;
use std::sync::atomic::Ordering;

use quiz_core::model::OptionLetter;
use services::{AddressBar, MemoryAddressBar, Operation};

use super::test_harness::{FakeBackend, ViewHarness, completed_controller, started_controller};

/// Opening tag of the element with `id`.
fn tag_with_id<'a>(html: &'a str, id: &str) -> &'a str {
    let at = html
        .find(&format!("id=\"{id}\""))
        .unwrap_or_else(|| panic!("no element #{id} in {html}"));
    let start = html[..at].rfind('<').unwrap();
    let end = at + html[at..].find('>').unwrap();
    &html[start..=end]
}

#[tokio::test(flavor = "current_thread")]
async fn setup_view_smoke_renders_defaults() {
    let mut harness = ViewHarness::shell("http://localhost/");
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Generate Quiz"), "missing generate button in {html}");
    assert!(html.contains("Article URL"), "missing source tab in {html}");
    assert!(html.contains("10 questions"), "missing count preset in {html}");
    assert!(
        html.contains("Requires understanding concepts"),
        "missing difficulty hint in {html}"
    );
    assert_eq!(harness.backend.fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn shared_link_restores_quiz_on_load() {
    let mut harness = ViewHarness::shell("http://localhost/?quiz_id=abc123");
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert_eq!(harness.backend.fetches.load(Ordering::SeqCst), 1);
    assert!(html.contains("Question 1 of 3"), "missing counter in {html}");
    assert!(html.contains("0 answered"), "missing answered count in {html}");
    assert!(html.contains("A. a"), "missing option label in {html}");
    assert!(html.contains("Previous"), "missing previous in {html}");
    assert!(html.contains("Next"), "missing next in {html}");
    assert!(!html.contains("Submit Quiz"), "submit shown early in {html}");
    assert_eq!(
        harness.address_bar.href(),
        "http://localhost/?quiz_id=abc123"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_score_and_review() {
    let address_bar = Arc::new(MemoryAddressBar::new("http://localhost/?lang=en"));
    let controller = completed_controller(&address_bar).await;

    let mut harness = ViewHarness::seeded(address_bar, controller);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("50%"), "missing percentage in {html}");
    assert!(html.contains("1/2"), "missing score line in {html}");
    assert!(html.contains("Good effort!"), "missing tier in {html}");
    assert!(html.contains("Q2. Second?"), "missing review in {html}");
    assert!(html.contains("Your answer: Not answered"), "missing unanswered in {html}");
    assert!(html.contains("Correct answer: B. no"), "missing correct answer in {html}");
    assert!(!html.contains("Q1. First?"), "correct answer reviewed in {html}");
    assert!(
        html.contains("quiz_id=quiz-1"),
        "missing share link in {html}"
    );
    assert!(html.contains("Create New Quiz"), "missing restart in {html}");
    assert!(
        tag_with_id(&html, "share-copy").contains("button"),
        "missing copy button in {html}"
    );
    assert!(html.contains("Copy"), "missing copy label in {html}");
    assert!(!html.contains("Copied!"), "copy feedback shown early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn pending_submit_disables_submit_button() {
    let address_bar = Arc::new(MemoryAddressBar::new("http://localhost/"));
    let backend = FakeBackend::default();
    let mut controller = started_controller(&address_bar, &backend).await;
    controller.select_answer(OptionLetter::A);
    controller.navigate(1);
    let _pending = controller.begin_submit().unwrap();
    assert!(controller.is_in_flight(Operation::Submit));

    let mut harness = ViewHarness::seeded(address_bar, controller);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Submitting..."), "missing pending label in {html}");
    assert!(!html.contains("Submit Quiz"), "idle label shown in {html}");
    assert!(
        tag_with_id(&html, "quiz-submit").contains("disabled"),
        "submit not disabled in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn idle_submit_button_is_enabled() {
    let address_bar = Arc::new(MemoryAddressBar::new("http://localhost/"));
    let backend = FakeBackend::default();
    let mut controller = started_controller(&address_bar, &backend).await;
    controller.navigate(1);

    let mut harness = ViewHarness::seeded(address_bar, controller);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Submit Quiz"), "missing submit in {html}");
    assert!(
        !tag_with_id(&html, "quiz-submit").contains("disabled"),
        "submit disabled while idle in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn double_generate_click_runs_once() {
    let mut harness = ViewHarness::double_generate();
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("1 started"), "second click not ignored in {html}");
    assert_eq!(harness.backend.extractions.load(Ordering::SeqCst), 1);
    assert!(html.contains("Question 1 of 2"), "quiz not generated in {html}");
}
