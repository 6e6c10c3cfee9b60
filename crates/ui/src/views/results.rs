use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use services::SessionController;

use crate::vm::{ResultsVm, ReviewVm, present_results};

#[component]
pub fn ResultsView() -> Element {
    let mut controller = use_context::<Signal<SessionController>>();
    let mut copied = use_signal(|| false);

    let (vm, share_url) = {
        let guard = controller.read();
        (
            guard.state().last_result().map(present_results),
            guard.share_url(),
        )
    };

    rsx! {
        section { class: "results",
            match vm {
                Some(vm) => rsx! { ScoreSummary { vm } },
                None => rsx! { p { "No results yet." } },
            }

            if let Some(url) = share_url {
                div { class: "results__share",
                    label { r#for: "share-url", "Share this quiz" }
                    input { id: "share-url", r#type: "text", readonly: true, value: "{url}" }
                    button {
                        id: "share-copy",
                        r#type: "button",
                        onclick: {
                            let script = copy_link_script(&url);
                            move |_: MouseEvent| {
                                let script = script.clone();
                                spawn(async move {
                                    if let Err(err) = eval(&script).await {
                                        tracing::warn!(error = %err, "copying share link failed");
                                        return;
                                    }
                                    copied.set(true);
                                    tokio::time::sleep(COPIED_FEEDBACK).await;
                                    copied.set(false);
                                });
                            }
                        },
                        if copied() { "Copied!" } else { "Copy" }
                    }
                }
            }

            button {
                id: "results-restart",
                class: "results__cta",
                r#type: "button",
                onclick: move |_| {
                    controller.write().reset();
                },
                "Create New Quiz"
            }
        }
    }
}

const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

fn copy_link_script(url: &str) -> String {
    format!("await navigator.clipboard.writeText({url:?}); return true;")
}

#[component]
fn ScoreSummary(vm: ResultsVm) -> Element {
    rsx! {
        div { class: "results__score results__score--{vm.tier.key()}",
            p { class: "results__percentage", "{vm.percentage_text()}" }
            p { class: "results__line", "{vm.score_line}" }
            p { class: "results__tier", "{vm.tier_message()}" }
        }

        if !vm.incorrect_reviews.is_empty() {
            h3 { "Review" }
            ul { class: "results__reviews",
                for review in vm.incorrect_reviews.iter().cloned() {
                    ReviewItem { review }
                }
            }
        }
    }
}

#[component]
fn ReviewItem(review: ReviewVm) -> Element {
    rsx! {
        li { class: "results__review",
            p { class: "results__review-question", "{review.question_line}" }
            p { class: "results__review-yours", "{review.your_answer_line}" }
            p { class: "results__review-correct", "{review.correct_answer_line}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_script_quotes_the_link() {
        assert_eq!(
            copy_link_script("http://localhost/?lang=en&quiz_id=\"x\""),
            r#"await navigator.clipboard.writeText("http://localhost/?lang=en&quiz_id=\"x\""); return true;"#
        );
    }
}
