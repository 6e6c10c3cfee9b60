use dioxus::prelude::*;
use services::{Phase, SessionController};

use crate::context::AppContext;
use crate::views::{QuizView, ResultsView, SetupView};

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                QuizShell {}
            }
        }
    }
}

/// Owns the session controller and picks the screen for the current phase.
#[component]
pub fn QuizShell() -> Element {
    let ctx = use_context::<AppContext>();
    let address_bar = ctx.address_bar();
    let controller = use_context_provider(|| Signal::new(SessionController::new(address_bar)));

    let backend = ctx.backend();
    use_future(move || {
        let backend = backend.clone();
        let mut controller = controller;
        async move {
            let ticket = controller.write().begin_restore();
            let Some(ticket) = ticket else {
                return;
            };
            let result = backend.fetch_quiz(ticket.request()).await;
            controller.write().finish_restore(ticket, result);
        }
    });

    rsx! {
        main { class: "quiz-shell",
            header { class: "quiz-shell__header",
                h1 { "Quiz Generator" }
            }
            PhaseScreen {}
        }
    }
}

/// Screen for the phase of the session controller found in context.
#[component]
pub fn PhaseScreen() -> Element {
    let controller = use_context::<Signal<SessionController>>();
    let phase = controller.read().phase();
    match phase {
        Phase::Setup => rsx! { SetupView {} },
        Phase::InProgress => rsx! { QuizView {} },
        Phase::Completed => rsx! { ResultsView {} },
    }
}
