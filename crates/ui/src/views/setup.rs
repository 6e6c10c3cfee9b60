use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::QuestionCount;
use services::{Operation, QuizBackend, SessionController, extract_content};

use crate::context::AppContext;
use crate::vm::{SetupForm, SourceKind, StatusMessage, difficulty_choices};

#[component]
pub fn SetupView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = use_context::<Signal<SessionController>>();
    let mut form = use_signal(SetupForm::default);
    let status = use_signal(|| None::<StatusMessage>);
    let extracting = use_signal(|| false);

    let busy = extracting() || controller.read().is_in_flight(Operation::Generate);
    let form_value = form();
    let selected_difficulty = form_value.settings.difficulty;
    let selected_count = form_value.settings.question_count;

    let on_generate = {
        let backend = ctx.backend();
        move |_: MouseEvent| {
            start_generation(Arc::clone(&backend), controller, form(), status, extracting);
        }
    };

    rsx! {
        section { class: "setup",
            h2 { "Create a quiz" }

            div { class: "setup__sources", role: "tablist",
                for kind in [SourceKind::Url, SourceKind::Pdf] {
                    button {
                        class: if form_value.source_kind == kind { "tab tab--active" } else { "tab" },
                        r#type: "button",
                        onclick: move |_| form.write().source_kind = kind,
                        "{kind.label()}"
                    }
                }
            }

            match form_value.source_kind {
                SourceKind::Url => rsx! {
                    input {
                        id: "source-url",
                        class: "setup__input",
                        r#type: "url",
                        placeholder: "https://example.com/article",
                        value: "{form_value.url}",
                        oninput: move |evt| form.write().url = evt.value(),
                    }
                },
                SourceKind::Pdf => rsx! {
                    input {
                        id: "source-pdf",
                        class: "setup__input",
                        r#type: "text",
                        placeholder: "/path/to/document.pdf",
                        value: "{form_value.pdf_path}",
                        oninput: move |evt| form.write().pdf_path = evt.value(),
                    }
                },
            }

            div { class: "setup__settings",
                label { r#for: "difficulty", "Difficulty" }
                select {
                    id: "difficulty",
                    onchange: move |evt| form.write().set_difficulty(&evt.value()),
                    for (value, title, _) in difficulty_choices() {
                        option {
                            value: "{value}",
                            selected: value == selected_difficulty.as_str(),
                            "{title}"
                        }
                    }
                }
                p { class: "setup__hint", "{selected_difficulty.description()}" }

                label { r#for: "question-count", "Questions" }
                select {
                    id: "question-count",
                    onchange: move |evt| form.write().set_question_count(&evt.value()),
                    for count in QuestionCount::PRESETS {
                        option {
                            value: "{count.value()}",
                            selected: count == selected_count,
                            "{count.value()} questions"
                        }
                    }
                }
            }

            button {
                id: "generate",
                class: "setup__cta",
                r#type: "button",
                disabled: busy,
                onclick: on_generate,
                if busy { "Generating..." } else { "Generate Quiz" }
            }

            if let Some(message) = status() {
                p { class: "{message.kind.class()}", "{message.text}" }
            }
        }
    }
}

/// Spawn extraction and generation unless one is already running. Returns
/// whether a new run started.
///
/// The guard reads the signals at click time, not the rendered `busy` flag,
/// so a second click landing before the re-render is ignored.
pub(crate) fn start_generation(
    backend: Arc<dyn QuizBackend>,
    controller: Signal<SessionController>,
    form: SetupForm,
    status: Signal<Option<StatusMessage>>,
    mut extracting: Signal<bool>,
) -> bool {
    if extracting() || controller.read().is_in_flight(Operation::Generate) {
        return false;
    }
    extracting.set(true);
    spawn(extract_and_generate(backend, controller, form, status, extracting));
    true
}

/// Extract article text, then generate a quiz from it. The controller is only
/// borrowed between awaits.
async fn extract_and_generate(
    backend: Arc<dyn QuizBackend>,
    mut controller: Signal<SessionController>,
    form: SetupForm,
    mut status: Signal<Option<StatusMessage>>,
    mut extracting: Signal<bool>,
) {
    status.set(Some(StatusMessage::info("Extracting content...")));

    let extracted = match form.content_source().await {
        Ok(source) => {
            let label = source.label().to_string();
            extract_content(backend.as_ref(), source)
                .await
                .map(|content| (content, label))
        }
        Err(err) => Err(err),
    };
    extracting.set(false);

    let (content, label) = match extracted {
        Ok(extracted) => extracted,
        Err(err) => {
            status.set(Some(StatusMessage::from_extraction(&err)));
            return;
        }
    };
    status.set(Some(StatusMessage::success(
        "Content extracted. Generating quiz...",
    )));

    let ticket = controller
        .write()
        .begin_generate(content, Some(label), form.settings);
    let ticket = match ticket {
        Ok(ticket) => ticket,
        Err(err) => {
            status.set(StatusMessage::from_session(&err));
            return;
        }
    };
    let result = backend.generate_quiz(ticket.request()).await;
    let outcome = controller.write().finish_generate(ticket, result);
    if let Err(err) = outcome {
        status.set(StatusMessage::from_session(&err));
    }
}
