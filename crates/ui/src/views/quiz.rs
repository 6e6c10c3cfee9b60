use dioxus::prelude::*;
use quiz_core::model::OptionLetter;
use services::{Operation, SessionController};

use crate::context::AppContext;
use crate::vm::{OptionVm, StatusMessage, render_question};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut controller = use_context::<Signal<SessionController>>();
    let mut status = use_signal(|| None::<StatusMessage>);

    let (vm, submitting) = {
        let guard = controller.read();
        let state = guard.state();
        (
            render_question(state.questions(), state.current_index(), state.answers()),
            guard.is_in_flight(Operation::Submit),
        )
    };
    let Some(vm) = vm else {
        return rsx! {
            p { class: "quiz__empty", "No quiz loaded." }
        };
    };

    let on_submit = {
        let backend = ctx.backend();
        move |_: MouseEvent| {
            let ticket = controller.write().begin_submit();
            let ticket = match ticket {
                Ok(ticket) => ticket,
                Err(err) => {
                    status.set(StatusMessage::from_session(&err));
                    return;
                }
            };
            status.set(None);
            let backend = backend.clone();
            spawn(async move {
                let result = backend.submit_quiz(ticket.request()).await;
                let outcome = controller.write().finish_submit(ticket, result);
                if let Err(err) = outcome {
                    status.set(StatusMessage::from_session(&err));
                }
            });
        }
    };

    rsx! {
        section { class: "quiz",
            div { class: "quiz__progress",
                span { class: "quiz__counter", "{vm.counter_text}" }
                span { class: "quiz__answered", "{vm.answered_text()}" }
                div { class: "quiz__bar",
                    div { class: "quiz__bar-fill", style: "width: {vm.progress_percent}%" }
                }
            }

            h2 { class: "quiz__question", "{vm.text}" }

            div { class: "quiz__options",
                for option in vm.options.iter().cloned() {
                    OptionButton {
                        key: "{option.letter}",
                        option,
                        on_select: move |letter| {
                            controller.write().select_answer(letter);
                            status.set(None);
                        },
                    }
                }
            }

            div { class: "quiz__nav",
                button {
                    id: "quiz-prev",
                    r#type: "button",
                    disabled: vm.is_first,
                    onclick: move |_| {
                        controller.write().navigate(-1);
                    },
                    "Previous"
                }
                if vm.is_last {
                    button {
                        id: "quiz-submit",
                        class: "quiz__submit",
                        r#type: "button",
                        disabled: submitting,
                        onclick: on_submit,
                        if submitting { "Submitting..." } else { "Submit Quiz" }
                    }
                } else {
                    button {
                        id: "quiz-next",
                        r#type: "button",
                        onclick: move |_| {
                            controller.write().navigate(1);
                        },
                        "Next"
                    }
                }
            }

            if let Some(message) = status() {
                p { class: "{message.kind.class()}", "{message.text}" }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_select: EventHandler<OptionLetter>) -> Element {
    let letter = option.letter;
    rsx! {
        button {
            class: if option.is_selected { "quiz__option quiz__option--selected" } else { "quiz__option" },
            r#type: "button",
            aria_pressed: "{option.is_selected}",
            onclick: move |_| on_select.call(letter),
            "{option.label}"
        }
    }
}
