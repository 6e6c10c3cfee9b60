use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{OptionLetter, Question, QuestionReview, QuizId, ScoreResult};
use services::{
    AddressBar, BackendError, GenerateRequest, GeneratedQuiz, MemoryAddressBar, QuizBackend,
    SessionController, SubmitRequest,
};

use super::setup::start_generation;
use crate::app::{PhaseScreen, QuizShell};
use crate::context::{AppContext, UiApp, build_app_context};
use crate::vm::{SetupForm, StatusMessage};

/// Backend that answers from fixed data: two questions on generate, three
/// on fetch, and a score that marks everything but the first answer wrong.
#[derive(Default)]
pub struct FakeBackend {
    pub fetches: AtomicUsize,
    pub extractions: AtomicUsize,
}

fn quiz(id: &str, len: usize) -> GeneratedQuiz {
    let questions = [
        ("First?", ["a", "b", "c", "d"]),
        ("Second?", ["yes", "no", "maybe", "never"]),
        ("Third?", ["w", "x", "y", "z"]),
    ];
    GeneratedQuiz {
        quiz_id: QuizId::new(id).unwrap(),
        questions: questions[..len]
            .iter()
            .map(|(text, options)| {
                Question::new(*text, options.iter().map(ToString::to_string).collect()).unwrap()
            })
            .collect(),
    }
}

#[async_trait::async_trait]
impl QuizBackend for FakeBackend {
    async fn extract_from_url(&self, _url: &str) -> Result<String, BackendError> {
        self.extractions.fetch_add(1, Ordering::SeqCst);
        Ok("content".into())
    }

    async fn extract_from_pdf(&self, _name: &str, _bytes: Vec<u8>) -> Result<String, BackendError> {
        Ok("content".into())
    }

    async fn generate_quiz(&self, _request: &GenerateRequest) -> Result<GeneratedQuiz, BackendError> {
        Ok(quiz("quiz-1", 2))
    }

    async fn fetch_quiz(&self, quiz_id: &QuizId) -> Result<GeneratedQuiz, BackendError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(quiz(quiz_id.as_str(), 3))
    }

    async fn submit_quiz(&self, request: &SubmitRequest) -> Result<ScoreResult, BackendError> {
        let reviews = (0..2)
            .map(|index| QuestionReview {
                index,
                question_text: if index == 0 { "First?" } else { "Second?" }.into(),
                is_correct: index == 0,
                selected_letter: request.answers.get(index),
                selected_option_text: request.answers.get(index).map(|_| "a".into()),
                correct_letter: if index == 0 { OptionLetter::A } else { OptionLetter::B },
                correct_option_text: if index == 0 { "a" } else { "no" }.into(),
            })
            .collect();
        Ok(ScoreResult {
            score: 1,
            total: 2,
            percentage: 50.0,
            per_question: reviews,
        })
    }
}

struct TestApp {
    backend: Arc<FakeBackend>,
    address_bar: Arc<MemoryAddressBar>,
}

impl UiApp for TestApp {
    fn backend(&self) -> Arc<dyn QuizBackend> {
        self.backend.clone()
    }

    fn address_bar(&self) -> Arc<dyn AddressBar> {
        self.address_bar.clone()
    }
}

type Seed = Rc<RefCell<Option<SessionController>>>;

#[derive(Clone)]
enum Mount {
    Shell,
    Seeded(Seed),
    DoubleGenerate,
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    mount: Mount,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn Harness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.mount.clone() {
        Mount::Shell => rsx! { QuizShell {} },
        Mount::Seeded(seed) => rsx! { SeededScreen { seed } },
        Mount::DoubleGenerate => rsx! { DoubleGenerate {} },
    }
}

/// Fires the generate action twice in the same tick, as a double click
/// would before the button re-renders as disabled.
#[component]
fn DoubleGenerate() -> Element {
    let ctx = use_context::<AppContext>();
    let controller =
        use_context_provider(|| Signal::new(SessionController::new(ctx.address_bar())));
    let status = use_signal(|| None::<StatusMessage>);
    let extracting = use_signal(|| false);
    let started = use_hook(|| {
        let form = SetupForm {
            url: "https://example.com/article".into(),
            ..SetupForm::default()
        };
        (0..2)
            .filter(|_| {
                start_generation(ctx.backend(), controller, form.clone(), status, extracting)
            })
            .count()
    });
    rsx! {
        p { id: "generation-runs", "{started} started" }
        PhaseScreen {}
    }
}

#[derive(Props, Clone)]
struct SeededProps {
    seed: Seed,
}

impl PartialEq for SeededProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.seed, &other.seed)
    }
}

#[component]
fn SeededScreen(props: SeededProps) -> Element {
    let ctx = use_context::<AppContext>();
    use_context_provider(|| {
        let controller = props
            .seed
            .borrow_mut()
            .take()
            .unwrap_or_else(|| SessionController::new(ctx.address_bar()));
        Signal::new(controller)
    });
    rsx! { PhaseScreen {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: Arc<FakeBackend>,
    pub address_bar: Arc<MemoryAddressBar>,
}

impl ViewHarness {
    /// Mount the full shell at `href`.
    pub fn shell(href: &str) -> Self {
        Self::mount(Arc::new(MemoryAddressBar::new(href)), Mount::Shell)
    }

    /// Mount the phase screen after two back-to-back generate clicks.
    pub fn double_generate() -> Self {
        Self::mount(
            Arc::new(MemoryAddressBar::new("http://localhost/")),
            Mount::DoubleGenerate,
        )
    }

    /// Mount the phase screen over an already-driven controller.
    pub fn seeded(address_bar: Arc<MemoryAddressBar>, controller: SessionController) -> Self {
        Self::mount(address_bar, Mount::Seeded(Rc::new(RefCell::new(Some(controller)))))
    }

    fn mount(address_bar: Arc<MemoryAddressBar>, mount: Mount) -> Self {
        let backend = Arc::new(FakeBackend::default());
        let app = Arc::new(TestApp {
            backend: Arc::clone(&backend),
            address_bar: Arc::clone(&address_bar),
        });
        let dom = VirtualDom::new_with_props(Harness, HarnessProps { app, mount });
        Self {
            dom,
            backend,
            address_bar,
        }
    }

    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// A controller that generated the two-question quiz, answered only the
/// first question and was scored.
pub async fn completed_controller(address_bar: &Arc<MemoryAddressBar>) -> SessionController {
    let backend = FakeBackend::default();
    let mut controller = started_controller(address_bar, &backend).await;
    controller.select_answer(OptionLetter::A);
    controller.submit(&backend).await.unwrap();
    controller
}

/// A controller holding the generated two-question quiz.
pub async fn started_controller(
    address_bar: &Arc<MemoryAddressBar>,
    backend: &FakeBackend,
) -> SessionController {
    let mut controller = SessionController::new(address_bar.clone());
    controller
        .generate(backend, "content".into(), None, Default::default())
        .await
        .unwrap();
    controller
}
