use std::rc::Rc;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use hanbox::config::{LENGTH_MAX, LENGTH_MIN, LENGTH_STEP, NATIVE_LANGUAGES, PERSONAS};
use hanbox::{
    clamp_length_input, BrowserDownloader, CefrLevel, LessonEdit, LocalStorageStore,
    MaterialType, RewriteEdit, Script, Session, SessionAction,
};
use strum::IntoEnumIterator;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::events::{InputEvent, MouseEvent};
use yew::prelude::*;
use yew::TargetCast;

#[function_component(App)]
fn app() -> Html {
    let session = use_reducer(|| Session::new(Rc::new(LocalStorageStore::new())));
    let dispatcher = session.dispatcher();
    let export_error = use_state(|| Option::<String>::None);

    // Persona
    let on_persona_change = on_select(&dispatcher, SessionAction::SetPersona);

    // Lesson form
    let on_lesson_level = on_select(&dispatcher, |level: CefrLevel| {
        SessionAction::EditLesson(LessonEdit::Level(level))
    });
    let on_lesson_script = on_select(&dispatcher, |script: Script| {
        SessionAction::EditLesson(LessonEdit::Script(script))
    });
    let on_lesson_language = on_select(&dispatcher, |language: String| {
        SessionAction::EditLesson(LessonEdit::NativeLanguage(language))
    });
    let on_lesson_length = on_range(&dispatcher, |length| {
        SessionAction::EditLesson(LessonEdit::TargetLength(length))
    });
    let on_lesson_type = on_select(&dispatcher, |material_type: MaterialType| {
        SessionAction::EditLesson(LessonEdit::MaterialType(material_type))
    });
    let on_lesson_topic = on_text(&dispatcher, |topic| {
        SessionAction::EditLesson(LessonEdit::Topic(topic))
    });
    let on_lesson_grammar = on_text(&dispatcher, |grammar| {
        SessionAction::EditLesson(LessonEdit::GrammarPoint(grammar))
    });
    let on_generate_lesson = on_click(&dispatcher, SessionAction::GenerateLesson);
    let on_lesson_sample = on_click(&dispatcher, SessionAction::LoadLessonSample);

    // Rewrite form
    let on_rewrite_level = on_select(&dispatcher, |level: CefrLevel| {
        SessionAction::EditRewrite(RewriteEdit::Level(level))
    });
    let on_rewrite_type = on_select(&dispatcher, |material_type: MaterialType| {
        SessionAction::EditRewrite(RewriteEdit::MaterialType(material_type))
    });
    let on_rewrite_length = on_range(&dispatcher, |length| {
        SessionAction::EditRewrite(RewriteEdit::TargetLength(length))
    });
    let on_rewrite_source = on_textarea(&dispatcher, |text| {
        SessionAction::EditRewrite(RewriteEdit::SourceText(text))
    });
    let on_rewrite = on_click(&dispatcher, SessionAction::Rewrite);
    let on_rewrite_sample = on_click(&dispatcher, SessionAction::LoadRewriteSample);

    // Questions
    let on_passage = on_textarea(&dispatcher, SessionAction::SetPassage);
    let on_generate_questions = on_click(&dispatcher, SessionAction::GenerateQuestions);

    // Download everything generated so far; nothing happens when all empty
    let on_export = {
        let session = session.clone();
        let export_error = export_error.clone();
        Callback::from(move |_: MouseEvent| {
            let today = Utc::now().date_naive();
            match session.export(today, &BrowserDownloader) {
                Ok(_) => export_error.set(None),
                Err(err) => {
                    tracing::error!("Export failed: {}", err);
                    export_error.set(Some(format!("匯出失敗：{}", err)));
                }
            }
        })
    };

    let persona = session.persona().to_string();
    let lesson = session.lesson().clone();
    let rewrite = session.rewrite().clone();
    let outputs = session.outputs().clone();
    let custom_persona = !PERSONAS.contains(&persona.as_str());

    html! {
        <div class="app-shell">
            <header>
                <h1>{"華語AI備課百寶箱"}</h1>
                <p class="sub">{"產生｜改寫｜出題｜分級｜可下載"}</p>
            </header>

            <main class="columns">
                <div class="column-left">
                    <section class="card">
                        <h2>{"助教人格（Persona）"}</h2>
                        <label>{"選擇助教風格"}</label>
                        <select onchange={on_persona_change}>
                            if custom_persona {
                                <option value={persona.clone()} selected=true>{ persona.clone() }</option>
                            }
                            {
                                for PERSONAS.iter().map(|p| html! {
                                    <option value={*p} selected={*p == persona}>{ *p }</option>
                                })
                            }
                        </select>
                        <p class="sub">{"人格設定會影響生成文字的語氣與範例風格。"}</p>
                    </section>

                    <section class="card">
                        <h2>{"產生教材"}</h2>
                        <h3>{"學生背景設定"}</h3>
                        <div class="row">
                            <div>
                                <label>{"等級（CEFR）"}</label>
                                { render_enum_select(lesson.level, on_lesson_level) }
                            </div>
                            <div>
                                <label>{"目標字體／語種"}</label>
                                { render_enum_select(lesson.script, on_lesson_script) }
                            </div>
                            <div>
                                <label>{"學生母語"}</label>
                                <select onchange={on_lesson_language}>
                                    {
                                        for NATIVE_LANGUAGES.iter().map(|l| html! {
                                            <option value={*l} selected={*l == lesson.native_language}>{ *l }</option>
                                        })
                                    }
                                </select>
                            </div>
                            <div>
                                <label>{"字數上限（約）："}{ lesson.target_length }</label>
                                { render_length_slider(lesson.target_length, on_lesson_length) }
                            </div>
                        </div>

                        <h3>{"教材內容設定"}</h3>
                        <div class="row">
                            <div>
                                <label>{"教材類型"}</label>
                                { render_enum_select(lesson.material_type, on_lesson_type) }
                            </div>
                            <div>
                                <label>{"主題"}</label>
                                <input
                                    type="text"
                                    placeholder="例如：颱風 / 在餐廳點餐"
                                    value={lesson.topic.clone()}
                                    oninput={on_lesson_topic}
                                />
                            </div>
                        </div>
                        <label>{"主要文法點（選填）"}</label>
                        <input
                            type="text"
                            placeholder="例如：⋯是什麼？、把字句、結果補語"
                            value={lesson.grammar_point.clone()}
                            oninput={on_lesson_grammar}
                        />
                        <div>
                            <button class="btn btn-primary" onclick={on_generate_lesson}>{"生成教材"}</button>
                            <button class="btn btn-secondary" onclick={on_lesson_sample}>{"載入範例"}</button>
                        </div>
                    </section>

                    <section class="card">
                        <h2>{"改寫教材"}</h2>
                        <div class="row">
                            <div>
                                <label>{"目標等級"}</label>
                                { render_enum_select(rewrite.level, on_rewrite_level) }
                            </div>
                            <div>
                                <label>{"類型"}</label>
                                { render_enum_select(rewrite.material_type, on_rewrite_type) }
                            </div>
                            <div>
                                <label>{"字數上限："}{ rewrite.target_length }</label>
                                { render_length_slider(rewrite.target_length, on_rewrite_length) }
                            </div>
                        </div>
                        <label>{"貼上參考文字"}</label>
                        <textarea rows="6" value={rewrite.source_text.clone()} oninput={on_rewrite_source} />
                        <div>
                            <button class="btn btn-primary" onclick={on_rewrite}>{"一鍵改寫"}</button>
                            <button class="btn btn-secondary" onclick={on_rewrite_sample}>{"載入範例"}</button>
                        </div>
                    </section>

                    <section class="card">
                        <h2>{"從教材自動出題"}</h2>
                        <label>{"貼入教材或對話"}</label>
                        <textarea
                            rows="5"
                            placeholder="貼上課文或對話"
                            value={session.questions().passage.clone()}
                            oninput={on_passage}
                        />
                        <button class="btn btn-primary" onclick={on_generate_questions}>
                            {"產生題目（Bloom六層）"}
                        </button>
                    </section>
                </div>

                <div class="column-right">
                    <section class="card">
                        <h2>{"教材預覽 / 匯出"}</h2>
                        <button class="btn" onclick={on_export}>{"下載全部"}</button>
                        if let Some(err) = &*export_error {
                            <div class="error">{ err }</div>
                        }
                        { render_preview_block("生成教材", &outputs.lesson_text, "（尚未生成，點左側「生成教材」）") }
                        { render_preview_block("改寫結果", &outputs.rewrite_text, "（尚未改寫，點左側「一鍵改寫」）") }
                        { render_preview_block("出題結果", &outputs.questions_text, "（尚未出題，點左側「產生題目」）") }
                    </section>

                    <section class="card">
                        <h2>{"教學小工具"}</h2>
                        { render_hint_card("詞彙覆蓋率（示意）", "A1：高頻詞80%｜A2：90%，僅供示意。") }
                        { render_hint_card("語法提醒（示意）", "使用「⋯是什麼？」時注意語序與量詞。") }
                    </section>
                </div>
            </main>

            <footer class="footer">
                <span>{"© "}{ Utc::now().year() }{" 華語AI備課百寶箱 · Rust + Yew + WASM"}</span>
            </footer>
        </div>
    }
}

// --- Callback builders --------------------------------------------------------

fn on_click(dispatcher: &UseReducerDispatcher<Session>, action: SessionAction) -> Callback<MouseEvent> {
    let dispatcher = dispatcher.clone();
    Callback::from(move |_| dispatcher.dispatch(action.clone()))
}

fn on_select<T, F>(dispatcher: &UseReducerDispatcher<Session>, make: F) -> Callback<Event>
where
    T: FromStr,
    F: Fn(T) -> SessionAction + 'static,
{
    let dispatcher = dispatcher.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        match T::from_str(&select.value()) {
            Ok(value) => dispatcher.dispatch(make(value)),
            Err(_) => tracing::debug!("Ignoring unknown option {:?}", select.value()),
        }
    })
}

fn on_text<F>(dispatcher: &UseReducerDispatcher<Session>, make: F) -> Callback<InputEvent>
where
    F: Fn(String) -> SessionAction + 'static,
{
    let dispatcher = dispatcher.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        dispatcher.dispatch(make(input.value()));
    })
}

fn on_textarea<F>(dispatcher: &UseReducerDispatcher<Session>, make: F) -> Callback<InputEvent>
where
    F: Fn(String) -> SessionAction + 'static,
{
    let dispatcher = dispatcher.clone();
    Callback::from(move |e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        dispatcher.dispatch(make(area.value()));
    })
}

fn on_range<F>(dispatcher: &UseReducerDispatcher<Session>, make: F) -> Callback<InputEvent>
where
    F: Fn(u32) -> SessionAction + 'static,
{
    let dispatcher = dispatcher.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        if let Some(length) = clamp_length_input(&input.value()) {
            dispatcher.dispatch(make(length));
        }
    })
}

// --- Helper rendering functions -------------------------------------------------

fn render_enum_select<T>(current: T, onchange: Callback<Event>) -> Html
where
    T: IntoEnumIterator + AsRef<str> + PartialEq,
{
    html! {
        <select onchange={onchange}>
            {
                for T::iter().map(|option| {
                    let label = option.as_ref().to_string();
                    html! {
                        <option value={label.clone()} selected={option == current}>{ label }</option>
                    }
                })
            }
        </select>
    }
}

fn render_length_slider(value: u32, oninput: Callback<InputEvent>) -> Html {
    html! {
        <input
            type="range"
            min={LENGTH_MIN.to_string()}
            max={LENGTH_MAX.to_string()}
            step={LENGTH_STEP.to_string()}
            value={value.to_string()}
            oninput={oninput}
        />
    }
}

fn render_preview_block(title: &str, text: &str, placeholder: &str) -> Html {
    let has_text = !text.trim().is_empty();
    html! {
        <div class="preview-block">
            <div class="preview-title">{ title.to_string() }</div>
            <div class={if has_text { "preview-text" } else { "preview-text placeholder" }}>
                { if has_text { text.to_string() } else { placeholder.to_string() } }
            </div>
        </div>
    }
}

fn render_hint_card(title: &str, content: &str) -> Html {
    html! {
        <div class="hint-card">
            <div class="preview-title">{ title.to_string() }</div>
            <div class="sub">{ content.to_string() }</div>
        </div>
    }
}

// -----------------------------------------------------------------------------

fn main() {
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::new().render();
}
