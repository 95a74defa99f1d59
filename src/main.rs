//! VDHIC canvas entry point
//!
//! Builds the form DOM from the static configuration and wires edits,
//! toolbar actions and file import/export into the canvas store and
//! persistence gateway.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

    use vdhic_canvas::config::{GROUPS, GroupConfig, SectionConfig};
    use vdhic_canvas::platform::{self, LocalStorage};
    use vdhic_canvas::{CanvasStore, Gateway, MetadataField, SectionGroup, SectionId, persistence};

    /// Application state shared by every event handler
    struct App {
        store: CanvasStore,
        gateway: Gateway<LocalStorage>,
        last_saved: Option<String>,
    }

    impl App {
        fn new() -> Self {
            Self {
                store: CanvasStore::new(platform::today_iso()),
                gateway: Gateway::new(LocalStorage::new()),
                last_saved: None,
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("VDHIC canvas starting...");

        let app = Rc::new(RefCell::new(App::new()));
        {
            let a = &mut *app.borrow_mut();
            if a.gateway.restore(&mut a.store) {
                a.last_saved = Some(now_time());
            }
        }

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Err(err) = build_ui(&document, &app) {
            log::error!("failed to build canvas UI: {err:?}");
            return;
        }

        let a = app.borrow();
        refresh_inputs(&document, &a.store);
        update_saved_badge(&document, a.last_saved.as_deref());
    }

    fn now_time() -> String {
        js_sys::Date::new_0().to_locale_time_string("en-US").into()
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    /// Create an element with a class, or without one when `class` is empty
    fn el(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
        let element = document.create_element(tag)?;
        if !class.is_empty() {
            element.set_class_name(class);
        }
        Ok(element)
    }

    fn on_click(target: &HtmlElement, handler: impl FnMut() + 'static) {
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(handler));
        target.set_onclick(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }

    fn button(document: &Document, label: &str, title: &str) -> Result<HtmlElement, JsValue> {
        let btn = el(document, "button", "toolbar-btn")?.dyn_into::<HtmlElement>()?;
        btn.set_text_content(Some(label));
        btn.set_attribute("title", title)?;
        Ok(btn)
    }

    fn build_ui(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        let root: Element = match document.get_element_by_id("app") {
            Some(existing) => existing,
            None => document.body().ok_or("document has no body")?.into(),
        };

        build_toolbar(document, &root, app)?;
        build_metadata_panel(document, &root, app)?;
        for group in &GROUPS {
            build_group_panel(document, &root, group, app)?;
        }
        Ok(())
    }

    fn build_toolbar(
        document: &Document,
        root: &Element,
        app: &Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        let bar = el(document, "div", "toolbar")?;

        let brand = el(document, "span", "toolbar-brand")?;
        brand.set_text_content(Some("VDHIC"));
        bar.append_child(&brand)?;
        let subtitle = el(document, "span", "toolbar-subtitle")?;
        subtitle.set_text_content(Some("Digital Health Innovation Canvas"));
        bar.append_child(&subtitle)?;

        // Save to browser storage
        let save_btn = button(document, "Save", "Save to Browser")?;
        {
            let app = app.clone();
            let document = document.clone();
            on_click(&save_btn, move || {
                {
                    let a = &mut *app.borrow_mut();
                    a.gateway.save(&a.store.current());
                    a.last_saved = Some(now_time());
                }
                update_saved_badge(&document, app.borrow().last_saved.as_deref());
                alert("Canvas saved to browser storage!");
            });
        }
        bar.append_child(&save_btn)?;

        // Export as a JSON file download
        let export_btn = button(document, "Export", "Export JSON")?;
        {
            let app = app.clone();
            on_click(&export_btn, move || {
                let doc = app.borrow().store.current();
                let filename = persistence::export_filename(&doc.metadata, &platform::today_iso());
                let json = persistence::export_json(&doc);
                if let Err(err) = platform::download_text(&filename, &json) {
                    log::error!("export failed: {err:?}");
                }
            });
        }
        bar.append_child(&export_btn)?;

        // Import a JSON file, merged into the current canvas
        let import_btn = button(document, "Import", "Import JSON")?;
        {
            let app = app.clone();
            let document = document.clone();
            on_click(&import_btn, move || {
                if let Err(err) = open_import_dialog(&document, app.clone()) {
                    log::error!("failed to open import dialog: {err:?}");
                }
            });
        }
        bar.append_child(&import_btn)?;

        let print_btn = button(document, "Print", "Print/PDF")?;
        on_click(&print_btn, move || {
            if let Some(window) = web_sys::window() {
                let _ = window.print();
            }
        });
        bar.append_child(&print_btn)?;

        // Reset is destructive and clears the saved copy, so confirm first
        let reset_btn = button(document, "Reset", "Clear Canvas")?;
        {
            let app = app.clone();
            let document = document.clone();
            on_click(&reset_btn, move || {
                let confirmed = web_sys::window()
                    .and_then(|w| {
                        w.confirm_with_message(
                            "Are you sure you want to clear the entire canvas? This cannot be undone.",
                        )
                        .ok()
                    })
                    .unwrap_or(false);
                if !confirmed {
                    return;
                }
                {
                    let a = &mut *app.borrow_mut();
                    a.store.reset();
                    a.gateway.clear();
                    a.last_saved = None;
                }
                refresh_inputs(&document, &app.borrow().store);
                update_saved_badge(&document, None);
            });
        }
        bar.append_child(&reset_btn)?;

        let badge = el(document, "span", "toolbar-saved")?;
        badge.set_id("last-saved");
        bar.append_child(&badge)?;

        root.append_child(&bar)?;
        Ok(())
    }

    fn build_metadata_panel(
        document: &Document,
        root: &Element,
        app: &Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        let panel = el(document, "div", "metadata-panel")?;

        let fields: [(MetadataField, &str, &str, &str, &str); 3] = [
            (
                MetadataField::InnovationName,
                "meta-name",
                "Innovation Name",
                "text",
                "PROJECT NAME",
            ),
            (MetadataField::Date, "meta-date", "Date", "date", ""),
            (
                MetadataField::Author,
                "meta-author",
                "Authored By",
                "text",
                "Author Name",
            ),
        ];

        for (field, id, label_text, input_type, placeholder) in fields {
            let wrap = el(document, "div", "metadata-field")?;
            let label = el(document, "label", "metadata-label")?;
            label.set_text_content(Some(label_text));
            wrap.append_child(&label)?;

            let input = document
                .create_element("input")?
                .dyn_into::<HtmlInputElement>()?;
            input.set_type(input_type);
            input.set_id(id);
            if !placeholder.is_empty() {
                input.set_placeholder(placeholder);
            }

            let app = app.clone();
            let source = input.clone();
            let oninput = Closure::<dyn FnMut()>::wrap(Box::new(move || {
                app.borrow_mut().store.set_metadata_field(field, source.value());
            }));
            input.set_oninput(Some(oninput.as_ref().unchecked_ref()));
            oninput.forget();

            wrap.append_child(&input)?;
            panel.append_child(&wrap)?;
        }

        root.append_child(&panel)?;
        Ok(())
    }

    fn group_css_class(group: SectionGroup) -> &'static str {
        match group {
            SectionGroup::Governance => "governance",
            SectionGroup::Discover => "discover",
            SectionGroup::Design => "design",
            SectionGroup::Deliver => "deliver",
            SectionGroup::ValueAnchor => "value-anchor",
        }
    }

    fn build_group_panel(
        document: &Document,
        root: &Element,
        group: &GroupConfig,
        app: &Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        let panel = el(
            document,
            "section",
            &format!("panel panel-{}", group_css_class(group.group)),
        )?;

        let header = el(document, "div", "panel-header")?;
        let title = el(document, "h2", "panel-title")?;
        title.set_text_content(Some(group.title));
        header.append_child(&title)?;
        let badge = el(document, "span", "panel-badge")?;
        badge.set_text_content(Some(group.badge));
        header.append_child(&badge)?;
        panel.append_child(&header)?;

        let body = el(document, "div", "panel-body")?;
        for section in group.sections {
            build_section_card(document, &body, section, app)?;
        }
        panel.append_child(&body)?;

        if let Some(footer_text) = group.footer {
            let footer = el(document, "div", "panel-footer")?;
            footer.set_text_content(Some(footer_text));
            panel.append_child(&footer)?;
        }

        root.append_child(&panel)?;
        Ok(())
    }

    fn build_section_card(
        document: &Document,
        parent: &Element,
        section: &SectionConfig,
        app: &Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        let card = el(document, "div", "section-card")?;

        let title = el(document, "h3", "section-title")?;
        title.set_text_content(Some(section.title));
        card.append_child(&title)?;

        let instruction = el(document, "p", "section-instruction")?;
        instruction.set_text_content(Some(section.instruction));
        card.append_child(&instruction)?;

        let prompts = el(document, "ul", "section-prompts")?;
        for prompt in section.prompts {
            let item = el(document, "li", "")?;
            item.set_text_content(Some(prompt));
            prompts.append_child(&item)?;
        }
        card.append_child(&prompts)?;

        let area = document
            .create_element("textarea")?
            .dyn_into::<HtmlTextAreaElement>()?;
        // The section key doubles as the element id so refresh can find it.
        area.set_id(section.id.as_key());
        area.set_class_name("section-input");

        let id = section.id;
        let app = app.clone();
        let source = area.clone();
        let oninput = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            app.borrow_mut().store.set_section(id, source.value());
        }));
        area.set_oninput(Some(oninput.as_ref().unchecked_ref()));
        oninput.forget();

        card.append_child(&area)?;
        parent.append_child(&card)?;
        Ok(())
    }

    /// Push the store's values into every input. Called after restore,
    /// import and reset; per-keystroke edits flow the other way only.
    fn refresh_inputs(document: &Document, store: &CanvasStore) {
        for id in SectionId::ALL {
            if let Some(element) = document.get_element_by_id(id.as_key()) {
                if let Ok(area) = element.dyn_into::<HtmlTextAreaElement>() {
                    area.set_value(store.sections().get(id));
                }
            }
        }
        let meta = store.metadata();
        set_input_value(document, "meta-name", &meta.innovation_name);
        set_input_value(document, "meta-date", &meta.date);
        set_input_value(document, "meta-author", &meta.author);
    }

    fn set_input_value(document: &Document, id: &str, value: &str) {
        if let Some(element) = document.get_element_by_id(id) {
            if let Ok(input) = element.dyn_into::<HtmlInputElement>() {
                input.set_value(value);
            }
        }
    }

    fn update_saved_badge(document: &Document, last_saved: Option<&str>) {
        if let Some(badge) = document.get_element_by_id("last-saved") {
            match last_saved {
                Some(time) => badge.set_text_content(Some(&format!("Saved: {time}"))),
                None => badge.set_text_content(None),
            }
        }
    }

    /// Open a hidden file picker; the selected file is read fully, then
    /// parsed and merged synchronously in the reader callback.
    fn open_import_dialog(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let input = document
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()?;
        input.set_type("file");
        input.set_accept(".json");
        input.set_hidden(true);

        let document_for_change = document.clone();
        let picker = input.clone();
        let onchange = Closure::once(Box::new(move |_event: web_sys::Event| {
            if let Some(file) = picker.files().and_then(|files| files.get(0)) {
                read_and_import(&document_for_change, app, file);
            }
            picker.remove();
        }) as Box<dyn FnOnce(_)>);
        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget();

        document.body().ok_or("document has no body")?.append_child(&input)?;
        input.click();
        Ok(())
    }

    fn read_and_import(document: &Document, app: Rc<RefCell<App>>, file: web_sys::File) {
        let reader = match web_sys::FileReader::new() {
            Ok(reader) => reader,
            Err(err) => {
                log::error!("failed to create file reader: {err:?}");
                return;
            }
        };

        let source = reader.clone();
        let document = document.clone();
        let onload = Closure::once(Box::new(move |_event: web_sys::Event| {
            let Ok(result) = source.result() else {
                return;
            };
            let Some(text) = result.as_string() else {
                return;
            };
            let mut a = app.borrow_mut();
            match persistence::import_document(&mut a.store, &text) {
                Ok(()) => refresh_inputs(&document, &a.store),
                Err(err) => {
                    log::error!("import failed: {err}");
                    alert("Invalid JSON file");
                }
            }
        }) as Box<dyn FnOnce(_)>);
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        if let Err(err) = reader.read_as_text(&file) {
            log::error!("failed to read file: {err:?}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("VDHIC canvas (native) - the canvas UI is browser-only, run with `trunk serve`");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
