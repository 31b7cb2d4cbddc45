//! Light/dark theme context. The preference is read once on mount, applied to
//! `<html>` as the `dark` class and the `data-theme` attribute, and saved on
//! every toggle.

use crate::app_lib::storage::BrowserStore;
use leptos::prelude::*;
use session_core::{
    SessionStore,
    theme::{ThemeMode, initial_theme, remember_theme},
};

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub mode: RwSignal<ThemeMode>,
}

impl ThemeContext {
    pub fn toggle(&self) {
        let next = self.mode.get_untracked().toggled();
        remember_theme(&SessionStore::new(BrowserStore), next);
        self.mode.set(next);
    }
}

#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let mode = RwSignal::new(initial_theme(
        &SessionStore::new(BrowserStore),
        system_prefers_dark(),
    ));
    provide_context(ThemeContext { mode });

    Effect::new(move |_| apply_theme(mode.get()));

    view! { {children()} }
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().unwrap_or_else(|| ThemeContext {
        mode: RwSignal::new(ThemeMode::default()),
    })
}

fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|query| query.matches())
}

fn apply_theme(mode: ThemeMode) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };

    let classes = root.class_list();
    let toggled = if mode.is_dark() {
        classes.add_1("dark")
    } else {
        classes.remove_1("dark")
    };
    if toggled.and_then(|()| root.set_attribute("data-theme", mode.as_str())).is_err() {
        tracing::warn!(theme = mode.as_str(), "could not apply theme to document");
    }
}
