use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Shared between the drawing panel and the saved-districts list.
    provide_context(AppGlobalContext::new());

    view! {
        <AppShell />
    }
}
