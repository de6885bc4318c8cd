use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <span class="header__title">"Fire District Mapping Tool"</span>
                <span class="header__subtitle">
                    "Draw, save, manage, and export fire districts with ease."
                </span>
            </div>
        </header>
    }
}
