pub mod global_context;
pub mod header;

use leptos::prelude::*;

/// Application shell: header, the working area, a separator, then a
/// full-width section below.
///
/// ```text
/// +------------------------------------------+
/// |                 Header                   |
/// +------------------------------------------+
/// |              Main (columns)              |
/// +------------------------------------------+
/// |                  Below                   |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell<M, B>(main: M, below: B) -> impl IntoView
where
    M: Fn() -> AnyView + 'static + Send,
    B: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <header::Header />

            <main data-zone="main" class="app-body">
                {main()}
            </main>

            <hr class="app-separator" />

            <section data-zone="below" class="app-below">
                {below()}
            </section>
        </div>
    }
}
