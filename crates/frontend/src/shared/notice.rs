use leptos::prelude::*;

/// Outcome message shown under an action
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
    Info(String),
}

impl Notice {
    fn modifier(&self) -> &'static str {
        match self {
            Notice::Success(_) => "success",
            Notice::Error(_) => "error",
            Notice::Info(_) => "info",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Notice::Success(_) => "✓",
            Notice::Error(_) => "⚠",
            Notice::Info(_) => "ℹ",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Notice::Success(t) | Notice::Error(t) | Notice::Info(t) => t,
        }
    }
}

#[component]
pub fn NoticeBox(notice: Notice) -> impl IntoView {
    let class = format!("warning-box warning-box--{}", notice.modifier());
    view! {
        <div class=class>
            <span class="warning-box__icon">{notice.icon()}</span>
            <span class="warning-box__text">{notice.text().to_string()}</span>
        </div>
    }
}
