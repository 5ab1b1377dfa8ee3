use web_sys::MouseEvent;
use yew::prelude::*;

/// Visual flavor of a notification.
#[derive(Clone, Copy, PartialEq)]
pub enum ModalVariant {
    Success,
    Error,
    Warning,
    Info,
}

impl ModalVariant {
    fn class(&self) -> &'static str {
        match self {
            Self::Success => "notification-modal success",
            Self::Error => "notification-modal error",
            Self::Warning => "notification-modal warning",
            Self::Info => "notification-modal info",
        }
    }
}

/// A notification a page wants to surface; pages keep `Option<Notice>` state
/// and render the modal from it.
#[derive(Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub variant: ModalVariant,
}

impl Notice {
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            variant: ModalVariant::Success,
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            variant: ModalVariant::Error,
        }
    }

    pub fn warning(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            variant: ModalVariant::Warning,
        }
    }

    pub fn info(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            variant: ModalVariant::Info,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationModalProps {
    pub notice: Option<Notice>,
    pub on_close: Callback<()>,
}

/// Dismissable notification dialog. Visibility is driven purely by the
/// `notice` prop; there is no global DOM registry involved.
#[function_component(NotificationModal)]
pub fn notification_modal(props: &NotificationModalProps) -> Html {
    let notice = match &props.notice {
        Some(notice) => notice.clone(),
        None => return html! {},
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class={notice.variant.class()} onclick={on_modal_click}>
                <button type="button" class="modal-close" onclick={on_close_click.clone()}>
                    {"✕"}
                </button>
                <h2 class="notification-title">{&notice.title}</h2>
                <p class="notification-message">{&notice.message}</p>
                <button type="button" class="btn btn-primary notification-ack" onclick={on_close_click}>
                    {"Acknowledge"}
                </button>
            </div>
        </div>
    }
}
