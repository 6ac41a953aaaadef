use yew::prelude::*;

use crate::components::common_modal::ConfirmModal;

#[derive(Properties, Clone, PartialEq)]
pub struct RegistrationConfirmModalProps {
    /// Dialog text; `None` keeps the modal closed.
    pub prompt: Option<String>,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// The last stop before a non-refundable registration is sent.
#[function_component(RegistrationConfirmModal)]
pub fn registration_confirm_modal(props: &RegistrationConfirmModalProps) -> Html {
    html! {
        <ConfirmModal
            is_open={props.prompt.is_some()}
            title={"Confirm Registration".to_string()}
            message={props.prompt.clone().unwrap_or_default()}
            on_confirm={props.on_confirm.clone()}
            on_cancel={props.on_cancel.clone()}
            confirm_text={"Yes, Register".to_string()}
            danger=true
        />
    }
}
