use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ModalProps {
    pub is_open: bool,
    pub title: String,
    pub message: String,
    pub on_close: Callback<()>,
    #[prop_or_else(|| "bg-indigo-600 hover:bg-indigo-700".to_string())]
    pub button_class: String,
    #[prop_or_else(|| "OK".to_string())]
    pub button_text: String,
}

/// Single-button alert used for every error and notice.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.is_open {
        return html! {};
    }

    let on_overlay_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_button_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center">
            <div class="absolute inset-0 bg-black bg-opacity-50" onclick={on_overlay_click}></div>
            <div
                class="relative bg-white rounded-lg shadow-xl p-6 max-w-md w-full mx-4"
                onclick={|e: MouseEvent| e.stop_propagation()}
            >
                <div class="mb-4">
                    <h3 class="text-lg font-medium text-gray-900">{&props.title}</h3>
                </div>
                <div class="mb-6">
                    <p class="text-sm text-gray-600 whitespace-pre-line">{&props.message}</p>
                </div>
                <div class="flex justify-end">
                    <button
                        onclick={on_button_click}
                        class={classes!("px-4", "py-2", "text-sm", "font-medium", "text-white", "rounded-md", &props.button_class)}
                    >
                        {&props.button_text}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct ConfirmModalProps {
    pub is_open: bool,
    pub title: String,
    pub message: String,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
    #[prop_or_else(|| "Confirm".to_string())]
    pub confirm_text: String,
    #[prop_or_else(|| "Cancel".to_string())]
    pub cancel_text: String,
    #[prop_or_default]
    pub danger: bool,
}

/// Blocking yes/no dialog. Clicking the overlay counts as cancel.
#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    if !props.is_open {
        return html! {};
    }

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_cancel.emit(());
        })
    };

    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_| on_confirm.emit(()))
    };

    let confirm_class = if props.danger {
        "bg-red-600 hover:bg-red-700"
    } else {
        "bg-indigo-600 hover:bg-indigo-700"
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center">
            <div class="absolute inset-0 bg-black bg-opacity-50" onclick={on_cancel.clone()}></div>
            <div
                class="relative bg-white rounded-lg shadow-xl p-6 max-w-lg w-full mx-4"
                onclick={|e: MouseEvent| e.stop_propagation()}
            >
                <h3 class="text-lg font-medium text-gray-900 mb-4">{&props.title}</h3>
                <p class="text-sm text-gray-700 whitespace-pre-line mb-6">{&props.message}</p>
                <div class="flex justify-end gap-3">
                    <button
                        onclick={on_cancel}
                        class="px-4 py-2 text-sm font-medium text-gray-700 bg-gray-100 rounded-md hover:bg-gray-200"
                    >
                        {&props.cancel_text}
                    </button>
                    <button
                        onclick={on_confirm}
                        class={classes!("px-4", "py-2", "text-sm", "font-medium", "text-white", "rounded-md", confirm_class)}
                    >
                        {&props.confirm_text}
                    </button>
                </div>
            </div>
        </div>
    }
}
