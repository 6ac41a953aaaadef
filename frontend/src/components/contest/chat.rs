use std::rc::Rc;

use chrono::Utc;
use log::{debug, error};
use shared::moderation::{authorize_delete, authorize_edit};
use shared::polling::PollSequencer;
use shared::timestamp::format_message_time;
use shared::{ChatGateway, ChatMessage, MessageBody, Participant, User};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::api::client::ApiClient;
use crate::auth::use_session;
use crate::components::common_modal::{ConfirmModal, Modal};
use crate::config::Config;
use crate::hooks::use_poll;

/// Which buttons a message row gets for this viewer at this moment.
fn can_moderate(message: &ChatMessage, viewer: Option<&User>) -> bool {
    viewer
        .map(|user| Config::policy().edit_window().message_can_mutate(message, user, Utc::now()))
        .unwrap_or(false)
}

/// Enter sends; Shift+Enter inserts a newline.
fn sends_on_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

#[derive(Properties, Clone, PartialEq)]
pub struct ChatProps {
    pub contest_id: i64,
}

#[function_component(Chat)]
pub fn chat(props: &ChatProps) -> Html {
    let session = use_session();
    let viewer = session.as_ref().and_then(|s| s.user().cloned());
    let is_admin = viewer.as_ref().map(|u| u.is_admin).unwrap_or(false);

    let messages = use_state(Vec::<ChatMessage>::new);
    let participants = use_state(Vec::<Participant>::new);
    let draft = use_state(String::new);
    let announce = use_state(|| false);
    let editing = use_state(|| None::<(i64, String)>);
    let pending_delete = use_state(|| None::<i64>);
    let failure = use_state(|| None::<String>);
    let sequencer = use_state(PollSequencer::new);

    let contest_id = props.contest_id;
    let per_page = Config::policy().messages_page_size;

    let load_messages: Rc<dyn Fn()> = {
        let messages = messages.clone();
        let sequencer = (*sequencer).clone();
        Rc::new(move || {
            let messages = messages.clone();
            let sequencer = sequencer.clone();
            let ticket = sequencer.issue();
            spawn_local(async move {
                match ApiClient.list_messages(contest_id, per_page).await {
                    Ok(list) => {
                        if sequencer.accept(ticket) {
                            messages.set(list);
                        }
                    }
                    Err(e) => error!("Failed to load chat for contest {}: {}", contest_id, e),
                }
            });
        })
    };

    {
        let load_messages = load_messages.clone();
        use_poll(contest_id, Config::chat_poll_interval_ms(), move || load_messages());
    }

    {
        let participants = participants.clone();
        use_effect_with(contest_id, move |contest_id| {
            let contest_id = *contest_id;
            spawn_local(async move {
                match ApiClient.participants(contest_id).await {
                    Ok(list) => participants.set(list),
                    Err(e) => debug!("Participants unavailable: {}", e),
                }
            });
            || ()
        });
    }

    let on_draft = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };

    let form_ref = use_node_ref();
    let on_draft_key = {
        let form_ref = form_ref.clone();
        Callback::from(move |e: KeyboardEvent| {
            if !sends_on_key(&e.key(), e.shift_key()) {
                return;
            }
            e.prevent_default();
            if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                if let Err(e) = form.request_submit() {
                    error!("Failed to submit chat message: {:?}", e);
                }
            }
        })
    };

    let on_announce_toggle = {
        let announce = announce.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            announce.set(input.checked());
        })
    };

    let on_send = {
        let draft = draft.clone();
        let announce = announce.clone();
        let failure = failure.clone();
        let load_messages = load_messages.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let body = match MessageBody::from_draft(&draft) {
                Ok(body) => body,
                Err(_) => return,
            };
            let as_announcement = is_admin && *announce;
            let draft = draft.clone();
            let failure = failure.clone();
            let load_messages = load_messages.clone();
            spawn_local(async move {
                let sent = if as_announcement {
                    ApiClient.send_announcement(contest_id, &body).await
                } else {
                    ApiClient.send_message(contest_id, &body).await
                };
                match sent {
                    Ok(()) => {
                        draft.set(String::new());
                        load_messages();
                    }
                    Err(e) => failure.set(Some(e.context("Failed to send message"))),
                }
            });
        })
    };

    let on_edit_input = {
        let editing = editing.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some((id, _)) = &*editing {
                editing.set(Some((*id, input.value())));
            }
        })
    };

    let on_edit_save = {
        let editing = editing.clone();
        let messages = messages.clone();
        let failure = failure.clone();
        let viewer = viewer.clone();
        let load_messages = load_messages.clone();
        Callback::from(move |_| {
            let (Some((id, text)), Some(actor)) = ((*editing).clone(), viewer.clone()) else {
                return;
            };
            let Some(message) = messages.iter().find(|m| m.id == id).cloned() else {
                editing.set(None);
                return;
            };
            let body = match authorize_edit(&message, &actor, &text, Config::policy().edit_window(), Utc::now()) {
                Ok(body) => body,
                Err(e) => {
                    failure.set(Some(e.to_string()));
                    return;
                }
            };
            let editing = editing.clone();
            let failure = failure.clone();
            let load_messages = load_messages.clone();
            spawn_local(async move {
                match ApiClient.edit_message(contest_id, id, &body).await {
                    Ok(()) => {
                        editing.set(None);
                        load_messages();
                    }
                    Err(e) => failure.set(Some(e.context("Failed to edit message"))),
                }
            });
        })
    };

    let on_edit_cancel = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };

    let on_delete_confirm = {
        let pending_delete = pending_delete.clone();
        let messages = messages.clone();
        let failure = failure.clone();
        let viewer = viewer.clone();
        let load_messages = load_messages.clone();
        Callback::from(move |_| {
            let Some(id) = *pending_delete else { return };
            pending_delete.set(None);
            let Some(actor) = viewer.clone() else { return };
            let Some(message) = messages.iter().find(|m| m.id == id).cloned() else {
                return;
            };
            if let Err(e) = authorize_delete(&message, &actor, Config::policy().edit_window(), Utc::now()) {
                failure.set(Some(e.to_string()));
                return;
            }
            let failure = failure.clone();
            let load_messages = load_messages.clone();
            spawn_local(async move {
                match ApiClient.delete_message(contest_id, id).await {
                    Ok(()) => load_messages(),
                    Err(e) => failure.set(Some(e.context("Failed to delete message"))),
                }
            });
        })
    };

    let on_delete_cancel = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_| pending_delete.set(None))
    };

    let on_failure_close = {
        let failure = failure.clone();
        Callback::from(move |_| failure.set(None))
    };

    let render_message = |message: &ChatMessage| {
        let mine = viewer.as_ref().map(|u| u.id == message.user_id).unwrap_or(false);
        let controls = can_moderate(message, viewer.as_ref());
        let being_edited = editing
            .as_ref()
            .filter(|(id, _)| *id == message.id)
            .map(|(_, text)| text.clone());

        let on_edit = {
            let editing = editing.clone();
            let id = message.id;
            let text = message.editable_text().to_string();
            Callback::from(move |_| editing.set(Some((id, text.clone()))))
        };
        let on_delete = {
            let pending_delete = pending_delete.clone();
            let id = message.id;
            Callback::from(move |_| pending_delete.set(Some(id)))
        };

        let bubble = if message.is_admin_message {
            "bg-yellow-50 border border-yellow-300"
        } else if mine {
            "bg-indigo-50"
        } else {
            "bg-gray-50"
        };

        html! {
            <li key={message.id} class={classes!("flex", "gap-3", "p-3", "rounded-md", bubble)}>
                <div class="h-8 w-8 rounded-full bg-indigo-600 text-white flex items-center justify-center text-sm">
                    {message.initial()}
                </div>
                <div class="flex-1">
                    <div class="flex items-center gap-2 text-xs text-gray-500">
                        <span class="font-medium text-gray-800">{&message.username}</span>
                        if message.is_admin {
                            <span class="px-1 rounded bg-red-100 text-red-700">{"Admin"}</span>
                        }
                        <span>{format_message_time(message.created_at)}</span>
                    </div>
                    if let Some(text) = being_edited {
                        <div class="flex gap-2 mt-1">
                            <input class="flex-1 border rounded px-2 py-1 text-sm" value={text} oninput={on_edit_input.clone()} />
                            <button class="text-xs text-indigo-600" onclick={on_edit_save.clone()}>{"Save"}</button>
                            <button class="text-xs text-gray-500" onclick={on_edit_cancel.clone()}>{"Cancel"}</button>
                        </div>
                    } else {
                        <p class="text-sm mt-1 whitespace-pre-wrap">{&message.message}</p>
                    }
                </div>
                if controls {
                    <div class="flex flex-col gap-1 text-xs">
                        <button class="text-indigo-600" onclick={on_edit}>{"Edit"}</button>
                        <button class="text-red-600" onclick={on_delete}>{"Delete"}</button>
                    </div>
                }
            </li>
        }
    };

    html! {
        <div class="bg-white rounded-lg shadow flex flex-col h-[32rem]">
            <div class="px-4 py-3 border-b flex justify-between items-center">
                <h3 class="font-semibold">{"Lobby chat"}</h3>
                <span class="text-xs text-gray-500">{format!("{} participants", participants.len())}</span>
            </div>
            <ul class="flex-1 overflow-y-auto p-4 space-y-2">
                if messages.is_empty() {
                    <li class="text-sm text-gray-500 text-center">{"No messages yet. Say hi!"}</li>
                }
                { for messages.iter().map(render_message) }
            </ul>
            <form ref={form_ref} class="border-t p-3 flex flex-col gap-2" onsubmit={on_send}>
                <textarea
                    class="w-full border rounded-md px-3 py-2 text-sm"
                    rows="2"
                    maxlength="1000"
                    placeholder="Type a message..."
                    value={(*draft).clone()}
                    oninput={on_draft}
                    onkeydown={on_draft_key}
                />
                <div class="flex justify-between items-center">
                    if is_admin {
                        <label class="text-xs flex items-center gap-1">
                            <input type="checkbox" checked={*announce} onchange={on_announce_toggle} />
                            {"Send as announcement"}
                        </label>
                    } else {
                        <span></span>
                    }
                    <button type="submit" disabled={draft.trim().is_empty()} class="px-4 py-1 rounded-md bg-indigo-600 text-white text-sm disabled:opacity-50">
                        {"Send"}
                    </button>
                </div>
            </form>
            <ConfirmModal
                is_open={pending_delete.is_some()}
                title={"Delete message".to_string()}
                message={"Are you sure you want to delete this message?".to_string()}
                on_confirm={on_delete_confirm}
                on_cancel={on_delete_cancel}
                confirm_text={"Delete".to_string()}
                danger=true
            />
            <Modal
                is_open={failure.is_some()}
                title={"Chat error".to_string()}
                message={(*failure).clone().unwrap_or_default()}
                on_close={on_failure_close}
            />
        </div>
    }
}
