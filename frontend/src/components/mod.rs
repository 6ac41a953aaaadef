pub mod nav;
pub mod contest {
    pub mod chat;
    pub mod confirmation_modal;
    pub mod registration_form;
}
pub mod common_modal;
