use slots_shared::session::Notice;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct MessageBannerProps {
    pub notice: Option<Notice>,
}

#[function_component(MessageBanner)]
pub fn message_banner(props: &MessageBannerProps) -> Html {
    let Some(notice) = &props.notice else {
        return html! {};
    };

    let class = if notice.is_error {
        classes!(styles::CARD_ERROR, "error-message", "mb-4")
    } else {
        classes!(styles::CARD_SUCCESS, "mb-4")
    };

    html! {
        <div id="message" class={class}>{ &notice.text }</div>
    }
}
