use crate::routes::MainRoute;
use web_sys::HtmlInputElement;
use yew::{Callback, Html, SubmitEvent, function_component, html, use_node_ref};
use yew_router::prelude::use_navigator;

/// Landing page: pick a channel by id.
#[function_component(HomePage)]
pub fn home_page() -> Html {
    let navigator = use_navigator();
    let input = use_node_ref();

    let on_submit = {
        let input = input.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(element) = input.cast::<HtmlInputElement>() else {
                return;
            };
            let channel_id = element.value().trim().to_string();
            if channel_id.is_empty() {
                return;
            }
            if let Some(navigator) = &navigator {
                navigator.push(&MainRoute::Channel { channel_id });
            }
        })
    };

    html! {
        <form class="p-4 flex gap-2" onsubmit={on_submit}>
            <input
                ref={input}
                class="input input-bordered flex-1"
                placeholder="Channel id"
            />
            <button class="btn btn-primary" type="submit">{ "Open channel" }</button>
        </form>
    }
}
