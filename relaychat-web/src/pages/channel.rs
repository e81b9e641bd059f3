use crate::api::GatewayClient;
use crate::components::{Loading, ThreadList};
use crate::models::threads_state::ThreadsState;
use crate::storage;
use shared::models::{normalize_thread_detail, normalize_threads};
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::{
    Callback, Html, Properties, SubmitEvent, function_component, html, use_effect_with,
    use_node_ref, use_state,
};
use yewdux::prelude::use_store;

#[derive(Properties, PartialEq, Eq)]
pub struct ChannelPageProps {
    pub channel_id: String,
}

/// Threads of one channel, with the selected thread's details.
#[function_component(ChannelPage)]
pub fn channel_page(props: &ChannelPageProps) -> Html {
    let (state, dispatch) = use_store::<ThreadsState>();
    let reload = use_state(|| 0_u32);

    {
        let dispatch = dispatch.clone();
        use_effect_with(
            (props.channel_id.clone(), *reload),
            move |(channel_id, _)| {
                let channel_id = channel_id.clone();
                dispatch.reduce_mut(|state| state.begin_fetch(&channel_id));
                spawn_local(async move {
                    match GatewayClient::shared().list_threads(&channel_id).await {
                        Ok(payload) => {
                            let threads = normalize_threads(payload, &storage::thread_id_cache());
                            dispatch.reduce_mut(move |state| state.finish_fetch(threads));
                        }
                        Err(err) => {
                            warn!(channel_id = %channel_id, error = %err, "failed to fetch threads");
                            let message = err.describe_or("Failed to fetch threads");
                            dispatch.reduce_mut(move |state| state.fail_fetch(message));
                        }
                    }
                });
                || ()
            },
        );
    }

    let on_select = {
        let dispatch = dispatch.clone();
        Callback::from(move |key: String| {
            dispatch.reduce_mut(|state| state.select_by_key(&key));
        })
    };

    let on_refresh = {
        let dispatch = dispatch.clone();
        let thread_id = state.selected.as_ref().and_then(|thread| thread.id.clone());
        Callback::from(move |_| {
            let Some(thread_id) = thread_id.clone() else {
                return;
            };
            let dispatch = dispatch.clone();
            dispatch.reduce_mut(ThreadsState::begin_detail);
            spawn_local(async move {
                match GatewayClient::shared().get_thread(&thread_id).await {
                    Ok(payload) => {
                        let thread = normalize_thread_detail(payload, &storage::thread_id_cache());
                        dispatch.reduce_mut(move |state| state.finish_detail(thread));
                    }
                    Err(err) => {
                        warn!(thread_id = %thread_id, error = %err, "failed to fetch thread");
                        let message = err.describe_or("Failed to fetch thread");
                        dispatch.reduce_mut(move |state| state.fail_detail(message));
                    }
                }
            });
        })
    };

    let new_thread_input = use_node_ref();
    let on_create = {
        let dispatch = dispatch.clone();
        let input = new_thread_input.clone();
        let channel_id = props.channel_id.clone();
        let reload = reload.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(element) = input.cast::<HtmlInputElement>() else {
                return;
            };
            let thread_name = element.value().trim().to_string();
            if thread_name.is_empty() {
                return;
            }
            element.set_value("");
            let dispatch = dispatch.clone();
            let channel_id = channel_id.clone();
            let reload = reload.clone();
            dispatch.reduce_mut(ThreadsState::begin_detail);
            spawn_local(async move {
                let user_id = storage::session_user_id();
                let created = GatewayClient::shared()
                    .create_thread(&channel_id, user_id.as_deref(), &thread_name)
                    .await;
                match created {
                    Ok(payload) => {
                        let thread = normalize_thread_detail(payload, &storage::thread_id_cache());
                        dispatch.reduce_mut(move |state| {
                            state.add(thread);
                            state.loading = false;
                        });
                        reload.set(*reload + 1);
                    }
                    Err(err) => {
                        warn!(channel_id = %channel_id, error = %err, "failed to create thread");
                        let message = err.describe_or("Failed to create thread");
                        dispatch.reduce_mut(move |state| state.fail_detail(message));
                    }
                }
            });
        })
    };

    let on_delete = {
        let dispatch = dispatch.clone();
        let thread_id = state.selected.as_ref().and_then(|thread| thread.id.clone());
        Callback::from(move |_| {
            let Some(thread_id) = thread_id.clone() else {
                return;
            };
            let dispatch = dispatch.clone();
            dispatch.reduce_mut(ThreadsState::begin_detail);
            spawn_local(async move {
                match GatewayClient::shared().delete_thread(&thread_id).await {
                    Ok(()) => dispatch.reduce_mut(move |state| {
                        state.remove(&thread_id);
                        state.loading = false;
                    }),
                    Err(err) => {
                        warn!(thread_id = %thread_id, error = %err, "failed to delete thread");
                        let message = err.describe_or("Failed to delete thread");
                        dispatch.reduce_mut(move |state| state.fail_detail(message));
                    }
                }
            });
        })
    };

    let on_forget_ids = {
        let dispatch = dispatch.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            storage::thread_id_cache().clear();
            dispatch.reduce_mut(ThreadsState::clear);
            reload.set(*reload + 1);
        })
    };

    let selected_panel = match state.selected.as_ref() {
        Some(thread) => html! {
            <div class="p-4 space-y-2">
                <h3 class="text-lg font-semibold">{ thread.display_name() }</h3>
                <dl class="text-xs font-mono space-y-1">
                    <dt class="text-base-content/50">{ "Gateway id" }</dt>
                    <dd>{ thread.id.clone().unwrap_or_default() }</dd>
                    <dt class="text-base-content/50">{ "Local id" }</dt>
                    <dd>{ thread.local_id.clone().unwrap_or_default() }</dd>
                </dl>
                <div class="flex gap-2">
                    <button class="btn btn-sm" onclick={on_refresh}>{ "Refresh" }</button>
                    <button class="btn btn-sm btn-error" onclick={on_delete}>{ "Delete" }</button>
                </div>
            </div>
        },
        None => html! {
            <div class="p-4 text-sm text-base-content/70">{ "Select a thread." }</div>
        },
    };

    html! {
        <div class="flex h-full">
            <aside class="w-72 border-r border-base-300 overflow-y-auto">
                <div class="p-3 flex items-center justify-between">
                    <span class="font-semibold">{ format!("# {}", props.channel_id) }</span>
                    <button class="btn btn-ghost btn-xs" onclick={on_forget_ids}>
                        { "Forget cached thread ids" }
                    </button>
                </div>
                <form class="p-2 flex gap-2" onsubmit={on_create}>
                    <input
                        ref={new_thread_input}
                        class="input input-bordered input-sm flex-1"
                        placeholder="New thread"
                    />
                    <button class="btn btn-sm btn-primary" type="submit">{ "Create" }</button>
                </form>
                {
                    if let Some(error) = state.error.as_ref() {
                        html! { <div class="alert alert-error m-2 text-sm">{ error.clone() }</div> }
                    } else {
                        Html::default()
                    }
                }
                {
                    if state.loading {
                        html! { <Loading /> }
                    } else {
                        html! {
                            <ThreadList
                                threads={state.threads.clone()}
                                selected={state.selected_key()}
                                {on_select}
                            />
                        }
                    }
                }
            </aside>
            <main class="flex-1">{ selected_panel }</main>
        </div>
    }
}
