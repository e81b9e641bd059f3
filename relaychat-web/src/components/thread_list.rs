use shared::models::ThreadRecord;
use yew::{Callback, Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct ThreadListProps {
    pub threads: Vec<ThreadRecord>,
    #[prop_or(None)]
    pub selected: Option<String>,
    pub on_select: Callback<String>,
}

#[function_component(ThreadList)]
pub fn thread_list(props: &ThreadListProps) -> Html {
    if props.threads.is_empty() {
        return html! {
            <div class="p-4 text-sm text-base-content/70">
                {"No threads in this channel yet."}
            </div>
        };
    }

    html! {
        <ul class="divide-y divide-base-300">
            { for props.threads.iter().filter_map(|thread| {
                let key = thread.key()?.to_string();
                let is_selected = props.selected.as_deref() == Some(key.as_str());
                let on_select = props.on_select.clone();
                let class = if is_selected {
                    classes!("p-3", "bg-base-300", "cursor-pointer")
                } else {
                    classes!("p-3", "hover:bg-base-200", "cursor-pointer")
                };
                let emitted = key.clone();
                Some(html! {
                    <li
                        key={key}
                        class={class}
                        onclick={Callback::from(move |_| on_select.emit(emitted.clone()))}
                    >
                        <div class="text-sm font-medium text-base-content">{ thread.display_name() }</div>
                        <div class="text-xs text-base-content/50 mt-1 font-mono">
                            { thread.id.clone().unwrap_or_default() }
                        </div>
                    </li>
                })
            })}
        </ul>
    }
}
