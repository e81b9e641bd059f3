use crate::routes::MainRoute;
use web_sys::window;
use yew::{Children, Html, Properties, classes, function_component, html, use_effect_with};
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    // Adds data-theme attribute to html tag for theme support
    use_effect_with((), |_| {
        if let Some(html_element) = window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        {
            html_element
                .set_attribute("data-theme", "dark")
                .unwrap_or_default();
        }
        || {}
    });

    html! {
        <div class="min-h-screen bg-base-100 flex flex-col">
            <header class="navbar border-b border-base-300">
                <Link<MainRoute> to={MainRoute::Home} classes="btn btn-ghost text-xl">
                    { "RelayChat" }
                </Link<MainRoute>>
            </header>
            <main class={classes!("flex-grow", "transition-all", "duration-300")}>
                { props.children.clone() }
            </main>
        </div>
    }
}
