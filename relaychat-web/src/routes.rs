use crate::containers::layout::Layout;
use crate::pages::{ChannelPage, ErrorPage, HomePage, LoginPage};
use tracing::debug;
use yew::prelude::*;
use yew_router::prelude::*;

/// The main routes
#[derive(Debug, Clone, PartialEq, Routable)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/channels/:channel_id")]
    Channel { channel_id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    debug!(?route, "switching main route");
    let page = match route {
        MainRoute::Home => html! { <HomePage /> },
        MainRoute::Login => html! { <LoginPage /> },
        MainRoute::Channel { channel_id } => html! { <ChannelPage {channel_id} /> },
        MainRoute::NotFound => html! { <ErrorPage /> },
    };
    html! { <Layout>{ page }</Layout> }
}
