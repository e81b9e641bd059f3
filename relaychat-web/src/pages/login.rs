use yew::{Html, function_component, html};

/// Shown after the gateway rejects the stored session.
#[function_component(LoginPage)]
pub fn login_page() -> Html {
    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{ "Signed out" }</h1>
            <p>{ "Your session has ended. Sign in again to keep chatting." }</p>
        </div>
    }
}
