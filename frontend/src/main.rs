use shared::{Page, Route};
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::{Dashboard, Landing};
use hooks::use_identity::use_identity;
use hooks::use_route::use_route;
use hooks::use_theme::use_theme;
use services::config::app_config;
use services::identity::sign_out;
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let identity = use_identity();
    let route = use_route();
    let theme = use_theme();

    let on_open_dashboard = {
        let navigate = route.navigate.clone();
        Callback::from(move |_| navigate.emit(Route::Dashboard))
    };

    let on_sign_out = {
        let navigate = route.navigate.clone();
        Callback::from(move |_| {
            sign_out();
            navigate.emit(Route::Landing);
        })
    };

    match Page::resolve(route.route, &identity) {
        Page::Landing => html! {
            <Landing identity={identity.clone()} on_open_dashboard={on_open_dashboard} />
        },
        Page::Dashboard { owner_email } => html! {
            <Dashboard
                key={owner_email.clone()}
                owner_email={owner_email.clone()}
                theme={theme.theme}
                on_toggle_theme={theme.toggle}
                on_sign_out={on_sign_out}
            />
        },
    }
}

fn main() {
    let config = app_config();
    Logger::init(config.log_level);
    log::info!("Attendance tracker starting against {}", config.api_base_url);

    yew::Renderer::<App>::new().render();
}
