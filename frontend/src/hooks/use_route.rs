use gloo::history::{BrowserHistory, History};
use shared::Route;
use yew::prelude::*;

#[derive(Clone)]
pub struct UseRouteResult {
    pub route: Route,
    pub navigate: Callback<Route>,
}

fn current_route(history: &BrowserHistory) -> Route {
    Route::from_path(&history.location().path())
}

#[hook]
pub fn use_route() -> UseRouteResult {
    let history = use_memo((), |_| BrowserHistory::new());
    let route = {
        let history = history.clone();
        use_state(move || current_route(&history))
    };

    {
        let history = history.clone();
        let route = route.clone();
        use_effect_with((), move |_| {
            let observed = history.clone();
            let listener = history.listen(move || route.set(current_route(&observed)));
            move || drop(listener)
        });
    }

    let navigate = {
        let history = history.clone();
        use_callback((), move |target: Route, _| {
            if current_route(&history) != target {
                history.push(target.path());
            }
        })
    };

    UseRouteResult {
        route: *route,
        navigate,
    }
}
