use shared::Theme;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub title: AttrValue,
    pub owner_email: String,
    pub theme: Theme,
    pub on_toggle_sidebar: Callback<()>,
    pub on_toggle_theme: Callback<()>,
    pub on_add: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_toggle_sidebar = {
        let cb = props.on_toggle_sidebar.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_toggle_theme = {
        let cb = props.on_toggle_theme.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_add = {
        let cb = props.on_add.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <header class="header">
            <button type="button" class="sidebar-toggle" title="Toggle sidebar" onclick={on_toggle_sidebar}>{"☰"}</button>
            <h1>{props.title.clone()}</h1>
            <div class="header-right">
                <span class="owner-email">{&props.owner_email}</span>
                <button type="button" class="theme-toggle" title="Toggle theme" onclick={on_toggle_theme}>
                    {if props.theme.is_dark() { "☀️" } else { "🌙" }}
                </button>
                <button type="button" class="btn btn-primary" onclick={on_add}>{"+ Add Attendance"}</button>
            </div>
        </header>
    }
}
