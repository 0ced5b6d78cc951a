use shared::ActiveView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub open: bool,
    pub active_view: ActiveView,
    pub on_select: Callback<ActiveView>,
    pub on_sign_out: Callback<()>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let on_sign_out = {
        let on_sign_out = props.on_sign_out.clone();
        Callback::from(move |_: MouseEvent| on_sign_out.emit(()))
    };

    html! {
        <aside class={classes!("sidebar", (!props.open).then_some("collapsed"))}>
            <div class="sidebar-brand">{if props.open { "Attendance Tracker" } else { "AT" }}</div>
            <nav class="sidebar-nav">
                {for [ActiveView::Dashboard, ActiveView::Details].into_iter().map(|view| {
                    let on_select = props.on_select.clone();
                    html! {
                        <button
                            type="button"
                            class={classes!("nav-item", (view == props.active_view).then_some("active"))}
                            onclick={Callback::from(move |_: MouseEvent| on_select.emit(view))}
                        >
                            {if props.open { view.label() } else { &view.label()[..1] }}
                        </button>
                    }
                })}
            </nav>
            <button type="button" class="nav-item sign-out" onclick={on_sign_out}>
                {if props.open { "Sign Out" } else { "⎋" }}
            </button>
        </aside>
    }
}
