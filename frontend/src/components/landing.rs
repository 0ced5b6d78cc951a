use shared::Identity;
use yew::prelude::*;

use crate::services::identity::open_sign_in;

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub identity: Identity,
    pub on_open_dashboard: Callback<()>,
}

/// Public landing page. Signed-in visitors get a link to their dashboard,
/// everyone else is offered the provider's sign-in dialog.
#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    let signed_in = props.identity.owner_email().is_some();

    let on_primary = {
        let on_open_dashboard = props.on_open_dashboard.clone();
        Callback::from(move |_: MouseEvent| {
            if signed_in {
                on_open_dashboard.emit(());
            } else {
                open_sign_in();
            }
        })
    };

    html! {
        <main class="landing">
            <section class="hero">
                <h1>{"AttendanceHub"}</h1>
                <p class="tagline">
                    {"Record the classes you attend each day and see how your attendance adds up month by month."}
                </p>
                <button type="button" class="btn btn-primary btn-large" onclick={on_primary}>
                    {if signed_in { "Go to Dashboard" } else { "Sign In to Get Started" }}
                </button>
            </section>

            <section class="features">
                <div class="feature">
                    <h3>{"Daily check-ins"}</h3>
                    <p>{"Tick off each class on your timetable, or mark the whole day at once."}</p>
                </div>
                <div class="feature">
                    <h3>{"Canceled classes"}</h3>
                    <p>{"Classes that did not take place never count against you."}</p>
                </div>
                <div class="feature">
                    <h3>{"Monthly charts"}</h3>
                    <p>{"Present, absent and total classes per month at a glance."}</p>
                </div>
            </section>
        </main>
    }
}
