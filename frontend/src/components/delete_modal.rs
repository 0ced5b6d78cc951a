use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DeleteModalProps {
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
    /// Confirmed and waiting on the store
    #[prop_or_default]
    pub deleting: bool,
}

#[function_component(DeleteModal)]
pub fn delete_modal(props: &DeleteModalProps) -> Html {
    let on_backdrop_click = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };
    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_cancel_click = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };
    let on_confirm_click = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal delete-modal" onclick={on_modal_click}>
                <h3 class="modal-title">{"Delete Attendance"}</h3>
                <p>{"This record will be removed permanently. Continue?"}</p>
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel_click}>
                        {"Cancel"}
                    </button>
                    <button
                        type="button"
                        class="btn btn-danger"
                        disabled={props.deleting}
                        onclick={on_confirm_click}
                    >
                        {if props.deleting { "Deleting..." } else { "Delete" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
