use std::rc::Rc;

use shared::{ActiveView, DashboardModel, Modal, MonthlySeries, Theme};
use yew::prelude::*;

use super::attendance_modal::AttendanceModal;
use super::charts::monthly_bar_chart::{
    ABSENT_BAR, OVERALL_ABSENT_BAR, OVERALL_PRESENT_BAR, PRESENT_BAR, TOTAL_BAR,
};
use super::charts::{MonthlyBarChart, OverviewCard};
use super::delete_modal::DeleteModal;
use super::header::Header;
use super::record_table::RecordTable;
use super::sidebar::Sidebar;
use crate::hooks::use_api_client::use_api_client;
use crate::hooks::use_attendance_editor::EditorSeed;
use crate::hooks::use_records::use_records;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub owner_email: String,
    pub theme: Theme,
    pub on_toggle_theme: Callback<()>,
    pub on_sign_out: Callback<()>,
}

/// Dashboard UI state held in a reducer so async completions see the latest
/// dialog rather than the one captured at click time.
#[derive(Clone, Default, PartialEq)]
struct DashboardState(DashboardModel);

enum DashboardAction {
    ToggleSidebar,
    Show(ActiveView),
    Open(Modal),
    Close,
    BeginDelete,
    DeleteFinished { record_id: String, succeeded: bool },
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = self.0.clone();
        match action {
            DashboardAction::ToggleSidebar => next.toggle_sidebar(),
            DashboardAction::Show(view) => next.show(view),
            DashboardAction::Open(modal) => next.open(modal),
            DashboardAction::Close => next.close_modal(),
            DashboardAction::BeginDelete => {
                next.begin_delete();
            }
            DashboardAction::DeleteFinished { record_id, succeeded } => {
                next.finish_delete(&record_id, succeeded)
            }
        }
        if next == self.0 {
            return self;
        }
        Rc::new(DashboardState(next))
    }
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let api_client = use_api_client();
    let records = use_records(&api_client, &props.owner_email);
    let state = use_reducer(DashboardState::default);
    let model = &state.0;

    let on_toggle_sidebar = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(DashboardAction::ToggleSidebar))
    };
    let on_select_view = {
        let state = state.clone();
        Callback::from(move |view: ActiveView| state.dispatch(DashboardAction::Show(view)))
    };
    let on_add = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(DashboardAction::Open(Modal::Add)))
    };
    let on_edit = {
        let state = state.clone();
        Callback::from(move |record_id: String| {
            state.dispatch(DashboardAction::Open(Modal::Edit { record_id }))
        })
    };
    let on_delete = {
        let state = state.clone();
        Callback::from(move |record_id: String| {
            state.dispatch(DashboardAction::Open(Modal::Delete { record_id }))
        })
    };
    let on_close_modal = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(DashboardAction::Close))
    };
    let on_confirm_delete = {
        let state = state.clone();
        let delete = records.actions.delete.clone();
        Callback::from(move |_| {
            let mut preview = state.0.clone();
            let Some(record_id) = preview.begin_delete() else {
                return;
            };
            state.dispatch(DashboardAction::BeginDelete);

            let dispatcher = state.dispatcher();
            let finished_id = record_id.clone();
            let on_done = Callback::from(move |succeeded: bool| {
                dispatcher.dispatch(DashboardAction::DeleteFinished {
                    record_id: finished_id.clone(),
                    succeeded,
                })
            });
            delete.emit((record_id, on_done));
        })
    };

    let series = MonthlySeries::from_stats(&records.state.monthly);
    let loading = records.state.loading;

    let content = match model.active_view {
        ActiveView::Dashboard => html! {
            <div class="dashboard-grid">
                <OverviewCard records={records.state.records.clone()} />
                <MonthlyBarChart
                    title="Monthly Attendance"
                    series={series.clone()}
                    bars={vec![OVERALL_PRESENT_BAR, OVERALL_ABSENT_BAR]}
                    loading={loading}
                />
                {for [PRESENT_BAR, ABSENT_BAR, TOTAL_BAR].into_iter().map(|bar| html! {
                    <MonthlyBarChart
                        title={bar.metric.title()}
                        series={series.clone()}
                        bars={vec![bar]}
                        loading={loading}
                    />
                })}
            </div>
        },
        ActiveView::Details => html! {
            <RecordTable
                records={records.state.records.clone()}
                loading={loading}
                on_edit={on_edit}
                on_delete={on_delete}
            />
        },
    };

    let modal = match &model.modal {
        None => html! {},
        Some(Modal::Add) => html! {
            <AttendanceModal
                api_client={api_client.clone()}
                seed={EditorSeed::Create { owner_email: props.owner_email.clone() }}
                on_close={on_close_modal.clone()}
                on_saved={records.actions.refresh.clone()}
            />
        },
        Some(Modal::Edit { record_id }) => {
            match records.state.records.iter().find(|r| &r.id == record_id) {
                Some(record) => html! {
                    <AttendanceModal
                        key={record_id.clone()}
                        api_client={api_client.clone()}
                        seed={EditorSeed::Edit(record.clone())}
                        on_close={on_close_modal.clone()}
                        on_saved={records.actions.refresh.clone()}
                    />
                },
                None => html! {},
            }
        }
        Some(Modal::Delete { .. }) => html! {
            <DeleteModal
                on_confirm={on_confirm_delete}
                on_cancel={on_close_modal.clone()}
                deleting={model.deleting}
            />
        },
    };

    html! {
        <div class={classes!("dashboard", model.sidebar_open.then_some("sidebar-open"))}>
            <Sidebar
                open={model.sidebar_open}
                active_view={model.active_view}
                on_select={on_select_view}
                on_sign_out={props.on_sign_out.clone()}
            />
            <div class="dashboard-main">
                <Header
                    title={model.active_view.label()}
                    owner_email={props.owner_email.clone()}
                    theme={props.theme}
                    on_toggle_sidebar={on_toggle_sidebar}
                    on_toggle_theme={props.on_toggle_theme.clone()}
                    on_add={on_add}
                />
                <main class="dashboard-content">{content}</main>
            </div>
            {modal}
        </div>
    }
}
