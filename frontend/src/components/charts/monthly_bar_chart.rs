use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::stats::Metric;
use shared::MonthlySeries;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

/// One bar per month for `metric`, drawn in `color`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpec {
    pub metric: Metric,
    pub color: (u8, u8, u8),
}

impl BarSpec {
    pub const fn new(metric: Metric, color: (u8, u8, u8)) -> Self {
        Self { metric, color }
    }

    fn rgb(&self) -> RGBColor {
        RGBColor(self.color.0, self.color.1, self.color.2)
    }
}

pub const PRESENT_BAR: BarSpec = BarSpec::new(Metric::Present, (0x4C, 0xAF, 0x50));
pub const ABSENT_BAR: BarSpec = BarSpec::new(Metric::Absent, (0xF4, 0x43, 0x36));
pub const TOTAL_BAR: BarSpec = BarSpec::new(Metric::Total, (0x21, 0x96, 0xF3));
pub const OVERALL_PRESENT_BAR: BarSpec = BarSpec::new(Metric::Present, (0x50, 0xC8, 0x78));
pub const OVERALL_ABSENT_BAR: BarSpec = BarSpec::new(Metric::Absent, (0xDC, 0x14, 0x3C));

#[derive(Properties, PartialEq)]
pub struct MonthlyBarChartProps {
    pub title: AttrValue,
    pub series: MonthlySeries,
    /// Bars drawn side by side within each month, left to right
    pub bars: Vec<BarSpec>,
    pub loading: bool,
}

pub struct MonthlyBarChart {
    canvas_ref: NodeRef,
}

/// Segment holding bar `bar` of month `month` when `per_month` bars share a month
fn slot(month: usize, bar: usize, per_month: usize) -> u32 {
    (month * per_month + bar) as u32
}

/// Month label for the first slot of each group, blank elsewhere
fn slot_label(labels: &[String], slot: u32, per_month: usize) -> String {
    let slot = slot as usize;
    if per_month == 0 || slot % per_month != 0 {
        return String::new();
    }
    labels.get(slot / per_month).cloned().unwrap_or_default()
}

impl Component for MonthlyBarChart {
    type Message = ();
    type Properties = MonthlyBarChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, _ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let props = ctx.props();
        if !props.series.is_empty() {
            self.draw_chart(&props.series, &props.bars);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();

        html! {
            <div class="chart-card">
                <div class="chart-title-header">
                    <h3 class="chart-title">{props.title.clone()}</h3>
                    <div class="chart-legend">
                        {for props.bars.iter().map(|bar| {
                            let (r, g, b) = bar.color;
                            html! {
                                <span class="legend-item">
                                    <span class="legend-swatch" style={format!("background: rgb({}, {}, {});", r, g, b)}></span>
                                    {bar.metric.legend()}
                                </span>
                            }
                        })}
                    </div>
                </div>

                {if props.series.is_empty() && props.loading {
                    html! {
                        <div class="chart-loading">
                            <div class="loading-spinner"></div>
                            <p>{"Loading chart data..."}</p>
                        </div>
                    }
                } else if props.series.is_empty() {
                    html! {
                        <div class="chart-empty">
                            <p>{"No monthly data yet"}</p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="chart-content">
                            <canvas ref={self.canvas_ref.clone()} class="bar-chart-canvas" width="600" height="300"></canvas>
                        </div>
                    }
                }}
            </div>
        }
    }
}

impl MonthlyBarChart {
    fn draw_chart(&self, series: &MonthlySeries, bars: &[BarSpec]) {
        if bars.is_empty() {
            return;
        }

        let Some(canvas) = self.canvas_ref.cast::<HtmlCanvasElement>() else {
            return;
        };
        let Some(backend) = CanvasBackend::with_canvas_object(canvas) else {
            return;
        };

        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let per_month = bars.len();
        let slots = slot(series.len(), 0, per_month);
        let metrics: Vec<Metric> = bars.iter().map(|b| b.metric).collect();
        let y_max = series.max_value(&metrics) + 1;

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(45)
            .build_cartesian_2d((0u32..slots).into_segmented(), 0u32..y_max)
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        let labels = &series.labels;
        let formatter = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(slot) | SegmentValue::Exact(slot) => {
                slot_label(labels, *slot, per_month)
            }
            SegmentValue::Last => String::new(),
        };

        if chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots as usize)
            .x_label_formatter(&formatter)
            .y_desc("Classes")
            .label_style(("sans-serif", 12, &RGBColor(90, 90, 90)))
            .axis_style(&RGBColor(220, 220, 220))
            .bold_line_style(&RGBColor(240, 240, 240))
            .draw()
            .is_err()
        {
            return;
        }

        for (bar_index, bar) in bars.iter().enumerate() {
            let values = series.values(bar.metric);
            let data = values
                .iter()
                .enumerate()
                .map(|(month, value)| (slot(month, bar_index, per_month), *value));

            if chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(bar.rgb().filled())
                        .margin(4)
                        .data(data),
                )
                .is_err()
            {
                log::warn!("Failed to draw {} bars", bar.metric.legend());
                return;
            }
        }

        let _ = root.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_group_bars_by_month() {
        assert_eq!(slot(0, 0, 2), 0);
        assert_eq!(slot(0, 1, 2), 1);
        assert_eq!(slot(3, 1, 2), 7);
        assert_eq!(slot(3, 0, 1), 3);
    }

    #[test]
    fn test_slot_labels_only_on_group_start() {
        let labels = vec!["Jan 2025".to_string(), "Feb 2025".to_string()];
        assert_eq!(slot_label(&labels, 0, 2), "Jan 2025");
        assert_eq!(slot_label(&labels, 1, 2), "");
        assert_eq!(slot_label(&labels, 2, 2), "Feb 2025");
        assert_eq!(slot_label(&labels, 4, 2), "");
        assert_eq!(slot_label(&labels, 1, 1), "Feb 2025");
    }

    #[test]
    fn test_metric_palette() {
        assert_eq!(PRESENT_BAR.rgb(), RGBColor(0x4C, 0xAF, 0x50));
        assert_eq!(OVERALL_ABSENT_BAR.metric, Metric::Absent);
    }
}
