use std::f64::consts::PI;

use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::OverviewStat;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

const SIZE: u32 = 220;
const TAKEN_COLOR: RGBColor = RGBColor(0x22, 0xC5, 0x5E);
const MISSED_COLOR: RGBColor = RGBColor(0xEF, 0x44, 0x44);
const EMPTY_COLOR: RGBColor = RGBColor(0xE5, 0xE7, 0xEB);

#[derive(Properties, PartialEq)]
pub struct AttendancePieProps {
    pub stat: OverviewStat,
}

/// Attended vs missed classes as a pie
pub struct AttendancePie {
    canvas_ref: NodeRef,
}

/// Outline of a wedge spanning `start..end` (fractions of a full turn,
/// clockwise from twelve o'clock).
fn wedge_points(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = (((end - start) * 120.0).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let turn = start + (end - start) * i as f64 / steps as f64;
        let angle = turn * 2.0 * PI - PI / 2.0;
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        ));
    }
    points
}

impl Component for AttendancePie {
    type Message = ();
    type Properties = AttendancePieProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, _ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw_chart(&ctx.props().stat);
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let [taken, missed] = ctx.props().stat.slices();

        html! {
            <div class="pie-chart">
                <canvas ref={self.canvas_ref.clone()} width={SIZE.to_string()} height={SIZE.to_string()}></canvas>
                <div class="chart-legend">
                    <span class="legend-item">
                        <span class="legend-swatch" style="background: #22c55e;"></span>
                        {format!("{}: {}", taken.label, taken.value)}
                    </span>
                    <span class="legend-item">
                        <span class="legend-swatch" style="background: #ef4444;"></span>
                        {format!("{}: {}", missed.label, missed.value)}
                    </span>
                </div>
            </div>
        }
    }
}

impl AttendancePie {
    fn draw_chart(&self, stat: &OverviewStat) {
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

        let half = (SIZE / 2) as i32;
        let center = (half, half);
        let radius = f64::from(half - 10);
        let [taken, missed] = stat.slices();
        let sum = taken.value + missed.value;

        if sum == 0 {
            let _ = root.draw(&Circle::new(center, radius as i32, EMPTY_COLOR.filled()));
            let _ = root.present();
            return;
        }

        let split = f64::from(taken.value) / f64::from(sum);
        let wedges = [(0.0, split, TAKEN_COLOR), (split, 1.0, MISSED_COLOR)];
        for (start, end, color) in wedges {
            if end - start <= f64::EPSILON {
                continue;
            }
            if root
                .draw(&Polygon::new(wedge_points(center, radius, start, end), color.filled()))
                .is_err()
            {
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
    fn test_wedge_starts_at_twelve_o_clock() {
        let points = wedge_points((100, 100), 50.0, 0.0, 0.25);
        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (100, 50));
        assert_eq!(*points.last().unwrap(), (150, 100));
    }

    #[test]
    fn test_tiny_wedge_still_has_an_arc() {
        let points = wedge_points((0, 0), 10.0, 0.5, 0.5001);
        assert!(points.len() >= 4);
    }
}
