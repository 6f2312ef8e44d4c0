use gpui::prelude::*;
use gpui::*;
use gpui_scatter::{ChartHandlers, Record, ScatterChart, ScatterChartView, ScatterConfig};
use rand::Rng;

const CONFIG: &str = r##"{
    "width": 900,
    "height": 520,
    "xAxisLabel": "Time",
    "yAxisLabel": "Requests",
    "xAxisType": "temporal",
    "yAxisType": "log",
    "xAxisValue": "timestamp",
    "yAxisValue": "count",
    "fills": ["steelblue", "#e4572e", "#29335c", "#f3a712"],
    "fillKey": "color",
    "themeColor": "#29335c",
    "timeZone": "Europe/Paris"
}"##;

fn sample_records() -> Vec<Record> {
    let mut rng = rand::rng();
    let now = chrono::Utc::now().timestamp_millis() as f64;
    let hour_ms = 3_600_000.0;
    (0..120)
        .map(|i| {
            let timestamp = now - (120 - i) as f64 * hour_ms;
            let count: f64 = rng.random_range(1.0..5000.0);
            Record::new()
                .with("timestamp", timestamp)
                .with("count", count.round())
                .with("color", rng.random_range(0..5) as f64)
        })
        .collect()
}

struct DemoApp {
    chart: Entity<ScatterChartView>,
}

impl DemoApp {
    fn new(cx: &mut Context<Self>) -> Self {
        let config = ScatterConfig::from_json(CONFIG).expect("demo config is valid");
        let handlers = ChartHandlers::default()
            .on_mouse_over(|event, record| println!("over #{}: {:?}", event.index, record))
            .on_click(|event, record| println!("click #{} at ({}, {}): {:?}", event.index, event.x, event.y, record));

        let chart = ScatterChart::new(sample_records(), config)
            .expect("demo data matches the axis types")
            .with_handlers(handlers);
        let chart = cx.new(|cx| ScatterChartView::new(chart, cx));
        Self { chart }
    }
}

impl Render for DemoApp {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .bg(gpui::white())
            .child(self.chart.clone())
    }
}

fn main() {
    Application::new().run(|cx: &mut App| {
        gpui_scatter::init(cx);

        cx.open_window(WindowOptions::default(), |_window, cx| cx.new(|cx| DemoApp::new(cx)))
            .expect("failed to open window");
    });
}
