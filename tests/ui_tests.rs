use gpui::{px, MouseButton, Point, TestAppContext};
use gpui_scatter::data_types::{AxisType, Record, ScatterConfig};
use gpui_scatter::{ScatterChart, ScatterChartView, ZoomState};

fn chart() -> ScatterChart {
    let config = ScatterConfig::default()
        .with_x_axis("X", AxisType::Number, "x")
        .with_y_axis("Y", AxisType::Number, "y");
    let data = (1..=10)
        .map(|i| Record::new().with("x", i as f64).with("y", (i * 3) as f64))
        .collect();
    ScatterChart::new(data, config).unwrap()
}

#[gpui::test]
fn test_view_mounts_chart(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| ScatterChartView::new(chart(), cx));
    window
        .update(cx, |view, _window, _cx| {
            assert!(view.is_mounted());
            assert_eq!(view.surface().listener_count(), 5);
            assert_eq!(view.chart.borrow().scene().marks.len(), 10);
        })
        .unwrap();
}

#[gpui::test]
fn test_unmount_detaches_listeners(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| ScatterChartView::new(chart(), cx));
    window
        .update(cx, |view, _window, _cx| {
            view.chart.borrow_mut().pan(25.0, 0.0);
            view.unmount();
            assert!(!view.is_mounted());
            assert_eq!(view.surface().listener_count(), 0);
            assert!(view.chart.borrow().view_transform().is_identity());
        })
        .unwrap();
}

#[gpui::test]
fn test_drag_pans_the_view(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| ScatterChartView::new(chart(), cx));
    cx.run_until_parked();

    let mut visual_cx = gpui::VisualTestContext::from_window(window.into(), cx);
    let start = Point::new(px(300.0), px(200.0));

    visual_cx.simulate_mouse_down(start, MouseButton::Left, Default::default());
    visual_cx.simulate_mouse_move(
        start + Point::new(px(60.0), px(-30.0)),
        Some(MouseButton::Left),
        Default::default(),
    );

    window
        .update(&mut visual_cx, |view, _window, _cx| {
            let chart = view.chart.borrow();
            let t = chart.view_transform();
            assert_eq!(chart.zoom_state(), ZoomState::Zooming);
            assert_eq!((t.x, t.y), (60.0, -30.0), "drag should pan by the pointer delta");
        })
        .unwrap();

    visual_cx.simulate_mouse_up(
        start + Point::new(px(60.0), px(-30.0)),
        MouseButton::Left,
        Default::default(),
    );
    window
        .update(&mut visual_cx, |view, _window, _cx| {
            assert_eq!(view.chart.borrow().zoom_state(), ZoomState::Idle);
        })
        .unwrap();
}

#[gpui::test]
fn test_set_data_through_view(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| ScatterChartView::new(chart(), cx));
    window
        .update(cx, |view, _window, cx| {
            let fewer = vec![Record::new().with("x", 1.0).with("y", 2.0)];
            view.set_data(fewer, cx).unwrap();
            assert_eq!(view.chart.borrow().scene().marks.len(), 1);

            let bad = vec![Record::new().with("x", "nope").with("y", 2.0)];
            assert!(view.set_data(bad, cx).is_err());
            assert_eq!(view.chart.borrow().scene().marks.len(), 1);
        })
        .unwrap();
}

#[gpui::test]
fn test_right_drag_released_outside_ends_gesture(cx: &mut TestAppContext) {
    let small = ScatterChart::new(
        chart().data().to_vec(),
        chart().config().clone().with_size(300.0, 200.0),
    )
    .unwrap();
    let window = cx.add_window(|_window, cx| ScatterChartView::new(small, cx));
    cx.run_until_parked();

    let mut visual_cx = gpui::VisualTestContext::from_window(window.into(), cx);
    let start = Point::new(px(150.0), px(100.0));
    let outside = Point::new(px(450.0), px(260.0));

    visual_cx.simulate_mouse_down(start, MouseButton::Right, Default::default());
    visual_cx.simulate_mouse_move(
        start + Point::new(px(20.0), px(0.0)),
        Some(MouseButton::Right),
        Default::default(),
    );
    visual_cx.simulate_mouse_up(outside, MouseButton::Right, Default::default());

    let panned = window
        .update(&mut visual_cx, |view, _window, _cx| {
            let chart = view.chart.borrow();
            assert_eq!(chart.zoom_state(), ZoomState::Idle);
            chart.view_transform()
        })
        .unwrap();

    // Without a pressed button, moving back over the chart only hovers.
    visual_cx.simulate_mouse_move(start, None, Default::default());
    window
        .update(&mut visual_cx, |view, _window, _cx| {
            assert_eq!(view.chart.borrow().view_transform(), panned);
        })
        .unwrap();
}
