use gpui_scatter::data_types::{AxisType, Record, ScatterConfig};
use gpui_scatter::events::{ListenerKind, PointerButton};
use gpui_scatter::{
    ChartHandlers, ChartMount, EventSurface, PointerEventKind, ScatterChart, SurfaceEvent, ZoomState,
};
use std::cell::RefCell;
use std::rc::Rc;

fn chart() -> Rc<RefCell<ScatterChart>> {
    let config = ScatterConfig::default()
        .with_x_axis("X", AxisType::Number, "x")
        .with_y_axis("Y", AxisType::Number, "y");
    let data = (0..6)
        .map(|i| Record::new().with("x", i as f64).with("y", (i * i) as f64).with("name", format!("p{}", i)))
        .collect();
    Rc::new(RefCell::new(ScatterChart::new(data, config).unwrap()))
}

fn mark_centre(chart: &Rc<RefCell<ScatterChart>>, nth: usize) -> (f32, f32) {
    let chart = chart.borrow();
    let scene = chart.scene();
    (scene.plot.x + scene.marks[nth].cx, scene.plot.y + scene.marks[nth].cy)
}

#[test]
fn test_unmount_mid_drag_leaves_no_listeners() {
    let chart = chart();
    let surface = EventSurface::new();
    let mount = ChartMount::attach(&chart, &surface);
    assert_eq!(surface.listener_count(), 5);
    assert_eq!(surface.listener_count_for(ListenerKind::Wheel), 1);

    surface.dispatch(&SurfaceEvent::PointerDown { x: 300.0, y: 200.0, button: PointerButton::Primary, click_count: 1 });
    surface.dispatch(&SurfaceEvent::PointerMove { x: 340.0, y: 220.0, pressed: Some(PointerButton::Primary) });
    assert_eq!(chart.borrow().zoom_state(), ZoomState::Zooming);
    assert!(!chart.borrow().view_transform().is_identity());

    drop(mount);

    assert_eq!(surface.listener_count(), 0);
    let chart = chart.borrow();
    assert_eq!(chart.zoom_state(), ZoomState::Idle);
    assert!(chart.view_transform().is_identity());
    assert!(!chart.zoom().has_transform());
}

#[test]
fn test_events_after_unmount_are_ignored() {
    let chart = chart();
    let surface = EventSurface::new();
    drop(ChartMount::attach(&chart, &surface));
    surface.dispatch(&SurfaceEvent::Wheel { x: 100.0, y: 100.0, delta_x: 0.0, delta_y: -300.0 });
    assert!(chart.borrow().view_transform().is_identity());
}

#[test]
fn test_two_charts_on_separate_surfaces_are_independent() {
    let (a, b) = (chart(), chart());
    let (sa, sb) = (EventSurface::new(), EventSurface::new());
    let _ma = ChartMount::attach(&a, &sa);
    let _mb = ChartMount::attach(&b, &sb);
    sa.dispatch(&SurfaceEvent::Wheel { x: 100.0, y: 100.0, delta_x: 0.0, delta_y: -500.0 });
    assert_eq!(a.borrow().view_transform().k, 2.0);
    assert!(b.borrow().view_transform().is_identity());
}

#[test]
fn test_handlers_receive_the_original_record() {
    let chart = chart();
    let surface = EventSurface::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let recorder = |kind: PointerEventKind| {
        let sink = sink.clone();
        move |e: &gpui_scatter::PointerEvent, r: &Record| {
            assert_eq!(e.kind, kind);
            sink.borrow_mut().push((kind, r.clone()));
        }
    };
    chart.borrow_mut().set_handlers(
        ChartHandlers::default()
            .on_mouse_over(recorder(PointerEventKind::Over))
            .on_mouse_move(recorder(PointerEventKind::Move))
            .on_mouse_out(recorder(PointerEventKind::Out))
            .on_click(recorder(PointerEventKind::Click)),
    );
    let _mount = ChartMount::attach(&chart, &surface);

    let (x, y) = mark_centre(&chart, 3);
    surface.dispatch(&SurfaceEvent::PointerMove { x, y, pressed: None });
    surface.dispatch(&SurfaceEvent::PointerDown { x, y, button: PointerButton::Primary, click_count: 1 });
    surface.dispatch(&SurfaceEvent::PointerUp { x: x + 1.0, y, button: PointerButton::Primary });
    surface.dispatch(&SurfaceEvent::PointerLeave);

    let expected = chart.borrow().data()[3].clone();
    let log = log.borrow();
    let kinds: Vec<_> = log.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![PointerEventKind::Over, PointerEventKind::Move, PointerEventKind::Click, PointerEventKind::Out]
    );
    assert!(log.iter().all(|(_, r)| *r == expected));
}

#[test]
fn test_failed_config_update_keeps_scene() {
    let chart = chart();
    let before = chart.borrow().scene().clone();
    let bad = ScatterConfig::default()
        .with_x_axis("X", AxisType::Temporal, "name")
        .with_y_axis("Y", AxisType::Number, "y");
    assert!(chart.borrow_mut().set_config(bad).is_err());
    assert_eq!(chart.borrow().scene(), &before);

    let invalid = ScatterConfig::default().with_size(-1.0, 10.0);
    assert!(chart.borrow_mut().set_config(invalid).is_err());
    assert_eq!(chart.borrow().scene(), &before);
}
