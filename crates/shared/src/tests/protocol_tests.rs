use super::*;

#[test]
fn signals_use_snake_case_type_tag() {
    let raw = serde_json::to_value(CarouselSignal::IndicatorClicked { index: 2 }).expect("json");
    assert_eq!(raw["type"], "indicator_clicked");
    assert_eq!(raw["index"], 2);

    let raw = serde_json::to_value(CarouselSignal::PointerLeft).expect("json");
    assert_eq!(raw, serde_json::json!({ "type": "pointer_left" }));
}

#[test]
fn image_signal_parses_from_scenario_json() {
    let signal: CarouselSignal =
        serde_json::from_str(r#"{ "type": "image_failed", "image": 3 }"#).expect("parse");
    assert_eq!(signal, CarouselSignal::ImageFailed { image: ImageId(3) });
    assert_eq!(signal.name(), "image_failed");
}

#[test]
fn timer_signal_flattens_payload_next_to_tag() {
    let signal = CarouselSignal::TimerFired(TimerFired {
        id: TimerId(9),
        kind: TimerKind::AutoplayTick,
    });
    let raw = serde_json::to_value(signal).expect("json");
    assert_eq!(raw["type"], "timer_fired");
    assert_eq!(raw["id"], 9);
    assert_eq!(raw["kind"], "autoplay_tick");
}

#[test]
fn image_settled_maps_outcome_to_signal() {
    assert_eq!(
        CarouselSignal::image_settled(ImageId(1), ImageOutcome::Loaded),
        CarouselSignal::ImageLoaded { image: ImageId(1) }
    );
    assert_eq!(
        CarouselSignal::image_settled(ImageId(1), ImageOutcome::Failed),
        CarouselSignal::ImageFailed { image: ImageId(1) }
    );
}
