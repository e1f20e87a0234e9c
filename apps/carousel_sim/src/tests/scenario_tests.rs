use super::*;

use std::io::Write;

#[test]
fn parses_scenario_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{
            "layout": {{
                "slides": 2,
                "indicators": 2,
                "images": [{{ "id": 5, "slide": 1 }}]
            }},
            "events": [
                {{ "at_ms": 40, "signal": {{ "type": "image_failed", "image": 5 }} }},
                {{ "at_ms": 9000, "signal": {{ "type": "indicator_clicked", "index": 0 }} }}
            ],
            "run_until_ms": 10000
        }}"#
    )
    .expect("write");

    let scenario = load_scenario(file.path()).expect("scenario");
    assert_eq!(scenario.layout.slides, 2);
    assert_eq!(scenario.layout.images[0].id, ImageId(5));
    assert_eq!(
        scenario.events[0].signal,
        CarouselSignal::ImageFailed { image: ImageId(5) }
    );
}

#[test]
fn malformed_scenario_names_the_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{{ \"layout\": 3 }}").expect("write");
    let err = load_scenario(file.path()).expect_err("bad scenario");
    assert!(err.to_string().contains("failed to parse scenario"));
}

#[test]
fn ordered_events_sort_stably_and_drop_late_ones() {
    let scenario = Scenario {
        layout: CarouselLayout::uniform(3),
        events: vec![
            ScheduledSignal {
                at_ms: 500,
                signal: CarouselSignal::PointerLeft,
            },
            ScheduledSignal {
                at_ms: 100,
                signal: CarouselSignal::PointerEntered,
            },
            ScheduledSignal {
                at_ms: 500,
                signal: CarouselSignal::IndicatorClicked { index: 2 },
            },
            ScheduledSignal {
                at_ms: 2000,
                signal: CarouselSignal::PointerEntered,
            },
        ],
        run_until_ms: 1000,
    };

    let signals: Vec<_> = scenario
        .ordered_events()
        .into_iter()
        .map(|event| event.signal)
        .collect();
    assert_eq!(
        signals,
        vec![
            CarouselSignal::PointerEntered,
            CarouselSignal::PointerLeft,
            CarouselSignal::IndicatorClicked { index: 2 },
        ]
    );
}
