use super::*;

#[test]
fn clones_share_one_page() {
    let observer = MemoryView::new(3, 3);
    let mut writer = observer.clone();

    writer.set_active(ElementKind::Slide, 1, true);
    writer.set_active(ElementKind::Indicator, 1, true);

    assert_eq!(observer.active_slides(), vec![1]);
    assert_eq!(observer.active_indicators(), vec![1]);
    assert!(observer.is_active(ElementKind::Slide, 1));
    assert!(!observer.is_active(ElementKind::Slide, 0));
}

#[test]
fn only_real_flag_flips_are_recorded() {
    let mut view = MemoryView::new(2, 2);
    view.set_active(ElementKind::Slide, 0, true);
    view.set_active(ElementKind::Slide, 0, true);
    view.set_active(ElementKind::Slide, 1, false);

    assert_eq!(
        view.drain_changes(),
        vec![ViewChange {
            kind: ElementKind::Slide,
            index: 0,
            active: true,
        }]
    );
    assert!(view.drain_changes().is_empty());
}

#[test]
fn out_of_range_writes_are_dropped() {
    let mut view = MemoryView::new(2, 2);
    view.set_active(ElementKind::Indicator, 7, true);
    assert!(view.active_indicators().is_empty());
    assert!(view.drain_changes().is_empty());
    assert!(!view.is_active(ElementKind::Indicator, 7));
}
