use super::*;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn fires_in_deadline_order() {
    let mut timeline = Timeline::new();
    let late = timeline.schedule_once(ms(300), TimerKind::StartupDelay);
    let early = timeline.schedule_once(ms(100), TimerKind::TransitionSettled);

    assert_eq!(timeline.pop_due(ms(1000)).map(|f| f.id), Some(early));
    assert_eq!(timeline.now(), ms(100));
    assert_eq!(timeline.pop_due(ms(1000)).map(|f| f.id), Some(late));
    assert_eq!(timeline.now(), ms(300));
    assert!(timeline.pop_due(ms(1000)).is_none());
}

#[test]
fn same_deadline_keeps_schedule_order() {
    let mut timeline = Timeline::new();
    let first = timeline.schedule_once(ms(50), TimerKind::TransitionSettled);
    let second = timeline.schedule_once(ms(50), TimerKind::StartupDelay);

    assert_eq!(timeline.pop_due(ms(50)).map(|f| f.id), Some(first));
    assert_eq!(timeline.pop_due(ms(50)).map(|f| f.id), Some(second));
}

#[test]
fn timers_past_the_window_stay_queued() {
    let mut timeline = Timeline::new();
    timeline.schedule_once(ms(500), TimerKind::StartupDelay);
    assert!(timeline.pop_due(ms(499)).is_none());
    assert_eq!(timeline.pending(), 1);
    assert_eq!(timeline.next_deadline(), Some(ms(500)));
}

#[test]
fn repeating_timer_requeues_one_period_later() {
    let mut timeline = Timeline::new();
    let id = timeline.schedule_repeating(ms(8000), TimerKind::AutoplayTick);

    let fired = timeline.pop_due(ms(20_000)).expect("first tick");
    assert_eq!(fired.id, id);
    assert_eq!(timeline.now(), ms(8000));
    assert!(timeline.pop_due(ms(20_000)).is_some());
    assert_eq!(timeline.now(), ms(16_000));
    assert_eq!(timeline.next_deadline(), Some(ms(24_000)));
    assert_eq!(timeline.pending_of(TimerKind::AutoplayTick), 1);
}

#[test]
fn cancel_removes_repeating_timer() {
    let mut timeline = Timeline::new();
    let id = timeline.schedule_repeating(ms(10), TimerKind::AutoplayTick);
    timeline.cancel(id);
    assert_eq!(timeline.pending(), 0);
    assert!(timeline.pop_due(ms(1000)).is_none());
}

#[test]
fn clock_never_moves_backwards() {
    let mut timeline = Timeline::new();
    timeline.advance_to(ms(700));
    timeline.advance_to(ms(200));
    assert_eq!(timeline.now(), ms(700));

    timeline.schedule_once(ms(100), TimerKind::StartupDelay);
    assert_eq!(timeline.next_deadline(), Some(ms(800)));
}

#[test]
fn overdue_timer_fires_without_rewinding_the_clock() {
    let mut timeline = Timeline::new();
    let tick = timeline.schedule_repeating(ms(100), TimerKind::AutoplayTick);
    timeline.advance_to(ms(450));

    assert_eq!(timeline.pop_due(ms(450)).map(|f| f.id), Some(tick));
    assert_eq!(timeline.now(), ms(450));
    assert_eq!(timeline.next_deadline(), Some(ms(550)));
}
