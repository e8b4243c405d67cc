use super::*;

fn sched() -> RenderScheduler<SteppedClock> {
    RenderScheduler::new(SteppedClock::new())
}

fn refresh(s: &mut RenderScheduler<SteppedClock>) -> Option<RenderQuality> {
    let t = s.clock_mut().step()?;
    s.fire(t)
}

#[test]
fn burst_of_requests_arms_once_and_renders_once() {
    let mut s = sched();
    for _ in 0..50 {
        s.request_render(false);
    }
    assert_eq!(s.clock().armed_count(), 1);
    assert_eq!(refresh(&mut s), Some(RenderQuality::Preview));
    assert_eq!(refresh(&mut s), None);
    let st = s.stats();
    assert_eq!(st.requests, 50);
    assert_eq!(st.renders, 1);
}

#[test]
fn force_full_flag_survives_coalescing() {
    let mut s = sched();
    s.request_render(false);
    s.request_render(true);
    s.request_render(false);
    assert_eq!(refresh(&mut s), Some(RenderQuality::Full));
    assert!(!s.pending_full());
}

#[test]
fn forced_full_is_owed_until_scrub_ends() {
    let mut s = sched();
    s.begin_scrub();
    s.request_render(true);
    assert_eq!(refresh(&mut s), Some(RenderQuality::Preview));
    assert!(s.pending_full());

    s.request_render(false);
    assert_eq!(refresh(&mut s), Some(RenderQuality::Preview));

    s.end_scrub();
    s.request_render(false);
    assert_eq!(refresh(&mut s), Some(RenderQuality::Full));
    assert_eq!(s.stats().full_renders, 1);
}

#[test]
fn scrub_edges_never_arm() {
    let mut s = sched();
    s.begin_scrub();
    assert!(s.is_scrubbing());
    s.end_scrub();
    assert!(!s.is_armed());
    assert_eq!(s.clock().armed_count(), 0);
    assert!(s.pending_full());
    assert_eq!(refresh(&mut s), None);
}

#[test]
fn stale_ticket_is_ignored() {
    let mut s = sched();
    s.request_render(true);
    assert_eq!(s.fire(FrameTicket(999)), None);
    assert!(s.is_armed());
    assert_eq!(s.stats().stale_tickets, 1);
    assert_eq!(refresh(&mut s), Some(RenderQuality::Full));
}

#[test]
fn fired_ticket_cannot_fire_twice() {
    let mut s = sched();
    s.request_render(false);
    let t = s.clock_mut().step().unwrap();
    assert!(s.fire(t).is_some());
    assert_eq!(s.fire(t), None);
    assert_eq!(s.stats().renders, 1);
}

#[test]
fn new_request_after_fire_rearms() {
    let mut s = sched();
    s.request_render(false);
    refresh(&mut s);
    s.request_render(false);
    assert_eq!(s.clock().armed_count(), 2);
    assert!(refresh(&mut s).is_some());
}

#[test]
fn quality_heaviness() {
    assert!(RenderQuality::Full.heavy());
    assert!(!RenderQuality::Preview.heavy());
}

#[test]
fn cancelled_ticket_fires_stale_and_next_request_rearms() {
    let mut s = sched();
    s.request_render(true);
    s.cancel();
    assert!(!s.is_armed());
    assert!(!s.pending_full());
    assert_eq!(refresh(&mut s), None);
    assert_eq!(s.stats().renders, 0);
    assert_eq!(s.stats().stale_tickets, 1);

    s.request_render(false);
    assert_eq!(refresh(&mut s), Some(RenderQuality::Preview));
}
