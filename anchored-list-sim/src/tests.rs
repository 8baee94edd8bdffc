use crate::*;

use anchored_list::{Align, AnchorOptions, CorrectionPolicy, HostError, Rect};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Msg {
    key: u64,
    height: u32,
}

fn msgs(keys: std::ops::Range<u64>) -> Vec<Msg> {
    keys.map(|key| Msg { key, height: 100 }).collect()
}

fn with_head(head: &[(u64, u32)], tail: &[Msg]) -> Vec<Msg> {
    let mut out: Vec<Msg> = head
        .iter()
        .map(|&(key, height)| Msg { key, height })
        .collect();
    out.extend_from_slice(tail);
    out
}

fn frame() -> Rect {
    Rect {
        main: 400,
        cross: 320,
    }
}

/// Ten 100px rows in a 400px view, laid out once and then scrolled to `offset`.
fn sim_at(view: SimView, offset: u64) -> SimList<Msg, u64> {
    let options = AnchorOptions::new(|m: &Msg, _| m.key);
    let mut sim = SimList::new(options, view, |m: &Msg| m.height);
    sim.set_rows(msgs(0..10));
    sim.run_until_idle(4);
    sim.scroll_to(offset);
    sim.run_until_idle(4);
    sim
}

fn anchor_key(report: &FrameReport<u64>) -> Option<(u64, i64)> {
    report.anchor().map(|row| (row.key, row.top))
}

#[test]
fn flow_layout_ranges_skip_zero_height_rows() {
    let layout = FlowLayout::new([100, 0, 50, 100]);
    assert_eq!(layout.total(), 250);
    assert_eq!(layout.max_offset(100), 150);
    assert_eq!(layout.start(1), Some(100));
    assert_eq!(layout.end(1), Some(100));

    assert_eq!(layout.visible_range(0, 100), 0..1);
    assert_eq!(layout.visible_range(100, 100), 2..4);
    assert_eq!(layout.visible_range(0, 0), 0..0);

    assert_eq!(layout.mount_window(100, 100, 1, 1), vec![0, 1, 2, 3]);
    assert_eq!(layout.mount_window(200, 50, 0, 2), vec![0, 1, 3]);
    assert!(FlowLayout::default().mount_window(0, 100, 2, 2).is_empty());
}

#[test]
fn prepend_above_viewport_keeps_anchor_row_still() {
    let view = SimView::new(frame()).with_pinned_head(8);
    let mut sim = sim_at(view, 500);
    let base = msgs(0..10);

    let added = sim.set_rows(with_head(&[(100, 50), (101, 75), (102, 60)], &base));
    assert_eq!(added, 3);

    let frames = sim.run_until_idle(8);
    assert_eq!(frames.len(), 2);

    // Measuring frame: new rows laid out off-screen, nothing moves.
    let measuring = &frames[0];
    assert_eq!(measuring.measuring, vec![0, 1, 2]);
    assert_eq!(measuring.offset, 500);
    assert_eq!(measuring.content_height, 1000);
    assert_eq!(anchor_key(measuring), Some((5, 0)));
    assert!(measuring.pre_commit.is_none());
    assert!(measuring.next_tick.is_none());

    // Correction lands with the paint that reveals the rows.
    let revealing = &frames[1];
    let applied = revealing.pre_commit.expect("deferred correction");
    assert_eq!(applied.offset, 685);
    assert_eq!(applied.policy, CorrectionPolicy::Deferred);
    assert_eq!(applied.revealed, 3);
    assert!(revealing.measuring.is_empty());
    assert_eq!(revealing.offset, 685);
    assert_eq!(revealing.content_height, 1185);
    assert_eq!(anchor_key(revealing), Some((5, 0)));

    let view = sim.view().unwrap();
    assert_eq!(view.scroll_calls().len(), 1);
    assert_eq!(view.scroll_calls()[0].offset, 685);
    assert!(!view.scroll_calls()[0].animated);
    assert!(sim.list().phase().is_idle());
    assert_eq!(sim.list().viewport().content_offset, 685);
    assert_eq!(sim.list().viewport().content_height, Some(1185));
}

#[test]
fn prepend_at_top_of_list_shows_new_rows() {
    let view = SimView::new(frame()).with_pinned_head(8);
    let mut sim = sim_at(view, 0);

    let added = sim.set_rows(with_head(&[(100, 50), (101, 75)], &msgs(0..10)));
    assert_eq!(added, 0);

    let frames = sim.run_until_idle(8);
    assert_eq!(frames.len(), 1);
    let report = &frames[0];
    assert!(report.pre_commit.is_none() && report.next_tick.is_none());
    assert!(report.measuring.is_empty());
    assert_eq!(report.offset, 0);
    assert_eq!(anchor_key(report), Some((100, 0)));
    assert!(sim.view().unwrap().scroll_calls().is_empty());
}

#[test]
fn prepend_while_resting_on_bottom_corrects_on_next_tick() {
    let view = SimView::new(frame()).with_pinned_head(8);
    let mut sim = sim_at(view, 600);
    assert_eq!(sim.list().viewport().last_item_height, Some(100));

    sim.set_rows(with_head(&[(100, 40), (101, 50)], &msgs(0..10)));
    let frames = sim.run_until_idle(8);
    assert_eq!(frames.len(), 2);

    let measuring = &frames[0];
    assert!(measuring.pre_commit.is_none());
    let applied = measuring.next_tick.expect("bottom-resting correction");
    assert_eq!(applied.offset, 690);
    assert_eq!(applied.policy, CorrectionPolicy::BottomResting);
    assert_eq!(anchor_key(measuring), Some((6, 0)));

    let revealed = &frames[1];
    assert_eq!(revealed.offset, 690);
    assert_eq!(revealed.content_height, 1090);
    assert_eq!(anchor_key(revealed), Some((6, 0)));
    assert!(sim.list().phase().is_idle());
}

#[test]
fn unmounted_new_rows_stay_hidden_until_removed() {
    // No pinned head and no overscan: rows hidden at the top are never laid out.
    let view = SimView::new(frame()).with_overscan(0);
    let mut sim = sim_at(view, 500);
    let base = msgs(0..10);

    sim.set_rows(with_head(&[(100, 50), (101, 75), (102, 60)], &base));
    let frames = sim.run_until_idle(8);
    assert_eq!(frames.len(), 1);
    assert!(frames[0].measuring.is_empty());
    assert_eq!(anchor_key(&frames[0]), Some((5, 0)));
    assert_eq!(sim.list().hidden_rows(), 3);
    assert!(!sim.needs_frame());

    // Dropping a row abandons the batch and the head rows flow in normally.
    let mut shorter = with_head(&[(100, 50), (101, 75), (102, 60)], &base);
    shorter.pop();
    sim.set_rows(shorter);
    assert!(sim.list().phase().is_idle());
    let frames = sim.run_until_idle(8);
    assert_eq!(frames.len(), 1);
    assert!(frames[0].pre_commit.is_none() && frames[0].next_tick.is_none());
    assert_eq!(frames[0].offset, 500);
    assert!(sim.view().unwrap().scroll_calls().is_empty());
}

#[test]
fn rows_removed_before_correction_lands_keep_next_jump_exact() {
    let view = SimView::new(frame()).with_pinned_head(8);
    let mut sim = sim_at(view, 500);
    let head = [(100, 50), (101, 75), (102, 60)];

    sim.set_rows(with_head(&head, &msgs(0..10)));
    let measuring = sim.frame();
    assert_eq!(measuring.measuring, vec![0, 1, 2]);
    assert_eq!(sim.list().staged_correction().unwrap().offset, 685);

    // Shrinking drops the staged jump before any commit applies it.
    sim.set_rows(with_head(&head, &msgs(0..9)));
    let frames = sim.run_until_idle(8);
    assert_eq!(frames.len(), 1);
    assert!(frames[0].pre_commit.is_none());
    assert_eq!(frames[0].offset, 500);
    assert_eq!(sim.list().viewport().content_offset, 500);
    let before = anchor_key(&frames[0]);
    assert_eq!(before, Some((3, -15)));

    let mut next = with_head(&[(103, 40)], &[]);
    next.extend(with_head(&head, &msgs(0..9)));
    assert_eq!(sim.set_rows(next), 1);
    let frames = sim.run_until_idle(8);
    assert_eq!(frames.len(), 2);
    let applied = frames[1].pre_commit.expect("deferred correction");
    assert_eq!(applied.offset, 540);
    assert_eq!(applied.policy, CorrectionPolicy::Deferred);
    assert!(frames.iter().all(|f| anchor_key(f) == before));
    assert_eq!(sim.view().unwrap().scroll_calls().len(), 1);
}

#[test]
fn rejected_correction_is_consumed() {
    let view = SimView::new(frame()).with_pinned_head(8);
    let mut sim = sim_at(view, 600);
    sim.view_mut().unwrap().set_reject_scrolls(true);

    sim.set_rows(with_head(&[(100, 40), (101, 50)], &msgs(0..10)));
    let frames = sim.run_until_idle(8);
    assert!(frames.iter().all(|f| f.pre_commit.is_none() && f.next_tick.is_none()));
    assert!(sim.list().phase().is_idle());
    assert_eq!(sim.list().hidden_rows(), 0);
    assert_eq!(sim.list().viewport().content_offset, 600);
    assert!(sim.view().unwrap().scroll_calls().is_empty());
    assert!(!sim.needs_frame());
}

#[test]
fn scroller_jumps_to_row() {
    let view = SimView::new(frame()).with_pinned_head(2);
    let mut sim = sim_at(view, 0);

    sim.scroller()
        .scroll_to_index(5, Align::Start, false)
        .expect("row 5 is laid out");
    let frames = sim.run_until_idle(4);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].offset, 500);
    assert_eq!(anchor_key(&frames[0]), Some((5, 0)));

    let err = sim.scroller().scroll_to_index(10, Align::Start, false);
    assert_eq!(
        err,
        Err(HostError::IndexOutOfRange {
            index: 10,
            count: 10
        })
    );

    // Past the end is clamped at commit.
    sim.scroller().scroll_to_offset(5_000, false).unwrap();
    let frames = sim.run_until_idle(4);
    assert_eq!(frames[0].offset, 600);
    assert_eq!(sim.list().viewport().content_offset, 600);
}

#[test]
fn mount_window_includes_pinned_head() {
    let view = SimView::new(frame()).with_pinned_head(3).with_overscan(0);
    let mut sim = sim_at(view, 500);
    sim.view_mut().unwrap().resize(Rect {
        main: 200,
        cross: 320,
    });
    let frames = sim.run_until_idle(4);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].mounted, vec![0, 1, 2, 5, 6]);
    assert_eq!(sim.list().viewport().frame_height, 200);
}
