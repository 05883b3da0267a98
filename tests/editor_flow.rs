//! End-to-end scenario: edit a chart with tempo changes, then compute what
//! one frame of the notefield would draw.

use notefield_rs::prelude::*;
use pretty_assertions::assert_eq;

fn beat(value: f64) -> Beat {
    Beat::new(value).unwrap()
}

fn time(seconds: f64) -> Time {
    Time::new(seconds).unwrap()
}

#[test]
fn edit_query_and_render_one_frame() {
    // A chart that drops to half tempo at beat 4.
    let bpm_map = BpmMap::new(vec![
        BpmPoint::new(Beat::ZERO, Bpm::new(120.0).unwrap()),
        BpmPoint::new(beat(4.0), Bpm::new(60.0).unwrap()),
    ])
    .unwrap();
    let mut chart = Chart::new(bpm_map, KeyCount::default());

    // Place a few notes: taps on key 0, a hold on key 1.
    for beat_value in [0.0, 1.0, 4.0, 5.0] {
        let modified = chart
            .place_object(
                ChartObject::Tap {
                    beat: beat(beat_value),
                    key: KeyIndex::new(0),
                },
                PlaceOptions::default(),
            )
            .unwrap();
        assert!(modified);
    }
    chart
        .place_object(
            ChartObject::Hold {
                beat: beat(2.0),
                key: KeyIndex::new(1),
                duration: beat(2.0),
            },
            PlaceOptions::default(),
        )
        .unwrap();

    // The frame: scrolled to 1.0s, zoomed in 2x, 600px tall field with the
    // receptor 100px from the top.
    let mut scroll = ScrollState::default();
    scroll.scroll_to(time(1.0));
    scroll.set_zoom(2.0).unwrap();
    let config = DisplayConfig::new(
        100.0,
        100.0,
        600.0,
        ScrollDirection::Up,
        Baseline::Centered,
    )
    .unwrap();

    let viewport = calculate_viewport(&scroll, &config);
    assert_eq!(viewport.y0, 100.0);
    assert_eq!(viewport.t0, time(0.5));
    assert_eq!(viewport.t1, time(3.5));
    assert_eq!(viewport.receptor_time, time(1.0));

    // Beats 0..=4 sit at 0, 0.5, 1.0, 1.5, 2.0 seconds; beat 5 at 3.0s.
    // Key 0 has notes at 0.5s, 2.0s and 3.0s inside the window.
    let key0: Vec<f64> = chart
        .objects_in_interval(KeyIndex::new(0), viewport.t0, viewport.t1)
        .unwrap()
        .iter()
        .map(|obj| obj.beat().as_f64())
        .collect();
    assert_eq!(key0, vec![1.0, 4.0, 5.0]);

    // The hold's head at beat 2 (1.0s) is visible on key 1.
    let key1 = chart
        .objects_in_interval(KeyIndex::new(1), viewport.t0, viewport.t1)
        .unwrap();
    assert_eq!(key1.len(), 1);
    assert_eq!(key1[0].duration(), Some(beat(2.0)));

    // Gridlines for the same window: whole beats from 1 through 5, with the
    // measure line at beat 4.
    let lines: Vec<(f64, f64, BeatLineKind)> = beat_lines(
        chart.bpm_map(),
        BeatSnap::default(),
        viewport.t0,
        viewport.t1,
    )
    .unwrap()
    .map(|line| (line.beat.as_f64(), line.time.as_f64(), line.kind))
    .collect();
    assert_eq!(
        lines,
        vec![
            (1.0, 0.5, BeatLineKind::Whole),
            (2.0, 1.0, BeatLineKind::Whole),
            (3.0, 1.5, BeatLineKind::Whole),
            (4.0, 2.0, BeatLineKind::Measure),
            (5.0, 3.0, BeatLineKind::Whole),
        ]
    );

    // Draw one note: the tap at beat 4 (2.0s) under 200px/s effective
    // density sits at pixel 400; centered baseline while up-scrolling pulls
    // it up by half its height.
    let pps = effective_pixels_per_second(&scroll, &config);
    assert_eq!(pps, 200.0);
    let pos = time_to_position(chart.bpm_map().time_at(beat(4.0)), pps);
    assert_eq!(pos, 400);
    let adjusted = adjust_to_baseline(pos, 16, config.baseline(), config.scroll_direction());
    assert_eq!(adjusted, 392);
}

#[test]
fn toggling_and_tempo_edits_round_trip() {
    let mut chart = Chart::default();
    let tap = ChartObject::Tap {
        beat: beat(8.0),
        key: KeyIndex::new(3),
    };

    assert_eq!(chart.place_object(tap, PlaceOptions::default()), Ok(true));
    assert_eq!(chart.place_object(tap, PlaceOptions::default()), Ok(true));
    assert!(chart.column(KeyIndex::new(3)).unwrap().is_empty());

    // Tempo edits go through the map's own methods; conversions follow
    // immediately.
    chart
        .bpm_map_mut()
        .push(BpmPoint::new(beat(4.0), Bpm::new(240.0).unwrap()))
        .unwrap();
    let t = chart.bpm_map().time_at(beat(8.0));
    assert_eq!(t, time(3.0));
    assert_eq!(chart.bpm_map().beat_at(t), beat(8.0));
}

#[test]
fn snap_quantized_scrolling_lands_on_lines() {
    let chart = Chart::default();
    let mut snap = BeatSnap::default();
    snap.next_snap();
    assert_eq!(snap.fraction(), 1.0 / 8.0);

    // Scroll target halfway between half-beat lines quantizes to the grid.
    let target = chart.bpm_map().beat_at(time(0.6));
    let snapped = snap.quantize(target);
    assert_eq!(snapped, beat(1.0));
    assert_eq!(chart.bpm_map().time_at(snapped), time(0.5));
}
