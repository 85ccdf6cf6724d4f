//! End-to-end viewport scenarios driven by a manual clock

use std::rc::Rc;

use tilted_animation::{AnimationKind, ZoomTie};
use tilted_core::{Config, Coords, Size};
use tilted_viewport::{
    pointer_compensation, ManualClock, NullSink, PointerButton, RecordingSink, Surface,
    ViewportError, ZoomDirection,
};

const FRAME: f64 = 16.0;

struct Harness {
    surface: Surface,
    sink: RecordingSink,
    clock: ManualClock,
}

impl Harness {
    fn new(container: Size, content: Size, config: Config) -> Self {
        let sink = RecordingSink::new();
        let clock = ManualClock::new(0.0);
        let surface =
            Surface::new(container, content, config, sink.clone(), Rc::new(clock.clone())).unwrap();
        Self {
            surface,
            sink,
            clock,
        }
    }

    /// Container 1600x900 showing content 3200x1800
    fn wide() -> Self {
        Self::new(
            Size::new(1600.0, 900.0),
            Size::new(3200.0, 1800.0),
            Config::default(),
        )
    }

    fn advance(&mut self, ms: f64) -> bool {
        let now = self.clock.advance(ms);
        self.surface.tick(now)
    }

    /// Tick frame by frame until nothing continues
    fn settle(&mut self) {
        let mut frames = 0;
        while self.advance(FRAME) {
            frames += 1;
            assert!(frames < 1000, "animations never settled");
        }
    }
}

#[test]
fn test_zero_move_returns_false() {
    let mut harness = Harness::wide();
    assert!(!harness.surface.move_by(Coords::ZERO));
    assert!(!harness.surface.is_animating());
}

#[test]
fn test_pan_clamps_to_max() {
    let mut harness = Harness::wide();
    assert!(harness.surface.move_by(Coords::new(10000.0, 10000.0)));
    assert_eq!(harness.surface.coords(), harness.surface.max());
    assert_eq!(harness.surface.max(), Coords::new(1200.0, 675.0));

    harness.advance(FRAME);
    let frame = harness.sink.last().unwrap();
    assert_eq!(frame.translate, Coords::new(-1200.0, -675.0));
}

#[test]
fn test_content_half_the_container_cannot_pan() {
    let mut harness = Harness::new(
        Size::new(3200.0, 1800.0),
        Size::new(1600.0, 900.0),
        Config::default(),
    );
    assert_eq!(harness.surface.max(), Coords::ZERO);
    assert!(!harness.surface.move_by(Coords::new(10000.0, 10000.0)));
    assert_eq!(harness.surface.coords(), Coords::ZERO);
}

#[test]
fn test_move_to_is_idempotent() {
    let mut harness = Harness::wide();
    assert!(harness.surface.move_to(Coords::new(-300.0, 120.0)));
    assert!(!harness.surface.move_to(Coords::new(-300.0, 120.0)));
    assert_eq!(harness.surface.coords(), Coords::new(-300.0, 120.0));
}

#[test]
fn test_drag_cancels_glide() {
    let mut harness = Harness::wide();
    assert!(harness.surface.glide(Coords::new(500.0, 0.0)));
    harness.advance(100.0);

    harness
        .surface
        .pointer_down(Coords::new(800.0, 450.0), PointerButton::Primary);
    let animations = harness.surface.animations();
    assert!(!animations.exists(AnimationKind::Glide));
    assert!(animations.exists(AnimationKind::Drag));

    // Secondary button does not start a drag
    assert!(!harness
        .surface
        .pointer_down(Coords::new(10.0, 10.0), PointerButton::Secondary));
}

#[test]
fn test_edge_cancels_glide() {
    let config = Config {
        edge_move_enabled: true,
        ..Config::default()
    };
    let mut harness = Harness::new(Size::new(1600.0, 900.0), Size::new(3200.0, 1800.0), config);
    harness.surface.glide(Coords::new(0.0, 300.0));

    assert!(harness.surface.pointer_move(Coords::new(1595.0, 450.0)));
    let animations = harness.surface.animations();
    assert!(!animations.exists(AnimationKind::Glide));
    assert!(animations.exists(AnimationKind::Edge));
}

#[test]
fn test_second_glide_merges() {
    let mut harness = Harness::wide();
    assert!(harness.surface.glide(Coords::new(100.0, 40.0)));
    assert!(harness.surface.glide(Coords::new(50.0, -10.0)));

    let glide = harness.surface.animations().storage().glide().unwrap();
    assert_eq!(glide.remaining(), Coords::new(150.0, 30.0));

    harness.settle();
    assert_eq!(harness.surface.coords(), Coords::new(150.0, 30.0));
}

#[test]
fn test_merge_after_partial_progress() {
    let mut harness = Harness::wide();
    harness.surface.glide(Coords::new(200.0, 0.0));
    harness.advance(100.0);
    let travelled = harness.surface.coords().x;
    assert!(travelled > 0.0 && travelled < 200.0);

    harness.surface.glide(Coords::new(100.0, 0.0));
    harness.settle();
    assert_eq!(harness.surface.coords(), Coords::new(300.0, 0.0));
}

#[test]
fn test_step_lands_on_next_table_value() {
    let mut harness = Harness::wide();
    let steps = harness.surface.scale().steps().clone();
    assert_eq!(harness.surface.scale_value(), steps.values()[7]);

    assert!(harness.surface.step(1));
    let mut last = harness.surface.scale_value();
    while harness.advance(FRAME) {
        let value = harness.surface.scale_value();
        assert!(value >= last && value <= steps.values()[8]);
        assert!(harness.surface.animations().exists(AnimationKind::Zoom));
        last = value;
    }

    assert_eq!(harness.surface.scale_value(), steps.values()[8]);
    assert_eq!(harness.surface.scale_value(), 0.552);
    assert!(!harness.surface.animations().exists(AnimationKind::Zoom));
}

#[test]
fn test_interrupted_zoom_lands_on_a_step() {
    let mut harness = Harness::wide();
    harness.surface.step(1);
    harness.advance(150.0);
    harness.surface.step(1);
    harness.advance(50.0);
    harness.surface.step(1);
    assert_eq!(harness.surface.pending_scale(), 0.673);

    harness.settle();
    assert_eq!(harness.surface.scale_value(), 0.673);
    let frame = harness.sink.last().unwrap();
    assert_eq!(frame.scale, 0.673);
}

#[test]
fn test_zoom_stops_at_bounds() {
    let mut harness = Harness::wide();
    assert!(harness.surface.zoom_to(1.0));
    harness.settle();
    assert!(!harness.surface.step(1));
    assert!(!harness.surface.zoom(0.3));

    assert!(harness.surface.zoom_to(0.0));
    harness.settle();
    assert_eq!(harness.surface.scale_value(), 0.25);
    assert_eq!(harness.surface.tilt(), 0.0);
}

#[test]
fn test_shortened_zoom_shortens_tied_glide() {
    let mut harness = Harness::wide();
    harness.surface.zoom_to(0.906);
    harness.settle();
    assert_eq!(harness.surface.scale_value(), 0.906);

    let offset = Coords::new(400.0, 0.0);
    let pointer = harness.surface.container().center() + offset;
    assert!(harness.surface.step_and_glide(2, Some(pointer)));
    assert_eq!(harness.surface.pending_scale(), 1.0);

    let glide = harness.surface.animations().storage().glide().unwrap();
    assert_eq!(glide.tie(), Some(ZoomTie::new(0.906, 1.0)));

    // Two steps were asked for, only one fit below the bound
    let steps = harness.surface.scale().steps();
    let requested = steps.offset(13, 2) - 0.906;
    let actual = 1.0 - 0.906;
    let full = pointer_compensation(offset, 1.0, 0.906, requested, requested);
    let shortened = pointer_compensation(offset, 1.0, 0.906, requested, actual);
    assert!(shortened.x < full.x);
    let remaining = glide.remaining();
    assert!((remaining.x - shortened.x).abs() <= 0.5);
    assert_eq!(remaining, Coords::new(38.0, 0.0));

    harness.settle();
    assert_eq!(harness.surface.scale_value(), 1.0);
    assert_eq!(harness.surface.coords(), Coords::new(38.0, 0.0));
}

#[test]
fn test_wheel_zooms_toward_pointer() {
    let mut harness = Harness::wide();
    let pointer = Coords::new(1200.0, 225.0);

    assert!(harness.surface.wheel(-120.0, pointer));
    assert!(harness.surface.animations().exists(AnimationKind::Glide));
    harness.settle();
    assert_eq!(harness.surface.scale_value(), 0.552);
    let coords = harness.surface.coords();
    assert!(coords.x > 0.0 && coords.y < 0.0);

    assert!(harness.surface.wheel(120.0, pointer));
    harness.settle();
    assert_eq!(harness.surface.scale_value(), 0.5);
    assert!(!harness.surface.wheel(0.0, pointer));
}

#[test]
fn test_interrupted_wheel_keeps_pointer_anchored() {
    let mut harness = Harness::wide();
    let pointer = Coords::new(1200.0, 225.0);
    let offset = pointer - harness.surface.container().center();

    // 0.5 -> 0.552, compensation (75.36, -42.39) rounds to (75, -42)
    assert!(harness.surface.wheel(-120.0, pointer));
    let first = pointer_compensation(offset, 1.0, 0.5, 0.552 - 0.5, 0.552 - 0.5);
    let glide = harness.surface.animations().storage().glide().unwrap();
    assert_eq!(glide.remaining(), Coords::new(75.0, -42.0));
    assert!((glide.remaining().x - first.x).abs() <= 0.5);

    harness.advance(150.0);
    let in_flight = harness.surface.scale_value();
    assert!(in_flight > 0.5 && in_flight < 0.552);
    let coords = harness.surface.coords();
    let pending = harness.surface.animations().storage().glide_remaining();
    assert!(!pending.is_zero());

    // 0.552 -> 0.61 from the pending target; endpoint (143.9, -80.8) rounds
    // to (144, -81), so this request adds (69, -39)
    assert!(harness.surface.wheel(-120.0, pointer));
    assert_eq!(harness.surface.pending_scale(), 0.61);
    let second = pointer_compensation(offset, 1.0, 0.552, 0.61 - 0.552, 0.61 - 0.552);
    assert!((second.x - 68.9).abs() < 0.01 && (second.y + 38.76).abs() < 0.01);

    let glide = harness.surface.animations().storage().glide().unwrap();
    let expected = pending + Coords::new(69.0, -39.0);
    assert!((glide.remaining().x - expected.x).abs() < 1e-9);
    assert!((glide.remaining().y - expected.y).abs() < 1e-9);
    assert!((coords.x + glide.remaining().x - 144.0).abs() < 1e-9);
    assert_eq!(glide.tie(), Some(ZoomTie::new(in_flight, 0.61)));

    harness.settle();
    assert_eq!(harness.surface.scale_value(), 0.61);
    assert_eq!(harness.surface.coords(), Coords::new(144.0, -81.0));

    // The content point under the pointer moved by offset * (1/0.5 - 1/0.61)
    let anchored = offset * (1.0 / 0.5 - 1.0 / 0.61);
    let settled = harness.surface.coords();
    assert!((settled.x - anchored.x).abs() <= 1.0);
    assert!((settled.y - anchored.y).abs() <= 1.0);
}

#[test]
fn test_multi_step_moves_whole_entries() {
    let values = Harness::wide().surface.scale().steps().values().to_vec();
    for (steps, index) in [(4, 11), (5, 12), (6, 13), (-4, 3), (-5, 2)] {
        let mut harness = Harness::wide();
        assert!(harness.surface.step(steps));
        assert_eq!(harness.surface.pending_scale(), values[index], "step({})", steps);
        harness.settle();
        assert_eq!(harness.surface.scale_value(), values[index], "step({})", steps);
    }
}

#[test]
fn test_multi_step_accumulates_and_clamps() {
    let mut harness = Harness::wide();
    harness.surface.step(4);
    harness.advance(100.0);
    harness.surface.step(-6);
    assert_eq!(harness.surface.pending_scale(), 0.41);
    harness.settle();
    assert_eq!(harness.surface.scale_value(), 0.41);

    // Nine entries up from index 5 stops at the top
    assert!(harness.surface.step(9));
    harness.settle();
    assert_eq!(harness.surface.scale_value(), 1.0);
    assert!(harness.surface.step(-14));
    harness.settle();
    assert_eq!(harness.surface.scale_value(), 0.25);
}

#[test]
fn test_committed_scale_stays_on_a_fine_table() {
    let coarse = Config {
        scale_rounding: 4,
        ..Config::default()
    };
    let result = Surface::new(
        Size::new(1600.0, 900.0),
        Size::new(3200.0, 1800.0),
        coarse.clone(),
        NullSink,
        Rc::new(ManualClock::new(0.0)),
    );
    assert!(matches!(result, Err(ViewportError::Config(_))));

    let config = Config {
        scale_rounding_final: 4,
        ..coarse
    };
    let mut harness = Harness::new(Size::new(1600.0, 900.0), Size::new(3200.0, 1800.0), config);
    let steps = harness.surface.scale().steps().clone();
    assert!(harness.surface.step(2));
    harness.settle();
    let value = harness.surface.scale_value();
    assert_eq!(value, steps.values()[9]);
    assert!(steps.contains(value));
}

#[test]
fn test_wheel_at_center_does_not_glide() {
    let mut harness = Harness::wide();
    let center = harness.surface.container().center();
    assert!(harness.surface.wheel(-1.0, center));
    assert!(!harness.surface.animations().exists(AnimationKind::Glide));
}

#[test]
fn test_keys_and_buttons_step_without_glide() {
    let mut harness = Harness::wide();
    assert!(harness.surface.key("+"));
    assert!(harness.surface.zoom_button(ZoomDirection::In));
    assert!(!harness.surface.key("q"));
    assert_eq!(harness.surface.pending_scale(), 0.61);
    assert!(!harness.surface.animations().exists(AnimationKind::Glide));

    assert!(harness.surface.key("-"));
    assert!(harness.surface.zoom_button(ZoomDirection::Out));
    harness.settle();
    assert_eq!(harness.surface.scale_value(), 0.5);
}

#[test]
fn test_quick_drag_tosses() {
    let mut harness = Harness::wide();
    harness
        .surface
        .pointer_down(Coords::new(800.0, 450.0), PointerButton::Primary);

    harness.clock.advance(50.0);
    assert!(harness.surface.pointer_move(Coords::new(750.0, 450.0)));
    // Pointer deltas are descaled: 50px at scale 0.5
    assert_eq!(harness.surface.coords(), Coords::new(100.0, 0.0));

    harness.clock.advance(50.0);
    assert!(harness.surface.pointer_up());
    let glide = harness.surface.animations().storage().glide().unwrap();
    assert_eq!(glide.remaining(), Coords::new(50.0 * 4.0 / 0.5, 0.0));
    assert_eq!(glide.duration(), 1000.0);

    harness.settle();
    assert_eq!(harness.surface.coords(), Coords::new(500.0, 0.0));
}

#[test]
fn test_slow_drag_does_not_toss() {
    let mut harness = Harness::wide();
    harness
        .surface
        .pointer_down(Coords::new(800.0, 450.0), PointerButton::Primary);
    harness.clock.advance(100.0);
    harness.surface.pointer_move(Coords::new(780.0, 440.0));
    harness.clock.advance(100.0);

    assert!(!harness.surface.pointer_up());
    assert!(!harness.surface.is_dragging());
    assert!(!harness.surface.animations().exists(AnimationKind::Glide));
    assert_eq!(harness.surface.coords(), Coords::new(40.0, 20.0));
}

#[test]
fn test_edge_pan_lifecycle() {
    let config = Config {
        edge_move_enabled: true,
        ..Config::default()
    };
    let mut harness = Harness::new(Size::new(1600.0, 900.0), Size::new(3200.0, 1800.0), config);

    assert!(harness.surface.pointer_move(Coords::new(1599.0, 450.0)));
    assert!(harness.surface.is_edge_panning());
    harness.advance(100.0);
    assert!(harness.surface.coords().x > 0.0);
    assert_eq!(harness.surface.coords().y, 0.0);

    // Back to the middle: the edge pan stops
    assert!(!harness.surface.pointer_move(Coords::new(800.0, 450.0)));
    assert!(!harness.surface.is_edge_panning());

    harness.surface.pointer_move(Coords::new(5.0, 450.0));
    assert!(harness.surface.is_edge_panning());
    assert!(harness.surface.pointer_leave());
    assert!(!harness.surface.is_edge_panning());
}

#[test]
fn test_edge_pan_stops_at_bound() {
    let config = Config {
        edge_move_enabled: true,
        ..Config::default()
    };
    let mut harness = Harness::new(Size::new(1600.0, 900.0), Size::new(3200.0, 1800.0), config);
    harness.surface.move_to(Coords::new(1200.0, 0.0));

    assert!(!harness.surface.pointer_move(Coords::new(1599.0, 450.0)));
    assert!(!harness.surface.is_edge_panning());
}

#[test]
fn test_edge_pan_ignored_while_dragging() {
    let config = Config {
        edge_move_enabled: true,
        ..Config::default()
    };
    let mut harness = Harness::new(Size::new(1600.0, 900.0), Size::new(3200.0, 1800.0), config);
    harness
        .surface
        .pointer_down(Coords::new(1590.0, 450.0), PointerButton::Primary);
    harness.surface.pointer_move(Coords::new(1595.0, 450.0));
    assert!(!harness.surface.is_edge_panning());
    assert!(!harness.surface.edge_update(Coords::new(1595.0, 450.0)));
}

#[test]
fn test_edge_disabled_by_default() {
    let mut harness = Harness::wide();
    assert!(!harness.surface.pointer_move(Coords::new(1599.0, 450.0)));
    assert!(!harness.surface.is_edge_panning());
}

#[test]
fn test_config_from_toml_drives_surface() {
    let config = Config::from_toml_str(
        r#"
        scale_min = 0.5
        scale_max = 2.0
        scale_steps = 5
        scale_default_step = 0
        tilt_max = 20
        perspective_factor = 1.5
        "#,
    )
    .unwrap();
    let harness = Harness::new(Size::new(1600.0, 900.0), Size::new(3200.0, 1800.0), config);

    assert_eq!(harness.surface.scale_value(), 0.5);
    assert_eq!(harness.surface.tilt(), 0.0);
    let frame = harness.sink.last().unwrap();
    assert_eq!(frame.perspective, 900.0);
}
