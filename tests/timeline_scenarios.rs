//! Edit-session scenarios over a 2 minute, 30 fps, 1920x1080 media file

use std::time::Duration;

use recut_cli::adapters::RecordingPlayer;
use recut_cli::{MediaInfo, Size, TimelineController};

type Controller = TimelineController<RecordingPlayer>;

fn secs(seconds: f64) -> Duration {
    Duration::from_secs_f64(seconds)
}

fn create_controller() -> Controller {
    let mut controller = TimelineController::new(RecordingPlayer::new());
    controller.load_media(MediaInfo::new(30.0, secs(120.0), Size::new(1920, 1080)).unwrap());
    controller
}

fn input_duration(controller: &Controller) -> Duration {
    controller.timeline().input_duration()
}

fn add_marker_at(controller: &mut Controller, seconds: f64) -> i64 {
    controller.set_input_position(secs(seconds));
    controller.add_marker();
    controller.current_input_frame()
}

fn trim_at(controller: &mut Controller, seconds: f64) {
    controller.set_input_position(secs(seconds));
    controller.add_trim();
}

fn assert_input_to_output(controller: &mut Controller, pairs: &[(f64, f64)]) {
    for &(input, output) in pairs {
        controller.set_input_position(secs(input));
        assert_eq!(
            controller.output_position(),
            secs(output),
            "input {}s",
            input
        );
    }
}

fn assert_output_to_input(controller: &mut Controller, pairs: &[(f64, f64)]) {
    for &(output, input) in pairs {
        controller.set_output_position(secs(output)).unwrap();
        assert_eq!(
            controller.input_position(),
            secs(input),
            "output {}s",
            output
        );
    }
}

fn disjunct_trims(controller: &Controller) -> Vec<(Duration, Duration)> {
    controller
        .disjunct_output_trims()
        .iter()
        .map(|s| (s.from, s.to))
        .collect()
}

fn non_disjunct_markers(controller: &Controller) -> Vec<Duration> {
    controller
        .non_disjunct_output_markers()
        .iter()
        .map(|m| m.position)
        .collect()
}

fn crop_frames(controller: &Controller) -> Vec<i64> {
    controller.keyframes().frame_numbers()
}

#[test]
fn no_trimming() {
    let mut controller = create_controller();
    assert_eq!(controller.output_duration(), input_duration(&controller));
    assert_eq!(controller.input_position(), Duration::ZERO);
    assert_eq!(controller.output_position(), Duration::ZERO);

    controller.set_input_position(secs(5.0));
    assert_eq!(controller.output_position(), secs(5.0));
}

#[test]
fn all_trimmed() {
    let mut controller = create_controller();
    controller.set_trim_after(0, true);

    assert_eq!(controller.input_position(), Duration::ZERO);
    assert_eq!(controller.output_position(), Duration::ZERO);
    assert_eq!(controller.output_duration(), Duration::ZERO);

    controller.set_input_position(secs(5.0));
    assert_eq!(controller.output_position(), Duration::ZERO);
}

#[test]
fn add_marker_keeps_markers_sorted() {
    let mut controller = create_controller();
    assert_eq!(controller.timeline().markers().len(), 1);

    assert!(!controller.add_marker());
    assert_eq!(controller.timeline().markers().len(), 1);

    add_marker_at(&mut controller, 10.0);
    assert_eq!(controller.timeline().markers().len(), 2);

    add_marker_at(&mut controller, 5.0);
    assert_eq!(controller.timeline().markers().len(), 3);

    let frames: Vec<i64> = controller
        .timeline()
        .markers()
        .iter()
        .map(|m| m.frame_number())
        .collect();
    assert_eq!(frames, vec![0, 150, 300]);
}

#[test]
fn all_trimmed_with_two_markers() {
    let mut controller = create_controller();
    controller.set_trim_after(0, true);
    add_marker_at(&mut controller, 10.0);
    controller.set_trim_after(1, true);
    assert_eq!(controller.output_duration(), Duration::ZERO);

    assert_input_to_output(
        &mut controller,
        &[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (15.0, 0.0)],
    );
}

#[test]
fn complex_trimming() {
    let mut controller = create_controller();
    add_marker_at(&mut controller, 5.0);
    add_marker_at(&mut controller, 10.0);
    add_marker_at(&mut controller, 15.0);

    assert_input_to_output(
        &mut controller,
        &[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0), (15.0, 15.0), (20.0, 20.0), (25.0, 25.0)],
    );

    controller.set_trim_after(0, true);
    assert_input_to_output(
        &mut controller,
        &[(0.0, 0.0), (5.0, 0.0), (10.0, 5.0), (15.0, 10.0), (20.0, 15.0), (25.0, 20.0)],
    );

    controller.set_trim_after(1, true);
    assert_input_to_output(
        &mut controller,
        &[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (15.0, 5.0), (20.0, 10.0), (25.0, 15.0)],
    );

    controller.set_trim_after(0, false);
    assert_input_to_output(
        &mut controller,
        &[(0.0, 0.0), (5.0, 5.0), (10.0, 5.0), (15.0, 10.0), (20.0, 15.0), (25.0, 20.0)],
    );
}

#[test]
fn set_output_media_position() {
    let mut controller = create_controller();
    let identity = [(0.0, 0.0), (5.0, 5.0), (10.0, 10.0), (15.0, 15.0), (20.0, 20.0), (25.0, 25.0)];
    assert_output_to_input(&mut controller, &identity);

    add_marker_at(&mut controller, 5.0);
    assert_output_to_input(&mut controller, &identity);

    controller.set_trim_after(0, true);
    assert_output_to_input(
        &mut controller,
        &[(0.0, 5.0), (5.0, 10.0), (10.0, 15.0), (15.0, 20.0), (20.0, 25.0), (25.0, 30.0)],
    );
}

#[test]
fn trimming_markers_summary() {
    let mut controller = create_controller();
    let full = input_duration(&controller);

    assert_eq!(controller.output_duration(), full);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, full)]);
    assert!(non_disjunct_markers(&controller).is_empty());

    add_marker_at(&mut controller, 10.0);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, full)]);
    assert_eq!(non_disjunct_markers(&controller), vec![secs(10.0)]);

    add_marker_at(&mut controller, 20.0);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, full)]);
    assert_eq!(non_disjunct_markers(&controller), vec![secs(10.0), secs(20.0)]);

    controller.set_trim_after(1, true);
    assert_eq!(controller.output_duration(), full - secs(10.0));
    assert_eq!(
        disjunct_trims(&controller),
        vec![
            (Duration::ZERO, secs(10.0)),
            (secs(10.0), controller.output_duration())
        ]
    );
    assert!(non_disjunct_markers(&controller).is_empty());

    controller.set_trim_after(0, true);
    assert_eq!(controller.output_duration(), full - secs(20.0));
    assert_eq!(
        disjunct_trims(&controller),
        vec![(Duration::ZERO, controller.output_duration())]
    );
    assert!(non_disjunct_markers(&controller).is_empty());

    controller.set_trim_after(2, true);
    assert_eq!(controller.output_duration(), Duration::ZERO);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, Duration::ZERO)]);
    assert!(non_disjunct_markers(&controller).is_empty());

    controller.set_trim_after(0, false);
    assert_eq!(controller.output_duration(), secs(10.0));
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, secs(10.0))]);
    assert!(non_disjunct_markers(&controller).is_empty());

    controller.set_trim_after(1, false);
    assert_eq!(controller.output_duration(), secs(20.0));
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, secs(20.0))]);
    assert_eq!(non_disjunct_markers(&controller), vec![secs(10.0)]);
}

#[test]
fn auto_crop_keyframes_on_trimming_mid_end() {
    let mut controller = create_controller();
    assert_eq!(crop_frames(&controller), vec![0]);

    let marker1 = add_marker_at(&mut controller, 10.0);
    assert_eq!(crop_frames(&controller), vec![0]);
    add_marker_at(&mut controller, 20.0);
    assert_eq!(crop_frames(&controller), vec![0]);

    trim_at(&mut controller, 15.0);
    assert_eq!(crop_frames(&controller), vec![0, marker1 - 1, marker1]);

    trim_at(&mut controller, 25.0);
    assert_eq!(crop_frames(&controller), vec![0, marker1 - 1, marker1]);
}

#[test]
fn auto_crop_keyframes_on_trimming_mid_start() {
    let mut controller = create_controller();

    let marker1 = add_marker_at(&mut controller, 10.0);
    add_marker_at(&mut controller, 20.0);
    assert_eq!(crop_frames(&controller), vec![0]);

    trim_at(&mut controller, 15.0);
    assert_eq!(crop_frames(&controller), vec![0, marker1 - 1, marker1]);

    trim_at(&mut controller, 5.0);
    assert_eq!(crop_frames(&controller), vec![0]);
}

#[test]
fn auto_crop_keyframes_shrinking_on_repeated_trims() {
    let mut controller = create_controller();

    let marker1 = add_marker_at(&mut controller, 10.0);
    let marker2 = add_marker_at(&mut controller, 20.0);
    let marker3 = add_marker_at(&mut controller, 30.0);
    assert_eq!(crop_frames(&controller), vec![0]);

    trim_at(&mut controller, 35.0);
    assert_eq!(crop_frames(&controller), vec![0, marker3 - 1, marker3]);

    trim_at(&mut controller, 25.0);
    assert_eq!(crop_frames(&controller), vec![0, marker2 - 1, marker2]);

    trim_at(&mut controller, 15.0);
    assert_eq!(crop_frames(&controller), vec![0, marker1 - 1, marker1]);

    trim_at(&mut controller, 5.0);
    assert_eq!(crop_frames(&controller), vec![0]);
}

#[test]
fn disjunct_output_trims() {
    let mut controller = create_controller();
    let full = input_duration(&controller);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, full)]);

    add_marker_at(&mut controller, 10.0);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, full)]);

    add_marker_at(&mut controller, 30.0);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, full)]);

    trim_at(&mut controller, 35.0);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, secs(30.0))]);

    trim_at(&mut controller, 0.5);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, secs(20.0))]);

    add_marker_at(&mut controller, 20.0);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, secs(20.0))]);
}

#[test]
fn disjunct_output_trims_after_marking_new_beginning() {
    let mut controller = create_controller();
    let full = input_duration(&controller);

    add_marker_at(&mut controller, 10.0);
    add_marker_at(&mut controller, 20.0);
    add_marker_at(&mut controller, 30.0);
    assert_eq!(disjunct_trims(&controller), vec![(Duration::ZERO, full)]);

    trim_at(&mut controller, 15.0);
    let expected = vec![
        (Duration::ZERO, secs(10.0)),
        (secs(10.0), full - secs(10.0)),
    ];
    assert_eq!(disjunct_trims(&controller), expected);

    controller.set_output_position(secs(5.0)).unwrap();
    controller.add_marker();
    assert_eq!(disjunct_trims(&controller), expected);
}

#[test]
fn keyframes_follow_trim_into_export_plan() {
    let mut controller = create_controller();
    controller.set_freeze_crop_size_mode(true);
    controller.set_input_position(secs(40.0));
    controller.set_current_crop_rect(recut_cli::Rect::new(1000, 500, 960, 540));

    add_marker_at(&mut controller, 10.0);
    add_marker_at(&mut controller, 20.0);
    trim_at(&mut controller, 15.0);

    // keyframe at input 40s now sits at output 30s
    let frames = crop_frames(&controller);
    assert!(frames.contains(&900), "{:?}", frames);
    controller.set_output_position(secs(30.0)).unwrap();
    assert_eq!(controller.current_crop_rect().rect.center_x, 1000);
}
