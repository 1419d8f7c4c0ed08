use super::*;
use crate::animation::anim::Animation;
use crate::animation::combinators::Loop;
use crate::animation::tween::Tween;
use crate::encode::sink::InMemorySink;
use crate::foundation::value::PropertyBag;
use crate::widgets::fill::Fill;
use crate::widgets::scroll_view::ScrollView;

fn cfg() -> LoopConfig {
    LoopConfig {
        width: 8,
        height: 4,
        fps: 10,
        debug_focus: false,
        pacing: Pacing::FixedStep,
    }
}

fn fade_in(duration: f64) -> Animation {
    Tween::fade_in("a", duration).unwrap().into()
}

fn fade_out(duration: f64) -> Animation {
    Tween::fade_out("a", duration).unwrap().into()
}

fn solid(color: [u8; 3]) -> Scene {
    let mut scene = Scene::new(8, 4).unwrap();
    scene.add_child("a", Fill::new(8, 4, color).unwrap(), PropertyBag::at(0, 0));
    scene
}

fn orchestrator_with(scenes: Vec<(&str, Scene)>) -> Orchestrator {
    let mut orch = Orchestrator::new(cfg()).unwrap();
    for (id, scene) in scenes {
        orch.add_scene(id, scene).unwrap();
    }
    orch
}

fn opacity(orch: &Orchestrator) -> f64 {
    orch.active_scene().unwrap().props("a").unwrap().opacity()
}

#[test]
fn registry_rejects_bad_scenes_and_ids() {
    let mut orch = Orchestrator::new(cfg()).unwrap();
    let err = orch.add_scene("big", Scene::new(16, 4).unwrap()).unwrap_err();
    assert!(err.to_string().contains("canvas is 8x4"));
    orch.add_scene("one", solid([1, 1, 1])).unwrap();
    assert!(orch.add_scene("one", solid([2, 2, 2])).is_err());
    let err = orch.transition_to("nope").unwrap_err();
    assert!(err.to_string().contains("'nope' not found"));
    assert!(Orchestrator::new(LoopConfig { fps: 0, ..cfg() }).is_err());
}

#[test]
fn no_active_scene_renders_a_blank_canvas() {
    let mut orch = orchestrator_with(vec![("one", solid([1, 1, 1]))]);
    let px = orch.render_frame(3.0);
    assert_eq!((px.width(), px.height()), (8, 4));
    assert_eq!(px.get_pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn each_scene_runs_on_a_local_clock() {
    let mut orch = orchestrator_with(vec![
        ("one", solid([255, 0, 0]).with_entrance(vec![(0.0, fade_in(2.0))])),
        ("two", solid([0, 255, 0]).with_entrance(vec![(0.0, fade_in(2.0))])),
    ]);
    orch.transition_to("one").unwrap();
    orch.render_frame(1.0);
    assert_eq!(opacity(&orch), 0.5);

    orch.render_frame(5.0);
    orch.transition_to("two").unwrap();
    assert_eq!(orch.active_id(), Some("two"));
    let px = orch.render_frame(5.5);
    assert_eq!(orch.scene_time(), 0.5);
    assert_eq!(orch.active_scene().unwrap().time(), 0.5);
    assert_eq!(opacity(&orch), 0.25);
    assert_eq!(px.get_pixel(0, 0), [0, 64, 0, 64]);
}

#[test]
fn driver_moves_entrance_to_no_phase_once_complete() {
    let mut orch = orchestrator_with(vec![(
        "one",
        solid([255, 0, 0]).with_entrance(vec![(0.0, fade_in(2.0))]),
    )]);
    orch.transition_to("one").unwrap();
    orch.render_frame(2.5);
    assert_eq!(
        orch.active_scene().unwrap().current_phase(),
        Some(&Phase::Entrance)
    );
    orch.render_frame(2.6);
    assert_eq!(orch.completed_phase(), Some(&Phase::Entrance));
    assert_eq!(orch.active_scene().unwrap().current_phase(), None);
    assert_eq!(opacity(&orch), 1.0);
}

#[test]
fn transition_waits_for_the_exit_phase() {
    let mut orch = orchestrator_with(vec![
        ("one", solid([255, 0, 0]).with_exit(vec![(0.0, fade_out(1.0))])),
        ("two", solid([0, 0, 255])),
    ]);
    orch.transition_to("one").unwrap();
    orch.render_frame(3.0);
    orch.transition_to("two").unwrap();
    assert_eq!(orch.active_id(), Some("one"));
    assert_eq!(orch.pending_id(), Some("two"));

    orch.render_frame(3.5);
    assert_eq!(opacity(&orch), 0.5);
    orch.render_frame(4.2);
    assert_eq!(orch.active_id(), Some("one"));

    let px = orch.render_frame(4.3);
    assert_eq!(orch.active_id(), Some("two"));
    assert_eq!(orch.pending_id(), None);
    assert_eq!(orch.scene_time(), 0.0);
    assert_eq!(px.get_pixel(0, 0), [0, 0, 255, 255]);
}

#[test]
fn transition_without_exit_animations_is_immediate() {
    let mut orch = orchestrator_with(vec![("one", solid([1, 1, 1])), ("two", solid([2, 2, 2]))]);
    orch.transition_to("one").unwrap();
    orch.render_frame(1.0);
    orch.transition_to("two").unwrap();
    assert_eq!(orch.active_id(), Some("two"));
    assert_eq!(orch.pending_id(), None);
}

#[test]
fn commands_drive_focus_debug_scenes_and_quit() {
    let content = PixelBuffer::filled(20, 4, [9u8, 9, 9]).unwrap();
    let mut scrolling = Scene::new(8, 4).unwrap();
    scrolling.add_child("s1", ScrollView::new(8, 4, content.copy()).unwrap(), PropertyBag::at(0, 0));
    scrolling.add_child("s2", ScrollView::new(8, 4, content).unwrap(), PropertyBag::at(0, 0));
    let mut orch = orchestrator_with(vec![("scroll", scrolling), ("plain", solid([1, 1, 1]))]);
    orch.transition_to("scroll").unwrap();

    orch.input().push(Command::Right);
    orch.input().push(Command::Right);
    orch.input().push(Command::FocusNext);
    orch.input().push(Command::ToggleDebug);
    orch.tick(0.1);
    let scene = orch.active_scene_mut().unwrap();
    assert_eq!(scene.focused(), Some("s2"));
    assert_eq!(scene.child_mut::<ScrollView>("s1").unwrap().offset(), (2, 0));
    assert!(orch.debug_focus());

    assert!(orch.handle_command(Command::Up));
    assert!(orch.handle_command(Command::NextScene));
    assert_eq!(orch.active_id(), Some("plain"));
    assert!(orch.handle_command(Command::NextScene));
    assert_eq!(orch.active_id(), Some("scroll"));

    let stop = orch.stop_handle();
    assert!(!stop.is_stopped());
    orch.handle_command(Command::Quit);
    assert!(stop.is_stopped());
}

#[test]
fn fixed_step_run_presents_every_frame_in_the_window() {
    let mut orch = orchestrator_with(vec![("one", solid([5, 5, 5]))]);
    orch.transition_to("one").unwrap();
    let mut sink = InMemorySink::keep_last(3);
    let stats = orch.run(&mut sink, Some(1.0)).unwrap();
    assert_eq!(stats.frames, 10);
    assert_eq!(sink.presented(), 10);
    assert!(sink.ended());
    assert_eq!(sink.config().unwrap().width, 8);
    assert!((stats.elapsed - 0.9).abs() < 1e-9);
    assert_eq!(sink.last().unwrap().get_pixel(7, 3), [5, 5, 5, 255]);
}

#[test]
fn quit_command_stops_the_loop_after_the_current_frame() {
    let mut orch = orchestrator_with(vec![("one", solid([5, 5, 5]))]);
    orch.transition_to("one").unwrap();
    orch.input().push(Command::Quit);
    let mut sink = InMemorySink::new();
    let stats = orch.run(&mut sink, None).unwrap();
    assert_eq!(stats.frames, 1);
    assert!(sink.ended());
}

#[test]
fn waiting_for_a_phase_reports_completion_or_timeout() {
    let mut orch = orchestrator_with(vec![(
        "one",
        solid([255, 0, 0]).with_entrance(vec![(0.0, fade_in(0.5))]),
    )]);
    orch.transition_to("one").unwrap();
    let mut sink = InMemorySink::new();
    sink.begin(orch.config().sink_config()).unwrap();

    let done = orch
        .run_until_phase_complete(&mut sink, Phase::Entrance, Duration::from_secs(5))
        .unwrap();
    assert!(done);
    assert!(orch.time() < 1.0);
    assert_eq!(opacity(&orch), 1.0);

    let idle = orch
        .run_until_phase_complete(&mut sink, Phase::Idle, Duration::from_secs(1))
        .unwrap();
    assert!(!idle);
}

#[test]
fn endless_idle_loop_can_be_awaited_for_one_cycle() {
    let pulse = Loop::forever(Tween::fade_in("a", 0.4).unwrap()).unwrap();
    let mut orch = orchestrator_with(vec![(
        "one",
        solid([255, 0, 0])
            .with_entrance(vec![(0.0, fade_in(0.5))])
            .with_idle(vec![(0.0, pulse.into())]),
    )]);
    orch.transition_to("one").unwrap();
    let mut sink = InMemorySink::new();
    sink.begin(orch.config().sink_config()).unwrap();

    let done = orch
        .run_until_one_cycle(&mut sink, Phase::Idle, Duration::from_secs(5))
        .unwrap();
    assert!(done);
    assert!(orch.time() > 0.8 && orch.time() < 1.5, "stopped at {}", orch.time());
    assert_eq!(orch.active_scene().unwrap().current_phase(), Some(&Phase::Idle));
    assert_eq!(orch.active_scene().unwrap().loop_cycle(), Some(0.4));

    let completed = orch
        .run_until_phase_complete(&mut sink, Phase::Idle, Duration::from_secs(1))
        .unwrap();
    assert!(!completed);
}

#[test]
fn one_cycle_wait_without_a_loop_waits_for_completion() {
    let mut orch = orchestrator_with(vec![(
        "one",
        solid([255, 0, 0]).with_entrance(vec![(0.0, fade_in(0.5))]),
    )]);
    orch.transition_to("one").unwrap();
    let mut sink = InMemorySink::new();
    sink.begin(orch.config().sink_config()).unwrap();

    let done = orch
        .run_until_one_cycle(&mut sink, Phase::Entrance, Duration::from_secs(5))
        .unwrap();
    assert!(done);
    assert_eq!(opacity(&orch), 1.0);
}
